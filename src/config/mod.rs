//! Loading of page, site and paginator documents.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── error      # ConfigError, ConfigDiagnostics
//! ├── field      # FieldPath names used in diagnostics
//! ├── validate   # site and paginator checks
//! └── mod.rs     # document loading (this file)
//! ```
//!
//! # Formats
//!
//! | Extension | Parser       | Notes                                  |
//! |-----------|--------------|----------------------------------------|
//! | `.toml`   | `toml`       | datetimes become RFC 3339 strings      |
//! | `.json`   | `serde_json` | key order is preserved                 |
//!
//! Every document must be a table at the top level.

mod error;
mod field;
mod validate;

pub use error::{ConfigDiagnostic, ConfigDiagnostics, ConfigError};
pub use field::FieldPath;
pub use validate::{validate_paginator, validate_site};

use std::{fs, path::Path};

use serde_json::Value;

use crate::debug;
use crate::page::{Page, Paginator, Site};

/// Document format, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Toml,
    Json,
}

impl Format {
    fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("toml") {
            Some(Self::Toml)
        } else if ext.eq_ignore_ascii_case("json") {
            Some(Self::Json)
        } else {
            None
        }
    }
}

/// Read a TOML or JSON document into a generic value.
pub fn load_document(path: &Path) -> Result<Value, ConfigError> {
    let format =
        Format::from_path(path).ok_or_else(|| ConfigError::UnsupportedFormat(path.to_path_buf()))?;
    let content = fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
    let value = parse_document(&content, format, path)?;

    if !value.is_object() {
        return Err(ConfigError::NotMapping(path.to_path_buf()));
    }
    debug!("config"; "loaded {} ({:?})", path.display(), format);
    Ok(value)
}

pub fn load_page(path: &Path) -> Result<Page, ConfigError> {
    load_document(path).map(Page::from_value)
}

pub fn load_site(path: &Path) -> Result<Site, ConfigError> {
    load_document(path).map(Site::from_value)
}

/// Load a paginator and reject impossible positions.
pub fn load_paginator(path: &Path) -> Result<Paginator, ConfigError> {
    let value = load_document(path)?;
    let paginator: Paginator =
        serde_json::from_value(value).map_err(|e| ConfigError::Json(path.to_path_buf(), e))?;
    validate_paginator(&paginator)
        .into_result()
        .map_err(ConfigError::Diagnostics)?;
    Ok(paginator)
}

fn parse_document(content: &str, format: Format, path: &Path) -> Result<Value, ConfigError> {
    match format {
        Format::Json => {
            serde_json::from_str(content).map_err(|e| ConfigError::Json(path.to_path_buf(), e))
        }
        Format::Toml => toml::from_str::<toml::Value>(content)
            .map(toml_to_json)
            .map_err(|e| ConfigError::Toml(path.to_path_buf(), e)),
    }
}

/// Convert a TOML value; datetimes are kept in their textual form.
fn toml_to_json(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::from(i),
        toml::Value::Float(f) => serde_json::Number::from_f64(f).map_or(Value::Null, Value::Number),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(key, value)| (key, toml_to_json(value)))
                .collect(),
        ),
    }
}
