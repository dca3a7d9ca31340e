//! Command handlers: load inputs, build the drop, print the result.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use super::InputArgs;
use crate::config::{self, validate_site};
use crate::page::{Page, Paginator, Site};
use crate::seo::{SeoDrop, render_drop};
use crate::{debug, log};

/// Loaded page, site and optional paginator.
struct Inputs {
    page: Page,
    site: Site,
    paginator: Option<Paginator>,
}

impl Inputs {
    fn load(input: &InputArgs, paginator: Option<&Path>) -> Result<Self> {
        let site = config::load_site(&input.site)
            .with_context(|| format!("failed to load site from {}", input.site.display()))?;
        validate_site(&site).print_warnings();

        let page = config::load_page(&input.page)
            .with_context(|| format!("failed to load page from {}", input.page.display()))?;

        let paginator = paginator
            .map(|path| {
                config::load_paginator(path)
                    .with_context(|| format!("failed to load paginator from {}", path.display()))
            })
            .transpose()?;

        Ok(Self {
            page,
            site,
            paginator,
        })
    }

    fn seo_drop<'a>(&'a self, text: &'a str) -> SeoDrop<'a> {
        SeoDrop::new(&self.page, &self.site, text, self.paginator.as_ref())
    }
}

/// `render`: write the HTML fragment to stdout or `output`.
pub fn run_render(
    input: &InputArgs,
    paginator: Option<&Path>,
    options: &str,
    output: Option<&Path>,
) -> Result<()> {
    let inputs = Inputs::load(input, paginator)?;
    let html = render_drop(&inputs.seo_drop(options))?;

    match output {
        Some(path) => {
            fs::write(path, &html)
                .with_context(|| format!("failed to write {}", path.display()))?;
            log!("render"; "wrote {}", path.display());
        }
        None => print!("{html}"),
    }
    Ok(())
}

/// `json-ld`: print the structured data, pretty-printed.
pub fn run_json_ld(input: &InputArgs) -> Result<()> {
    let inputs = Inputs::load(input, None)?;
    let json = inputs
        .seo_drop("")
        .json_ld()
        .to_json_pretty()
        .context("failed to serialize structured data")?;
    println!("{json}");
    Ok(())
}

/// `inspect`: print every resolved field of the drop.
pub fn run_inspect(input: &InputArgs, paginator: Option<&Path>) -> Result<()> {
    let inputs = Inputs::load(input, paginator)?;
    let drop = inputs.seo_drop("");
    let json = serde_json::to_string_pretty(&drop.view()).context("failed to serialize fields")?;
    debug!("inspect"; "resolved {} for {}", drop.seo_type(), drop.page().url().unwrap_or("<no url>"));
    println!("{json}");
    Ok(())
}
