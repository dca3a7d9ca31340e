//! Schema.org JSON-LD projection of a [`SeoDrop`].
//!
//! Keys are emitted in a fixed order and absent values are skipped. Custom
//! data from `page.structured_data` is merged over the computed object, then
//! every `null` is removed so none reaches the output.

use serde::Serialize;
use serde_json::Value;

use super::drop::SeoDrop;
use super::image::ImageRecord;
use super::merge::{deep_merge, strip_nulls};
use crate::page::JsonMap;

const CONTEXT: &str = "https://schema.org";

/// Types that describe the page they are published on.
const MAIN_ENTITY_TYPES: [&str; 2] = ["BlogPosting", "CreativeWork"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Person {
    #[serde(rename = "@type")]
    kind: &'static str,
    name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ImageObject {
    /// Bare URL when the image has nothing but a path.
    Url(String),
    Object(ImageFields),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageFields {
    #[serde(rename = "@type")]
    kind: &'static str,
    url: String,
    #[serde(flatten)]
    extra: JsonMap,
}

impl From<&ImageRecord> for ImageObject {
    fn from(image: &ImageRecord) -> Self {
        if image.is_path_only() {
            Self::Url(image.path.clone())
        } else {
            Self::Object(ImageFields {
                kind: "imageObject",
                url: image.path.clone(),
                extra: image.extra.clone(),
            })
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Logo {
    #[serde(rename = "@type")]
    kind: &'static str,
    url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Publisher {
    #[serde(rename = "@type")]
    kind: &'static str,
    logo: Logo,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MainEntity {
    #[serde(rename = "@type")]
    kind: &'static str,
    #[serde(rename = "@id", skip_serializing_if = "Option::is_none")]
    id: Option<String>,
}

/// The structured-data object for one page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonLd {
    #[serde(rename = "@context")]
    context: &'static str,
    #[serde(rename = "@type")]
    kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    headline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    author: Option<Person>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<ImageObject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    date_published: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    date_modified: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    publisher: Option<Publisher>,
    #[serde(skip_serializing_if = "Option::is_none")]
    main_entity_of_page: Option<MainEntity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    same_as: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    /// Merged over the computed object on serialization.
    #[serde(skip)]
    custom: Option<JsonMap>,
}

impl JsonLd {
    pub fn from_drop(drop: &SeoDrop<'_>) -> Self {
        let author_name = drop
            .author()
            .and_then(|author| author.name.clone());
        let kind = drop.seo_type().to_string();
        let main_entity_of_page = MAIN_ENTITY_TYPES.contains(&kind.as_str()).then(|| MainEntity {
            kind: "WebPage",
            id: drop.canonical_url().map(str::to_string),
        });

        Self {
            context: CONTEXT,
            name: drop.name().map(str::to_string),
            headline: drop.page_title().map(str::to_string),
            author: author_name.clone().map(|name| Person {
                kind: "Person",
                name,
            }),
            image: drop.image().map(ImageObject::from),
            date_published: drop.date_published().map(str::to_string),
            date_modified: drop.date_modified().map(str::to_string),
            description: drop.description().map(str::to_string),
            publisher: drop.logo().map(|logo| Publisher {
                kind: "Organization",
                logo: Logo {
                    kind: "ImageObject",
                    url: logo.to_string(),
                },
                name: author_name,
            }),
            main_entity_of_page,
            same_as: drop.links().map(<[String]>::to_vec),
            url: drop.canonical_url().map(str::to_string),
            custom: drop.custom_structured_data().cloned(),
            kind,
        }
    }

    /// Computed object with custom data merged in and nulls removed.
    pub fn to_value(&self) -> serde_json::Result<Value> {
        let mut value = serde_json::to_value(self)?;
        if let (Value::Object(map), Some(custom)) = (&mut value, &self.custom) {
            deep_merge(map, custom);
        }
        strip_nulls(&mut value);
        Ok(value)
    }

    /// Compact JSON, as embedded in the `ld+json` script.
    ///
    /// `<` is written as `\u003c` so no value can end the script element.
    pub fn to_json(&self) -> serde_json::Result<String> {
        let json = serde_json::to_string(&self.to_value()?)?;
        Ok(json.replace('<', "\\u003c"))
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.to_value()?)
    }
}
