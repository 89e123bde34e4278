//! schema.org JSON-LD generation.

use crate::config::SiteConfig;
use crate::store::Document;
use serde::{Deserialize, Serialize};

const SCHEMA_CONTEXT: &str = "https://schema.org";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageObject {
    #[serde(rename = "@type")]
    pub kind: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    #[serde(rename = "@type")]
    pub kind: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    #[serde(rename = "@type")]
    pub kind: String,
    pub name: String,
    pub logo: ImageObject,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleSchema {
    #[serde(rename = "@context")]
    pub context: String,
    #[serde(rename = "@type")]
    pub kind: String,
    pub headline: String,
    pub date_published: String,
    pub date_modified: String,
    pub author: Person,
    pub publisher: Organization,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageObject>,
}

/// Article markup for a document
pub fn article_schema(document: &Document, site: &SiteConfig) -> ArticleSchema {
    ArticleSchema {
        context: SCHEMA_CONTEXT.to_string(),
        kind: "Article".to_string(),
        headline: document.title.clone(),
        date_published: document.published.clone(),
        date_modified: document.modified.clone(),
        author: Person {
            kind: "Person".to_string(),
            name: document.author.clone(),
        },
        publisher: Organization {
            kind: "Organization".to_string(),
            name: site.name.clone(),
            logo: ImageObject {
                kind: "ImageObject".to_string(),
                url: site.logo_url.clone(),
                width: None,
                height: None,
            },
        },
        image: document.image.as_ref().map(|image| ImageObject {
            kind: "ImageObject".to_string(),
            url: image.url.clone(),
            width: Some(image.width),
            height: Some(image.height),
        }),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebSiteSchema {
    #[serde(rename = "@context")]
    pub context: String,
    #[serde(rename = "@type")]
    pub kind: String,
    pub name: String,
    pub description: String,
}

/// Title, description and WebSite markup generated for a site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedMetadata {
    pub title: String,
    pub description: String,
    pub schema: WebSiteSchema,
}

/// Build metadata from the supplied title and description, falling back to the site name
pub fn generate_metadata(
    title: Option<&str>,
    description: Option<&str>,
    site: &SiteConfig,
) -> GeneratedMetadata {
    let title = title
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(&site.name)
        .to_string();
    let description = description.map(str::trim).unwrap_or_default().to_string();

    GeneratedMetadata {
        schema: WebSiteSchema {
            context: SCHEMA_CONTEXT.to_string(),
            kind: "WebSite".to_string(),
            name: title.clone(),
            description: description.clone(),
        },
        title,
        description,
    }
}

/// Render a value as a JSON-LD script tag
pub fn json_ld_script<T: Serialize>(value: &T) -> serde_json::Result<String> {
    // `</` would end the script element early
    let json = serde_json::to_string(value)?.replace("</", "<\\/");
    Ok(format!(r#"<script type="application/ld+json">{}</script>"#, json))
}
