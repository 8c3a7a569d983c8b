//! Store image records shown in the image browser.

use serde::{Deserialize, Serialize};

/// Image URL and alt text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageSource {
    /// Public CDN URL.
    pub url: String,
    /// Alt text, if the merchant set one.
    #[serde(default)]
    pub alt_text: Option<String>,
}

/// One store image.
///
/// `id` is unique within a page; nothing enforces uniqueness across pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    /// Shopify GID (e.g. `gid://shopify/MediaImage/123`).
    pub id: String,
    /// Image payload, absent while Shopify is still processing the upload.
    #[serde(default)]
    pub image: Option<ImageSource>,
    /// GraphQL type the record came from, shown as the image's section.
    #[serde(rename = "__typename", default)]
    pub typename: String,
    /// Link used by the "view" action.
    #[serde(default)]
    pub src: Option<String>,
}

impl ImageRecord {
    /// Section label for display.
    #[must_use]
    pub fn section(&self) -> &str {
        &self.typename
    }

    /// Image URL, if present.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.image.as_ref().map(|i| i.url.as_str())
    }
}
