//! Notice data structures handed over by a collector.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::models::NormalizedDate;

/// An entry on a board's list page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NoticeRef {
    /// Collector-specific identifier used to resolve the detail page
    pub id: String,

    /// Title as shown on the list page
    pub title: String,

    /// Full URL to the notice, if the collector knows it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    /// Posting date (작성일) shown on the list page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posted: Option<NormalizedDate>,
}

/// A notice's title and HTML-stripped body text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NoticeInput {
    /// Notice title
    pub title: String,

    /// Multi-line body text
    pub body: String,

    /// Full URL to the notice
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    /// Posting date (작성일)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posted: Option<NormalizedDate>,

    /// Document and image attachment URLs
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<String>,
}

impl NoticeInput {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            link: None,
            posted: None,
            attachments: Vec::new(),
        }
    }

    /// Title and body joined by a line break, the text every extractor scans.
    pub fn full_text(&self) -> String {
        format!("{}\n{}", self.title, self.body)
    }

    /// Stable content hash used to drop duplicate notices.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.title.trim().as_bytes());
        hasher.update([0u8]);
        hasher.update(self.body.trim().as_bytes());
        hex::encode(hasher.finalize())
    }
}
