// src/models/record.rs

//! Structured record extracted from a single notice.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::NormalizedDate;
use crate::utils::text::truncate_graphemes;

/// Classification bucket assigned by keyword presence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Category {
    /// 공모전: contests, hackathons, idea competitions
    #[serde(rename = "공모전")]
    Contest,

    /// 대외활동: internships, exchanges, volunteering
    #[serde(rename = "대외활동")]
    ExternalActivity,

    /// 비교과: lectures, workshops, seminars
    #[serde(rename = "비교과")]
    Extracurricular,

    /// 기타: nothing matched
    #[default]
    #[serde(rename = "기타")]
    Other,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::Contest => "공모전",
            Category::ExternalActivity => "대외활동",
            Category::Extracurricular => "비교과",
            Category::Other => "기타",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Fields pulled out of one notice.
///
/// `dates` holds nothing, a single date, or a chronological `[start, end]`
/// pair. Optional strings are never empty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExtractedRecord {
    pub title: String,
    pub dates: Vec<NormalizedDate>,
    pub deadline: Option<NormalizedDate>,
    pub location: Option<String>,
    pub target: Option<String>,
    pub apply_method: Option<String>,
    pub category: Category,

    /// Posting date, passed through from the notice
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posted: Option<NormalizedDate>,

    /// Attachment URLs, passed through from the notice
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<String>,
}

/// Placeholder used for absent fields in formatted output.
const ABSENT: &str = "없음";

impl ExtractedRecord {
    /// Event start date, if any.
    pub fn start(&self) -> Option<NormalizedDate> {
        self.dates.first().copied()
    }

    /// Event end date; equals the start for single-day events.
    pub fn end(&self) -> Option<NormalizedDate> {
        self.dates.last().copied()
    }

    /// Dates rendered as `start ~ end`, a single date, or the absent marker.
    pub fn dates_display(&self) -> String {
        match self.dates.as_slice() {
            [] => ABSENT.to_string(),
            [single] => single.to_string(),
            [start, .., end] => format!("{start} ~ {end}"),
        }
    }

    /// Format the record for display using a template.
    ///
    /// Supported placeholders:
    /// - `{index}`, `{title}`, `{category}`
    /// - `{dates}`, `{deadline}`, `{location}`, `{target}`, `{apply_method}`
    /// - `{posted}`, `{attachments}` (count)
    ///
    /// Free-text fields are cut to `max_chars` graphemes.
    pub fn format(&self, template: &str, index: usize, max_chars: usize) -> String {
        let text = |value: &Option<String>| {
            value
                .as_deref()
                .map_or_else(|| ABSENT.to_string(), |v| truncate_graphemes(v, max_chars))
        };

        template
            .replace("{index}", &index.to_string())
            .replace("{title}", &truncate_graphemes(&self.title, max_chars))
            .replace("{dates}", &self.dates_display())
            .replace(
                "{deadline}",
                &self
                    .deadline
                    .map_or_else(|| ABSENT.to_string(), |d| d.to_string()),
            )
            .replace("{location}", &text(&self.location))
            .replace("{target}", &text(&self.target))
            .replace("{apply_method}", &text(&self.apply_method))
            .replace("{category}", self.category.label())
            .replace(
                "{posted}",
                &self
                    .posted
                    .map_or_else(|| ABSENT.to_string(), |d| d.to_string()),
            )
            .replace("{attachments}", &self.attachments.len().to_string())
    }
}
