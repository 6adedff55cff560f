// src/services/extractor.rs

//! Notice field extractor.
//!
//! Runs every field heuristic over `title + "\n" + body` and assembles the
//! record. Each heuristic is independent and degrades to "absent" on its
//! own; building the extractor is the only step that can fail.

use chrono::{Datelike, Local};
use regex::Regex;

use crate::error::Result;
use crate::models::{ExtractedRecord, ExtractorRules, NoticeInput, check_reference_year};
use crate::services::{
    CategoryClassifier, DateNormalizer, DeadlineExtractor, EventDateExtractor, LineExtractor,
    LocationExtractor,
};

/// Turns a notice into an `ExtractedRecord`.
#[derive(Debug, Clone)]
pub struct NoticeExtractor {
    dates: EventDateExtractor,
    deadline: DeadlineExtractor,
    location: LocationExtractor,
    target: LineExtractor,
    apply_method: LineExtractor,
    category: CategoryClassifier,
    skip_title: Regex,
}

impl NoticeExtractor {
    /// Compile the rule tables.
    ///
    /// `reference_year` fills in dates written without a year; when `None`
    /// the rules' own setting is used, then the current local year.
    pub fn from_rules(rules: &ExtractorRules, reference_year: Option<i32>) -> Result<Self> {
        let patterns = rules.compile()?;

        let year = reference_year
            .or(rules.reference_year)
            .unwrap_or_else(|| Local::now().year());
        check_reference_year(year)?;
        let normalizer = DateNormalizer::new(year);
        log::debug!("Extractor reference year: {}", year);

        Ok(Self {
            dates: EventDateExtractor::new(
                normalizer,
                rules.event_keywords.clone(),
                rules.application_markers.clone(),
            ),
            deadline: DeadlineExtractor::new(normalizer, rules.deadline_keywords.clone()),
            location: LocationExtractor::new(
                patterns.locations,
                rules.negative_location_keywords.clone(),
            ),
            target: LineExtractor::new(rules.target_keywords.clone()),
            apply_method: LineExtractor::new(rules.apply_keywords.clone()),
            category: CategoryClassifier::new(rules.categories.clone()),
            skip_title: patterns.skip_title,
        })
    }

    /// Whether a title is only a placeholder such as `[공지]`.
    pub fn is_placeholder_title(&self, title: &str) -> bool {
        let title = title.trim();
        title.is_empty() || self.skip_title.is_match(title)
    }

    pub fn extract(&self, notice: &NoticeInput) -> ExtractedRecord {
        let text = notice.full_text();

        ExtractedRecord {
            title: notice.title.trim().to_string(),
            dates: self.dates.extract(&text),
            deadline: self.deadline.extract(&text),
            location: self.location.extract(&text),
            target: self.target.extract(&text),
            apply_method: self.apply_method.extract(&text),
            category: self.category.classify(&text),
            posted: notice.posted,
            attachments: notice.attachments.clone(),
        }
    }
}
