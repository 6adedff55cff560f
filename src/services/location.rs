// src/services/location.rs

//! Location extractor.
//!
//! Prefers an explicit `장소:` label; otherwise falls back to known
//! building and campus names.

use std::sync::LazyLock;

use regex::Regex;

use crate::utils::{contains_any, non_empty};

/// Date-shaped text that would otherwise look like room numbers.
static DATE_NOISE: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\d{4}[./년[^\S\n]]*\d{1,2}[./월[^\S\n]]*\d{1,2}[일[^\S\n]]*",
        r"\d{2}[./]\d{1,2}[./]\d{1,2}\.",
    ]
    .into_iter()
    .map(|p| Regex::new(p).expect("date noise pattern must compile"))
    .collect()
});

/// `장소:` with optional spacing between the syllables and a half- or full-width colon.
static LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"장[^\S\n]*소[^\S\n]*[:：]?[^\S\n]*(?P<rest>.*)").expect("label pattern must compile")
});

/// The labelled value ends at the first comma, period or `등`.
static LABEL_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[,.등]").expect("label end pattern must compile"));

/// Grammatical particles trailing a venue name.
static POSTPOSITION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:에서|에|은|는|이|가|으로|로)\b").expect("postposition pattern must compile")
});

/// Extracts a best-effort venue description.
#[derive(Debug, Clone)]
pub struct LocationExtractor {
    patterns: Vec<Regex>,
    negative_keywords: Vec<String>,
}

impl LocationExtractor {
    pub fn new(patterns: Vec<Regex>, negative_keywords: Vec<String>) -> Self {
        Self {
            patterns,
            negative_keywords,
        }
    }

    pub fn extract(&self, text: &str) -> Option<String> {
        let text = DATE_NOISE
            .iter()
            .fold(text.to_string(), |acc, re| re.replace_all(&acc, "").into_owned());

        // A label always decides, even when its value is rejected.
        if let Some(caps) = LABEL.captures(&text) {
            let rest = &caps["rest"];
            let value = LABEL_END.split(rest).next().unwrap_or(rest);
            return self.accept(value);
        }

        self.patterns.iter().find_map(|pattern| {
            text.lines()
                .find_map(|line| pattern.find(line))
                .map(|m| m.as_str().trim())
        })
        .and_then(|venue| {
            let venue = match POSTPOSITION.find(venue) {
                Some(m) => &venue[..m.start()],
                None => venue,
            };
            self.accept(venue)
        })
    }

    /// Reject empty values and ones signalling "not decided yet".
    fn accept(&self, value: &str) -> Option<String> {
        if contains_any(value, &self.negative_keywords) {
            log::debug!("Location '{}' rejected by negative keyword", value.trim());
            return None;
        }
        non_empty(value)
    }
}
