// src/services/normalizer.rs

//! Date normalizer.
//!
//! Turns heterogeneous Korean/numeric date fragments such as
//! `2025년 4월 30일`, `2025.05.01(목)` or `~ 5.10` into canonical
//! `YYYY-MM-DD` dates. Anything that does not fit a known template is
//! simply not a date.

use std::sync::LazyLock;

use chrono::{Datelike, Local};
use regex::Regex;

use crate::models::NormalizedDate;

/// A full-match calendar template.
struct DateTemplate {
    name: &'static str,
    regex: Regex,
}

/// Templates in the order they are tried. Year-less templates have no `y` group.
static TEMPLATES: LazyLock<Vec<DateTemplate>> = LazyLock::new(|| {
    [
        ("ymd_korean", r"^(?P<y>\d{4})년(?P<m>\d{1,2})월(?P<d>\d{1,2})일$"),
        ("ymd_dot", r"^(?P<y>\d{4})\.(?P<m>\d{1,2})\.(?P<d>\d{1,2})$"),
        ("ymd_dash", r"^(?P<y>\d{4})-(?P<m>\d{1,2})-(?P<d>\d{1,2})$"),
        ("md_korean", r"^(?P<m>\d{1,2})월(?P<d>\d{1,2})일$"),
        ("md_dot", r"^(?P<m>\d{1,2})\.(?P<d>\d{1,2})$"),
    ]
    .into_iter()
    .map(|(name, pattern)| DateTemplate {
        name,
        regex: Regex::new(pattern).expect("date template must compile"),
    })
    .collect()
});

static PARENTHESIZED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(.*?\)").expect("paren pattern must compile"));

static TIME_OF_DAY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{1,2}:\d{2}").expect("time pattern must compile"));

/// Parses raw date fragments into canonical dates.
#[derive(Debug, Clone, Copy)]
pub struct DateNormalizer {
    reference_year: i32,
}

impl Default for DateNormalizer {
    fn default() -> Self {
        Self::new(Local::now().year())
    }
}

impl DateNormalizer {
    /// Create a normalizer that fills year-less dates with `reference_year`.
    pub fn new(reference_year: i32) -> Self {
        Self { reference_year }
    }

    /// Normalize a fragment, using the reference year when none is written.
    pub fn normalize(&self, raw: &str) -> Option<NormalizedDate> {
        self.normalize_in_year(raw, self.reference_year)
    }

    /// Normalize a fragment, using `default_year` when none is written.
    pub fn normalize_in_year(&self, raw: &str, default_year: i32) -> Option<NormalizedDate> {
        let without_notes = PARENTHESIZED.replace_all(raw, "");
        let compact: String = without_notes
            .chars()
            .filter(|c| *c != '~' && !c.is_whitespace())
            .collect();

        // A clock time is not a date.
        if TIME_OF_DAY.is_match(&compact) {
            return None;
        }

        let (template, caps) = TEMPLATES
            .iter()
            .find_map(|t| t.regex.captures(&compact).map(|caps| (t, caps)))?;

        let year = match caps.name("y") {
            Some(y) => y.as_str().parse().ok()?,
            None => default_year,
        };
        let month = caps["m"].parse().ok()?;
        let day = caps["d"].parse().ok()?;

        let date = NormalizedDate::from_ymd(year, month, day);
        if date.is_none() {
            log::debug!(
                "Fragment '{}' matched template {} but is not a calendar date",
                raw,
                template.name
            );
        }
        date
    }
}

/// Whether a fragment spells out a four-digit year.
pub fn has_explicit_year(raw: &str) -> bool {
    static YEAR: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"\d{4}").expect("year pattern must compile"));
    YEAR.is_match(raw)
}
