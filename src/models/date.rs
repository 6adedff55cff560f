// src/models/date.rs

//! Canonical calendar date produced by the normalizer.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Canonical format: zero-padded `YYYY-MM-DD`.
pub const CANONICAL_FORMAT: &str = "%Y-%m-%d";

/// A calendar date rendered as `YYYY-MM-DD`.
///
/// Ordering follows the calendar, which is also the lexicographic order of
/// the canonical string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NormalizedDate(NaiveDate);

impl NormalizedDate {
    /// Build from year, month and day. Returns `None` for impossible dates.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Parse a canonical `YYYY-MM-DD` string.
    pub fn parse(s: &str) -> Option<Self> {
        NaiveDate::parse_from_str(s, CANONICAL_FORMAT).ok().map(Self)
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Same month and day one year later, if that date exists.
    pub fn next_year(&self) -> Option<Self> {
        Self::from_ymd(self.0.year() + 1, self.0.month(), self.0.day())
    }
}

impl fmt::Display for NormalizedDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(CANONICAL_FORMAT))
    }
}

impl Serialize for NormalizedDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for NormalizedDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid canonical date: {s}")))
    }
}
