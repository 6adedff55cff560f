// src/services/dates.rs

//! Event-date extractor.
//!
//! Finds the date or date range an event takes place on. A labelled
//! `일시: start ~ end` line wins; otherwise every date written inline
//! outside application lines is collected.

use std::collections::BTreeSet;
use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use crate::models::NormalizedDate;
use crate::services::normalizer::{DateNormalizer, has_explicit_year};
use crate::utils::contains_any;

/// Bracketed annotations such as `(목)`, `[온라인]`, `{별첨}`.
static BRACKETED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[(\[{][^)\]}]*[)\]}]|[〔〕]").expect("bracket pattern must compile")
});

/// `<full date> <dash or tilde> <date, year optional>`.
static DATE_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?P<start>20\d{2}[.년\s]*\d{1,2}[.월\s]*\d{1,2}일*)\s*[~∼－ー-]+\s*(?P<end>(?:20\d{2}[.년\s]*)?\d{1,2}[.월\s]*\d{1,2}일*)",
    )
    .expect("range pattern must compile")
});

/// Inline date shapes, strictest first.
static INLINE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"20\d{2}[./-]\d{1,2}[./-]\d{1,2}",
        r"20\d{2}년\s?\d{1,2}월\s?\d{1,2}일",
        r"\d{1,2}월\s?\d{1,2}일",
        r"\d{1,2}[./]\d{1,2}",
    ]
    .into_iter()
    .map(|p| Regex::new(p).expect("inline date pattern must compile"))
    .collect()
});

/// Ways of finding event dates, tried in order until one yields a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStrategy {
    /// A keyword-labelled line holding `start ~ end`
    LabelledRange,
    /// Every date-shaped fragment outside application lines
    InlineScan,
}

const STRATEGIES: [DateStrategy; 2] = [DateStrategy::LabelledRange, DateStrategy::InlineScan];

/// Extracts an event's date or date range from notice text.
#[derive(Debug, Clone)]
pub struct EventDateExtractor {
    normalizer: DateNormalizer,
    event_keywords: Vec<String>,
    application_markers: Vec<String>,
}

impl EventDateExtractor {
    pub fn new(
        normalizer: DateNormalizer,
        event_keywords: Vec<String>,
        application_markers: Vec<String>,
    ) -> Self {
        Self {
            normalizer,
            event_keywords,
            application_markers,
        }
    }

    /// Return no dates, a single date, or a chronological `[start, end]`.
    pub fn extract(&self, text: &str) -> Vec<NormalizedDate> {
        STRATEGIES
            .iter()
            .find_map(|&strategy| {
                let dates = self.run(strategy, text)?;
                log::debug!("Event dates found by {:?}: {:?}", strategy, dates);
                Some(dates)
            })
            .unwrap_or_default()
    }

    fn run(&self, strategy: DateStrategy, text: &str) -> Option<Vec<NormalizedDate>> {
        match strategy {
            DateStrategy::LabelledRange => self.labelled_range(text),
            DateStrategy::InlineScan => self.inline_scan(text),
        }
    }

    fn labelled_range(&self, text: &str) -> Option<Vec<NormalizedDate>> {
        text.lines()
            .filter(|line| contains_any(line, &self.event_keywords))
            .find_map(|line| {
                let line = BRACKETED.replace_all(line, "");
                let caps = DATE_RANGE.captures(&line)?;
                self.resolve_range(&caps["start"], &caps["end"])
            })
    }

    /// Normalize both ends, borrowing the start's year for a year-less end.
    fn resolve_range(&self, start_raw: &str, end_raw: &str) -> Option<Vec<NormalizedDate>> {
        let start = self.normalizer.normalize(start_raw)?;

        let (mut start, mut end) = if has_explicit_year(end_raw) {
            (start, self.normalizer.normalize(end_raw)?)
        } else {
            let end = self.normalizer.normalize_in_year(end_raw, start.year())?;
            // `12.28 ~ 1.3` crosses into the next year.
            let end = if end < start {
                end.next_year().unwrap_or(end)
            } else {
                end
            };
            (start, end)
        };

        if end < start {
            std::mem::swap(&mut start, &mut end);
        }
        if start == end {
            return Some(vec![start]);
        }
        Some(vec![start, end])
    }

    fn inline_scan(&self, text: &str) -> Option<Vec<NormalizedDate>> {
        let mut found = BTreeSet::new();

        for line in text.lines() {
            if contains_any(line, &self.application_markers) {
                continue;
            }

            // Looser patterns must not re-read text a stricter one matched.
            let mut claimed: Vec<Range<usize>> = Vec::new();
            for pattern in INLINE_PATTERNS.iter() {
                for m in pattern.find_iter(line) {
                    let span = m.range();
                    if claimed.iter().any(|c| c.start < span.end && span.start < c.end) {
                        continue;
                    }
                    if let Some(date) = self.normalizer.normalize(m.as_str()) {
                        found.insert(date);
                    }
                    claimed.push(span);
                }
            }
        }

        let first = *found.first()?;
        let last = *found.last()?;
        if first == last {
            Some(vec![first])
        } else {
            Some(vec![first, last])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExtractorRules;

    fn extractor() -> EventDateExtractor {
        let rules = ExtractorRules::default();
        EventDateExtractor::new(
            DateNormalizer::new(2025),
            rules.event_keywords,
            rules.application_markers,
        )
    }

    fn dates(text: &str) -> Vec<String> {
        extractor()
            .extract(text)
            .iter()
            .map(|d| d.to_string())
            .collect()
    }

    #[test]
    fn test_labelled_range_with_weekdays() {
        let text = "SW 특강 안내\n일시: 2025.05.01(목) ~ 05.10(토)\n장소: 공학관";
        assert_eq!(dates(text), vec!["2025-05-01", "2025-05-10"]);
    }

    #[test]
    fn test_labelled_range_korean_form() {
        let text = "교육기간 : 2025년 7월 1일(화) ∼ 7월 4일(금)";
        assert_eq!(dates(text), vec!["2025-07-01", "2025-07-04"]);
    }

    #[test]
    fn test_labelled_range_crossing_year() {
        let text = "운영기간: 2025.12.29 ~ 01.02";
        assert_eq!(dates(text), vec!["2025-12-29", "2026-01-02"]);
    }

    #[test]
    fn test_labelled_range_with_explicit_end_year() {
        let text = "행사기간: 2025.11.20 - 2026.1.5";
        assert_eq!(dates(text), vec!["2025-11-20", "2026-01-05"]);
    }

    #[test]
    fn test_later_keyword_line_used_when_first_has_no_range() {
        let text = "일시: 추후 공지\n진행기간: 2025.03.02 ~ 03.06";
        assert_eq!(dates(text), vec!["2025-03-02", "2025-03-06"]);
    }

    #[test]
    fn test_inline_fallback_skips_application_lines() {
        let text = "독서 토론회 안내\n행사는 5월 3일에 진행됩니다\n신청 접수: 4월 1일";
        assert_eq!(dates(text), vec!["2025-05-03"]);
    }

    #[test]
    fn test_inline_fallback_reports_min_and_max() {
        let text = "1차: 2025.06.10\n2차: 2025.06.03\n3차: 6월 20일";
        assert_eq!(dates(text), vec!["2025-06-03", "2025-06-20"]);
    }

    #[test]
    fn test_inline_fallback_does_not_reread_full_dates() {
        let extractor = EventDateExtractor::new(
            DateNormalizer::new(2030),
            ExtractorRules::default().event_keywords,
            ExtractorRules::default().application_markers,
        );
        let found = extractor.extract("행사일 2025년 5월 3일");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].to_string(), "2025-05-03");
    }

    #[test]
    fn test_no_dates() {
        assert!(dates("공지사항\n자세한 내용은 첨부파일 참고").is_empty());
    }

    #[test]
    fn test_never_more_than_two_dates() {
        let text = "5월 1일\n5월 2일\n5월 3일\n5월 4일";
        assert_eq!(dates(text), vec!["2025-05-01", "2025-05-04"]);
    }
}
