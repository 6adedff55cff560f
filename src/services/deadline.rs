// src/services/deadline.rs

//! Application-deadline extractor.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::NormalizedDate;
use crate::services::normalizer::DateNormalizer;
use crate::utils::contains_any;

/// Either a full year-month-day or a bare month-day fragment.
static DEADLINE_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?P<full>20\d{2}[./년\s-]*\d{1,2}[./월\s-]*\d{1,2}[일\s]*)|(?P<md>\d{1,2}[./월\s]*\d{1,2}[일\s]*)",
    )
    .expect("deadline pattern must compile")
});

/// Gap between a full date and the end of its range: a tilde or dash,
/// optionally around `(화)`-style weekday annotations.
static RANGE_GAP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\s|\([^)]*\))*[~∼－ー-](?:\s|\([^)]*\))*$")
        .expect("range gap pattern must compile")
});

/// Finds the last day to apply from the first application-period line.
#[derive(Debug, Clone)]
pub struct DeadlineExtractor {
    normalizer: DateNormalizer,
    keywords: Vec<String>,
}

impl DeadlineExtractor {
    pub fn new(normalizer: DateNormalizer, keywords: Vec<String>) -> Self {
        Self {
            normalizer,
            keywords,
        }
    }

    /// Latest date on the first line carrying a deadline keyword.
    ///
    /// Later lines are never consulted, even when nothing on that first
    /// line is a usable date.
    pub fn extract(&self, text: &str) -> Option<NormalizedDate> {
        let line = text.lines().find(|line| contains_any(line, &self.keywords))?;
        self.latest_on_line(line)
    }

    fn latest_on_line(&self, line: &str) -> Option<NormalizedDate> {
        let mut anchor: Option<NormalizedDate> = None;
        // End offset of the previous match, if it was a full date.
        let mut full_end: Option<usize> = None;
        let mut latest: Option<NormalizedDate> = None;

        for caps in DEADLINE_DATE.captures_iter(line) {
            let Some(whole) = caps.get(0) else { continue };
            let date = if let Some(full) = caps.name("full") {
                let date = self.normalizer.normalize(full.as_str());
                anchor = date.or(anchor);
                date
            } else if let Some(md) = caps.name("md") {
                let closes_range =
                    full_end.is_some_and(|end| RANGE_GAP.is_match(&line[end..whole.start()]));
                self.month_day(md.as_str(), anchor, closes_range)
            } else {
                None
            };
            full_end = caps.name("full").map(|_| whole.end());

            if let Some(date) = date {
                latest = latest.max(Some(date));
            }
        }
        latest
    }

    /// Month-day fragments take the year of the full date written before
    /// them. Only the end of a `full ~ month-day` range rolls into the next
    /// year when it falls before its start.
    fn month_day(
        &self,
        raw: &str,
        anchor: Option<NormalizedDate>,
        closes_range: bool,
    ) -> Option<NormalizedDate> {
        let Some(anchor) = anchor else {
            return self.normalizer.normalize(raw);
        };
        let date = self.normalizer.normalize_in_year(raw, anchor.year())?;
        if closes_range && date < anchor {
            return date.next_year().or(Some(date));
        }
        Some(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExtractorRules;

    fn deadline(text: &str) -> Option<String> {
        DeadlineExtractor::new(
            DateNormalizer::new(2025),
            ExtractorRules::default().deadline_keywords,
        )
        .extract(text)
        .map(|d| d.to_string())
    }

    #[test]
    fn test_latest_date_on_application_line() {
        let text = "신청기간: 2025.04.01(화) ~ 04.15(화) 18:00까지";
        assert_eq!(deadline(text).as_deref(), Some("2025-04-15"));
    }

    #[test]
    fn test_korean_dates() {
        let text = "행사 안내\n모집기간 : 2025년 3월 4일 ~ 3월 20일";
        assert_eq!(deadline(text).as_deref(), Some("2025-03-20"));
    }

    #[test]
    fn test_month_day_only_uses_reference_year() {
        let text = "접수 마감: 5월 2일";
        assert_eq!(deadline(text).as_deref(), Some("2025-05-02"));
    }

    #[test]
    fn test_month_day_after_year_end_rolls_over() {
        let text = "모집기간: 2025.12.20 ~ 1.10";
        assert_eq!(deadline(text).as_deref(), Some("2026-01-10"));
    }

    #[test]
    fn test_side_note_before_start_does_not_roll_over() {
        let text = "모집기간: 2025.05.01 ~ 05.20 (사전등록 4.30까지)";
        assert_eq!(deadline(text).as_deref(), Some("2025-05-20"));

        let text = "신청기간: 2025.9.1 ~ 9.12, 선발 인원 1.5배수";
        assert_eq!(deadline(text).as_deref(), Some("2025-09-12"));
    }

    #[test]
    fn test_range_end_after_weekday_rolls_over() {
        let text = "접수기간: 2025.12.29(월) ~ 1.2(금)";
        assert_eq!(deadline(text).as_deref(), Some("2026-01-02"));
    }

    #[test]
    fn test_dashed_full_dates() {
        let text = "신청기간: 2025-04-01 ~ 2025-04-15";
        assert_eq!(deadline(text).as_deref(), Some("2025-04-15"));
    }

    #[test]
    fn test_only_first_keyword_line_is_scanned() {
        let text = "신청기간: 추후 안내\n접수기간: 2025.04.01 ~ 04.15";
        assert_eq!(deadline(text), None);
    }

    #[test]
    fn test_no_keyword_line() {
        assert_eq!(deadline("일시: 2025.05.01\n장소: 공학관"), None);
    }
}
