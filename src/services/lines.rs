// src/services/lines.rs

//! Keyword line extractor, used for the target audience and the
//! application method.

use std::sync::LazyLock;

use regex::Regex;

use crate::utils::non_empty;

/// Leading bullets, numbers (`1.`, `2)`) or Hangul enumerators (`가.`), possibly stacked.
static LIST_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:(?:[가-힣]\.|\d+[.)]|[-•○·])\s*)+").expect("prefix pattern must compile")
});

/// Strip a leading list marker from a line.
pub fn clean_prefix(line: &str) -> &str {
    let line = line.trim();
    match LIST_PREFIX.find(line) {
        Some(m) => line[m.end()..].trim(),
        None => line,
    }
}

/// Returns the first line mentioning a keyword, trying keywords in priority order.
#[derive(Debug, Clone)]
pub struct LineExtractor {
    keywords: Vec<String>,
}

impl LineExtractor {
    pub fn new(keywords: Vec<String>) -> Self {
        Self { keywords }
    }

    pub fn extract(&self, text: &str) -> Option<String> {
        self.keywords
            .iter()
            .filter(|k| !k.is_empty())
            .find_map(|keyword| {
                text.lines()
                    .filter(|line| line.contains(keyword.as_str()))
                    .find_map(|line| non_empty(clean_prefix(line)))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExtractorRules;

    fn target(text: &str) -> Option<String> {
        LineExtractor::new(ExtractorRules::default().target_keywords).extract(text)
    }

    fn apply(text: &str) -> Option<String> {
        LineExtractor::new(ExtractorRules::default().apply_keywords).extract(text)
    }

    #[test]
    fn test_clean_prefix() {
        assert_eq!(clean_prefix("가. 모집대상: 재학생"), "모집대상: 재학생");
        assert_eq!(clean_prefix("  2) 신청방법: 이메일"), "신청방법: 이메일");
        assert_eq!(clean_prefix("- 대상: 전 학년"), "대상: 전 학년");
        assert_eq!(clean_prefix("○ 참가대상 : 학부생"), "참가대상 : 학부생");
        assert_eq!(clean_prefix("대상 1. 재학생"), "대상 1. 재학생");
    }

    #[test]
    fn test_clean_stacked_prefixes() {
        assert_eq!(clean_prefix("1. - 대상: 전 학년"), "대상: 전 학년");
        assert_eq!(clean_prefix("가. 1) ○ 신청방법: 방문 접수"), "신청방법: 방문 접수");
    }

    #[test]
    fn test_keyword_priority_beats_line_order() {
        let text = "2025 대상 수상작 발표\n1. 모집대상: 컴퓨터공학과 재학생";
        assert_eq!(target(text).as_deref(), Some("모집대상: 컴퓨터공학과 재학생"));
    }

    #[test]
    fn test_generic_keyword_as_last_resort() {
        let text = "특강 안내\n• 대상: 전 학년";
        assert_eq!(target(text).as_deref(), Some("대상: 전 학년"));
    }

    #[test]
    fn test_apply_method() {
        let text = "공모전 안내\n나. 신청 방법 : 첨부 양식 작성 후 이메일 제출";
        assert_eq!(
            apply(text).as_deref(),
            Some("신청 방법 : 첨부 양식 작성 후 이메일 제출")
        );
    }

    #[test]
    fn test_absent() {
        assert_eq!(target("세미나 안내\n많은 참여 바랍니다"), None);
        assert_eq!(apply("세미나 안내\n많은 참여 바랍니다"), None);
    }
}
