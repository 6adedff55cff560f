//! Application configuration structures.
//!
//! Every keyword list and venue pattern the extractors use lives here as
//! data, so new venues or categories only need a config change.

use std::fs;
use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::{Category, NormalizedDate};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Keyword and pattern tables for field extraction
    #[serde(default)]
    pub extractor: ExtractorRules,

    /// Collector traversal settings
    #[serde(default)]
    pub collector: CollectorConfig,

    /// Console report settings
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate every setting and compile every rule table.
    pub fn validate(&self) -> Result<()> {
        self.check_settings()?;
        self.extractor.validate()
    }

    /// Validate the collector and output settings, leaving the rule tables
    /// to `ExtractorRules::compile`.
    pub fn check_settings(&self) -> Result<()> {
        if self.collector.max_pages == 0 {
            return Err(AppError::validation("collector.max_pages must be > 0"));
        }
        if self.collector.page_size == 0 {
            return Err(AppError::validation("collector.page_size must be > 0"));
        }
        if self.collector.max_concurrent == 0 {
            return Err(AppError::validation("collector.max_concurrent must be > 0"));
        }
        if self.collector.posted_on.is_some() && self.collector.posted_since.is_some() {
            return Err(AppError::validation(
                "collector.posted_on and collector.posted_since are mutually exclusive",
            ));
        }
        if self.output.max_field_chars == 0 {
            return Err(AppError::validation("output.max_field_chars must be > 0"));
        }
        Ok(())
    }
}

/// Keyword tables and venue patterns driving the extractors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorRules {
    /// Year used for dates written without one (defaults to the local year)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_year: Option<i32>,

    /// Keywords marking an event-period line
    #[serde(default = "defaults::event_keywords")]
    pub event_keywords: Vec<String>,

    /// Lines containing any of these are ignored by the inline date scan
    #[serde(default = "defaults::application_markers")]
    pub application_markers: Vec<String>,

    /// Keywords marking an application-deadline line
    #[serde(default = "defaults::deadline_keywords")]
    pub deadline_keywords: Vec<String>,

    /// Eligibility keywords, in priority order
    #[serde(default = "defaults::target_keywords")]
    pub target_keywords: Vec<String>,

    /// Application-method keywords, in priority order
    #[serde(default = "defaults::apply_keywords")]
    pub apply_keywords: Vec<String>,

    /// A location containing any of these is treated as unknown
    #[serde(default = "defaults::negative_location_keywords")]
    pub negative_location_keywords: Vec<String>,

    /// Venue regexes tried in order when no `장소` label is present
    #[serde(default = "defaults::location_patterns")]
    pub location_patterns: Vec<String>,

    /// Category keyword sets, in priority order
    #[serde(default = "defaults::categories")]
    pub categories: Vec<CategoryRule>,

    /// Titles matching this regex are placeholders and get skipped
    #[serde(default = "defaults::skip_title_pattern")]
    pub skip_title_pattern: String,
}

impl Default for ExtractorRules {
    fn default() -> Self {
        Self {
            reference_year: None,
            event_keywords: defaults::event_keywords(),
            application_markers: defaults::application_markers(),
            deadline_keywords: defaults::deadline_keywords(),
            target_keywords: defaults::target_keywords(),
            apply_keywords: defaults::apply_keywords(),
            negative_location_keywords: defaults::negative_location_keywords(),
            location_patterns: defaults::location_patterns(),
            categories: defaults::categories(),
            skip_title_pattern: defaults::skip_title_pattern(),
        }
    }
}

impl ExtractorRules {
    /// Check that every table is usable and every pattern compiles.
    pub fn validate(&self) -> Result<()> {
        self.compile().map(|_| ())
    }

    /// Validate the tables and compile every pattern once.
    pub fn compile(&self) -> Result<CompiledPatterns> {
        let tables = [
            ("event_keywords", &self.event_keywords),
            ("deadline_keywords", &self.deadline_keywords),
            ("target_keywords", &self.target_keywords),
            ("apply_keywords", &self.apply_keywords),
        ];
        for (name, table) in tables {
            if table.iter().all(|k| k.trim().is_empty()) {
                return Err(AppError::validation(format!("extractor.{name} is empty")));
            }
        }

        if let Some(year) = self.reference_year {
            check_reference_year(year)?;
        }

        for rule in &self.categories {
            if rule.category == Category::Other {
                return Err(AppError::validation(
                    "extractor.categories must not list the fallback category 기타",
                ));
            }
            if rule.keywords.is_empty() {
                return Err(AppError::validation(format!(
                    "category {} has no keywords",
                    rule.category
                )));
            }
        }

        Ok(CompiledPatterns {
            locations: self
                .location_patterns
                .iter()
                .map(|p| compile(p))
                .collect::<Result<_>>()?,
            skip_title: compile(&self.skip_title_pattern)?,
        })
    }
}

/// Regexes compiled from `ExtractorRules`.
#[derive(Debug, Clone)]
pub struct CompiledPatterns {
    /// Venue patterns, in priority order
    pub locations: Vec<Regex>,
    pub skip_title: Regex,
}

/// Reject reference years chrono or the canonical format cannot represent.
pub fn check_reference_year(year: i32) -> Result<()> {
    if !(1900..=9999).contains(&year) {
        return Err(AppError::validation(format!(
            "reference year {year} is out of range"
        )));
    }
    Ok(())
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| AppError::pattern(pattern, e))
}

/// Keywords that put a notice into a category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRule {
    pub category: Category,
    pub keywords: Vec<String>,
}

/// Collector traversal settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectorConfig {
    /// Last list page to request
    #[serde(default = "defaults::max_pages")]
    pub max_pages: usize,

    /// Notices per list page for file-backed collectors
    #[serde(default = "defaults::page_size")]
    pub page_size: usize,

    /// Delay after each detail fetch in milliseconds
    #[serde(default = "defaults::request_delay")]
    pub request_delay_ms: u64,

    /// Maximum detail fetches in flight
    #[serde(default = "defaults::max_concurrent")]
    pub max_concurrent: usize,

    /// Keep only notices posted on this day
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posted_on: Option<NormalizedDate>,

    /// Keep only notices posted on or after this day
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posted_since: Option<NormalizedDate>,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            max_pages: defaults::max_pages(),
            page_size: defaults::page_size(),
            request_delay_ms: defaults::request_delay(),
            max_concurrent: defaults::max_concurrent(),
            posted_on: None,
            posted_since: None,
        }
    }
}

/// Console report settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Per-record template, see `ExtractedRecord::format`
    #[serde(default = "defaults::template")]
    pub template: String,

    /// Free-text fields are cut to this many characters
    #[serde(default = "defaults::max_field_chars")]
    pub max_field_chars: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            template: defaults::template(),
            max_field_chars: defaults::max_field_chars(),
        }
    }
}

mod defaults {
    use super::CategoryRule;
    use crate::models::Category;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    // Extractor defaults
    pub fn event_keywords() -> Vec<String> {
        strings(&[
            "일시",
            "일 시",
            "운영기간",
            "행사기간",
            "진행기간",
            "교육기간",
            "프로그램 기간",
        ])
    }
    pub fn application_markers() -> Vec<String> {
        strings(&["신청", "접수", "모집"])
    }
    pub fn deadline_keywords() -> Vec<String> {
        strings(&[
            "신청기간",
            "모집기간",
            "접수기간",
            "신청기한",
            "모집기한",
            "제출기한",
            "신청 마감",
            "접수 마감",
        ])
    }
    pub fn target_keywords() -> Vec<String> {
        strings(&[
            "참가대상",
            "모집대상",
            "지원자격",
            "대상자",
            "신청자격",
            "자격요건",
            "대상",
        ])
    }
    pub fn apply_keywords() -> Vec<String> {
        strings(&[
            "신청방법",
            "지원방법",
            "접수방법",
            "참여신청",
            "신청 방법",
            "지원 방법",
            "교육 신청",
        ])
    }
    pub fn negative_location_keywords() -> Vec<String> {
        strings(&["없음", "미정", "별도", "문의", "추후"])
    }
    pub fn location_patterns() -> Vec<String> {
        strings(&[
            r"미래도서관\s?[가-힣\w\s()]+",
            r"(?:공[1-6]|경영|도서관|호관|공과대학|강의실|○○관|농[1-3]|BF\d)[\w\s호]*",
            r"서울대학교",
            r"춘천\s?[가-힣\d]*",
        ])
    }
    pub fn categories() -> Vec<CategoryRule> {
        vec![
            CategoryRule {
                category: Category::Contest,
                keywords: strings(&[
                    "공모전",
                    "경진대회",
                    "아이디어",
                    "콘테스트",
                    "창업",
                    "해커톤",
                ]),
            },
            CategoryRule {
                category: Category::ExternalActivity,
                keywords: strings(&[
                    "대외활동",
                    "연수",
                    "해외",
                    "인턴",
                    "봉사",
                    "교류",
                    "참가자 모집",
                ]),
            },
            CategoryRule {
                category: Category::Extracurricular,
                keywords: strings(&[
                    "비교과",
                    "특강",
                    "워크숍",
                    "세미나",
                    "강연",
                    "소모임",
                    "문해력",
                    "역량",
                ]),
            },
        ]
    }
    pub fn skip_title_pattern() -> String {
        r"^\[?공지\]?$".into()
    }

    // Collector defaults
    pub fn max_pages() -> usize {
        3
    }
    pub fn page_size() -> usize {
        10
    }
    pub fn request_delay() -> u64 {
        0
    }
    pub fn max_concurrent() -> usize {
        1
    }

    // Output defaults
    pub fn template() -> String {
        [
            "🔹 [{index}] {title}",
            "📅 날짜: {dates}",
            "📍 장소: {location}",
            "👤 대상: {target}",
            "📬 신청방법: {apply_method}",
            "⏳ 신청마감일: {deadline}",
            "🏷️ 카테고리: {category}",
        ]
        .join("\n")
    }
    pub fn max_field_chars() -> usize {
        80
    }
}
