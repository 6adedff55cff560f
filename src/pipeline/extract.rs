// src/pipeline/extract.rs

//! Notice extraction pipeline.

use std::collections::HashSet;
use std::time::Duration;

use futures::stream::{self, StreamExt};

use crate::collector::NoticeCollector;
use crate::error::Result;
use crate::models::{CollectorConfig, ExtractedRecord, NormalizedDate, NoticeRef};
use crate::services::NoticeExtractor;

/// Summary of an extraction run.
#[derive(Debug, Default)]
pub struct ExtractionOutcome {
    pub records: Vec<ExtractedRecord>,
    pub pages: usize,
    pub listed: usize,
    pub duplicates: usize,
    pub skipped: usize,
    /// Notices dropped by the posted-date filter
    pub filtered: usize,
    pub detail_failures: usize,
}

/// What the posted-date filter says about one notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PostedCheck {
    Keep,
    Drop,
    /// Older than the window; boards list newest first, so nothing later matches.
    Stop,
}

fn check_posted(config: &CollectorConfig, posted: Option<NormalizedDate>) -> PostedCheck {
    let Some(posted) = posted else {
        return PostedCheck::Keep;
    };
    match (config.posted_on, config.posted_since) {
        (Some(on), _) if posted > on => PostedCheck::Drop,
        (Some(on), _) if posted < on => PostedCheck::Stop,
        (None, Some(since)) if posted < since => PostedCheck::Stop,
        _ => PostedCheck::Keep,
    }
}

/// Walk the collector's list pages, resolve every notice and extract it.
///
/// A failing first page aborts the run; later page failures end the walk
/// early. Failed detail fetches are counted and logged, never fatal.
///
/// With `posted_on` or `posted_since` set, the walk stops at the first
/// listed notice older than the window.
pub async fn run_extraction(
    config: &CollectorConfig,
    collector: &dyn NoticeCollector,
    extractor: &NoticeExtractor,
) -> Result<ExtractionOutcome> {
    let delay = Duration::from_millis(config.request_delay_ms);
    let concurrency = config.max_concurrent.max(1);
    let mut outcome = ExtractionOutcome::default();

    // Stage 1: Walk list pages until an empty one or the page limit.
    let mut refs: Vec<NoticeRef> = Vec::new();
    let mut seen_ids = HashSet::new();
    for page in 1..=config.max_pages {
        let listed = match collector.fetch_notice_list(page).await {
            Ok(listed) => listed,
            Err(error) if page == 1 => return Err(error),
            Err(error) => {
                log::warn!("Failed to fetch list page {}: {}. Stopping.", page, error);
                break;
            }
        };
        if listed.is_empty() {
            log::debug!("List page {} is empty, end of board", page);
            break;
        }

        outcome.pages += 1;
        outcome.listed += listed.len();
        let mut reached_older = false;
        for notice_ref in listed {
            if extractor.is_placeholder_title(&notice_ref.title) {
                log::debug!("Skipping placeholder notice {}", notice_ref.id);
                outcome.skipped += 1;
                continue;
            }
            match check_posted(config, notice_ref.posted) {
                PostedCheck::Stop => {
                    log::info!(
                        "Notice {} predates the posted window, stopping at page {}",
                        notice_ref.id,
                        page
                    );
                    reached_older = true;
                    break;
                }
                PostedCheck::Drop => outcome.filtered += 1,
                PostedCheck::Keep if seen_ids.insert(notice_ref.id.clone()) => {
                    refs.push(notice_ref);
                }
                PostedCheck::Keep => outcome.duplicates += 1,
            }
        }
        if reached_older {
            break;
        }
    }
    log::info!(
        "Listed {} notices across {} page(s), {} to resolve",
        outcome.listed,
        outcome.pages,
        refs.len()
    );

    // Stage 2: Resolve details, bounded by concurrency, in list order.
    let mut seen_fingerprints = HashSet::new();
    let mut detail_stream = stream::iter(refs)
        .map(|notice_ref| async move {
            let result = collector.fetch_notice_detail(&notice_ref).await;
            (notice_ref, result)
        })
        .buffered(concurrency);

    while let Some((notice_ref, result)) = detail_stream.next().await {
        match result {
            Ok(notice) => {
                if extractor.is_placeholder_title(&notice.title) {
                    outcome.skipped += 1;
                } else if check_posted(config, notice.posted) != PostedCheck::Keep {
                    log::debug!("Notice {} is outside the posted window", notice_ref.id);
                    outcome.filtered += 1;
                } else if !seen_fingerprints.insert(notice.fingerprint()) {
                    log::debug!("Notice {} duplicates an earlier one", notice_ref.id);
                    outcome.duplicates += 1;
                } else {
                    outcome.records.push(extractor.extract(&notice));
                }
            }
            Err(error) => {
                outcome.detail_failures += 1;
                log::warn!("Failed to fetch notice {}: {}", notice_ref.id, error);
            }
        }

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    log::info!(
        "Extracted {} records ({} skipped, {} filtered, {} duplicates, {} failed)",
        outcome.records.len(),
        outcome.skipped,
        outcome.filtered,
        outcome.duplicates,
        outcome.detail_failures
    );
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::collector::JsonFileCollector;
    use crate::error::AppError;
    use crate::models::{Category, ExtractorRules, NoticeInput};

    fn extractor() -> NoticeExtractor {
        NoticeExtractor::from_rules(&ExtractorRules::default(), Some(2025)).unwrap()
    }

    fn config(max_pages: usize) -> CollectorConfig {
        CollectorConfig {
            max_pages,
            page_size: 2,
            request_delay_ms: 0,
            max_concurrent: 2,
            posted_on: None,
            posted_since: None,
        }
    }

    fn notices() -> Vec<NoticeInput> {
        vec![
            NoticeInput::new("SW 해커톤 안내", "일시: 2025.05.01(목) ~ 05.10(토)"),
            NoticeInput::new("[공지]", "고정 공지"),
            NoticeInput::new("진로 특강", "행사는 5월 3일에 진행됩니다"),
            NoticeInput::new("SW 해커톤 안내", "일시: 2025.05.01(목) ~ 05.10(토)"),
            NoticeInput::new("장학금 안내", "장학금 신청기간: 4월 1일 ~ 4월 10일"),
        ]
    }

    #[tokio::test]
    async fn test_walks_pages_and_extracts() {
        let collector = JsonFileCollector::from_notices("mem.json", notices(), 2);
        let outcome = run_extraction(&config(10), &collector, &extractor())
            .await
            .unwrap();

        assert_eq!(outcome.pages, 3);
        assert_eq!(outcome.listed, 5);
        assert_eq!(outcome.skipped, 1);
        assert_eq!(outcome.duplicates, 1);
        assert_eq!(outcome.detail_failures, 0);

        let titles: Vec<&str> = outcome.records.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["SW 해커톤 안내", "진로 특강", "장학금 안내"]);
        assert_eq!(outcome.records[0].category, Category::Contest);
        assert_eq!(
            outcome.records[2].deadline.map(|d| d.to_string()).as_deref(),
            Some("2025-04-10")
        );
    }

    #[tokio::test]
    async fn test_respects_page_limit() {
        let collector = JsonFileCollector::from_notices("mem.json", notices(), 2);
        let outcome = run_extraction(&config(1), &collector, &extractor())
            .await
            .unwrap();

        assert_eq!(outcome.pages, 1);
        assert_eq!(outcome.listed, 2);
        assert_eq!(outcome.records.len(), 1);
    }

    fn day(d: u32) -> Option<NormalizedDate> {
        NormalizedDate::from_ymd(2025, 4, d)
    }

    /// Newest first, with a stray newer notice on the last page.
    fn dated_notices() -> Vec<NoticeInput> {
        [30, 29, 28, 28, 27, 26, 29]
            .into_iter()
            .enumerate()
            .map(|(i, d)| NoticeInput {
                posted: day(d),
                ..NoticeInput::new(format!("특강 {i}"), format!("4월 {d}일 게시 본문 {i}"))
            })
            .collect()
    }

    #[tokio::test]
    async fn test_posted_on_stops_at_older_notice() {
        let collector = JsonFileCollector::from_notices("mem.json", dated_notices(), 2);
        let mut config = config(10);
        config.posted_on = day(28);
        let outcome = run_extraction(&config, &collector, &extractor())
            .await
            .unwrap();

        // Page 4 holds a newer notice, but the walk ended on page 3.
        assert_eq!(outcome.pages, 3);
        assert_eq!(outcome.filtered, 2);
        let titles: Vec<&str> = outcome.records.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["특강 2", "특강 3"]);
        assert!(outcome.records.iter().all(|r| r.posted == day(28)));
    }

    #[tokio::test]
    async fn test_posted_since_keeps_newer_notices() {
        let collector = JsonFileCollector::from_notices("mem.json", dated_notices(), 2);
        let mut config = config(10);
        config.posted_since = day(29);
        let outcome = run_extraction(&config, &collector, &extractor())
            .await
            .unwrap();

        assert_eq!(outcome.pages, 2);
        assert_eq!(outcome.filtered, 0);
        assert_eq!(outcome.records.len(), 2);
    }

    #[test]
    fn test_undated_notices_pass_the_filter() {
        let mut config = config(1);
        config.posted_since = day(29);
        assert_eq!(check_posted(&config, None), PostedCheck::Keep);
        assert_eq!(check_posted(&config, day(28)), PostedCheck::Stop);
    }

    /// Lists two notices but can only resolve the first.
    struct FlakyCollector;

    #[async_trait]
    impl NoticeCollector for FlakyCollector {
        async fn fetch_notice_list(&self, page: usize) -> Result<Vec<NoticeRef>> {
            if page > 1 {
                return Err(AppError::collector("list", "timeout"));
            }
            Ok(["a", "b"]
                .iter()
                .map(|id| NoticeRef {
                    id: id.to_string(),
                    title: format!("세미나 {id}"),
                    link: None,
                    posted: None,
                })
                .collect())
        }

        async fn fetch_notice_detail(&self, notice: &NoticeRef) -> Result<NoticeInput> {
            match notice.id.as_str() {
                "a" => Ok(NoticeInput::new(notice.title.clone(), "장소: 공5 301호")),
                _ => Err(AppError::collector(notice.id.clone(), "element missing")),
            }
        }
    }

    #[tokio::test]
    async fn test_failures_are_counted_not_fatal() {
        let outcome = run_extraction(&config(5), &FlakyCollector, &extractor())
            .await
            .unwrap();

        assert_eq!(outcome.pages, 1);
        assert_eq!(outcome.detail_failures, 1);
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].location.as_deref(), Some("공5 301호"));
        assert_eq!(outcome.records[0].category, Category::Extracurricular);
    }

    struct BrokenCollector;

    #[async_trait]
    impl NoticeCollector for BrokenCollector {
        async fn fetch_notice_list(&self, _page: usize) -> Result<Vec<NoticeRef>> {
            Err(AppError::collector("list", "connection refused"))
        }

        async fn fetch_notice_detail(&self, notice: &NoticeRef) -> Result<NoticeInput> {
            Err(AppError::collector(notice.id.clone(), "unreachable"))
        }
    }

    #[tokio::test]
    async fn test_first_page_failure_is_fatal() {
        let result = run_extraction(&config(5), &BrokenCollector, &extractor()).await;
        assert!(result.is_err());
    }
}
