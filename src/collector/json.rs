//! JSON file collector.
//!
//! Serves notices from a JSON array of `{ "title", "body", "link"? }`
//! objects, split into list pages of a fixed size. Useful for replaying
//! exported boards and for offline runs.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::collector::NoticeCollector;
use crate::error::{AppError, Result};
use crate::models::{NoticeInput, NoticeRef};

/// Collector backed by a JSON file loaded into memory.
#[derive(Debug, Clone)]
pub struct JsonFileCollector {
    path: PathBuf,
    notices: Vec<NoticeInput>,
    page_size: usize,
}

impl JsonFileCollector {
    /// Read and parse the file at `path`.
    pub async fn open(path: impl AsRef<Path>, page_size: usize) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(AppError::config(format!(
                    "Notice file not found: {}",
                    path.display()
                )));
            }
            Err(e) => return Err(AppError::Io(e)),
        };
        let notices: Vec<NoticeInput> = serde_json::from_slice(&bytes)?;
        log::info!("Loaded {} notices from {}", notices.len(), path.display());

        Ok(Self::from_notices(path, notices, page_size))
    }

    /// Build from notices already in memory.
    pub fn from_notices(path: impl Into<PathBuf>, notices: Vec<NoticeInput>, page_size: usize) -> Self {
        Self {
            path: path.into(),
            notices,
            page_size: page_size.max(1),
        }
    }

    pub fn len(&self) -> usize {
        self.notices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }
}

#[async_trait]
impl NoticeCollector for JsonFileCollector {
    async fn fetch_notice_list(&self, page: usize) -> Result<Vec<NoticeRef>> {
        if page == 0 {
            return Err(AppError::collector(
                self.path.display().to_string(),
                "list pages start at 1",
            ));
        }

        let start = (page - 1).saturating_mul(self.page_size);
        let refs = self
            .notices
            .iter()
            .enumerate()
            .skip(start)
            .take(self.page_size)
            .map(|(index, notice)| NoticeRef {
                id: index.to_string(),
                title: notice.title.clone(),
                link: notice.link.clone(),
                posted: notice.posted,
            })
            .collect();
        Ok(refs)
    }

    async fn fetch_notice_detail(&self, notice: &NoticeRef) -> Result<NoticeInput> {
        notice
            .id
            .parse::<usize>()
            .ok()
            .and_then(|index| self.notices.get(index))
            .cloned()
            .ok_or_else(|| {
                AppError::collector(
                    format!("notice {}", notice.id),
                    format!("not present in {}", self.path.display()),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<NoticeInput> {
        (1..=5)
            .map(|i| NoticeInput::new(format!("공지 {i}"), format!("본문 {i}")))
            .collect()
    }

    #[tokio::test]
    async fn test_pages_are_split_by_size() {
        let collector = JsonFileCollector::from_notices("mem.json", sample(), 2);

        let page1 = collector.fetch_notice_list(1).await.unwrap();
        let page3 = collector.fetch_notice_list(3).await.unwrap();
        let page4 = collector.fetch_notice_list(4).await.unwrap();

        assert_eq!(page1.len(), 2);
        assert_eq!(page1[0].title, "공지 1");
        assert_eq!(page3.len(), 1);
        assert_eq!(page3[0].id, "4");
        assert!(page4.is_empty());
        assert!(collector.fetch_notice_list(0).await.is_err());
    }

    #[tokio::test]
    async fn test_detail_resolves_by_id() {
        let collector = JsonFileCollector::from_notices("mem.json", sample(), 10);
        let refs = collector.fetch_notice_list(1).await.unwrap();

        let detail = collector.fetch_notice_detail(&refs[2]).await.unwrap();
        assert_eq!(detail.body, "본문 3");

        let missing = NoticeRef {
            id: "99".to_string(),
            title: "없는 공지".to_string(),
            link: None,
            posted: None,
        };
        assert!(collector.fetch_notice_detail(&missing).await.is_err());
    }

    #[tokio::test]
    async fn test_open_reads_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notices.json");
        std::fs::write(
            &path,
            r#"[{"title": "특강 안내", "body": "일시: 5월 3일", "link": "https://example.com/1",
                 "posted": "2025-04-28"}]"#,
        )
        .unwrap();

        let collector = JsonFileCollector::open(&path, 10).await.unwrap();
        assert_eq!(collector.len(), 1);
        let refs = collector.fetch_notice_list(1).await.unwrap();
        assert_eq!(refs[0].link.as_deref(), Some("https://example.com/1"));
        assert_eq!(refs[0].posted.map(|d| d.to_string()).as_deref(), Some("2025-04-28"));
    }

    #[tokio::test]
    async fn test_open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = JsonFileCollector::open(dir.path().join("none.json"), 10)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
