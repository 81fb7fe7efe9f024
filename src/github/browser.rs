use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::github::cache::{CacheConfig, TreeCache};
use crate::github::client::{normalize_path, ClientConfig, ContentFetcher};
use crate::models::{FileView, RepoRef, TreeEntry};
use crate::render::{classify, RenderPlan};

/// Shared per-process browsing state: the remote client plus the listing
/// cache. Handlers receive it as `SharedBrowser`.
pub struct RepoBrowser {
    fetcher: ContentFetcher,
    cache: TreeCache,
    split_supported: bool,
}

impl RepoBrowser {
    pub fn new(client: ClientConfig, cache: CacheConfig, split_supported: bool) -> Result<Self> {
        Ok(Self {
            fetcher: ContentFetcher::new(client)?,
            cache: TreeCache::new(cache),
            split_supported,
        })
    }

    /// Directory listing in upstream order, served from the cache when the
    /// folder was expanded before.
    pub async fn list_directory(&self, repo: &RepoRef, path: &str) -> Result<Vec<TreeEntry>> {
        let path = normalize_path(path)?;

        if let Some(entries) = self.cache.get(repo, &path) {
            let stats = self.cache.stats();
            tracing::debug!(
                repo = %repo,
                path = %path,
                entries = stats.entries,
                capacity = stats.capacity,
                hits = stats.hits,
                misses = stats.misses,
                age_secs = stats.age_secs,
                "Listing cache hit"
            );
            return Ok(entries);
        }

        let entries = self.fetcher.list_directory(repo, &path).await?;
        self.cache.put(repo, &path, entries.clone());
        Ok(entries)
    }

    /// Fetch a file and run it through classification, sanitizing and
    /// escaping. `mode` is the raw value the client asked for.
    pub async fn load_file(
        &self,
        repo: &RepoRef,
        path: &str,
        mode: Option<&str>,
    ) -> Result<FileView> {
        let path = normalize_path(path)?;
        if path.is_empty() {
            return Err(AppError::InvalidParams("a file path is required".to_string()));
        }

        let bytes = self.fetcher.get_file_content(repo, &path).await?;
        let classification = classify(&path);
        let plan = RenderPlan::build(&classification, mode, &bytes, self.split_supported);

        let filename = path.rsplit('/').next().unwrap_or(&path).to_string();
        Ok(FileView {
            owner: repo.owner().to_string(),
            repo: repo.name().to_string(),
            filename,
            path,
            mode: plan.effective_mode,
            language: classification.highlight_language,
            preview_available: plan.preview_available,
            preview_unavailable: plan.preview_unavailable,
            toggles: plan.toggles,
            content: plan.content,
        })
    }
}

pub type SharedBrowser = Arc<RepoBrowser>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::cache::DEFAULT_CAPACITY;
    use crate::models::{EntryKind, RenderMode};
    use crate::test_support::MockUpstream;
    use std::sync::atomic::Ordering;

    fn repo() -> RepoRef {
        RepoRef::new("foo", "bar").unwrap()
    }

    fn browser(upstream: &MockUpstream) -> RepoBrowser {
        RepoBrowser::new(upstream.client_config(), CacheConfig::default(), true).unwrap()
    }

    #[tokio::test]
    async fn test_cache_hit_skips_network() {
        let upstream = MockUpstream::start().await;
        upstream.with_dir("src", &[("lib.rs", EntryKind::File)]);
        let browser = browser(&upstream);

        let first = browser.list_directory(&repo(), "src").await.unwrap();
        let second = browser.list_directory(&repo(), "/src/").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(upstream.state.contents_hits.load(Ordering::SeqCst), 1);

        let stats = browser.cache.stats();
        assert_eq!((stats.entries, stats.capacity), (1, DEFAULT_CAPACITY));
        assert_eq!((stats.hits, stats.misses), (1, 1));
        assert!(stats.age_secs < 60);
    }

    #[tokio::test]
    async fn test_errors_are_not_cached() {
        let upstream = MockUpstream::start().await;
        upstream.with_dir("", &[("a", EntryKind::File)]);
        upstream.fail_with(500, None);
        let browser = browser(&upstream);

        assert!(browser.list_directory(&repo(), "").await.is_err());

        upstream.clear_failure();
        let entries = browser.list_directory(&repo(), "").await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(upstream.state.contents_hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_html_preview_is_sanitized_but_code_is_not() {
        let upstream = MockUpstream::start().await;
        let source = "<html><head><script src=\"http://evil.example/x.js\"></script></head>\
                      <body><h1>Hi</h1></body></html>";
        upstream.with_file("index.html", source);
        let browser = browser(&upstream);

        let view = browser.load_file(&repo(), "index.html", Some("preview")).await.unwrap();
        assert_eq!(view.mode, RenderMode::Preview);
        assert!(view.preview_available);

        let preview = view.content.preview_html.as_deref().unwrap();
        assert!(!preview.contains("evil.example"));
        assert!(preview.contains("<h1>Hi</h1>"));

        assert!(view.content.code_html.contains("&lt;script src=\"http://evil.example/x.js\"&gt;"));
    }

    #[tokio::test]
    async fn test_preview_falls_back_to_code_for_python() {
        let upstream = MockUpstream::start().await;
        upstream.with_file("app.py", "print('<hi>')\n");
        let browser = browser(&upstream);

        let view = browser.load_file(&repo(), "app.py", Some("preview")).await.unwrap();
        assert_eq!(view.mode, RenderMode::Code);
        assert!(view.preview_unavailable);
        assert!(view.content.preview_html.is_none());
        assert_eq!(view.language, "python");
        assert_eq!(view.content.code_html, "print('&lt;hi&gt;')\n");
    }

    #[tokio::test]
    async fn test_load_file_echo_fields() {
        let upstream = MockUpstream::start().await;
        upstream.with_file("src/lib.rs", "pub fn f() {}");
        let browser = browser(&upstream);

        let view = browser.load_file(&repo(), "/src/lib.rs", None).await.unwrap();
        assert_eq!(view.owner, "foo");
        assert_eq!(view.repo, "bar");
        assert_eq!(view.path, "src/lib.rs");
        assert_eq!(view.filename, "lib.rs");
        assert_eq!(view.mode, RenderMode::Split);
    }

    #[tokio::test]
    async fn test_load_file_requires_path() {
        let upstream = MockUpstream::start().await;
        let browser = browser(&upstream);

        let err = browser.load_file(&repo(), "/", None).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidParams(_)));
        assert_eq!(upstream.state.contents_hits.load(Ordering::SeqCst), 0);
    }
}
