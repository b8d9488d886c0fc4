//! Content resolution: decide which single artifact the widget loads.
//!
//! Precedence, first match wins:
//! 1. `{root}/index.html` (production build)
//! 2. `{root}/{dev_html}` (development page)
//! 3. inline development HTML
//!
//! With none of them available resolution fails with
//! [`ContentError::NoContent`].

mod validate;

pub use validate::{validate_content_root, ContentReport, MAX_CONTENT_FILES};

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::ContentError;

/// Entry file of a production build. Not configurable.
pub const ENTRY_FILE: &str = "index.html";

/// File name inline HTML is written to before loading.
pub const INLINE_FILE_NAME: &str = "webview_content.html";

/// Where the widget may find content. Sources are not mutually exclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentConfig {
    root: Option<PathBuf>,
    dev_html: Option<PathBuf>,
    inline_html: Option<String>,
}

/// The artifact chosen by [`ContentConfig::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSource {
    /// An HTML file on disk.
    File(PathBuf),
    /// HTML text that must be written out before loading.
    Inline(String),
}

impl ContentConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point at a content root, optionally with a dev page relative to it.
    ///
    /// Replaces any previous root and dev page.
    pub fn set_web_content(&mut self, root: impl Into<PathBuf>, dev_html: Option<&Path>) {
        let root = root.into();
        self.dev_html = dev_html.map(|p| root.join(p));
        self.root = Some(root);
    }

    pub fn set_dev_html_content(&mut self, html: impl Into<String>) {
        self.inline_html = Some(html.into());
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    /// Full path of the dev page (already joined onto the root).
    pub fn dev_html_path(&self) -> Option<&Path> {
        self.dev_html.as_deref()
    }

    pub fn inline_html(&self) -> Option<&str> {
        self.inline_html.as_deref()
    }

    /// Pick the content source to load. Deterministic for a given file system state.
    pub fn resolve(&self) -> Result<ContentSource, ContentError> {
        if let Some(root) = &self.root {
            let entry = root.join(ENTRY_FILE);
            if entry.is_file() {
                debug!(path = %entry.display(), "resolved production entry");
                return Ok(ContentSource::File(entry));
            }
        }

        if let Some(dev) = &self.dev_html {
            if dev.is_file() {
                debug!(path = %dev.display(), "resolved development page");
                return Ok(ContentSource::File(dev.clone()));
            }
        }

        if let Some(html) = self.inline_html.as_deref().filter(|h| !h.is_empty()) {
            debug!(bytes = html.len(), "resolved inline HTML");
            return Ok(ContentSource::Inline(html.to_string()));
        }

        Err(ContentError::NoContent)
    }
}

impl ContentSource {
    /// Produce a file on disk for this source.
    ///
    /// Inline HTML is written to `{dir}/webview_content.html`, overwriting
    /// whatever a previous load left there. The file is not removed.
    pub fn materialize(&self, dir: &Path) -> Result<PathBuf, ContentError> {
        match self {
            Self::File(path) => Ok(path.clone()),
            Self::Inline(html) => {
                let path = dir.join(INLINE_FILE_NAME);
                std::fs::create_dir_all(dir)
                    .and_then(|()| std::fs::write(&path, html))
                    .map_err(|source| ContentError::Io {
                        path: path.clone(),
                        source,
                    })?;
                Ok(path)
            }
        }
    }

    /// Materialize and turn into a `file://` URL the engine can load.
    pub fn to_url(&self, dir: &Path) -> Result<String, ContentError> {
        let path = self.materialize(dir)?;
        file_url(&path)
    }
}

/// `file://` URL for an existing path.
pub fn file_url(path: &Path) -> Result<String, ContentError> {
    let absolute =
        std::fs::canonicalize(path).map_err(|_| ContentError::InvalidPath(path.to_path_buf()))?;
    url::Url::from_file_path(&absolute)
        .map(String::from)
        .map_err(|()| ContentError::InvalidPath(absolute))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(path: &Path, body: &str) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, body).unwrap();
    }

    #[test]
    fn production_entry_wins_over_everything() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir.path().join("index.html"), "<p>prod</p>");
        write(&dir.path().join("dev.html"), "<p>dev</p>");

        let mut config = ContentConfig::new();
        config.set_web_content(dir.path(), Some(Path::new("dev.html")));
        config.set_dev_html_content("<p>inline</p>");

        assert_eq!(
            config.resolve().unwrap(),
            ContentSource::File(dir.path().join("index.html"))
        );
    }

    #[test]
    fn dev_file_used_without_production_build() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir.path().join("pages/dev.html"), "<p>dev</p>");

        let mut config = ContentConfig::new();
        config.set_web_content(dir.path(), Some(Path::new("pages/dev.html")));
        config.set_dev_html_content("<p>inline</p>");

        assert_eq!(
            config.resolve().unwrap(),
            ContentSource::File(dir.path().join("pages/dev.html"))
        );
    }

    #[test]
    fn inline_used_when_no_files_exist() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = ContentConfig::new();
        config.set_web_content(dir.path(), Some(Path::new("missing.html")));
        config.set_dev_html_content("<p>inline</p>");

        assert_eq!(
            config.resolve().unwrap(),
            ContentSource::Inline("<p>inline</p>".into())
        );
    }

    #[test]
    fn inline_only_configuration() {
        let mut config = ContentConfig::new();
        config.set_dev_html_content("<h1>Test UI</h1>");
        assert!(matches!(config.resolve(), Ok(ContentSource::Inline(_))));
    }

    #[test]
    fn nothing_configured_fails_the_same_way_every_time() {
        let config = ContentConfig::new();
        for _ in 0..3 {
            let err = config.resolve().unwrap_err();
            assert!(matches!(err, ContentError::NoContent));
            assert_eq!(err.to_string(), "No web content available to load");
        }
    }

    #[test]
    fn empty_inline_html_counts_as_absent() {
        let mut config = ContentConfig::new();
        config.set_dev_html_content("");
        assert!(matches!(config.resolve(), Err(ContentError::NoContent)));
    }

    #[test]
    fn index_directory_is_not_an_entry_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("index.html")).unwrap();

        let mut config = ContentConfig::new();
        config.set_web_content(dir.path(), None);
        assert!(matches!(config.resolve(), Err(ContentError::NoContent)));
    }

    #[test]
    fn resetting_content_changes_resolution() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        write(&first.path().join("index.html"), "one");
        write(&second.path().join("index.html"), "two");

        let mut config = ContentConfig::new();
        config.set_web_content(first.path(), None);
        config.set_web_content(second.path(), None);
        assert_eq!(
            config.resolve().unwrap(),
            ContentSource::File(second.path().join("index.html"))
        );
    }

    #[test]
    fn materialize_inline_overwrites_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested");

        let first = ContentSource::Inline("<p>one</p>".into())
            .materialize(&target)
            .unwrap();
        let second = ContentSource::Inline("<p>two</p>".into())
            .materialize(&target)
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(first.file_name().unwrap(), INLINE_FILE_NAME);
        assert_eq!(std::fs::read_to_string(&second).unwrap(), "<p>two</p>");
    }

    #[test]
    fn file_source_materializes_to_itself() {
        let source = ContentSource::File(PathBuf::from("/srv/app/index.html"));
        assert_eq!(
            source.materialize(Path::new("/unused")).unwrap(),
            PathBuf::from("/srv/app/index.html")
        );
    }

    #[test]
    fn to_url_is_a_file_url() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir.path().join("index.html"), "x");

        let url = ContentSource::File(dir.path().join("index.html"))
            .to_url(dir.path())
            .unwrap();
        assert!(url.starts_with("file://"));
        assert!(url.ends_with("/index.html"));
    }

    #[test]
    fn file_url_for_missing_path_is_invalid() {
        let err = file_url(Path::new("/definitely/not/here.html")).unwrap_err();
        assert!(matches!(err, ContentError::InvalidPath(_)));
    }
}
