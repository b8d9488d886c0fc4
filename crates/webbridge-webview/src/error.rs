use std::path::PathBuf;

/// Why no content could be handed to the engine.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("No web content available to load")]
    NoContent,

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot build a file URL for {0}")]
    InvalidPath(PathBuf),
}

#[derive(Debug, thiserror::Error)]
pub enum WebViewError {
    #[error(transparent)]
    Engine(#[from] wry::Error),

    #[error(transparent)]
    Content(#[from] ContentError),

    #[error("not supported: {0}")]
    Unsupported(String),

    #[error("WebView not set up. Call setup_webview() first.")]
    NotSetUp,
}
