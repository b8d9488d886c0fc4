//! Content location settings.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where the widget looks for web content.
///
/// `root` is expected to hold a production build with an `index.html`.
/// `dev_html` is resolved relative to `root`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentSection {
    pub root: Option<PathBuf>,
    pub dev_html: Option<PathBuf>,
}
