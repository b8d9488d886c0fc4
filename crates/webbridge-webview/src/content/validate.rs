//! Sanity checks for a production content directory.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use super::ENTRY_FILE;

/// Content roots with more files than this are reported as too large.
pub const MAX_CONTENT_FILES: usize = 10_000;

/// Asset directories a typical web build ships with.
const ASSET_DIRS: &[&str] = &["js", "css", "assets", "static"];

/// Result of [`validate_content_root`]. Empty `issues` means valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentReport {
    pub root: PathBuf,
    pub issues: Vec<String>,
    pub file_count: usize,
}

impl ContentReport {
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Inspect `root` and list anything that would stop it from serving as a
/// production build.
pub fn validate_content_root(root: &Path) -> ContentReport {
    let mut report = ContentReport {
        root: root.to_path_buf(),
        ..Default::default()
    };

    if !root.exists() {
        report
            .issues
            .push(format!("Content path does not exist: {}", root.display()));
        return report;
    }
    if !root.is_dir() {
        report
            .issues
            .push(format!("Content path is not a directory: {}", root.display()));
        return report;
    }

    if !root.join(ENTRY_FILE).is_file() {
        report
            .issues
            .push(format!("No {ENTRY_FILE} found (production build missing)"));
    }

    if !ASSET_DIRS.iter().any(|d| root.join(d).is_dir()) {
        report.issues.push(format!(
            "No common web asset directories found ({})",
            ASSET_DIRS.join(", ")
        ));
    }

    match count_files(root) {
        Ok(count) => {
            report.file_count = count;
            if count > MAX_CONTENT_FILES {
                report.issues.push(format!(
                    "Very large number of files ({count}) - may cause performance issues"
                ));
            }
        }
        Err(e) => {
            debug!(root = %root.display(), error = %e, "content enumeration failed");
            report
                .issues
                .push("Could not enumerate files in content directory".to_string());
        }
    }

    report
}

/// Count every regular file below `root`.
///
/// Entries that cannot be read are logged and left out of the count; only
/// an unreadable root is an error.
fn count_files(root: &Path) -> Result<usize, walkdir::Error> {
    let mut count = 0;
    for entry in WalkDir::new(root) {
        match entry {
            Ok(entry) if entry.file_type().is_file() => count += 1,
            Ok(_) => {}
            Err(e) if e.depth() == 0 => return Err(e),
            Err(e) => warn!(path = ?e.path(), error = %e, "skipping unreadable content entry"),
        }
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_build_is_valid() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<html></html>").unwrap();
        std::fs::create_dir(dir.path().join("js")).unwrap();
        std::fs::write(dir.path().join("js/app.js"), "console.log(1)").unwrap();

        let report = validate_content_root(dir.path());
        assert!(report.is_valid(), "{:?}", report.issues);
        assert_eq!(report.file_count, 2);
    }

    #[test]
    fn missing_directory_reports_single_issue() {
        let report = validate_content_root(Path::new("/no/such/content/root"));
        assert!(!report.is_valid());
        assert_eq!(report.issues.len(), 1);
        assert!(report.issues[0].contains("does not exist"));
    }

    #[test]
    fn file_instead_of_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("index.html");
        std::fs::write(&file, "x").unwrap();

        let report = validate_content_root(&file);
        assert_eq!(report.issues.len(), 1);
        assert!(report.issues[0].contains("not a directory"));
    }

    #[test]
    fn empty_directory_lists_entry_and_assets() {
        let dir = tempfile::tempdir().unwrap();
        let report = validate_content_root(dir.path());

        assert_eq!(report.issues.len(), 2);
        assert!(report.issues[0].contains("index.html"));
        assert!(report.issues[1].contains("asset directories"));
    }

    #[test]
    fn any_asset_directory_counts() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "x").unwrap();
        std::fs::create_dir(dir.path().join("static")).unwrap();

        assert!(validate_content_root(dir.path()).is_valid());
    }

    #[test]
    fn oversized_build_reports_its_real_file_count() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "x").unwrap();
        let js = dir.path().join("js");
        std::fs::create_dir(&js).unwrap();
        for n in 0..MAX_CONTENT_FILES + 50 {
            std::fs::write(js.join(format!("chunk{n}.js")), "").unwrap();
        }

        let report = validate_content_root(dir.path());
        assert_eq!(report.file_count, MAX_CONTENT_FILES + 51);
        assert_eq!(
            report.issues,
            vec![format!(
                "Very large number of files ({}) - may cause performance issues",
                MAX_CONTENT_FILES + 51
            )]
        );
    }

    #[test]
    fn nested_files_are_counted() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "x").unwrap();
        std::fs::create_dir_all(dir.path().join("assets/img/icons")).unwrap();
        std::fs::write(dir.path().join("assets/img/icons/a.svg"), "").unwrap();
        std::fs::write(dir.path().join("assets/img/b.png"), "").unwrap();

        assert_eq!(validate_content_root(dir.path()).file_count, 3);
    }
}
