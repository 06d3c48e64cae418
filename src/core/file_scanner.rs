use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use glob::{Pattern, glob};
use tracing::warn;
use walkdir::WalkDir;

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal directory paths.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Result of scanning files.
pub struct ScanResult {
    /// Markup files, sorted.
    pub files: BTreeSet<String>,
    pub skipped_count: usize,
}

/// Collect the HTML pages below `base_dir`.
///
/// `includes` narrows the scan to sub-directories (literal paths or glob
/// patterns); `ignore_patterns` drops paths by literal prefix or glob.
pub fn scan_files(base_dir: &str, includes: &[String], ignore_patterns: &[String]) -> ScanResult {
    let mut files = BTreeSet::new();
    let mut skipped_count = 0;

    let mut literal_ignore_paths: Vec<PathBuf> = Vec::new();
    let mut glob_patterns: Vec<Pattern> = Vec::new();

    for p in ignore_patterns {
        if is_glob_pattern(p) {
            match Pattern::new(p) {
                Ok(pattern) => glob_patterns.push(pattern),
                Err(e) => warn!(pattern = %p, error = %e, "invalid ignore pattern"),
            }
        } else {
            literal_ignore_paths.push(Path::new(base_dir).join(p));
        }
    }

    let dirs_to_scan: Vec<PathBuf> = if includes.is_empty() {
        vec![Path::new(base_dir).to_path_buf()]
    } else {
        let mut paths = Vec::new();
        for inc in includes {
            if is_glob_pattern(inc) {
                let full_pattern = Path::new(base_dir).join(inc);
                let pattern_str = full_pattern.to_string_lossy();
                match glob(&pattern_str) {
                    Ok(entries) => {
                        paths.extend(entries.flatten().filter(|entry| entry.is_dir()));
                    }
                    Err(e) => warn!(pattern = %inc, error = %e, "invalid include pattern"),
                }
            } else {
                let path = Path::new(base_dir).join(inc);
                if path.exists() {
                    paths.push(path);
                } else {
                    warn!(path = %path.display(), "include path does not exist");
                }
            }
        }
        paths
    };

    for dir in dirs_to_scan {
        for entry in WalkDir::new(dir) {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    skipped_count += 1;
                    warn!(error = %e, "cannot access path");
                    continue;
                }
            };
            let path = entry.path();
            let path_str = path.to_string_lossy();

            if literal_ignore_paths
                .iter()
                .any(|ignore_path| path.starts_with(ignore_path))
            {
                continue;
            }

            if glob_patterns.iter().any(|p| p.matches(&path_str)) {
                continue;
            }

            if path.is_file() && is_scannable_file(path) {
                files.insert(path_str.into());
            }
        }
    }

    ScanResult {
        files,
        skipped_count,
    }
}

fn is_scannable_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm"))
}

#[cfg(test)]
mod tests {
    use std::fs::{self, File};

    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_scan_html_files() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();

        File::create(dir_path.join("index.html")).unwrap();
        File::create(dir_path.join("about.HTM")).unwrap();
        File::create(dir_path.join("style.css")).unwrap();

        let result = scan_files(dir_path.to_str().unwrap(), &[], &[]);

        assert_eq!(result.files.len(), 2);
        assert!(result.files.iter().any(|f| f.ends_with("index.html")));
        assert!(result.files.iter().any(|f| f.ends_with("about.HTM")));
    }

    #[test]
    fn test_scan_ignores_glob() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();

        let vendor = dir_path.join("node_modules");
        fs::create_dir(&vendor).unwrap();
        File::create(vendor.join("demo.html")).unwrap();
        File::create(dir_path.join("index.html")).unwrap();

        let result = scan_files(
            dir_path.to_str().unwrap(),
            &[],
            &["**/node_modules/**".to_owned()],
        );

        assert_eq!(result.files.len(), 1);
        assert!(!result.files.iter().any(|f| f.contains("node_modules")));
    }

    #[test]
    fn test_scan_ignores_literal_directory_path() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();

        let dist = dir_path.join("dist");
        fs::create_dir(&dist).unwrap();
        File::create(dist.join("index.html")).unwrap();
        File::create(dir_path.join("index.html")).unwrap();

        let result = scan_files(dir_path.to_str().unwrap(), &[], &["dist".to_owned()]);

        assert_eq!(result.files.len(), 1);
        assert!(!result.files.iter().any(|f| f.contains("dist")));
    }

    #[test]
    fn test_scan_with_includes() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();

        let site = dir_path.join("site").join("blog");
        fs::create_dir_all(&site).unwrap();
        File::create(site.join("post.html")).unwrap();

        let drafts = dir_path.join("drafts");
        fs::create_dir(&drafts).unwrap();
        File::create(drafts.join("wip.html")).unwrap();

        let result = scan_files(
            dir_path.to_str().unwrap(),
            &["site".to_owned(), "missing".to_owned()],
            &[],
        );

        assert_eq!(result.files.len(), 1);
        assert!(result.files.iter().any(|f| f.ends_with("post.html")));
    }

    #[test]
    fn test_scan_with_glob_include() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();

        for sub in ["a", "b"] {
            let path = dir_path.join("pages").join(sub);
            fs::create_dir_all(&path).unwrap();
            File::create(path.join("index.html")).unwrap();
        }
        File::create(dir_path.join("root.html")).unwrap();

        let result = scan_files(dir_path.to_str().unwrap(), &["pages/*".to_owned()], &[]);

        assert_eq!(result.files.len(), 2);
        assert!(!result.files.iter().any(|f| f.ends_with("root.html")));
    }

    #[test]
    fn test_scan_deduplicates_overlapping_includes() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();

        let nested = dir_path.join("site").join("docs");
        fs::create_dir_all(&nested).unwrap();
        File::create(nested.join("guide.html")).unwrap();

        let result = scan_files(
            dir_path.to_str().unwrap(),
            &["site".to_owned(), "site/docs".to_owned()],
            &[],
        );

        assert_eq!(result.files.len(), 1);
    }

    #[test]
    fn test_is_glob_pattern() {
        assert!(is_glob_pattern("site/*"));
        assert!(is_glob_pattern("page?.html"));
        assert!(!is_glob_pattern("site"));
        assert!(!is_glob_pattern("pages/[lang]"));
    }
}
