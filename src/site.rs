//! Local site directory scanning
//!
//! A site directory is flat: every regular file directly inside it becomes one
//! object keyed by its filename. Hidden entries (names starting with `.`) and
//! anything that is not a regular file are left out.

use crate::content_type;
use crate::error::{DeployError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// A file that will be uploaded as one object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteFile {
    /// Object key (the bare filename)
    pub key: String,
    /// Absolute path on disk
    pub path: PathBuf,
    /// Size in bytes at scan time
    pub size: u64,
    /// MIME type inferred from the extension, if known
    pub content_type: Option<&'static str>,
}

/// Result of scanning a site directory
#[derive(Debug, Clone, Default)]
pub struct SiteListing {
    /// Absolute path of the scanned directory
    pub root: PathBuf,
    /// Files to upload, sorted by key
    pub files: Vec<SiteFile>,
    /// Hidden entries that were skipped
    pub hidden: Vec<String>,
    /// Directories, sockets and other entries that were skipped
    pub skipped: Vec<String>,
}

impl SiteListing {
    /// Scan `dir` without descending into subdirectories
    pub fn scan(dir: &Path) -> Result<Self> {
        let site_dir_err = |source: std::io::Error| DeployError::SiteDir {
            path: dir.to_path_buf(),
            source,
        };

        let root = dir.canonicalize().map_err(site_dir_err)?;
        let entries = fs::read_dir(&root).map_err(site_dir_err)?;

        let mut listing = SiteListing {
            root: root.clone(),
            ..Default::default()
        };

        for entry in entries {
            let entry = entry.map_err(site_dir_err)?;
            let name = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(raw) => {
                    tracing::warn!("Skipping entry with non UTF-8 name: {:?}", raw);
                    listing.skipped.push(raw.to_string_lossy().into_owned());
                    continue;
                }
            };

            if name.starts_with('.') {
                tracing::debug!("Skipping hidden entry: {}", name);
                listing.hidden.push(name);
                continue;
            }

            // Follows symlinks, so a link to a regular file is uploaded.
            let path = entry.path();
            let metadata = fs::metadata(&path).map_err(site_dir_err)?;
            if !metadata.is_file() {
                tracing::debug!("Skipping non-file entry: {}", name);
                listing.skipped.push(name);
                continue;
            }

            listing.files.push(SiteFile {
                content_type: content_type::guess(&name),
                key: name,
                path,
                size: metadata.len(),
            });
        }

        listing.files.sort_by(|a, b| a.key.cmp(&b.key));
        listing.hidden.sort();
        listing.skipped.sort();

        Ok(listing)
    }

    /// Ensure every name in `required` is present as a file
    pub fn require(&self, required: &[&str]) -> Result<()> {
        for name in required {
            if !self.files.iter().any(|f| f.key == *name) {
                return Err(DeployError::MissingRequiredFile {
                    name: name.to_string(),
                    dir: self.root.clone(),
                });
            }
        }
        Ok(())
    }

    /// Sum of the sizes of all files to upload
    pub fn total_bytes(&self) -> u64 {
        self.files.iter().map(|f| f.size).sum()
    }

    /// Keys in upload order
    #[cfg(test)]
    pub fn keys(&self) -> Vec<&str> {
        self.files.iter().map(|f| f.key.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, contents: &[u8]) {
        fs::write(dir.join(name), contents).unwrap();
    }

    #[test]
    fn test_scan_skips_hidden_files() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "index.html", b"<html></html>");
        write(dir.path(), "style.css", b"p {}\n");
        write(dir.path(), ".swp_temp", b"junk");

        let listing = SiteListing::scan(dir.path()).unwrap();

        assert_eq!(listing.keys(), vec!["index.html", "style.css"]);
        assert_eq!(listing.hidden, vec![".swp_temp".to_string()]);
    }

    #[test]
    fn test_scan_does_not_recurse() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "index.html", b"x");
        fs::create_dir(dir.path().join("assets")).unwrap();
        write(&dir.path().join("assets"), "logo.png", b"png");

        let listing = SiteListing::scan(dir.path()).unwrap();

        assert_eq!(listing.keys(), vec!["index.html"]);
        assert_eq!(listing.skipped, vec!["assets".to_string()]);
    }

    #[test]
    fn test_scan_records_size_and_content_type() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.txt", b"0123456789");
        write(dir.path(), "blob.bin9", b"??");

        let listing = SiteListing::scan(dir.path()).unwrap();

        let txt = &listing.files[0];
        assert_eq!(txt.key, "a.txt");
        assert_eq!(txt.size, 10);
        assert_eq!(txt.content_type, Some("text/plain"));
        assert!(txt.path.is_absolute());

        let blob = &listing.files[1];
        assert_eq!(blob.key, "blob.bin9");
        assert_eq!(blob.content_type, None);

        assert_eq!(listing.total_bytes(), 12);
    }

    #[test]
    fn test_scan_missing_dir() {
        let dir = TempDir::new().unwrap();
        let err = SiteListing::scan(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, DeployError::SiteDir { .. }));
    }

    #[test]
    fn test_require_present() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "index.html", b"x");

        let listing = SiteListing::scan(dir.path()).unwrap();
        assert!(listing.require(&["index.html"]).is_ok());
    }

    #[test]
    fn test_require_missing() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "about.html", b"x");

        let listing = SiteListing::scan(dir.path()).unwrap();
        let err = listing.require(&["index.html"]).unwrap_err();

        match err {
            DeployError::MissingRequiredFile { name, .. } => assert_eq!(name, "index.html"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_require_ignores_hidden_and_directories() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), ".index.html", b"x");
        fs::create_dir(dir.path().join("index.html")).unwrap();

        let listing = SiteListing::scan(dir.path()).unwrap();
        assert!(listing.require(&["index.html"]).is_err());
    }
}
