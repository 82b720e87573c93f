//! Error types for site deployment

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while validating, configuring or uploading a site
#[derive(Debug, Error)]
pub enum DeployError {
    /// A file the website configuration points at is not in the site directory
    #[error("required file '{name}' not found in site directory {dir:?}")]
    MissingRequiredFile { name: String, dir: PathBuf },

    /// The site directory could not be read
    #[error("failed to read site directory {path:?}")]
    SiteDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The storage service rejected a call
    #[error("{operation} failed for bucket '{bucket}': {message}")]
    Remote {
        operation: &'static str,
        bucket: String,
        message: String,
    },

    /// A local file could not be opened as an upload body
    #[error("failed to read {path:?} for upload: {message}")]
    Body { path: PathBuf, message: String },

    /// The requested AWS profile is not defined in the shared config files
    #[error("AWS profile '{name}' not found (known profiles: {})", .known.join(", "))]
    UnknownProfile { name: String, known: Vec<String> },

    /// The settings file exists but could not be used
    #[error("invalid settings file {path:?}: {message}")]
    Settings { path: PathBuf, message: String },

    /// The endpoint URL override does not parse
    #[error("invalid endpoint URL '{0}'")]
    InvalidEndpoint(String),
}

impl DeployError {
    /// Build a [`DeployError::Remote`] from any displayable service error
    pub fn remote(operation: &'static str, bucket: &str, message: impl Into<String>) -> Self {
        DeployError::Remote {
            operation,
            bucket: bucket.to_string(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DeployError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_message_names_file_and_dir() {
        let err = DeployError::MissingRequiredFile {
            name: "index.html".to_string(),
            dir: PathBuf::from("/srv/site"),
        };
        let msg = err.to_string();
        assert!(msg.contains("index.html"));
        assert!(msg.contains("/srv/site"));
    }

    #[test]
    fn test_remote_message() {
        let err = DeployError::remote("PutBucketPolicy", "my-bucket", "AccessDenied");
        assert_eq!(
            err.to_string(),
            "PutBucketPolicy failed for bucket 'my-bucket': AccessDenied"
        );
    }

    #[test]
    fn test_unknown_profile_lists_known_profiles() {
        let err = DeployError::UnknownProfile {
            name: "ghost".to_string(),
            known: vec!["default".to_string(), "deploy".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "AWS profile 'ghost' not found (known profiles: default, deploy)"
        );
    }

    #[test]
    fn test_site_dir_keeps_io_source() {
        let err = DeployError::SiteDir {
            path: PathBuf::from("site"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        let source = std::error::Error::source(&err).map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("gone"));
    }
}
