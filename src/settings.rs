//! Deployment settings file
//!
//! Optional defaults read from the platform-specific config folder:
//! - Linux: ~/.config/site-deploy/settings.json
//! - Windows: %APPDATA%/site-deploy/settings.json
//! - macOS: ~/Library/Application Support/site-deploy/settings.json
//!
//! Command-line flags take precedence over every value here.

use crate::error::{DeployError, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Defaults applied when the matching flag is not given
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Settings {
    /// AWS profile to deploy with
    #[serde(default)]
    pub profile: Option<String>,

    /// Region override
    #[serde(default)]
    pub region: Option<String>,

    /// Endpoint of an S3-compatible service
    #[serde(default)]
    pub endpoint_url: Option<String>,

    /// Use path-style bucket addressing
    #[serde(default)]
    pub force_path_style: bool,

    /// Local site directory
    #[serde(default)]
    pub site_dir: Option<PathBuf>,
}

impl Settings {
    /// Load settings from `path`, or from the default location.
    ///
    /// An explicit path must exist. The default file is optional and its
    /// absence yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::settings_path() {
                Some(p) if p.exists() => p,
                _ => {
                    tracing::debug!("Settings file not found, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        let contents = fs::read_to_string(&path).map_err(|e| DeployError::Settings {
            path: path.clone(),
            message: e.to_string(),
        })?;

        let settings: Settings =
            serde_json::from_str(&contents).map_err(|e| DeployError::Settings {
                path: path.clone(),
                message: e.to_string(),
            })?;

        if let Some(endpoint) = &settings.endpoint_url {
            if url::Url::parse(endpoint).is_err() {
                return Err(DeployError::InvalidEndpoint(endpoint.clone()));
            }
        }

        tracing::info!(
            "Loaded settings from {:?}: profile={:?}, region={:?}, endpoint={:?}",
            path,
            settings.profile,
            settings.region,
            settings.endpoint_url
        );

        Ok(settings)
    }

    /// Get the path to the default settings file
    pub fn settings_path() -> Option<PathBuf> {
        ProjectDirs::from("org", "site-deploy", "site-deploy")
            .map(|dirs| dirs.config_dir().join("settings.json"))
    }
}
