//! AWS credential sources and profile discovery
//!
//! The S3 client never reads credentials on its own: callers pick a
//! [`CredentialSource`] and pass it in. [`ProfileManager`] reads the shared
//! config files so a named profile can be checked before any request is made.
//! It honours `AWS_CONFIG_FILE` and `AWS_SHARED_CREDENTIALS_FILE`, falling
//! back to `~/.aws/config` and `~/.aws/credentials`.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Where the S3 client gets its credentials from
#[derive(Clone, PartialEq, Eq, Default)]
pub enum CredentialSource {
    /// The SDK default chain: environment, shared files, SSO, instance roles
    #[default]
    Ambient,
    /// A named profile from the shared config files
    Profile(String),
    /// Fixed keys, mostly for S3-compatible services
    Static {
        access_key_id: String,
        secret_access_key: String,
    },
}

impl CredentialSource {
    /// Profile when a name is given, the default chain otherwise
    pub fn from_profile(profile: Option<&str>) -> Self {
        match profile {
            Some(name) => CredentialSource::Profile(name.to_string()),
            None => CredentialSource::Ambient,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            CredentialSource::Ambient => "default credential chain".to_string(),
            CredentialSource::Profile(name) => format!("profile '{}'", name),
            CredentialSource::Static { access_key_id, .. } => {
                format!("static key {}", access_key_id)
            }
        }
    }
}

// Keeps the secret key out of logs and panic messages.
impl std::fmt::Debug for CredentialSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CredentialSource::Ambient => f.write_str("Ambient"),
            CredentialSource::Profile(name) => f.debug_tuple("Profile").field(name).finish(),
            CredentialSource::Static { access_key_id, .. } => f
                .debug_struct("Static")
                .field("access_key_id", access_key_id)
                .field("secret_access_key", &"<redacted>")
                .finish(),
        }
    }
}

/// Type of AWS profile based on its configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileType {
    StaticCredentials,
    AssumeRole,
    Sso,
    Environment,
    Default,
    Unknown,
}

impl ProfileType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileType::StaticCredentials => "Static Credentials",
            ProfileType::AssumeRole => "Assume Role",
            ProfileType::Sso => "SSO",
            ProfileType::Environment => "Environment",
            ProfileType::Default => "Default",
            ProfileType::Unknown => "Unknown",
        }
    }
}

/// A profile found in the shared config files
#[derive(Debug, Clone, Default)]
pub struct AwsProfile {
    pub name: String,
    pub region: Option<String>,
    pub role_arn: Option<String>,
    pub sso_start_url: Option<String>,
    pub sso_session: Option<String>,
    pub credential_source: Option<String>,
    pub has_static_credentials: bool,
}

impl AwsProfile {
    fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn profile_type(&self) -> ProfileType {
        if self.sso_start_url.is_some() || self.sso_session.is_some() {
            ProfileType::Sso
        } else if self.role_arn.is_some() {
            ProfileType::AssumeRole
        } else if self.has_static_credentials {
            ProfileType::StaticCredentials
        } else if self.credential_source.is_some() {
            ProfileType::Environment
        } else if self.name == "default" {
            ProfileType::Default
        } else {
            ProfileType::Unknown
        }
    }
}

/// Profiles defined in the shared AWS config and credentials files
#[derive(Debug, Default)]
pub struct ProfileManager {
    profiles: HashMap<String, AwsProfile>,
}

impl ProfileManager {
    /// Load profiles from the standard locations
    pub fn load() -> Result<Self> {
        let aws_dir = dirs::home_dir()
            .map(|h| h.join(".aws"))
            .unwrap_or_else(|| PathBuf::from(".aws"));

        let config_path = std::env::var_os("AWS_CONFIG_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| aws_dir.join("config"));
        let credentials_path = std::env::var_os("AWS_SHARED_CREDENTIALS_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| aws_dir.join("credentials"));

        Self::from_files(&config_path, &credentials_path)
    }

    /// Load profiles from explicit file paths; missing files are ignored
    pub fn from_files(config_path: &Path, credentials_path: &Path) -> Result<Self> {
        let mut manager = Self::default();

        if credentials_path.exists() {
            let content = std::fs::read_to_string(credentials_path)
                .with_context(|| format!("Failed to read {:?}", credentials_path))?;
            manager.parse_credentials(&content);
        }

        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)
                .with_context(|| format!("Failed to read {:?}", config_path))?;
            manager.parse_config(&content);
        }

        tracing::debug!("Found {} AWS profiles", manager.profiles.len());
        Ok(manager)
    }

    fn parse_config(&mut self, content: &str) {
        let mut current: Option<String> = None;

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if let Some(section) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                let section = section.trim();
                current = if section == "default" {
                    Some("default".to_string())
                } else {
                    section
                        .strip_prefix("profile ")
                        .map(|name| name.trim().to_string())
                };
                if let Some(ref name) = current {
                    self.profiles
                        .entry(name.clone())
                        .or_insert_with(|| AwsProfile::named(name));
                }
                continue;
            }

            let (Some(name), Some((key, value))) = (current.as_ref(), line.split_once('=')) else {
                continue;
            };
            let Some(profile) = self.profiles.get_mut(name) else {
                continue;
            };
            let value = Some(value.trim().to_string());
            match key.trim() {
                "region" => profile.region = value,
                "role_arn" => profile.role_arn = value,
                "sso_start_url" => profile.sso_start_url = value,
                "sso_session" => profile.sso_session = value,
                "credential_source" => profile.credential_source = value,
                _ => {}
            }
        }
    }

    fn parse_credentials(&mut self, content: &str) {
        let mut current: Option<String> = None;
        let mut has_access_key = false;
        let mut has_secret_key = false;

        for line in content.lines().chain(std::iter::once("[]")) {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if let Some(section) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                // Close out the previous section
                if let Some(name) = current.take() {
                    if has_access_key && has_secret_key {
                        if let Some(profile) = self.profiles.get_mut(&name) {
                            profile.has_static_credentials = true;
                        }
                    }
                }
                has_access_key = false;
                has_secret_key = false;

                let name = section.trim();
                if !name.is_empty() {
                    self.profiles
                        .entry(name.to_string())
                        .or_insert_with(|| AwsProfile::named(name));
                    current = Some(name.to_string());
                }
            } else if let Some((key, _)) = line.split_once('=') {
                match key.trim() {
                    "aws_access_key_id" => has_access_key = true,
                    "aws_secret_access_key" => has_secret_key = true,
                    _ => {}
                }
            }
        }
    }

    /// Profile names, `default` first, the rest sorted
    pub fn profile_names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.profiles.keys().cloned().collect();
        names.sort();
        if let Some(pos) = names.iter().position(|n| n == "default") {
            let default = names.remove(pos);
            names.insert(0, default);
        }
        names
    }

    pub fn get_profile(&self, name: &str) -> Option<&AwsProfile> {
        self.profiles.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const CONFIG: &str = r#"
[default]
region = eu-west-1

[profile deploy]
role_arn = arn:aws:iam::123456789012:role/Deploy
source_profile = default

; comment
[profile sso-dev]
sso_session = corp
sso_account_id = 123456789012
sso_role_name = ReadOnly

[sso-session corp]
sso_start_url = https://corp.awsapps.com/start
"#;

    const CREDENTIALS: &str = r#"
[default]
aws_access_key_id = AKIAEXAMPLE
aws_secret_access_key = secret

[half]
aws_access_key_id = AKIAONLY
"#;

    fn manager_from(config: &str, credentials: &str) -> ProfileManager {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config");
        let credentials_path = dir.path().join("credentials");
        std::fs::write(&config_path, config).unwrap();
        std::fs::write(&credentials_path, credentials).unwrap();
        ProfileManager::from_files(&config_path, &credentials_path).unwrap()
    }

    #[test]
    fn test_profile_names_default_first() {
        let manager = manager_from(CONFIG, CREDENTIALS);
        assert_eq!(
            manager.profile_names(),
            vec!["default", "deploy", "half", "sso-dev"]
        );
    }

    #[test]
    fn test_sso_session_section_is_not_a_profile() {
        let manager = manager_from(CONFIG, CREDENTIALS);
        assert!(manager.get_profile("corp").is_none());
        assert!(manager.get_profile("sso-session corp").is_none());
    }

    #[test]
    fn test_profile_types() {
        let manager = manager_from(CONFIG, CREDENTIALS);
        let type_of = |name: &str| manager.get_profile(name).unwrap().profile_type();

        assert_eq!(type_of("default"), ProfileType::StaticCredentials);
        assert_eq!(type_of("deploy"), ProfileType::AssumeRole);
        assert_eq!(type_of("sso-dev"), ProfileType::Sso);
        assert_eq!(type_of("half"), ProfileType::Unknown);
    }

    #[test]
    fn test_region_parsed() {
        let manager = manager_from(CONFIG, CREDENTIALS);
        assert_eq!(
            manager.get_profile("default").unwrap().region.as_deref(),
            Some("eu-west-1")
        );
        assert!(manager.get_profile("deploy").unwrap().region.is_none());
    }

    #[test]
    fn test_missing_files_yield_no_profiles() {
        let dir = TempDir::new().unwrap();
        let manager =
            ProfileManager::from_files(&dir.path().join("config"), &dir.path().join("credentials"))
                .unwrap();
        assert!(manager.profile_names().is_empty());
    }

    #[test]
    fn test_credential_source_from_profile() {
        assert_eq!(CredentialSource::from_profile(None), CredentialSource::Ambient);
        assert_eq!(
            CredentialSource::from_profile(Some("deploy")),
            CredentialSource::Profile("deploy".to_string())
        );
    }

    #[test]
    fn test_describe_hides_secret() {
        let source = CredentialSource::Static {
            access_key_id: "minioadmin".to_string(),
            secret_access_key: "supersecret".to_string(),
        };
        let text = source.describe();
        assert!(text.contains("minioadmin"));
        assert!(!text.contains("supersecret"));
        assert!(!format!("{:?}", source).contains("supersecret"));
    }

    #[test]
    fn test_profile_type_as_str() {
        assert_eq!(ProfileType::Sso.as_str(), "SSO");
        assert_eq!(ProfileType::AssumeRole.as_str(), "Assume Role");
    }
}
