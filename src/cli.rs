//! Command-line surface

use crate::error::DeployError;
use crate::publish::{PublishReport, Publisher};
use crate::s3::{CredentialSource, ProfileManager, S3Client, S3ClientConfig};
use crate::settings::Settings;
use anyhow::{Context, Result};
use clap::builder::NonEmptyStringValueParser;
use clap::Parser;
use std::path::{Path, PathBuf};

/// Directory deployed when neither a flag nor the settings name one
pub const DEFAULT_SITE_DIR: &str = "site";

/// `site` next to the executable when it exists, else in the working directory
pub fn default_site_dir(exe_dir: Option<&Path>) -> PathBuf {
    if let Some(dir) = exe_dir {
        let candidate = dir.join(DEFAULT_SITE_DIR);
        if candidate.is_dir() {
            return candidate;
        }
    }
    PathBuf::from(DEFAULT_SITE_DIR)
}

fn executable_dir() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?.canonicalize().ok()?;
    exe.parent().map(Path::to_path_buf)
}

/// Deploy a static site to an S3 bucket
#[derive(Debug, Parser)]
#[command(
    name = "site-deploy",
    version,
    about = "Deploy a static site to an S3 bucket and enable website hosting"
)]
pub struct Cli {
    /// The bucket to deploy the site to
    #[arg(value_parser = NonEmptyStringValueParser::new())]
    pub bucket: String,

    /// Local directory holding the site files
    #[arg(long)]
    pub site_dir: Option<PathBuf>,

    /// AWS profile to use instead of the default credential chain
    #[arg(long)]
    pub profile: Option<String>,

    /// AWS region
    #[arg(long)]
    pub region: Option<String>,

    /// Endpoint URL of an S3-compatible service
    #[arg(long)]
    pub endpoint_url: Option<String>,

    /// Use path-style bucket addressing (`--force-path-style=false` turns it off)
    #[arg(
        long,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub force_path_style: Option<bool>,

    /// Settings file (defaults to the platform config directory)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Everything a deployment needs, after merging flags over settings
#[derive(Debug, Clone)]
pub struct DeployOptions {
    pub bucket: String,
    pub site_dir: PathBuf,
    pub client: S3ClientConfig,
}

impl DeployOptions {
    pub fn resolve(cli: Cli, settings: Settings) -> Self {
        let profile = cli.profile.or(settings.profile);

        DeployOptions {
            bucket: cli.bucket,
            site_dir: cli
                .site_dir
                .or(settings.site_dir)
                .unwrap_or_else(|| default_site_dir(executable_dir().as_deref())),
            client: S3ClientConfig {
                credentials: CredentialSource::from_profile(profile.as_deref()),
                region: cli.region.or(settings.region),
                endpoint_url: cli.endpoint_url.or(settings.endpoint_url),
                force_path_style: cli.force_path_style.unwrap_or(settings.force_path_style),
            },
        }
    }
}

/// Check a named profile exists and fall back to its region when none was given
pub fn apply_profile(
    profiles: &ProfileManager,
    client: &mut S3ClientConfig,
) -> std::result::Result<(), DeployError> {
    let CredentialSource::Profile(name) = &client.credentials else {
        return Ok(());
    };

    let Some(profile) = profiles.get_profile(name) else {
        return Err(DeployError::UnknownProfile {
            name: name.clone(),
            known: profiles.profile_names(),
        });
    };

    tracing::info!(
        "Using AWS profile '{}' ({}, region {})",
        name,
        profile.profile_type().as_str(),
        profile.region.as_deref().unwrap_or("unset")
    );

    if client.region.is_none() {
        client.region = profile.region.clone();
    }
    Ok(())
}

/// Run one deployment
pub async fn run(cli: Cli) -> Result<PublishReport> {
    let settings = Settings::load(cli.config.as_deref())?;
    let mut options = DeployOptions::resolve(cli, settings);

    if matches!(options.client.credentials, CredentialSource::Profile(_)) {
        let profiles = ProfileManager::load().context("Failed to read AWS profiles")?;
        apply_profile(&profiles, &mut options.client)?;
    }

    let client = S3Client::with_config(options.client)
        .await
        .context("Failed to create S3 client")?;

    tracing::info!(
        "Deploying {} to s3://{} ({})",
        options.site_dir.display(),
        options.bucket,
        client.region()
    );

    let publisher = Publisher::new(client);
    let report = publisher
        .upload_site(&options.bucket, &options.site_dir)
        .await?;

    tracing::info!(
        "Uploaded {} files ({} bytes) to {}, skipped {} hidden and {} other entries",
        report.uploaded.len(),
        report.bytes,
        report.bucket,
        report.hidden.len(),
        report.skipped.len()
    );

    Ok(report)
}
