//! AWS S3 client wrapper

use crate::error::{DeployError, Result};
use crate::publish::BucketStore;
use crate::s3::credentials::CredentialSource;
use crate::s3::types::{BucketPolicy, WebsiteConfig};
use crate::site::SiteFile;
use async_trait::async_trait;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{ErrorDocument, IndexDocument, WebsiteConfiguration};
use aws_sdk_s3::Client;

/// Connection settings for [`S3Client`]
#[derive(Debug, Clone, Default)]
pub struct S3ClientConfig {
    pub credentials: CredentialSource,
    /// Region override; otherwise resolved from the environment or profile
    pub region: Option<String>,
    /// Custom endpoint for S3-compatible services
    pub endpoint_url: Option<String>,
    /// Use path-style addressing (required by most S3-compatible services)
    pub force_path_style: bool,
}

/// S3 client wrapper with the operations a deployment needs
pub struct S3Client {
    client: Client,
    current_region: String,
}

impl S3Client {
    /// Create a client from explicit connection settings
    pub async fn with_config(config: S3ClientConfig) -> Result<Self> {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());

        match &config.credentials {
            CredentialSource::Ambient => {}
            CredentialSource::Profile(name) => {
                loader = loader.profile_name(name);
            }
            CredentialSource::Static {
                access_key_id,
                secret_access_key,
            } => {
                loader = loader.credentials_provider(Credentials::new(
                    access_key_id,
                    secret_access_key,
                    None,
                    None,
                    "site-deploy",
                ));
            }
        }

        if let Some(region) = &config.region {
            loader = loader.region(Region::new(region.clone()));
        }

        if let Some(endpoint) = &config.endpoint_url {
            url::Url::parse(endpoint).map_err(|_| DeployError::InvalidEndpoint(endpoint.clone()))?;
            loader = loader.endpoint_url(endpoint);
        }

        let sdk_config = loader.load().await;
        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(config.force_path_style)
            .build();

        let current_region = sdk_config
            .region()
            .map(|r| r.to_string())
            .unwrap_or_else(|| "us-east-1".to_string());

        tracing::debug!(
            "S3 client ready: region={}, credentials={}, endpoint={:?}",
            current_region,
            config.credentials.describe(),
            config.endpoint_url
        );

        Ok(Self {
            client: Client::from_conf(s3_config),
            current_region,
        })
    }

    /// Get the current region
    pub fn region(&self) -> &str {
        &self.current_region
    }
}

#[async_trait]
impl BucketStore for S3Client {
    async fn put_bucket_policy(&self, bucket: &str, policy: &BucketPolicy) -> Result<()> {
        let policy = policy
            .to_json()
            .map_err(|e| DeployError::remote("PutBucketPolicy", bucket, e.to_string()))?;

        self.client
            .put_bucket_policy()
            .bucket(bucket)
            .policy(policy)
            .send()
            .await
            .map_err(|e| {
                DeployError::remote("PutBucketPolicy", bucket, DisplayErrorContext(e).to_string())
            })?;

        Ok(())
    }

    async fn put_bucket_website(&self, bucket: &str, website: &WebsiteConfig) -> Result<()> {
        let build_err = |e: aws_sdk_s3::error::BuildError| {
            DeployError::remote("PutBucketWebsite", bucket, e.to_string())
        };

        let configuration = WebsiteConfiguration::builder()
            .index_document(
                IndexDocument::builder()
                    .suffix(&website.index_document)
                    .build()
                    .map_err(build_err)?,
            )
            .error_document(
                ErrorDocument::builder()
                    .key(&website.error_document)
                    .build()
                    .map_err(build_err)?,
            )
            .build();

        self.client
            .put_bucket_website()
            .bucket(bucket)
            .website_configuration(configuration)
            .send()
            .await
            .map_err(|e| {
                DeployError::remote("PutBucketWebsite", bucket, DisplayErrorContext(e).to_string())
            })?;

        Ok(())
    }

    async fn put_object(&self, bucket: &str, file: &SiteFile) -> Result<()> {
        // Streams from disk; the handle is dropped once the request completes.
        let body = ByteStream::from_path(&file.path)
            .await
            .map_err(|e| DeployError::Body {
                path: file.path.clone(),
                message: e.to_string(),
            })?;

        self.client
            .put_object()
            .bucket(bucket)
            .key(&file.key)
            .body(body)
            .set_content_type(file.content_type.map(String::from))
            .send()
            .await
            .map_err(|e| {
                DeployError::remote("PutObject", bucket, DisplayErrorContext(e).to_string())
            })?;

        Ok(())
    }
}
