//! Site publishing
//!
//! [`Publisher`] drives one deployment against a [`BucketStore`]:
//! validate the local site, install the public-read policy, enable website
//! hosting, then upload every file one by one. Nothing is retried or rolled
//! back; the first error ends the run.

use crate::error::Result;
use crate::s3::types::{BucketPolicy, WebsiteConfig};
use crate::site::{SiteFile, SiteListing};
use async_trait::async_trait;
use std::path::Path;

/// Remote operations a deployment needs from the object storage service
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BucketStore: Send + Sync {
    /// Replace the bucket's access policy
    async fn put_bucket_policy(&self, bucket: &str, policy: &BucketPolicy) -> Result<()>;

    /// Replace the bucket's static website configuration
    async fn put_bucket_website(&self, bucket: &str, website: &WebsiteConfig) -> Result<()>;

    /// Create or overwrite the object `file.key` with the file's contents
    async fn put_object(&self, bucket: &str, file: &SiteFile) -> Result<()>;
}

/// Outcome of a successful deployment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishReport {
    pub bucket: String,
    /// Keys uploaded, in upload order
    pub uploaded: Vec<String>,
    /// Hidden entries left out
    pub hidden: Vec<String>,
    /// Subdirectories and other non-file entries left out
    pub skipped: Vec<String>,
    /// Total bytes uploaded
    pub bytes: u64,
}

/// Publishes a local site directory to a bucket
pub struct Publisher<S> {
    store: S,
    website: WebsiteConfig,
}

impl<S: BucketStore> Publisher<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            website: WebsiteConfig::default(),
        }
    }

    /// Give back the underlying store
    #[cfg(test)]
    pub fn into_inner(self) -> S {
        self.store
    }

    /// Make every object in `bucket` publicly readable
    pub async fn configure_access_policy(&self, bucket: &str) -> Result<()> {
        tracing::info!("Setting bucket policy on {}", bucket);
        let policy = BucketPolicy::public_read(bucket);
        self.store.put_bucket_policy(bucket, &policy).await
    }

    /// Serve the index document for root and not-found requests
    pub async fn enable_website_hosting(&self, bucket: &str) -> Result<()> {
        tracing::info!("Converting bucket {} to be a website", bucket);
        self.store.put_bucket_website(bucket, &self.website).await
    }

    /// Scan `site_dir` and check the website documents are present
    pub fn validate_site(&self, site_dir: &Path) -> Result<SiteListing> {
        let listing = SiteListing::scan(site_dir)?;
        listing.require(&self.website.required_files())?;
        tracing::debug!(
            "Site directory {:?} holds {} files ({} bytes)",
            listing.root,
            listing.files.len(),
            listing.total_bytes()
        );
        Ok(listing)
    }

    /// Deploy `site_dir` to `bucket`.
    ///
    /// Local validation happens first, so a missing index document leaves
    /// the bucket untouched. A failure during uploads leaves the objects
    /// uploaded so far in place.
    pub async fn upload_site(&self, bucket: &str, site_dir: &Path) -> Result<PublishReport> {
        let listing = self.validate_site(site_dir)?;

        self.configure_access_policy(bucket).await?;
        self.enable_website_hosting(bucket).await?;

        let mut report = PublishReport {
            bucket: bucket.to_string(),
            hidden: listing.hidden.clone(),
            skipped: listing.skipped.clone(),
            ..Default::default()
        };

        for file in &listing.files {
            match file.content_type {
                Some(content_type) => {
                    tracing::info!("Putting {} ({})", file.path.display(), content_type)
                }
                None => tracing::warn!(
                    "Putting {} with no content type (unknown extension)",
                    file.path.display()
                ),
            }
            self.store.put_object(bucket, file).await?;
            report.uploaded.push(file.key.clone());
            report.bytes += file.size;
        }

        Ok(report)
    }
}
