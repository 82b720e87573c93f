//! S3 client wrapper module
//!
//! This module provides the S3 side of a deployment:
//! - [`client::S3Client`] - aws-sdk-s3 backed [`crate::publish::BucketStore`]
//! - [`credentials`] - credential sources and AWS profile discovery
//! - [`types`] - bucket policy and website configuration documents

pub mod client;
pub mod credentials;
pub mod types;

// Re-export commonly used types
pub use client::{S3Client, S3ClientConfig};
pub use credentials::{AwsProfile, CredentialSource, ProfileManager, ProfileType};
pub use types::{BucketPolicy, PolicyStatement, WebsiteConfig};
