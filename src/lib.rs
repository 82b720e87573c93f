//! Static site deployment to S3
//!
//! Publishes a flat directory of site files to a bucket, installs a
//! public-read bucket policy and turns on static website hosting with
//! `index.html` as both index and error document.

pub mod cli;
pub mod content_type;
pub mod error;
pub mod publish;
pub mod s3;
pub mod settings;
pub mod site;

pub use error::DeployError;
pub use publish::{BucketStore, PublishReport, Publisher};
