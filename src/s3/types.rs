//! S3 bucket configuration documents

use serde::{Deserialize, Serialize};

/// Object served for root requests and for not-found requests
pub const INDEX_DOCUMENT: &str = "index.html";
pub const ERROR_DOCUMENT: &str = "index.html";

/// IAM policy language version understood by S3
pub const POLICY_VERSION: &str = "2012-10-17";

/// Bucket policy document, serialized with AWS field names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BucketPolicy {
    pub version: String,
    pub statement: Vec<PolicyStatement>,
}

/// A single policy statement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyStatement {
    pub sid: String,
    pub effect: String,
    pub principal: String,
    pub action: Vec<String>,
    pub resource: String,
}

impl BucketPolicy {
    /// Policy allowing anyone to read every object in `bucket`
    pub fn public_read(bucket: &str) -> Self {
        Self {
            version: POLICY_VERSION.to_string(),
            statement: vec![PolicyStatement {
                sid: "AddPerm".to_string(),
                effect: "Allow".to_string(),
                principal: "*".to_string(),
                action: vec!["s3:GetObject".to_string()],
                resource: Self::objects_arn(bucket),
            }],
        }
    }

    /// ARN matching all objects in `bucket`
    pub fn objects_arn(bucket: &str) -> String {
        format!("arn:aws:s3:::{}/*", bucket)
    }

    /// Serialize to the JSON string S3 expects
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Static website hosting configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebsiteConfig {
    /// Suffix appended to directory requests (`IndexDocument.Suffix`)
    pub index_document: String,
    /// Object returned on 4xx errors (`ErrorDocument.Key`)
    pub error_document: String,
}

impl Default for WebsiteConfig {
    fn default() -> Self {
        Self {
            index_document: INDEX_DOCUMENT.to_string(),
            error_document: ERROR_DOCUMENT.to_string(),
        }
    }
}

impl WebsiteConfig {
    /// Files that must be present locally before the site can be published
    pub fn required_files(&self) -> Vec<&str> {
        let mut files = vec![self.index_document.as_str()];
        if self.error_document != self.index_document {
            files.push(self.error_document.as_str());
        }
        files
    }
}
