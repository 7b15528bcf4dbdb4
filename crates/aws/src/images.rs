//! Pet image URLs: CDN when configured, S3 pre-signed URLs otherwise.

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::presigning::PresigningConfig;
use petadoptions_core::pet::cdn_image_url;

use crate::error::{AwsError, Result};

/// Lifetime of pre-signed image URLs.
pub const PRESIGNED_URL_EXPIRY: Duration = Duration::from_secs(300);

/// Turns an image object key into a URL a browser can load.
#[async_trait]
pub trait ImageUrlResolver: Send + Sync {
    async fn image_url(&self, key: &str) -> Result<String>;
}

/// Serves images through a CDN distribution in front of the bucket.
#[derive(Debug, Clone)]
pub struct CdnImageUrls {
    base_url: String,
}

impl CdnImageUrls {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl ImageUrlResolver for CdnImageUrls {
    async fn image_url(&self, key: &str) -> Result<String> {
        Ok(cdn_image_url(&self.base_url, key))
    }
}

/// Signs short-lived GET URLs for objects in the images bucket.
#[derive(Debug, Clone)]
pub struct PresignedImageUrls {
    client: aws_sdk_s3::Client,
    bucket: String,
    expires_in: Duration,
}

impl PresignedImageUrls {
    pub fn new(client: aws_sdk_s3::Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
            expires_in: PRESIGNED_URL_EXPIRY,
        }
    }

    pub fn from_sdk_config(config: &aws_config::SdkConfig, bucket: impl Into<String>) -> Self {
        Self::new(aws_sdk_s3::Client::new(config), bucket)
    }
}

#[async_trait]
impl ImageUrlResolver for PresignedImageUrls {
    async fn image_url(&self, key: &str) -> Result<String> {
        let presigning = PresigningConfig::expires_in(self.expires_in)
            .map_err(|e| AwsError::Presign(e.to_string()))?;

        let request = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(presigning)
            .await
            .map_err(|e| AwsError::Presign(DisplayErrorContext(&e).to_string()))?;

        Ok(request.uri().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_cdn_urls() {
        let urls = CdnImageUrls::new("https://d111.cloudfront.net/");
        assert_eq!(
            urls.image_url("puppies/puppy3.jpg").await.unwrap(),
            "https://d111.cloudfront.net/puppies/puppy3.jpg"
        );
    }
}
