// SPDX-FileCopyrightText: 2026 Giftbay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! S3 object storage uploader for gift images.
//!
//! Uploads fully buffered image bytes under a derived key, attempting to
//! mark each object publicly readable and falling back to bucket-policy
//! visibility when the bucket rejects object ACLs.

pub mod keys;

use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::error::ProvideErrorMetadata;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::ObjectCannedAcl;
use aws_sdk_s3::Client;
use tracing::{debug, info};

use giftbay_config::model::S3Config;
use giftbay_core::GiftbayError;

/// Uploader bound to a single bucket and region.
pub struct S3Uploader {
    client: Client,
    bucket: String,
    region: String,
}

impl S3Uploader {
    /// Builds a client from the configured static credentials, or from the
    /// default AWS provider chain when no access key is configured.
    pub async fn new(config: &S3Config) -> Result<Self, GiftbayError> {
        if config.bucket.is_empty() {
            return Err(GiftbayError::Config(
                "s3.bucket is required for uploads".into(),
            ));
        }

        let client = if config.access_key_id.is_empty() {
            let shared = aws_config::defaults(BehaviorVersion::latest())
                .region(Region::new(config.region.clone()))
                .load()
                .await;
            Client::new(&shared)
        } else {
            let credentials = Credentials::new(
                config.access_key_id.clone(),
                config.secret_access_key.clone(),
                None,
                None,
                "giftbay-config",
            );
            let conf = aws_sdk_s3::config::Builder::new()
                .behavior_version(BehaviorVersion::latest())
                .region(Region::new(config.region.clone()))
                .credentials_provider(credentials)
                .build();
            Client::from_conf(conf)
        };

        Ok(Self {
            client,
            bucket: config.bucket.clone(),
            region: config.region.clone(),
        })
    }

    /// Uploads `bytes` under `key`, returning the derived public URL.
    ///
    /// Two-attempt procedure: the first put carries a `public-read` ACL; if
    /// the bucket rejects object ACLs (BucketOwnerEnforced ownership), the
    /// put is retried once without the ACL, relying on bucket policy for
    /// visibility. Any other failure propagates immediately.
    pub async fn upload_public(
        &self,
        bytes: Vec<u8>,
        key: &str,
        content_type: &str,
    ) -> Result<String, GiftbayError> {
        let first = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(bytes.clone()))
            .content_type(content_type)
            .acl(ObjectCannedAcl::PublicRead)
            .send()
            .await;

        match first {
            Ok(_) => {}
            Err(err) if acl_rejected(&err) => {
                debug!(key, "bucket rejects object ACLs, retrying without public-read");
                self.client
                    .put_object()
                    .bucket(&self.bucket)
                    .key(key)
                    .body(ByteStream::from(bytes))
                    .content_type(content_type)
                    .send()
                    .await
                    .map_err(|e| upload_err(key, e))?;
            }
            Err(err) => return Err(upload_err(key, err)),
        }

        let url = public_url(&self.bucket, &self.region, key);
        info!(key, url = %url, "gift image uploaded");
        Ok(url)
    }
}

/// Derives the virtual-hosted-style public URL for an object.
///
/// us-east-1 uses the region-less `s3.amazonaws.com` host; all other regions
/// use the region-qualified form.
pub fn public_url(bucket: &str, region: &str, key: &str) -> String {
    if region == "us-east-1" {
        format!("https://{bucket}.s3.amazonaws.com/{key}")
    } else {
        format!("https://{bucket}.s3.{region}.amazonaws.com/{key}")
    }
}

/// True when a put failed specifically because the bucket does not support
/// object-level ACLs.
fn acl_rejected<E: ProvideErrorMetadata>(err: &E) -> bool {
    matches!(err.code(), Some("AccessControlListNotSupported"))
}

fn upload_err(
    key: &str,
    err: impl std::error::Error + Send + Sync + 'static,
) -> GiftbayError {
    GiftbayError::Upload {
        message: format!("failed to upload {key}"),
        source: Some(Box::new(err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_s3::error::ErrorMetadata;

    #[test]
    fn public_url_for_default_region_omits_region() {
        assert_eq!(
            public_url("giftbay-media", "us-east-1", "gifts/a.webp"),
            "https://giftbay-media.s3.amazonaws.com/gifts/a.webp"
        );
    }

    #[test]
    fn public_url_for_other_regions_is_region_qualified() {
        assert_eq!(
            public_url("giftbay-media", "eu-central-1", "gifts/a.webp"),
            "https://giftbay-media.s3.eu-central-1.amazonaws.com/gifts/a.webp"
        );
    }

    #[test]
    fn acl_rejection_is_detected_by_error_code() {
        let rejected = ErrorMetadata::builder()
            .code("AccessControlListNotSupported")
            .message("The bucket does not allow ACLs")
            .build();
        assert!(acl_rejected(&rejected));

        let other = ErrorMetadata::builder()
            .code("AccessDenied")
            .message("Access Denied")
            .build();
        assert!(!acl_rejected(&other));
    }

    #[tokio::test]
    async fn new_requires_bucket() {
        let config = S3Config {
            bucket: String::new(),
            region: "us-east-1".into(),
            access_key_id: String::new(),
            secret_access_key: String::new(),
        };
        assert!(S3Uploader::new(&config).await.is_err());
    }

    #[tokio::test]
    async fn new_accepts_static_credentials() {
        let config = S3Config {
            bucket: "giftbay-media".into(),
            region: "us-east-1".into(),
            access_key_id: "AKIAEXAMPLE".into(),
            secret_access_key: "secret".into(),
        };
        let uploader = S3Uploader::new(&config).await.unwrap();
        assert_eq!(uploader.bucket, "giftbay-media");
    }
}
