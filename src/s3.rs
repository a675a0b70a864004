use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};

use crate::error::RainfallError;

pub const BUCKET_NAME: &str = "trww-rainfall-prod-3rww-datastore-558340784565";
pub const REGION: &str = "us-east-2";

/// Anonymous-read access to the rainfall archive bucket.
///
/// `Ok(Some(bytes))` is a hit, `Ok(None)` means the key does not exist; the
/// caller decides what a missing key means. Everything else is an error.
pub trait StoreClient: Send + Sync {
    fn get_object(&self, key: &str) -> Result<Option<Vec<u8>>, RainfallError>;
}

/// Fetches objects over plain HTTPS against the bucket's virtual-host URL.
/// The bucket is public, so no signing is involved.
#[derive(Clone)]
pub struct S3HttpClient {
    client: Client,
    base_url: String,
}

impl S3HttpClient {
    pub fn new() -> Result<Self, RainfallError> {
        Self::with_base_url(format!("https://{BUCKET_NAME}.s3.{REGION}.amazonaws.com"))
    }

    pub fn with_base_url(base_url: String) -> Result<Self, RainfallError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&format!("rainfall-archive/{}", env!("CARGO_PKG_VERSION")))
                .map_err(|err| RainfallError::StoreHttp(err.to_string()))?,
        );
        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|err| RainfallError::StoreHttp(err.to_string()))?;
        Ok(Self { client, base_url })
    }
}

impl StoreClient for S3HttpClient {
    fn get_object(&self, key: &str) -> Result<Option<Vec<u8>>, RainfallError> {
        let url = format!("{}/{key}", self.base_url);
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|err| RainfallError::StoreHttp(err.to_string()))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .unwrap_or_else(|_| "object store request failed".to_string());
            return Err(RainfallError::StoreStatus { status, message });
        }
        let bytes = response
            .bytes()
            .map_err(|err| RainfallError::StoreHttp(err.to_string()))?;
        Ok(Some(bytes.to_vec()))
    }
}
