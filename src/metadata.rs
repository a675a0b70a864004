use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde_json::Value;

use crate::error::RainfallError;

pub const PIXEL_METADATA_URL: &str = "https://trwwapi.herokuapp.com/rainfall/pixels/?format=json";
pub const GAUGE_METADATA_URL: &str = "https://trwwapi.herokuapp.com/rainfall/gauges/?format=json";

/// Resolves sensor identifier lists from a GeoJSON feature collection.
pub trait MetadataClient: Send + Sync {
    fn resolve_ids(&self, url: &str, id_field: &str) -> Result<Vec<String>, RainfallError>;
}

#[derive(Clone)]
pub struct MetadataHttpClient {
    client: Client,
}

impl MetadataHttpClient {
    pub fn new() -> Result<Self, RainfallError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&format!("rainfall-archive/{}", env!("CARGO_PKG_VERSION")))
                .map_err(|err| RainfallError::MetadataHttp(err.to_string()))?,
        );
        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|err| RainfallError::MetadataHttp(err.to_string()))?;
        Ok(Self { client })
    }
}

impl MetadataClient for MetadataHttpClient {
    fn resolve_ids(&self, url: &str, id_field: &str) -> Result<Vec<String>, RainfallError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|err| RainfallError::MetadataHttp(err.to_string()))?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .unwrap_or_else(|_| "metadata request failed".to_string());
            return Err(RainfallError::MetadataStatus { status, message });
        }
        let body: Value = response
            .json()
            .map_err(|err| RainfallError::MalformedMetadata(err.to_string()))?;
        extract_feature_ids(&body, id_field)
    }
}

/// Pulls `properties[id_field]` out of every feature, in source order.
/// Identifier values are strings or numbers in the 3RWW data; both are
/// rendered as strings.
pub fn extract_feature_ids(body: &Value, id_field: &str) -> Result<Vec<String>, RainfallError> {
    let features = body
        .get("features")
        .and_then(Value::as_array)
        .ok_or_else(|| RainfallError::MalformedMetadata("missing \"features\" array".to_string()))?;

    let mut ids = Vec::with_capacity(features.len());
    for feature in features {
        let properties = feature.get("properties").and_then(Value::as_object).ok_or_else(|| {
            RainfallError::MalformedMetadata("feature missing \"properties\" object".to_string())
        })?;
        let value = properties.get(id_field).ok_or_else(|| {
            RainfallError::MalformedMetadata(format!("feature missing property {id_field:?}"))
        })?;
        let id = match value {
            Value::String(text) => text.clone(),
            Value::Number(number) => number.to_string(),
            other => {
                return Err(RainfallError::MalformedMetadata(format!(
                    "property {id_field:?} is neither string nor number: {other}"
                )));
            }
        };
        ids.push(id);
    }
    Ok(ids)
}
