//! AWS JSON protocol client
//!
//! Sends `application/x-amz-json-1.1` POST requests addressed by the
//! `X-Amz-Target` header, and REST-JSON GET requests, over [`HttpClient`].
//! Requests are not signed; credentials and signing are left to whatever
//! sits between this client and the service.

use super::error::parse_error_body;
use crate::error::{Error, Result};
use crate::http::{HttpClient, RequestConfig};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

/// Content type of the AWS JSON 1.1 protocol
pub const AMZ_JSON_CONTENT_TYPE: &str = "application/x-amz-json-1.1";

/// Build the public endpoint of `service` in `region`
pub fn default_endpoint(service: &str, region: &str) -> String {
    format!("https://{service}.{region}.amazonaws.com")
}

/// Client for one AWS service endpoint
#[derive(Debug)]
pub struct AwsJsonClient {
    http: HttpClient,
    service: String,
    target_prefix: Option<String>,
    endpoint: String,
}

impl AwsJsonClient {
    /// Create a client for `service` at `endpoint`
    pub fn new(http: HttpClient, service: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            service: service.into(),
            target_prefix: None,
            endpoint: endpoint.into(),
        }
    }

    /// Prefix of the `X-Amz-Target` header (`Transcribe` for `Transcribe.ListVocabularies`)
    #[must_use]
    pub fn with_target_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.target_prefix = Some(prefix.into());
        self
    }

    /// Service name used in errors
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Endpoint URL
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Invoke a JSON 1.1 operation
    pub async fn call<B, T>(&self, operation: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let prefix = self.target_prefix.as_deref().unwrap_or(&self.service);
        let target = format!("{prefix}.{operation}");
        debug!(service = %self.service, target = %target, "Calling AWS JSON operation");

        let config = RequestConfig::new()
            .header("content-type", AMZ_JSON_CONTENT_TYPE)
            .header("x-amz-target", target)
            .json(serde_json::to_value(body)?);

        let response = self
            .http
            .post_with_config(&self.endpoint, config)
            .await
            .map_err(|e| self.service_error(e))?;
        let text = response.text().await?;
        decode_body(operation, &text)
    }

    /// Invoke a REST-JSON GET operation at `path`
    pub async fn get<T>(&self, operation: &str, path: &str, query: Vec<(String, String)>) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let url = format!(
            "{}/{}",
            self.endpoint.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        debug!(service = %self.service, operation, url = %url, "Calling AWS REST operation");

        let config = query
            .into_iter()
            .fold(RequestConfig::new(), |config, (key, value)| config.query(key, value));

        let response = self
            .http
            .get_with_config(&url, config)
            .await
            .map_err(|e| self.service_error(e))?;
        let text = response.text().await?;
        decode_body(operation, &text)
    }

    fn service_error(&self, error: Error) -> Error {
        match error {
            Error::HttpStatus { status, body } => parse_error_body(&self.service, status, &body),
            other => other,
        }
    }
}

/// Decode a success body; an empty body is an empty document
fn decode_body<T: DeserializeOwned>(operation: &str, text: &str) -> Result<T> {
    let text = if text.trim().is_empty() { "{}" } else { text };
    serde_json::from_str(text).map_err(|e| Error::malformed(operation, e.to_string()))
}
