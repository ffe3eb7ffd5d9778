//! Generic JSON listing over HTTP
//!
//! For endpoints that accept a JSON body (or query string) and answer with
//! a JSON document carrying an item array and a next-token field, e.g.
//! `{"Items": [...], "NextToken": "abc"}`.

use super::ListOperation;
use crate::error::{Error, Result};
use crate::http::{HttpClient, RequestConfig};
use crate::pagination::{ListRequest, ListResponse};
use crate::types::{ContinuationToken, JsonObject, JsonValue, Method};
use async_trait::async_trait;
use std::sync::Arc;

/// Look up a dotted path (`$.a.b` or `a.b`) in a JSON document
pub fn lookup_path<'a>(value: &'a JsonValue, path: &str) -> Option<&'a JsonValue> {
    let path = path.strip_prefix("$.").unwrap_or(path);
    if path.is_empty() || path == "$" {
        return Some(value);
    }

    path.split('.').try_fold(value, |current, part| match current {
        JsonValue::Object(map) => map.get(part),
        _ => None,
    })
}

/// Read a scalar at `path` as a string token
fn lookup_token(value: &JsonValue, path: &str) -> Option<String> {
    match lookup_path(value, path)? {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Request for a [`JsonListOperation`]
#[derive(Debug, Clone, PartialEq)]
pub struct JsonListRequest {
    /// Request body fields (filters and the like)
    pub body: JsonObject,
    /// Field that receives the continuation token
    pub token_key: String,
    /// Field that receives the page size, if the service has one
    pub page_size_key: Option<String>,
}

impl JsonListRequest {
    /// Create a request with the given body and token field
    pub fn new(body: JsonObject, token_key: impl Into<String>) -> Self {
        Self {
            body,
            token_key: token_key.into(),
            page_size_key: None,
        }
    }

    /// Set the page size field name
    #[must_use]
    pub fn with_page_size_key(mut self, key: impl Into<String>) -> Self {
        self.page_size_key = Some(key.into());
        self
    }

    /// Body fields rendered as query parameters
    fn query_pairs(&self) -> Vec<(String, String)> {
        self.body
            .iter()
            .filter_map(|(key, value)| {
                let rendered = match value {
                    JsonValue::Null => return None,
                    JsonValue::String(s) => s.clone(),
                    other => other.to_string(),
                };
                Some((key.clone(), rendered))
            })
            .collect()
    }
}

impl ListRequest for JsonListRequest {
    fn set_continuation_token(&mut self, token: Option<ContinuationToken>) {
        match token {
            Some(token) => {
                self.body
                    .insert(self.token_key.clone(), JsonValue::String(token.into_inner()));
            }
            None => {
                self.body.remove(&self.token_key);
            }
        }
    }

    fn set_page_size(&mut self, size: u32) {
        if let Some(key) = &self.page_size_key {
            self.body.insert(key.clone(), JsonValue::from(size));
        }
    }
}

/// Response of a [`JsonListOperation`]
#[derive(Debug, Clone, PartialEq)]
pub struct JsonListResponse {
    /// The full response document
    pub body: JsonValue,
    items: Vec<JsonValue>,
    next_token: Option<ContinuationToken>,
}

impl JsonListResponse {
    /// Split a response document into items and next token.
    ///
    /// The item array must be present; a missing or empty token ends
    /// pagination.
    pub fn from_body(
        body: JsonValue,
        items_path: &str,
        token_path: &str,
    ) -> std::result::Result<Self, String> {
        let items = match lookup_path(&body, items_path) {
            Some(JsonValue::Array(items)) => items.clone(),
            Some(JsonValue::Null) | None => {
                return Err(format!("missing item array at '{items_path}'"));
            }
            Some(other) => {
                return Err(format!(
                    "expected an array at '{items_path}', found {}",
                    json_kind(other)
                ));
            }
        };
        let next_token = ContinuationToken::from_option(lookup_token(&body, token_path));

        Ok(Self {
            body,
            items,
            next_token,
        })
    }
}

impl ListResponse for JsonListResponse {
    type Item = JsonValue;

    fn next_token(&self) -> Option<ContinuationToken> {
        self.next_token.clone()
    }

    fn item_count(&self) -> usize {
        self.items.len()
    }

    fn into_items(self) -> Vec<JsonValue> {
        self.items
    }
}

impl serde::Serialize for JsonListResponse {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.body.serialize(serializer)
    }
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}

/// A listing endpoint that speaks plain JSON
#[derive(Debug, Clone)]
pub struct JsonListOperation {
    client: Arc<HttpClient>,
    name: String,
    url: String,
    method: Method,
    items_path: String,
    token_path: String,
    headers: Vec<(String, String)>,
}

impl JsonListOperation {
    /// Create an operation posting to `url`
    pub fn new(
        client: Arc<HttpClient>,
        url: impl Into<String>,
        items_path: impl Into<String>,
        token_path: impl Into<String>,
    ) -> Self {
        let url = url.into();
        Self {
            client,
            name: url.clone(),
            url,
            method: Method::POST,
            items_path: items_path.into(),
            token_path: token_path.into(),
            headers: Vec::new(),
        }
    }

    /// Use a different HTTP method (GET sends body fields as query parameters)
    #[must_use]
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Name used in logs and errors
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Add a header sent with every call
    #[must_use]
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }
}

#[async_trait]
impl ListOperation for JsonListOperation {
    type Request = JsonListRequest;
    type Response = JsonListResponse;

    fn name(&self) -> &str {
        &self.name
    }

    async fn list(&self, request: &JsonListRequest) -> Result<JsonListResponse> {
        let mut config = RequestConfig::new();
        for (key, value) in &self.headers {
            config = config.header(key, value);
        }
        config = match self.method {
            Method::POST => config.json(JsonValue::Object(request.body.clone())),
            Method::GET => request
                .query_pairs()
                .into_iter()
                .fold(config, |config, (key, value)| config.query(key, value)),
        };

        let text = self
            .client
            .request(self.method.into(), &self.url, config)
            .await?
            .text()
            .await?;
        let body: JsonValue = serde_json::from_str(&text)
            .map_err(|e| Error::malformed(&self.name, format!("invalid JSON body: {e}")))?;

        JsonListResponse::from_body(body, &self.items_path, &self.token_path)
            .map_err(|message| Error::malformed(&self.name, message))
    }
}
