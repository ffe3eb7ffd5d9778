//! Amazon Data Lifecycle Manager listing
//!
//! `GetLifecyclePolicies` is a REST-JSON `GET /policies` call. The service
//! returns every matching policy at once, so the response never carries a
//! continuation token and a fetch always ends after one call.

use super::client::{default_endpoint, AwsJsonClient};
use super::model::aws_enum;
use crate::error::{Error, Result};
use crate::http::HttpClient;
use crate::pagination::{ListRequest, ListResponse};
use crate::remote::ListOperation;
use crate::types::{ContinuationToken, StringMap};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Signing name and endpoint prefix
pub const SERVICE: &str = "dlm";

aws_enum! {
    /// Policy states accepted by the `state` filter
    pub enum GettablePolicyState {
        Enabled => "ENABLED",
        Disabled => "DISABLED",
        Error => "ERROR",
    }
}

aws_enum! {
    /// Resource types a policy can target
    pub enum ResourceType {
        Volume => "VOLUME",
        Instance => "INSTANCE",
    }
}

aws_enum! {
    /// Kind of lifecycle policy
    pub enum PolicyType {
        EbsSnapshotManagement => "EBS_SNAPSHOT_MANAGEMENT",
        ImageManagement => "IMAGE_MANAGEMENT",
        EventBasedPolicy => "EVENT_BASED_POLICY",
    }
}

/// Client for the Data Lifecycle Manager listing operation
#[derive(Debug, Clone)]
pub struct DlmClient {
    inner: Arc<AwsJsonClient>,
}

impl DlmClient {
    /// Create a client for `endpoint`
    pub fn new(http: HttpClient, endpoint: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(AwsJsonClient::new(http, SERVICE, endpoint)),
        }
    }

    /// Create a client for the public endpoint of `region`
    pub fn for_region(http: HttpClient, region: &str) -> Self {
        Self::new(http, default_endpoint(SERVICE, region))
    }

    /// Endpoint in use
    pub fn endpoint(&self) -> &str {
        self.inner.endpoint()
    }

    /// `GetLifecyclePolicies`
    pub fn get_lifecycle_policies(&self) -> GetLifecyclePolicies {
        GetLifecyclePolicies {
            client: Arc::clone(&self.inner),
        }
    }
}

/// A `key=value` tag filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagFilter {
    pub key: String,
    pub value: String,
}

impl TagFilter {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl std::str::FromStr for TagFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => Ok(Self::new(key.trim(), value.trim())),
            _ => Err(Error::invalid_parameter(
                "TargetTags",
                format!("'{s}' is not in key=value form"),
            )),
        }
    }
}

impl std::fmt::Display for TagFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

/// Filters for `GetLifecyclePolicies`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetLifecyclePoliciesRequest {
    pub policy_ids: Vec<String>,
    pub state: Option<GettablePolicyState>,
    pub resource_types: Vec<ResourceType>,
    pub target_tags: Vec<TagFilter>,
    pub tags_to_add: Vec<TagFilter>,
}

impl GetLifecyclePoliciesRequest {
    #[must_use]
    pub fn policy_id(mut self, id: impl Into<String>) -> Self {
        self.policy_ids.push(id.into());
        self
    }

    #[must_use]
    pub fn state(mut self, state: GettablePolicyState) -> Self {
        self.state = Some(state);
        self
    }

    #[must_use]
    pub fn resource_type(mut self, resource_type: ResourceType) -> Self {
        self.resource_types.push(resource_type);
        self
    }

    #[must_use]
    pub fn target_tag(mut self, tag: TagFilter) -> Self {
        self.target_tags.push(tag);
        self
    }

    #[must_use]
    pub fn tag_to_add(mut self, tag: TagFilter) -> Self {
        self.tags_to_add.push(tag);
        self
    }

    /// Query string pairs; list filters repeat their key
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> = self
            .policy_ids
            .iter()
            .map(|id| ("policyIds".to_string(), id.clone()))
            .collect();

        if let Some(state) = &self.state {
            pairs.push(("state".to_string(), state.to_string()));
        }
        pairs.extend(
            self.resource_types
                .iter()
                .map(|rt| ("resourceTypes".to_string(), rt.to_string())),
        );
        pairs.extend(
            self.target_tags
                .iter()
                .map(|tag| ("targetTags".to_string(), tag.to_string())),
        );
        pairs.extend(
            self.tags_to_add
                .iter()
                .map(|tag| ("tagsToAdd".to_string(), tag.to_string())),
        );
        pairs
    }
}

impl ListRequest for GetLifecyclePoliciesRequest {
    // The operation has no token parameter
    fn set_continuation_token(&mut self, _token: Option<ContinuationToken>) {}
}

/// Response of `GetLifecyclePolicies`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetLifecyclePoliciesResponse {
    #[serde(default)]
    pub policies: Vec<LifecyclePolicySummary>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LifecyclePolicySummary {
    #[serde(default)]
    pub policy_id: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub state: Option<GettablePolicyState>,
    #[serde(default)]
    pub tags: StringMap,
    #[serde(default)]
    pub policy_type: Option<PolicyType>,
    #[serde(default)]
    pub default_policy: Option<bool>,
}

impl ListResponse for GetLifecyclePoliciesResponse {
    type Item = LifecyclePolicySummary;

    fn next_token(&self) -> Option<ContinuationToken> {
        None
    }

    fn item_count(&self) -> usize {
        self.policies.len()
    }

    fn into_items(self) -> Vec<LifecyclePolicySummary> {
        self.policies
    }
}

/// Lists lifecycle policies matching the request filters
#[derive(Debug, Clone)]
pub struct GetLifecyclePolicies {
    client: Arc<AwsJsonClient>,
}

#[async_trait]
impl ListOperation for GetLifecyclePolicies {
    type Request = GetLifecyclePoliciesRequest;
    type Response = GetLifecyclePoliciesResponse;

    fn name(&self) -> &str {
        "GetLifecyclePolicies"
    }

    async fn list(&self, request: &GetLifecyclePoliciesRequest) -> Result<GetLifecyclePoliciesResponse> {
        self.client
            .get(self.name(), "/policies", request.query_pairs())
            .await
    }
}
