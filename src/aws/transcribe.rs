//! Amazon Transcribe listing operations
//!
//! All four operations page with `NextToken` and accept `MaxResults`
//! between 1 and 100.

use super::client::{default_endpoint, AwsJsonClient};
use super::model::{aws_enum, epoch_seconds};
use crate::error::{Error, Result};
use crate::http::HttpClient;
use crate::pagination::{ListRequest, ListResponse};
use crate::remote::ListOperation;
use crate::types::ContinuationToken;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Signing name and endpoint prefix
pub const SERVICE: &str = "transcribe";
const TARGET_PREFIX: &str = "Transcribe";

/// Largest page the service returns
pub const MAX_RESULTS_LIMIT: u32 = 100;

fn validate_max_results(max_results: Option<u32>) -> Result<()> {
    match max_results {
        Some(value) if !(1..=MAX_RESULTS_LIMIT).contains(&value) => Err(Error::invalid_parameter(
            "MaxResults",
            format!("{value} is outside 1..={MAX_RESULTS_LIMIT}"),
        )),
        _ => Ok(()),
    }
}

aws_enum! {
    /// Status of a (medical) transcription job
    pub enum TranscriptionJobStatus {
        Queued => "QUEUED",
        InProgress => "IN_PROGRESS",
        Failed => "FAILED",
        Completed => "COMPLETED",
    }
}

aws_enum! {
    /// Processing state of a custom vocabulary
    pub enum VocabularyState {
        Pending => "PENDING",
        Ready => "READY",
        Failed => "FAILED",
    }
}

aws_enum! {
    /// Training status of a custom language model
    pub enum ModelStatus {
        InProgress => "IN_PROGRESS",
        Failed => "FAILED",
        Completed => "COMPLETED",
    }
}

/// Client for the Transcribe listing operations
#[derive(Debug, Clone)]
pub struct TranscribeClient {
    inner: Arc<AwsJsonClient>,
}

impl TranscribeClient {
    /// Create a client for `endpoint`
    pub fn new(http: HttpClient, endpoint: impl Into<String>) -> Self {
        let inner = AwsJsonClient::new(http, SERVICE, endpoint).with_target_prefix(TARGET_PREFIX);
        Self {
            inner: Arc::new(inner),
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

    /// `ListTranscriptionJobs`
    pub fn list_transcription_jobs(&self) -> ListTranscriptionJobs {
        ListTranscriptionJobs {
            client: Arc::clone(&self.inner),
        }
    }

    /// `ListMedicalTranscriptionJobs`
    pub fn list_medical_transcription_jobs(&self) -> ListMedicalTranscriptionJobs {
        ListMedicalTranscriptionJobs {
            client: Arc::clone(&self.inner),
        }
    }

    /// `ListVocabularies`
    pub fn list_vocabularies(&self) -> ListVocabularies {
        ListVocabularies {
            client: Arc::clone(&self.inner),
        }
    }

    /// `ListLanguageModels`
    pub fn list_language_models(&self) -> ListLanguageModels {
        ListLanguageModels {
            client: Arc::clone(&self.inner),
        }
    }
}

/// Wires a request/response pair to a JSON 1.1 operation
macro_rules! json_list_operation {
    (
        $(#[$meta:meta])*
        $op:ident($request:ident) -> $response:ident { $items:ident: $item:ty }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $op {
            client: Arc<AwsJsonClient>,
        }

        impl ListRequest for $request {
            fn set_continuation_token(&mut self, token: Option<ContinuationToken>) {
                self.next_token = token.map(ContinuationToken::into_inner);
            }

            fn set_page_size(&mut self, size: u32) {
                self.max_results = Some(match self.max_results {
                    Some(current) => current.min(size),
                    None => size.min(MAX_RESULTS_LIMIT),
                });
            }
        }

        impl ListResponse for $response {
            type Item = $item;

            fn next_token(&self) -> Option<ContinuationToken> {
                ContinuationToken::from_option(self.next_token.clone())
            }

            fn item_count(&self) -> usize {
                self.$items.len()
            }

            fn into_items(self) -> Vec<$item> {
                self.$items
            }
        }

        #[async_trait]
        impl ListOperation for $op {
            type Request = $request;
            type Response = $response;

            fn name(&self) -> &str {
                stringify!($op)
            }

            async fn list(&self, request: &$request) -> Result<$response> {
                validate_max_results(request.max_results)?;
                self.client.call(stringify!($op), request).await
            }
        }
    };
}

// ============================================================================
// ListTranscriptionJobs
// ============================================================================

/// Filters for `ListTranscriptionJobs`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListTranscriptionJobsRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TranscriptionJobStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_name_contains: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_results: Option<u32>,
}

impl ListTranscriptionJobsRequest {
    /// Only jobs with this status
    #[must_use]
    pub fn status(mut self, status: TranscriptionJobStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Only jobs whose name contains `fragment` (case-insensitive on the service side)
    #[must_use]
    pub fn job_name_contains(mut self, fragment: impl Into<String>) -> Self {
        self.job_name_contains = Some(fragment.into());
        self
    }
}

/// One page of `ListTranscriptionJobs`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListTranscriptionJobsResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TranscriptionJobStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
    #[serde(default)]
    pub transcription_job_summaries: Vec<TranscriptionJobSummary>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TranscriptionJobSummary {
    #[serde(default)]
    pub transcription_job_name: Option<String>,
    #[serde(default, deserialize_with = "epoch_seconds::deserialize")]
    pub creation_time: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "epoch_seconds::deserialize")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "epoch_seconds::deserialize")]
    pub completion_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub language_code: Option<String>,
    #[serde(default)]
    pub transcription_job_status: Option<TranscriptionJobStatus>,
    #[serde(default)]
    pub failure_reason: Option<String>,
    #[serde(default)]
    pub output_location_type: Option<String>,
    #[serde(default)]
    pub identify_language: Option<bool>,
}

json_list_operation! {
    /// Lists transcription jobs, newest first
    ListTranscriptionJobs(ListTranscriptionJobsRequest) -> ListTranscriptionJobsResponse {
        transcription_job_summaries: TranscriptionJobSummary
    }
}

// ============================================================================
// ListMedicalTranscriptionJobs
// ============================================================================

/// Filters for `ListMedicalTranscriptionJobs`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListMedicalTranscriptionJobsRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TranscriptionJobStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_name_contains: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_results: Option<u32>,
}

impl ListMedicalTranscriptionJobsRequest {
    /// Only jobs with this status
    #[must_use]
    pub fn status(mut self, status: TranscriptionJobStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Only jobs whose name contains `fragment`
    #[must_use]
    pub fn job_name_contains(mut self, fragment: impl Into<String>) -> Self {
        self.job_name_contains = Some(fragment.into());
        self
    }
}

/// One page of `ListMedicalTranscriptionJobs`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListMedicalTranscriptionJobsResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TranscriptionJobStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
    #[serde(default)]
    pub medical_transcription_job_summaries: Vec<MedicalTranscriptionJobSummary>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MedicalTranscriptionJobSummary {
    #[serde(default)]
    pub medical_transcription_job_name: Option<String>,
    #[serde(default, deserialize_with = "epoch_seconds::deserialize")]
    pub creation_time: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "epoch_seconds::deserialize")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "epoch_seconds::deserialize")]
    pub completion_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub language_code: Option<String>,
    #[serde(default)]
    pub transcription_job_status: Option<TranscriptionJobStatus>,
    #[serde(default)]
    pub failure_reason: Option<String>,
    #[serde(default)]
    pub output_location_type: Option<String>,
    #[serde(default)]
    pub specialty: Option<String>,
    #[serde(default, rename = "Type")]
    pub job_type: Option<String>,
}

json_list_operation! {
    /// Lists medical transcription jobs, newest first
    ListMedicalTranscriptionJobs(ListMedicalTranscriptionJobsRequest) -> ListMedicalTranscriptionJobsResponse {
        medical_transcription_job_summaries: MedicalTranscriptionJobSummary
    }
}

// ============================================================================
// ListVocabularies
// ============================================================================

/// Filters for `ListVocabularies`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListVocabulariesRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_equals: Option<VocabularyState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_contains: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_results: Option<u32>,
}

impl ListVocabulariesRequest {
    /// Only vocabularies in this state
    #[must_use]
    pub fn state_equals(mut self, state: VocabularyState) -> Self {
        self.state_equals = Some(state);
        self
    }

    /// Only vocabularies whose name contains `fragment`
    #[must_use]
    pub fn name_contains(mut self, fragment: impl Into<String>) -> Self {
        self.name_contains = Some(fragment.into());
        self
    }
}

/// One page of `ListVocabularies`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListVocabulariesResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<VocabularyState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
    #[serde(default)]
    pub vocabularies: Vec<VocabularyInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VocabularyInfo {
    #[serde(default)]
    pub vocabulary_name: Option<String>,
    #[serde(default)]
    pub language_code: Option<String>,
    #[serde(default, deserialize_with = "epoch_seconds::deserialize")]
    pub last_modified_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub vocabulary_state: Option<VocabularyState>,
}

json_list_operation! {
    /// Lists custom vocabularies
    ListVocabularies(ListVocabulariesRequest) -> ListVocabulariesResponse {
        vocabularies: VocabularyInfo
    }
}

// ============================================================================
// ListLanguageModels
// ============================================================================

/// Filters for `ListLanguageModels`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListLanguageModelsRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_equals: Option<ModelStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_contains: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_results: Option<u32>,
}

impl ListLanguageModelsRequest {
    /// Only models with this status
    #[must_use]
    pub fn status_equals(mut self, status: ModelStatus) -> Self {
        self.status_equals = Some(status);
        self
    }

    /// Only models whose name contains `fragment`
    #[must_use]
    pub fn name_contains(mut self, fragment: impl Into<String>) -> Self {
        self.name_contains = Some(fragment.into());
        self
    }
}

/// One page of `ListLanguageModels`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListLanguageModelsResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
    #[serde(default)]
    pub models: Vec<LanguageModel>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LanguageModel {
    #[serde(default)]
    pub model_name: Option<String>,
    #[serde(default, deserialize_with = "epoch_seconds::deserialize")]
    pub create_time: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "epoch_seconds::deserialize")]
    pub last_modified_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub language_code: Option<String>,
    #[serde(default)]
    pub base_model_name: Option<String>,
    #[serde(default)]
    pub model_status: Option<ModelStatus>,
    #[serde(default)]
    pub upgrade_availability: Option<bool>,
    #[serde(default)]
    pub failure_reason: Option<String>,
}

json_list_operation! {
    /// Lists custom language models
    ListLanguageModels(ListLanguageModelsRequest) -> ListLanguageModelsResponse {
        models: LanguageModel
    }
}
