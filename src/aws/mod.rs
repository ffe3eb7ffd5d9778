//! Typed AWS listing operations
//!
//! Each operation implements [`ListOperation`](crate::remote::ListOperation)
//! so it can be driven by [`PaginatedFetcher`](crate::pagination::PaginatedFetcher).
//!
//! # Example
//!
//! ```ignore
//! let http = HttpClient::new()?;
//! let transcribe = TranscribeClient::for_region(http, "us-east-1");
//! let request = ListVocabulariesRequest::default().state_equals(VocabularyState::Ready);
//!
//! let vocabularies = PaginatedFetcher::new(transcribe.list_vocabularies(), request, FetchOptions::new())
//!     .collect_items()
//!     .await?;
//! ```

mod client;
pub mod dlm;
mod error;
mod model;
pub mod transcribe;

pub use client::{default_endpoint, AwsJsonClient, AMZ_JSON_CONTENT_TYPE};
pub use dlm::{DlmClient, GetLifecyclePolicies, GetLifecyclePoliciesRequest, GetLifecyclePoliciesResponse};
pub use error::parse_error_body;
pub use transcribe::{
    ListLanguageModels, ListLanguageModelsRequest, ListMedicalTranscriptionJobs,
    ListMedicalTranscriptionJobsRequest, ListTranscriptionJobs, ListTranscriptionJobsRequest,
    ListVocabularies, ListVocabulariesRequest, TranscribeClient,
};
