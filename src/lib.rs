// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # listpager
//!
//! Continuation-token pagination for remote listing operations.
//!
//! A listing operation returns one page of results plus an opaque token
//! when more remain. [`PaginatedFetcher`] calls the operation repeatedly,
//! feeding each returned token into the next request, and yields the
//! items as a lazy stream. Callers can instead take manual control and
//! fetch a single page, keeping the token to resume later.
//!
//! ## Features
//!
//! - **Auto-pagination**: Follow tokens until the listing is exhausted
//! - **Manual control**: One page per invocation, caller-driven resume
//! - **Emission limit**: Cap total items with an exact resume point
//! - **Typed AWS listings**: Transcribe jobs, vocabularies, language models and DLM policies
//! - **Generic JSON listings**: Any endpoint with an item array and a next-token field
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use listpager::aws::{ListTranscriptionJobsRequest, TranscribeClient};
//! use listpager::http::HttpClient;
//! use listpager::pagination::{FetchOptions, PaginatedFetcher};
//!
//! #[tokio::main]
//! async fn main() -> listpager::Result<()> {
//!     let client = TranscribeClient::for_region(HttpClient::new()?, "us-east-1");
//!
//!     let jobs = PaginatedFetcher::new(
//!         client.list_transcription_jobs(),
//!         ListTranscriptionJobsRequest::default(),
//!         FetchOptions::new().max_items(200),
//!     )
//!     .collect_items()
//!     .await?;
//!
//!     println!("{} jobs", jobs.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                    PaginatedFetcher                      │
//! │  items() / pages() / project(f) → Stream<Result<_>>      │
//! └──────────────────────────────────────────────────────────┘
//!                            │ ListOperation
//! ┌──────────────┬───────────┴───────────┬───────────────────┐
//! │  FnOperation │   JsonListOperation   │  aws::transcribe  │
//! │  (closures)  │   (any JSON endpoint) │  aws::dlm         │
//! └──────────────┴───────────┬───────────┴───────────────────┘
//!                            │
//!                ┌───────────┴───────────┐
//!                │ HttpClient            │
//!                │ retry, rate limit     │
//!                └───────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// The pagination loop
pub mod pagination;

/// Remote listing operations
pub mod remote;

/// HTTP client with retry and rate limiting
pub mod http;

/// Typed AWS listing operations
pub mod aws;

/// Output selection
pub mod select;

/// Configuration file
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use pagination::{
    CancellationFlag, FetchOptions, FetchPhase, FetchState, ListRequest, ListResponse, Page,
    PaginatedFetcher,
};
pub use remote::{from_fn, ListOperation};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
