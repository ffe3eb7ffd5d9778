//! CLI module
//!
//! Command-line interface for listing resources.
//!
//! # Commands
//!
//! - `transcription-jobs` - Transcribe transcription jobs
//! - `medical-transcription-jobs` - Transcribe medical transcription jobs
//! - `vocabularies` - Transcribe custom vocabularies
//! - `language-models` - Transcribe custom language models
//! - `lifecycle-policies` - Data Lifecycle Manager policies
//! - `list` - Any JSON endpoint paged by a continuation token
//!
//! Documents go to stdout, one per line; logs and the resume hint go to
//! stderr.

mod commands;
mod runner;

pub use commands::{Cli, Commands, MethodArg, OutputFormat, PagingArgs};
pub use runner::{RunSummary, Runner};
