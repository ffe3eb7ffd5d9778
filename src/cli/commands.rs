//! CLI commands and argument parsing

use crate::aws::dlm::{GettablePolicyState, ResourceType, TagFilter};
use crate::aws::transcribe::{ModelStatus, TranscriptionJobStatus, VocabularyState};
use crate::select::Select;
use crate::types::Method;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// List AWS Transcribe and DLM resources, or any token-paged JSON endpoint
#[derive(Parser, Debug)]
#[command(name = "listpager")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Service endpoint, overriding the config file and region default
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// AWS region used to build the default endpoint
    #[arg(long, global = true)]
    pub region: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Paging flags shared by every listing command
#[derive(Args, Debug, Clone, Default)]
pub struct PagingArgs {
    /// Resume from a token printed by an earlier run
    #[arg(long, alias = "next-token")]
    pub starting_token: Option<String>,

    /// Fetch a single page and print the token for the next one
    #[arg(long)]
    pub no_auto_iteration: bool,

    /// Results requested per call
    #[arg(long)]
    pub max_results: Option<u32>,

    /// Stop after emitting this many items
    #[arg(long)]
    pub max_items: Option<usize>,

    /// What to print: `items`, `*` for whole responses, or a response field name
    #[arg(long, default_value = "items")]
    pub select: Select,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List Transcribe transcription jobs
    TranscriptionJobs {
        /// Only jobs with this status
        #[arg(long)]
        status: Option<TranscriptionJobStatus>,

        /// Only jobs whose name contains this text
        #[arg(long)]
        job_name_contains: Option<String>,

        #[command(flatten)]
        paging: PagingArgs,
    },

    /// List Transcribe medical transcription jobs
    MedicalTranscriptionJobs {
        /// Only jobs with this status
        #[arg(long)]
        status: Option<TranscriptionJobStatus>,

        /// Only jobs whose name contains this text
        #[arg(long)]
        job_name_contains: Option<String>,

        #[command(flatten)]
        paging: PagingArgs,
    },

    /// List Transcribe custom vocabularies
    Vocabularies {
        /// Only vocabularies in this state
        #[arg(long)]
        state_equals: Option<VocabularyState>,

        /// Only vocabularies whose name contains this text
        #[arg(long)]
        name_contains: Option<String>,

        #[command(flatten)]
        paging: PagingArgs,
    },

    /// List Transcribe custom language models
    LanguageModels {
        /// Only models with this status
        #[arg(long)]
        status_equals: Option<ModelStatus>,

        /// Only models whose name contains this text
        #[arg(long)]
        name_contains: Option<String>,

        #[command(flatten)]
        paging: PagingArgs,
    },

    /// List Data Lifecycle Manager policies
    LifecyclePolicies {
        /// Policy identifiers (repeatable or comma-separated)
        #[arg(long = "policy-id", value_delimiter = ',')]
        policy_ids: Vec<String>,

        /// Only policies in this state
        #[arg(long)]
        state: Option<GettablePolicyState>,

        /// Only policies targeting these resource types
        #[arg(long = "resource-type", value_delimiter = ',')]
        resource_types: Vec<ResourceType>,

        /// Only policies targeting resources with this tag (key=value)
        #[arg(long = "target-tag")]
        target_tags: Vec<TagFilter>,

        /// Only policies that add this tag to snapshots (key=value)
        #[arg(long = "tag-to-add")]
        tags_to_add: Vec<TagFilter>,

        #[command(flatten)]
        paging: PagingArgs,
    },

    /// Page through any JSON endpoint that returns a continuation token
    List {
        /// Endpoint URL
        #[arg(long)]
        url: String,

        /// Request body (JSON object); sent as query parameters with GET
        #[arg(long)]
        body: Option<String>,

        /// Path of the item array in the response
        #[arg(long, default_value = "Items")]
        items_path: String,

        /// Path of the next token in the response
        #[arg(long, default_value = "NextToken")]
        token_path: String,

        /// Request field that carries the token
        #[arg(long, default_value = "NextToken")]
        token_key: String,

        /// Request field that carries the page size
        #[arg(long)]
        page_size_key: Option<String>,

        /// HTTP method
        #[arg(long, default_value = "post")]
        method: MethodArg,

        /// Extra request header (name:value), repeatable
        #[arg(long = "header")]
        headers: Vec<String>,

        #[command(flatten)]
        paging: PagingArgs,
    },
}

impl Commands {
    /// Paging flags of the selected command
    pub fn paging(&self) -> &PagingArgs {
        match self {
            Self::TranscriptionJobs { paging, .. }
            | Self::MedicalTranscriptionJobs { paging, .. }
            | Self::Vocabularies { paging, .. }
            | Self::LanguageModels { paging, .. }
            | Self::LifecyclePolicies { paging, .. }
            | Self::List { paging, .. } => paging,
        }
    }
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one document per line)
    Json,
    /// Indented JSON
    Pretty,
}

/// HTTP method of the generic `list` command
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum MethodArg {
    Get,
    Post,
}

impl From<MethodArg> for Method {
    fn from(method: MethodArg) -> Self {
        match method {
            MethodArg::Get => Method::GET,
            MethodArg::Post => Method::POST,
        }
    }
}
