//! CLI runner - executes commands

use crate::aws::{
    default_endpoint, dlm, transcribe, DlmClient, GetLifecyclePoliciesRequest,
    ListLanguageModelsRequest, ListMedicalTranscriptionJobsRequest, ListTranscriptionJobsRequest,
    ListVocabulariesRequest, TranscribeClient,
};
use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::{Config, PagingSettings};
use crate::error::{Error, Result};
use crate::http::HttpClient;
use crate::pagination::{CancellationFlag, FetchOptions, ListResponse, PaginatedFetcher};
use crate::remote::{JsonListOperation, JsonListRequest, ListOperation};
use crate::types::{ContinuationToken, JsonObject, JsonValue};
use futures::TryStreamExt;
use serde::Serialize;
use std::io::Write;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Outcome of one listing run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Pages fetched
    pub pages: u32,
    /// Documents written
    pub documents: usize,
    /// Token to pass as `--starting-token` to continue, if results remain
    pub resume_token: Option<ContinuationToken>,
    /// Whether the run stopped on Ctrl-C
    pub cancelled: bool,
}

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command, writing documents to stdout
    pub async fn run(&self) -> Result<()> {
        let mut stdout = std::io::stdout();
        let summary = self.execute(&mut stdout).await?;
        stdout.flush()?;

        if let Some(token) = &summary.resume_token {
            eprintln!("More results available. Resume with: --starting-token {token}");
        }
        Ok(())
    }

    /// Run the CLI command, writing documents to `out`
    pub async fn execute<W: Write>(&self, out: &mut W) -> Result<RunSummary> {
        let config = self.load_config()?;
        let http = HttpClient::with_config(config.http.client_config())?;
        let paging = self.cli.command.paging();

        match &self.cli.command {
            Commands::TranscriptionJobs {
                status,
                job_name_contains,
                ..
            } => {
                let client = self.transcribe_client(&config, http);
                let request = ListTranscriptionJobsRequest {
                    status: status.clone(),
                    job_name_contains: job_name_contains.clone(),
                    next_token: None,
                    max_results: paging.max_results,
                };
                self.run_listing(client.list_transcription_jobs(), request, &config.paging, out)
                    .await
            }
            Commands::MedicalTranscriptionJobs {
                status,
                job_name_contains,
                ..
            } => {
                let client = self.transcribe_client(&config, http);
                let request = ListMedicalTranscriptionJobsRequest {
                    status: status.clone(),
                    job_name_contains: job_name_contains.clone(),
                    next_token: None,
                    max_results: paging.max_results,
                };
                self.run_listing(
                    client.list_medical_transcription_jobs(),
                    request,
                    &config.paging,
                    out,
                )
                .await
            }
            Commands::Vocabularies {
                state_equals,
                name_contains,
                ..
            } => {
                let client = self.transcribe_client(&config, http);
                let request = ListVocabulariesRequest {
                    state_equals: state_equals.clone(),
                    name_contains: name_contains.clone(),
                    next_token: None,
                    max_results: paging.max_results,
                };
                self.run_listing(client.list_vocabularies(), request, &config.paging, out)
                    .await
            }
            Commands::LanguageModels {
                status_equals,
                name_contains,
                ..
            } => {
                let client = self.transcribe_client(&config, http);
                let request = ListLanguageModelsRequest {
                    status_equals: status_equals.clone(),
                    name_contains: name_contains.clone(),
                    next_token: None,
                    max_results: paging.max_results,
                };
                self.run_listing(client.list_language_models(), request, &config.paging, out)
                    .await
            }
            Commands::LifecyclePolicies {
                policy_ids,
                state,
                resource_types,
                target_tags,
                tags_to_add,
                ..
            } => {
                let endpoint = self.endpoint(&config, dlm::SERVICE);
                let client = DlmClient::new(http, endpoint);
                let request = GetLifecyclePoliciesRequest {
                    policy_ids: policy_ids.clone(),
                    state: state.clone(),
                    resource_types: resource_types.clone(),
                    target_tags: target_tags.clone(),
                    tags_to_add: tags_to_add.clone(),
                };
                self.run_listing(client.get_lifecycle_policies(), request, &config.paging, out)
                    .await
            }
            Commands::List {
                url,
                body,
                items_path,
                token_path,
                token_key,
                page_size_key,
                method,
                headers,
                ..
            } => {
                let mut request = JsonListRequest::new(parse_body(body.as_deref())?, token_key);
                if let Some(key) = page_size_key {
                    request = request.with_page_size_key(key);
                }

                let mut operation =
                    JsonListOperation::new(Arc::new(http), url, items_path, token_path)
                        .with_method((*method).into());
                for header in headers {
                    let (name, value) = header.split_once(':').ok_or_else(|| {
                        Error::invalid_parameter("header", format!("'{header}' is not name:value"))
                    })?;
                    operation = operation.with_header(name.trim(), value.trim());
                }

                self.run_listing(operation, request, &config.paging, out).await
            }
        }
    }

    /// Load the config file, or defaults when none was given
    fn load_config(&self) -> Result<Config> {
        match &self.cli.config {
            Some(path) => Config::from_file(path),
            None => Ok(Config::default()),
        }
    }

    /// Endpoint for `service`: flag, then config file, then region default
    fn endpoint(&self, config: &Config, service: &str) -> String {
        if let Some(endpoint) = &self.cli.endpoint {
            return endpoint.clone();
        }
        if let Some(endpoint) = config.endpoint_for(service) {
            return endpoint.to_string();
        }
        default_endpoint(service, &config.resolve_region(self.cli.region.as_deref()))
    }

    fn transcribe_client(&self, config: &Config, http: HttpClient) -> TranscribeClient {
        TranscribeClient::new(http, self.endpoint(config, transcribe::SERVICE))
    }

    /// Fetch options from the paging flags, falling back to config defaults
    fn fetch_options(&self, defaults: &PagingSettings) -> FetchOptions {
        let paging = self.cli.command.paging();
        let mut options = FetchOptions::new().manual_control(paging.no_auto_iteration);

        if let Some(token) = &paging.starting_token {
            options = options.starting_token(token.clone());
        }
        if let Some(size) = paging.max_results.or(defaults.page_size) {
            options = options.page_size(size);
        }
        if let Some(max) = paging.max_items.or(defaults.max_items) {
            options = options.max_items(max);
        }
        options
    }

    /// Drive one listing to completion, writing the selected documents
    async fn run_listing<O, W>(
        &self,
        operation: O,
        request: O::Request,
        defaults: &PagingSettings,
        out: &mut W,
    ) -> Result<RunSummary>
    where
        O: ListOperation,
        O::Response: Serialize,
        <O::Response as ListResponse>::Item: Serialize,
        W: Write,
    {
        let paging = self.cli.command.paging();
        let options = self.fetch_options(defaults);
        debug!(operation = operation.name(), ?options, select = %paging.select, "Starting listing");

        let cancellation = CancellationFlag::new();
        let watcher = spawn_interrupt_watcher(cancellation.clone());

        let mut summary = RunSummary {
            resume_token: options.starting_token.clone(),
            ..RunSummary::default()
        };
        let pages = PaginatedFetcher::new(operation, request, options)
            .with_cancellation(cancellation.clone())
            .pages();

        let result = async {
            futures::pin_mut!(pages);
            while let Some(page) = pages.try_next().await? {
                summary.pages += 1;
                let resume_token = page.resume_token.clone();
                for document in paging.select.apply(page)? {
                    self.write_document(out, &document)?;
                    summary.documents += 1;
                }
                summary.resume_token = resume_token;
            }
            Ok::<_, Error>(())
        }
        .await;

        watcher.abort();
        if let Err(e) = result {
            return Err(match &summary.resume_token {
                Some(token) => {
                    warn!(
                        pages = summary.pages,
                        documents = summary.documents,
                        resume_token = %token,
                        "Listing failed part way through"
                    );
                    Error::interrupted(token.as_str(), e)
                }
                None => e,
            });
        }

        summary.cancelled = cancellation.is_cancelled();
        info!(
            pages = summary.pages,
            documents = summary.documents,
            resumable = summary.resume_token.is_some(),
            cancelled = summary.cancelled,
            "Listing complete"
        );
        Ok(summary)
    }

    fn write_document<W: Write>(&self, out: &mut W, document: &JsonValue) -> Result<()> {
        let rendered = match self.cli.format {
            OutputFormat::Json => serde_json::to_string(document)?,
            OutputFormat::Pretty => serde_json::to_string_pretty(document)?,
        };
        writeln!(out, "{rendered}")?;
        Ok(())
    }
}

/// Cancel `flag` on Ctrl-C; the current call finishes first
fn spawn_interrupt_watcher(flag: CancellationFlag) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, stopping after the current page");
            flag.cancel();
        }
    })
}

/// Parse the `--body` flag of the generic `list` command
fn parse_body(body: Option<&str>) -> Result<JsonObject> {
    let Some(body) = body else {
        return Ok(JsonObject::new());
    };

    match serde_json::from_str::<JsonValue>(body)? {
        JsonValue::Object(map) => Ok(map),
        _ => Err(Error::invalid_parameter("body", "must be a JSON object")),
    }
}
