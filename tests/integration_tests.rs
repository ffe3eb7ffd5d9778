//! Integration tests using mock HTTP server
//!
//! Tests the full flow: typed or generic listing operation → HTTP requests
//! → paginated item stream

use futures::{StreamExt, TryStreamExt};
use listpager::aws::transcribe::{ListTranscriptionJobsResponse, TranscriptionJobStatus};
use listpager::aws::{ListTranscriptionJobsRequest, TranscribeClient};
use listpager::http::{HttpClient, HttpClientConfig};
use listpager::remote::{JsonListOperation, JsonListRequest};
use listpager::types::{BackoffType, JsonObject};
use listpager::{CancellationFlag, Error, FetchOptions, PaginatedFetcher};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TARGET: &str = "Transcribe.ListTranscriptionJobs";

fn http_client(retries: u32) -> HttpClient {
    let config = HttpClientConfig::builder()
        .max_retries(retries)
        .backoff(
            BackoffType::Constant,
            Duration::from_millis(10),
            Duration::from_millis(50),
        )
        .no_rate_limit()
        .build();
    HttpClient::with_config(config).unwrap()
}

fn job(name: &str) -> serde_json::Value {
    json!({"TranscriptionJobName": name, "TranscriptionJobStatus": "COMPLETED", "LanguageCode": "en-US"})
}

/// Three pages of two jobs each: tokens `p2`, `p3`, then none
async fn mount_job_pages(server: &MockServer) {
    let pages = [
        (None, Some("p2"), ["job-1", "job-2"]),
        (Some("p2"), Some("p3"), ["job-3", "job-4"]),
        (Some("p3"), None, ["job-5", "job-6"]),
    ];

    for (sent, next, names) in pages {
        let mut expected = json!({"MaxResults": 2});
        if let Some(token) = sent {
            expected["NextToken"] = json!(token);
        }
        let mut body = json!({"TranscriptionJobSummaries": names.iter().map(|n| job(n)).collect::<Vec<_>>()});
        if let Some(token) = next {
            body["NextToken"] = json!(token);
        }

        Mock::given(method("POST"))
            .and(header("x-amz-target", TARGET))
            .and(body_json(expected))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(server)
            .await;
    }
}

fn job_names(jobs: &[listpager::aws::transcribe::TranscriptionJobSummary]) -> Vec<String> {
    jobs.iter()
        .filter_map(|job| job.transcription_job_name.clone())
        .collect()
}

// ============================================================================
// Auto-pagination and manual control
// ============================================================================

#[tokio::test]
async fn test_auto_pagination_reads_every_page() {
    let server = MockServer::start().await;
    mount_job_pages(&server).await;

    let client = TranscribeClient::new(http_client(0), server.uri());
    let jobs = PaginatedFetcher::new(
        client.list_transcription_jobs(),
        ListTranscriptionJobsRequest::default(),
        FetchOptions::new().page_size(2),
    )
    .collect_items()
    .await
    .unwrap();

    assert_eq!(
        job_names(&jobs),
        vec!["job-1", "job-2", "job-3", "job-4", "job-5", "job-6"]
    );
    assert_eq!(server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_manual_control_resume_matches_auto_pagination() {
    let server = MockServer::start().await;
    mount_job_pages(&server).await;

    let client = TranscribeClient::new(http_client(0), server.uri());
    let mut token: Option<String> = None;
    let mut names = Vec::new();
    let mut invocations = 0;

    loop {
        let mut options = FetchOptions::new().manual_control(true).page_size(2);
        if let Some(token) = &token {
            options = options.starting_token(token.clone());
        }

        let pages: Vec<_> = PaginatedFetcher::new(
            client.list_transcription_jobs(),
            ListTranscriptionJobsRequest::default(),
            options,
        )
        .pages()
        .try_collect()
        .await
        .unwrap();
        invocations += 1;

        assert_eq!(pages.len(), 1);
        let page = pages.into_iter().next().unwrap();
        token = page.next_token.clone().map(|t| t.into_inner());
        names.extend(job_names(&page.into_items()));

        if token.is_none() {
            break;
        }
    }

    assert_eq!(invocations, 3);
    assert_eq!(
        names,
        vec!["job-1", "job-2", "job-3", "job-4", "job-5", "job-6"]
    );
}

#[tokio::test]
async fn test_emission_limit_resume_point() {
    let server = MockServer::start().await;
    mount_job_pages(&server).await;

    let client = TranscribeClient::new(http_client(0), server.uri());
    let pages: Vec<_> = PaginatedFetcher::new(
        client.list_transcription_jobs(),
        ListTranscriptionJobsRequest::default(),
        FetchOptions::new().page_size(2).max_items(4),
    )
    .pages()
    .try_collect()
    .await
    .unwrap();

    assert_eq!(pages.len(), 2);
    assert_eq!(
        pages[1].next_token.as_ref().map(|t| t.as_str()),
        Some("p3")
    );

    let resumed = PaginatedFetcher::new(
        client.list_transcription_jobs(),
        ListTranscriptionJobsRequest::default(),
        FetchOptions::new().page_size(2).starting_token("p3"),
    )
    .collect_items()
    .await
    .unwrap();
    assert_eq!(job_names(&resumed), vec!["job-5", "job-6"]);
}

#[tokio::test]
async fn test_project_counts_per_page() {
    let server = MockServer::start().await;
    mount_job_pages(&server).await;

    let client = TranscribeClient::new(http_client(0), server.uri());
    let completed: Vec<usize> = PaginatedFetcher::new(
        client.list_transcription_jobs(),
        ListTranscriptionJobsRequest::default(),
        FetchOptions::new().page_size(2),
    )
    .project(|response: ListTranscriptionJobsResponse| {
        let count = response
            .transcription_job_summaries
            .iter()
            .filter(|job| job.transcription_job_status == Some(TranscriptionJobStatus::Completed))
            .count();
        std::iter::once(count)
    })
    .try_collect()
    .await
    .unwrap();

    assert_eq!(completed, vec![2, 2, 2]);
}

// ============================================================================
// Failures
// ============================================================================

#[tokio::test]
async fn test_error_on_second_page_keeps_first_page_items() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_json(json!({})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "NextToken": "expired",
            "TranscriptionJobSummaries": [job("job-1")]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(body_json(json!({"NextToken": "expired"})))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "__type": "com.amazonaws.transcribe#BadRequestException",
            "Message": "The NextToken has expired."
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = TranscribeClient::new(http_client(2), server.uri());
    let results: Vec<_> = PaginatedFetcher::new(
        client.list_transcription_jobs(),
        ListTranscriptionJobsRequest::default(),
        FetchOptions::new(),
    )
    .items()
    .collect()
    .await;

    assert_eq!(results.len(), 2);
    assert!(results[0].is_ok());
    match &results[1] {
        Err(Error::Service { code, status, .. }) => {
            assert_eq!(code, "BadRequestException");
            assert_eq!(*status, 400);
        }
        other => panic!("expected service error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_transport_retries_are_invisible_to_the_fetcher() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("Retry-After", "0")
                .set_body_json(json!({"__type": "ThrottlingException"})),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "TranscriptionJobSummaries": [job("job-1"), job("job-2")]
        })))
        .mount(&server)
        .await;

    let client = TranscribeClient::new(http_client(3), server.uri());
    let jobs = PaginatedFetcher::new(
        client.list_transcription_jobs(),
        ListTranscriptionJobsRequest::default(),
        FetchOptions::new(),
    )
    .collect_items()
    .await
    .unwrap();

    assert_eq!(job_names(&jobs), vec!["job-1", "job-2"]);
    assert_eq!(server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_cancellation_between_pages() {
    let server = MockServer::start().await;
    mount_job_pages(&server).await;

    let client = TranscribeClient::new(http_client(0), server.uri());
    let flag = CancellationFlag::new();
    let stream = PaginatedFetcher::new(
        client.list_transcription_jobs(),
        ListTranscriptionJobsRequest::default(),
        FetchOptions::new().page_size(2),
    )
    .with_cancellation(flag.clone())
    .items();
    futures::pin_mut!(stream);

    let mut names = Vec::new();
    while let Some(job) = stream.try_next().await.unwrap() {
        names.extend(job.transcription_job_name);
        if names.len() == 2 {
            flag.cancel();
        }
    }

    assert_eq!(names, vec!["job-1", "job-2"]);
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

// ============================================================================
// Generic JSON listing
// ============================================================================

#[tokio::test]
async fn test_generic_json_listing() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/exports"))
        .and(body_json(json!({"owner": "ops"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": {"exports": [{"id": "e1"}, {"id": "e2"}]},
            "paging": {"next": "cursor-2"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/exports"))
        .and(body_json(json!({"owner": "ops", "after": "cursor-2"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": {"exports": [{"id": "e3"}]},
            "paging": {"next": ""}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let operation = JsonListOperation::new(
        Arc::new(http_client(0)),
        format!("{}/v1/exports", server.uri()),
        "$.result.exports",
        "$.paging.next",
    );
    let mut body = JsonObject::new();
    body.insert("owner".to_string(), json!("ops"));

    let ids: Vec<_> = PaginatedFetcher::new(
        operation,
        JsonListRequest::new(body, "after"),
        FetchOptions::new(),
    )
    .items()
    .map_ok(|item| item["id"].clone())
    .try_collect()
    .await
    .unwrap();

    assert_eq!(ids, vec![json!("e1"), json!("e2"), json!("e3")]);
}
