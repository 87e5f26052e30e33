//! GitHub client tests against a mock HTTP server.

use dora_metrics::config::AppConfig;
use dora_metrics::error::DoraError;
use dora_metrics::fetch::{EventFetcher, FetchOptions};
use dora_metrics::github::{EventSource, GitHubClient};
use dora_metrics::period::DateRange;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config(server: &MockServer) -> AppConfig {
    AppConfig {
        github_token: Some("ghp_test_token".to_string()),
        github_api_url: server.uri(),
        ..AppConfig::default()
    }
}

fn not_found() -> ResponseTemplate {
    ResponseTemplate::new(404).set_body_json(json!({
        "message": "Not Found",
        "documentation_url": "https://docs.github.com/rest"
    }))
}

#[test]
fn test_client_requires_token() {
    let result = GitHubClient::new(&AppConfig::default());
    assert!(matches!(result, Err(DoraError::ConfigError(_))));
}

#[tokio::test]
async fn test_not_found_maps_to_not_found_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/test-org/missing/deployments"))
        .respond_with(not_found())
        .mount(&mock_server)
        .await;

    let client = GitHubClient::new(&test_config(&mock_server)).unwrap();
    let result = client.list_deployments("test-org", "missing", 1).await;
    assert!(matches!(result, Err(DoraError::NotFound(_))));
}

#[tokio::test]
async fn test_list_deployments_sends_paging_params() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/test-org/api/deployments"))
        .and(query_param("per_page", "100"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": 42,
                "environment": "staging",
                "created_at": "2024-01-05T10:00:00Z",
                "ref": "main",
                "description": null,
                "sha": "abc123"
            }
        ])))
        .mount(&mock_server)
        .await;

    let client = GitHubClient::new(&test_config(&mock_server)).unwrap();
    let deployments = client.list_deployments("test-org", "api", 2).await.unwrap();
    assert_eq!(deployments.len(), 1);
    assert_eq!(deployments[0].id, 42);
    assert_eq!(deployments[0].git_ref, "main");
}

#[tokio::test]
async fn test_org_listing_falls_back_to_user() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/orgs/octocat/repos"))
        .respond_with(not_found())
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/octocat/repos"))
        .and(query_param("sort", "updated"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "name": "hello-world",
                "full_name": "octocat/hello-world",
                "description": "My first repository",
                "private": false,
                "default_branch": "main",
                "updated_at": "2024-01-05T10:00:00Z"
            }
        ])))
        .mount(&mock_server)
        .await;

    let client = GitHubClient::new(&test_config(&mock_server)).unwrap();
    let fetcher = EventFetcher::new(Arc::new(client), FetchOptions::default());

    let repos = fetcher.list_repositories("octocat").await.unwrap();
    assert_eq!(repos.len(), 1);
    assert_eq!(repos[0].full_name, "octocat/hello-world");
    assert_eq!(repos[0].description.as_deref(), Some("My first repository"));
}

#[tokio::test]
async fn test_merged_prs_with_commits_over_http() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/test-org/api/pulls"))
        .and(query_param("state", "closed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "number": 12,
                "title": "Add rate limiter",
                "body": "Limits outbound calls",
                "user": { "login": "alice" },
                "created_at": "2024-01-09T08:00:00Z",
                "merged_at": "2024-01-10T12:00:00Z",
                "html_url": "https://github.com/test-org/api/pull/12"
            },
            {
                "number": 11,
                "title": "Abandoned",
                "body": null,
                "user": { "login": "bob" },
                "created_at": "2024-01-08T08:00:00Z",
                "merged_at": null,
                "html_url": "https://github.com/test-org/api/pull/11"
            }
        ])))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/test-org/api/pulls/12/commits"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "sha": "f00dcafe",
                "commit": {
                    "message": "Add token bucket\n\nDetails",
                    "author": { "name": "Alice", "date": "2024-01-10T11:30:00Z" }
                },
                "author": null
            }
        ])))
        .mount(&mock_server)
        .await;

    let client = GitHubClient::new(&test_config(&mock_server)).unwrap();
    let fetcher = EventFetcher::new(Arc::new(client), FetchOptions::default());
    let range = DateRange::parse("2024-01-01", "2024-01-31").unwrap();

    let prs = fetcher
        .fetch_merged_prs("test-org", &["api".to_string()], &range)
        .await;
    assert_eq!(prs.len(), 1);
    assert_eq!(prs[0].number, 12);
    assert_eq!(prs[0].commits.len(), 1);
    assert_eq!(prs[0].commits[0].author, "Alice");
    assert_eq!(prs[0].commits[0].message, "Add token bucket");
}
