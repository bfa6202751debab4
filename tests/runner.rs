use std::time::{Duration, Instant};

use github_auto_star::error::AutoStarError;
use github_auto_star::github::GitHubClient;
use github_auto_star::runner;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server: &MockServer) -> GitHubClient {
    GitHubClient::with_base_url("test_token".to_string(), &server.uri())
        .expect("Failed to create client")
}

fn two_repo_search_body() -> serde_json::Value {
    json!({
        "items": [
            {
                "id": 1,
                "name": "repo1",
                "full_name": "A/repo1",
                "description": "first result",
                "html_url": "https://github.com/A/repo1",
                "owner": { "login": "A" }
            },
            {
                "id": 2,
                "name": "repo2",
                "full_name": "B/repo2",
                "description": null,
                "html_url": "https://github.com/B/repo2",
                "owner": { "login": "B" }
            }
        ]
    })
}

#[tokio::test]
async fn test_run_stars_every_result_in_search_order() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/repositories"))
        .and(query_param("q", "stars:>100 language:python"))
        .and(query_param("per_page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(two_repo_search_body()))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/user/starred/A/repo1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/user/starred/B/repo2"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let started = Instant::now();
    let stats = runner::run(&client, "stars:>100", "python", 2)
        .await
        .expect("Run failed");

    assert_eq!(stats.starred, vec!["A/repo1", "B/repo2"]);
    assert!(stats.is_clean());

    // No rate limit responses, so the run never sleeps.
    assert!(started.elapsed() < Duration::from_secs(1));

    server.verify().await;
}

#[tokio::test]
async fn test_run_continues_past_a_star_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/repositories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(two_repo_search_body()))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/user/starred/A/repo1"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/user/starred/B/repo2"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let stats = runner::run(&client, "stars:>100", "python", 2)
        .await
        .expect("Run failed");

    assert_eq!(stats.starred, vec!["B/repo2"]);
    assert_eq!(stats.failed.len(), 1);
    assert_eq!(stats.failed[0].0, "A/repo1");
    assert!(stats.failed[0].1.contains("403"));

    server.verify().await;
}

#[tokio::test]
async fn test_run_aborts_when_search_fails() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/repositories"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    // No star mocks mounted: a failed search must not star anything.
    let client = test_client(&server);
    let result = runner::run(&client, "stars:>100", "python", 2).await;

    match result.unwrap_err() {
        AutoStarError::UnexpectedStatus(status) => assert_eq!(status.as_u16(), 500),
        other => panic!("Expected UnexpectedStatus error, got: {:?}", other),
    }

    server.verify().await;
}

#[tokio::test]
async fn test_run_with_empty_search_results() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/repositories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let stats = runner::run(&client, "stars:>100", "python", 2)
        .await
        .expect("Run failed");

    assert!(stats.starred.is_empty());
    assert!(stats.is_clean());
}
