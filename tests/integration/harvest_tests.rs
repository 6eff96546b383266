//! Integration tests for the scrape pipeline
//!
//! These use wiremock to stand in for the target site and exercise the
//! full fetch, extract, persist, export cycle end-to-end.

use siteglean::config::{Config, FetcherConfig, OutputConfig, SiteConfig};
use siteglean::scrape::{build_http_client, FetchResult, Fetcher};
use siteglean::{harvest, GleanError, Harvester, RobotsPolicy, ScrapedItem, SqliteStore};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Builds a config pointed at the mock server with outputs in a temp dir
fn test_config(base_url: &str, dir: &TempDir, page_count: u32) -> Config {
    Config {
        site: SiteConfig {
            base_url: base_url.to_string(),
            page_count,
        },
        fetcher: FetcherConfig {
            max_concurrent_requests: 5,
            request_timeout_secs: 10,
            user_agent: "TestBot/1.0".to_string(),
        },
        output: OutputConfig {
            database_path: dir.path().join("items.db").display().to_string(),
            csv_path: dir.path().join("items.csv").display().to_string(),
            json_path: dir.path().join("items.json").display().to_string(),
        },
    }
}

fn page_html(n: u32) -> String {
    format!(
        r#"<html><head>
        <meta name="description" content="Description {n}">
        </head><body><h1>Title {n}</h1></body></html>"#
    )
}

async fn mount_robots(server: &MockServer, content: &str) {
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string(content.to_string()))
        .mount(server)
        .await;
}

async fn mount_page(server: &MockServer, n: u32) {
    Mock::given(method("GET"))
        .and(path(format!("/page/{}", n)))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(page_html(n))
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_disallowed_page_is_skipped_and_never_requested() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_robots(&server, "User-agent: *\nDisallow: /page/3").await;
    for n in [1, 2, 4, 5] {
        mount_page(&server, n).await;
    }

    // The denied page must see zero requests
    Mock::given(method("GET"))
        .and(path("/page/3"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page_html(3)))
        .expect(0)
        .mount(&server)
        .await;

    let config = test_config(&server.uri(), &dir, 5);
    let items = harvest(config.clone()).await.expect("run failed");

    assert_eq!(items.len(), 4);
    let urls: Vec<&str> = items.iter().map(|i| i.url.as_str()).collect();
    for n in [1, 2, 4, 5] {
        assert!(urls.contains(&format!("{}/page/{}", server.uri(), n).as_str()));
    }
    assert!(!urls.iter().any(|u| u.ends_with("/page/3")));

    assert_eq!(items[0].title, "Title 1");
    assert_eq!(items[0].description, "Description 1");

    // Persisted set matches the returned list
    let store = SqliteStore::new(Path::new(&config.output.database_path)).unwrap();
    assert_eq!(store.count().unwrap(), 4);
    assert!(store
        .get_by_url(&format!("{}/page/3", server.uri()))
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_http_error_page_absent_from_results() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_robots(&server, "User-agent: *\nAllow: /").await;
    for n in [1, 3, 4, 5] {
        mount_page(&server, n).await;
    }
    Mock::given(method("GET"))
        .and(path("/page/2"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let config = test_config(&server.uri(), &dir, 5);
    let items = harvest(config).await.expect("run should tolerate a 500");

    assert_eq!(items.len(), 4);
    assert!(!items.iter().any(|i| i.url.ends_with("/page/2")));
}

#[tokio::test]
async fn test_missing_robots_is_fatal() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    // No robots.txt mock: wiremock answers 404. The safety default is to
    // fetch nothing, so the run aborts before any page request.
    Mock::given(method("GET"))
        .and(path("/page/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page_html(1)))
        .expect(0)
        .mount(&server)
        .await;

    let config = test_config(&server.uri(), &dir, 1);
    let result = harvest(config).await;

    assert!(matches!(result, Err(GleanError::PolicyUnavailable { .. })));
}

#[tokio::test]
async fn test_fetch_all_preserves_input_order() {
    let server = MockServer::start().await;

    for n in 1..=5 {
        Mock::given(method("GET"))
            .and(path(format!("/page/{}", n)))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(format!("body {}", n))
                    // Stagger delays so completion order differs from
                    // dispatch order
                    .set_delay(std::time::Duration::from_millis(
                        (6 - n as u64) * 30,
                    )),
            )
            .mount(&server)
            .await;
    }

    let fetcher_config = FetcherConfig {
        max_concurrent_requests: 5,
        request_timeout_secs: 10,
        user_agent: "TestBot/1.0".to_string(),
    };
    let client = build_http_client(&fetcher_config).unwrap();
    let policy = Arc::new(RobotsPolicy::from_content("User-agent: *\nAllow: /"));
    let fetcher = Fetcher::new(client, policy, &fetcher_config);

    let urls: Vec<Url> = (1..=5)
        .map(|n| Url::parse(&format!("{}/page/{}", server.uri(), n)).unwrap())
        .collect();
    let results = fetcher.fetch_all(&urls).await;

    assert_eq!(results.len(), urls.len());
    for (n, result) in (1..=5).zip(&results) {
        assert_eq!(result.success(), Some(format!("body {}", n).as_str()));
    }
}

#[tokio::test]
async fn test_mixed_results_keep_positions() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/page/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/page/2"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/page/3"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&server)
        .await;

    let fetcher_config = FetcherConfig {
        max_concurrent_requests: 2,
        request_timeout_secs: 10,
        user_agent: "TestBot/1.0".to_string(),
    };
    let client = build_http_client(&fetcher_config).unwrap();
    let policy = Arc::new(RobotsPolicy::from_content(
        "User-agent: *\nDisallow: /page/3",
    ));
    let fetcher = Fetcher::new(client, policy, &fetcher_config);

    let urls: Vec<Url> = (1..=3)
        .map(|n| Url::parse(&format!("{}/page/{}", server.uri(), n)).unwrap())
        .collect();
    let results = fetcher.fetch_all(&urls).await;

    use siteglean::FetchFailure;
    assert_eq!(results[0], FetchResult::Success("ok".to_string()));
    assert_eq!(
        results[1],
        FetchResult::Failure(FetchFailure::HttpStatus(503))
    );
    assert_eq!(
        results[2],
        FetchResult::Failure(FetchFailure::PolicyDenied)
    );
}

#[tokio::test]
async fn test_rerun_upserts_latest_values() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_robots(&server, "User-agent: *\nAllow: /").await;

    // First run serves one body for /page/1
    let first = Mock::given(method("GET"))
        .and(path("/page/1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html><body><h1>Old Title</h1></body></html>"),
        )
        .expect(1)
        .mount_as_scoped(&server)
        .await;

    let config = test_config(&server.uri(), &dir, 1);
    let items = harvest(config.clone()).await.unwrap();
    assert_eq!(items[0].title, "Old Title");
    drop(first);

    // Second run serves updated content for the same URL
    Mock::given(method("GET"))
        .and(path("/page/1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html><body><h1>New Title</h1></body></html>"),
        )
        .mount(&server)
        .await;

    let items = harvest(config.clone()).await.unwrap();
    assert_eq!(items[0].title, "New Title");

    // Still exactly one row for the URL, holding the latest values
    let store = SqliteStore::new(Path::new(&config.output.database_path)).unwrap();
    assert_eq!(store.count().unwrap(), 1);
    let stored = store
        .get_by_url(&format!("{}/page/1", server.uri()))
        .unwrap()
        .unwrap();
    assert_eq!(stored.title, "New Title");
}

#[tokio::test]
async fn test_exports_match_scraped_items() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_robots(&server, "User-agent: *\nAllow: /").await;
    for n in 1..=3 {
        mount_page(&server, n).await;
    }

    let config = test_config(&server.uri(), &dir, 3);
    let items = harvest(config.clone()).await.unwrap();
    assert_eq!(items.len(), 3);

    // CSV round-trips to the same tuples
    let mut reader = csv::Reader::from_path(&config.output.csv_path).unwrap();
    let from_csv: Vec<ScrapedItem> = reader
        .deserialize()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    assert_eq!(from_csv, items);

    // JSON parses back to the same list
    let json = std::fs::read_to_string(&config.output.json_path).unwrap();
    let from_json: Vec<ScrapedItem> = serde_json::from_str(&json).unwrap();
    assert_eq!(from_json, items);
}

#[tokio::test]
async fn test_run_without_export_leaves_no_files() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_robots(&server, "User-agent: *\nAllow: /").await;
    mount_page(&server, 1).await;

    let config = test_config(&server.uri(), &dir, 1);
    let mut harvester = Harvester::new(config.clone()).unwrap();
    let items = harvester.run().await.unwrap();

    assert_eq!(items.len(), 1);
    assert!(Path::new(&config.output.database_path).exists());
    assert!(!Path::new(&config.output.csv_path).exists());
    assert!(!Path::new(&config.output.json_path).exists());
}

#[tokio::test]
async fn test_page_without_expected_markup_yields_empty_fields() {
    // html5ever recovers a document tree from arbitrary text, so a body
    // with none of the expected markup still produces an item, with both
    // fields degraded to empty strings
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_robots(&server, "User-agent: *\nAllow: /").await;
    Mock::given(method("GET"))
        .and(path("/page/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not html at all"))
        .mount(&server)
        .await;

    let config = test_config(&server.uri(), &dir, 1);
    let items = harvest(config).await.unwrap();

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].title, "");
    assert_eq!(items[0].description, "");
}
