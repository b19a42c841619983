//! End-to-end provider behavior against mock HTTP servers

use std::collections::HashSet;
use std::io::Write;
use std::time::{Duration, Instant};

use mockito::Server;

use pkg_curations::config::{CacheConfig, ProviderConfig, TimeoutConfig};
use pkg_curations::curation::provider::CurationProvider;
use pkg_curations::curation::providers::{CatalogProvider, ReleaseFeedProvider};
use pkg_curations::curation::types::PackageIdentifier;

fn config(server_url: &str, read_timeout_ms: u64) -> ProviderConfig {
    ProviderConfig {
        timeouts: TimeoutConfig {
            read_timeout: read_timeout_ms,
            ..TimeoutConfig::default()
        },
        cache: CacheConfig::default(),
        ..ProviderConfig::for_server(server_url)
    }
}

#[tokio::test]
async fn endpoint_slower_than_read_timeout_degrades_to_empty_within_bounded_time() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/curations/npm/-/lodash/4.17.21")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_chunked_body(|writer| {
            std::thread::sleep(Duration::from_secs(5));
            writer.write_all(br#"{"declaredLicense": "MIT"}"#)
        })
        .create_async()
        .await;

    let provider = CatalogProvider::new(&config(&server.url(), 200));
    let package = PackageIdentifier::new("npm", "", "lodash", "4.17.21");

    let started = Instant::now();
    let records = provider.curations_for(&[package], None).await;
    let elapsed = started.elapsed();

    // Not an error, just no data, and it returns close to the read timeout
    // rather than waiting for the delayed body.
    assert!(records.is_empty());
    assert!(elapsed >= Duration::from_millis(200));
    assert!(elapsed < Duration::from_secs(3));
}

#[tokio::test]
async fn unreachable_endpoint_degrades_to_empty() {
    // Nothing listens on this port.
    let provider = CatalogProvider::new(&config("http://127.0.0.1:1", 500));
    let package = PackageIdentifier::new("npm", "", "lodash", "4.17.21");

    let records = provider.curations_for(&[package], None).await;

    assert!(records.is_empty());
}

#[tokio::test]
async fn batch_deadline_returns_partial_results() {
    let mut server = Server::new_async().await;
    let _fast = server
        .mock("GET", "/curations/npm/-/fast/1.0.0")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"declaredLicense": "MIT"}"#)
        .create_async()
        .await;
    let _slow = server
        .mock("GET", "/curations/npm/-/slow/1.0.0")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_chunked_body(|writer| {
            std::thread::sleep(Duration::from_secs(5));
            writer.write_all(r#"{"declaredLicense": "MIT"}"#.as_bytes())
        })
        .create_async()
        .await;

    let provider = CatalogProvider::new(&config(&server.url(), 30_000));
    let packages = vec![
        PackageIdentifier::new("npm", "", "fast", "1.0.0"),
        PackageIdentifier::new("npm", "", "slow", "1.0.0"),
    ];

    let started = Instant::now();
    let records = provider
        .curations_for(&packages, Some(Duration::from_millis(500)))
        .await;

    // The in-flight slow lookup is abandoned at the deadline; the completed
    // fast one is still returned.
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].package.name, "fast");
    assert!(started.elapsed() < Duration::from_secs(3));
}

#[tokio::test]
async fn returned_identifiers_are_a_subset_of_the_requested_batch() {
    let mut server = Server::new_async().await;
    let _project = server
        .mock("GET", "/projects/pypi/-/docutils")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"sourceRepository": "https://github.com/docutils/docutils.git"}"#)
        .create_async()
        .await;
    // The feed names plenty of releases the batch never asked about.
    let _feed = server
        .mock("GET", "/releases")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[
                {"name": "docutils-0.9"},
                {"name": "docutils-0.10", "declaredLicense": "BSD-2-Clause"},
                {"name": "docutils-0.11"},
                {"name": "docutils-1.0.10"}
            ]"#,
        )
        .create_async()
        .await;

    let provider = ReleaseFeedProvider::new(&config(&server.url(), 30_000));
    let requested = vec![PackageIdentifier::new("pypi", "", "docutils", "0.10")];

    let records = provider.curations_for(&requested, None).await;

    let requested_set: HashSet<_> = requested.iter().collect();
    assert!(!records.is_empty());
    assert!(
        records
            .iter()
            .all(|record| requested_set.contains(&record.package))
    );
}

#[tokio::test]
async fn providers_are_interchangeable_behind_the_trait() {
    let mut server = Server::new_async().await;
    let _catalog = server
        .mock("GET", "/curations/npm/-/lodash/4.17.21")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"declaredLicense": "MIT"}"#)
        .create_async()
        .await;
    let _project = server
        .mock("GET", "/projects/npm/-/lodash")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"sourceRepository": "https://github.com/lodash/lodash.git"}"#)
        .create_async()
        .await;
    let _feed = server
        .mock("GET", "/releases")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"name": "v4.17.21", "declaredLicense": "MIT"}]"#)
        .create_async()
        .await;

    let providers: Vec<Box<dyn CurationProvider>> = vec![
        Box::new(CatalogProvider::new(&config(&server.url(), 30_000))),
        Box::new(ReleaseFeedProvider::new(&config(&server.url(), 30_000))),
    ];
    let package = PackageIdentifier::new("npm", "", "lodash", "4.17.21");

    for provider in providers {
        let records = provider.curations_for(&[package.clone()], None).await;

        assert_eq!(records.len(), 1, "provider {}", provider.name());
        assert_eq!(records[0].package, package);
        assert_eq!(records[0].declared_license, Some("MIT".to_string()));
    }
}
