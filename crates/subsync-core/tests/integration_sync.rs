//! Integration test: local HTTP server, real curl fetches, artifacts in a temp dir.

mod common;

use common::text_server::{self, Route};
use std::sync::Arc;
use std::time::Duration;
use subsync_core::artifact::{self, ArtifactStore};
use subsync_core::fetch::{self, CurlFetcher, FetchError, Fetcher};
use subsync_core::{FilterOptions, Orchestrator, OutcomeStatus, PipelineContext, Source, SuccessPolicy};
use tempfile::tempdir;

fn source(key: &str, label: &str, url: String) -> Source {
    Source::new(key, label, &url).with_timeout(Duration::from_secs(5))
}

fn orchestrator(store: ArtifactStore, timeout: Duration) -> Orchestrator {
    let ctx = PipelineContext::new(
        Arc::new(CurlFetcher),
        store,
        FilterOptions::new(&["trojan://", "vless://"]),
    );
    Orchestrator::new(ctx, 3, timeout, SuccessPolicy::new(0.5))
}

#[test]
fn curl_fetch_trims_body() {
    let base = text_server::start(vec![("/sub", Route::ok("\n  trojan://A\ntrojan://B  \n\n"))]);
    let r = CurlFetcher.fetch(&source("a", "A", format!("{}/sub", base)));
    assert!(r.succeeded, "{:?}", r.error);
    assert_eq!(r.raw_body.as_deref(), Some("trojan://A\ntrojan://B"));
}

#[test]
fn curl_fetch_non_2xx_fails() {
    let base = text_server::start(vec![("/down", Route::status(503))]);
    let r = CurlFetcher.fetch(&source("a", "A", format!("{}/down", base)));
    assert!(!r.succeeded);
    assert_eq!(r.error.as_deref(), Some("HTTP 503"));

    let r = CurlFetcher.fetch(&source("a", "A", format!("{}/missing", base)));
    assert_eq!(r.error.as_deref(), Some("HTTP 404"));
}

#[test]
fn curl_fetch_blank_body_fails() {
    let base = text_server::start(vec![("/blank", Route::ok("  \n\n "))]);
    let r = CurlFetcher.fetch(&source("a", "A", format!("{}/blank", base)));
    assert!(!r.succeeded);
    assert_eq!(r.error.as_deref(), Some("empty response body"));
}

#[test]
fn curl_fetch_times_out() {
    let base = text_server::start(vec![(
        "/slow",
        Route::ok("trojan://late").delayed(Duration::from_secs(3)),
    )]);
    let src = Source::new("de", "Germany", &format!("{}/slow", base))
        .with_timeout(Duration::from_secs(1));
    let r = CurlFetcher.fetch(&src);
    assert!(!r.succeeded);
    assert_eq!(r.error.as_deref(), Some("timed out"));
}

#[test]
fn oversized_body_is_rejected() {
    let big = "trojan://x\n".repeat(400);
    let base = text_server::start(vec![("/big", Route::ok(&big))]);
    let url = format!("{}/big", base);

    match fetch::get_text_limited(&url, Duration::from_secs(5), 1024) {
        Err(FetchError::TooLarge(limit)) => assert_eq!(limit, 1024),
        other => panic!("expected TooLarge, got {:?}", other),
    }
    let body = fetch::get_text_limited(&url, Duration::from_secs(5), 64 * 1024).unwrap();
    assert_eq!(body.lines().count(), 400);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn mixed_sources_are_isolated() {
    let base = text_server::start(vec![
        ("/de", Route::ok("vless://DE1\njunk\nvless://DE2")),
        ("/fr", Route::status(500)),
        ("/es", Route::ok("ss://only-shadowsocks")),
        (
            "/it",
            Route::ok("trojan://late").delayed(Duration::from_secs(2)),
        ),
    ]);
    let dir = tempdir().unwrap();
    let store = ArtifactStore::Directory(dir.path().join("subscriptions"));
    let orch = orchestrator(store.clone(), Duration::from_millis(800));
    let sources = vec![
        source("de", "Germany", format!("{}/de", base)),
        source("fr", "France", format!("{}/fr", base)),
        source("es", "Spain", format!("{}/es", base)),
        Source::new("it", "Italy", &format!("{}/it", base)).with_timeout(Duration::from_secs(1)),
    ];

    let report = orch.run(&sources).await;

    let statuses: Vec<_> = report.outcomes.iter().map(|o| o.status.clone()).collect();
    assert_eq!(statuses[0], OutcomeStatus::Updated { lines: 2 });
    assert_eq!(statuses[1], OutcomeStatus::FetchFailed("HTTP 500".to_string()));
    assert_eq!(statuses[2], OutcomeStatus::NoContent);
    assert!(matches!(
        statuses[3],
        OutcomeStatus::TimedOut | OutcomeStatus::FetchFailed(_)
    ));
    assert_eq!(report.succeeded, 1);
    assert!(!report.overall_success);

    assert!(store.path_for(&sources[0]).exists());
    assert!(!store.path_for(&sources[1]).exists());
    assert!(!store.path_for(&sources[2]).exists());
    assert!(!store.path_for(&sources[3]).exists());
}

#[tokio::test]
async fn repeated_runs_only_rewrite_on_change() {
    let base = text_server::start(vec![
        ("/v1", Route::ok("vless://X")),
        ("/v2", Route::ok("vless://Y")),
    ]);
    let dir = tempdir().unwrap();
    let store = ArtifactStore::Directory(dir.path().to_path_buf());
    let orch = orchestrator(store.clone(), Duration::from_secs(10));

    let first = vec![source("nl", "Netherlands", format!("{}/v1", base))];
    let report = orch.run(&first).await;
    assert_eq!(report.outcomes[0].status, OutcomeStatus::Updated { lines: 1 });
    let path = store.path_for(&first[0]);
    let written = std::fs::read_to_string(&path).unwrap();

    let report = orch.run(&first).await;
    assert_eq!(report.outcomes[0].status, OutcomeStatus::Unchanged);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), written);

    // Same label, new upstream content: same file, new body.
    let second = vec![source("nl", "Netherlands", format!("{}/v2", base))];
    assert!(store.has_changed(&second[0], "vless://Y"));
    let report = orch.run(&second).await;
    assert_eq!(report.outcomes[0].status, OutcomeStatus::Updated { lines: 1 });
    let info = artifact::inspect(&path).unwrap().unwrap();
    assert_eq!(info.lines, 1);
    assert_eq!(info.header.url, format!("{}/v2", base));
    assert!(!store.has_changed(&second[0], "vless://Y"));
}

#[tokio::test]
async fn single_file_mode_writes_fixed_path() {
    let base = text_server::start(vec![("/trojan", Route::ok("trojan://A\nfoo\ntrojan://B"))]);
    let dir = tempdir().unwrap();
    let fixed = dir.path().join("out").join("trojan_subscriptions.txt");
    let orch = orchestrator(ArtifactStore::SingleFile(fixed.clone()), Duration::from_secs(10));

    let report = orch
        .run(&[source("trojan", "Trojan", format!("{}/trojan", base))])
        .await;
    assert!(report.overall_success);
    assert_eq!(report.outcomes[0].preview, vec!["trojan://A", "trojan://B"]);

    let text = std::fs::read_to_string(&fixed).unwrap();
    assert!(text.ends_with("\n\ntrojan://A\ntrojan://B"));
    assert!(!artifact::temp_path(&fixed).exists());
}
