//! Tests against a local warp server standing in for the build hook and
//! for a remotely hosted data document.

use std::net::{SocketAddr, TcpListener};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use index_valuation_board::routes::{routes, AppState};
use index_valuation_board::services::build_hook::BuildHookTrigger;
use index_valuation_board::services::data_source::DataSource;
use index_valuation_board::services::html::PageAssets;
use serde_json::Value;
use warp::http::StatusCode;
use warp::Filter;

/// An address nothing is listening on.
fn closed_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap()
}

// ---------------------------------------------------------------------------
// Build hook
// ---------------------------------------------------------------------------

#[tokio::test]
async fn trigger_posts_and_truncates_body() {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let hook = warp::path!("build_hooks" / "abc")
        .and(warp::post())
        .map(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            warp::reply::with_status("构".repeat(300), StatusCode::ACCEPTED)
        });
    let (addr, server) = warp::serve(hook).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);

    let trigger = BuildHookTrigger::new(Some(format!("http://{}/build_hooks/abc", addr)));
    let outcome = trigger.trigger().await;

    assert_eq!(outcome.http_status, 200);
    assert!(outcome.report.ok);
    assert_eq!(outcome.report.status, Some(202));
    assert_eq!(outcome.report.body.as_ref().unwrap().chars().count(), 200);
    assert!(outcome.report.error.is_none());
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn upstream_error_status_still_counts_as_triggered() {
    let hook = warp::path!("hook").and(warp::get()).map(|| "only GET here");
    let (addr, server) = warp::serve(hook).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);

    let outcome = BuildHookTrigger::new(Some(format!("http://{}/hook", addr)))
        .trigger()
        .await;
    assert!(outcome.report.ok);
    assert_eq!(outcome.http_status, 200);
    assert_ne!(outcome.report.status, Some(200));
}

#[tokio::test]
async fn transport_failure_is_reported() {
    let outcome = BuildHookTrigger::new(Some(format!("http://{}/hook", closed_addr())))
        .trigger()
        .await;
    assert_eq!(outcome.http_status, 500);
    assert!(!outcome.report.ok);
    assert!(outcome.report.status.is_none());
    assert!(!outcome.report.error.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn trigger_route_relays_upstream_status() {
    let hook = warp::path!("hook").and(warp::post()).map(|| "{\"id\":\"deploy-1\"}");
    let (addr, server) = warp::serve(hook).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);

    let state = AppState {
        source: Arc::new(DataSource::File("/nonexistent/data.json".into())),
        assets: Arc::new(PageAssets::default()),
        trigger: Arc::new(BuildHookTrigger::new(Some(format!("http://{}/hook", addr)))),
    };
    let api = routes(state);
    let res = warp::test::request()
        .method("GET")
        .path("/api/v1/schedule-build")
        .reply(&api)
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    let json: Value = serde_json::from_slice(res.body()).unwrap();
    assert_eq!(json["ok"], true);
    assert_eq!(json["status"], 200);
    assert_eq!(json["body"], "{\"id\":\"deploy-1\"}");
}

// ---------------------------------------------------------------------------
// Remote data document
// ---------------------------------------------------------------------------

#[tokio::test]
async fn http_source_bypasses_caches() {
    let seen: Arc<Mutex<Vec<Option<String>>>> = Arc::new(Mutex::new(Vec::new()));
    let log = seen.clone();
    let host = warp::path!("data" / "data.json")
        .and(warp::header::optional::<String>("cache-control"))
        .map(move |cache_control: Option<String>| {
            log.lock().unwrap().push(cache_control);
            r#"{"indexes":[{"code":"^NDX","name":"纳斯达克100","price":17000.5}]}"#
        });
    let (addr, server) = warp::serve(host).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);

    let source = DataSource::from_location(&format!("http://{}/data/data.json", addr));
    let doc = source.fetch().await.unwrap();
    assert_eq!(doc.indexes[0].price, Some(17000.5));
    source.fetch().await.unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 2);
    assert!(seen.iter().all(|cc| cc.as_deref() == Some("no-cache")));
}

#[tokio::test]
async fn http_source_error_status_fails_fetch() {
    let host = warp::path!("data" / "data.json")
        .map(|| warp::reply::with_status("maintenance", StatusCode::SERVICE_UNAVAILABLE));
    let (addr, server) = warp::serve(host).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);

    let source = DataSource::from_location(&format!("http://{}/data/data.json", addr));
    assert!(source.fetch().await.is_err());
}

#[tokio::test]
async fn every_page_view_fetches_a_fresh_copy() {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let host = warp::path!("data" / "data.json").map(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        r#"{"indexes":[{"code":"^HSI","name":"恒生指数","valuation_status":"low"}]}"#
    });
    let (addr, server) = warp::serve(host).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);

    let state = AppState {
        source: Arc::new(DataSource::from_location(&format!("http://{}/data/data.json", addr))),
        assets: Arc::new(PageAssets::default()),
        trigger: Arc::new(BuildHookTrigger::new(None)),
    };
    let api = routes(state);
    for _ in 0..2 {
        let res = warp::test::request().path("/").reply(&api).await;
        let html = String::from_utf8(res.body().to_vec()).unwrap();
        assert!(html.contains(r#"<span class="badge ok">低估</span>"#));
    }
    let res = warp::test::request().path("/detail.html").reply(&api).await;
    assert_eq!(res.status(), StatusCode::OK);

    // the missing-code detail request never reaches the data host
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}
