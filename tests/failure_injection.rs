//! Failure injection tests: misbehaving providers must map to fixed errors
//! and never leave a history record behind.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use commute_api::config::{validate_config, CommuteConfig};
use commute_api::http::ErrorBody;

mod common;

const NOT_FOUND: &str = "One or both locations could not be found on the map.";
const NO_PATH: &str = "Could not calculate a driving path.";

async fn assert_error(res: reqwest::Response, status: u16, message: &str) {
    assert_eq!(res.status(), status);
    let body: ErrorBody = res.json().await.unwrap();
    assert_eq!(body.error, message);
}

async fn assert_nothing_logged(app: &common::TestApp) {
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(app.history.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_osrm_no_route() {
    let (geocoder, _) = common::start_mumbai_geocoder().await;
    let (router, _) = common::start_programmable_backend(|_| async {
        (400, r#"{"code":"NoRoute","message":"Impossible route between points"}"#.to_string())
    })
    .await;
    let app = common::spawn_app(geocoder, router).await;

    assert_error(app.get_routes("Bandra", "Andheri").await, 500, NO_PATH).await;
    assert_nothing_logged(&app).await;
}

#[tokio::test]
async fn test_router_empty_routes() {
    let (geocoder, _) = common::start_mumbai_geocoder().await;
    let (router, _) = common::start_programmable_backend(|_| async {
        (200, r#"{"code":"Ok","routes":[]}"#.to_string())
    })
    .await;
    let app = common::spawn_app(geocoder, router).await;

    assert_error(app.get_routes("Bandra", "Andheri").await, 500, NO_PATH).await;
    assert_nothing_logged(&app).await;
}

#[tokio::test]
async fn test_router_server_error() {
    let (geocoder, _) = common::start_mumbai_geocoder().await;
    let (router, _) =
        common::start_programmable_backend(|_| async { (503, "upstream down".to_string()) }).await;
    let app = common::spawn_app(geocoder, router).await;

    assert_error(app.get_routes("Bandra", "Andheri").await, 500, NO_PATH).await;
    assert_nothing_logged(&app).await;
}

#[tokio::test]
async fn test_router_garbage_body() {
    let (geocoder, _) = common::start_mumbai_geocoder().await;
    let (router, _) =
        common::start_programmable_backend(|_| async { (200, "<html>oops</html>".to_string()) }).await;
    let app = common::spawn_app(geocoder, router).await;

    assert_error(app.get_routes("Bandra", "Andheri").await, 500, NO_PATH).await;
    assert_nothing_logged(&app).await;
}

#[tokio::test]
async fn test_geocoder_rejects_traffic() {
    let (geocoder, _) =
        common::start_programmable_backend(|_| async { (429, "[]".to_string()) }).await;
    let (router, router_log) = common::start_fixed_router().await;
    let app = common::spawn_app(geocoder, router).await;

    assert_error(app.get_routes("Bandra", "Andheri").await, 404, NOT_FOUND).await;
    assert!(router_log.lock().unwrap().is_empty());
    assert_nothing_logged(&app).await;
}

#[tokio::test]
async fn test_geocoder_garbage_coordinates() {
    let (geocoder, _) = common::start_programmable_backend(|_| async {
        (200, common::place("north", "east", "Somewhere"))
    })
    .await;
    let (router, _) = common::start_fixed_router().await;
    let app = common::spawn_app(geocoder, router).await;

    assert_error(app.get_routes("Bandra", "Andheri").await, 404, NOT_FOUND).await;
    assert_nothing_logged(&app).await;
}

#[tokio::test]
async fn test_geocoder_unreachable() {
    // Grab a free port, then close it so connections are refused.
    let closed = {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap()
    };
    let (router, _) = common::start_fixed_router().await;
    let app = common::spawn_app(closed, router).await;

    assert_error(app.get_routes("Bandra", "Andheri").await, 404, NOT_FOUND).await;
    assert_nothing_logged(&app).await;
}

#[tokio::test]
async fn test_slow_geocoder_times_out() {
    let (geocoder, _) = common::start_programmable_backend(|_| async {
        tokio::time::sleep(Duration::from_secs(3)).await;
        (200, common::place("19.05", "72.84", "Bandra West, Mumbai"))
    })
    .await;
    let (router, _) = common::start_fixed_router().await;
    let app = common::spawn_app_with(geocoder, router, |config| {
        config.geocoder.timeout_secs = 1;
    })
    .await;

    assert_error(app.get_routes("Bandra", "Andheri").await, 404, NOT_FOUND).await;
    assert_nothing_logged(&app).await;
}

#[tokio::test]
async fn test_slow_router_times_out() {
    let (geocoder, _) = common::start_mumbai_geocoder().await;
    let (router, _) = common::start_programmable_backend(|_| async {
        tokio::time::sleep(Duration::from_secs(3)).await;
        (200, common::osrm_route(8000.0, 1200.0))
    })
    .await;
    let app = common::spawn_app_with(geocoder, router, |config| {
        config.router.timeout_secs = 1;
    })
    .await;

    assert_error(app.get_routes("Bandra", "Andheri").await, 500, NO_PATH).await;
    assert_nothing_logged(&app).await;
}

#[tokio::test]
async fn test_request_deadline_answers_with_json_error() {
    let (geocoder, _) = common::start_programmable_backend(|_| async {
        tokio::time::sleep(Duration::from_secs(3)).await;
        (200, common::place("19.05", "72.84", "Bandra West, Mumbai"))
    })
    .await;
    let (router, router_log) = common::start_fixed_router().await;
    let app = common::spawn_app_with(geocoder, router, |config| {
        config.timeouts.request_secs = 1;
    })
    .await;

    assert_error(app.get_routes("Bandra", "Andheri").await, 500, "Internal server error.").await;
    assert!(router_log.lock().unwrap().is_empty());
    assert_nothing_logged(&app).await;
}

#[test]
fn test_deadline_shorter_than_providers_is_rejected() {
    let mut config = CommuteConfig::default();
    config.timeouts.request_secs = 1;

    let errors = validate_config(&config).unwrap_err();
    assert!(errors.iter().any(|e| e.field == "timeouts.request_secs"));
}

#[tokio::test]
async fn test_no_retries() {
    let calls = Arc::new(AtomicU32::new(0));
    let counter = calls.clone();
    let (geocoder, _) = common::start_mumbai_geocoder().await;
    let (router, _) = common::start_programmable_backend(move |_| {
        let counter = counter.clone();
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            (503, "busy".to_string())
        }
    })
    .await;
    let app = common::spawn_app(geocoder, router).await;

    assert_eq!(app.get_routes("Bandra", "Andheri").await.status(), 500);
    assert_eq!(calls.load(Ordering::SeqCst), 1, "a failed route is reported, not retried");
}

#[tokio::test]
async fn test_unwritable_history_does_not_change_response() {
    let (geocoder, _) = common::start_mumbai_geocoder().await;
    let (router, _) = common::start_fixed_router().await;
    let app = common::spawn_app(geocoder, router).await;

    let healthy: serde_json::Value = app.get_routes("Bandra", "Andheri").await.json().await.unwrap();
    assert_eq!(app.wait_for_history(1).await, 1);

    // Make every later insert fail.
    drop_history_table(&app).await;

    let res = app.get_routes("Bandra", "Andheri").await;
    assert_eq!(res.status(), 200);
    let degraded: serde_json::Value = res.json().await.unwrap();
    assert_eq!(healthy, degraded);
}

async fn drop_history_table(app: &common::TestApp) {
    let path = app.database_path();
    tokio::task::spawn_blocking(move || {
        let conn = rusqlite::Connection::open(path).unwrap();
        conn.execute("DROP TABLE search_history", []).unwrap();
    })
    .await
    .unwrap();
}
