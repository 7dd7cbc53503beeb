//! End-to-end runs of the service over the reqwest transport.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use user_fetcher::config::FetcherConfig;
use user_fetcher::{HttpTransport, ReqwestTransport, UserService};

mod common;
use common::{api_user, page_body, single_body, start_programmable_backend};

fn config_for(addr: std::net::SocketAddr) -> FetcherConfig {
    let mut config = FetcherConfig::default();
    config.api.base_url = format!("http://{}/api", addr);
    config.api.request_timeout_secs = 5;
    config.api.use_system_proxy = false;
    config.retries.base_delay_ms = 10;
    config
}

#[tokio::test]
async fn test_transport_returns_status_and_body() {
    let addr = start_programmable_backend(|path| {
        if path == "/ping" {
            (200, "pong".to_string())
        } else {
            (404, String::new())
        }
    })
    .await;
    let transport = ReqwestTransport::new(&config_for(addr).api).unwrap();

    let ok = transport.get(&format!("http://{}/ping", addr)).await.unwrap();
    assert_eq!(ok.status, 200);
    assert_eq!(ok.body, "pong");

    let missing = transport.get(&format!("http://{}/nope", addr)).await.unwrap();
    assert_eq!(missing.status, 404);
    assert!(!missing.is_success());
}

#[tokio::test]
async fn test_service_over_http() {
    let requests = Arc::new(AtomicU32::new(0));
    let counter = requests.clone();
    let addr = start_programmable_backend(move |path| {
        counter.fetch_add(1, Ordering::SeqCst);
        match path {
            "/api/users/2" => (200, single_body(2, "Janet", "Weaver")),
            "/api/users?page=1" => (
                200,
                page_body(1, 2, vec![api_user(1, "George", "Bluth"), api_user(2, "Janet", "Weaver")]),
            ),
            "/api/users?page=2" => (200, page_body(2, 2, vec![api_user(7, "Michael", "Lawson")])),
            _ => (404, "{}".to_string()),
        }
    })
    .await;
    let service = UserService::from_config(&config_for(addr)).unwrap();

    let user = service.fetch_user_by_id(2).await.unwrap();
    assert_eq!(user.full_name(), "Janet Weaver");

    let users = service.fetch_all_users().await.unwrap();
    let ids: Vec<i64> = users.iter().map(|u| u.id).collect();
    assert_eq!(ids, vec![1, 2, 7]);

    // Served from cache
    service.fetch_user_by_id(2).await.unwrap();
    service.fetch_all_users().await.unwrap();
    assert_eq!(requests.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_not_found_over_http_is_terminal() {
    let requests = Arc::new(AtomicU32::new(0));
    let counter = requests.clone();
    let addr = start_programmable_backend(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
        (404, "{}".to_string())
    })
    .await;
    let service = UserService::from_config(&config_for(addr)).unwrap();

    let err = service.fetch_user_by_id(23).await.unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(requests.load(Ordering::SeqCst), 1);
}
