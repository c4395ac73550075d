use super::*;
use std::{
    collections::HashMap,
    sync::atomic::{AtomicBool, AtomicUsize, Ordering as AtomicOrdering},
};

use axum::{
    extract::{Query, State},
    http::StatusCode as AxumStatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use shared::domain::field_text;
use tokio::net::TcpListener;

const PEOPLE: [&str; 5] = [
    "Luke Skywalker",
    "C-3PO",
    "R2-D2",
    "Darth Vader",
    "Leia Organa",
];

fn person(name: &str) -> Value {
    json!({ "name": name, "height": "172", "mass": "77" })
}

#[derive(Clone)]
struct ArchiveServerState {
    base_url: String,
    requests: Arc<AtomicUsize>,
    fail_page_two_once: Arc<AtomicBool>,
    cancel_on_request: Option<CancelToken>,
    relative_next: bool,
    loop_forever: bool,
}

#[derive(Default)]
struct MockArchiveOptions {
    fail_page_two_once: bool,
    cancel_on_request: Option<CancelToken>,
    relative_next: bool,
    loop_forever: bool,
}

struct MockArchive {
    base_url: String,
    requests: Arc<AtomicUsize>,
}

impl MockArchive {
    fn request_count(&self) -> usize {
        self.requests.load(AtomicOrdering::SeqCst)
    }
}

async fn handle_people(
    State(state): State<ArchiveServerState>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    state.requests.fetch_add(1, AtomicOrdering::SeqCst);
    if let Some(cancel) = &state.cancel_on_request {
        cancel.cancel();
    }

    if state.loop_forever {
        // A `next` pointer that never advances.
        let body = json!({
            "count": 1,
            "next": format!("{}/people/", state.base_url),
            "results": [person(PEOPLE[0])],
        });
        return Json(body).into_response();
    }

    let page: usize = params
        .get("page")
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(1);

    if page == 2 && state.fail_page_two_once.swap(false, AtomicOrdering::SeqCst) {
        return AxumStatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    let next = |target: usize| {
        if state.relative_next {
            format!("/people/?page={target}")
        } else {
            format!("{}/people/?page={target}", state.base_url)
        }
    };

    let body = match page {
        1 => json!({
            "count": 5,
            "next": next(2),
            "results": [person(PEOPLE[0]), person(PEOPLE[1])],
        }),
        2 => json!({
            "count": 5,
            "next": next(3),
            "results": [person(PEOPLE[2]), person(PEOPLE[3])],
        }),
        _ => json!({ "count": 5, "next": null, "results": [person(PEOPLE[4])] }),
    };
    Json(body).into_response()
}

async fn handle_planets(State(state): State<ArchiveServerState>) -> Response {
    state.requests.fetch_add(1, AtomicOrdering::SeqCst);
    // Single page; `next` deliberately absent rather than null.
    Json(json!({
        "count": 3,
        "results": [
            { "name": "Tatooine", "population": "200000" },
            { "name": "Alderaan", "population": "2000000000" },
            { "name": "Hoth", "population": "unknown" },
        ],
    }))
    .into_response()
}

async fn handle_starships(State(state): State<ArchiveServerState>) -> Response {
    state.requests.fetch_add(1, AtomicOrdering::SeqCst);
    // Schema mismatch: the page carries no `results` field.
    Json(json!({ "count": 0, "next": null })).into_response()
}

async fn handle_garbage(State(state): State<ArchiveServerState>) -> Response {
    state.requests.fetch_add(1, AtomicOrdering::SeqCst);
    "this is not json".into_response()
}

async fn spawn_archive_server(options: MockArchiveOptions) -> MockArchive {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let base_url = format!("http://{addr}");
    let requests = Arc::new(AtomicUsize::new(0));
    let state = ArchiveServerState {
        base_url: base_url.clone(),
        requests: Arc::clone(&requests),
        fail_page_two_once: Arc::new(AtomicBool::new(options.fail_page_two_once)),
        cancel_on_request: options.cancel_on_request,
        relative_next: options.relative_next,
        loop_forever: options.loop_forever,
    };
    let app = Router::new()
        .route("/people/", get(handle_people))
        .route("/planets/", get(handle_planets))
        .route("/starships/", get(handle_starships))
        .route("/garbage/", get(handle_garbage))
        .with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    MockArchive { base_url, requests }
}

fn names(records: &[Record]) -> Vec<String> {
    records
        .iter()
        .map(|record| field_text(record, "name"))
        .collect()
}

#[tokio::test]
async fn fetch_all_concatenates_pages_in_order() {
    let server = spawn_archive_server(MockArchiveOptions::default()).await;
    let client = ArchiveClient::new(&server.base_url);

    let records = client
        .fetch_all(ResourceKind::People, &CancelToken::new())
        .await
        .expect("fetch");

    assert_eq!(names(&records), PEOPLE);
    assert_eq!(server.request_count(), 3);
}

#[tokio::test]
async fn single_page_run_issues_exactly_one_request() {
    let server = spawn_archive_server(MockArchiveOptions::default()).await;
    let client = ArchiveClient::new(&server.base_url);

    let records = client
        .fetch_all(ResourceKind::Planets, &CancelToken::new())
        .await
        .expect("fetch");

    assert_eq!(names(&records), ["Tatooine", "Alderaan", "Hoth"]);
    assert_eq!(server.request_count(), 1);
}

#[tokio::test]
async fn mid_run_failure_yields_no_partial_result_and_retry_is_clean() {
    let server = spawn_archive_server(MockArchiveOptions {
        fail_page_two_once: true,
        ..Default::default()
    })
    .await;
    let client = ArchiveClient::new(&server.base_url);

    let err = client
        .fetch_all(ResourceKind::People, &CancelToken::new())
        .await
        .expect_err("page 2 fails");
    match err {
        FetchError::Status { status, .. } => {
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR)
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(server.request_count(), 2);

    // A fresh run starts from an empty accumulator: nothing dropped,
    // nothing duplicated.
    let records = client
        .fetch_all(ResourceKind::People, &CancelToken::new())
        .await
        .expect("retry");
    assert_eq!(names(&records), PEOPLE);
    for name in PEOPLE {
        assert_eq!(
            records
                .iter()
                .filter(|record| field_text(record, "name") == name)
                .count(),
            1
        );
    }
    assert_eq!(server.request_count(), 5);
}

#[tokio::test]
async fn pre_cancelled_run_issues_no_requests() {
    let server = spawn_archive_server(MockArchiveOptions::default()).await;
    let client = ArchiveClient::new(&server.base_url);

    let cancel = CancelToken::new();
    cancel.cancel();
    let err = client
        .fetch_all(ResourceKind::People, &cancel)
        .await
        .expect_err("cancelled");
    assert!(matches!(err, FetchError::Cancelled));
    assert_eq!(server.request_count(), 0);
}

#[tokio::test]
async fn cancellation_after_first_page_stops_the_run() {
    let cancel = CancelToken::new();
    let server = spawn_archive_server(MockArchiveOptions {
        cancel_on_request: Some(cancel.clone()),
        ..Default::default()
    })
    .await;
    let client = ArchiveClient::new(&server.base_url);

    let err = client
        .fetch_all(ResourceKind::People, &cancel)
        .await
        .expect_err("cancelled mid-run");
    assert!(matches!(err, FetchError::Cancelled));
    assert_eq!(server.request_count(), 1);
}

#[tokio::test]
async fn missing_results_field_is_a_decode_error() {
    let server = spawn_archive_server(MockArchiveOptions::default()).await;
    let client = ArchiveClient::new(&server.base_url);

    let err = client
        .fetch_all(ResourceKind::Starships, &CancelToken::new())
        .await
        .expect_err("schema mismatch");
    assert!(matches!(err, FetchError::Decode { .. }));
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let server = spawn_archive_server(MockArchiveOptions::default()).await;
    let client = ArchiveClient::new(&server.base_url);

    let err = client
        .fetch_page(&format!("{}/garbage/", server.base_url))
        .await
        .expect_err("not json");
    assert!(matches!(err, FetchError::Decode { .. }));
}

#[tokio::test]
async fn non_success_status_is_surfaced() {
    let server = spawn_archive_server(MockArchiveOptions::default()).await;
    let client = ArchiveClient::new(&server.base_url);

    let err = client
        .fetch_page(&format!("{}/droids/", server.base_url))
        .await
        .expect_err("unknown collection");
    match err {
        FetchError::Status { status, url } => {
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert!(url.ends_with("/droids/"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn relative_next_pointers_resolve_against_the_page_url() {
    let server = spawn_archive_server(MockArchiveOptions {
        relative_next: true,
        ..Default::default()
    })
    .await;
    let client = ArchiveClient::new(&server.base_url);

    let records = client
        .fetch_all(ResourceKind::People, &CancelToken::new())
        .await
        .expect("fetch");
    assert_eq!(names(&records), PEOPLE);
}

#[tokio::test]
async fn page_chain_loop_is_bounded() {
    let server = spawn_archive_server(MockArchiveOptions {
        loop_forever: true,
        ..Default::default()
    })
    .await;
    let client = ArchiveClient::new(&server.base_url);

    let err = client
        .fetch_all(ResourceKind::People, &CancelToken::new())
        .await
        .expect_err("never terminates");
    match err {
        FetchError::PageLimit { limit } => assert_eq!(limit, MAX_PAGES),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(server.request_count(), MAX_PAGES);
}

#[test]
fn collection_urls_are_kind_scoped() {
    let client = ArchiveClient::new("https://archive.test/api/");
    assert_eq!(
        client.collection_url(ResourceKind::People),
        "https://archive.test/api/people/"
    );
    assert_eq!(
        client.collection_url(ResourceKind::Starships),
        "https://archive.test/api/starships/"
    );
}

#[test]
fn next_pointer_resolution() {
    let absolute = resolve_next(
        "https://archive.test/api/people/?page=1",
        "https://archive.test/api/people/?page=2",
    )
    .expect("absolute");
    assert_eq!(absolute, "https://archive.test/api/people/?page=2");

    let relative = resolve_next("https://archive.test/api/people/?page=1", "/api/people/?page=2")
        .expect("relative");
    assert_eq!(relative, "https://archive.test/api/people/?page=2");

    assert!(resolve_next("not a url", "also not").is_err());
}
