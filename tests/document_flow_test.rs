//! End-to-end flows through `AppState` against a mock backend.
//!
//! `AppState` owns its own runtime, so these tests are plain `#[test]`s and
//! use a separate runtime only to set up the mock server.

mod common;

use std::time::{Duration, Instant};

use docshelf::egui_app::documents::editor::NOT_FOUND;
use docshelf::egui_app::documents::list::{DELETED, LOAD_FAILED};
use docshelf::egui_app::{MemoryTokenStore, Route, TokenStore};
use pretty_assertions::assert_eq;
use serde_json::json;
use tokio::runtime::Runtime;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{app_state, document_json, settle, settle_search, token_json};

fn mock_server(rt: &Runtime) -> MockServer {
    rt.block_on(MockServer::start())
}

fn mount(rt: &Runtime, server: &MockServer, mock: Mock) {
    rt.block_on(mock.mount(server));
}

fn two_documents() -> serde_json::Value {
    json!([
        document_json(1, "First", "<p>one</p>"),
        document_json(2, "Second", "<p>two</p>"),
    ])
}

#[test]
fn test_login_then_list_uses_bearer_token() {
    let rt = Runtime::new().unwrap();
    let server = mock_server(&rt);
    mount(
        &rt,
        &server,
        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(token_json("abc"))),
    );
    mount(
        &rt,
        &server,
        Mock::given(method("GET"))
            .and(path("/documents"))
            .and(header("authorization", "Bearer abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(two_documents())),
    );

    let store = MemoryTokenStore::new();
    let mut state = app_state(&server.uri(), store.clone());
    assert_eq!(state.current_route(), Route::Login);

    state.login_form.email = "ann@example.com".to_string();
    state.login_form.password = "pw".to_string();
    state.handle_login();
    assert!(state.auth_state.loading);
    settle(&mut state);

    assert_eq!(state.current_route(), Route::Documents);
    assert!(!state.history.can_go_back(), "login entry should be replaced");
    assert_eq!(store.load().unwrap().as_deref(), Some("abc"));
    assert_eq!(state.documents.documents().len(), 2);
    assert!(state.login_form.password.is_empty());
}

#[test]
fn test_failed_login_shows_backend_detail() {
    let rt = Runtime::new().unwrap();
    let server = mock_server(&rt);
    mount(
        &rt,
        &server,
        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({"detail": "Incorrect password"}))),
    );

    let store = MemoryTokenStore::new();
    let mut state = app_state(&server.uri(), store.clone());
    state.login_form.email = "ann@example.com".to_string();
    state.login_form.password = "nope".to_string();
    state.handle_login();
    settle(&mut state);

    assert_eq!(state.current_route(), Route::Login);
    assert_eq!(state.auth_state.error.as_deref(), Some("Incorrect password"));
    assert!(!state.auth_state.loading);
    assert_eq!(store.load().unwrap(), None);
}

#[test]
fn test_invalid_form_makes_no_request() {
    let rt = Runtime::new().unwrap();
    let server = mock_server(&rt);

    let mut state = app_state(&server.uri(), MemoryTokenStore::new());
    state.register_form.email = "not-an-email".to_string();
    state.register_form.username = "ann".to_string();
    state.register_form.password = "pw".to_string();
    state.navigate(Route::Register);
    state.handle_register();

    assert!(state.is_idle());
    assert!(state.auth_state.error.is_some());
    assert!(rt.block_on(server.received_requests()).unwrap().is_empty());
}

#[test]
fn test_restored_session_lists_on_start() {
    let rt = Runtime::new().unwrap();
    let server = mock_server(&rt);
    mount(
        &rt,
        &server,
        Mock::given(method("GET"))
            .and(path("/documents"))
            .and(header("authorization", "Bearer saved"))
            .respond_with(ResponseTemplate::new(200).set_body_json(two_documents()))
            .expect(1),
    );

    let mut state = app_state(&server.uri(), MemoryTokenStore::with_token("saved"));
    assert_eq!(state.current_route(), Route::Documents);
    settle(&mut state);
    assert_eq!(state.documents.documents().len(), 2);
}

#[test]
fn test_search_is_debounced() {
    let rt = Runtime::new().unwrap();
    let server = mock_server(&rt);
    mount(
        &rt,
        &server,
        Mock::given(method("GET"))
            .and(path("/documents"))
            .respond_with(ResponseTemplate::new(200).set_body_json(two_documents())),
    );
    mount(
        &rt,
        &server,
        Mock::given(method("GET"))
            .and(path("/documents/search"))
            .and(query_param("q", "sec"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([document_json(2, "Second", "")])))
            .expect(1),
    );

    let mut state = app_state(&server.uri(), MemoryTokenStore::with_token("t"));
    settle(&mut state);

    let now = Instant::now();
    state.documents.set_query("s", now);
    state.documents.set_query("se", now);
    state.documents.set_query("sec", now);
    settle_search(&mut state);

    let ids: Vec<i64> = state.documents.documents().iter().map(|d| d.id).collect();
    assert_eq!(ids, vec![2]);
}

#[test]
fn test_fetch_failure_keeps_documents() {
    let rt = Runtime::new().unwrap();
    let server = mock_server(&rt);
    mount(
        &rt,
        &server,
        Mock::given(method("GET"))
            .and(path("/documents"))
            .respond_with(ResponseTemplate::new(200).set_body_json(two_documents())),
    );
    mount(
        &rt,
        &server,
        Mock::given(method("GET"))
            .and(path("/documents/search"))
            .respond_with(ResponseTemplate::new(500)),
    );

    let mut state = app_state(&server.uri(), MemoryTokenStore::with_token("t"));
    settle(&mut state);
    state.documents.set_query("boom", Instant::now());
    settle_search(&mut state);

    assert_eq!(state.current_route(), Route::Documents);
    assert_eq!(state.documents.documents().len(), 2);
    assert_eq!(state.toasts.latest().unwrap().message, LOAD_FAILED);
}

#[test]
fn test_delete_needs_confirmation() {
    let rt = Runtime::new().unwrap();
    let server = mock_server(&rt);
    mount(
        &rt,
        &server,
        Mock::given(method("GET"))
            .and(path("/documents"))
            .respond_with(ResponseTemplate::new(200).set_body_json(two_documents()))
            .expect(1),
    );
    mount(
        &rt,
        &server,
        Mock::given(method("DELETE"))
            .and(path("/documents/2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "deleted"})))
            .expect(1),
    );

    let mut state = app_state(&server.uri(), MemoryTokenStore::with_token("t"));
    settle(&mut state);

    state.documents.request_delete(2);
    state.documents.cancel_delete();
    settle(&mut state);
    assert_eq!(state.documents.documents().len(), 2);

    state.documents.request_delete(2);
    state.confirm_delete();
    settle(&mut state);

    let ids: Vec<i64> = state.documents.documents().iter().map(|d| d.id).collect();
    assert_eq!(ids, vec![1]);
    assert_eq!(state.toasts.latest().unwrap().message, DELETED);
}

#[test]
fn test_create_sends_exact_body_and_returns_to_list() {
    let rt = Runtime::new().unwrap();
    let server = mock_server(&rt);
    mount(
        &rt,
        &server,
        Mock::given(method("GET"))
            .and(path("/documents"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([]))),
    );
    mount(
        &rt,
        &server,
        Mock::given(method("POST"))
            .and(path("/documents"))
            .and(body_json(json!({"title": "T", "content": "<p>C</p>", "visibility": "private"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(document_json(5, "T", "<p>C</p>")))
            .expect(1),
    );

    let mut state = app_state(&server.uri(), MemoryTokenStore::with_token("t"));
    settle(&mut state);

    state.navigate(Route::Create);
    state.editor.title = "T".to_string();
    state.editor.content = "<p>C</p>".to_string();
    state.submit_editor();
    settle(&mut state);

    assert_eq!(state.current_route(), Route::Documents);
}

#[test]
fn test_edit_missing_document_redirects_to_list() {
    let rt = Runtime::new().unwrap();
    let server = mock_server(&rt);
    mount(
        &rt,
        &server,
        Mock::given(method("GET"))
            .and(path("/documents"))
            .respond_with(ResponseTemplate::new(200).set_body_json(two_documents())),
    );
    mount(
        &rt,
        &server,
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0),
    );

    let mut state = app_state(&server.uri(), MemoryTokenStore::with_token("t"));
    settle(&mut state);

    state.navigate(Route::Edit(7));
    settle(&mut state);

    assert_eq!(state.current_route(), Route::Documents);
    assert!(state
        .toasts
        .iter()
        .any(|toast| toast.message == NOT_FOUND));
    state.submit_editor();
    assert!(state.is_idle());
}

#[test]
fn test_edit_loads_and_updates() {
    let rt = Runtime::new().unwrap();
    let server = mock_server(&rt);
    mount(
        &rt,
        &server,
        Mock::given(method("GET"))
            .and(path("/documents"))
            .respond_with(ResponseTemplate::new(200).set_body_json(two_documents())),
    );
    mount(
        &rt,
        &server,
        Mock::given(method("PUT"))
            .and(path("/documents/2"))
            .and(body_json(json!({"title": "Second v2", "content": "<p>two</p>", "visibility": "private"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(document_json(2, "Second v2", "<p>two</p>")))
            .expect(1),
    );

    let mut state = app_state(&server.uri(), MemoryTokenStore::with_token("t"));
    settle(&mut state);

    state.navigate(Route::Edit(2));
    settle(&mut state);
    assert_eq!(state.current_route(), Route::Edit(2));
    assert_eq!(state.editor.title, "Second");

    state.editor.title.push_str(" v2");
    state.submit_editor();
    settle(&mut state);
    assert_eq!(state.current_route(), Route::Documents);
}

#[test]
fn test_logout_removes_token_and_redirects() {
    let rt = Runtime::new().unwrap();
    let server = mock_server(&rt);
    mount(
        &rt,
        &server,
        Mock::given(method("GET"))
            .and(path("/documents"))
            .respond_with(ResponseTemplate::new(200).set_body_json(two_documents())),
    );

    let store = MemoryTokenStore::with_token("abc");
    let mut state = app_state(&server.uri(), store.clone());
    settle(&mut state);

    state.navigate(Route::Create);
    assert!(state.history.can_go_back());

    state.logout();
    assert_eq!(store.load().unwrap(), None);
    assert_eq!(state.current_route(), Route::Login);
    assert!(state.documents.documents().is_empty());
    assert!(!state.history.can_go_back(), "previous session's views must not stay reachable");
}

#[test]
fn test_leaving_editor_ignores_late_save() {
    let rt = Runtime::new().unwrap();
    let server = mock_server(&rt);
    mount(
        &rt,
        &server,
        Mock::given(method("GET"))
            .and(path("/documents"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([]))),
    );
    mount(
        &rt,
        &server,
        Mock::given(method("POST"))
            .and(path("/documents"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(document_json(5, "T", "<p>C</p>"))
                    .set_delay(Duration::from_millis(200)),
            ),
    );

    let mut state = app_state(&server.uri(), MemoryTokenStore::with_token("t"));
    settle(&mut state);

    state.navigate(Route::Create);
    state.editor.title = "T".to_string();
    state.editor.content = "<p>C</p>".to_string();
    state.submit_editor();
    assert!(!state.is_idle());

    state.back();
    assert!(state.is_idle(), "save response should be dropped once the editor is left");
    settle(&mut state);
    std::thread::sleep(Duration::from_millis(300));
    settle(&mut state);

    assert_eq!(state.current_route(), Route::Documents);
    assert!(!state.history.can_go_back());
}

#[test]
fn test_mounted_list_redirects_once_session_ends() {
    let rt = Runtime::new().unwrap();
    let server = mock_server(&rt);
    mount(
        &rt,
        &server,
        Mock::given(method("GET"))
            .and(path("/documents"))
            .respond_with(ResponseTemplate::new(200).set_body_json(two_documents())),
    );

    let mut state = app_state(&server.uri(), MemoryTokenStore::with_token("abc"));
    settle(&mut state);
    assert_eq!(state.current_route(), Route::Documents);

    state.session.end().unwrap();
    state.tick(Instant::now());
    assert_eq!(state.current_route(), Route::Login);
}
