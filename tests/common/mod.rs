//! Common test utilities and helpers
//!
//! - Backend fixtures (document and token JSON)
//! - An `AppState` wired to a mock server
//! - A loop that drives the app until background work settles

#![allow(dead_code)]

use std::time::{Duration, Instant};

use docshelf::egui_app::{AppState, Config, MemoryTokenStore};
use docshelf::shared::AppConfig;
use serde_json::{json, Value};

pub fn document_json(id: i64, title: &str, content: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "content": content,
        "visibility": "private",
        "created_at": "2024-03-01T09:30:00"
    })
}

pub fn token_json(token: &str) -> Value {
    json!({ "access_token": token, "token_type": "bearer" })
}

pub fn test_config(server_url: &str) -> Config {
    let builder = AppConfig::builder()
        .server_url(server_url)
        .search_debounce_ms(20);
    Config::with_builder(builder).expect("valid test config")
}

pub fn app_state(server_url: &str, store: MemoryTokenStore) -> AppState {
    AppState::new(test_config(server_url), store).expect("app state starts")
}

/// Tick the app like the UI loop would until nothing is in flight
pub fn settle(state: &mut AppState) {
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        state.tick(Instant::now());
        if state.is_idle() && !state.refresh.is_raised() {
            return;
        }
        assert!(Instant::now() < deadline, "app did not settle in time");
        std::thread::sleep(Duration::from_millis(10));
    }
}

/// Let a debounced search fire, then settle
pub fn settle_search(state: &mut AppState) {
    std::thread::sleep(Duration::from_millis(40));
    settle(state);
}
