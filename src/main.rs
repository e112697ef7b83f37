//! Taskboard Frontend Entry Point

mod api;
mod app;
mod board;
mod components;
mod context;
mod models;
mod store;
mod toast;

use app::App;
use leptos::prelude::*;

use models::{default_columns, Session};

/// Read the session scope persisted by the login flow. An empty token is
/// surfaced later as a missing-session error on the first request.
fn session_from_storage() -> Session {
    let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
    let token = storage
        .as_ref()
        .and_then(|s| s.get_item("taskboard.token").ok().flatten())
        .unwrap_or_default();
    let project_id = storage
        .as_ref()
        .and_then(|s| s.get_item("taskboard.project").ok().flatten())
        .and_then(|v| v.parse().ok())
        .unwrap_or(1);
    Session { token, project_id }
}

fn main() {
    console_error_panic_hook::set_once();
    let session = session_from_storage();
    mount_to_body(move || {
        view! {
            <App session=session api_base=String::new() columns=default_columns() />
        }
    });
}
