//! Taskboard Frontend App
//!
//! Board page: provides the store and contexts, seeds the board from the
//! task query whenever the reload trigger changes, and refetches on window
//! refocus. Session and column configuration arrive as explicit props.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;
use wasm_bindgen::JsCast;

use leptos_sortable::SensorBackend;

use crate::api::ApiClient;
use crate::components::{BoardView, NewCardForm};
use crate::context::BoardContext;
use crate::models::{Column, Session};
use crate::store::{store_cards, store_seed, BoardState};
use crate::toast::{ToastStack, Toasts};

#[component]
pub fn App(session: Session, api_base: String, columns: Vec<Column>) -> impl IntoView {
    let api = ApiClient::new(api_base, session);

    let store = Store::new(BoardState::default());
    provide_context(store);

    let (reload_trigger, set_reload_trigger) = signal(0u32);
    let ctx = BoardContext::new((reload_trigger, set_reload_trigger));
    provide_context(ctx);

    let toasts = Toasts::new();
    provide_context(toasts);
    provide_context(api.clone());

    // Seed/reseed whenever the reload trigger changes. Server state wins
    // over whatever local mutations happened since the last seed.
    let seed_api = api.clone();
    let seed_columns = columns.clone();
    Effect::new(move |_| {
        let trigger = reload_trigger.get();
        let api = seed_api.clone();
        let columns = seed_columns.clone();
        spawn_local(async move {
            web_sys::console::log_1(&format!("[APP] Loading tasks, trigger={}", trigger).into());
            match api.fetch_tasks().await {
                Ok(cards) => {
                    web_sys::console::log_1(&format!("[APP] Loaded {} tasks", cards.len()).into());
                    store_seed(&store, columns, cards);
                }
                Err(e) => toasts.error(format!("Load failed: {}", e)),
            }
        });
    });

    // Refetch when the window regains focus
    let on_focus = wasm_bindgen::closure::Closure::<dyn FnMut()>::new(move || {
        ctx.reload();
    });
    if let Some(win) = web_sys::window() {
        let _ = win.add_event_listener_with_callback("focus", on_focus.as_ref().unchecked_ref());
    }
    on_focus.forget();

    let task_count = move || store_cards(&store).len();

    view! {
        <div class="board-page">
            <header class="board-header">
                <h1>"Taskboard"</h1>
                <NewCardForm />
            </header>

            <BoardView
                api=api.clone()
                backends=vec![SensorBackend::Pointer, SensorBackend::Touch]
            />

            <p class="task-count">{move || format!("{} tasks", task_count())}</p>

            <ToastStack />
        </div>
    }
}
