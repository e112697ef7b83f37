//! New Card Form
//!
//! Creates a task in the first column and reloads the board.

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use crate::api::ApiClient;
use crate::context::use_board_context;
use crate::store::{store_columns_untracked, use_board_store};
use crate::toast::use_toasts;

#[component]
pub fn NewCardForm() -> impl IntoView {
    let store = use_board_store();
    let ctx = use_board_context();
    let toasts = use_toasts();
    let api = expect_context::<ApiClient>();

    let (name, set_name) = signal(String::new());

    let add_card = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let text = name.get();
        if text.is_empty() {
            return;
        }
        let Some(status) = store_columns_untracked(&store).first().map(|c| c.id.clone()) else {
            return;
        };
        let api = api.clone();
        spawn_local(async move {
            match api.create_task(&text, &status).await {
                Ok(_) => {
                    set_name.set(String::new());
                    ctx.reload();
                }
                Err(e) => toasts.error(format!("Create failed: {}", e)),
            }
        });
    };

    view! {
        <form class="new-card-form" on:submit=add_card>
            <input
                type="text"
                placeholder="Add task..."
                prop:value=move || name.get()
                on:input=move |ev| {
                    let target = ev.target().unwrap();
                    let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                    set_name.set(input.value());
                }
            />
            <button type="submit">"+"</button>
        </form>
    }
}
