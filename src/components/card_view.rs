//! Card Component
//!
//! A draggable, focusable task card. Pointer and touch sensors attach here;
//! the keyboard modality maps keydown on the focused card to the same
//! intents (Space picks up / commits, arrows move, Escape cancels).

use leptos::prelude::*;

use leptos_sortable::{self as sortable, KeyIntent, SortHandlers, SortTarget, SortableSignals};

use crate::board::GestureState;
use crate::models::Card;

#[component]
pub fn CardView(
    card: Card,
    dnd: SortableSignals,
    handlers: SortHandlers,
    gesture: RwSignal<GestureState>,
    on_key: Callback<(u32, KeyIntent)>,
) -> impl IntoView {
    let id = card.id;
    let name = card.name.clone();
    let description = card.description.clone();
    let assignee = card.assignee.clone();
    let due_date = card.due_date.clone();

    let on_mousedown = sortable::make_on_card_mousedown(dnd, id);
    let on_touchstart = sortable::make_on_card_touchstart(dnd, id);
    let on_enter = sortable::make_on_card_enter(dnd, id, handlers);

    // Lifted while either sensor drag or keyboard pick-up targets this card
    let is_lifted = move || {
        dnd.dragging_read.get() == Some(SortTarget::Card(id))
            || gesture.get().dragging_card_id() == Some(id)
    };

    let on_keydown = move |ev: web_sys::KeyboardEvent| {
        let picked_up = gesture.get_untracked().dragging_card_id() == Some(id);
        if let Some(intent) = sortable::key_intent(&ev.key(), picked_up) {
            ev.prevent_default();
            on_key.run((id, intent));
        }
    };

    view! {
        <div
            class=move || if is_lifted() { "card lifted" } else { "card" }
            tabindex="0"
            data-card-id=id.to_string()
            on:mousedown=on_mousedown
            on:touchstart=on_touchstart
            on:mouseenter=on_enter
            on:keydown=on_keydown
        >
            <div class="card-name">{name}</div>
            {description.map(|text| view! { <div class="card-description">{text}</div> })}
            {(assignee.is_some() || due_date.is_some()).then(|| view! {
                <div class="card-meta">
                    {assignee.map(|a| view! { <span class="card-assignee">{a}</span> })}
                    {due_date.map(|d| view! { <span class="card-due">{d}</span> })}
                </div>
            })}
        </div>
    }
}
