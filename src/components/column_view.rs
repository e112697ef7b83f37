//! Column Component
//!
//! A board lane: draggable header (column reorder) and the ordered card
//! list. Entering the column body while dragging a card reports a
//! column-level over intent, which places the card at the top of the lane.

use leptos::prelude::*;

use leptos_sortable::{self as sortable, KeyIntent, SortHandlers, SortableSignals};

use crate::board::GestureState;
use crate::components::CardView;
use crate::models::{Card, Column};

#[component]
pub fn ColumnView(
    column: Column,
    /// Cards of this column, in board order
    cards: Signal<Vec<Card>>,
    dnd: SortableSignals,
    handlers: SortHandlers,
    gesture: RwSignal<GestureState>,
    on_key: Callback<(u32, KeyIntent)>,
) -> impl IntoView {
    let column_id = column.id.clone();
    let title = column.title.clone();
    let accent = column.color.clone().unwrap_or_else(|| "#666".to_string());

    let on_header_mousedown = sortable::make_on_column_mousedown(dnd, column_id.clone());
    let on_header_touchstart = sortable::make_on_column_touchstart(dnd, column_id.clone());
    let on_enter = sortable::make_on_column_enter(dnd, column_id.clone(), handlers);

    let count = move || cards.get().len();

    view! {
        <div class="column" data-column-id=column.id.clone() on:mouseenter=on_enter>
            <div
                class="column-header"
                style=format!("border-top: 3px solid {};", accent)
                on:mousedown=on_header_mousedown
                on:touchstart=on_header_touchstart
            >
                <span class="column-title">{title}</span>
                <span class="column-count">{count}</span>
            </div>

            <div class="column-cards">
                <For
                    each=move || cards.get()
                    // Key on the mutable fields so reseeded cards re-render
                    key=|card| (card.id, card.status.clone(), card.name.clone(), card.description.clone())
                    children=move |card| {
                        view! {
                            <CardView
                                card=card
                                dnd=dnd
                                handlers=handlers
                                gesture=gesture
                                on_key=on_key
                            />
                        }
                    }
                />
            </div>

            {move || (count() == 0).then(|| view! { <div class="column-empty">"No tasks"</div> })}
        </div>
    }
}
