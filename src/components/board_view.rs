//! Board Component
//!
//! Wires the sensor backends to the move core and the persistence bridge.
//! All modalities funnel into the same four callbacks: start (origin
//! snapshot), over (optimistic local splice), drop (commit, one persist
//! call), cancel (revert to origin, no network).

use leptos::prelude::*;
use leptos::task::spawn_local;

use leptos_sortable::{self as sortable, Arrow, KeyIntent, SensorBackend, SortHandlers, SortTarget};

use crate::api::ApiClient;
use crate::board::{self, Direction, GestureState};
use crate::components::ColumnView;
use crate::context::use_board_context;
use crate::store::{
    store_cards, store_cards_untracked, store_columns, store_columns_untracked, store_update_cards,
    store_update_columns, use_board_store,
};
use crate::toast::use_toasts;

fn direction_of(arrow: Arrow) -> Direction {
    match arrow {
        Arrow::Up => Direction::Up,
        Arrow::Down => Direction::Down,
        Arrow::Left => Direction::Left,
        Arrow::Right => Direction::Right,
    }
}

#[component]
pub fn BoardView(api: ApiClient, backends: Vec<SensorBackend>) -> impl IntoView {
    let store = use_board_store();
    let ctx = use_board_context();
    let toasts = use_toasts();

    let gesture = RwSignal::new(GestureState::Idle);
    let dnd = sortable::create_sortable_signals();

    // Commit: exactly one persist call per completed card gesture, carrying
    // the final slot. Column moves are local-only, nothing to persist.
    let commit = Callback::new(move |()| {
        let state = gesture.get_untracked();
        gesture.set(GestureState::Idle);
        let Some((id, slot)) = board::commit_slot(&state, &store_cards_untracked(&store)) else {
            // Column gesture, or the card ended back in its origin slot
            return;
        };
        let api = api.clone();
        spawn_local(async move {
            web_sys::console::log_1(
                &format!("[BOARD] persist move id={} status={} position={}", id, slot.status, slot.index).into(),
            );
            match api.move_task(id, &slot.status, slot.index).await {
                Ok(()) => {
                    toasts.success("Task moved");
                    // Invalidate the task query; the refetch reseeds the board
                    ctx.reload();
                }
                Err(e) => {
                    // No rollback: the optimistic state stays until the next
                    // reseed corrects it
                    web_sys::console::error_1(&format!("[BOARD] persist failed: {}", e).into());
                    toasts.error(format!("Move failed: {}", e));
                }
            }
        });
    });

    // Cancel: revert to the origin recorded at pick-up, commit nothing
    let cancel = Callback::new(move |()| {
        let state = gesture.get_untracked();
        gesture.set(GestureState::Idle);
        match &state {
            GestureState::DraggingCard { .. } => {
                store_update_cards(&store, |cards| state.revert_card(cards));
            }
            GestureState::DraggingColumn { .. } => {
                store_update_columns(&store, |columns| state.revert_column(columns));
            }
            GestureState::Idle => {}
        }
    });

    let on_start = Callback::new(move |entity: SortTarget| {
        // One gesture at a time
        if gesture.get_untracked().is_dragging() {
            return;
        }
        match entity {
            SortTarget::Card(id) => {
                if let Some(g) = GestureState::pick_up_card(&store_cards_untracked(&store), id) {
                    gesture.set(g);
                }
            }
            SortTarget::Column(id) => {
                if let Some(g) = GestureState::pick_up_column(&store_columns_untracked(&store), &id) {
                    gesture.set(g);
                }
            }
        }
    });

    // A sensor event only acts on the gesture it started; a pointer drag
    // refused at start (another gesture in flight) is ignored here
    let matches_gesture = move |entity: &SortTarget| match (gesture.get_untracked(), entity) {
        (GestureState::DraggingCard { id, .. }, SortTarget::Card(other)) => id == *other,
        (GestureState::DraggingColumn { id, .. }, SortTarget::Column(other)) => id == *other,
        _ => false,
    };

    // Over: synchronous optimistic splice, no network
    let on_over = Callback::new(move |target: SortTarget| {
        if let Some(active) = dnd.dragging_read.get_untracked() {
            if !matches_gesture(&active) {
                return;
            }
        }
        let state = gesture.get_untracked();
        match (state, target) {
            (GestureState::DraggingCard { id, .. }, SortTarget::Card(over)) => {
                store_update_cards(&store, |cards| board::move_card_over_card(cards, id, over));
            }
            (GestureState::DraggingCard { id, .. }, SortTarget::Column(column_id)) => {
                // Column body/header hover: top of the lane, unless the card
                // is already in it
                store_update_cards(&store, |cards| board::move_card_into_column(cards, id, &column_id));
            }
            (GestureState::DraggingColumn { id, .. }, SortTarget::Column(over)) => {
                store_update_columns(&store, |columns| board::move_column(columns, &id, &over));
            }
            _ => {}
        }
    });

    let on_drop = Callback::new(move |entity: SortTarget| {
        if matches_gesture(&entity) {
            commit.run(());
        }
    });
    let on_cancel = Callback::new(move |entity: SortTarget| {
        if matches_gesture(&entity) {
            cancel.run(());
        }
    });

    let handlers = SortHandlers { on_start, on_over, on_drop, on_cancel };
    sortable::bind_backends(dnd, &backends, handlers);

    // Keyboard modality: same intents, same algorithms, different source
    let on_key = Callback::new(move |(id, intent): (u32, KeyIntent)| {
        match intent {
            KeyIntent::PickUp => {
                if gesture.get_untracked().is_dragging() {
                    return;
                }
                if let Some(g) = GestureState::pick_up_card(&store_cards_untracked(&store), id) {
                    gesture.set(g);
                }
            }
            KeyIntent::Move(arrow) => {
                if gesture.get_untracked().dragging_card_id() != Some(id) {
                    return;
                }
                let columns = store_columns_untracked(&store);
                store_update_cards(&store, |cards| {
                    board::nudge_card(&columns, cards, id, direction_of(arrow))
                });
            }
            KeyIntent::Commit => {
                if gesture.get_untracked().dragging_card_id() == Some(id) {
                    commit.run(());
                }
            }
            KeyIntent::Cancel => {
                if gesture.get_untracked().dragging_card_id() == Some(id) {
                    cancel.run(());
                }
            }
        }
    });

    let columns = Signal::derive(move || store_columns(&store));

    view! {
        <div class="board">
            <For
                each=move || columns.get()
                key=|column| column.id.clone()
                children=move |column| {
                    let status = column.id.clone();
                    let cards = Signal::derive(move || {
                        store_cards(&store)
                            .into_iter()
                            .filter(|c| c.status == status)
                            .collect::<Vec<_>>()
                    });
                    view! {
                        <ColumnView
                            column=column
                            cards=cards
                            dnd=dnd
                            handlers=handlers
                            gesture=gesture
                            on_key=on_key
                        />
                    }
                }
            />
        </div>
    }
}
