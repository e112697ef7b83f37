//! Board State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. The store is a
//! disposable cache over server truth: seeded on load, reseeded wholesale on
//! every refetch, and mutated optimistically by the interaction layer in
//! between. No merge logic; server state always wins once reloaded.

use leptos::prelude::*;
use reactive_stores::Store;
use std::cmp::Ordering;

use crate::models::{Card, Column};

/// Board state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct BoardState {
    /// Column configuration, reorderable locally
    pub columns: Vec<Column>,
    /// All cards for the project, flat; in-column order is vector order
    pub cards: Vec<Card>,
}

impl BoardState {
    /// Build board state from a server query result. Cards sort by their
    /// fractional rank (ties by id); after this, vector order is
    /// authoritative until the next seed.
    pub fn seeded(columns: Vec<Column>, mut cards: Vec<Card>) -> Self {
        cards.sort_by(|a, b| {
            a.rank
                .partial_cmp(&b.rank)
                .unwrap_or(Ordering::Equal)
                .then(a.id.cmp(&b.id))
        });
        Self { columns, cards }
    }
}

/// Type alias for the store
pub type BoardStore = Store<BoardState>;

/// Get the board store from context
pub fn use_board_store() -> BoardStore {
    expect_context::<BoardStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Replace both collections wholesale from a fresh query result
pub fn store_seed(store: &BoardStore, columns: Vec<Column>, cards: Vec<Card>) {
    let next = BoardState::seeded(columns, cards);
    store.columns().set(next.columns);
    store.cards().set(next.cards);
}

/// Tracked card read for reactive derivations
pub fn store_cards(store: &BoardStore) -> Vec<Card> {
    store.cards().get()
}

/// Tracked column read for reactive derivations
pub fn store_columns(store: &BoardStore) -> Vec<Column> {
    store.columns().get()
}

/// Untracked reads for event handlers
pub fn store_cards_untracked(store: &BoardStore) -> Vec<Card> {
    store.cards().get_untracked()
}

pub fn store_columns_untracked(store: &BoardStore) -> Vec<Column> {
    store.columns().get_untracked()
}

/// Optimistic synchronous card mutation (interaction layer only)
pub fn store_update_cards<R>(store: &BoardStore, f: impl FnOnce(&mut Vec<Card>) -> R) -> R {
    f(&mut store.cards().write())
}

/// Optimistic synchronous column mutation (interaction layer only)
pub fn store_update_columns<R>(store: &BoardStore, f: impl FnOnce(&mut Vec<Column>) -> R) -> R {
    f(&mut store.columns().write())
}
