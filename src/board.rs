//! Board Reordering Core
//!
//! Pure move algorithms over the flat card vector, shared by the pointer,
//! touch, and keyboard modalities, plus the explicit gesture state machine.
//! Column membership is the card's `status`; order within a column is the
//! relative order of the flat vector.

use crate::models::{Card, Column};

/// Keyboard move direction
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// A card's position: owning column id and zero-based index among siblings
#[derive(Clone, Debug, PartialEq)]
pub struct CardSlot {
    pub status: String,
    pub index: usize,
}

/// Drag lifecycle. One gesture at a time; the origin snapshot makes
/// cancel-revert a plain move back to the recorded slot.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    DraggingCard { id: u32, origin: CardSlot },
    DraggingColumn { id: String, origin_index: usize },
}

impl GestureState {
    /// Enter Dragging for a card, snapshotting its current slot
    pub fn pick_up_card(cards: &[Card], id: u32) -> Option<GestureState> {
        card_slot(cards, id).map(|origin| GestureState::DraggingCard { id, origin })
    }

    /// Enter Dragging for a column, snapshotting its current index
    pub fn pick_up_column(columns: &[Column], id: &str) -> Option<GestureState> {
        columns
            .iter()
            .position(|c| c.id == id)
            .map(|origin_index| GestureState::DraggingColumn { id: id.to_string(), origin_index })
    }

    pub fn is_dragging(&self) -> bool {
        !matches!(self, GestureState::Idle)
    }

    pub fn dragging_card_id(&self) -> Option<u32> {
        match self {
            GestureState::DraggingCard { id, .. } => Some(*id),
            _ => None,
        }
    }

    /// Revert a dragged card to its recorded origin slot. No-op unless a
    /// card gesture is in flight.
    pub fn revert_card(&self, cards: &mut Vec<Card>) -> bool {
        match self {
            GestureState::DraggingCard { id, origin } => {
                move_card_to_column(cards, *id, &origin.status, origin.index)
            }
            _ => false,
        }
    }

    /// Revert a dragged column to its recorded origin index
    pub fn revert_column(&self, columns: &mut Vec<Column>) -> bool {
        match self {
            GestureState::DraggingColumn { id, origin_index } => {
                move_column_to_index(columns, id, *origin_index)
            }
            _ => false,
        }
    }
}

/// What a completed card gesture persists: the dragged id and its final
/// slot. `None` for column gestures (local-only) and for a card that ended
/// back in its origin slot, which commits nothing.
pub fn commit_slot(gesture: &GestureState, cards: &[Card]) -> Option<(u32, CardSlot)> {
    let GestureState::DraggingCard { id, origin } = gesture else { return None };
    let slot = card_slot(cards, *id)?;
    if slot == *origin {
        return None;
    }
    Some((*id, slot))
}

/// Locate a card: its status and zero-based index within its column
pub fn card_slot(cards: &[Card], id: u32) -> Option<CardSlot> {
    let status = cards.iter().find(|c| c.id == id)?.status.clone();
    let index = cards
        .iter()
        .filter(|c| c.status == status)
        .position(|c| c.id == id)?;
    Some(CardSlot { status, index })
}

/// Number of cards in a column
pub fn column_len(cards: &[Card], column_id: &str) -> usize {
    cards.iter().filter(|c| c.status == column_id).count()
}

/// Drag-over primitive: move `active` relative to the hovered card.
/// Same column: standard array move to the target's index. Different column:
/// reassign status, then insert immediately before the hovered card.
/// Self-drop and unknown ids are no-ops.
pub fn move_card_over_card(cards: &mut Vec<Card>, active_id: u32, over_id: u32) -> bool {
    if active_id == over_id {
        return false;
    }
    let Some(ai) = cards.iter().position(|c| c.id == active_id) else { return false };
    let Some(oi) = cards.iter().position(|c| c.id == over_id) else { return false };
    let over_status = cards[oi].status.clone();
    if cards[ai].status == over_status {
        let card = cards.remove(ai);
        cards.insert(oi.min(cards.len()), card);
    } else {
        let mut card = cards.remove(ai);
        card.status = over_status;
        let at = cards.iter().position(|c| c.id == over_id).unwrap_or(cards.len());
        cards.insert(at, card);
    }
    true
}

/// Move `active` into `column_id` at in-column slot `index` (counted with the
/// card itself removed, i.e. insert before the sibling occupying that slot).
/// `index` is clamped to the column length; status is reassigned here.
pub fn move_card_to_column(cards: &mut Vec<Card>, active_id: u32, column_id: &str, index: usize) -> bool {
    let Some(ai) = cards.iter().position(|c| c.id == active_id) else { return false };
    let mut card = cards.remove(ai);
    card.status = column_id.to_string();
    let flat: Vec<usize> = cards
        .iter()
        .enumerate()
        .filter(|(_, c)| c.status == column_id)
        .map(|(i, _)| i)
        .collect();
    let slot = index.min(flat.len());
    let at = if slot < flat.len() {
        flat[slot]
    } else {
        flat.last().map(|i| i + 1).unwrap_or(cards.len())
    };
    cards.insert(at, card);
    true
}

/// Over event on a column body or header: place the card at the top of that
/// lane. No-op when the card is already in the column, so hovering its own
/// lane never reorders it.
pub fn move_card_into_column(cards: &mut Vec<Card>, active_id: u32, column_id: &str) -> bool {
    match card_slot(cards, active_id) {
        Some(slot) if slot.status == column_id => false,
        Some(_) => move_card_to_column(cards, active_id, column_id, 0),
        None => false,
    }
}

/// Reorder columns: move `active` to the hovered column's index.
/// Local-only; column order is never persisted.
pub fn move_column(columns: &mut Vec<Column>, active_id: &str, over_id: &str) -> bool {
    if active_id == over_id {
        return false;
    }
    let Some(ai) = columns.iter().position(|c| c.id == active_id) else { return false };
    let Some(oi) = columns.iter().position(|c| c.id == over_id) else { return false };
    let col = columns.remove(ai);
    columns.insert(oi.min(columns.len()), col);
    true
}

/// Move a column to an absolute index (used for cancel-revert)
pub fn move_column_to_index(columns: &mut Vec<Column>, id: &str, index: usize) -> bool {
    let Some(ai) = columns.iter().position(|c| c.id == id) else { return false };
    let col = columns.remove(ai);
    columns.insert(index.min(columns.len()), col);
    true
}

/// Keyboard step: one slot up/down within the column (clamped, no wrap), or
/// to the adjacent column (clamped) preserving as much of the relative index
/// as fits. Returns false when the move hits a boundary.
pub fn nudge_card(columns: &[Column], cards: &mut Vec<Card>, id: u32, dir: Direction) -> bool {
    let Some(slot) = card_slot(cards, id) else { return false };
    match dir {
        Direction::Up => {
            if slot.index == 0 {
                return false;
            }
            move_card_to_column(cards, id, &slot.status, slot.index - 1)
        }
        Direction::Down => {
            if slot.index + 1 >= column_len(cards, &slot.status) {
                return false;
            }
            move_card_to_column(cards, id, &slot.status, slot.index + 1)
        }
        Direction::Left | Direction::Right => {
            let Some(ci) = columns.iter().position(|c| c.id == slot.status) else { return false };
            let ni = match dir {
                Direction::Left => {
                    let Some(ni) = ci.checked_sub(1) else { return false };
                    ni
                }
                _ => {
                    if ci + 1 >= columns.len() {
                        return false;
                    }
                    ci + 1
                }
            };
            let dest = columns[ni].id.clone();
            let dest_len = column_len(cards, &dest);
            move_card_to_column(cards, id, &dest, slot.index.min(dest_len))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::default_columns;

    fn make_card(id: u32, status: &str, rank: f64) -> Card {
        Card {
            id,
            name: format!("Task {}", id),
            description: None,
            status: status.to_string(),
            rank,
            assignee: None,
            due_date: None,
        }
    }

    /// todo: [1, 2, 3], in_progress: [4, 5], done: []
    fn make_board() -> (Vec<Column>, Vec<Card>) {
        let cards = vec![
            make_card(1, "todo", 1.0),
            make_card(2, "todo", 2.0),
            make_card(3, "todo", 3.0),
            make_card(4, "in_progress", 1.0),
            make_card(5, "in_progress", 2.0),
        ];
        (default_columns(), cards)
    }

    fn column_order(cards: &[Card], column_id: &str) -> Vec<u32> {
        cards.iter().filter(|c| c.status == column_id).map(|c| c.id).collect()
    }

    /// Status invariant and index bounds, checked after every move in these tests
    fn assert_invariants(columns: &[Column], cards: &[Card]) {
        for card in cards {
            assert!(
                columns.iter().any(|c| c.id == card.status),
                "card {} has unknown status {}",
                card.id,
                card.status
            );
            let slot = card_slot(cards, card.id).unwrap();
            assert_eq!(slot.status, card.status);
            assert!(slot.index < column_len(cards, &card.status));
        }
    }

    #[test]
    fn test_same_column_move_down() {
        let (columns, mut cards) = make_board();
        assert!(move_card_over_card(&mut cards, 1, 3));
        assert_eq!(column_order(&cards, "todo"), vec![2, 3, 1]);
        assert_eq!(column_order(&cards, "in_progress"), vec![4, 5]);
        assert_invariants(&columns, &cards);
    }

    #[test]
    fn test_same_column_move_up() {
        let (columns, mut cards) = make_board();
        assert!(move_card_over_card(&mut cards, 3, 1));
        assert_eq!(column_order(&cards, "todo"), vec![3, 1, 2]);
        assert_invariants(&columns, &cards);
    }

    #[test]
    fn test_cross_column_over_card_updates_status() {
        let (columns, mut cards) = make_board();
        assert!(move_card_over_card(&mut cards, 2, 5));
        assert_eq!(column_order(&cards, "todo"), vec![1, 3]);
        assert_eq!(column_order(&cards, "in_progress"), vec![4, 2, 5]);
        assert_eq!(card_slot(&cards, 2).unwrap(), CardSlot { status: "in_progress".to_string(), index: 1 });
        assert_invariants(&columns, &cards);
    }

    #[test]
    fn test_move_to_column_top() {
        let (columns, mut cards) = make_board();
        assert!(move_card_to_column(&mut cards, 3, "in_progress", 0));
        assert_eq!(column_order(&cards, "in_progress"), vec![3, 4, 5]);
        assert_eq!(cards.iter().find(|c| c.id == 3).unwrap().status, "in_progress");
        assert_invariants(&columns, &cards);
    }

    #[test]
    fn test_move_to_empty_column() {
        let (columns, mut cards) = make_board();
        assert!(move_card_to_column(&mut cards, 1, "done", 0));
        assert_eq!(column_order(&cards, "done"), vec![1]);
        assert_eq!(column_order(&cards, "todo"), vec![2, 3]);
        assert_invariants(&columns, &cards);
    }

    #[test]
    fn test_move_to_column_index_clamped() {
        let (columns, mut cards) = make_board();
        assert!(move_card_to_column(&mut cards, 1, "in_progress", 99));
        assert_eq!(column_order(&cards, "in_progress"), vec![4, 5, 1]);
        assert_invariants(&columns, &cards);
    }

    #[test]
    fn test_self_drop_is_noop() {
        let (_, mut cards) = make_board();
        let before = cards.clone();
        assert!(!move_card_over_card(&mut cards, 2, 2));
        assert_eq!(cards, before);
    }

    #[test]
    fn test_unknown_ids_are_noops() {
        let (_, mut cards) = make_board();
        let before = cards.clone();
        assert!(!move_card_over_card(&mut cards, 99, 1));
        assert!(!move_card_over_card(&mut cards, 1, 99));
        assert!(!move_card_to_column(&mut cards, 99, "todo", 0));
        assert_eq!(cards, before);
    }

    #[test]
    fn test_nudge_within_column() {
        let (columns, mut cards) = make_board();
        assert!(nudge_card(&columns, &mut cards, 1, Direction::Down));
        assert_eq!(column_order(&cards, "todo"), vec![2, 1, 3]);
        assert!(nudge_card(&columns, &mut cards, 1, Direction::Up));
        assert_eq!(column_order(&cards, "todo"), vec![1, 2, 3]);
        assert_invariants(&columns, &cards);
    }

    #[test]
    fn test_nudge_clamps_at_boundaries() {
        let (columns, mut cards) = make_board();
        let before = cards.clone();
        // Top card can't go up, bottom card can't go down
        assert!(!nudge_card(&columns, &mut cards, 1, Direction::Up));
        assert!(!nudge_card(&columns, &mut cards, 3, Direction::Down));
        // Leftmost column can't go left, rightmost can't go right
        assert!(!nudge_card(&columns, &mut cards, 1, Direction::Left));
        assert!(move_card_to_column(&mut cards, 1, "done", 0));
        assert!(!nudge_card(&columns, &mut cards, 1, Direction::Right));
        assert!(nudge_card(&columns, &mut cards, 1, Direction::Left));
        assert!(move_card_to_column(&mut cards, 1, "todo", 0));
        assert_eq!(cards, before);
    }

    #[test]
    fn test_nudge_across_columns_preserves_index() {
        let (columns, mut cards) = make_board();
        // Card 2 is todo index 1; in_progress has two cards, index 1 fits
        assert!(nudge_card(&columns, &mut cards, 2, Direction::Right));
        assert_eq!(card_slot(&cards, 2).unwrap(), CardSlot { status: "in_progress".to_string(), index: 1 });
        // done is empty, index clamps to 0
        assert!(nudge_card(&columns, &mut cards, 2, Direction::Right));
        assert_eq!(card_slot(&cards, 2).unwrap(), CardSlot { status: "done".to_string(), index: 0 });
        assert_invariants(&columns, &cards);
    }

    #[test]
    fn test_keyboard_matches_pointer_for_same_destination() {
        // Pointer: drop card 2 into in_progress at slot 1 (enter column, then
        // drag down over card 4's successor position via over-card)
        let (columns, mut pointer_cards) = make_board();
        assert!(move_card_to_column(&mut pointer_cards, 2, "in_progress", 0));
        assert!(move_card_over_card(&mut pointer_cards, 2, 4));

        // Keyboard: one Right nudge from todo index 1 lands at the same slot
        let (_, mut key_cards) = make_board();
        assert!(nudge_card(&columns, &mut key_cards, 2, Direction::Right));

        assert_eq!(card_slot(&pointer_cards, 2), card_slot(&key_cards, 2));
        assert_eq!(column_order(&pointer_cards, "in_progress"), column_order(&key_cards, "in_progress"));
        assert_eq!(column_order(&pointer_cards, "todo"), column_order(&key_cards, "todo"));
    }

    #[test]
    fn test_cancel_reverts_to_origin() {
        let (columns, mut cards) = make_board();
        let before = cards.clone();
        let gesture = GestureState::pick_up_card(&cards, 2).unwrap();
        assert!(move_card_over_card(&mut cards, 2, 5));
        assert!(nudge_card(&columns, &mut cards, 2, Direction::Up));
        assert_ne!(cards, before);
        assert!(gesture.revert_card(&mut cards));
        assert_eq!(cards, before);
    }

    #[test]
    fn test_cancel_reverts_column_order() {
        let (mut columns, _) = make_board();
        let before = columns.clone();
        let gesture = GestureState::pick_up_column(&columns, "todo").unwrap();
        assert!(move_column(&mut columns, "todo", "done"));
        assert_ne!(columns, before);
        assert!(gesture.revert_column(&mut columns));
        assert_eq!(columns, before);
    }

    #[test]
    fn test_cancel_when_idle_is_noop() {
        let (mut columns, mut cards) = make_board();
        let before = cards.clone();
        assert!(!GestureState::Idle.revert_card(&mut cards));
        assert!(!GestureState::Idle.revert_column(&mut columns));
        assert_eq!(cards, before);
    }

    #[test]
    fn test_column_reorder() {
        let (mut columns, _) = make_board();
        assert!(move_column(&mut columns, "done", "todo"));
        let ids: Vec<&str> = columns.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["done", "todo", "in_progress"]);
        assert!(!move_column(&mut columns, "done", "done"));
    }

    #[test]
    fn test_one_commit_per_gesture_carries_final_slot() {
        let (columns, mut cards) = make_board();
        let gesture = GestureState::pick_up_card(&cards, 1).unwrap();
        // Several over events in one gesture; only the drop persists, and it
        // carries the final slot
        let mut persisted: Vec<(u32, CardSlot)> = Vec::new();
        assert!(move_card_over_card(&mut cards, 1, 4));
        assert!(nudge_card(&columns, &mut cards, 1, Direction::Down));
        assert!(move_card_to_column(&mut cards, 1, "done", 0));
        persisted.extend(commit_slot(&gesture, &cards));
        assert_eq!(persisted, vec![(1, CardSlot { status: "done".to_string(), index: 0 })]);
    }

    #[test]
    fn test_commit_skipped_when_card_unmoved() {
        let (columns, mut cards) = make_board();
        let gesture = GestureState::pick_up_card(&cards, 2).unwrap();
        // Never moved
        assert_eq!(commit_slot(&gesture, &cards), None);
        // Moved away and back to the origin slot
        assert!(nudge_card(&columns, &mut cards, 2, Direction::Down));
        assert!(nudge_card(&columns, &mut cards, 2, Direction::Up));
        assert_eq!(commit_slot(&gesture, &cards), None);
    }

    #[test]
    fn test_commit_slot_none_for_column_gesture() {
        let (columns, cards) = make_board();
        let gesture = GestureState::pick_up_column(&columns, "todo").unwrap();
        assert_eq!(commit_slot(&gesture, &cards), None);
        assert_eq!(commit_slot(&GestureState::Idle, &cards), None);
    }

    #[test]
    fn test_hovering_own_column_keeps_order() {
        let (columns, mut cards) = make_board();
        let before = cards.clone();
        // Card 3 already lives in todo; hovering the todo lane must not yank
        // it to the top
        assert!(!move_card_into_column(&mut cards, 3, "todo"));
        assert_eq!(cards, before);
        // A different lane still inserts at the top
        assert!(move_card_into_column(&mut cards, 3, "in_progress"));
        assert_eq!(column_order(&cards, "in_progress"), vec![3, 4, 5]);
        assert_invariants(&columns, &cards);
    }

    #[test]
    fn test_drop_between_columns_scenario() {
        // todo = [A, B], in_progress = [C]; drop B at in_progress index 1.
        let columns = default_columns();
        let mut cards = vec![
            make_card(10, "todo", 1.0),
            make_card(11, "todo", 2.0),
            make_card(12, "in_progress", 1.0),
        ];
        assert!(move_card_to_column(&mut cards, 11, "in_progress", 1));
        assert_eq!(column_order(&cards, "todo"), vec![10]);
        assert_eq!(column_order(&cards, "in_progress"), vec![12, 11]);
        let slot = card_slot(&cards, 11).unwrap();
        assert_eq!(slot, CardSlot { status: "in_progress".to_string(), index: 1 });
        assert_invariants(&columns, &cards);
    }

    #[test]
    fn test_pick_up_records_origin() {
        let (_, cards) = make_board();
        let gesture = GestureState::pick_up_card(&cards, 5).unwrap();
        assert_eq!(
            gesture,
            GestureState::DraggingCard {
                id: 5,
                origin: CardSlot { status: "in_progress".to_string(), index: 1 },
            }
        );
        assert!(gesture.is_dragging());
        assert_eq!(gesture.dragging_card_id(), Some(5));
        assert!(GestureState::pick_up_card(&cards, 99).is_none());
    }
}
