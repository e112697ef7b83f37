//! Leptos Sortable Board Sensors
//!
//! Pointer, touch, and keyboard sensors for sortable card boards.
//! Uses movement threshold to distinguish click from drag. Every backend
//! reports the same `SortTarget` intents, so the consumer runs one move
//! algorithm regardless of input modality.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// What is being dragged, or what the gesture is currently over
#[derive(Clone, Debug, PartialEq)]
pub enum SortTarget {
    /// A card, by id
    Card(u32),
    /// A column body or header, by column id
    Column(String),
}

/// Sensor backends available to a board. Selected by the consumer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SensorBackend {
    Pointer,
    Touch,
}

/// Callbacks shared by every backend
#[derive(Clone, Copy)]
pub struct SortHandlers {
    /// Threshold exceeded, gesture begins
    pub on_start: Callback<SortTarget>,
    /// Gesture moved over a new card or column
    pub on_over: Callback<SortTarget>,
    /// Gesture released; carries the entity that was being dragged
    pub on_drop: Callback<SortTarget>,
    /// Gesture abandoned (Escape, touchcancel); carries the dragged entity
    pub on_cancel: Callback<SortTarget>,
}

/// Sensor state signals
#[derive(Clone, Copy)]
pub struct SortableSignals {
    pub dragging_read: ReadSignal<Option<SortTarget>>,
    pub dragging_write: WriteSignal<Option<SortTarget>>,
    /// Pending entity (pointer/touch down but not yet past threshold)
    pub pending_read: ReadSignal<Option<SortTarget>>,
    pub pending_write: WriteSignal<Option<SortTarget>>,
    /// Last target reported to `on_over`, for touch-move deduplication
    pub last_over_read: ReadSignal<Option<SortTarget>>,
    pub last_over_write: WriteSignal<Option<SortTarget>>,
    /// Start position for movement detection
    pub start_x_read: ReadSignal<i32>,
    pub start_x_write: WriteSignal<i32>,
    pub start_y_read: ReadSignal<i32>,
    pub start_y_write: WriteSignal<i32>,
}

/// Movement threshold in pixels to start dragging
const DRAG_THRESHOLD_PX: i32 = 5;

pub fn create_sortable_signals() -> SortableSignals {
    let (dragging_read, dragging_write) = signal(None::<SortTarget>);
    let (pending_read, pending_write) = signal(None::<SortTarget>);
    let (last_over_read, last_over_write) = signal(None::<SortTarget>);
    let (start_x_read, start_x_write) = signal(0i32);
    let (start_y_read, start_y_write) = signal(0i32);
    SortableSignals {
        dragging_read,
        dragging_write,
        pending_read,
        pending_write,
        last_over_read,
        last_over_write,
        start_x_read,
        start_x_write,
        start_y_read,
        start_y_write,
    }
}

/// Card id currently being dragged, if any
pub fn dragging_card(sig: &SortableSignals) -> Option<u32> {
    match sig.dragging_read.get_untracked() {
        Some(SortTarget::Card(id)) => Some(id),
        _ => None,
    }
}

/// Column id currently being dragged, if any
pub fn dragging_column(sig: &SortableSignals) -> Option<String> {
    match sig.dragging_read.get_untracked() {
        Some(SortTarget::Column(id)) => Some(id),
        _ => None,
    }
}

/// End drag operation, clearing all sensor state
pub fn end_drag(sig: &SortableSignals) {
    sig.dragging_write.set(None);
    sig.pending_write.set(None);
    sig.last_over_write.set(None);
}

fn record_pending(sig: &SortableSignals, entity: SortTarget, x: i32, y: i32) {
    sig.pending_write.set(Some(entity));
    sig.start_x_write.set(x);
    sig.start_y_write.set(y);
}

/// What a release does with the in-flight gesture
#[derive(Clone, Debug, PartialEq)]
pub enum Release {
    Drop(SortTarget),
    Cancel(SortTarget),
}

/// Decide the release outcome: a drop needs a recognized target under the
/// release point; lifting outside the board abandons the gesture instead of
/// committing it. `None` when no gesture was in flight (a plain click/tap).
pub fn release(dragging: Option<SortTarget>, under_point: Option<SortTarget>) -> Option<Release> {
    let entity = dragging?;
    Some(match under_point {
        Some(_) => Release::Drop(entity),
        None => Release::Cancel(entity),
    })
}

/// Hit-test the element under a point and climb to the nearest card or
/// column marker attribute.
fn target_under_point(x: i32, y: i32) -> Option<SortTarget> {
    let doc = web_sys::window()?.document()?;
    let el = doc.element_from_point(x as f32, y as f32)?;
    if let Ok(Some(card)) = el.closest("[data-card-id]") {
        if let Some(id) = card.get_attribute("data-card-id").and_then(|v| v.parse().ok()) {
            return Some(SortTarget::Card(id));
        }
    }
    if let Ok(Some(col)) = el.closest("[data-column-id]") {
        if let Some(id) = col.get_attribute("data-column-id") {
            return Some(SortTarget::Column(id));
        }
    }
    None
}

/// Promote a pending entity to dragging once the threshold is exceeded.
/// Returns the entity that started dragging, if the promotion happened.
fn try_start_drag(sig: &SortableSignals, x: i32, y: i32) -> Option<SortTarget> {
    let pending = sig.pending_read.get_untracked()?;
    if sig.dragging_read.get_untracked().is_some() {
        return None;
    }
    let dx = (x - sig.start_x_read.get_untracked()).abs();
    let dy = (y - sig.start_y_read.get_untracked()).abs();
    if dx > DRAG_THRESHOLD_PX || dy > DRAG_THRESHOLD_PX {
        sig.dragging_write.set(Some(pending.clone()));
        Some(pending)
    } else {
        None
    }
}

// ========================
// Pointer backend
// ========================

/// Create mousedown handler for draggable cards.
/// Records pending drag with start position.
pub fn make_on_card_mousedown(sig: SortableSignals, card_id: u32) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |ev: web_sys::MouseEvent| {
        if ev.button() == 0 {
            // Ignore if target is input or button
            if let Some(target) = ev.target() {
                if target.dyn_ref::<web_sys::HtmlInputElement>().is_some() { return; }
                if target.dyn_ref::<web_sys::HtmlButtonElement>().is_some() { return; }
            }
            record_pending(&sig, SortTarget::Card(card_id), ev.client_x(), ev.client_y());
        }
    }
}

/// Create mousedown handler for column headers (column reorder)
pub fn make_on_column_mousedown(sig: SortableSignals, column_id: String) -> impl Fn(web_sys::MouseEvent) + Clone + 'static {
    move |ev: web_sys::MouseEvent| {
        if ev.button() == 0 {
            record_pending(&sig, SortTarget::Column(column_id.clone()), ev.client_x(), ev.client_y());
        }
    }
}

/// Create mouseenter handler for cards. Reports an over intent while a
/// different card is being dragged.
pub fn make_on_card_enter(sig: SortableSignals, card_id: u32, handlers: SortHandlers) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if let Some(dragging) = dragging_card(&sig) {
            // Don't report hovering over self
            if dragging != card_id {
                let target = SortTarget::Card(card_id);
                sig.last_over_write.set(Some(target.clone()));
                handlers.on_over.run(target);
            }
        }
    }
}

/// Create mouseenter handler for columns. Reports an over intent for both
/// card drags (insert at top) and column drags (reorder).
pub fn make_on_column_enter(sig: SortableSignals, column_id: String, handlers: SortHandlers) -> impl Fn(web_sys::MouseEvent) + Clone + 'static {
    move |_ev: web_sys::MouseEvent| {
        let over_self = dragging_column(&sig).as_deref() == Some(column_id.as_str());
        if sig.dragging_read.get_untracked().is_some() && !over_self {
            let target = SortTarget::Column(column_id.clone());
            sig.last_over_write.set(Some(target.clone()));
            handlers.on_over.run(target);
        }
    }
}

/// Bind global mousemove/mouseup/keydown for the pointer backend
fn bind_pointer_backend(sig: SortableSignals, handlers: SortHandlers) {
    use wasm_bindgen::closure::Closure;

    let on_mousemove = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
        if let Some(entity) = try_start_drag(&sig, ev.client_x(), ev.client_y()) {
            handlers.on_start.run(entity);
        }
    });

    let on_mouseup = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
        let dragging = sig.dragging_read.get_untracked();
        end_drag(&sig);
        match release(dragging, target_under_point(ev.client_x(), ev.client_y())) {
            Some(Release::Drop(entity)) => handlers.on_drop.run(entity),
            Some(Release::Cancel(entity)) => handlers.on_cancel.run(entity),
            // Plain click; nothing to do
            None => {}
        }
    });

    if let Some(win) = web_sys::window() {
        if let Some(doc) = win.document() {
            let _ = doc.add_event_listener_with_callback("mousemove", on_mousemove.as_ref().unchecked_ref());
            let _ = doc.add_event_listener_with_callback("mouseup", on_mouseup.as_ref().unchecked_ref());
        }
    }
    on_mousemove.forget();
    on_mouseup.forget();
}

// ========================
// Touch backend
// ========================

/// Create touchstart handler for draggable cards
pub fn make_on_card_touchstart(sig: SortableSignals, card_id: u32) -> impl Fn(web_sys::TouchEvent) + Copy + 'static {
    move |ev: web_sys::TouchEvent| {
        if let Some(touch) = ev.touches().get(0) {
            record_pending(&sig, SortTarget::Card(card_id), touch.client_x(), touch.client_y());
        }
    }
}

/// Create touchstart handler for column headers
pub fn make_on_column_touchstart(sig: SortableSignals, column_id: String) -> impl Fn(web_sys::TouchEvent) + Clone + 'static {
    move |ev: web_sys::TouchEvent| {
        if let Some(touch) = ev.touches().get(0) {
            record_pending(&sig, SortTarget::Column(column_id.clone()), touch.client_x(), touch.client_y());
        }
    }
}

/// Bind global touchmove/touchend/touchcancel for the touch backend.
/// Touch events keep targeting the element the gesture started on, so over
/// detection hit-tests the point under the finger instead.
fn bind_touch_backend(sig: SortableSignals, handlers: SortHandlers) {
    use wasm_bindgen::closure::Closure;

    let on_touchmove = Closure::<dyn FnMut(web_sys::TouchEvent)>::new(move |ev: web_sys::TouchEvent| {
        let touch = match ev.touches().get(0) {
            Some(t) => t,
            None => return,
        };
        if let Some(entity) = try_start_drag(&sig, touch.client_x(), touch.client_y()) {
            handlers.on_start.run(entity);
        }
        let dragging = sig.dragging_read.get_untracked();
        if dragging.is_none() {
            return;
        }
        ev.prevent_default();
        let Some(target) = target_under_point(touch.client_x(), touch.client_y()) else {
            // Finger left the board; forget the last target so lifting here
            // abandons the gesture
            sig.last_over_write.set(None);
            return;
        };
        // Skip self and repeated reports of the same target
        if Some(&target) == dragging.as_ref() || Some(&target) == sig.last_over_read.get_untracked().as_ref() {
            return;
        }
        sig.last_over_write.set(Some(target.clone()));
        handlers.on_over.run(target);
    });

    let on_touchend = Closure::<dyn FnMut(web_sys::TouchEvent)>::new(move |ev: web_sys::TouchEvent| {
        let dragging = sig.dragging_read.get_untracked();
        end_drag(&sig);
        let under_point = ev
            .changed_touches()
            .get(0)
            .and_then(|t| target_under_point(t.client_x(), t.client_y()));
        match release(dragging, under_point) {
            Some(Release::Drop(entity)) => handlers.on_drop.run(entity),
            Some(Release::Cancel(entity)) => handlers.on_cancel.run(entity),
            None => {}
        }
    });

    let on_touchcancel = Closure::<dyn FnMut(web_sys::TouchEvent)>::new(move |_ev: web_sys::TouchEvent| {
        let dragging = sig.dragging_read.get_untracked();
        end_drag(&sig);
        if let Some(entity) = dragging {
            handlers.on_cancel.run(entity);
        }
    });

    if let Some(win) = web_sys::window() {
        if let Some(doc) = win.document() {
            let _ = doc.add_event_listener_with_callback("touchmove", on_touchmove.as_ref().unchecked_ref());
            let _ = doc.add_event_listener_with_callback("touchend", on_touchend.as_ref().unchecked_ref());
            let _ = doc.add_event_listener_with_callback("touchcancel", on_touchcancel.as_ref().unchecked_ref());
        }
    }
    on_touchmove.forget();
    on_touchend.forget();
    on_touchcancel.forget();
}

// ========================
// Backend wiring
// ========================

/// Bind the selected backends plus the global Escape handler.
/// At most one gesture can be active at a time: `try_start_drag` refuses to
/// promote a pending entity while another drag is in flight.
pub fn bind_backends(sig: SortableSignals, backends: &[SensorBackend], handlers: SortHandlers) {
    use wasm_bindgen::closure::Closure;

    for backend in backends {
        match backend {
            SensorBackend::Pointer => bind_pointer_backend(sig, handlers),
            SensorBackend::Touch => bind_touch_backend(sig, handlers),
        }
    }

    // Escape cancels an in-flight pointer/touch gesture
    let on_keydown = Closure::<dyn FnMut(web_sys::KeyboardEvent)>::new(move |ev: web_sys::KeyboardEvent| {
        if ev.key() != "Escape" {
            return;
        }
        let dragging = sig.dragging_read.get_untracked();
        if let Some(entity) = dragging {
            end_drag(&sig);
            handlers.on_cancel.run(entity);
        }
    });
    if let Some(win) = web_sys::window() {
        if let Some(doc) = win.document() {
            let _ = doc.add_event_listener_with_callback("keydown", on_keydown.as_ref().unchecked_ref());
        }
    }
    on_keydown.forget();
}

// ========================
// Keyboard modality
// ========================

/// Arrow direction for keyboard moves
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arrow {
    Up,
    Down,
    Left,
    Right,
}

/// Discrete keyboard intent on a focused card
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyIntent {
    PickUp,
    Move(Arrow),
    Commit,
    Cancel,
}

/// Map a keydown on a focused card to a sort intent.
/// `picked_up` selects between pick-up and commit for Space; arrow keys and
/// Escape only apply while a card is picked up.
pub fn key_intent(key: &str, picked_up: bool) -> Option<KeyIntent> {
    match key {
        " " if !picked_up => Some(KeyIntent::PickUp),
        " " | "Enter" if picked_up => Some(KeyIntent::Commit),
        "Escape" if picked_up => Some(KeyIntent::Cancel),
        "ArrowUp" if picked_up => Some(KeyIntent::Move(Arrow::Up)),
        "ArrowDown" if picked_up => Some(KeyIntent::Move(Arrow::Down)),
        "ArrowLeft" if picked_up => Some(KeyIntent::Move(Arrow::Left)),
        "ArrowRight" if picked_up => Some(KeyIntent::Move(Arrow::Right)),
        _ => None,
    }
}
