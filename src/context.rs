//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;

/// Board-wide signals provided via context
#[derive(Clone, Copy)]
pub struct BoardContext {
    /// Trigger to refetch tasks from the server - read
    pub reload_trigger: ReadSignal<u32>,
    /// Trigger to refetch tasks from the server - write
    set_reload_trigger: WriteSignal<u32>,
}

impl BoardContext {
    pub fn new(reload_trigger: (ReadSignal<u32>, WriteSignal<u32>)) -> Self {
        Self {
            reload_trigger: reload_trigger.0,
            set_reload_trigger: reload_trigger.1,
        }
    }

    /// Invalidate the task query; the seed effect refetches and reseeds
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }
}

pub fn use_board_context() -> BoardContext {
    expect_context::<BoardContext>()
}
