//! Frontend Models
//!
//! Data structures matching backend task records, plus board configuration.

use serde::{Deserialize, Serialize};

/// Task card (matches backend task record)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: u32,
    pub name: String,
    pub description: Option<String>,
    /// Always equals the id of the column containing the card
    pub status: String,
    /// Server ordering key, lower sorts first. Only consulted at seed time;
    /// between seeds the vector order is authoritative.
    pub rank: f64,
    #[serde(default)]
    pub assignee: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
}

/// Board lane. Static configuration: reorderable locally, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Doubles as the task status value
    pub id: String,
    pub title: String,
    pub color: Option<String>,
}

/// Authenticated session scope, injected explicitly (no ambient auth state)
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub project_id: u32,
}

/// Default column configuration for a project board
pub fn default_columns() -> Vec<Column> {
    vec![
        Column { id: "todo".to_string(), title: "To Do".to_string(), color: Some("#6b7280".to_string()) },
        Column { id: "in_progress".to_string(), title: "In Progress".to_string(), color: Some("#3b82f6".to_string()) },
        Column { id: "done".to_string(), title: "Done".to_string(), color: Some("#22c55e".to_string()) },
    ]
}
