//! REST API Client
//!
//! Thin async wrappers over the two task endpoints the board consumes, plus
//! task creation. The session is injected explicitly at construction; there
//! is no ambient auth state, and a missing token fails before any request.

use gloo_net::http::Request;
use serde::Serialize;
use thiserror::Error;

use crate::models::{Card, Session};

/// Page size for the task query
pub const TASK_PAGE_SIZE: u32 = 200;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("no authenticated session")]
    MissingSession,
    #[error("network error: {0}")]
    Network(String),
    #[error("server returned status {0}")]
    Http(u16),
    #[error("malformed response: {0}")]
    Decode(String),
}

// ========================
// Request Body Structs
// ========================

#[derive(Serialize)]
pub struct MoveTaskArgs<'a> {
    pub status: &'a str,
    /// Zero-based index among siblings in the destination column
    pub position: usize,
}

#[derive(Serialize)]
pub struct CreateTaskArgs<'a> {
    pub name: &'a str,
    pub status: &'a str,
}

/// Client over the task endpoints, scoped to one session/project
#[derive(Clone)]
pub struct ApiClient {
    base: String,
    session: Session,
}

impl ApiClient {
    pub fn new(base: impl Into<String>, session: Session) -> Self {
        let base = base.into().trim_end_matches('/').to_string();
        Self { base, session }
    }

    fn bearer(&self) -> Result<String, ApiError> {
        if self.session.token.is_empty() {
            return Err(ApiError::MissingSession);
        }
        Ok(format!("Bearer {}", self.session.token))
    }

    fn tasks_url(&self) -> String {
        format!(
            "{}/api/projects/{}/tasks?sort=rank&order=asc&page_size={}",
            self.base, self.session.project_id, TASK_PAGE_SIZE
        )
    }

    fn move_url(&self, task_id: u32) -> String {
        format!("{}/api/tasks/{}/position", self.base, task_id)
    }

    fn create_url(&self) -> String {
        format!("{}/api/projects/{}/tasks", self.base, self.session.project_id)
    }

    /// Fetch the project's tasks, ordered by rank (board seed query)
    pub async fn fetch_tasks(&self) -> Result<Vec<Card>, ApiError> {
        let auth = self.bearer()?;
        let resp = Request::get(&self.tasks_url())
            .header("Authorization", &auth)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        if !resp.ok() {
            return Err(ApiError::Http(resp.status()));
        }
        resp.json::<Vec<Card>>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Persist a committed move. Fired once per gesture, never on
    /// intermediate over events.
    pub async fn move_task(&self, task_id: u32, status: &str, position: usize) -> Result<(), ApiError> {
        let auth = self.bearer()?;
        let resp = Request::patch(&self.move_url(task_id))
            .header("Authorization", &auth)
            .json(&MoveTaskArgs { status, position })
            .map_err(|e| ApiError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        if !resp.ok() {
            return Err(ApiError::Http(resp.status()));
        }
        Ok(())
    }

    /// Create a task in the given column
    pub async fn create_task(&self, name: &str, status: &str) -> Result<Card, ApiError> {
        let auth = self.bearer()?;
        let resp = Request::post(&self.create_url())
            .header("Authorization", &auth)
            .json(&CreateTaskArgs { name, status })
            .map_err(|e| ApiError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        if !resp.ok() {
            return Err(ApiError::Http(resp.status()));
        }
        resp.json::<Card>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(token: &str) -> ApiClient {
        ApiClient::new(
            "https://example.test/",
            Session { token: token.to_string(), project_id: 42 },
        )
    }

    #[test]
    fn test_missing_token_fails_before_request() {
        assert_eq!(client("").bearer(), Err(ApiError::MissingSession));
        assert_eq!(client("t0ken").bearer(), Ok("Bearer t0ken".to_string()));
    }

    #[test]
    fn test_urls_scope_to_project() {
        let c = client("t");
        assert_eq!(
            c.tasks_url(),
            "https://example.test/api/projects/42/tasks?sort=rank&order=asc&page_size=200"
        );
        assert_eq!(c.move_url(7), "https://example.test/api/tasks/7/position");
        assert_eq!(c.create_url(), "https://example.test/api/projects/42/tasks");
    }

    #[test]
    fn test_move_body_shape() {
        let body = serde_json::to_value(MoveTaskArgs { status: "in_progress", position: 1 }).unwrap();
        assert_eq!(body, serde_json::json!({ "status": "in_progress", "position": 1 }));
    }
}
