//! HTTP client for the taskman task service.
//!
//! All persistence lives on the server; this client issues one request per
//! user action and reports the outcome as an [`ApiEvent`]. Requests carry no
//! retry or timeout policy beyond what `reqwest` defaults to.

use reqwest::StatusCode;

use crate::task::{Draft, Task};

/// Where the task service listens. Fixed at build time.
pub const BASE_URL: &str = "http://localhost:8080/taskman/tasks";

/// Why a request against the task service failed.
#[derive(Debug, thiserror::Error)]
pub enum RemoteFailure {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server returned {0}")]
    Status(StatusCode),
}

/// Outcome of one in-flight request, delivered back to the UI loop.
#[derive(Debug)]
pub enum ApiEvent {
    Loaded(Result<Vec<Task>, RemoteFailure>),
    Created(Result<Task, RemoteFailure>),
    Deleted(u64, Result<(), RemoteFailure>),
    Updated(Result<Task, RemoteFailure>),
}

/// Thin wrapper over a shared `reqwest::Client`, cloned into each spawned
/// request future.
#[derive(Debug, Clone)]
pub struct TaskApi {
    client: reqwest::Client,
    base_url: String,
}

impl TaskApi {
    pub fn new() -> Self {
        Self::with_base_url(BASE_URL)
    }

    /// Point the client at a different service root. Tests use this to talk
    /// to a local mock server.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Fetch every task, in the order the server returns them.
    pub async fn list(&self) -> Result<Vec<Task>, RemoteFailure> {
        let response = self.client.get(&self.base_url).send().await?;
        if !response.status().is_success() {
            return Err(RemoteFailure::Status(response.status()));
        }
        Ok(response.json().await?)
    }

    /// Submit a draft; the server answers with the stored task, id assigned.
    pub async fn create(&self, draft: &Draft) -> Result<Task, RemoteFailure> {
        let response = self.client.post(&self.base_url).json(draft).send().await?;
        if !response.status().is_success() {
            return Err(RemoteFailure::Status(response.status()));
        }
        Ok(response.json().await?)
    }

    /// Delete by id. The response body, if any, is ignored.
    pub async fn delete(&self, id: u64) -> Result<(), RemoteFailure> {
        let url = format!("{}/{}", self.base_url, id);
        let response = self.client.delete(&url).send().await?;
        if !response.status().is_success() {
            return Err(RemoteFailure::Status(response.status()));
        }
        Ok(())
    }

    /// Replace the stored task with `task`, addressed by its id.
    pub async fn update(&self, task: &Task) -> Result<Task, RemoteFailure> {
        let url = format!("{}/{}", self.base_url, task.id);
        let response = self.client.put(&url).json(task).send().await?;
        if !response.status().is_success() {
            return Err(RemoteFailure::Status(response.status()));
        }
        Ok(response.json().await?)
    }
}

impl Default for TaskApi {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Status;
    use mockito::Matcher;

    fn sample_task() -> Task {
        Task {
            id: 7,
            title: "Water the plants".into(),
            description: "".into(),
            due_date: "2025-09-01".into(),
            status: Status::Pending,
        }
    }

    #[tokio::test]
    async fn list_decodes_tasks_in_server_order() {
        let mut server = mockito::Server::new_async().await;
        let body = r#"[
            {"id":2,"title":"Second","status":"PENDING"},
            {"id":1,"title":"First","status":"COMPLETED"}
        ]"#;
        let mock = server
            .mock("GET", "/taskman/tasks")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await;

        let api = TaskApi::with_base_url(format!("{}/taskman/tasks", server.url()));
        let tasks = api.list().await.unwrap();

        mock.assert_async().await;
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].id, 2);
        assert_eq!(tasks[1].id, 1);
    }

    #[tokio::test]
    async fn list_reports_non_success_statuses() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/taskman/tasks")
            .with_status(500)
            .create_async()
            .await;

        let api = TaskApi::with_base_url(format!("{}/taskman/tasks", server.url()));
        match api.list().await {
            Err(RemoteFailure::Status(code)) => assert_eq!(code.as_u16(), 500),
            other => panic!("expected status failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn create_posts_the_draft_as_camel_case_json() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/taskman/tasks")
            .match_body(Matcher::Json(serde_json::json!({
                "title": "Buy milk",
                "description": "",
                "dueDate": "2025-09-01"
            })))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id":11,"title":"Buy milk","dueDate":"2025-09-01","status":"PENDING"}"#)
            .create_async()
            .await;

        let draft = Draft {
            title: "Buy milk".into(),
            description: "".into(),
            due_date: "2025-09-01".into(),
        };
        let api = TaskApi::with_base_url(format!("{}/taskman/tasks", server.url()));
        let created = api.create(&draft).await.unwrap();

        mock.assert_async().await;
        assert_eq!(created.id, 11);
        assert_eq!(created.status, Status::Pending);
    }

    #[tokio::test]
    async fn delete_targets_the_task_id_path() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("DELETE", "/taskman/tasks/7")
            .with_status(204)
            .create_async()
            .await;

        let api = TaskApi::with_base_url(format!("{}/taskman/tasks", server.url()));
        api.delete(7).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn update_puts_the_full_task_body() {
        let mut server = mockito::Server::new_async().await;
        let task = Task {
            status: Status::Completed,
            ..sample_task()
        };
        let mock = server
            .mock("PUT", "/taskman/tasks/7")
            .match_body(Matcher::Json(serde_json::to_value(&task).unwrap()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(serde_json::to_string(&task).unwrap())
            .create_async()
            .await;

        let api = TaskApi::with_base_url(format!("{}/taskman/tasks", server.url()));
        let updated = api.update(&task).await.unwrap();

        mock.assert_async().await;
        assert_eq!(updated.status, Status::Completed);
    }

    #[tokio::test]
    async fn unreachable_hosts_surface_as_transport_failures() {
        let api = TaskApi::with_base_url("http://127.0.0.1:1/taskman/tasks");
        match api.list().await {
            Err(RemoteFailure::Transport(_)) => {}
            other => panic!("expected transport failure, got {:?}", other),
        }
    }
}
