//! Task endpoints

use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;
use tracing::{debug, info};

use crate::client::ApiClient;
use crate::Result;
use revman_core::{CreateTaskRequest, Task, TaskBackend, TaskState, UpdateAction};

#[derive(Serialize)]
struct UpdateBody {
    action: UpdateAction,
}

impl ApiClient {
    /// `GET /tasks/todo?state=N`: tasks the session user has to review
    pub async fn fetch_assigned_tasks(&self, state: TaskState) -> Result<Vec<Task>> {
        let request = self
            .request(Method::GET, "tasks/todo")?
            .query(&[("state", u8::from(state))]);
        let tasks: Vec<Task> = self.send_json(request).await?;
        debug!(count = tasks.len(), ?state, "Fetched assigned tasks");
        Ok(tasks)
    }

    /// `GET /tasks/my_tasks?state=N`: tasks the session user created
    pub async fn fetch_my_tasks(&self, state: TaskState) -> Result<Vec<Task>> {
        let request = self
            .request(Method::GET, "tasks/my_tasks")?
            .query(&[("state", u8::from(state))]);
        let tasks: Vec<Task> = self.send_json(request).await?;
        debug!(count = tasks.len(), ?state, "Fetched created tasks");
        Ok(tasks)
    }

    /// `PATCH /tasks/{id}`
    pub async fn patch_task(&self, task_id: i64, action: UpdateAction) -> Result<()> {
        let request = self
            .request(Method::PATCH, &format!("tasks/{}", task_id))?
            .json(&UpdateBody { action });
        self.send(request).await?;
        info!(task_id, action = action.as_str(), "Updated task");
        Ok(())
    }

    /// `POST /tasks`
    pub async fn post_task(&self, body: &CreateTaskRequest) -> Result<()> {
        let request = self.request(Method::POST, "tasks")?.json(body);
        self.send(request).await?;
        info!(pr_link = %body.pr_link, reviewers = body.reviewers_id.len(), "Created task");
        Ok(())
    }

    /// `DELETE /tasks/{id}`
    pub async fn remove_task(&self, task_id: i64) -> Result<()> {
        let request = self.request(Method::DELETE, &format!("tasks/{}", task_id))?;
        self.send(request).await?;
        info!(task_id, "Deleted task");
        Ok(())
    }
}

#[async_trait]
impl TaskBackend for ApiClient {
    async fn assigned_tasks(&self, state: TaskState) -> revman_core::Result<Vec<Task>> {
        Ok(self.fetch_assigned_tasks(state).await?)
    }

    async fn my_tasks(&self, state: TaskState) -> revman_core::Result<Vec<Task>> {
        Ok(self.fetch_my_tasks(state).await?)
    }

    async fn update_task(&self, task_id: i64, action: UpdateAction) -> revman_core::Result<()> {
        Ok(self.patch_task(task_id, action).await?)
    }

    async fn create_task(&self, request: &CreateTaskRequest) -> revman_core::Result<()> {
        Ok(self.post_task(request).await?)
    }

    async fn delete_task(&self, task_id: i64) -> revman_core::Result<()> {
        Ok(self.remove_task(task_id).await?)
    }
}
