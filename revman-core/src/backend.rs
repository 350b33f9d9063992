//! Seams between the views and the outside world
//!
//! Views never talk HTTP directly. They call through these traits, which the
//! API client implements, and ask the user for confirmation through
//! [`Prompt`].

use async_trait::async_trait;

use crate::model::{CreateTaskRequest, Reward, Task, TaskState, UpdateAction, User};
use crate::Result;

/// Task endpoints of the backend
#[async_trait]
pub trait TaskBackend: Send + Sync {
    /// Tasks the current user has to review
    async fn assigned_tasks(&self, state: TaskState) -> Result<Vec<Task>>;

    /// Tasks the current user created
    async fn my_tasks(&self, state: TaskState) -> Result<Vec<Task>>;

    /// Request a state transition for one task
    async fn update_task(&self, task_id: i64, action: UpdateAction) -> Result<()>;

    /// Create a review request
    async fn create_task(&self, request: &CreateTaskRequest) -> Result<()>;

    /// Delete a review request
    async fn delete_task(&self, task_id: i64) -> Result<()>;
}

/// Reward endpoints of the backend
#[async_trait]
pub trait RewardBackend: Send + Sync {
    /// Rewards earned in a cycle; 0 is the current cycle, larger is older
    async fn rewards(&self, cycle_offset: u32) -> Result<Vec<Reward>>;
}

/// User and authentication endpoints of the backend
#[async_trait]
pub trait UserBackend: Send + Sync {
    /// The user owning the session
    async fn current_user(&self) -> Result<User>;

    /// Every known user
    async fn list_users(&self) -> Result<Vec<User>>;

    /// Development-only user switch
    async fn set_user(&self, user_public_id: &str) -> Result<()>;

    /// End the session server side
    async fn logout(&self) -> Result<()>;

    /// Where the OAuth login flow starts
    fn login_url(&self) -> String;
}

/// Blocking user interaction
pub trait Prompt: Send + Sync {
    /// Ask a yes/no question; `true` means go ahead
    fn confirm(&self, message: &str) -> bool;

    /// Show a message the user has to acknowledge
    fn alert(&self, message: &str);
}

/// Where the client should go next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// Start page, with all client state dropped
    Root,
    /// Reviews to do
    Todo,
    /// Requests created by the current user
    Manage,
}

impl Navigation {
    /// Route path
    pub fn path(self) -> &'static str {
        match self {
            Navigation::Root => "/",
            Navigation::Todo => "/todo",
            Navigation::Manage => "/manage",
        }
    }
}
