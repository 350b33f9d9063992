//! In-memory backend and prompt used by unit tests

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::backend::{Prompt, RewardBackend, TaskBackend, UserBackend};
use crate::model::{
    CreateTaskRequest, Reviewer, Reward, Task, TaskLinesOfCode, TaskReviewPriority, TaskState,
    UpdateAction, User,
};
use crate::{Error, Result};

/// Every call the fake backend received, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Assigned(TaskState),
    Mine(TaskState),
    Update(i64, UpdateAction),
    Create(CreateTaskRequest),
    Delete(i64),
    Rewards(u32),
    CurrentUser,
    ListUsers,
    SetUser(String),
    Logout,
}

#[derive(Default)]
pub struct FakeBackend {
    pub calls: Mutex<Vec<Call>>,
    pub assigned: Mutex<HashMap<u8, Vec<Task>>>,
    pub mine: Mutex<HashMap<u8, Vec<Task>>>,
    pub rewards: Mutex<Vec<Reward>>,
    pub users: Mutex<Vec<User>>,
    pub me: Mutex<Option<User>>,
    pub fail_fetch: Mutex<bool>,
    pub fail_update: Mutex<bool>,
    pub fail_create: Mutex<Option<String>>,
    pub fail_logout: Mutex<bool>,
    pub fail_delete_ids: Mutex<HashSet<i64>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn set_mine(&self, state: TaskState, tasks: Vec<Task>) {
        self.mine.lock().unwrap().insert(state as u8, tasks);
    }

    pub fn set_assigned(&self, state: TaskState, tasks: Vec<Task>) {
        self.assigned.lock().unwrap().insert(state as u8, tasks);
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn fetch_failure(&self) -> Result<()> {
        if *self.fail_fetch.lock().unwrap() {
            return Err(Error::backend("connection refused"));
        }
        Ok(())
    }
}

#[async_trait]
impl TaskBackend for FakeBackend {
    async fn assigned_tasks(&self, state: TaskState) -> Result<Vec<Task>> {
        self.record(Call::Assigned(state));
        self.fetch_failure()?;
        Ok(self.assigned.lock().unwrap().get(&(state as u8)).cloned().unwrap_or_default())
    }

    async fn my_tasks(&self, state: TaskState) -> Result<Vec<Task>> {
        self.record(Call::Mine(state));
        self.fetch_failure()?;
        Ok(self.mine.lock().unwrap().get(&(state as u8)).cloned().unwrap_or_default())
    }

    async fn update_task(&self, task_id: i64, action: UpdateAction) -> Result<()> {
        self.record(Call::Update(task_id, action));
        if *self.fail_update.lock().unwrap() {
            return Err(Error::Backend {
                status: Some(401),
                message: "User not authorized to perfom action on the task.".to_string(),
            });
        }
        Ok(())
    }

    async fn create_task(&self, request: &CreateTaskRequest) -> Result<()> {
        self.record(Call::Create(request.clone()));
        if let Some(message) = self.fail_create.lock().unwrap().clone() {
            return Err(Error::Backend {
                status: Some(409),
                message,
            });
        }
        Ok(())
    }

    async fn delete_task(&self, task_id: i64) -> Result<()> {
        self.record(Call::Delete(task_id));
        if self.fail_delete_ids.lock().unwrap().contains(&task_id) {
            return Err(Error::Backend {
                status: Some(404),
                message: "Task not found.".to_string(),
            });
        }
        // Deleted tasks disappear from later fetches
        for tasks in self.mine.lock().unwrap().values_mut() {
            tasks.retain(|t| t.task_id != task_id);
        }
        Ok(())
    }
}

#[async_trait]
impl RewardBackend for FakeBackend {
    async fn rewards(&self, cycle_offset: u32) -> Result<Vec<Reward>> {
        self.record(Call::Rewards(cycle_offset));
        self.fetch_failure()?;
        Ok(self.rewards.lock().unwrap().clone())
    }
}

#[async_trait]
impl UserBackend for FakeBackend {
    async fn current_user(&self) -> Result<User> {
        self.record(Call::CurrentUser);
        self.me.lock().unwrap().clone().ok_or(Error::Unauthorized)
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        self.record(Call::ListUsers);
        Ok(self.users.lock().unwrap().clone())
    }

    async fn set_user(&self, user_public_id: &str) -> Result<()> {
        self.record(Call::SetUser(user_public_id.to_string()));
        let user = self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.public_id == user_public_id)
            .cloned();
        *self.me.lock().unwrap() = user;
        // The real endpoint answers with a redirect the client cannot parse
        Err(Error::backend("unexpected redirect"))
    }

    async fn logout(&self) -> Result<()> {
        self.record(Call::Logout);
        if *self.fail_logout.lock().unwrap() {
            return Err(Error::backend("network down"));
        }
        *self.me.lock().unwrap() = None;
        Ok(())
    }

    fn login_url(&self) -> String {
        "http://backend.test/api/auth/google/login".to_string()
    }
}

/// Prompt with a fixed answer that records what it was shown
pub struct ScriptedPrompt {
    answer: bool,
    pub confirms: Mutex<Vec<String>>,
    pub alerts: Mutex<Vec<String>>,
}

impl ScriptedPrompt {
    pub fn accepting() -> Self {
        Self {
            answer: true,
            confirms: Mutex::new(Vec::new()),
            alerts: Mutex::new(Vec::new()),
        }
    }

    pub fn declining() -> Self {
        Self {
            answer: false,
            ..Self::accepting()
        }
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }

    pub fn confirms(&self) -> Vec<String> {
        self.confirms.lock().unwrap().clone()
    }
}

impl Prompt for ScriptedPrompt {
    fn confirm(&self, message: &str) -> bool {
        self.confirms.lock().unwrap().push(message.to_string());
        self.answer
    }

    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }
}

pub fn user(id: &str, name: &str) -> User {
    User {
        public_id: id.to_string(),
        user_name: name.to_string(),
        reward_since_last_tuesday: Some(0),
    }
}

pub fn task(task_id: i64, repo: Option<&str>, pr: Option<u64>, state: TaskState) -> Task {
    Task {
        task_id,
        github_repo: repo.map(str::to_string),
        pr_number: pr,
        creator_user_name: "Ana".to_string(),
        creator_public_id: "u-ana".to_string(),
        review_priority: TaskReviewPriority::FullReview,
        lines_of_code: TaskLinesOfCode::Under100,
        created_at: Utc::now(),
        approved_at: None,
        state,
        reward: 10,
        has_been_reviewed_once: false,
        pr_link: format!("https://github.com/acme/{}/pull/{}", repo.unwrap_or("x"), pr.unwrap_or(0)),
        reviewers: vec![Reviewer {
            public_id: "u-bo".to_string(),
            user_name: "Bo".to_string(),
        }],
    }
}
