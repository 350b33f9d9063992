//! Tabbed task lists and the rewards list
//!
//! A view holds nothing but the last successful fetch. Every fetch carries a
//! [`FetchTicket`]; a response whose ticket has been superseded by a newer
//! fetch is dropped instead of overwriting newer state.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::backend::{Prompt, RewardBackend, TaskBackend};
use crate::card::{self, visible_actions, CardAction, Outcome};
use crate::model::{Reward, Task, TaskState};
use crate::ordering::sort_by_repo_and_pr;
use crate::summary::{RewardSummary, TaskSummary};
use crate::{Error, Result};

const FETCH_TASKS_FAILED: &str = "Failed to fetch tasks. Please try again.";
const FETCH_REWARDS_FAILED: &str = "Failed to fetch rewards.";

/// Who the list is rendered for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListViewKind {
    /// Reviews assigned to me and my requests waiting on my changes
    Assignee,
    /// Requests I created
    Manager,
}

impl ListViewKind {
    /// Default tabs for this kind of view
    pub fn tabs(self) -> Vec<Tab> {
        match self {
            ListViewKind::Assignee => Self::assignee_tabs(),
            ListViewKind::Manager => Self::manager_tabs(),
        }
    }

    pub fn assignee_tabs() -> Vec<Tab> {
        vec![
            Tab::new(TaskState::PendingReview, "Pending Review", TaskFeed::Assigned),
            Tab::new(TaskState::PendingChanges, "Pending Changes", TaskFeed::Created),
        ]
    }

    pub fn manager_tabs() -> Vec<Tab> {
        vec![
            Tab::new(TaskState::PendingReview, "Pending Reviews", TaskFeed::Created),
            Tab::new(TaskState::Approved, "Approved", TaskFeed::Created),
        ]
    }

    /// Whether cards show the reward of a task in `state`. Same for both views.
    pub fn shows_reward(self, state: TaskState) -> bool {
        state == TaskState::PendingReview
    }
}

/// Which task listing a tab is fed from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskFeed {
    /// Tasks I have to review
    Assigned,
    /// Tasks I created
    Created,
}

impl TaskFeed {
    /// Fetch this feed filtered by state
    pub async fn fetch<B: TaskBackend + ?Sized>(self, backend: &B, state: TaskState) -> Result<Vec<Task>> {
        match self {
            TaskFeed::Assigned => backend.assigned_tasks(state).await,
            TaskFeed::Created => backend.my_tasks(state).await,
        }
    }
}

/// One tab of a tabbed list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub state: TaskState,
    pub label: String,
    pub feed: TaskFeed,
}

impl Tab {
    pub fn new(state: TaskState, label: impl Into<String>, feed: TaskFeed) -> Self {
        Self {
            state,
            label: label.into(),
            feed,
        }
    }
}

/// Load state of a list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewStatus {
    /// Nothing requested yet
    Idle,
    /// A fetch is in flight
    Loading,
    /// The list holds the latest fetch
    Loaded,
    /// The latest fetch failed; the list is empty and can be retried
    Failed(String),
}

/// Identifies one fetch; only the latest ticket may update the view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    feed: TaskFeed,
    state: TaskState,
}

impl FetchTicket {
    pub fn feed(&self) -> TaskFeed {
        self.feed
    }

    pub fn state(&self) -> TaskState {
        self.state
    }
}

/// Result of deleting every task of the approved tab
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BulkDeleteReport {
    pub attempted: usize,
    pub deleted: usize,
    pub failed: usize,
}

impl BulkDeleteReport {
    pub fn is_complete(&self) -> bool {
        self.failed == 0
    }
}

/// Task list with tabs, one fetch per tab activation
pub struct TabbedListView<B: TaskBackend + ?Sized> {
    backend: Arc<B>,
    kind: ListViewKind,
    tabs: Vec<Tab>,
    active: usize,
    tasks: Vec<Task>,
    status: ViewStatus,
    generation: u64,
}

impl<B: TaskBackend + ?Sized> TabbedListView<B> {
    /// Build a view with the default tabs of `kind`, first tab active.
    ///
    /// Nothing is fetched until [`activate`](Self::activate) or
    /// [`refresh`](Self::refresh) is called.
    pub fn new(backend: Arc<B>, kind: ListViewKind) -> Self {
        Self::with_tabs(backend, kind, kind.tabs(), 0)
    }

    /// Build a view with explicit tabs; `default_tab` is clamped into range
    pub fn with_tabs(backend: Arc<B>, kind: ListViewKind, tabs: Vec<Tab>, default_tab: usize) -> Self {
        let active = default_tab.min(tabs.len().saturating_sub(1));
        Self {
            backend,
            kind,
            tabs,
            active,
            tasks: Vec::new(),
            status: ViewStatus::Idle,
            generation: 0,
        }
    }

    pub fn kind(&self) -> ListViewKind {
        self.kind
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    /// The active tab
    pub fn active_tab(&self) -> Result<&Tab> {
        self.tabs.get(self.active).ok_or(Error::NoSuchTab(self.active))
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn status(&self) -> &ViewStatus {
        &self.status
    }

    /// Switch tabs and fetch the new tab
    pub async fn activate(&mut self, index: usize) -> Result<bool> {
        if index >= self.tabs.len() {
            return Err(Error::NoSuchTab(index));
        }
        self.active = index;
        self.refresh().await
    }

    /// Start a fetch for the active tab, superseding any earlier one
    pub fn begin_fetch(&mut self) -> Result<FetchTicket> {
        let tab = self.active_tab()?;
        let (feed, state) = (tab.feed, tab.state);
        self.generation += 1;
        self.status = ViewStatus::Loading;
        debug!(generation = self.generation, ?feed, ?state, "Fetching tasks");
        Ok(FetchTicket {
            generation: self.generation,
            feed,
            state,
        })
    }

    /// Apply a fetch result. Returns `false` if the ticket was stale.
    pub fn complete_fetch(&mut self, ticket: FetchTicket, result: Result<Vec<Task>>) -> bool {
        if ticket.generation != self.generation {
            debug!(
                stale = ticket.generation,
                current = self.generation,
                "Dropping superseded task fetch"
            );
            return false;
        }

        match result {
            Ok(mut tasks) => {
                sort_by_repo_and_pr(&mut tasks);
                info!(count = tasks.len(), state = ?ticket.state, "Fetched tasks");
                self.tasks = tasks;
                self.status = ViewStatus::Loaded;
            }
            Err(e) => {
                warn!(error = %e, state = ?ticket.state, "Error fetching tasks");
                self.tasks.clear();
                self.status = ViewStatus::Failed(FETCH_TASKS_FAILED.to_string());
            }
        }
        true
    }

    /// Re-fetch the active tab; also the retry entry point after a failure
    pub async fn refresh(&mut self) -> Result<bool> {
        let ticket = self.begin_fetch()?;
        let result = ticket.feed.fetch(self.backend.as_ref(), ticket.state).await;
        Ok(self.complete_fetch(ticket, result))
    }

    /// Actions a card of the active tab offers
    pub fn card_actions(&self) -> Result<&'static [CardAction]> {
        Ok(visible_actions(self.active_tab()?.state, self.kind))
    }

    /// Confirm and run a card action, re-fetching on success
    pub async fn perform<P: Prompt + ?Sized>(
        &mut self,
        task_id: i64,
        action: CardAction,
        prompt: &P,
    ) -> Result<Outcome> {
        let tab = self.active_tab()?;
        if !visible_actions(tab.state, self.kind).contains(&action) {
            return Err(Error::ActionNotAvailable {
                action: action.label(),
                tab: tab.label.clone(),
            });
        }

        let outcome = card::dispatch(self.backend.as_ref(), prompt, task_id, action).await;
        if outcome.needs_refresh() {
            self.refresh().await?;
        }
        Ok(outcome)
    }

    /// Confirm, delete one task, then re-fetch
    pub async fn delete_one<P: Prompt + ?Sized>(&mut self, task_id: i64, prompt: &P) -> Result<Outcome> {
        self.perform(task_id, CardAction::Delete, prompt).await
    }

    /// Whether "delete all" is offered
    pub fn can_delete_all(&self) -> bool {
        self.kind == ListViewKind::Manager
            && self.active_tab().is_ok_and(|t| t.state == TaskState::Approved)
            && !self.tasks.is_empty()
    }

    /// Delete every task in the list.
    ///
    /// Deletions run one after another in list order and keep going past
    /// failures. The list is re-fetched exactly once afterwards, whatever
    /// happened, and the outcome is reported in a single alert. Returns
    /// `None` when nothing was offered or the user declined.
    pub async fn delete_all<P: Prompt + ?Sized>(&mut self, prompt: &P) -> Result<Option<BulkDeleteReport>> {
        if !self.can_delete_all() {
            return Ok(None);
        }

        let ids: Vec<i64> = self.tasks.iter().map(|t| t.task_id).collect();
        let question = format!(
            "Are you sure you want to delete all {} approved tasks? This action cannot be undone.",
            ids.len()
        );
        if !prompt.confirm(&question) {
            return Ok(None);
        }

        let mut report = BulkDeleteReport {
            attempted: ids.len(),
            ..Default::default()
        };
        for task_id in ids {
            match self.backend.delete_task(task_id).await {
                Ok(()) => report.deleted += 1,
                Err(e) => {
                    warn!(task_id, error = %e, "Error deleting task");
                    report.failed += 1;
                }
            }
        }

        self.refresh().await?;

        if report.is_complete() {
            info!(deleted = report.deleted, "Deleted all approved tasks");
            prompt.alert(&format!("Successfully deleted {} tasks.", report.deleted));
        } else {
            prompt.alert("Failed to delete some tasks. Please try again.");
        }
        Ok(Some(report))
    }

    /// Summary of the approved tab in the manager view
    pub fn summary(&self) -> Option<TaskSummary> {
        let tab = self.active_tab().ok()?;
        if self.kind != ListViewKind::Manager || tab.state != TaskState::Approved {
            return None;
        }
        Some(TaskSummary::from_tasks(&self.tasks))
    }
}

/// Oldest cycle offered in the cycle selector
pub const MAX_CYCLE_OFFSET: u32 = 4;

/// Selector label for a cycle offset
pub fn cycle_label(offset: u32) -> String {
    match offset {
        0 => "Current Cycle".to_string(),
        1 => "Previous Cycle".to_string(),
        n => format!("{} Cycles Ago", n),
    }
}

/// Rewards earned in one cycle
pub struct RewardsView<B: RewardBackend + ?Sized> {
    backend: Arc<B>,
    cycle_offset: u32,
    rewards: Vec<Reward>,
    status: ViewStatus,
}

impl<B: RewardBackend + ?Sized> RewardsView<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            backend,
            cycle_offset: 0,
            rewards: Vec::new(),
            status: ViewStatus::Idle,
        }
    }

    pub fn cycle_offset(&self) -> u32 {
        self.cycle_offset
    }

    pub fn rewards(&self) -> &[Reward] {
        &self.rewards
    }

    pub fn status(&self) -> &ViewStatus {
        &self.status
    }

    /// Switch cycle and fetch it
    pub async fn select_cycle(&mut self, offset: u32) {
        self.cycle_offset = offset;
        self.refresh().await;
    }

    /// Re-fetch the selected cycle
    pub async fn refresh(&mut self) {
        self.status = ViewStatus::Loading;
        debug!(cycle_offset = self.cycle_offset, "Fetching rewards");

        match self.backend.rewards(self.cycle_offset).await {
            Ok(mut rewards) => {
                sort_by_repo_and_pr(&mut rewards);
                info!(count = rewards.len(), cycle_offset = self.cycle_offset, "Fetched rewards");
                self.rewards = rewards;
                self.status = ViewStatus::Loaded;
            }
            Err(e) => {
                warn!(error = %e, "Error fetching rewards");
                self.rewards.clear();
                let message = match e {
                    Error::Backend { message, .. } if !message.is_empty() => message,
                    _ => FETCH_REWARDS_FAILED.to_string(),
                };
                self.status = ViewStatus::Failed(message);
            }
        }
    }

    /// Cycle summary of the loaded rewards
    pub fn summary(&self) -> RewardSummary {
        RewardSummary::from_rewards(&self.rewards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use crate::model::{TaskLinesOfCode, TaskReviewPriority, UpdateAction};
    use crate::testing::{task, Call, FakeBackend, ScriptedPrompt};

    fn manager_on_approved(backend: &Arc<FakeBackend>) -> TabbedListView<FakeBackend> {
        TabbedListView::with_tabs(backend.clone(), ListViewKind::Manager, ListViewKind::Manager.tabs(), 1)
    }

    fn ids(view: &TabbedListView<FakeBackend>) -> Vec<i64> {
        view.tasks().iter().map(|t| t.task_id).collect()
    }

    #[tokio::test]
    async fn test_fetch_sorts_by_repo_then_pr() {
        let backend = Arc::new(FakeBackend::new());
        backend.set_assigned(
            TaskState::PendingReview,
            vec![
                task(1, Some("web"), Some(3), TaskState::PendingReview),
                task(2, None, Some(1), TaskState::PendingReview),
                task(3, Some("api"), Some(9), TaskState::PendingReview),
                task(4, Some("api"), Some(2), TaskState::PendingReview),
            ],
        );
        let mut view = TabbedListView::new(backend.clone(), ListViewKind::Assignee);

        assert!(view.refresh().await.unwrap());

        assert_eq!(view.status(), &ViewStatus::Loaded);
        assert_eq!(ids(&view), vec![4, 3, 1, 2]);
        assert_eq!(backend.calls(), vec![Call::Assigned(TaskState::PendingReview)]);
    }

    #[tokio::test]
    async fn test_tabs_use_their_feed() {
        let backend = Arc::new(FakeBackend::new());
        let mut view = TabbedListView::new(backend.clone(), ListViewKind::Assignee);

        view.activate(1).await.unwrap();

        assert_eq!(backend.calls(), vec![Call::Mine(TaskState::PendingChanges)]);
        assert!(matches!(view.activate(2).await, Err(Error::NoSuchTab(2))));
    }

    #[tokio::test]
    async fn test_failed_fetch_clears_list() {
        let backend = Arc::new(FakeBackend::new());
        backend.set_mine(TaskState::Approved, vec![task(1, None, None, TaskState::Approved)]);
        let mut view = manager_on_approved(&backend);
        view.refresh().await.unwrap();
        assert_eq!(view.tasks().len(), 1);

        *backend.fail_fetch.lock().unwrap() = true;
        view.refresh().await.unwrap();

        assert!(view.tasks().is_empty());
        assert_eq!(view.status(), &ViewStatus::Failed(FETCH_TASKS_FAILED.to_string()));

        *backend.fail_fetch.lock().unwrap() = false;
        view.refresh().await.unwrap();
        assert_eq!(view.status(), &ViewStatus::Loaded);
    }

    #[tokio::test]
    async fn test_stale_response_is_dropped() {
        let backend = Arc::new(FakeBackend::new());
        let mut view = TabbedListView::new(backend.clone(), ListViewKind::Manager);

        let first = view.begin_fetch().unwrap();
        view.active = 1;
        let second = view.begin_fetch().unwrap();
        assert_eq!(second.state(), TaskState::Approved);

        let fresh = vec![task(2, None, None, TaskState::Approved)];
        assert!(view.complete_fetch(second, Ok(fresh)));

        let stale = vec![task(1, None, None, TaskState::PendingReview)];
        assert!(!view.complete_fetch(first, Ok(stale)));

        assert_eq!(ids(&view), vec![2]);
        assert_eq!(view.status(), &ViewStatus::Loaded);
    }

    #[tokio::test]
    async fn test_perform_refetches_after_success() {
        let backend = Arc::new(FakeBackend::new());
        let mut view = TabbedListView::new(backend.clone(), ListViewKind::Assignee);
        let prompt = ScriptedPrompt::accepting();

        let outcome = view.perform(7, CardAction::Approve, &prompt).await.unwrap();

        assert_eq!(outcome, Outcome::Done);
        assert_eq!(
            backend.calls(),
            vec![
                Call::Update(7, UpdateAction::Approve),
                Call::Assigned(TaskState::PendingReview),
            ]
        );
    }

    #[tokio::test]
    async fn test_perform_failure_keeps_list() {
        let backend = Arc::new(FakeBackend::new());
        backend.set_assigned(
            TaskState::PendingReview,
            vec![task(7, Some("api"), Some(1), TaskState::PendingReview)],
        );
        let mut view = TabbedListView::new(backend.clone(), ListViewKind::Assignee);
        view.refresh().await.unwrap();
        backend.clear_calls();
        *backend.fail_update.lock().unwrap() = true;
        let prompt = ScriptedPrompt::accepting();

        let outcome = view.perform(7, CardAction::RequestChanges, &prompt).await.unwrap();

        assert!(matches!(outcome, Outcome::Failed(_)));
        assert_eq!(ids(&view), vec![7]);
        assert_eq!(backend.calls(), vec![Call::Update(7, UpdateAction::RequestChanges)]);
        assert_eq!(prompt.alerts().len(), 1);
    }

    #[tokio::test]
    async fn test_perform_rejects_hidden_action() {
        let backend = Arc::new(FakeBackend::new());
        let mut view = TabbedListView::new(backend.clone(), ListViewKind::Manager);
        let prompt = ScriptedPrompt::accepting();

        let err = view.perform(1, CardAction::ReopenQuick, &prompt).await.unwrap_err();

        assert!(matches!(err, Error::ActionNotAvailable { .. }));
        assert!(backend.calls().is_empty());
        assert!(prompt.confirms().is_empty());
    }

    #[tokio::test]
    async fn test_delete_one_confirms_then_refetches() {
        let backend = Arc::new(FakeBackend::new());
        backend.set_mine(
            TaskState::PendingReview,
            vec![task(3, None, None, TaskState::PendingReview)],
        );
        let mut view = TabbedListView::new(backend.clone(), ListViewKind::Manager);
        view.refresh().await.unwrap();
        backend.clear_calls();

        view.delete_one(3, &ScriptedPrompt::accepting()).await.unwrap();

        assert_eq!(
            backend.calls(),
            vec![Call::Delete(3), Call::Mine(TaskState::PendingReview)]
        );
        assert!(view.tasks().is_empty());
    }

    #[tokio::test]
    async fn test_delete_all_is_sequential_and_refetches_once() {
        let backend = Arc::new(FakeBackend::new());
        backend.set_mine(
            TaskState::Approved,
            vec![
                task(30, Some("c"), None, TaskState::Approved),
                task(10, Some("a"), None, TaskState::Approved),
                task(20, Some("b"), None, TaskState::Approved),
            ],
        );
        backend.fail_delete_ids.lock().unwrap().insert(10);
        let mut view = manager_on_approved(&backend);
        view.refresh().await.unwrap();
        backend.clear_calls();
        let prompt = ScriptedPrompt::accepting();

        let report = view.delete_all(&prompt).await.unwrap().unwrap();

        assert_eq!(
            backend.calls(),
            vec![
                Call::Delete(10),
                Call::Delete(20),
                Call::Delete(30),
                Call::Mine(TaskState::Approved),
            ]
        );
        assert_eq!(
            report,
            BulkDeleteReport {
                attempted: 3,
                deleted: 2,
                failed: 1
            }
        );
        assert_eq!(ids(&view), vec![10]);
        assert_eq!(prompt.confirms().len(), 1);
        assert_eq!(prompt.alerts(), vec!["Failed to delete some tasks. Please try again."]);
    }

    #[tokio::test]
    async fn test_delete_all_success_message() {
        let backend = Arc::new(FakeBackend::new());
        backend.set_mine(
            TaskState::Approved,
            vec![task(1, None, None, TaskState::Approved), task(2, None, None, TaskState::Approved)],
        );
        let mut view = manager_on_approved(&backend);
        view.refresh().await.unwrap();
        let prompt = ScriptedPrompt::accepting();

        let report = view.delete_all(&prompt).await.unwrap().unwrap();

        assert!(report.is_complete());
        assert_eq!(prompt.alerts(), vec!["Successfully deleted 2 tasks."]);
        assert!(!view.can_delete_all());
    }

    #[tokio::test]
    async fn test_delete_all_declined_or_unavailable() {
        let backend = Arc::new(FakeBackend::new());
        backend.set_mine(TaskState::Approved, vec![task(1, None, None, TaskState::Approved)]);
        let mut view = manager_on_approved(&backend);
        view.refresh().await.unwrap();
        backend.clear_calls();

        assert!(view.delete_all(&ScriptedPrompt::declining()).await.unwrap().is_none());
        assert!(backend.calls().is_empty());

        let mut assignee = TabbedListView::new(backend.clone(), ListViewKind::Assignee);
        assert!(!assignee.can_delete_all());
        assert!(assignee.delete_all(&ScriptedPrompt::accepting()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_summary_only_on_manager_approved_tab() {
        let backend = Arc::new(FakeBackend::new());
        backend.set_mine(TaskState::Approved, vec![task(1, None, None, TaskState::Approved)]);
        let mut view = TabbedListView::new(backend.clone(), ListViewKind::Manager);
        view.refresh().await.unwrap();
        assert!(view.summary().is_none());

        view.activate(1).await.unwrap();
        let summary = view.summary().unwrap();
        assert_eq!(summary.total, 1);
        assert_eq!(summary.top_reviewers[0].user_name, "Bo");

        let assignee = TabbedListView::new(backend.clone(), ListViewKind::Assignee);
        assert!(assignee.summary().is_none());
    }

    #[test]
    fn test_reward_shown_on_pending_review_in_both_views() {
        assert!(ListViewKind::Assignee.shows_reward(TaskState::PendingReview));
        assert!(ListViewKind::Manager.shows_reward(TaskState::PendingReview));
        assert!(!ListViewKind::Assignee.shows_reward(TaskState::PendingChanges));
        assert!(!ListViewKind::Manager.shows_reward(TaskState::Approved));
    }

    #[test]
    fn test_cycle_labels() {
        assert_eq!(cycle_label(0), "Current Cycle");
        assert_eq!(cycle_label(1), "Previous Cycle");
        assert_eq!(cycle_label(MAX_CYCLE_OFFSET), "4 Cycles Ago");
    }

    #[tokio::test]
    async fn test_rewards_view_fetches_selected_cycle() {
        let backend = Arc::new(FakeBackend::new());
        let mut view = RewardsView::new(backend.clone());

        view.select_cycle(2).await;
        assert_eq!(view.cycle_offset(), 2);
        assert_eq!(view.status(), &ViewStatus::Loaded);

        *backend.fail_fetch.lock().unwrap() = true;
        view.refresh().await;
        assert_eq!(view.status(), &ViewStatus::Failed("connection refused".to_string()));
        assert_eq!(backend.calls(), vec![Call::Rewards(2), Call::Rewards(2)]);
        assert_eq!(view.summary().total_points, 0);
    }

    fn reward(repo: Option<&str>, pr_number: Option<u64>) -> Reward {
        Reward {
            creator_public_id: "u-cy".to_string(),
            creator_user_name: "Cy".to_string(),
            lines_of_code: TaskLinesOfCode::Under100,
            review_priority: TaskReviewPriority::FullReview,
            pr_link: "https://github.com/acme/repo/pull/1".to_string(),
            pr_number,
            repo: repo.map(str::to_string),
            points: 10,
            was_quick_review: false,
            rewarded_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_rewards_view_sorts_missing_repos_last() {
        let backend = Arc::new(FakeBackend::new());
        *backend.rewards.lock().unwrap() = vec![
            reward(Some("web"), Some(3)),
            reward(None, Some(1)),
            reward(Some(""), None),
            reward(Some("api"), Some(9)),
            reward(Some("web"), Some(2)),
        ];
        let mut view = RewardsView::new(backend.clone());

        view.refresh().await;

        let keys: Vec<_> = view.rewards().iter().map(|r| (r.repo.as_deref(), r.pr_number)).collect();
        assert_eq!(
            keys,
            vec![
                (Some("api"), Some(9)),
                (Some("web"), Some(2)),
                (Some("web"), Some(3)),
                (None, Some(1)),
                (Some(""), None),
            ]
        );
    }
}
