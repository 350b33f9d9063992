//! Actions offered on a task card
//!
//! Which actions a card shows depends only on the task state and on the
//! kind of list rendering it. Every action is confirmed before it is sent
//! and is never retried automatically.

use std::fmt;

use tracing::{info, warn};

use crate::backend::{Prompt, TaskBackend};
use crate::model::{TaskState, UpdateAction};
use crate::view::ListViewKind;

/// A user-triggered action on one task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardAction {
    Approve,
    RequestChanges,
    ChangesAddressed,
    ReopenQuick,
    ReopenReset,
    Delete,
}

impl CardAction {
    /// Button label
    pub fn label(self) -> &'static str {
        match self {
            CardAction::Approve => "approve",
            CardAction::RequestChanges => "request-changes",
            CardAction::ChangesAddressed => "changes-addressed",
            CardAction::ReopenQuick => "reopen-quick",
            CardAction::ReopenReset => "reopen-reset",
            CardAction::Delete => "delete",
        }
    }

    /// Backend transition sent for this action; `None` for deletion
    pub fn update_action(self) -> Option<UpdateAction> {
        match self {
            CardAction::Approve => Some(UpdateAction::Approve),
            CardAction::RequestChanges => Some(UpdateAction::RequestChanges),
            CardAction::ChangesAddressed => Some(UpdateAction::ChangesAddressed),
            CardAction::ReopenQuick => Some(UpdateAction::ReOpenQuickReview),
            CardAction::ReopenReset => Some(UpdateAction::ReOpenResetReview),
            CardAction::Delete => None,
        }
    }

    /// Question asked before dispatch
    pub fn confirm_message(self) -> &'static str {
        match self {
            CardAction::Approve => "Confirm that you want to approve this review?",
            CardAction::RequestChanges => {
                "Confirm that you want to request changes for this review?"
            }
            CardAction::ChangesAddressed => {
                "Confirm that you want to mark the changes as addressed?"
            }
            CardAction::ReopenQuick => {
                "Re-open for Quick Review?\n\nThis will just require a quick check again."
            }
            CardAction::ReopenReset => {
                "Re-open with Reset?\n\nThis will require a review as if it was the first time."
            }
            CardAction::Delete => {
                "Are you sure you want to delete this review request? This action cannot be undone."
            }
        }
    }

    /// Alert shown when the backend rejects the action
    pub fn failure_message(self) -> &'static str {
        match self {
            CardAction::Approve => "Failed to approve task. Please try again.",
            CardAction::RequestChanges => "Failed to request changes. Please try again.",
            CardAction::ChangesAddressed => {
                "Failed to mark changes as addressed. Please try again."
            }
            CardAction::ReopenQuick | CardAction::ReopenReset => {
                "Failed to reopen task. Please try again."
            }
            CardAction::Delete => "Failed to delete task. Please try again.",
        }
    }
}

impl fmt::Display for CardAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Actions a card shows for a task in `state` rendered by `view`
pub fn visible_actions(state: TaskState, view: ListViewKind) -> &'static [CardAction] {
    use CardAction::*;

    match (view, state) {
        (ListViewKind::Assignee, TaskState::PendingReview) => &[Approve, RequestChanges],
        (ListViewKind::Assignee, TaskState::PendingChanges) => &[ChangesAddressed],
        (ListViewKind::Assignee, TaskState::Approved) => &[],
        (ListViewKind::Manager, TaskState::PendingReview) => &[Delete],
        (ListViewKind::Manager, TaskState::PendingChanges) => &[],
        (ListViewKind::Manager, TaskState::Approved) => &[ReopenQuick, ReopenReset, Delete],
    }
}

/// What happened to a dispatched action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The user declined the confirmation; nothing was sent
    Declined,
    /// The backend accepted the action
    Done,
    /// The backend rejected the action; the user was alerted
    Failed(String),
}

impl Outcome {
    /// Whether the enclosing list should re-fetch
    pub fn needs_refresh(&self) -> bool {
        matches!(self, Outcome::Done)
    }
}

/// Confirm and send one action for one task
pub async fn dispatch<B, P>(backend: &B, prompt: &P, task_id: i64, action: CardAction) -> Outcome
where
    B: TaskBackend + ?Sized,
    P: Prompt + ?Sized,
{
    if !prompt.confirm(action.confirm_message()) {
        return Outcome::Declined;
    }

    let result = match action.update_action() {
        Some(update) => backend.update_task(task_id, update).await,
        None => backend.delete_task(task_id).await,
    };

    match result {
        Ok(()) => {
            info!(task_id, action = %action, "Task action applied");
            Outcome::Done
        }
        Err(e) => {
            warn!(task_id, action = %action, error = %e, "Task action failed");
            prompt.alert(action.failure_message());
            Outcome::Failed(e.to_string())
        }
    }
}
