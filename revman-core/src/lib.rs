//! Revman Core - client-side logic for the Review Manager code review tracker
//!
//! This crate holds everything that does not speak HTTP: the entities the
//! backend returns, list ordering and aggregation, the card action table,
//! the review request form, the tabbed list views and the session holder.
//! The HTTP client lives in `revman-api` and plugs in through the traits in
//! [`backend`].

pub mod backend;
pub mod card;
pub mod config;
pub mod error;
pub mod form;
pub mod model;
pub mod ordering;
pub mod pr_link;
pub mod secrets;
pub mod session;
pub mod summary;
pub mod view;

#[cfg(test)]
mod testing;

pub use backend::{Navigation, Prompt, RewardBackend, TaskBackend, UserBackend};
pub use card::{visible_actions, CardAction, Outcome};
pub use config::Config;
pub use error::{Error, Result};
pub use form::{FormError, RequestForm};
pub use model::{
    CreateTaskRequest, Reviewer, Reward, Task, TaskLinesOfCode, TaskReviewPriority, TaskState,
    UpdateAction, User,
};
pub use secrets::Secrets;
pub use session::Session;
pub use summary::{RewardSummary, TaskSummary};
pub use view::{BulkDeleteReport, ListViewKind, RewardsView, TabbedListView, ViewStatus};
