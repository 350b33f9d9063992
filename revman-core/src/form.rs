//! Review request creation form
//!
//! The form owns its fields so that invalid combinations cannot be reached:
//! a full review of a 1200+ line change has to be split instead.

use thiserror::Error;
use tracing::{info, warn};

use crate::backend::{Navigation, TaskBackend};
use crate::model::{CreateTaskRequest, TaskLinesOfCode, TaskReviewPriority, User};
use crate::ordering::compare_names;
use crate::pr_link::{parse_github_pr, GithubPr};
use crate::{Error, Result};

/// Why the form refused an input or a submission
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("Please add a PR link to continue")]
    MissingPrLink,

    #[error("Please add at least one reviewer")]
    NoReviewers,

    #[error("It is recommended to select at least two reviewers")]
    SingleReviewerNotAcknowledged,

    #[error("Changes of 1200+ lines need to be split before a full review")]
    SplitThePr,
}

/// State of the "create new request" form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestForm {
    pr_link: String,
    priority: TaskReviewPriority,
    lines_of_code: TaskLinesOfCode,
    reviewers: Vec<User>,
    allow_single_reviewer: bool,
    show_pr_link_error: bool,
    submit_error: Option<String>,
}

impl Default for RequestForm {
    fn default() -> Self {
        Self {
            pr_link: String::new(),
            priority: TaskReviewPriority::FullReview,
            lines_of_code: TaskLinesOfCode::Under100,
            reviewers: Vec::new(),
            allow_single_reviewer: false,
            show_pr_link_error: false,
            submit_error: None,
        }
    }
}

impl RequestForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pr_link(&self) -> &str {
        &self.pr_link
    }

    pub fn priority(&self) -> TaskReviewPriority {
        self.priority
    }

    pub fn lines_of_code(&self) -> TaskLinesOfCode {
        self.lines_of_code
    }

    pub fn reviewers(&self) -> &[User] {
        &self.reviewers
    }

    pub fn allow_single_reviewer(&self) -> bool {
        self.allow_single_reviewer
    }

    pub fn show_pr_link_error(&self) -> bool {
        self.show_pr_link_error
    }

    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    /// Update the PR link; a non-blank value clears the missing-link error
    pub fn set_pr_link(&mut self, link: impl Into<String>) {
        self.pr_link = link.into();
        if self.show_pr_link_error && !self.pr_link.trim().is_empty() {
            self.show_pr_link_error = false;
        }
    }

    /// Repository and PR number the backend will derive from the link
    pub fn pr_link_hint(&self) -> Option<GithubPr> {
        parse_github_pr(&self.pr_link)
    }

    /// Change the priority.
    ///
    /// Switching to a full review while "1200+" is selected moves the size
    /// down to the largest allowed class.
    pub fn set_priority(&mut self, priority: TaskReviewPriority) {
        self.priority = priority;
        if self.is_size_disabled(self.lines_of_code) {
            self.lines_of_code = TaskLinesOfCode::Under1200;
        }
    }

    /// Whether a size class option is disabled under the current priority
    pub fn is_size_disabled(&self, lines_of_code: TaskLinesOfCode) -> bool {
        self.priority == TaskReviewPriority::FullReview
            && lines_of_code == TaskLinesOfCode::Above1200
    }

    /// Select a size class; disabled options are refused
    pub fn set_lines_of_code(&mut self, lines_of_code: TaskLinesOfCode) -> Result<()> {
        if self.is_size_disabled(lines_of_code) {
            return Err(FormError::SplitThePr.into());
        }
        self.lines_of_code = lines_of_code;
        Ok(())
    }

    /// Users that can still be added, sorted by display name
    pub fn available_reviewers(&self, all_users: &[User], current_user: Option<&User>) -> Vec<User> {
        let mut available: Vec<User> = all_users
            .iter()
            .filter(|u| current_user.map_or(true, |me| me.public_id != u.public_id))
            .filter(|u| !self.has_reviewer(&u.public_id))
            .cloned()
            .collect();
        available.sort_by(|a, b| compare_names(&a.user_name, &b.user_name));
        available
    }

    fn has_reviewer(&self, public_id: &str) -> bool {
        self.reviewers.iter().any(|r| r.public_id == public_id)
    }

    /// Add a reviewer. Returns `false` if they were already added.
    ///
    /// Reaching two reviewers drops the single-reviewer acknowledgment.
    pub fn add_reviewer(&mut self, user: User) -> bool {
        if self.has_reviewer(&user.public_id) {
            return false;
        }
        self.reviewers.push(user);
        if self.reviewers.len() >= 2 {
            self.allow_single_reviewer = false;
        }
        true
    }

    /// Remove a reviewer by id. Returns `false` if they were not present.
    pub fn remove_reviewer(&mut self, public_id: &str) -> bool {
        let before = self.reviewers.len();
        self.reviewers.retain(|r| r.public_id != public_id);
        self.reviewers.len() != before
    }

    /// Tick or untick "continue with a single reviewer"
    pub fn set_allow_single_reviewer(&mut self, allow: bool) {
        self.allow_single_reviewer = allow;
    }

    /// Whether the single-reviewer warning is shown
    pub fn shows_single_reviewer_warning(&self) -> bool {
        self.reviewers.len() == 1
    }

    /// Whether the submit button is enabled
    pub fn can_submit(&self) -> bool {
        self.reviewers.len() >= 2 || (self.reviewers.len() == 1 && self.allow_single_reviewer)
    }

    /// Check the form before submission, flagging the PR link field if empty
    pub fn validate(&mut self) -> std::result::Result<(), FormError> {
        if self.pr_link.trim().is_empty() {
            self.show_pr_link_error = true;
            return Err(FormError::MissingPrLink);
        }
        if self.reviewers.is_empty() {
            return Err(FormError::NoReviewers);
        }
        if !self.can_submit() {
            return Err(FormError::SingleReviewerNotAcknowledged);
        }
        Ok(())
    }

    /// Request body for the current fields
    pub fn to_request(&self) -> CreateTaskRequest {
        CreateTaskRequest {
            pr_link: self.pr_link.clone(),
            priority: self.priority,
            lines_of_code: self.lines_of_code,
            reviewers_id: self.reviewers.iter().map(|r| r.public_id.clone()).collect(),
        }
    }

    /// Submit the request.
    ///
    /// On success the form is cleared and the caller should go to the
    /// manage view. On failure every field is kept and the message is
    /// stored for inline display.
    pub async fn submit<B: TaskBackend + ?Sized>(&mut self, backend: &B) -> Result<Navigation> {
        self.validate()?;
        self.submit_error = None;

        let request = self.to_request();
        match backend.create_task(&request).await {
            Ok(()) => {
                info!(
                    pr_link = %request.pr_link,
                    reviewers = request.reviewers_id.len(),
                    "Review request created"
                );
                self.reset();
                Ok(Navigation::Manage)
            }
            Err(e) => {
                warn!(error = %e, "Failed to create review request");
                let message = match &e {
                    Error::Backend { message, .. } if !message.is_empty() => message.clone(),
                    _ => "Failed to create review request".to_string(),
                };
                self.submit_error = Some(message);
                Err(e)
            }
        }
    }

    /// Back to an empty form
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
