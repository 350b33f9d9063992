//! Create command - open a new review request

use clap::{Args, ValueEnum};
use revman_core::{Config, RequestForm, TaskLinesOfCode, TaskReviewPriority, User, UserBackend};

use super::{connect, require_session};

/// Create a review request
#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Link to the pull request
    #[arg(long)]
    pub pr_link: String,

    /// How thorough the review should be
    #[arg(long, value_enum, default_value_t = PriorityArg::FullReview)]
    pub priority: PriorityArg,

    /// Lines changed
    #[arg(long, value_enum, default_value_t = SizeArg::Under100)]
    pub size: SizeArg,

    /// Reviewer public id or user name (repeatable)
    #[arg(short, long = "reviewer", value_name = "USER")]
    pub reviewers: Vec<String>,

    /// Continue with a single reviewer
    #[arg(long)]
    pub single_reviewer: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PriorityArg {
    FullReview,
    BasedOnEvidence,
    ApproveOnly,
}

impl From<PriorityArg> for TaskReviewPriority {
    fn from(arg: PriorityArg) -> Self {
        match arg {
            PriorityArg::FullReview => TaskReviewPriority::FullReview,
            PriorityArg::BasedOnEvidence => TaskReviewPriority::BasedOnEvidence,
            PriorityArg::ApproveOnly => TaskReviewPriority::ApproveOnly,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SizeArg {
    #[value(name = "1-99")]
    Under100,
    #[value(name = "100-499")]
    Under500,
    #[value(name = "500-1199")]
    Under1200,
    #[value(name = "1200+")]
    Above1200,
}

impl From<SizeArg> for TaskLinesOfCode {
    fn from(arg: SizeArg) -> Self {
        match arg {
            SizeArg::Under100 => TaskLinesOfCode::Under100,
            SizeArg::Under500 => TaskLinesOfCode::Under500,
            SizeArg::Under1200 => TaskLinesOfCode::Under1200,
            SizeArg::Above1200 => TaskLinesOfCode::Above1200,
        }
    }
}

/// Find a user by exact public id, then by case-insensitive name
fn find_user<'a>(users: &'a [User], needle: &str) -> Option<&'a User> {
    users
        .iter()
        .find(|u| u.public_id == needle)
        .or_else(|| users.iter().find(|u| u.user_name.eq_ignore_ascii_case(needle)))
}

impl CreateArgs {
    /// Fill a form from the arguments, checking reviewers against `candidates`
    fn fill_form(&self, candidates: &[User]) -> anyhow::Result<RequestForm> {
        let mut form = RequestForm::new();
        form.set_pr_link(self.pr_link.as_str());
        form.set_priority(self.priority.into());
        form.set_lines_of_code(self.size.into())?;

        for needle in &self.reviewers {
            let user = find_user(candidates, needle)
                .ok_or_else(|| anyhow::anyhow!("Unknown or unavailable reviewer '{}'", needle))?;
            if !form.add_reviewer(user.clone()) {
                tracing::debug!(reviewer = %needle, "Reviewer listed twice");
            }
        }
        form.set_allow_single_reviewer(self.single_reviewer);

        Ok(form)
    }

    /// Execute the create command
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let client = connect(config)?;
        let session = require_session(&client, config).await?;

        let users = client.list_users().await?;
        let candidates = RequestForm::new().available_reviewers(&users, session.user());
        let mut form = self.fill_form(&candidates)?;

        match form.pr_link_hint() {
            Some(pr) => println!("Pull request: {}", pr),
            None => println!("Note: '{}' does not look like a GitHub pull request link", form.pr_link()),
        }
        if form.shows_single_reviewer_warning() && !form.allow_single_reviewer() {
            println!("It is recommended to select at least two reviewers. Pass --single-reviewer to continue with one.");
        }

        match form.submit(client.as_ref()).await {
            Ok(next) => {
                println!("Review request created.");
                println!("See it with `revman manage` ({})", next.path());
                Ok(())
            }
            Err(e) => {
                let message = form.submit_error().map(str::to_string).unwrap_or_else(|| e.to_string());
                Err(anyhow::anyhow!(message))
            }
        }
    }
}
