//! Todo command - reviews assigned to me and changes requested on my PRs

use clap::{Args, ValueEnum};
use revman_core::{CardAction, Config, ListViewKind, Outcome, TabbedListView};

use super::{connect, report_status, require_session};
use crate::prompt::TerminalPrompt;
use crate::render;

/// Show reviews to do
#[derive(Args, Debug)]
pub struct TodoArgs {
    /// Tab to show
    #[arg(short, long, value_enum, default_value_t = TodoTab::PendingReview)]
    pub tab: TodoTab,

    /// Approve the review with this task id
    #[arg(long, value_name = "ID", group = "action")]
    pub approve: Option<i64>,

    /// Request changes on the review with this task id
    #[arg(long, value_name = "ID", group = "action")]
    pub request_changes: Option<i64>,

    /// Mark requested changes as addressed
    #[arg(long, value_name = "ID", group = "action")]
    pub changes_addressed: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TodoTab {
    PendingReview,
    PendingChanges,
}

impl TodoTab {
    fn index(self) -> usize {
        match self {
            TodoTab::PendingReview => 0,
            TodoTab::PendingChanges => 1,
        }
    }
}

impl TodoArgs {
    fn action(&self) -> Option<(i64, CardAction)> {
        self.approve
            .map(|id| (id, CardAction::Approve))
            .or(self.request_changes.map(|id| (id, CardAction::RequestChanges)))
            .or(self.changes_addressed.map(|id| (id, CardAction::ChangesAddressed)))
    }

    /// Execute the todo command
    pub async fn execute(&self, config: &Config, assume_yes: bool) -> anyhow::Result<()> {
        let client = connect(config)?;
        let session = require_session(&client, config).await?;
        let prompt = TerminalPrompt::new(assume_yes);

        let mut view = TabbedListView::new(client.clone(), ListViewKind::Assignee);
        view.activate(self.tab.index()).await?;

        if let Some((task_id, action)) = self.action() {
            match view.perform(task_id, action, &prompt).await? {
                Outcome::Done => println!("Done: {} #{}", action, task_id),
                Outcome::Declined => println!("Cancelled."),
                Outcome::Failed(reason) => tracing::debug!(%reason, "Action failed"),
            }
            println!();
        }

        let tab = view.active_tab()?;
        println!("{} ({})", tab.label, view.tasks().len());
        println!();

        if !report_status(view.status()) {
            return Ok(());
        }
        if view.tasks().is_empty() {
            println!("Nothing here.");
            return Ok(());
        }

        let actions = view.card_actions()?;
        for task in view.tasks() {
            render::print_task(task, &session, view.kind(), actions);
        }

        Ok(())
    }
}
