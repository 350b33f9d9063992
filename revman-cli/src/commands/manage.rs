//! Manage command - review requests I created

use clap::{Args, ValueEnum};
use revman_core::{CardAction, Config, ListViewKind, Outcome, TabbedListView};

use super::{connect, report_status, require_session};
use crate::prompt::TerminalPrompt;
use crate::render;

/// Manage my review requests
#[derive(Args, Debug)]
pub struct ManageArgs {
    /// Tab to show
    #[arg(short, long, value_enum, default_value_t = ManageTab::PendingReviews)]
    pub tab: ManageTab,

    /// Delete the request with this task id
    #[arg(long, value_name = "ID", group = "action")]
    pub delete: Option<i64>,

    /// Delete every approved request (approved tab only)
    #[arg(long, group = "action")]
    pub delete_all: bool,

    /// Re-open an approved request for a quick check
    #[arg(long, value_name = "ID", group = "action")]
    pub reopen_quick: Option<i64>,

    /// Re-open an approved request for a full review from scratch
    #[arg(long, value_name = "ID", group = "action")]
    pub reopen_reset: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ManageTab {
    PendingReviews,
    Approved,
}

impl ManageTab {
    fn index(self) -> usize {
        match self {
            ManageTab::PendingReviews => 0,
            ManageTab::Approved => 1,
        }
    }
}

impl ManageArgs {
    fn action(&self) -> Option<(i64, CardAction)> {
        self.delete
            .map(|id| (id, CardAction::Delete))
            .or(self.reopen_quick.map(|id| (id, CardAction::ReopenQuick)))
            .or(self.reopen_reset.map(|id| (id, CardAction::ReopenReset)))
    }

    /// Execute the manage command
    pub async fn execute(&self, config: &Config, assume_yes: bool) -> anyhow::Result<()> {
        let client = connect(config)?;
        let session = require_session(&client, config).await?;
        let prompt = TerminalPrompt::new(assume_yes);

        let mut view = TabbedListView::new(client.clone(), ListViewKind::Manager);
        view.activate(self.tab.index()).await?;

        if let Some((task_id, action)) = self.action() {
            match view.perform(task_id, action, &prompt).await? {
                Outcome::Done => println!("Done: {} #{}", action, task_id),
                Outcome::Declined => println!("Cancelled."),
                Outcome::Failed(reason) => tracing::debug!(%reason, "Action failed"),
            }
            println!();
        }

        if self.delete_all {
            if !view.can_delete_all() {
                anyhow::bail!("--delete-all needs a non-empty approved tab (use --tab approved)");
            }
            match view.delete_all(&prompt).await? {
                Some(report) => tracing::info!(
                    attempted = report.attempted,
                    deleted = report.deleted,
                    failed = report.failed,
                    "Bulk delete finished"
                ),
                None => println!("Cancelled."),
            }
            println!();
        }

        let tab = view.active_tab()?;
        println!("{} ({})", tab.label, view.tasks().len());
        println!();

        if !report_status(view.status()) {
            return Ok(());
        }

        if let Some(summary) = view.summary() {
            render::print_task_summary(&summary);
        }

        if view.tasks().is_empty() {
            println!("Nothing here.");
            return Ok(());
        }

        let actions = view.card_actions()?;
        for task in view.tasks() {
            render::print_task(task, &session, view.kind(), actions);
        }
        if view.can_delete_all() {
            println!("Delete all with --delete-all");
        }

        Ok(())
    }
}
