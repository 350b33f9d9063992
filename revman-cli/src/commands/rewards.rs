//! Rewards command - points earned per review cycle

use clap::Args;
use revman_core::view::{cycle_label, MAX_CYCLE_OFFSET};
use revman_core::{Config, RewardsView};

use super::{connect, report_status, require_session};
use crate::render;

/// Show rewards for a review cycle
#[derive(Args, Debug)]
pub struct RewardsArgs {
    /// Cycle to show: 0 is the current cycle, 1 the previous one
    #[arg(short, long, default_value_t = 0, value_parser = clap::value_parser!(u32).range(0..=MAX_CYCLE_OFFSET as i64))]
    pub cycle: u32,
}

impl RewardsArgs {
    /// Execute the rewards command
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let client = connect(config)?;
        require_session(&client, config).await?;

        let mut view = RewardsView::new(client.clone());
        view.select_cycle(self.cycle).await;

        println!("Rewards - {}", cycle_label(view.cycle_offset()));
        println!();

        if !report_status(view.status()) {
            return Ok(());
        }
        if view.rewards().is_empty() {
            println!("No rewards in this cycle.");
            return Ok(());
        }

        for reward in view.rewards() {
            render::print_reward(reward);
        }
        println!();
        render::print_reward_summary(&view.summary());

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Cli {
        #[command(flatten)]
        rewards: RewardsArgs,
    }

    #[test]
    fn test_cycle_range() {
        assert_eq!(Cli::parse_from(["rewards"]).rewards.cycle, 0);
        assert_eq!(Cli::parse_from(["rewards", "--cycle", "4"]).rewards.cycle, 4);
        assert!(Cli::try_parse_from(["rewards", "--cycle", "5"]).is_err());
    }
}
