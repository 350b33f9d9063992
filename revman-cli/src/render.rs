//! Plain text rendering of tasks, rewards and summaries

use chrono::{DateTime, Local, Utc};
use revman_core::summary::RankedUser;
use revman_core::{
    CardAction, ListViewKind, Reward, RewardSummary, Session, Task, TaskSummary, UserBackend,
};

/// Repository and PR number, e.g. `api #12`
pub fn repo_pr(repo: Option<&str>, pr_number: Option<u64>) -> String {
    let repo = repo.filter(|r| !r.is_empty()).unwrap_or("(unknown repo)");
    match pr_number {
        Some(n) => format!("{} #{}", repo, n),
        None => repo.to_string(),
    }
}

/// Reward points of a card, flagged when the task was already reviewed once
pub fn reward_line(reward: i64, reviewed_once: bool) -> String {
    let quick = if reviewed_once { " (quick review)" } else { "" };
    format!("Reward: {} pts{}", reward, quick)
}

pub fn local_time(at: &DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

/// One task card
pub fn print_task<B: UserBackend + ?Sized>(
    task: &Task,
    session: &Session<B>,
    kind: ListViewKind,
    actions: &[CardAction],
) {
    println!("[{}] {}", task.task_id, repo_pr(task.github_repo.as_deref(), task.pr_number));
    println!("    {}", task.pr_link);
    println!(
        "    {} | {} lines | by {}",
        task.review_priority,
        task.lines_of_code,
        session.display_name(&task.creator_public_id, &task.creator_user_name)
    );

    if !task.reviewers.is_empty() {
        let names: Vec<&str> = task
            .reviewers
            .iter()
            .map(|r| session.display_name(&r.public_id, &r.user_name))
            .collect();
        println!("    Reviewers: {}", names.join(", "));
    }

    let mut dates = format!("    Created {}", local_time(&task.created_at));
    if let Some(approved_at) = &task.approved_at {
        dates.push_str(&format!(", approved {}", local_time(approved_at)));
    }
    println!("{}", dates);

    if kind.shows_reward(task.state) {
        println!("    {}", reward_line(task.reward, task.has_been_reviewed_once));
    }

    if !actions.is_empty() {
        let labels: Vec<String> = actions.iter().map(|a| format!("--{} {}", a.label(), task.task_id)).collect();
        println!("    Actions: {}", labels.join("  "));
    }
    println!();
}

fn print_ranked(title: &str, ranked: &[RankedUser]) {
    if ranked.is_empty() {
        return;
    }
    println!("{}:", title);
    for (i, user) in ranked.iter().enumerate() {
        println!("  {}. {} ({})", i + 1, user.user_name, user.count);
    }
}

pub fn print_task_summary(summary: &TaskSummary) {
    println!("Summary");
    println!("=======");
    println!("Total approved: {}", summary.total);
    for (priority, count) in summary.by_priority.iter() {
        println!("  {:<18} {}", priority.name(), count);
    }
    for (size, count) in summary.by_size.iter() {
        println!("  {:<18} {}", size.display(), count);
    }
    print_ranked("Top reviewers", &summary.top_reviewers);
    println!();
}

pub fn print_reward(reward: &Reward) {
    let kind = if reward.was_quick_review { "quick" } else { "first" };
    println!(
        "{} | {} pts ({} review) | {} | {} lines | for {} | {}",
        repo_pr(reward.repo.as_deref(), reward.pr_number),
        reward.points,
        kind,
        reward.review_priority,
        reward.lines_of_code,
        reward.creator_user_name,
        local_time(&reward.rewarded_at)
    );
}

pub fn print_reward_summary(summary: &RewardSummary) {
    println!("Summary");
    println!("=======");
    println!("First reviews: {}", summary.first_reviews);
    println!("Quick reviews: {}", summary.quick_reviews);
    println!("Total points:  {}", summary.total_points);
    for (priority, count) in summary.by_priority.iter() {
        println!("  {:<18} {}", priority.name(), count);
    }
    for (size, count) in summary.by_size.iter() {
        println!("  {:<18} {}", size.display(), count);
    }
    print_ranked("Top creators", &summary.top_creators);
}
