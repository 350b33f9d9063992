//! Summary statistics over a loaded list
//!
//! Summaries are folds over the in-memory list and are rebuilt from scratch
//! whenever the list changes.

use std::collections::HashMap;

use serde::Serialize;

use crate::model::{Reward, Task, TaskLinesOfCode, TaskReviewPriority};

/// Number of entries kept in a ranking
pub const TOP_N: usize = 5;

/// Counts per review priority
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PriorityCounts([usize; 3]);

impl PriorityCounts {
    fn add(&mut self, priority: TaskReviewPriority) {
        self.0[priority.index()] += 1;
    }

    /// Count for one priority
    pub fn get(&self, priority: TaskReviewPriority) -> usize {
        self.0[priority.index()]
    }

    /// Counts in priority code order
    pub fn iter(&self) -> impl Iterator<Item = (TaskReviewPriority, usize)> + '_ {
        TaskReviewPriority::ALL.into_iter().map(|p| (p, self.get(p)))
    }
}

/// Counts per size class
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SizeCounts([usize; 4]);

impl SizeCounts {
    fn add(&mut self, loc: TaskLinesOfCode) {
        self.0[loc.index()] += 1;
    }

    /// Count for one size class
    pub fn get(&self, loc: TaskLinesOfCode) -> usize {
        self.0[loc.index()]
    }

    /// Counts in size class order
    pub fn iter(&self) -> impl Iterator<Item = (TaskLinesOfCode, usize)> + '_ {
        TaskLinesOfCode::ALL.into_iter().map(|l| (l, self.get(l)))
    }
}

/// One entry in a "most frequent user" ranking
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedUser {
    pub public_id: String,
    pub user_name: String,
    pub count: usize,
}

/// Tally of appearances that remembers first-appearance order
#[derive(Debug, Default)]
struct Tally {
    slots: HashMap<String, usize>,
    entries: Vec<RankedUser>,
}

impl Tally {
    fn bump(&mut self, public_id: &str, user_name: &str) {
        match self.slots.get(public_id) {
            Some(&slot) => self.entries[slot].count += 1,
            None => {
                self.slots.insert(public_id.to_string(), self.entries.len());
                self.entries.push(RankedUser {
                    public_id: public_id.to_string(),
                    user_name: user_name.to_string(),
                    count: 1,
                });
            }
        }
    }

    /// Highest counts first; the stable sort keeps first-appearance order on ties
    fn top(mut self, n: usize) -> Vec<RankedUser> {
        self.entries.sort_by(|a, b| b.count.cmp(&a.count));
        self.entries.truncate(n);
        self.entries
    }
}

/// Summary of the approved tab in the manager view
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TaskSummary {
    pub total: usize,
    pub by_priority: PriorityCounts,
    pub by_size: SizeCounts,
    /// Most picked reviewers
    pub top_reviewers: Vec<RankedUser>,
}

impl TaskSummary {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let mut summary = TaskSummary {
            total: tasks.len(),
            ..Default::default()
        };
        let mut reviewers = Tally::default();

        for task in tasks {
            summary.by_priority.add(task.review_priority);
            summary.by_size.add(task.lines_of_code);
            for reviewer in &task.reviewers {
                reviewers.bump(&reviewer.public_id, &reviewer.user_name);
            }
        }

        summary.top_reviewers = reviewers.top(TOP_N);
        summary
    }
}

/// Summary of one reward cycle
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RewardSummary {
    pub first_reviews: usize,
    pub quick_reviews: usize,
    pub total_points: i64,
    pub by_priority: PriorityCounts,
    pub by_size: SizeCounts,
    /// Creators whose requests were reviewed most
    pub top_creators: Vec<RankedUser>,
}

impl RewardSummary {
    pub fn from_rewards(rewards: &[Reward]) -> Self {
        let mut summary = RewardSummary::default();
        let mut creators = Tally::default();

        for reward in rewards {
            if reward.was_quick_review {
                summary.quick_reviews += 1;
            } else {
                summary.first_reviews += 1;
            }
            summary.total_points += reward.points;
            summary.by_priority.add(reward.review_priority);
            summary.by_size.add(reward.lines_of_code);
            creators.bump(&reward.creator_public_id, &reward.creator_user_name);
        }

        summary.top_creators = creators.top(TOP_N);
        summary
    }
}
