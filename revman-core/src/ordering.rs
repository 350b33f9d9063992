//! Display order shared by every task and reward list
//!
//! Lists are ordered by repository name, then by PR number. Missing values
//! sort last on their key; an empty repository name counts as missing.

use std::cmp::Ordering;

use crate::model::{Reward, Task};

/// Items that carry a repository and PR number
pub trait RepoPrKey {
    /// Repository name, if known
    fn repo(&self) -> Option<&str>;
    /// Pull request number, if known
    fn pr_number(&self) -> Option<u64>;
}

impl RepoPrKey for Task {
    fn repo(&self) -> Option<&str> {
        self.github_repo.as_deref()
    }

    fn pr_number(&self) -> Option<u64> {
        self.pr_number
    }
}

impl RepoPrKey for Reward {
    fn repo(&self) -> Option<&str> {
        self.repo.as_deref()
    }

    fn pr_number(&self) -> Option<u64> {
        self.pr_number
    }
}

/// Order names the way people read them: case-insensitive, then byte-wise
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

fn nulls_last<T>(a: Option<T>, b: Option<T>, cmp: impl FnOnce(T, T) -> Ordering) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => cmp(a, b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Compare two items by (repository, PR number), missing values last
pub fn compare_repo_and_pr<T: RepoPrKey>(a: &T, b: &T) -> Ordering {
    let repo_a = a.repo().filter(|r| !r.is_empty());
    let repo_b = b.repo().filter(|r| !r.is_empty());
    nulls_last(repo_a, repo_b, compare_names)
        .then_with(|| nulls_last(a.pr_number(), b.pr_number(), |x, y| x.cmp(&y)))
}

/// Stable in-place sort by (repository, PR number)
pub fn sort_by_repo_and_pr<T: RepoPrKey>(items: &mut [T]) {
    items.sort_by(compare_repo_and_pr::<T>);
}
