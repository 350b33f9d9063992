//! Entities returned by the Review Manager backend
//!
//! Enumerations travel as their stable integer codes and must round-trip
//! exactly. Unknown codes are rejected at deserialization time.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a review request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum TaskState {
    PendingReview = 1,
    PendingChanges = 2,
    Approved = 3,
}

impl TaskState {
    /// Human readable name
    pub fn name(self) -> &'static str {
        match self {
            TaskState::PendingReview => "Pending Review",
            TaskState::PendingChanges => "Pending Changes",
            TaskState::Approved => "Approved",
        }
    }
}

impl TryFrom<u8> for TaskState {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(TaskState::PendingReview),
            2 => Ok(TaskState::PendingChanges),
            3 => Ok(TaskState::Approved),
            other => Err(format!("unknown task state {}", other)),
        }
    }
}

impl From<TaskState> for u8 {
    fn from(state: TaskState) -> Self {
        state as u8
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How thorough the requested review is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum TaskReviewPriority {
    FullReview = 1,
    BasedOnEvidence = 2,
    ApproveOnly = 3,
}

impl TaskReviewPriority {
    /// All priorities in code order
    pub const ALL: [TaskReviewPriority; 3] = [
        TaskReviewPriority::FullReview,
        TaskReviewPriority::BasedOnEvidence,
        TaskReviewPriority::ApproveOnly,
    ];

    /// Human readable name
    pub fn name(self) -> &'static str {
        match self {
            TaskReviewPriority::FullReview => "Full Review",
            TaskReviewPriority::BasedOnEvidence => "Based on Evidence",
            TaskReviewPriority::ApproveOnly => "Approve Only",
        }
    }

    /// Short explanation shown next to the option
    pub fn description(self) -> &'static str {
        match self {
            TaskReviewPriority::FullReview => "Complete code review with detailed feedback",
            TaskReviewPriority::BasedOnEvidence => "Review based on test results and evidence",
            TaskReviewPriority::ApproveOnly => "Quick approval, minimal review needed",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize - 1
    }
}

impl TryFrom<u8> for TaskReviewPriority {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(TaskReviewPriority::FullReview),
            2 => Ok(TaskReviewPriority::BasedOnEvidence),
            3 => Ok(TaskReviewPriority::ApproveOnly),
            other => Err(format!("unknown review priority {}", other)),
        }
    }
}

impl From<TaskReviewPriority> for u8 {
    fn from(priority: TaskReviewPriority) -> Self {
        priority as u8
    }
}

impl fmt::Display for TaskReviewPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Bucketed size of the change under review
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum TaskLinesOfCode {
    Under100 = 1,
    Under500 = 2,
    Under1200 = 3,
    Above1200 = 4,
}

impl TaskLinesOfCode {
    /// All size classes in code order
    pub const ALL: [TaskLinesOfCode; 4] = [
        TaskLinesOfCode::Under100,
        TaskLinesOfCode::Under500,
        TaskLinesOfCode::Under1200,
        TaskLinesOfCode::Above1200,
    ];

    /// Range label
    pub fn display(self) -> &'static str {
        match self {
            TaskLinesOfCode::Under100 => "1~99",
            TaskLinesOfCode::Under500 => "100~499",
            TaskLinesOfCode::Under1200 => "500~1199",
            TaskLinesOfCode::Above1200 => "1200+",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize - 1
    }
}

impl TryFrom<u8> for TaskLinesOfCode {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(TaskLinesOfCode::Under100),
            2 => Ok(TaskLinesOfCode::Under500),
            3 => Ok(TaskLinesOfCode::Under1200),
            4 => Ok(TaskLinesOfCode::Above1200),
            other => Err(format!("unknown lines of code class {}", other)),
        }
    }
}

impl From<TaskLinesOfCode> for u8 {
    fn from(loc: TaskLinesOfCode) -> Self {
        loc as u8
    }
}

impl fmt::Display for TaskLinesOfCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display())
    }
}

/// Transition requested through `PATCH /tasks/{id}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateAction {
    Approve,
    RequestChanges,
    ChangesAddressed,
    ReOpenQuickReview,
    ReOpenResetReview,
}

impl UpdateAction {
    /// Wire name of the action
    pub fn as_str(self) -> &'static str {
        match self {
            UpdateAction::Approve => "approve",
            UpdateAction::RequestChanges => "request_changes",
            UpdateAction::ChangesAddressed => "changes_addressed",
            UpdateAction::ReOpenQuickReview => "re_open_quick_review",
            UpdateAction::ReOpenResetReview => "re_open_reset_review",
        }
    }
}

/// A user assigned to review a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reviewer {
    pub public_id: String,
    pub user_name: String,
}

/// A known user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub public_id: String,
    pub user_name: String,
    /// Minutes of review time since the last cycle boundary (user list only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reward_since_last_tuesday: Option<i64>,
}

impl User {
    /// Reviewer reference for this user
    pub fn as_reviewer(&self) -> Reviewer {
        Reviewer {
            public_id: self.public_id.clone(),
            user_name: self.user_name.clone(),
        }
    }
}

/// A review request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub task_id: i64,
    pub github_repo: Option<String>,
    pub pr_number: Option<u64>,
    pub creator_user_name: String,
    pub creator_public_id: String,
    pub review_priority: TaskReviewPriority,
    pub lines_of_code: TaskLinesOfCode,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default, with = "timestamp::option")]
    pub approved_at: Option<DateTime<Utc>>,
    pub state: TaskState,
    pub reward: i64,
    pub has_been_reviewed_once: bool,
    pub pr_link: String,
    #[serde(default)]
    pub reviewers: Vec<Reviewer>,
}

/// Points earned for a settled review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reward {
    pub creator_public_id: String,
    pub creator_user_name: String,
    pub lines_of_code: TaskLinesOfCode,
    pub review_priority: TaskReviewPriority,
    pub pr_link: String,
    pub pr_number: Option<u64>,
    pub repo: Option<String>,
    pub points: i64,
    pub was_quick_review: bool,
    #[serde(with = "timestamp")]
    pub rewarded_at: DateTime<Utc>,
}

/// Body of `POST /tasks`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTaskRequest {
    pub pr_link: String,
    pub priority: TaskReviewPriority,
    pub lines_of_code: TaskLinesOfCode,
    pub reviewers_id: Vec<String>,
}

/// Backend timestamps, with or without an offset.
///
/// Values without an offset are stored server side in UTC.
pub(crate) mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc())
    }

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp '{}'", raw)))
    }

    pub mod option {
        use super::*;

        pub fn serialize<S: Serializer>(
            value: &Option<DateTime<Utc>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match value {
                Some(dt) => super::serialize(dt, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<DateTime<Utc>>, D::Error> {
            match Option::<String>::deserialize(deserializer)? {
                Some(raw) => super::parse(&raw)
                    .map(Some)
                    .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp '{}'", raw))),
                None => Ok(None),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_codes_round_trip() {
        for state in [TaskState::PendingReview, TaskState::PendingChanges, TaskState::Approved] {
            let json = serde_json::to_string(&state).unwrap();
            assert_eq!(serde_json::from_str::<TaskState>(&json).unwrap(), state);
        }
        assert_eq!(serde_json::to_string(&TaskState::Approved).unwrap(), "3");
        assert_eq!(serde_json::to_string(&TaskReviewPriority::ApproveOnly).unwrap(), "3");
        assert_eq!(serde_json::to_string(&TaskLinesOfCode::Above1200).unwrap(), "4");
    }

    #[test]
    fn test_unknown_codes_rejected() {
        assert!(serde_json::from_str::<TaskState>("0").is_err());
        assert!(serde_json::from_str::<TaskReviewPriority>("4").is_err());
        assert!(serde_json::from_str::<TaskLinesOfCode>("5").is_err());
    }

    #[test]
    fn test_lines_of_code_display() {
        let labels: Vec<_> = TaskLinesOfCode::ALL.iter().map(|l| l.display()).collect();
        assert_eq!(labels, vec!["1~99", "100~499", "500~1199", "1200+"]);
    }

    #[test]
    fn test_update_action_wire_names() {
        assert_eq!(
            serde_json::to_string(&UpdateAction::ReOpenQuickReview).unwrap(),
            "\"re_open_quick_review\""
        );
        assert_eq!(UpdateAction::RequestChanges.as_str(), "request_changes");
    }

    #[test]
    fn test_parse_task_with_naive_timestamps() {
        let json = r#"{
            "task_id": 7,
            "github_repo": "api",
            "pr_number": 12,
            "creator_user_name": "Ana",
            "creator_public_id": "u-1",
            "review_priority": 2,
            "lines_of_code": 3,
            "created_at": "2025-03-04T10:15:00",
            "approved_at": null,
            "state": 1,
            "reward": 40,
            "has_been_reviewed_once": false,
            "pr_link": "https://github.com/acme/api/pull/12",
            "reviewers": [{"public_id": "u-2", "user_name": "Bo"}]
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.state, TaskState::PendingReview);
        assert_eq!(task.review_priority, TaskReviewPriority::BasedOnEvidence);
        assert_eq!(task.lines_of_code, TaskLinesOfCode::Under1200);
        assert_eq!(task.created_at.to_rfc3339(), "2025-03-04T10:15:00+00:00");
        assert!(task.approved_at.is_none());
        assert_eq!(task.reviewers.len(), 1);
    }

    #[test]
    fn test_parse_reward_with_offset_timestamp() {
        let json = r#"{
            "creator_public_id": "u-1",
            "creator_user_name": "Ana",
            "lines_of_code": 1,
            "review_priority": 1,
            "pr_link": "https://example.com/x",
            "pr_number": null,
            "repo": null,
            "points": 5,
            "was_quick_review": true,
            "rewarded_at": "2025-03-04T10:15:00.123+02:00"
        }"#;
        let reward: Reward = serde_json::from_str(json).unwrap();
        assert!(reward.was_quick_review);
        assert_eq!(reward.rewarded_at.to_rfc3339(), "2025-03-04T08:15:00.123+00:00");
    }

    #[test]
    fn test_user_without_minutes() {
        let user: User = serde_json::from_str(r#"{"public_id":"u","user_name":"N"}"#).unwrap();
        assert!(user.reward_since_last_tuesday.is_none());
    }
}
