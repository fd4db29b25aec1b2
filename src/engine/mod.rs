//! Heuristic insight engine.
//!
//! This module provides the simulated "AI" layer of the task manager:
//! - Priority scoring and bulk reprioritization
//! - Deadline and category suggestions for task drafts
//! - Description enhancement from matching context entries
//! - Context analysis into insights
//! - Task-draft extraction from context
//!
//! Every function is a pure transformation of its inputs plus the injected
//! clock and baseline policy; input records are never mutated and no state
//! is retained between calls.

mod baseline;
mod category;
mod clock;
mod context;
mod deadline;
mod enhance;
mod scoring;
mod suggestions;

pub use baseline::BaselinePolicy;
pub use clock::{Clock, FixedClock, SystemClock};
pub use suggestions::MAX_TASK_SUGGESTIONS;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::storage::{Priority, TaskStatus};

use baseline::BaselineSampler;

/// The heuristic insight engine.
///
/// Constructed once per process and injected into consumers. Holds the
/// clock and the priority baseline sampler; everything else is computed
/// from call arguments.
pub struct InsightEngine {
    clock: Arc<dyn Clock>,
    baseline: BaselineSampler,
}

impl InsightEngine {
    /// Create a new engine with the given clock and baseline policy.
    pub fn new(clock: Arc<dyn Clock>, baseline: BaselinePolicy) -> Self {
        Self {
            clock,
            baseline: baseline.sampler(),
        }
    }
}

/// Kind of suggestion an insight carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    /// The entry suggests adjusting a task's priority.
    Priority,
    /// The entry suggests adjusting a deadline.
    Deadline,
    /// The entry suggests a category.
    Category,
    /// The entry suggests enhancing a description.
    Enhancement,
}

impl InsightKind {
    /// Get the kind name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightKind::Priority => "priority",
            InsightKind::Deadline => "deadline",
            InsightKind::Category => "category",
            InsightKind::Enhancement => "enhancement",
        }
    }
}

impl std::fmt::Display for InsightKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for InsightKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "priority" => Ok(InsightKind::Priority),
            "deadline" => Ok(InsightKind::Deadline),
            "category" => Ok(InsightKind::Category),
            "enhancement" => Ok(InsightKind::Enhancement),
            _ => Err(format!("Unknown insight kind: {}", s)),
        }
    }
}

/// An engine-produced suggestion derived from context text.
///
/// Transient: insights annotate tasks and context entries but are not
/// persisted as their own collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    /// What the insight suggests changing.
    #[serde(rename = "type")]
    pub kind: InsightKind,
    /// Confidence in [0.0, 1.0].
    pub confidence: f64,
    /// Human-readable suggestion.
    pub suggestion: String,
    /// Why the engine produced this insight.
    pub reasoning: String,
}

impl Insight {
    /// Create a new insight, clamping confidence into [0.0, 1.0].
    pub fn new(
        kind: InsightKind,
        confidence: f64,
        suggestion: impl Into<String>,
        reasoning: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            confidence: confidence.clamp(0.0, 1.0),
            suggestion: suggestion.into(),
            reasoning: reasoning.into(),
        }
    }
}

/// A partial task: the shape accepted by `create` and produced by
/// task-suggestion extraction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    /// Task title.
    pub title: String,
    /// Free-text description.
    pub description: String,
    /// Category label.
    pub category: String,
    /// Priority bucket.
    pub priority: Priority,
    /// Completion state.
    pub status: TaskStatus,
    /// Deadline date string (`YYYY-MM-DD`), may be empty.
    pub deadline: String,
    /// Free-text tags.
    pub tags: Vec<String>,
}

impl TaskDraft {
    /// Create a draft with the given title and defaults everywhere else.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the category
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the priority
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Set the deadline date string
    pub fn with_deadline(mut self, deadline: impl Into<String>) -> Self {
        self.deadline = deadline.into();
        self
    }
}

/// Lowercased title and description joined for keyword matching.
pub(crate) fn combined_text(title: &str, description: &str) -> String {
    format!("{} {}", title, description).to_lowercase()
}

/// Whether any of the needles occurs in the haystack.
pub(crate) fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combined_text_lowercases_both_parts() {
        assert_eq!(combined_text("Send Email", "To BOB"), "send email to bob");
    }

    #[test]
    fn test_contains_any() {
        assert!(contains_any("urgent fix needed", &["urgent", "critical"]));
        assert!(!contains_any("routine cleanup", &["urgent", "critical"]));
    }

    #[test]
    fn test_insight_confidence_clamp() {
        let insight = Insight::new(InsightKind::Priority, 1.4, "s", "r");
        assert_eq!(insight.confidence, 1.0);

        let insight = Insight::new(InsightKind::Deadline, -0.1, "s", "r");
        assert_eq!(insight.confidence, 0.0);
    }

    #[test]
    fn test_insight_kind_round_trip() {
        for kind in [
            InsightKind::Priority,
            InsightKind::Deadline,
            InsightKind::Category,
            InsightKind::Enhancement,
        ] {
            let parsed: InsightKind = kind.to_string().parse().unwrap();
            assert_eq!(parsed, kind);
        }
        assert!("hunch".parse::<InsightKind>().is_err());
    }

    #[test]
    fn test_insight_serializes_kind_as_type() {
        let insight = Insight::new(InsightKind::Deadline, 0.78, "s", "r");
        let json = serde_json::to_value(&insight).unwrap();
        assert_eq!(json.get("type").unwrap(), "deadline");
    }

    #[test]
    fn test_task_draft_builders() {
        let draft = TaskDraft::new("Prepare slides")
            .with_description("For the quarterly review")
            .with_category("Meetings")
            .with_priority(Priority::High)
            .with_deadline("2025-07-01");
        assert_eq!(draft.title, "Prepare slides");
        assert_eq!(draft.category, "Meetings");
        assert_eq!(draft.priority, Priority::High);
        assert_eq!(draft.status, TaskStatus::Pending);
        assert_eq!(draft.deadline, "2025-07-01");
    }
}
