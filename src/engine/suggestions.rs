//! Task-draft extraction from context entries.

use super::{contains_any, InsightEngine, TaskDraft};
use crate::storage::{ContextEntry, Priority};

/// Maximum number of drafts returned by a single extraction pass.
pub const MAX_TASK_SUGGESTIONS: usize = 3;

impl InsightEngine {
    /// Extract actionable task drafts from context entries.
    ///
    /// Entries are scanned in order and each rule fires independently, so
    /// one entry can yield several drafts. The result is truncated to the
    /// first [`MAX_TASK_SUGGESTIONS`] drafts in entry-then-rule order.
    pub fn generate_task_suggestions(&self, entries: &[ContextEntry]) -> Vec<TaskDraft> {
        let mut suggestions = Vec::new();

        for entry in entries {
            let content = entry.content.to_lowercase();

            if content.contains("meeting") && !content.contains("scheduled") {
                suggestions.push(
                    TaskDraft::new("Schedule meeting mentioned in context")
                        .with_description(format!(
                            "Follow up on meeting discussion from {}",
                            entry.source
                        ))
                        .with_category("Meetings")
                        .with_priority(Priority::Medium),
                );
            }

            if content.contains("email") && content.contains("respond") {
                suggestions.push(
                    TaskDraft::new("Respond to important email")
                        .with_description(format!(
                            "Reply to email mentioned in {} context",
                            entry.source
                        ))
                        .with_category("Communication")
                        .with_priority(Priority::High),
                );
            }

            if contains_any(&content, &["deadline", "due"]) {
                suggestions.push(
                    TaskDraft::new("Review upcoming deadline")
                        .with_description("Check and prepare for deadline mentioned in context")
                        .with_category("Review")
                        .with_priority(Priority::High),
                );
            }
        }

        suggestions.truncate(MAX_TASK_SUGGESTIONS);
        suggestions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{BaselinePolicy, FixedClock};
    use crate::storage::ContextSource;
    use chrono::{TimeZone, Utc};
    use std::sync::Arc;

    fn engine() -> InsightEngine {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        InsightEngine::new(Arc::new(FixedClock(now)), BaselinePolicy::Fixed(0.0))
    }

    fn entry(content: &str, source: ContextSource) -> ContextEntry {
        ContextEntry::new(
            content,
            source,
            Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_meeting_without_scheduled_yields_draft() {
        let drafts = engine().generate_task_suggestions(&[entry(
            "Can we set up a meeting about the launch?",
            ContextSource::Email,
        )]);
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].title, "Schedule meeting mentioned in context");
        assert_eq!(drafts[0].category, "Meetings");
        assert_eq!(drafts[0].priority, Priority::Medium);
        assert!(drafts[0].description.contains("email"));
    }

    #[test]
    fn test_already_scheduled_meeting_is_skipped() {
        let drafts = engine().generate_task_suggestions(&[entry(
            "The meeting is already scheduled for Monday",
            ContextSource::Email,
        )]);
        assert!(drafts.is_empty());
    }

    #[test]
    fn test_email_rule_needs_both_keywords() {
        let only_email = engine()
            .generate_task_suggestions(&[entry("Got an email from finance", ContextSource::Notes)]);
        assert!(only_email.is_empty());

        let both = engine().generate_task_suggestions(&[entry(
            "Need to respond to the email from finance",
            ContextSource::Notes,
        )]);
        assert_eq!(both.len(), 1);
        assert_eq!(both[0].title, "Respond to important email");
        assert_eq!(both[0].priority, Priority::High);
    }

    #[test]
    fn test_one_entry_can_fire_multiple_rules() {
        let drafts = engine().generate_task_suggestions(&[entry(
            "Meeting about the deadline; also respond to that email",
            ContextSource::Whatsapp,
        )]);
        assert_eq!(drafts.len(), 3);
        assert_eq!(drafts[0].title, "Schedule meeting mentioned in context");
        assert_eq!(drafts[1].title, "Respond to important email");
        assert_eq!(drafts[2].title, "Review upcoming deadline");
    }

    #[test]
    fn test_truncated_to_three_in_entry_then_rule_order() {
        let entries = vec![
            entry("Project deadline moved up", ContextSource::Notes),
            entry("New meeting with the vendor", ContextSource::Email),
            entry("Invoice due tomorrow", ContextSource::Manual),
            entry("Another deadline looming", ContextSource::Manual),
        ];
        let drafts = engine().generate_task_suggestions(&entries);
        assert_eq!(drafts.len(), MAX_TASK_SUGGESTIONS);
        assert_eq!(drafts[0].title, "Review upcoming deadline");
        assert_eq!(drafts[1].title, "Schedule meeting mentioned in context");
        assert_eq!(drafts[2].title, "Review upcoming deadline");
    }
}
