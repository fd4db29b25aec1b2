//! Description enhancement from matching context entries.

use super::{InsightEngine, TaskDraft};
use crate::storage::ContextEntry;

const MEETING_NOTE: &str =
    "\n\n📅 Related to upcoming meeting - ensure preparation is complete.";
const CLIENT_NOTE: &str = "\n\n👥 Client-facing task - maintain professional standards.";
const DEADLINE_NOTE: &str = "\n\n⚠️ Time-sensitive - monitor deadline closely.";

impl InsightEngine {
    /// Enhance a draft's description with notes derived from context.
    ///
    /// Context entries whose content mentions the draft title
    /// (case-insensitively) are pooled; the pooled text can contribute a
    /// meeting-preparation note, a client-facing note, and a
    /// deadline-urgency note, appended in that order as separate
    /// paragraphs. Without matching context the description is returned
    /// unchanged.
    pub fn enhance_description(&self, draft: &TaskDraft, context: &[ContextEntry]) -> String {
        let title = draft.title.to_lowercase();
        let related: Vec<&ContextEntry> = context
            .iter()
            .filter(|entry| entry.content.to_lowercase().contains(&title))
            .collect();

        if related.is_empty() {
            return draft.description.clone();
        }

        let pooled: String = related
            .iter()
            .map(|entry| entry.content.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        let mut enhanced = draft.description.clone();
        if pooled.contains("meeting") {
            enhanced.push_str(MEETING_NOTE);
        }
        if pooled.contains("client") || pooled.contains("customer") {
            enhanced.push_str(CLIENT_NOTE);
        }
        if pooled.contains("deadline") || pooled.contains("due") {
            enhanced.push_str(DEADLINE_NOTE);
        }
        enhanced
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

    fn entry(content: &str) -> ContextEntry {
        ContextEntry::new(
            content,
            ContextSource::Email,
            Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_unchanged_without_matching_context() {
        let draft = TaskDraft::new("Budget Report").with_description("Compile Q2 numbers");
        let context = vec![entry("Nothing about that task here")];
        assert_eq!(
            engine().enhance_description(&draft, &context),
            "Compile Q2 numbers"
        );
    }

    #[test]
    fn test_client_and_deadline_notes_in_order() {
        let draft = TaskDraft::new("Budget Report").with_description("Compile Q2 numbers");
        let context = vec![entry("Budget Report client deadline is Friday")];

        let enhanced = engine().enhance_description(&draft, &context);
        assert!(enhanced.starts_with("Compile Q2 numbers"));

        let client_pos = enhanced.find("Client-facing task").unwrap();
        let deadline_pos = enhanced.find("Time-sensitive").unwrap();
        assert!(client_pos < deadline_pos);
        assert!(!enhanced.contains("upcoming meeting"));
    }

    #[test]
    fn test_title_match_is_case_insensitive() {
        let draft = TaskDraft::new("BUDGET report").with_description("Numbers");
        let context = vec![entry("The budget REPORT is due soon")];
        let enhanced = engine().enhance_description(&draft, &context);
        assert!(enhanced.contains("Time-sensitive"));
    }

    #[test]
    fn test_all_three_notes_from_pooled_entries() {
        let draft = TaskDraft::new("sync").with_description("Weekly sync");
        let context = vec![
            entry("The sync meeting moved to Monday"),
            entry("Our customer asked about the sync deadline"),
        ];
        let enhanced = engine().enhance_description(&draft, &context);

        let meeting_pos = enhanced.find("upcoming meeting").unwrap();
        let client_pos = enhanced.find("Client-facing").unwrap();
        let deadline_pos = enhanced.find("Time-sensitive").unwrap();
        assert!(meeting_pos < client_pos && client_pos < deadline_pos);
    }
}
