//! Deadline suggestion for task drafts.

use chrono::{Duration, NaiveDate};

use super::{combined_text, contains_any, InsightEngine, TaskDraft};
use crate::storage::ContextEntry;

impl InsightEngine {
    /// Suggest a calendar deadline for a draft.
    ///
    /// The day count comes from the first matching complexity rule
    /// (research-style work gets the longest runway, quick communication
    /// the shortest), defaulting to one week. Urgent language anywhere in
    /// the context halves the count, rounding up.
    pub fn suggest_deadline(&self, draft: &TaskDraft, context: &[ContextEntry]) -> NaiveDate {
        let content = combined_text(&draft.title, &draft.description);

        let mut days: i64 = if contains_any(&content, &["research", "analysis"]) {
            14
        } else if contains_any(&content, &["email", "call"]) {
            2
        } else if contains_any(&content, &["meeting", "presentation"]) {
            5
        } else if contains_any(&content, &["report", "document"]) {
            10
        } else {
            7
        };

        let urgent_context = context.iter().any(|entry| {
            let content = entry.content.to_lowercase();
            content.contains("urgent") || content.contains("asap")
        });
        if urgent_context {
            days = (days + 1) / 2;
        }

        (self.clock.now() + Duration::days(days)).date_naive()
    }
}
