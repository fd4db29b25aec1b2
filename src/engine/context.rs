//! Context analysis: free-text entries into insights.

use super::{contains_any, Insight, InsightEngine, InsightKind};
use crate::storage::ContextEntry;

impl InsightEngine {
    /// Analyze context entries into insights.
    ///
    /// Each entry is inspected independently and may produce zero, one,
    /// or several insights; the checks are not mutually exclusive.
    pub fn analyze_context(&self, entries: &[ContextEntry]) -> Vec<Insight> {
        let mut insights = Vec::new();

        for entry in entries {
            let content = entry.content.to_lowercase();

            if contains_any(&content, &["meeting", "appointment"]) {
                insights.push(Insight::new(
                    InsightKind::Priority,
                    0.85,
                    "High priority due to meeting context",
                    "Meeting-related tasks typically require immediate attention",
                ));
            }

            if contains_any(&content, &["urgent", "asap", "immediately"]) {
                insights.push(Insight::new(
                    InsightKind::Priority,
                    0.92,
                    "Critical priority detected",
                    "Urgent language indicates immediate action required",
                ));
            }

            if contains_any(&content, &["deadline", "due"]) {
                insights.push(Insight::new(
                    InsightKind::Deadline,
                    0.78,
                    "Consider shorter deadline",
                    "Explicit deadline mentioned in context",
                ));
            }
        }

        insights
    }
}
