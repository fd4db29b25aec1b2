//! Category suggestion for task drafts.

use super::{combined_text, contains_any, InsightEngine, TaskDraft};

/// Keyword rules checked in order; the first match wins.
const CATEGORY_RULES: &[(&[&str], &str)] = &[
    (&["meeting", "call", "discussion"], "Meetings"),
    (&["email", "message", "respond"], "Communication"),
    (&["code", "develop", "bug"], "Development"),
    (&["research", "study", "learn"], "Research"),
    (&["report", "document", "write"], "Documentation"),
    (&["review", "test", "check"], "Review"),
];

impl InsightEngine {
    /// Suggest a category name for a draft.
    ///
    /// Falls back to the first existing category, then to "General".
    pub fn suggest_category(&self, draft: &TaskDraft, existing: &[String]) -> String {
        let content = combined_text(&draft.title, &draft.description);

        for (keywords, name) in CATEGORY_RULES {
            if contains_any(&content, keywords) {
                return (*name).to_string();
            }
        }

        existing
            .first()
            .cloned()
            .unwrap_or_else(|| "General".to_string())
    }
}
