//! Live suggestions for a task being edited.
//!
//! While the user types, the UI resubmits the draft; recomputation only
//! runs after input pauses for the debounce window, and a newer
//! submission cancels any pending one (last request wins).

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::engine::{InsightEngine, TaskDraft};
use crate::storage::{AiSuggestions, ContextEntry};

/// Quiet period before a submitted draft is evaluated.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_secs(1);

const ENHANCED_NOTE: &str = "AI-enhanced description available";

/// Compute the full advisory bundle for a draft: suggested category,
/// suggested deadline, and a context-enhanced description when the
/// context actually adds something.
pub fn suggest_for_draft(
    engine: &InsightEngine,
    draft: &TaskDraft,
    context: &[ContextEntry],
    existing_categories: &[String],
) -> AiSuggestions {
    let enhanced = engine.enhance_description(draft, context);
    let enhanced = (enhanced != draft.description).then_some(enhanced);

    AiSuggestions {
        suggested_category: Some(engine.suggest_category(draft, existing_categories)),
        suggested_deadline: Some(
            engine
                .suggest_deadline(draft, context)
                .format("%Y-%m-%d")
                .to_string(),
        ),
        contextual_notes: enhanced
            .is_some()
            .then(|| vec![ENHANCED_NOTE.to_string()]),
        enhanced_description: enhanced,
    }
}

/// Debounced, cancellable suggestion runner.
///
/// [`submit`](Self::submit) replaces any pending computation; results are
/// published on a watch channel so the UI can react to the latest bundle
/// without polling.
pub struct DebouncedSuggester {
    engine: Arc<InsightEngine>,
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
    results: watch::Sender<Option<AiSuggestions>>,
}

impl DebouncedSuggester {
    /// Create a suggester with the default one-second debounce.
    pub fn new(engine: Arc<InsightEngine>) -> Self {
        Self::with_delay(engine, DEFAULT_DEBOUNCE)
    }

    /// Create a suggester with a custom debounce window.
    pub fn with_delay(engine: Arc<InsightEngine>, delay: Duration) -> Self {
        let (results, _) = watch::channel(None);
        Self {
            engine,
            delay,
            pending: Mutex::new(None),
            results,
        }
    }

    /// Subscribe to suggestion bundles. The channel holds the most recent
    /// result; `None` until the first computation completes.
    pub fn subscribe(&self) -> watch::Receiver<Option<AiSuggestions>> {
        self.results.subscribe()
    }

    /// Submit the current draft state, superseding any pending request.
    pub fn submit(
        &self,
        draft: TaskDraft,
        context: Vec<ContextEntry>,
        existing_categories: Vec<String>,
    ) {
        let engine = self.engine.clone();
        let results = self.results.clone();
        let delay = self.delay;

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let bundle = suggest_for_draft(&engine, &draft, &context, &existing_categories);
            // Receivers may all be gone; dropping the result is fine.
            let _ = results.send(Some(bundle));
        });

        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(previous) = pending.replace(handle) {
            debug!("Superseding pending suggestion request");
            previous.abort();
        }
    }

    /// Cancel any pending computation without submitting a new one.
    pub fn cancel(&self) {
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(handle) = pending.take() {
            handle.abort();
        }
    }
}

impl Drop for DebouncedSuggester {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{BaselinePolicy, FixedClock};
    use crate::storage::ContextSource;
    use chrono::{TimeZone, Utc};

    fn engine() -> Arc<InsightEngine> {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        Arc::new(InsightEngine::new(
            Arc::new(FixedClock(now)),
            BaselinePolicy::Fixed(0.0),
        ))
    }

    fn entry(content: &str) -> ContextEntry {
        ContextEntry::new(
            content,
            ContextSource::Email,
            Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_bundle_for_plain_draft() {
        let draft = TaskDraft::new("Water the plants");
        let bundle = suggest_for_draft(&engine(), &draft, &[], &["Personal".to_string()]);

        assert_eq!(bundle.suggested_category.as_deref(), Some("Personal"));
        assert_eq!(bundle.suggested_deadline.as_deref(), Some("2025-06-08"));
        assert!(bundle.enhanced_description.is_none());
        assert!(bundle.contextual_notes.is_none());
    }

    #[test]
    fn test_bundle_includes_enhancement_when_context_matches() {
        let draft = TaskDraft::new("Budget Report").with_description("Compile numbers");
        let context = vec![entry("Budget Report client deadline is Friday")];
        let bundle = suggest_for_draft(&engine(), &draft, &context, &[]);

        let enhanced = bundle.enhanced_description.unwrap();
        assert!(enhanced.contains("Client-facing"));
        assert_eq!(
            bundle.contextual_notes,
            Some(vec![ENHANCED_NOTE.to_string()])
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_latest_submission_wins() {
        let suggester = DebouncedSuggester::with_delay(engine(), Duration::from_millis(100));
        let mut receiver = suggester.subscribe();

        suggester.submit(TaskDraft::new("Email the vendor"), vec![], vec![]);
        // Resubmit before the quiet period elapses; the first request
        // must never publish.
        tokio::time::sleep(Duration::from_millis(10)).await;
        suggester.submit(TaskDraft::new("Research pricing"), vec![], vec![]);

        receiver.changed().await.unwrap();
        let bundle = receiver.borrow().clone().unwrap();
        // 14-day research deadline, not the 2-day email one.
        assert_eq!(bundle.suggested_deadline.as_deref(), Some("2025-06-15"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_discards_pending_request() {
        let suggester = DebouncedSuggester::with_delay(engine(), Duration::from_millis(50));
        let receiver = suggester.subscribe();

        suggester.submit(TaskDraft::new("Email the vendor"), vec![], vec![]);
        suggester.cancel();

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(receiver.borrow().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_submission_publishes_after_quiet_period() {
        let suggester = DebouncedSuggester::with_delay(engine(), Duration::from_millis(100));
        let mut receiver = suggester.subscribe();

        suggester.submit(
            TaskDraft::new("Discussion with the vendor"),
            vec![],
            vec!["Work".to_string()],
        );

        receiver.changed().await.unwrap();
        let bundle = receiver.borrow().clone().unwrap();
        assert_eq!(bundle.suggested_category.as_deref(), Some("Meetings"));
    }
}
