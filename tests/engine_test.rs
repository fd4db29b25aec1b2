//! Integration tests for the insight engine's observable properties.
//!
//! These exercise the public API the way the repository and UI do,
//! including under the randomized baseline where only relative and
//! structural properties are guaranteed.

use std::sync::Arc;

use chrono::{TimeZone, Utc};

use smart_todo::engine::{
    BaselinePolicy, FixedClock, InsightEngine, InsightKind, SystemClock, TaskDraft,
    MAX_TASK_SUGGESTIONS,
};
use smart_todo::storage::{ContextEntry, ContextSource, Priority, Task};

fn fixed_now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

fn engine(policy: BaselinePolicy) -> InsightEngine {
    InsightEngine::new(Arc::new(FixedClock(fixed_now())), policy)
}

fn task(title: &str, deadline: &str) -> Task {
    Task::new(title, fixed_now()).with_deadline(deadline)
}

fn entry(content: &str) -> ContextEntry {
    ContextEntry::new(content, ContextSource::Manual, fixed_now())
}

#[cfg(test)]
mod prioritize_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_buckets_match_scores_under_random_baseline() {
        let engine = engine(BaselinePolicy::Random);
        let tasks: Vec<Task> = (0..50)
            .map(|i| task(&format!("Task {}", i), "2025-06-04"))
            .collect();

        for scored in engine.prioritize(&tasks, &[]) {
            assert_eq!(
                scored.priority,
                Priority::from_score(scored.priority_score),
                "score {} must map to bucket {}",
                scored.priority_score,
                scored.priority
            );
            assert!(scored.priority_score <= 100);
        }
    }

    #[tokio::test]
    async fn test_output_sorted_descending_under_random_baseline() {
        let engine = engine(BaselinePolicy::Random);
        let tasks: Vec<Task> = (0..50)
            .map(|i| task(&format!("Task {}", i), "2025-06-20"))
            .collect();

        let scored = engine.prioritize(&tasks, &[]);
        for pair in scored.windows(2) {
            assert!(pair[0].priority_score >= pair[1].priority_score);
        }
    }

    #[tokio::test]
    async fn test_random_baseline_varies_across_runs() {
        // Rescoring the same set twice under the random policy is
        // expected to disagree somewhere across 20 tasks.
        let engine = engine(BaselinePolicy::Random);
        let tasks: Vec<Task> = (0..20)
            .map(|i| task(&format!("Task {}", i), "2025-06-20"))
            .collect();

        let first: Vec<u8> = engine
            .prioritize(&tasks, &[])
            .into_iter()
            .map(|t| t.priority_score)
            .collect();
        let second: Vec<u8> = engine
            .prioritize(&tasks, &[])
            .into_iter()
            .map(|t| t.priority_score)
            .collect();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_seeded_baseline_reproduces_scores() {
        let tasks: Vec<Task> = (0..10)
            .map(|i| task(&format!("Task {}", i), "2025-06-20"))
            .collect();

        let run = |seed: u64| -> Vec<u8> {
            engine(BaselinePolicy::Seeded(seed))
                .prioritize(&tasks, &[])
                .into_iter()
                .map(|t| t.priority_score)
                .collect()
        };
        assert_eq!(run(5), run(5));
    }

    #[tokio::test]
    async fn test_system_clock_engine_scores_overdue_work_highest() {
        // Sanity check with the real clock: an overdue urgent task beats
        // a far-future plain one under a fixed baseline.
        let engine = InsightEngine::new(Arc::new(SystemClock), BaselinePolicy::Fixed(0.0));
        let tasks = vec![
            task("Routine cleanup", "2099-01-01"),
            task("Urgent fix", "2000-01-01"),
        ];
        let scored = engine.prioritize(&tasks, &[]);
        assert_eq!(scored[0].title, "Urgent fix");
    }
}

#[cfg(test)]
mod suggestion_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_urgent_research_deadline_is_halved() {
        let engine = engine(BaselinePolicy::Random);
        let draft = TaskDraft::new("urgent research project");
        let context = vec![entry("this is urgent, start now")];

        let suggested = engine.suggest_deadline(&draft, &context);
        // 14 research days halved (rounded up) to 7 from the fixed now.
        assert_eq!(suggested.to_string(), "2025-06-08");
    }

    #[tokio::test]
    async fn test_call_rule_beats_respond_rule() {
        let engine = engine(BaselinePolicy::Random);
        let draft = TaskDraft::new("Schedule a call with client");

        // "call" is Meetings-eligible and appears in an earlier rule than
        // any Communication keyword, so Meetings wins.
        assert_eq!(engine.suggest_category(&draft, &[]), "Meetings");
    }

    #[tokio::test]
    async fn test_budget_report_enhancement_note_order() {
        let engine = engine(BaselinePolicy::Random);
        let draft = TaskDraft::new("Budget Report").with_description("Compile Q2 numbers");
        let context = vec![entry("Budget Report client deadline is Friday")];

        let enhanced = engine.enhance_description(&draft, &context);

        assert!(enhanced.starts_with("Compile Q2 numbers"));
        let client_pos = enhanced.find("Client-facing").expect("client note missing");
        let deadline_pos = enhanced.find("Time-sensitive").expect("deadline note missing");
        assert!(client_pos < deadline_pos);
    }

    #[tokio::test]
    async fn test_more_than_three_qualifying_entries_cap_at_three() {
        let engine = engine(BaselinePolicy::Random);
        let entries = vec![
            entry("deadline tomorrow"),
            entry("meeting with legal"),
            entry("invoice due friday"),
            entry("another deadline"),
            entry("email them and respond"),
        ];

        let drafts = engine.generate_task_suggestions(&entries);
        assert_eq!(drafts.len(), MAX_TASK_SUGGESTIONS);
        // Entry order first, rule order within an entry.
        assert_eq!(drafts[0].title, "Review upcoming deadline");
        assert_eq!(drafts[1].title, "Schedule meeting mentioned in context");
        assert_eq!(drafts[2].title, "Review upcoming deadline");
    }

    #[tokio::test]
    async fn test_analysis_emits_independent_insights() {
        let engine = engine(BaselinePolicy::Random);
        let insights = engine.analyze_context(&[
            entry("urgent appointment about the due date"),
            entry("nothing interesting"),
        ]);

        let kinds: Vec<InsightKind> = insights.iter().map(|i| i.kind).collect();
        assert_eq!(
            kinds,
            vec![InsightKind::Priority, InsightKind::Priority, InsightKind::Deadline]
        );
        assert_eq!(insights[1].confidence, 0.92);
    }

    #[tokio::test]
    async fn test_malformed_deadline_never_fails() {
        let engine = engine(BaselinePolicy::Fixed(0.0));
        let scored = engine.prioritize(&[task("Plain", "soon-ish")], &[]);
        // Unparseable dates count as due now: the most urgent band.
        assert_eq!(scored[0].priority_score, 30);
    }
}
