//! Priority scoring and bulk reprioritization.

use chrono::{DateTime, NaiveTime, Utc};
use tracing::debug;

use super::{combined_text, contains_any, InsightEngine};
use crate::storage::{ContextEntry, Priority, Task};

const MS_PER_DAY: f64 = 1000.0 * 3600.0 * 24.0;

impl InsightEngine {
    /// Rescore every task and return the set sorted by descending
    /// priority score.
    ///
    /// Scores start from the configured baseline and gain additive
    /// bonuses for urgency keywords and deadline proximity. The sort is
    /// stable: equal scores keep their original relative order. Input
    /// tasks are not mutated; the context parameter is accepted for
    /// signature symmetry with the suggestion functions but does not
    /// influence scores.
    pub fn prioritize(&self, tasks: &[Task], _context: &[ContextEntry]) -> Vec<Task> {
        let now = self.clock.now();

        let mut scored: Vec<Task> = tasks
            .iter()
            .map(|task| {
                let score = self.score_task(task, now);
                let mut task = task.clone();
                task.priority_score = score;
                task.priority = Priority::from_score(score);
                task
            })
            .collect();

        // Vec::sort_by is stable, so ties preserve input order.
        scored.sort_by(|a, b| b.priority_score.cmp(&a.priority_score));

        debug!(tasks = scored.len(), "Reprioritized task set");
        scored
    }

    fn score_task(&self, task: &Task, now: DateTime<Utc>) -> u8 {
        let mut score = self.baseline.sample();

        let content = combined_text(&task.title, &task.description);
        if contains_any(&content, &["urgent", "critical"]) {
            score += 20.0;
        }
        if contains_any(&content, &["meeting", "presentation"]) {
            score += 15.0;
        }
        if contains_any(&content, &["email", "respond"]) {
            score += 10.0;
        }

        let days_left = days_until_deadline(&task.deadline, now);
        if days_left < 1.0 {
            score += 30.0;
        } else if days_left < 3.0 {
            score += 20.0;
        } else if days_left < 7.0 {
            score += 10.0;
        }

        score.clamp(0.0, 100.0).round() as u8
    }
}

/// Fractional days from `now` until the deadline.
///
/// A malformed deadline is treated as due now (zero days), so overdue and
/// unparseable dates both land in the most-urgent bonus band rather than
/// surfacing a parse error.
pub(crate) fn days_until_deadline(deadline: &str, now: DateTime<Utc>) -> f64 {
    let deadline_ts = parse_deadline(deadline).unwrap_or(now);
    (deadline_ts - now).num_milliseconds() as f64 / MS_PER_DAY
}

/// Parse a deadline as RFC 3339, or as a bare calendar date at midnight UTC.
fn parse_deadline(deadline: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(deadline) {
        return Some(ts.with_timezone(&Utc));
    }
    deadline
        .parse::<chrono::NaiveDate>()
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
}
