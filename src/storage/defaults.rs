//! Seed data returned when a collection has never been written.
//!
//! These records match the shapes persisted by the store and give a fresh
//! install something to render before the user adds anything.

use chrono::{DateTime, Utc};

use super::{Category, ContextEntry, ContextSource, Priority, Task, TaskStatus};

fn ts(rfc3339: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(rfc3339)
        .expect("seed timestamps are valid RFC 3339")
        .with_timezone(&Utc)
}

/// Default task seed set.
pub fn default_tasks() -> Vec<Task> {
    vec![
        Task {
            id: "1".to_string(),
            title: "Complete project proposal".to_string(),
            description: "Draft and finalize the Q4 project proposal for the new mobile app initiative".to_string(),
            category: "Work".to_string(),
            priority: Priority::High,
            priority_score: 85,
            status: TaskStatus::InProgress,
            deadline: "2025-01-20".to_string(),
            created_at: ts("2025-01-15T10:00:00Z"),
            updated_at: ts("2025-01-15T10:00:00Z"),
            tags: vec!["proposal".to_string(), "mobile".to_string(), "Q4".to_string()],
            ai_suggestions: None,
        },
        Task {
            id: "2".to_string(),
            title: "Review team performance metrics".to_string(),
            description: "Analyze the monthly performance data and prepare feedback for team members".to_string(),
            category: "Management".to_string(),
            priority: Priority::Medium,
            priority_score: 65,
            status: TaskStatus::Pending,
            deadline: "2025-01-18".to_string(),
            created_at: ts("2025-01-14T09:00:00Z"),
            updated_at: ts("2025-01-14T09:00:00Z"),
            tags: vec!["review".to_string(), "team".to_string(), "metrics".to_string()],
            ai_suggestions: None,
        },
        Task {
            id: "3".to_string(),
            title: "Update documentation".to_string(),
            description: "Update the API documentation to reflect recent changes in the authentication system".to_string(),
            category: "Development".to_string(),
            priority: Priority::Low,
            priority_score: 35,
            status: TaskStatus::Pending,
            deadline: "2025-01-25".to_string(),
            created_at: ts("2025-01-13T14:00:00Z"),
            updated_at: ts("2025-01-13T14:00:00Z"),
            tags: vec!["documentation".to_string(), "API".to_string(), "auth".to_string()],
            ai_suggestions: None,
        },
    ]
}

/// Default context entry seed set.
pub fn default_context_entries() -> Vec<ContextEntry> {
    vec![
        ContextEntry {
            id: "1".to_string(),
            content: "Meeting with client tomorrow at 2 PM to discuss project requirements. Need to prepare presentation slides.".to_string(),
            source: ContextSource::Email,
            timestamp: ts("2025-01-15T08:30:00Z"),
            processed: true,
            insights: Some(vec![
                "High priority meeting requiring preparation".to_string(),
                "Presentation task identified".to_string(),
            ]),
            related_tasks: Some(vec!["1".to_string()]),
        },
        ContextEntry {
            id: "2".to_string(),
            content: "Urgent: The API documentation needs to be updated before the next release. Sarah mentioned this in the standup.".to_string(),
            source: ContextSource::Notes,
            timestamp: ts("2025-01-15T09:15:00Z"),
            processed: true,
            insights: Some(vec![
                "Urgent documentation task".to_string(),
                "Team dependency identified".to_string(),
            ]),
            related_tasks: Some(vec!["3".to_string()]),
        },
        ContextEntry {
            id: "3".to_string(),
            content: "John says the performance review deadline is this Friday. Make sure to complete the analysis by Thursday.".to_string(),
            source: ContextSource::Whatsapp,
            timestamp: ts("2025-01-15T11:20:00Z"),
            processed: false,
            insights: None,
            related_tasks: Some(vec!["2".to_string()]),
        },
    ]
}

/// Default category seed set.
pub fn default_categories() -> Vec<Category> {
    let category = |id: &str, name: &str, color: &str, usage_count: u32, description: &str| Category {
        id: id.to_string(),
        name: name.to_string(),
        color: color.to_string(),
        usage_count,
        description: Some(description.to_string()),
    };

    vec![
        category("1", "Work", "#3B82F6", 5, "Professional tasks and projects"),
        category("2", "Personal", "#10B981", 3, "Personal activities and goals"),
        category("3", "Development", "#8B5CF6", 4, "Coding and technical tasks"),
        category("4", "Management", "#F59E0B", 2, "Leadership and team management"),
        category("5", "Learning", "#EF4444", 1, "Education and skill development"),
        category("6", "Health", "#06B6D4", 2, "Health and wellness activities"),
    ]
}
