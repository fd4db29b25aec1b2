//! Persistence gateway and domain records.
//!
//! This module provides the durable key-value store behind the task
//! manager: tasks, context entries, and categories, each persisted as a
//! whole JSON collection under a fixed logical key. Reading a collection
//! that has never been written returns its seeded default set.

mod defaults;
mod sqlite;


pub use sqlite::SqliteStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::StorageResult;

/// Default priority score assigned to newly created tasks.
pub const DEFAULT_PRIORITY_SCORE: u8 = 50;

/// A unit of work tracked by the task manager.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique task identifier, immutable after creation.
    pub id: String,
    /// Short task title.
    pub title: String,
    /// Free-text description.
    pub description: String,
    /// Free-text category label. Not foreign-keyed: the named category may
    /// have been renamed or deleted.
    pub category: String,
    /// Discrete priority bucket derived from `priority_score`.
    pub priority: Priority,
    /// Priority score (0-100) computed by the insight engine.
    pub priority_score: u8,
    /// User-controlled completion state.
    pub status: TaskStatus,
    /// Deadline as a calendar date (`YYYY-MM-DD`). Kept free-form so a
    /// malformed value degrades to "due now" during scoring instead of
    /// failing deserialization.
    pub deadline: String,
    /// When the task was created.
    pub created_at: DateTime<Utc>,
    /// When the task was last mutated.
    pub updated_at: DateTime<Utc>,
    /// Free-text tags, insertion-ordered, no duplicates.
    pub tags: Vec<String>,
    /// Most recent engine suggestions for this task. Advisory only, never
    /// auto-applied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_suggestions: Option<AiSuggestions>,
}

/// Engine suggestions attached to a task.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiSuggestions {
    /// Context-enhanced description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enhanced_description: Option<String>,
    /// Suggested category name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_category: Option<String>,
    /// Suggested deadline (`YYYY-MM-DD`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_deadline: Option<String>,
    /// Notes extracted from related context entries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contextual_notes: Option<Vec<String>>,
}

/// Discrete task priority bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Score 40 or below.
    Low,
    /// Score 41-60.
    #[default]
    Medium,
    /// Score 61-80.
    High,
    /// Score above 80.
    Critical,
}

impl Priority {
    /// Map a priority score to its bucket.
    pub fn from_score(score: u8) -> Self {
        if score > 80 {
            Priority::Critical
        } else if score > 60 {
            Priority::High
        } else if score > 40 {
            Priority::Medium
        } else {
            Priority::Low
        }
    }

    /// Get the priority name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Critical => "critical",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            "critical" => Ok(Priority::Critical),
            _ => Err(format!("Unknown priority: {}", s)),
        }
    }
}

/// User-controlled task completion state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    /// Not started.
    #[default]
    Pending,
    /// Being worked on.
    InProgress,
    /// Done.
    Completed,
}

impl TaskStatus {
    /// Next state in the manual toggle cycle:
    /// pending → in-progress → completed → pending.
    pub fn advance(&self) -> Self {
        match self {
            TaskStatus::Pending => TaskStatus::InProgress,
            TaskStatus::InProgress => TaskStatus::Completed,
            TaskStatus::Completed => TaskStatus::Pending,
        }
    }

    /// Get the status name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::Completed => "completed",
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(TaskStatus::Pending),
            "in-progress" => Ok(TaskStatus::InProgress),
            "completed" => Ok(TaskStatus::Completed),
            _ => Err(format!("Unknown task status: {}", s)),
        }
    }
}

/// Origin of a context entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContextSource {
    /// Imported from a WhatsApp conversation.
    Whatsapp,
    /// Imported from an email.
    Email,
    /// Imported from a notes app.
    Notes,
    /// Entered by hand.
    #[default]
    Manual,
}

impl ContextSource {
    /// Get the source name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ContextSource::Whatsapp => "whatsapp",
            ContextSource::Email => "email",
            ContextSource::Notes => "notes",
            ContextSource::Manual => "manual",
        }
    }
}

impl std::fmt::Display for ContextSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ContextSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "whatsapp" => Ok(ContextSource::Whatsapp),
            "email" => Ok(ContextSource::Email),
            "notes" => Ok(ContextSource::Notes),
            "manual" => Ok(ContextSource::Manual),
            _ => Err(format!("Unknown context source: {}", s)),
        }
    }
}

/// A piece of ambient free-text evidence (email, chat message, note) used
/// as signal for task inference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextEntry {
    /// Unique entry identifier.
    pub id: String,
    /// Raw text content.
    pub content: String,
    /// Where the text came from.
    pub source: ContextSource,
    /// When the entry was captured.
    pub timestamp: DateTime<Utc>,
    /// Whether analysis has run over this entry.
    pub processed: bool,
    /// Insight strings attached by analysis.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insights: Option<Vec<String>>,
    /// Related task ids. Never validated against the task collection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_tasks: Option<Vec<String>>,
}

/// A named task grouping with display metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Unique category identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Display color as a hex string.
    pub color: String,
    /// How many tasks reference this category.
    pub usage_count: u32,
    /// Optional description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Task {
    /// Create a new task with defaults: medium priority, neutral score,
    /// pending status, empty tags.
    pub fn new(title: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            description: String::new(),
            category: String::new(),
            priority: Priority::Medium,
            priority_score: DEFAULT_PRIORITY_SCORE,
            status: TaskStatus::Pending,
            deadline: String::new(),
            created_at: now,
            updated_at: now,
            tags: Vec::new(),
            ai_suggestions: None,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the category label
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the priority bucket
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Set the status
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Set the deadline date string
    pub fn with_deadline(mut self, deadline: impl Into<String>) -> Self {
        self.deadline = deadline.into();
        self
    }

    /// Set the tags, dropping duplicates while preserving first occurrence
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = dedup_preserving_order(tags.into_iter().map(Into::into));
        self
    }
}

impl ContextEntry {
    /// Create a new, unprocessed context entry.
    pub fn new(
        content: impl Into<String>,
        source: ContextSource,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            content: content.into(),
            source,
            timestamp: now,
            processed: false,
            insights: None,
            related_tasks: None,
        }
    }

    /// Set the related task ids
    pub fn with_related_tasks<I, S>(mut self, task_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.related_tasks = Some(task_ids.into_iter().map(Into::into).collect());
        self
    }
}

/// Drop duplicate strings, keeping the first occurrence of each.
pub(crate) fn dedup_preserving_order(items: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    items.filter(|item| seen.insert(item.clone())).collect()
}

/// Logical collection keys in the key-value store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    /// The task collection.
    Tasks,
    /// The context entry collection.
    Context,
    /// The category collection.
    Categories,
}

impl Collection {
    /// Fixed storage key for this collection.
    pub fn key(&self) -> &'static str {
        match self {
            Collection::Tasks => "smart-todo-tasks",
            Collection::Context => "smart-todo-context",
            Collection::Categories => "smart-todo-categories",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Persistence gateway trait.
///
/// Each collection is read and written wholesale: a write replaces the
/// stored list atomically from the caller's perspective, and a read of a
/// never-written collection returns its default seed set. Single-process
/// access is assumed; concurrent writers race last-write-wins.
#[async_trait]
pub trait Store: Send + Sync {
    /// Load all tasks, or the default seed set if never written.
    async fn load_tasks(&self) -> StorageResult<Vec<Task>>;
    /// Replace the task collection.
    async fn save_tasks(&self, tasks: &[Task]) -> StorageResult<()>;

    /// Load all context entries, or the default seed set if never written.
    async fn load_context_entries(&self) -> StorageResult<Vec<ContextEntry>>;
    /// Replace the context entry collection.
    async fn save_context_entries(&self, entries: &[ContextEntry]) -> StorageResult<()>;

    /// Load all categories, or the default seed set if never written.
    async fn load_categories(&self) -> StorageResult<Vec<Category>>;
    /// Replace the category collection.
    async fn save_categories(&self, categories: &[Category]) -> StorageResult<()>;
}
