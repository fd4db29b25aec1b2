//! Task repository: CRUD, reprioritization, and context operations.
//!
//! The repository owns the read-modify-write cycle over the persisted
//! collections and delegates all heuristics to the insight engine. It is
//! constructed once per process with its dependencies injected; nothing
//! here touches global state.

mod suggest;

pub use suggest::{suggest_for_draft, DebouncedSuggester, DEFAULT_DEBOUNCE};

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::engine::{Clock, Insight, InsightEngine, TaskDraft};
use crate::error::{RepositoryError, RepositoryResult};
use crate::storage::{
    AiSuggestions, Category, ContextEntry, ContextSource, Priority, Store, Task, TaskStatus,
};

/// Partial task mutation: every field optional, merged over the stored
/// record by [`TaskRepository::update`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskUpdate {
    /// New title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New category label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// New priority bucket.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    /// New priority score.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority_score: Option<u8>,
    /// New status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    /// New deadline date string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    /// Replacement tag list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Replacement suggestion bundle.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_suggestions: Option<AiSuggestions>,
}

impl TaskUpdate {
    /// Set the title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the category
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the status
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Set the deadline
    pub fn with_deadline(mut self, deadline: impl Into<String>) -> Self {
        self.deadline = Some(deadline.into());
        self
    }

    fn apply(self, task: &mut Task) {
        if let Some(title) = self.title {
            task.title = title;
        }
        if let Some(description) = self.description {
            task.description = description;
        }
        if let Some(category) = self.category {
            task.category = category;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(priority_score) = self.priority_score {
            task.priority_score = priority_score;
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(deadline) = self.deadline {
            task.deadline = deadline;
        }
        if let Some(tags) = self.tags {
            task.tags = crate::storage::dedup_preserving_order(tags.into_iter());
        }
        if let Some(ai_suggestions) = self.ai_suggestions {
            task.ai_suggestions = Some(ai_suggestions);
        }
    }
}

/// Result of a context analysis pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextAnalysisResult {
    /// Insights produced across all entries.
    pub insights: Vec<Insight>,
    /// Task drafts extracted from the entries (at most three).
    pub task_suggestions: Vec<TaskDraft>,
}

/// Repository over the task, context, and category collections.
pub struct TaskRepository {
    store: Arc<dyn Store>,
    engine: Arc<InsightEngine>,
    clock: Arc<dyn Clock>,
}

impl TaskRepository {
    /// Create a new repository with injected dependencies.
    pub fn new(store: Arc<dyn Store>, engine: InsightEngine, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            engine: Arc::new(engine),
            clock,
        }
    }

    /// Get a reference to the insight engine.
    #[inline]
    pub fn engine(&self) -> &InsightEngine {
        &self.engine
    }

    /// Shared handle to the insight engine, for suggestion tasks that
    /// outlive a borrow.
    pub fn engine_handle(&self) -> Arc<InsightEngine> {
        self.engine.clone()
    }

    // ========================================================================
    // Task operations
    // ========================================================================

    /// List all tasks in stored order.
    pub async fn list(&self) -> RepositoryResult<Vec<Task>> {
        self.store
            .load_tasks()
            .await
            .map_err(RepositoryError::LoadTasks)
    }

    /// Create a task from a draft and persist it.
    ///
    /// The new task gets a fresh id, the neutral default priority score,
    /// and creation/update timestamps of now.
    pub async fn create(&self, draft: TaskDraft) -> RepositoryResult<Task> {
        let now = self.clock.now();
        let task = Task::new(draft.title, now)
            .with_description(draft.description)
            .with_category(draft.category)
            .with_priority(draft.priority)
            .with_status(draft.status)
            .with_deadline(draft.deadline)
            .with_tags(draft.tags);

        let mut tasks = self
            .store
            .load_tasks()
            .await
            .map_err(RepositoryError::AddTask)?;
        tasks.push(task.clone());
        self.store
            .save_tasks(&tasks)
            .await
            .map_err(RepositoryError::AddTask)?;

        info!(task_id = %task.id, title = %task.title, "Task created");
        Ok(task)
    }

    /// Merge a partial update into a task and persist.
    ///
    /// Returns the updated task, or `None` if the id does not exist - a
    /// missing id is a defined no-op, not an error.
    pub async fn update(&self, id: &str, update: TaskUpdate) -> RepositoryResult<Option<Task>> {
        let mut tasks = self
            .store
            .load_tasks()
            .await
            .map_err(RepositoryError::UpdateTask)?;

        let Some(task) = tasks.iter_mut().find(|task| task.id == id) else {
            debug!(task_id = %id, "Update skipped: task not found");
            return Ok(None);
        };

        update.apply(task);
        task.updated_at = self.clock.now();
        let updated = task.clone();

        self.store
            .save_tasks(&tasks)
            .await
            .map_err(RepositoryError::UpdateTask)?;

        debug!(task_id = %id, "Task updated");
        Ok(Some(updated))
    }

    /// Delete a task by id. Missing ids are a no-op.
    pub async fn delete(&self, id: &str) -> RepositoryResult<()> {
        let mut tasks = self
            .store
            .load_tasks()
            .await
            .map_err(RepositoryError::DeleteTask)?;

        let before = tasks.len();
        tasks.retain(|task| task.id != id);
        if tasks.len() == before {
            debug!(task_id = %id, "Delete skipped: task not found");
            return Ok(());
        }

        self.store
            .save_tasks(&tasks)
            .await
            .map_err(RepositoryError::DeleteTask)?;

        info!(task_id = %id, "Task deleted");
        Ok(())
    }

    /// Advance a task's status through the manual toggle cycle.
    /// Missing ids are a no-op.
    pub async fn toggle_status(&self, id: &str) -> RepositoryResult<Option<Task>> {
        let current = self
            .store
            .load_tasks()
            .await
            .map_err(RepositoryError::UpdateTask)?
            .into_iter()
            .find(|task| task.id == id);

        match current {
            Some(task) => {
                let update = TaskUpdate::default().with_status(task.status.advance());
                self.update(id, update).await
            }
            None => {
                debug!(task_id = %id, "Status toggle skipped: task not found");
                Ok(None)
            }
        }
    }

    /// Attach an advisory suggestion bundle to a task.
    /// Missing ids are a no-op.
    pub async fn apply_suggestions(
        &self,
        id: &str,
        suggestions: AiSuggestions,
    ) -> RepositoryResult<Option<Task>> {
        let update = TaskUpdate {
            ai_suggestions: Some(suggestions),
            ..TaskUpdate::default()
        };
        self.update(id, update).await
    }

    /// Rescore and re-sort the whole task set, persist it, and return it.
    pub async fn reprioritize(&self) -> RepositoryResult<Vec<Task>> {
        let tasks = self
            .store
            .load_tasks()
            .await
            .map_err(RepositoryError::Reprioritize)?;
        let context = self
            .store
            .load_context_entries()
            .await
            .map_err(RepositoryError::Reprioritize)?;

        let reprioritized = self.engine.prioritize(&tasks, &context);

        self.store
            .save_tasks(&reprioritized)
            .await
            .map_err(RepositoryError::Reprioritize)?;

        info!(tasks = reprioritized.len(), "Task set reprioritized");
        Ok(reprioritized)
    }

    // ========================================================================
    // Context operations
    // ========================================================================

    /// List all context entries in stored order.
    pub async fn list_context_entries(&self) -> RepositoryResult<Vec<ContextEntry>> {
        self.store
            .load_context_entries()
            .await
            .map_err(RepositoryError::LoadContext)
    }

    /// Capture a new, unprocessed context entry at the front of the
    /// collection (newest first, as the feed renders them).
    pub async fn add_context_entry(
        &self,
        content: impl Into<String>,
        source: ContextSource,
    ) -> RepositoryResult<ContextEntry> {
        let entry = ContextEntry::new(content, source, self.clock.now());

        let mut entries = self
            .store
            .load_context_entries()
            .await
            .map_err(RepositoryError::LoadContext)?;
        entries.insert(0, entry.clone());
        self.store
            .save_context_entries(&entries)
            .await
            .map_err(RepositoryError::SaveContext)?;

        info!(entry_id = %entry.id, source = %entry.source, "Context entry added");
        Ok(entry)
    }

    /// Delete a context entry by id. Missing ids are a no-op.
    pub async fn delete_context_entry(&self, id: &str) -> RepositoryResult<()> {
        let mut entries = self
            .store
            .load_context_entries()
            .await
            .map_err(RepositoryError::LoadContext)?;

        let before = entries.len();
        entries.retain(|entry| entry.id != id);
        if entries.len() == before {
            debug!(entry_id = %id, "Delete skipped: context entry not found");
            return Ok(());
        }

        self.store
            .save_context_entries(&entries)
            .await
            .map_err(RepositoryError::SaveContext)?;

        info!(entry_id = %id, "Context entry deleted");
        Ok(())
    }

    /// Analyze every context entry: collect insights and task drafts,
    /// mark entries processed, and append each entry's own insight
    /// suggestions to its stored insight list.
    pub async fn analyze_context(&self) -> RepositoryResult<ContextAnalysisResult> {
        let mut entries = self
            .store
            .load_context_entries()
            .await
            .map_err(RepositoryError::LoadContext)?;

        let insights = self.engine.analyze_context(&entries);
        let task_suggestions = self.engine.generate_task_suggestions(&entries);

        for entry in entries.iter_mut() {
            let own_insights = self.engine.analyze_context(std::slice::from_ref(entry));
            entry.processed = true;
            if !own_insights.is_empty() {
                let attached = entry.insights.get_or_insert_with(Vec::new);
                attached.extend(own_insights.into_iter().map(|insight| insight.suggestion));
            }
        }

        self.store
            .save_context_entries(&entries)
            .await
            .map_err(RepositoryError::SaveContext)?;

        info!(
            entries = entries.len(),
            insights = insights.len(),
            task_suggestions = task_suggestions.len(),
            "Context analyzed"
        );
        Ok(ContextAnalysisResult {
            insights,
            task_suggestions,
        })
    }

    // ========================================================================
    // Category operations
    // ========================================================================

    /// List all categories.
    pub async fn list_categories(&self) -> RepositoryResult<Vec<Category>> {
        self.store
            .load_categories()
            .await
            .map_err(RepositoryError::LoadCategories)
    }

    /// Category names in stored order, the input shape category
    /// suggestion expects.
    pub async fn category_names(&self) -> RepositoryResult<Vec<String>> {
        Ok(self
            .list_categories()
            .await?
            .into_iter()
            .map(|category| category.name)
            .collect())
    }
}
