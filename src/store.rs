//! Domain store and command layer.
//!
//! `DomainStore` owns the in-memory document for one user and is the only
//! writer. Every command validates first, mutates, then persists the full
//! document; a failure at any point rolls the in-memory state back, so the
//! store and the persisted document never diverge and no partial mutation
//! is ever committed.

use chrono::{Duration, Utc};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::{Priority, Project, Task, TaskStatus, UserDocument};
use crate::storage::Storage;
use crate::transfer::TransferDocument;

/// Input for `create_task`.
#[derive(Debug, Clone, Default)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub due_date: Option<chrono::NaiveDate>,
    pub project_id: Option<u64>,
    pub labels: Vec<String>,
}

/// Input for `create_project`.
#[derive(Debug, Clone, Default)]
pub struct NewProject {
    pub name: String,
    pub description: Option<String>,
    pub color: Option<String>,
}

/// Partial update for `update_task`; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub priority: Option<Priority>,
    pub due_date: Option<Option<chrono::NaiveDate>>,
    pub project_id: Option<Option<u64>>,
    pub labels: Option<Vec<String>>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.due_date.is_none()
            && self.project_id.is_none()
            && self.labels.is_none()
    }
}

/// Outcome of a cascading project deletion.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectDeleted {
    pub project: Project,
    pub unassigned_tasks: usize,
}

/// In-memory authoritative state for one user, loaded once per session.
#[derive(Debug)]
pub struct DomainStore {
    storage: Storage,
    user_id: String,
    doc: UserDocument,
}

impl DomainStore {
    /// Load the user's document and seed the starter data on first run.
    ///
    /// Seeding happens only when no document has ever been persisted for
    /// this user, so an explicitly cleared document stays empty.
    pub fn open(storage: Storage, user_id: impl Into<String>) -> Result<Self> {
        let user_id = user_id.into();
        let first_run = !storage.document_exists(&user_id);
        let doc = storage.load_document(&user_id);

        let mut store = Self {
            storage,
            user_id,
            doc,
        };

        if first_run && store.doc.is_empty() {
            store.commit(|doc| {
                seed_document(doc);
                Ok(())
            })?;
            tracing::debug!(user = %store.user_id, "seeded starter tasks and projects");
        }

        Ok(store)
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn tasks(&self) -> &[Task] {
        &self.doc.tasks
    }

    pub fn projects(&self) -> &[Project] {
        &self.doc.projects
    }

    pub fn document(&self) -> &UserDocument {
        &self.doc
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// Create a task. The title must be non-empty after trimming.
    pub fn create_task(&mut self, input: NewTask) -> Result<Task> {
        let title = input.title.trim().to_string();
        if title.is_empty() {
            return Err(Error::InvalidInput("task title cannot be empty".to_string()));
        }
        if let Some(project_id) = input.project_id {
            if self.doc.find_project(project_id).is_none() {
                return Err(Error::ProjectNotFound(project_id));
            }
        }

        self.commit(|doc| {
            let task = Task {
                id: doc.next_task_id,
                title,
                description: normalize_text(input.description),
                priority: input.priority,
                due_date: input.due_date,
                project_id: input.project_id,
                labels: input.labels,
                status: TaskStatus::Pending,
                created_at: Utc::now(),
                completed_at: None,
            };
            doc.next_task_id += 1;
            doc.tasks.push(task.clone());
            Ok(task)
        })
    }

    /// Create a project. The name must be non-empty after trimming.
    pub fn create_project(&mut self, input: NewProject) -> Result<Project> {
        let name = input.name.trim().to_string();
        if name.is_empty() {
            return Err(Error::InvalidInput(
                "project name cannot be empty".to_string(),
            ));
        }

        self.commit(|doc| {
            let project = Project {
                id: doc.next_project_id,
                name,
                description: normalize_text(input.description),
                color: input
                    .color
                    .unwrap_or_else(|| crate::model::DEFAULT_PROJECT_COLOR.to_string()),
                created_at: Utc::now(),
            };
            doc.next_project_id += 1;
            doc.projects.push(project.clone());
            Ok(project)
        })
    }

    /// Set a task's completion state. Completing stamps `completed_at`;
    /// reopening clears it.
    pub fn toggle_task_status(&mut self, task_id: u64, completed: bool) -> Result<Task> {
        self.commit(|doc| {
            let task = doc
                .find_task_mut(task_id)
                .ok_or(Error::TaskNotFound(task_id))?;
            if completed {
                task.status = TaskStatus::Completed;
                task.completed_at = Some(Utc::now());
            } else {
                task.status = TaskStatus::Pending;
                task.completed_at = None;
            }
            Ok(task.clone())
        })
    }

    /// Rename a task. A title equal to the current one is a no-op.
    pub fn rename_task(&mut self, task_id: u64, new_title: &str) -> Result<Task> {
        let new_title = new_title.trim().to_string();
        if new_title.is_empty() {
            return Err(Error::InvalidInput("task title cannot be empty".to_string()));
        }

        let current = self
            .doc
            .find_task(task_id)
            .ok_or(Error::TaskNotFound(task_id))?;
        if current.title == new_title {
            return Ok(current.clone());
        }

        self.commit(|doc| {
            let task = doc
                .find_task_mut(task_id)
                .ok_or(Error::TaskNotFound(task_id))?;
            task.title = new_title;
            Ok(task.clone())
        })
    }

    /// Apply a partial edit to a task.
    pub fn update_task(&mut self, task_id: u64, patch: TaskPatch) -> Result<Task> {
        if patch.is_empty() {
            return self
                .doc
                .find_task(task_id)
                .cloned()
                .ok_or(Error::TaskNotFound(task_id));
        }
        if let Some(title) = &patch.title {
            if title.trim().is_empty() {
                return Err(Error::InvalidInput("task title cannot be empty".to_string()));
            }
        }
        if let Some(Some(project_id)) = patch.project_id {
            if self.doc.find_project(project_id).is_none() {
                return Err(Error::ProjectNotFound(project_id));
            }
        }

        self.commit(|doc| {
            let task = doc
                .find_task_mut(task_id)
                .ok_or(Error::TaskNotFound(task_id))?;
            if let Some(title) = patch.title {
                task.title = title.trim().to_string();
            }
            if let Some(description) = patch.description {
                task.description = normalize_text(description);
            }
            if let Some(priority) = patch.priority {
                task.priority = priority;
            }
            if let Some(due_date) = patch.due_date {
                task.due_date = due_date;
            }
            if let Some(project_id) = patch.project_id {
                task.project_id = project_id;
            }
            if let Some(labels) = patch.labels {
                task.labels = labels;
            }
            Ok(task.clone())
        })
    }

    /// Delete a single task.
    pub fn delete_task(&mut self, task_id: u64) -> Result<Task> {
        if self.doc.find_task(task_id).is_none() {
            return Err(Error::TaskNotFound(task_id));
        }

        self.commit(|doc| {
            let index = doc
                .tasks
                .iter()
                .position(|task| task.id == task_id)
                .ok_or(Error::TaskNotFound(task_id))?;
            Ok(doc.tasks.remove(index))
        })
    }

    /// Delete a project, unassigning every task that referenced it.
    ///
    /// Callers holding a project view selection should pass the outcome to
    /// [`crate::view::ViewSelection::after_project_delete`].
    pub fn delete_project(&mut self, project_id: u64) -> Result<ProjectDeleted> {
        if self.doc.find_project(project_id).is_none() {
            return Err(Error::ProjectNotFound(project_id));
        }

        self.commit(|doc| {
            let mut unassigned = 0;
            for task in &mut doc.tasks {
                if task.project_id == Some(project_id) {
                    task.project_id = None;
                    unassigned += 1;
                }
            }
            let index = doc
                .projects
                .iter()
                .position(|project| project.id == project_id)
                .ok_or(Error::ProjectNotFound(project_id))?;
            let project = doc.projects.remove(index);
            Ok(ProjectDeleted {
                project,
                unassigned_tasks: unassigned,
            })
        })
    }

    /// Delete every task in the selection; unknown ids are skipped.
    /// An empty selection is rejected before anything is touched.
    pub fn bulk_delete_tasks(&mut self, task_ids: &[u64]) -> Result<usize> {
        if task_ids.is_empty() {
            return Err(Error::NoSelection);
        }

        self.commit(|doc| {
            let before = doc.tasks.len();
            doc.tasks.retain(|task| !task_ids.contains(&task.id));
            Ok(before - doc.tasks.len())
        })
    }

    /// Mark every pending task completed. Returns how many changed.
    pub fn complete_all_tasks(&mut self) -> Result<usize> {
        self.commit(|doc| {
            let now = Utc::now();
            let mut changed = 0;
            for task in &mut doc.tasks {
                if task.status == TaskStatus::Pending {
                    task.status = TaskStatus::Completed;
                    task.completed_at = Some(now);
                    changed += 1;
                }
            }
            Ok(changed)
        })
    }

    /// Reset the user's data to the empty document. The starter data is not
    /// re-seeded afterwards.
    pub fn clear_all(&mut self) -> Result<()> {
        self.commit(|doc| {
            *doc = UserDocument::default();
            Ok(())
        })
    }

    /// Replace tasks and projects with imported content, recomputing the id
    /// counters as max existing id + 1 so future ids never collide.
    pub fn import(&mut self, transfer: TransferDocument) -> Result<()> {
        self.commit(|doc| {
            doc.next_task_id = next_id(&transfer.tasks.iter().map(|t| t.id).collect::<Vec<_>>());
            doc.next_project_id =
                next_id(&transfer.projects.iter().map(|p| p.id).collect::<Vec<_>>());
            doc.tasks = transfer.tasks;
            doc.projects = transfer.projects;
            Ok(())
        })
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Run a mutation and persist the result. On any failure the in-memory
    /// document is restored to its prior state.
    fn commit<T>(&mut self, mutate: impl FnOnce(&mut UserDocument) -> Result<T>) -> Result<T> {
        let before = self.doc.clone();
        let outcome = match mutate(&mut self.doc) {
            Ok(outcome) => outcome,
            Err(err) => {
                self.doc = before;
                return Err(err);
            }
        };
        if let Err(err) = self.storage.save_document(&self.user_id, &self.doc) {
            self.doc = before;
            return Err(err);
        }
        Ok(outcome)
    }
}

fn next_id(ids: &[u64]) -> u64 {
    ids.iter().copied().max().unwrap_or(0) + 1
}

fn normalize_text(input: Option<String>) -> Option<String> {
    input.and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Fill an empty document with the starter tasks and projects shown to a
/// user on their first session.
fn seed_document(doc: &mut UserDocument) {
    let now = Utc::now();
    let today = now.date_naive();

    doc.projects = vec![
        Project {
            id: 1,
            name: "Personal".to_string(),
            description: Some("Personal tasks and errands".to_string()),
            color: "#667eea".to_string(),
            created_at: now,
        },
        Project {
            id: 2,
            name: "Work".to_string(),
            description: Some("Work-related tasks".to_string()),
            color: "#43e97b".to_string(),
            created_at: now,
        },
    ];

    doc.tasks = vec![
        Task {
            id: 1,
            title: "Welcome to Taskly!".to_string(),
            description: Some(
                "This is your first task. Mark it done when you are ready.".to_string(),
            ),
            priority: Priority::High,
            due_date: Some(today),
            project_id: Some(1),
            labels: vec!["welcome".to_string(), "sample".to_string()],
            status: TaskStatus::Pending,
            created_at: now,
            completed_at: None,
        },
        Task {
            id: 2,
            title: "Create your first project".to_string(),
            description: Some("Projects help you organize related tasks together.".to_string()),
            priority: Priority::Medium,
            due_date: Some(today + Duration::days(1)),
            project_id: None,
            labels: vec!["project".to_string(), "organization".to_string()],
            status: TaskStatus::Pending,
            created_at: now,
            completed_at: None,
        },
    ];

    doc.next_task_id = 3;
    doc.next_project_id = 3;
}
