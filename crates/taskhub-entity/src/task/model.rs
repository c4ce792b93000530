//! Task entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use taskhub_core::types::{ProjectId, TaskId, TenantId, UserId};

use crate::project::Project;

use super::status::TaskStatus;

/// A task, transitively scoped to a tenant through its parent project.
///
/// The tenant binding is copied from the project at creation and is
/// immutable afterwards; it is never derived from the acting user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Unique task identifier.
    pub id: TaskId,
    /// Parent project; fixed at creation.
    pub project_id: ProjectId,
    /// Owning tenant, inherited from the parent project at creation.
    pub tenant_id: TenantId,
    /// Short title.
    pub title: String,
    /// Free-form details.
    pub details: Option<String>,
    /// Workflow status.
    pub status: TaskStatus,
    /// The user who created the task.
    pub created_by: UserId,
    /// The user currently assigned, if any.
    pub assignee: Option<UserId>,
    /// When the task was created.
    pub created_at: DateTime<Utc>,
    /// When the task was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Create a new task under a parent project.
    ///
    /// This is the only constructor: the tenant binding always comes from
    /// the project, so a task and its project can never disagree.
    pub fn under_project(
        project: &Project,
        title: impl Into<String>,
        details: Option<String>,
        created_by: UserId,
        assignee: Option<UserId>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: TaskId::new(),
            project_id: project.id,
            tenant_id: project.tenant_id,
            title: title.into(),
            details,
            status: TaskStatus::Todo,
            created_by,
            assignee,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Data required to create a new task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTask {
    /// Parent project.
    pub project_id: ProjectId,
    /// Asserted tenant, if the client sends one. Must match the parent
    /// project's tenant; it is never used as the binding source.
    pub tenant_id: Option<TenantId>,
    /// Short title.
    pub title: String,
    /// Free-form details.
    pub details: Option<String>,
    /// Initial assignee.
    pub assignee: Option<UserId>,
}

/// Data for updating a task's full details.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskUpdate {
    /// New title.
    pub title: Option<String>,
    /// New details.
    pub details: Option<String>,
    /// New assignee (`Some(None)` clears the assignment).
    pub assignee: Option<Option<UserId>>,
}
