//! Task operations: create, update, delete.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use taskhub_auth::audit::AuditEmitter;
use taskhub_auth::policy::{Action, PolicyEngine, TargetSnapshot};
use taskhub_core::error::AppError;
use taskhub_core::result::AppResult;
use taskhub_core::types::TaskId;
use taskhub_entity::audit::AuditOutcome;
use taskhub_entity::task::{NewTask, Task, TaskStatus, TaskUpdate};
use taskhub_store::traits::{ProjectStore, TaskStore};

use crate::access::Actor;
use crate::context::RequestContext;

/// Task management service.
///
/// Tasks are transitively tenant-scoped: every operation resolves the
/// tenant through the task's own binding (established from the parent
/// project at creation), never from the acting user.
#[derive(Clone)]
pub struct TaskService {
    tasks: Arc<dyn TaskStore>,
    projects: Arc<dyn ProjectStore>,
    policy: PolicyEngine,
    audit: AuditEmitter,
}

impl TaskService {
    /// Creates a new task service.
    pub fn new(
        tasks: Arc<dyn TaskStore>,
        projects: Arc<dyn ProjectStore>,
        policy: PolicyEngine,
        audit: AuditEmitter,
    ) -> Self {
        Self {
            tasks,
            projects,
            policy,
            audit,
        }
    }

    /// Create a task under a project.
    ///
    /// The tenant binding is copied from the parent project. An asserted
    /// tenant id that disagrees with the project's binding is rejected
    /// before policy evaluation or persistence.
    pub async fn create_task(
        &self,
        actor: &Actor,
        ctx: &RequestContext,
        req: NewTask,
    ) -> AppResult<Task> {
        let project = self
            .projects
            .find_by_id(req.project_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Project {} not found", req.project_id)))?;

        if let Some(asserted) = req.tenant_id {
            if asserted != project.tenant_id {
                return Err(AppError::validation(
                    "task tenant must match its parent project's tenant",
                ));
            }
        }

        let snapshot = TargetSnapshot::tenant(Some(project.tenant_id));
        self.decide(actor, ctx, Action::CreateTask, &snapshot, Uuid::nil())?;

        let task = Task::under_project(
            &project,
            req.title,
            req.details,
            actor.actor_id(),
            req.assignee,
        );
        self.tasks.insert(&task).await?;

        info!(task_id = %task.id, project_id = %task.project_id, "task created");
        self.audit.record(
            actor.actor_id(),
            Some(task.tenant_id),
            Action::CreateTask,
            task.id.into_uuid(),
            AuditOutcome::Allowed,
            ctx.source_addr.clone(),
        );
        Ok(task)
    }

    /// Update a task's full details (title, description, assignee).
    ///
    /// The rule set for this action is a deployment choice; see
    /// `PolicyConfig::task_update_rule`.
    pub async fn update_task_details(
        &self,
        actor: &Actor,
        ctx: &RequestContext,
        task_id: TaskId,
        update: TaskUpdate,
    ) -> AppResult<Task> {
        let mut task = self.load_task(task_id).await?;

        let snapshot = TargetSnapshot::task(task.tenant_id, task.created_by, task.assignee);
        self.decide(
            actor,
            ctx,
            Action::UpdateTaskDetails,
            &snapshot,
            task.id.into_uuid(),
        )?;

        if let Some(title) = update.title {
            task.title = title;
        }
        if let Some(details) = update.details {
            task.details = Some(details);
        }
        if let Some(assignee) = update.assignee {
            task.assignee = assignee;
        }
        task.updated_at = Utc::now();

        self.tasks.update(&task).await?;

        self.audit.record(
            actor.actor_id(),
            Some(task.tenant_id),
            Action::UpdateTaskDetails,
            task.id.into_uuid(),
            AuditOutcome::Allowed,
            ctx.source_addr.clone(),
        );
        Ok(task)
    }

    /// Move a task to a new workflow status. Open to any member of the
    /// task's tenant.
    pub async fn update_task_status(
        &self,
        actor: &Actor,
        ctx: &RequestContext,
        task_id: TaskId,
        status: TaskStatus,
    ) -> AppResult<Task> {
        let mut task = self.load_task(task_id).await?;

        let snapshot = TargetSnapshot::task(task.tenant_id, task.created_by, task.assignee);
        self.decide(
            actor,
            ctx,
            Action::UpdateTaskStatus,
            &snapshot,
            task.id.into_uuid(),
        )?;

        task.status = status;
        task.updated_at = Utc::now();

        self.tasks.update(&task).await?;

        self.audit.record(
            actor.actor_id(),
            Some(task.tenant_id),
            Action::UpdateTaskStatus,
            task.id.into_uuid(),
            AuditOutcome::Allowed,
            ctx.source_addr.clone(),
        );
        Ok(task)
    }

    /// Delete a task. Tenant admins only.
    pub async fn delete_task(
        &self,
        actor: &Actor,
        ctx: &RequestContext,
        task_id: TaskId,
    ) -> AppResult<()> {
        let task = self.load_task(task_id).await?;

        let snapshot = TargetSnapshot::task(task.tenant_id, task.created_by, task.assignee);
        self.decide(actor, ctx, Action::DeleteTask, &snapshot, task.id.into_uuid())?;

        let deleted = self.tasks.delete(task.id).await?;
        if !deleted {
            return Err(AppError::not_found(format!("Task {task_id} not found")));
        }

        self.audit.record(
            actor.actor_id(),
            Some(task.tenant_id),
            Action::DeleteTask,
            task.id.into_uuid(),
            AuditOutcome::Allowed,
            ctx.source_addr.clone(),
        );
        Ok(())
    }

    fn decide(
        &self,
        actor: &Actor,
        ctx: &RequestContext,
        action: Action,
        target: &TargetSnapshot,
        entity_id: Uuid,
    ) -> AppResult<()> {
        if let Err(deny) = self
            .policy
            .decide(&actor.claims, &actor.scope, action, target)
        {
            self.audit.record(
                actor.actor_id(),
                target.tenant_id,
                action,
                entity_id,
                AuditOutcome::Denied,
                ctx.source_addr.clone(),
            );
            return Err(deny.into());
        }
        Ok(())
    }

    async fn load_task(&self, task_id: TaskId) -> AppResult<Task> {
        self.tasks
            .find_by_id(task_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Task {task_id} not found")))
    }
}
