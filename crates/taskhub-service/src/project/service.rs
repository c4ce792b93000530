//! Project operations: create, update, delete.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use taskhub_auth::audit::AuditEmitter;
use taskhub_auth::policy::{Action, PolicyEngine, TargetSnapshot};
use taskhub_auth::quota::QuotaEnforcer;
use taskhub_auth::scope::EffectiveScope;
use taskhub_core::error::AppError;
use taskhub_core::result::AppResult;
use taskhub_core::types::{ProjectId, ResourceKind, TenantId};
use taskhub_entity::audit::AuditOutcome;
use taskhub_entity::project::{NewProject, Project, ProjectUpdate};
use taskhub_entity::tenant::Tenant;
use taskhub_store::traits::{ProjectStore, TenantStore};

use crate::access::Actor;
use crate::context::RequestContext;

/// Project management service.
#[derive(Clone)]
pub struct ProjectService {
    projects: Arc<dyn ProjectStore>,
    tenants: Arc<dyn TenantStore>,
    policy: PolicyEngine,
    quota: QuotaEnforcer,
    audit: AuditEmitter,
}

impl ProjectService {
    /// Creates a new project service.
    pub fn new(
        projects: Arc<dyn ProjectStore>,
        tenants: Arc<dyn TenantStore>,
        policy: PolicyEngine,
        quota: QuotaEnforcer,
        audit: AuditEmitter,
    ) -> Self {
        Self {
            projects,
            tenants,
            policy,
            quota,
            audit,
        }
    }

    /// Create a project, reserving a project slot against the tenant's
    /// plan before the row exists.
    pub async fn create_project(
        &self,
        actor: &Actor,
        ctx: &RequestContext,
        req: NewProject,
    ) -> AppResult<Project> {
        let tenant_id = match actor.scope {
            EffectiveScope::Bound(tenant_id) => tenant_id,
            EffectiveScope::Unrestricted => req.tenant_id.ok_or_else(|| {
                AppError::validation("tenant_id is required when creating a project")
            })?,
        };

        let snapshot = TargetSnapshot::tenant(Some(tenant_id));
        self.decide(actor, ctx, Action::CreateProject, &snapshot, Uuid::nil())?;

        let tenant = self.load_tenant(tenant_id).await?;
        let reservation = match self
            .quota
            .reserve(Some(&tenant), ResourceKind::Projects)
            .await
        {
            Ok(reservation) => reservation,
            Err(deny) => {
                self.audit.record(
                    actor.actor_id(),
                    Some(tenant_id),
                    Action::CreateProject,
                    Uuid::nil(),
                    AuditOutcome::Denied,
                    ctx.source_addr.clone(),
                );
                return Err(deny.into());
            }
        };

        let project = Project::new(tenant_id, req.name, actor.actor_id());
        if let Err(e) = self.projects.insert(&project).await {
            reservation.release().await;
            return Err(e);
        }
        reservation.commit();

        info!(project_id = %project.id, tenant_id = %tenant_id, "project created");
        self.audit.record(
            actor.actor_id(),
            Some(tenant_id),
            Action::CreateProject,
            project.id.into_uuid(),
            AuditOutcome::Allowed,
            ctx.source_addr.clone(),
        );
        Ok(project)
    }

    /// Update a project. Permitted to tenant admins and the creator.
    pub async fn update_project(
        &self,
        actor: &Actor,
        ctx: &RequestContext,
        project_id: ProjectId,
        update: ProjectUpdate,
    ) -> AppResult<Project> {
        let mut project = self.load_project(project_id).await?;

        let snapshot = TargetSnapshot::project(project.tenant_id, project.created_by);
        self.decide(
            actor,
            ctx,
            Action::UpdateProject,
            &snapshot,
            project.id.into_uuid(),
        )?;

        if let Some(name) = update.name {
            project.name = name;
        }
        if let Some(status) = update.status {
            project.status = status;
        }
        project.updated_at = Utc::now();

        self.projects.update(&project).await?;

        self.audit.record(
            actor.actor_id(),
            Some(project.tenant_id),
            Action::UpdateProject,
            project.id.into_uuid(),
            AuditOutcome::Allowed,
            ctx.source_addr.clone(),
        );
        Ok(project)
    }

    /// Delete a project and return the slot to the tenant's pool.
    pub async fn delete_project(
        &self,
        actor: &Actor,
        ctx: &RequestContext,
        project_id: ProjectId,
    ) -> AppResult<()> {
        let project = self.load_project(project_id).await?;

        let snapshot = TargetSnapshot::project(project.tenant_id, project.created_by);
        self.decide(
            actor,
            ctx,
            Action::DeleteProject,
            &snapshot,
            project.id.into_uuid(),
        )?;

        let deleted = self.projects.delete(project.id).await?;
        if !deleted {
            return Err(AppError::not_found(format!(
                "Project {project_id} not found"
            )));
        }

        self.quota
            .release_committed(project.tenant_id, ResourceKind::Projects)
            .await;
        info!(project_id = %project.id, "project deleted");

        self.audit.record(
            actor.actor_id(),
            Some(project.tenant_id),
            Action::DeleteProject,
            project.id.into_uuid(),
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

    async fn load_project(&self, project_id: ProjectId) -> AppResult<Project> {
        self.projects
            .find_by_id(project_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Project {project_id} not found")))
    }

    async fn load_tenant(&self, tenant_id: TenantId) -> AppResult<Tenant> {
        self.tenants
            .find_by_id(tenant_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Tenant {tenant_id} not found")))
    }
}
