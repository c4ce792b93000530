//! Role-based decision logic.

use serde::{Deserialize, Serialize};

use taskhub_core::config::{PolicyConfig, TaskUpdateRule};
use taskhub_core::types::{TenantId, UserId};

use crate::error::AuthzError;
use crate::jwt::Claims;
use crate::scope::EffectiveScope;

use super::action::Action;

/// Ownership snapshot of the target resource.
///
/// Pre-fetched by the caller; carries only the fields the decision table
/// reads. The engine itself never queries storage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetSnapshot {
    /// The tenant the target belongs to; `None` for platform-level targets.
    pub tenant_id: Option<TenantId>,
    /// For user-targeted actions: the target user's id.
    pub subject_user: Option<UserId>,
    /// The user who created the target, where ownership matters.
    pub created_by: Option<UserId>,
    /// The target task's assignee, if any.
    pub assignee: Option<UserId>,
}

impl TargetSnapshot {
    /// Snapshot for creating a resource directly inside a tenant.
    ///
    /// `None` describes a platform-level creation (platform admins only).
    pub fn tenant(tenant_id: Option<TenantId>) -> Self {
        Self {
            tenant_id,
            ..Self::default()
        }
    }

    /// Snapshot of an existing user.
    pub fn user(tenant_id: Option<TenantId>, user_id: UserId) -> Self {
        Self {
            tenant_id,
            subject_user: Some(user_id),
            ..Self::default()
        }
    }

    /// Snapshot of an existing project.
    pub fn project(tenant_id: TenantId, created_by: UserId) -> Self {
        Self {
            tenant_id: Some(tenant_id),
            created_by: Some(created_by),
            ..Self::default()
        }
    }

    /// Snapshot of an existing task.
    pub fn task(tenant_id: TenantId, created_by: UserId, assignee: Option<UserId>) -> Self {
        Self {
            tenant_id: Some(tenant_id),
            created_by: Some(created_by),
            assignee,
            ..Self::default()
        }
    }
}

/// Pure decision function over (actor, action, resource ownership).
///
/// Evaluation order is fixed: self-deletion, platform bypass, tenant
/// isolation, then action-specific role rules. First match wins.
#[derive(Debug, Clone)]
pub struct PolicyEngine {
    config: PolicyConfig,
}

impl PolicyEngine {
    /// Creates an engine with the given policy configuration.
    pub fn new(config: PolicyConfig) -> Self {
        Self { config }
    }

    /// Evaluates the decision table. `Ok(())` is Allow; the error carries
    /// the machine-readable denial reason.
    pub fn decide(
        &self,
        claims: &Claims,
        scope: &EffectiveScope,
        action: Action,
        target: &TargetSnapshot,
    ) -> Result<(), AuthzError> {
        // Deleting one's own account is denied for every role, including
        // the platform bypass below.
        if action == Action::DeleteUser && target.subject_user == Some(claims.sub) {
            return Err(AuthzError::SelfDeletionForbidden);
        }

        if claims.role.is_platform_admin() {
            return Ok(());
        }

        // Tenant isolation precedes every role check. A non-platform
        // actor with an unrestricted scope is a contradiction and is
        // denied outright.
        match scope {
            EffectiveScope::Unrestricted => {
                return Err(AuthzError::Unauthorized(action.tag().to_string()));
            }
            EffectiveScope::Bound(tenant) => {
                if target.tenant_id != Some(*tenant) {
                    return Err(AuthzError::TenantMismatch);
                }
            }
        }

        let is_admin = claims.role.is_tenant_admin();
        let is_self = target.subject_user == Some(claims.sub);
        let is_creator = target.created_by == Some(claims.sub);
        let is_assignee = target.assignee == Some(claims.sub);

        let allowed = match action {
            Action::CreateUser
            | Action::UpdateUserPrivileged
            | Action::DeleteUser
            | Action::CreateProject
            | Action::DeleteTask => is_admin,
            Action::UpdateUserProfile => is_admin || is_self,
            Action::UpdateProject | Action::DeleteProject => is_admin || is_creator,
            Action::CreateTask | Action::UpdateTaskStatus => true,
            Action::UpdateTaskDetails => match self.config.task_update_rule {
                TaskUpdateRule::CreatorAssigneeOrAdmin => is_admin || is_creator || is_assignee,
                TaskUpdateRule::AdminOnly => is_admin,
            },
        };

        if allowed {
            Ok(())
        } else {
            Err(AuthzError::Unauthorized(action.tag().to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::Utc;
    use taskhub_entity::user::Role;
    use uuid::Uuid;

    fn claims(role: Role, tenant_id: Option<TenantId>) -> Claims {
        let now = Utc::now();
        Claims {
            sub: UserId::new(),
            tenant_id,
            role,
            iat: now.timestamp(),
            exp: (now + chrono::Duration::hours(1)).timestamp(),
            jti: Uuid::new_v4(),
        }
    }

    fn engine() -> PolicyEngine {
        PolicyEngine::new(PolicyConfig::default())
    }

    #[test]
    fn test_platform_admin_bypasses_tenant_checks() {
        let c = claims(Role::PlatformAdmin, None);
        let target = TargetSnapshot::project(TenantId::new(), UserId::new());
        engine()
            .decide(&c, &EffectiveScope::Unrestricted, Action::DeleteProject, &target)
            .expect("platform admin may act on any tenant");
    }

    #[test]
    fn test_cross_tenant_target_denied_before_role_rules() {
        let tenant = TenantId::new();
        let foreign = TenantId::new();
        let scope = EffectiveScope::Bound(tenant);

        // Even a tenant admin is denied on a foreign tenant's resource,
        // for every action in the table.
        let c = claims(Role::TenantAdmin, Some(tenant));
        for action in [
            Action::CreateUser,
            Action::UpdateUserProfile,
            Action::DeleteUser,
            Action::CreateProject,
            Action::UpdateProject,
            Action::DeleteProject,
            Action::CreateTask,
            Action::UpdateTaskStatus,
            Action::UpdateTaskDetails,
            Action::DeleteTask,
        ] {
            let target = TargetSnapshot {
                tenant_id: Some(foreign),
                subject_user: Some(UserId::new()),
                created_by: Some(c.sub),
                assignee: Some(c.sub),
            };
            assert_eq!(
                engine().decide(&c, &scope, action, &target),
                Err(AuthzError::TenantMismatch),
                "action {action} must fail tenant isolation first"
            );
        }
    }

    #[test]
    fn test_self_deletion_always_denied() {
        let tenant = TenantId::new();
        for role in [Role::TenantAdmin, Role::Member] {
            let c = claims(role, Some(tenant));
            let target = TargetSnapshot::user(Some(tenant), c.sub);
            assert_eq!(
                engine().decide(&c, &EffectiveScope::Bound(tenant), Action::DeleteUser, &target),
                Err(AuthzError::SelfDeletionForbidden)
            );
        }

        // The platform bypass does not exempt self-deletion either.
        let c = claims(Role::PlatformAdmin, None);
        let target = TargetSnapshot::user(None, c.sub);
        assert_eq!(
            engine().decide(&c, &EffectiveScope::Unrestricted, Action::DeleteUser, &target),
            Err(AuthzError::SelfDeletionForbidden)
        );
    }

    #[test]
    fn test_member_cannot_manage_users_or_projects() {
        let tenant = TenantId::new();
        let c = claims(Role::Member, Some(tenant));
        let scope = EffectiveScope::Bound(tenant);

        for action in [Action::CreateUser, Action::CreateProject, Action::DeleteTask] {
            let target = TargetSnapshot {
                tenant_id: Some(tenant),
                subject_user: Some(UserId::new()),
                created_by: Some(UserId::new()),
                assignee: None,
            };
            assert!(matches!(
                engine().decide(&c, &scope, action, &target),
                Err(AuthzError::Unauthorized(_))
            ));
        }
    }

    #[test]
    fn test_member_updates_own_profile_only() {
        let tenant = TenantId::new();
        let c = claims(Role::Member, Some(tenant));
        let scope = EffectiveScope::Bound(tenant);

        let own = TargetSnapshot::user(Some(tenant), c.sub);
        engine()
            .decide(&c, &scope, Action::UpdateUserProfile, &own)
            .expect("self profile update allowed");

        // Privileged fields on oneself still require a tenant admin.
        assert!(matches!(
            engine().decide(&c, &scope, Action::UpdateUserPrivileged, &own),
            Err(AuthzError::Unauthorized(_))
        ));

        let other = TargetSnapshot::user(Some(tenant), UserId::new());
        assert!(matches!(
            engine().decide(&c, &scope, Action::UpdateUserProfile, &other),
            Err(AuthzError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_project_creator_may_update_and_delete() {
        let tenant = TenantId::new();
        let c = claims(Role::Member, Some(tenant));
        let scope = EffectiveScope::Bound(tenant);
        let own_project = TargetSnapshot::project(tenant, c.sub);

        engine()
            .decide(&c, &scope, Action::UpdateProject, &own_project)
            .expect("creator may update");
        engine()
            .decide(&c, &scope, Action::DeleteProject, &own_project)
            .expect("creator may delete");

        let foreign_project = TargetSnapshot::project(tenant, UserId::new());
        assert!(matches!(
            engine().decide(&c, &scope, Action::DeleteProject, &foreign_project),
            Err(AuthzError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_any_member_may_move_task_status() {
        let tenant = TenantId::new();
        let c = claims(Role::Member, Some(tenant));
        let target = TargetSnapshot::task(tenant, UserId::new(), None);
        engine()
            .decide(&c, &EffectiveScope::Bound(tenant), Action::UpdateTaskStatus, &target)
            .expect("status moves are open to the tenant");
    }

    #[test]
    fn test_task_details_rule_is_configurable() {
        let tenant = TenantId::new();
        let c = claims(Role::Member, Some(tenant));
        let scope = EffectiveScope::Bound(tenant);
        let assigned = TargetSnapshot::task(tenant, UserId::new(), Some(c.sub));

        let default_engine = engine();
        default_engine
            .decide(&c, &scope, Action::UpdateTaskDetails, &assigned)
            .expect("assignee may edit under the default rule");

        let strict_engine = PolicyEngine::new(PolicyConfig {
            task_update_rule: TaskUpdateRule::AdminOnly,
        });
        assert!(matches!(
            strict_engine.decide(&c, &scope, Action::UpdateTaskDetails, &assigned),
            Err(AuthzError::Unauthorized(_))
        ));
    }
}
