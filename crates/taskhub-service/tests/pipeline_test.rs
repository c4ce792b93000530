//! End-to-end pipeline scenarios over the in-memory collaborators.

mod common;

use common::TestApp;

use taskhub_core::config::AppConfig;
use taskhub_core::error::ErrorKind;
use taskhub_core::types::TenantId;
use taskhub_entity::project::{NewProject, Project};
use taskhub_entity::task::NewTask;
use taskhub_entity::tenant::TenantStatus;
use taskhub_entity::user::{NewUser, Role, UserUpdate};
use taskhub_auth::jwt::Claims;
use taskhub_store::traits::{AuditSink, ProjectStore, TenantStore};

#[tokio::test]
async fn test_expired_credential_short_circuits_pipeline() {
    let app = TestApp::new();
    let tenant = app.seed_tenant(5, 5).await;
    let (user, _) = app.seed_user(Some(tenant.id), Role::TenantAdmin).await;

    // Sign an already-expired credential with the real key material.
    let now = chrono::Utc::now();
    let claims = Claims {
        sub: user.id,
        tenant_id: Some(tenant.id),
        role: Role::TenantAdmin,
        iat: (now - chrono::Duration::hours(48)).timestamp(),
        exp: (now - chrono::Duration::hours(24)).timestamp(),
        jti: uuid::Uuid::new_v4(),
    };
    let expired_token = jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(app.config.auth.jwt_secret.as_bytes()),
    )
    .expect("sign");

    let err = app
        .gate
        .authenticate(&expired_token, None)
        .await
        .expect_err("expired credential must be rejected");
    assert_eq!(err.kind, ErrorKind::Expired);

    // No downstream component ran: the audit log stays empty.
    assert_eq!(app.settled_audit_count().await, 0);
}

#[tokio::test]
async fn test_tenant_hint_must_match_claims() {
    let app = TestApp::new();
    let tenant = app.seed_tenant(5, 5).await;
    let (_, token) = app.seed_user(Some(tenant.id), Role::Member).await;

    let err = app
        .gate
        .authenticate(&token, Some(TenantId::new()))
        .await
        .expect_err("foreign tenant hint must be rejected");
    assert_eq!(err.kind, ErrorKind::CrossTenantAccessDenied);
}

#[tokio::test]
async fn test_suspended_tenant_is_denied_at_the_gate() {
    let app = TestApp::new();
    let mut tenant = app.seed_tenant(5, 5).await;
    let (_, token) = app.seed_user(Some(tenant.id), Role::TenantAdmin).await;

    tenant.status = TenantStatus::Suspended;
    app.tenant_store.update(&tenant).await.expect("suspend");

    let err = app
        .gate
        .authenticate(&token, None)
        .await
        .expect_err("suspended tenant must be denied");
    assert_eq!(err.kind, ErrorKind::TenantSuspended);
}

#[tokio::test]
async fn test_cross_tenant_project_deletion_is_tenant_mismatch() {
    let app = TestApp::new();
    let tenant_a = app.seed_tenant(5, 5).await;
    let tenant_b = app.seed_tenant(5, 5).await;
    let (_, token) = app.seed_user(Some(tenant_a.id), Role::Member).await;
    let (owner_b, _) = app.seed_user(Some(tenant_b.id), Role::TenantAdmin).await;

    // A project owned by the other tenant.
    let foreign = Project::new(tenant_b.id, "other-org", owner_b.id);
    app.project_store.insert(&foreign).await.expect("seed project");

    let actor = app.actor(&token).await;
    let err = app
        .projects
        .delete_project(&actor, &app.ctx(), foreign.id)
        .await
        .expect_err("cross-tenant deletion must be denied");

    // Isolation fires before any ownership or role rule.
    assert_eq!(err.kind, ErrorKind::TenantMismatch);
    assert!(
        app.project_store
            .find_by_id(foreign.id)
            .await
            .unwrap()
            .is_some(),
        "project must still exist"
    );
}

#[tokio::test]
async fn test_project_quota_exhaustion_denies_creation() {
    let app = TestApp::new();
    let tenant = app.seed_tenant(5, 2).await;
    let (_, token) = app.seed_user(Some(tenant.id), Role::TenantAdmin).await;
    let actor = app.actor(&token).await;

    for name in ["alpha", "beta"] {
        app.projects
            .create_project(
                &actor,
                &app.ctx(),
                NewProject {
                    tenant_id: None,
                    name: name.to_string(),
                },
            )
            .await
            .expect("within quota");
    }

    let err = app
        .projects
        .create_project(
            &actor,
            &app.ctx(),
            NewProject {
                tenant_id: None,
                name: "gamma".to_string(),
            },
        )
        .await
        .expect_err("third project must exceed the ceiling");
    assert_eq!(err.kind, ErrorKind::QuotaExceeded);

    // No third row was persisted.
    assert_eq!(
        app.project_store.count_for_tenant(tenant.id).await.unwrap(),
        2
    );
}

#[tokio::test]
async fn test_member_cannot_create_project() {
    let app = TestApp::new();
    let tenant = app.seed_tenant(5, 5).await;
    let (_, token) = app.seed_user(Some(tenant.id), Role::Member).await;
    let actor = app.actor(&token).await;

    let err = app
        .projects
        .create_project(
            &actor,
            &app.ctx(),
            NewProject {
                tenant_id: None,
                name: "side-project".to_string(),
            },
        )
        .await
        .expect_err("members may not create projects");
    assert_eq!(err.kind, ErrorKind::Unauthorized);
}

#[tokio::test]
async fn test_self_deletion_is_always_denied() {
    let app = TestApp::new();
    let tenant = app.seed_tenant(5, 5).await;
    let (admin, token) = app.seed_user(Some(tenant.id), Role::TenantAdmin).await;
    let actor = app.actor(&token).await;

    let err = app
        .users
        .delete_user(&actor, &app.ctx(), admin.id)
        .await
        .expect_err("self-deletion must be denied");
    assert_eq!(err.kind, ErrorKind::SelfDeletionForbidden);
}

#[tokio::test]
async fn test_task_inherits_tenant_and_rejects_mismatched_assertion() {
    let app = TestApp::new();
    let tenant = app.seed_tenant(5, 5).await;
    let (admin, admin_token) = app.seed_user(Some(tenant.id), Role::TenantAdmin).await;
    let admin_actor = app.actor(&admin_token).await;

    let project = app
        .projects
        .create_project(
            &admin_actor,
            &app.ctx(),
            NewProject {
                tenant_id: None,
                name: "rollout".to_string(),
            },
        )
        .await
        .expect("create project");

    // A mismatched asserted tenant is rejected before persistence.
    let err = app
        .tasks
        .create_task(
            &admin_actor,
            &app.ctx(),
            NewTask {
                project_id: project.id,
                tenant_id: Some(TenantId::new()),
                title: "smuggled".to_string(),
                details: None,
                assignee: None,
            },
        )
        .await
        .expect_err("mismatched tenant assertion must be rejected");
    assert_eq!(err.kind, ErrorKind::Validation);

    // A regular member may create tasks; the binding comes from the project.
    let (_, member_token) = app.seed_user(Some(tenant.id), Role::Member).await;
    let member_actor = app.actor(&member_token).await;
    let task = app
        .tasks
        .create_task(
            &member_actor,
            &app.ctx(),
            NewTask {
                project_id: project.id,
                tenant_id: None,
                title: "ship it".to_string(),
                details: None,
                assignee: Some(admin.id),
            },
        )
        .await
        .expect("member may create a task");
    assert_eq!(task.tenant_id, project.tenant_id);
}

#[tokio::test]
async fn test_state_changes_are_audited_with_source_address() {
    let app = TestApp::new();
    let tenant = app.seed_tenant(5, 5).await;
    let (_, token) = app.seed_user(Some(tenant.id), Role::TenantAdmin).await;
    let actor = app.actor(&token).await;

    let created = app
        .users
        .create_user(
            &actor,
            &app.ctx(),
            NewUser {
                tenant_id: None,
                username: "newhire".to_string(),
                full_name: "New Hire".to_string(),
                role: Role::Member,
            },
        )
        .await
        .expect("create user");

    assert_eq!(app.settled_audit_count().await, 1);
    let entries = app.audit_sink.recent(10).await.unwrap();
    assert_eq!(entries[0].action, "user.create");
    assert_eq!(entries[0].entity_type, "user");
    assert_eq!(entries[0].entity_id, created.id.into_uuid());
    assert_eq!(entries[0].tenant_id, Some(tenant.id));
    assert_eq!(entries[0].source_addr.as_deref(), Some("203.0.113.7"));
}

#[tokio::test]
async fn test_denied_actions_not_audited_unless_opted_in() {
    let app = TestApp::new();
    let tenant = app.seed_tenant(5, 5).await;
    let (_, token) = app.seed_user(Some(tenant.id), Role::Member).await;
    let actor = app.actor(&token).await;

    let _ = app
        .projects
        .create_project(
            &actor,
            &app.ctx(),
            NewProject {
                tenant_id: None,
                name: "denied".to_string(),
            },
        )
        .await
        .expect_err("denied");
    assert_eq!(app.settled_audit_count().await, 0);

    // Opt in and repeat: the denial is now recorded.
    let mut config = AppConfig::default();
    config.audit.record_denials = true;
    let opted = TestApp::with_config(config);
    let tenant = opted.seed_tenant(5, 5).await;
    let (_, token) = opted.seed_user(Some(tenant.id), Role::Member).await;
    let actor = opted.actor(&token).await;

    let _ = opted
        .projects
        .create_project(
            &actor,
            &opted.ctx(),
            NewProject {
                tenant_id: None,
                name: "denied".to_string(),
            },
        )
        .await
        .expect_err("denied");
    assert_eq!(opted.settled_audit_count().await, 1);
}

#[tokio::test]
async fn test_member_updates_own_name_but_not_own_role() {
    let app = TestApp::new();
    let tenant = app.seed_tenant(5, 5).await;
    let (member, token) = app.seed_user(Some(tenant.id), Role::Member).await;
    let actor = app.actor(&token).await;

    let updated = app
        .users
        .update_user(
            &actor,
            &app.ctx(),
            member.id,
            UserUpdate {
                full_name: Some("Renamed".to_string()),
                ..UserUpdate::default()
            },
        )
        .await
        .expect("self profile update");
    assert_eq!(updated.full_name, "Renamed");

    let err = app
        .users
        .update_user(
            &actor,
            &app.ctx(),
            member.id,
            UserUpdate {
                role: Some(Role::TenantAdmin),
                ..UserUpdate::default()
            },
        )
        .await
        .expect_err("self role escalation must be denied");
    assert_eq!(err.kind, ErrorKind::Unauthorized);
}

#[tokio::test]
async fn test_platform_admin_acts_across_tenants_but_names_one_for_creation() {
    let app = TestApp::new();
    let tenant = app.seed_tenant(5, 5).await;
    let (_, token) = app.seed_user(None, Role::PlatformAdmin).await;
    let actor = app.actor(&token).await;

    // Creation without naming a tenant is a validation failure, not a
    // quota bypass.
    let err = app
        .projects
        .create_project(
            &actor,
            &app.ctx(),
            NewProject {
                tenant_id: None,
                name: "orphan".to_string(),
            },
        )
        .await
        .expect_err("platform admin must name a tenant");
    assert_eq!(err.kind, ErrorKind::Validation);

    let project = app
        .projects
        .create_project(
            &actor,
            &app.ctx(),
            NewProject {
                tenant_id: Some(tenant.id),
                name: "provisioned".to_string(),
            },
        )
        .await
        .expect("platform admin may create into any tenant");
    assert_eq!(project.tenant_id, tenant.id);
}
