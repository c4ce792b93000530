//! Shared test helpers for service-level tests.

use std::sync::Arc;

use taskhub_auth::audit::AuditEmitter;
use taskhub_auth::jwt::{JwtDecoder, JwtEncoder};
use taskhub_auth::policy::PolicyEngine;
use taskhub_auth::quota::{MemoryQuotaLedger, QuotaEnforcer};
use taskhub_core::config::AppConfig;
use taskhub_core::types::TenantId;
use taskhub_entity::tenant::{Plan, Tenant};
use taskhub_entity::user::{Role, User};
use taskhub_service::{AccessGate, Actor, ProjectService, RequestContext, TaskService, UserService};
use taskhub_store::memory::{
    MemoryAuditSink, MemoryProjectStore, MemoryTaskStore, MemoryTenantStore, MemoryUserStore,
};
use taskhub_store::traits::{TenantStore, UserStore};

/// Fully wired application context over in-memory collaborators.
pub struct TestApp {
    pub config: AppConfig,
    pub encoder: JwtEncoder,
    pub gate: AccessGate,
    pub users: UserService,
    pub projects: ProjectService,
    pub tasks: TaskService,
    pub tenant_store: Arc<MemoryTenantStore>,
    pub user_store: Arc<MemoryUserStore>,
    pub project_store: Arc<MemoryProjectStore>,
    pub task_store: Arc<MemoryTaskStore>,
    pub audit_sink: MemoryAuditSink,
}

impl TestApp {
    /// Wire up all services with default configuration.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Wire up all services with the given configuration.
    pub fn with_config(config: AppConfig) -> Self {
        let tenant_store = Arc::new(MemoryTenantStore::new());
        let user_store = Arc::new(MemoryUserStore::new());
        let project_store = Arc::new(MemoryProjectStore::new());
        let task_store = Arc::new(MemoryTaskStore::new());
        let audit_sink = MemoryAuditSink::new();
        let ledger = Arc::new(MemoryQuotaLedger::new());

        let encoder = JwtEncoder::new(&config.auth);
        let decoder = JwtDecoder::new(&config.auth);
        let policy = PolicyEngine::new(config.policy.clone());
        let quota = QuotaEnforcer::new(ledger, config.quota.clone());
        let audit = AuditEmitter::new(Arc::new(audit_sink.clone()), config.audit.clone());

        let gate = AccessGate::new(decoder, tenant_store.clone());
        let users = UserService::new(
            user_store.clone(),
            tenant_store.clone(),
            policy.clone(),
            quota.clone(),
            audit.clone(),
        );
        let projects = ProjectService::new(
            project_store.clone(),
            tenant_store.clone(),
            policy.clone(),
            quota.clone(),
            audit.clone(),
        );
        let tasks = TaskService::new(task_store.clone(), project_store.clone(), policy, audit);

        Self {
            config,
            encoder,
            gate,
            users,
            projects,
            tasks,
            tenant_store,
            user_store,
            project_store,
            task_store,
            audit_sink,
        }
    }

    /// Seed a tenant with explicit ceilings.
    pub async fn seed_tenant(&self, max_users: u32, max_projects: u32) -> Tenant {
        let mut tenant = Tenant::new("acme", Plan::Free);
        tenant.max_users = max_users;
        tenant.max_projects = max_projects;
        self.tenant_store.insert(&tenant).await.expect("seed tenant");
        tenant
    }

    /// Seed a user directly into storage and mint a credential for them.
    pub async fn seed_user(&self, tenant_id: Option<TenantId>, role: Role) -> (User, String) {
        let user = User::new(
            tenant_id,
            format!("user-{}", uuid::Uuid::new_v4()),
            "Test User",
            role,
        );
        self.user_store.insert(&user).await.expect("seed user");
        let token = self
            .encoder
            .issue(user.id, tenant_id, role)
            .expect("issue credential");
        (user, token)
    }

    /// Authenticate a token with no tenant hint.
    pub async fn actor(&self, token: &str) -> Actor {
        self.gate.authenticate(token, None).await.expect("authenticate")
    }

    /// A request context with a fixed source address.
    pub fn ctx(&self) -> RequestContext {
        RequestContext::new(Some("203.0.113.7".to_string()), None)
    }

    /// Wait for spawned audit appends to land, then return the count.
    pub async fn settled_audit_count(&self) -> usize {
        tokio::time::sleep(std::time::Duration::from_millis(25)).await;
        self.audit_sink.len().await
    }
}
