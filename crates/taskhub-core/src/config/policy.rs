//! Authorization policy configuration.

use serde::{Deserialize, Serialize};

/// Who may update the full details of a task.
///
/// The two variants reflect the two behaviors observed in production
/// deployments; the choice is a product decision, not a hard-wired rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskUpdateRule {
    /// The task's creator, its assignee, or a tenant admin.
    CreatorAssigneeOrAdmin,
    /// A tenant admin only.
    AdminOnly,
}

/// Policy engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Rule governing full task-detail updates.
    #[serde(default = "default_task_update_rule")]
    pub task_update_rule: TaskUpdateRule,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            task_update_rule: default_task_update_rule(),
        }
    }
}

fn default_task_update_rule() -> TaskUpdateRule {
    TaskUpdateRule::CreatorAssigneeOrAdmin
}
