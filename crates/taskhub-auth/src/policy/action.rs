//! The closed set of actions the policy engine decides on.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An action an actor can request on a resource.
///
/// User updates are split into profile and privileged variants so the
/// two different rule sets are distinct at the type level rather than
/// inferred from the request payload downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Create a user within a tenant.
    CreateUser,
    /// Update a user's non-privileged fields (full name).
    UpdateUserProfile,
    /// Change a user's role or account status.
    UpdateUserPrivileged,
    /// Delete a user.
    DeleteUser,
    /// Create a project.
    CreateProject,
    /// Update a project.
    UpdateProject,
    /// Delete a project.
    DeleteProject,
    /// Create a task under a project.
    CreateTask,
    /// Update a task's workflow status only.
    UpdateTaskStatus,
    /// Update a task's full details.
    UpdateTaskDetails,
    /// Delete a task.
    DeleteTask,
}

impl Action {
    /// Stable audit tag for this action.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::CreateUser => "user.create",
            Self::UpdateUserProfile => "user.update_profile",
            Self::UpdateUserPrivileged => "user.update_privileged",
            Self::DeleteUser => "user.delete",
            Self::CreateProject => "project.create",
            Self::UpdateProject => "project.update",
            Self::DeleteProject => "project.delete",
            Self::CreateTask => "task.create",
            Self::UpdateTaskStatus => "task.update_status",
            Self::UpdateTaskDetails => "task.update_details",
            Self::DeleteTask => "task.delete",
        }
    }

    /// The entity type this action targets, as recorded in audit entries.
    pub fn entity_type(&self) -> &'static str {
        match self {
            Self::CreateUser
            | Self::UpdateUserProfile
            | Self::UpdateUserPrivileged
            | Self::DeleteUser => "user",
            Self::CreateProject | Self::UpdateProject | Self::DeleteProject => "project",
            Self::CreateTask
            | Self::UpdateTaskStatus
            | Self::UpdateTaskDetails
            | Self::DeleteTask => "task",
        }
    }

    /// Whether a successful outcome changes state (and must be audited).
    pub fn is_state_changing(&self) -> bool {
        // Every action in the current set mutates; reads never reach the
        // policy engine as Actions.
        true
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}
