//! Workspace access resolution.
//!
//! Access to a workspace is decided in three tiers:
//!
//! 1. the workspace feature must be enabled globally, for everyone;
//! 2. the requester must hold a functional role and be a member of the
//!    workspace (viewer, collaborator or manager);
//! 3. a root requester overrides any denial from tier 2.
//!
//! Tier 2 collects every failed check into one [`AccessDenial`] instead of
//! stopping at the first one. Tier 3 is applied by the caller.

use std::fmt;
use std::sync::Arc;

use sea_orm::ConnectionTrait;
use tracing::{debug, info};
use workspace_settings_sdk::{FunctionalRole, Requester, Workspace, WorkspaceId};

use crate::domain::error::DomainError;
use crate::domain::ports::FeatureFlags;
use crate::domain::repo::MembershipRepository;

/// Feature switch of the whole workspace functionality.
pub const WORKSPACE_FEATURE_FLAG: &str = "workspace.enable";

/// Functional roles that allow working with workspaces at all.
const WORKSPACE_ROLES: [FunctionalRole; 3] = [
    FunctionalRole::Sender,
    FunctionalRole::SenderRestricted,
    FunctionalRole::Recipient,
];

/// Membership role inside one workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkspaceRole {
    Viewer,
    Collaborator,
    Manager,
}

impl WorkspaceRole {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Viewer => "VIEWER",
            Self::Collaborator => "COLLABORATOR",
            Self::Manager => "MANAGER",
        }
    }
}

/// Workspace roles held by a requester. Roles are not exclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoleMembership {
    pub is_viewer: bool,
    pub is_collaborator: bool,
    pub is_manager: bool,
}

impl RoleMembership {
    #[must_use]
    pub fn is_member(self) -> bool {
        self.is_viewer || self.is_collaborator || self.is_manager
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DenialReason {
    MissingFunctionalRole,
    NotAMember(WorkspaceId),
}

impl fmt::Display for DenialReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingFunctionalRole => {
                f.write_str("requester does not have any of the following roles: ")?;
                for (i, role) in WORKSPACE_ROLES.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    f.write_str(role.as_str())?;
                }
                Ok(())
            }
            Self::NotAMember(id) => write!(
                f,
                "requester is not a member (viewer, collaborator or manager) of workspace {id}"
            ),
        }
    }
}

/// Every reason a requester was refused. Empty means access is granted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessDenial {
    reasons: Vec<DenialReason>,
}

impl AccessDenial {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reasons.is_empty()
    }

    #[must_use]
    pub fn reasons(&self) -> &[DenialReason] {
        &self.reasons
    }

    /// One line for operators: all reasons plus the requester.
    #[must_use]
    pub fn message(&self, requester: &Requester) -> String {
        let reasons: Vec<String> = self.reasons.iter().map(ToString::to_string).collect();
        format!("{}. {requester}", reasons.join("; "))
    }
}

/// Membership tier of the access decision, without the root override.
#[must_use]
pub fn evaluate(
    requester: &Requester,
    workspace_id: WorkspaceId,
    membership: RoleMembership,
) -> AccessDenial {
    let mut reasons = Vec::new();
    if !WORKSPACE_ROLES.iter().any(|role| requester.has_role(*role)) {
        reasons.push(DenialReason::MissingFunctionalRole);
    }
    if !membership.is_member() {
        reasons.push(DenialReason::NotAMember(workspace_id));
    }
    AccessDenial { reasons }
}

pub struct WorkspaceAccessResolver<M: MembershipRepository> {
    memberships: Arc<M>,
    feature_flags: Arc<dyn FeatureFlags>,
}

impl<M: MembershipRepository> WorkspaceAccessResolver<M> {
    pub fn new(memberships: Arc<M>, feature_flags: Arc<dyn FeatureFlags>) -> Self {
        Self {
            memberships,
            feature_flags,
        }
    }

    /// Fails for every requester, root included, while the feature is off.
    ///
    /// # Errors
    /// `InsufficientPrivilege` when the feature is disabled, or the flag
    /// store's own error.
    pub async fn ensure_feature_enabled(&self) -> Result<(), DomainError> {
        if self.feature_flags.is_enabled(WORKSPACE_FEATURE_FLAG).await? {
            return Ok(());
        }
        let message = "Secure workspace feature is not enabled";
        info!(flag = WORKSPACE_FEATURE_FLAG, "{message}");
        Err(DomainError::insufficient_privilege(message))
    }

    /// Queries each workspace role separately.
    ///
    /// # Errors
    /// Storage errors of the membership lookups.
    pub async fn resolve_role<C: ConnectionTrait>(
        &self,
        runner: &C,
        workspace: &Workspace,
        requester: &Requester,
    ) -> Result<RoleMembership, DomainError> {
        let membership = RoleMembership {
            is_viewer: self
                .memberships
                .is_viewer(runner, workspace, requester)
                .await?,
            is_collaborator: self
                .memberships
                .is_collaborator(runner, workspace, requester)
                .await?,
            is_manager: self
                .memberships
                .is_manager(runner, workspace, requester)
                .await?,
        };
        debug!(?membership, "Resolved workspace roles");
        Ok(membership)
    }

    /// Feature gate, then membership evaluation.
    ///
    /// The returned denial is computed for root requesters too; deciding
    /// whether root overrides it is up to the caller.
    ///
    /// # Errors
    /// `InsufficientPrivilege` when the feature is disabled, or storage errors.
    pub async fn check_access<C: ConnectionTrait>(
        &self,
        runner: &C,
        workspace: &Workspace,
        requester: &Requester,
    ) -> Result<AccessDenial, DomainError> {
        self.ensure_feature_enabled().await?;
        let membership = self.resolve_role(runner, workspace, requester).await?;
        Ok(evaluate(requester, workspace.id, membership))
    }
}
