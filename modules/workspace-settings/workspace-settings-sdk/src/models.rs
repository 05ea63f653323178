//! Public models for the workspace settings module.
//!
//! These are transport-agnostic data structures that define the contract
//! between the module and its consumers.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::{Date, OffsetDateTime};

/// Identifier of a workspace (the id of the package it is bound to).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkspaceId(pub i64);

impl WorkspaceId {
    /// "No id" marker. Invalid for every operation.
    pub const UNSET: Self = Self(-1);

    #[must_use]
    pub fn is_valid(self) -> bool {
        self != Self::UNSET
    }
}

impl Default for WorkspaceId {
    fn default() -> Self {
        Self::UNSET
    }
}

impl fmt::Display for WorkspaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a platform user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl UserId {
    /// "No id" marker. Invalid for every operation.
    pub const UNSET: Self = Self(-1);

    #[must_use]
    pub fn is_valid(self) -> bool {
        self != Self::UNSET
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::UNSET
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Returned when a string does not name a known key of a closed set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind}: '{value}'")]
pub struct ParseKeyError {
    kind: &'static str,
    value: String,
}

/// Platform-wide functional role of a requester.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FunctionalRole {
    Sender,
    SenderRestricted,
    Recipient,
}

impl FunctionalRole {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sender => "SENDER",
            Self::SenderRestricted => "SENDER_RESTRICTED",
            Self::Recipient => "RECIPIENT",
        }
    }
}

impl fmt::Display for FunctionalRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FunctionalRole {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SENDER" => Ok(Self::Sender),
            "SENDER_RESTRICTED" => Ok(Self::SenderRestricted),
            "RECIPIENT" => Ok(Self::Recipient),
            _ => Err(ParseKeyError {
                kind: "functional role",
                value: s.to_owned(),
            }),
        }
    }
}

/// The acting principal of an operation.
///
/// Immutable once built; carries the identity and every role flag the
/// access checks need.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requester {
    user_id: UserId,
    #[serde(default)]
    root: bool,
    #[serde(default)]
    roles: BTreeSet<FunctionalRole>,
}

impl Requester {
    #[must_use]
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            root: false,
            roles: BTreeSet::new(),
        }
    }

    /// The system root user. Bypasses membership checks, never the feature gate.
    #[must_use]
    pub fn root(user_id: UserId) -> Self {
        Self {
            user_id,
            root: true,
            roles: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn with_role(mut self, role: FunctionalRole) -> Self {
        self.roles.insert(role);
        self
    }

    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.root
    }

    #[must_use]
    pub fn has_role(&self, role: FunctionalRole) -> bool {
        self.roles.contains(&role)
    }
}

impl fmt::Display for Requester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Requester(user_id={}, root={}, roles=[", self.user_id, self.root)?;
        for (i, role) in self.roles.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(role.as_str())?;
        }
        f.write_str("])")
    }
}

/// Workspace event a user can be notified about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NotificationEvent {
    #[serde(rename = "FILE_UPLOADED")]
    FileUploaded,
    #[serde(rename = "FILE_DOWNLOADED")]
    FileDownloaded,
    #[serde(rename = "FILE_UPDATED")]
    FileUpdated,
    #[serde(rename = "FILE_DELETED")]
    FileDeleted,
    #[serde(rename = "COMMENT_ADDED")]
    CommentAdded,
    #[serde(rename = "DIR_UPDATED")]
    DirectoryUpdated,
    #[serde(rename = "OTHER_CHANGES")]
    OtherChanges,
    #[serde(rename = "USER_ADDED")]
    UserAdded,
    #[serde(rename = "USER_DELETED")]
    UserRemoved,
    #[serde(rename = "WORKSPACE_DELETED")]
    WorkspaceDeleted,
    #[serde(rename = "USER_SELF_REMOVE")]
    UserSelfRemoved,
}

impl NotificationEvent {
    /// Every event, in the order settings are written.
    pub const ALL: [Self; 11] = [
        Self::FileUploaded,
        Self::FileDownloaded,
        Self::FileUpdated,
        Self::FileDeleted,
        Self::CommentAdded,
        Self::DirectoryUpdated,
        Self::OtherChanges,
        Self::UserAdded,
        Self::UserRemoved,
        Self::WorkspaceDeleted,
        Self::UserSelfRemoved,
    ];

    /// Stored and wire name of the event.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FileUploaded => "FILE_UPLOADED",
            Self::FileDownloaded => "FILE_DOWNLOADED",
            Self::FileUpdated => "FILE_UPDATED",
            Self::FileDeleted => "FILE_DELETED",
            Self::CommentAdded => "COMMENT_ADDED",
            Self::DirectoryUpdated => "DIR_UPDATED",
            Self::OtherChanges => "OTHER_CHANGES",
            Self::UserAdded => "USER_ADDED",
            Self::UserRemoved => "USER_DELETED",
            Self::WorkspaceDeleted => "WORKSPACE_DELETED",
            Self::UserSelfRemoved => "USER_SELF_REMOVE",
        }
    }
}

impl fmt::Display for NotificationEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationEvent {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|event| event.as_str() == wanted)
            .ok_or_else(|| ParseKeyError {
                kind: "notification event",
                value: s.to_owned(),
            })
    }
}

/// Enabled flag per notification event.
///
/// Partial by nature: an event without an entry is enabled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationSettingsMap(BTreeMap<NotificationEvent, bool>);

impl NotificationSettingsMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A map holding an explicit entry for every event.
    #[must_use]
    pub fn all_enabled() -> Self {
        NotificationEvent::ALL.into_iter().map(|e| (e, true)).collect()
    }

    #[must_use]
    pub fn with(mut self, event: NotificationEvent, enabled: bool) -> Self {
        self.set(event, enabled);
        self
    }

    pub fn set(&mut self, event: NotificationEvent, enabled: bool) {
        self.0.insert(event, enabled);
    }

    /// Explicit entry for `event`, if any.
    #[must_use]
    pub fn get(&self, event: NotificationEvent) -> Option<bool> {
        self.0.get(&event).copied()
    }

    /// Effective flag for `event`, defaulting to enabled.
    #[must_use]
    pub fn is_enabled(&self, event: NotificationEvent) -> bool {
        self.get(event).unwrap_or(true)
    }

    /// Every event with its effective flag, in write order.
    pub fn resolved(&self) -> impl Iterator<Item = (NotificationEvent, bool)> + '_ {
        NotificationEvent::ALL
            .into_iter()
            .map(|event| (event, self.is_enabled(event)))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(NotificationEvent, bool)> for NotificationSettingsMap {
    fn from_iter<T: IntoIterator<Item = (NotificationEvent, bool)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Effective notification settings of one user in one workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceUserSettings {
    pub workspace_id: WorkspaceId,
    pub user_id: UserId,
    pub settings: NotificationSettingsMap,
}

/// Automatic deletion plan of a workspace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AutoDeletionSchedule {
    pub delete_on: Option<Date>,
    pub reminder_on: Option<Date>,
    pub reminder_sent_on: Option<Date>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditTrail {
    pub created_by: UserId,
    pub created_at: OffsetDateTime,
    pub last_updated_by: Option<UserId>,
    pub last_updated_at: Option<OffsetDateTime>,
    pub last_activity_at: Option<OffsetDateTime>,
}

/// Snapshot of a workspace as read from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    pub id: WorkspaceId,
    pub name: String,
    pub description: Option<String>,
    pub label: Option<String>,
    pub hide_activity: bool,
    pub status: String,
    pub latest_version: i32,
    pub latest_published_version: i32,
    pub auto_deletion: AutoDeletionSchedule,
    pub audit: AuditTrail,
    pub valid_primary_owner_count: i32,
    pub is_workspace: bool,
    pub is_locked: bool,
    pub locked_by: Option<UserId>,
}

impl Workspace {
    #[must_use]
    pub fn creator(&self) -> UserId {
        self.audit.created_by
    }
}
