//! Request and result types of the save operation.

use serde::{Deserialize, Serialize};

use crate::models::{NotificationSettingsMap, Requester, UserId, WorkspaceId};

/// Input of `save_workspace_user_settings`.
///
/// `requester` and `settings` are optional so that a caller omitting them is
/// reported through the result code instead of failing to decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveWorkspaceUserSettingsRequest {
    #[serde(default)]
    pub workspace_id: WorkspaceId,
    #[serde(default)]
    pub user_id: UserId,
    #[serde(default)]
    pub requester: Option<Requester>,
    #[serde(default)]
    pub settings: Option<NotificationSettingsMap>,
}

impl SaveWorkspaceUserSettingsRequest {
    #[must_use]
    pub fn new(
        workspace_id: WorkspaceId,
        user_id: UserId,
        requester: Requester,
        settings: NotificationSettingsMap,
    ) -> Self {
        Self {
            workspace_id,
            user_id,
            requester: Some(requester),
            settings: Some(settings),
        }
    }
}

/// Outcome of a save. Internal failure details are logged, never returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResultCode {
    #[serde(rename = "SUCCESS")]
    Success,
    #[serde(rename = "ERR_SYSTEM_ERROR")]
    SystemError,
    #[serde(rename = "ERR_INSUFFICIENT_PRIVILEGE")]
    InsufficientPrivilege,
}

impl ResultCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "SUCCESS",
            Self::SystemError => "ERR_SYSTEM_ERROR",
            Self::InsufficientPrivilege => "ERR_INSUFFICIENT_PRIVILEGE",
        }
    }
}

impl std::fmt::Display for ResultCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveWorkspaceUserSettingsResult {
    code: ResultCode,
}

impl SaveWorkspaceUserSettingsResult {
    #[must_use]
    pub fn new(code: ResultCode) -> Self {
        Self { code }
    }

    #[must_use]
    pub fn success() -> Self {
        Self::new(ResultCode::Success)
    }

    #[must_use]
    pub fn code(&self) -> ResultCode {
        self.code
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.code == ResultCode::Success
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_without_requester_still_decodes() {
        let request: SaveWorkspaceUserSettingsRequest =
            serde_json::from_value(serde_json::json!({
                "workspace_id": 42,
                "user_id": 7,
                "settings": { "FILE_UPLOADED": false }
            }))
            .unwrap();

        assert_eq!(request.workspace_id, WorkspaceId(42));
        assert!(request.requester.is_none());
        assert_eq!(request.settings.map(|s| s.len()), Some(1));
    }

    #[test]
    fn test_missing_ids_decode_as_unset() {
        let request: SaveWorkspaceUserSettingsRequest =
            serde_json::from_value(serde_json::json!({})).unwrap();

        assert!(!request.workspace_id.is_valid());
        assert!(!request.user_id.is_valid());
    }

    #[test]
    fn test_result_code_wire_names() {
        let result = SaveWorkspaceUserSettingsResult::new(ResultCode::InsufficientPrivilege);
        assert_eq!(
            serde_json::to_value(result).unwrap(),
            serde_json::json!({ "code": "ERR_INSUFFICIENT_PRIVILEGE" })
        );
        assert!(SaveWorkspaceUserSettingsResult::success().is_success());
    }
}
