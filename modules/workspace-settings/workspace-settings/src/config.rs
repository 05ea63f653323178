use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceSettingsConfig {
    /// Global switch of the workspace feature, read into the `workspace.enable` flag.
    #[serde(default = "default_workspace_enabled")]
    pub workspace_enabled: bool,
}

impl Default for WorkspaceSettingsConfig {
    fn default() -> Self {
        Self {
            workspace_enabled: default_workspace_enabled(),
        }
    }
}

fn default_workspace_enabled() -> bool {
    true
}
