use std::collections::HashMap;
use std::sync::Arc;

use arc_swap::ArcSwap;
use async_trait::async_trait;
use tracing::info;

use crate::config::WorkspaceSettingsConfig;
use crate::domain::access::WORKSPACE_FEATURE_FLAG;
use crate::domain::error::DomainError;
use crate::domain::ports::FeatureFlags;

/// Feature flags held in memory and swappable at runtime.
///
/// Every lookup reads the current snapshot, so a flip is seen by the next
/// request. Unknown flags read as disabled.
#[derive(Default)]
pub struct ConfigFeatureFlags {
    flags: ArcSwap<HashMap<String, bool>>,
}

impl ConfigFeatureFlags {
    #[must_use]
    pub fn from_config(config: &WorkspaceSettingsConfig) -> Self {
        let flags = HashMap::from([(
            WORKSPACE_FEATURE_FLAG.to_owned(),
            config.workspace_enabled,
        )]);
        Self {
            flags: ArcSwap::from_pointee(flags),
        }
    }

    pub fn set(&self, flag: &str, enabled: bool) {
        self.flags.rcu(|current| {
            let mut next = HashMap::clone(current);
            next.insert(flag.to_owned(), enabled);
            Arc::new(next)
        });
        info!(flag, enabled, "Feature flag changed");
    }

    #[must_use]
    pub fn get(&self, flag: &str) -> bool {
        self.flags.load().get(flag).copied().unwrap_or(false)
    }
}

#[async_trait]
impl FeatureFlags for ConfigFeatureFlags {
    async fn is_enabled(&self, flag: &str) -> Result<bool, DomainError> {
        Ok(self.get(flag))
    }
}
