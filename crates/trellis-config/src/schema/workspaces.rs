use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspacesConfig {
    /// Number of workspaces (valid range: 1-10).
    pub count: u8,
}

impl Default for WorkspacesConfig {
    fn default() -> Self {
        Self { count: 10 }
    }
}
