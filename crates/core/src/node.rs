use serde::{Deserialize, Serialize};

/// What a registry knows about one running application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppInfo {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pid: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_id: Option<String>,
}

impl AppInfo {
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into(), pid: None, window_id: None }
    }

    pub fn with_pid(mut self, pid: i32) -> Self {
        self.pid = Some(pid);
        self
    }

    pub fn with_window_id(mut self, id: impl Into<String>) -> Self {
        self.window_id = Some(id.into());
        self
    }
}
