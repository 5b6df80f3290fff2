use app_finder_core::{
    adapter::{AppSession, PlatformAdapter},
    error::AdapterError,
    session::SnapshotSession,
};

/// Processes that own a main window, as reported by `Get-Process`.
pub struct WindowsAdapter;

impl WindowsAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WindowsAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformAdapter for WindowsAdapter {
    fn open_session(&self) -> Result<Box<dyn AppSession>, AdapterError> {
        let apps = list_windowed_processes()?;
        tracing::debug!("windows: {} windowed processes", apps.len());
        Ok(Box::new(SnapshotSession::from_infos(apps)))
    }
}

#[cfg_attr(not(target_os = "windows"), allow(dead_code))]
const LIST_SCRIPT: &str = "Get-Process | Where-Object { $_.MainWindowTitle } | \
ForEach-Object { \"$($_.ProcessName)|$($_.Id)\" }";

#[cfg(target_os = "windows")]
fn list_windowed_processes() -> Result<Vec<app_finder_core::node::AppInfo>, AdapterError> {
    use app_finder_core::session::parse_name_pid_lines;
    use std::process::Command;

    let output = Command::new("powershell")
        .args(["-NoProfile", "-NonInteractive", "-Command", LIST_SCRIPT])
        .output()
        .map_err(|e| AdapterError::connection(format!("powershell failed: {e}")))?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(AdapterError::connection("Could not query the process list")
            .with_platform_detail(stderr.trim().to_string()));
    }
    Ok(parse_name_pid_lines(&String::from_utf8_lossy(&output.stdout)))
}

#[cfg(not(target_os = "windows"))]
fn list_windowed_processes() -> Result<Vec<app_finder_core::node::AppInfo>, AdapterError> {
    Err(AdapterError::not_supported("open_session"))
}
