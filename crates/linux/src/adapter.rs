use app_finder_core::{
    adapter::{AppSession, PlatformAdapter},
    error::AdapterError,
    session::SnapshotSession,
};

/// Reads the X11 client list through `wmctrl`. Application names are the
/// top-level window titles.
pub struct LinuxAdapter;

impl LinuxAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LinuxAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformAdapter for LinuxAdapter {
    fn open_session(&self) -> Result<Box<dyn AppSession>, AdapterError> {
        let apps = crate::wmctrl::list_windows()?;
        tracing::debug!("linux: {} top-level windows", apps.len());
        Ok(Box::new(SnapshotSession::from_infos(apps)))
    }
}
