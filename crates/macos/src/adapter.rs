use app_finder_core::{
    adapter::{AppHandle, AppSession, PlatformAdapter},
    error::AdapterError,
    session::SnapshotSession,
};

/// Foreground processes reported by System Events. Each handle owns the
/// process's AX application element.
pub struct MacOSAdapter;

impl MacOSAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MacOSAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformAdapter for MacOSAdapter {
    fn open_session(&self) -> Result<Box<dyn AppSession>, AdapterError> {
        crate::permissions::ensure_trusted()?;
        let apps = crate::processes::list_foreground()?;
        tracing::debug!("macos: {} foreground processes", apps.len());

        let handles = apps
            .into_iter()
            .map(|info| {
                let el = info.pid.map(crate::element::AppElement::for_pid);
                match el {
                    Some(el) if !el.is_null() => AppHandle::with_release(info, move |_| drop(el)),
                    _ => AppHandle::new(info),
                }
            })
            .collect();
        Ok(Box::new(SnapshotSession::from_handles(handles)))
    }
}
