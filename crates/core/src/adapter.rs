use crate::{error::AdapterError, node::AppInfo};
use std::fmt;

type ReleaseFn = Box<dyn FnOnce(&AppInfo) + Send>;

/// Opaque reference to a running application.
///
/// A handle is released exactly once: either by [`AppHandle::release`] or,
/// failing that, when it is dropped. Platform crates attach whatever native
/// resource backs the handle through [`AppHandle::with_release`].
pub struct AppHandle {
    info: AppInfo,
    on_release: Option<ReleaseFn>,
}

impl AppHandle {
    pub fn new(info: AppInfo) -> Self {
        Self { info, on_release: None }
    }

    pub fn with_release(info: AppInfo, f: impl FnOnce(&AppInfo) + Send + 'static) -> Self {
        Self { info, on_release: Some(Box::new(f)) }
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }

    pub fn info(&self) -> &AppInfo {
        &self.info
    }

    pub fn release(self) {
        drop(self)
    }
}

impl Drop for AppHandle {
    fn drop(&mut self) {
        if let Some(f) = self.on_release.take() {
            f(&self.info);
        }
    }
}

impl fmt::Debug for AppHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppHandle")
            .field("info", &self.info)
            .field("native", &self.on_release.is_some())
            .finish()
    }
}

/// One open connection to a running-application registry.
///
/// `count` is fixed when the session is opened. `close` must tolerate being
/// called more than once and before the session is exhausted, and must give
/// back every handle it still holds even when it reports an error.
pub trait AppSession: Send {
    fn count(&self) -> usize;

    fn next_entry(&mut self) -> Option<AppHandle>;

    fn close(&mut self) -> Result<(), AdapterError>;
}

pub trait PlatformAdapter: Send + Sync {
    fn open_session(&self) -> Result<Box<dyn AppSession>, AdapterError> {
        Err(AdapterError::not_supported("open_session"))
    }
}
