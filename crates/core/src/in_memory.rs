use crate::{
    adapter::{AppHandle, AppSession, PlatformAdapter},
    error::AdapterError,
    node::AppInfo,
    session::SnapshotSession,
};
use std::{
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Arc, Mutex, MutexGuard,
    },
    time::{Duration, Instant},
};

struct Registered {
    info: AppInfo,
    visible_after: Duration,
}

#[derive(Default)]
struct Counters {
    sessions_opened: AtomicUsize,
    sessions_closed: AtomicUsize,
    handles_released: AtomicUsize,
}

struct Inner {
    apps: Mutex<Vec<Registered>>,
    started: Instant,
    fail_connect: AtomicBool,
    fail_close: Arc<AtomicBool>,
    counters: Arc<Counters>,
}

/// Registry kept in process memory.
///
/// Apps can be scheduled to become visible some time after the adapter is
/// created, which reproduces the launch race without spawning anything.
/// Clones share state, so a test can mutate the registry while a resolver
/// polls it from another thread.
#[derive(Clone)]
pub struct InMemoryAdapter {
    inner: Arc<Inner>,
}

impl InMemoryAdapter {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                apps: Mutex::new(Vec::new()),
                started: Instant::now(),
                fail_connect: AtomicBool::new(false),
                fail_close: Arc::new(AtomicBool::new(false)),
                counters: Arc::new(Counters::default()),
            }),
        }
    }

    pub fn with_app(self, name: &str) -> Self {
        self.add_app(AppInfo::named(name));
        self
    }

    pub fn with_delayed_app(self, name: &str, delay_ms: u64) -> Self {
        self.register(AppInfo::named(name), Duration::from_millis(delay_ms));
        self
    }

    pub fn add_app(&self, info: AppInfo) {
        self.register(info, Duration::ZERO);
    }

    pub fn set_connection_failure(&self, fail: bool) {
        self.inner.fail_connect.store(fail, Ordering::SeqCst);
    }

    /// Makes every session report an error when it is closed. Handles are
    /// still given back.
    pub fn set_close_failure(&self, fail: bool) {
        self.inner.fail_close.store(fail, Ordering::SeqCst);
    }

    pub fn sessions_opened(&self) -> usize {
        self.inner.counters.sessions_opened.load(Ordering::SeqCst)
    }

    pub fn sessions_closed(&self) -> usize {
        self.inner.counters.sessions_closed.load(Ordering::SeqCst)
    }

    pub fn handles_released(&self) -> usize {
        self.inner.counters.handles_released.load(Ordering::SeqCst)
    }

    fn register(&self, info: AppInfo, visible_after: Duration) {
        self.apps().push(Registered { info, visible_after });
    }

    fn apps(&self) -> MutexGuard<'_, Vec<Registered>> {
        self.inner.apps.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for InMemoryAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformAdapter for InMemoryAdapter {
    fn open_session(&self) -> Result<Box<dyn AppSession>, AdapterError> {
        if self.inner.fail_connect.load(Ordering::SeqCst) {
            return Err(AdapterError::connection("In-memory registry is unavailable")
                .with_suggestion("Clear the injected connection failure"));
        }

        let now = self.inner.started.elapsed();
        let handles = self
            .apps()
            .iter()
            .filter(|a| now >= a.visible_after)
            .map(|a| {
                let counters = self.inner.counters.clone();
                AppHandle::with_release(a.info.clone(), move |_| {
                    counters.handles_released.fetch_add(1, Ordering::SeqCst);
                })
            })
            .collect();

        self.inner.counters.sessions_opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(InMemorySession {
            snapshot: SnapshotSession::from_handles(handles),
            counters: self.inner.counters.clone(),
            fail_close: self.inner.fail_close.clone(),
            closed: false,
        }))
    }
}

struct InMemorySession {
    snapshot: SnapshotSession,
    counters: Arc<Counters>,
    fail_close: Arc<AtomicBool>,
    closed: bool,
}

impl AppSession for InMemorySession {
    fn count(&self) -> usize {
        self.snapshot.count()
    }

    fn next_entry(&mut self) -> Option<AppHandle> {
        if self.closed {
            return None;
        }
        self.snapshot.next_entry()
    }

    fn close(&mut self) -> Result<(), AdapterError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.snapshot.close()?;
        self.counters.sessions_closed.fetch_add(1, Ordering::SeqCst);
        if self.fail_close.load(Ordering::SeqCst) {
            return Err(AdapterError::connection("In-memory registry dropped the session"));
        }
        Ok(())
    }
}

impl Drop for InMemorySession {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            tracing::warn!("Failed to close in-memory session in Drop: {e}");
        }
    }
}
