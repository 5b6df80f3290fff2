use crate::{
    adapter::{AppHandle, AppSession, PlatformAdapter},
    error::AdapterError,
};
use rustc_hash::FxHashSet;

/// Forward-only cursor over the applications visible in one registry
/// session.
///
/// Names come out in whatever order the registry reports them, each at most
/// once per pass. `count` is the registry size when the session opened, so
/// it can disagree with the number of names produced when the registry lists
/// the same name twice. Once exhausted the enumerator stays exhausted; open a
/// new one for a fresh snapshot.
pub struct ApplicationEnumerator {
    session: Option<Box<dyn AppSession>>,
    count: usize,
    seen: FxHashSet<String>,
}

impl ApplicationEnumerator {
    pub fn open(adapter: &dyn PlatformAdapter) -> Result<Self, AdapterError> {
        let session = adapter.open_session()?;
        let count = session.count();
        tracing::debug!("enumerator: session opened with {count} entries");
        Ok(Self { session: Some(session), count, seen: FxHashSet::default() })
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Advances the cursor. `None` marks the end and keeps coming back on
    /// every later call.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<String> {
        self.next_entry().map(|(name, _handle)| name)
    }

    /// Advances the cursor and hands over the application's handle.
    pub fn next_entry(&mut self) -> Option<(String, AppHandle)> {
        loop {
            let session = self.session.as_mut()?;
            match session.next_entry() {
                Some(handle) => {
                    if self.seen.insert(handle.name().to_string()) {
                        return Some((handle.name().to_string(), handle));
                    }
                    tracing::debug!("enumerator: skipping repeated name {:?}", handle.name());
                }
                None => {
                    self.closedown();
                    return None;
                }
            }
        }
    }

    /// Remaining names of this pass. Borrows the cursor, so `count` stays
    /// available afterwards.
    pub fn names(&mut self) -> impl Iterator<Item = String> + '_ {
        std::iter::from_fn(move || self.next())
    }

    pub fn closedown(&mut self) {
        if let Some(mut session) = self.session.take() {
            if let Err(e) = session.close() {
                tracing::warn!("enumerator: failed to close registry session: {e}");
            }
            tracing::debug!("enumerator: session closed after {} names", self.seen.len());
        }
    }
}

impl Drop for ApplicationEnumerator {
    fn drop(&mut self) {
        self.closedown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ErrorCode, in_memory::InMemoryAdapter};
    use std::collections::HashSet;

    fn registry() -> InMemoryAdapter {
        InMemoryAdapter::new()
            .with_app("nautilus")
            .with_app("gedit")
            .with_app("Terminal")
    }

    #[test]
    fn next_yields_count_distinct_names_then_ends() {
        let adapter = registry();
        let mut apps = ApplicationEnumerator::open(&adapter).unwrap();
        let count = apps.count();
        assert_eq!(count, 3);

        let mut names = HashSet::new();
        for _ in 0..count {
            names.insert(apps.next().unwrap());
        }
        assert_eq!(names.len(), count);
        assert!(names.contains("nautilus"));
        assert!(names.contains("gedit"));
        assert!(names.contains("Terminal"));

        assert!(apps.next().is_none());
        assert!(apps.next().is_none());
        assert!(apps.next_entry().is_none());
        assert_eq!(apps.count(), 3);
    }

    #[test]
    fn count_leaves_the_cursor_untouched() {
        let adapter = InMemoryAdapter::new()
            .with_app("gedit")
            .with_app("gedit")
            .with_app("nautilus");
        let mut apps = ApplicationEnumerator::open(&adapter).unwrap();
        assert_eq!(apps.count(), 3);
        assert_eq!(apps.count(), 3);
        assert_eq!(adapter.sessions_closed(), 0);
        assert_eq!(adapter.handles_released(), 0);

        let first = apps.next();
        assert!(matches!(first.as_deref(), Some("gedit") | Some("nautilus")));
        assert_eq!(apps.count(), 3);
    }

    #[test]
    fn exhaustion_closes_the_session() {
        let adapter = registry();
        let mut apps = ApplicationEnumerator::open(&adapter).unwrap();
        while apps.next().is_some() {}
        assert_eq!(adapter.sessions_closed(), 1);
        apps.closedown();
        drop(apps);
        assert_eq!(adapter.sessions_closed(), 1);
    }

    #[test]
    fn closedown_is_idempotent_before_consumption() {
        let adapter = registry();
        let mut apps = ApplicationEnumerator::open(&adapter).unwrap();
        assert!(apps.next().is_some());
        apps.closedown();
        apps.closedown();
        assert!(apps.next().is_none());
        assert_eq!(adapter.sessions_opened(), 1);
        assert_eq!(adapter.sessions_closed(), 1);
    }

    #[test]
    fn closedown_swallows_session_close_errors() {
        let adapter = registry();
        adapter.set_close_failure(true);
        let mut apps = ApplicationEnumerator::open(&adapter).unwrap();
        assert!(apps.next().is_some());
        apps.closedown();
        apps.closedown();
        assert_eq!(adapter.sessions_closed(), 1);
        assert_eq!(adapter.handles_released(), 3);
    }

    #[test]
    fn repeated_names_are_produced_once() {
        let adapter = InMemoryAdapter::new()
            .with_app("gedit")
            .with_app("gedit")
            .with_app("nautilus");
        let mut apps = ApplicationEnumerator::open(&adapter).unwrap();
        let names: Vec<String> = apps.names().collect();
        assert_eq!(names.len(), 2);
        assert_eq!(names.iter().filter(|n| n.as_str() == "gedit").count(), 1);
        assert_eq!(apps.count(), 3);
    }

    #[test]
    fn next_entry_pairs_name_with_handle() {
        let adapter = registry();
        let mut apps = ApplicationEnumerator::open(&adapter).unwrap();
        let (name, handle) = apps.next_entry().unwrap();
        assert_eq!(name, handle.name());
    }

    #[test]
    fn handles_not_taken_are_released() {
        let adapter = registry();
        let mut apps = ApplicationEnumerator::open(&adapter).unwrap();
        let (_, kept) = apps.next_entry().unwrap();
        drop(apps);
        assert_eq!(adapter.handles_released(), 2);
        kept.release();
        assert_eq!(adapter.handles_released(), 3);
    }

    #[test]
    fn connection_failure_fails_fast() {
        let adapter = registry();
        adapter.set_connection_failure(true);
        let err = ApplicationEnumerator::open(&adapter).err().unwrap();
        assert_eq!(err.code, ErrorCode::ConnectionFailed);
    }

    #[test]
    fn empty_registry_ends_immediately() {
        let adapter = InMemoryAdapter::new();
        let mut apps = ApplicationEnumerator::open(&adapter).unwrap();
        assert_eq!(apps.count(), 0);
        assert!(apps.next().is_none());
    }
}
