use crate::{
    adapter::{AppHandle, AppSession},
    error::AdapterError,
    node::AppInfo,
};

/// Session over a list captured in one go, for registries that can only
/// report everything at once (command output, test fixtures).
pub struct SnapshotSession {
    entries: std::vec::IntoIter<AppHandle>,
    count: usize,
}

impl SnapshotSession {
    pub fn from_handles(handles: Vec<AppHandle>) -> Self {
        let count = handles.len();
        Self { entries: handles.into_iter(), count }
    }

    pub fn from_infos(infos: Vec<AppInfo>) -> Self {
        Self::from_handles(infos.into_iter().map(AppHandle::new).collect())
    }
}

impl AppSession for SnapshotSession {
    fn count(&self) -> usize {
        self.count
    }

    fn next_entry(&mut self) -> Option<AppHandle> {
        self.entries.next()
    }

    fn close(&mut self) -> Result<(), AdapterError> {
        // Releases handles that were never handed out.
        self.entries = Vec::new().into_iter();
        Ok(())
    }
}

/// Parses `name|pid` lines as printed by the platform listing scripts.
pub fn parse_name_pid_lines(text: &str) -> Vec<AppInfo> {
    text.lines()
        .filter(|l| !l.trim().is_empty())
        .filter_map(|line| {
            let (name, pid) = line.rsplit_once('|')?;
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            let pid: i32 = pid.trim().parse().ok()?;
            Some(AppInfo::named(name).with_pid(pid))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_is_fixed_at_creation() {
        let mut s = SnapshotSession::from_infos(vec![AppInfo::named("a"), AppInfo::named("b")]);
        assert_eq!(s.count(), 2);
        assert_eq!(s.next_entry().unwrap().name(), "a");
        assert_eq!(s.count(), 2);
        assert_eq!(s.next_entry().unwrap().name(), "b");
        assert!(s.next_entry().is_none());
        assert!(s.next_entry().is_none());
    }

    #[test]
    fn close_is_idempotent_and_ends_sequence() {
        let mut s = SnapshotSession::from_infos(vec![AppInfo::named("a")]);
        s.close().unwrap();
        s.close().unwrap();
        assert!(s.next_entry().is_none());
        assert_eq!(s.count(), 1);
    }

    #[test]
    fn parses_name_pid_lines() {
        let apps = parse_name_pid_lines("Finder|312\n\nTerminal | 401\nbroken\n|7\nA|B|9\n");
        assert_eq!(apps.len(), 3);
        assert_eq!(apps[0], AppInfo::named("Finder").with_pid(312));
        assert_eq!(apps[1], AppInfo::named("Terminal").with_pid(401));
        assert_eq!(apps[2], AppInfo::named("A|B").with_pid(9));
    }
}
