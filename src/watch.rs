use std::path::Path;
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

use anyhow::{Context, Result};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

/// Creates a watcher for the database file and returns a receiver for change events.
/// The watcher must be kept alive for events to be received.
///
/// SQLite writes through `-wal` and `-shm` files next to the database, so the
/// parent directory is watched and events are filtered with [`is_db_event`].
pub fn watch_db(db_path: &Path) -> Result<(RecommendedWatcher, Receiver<()>)> {
    let (tx, rx) = mpsc::channel();

    let db_filename = db_path
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
        if let Ok(event) = res {
            if is_db_event(&event, &db_filename) {
                let _ = tx.send(());
            }
        }
    })
    .context("failed to create file watcher")?;

    let dir = watch_dir(db_path);
    watcher
        .watch(dir, RecursiveMode::NonRecursive)
        .with_context(|| format!("failed to watch {}", dir.display()))?;

    Ok((watcher, rx))
}

/// True for a change to the database file or one of its `-wal`/`-shm`/
/// `-journal` siblings. Access events are ignored: the page's own reads
/// fire them, and reacting would loop.
pub fn is_db_event(event: &Event, db_filename: &str) -> bool {
    if db_filename.is_empty() || matches!(event.kind, EventKind::Access(_)) {
        return false;
    }
    event.paths.iter().any(|p| {
        p.file_name()
            .is_some_and(|f| f.to_string_lossy().starts_with(db_filename))
    })
}

/// Directory holding the database; a bare file name lives in `.`.
pub fn watch_dir(db_path: &Path) -> &Path {
    match db_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    }
}

/// Waits for a database change event with timeout.
/// Returns true if an event was received, false on timeout.
pub fn wait_for_change(rx: &Receiver<()>, timeout: Duration) -> bool {
    rx.recv_timeout(timeout).is_ok()
}

/// Drains any pending events from the receiver.
pub fn drain_events(rx: &Receiver<()>) {
    while rx.try_recv().is_ok() {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{AccessKind, CreateKind, DataChange, ModifyKind, RemoveKind};

    fn event(kind: EventKind, path: &str) -> Event {
        Event::new(kind).add_path(path.into())
    }

    #[test]
    fn db_and_sidecar_writes_count() {
        let write = EventKind::Modify(ModifyKind::Data(DataChange::Any));
        assert!(is_db_event(&event(write, "/data/tasks.db"), "tasks.db"));
        assert!(is_db_event(&event(write, "/data/tasks.db-wal"), "tasks.db"));
        assert!(is_db_event(
            &event(EventKind::Create(CreateKind::File), "/data/tasks.db-shm"),
            "tasks.db"
        ));
        assert!(is_db_event(
            &event(EventKind::Remove(RemoveKind::File), "/data/tasks.db-journal"),
            "tasks.db"
        ));
    }

    #[test]
    fn other_files_are_ignored() {
        let write = EventKind::Modify(ModifyKind::Any);
        assert!(!is_db_event(&event(write, "/data/streak.json"), "tasks.db"));
        assert!(!is_db_event(&event(write, "/data/taskday.log"), "tasks.db"));
        assert!(!is_db_event(&Event::new(write), "tasks.db"));
        assert!(!is_db_event(&event(write, "/data/tasks.db"), ""));
    }

    #[test]
    fn access_events_are_ignored() {
        let read = EventKind::Access(AccessKind::Any);
        assert!(!is_db_event(&event(read, "/data/tasks.db"), "tasks.db"));
        assert!(!is_db_event(&event(read, "/data/tasks.db-wal"), "tasks.db"));
    }

    #[test]
    fn watch_dir_falls_back_to_cwd() {
        assert_eq!(watch_dir(Path::new("/a/b/tasks.db")), Path::new("/a/b"));
        assert_eq!(watch_dir(Path::new("tasks.db")), Path::new("."));
        assert_eq!(watch_dir(Path::new("sub/tasks.db")), Path::new("sub"));
    }
}
