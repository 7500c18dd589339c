//! Log directory watch. A `combat_*.txt` appearing next to the tailed one means
//! the game rotated its log.

use notify::{Event, EventKind, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{Instant, sleep};

use super::log_files::is_combat_log;
use super::{DirectoryIndex, WatcherError};

/// How long a freshly created log may stay empty before it is reported anyway
const CONTENT_WAIT: Duration = Duration::from_secs(60);
const CONTENT_POLL: Duration = Duration::from_millis(500);

#[derive(Debug)]
pub enum DirectoryEvent {
    /// A new log appeared and has content
    NewFile(PathBuf),
    FileRemoved(PathBuf),
    Error(String),
}

/// What the notify thread forwards, already narrowed to combat logs.
enum Change {
    Created(PathBuf),
    Removed(PathBuf),
    Failed(String),
}

pub struct DirectoryWatcher {
    dir: PathBuf,
    changes: mpsc::Receiver<Change>,
    // dropping the watcher stops the notify thread
    _watcher: notify::RecommendedWatcher,
}

impl DirectoryWatcher {
    pub fn new(dir: &Path) -> Result<Self, WatcherError> {
        let watch_err = |source| WatcherError::Watch {
            path: dir.to_path_buf(),
            source,
        };
        let (tx, changes) = mpsc::channel(100);
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            for change in classify(res) {
                if tx.blocking_send(change).is_err() {
                    break;
                }
            }
        })
        .map_err(watch_err)?;
        watcher
            .watch(dir, RecursiveMode::NonRecursive)
            .map_err(watch_err)?;

        Ok(Self {
            dir: dir.to_path_buf(),
            changes,
            _watcher: watcher,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Next relevant change. A new file is held back until the game has
    /// written to it.
    pub async fn next_event(&mut self) -> Option<DirectoryEvent> {
        let event = match self.changes.recv().await? {
            Change::Created(path) => wait_for_content(path).await,
            Change::Removed(path) => DirectoryEvent::FileRemoved(path),
            Change::Failed(reason) => DirectoryEvent::Error(reason),
        };
        Some(event)
    }
}

fn classify(res: notify::Result<Event>) -> Vec<Change> {
    let event = match res {
        Ok(event) => event,
        Err(e) => return vec![Change::Failed(e.to_string())],
    };
    let logs = event.paths.into_iter().filter(|p| is_combat_log(p));
    match event.kind {
        EventKind::Create(_) => logs.map(Change::Created).collect(),
        EventKind::Remove(_) => logs.map(Change::Removed).collect(),
        _ => Vec::new(),
    }
}

async fn wait_for_content(path: PathBuf) -> DirectoryEvent {
    let deadline = Instant::now() + CONTENT_WAIT;
    loop {
        let len = tokio::fs::metadata(&path).await.map(|m| m.len()).unwrap_or(0);
        if len > 0 {
            tracing::info!(path = %path.display(), "new combat log");
            return DirectoryEvent::NewFile(path);
        }
        if Instant::now() >= deadline {
            return DirectoryEvent::Error(format!(
                "{} stayed empty for {}s",
                path.display(),
                CONTENT_WAIT.as_secs()
            ));
        }
        sleep(CONTENT_POLL).await;
    }
}

/// Index `dir` and return it together with the newest log.
pub fn index_directory(dir: &Path) -> Result<(DirectoryIndex, PathBuf), WatcherError> {
    let index = DirectoryIndex::build_index(dir).map_err(|source| WatcherError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;
    let newest = index
        .newest_file()
        .map(|f| f.path.clone())
        .ok_or_else(|| WatcherError::NoLogFiles {
            path: dir.to_path_buf(),
        })?;
    Ok((index, newest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_combat_logs_are_forwarded() {
        let event = Event::new(EventKind::Create(notify::event::CreateKind::File))
            .add_path(PathBuf::from("/logs/combat_2024-01-01_20_00_00_000000.txt"))
            .add_path(PathBuf::from("/logs/chat_2024.txt"));
        let changes = classify(Ok(event));
        assert_eq!(changes.len(), 1);
        assert!(matches!(&changes[0], Change::Created(p) if p.ends_with("combat_2024-01-01_20_00_00_000000.txt")));

        let modified = Event::new(EventKind::Modify(notify::event::ModifyKind::Any))
            .add_path(PathBuf::from("/logs/combat_2024-01-01_20_00_00_000000.txt"));
        assert!(classify(Ok(modified)).is_empty());
    }

    #[test]
    fn empty_directory_has_no_newest_log() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            index_directory(dir.path()),
            Err(WatcherError::NoLogFiles { .. })
        ));
    }

    #[tokio::test]
    async fn written_file_is_reported_as_new() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("combat_2024-01-01_20_00_00_000000.txt");
        std::fs::write(&path, "[20:00:00.000] ...\r\n").unwrap();
        assert!(matches!(wait_for_content(path.clone()).await, DirectoryEvent::NewFile(p) if p == path));
    }
}
