//! Index of the `combat_*.txt` files in the log directory.
//!
//! The game names each log after the moment it was opened, so the file name
//! alone orders the index and anchors the session date of every line.

use chrono::{NaiveDate, NaiveDateTime};
use encoding_rs::WINDOWS_1252;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::combat_log::{EffectType, LogParser};
use crate::context::{EntityRegistry, StringPool};

const FILE_PREFIX: &str = "combat_";
const STAMP_FORMAT: &str = "%Y-%m-%d_%H_%M_%S_%f";

/// The owner announces a discipline within the first handful of lines
const OWNER_SCAN_LINES: usize = 25;
const OWNER_SCAN_BYTES: u64 = 32 * 1024;

pub struct LogFile {
    pub path: PathBuf,
    pub started_at: NaiveDateTime,
    /// Character whose client wrote the log, if it could be read from the header
    pub owner: Option<String>,
    /// 1-based count of this owner's logs on the same day
    pub session: u32,
    pub size: u64,
}

impl LogFile {
    fn read(path: &Path) -> Option<Self> {
        let started_at = session_start_from_path(path)?;
        let size = fs::metadata(path).ok()?.len();
        let owner = if size == 0 {
            None
        } else {
            match read_owner(path, started_at) {
                Ok(owner) => owner,
                Err(e) => {
                    tracing::debug!(path = %path.display(), error = %e, "could not read log owner");
                    None
                }
            }
        };
        Some(Self {
            path: path.to_path_buf(),
            started_at,
            owner,
            session: 1,
            size,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn date(&self) -> NaiveDate {
        self.started_at.date()
    }

    pub fn label(&self) -> String {
        format!(
            "{} Session {}",
            self.owner.as_deref().unwrap_or("Unknown"),
            self.session
        )
    }

    pub fn started_label(&self) -> String {
        self.started_at.format("%Y-%m-%d %-H:%M").to_string()
    }
}

/// Log files ordered by start time, oldest first.
#[derive(Default)]
pub struct DirectoryIndex {
    files: Vec<LogFile>,
}

impl DirectoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index every log in `dir`. A missing directory yields an empty index.
    pub fn build_index(dir: &Path) -> io::Result<Self> {
        let mut index = Self::new();
        if !dir.exists() {
            return Ok(index);
        }
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if is_combat_log(&path)
                && let Some(file) = LogFile::read(&path)
            {
                index.files.push(file);
            }
        }
        index.reorder();
        Ok(index)
    }

    /// Add or refresh `path`. Returns false when it is not a readable log.
    pub fn add_file(&mut self, path: &Path) -> bool {
        if !is_combat_log(path) {
            return false;
        }
        let Some(file) = LogFile::read(path) else {
            return false;
        };
        self.files.retain(|f| f.path != path);
        self.files.push(file);
        self.reorder();
        true
    }

    pub fn remove_file(&mut self, path: &Path) {
        self.files.retain(|f| f.path != path);
        self.reorder();
    }

    fn reorder(&mut self) {
        self.files.sort_by(|a, b| a.started_at.cmp(&b.started_at).then_with(|| a.path.cmp(&b.path)));
        let mut seen: Vec<(Option<&str>, NaiveDate, u32)> = Vec::new();
        let mut numbers = Vec::with_capacity(self.files.len());
        for file in &self.files {
            let key = (file.owner.as_deref(), file.date());
            let number = match seen.iter_mut().find(|(o, d, _)| (*o, *d) == key) {
                Some((_, _, n)) => {
                    *n += 1;
                    *n
                }
                None => {
                    seen.push((key.0, key.1, 1));
                    1
                }
            };
            numbers.push(number);
        }
        for (file, number) in self.files.iter_mut().zip(numbers) {
            file.session = number;
        }
    }

    /// Newest first.
    pub fn entries(&self) -> impl Iterator<Item = &LogFile> {
        self.files.iter().rev()
    }

    pub fn newest_file(&self) -> Option<&LogFile> {
        self.files.last()
    }

    /// Newest log started after `current`, used to detect rotation.
    pub fn newer_than(&self, current: &Path) -> Option<&LogFile> {
        let started = self.files.iter().find(|f| f.path == current)?.started_at;
        self.files.last().filter(|f| f.started_at > started)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

pub fn is_combat_log(path: &Path) -> bool {
    path.file_name()
        .and_then(|f| f.to_str())
        .is_some_and(|f| f.starts_with(FILE_PREFIX) && f.ends_with(".txt"))
}

/// Start time encoded in a log file name such as
/// `combat_2024-01-01_20_15_30_123456.txt`.
pub fn log_file_timestamp(filename: &str) -> Option<NaiveDateTime> {
    let rest = filename.strip_prefix(FILE_PREFIX)?;
    let stamp = rest.strip_suffix(".txt").unwrap_or(rest);
    NaiveDateTime::parse_from_str(stamp, STAMP_FORMAT).ok()
}

/// Session start encoded in a log file's name.
pub fn session_start_from_path(path: &Path) -> Option<NaiveDateTime> {
    log_file_timestamp(path.file_name()?.to_str()?)
}

/// Name of the character that changed discipline first in the log header.
fn read_owner(path: &Path, started_at: NaiveDateTime) -> io::Result<Option<String>> {
    let mut head = Vec::new();
    fs::File::open(path)?
        .take(OWNER_SCAN_BYTES)
        .read_to_end(&mut head)?;
    let (text, _, _) = WINDOWS_1252.decode(&head);

    let parser = LogParser::new(
        started_at,
        Arc::new(EntityRegistry::new()),
        Arc::new(StringPool::new()),
    );
    let owner = text
        .lines()
        .take(OWNER_SCAN_LINES)
        .zip(1u64..)
        .filter_map(|(line, n)| parser.parse_line(n, line, None).ok())
        .find(|e| e.effect.kind == EffectType::DisciplineChanged && e.source.is_character())
        .map(|e| e.source.name.to_string());
    Ok(owner)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DISCIPLINE_LINE: &str = "[20:00:00.000] [@Galen#690129185314118|(0.00,0.00,0.00,0.00)|(400000/400000)] [] [] [DisciplineChanged {836045448953665}: Sorcerer {16140905232405801950}/Corruption {2031339142381587}]\r\n";

    fn write_log(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn file_name_carries_the_start_time() {
        let started = log_file_timestamp("combat_2024-01-01_20_15_30_123456.txt").unwrap();
        assert_eq!(started.date().to_string(), "2024-01-01");
        assert_eq!(started.format("%H:%M:%S").to_string(), "20:15:30");
        assert!(log_file_timestamp("chat_2024-01-01.txt").is_none());
    }

    #[test]
    fn index_finds_newest_and_owner() {
        let dir = tempfile::tempdir().unwrap();
        let older = write_log(dir.path(), "combat_2024-01-01_20_00_00_000000.txt", DISCIPLINE_LINE);
        let newer = write_log(dir.path(), "combat_2024-01-02_09_30_00_000000.txt", "");
        write_log(dir.path(), "notes.txt", "ignored");

        let index = DirectoryIndex::build_index(dir.path()).unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index.newest_file().unwrap().path, newer);
        assert_eq!(index.newer_than(&older).unwrap().path, newer);
        assert!(index.newer_than(&newer).is_none());

        let entry = index.entries().find(|e| e.path == older).unwrap();
        assert_eq!(entry.owner.as_deref(), Some("Galen"));
        assert_eq!(entry.label(), "Galen Session 1");
        assert!(index.entries().next().unwrap().is_empty());
    }

    #[test]
    fn sessions_count_per_owner_and_day() {
        let dir = tempfile::tempdir().unwrap();
        let later = write_log(dir.path(), "combat_2024-01-01_22_00_00_000000.txt", DISCIPLINE_LINE);
        let mut index = DirectoryIndex::build_index(dir.path()).unwrap();
        assert_eq!(index.newest_file().unwrap().session, 1);

        // an earlier file showing up afterwards shifts the numbering
        let earlier = write_log(dir.path(), "combat_2024-01-01_19_00_00_000000.txt", DISCIPLINE_LINE);
        assert!(index.add_file(&earlier));
        let session_of = |p: &Path| index.entries().find(|e| e.path == p).unwrap().session;
        assert_eq!(session_of(&earlier), 1);
        assert_eq!(session_of(&later), 2);

        index.remove_file(&earlier);
        assert_eq!(index.newest_file().unwrap().session, 1);
    }
}
