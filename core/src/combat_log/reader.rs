use crate::combat_log::parser::ROLLOVER_THRESHOLD;
use crate::combat_log::{CombatEvent, LogCursor, LogOp, LogParser, ParseError, StreamError};
use crate::context::{SessionContext, session_start_from_path};
use chrono::{Days, NaiveDateTime};
use encoding_rs::WINDOWS_1252;
use memchr::memchr_iter;
use memmap2::Mmap;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// One-shot reader for a complete log file.
pub struct Reader {
    path: PathBuf,
}

impl Reader {
    pub fn from(file_path: PathBuf) -> Self {
        Reader { path: file_path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Session date carried by the file name.
    pub fn session_date(&self) -> Result<NaiveDateTime, StreamError> {
        session_start_from_path(&self.path).ok_or_else(|| StreamError::SessionDate {
            path: self.path.clone(),
        })
    }

    /// Parse every line of the file. Returns the events in log order and the
    /// cursor a live tail would resume from.
    pub fn read_log_file(
        &self,
        parser: &LogParser,
    ) -> Result<(Vec<Arc<CombatEvent>>, LogCursor), StreamError> {
        let file = fs::File::open(&self.path).map_err(StreamError::io(LogOp::Open, &self.path))?;
        // SAFETY: the game only appends to the log; the map is read-only and
        // dropped before this function returns.
        let mmap = unsafe { Mmap::map(&file) }.map_err(StreamError::io(LogOp::Map, &self.path))?;
        let bytes = mmap.as_ref();

        // Only complete lines are consumed; a trailing partial line is left for the tail.
        let mut line_ranges: Vec<(usize, usize)> = Vec::new();
        let mut start = 0;
        for end in memchr_iter(b'\n', bytes) {
            let trimmed = if end > start && bytes[end - 1] == b'\r' { end - 1 } else { end };
            if trimmed > start {
                line_ranges.push((start, trimmed));
            }
            start = end + 1;
        }
        let results: Vec<Result<CombatEvent, ParseError>> = line_ranges
            .par_iter()
            .enumerate()
            .map(|(idx, &(start, end))| {
                let (line, _, _) = WINDOWS_1252.decode(&bytes[start..end]);
                parser.parse_line(idx as u64 + 1, &line, None).map(|mut event| {
                    event.byte_len = end - start;
                    event
                })
            })
            .collect();

        // a last line the game is still writing is left for the tail to retry
        let consumed = match results.last() {
            Some(Err(ParseError::IncompleteLine { line_number })) => {
                tracing::debug!(line = line_number, "leaving incomplete last line to the tail");
                results.len() - 1
            }
            _ => results.len(),
        };
        let end_pos = line_ranges.get(consumed).map_or(start, |&(s, _)| s) as u64;

        let mut parsed: Vec<CombatEvent> = results
            .into_iter()
            .take(consumed)
            .filter_map(|result| match result {
                Ok(event) => Some(event),
                Err(e) => {
                    tracing::warn!(error = %e, "skipping unparseable line");
                    None
                }
            })
            .collect();

        fix_rollover(parser.session_date(), parsed.iter_mut());
        let events: Vec<Arc<CombatEvent>> = parsed.into_iter().map(Arc::new).collect();

        let cursor = LogCursor {
            offset: end_pos,
            next_line: consumed as u64 + 1,
            last_timestamp: events.last().map(|e| e.timestamp),
        };
        Ok((events, cursor))
    }

    /// Read the file into `session`: sets the log date, parses, and feeds every
    /// event through the session in order.
    pub fn load_into(
        &self,
        session: &mut SessionContext,
    ) -> Result<(Vec<Arc<CombatEvent>>, LogCursor), StreamError> {
        session.set_log_date(self.session_date()?);
        let parser = session.parser();
        let (events, cursor) = self.read_log_file(&parser)?;
        for event in &events {
            session.observe(event);
        }
        tracing::info!(
            path = %self.path.display(),
            events = events.len(),
            bytes = cursor.offset,
            "parsed log file"
        );
        Ok((events, cursor))
    }
}

// Lines were parsed independently, so each only knows the session date.
// Re-anchor every time on the previous line, as a sequential parse would.
fn fix_rollover<'a>(session_date: NaiveDateTime, events: impl Iterator<Item = &'a mut CombatEvent>) {
    let mut previous = session_date;
    for event in events {
        let mut ts = previous.date().and_time(event.timestamp.time());
        if previous - ts > ROLLOVER_THRESHOLD {
            ts = ts.checked_add_days(Days::new(1)).unwrap_or(ts);
        }
        event.timestamp = ts;
        previous = ts;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;
    use std::io::Write;

    fn write_log(dir: &Path, lines: &[String], tail: &str) -> PathBuf {
        let path = dir.join("combat_2024-01-01_20_00_00_000000.txt");
        let mut file = fs::File::create(&path).unwrap();
        for l in lines {
            write!(file, "{l}\r\n").unwrap();
        }
        file.write_all(tail.as_bytes()).unwrap();
        path
    }

    #[test]
    fn reads_complete_lines_and_stops_before_partial_tail() {
        let dir = tempfile::tempdir().unwrap();
        let me = player("Galen", 100);
        let lines = vec![
            line("20:00:00.000", &me, "", "", &discipline("Sorcerer", "Corruption", 2031339142381587), ""),
            line("20:00:01.000", &me, &me, &ability("Resurgence", 1), HEAL, "(1200)"),
        ];
        let path = write_log(dir.path(), &lines, "[20:00:02.000] [@Galen");

        let mut session = SessionContext::default();
        let (events, cursor) = Reader::from(path).load_into(&mut session).unwrap();

        assert_eq!(events.len(), 2);
        assert_eq!(events[1].line_number, 2);
        assert_eq!(events[1].byte_len, lines[1].len());
        let expected_end: usize = lines.iter().map(|l| l.len() + 2).sum();
        assert_eq!(cursor.offset, expected_end as u64);
        assert_eq!(cursor.next_line, 3);
        assert_eq!(cursor.last_timestamp, Some(ts("20:00:01.000")));
        assert_eq!(session.local_player().map(|p| p.log_id), Some(100));
    }

    #[test]
    fn incomplete_last_line_is_left_for_the_tail() {
        let dir = tempfile::tempdir().unwrap();
        let me = player("Galen", 100);
        let first = line("20:00:00.000", &me, &me, "", HEAL, "(5)");
        // newline-terminated but cut short by the game
        let cut = "[20:00:01.000] [@Galen#100|(0,0,0,0)|(1/1)] [";
        let path = write_log(dir.path(), &[first.clone(), cut.to_string()], "");

        let mut session = SessionContext::default();
        let (events, cursor) = Reader::from(path).load_into(&mut session).unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(cursor.offset, first.len() as u64 + 2);
        assert_eq!(cursor.next_line, 2);
    }

    #[test]
    fn carries_midnight_rollover_across_parallel_parse() {
        let dir = tempfile::tempdir().unwrap();
        let me = player("Galen", 100);
        let lines = vec![
            line("23:59:59.000", &me, &me, "", HEAL, "(1)"),
            line("00:00:01.000", &me, &me, "", HEAL, "(1)"),
            line("12:30:00.000", &me, &me, "", HEAL, "(1)"),
            line("00:00:02.000", &me, &me, "", HEAL, "(1)"),
        ];
        let path = write_log(dir.path(), &lines, "");
        let mut session = SessionContext::default();
        let (events, _) = Reader::from(path).load_into(&mut session).unwrap();

        let days: Vec<_> = events.iter().map(|e| e.timestamp.date().to_string()).collect();
        assert_eq!(days, ["2024-01-01", "2024-01-02", "2024-01-02", "2024-01-03"]);
        assert!(events.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    }

    #[test]
    fn file_without_session_date_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("not_a_log.txt");
        fs::write(&path, "").unwrap();
        let mut session = SessionContext::default();
        assert!(matches!(
            Reader::from(path).load_into(&mut session),
            Err(StreamError::SessionDate { .. })
        ));
    }
}
