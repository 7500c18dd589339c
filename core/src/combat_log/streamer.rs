//! Live tail of the active log file.
//!
//! Polls for appended bytes, parses complete lines, runs them through the
//! combat boundary detector and publishes `MonitorEvent`s. The cursor only ever
//! moves past lines that were consumed, so a line the game is still writing is
//! retried verbatim on the next poll.

use chrono::{NaiveDateTime, TimeDelta};
use encoding_rs::WINDOWS_1252;
use memchr::memchr_iter;
use std::io::SeekFrom;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use tokio::sync::{RwLock, mpsc, watch};

use crate::combat_log::{CombatEvent, LogOp, LogParser, ParseError, StreamError};
use crate::context::{EngineConfig, SessionContext, session_start_from_path};
use crate::signal_processor::{
    CombatMessage, CombatState, CombatStateMachine, MonitorEvent, Placement, Transition,
    resume_after,
};

/// Where the next poll resumes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogCursor {
    pub offset: u64,
    /// Number the next consumed line will get
    pub next_line: u64,
    pub last_timestamp: Option<NaiveDateTime>,
}

impl LogCursor {
    pub fn start() -> Self {
        Self {
            offset: 0,
            next_line: 1,
            last_timestamp: None,
        }
    }
}

/// One `\n`-terminated line inside a read buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSpan {
    pub start: usize,
    /// End of the content, before any `\r\n`
    pub end: usize,
    /// Start of the following line
    pub next: usize,
}

impl LineSpan {
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Find every complete line in `buf`. A trailing partial line is never included.
pub fn split_complete_lines(buf: &[u8]) -> Vec<LineSpan> {
    let mut spans = Vec::new();
    let mut start = 0;
    for newline in memchr_iter(b'\n', buf) {
        let end = if newline > start && buf[newline - 1] == b'\r' {
            newline - 1
        } else {
            newline
        };
        spans.push(LineSpan {
            start,
            end,
            next: newline + 1,
        });
        start = newline + 1;
    }
    spans
}

pub struct LogStreamer {
    path: PathBuf,
    session: Arc<RwLock<SessionContext>>,
    config: EngineConfig,
    parser: LogParser,
    detector: CombatStateMachine,
    cursor: LogCursor,
    file: Option<File>,
    tx: mpsc::Sender<MonitorEvent>,
    /// every line of the combat in progress
    combat: Vec<Arc<CombatEvent>>,
    /// in-combat lines not yet published
    pending: Vec<Arc<CombatEvent>>,
    pending_start: Option<(NaiveDateTime, String)>,
    offset_ms: Option<i64>,
    outbox: Vec<MonitorEvent>,
}

impl LogStreamer {
    /// Tail `path` from `cursor`. The session must already carry the log date
    /// (see `Reader::load_into`) unless `cursor` is at the start of the file.
    pub async fn new(
        path: PathBuf,
        session: Arc<RwLock<SessionContext>>,
        cursor: LogCursor,
        tx: mpsc::Sender<MonitorEvent>,
    ) -> Result<Self, StreamError> {
        let (config, parser) = {
            let mut ctx = session.write().await;
            if cursor.offset == 0 || ctx.log_date().is_none() {
                ctx.set_log_date(session_date(&path)?);
            }
            (ctx.config().clone(), ctx.parser())
        };
        Ok(Self {
            path,
            detector: CombatStateMachine::from_config(&config),
            config,
            parser,
            session,
            cursor,
            file: None,
            tx,
            combat: Vec::new(),
            pending: Vec::new(),
            pending_start: None,
            offset_ms: None,
            outbox: Vec::new(),
        })
    }

    /// Continue after a historical parse of the same file. A combat still open
    /// at the end of `history` is picked up and published as Start on the next
    /// poll, so the live lines extend it.
    pub async fn resume(mut self, history: &[Arc<CombatEvent>]) -> Self {
        let (detector, open) = resume_after(history, &self.config);
        self.detector = detector;
        let started_at = match self.detector.state() {
            CombatState::InCombat { started_at, .. }
            | CombatState::AwaitingExit { started_at, .. } => started_at,
            CombatState::Idle => return self,
        };
        let location = self
            .session
            .read()
            .await
            .area_at(started_at)
            .map(|a| a.name.to_string())
            .unwrap_or_default();
        tracing::info!(%started_at, events = open.len(), "resuming combat in progress");
        self.combat = open.clone();
        self.pending = open;
        self.pending_start = Some((started_at, location));
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn cursor(&self) -> LogCursor {
        self.cursor
    }

    /// Poll until `stop` flips or the file becomes unreadable. Paths received on
    /// `rotate` switch the stream to that (newer) log.
    pub async fn run(
        mut self,
        mut stop: watch::Receiver<bool>,
        mut rotate: mpsc::Receiver<PathBuf>,
    ) -> Result<(), StreamError> {
        let mut interval = tokio::time::interval(self.config.poll_interval());
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        tracing::info!(path = %self.path.display(), "tailing combat log");

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    if let Err(e) = self.poll().await {
                        tracing::error!(error = %e, path = %self.path.display(), "log polling halted");
                        self.stop().await;
                        return Err(e);
                    }
                }
                _ = stop.changed() => {
                    self.stop().await;
                    return Ok(());
                }
                Some(path) = rotate.recv() => self.switch_to(path).await?,
            }
        }
    }

    /// Read and process whatever was appended since the last poll.
    pub async fn poll(&mut self) -> Result<(), StreamError> {
        if self.is_stale().await? {
            return Ok(());
        }
        let buf = self.read_appended().await?;
        if !buf.is_empty() && self.consume(&buf).await
            && let Some(last) = self.cursor.last_timestamp
        {
            let ms = (last - chrono::Local::now().naive_local()).num_milliseconds();
            self.offset_ms = Some(ms);
            self.session.write().await.set_timing_offset_ms(ms);
            self.outbox.push(MonitorEvent::TimingOffset { ms });
        }

        // log time keeps running while the game writes nothing
        if let Some(ms) = self.offset_ms {
            let now = chrono::Local::now().naive_local() + TimeDelta::milliseconds(ms);
            if let Some(transition) = self.detector.expire(now) {
                self.apply_transition(transition);
            }
        }
        self.flush_batch();
        self.send_outbox().await;
        Ok(())
    }

    /// Flush the combat in progress as a final Stop and release the file.
    pub async fn stop(&mut self) {
        self.flush_batch();
        if self.detector.in_combat() {
            self.detector.reset();
            self.outbox.push(MonitorEvent::Combat(CombatMessage::Stop {
                events: std::mem::take(&mut self.combat),
            }));
        }
        self.send_outbox().await;
        self.file = None;
    }

    async fn switch_to(&mut self, path: PathBuf) -> Result<(), StreamError> {
        if path == self.path || !is_newer(&path, &self.path) {
            return Ok(());
        }
        self.stop().await;
        tracing::info!(from = %self.path.display(), to = %path.display(), "log rotated");

        let date = session_date(&path)?;
        {
            let mut ctx = self.session.write().await;
            ctx.set_log_date(date);
            self.parser = ctx.parser();
        }
        self.path = path;
        self.cursor = LogCursor::start();
        self.offset_ms = None;
        self.outbox.push(MonitorEvent::LogRotated {
            path: self.path.clone(),
        });
        self.send_outbox().await;
        Ok(())
    }

    async fn is_stale(&self) -> Result<bool, StreamError> {
        if self.config.force_log_updates {
            return Ok(false);
        }
        let metadata = tokio::fs::metadata(&self.path)
            .await
            .map_err(StreamError::io(LogOp::Stat, &self.path))?;
        let stale = metadata
            .modified()
            .ok()
            .and_then(|m| m.elapsed().ok())
            .is_some_and(|age| age > self.config.stale_after());
        if stale {
            tracing::debug!(path = %self.path.display(), "log is stale, skipping poll");
        }
        Ok(stale)
    }

    async fn read_appended(&mut self) -> Result<Vec<u8>, StreamError> {
        if self.file.is_none() {
            let file = File::open(&self.path)
                .await
                .map_err(StreamError::io(LogOp::Open, &self.path))?;
            self.file = Some(file);
        }
        let path = self.path.clone();
        let offset = self.cursor.offset;
        let Some(file) = self.file.as_mut() else {
            return Ok(Vec::new());
        };

        file.seek(SeekFrom::Start(offset))
            .await
            .map_err(StreamError::io(LogOp::Seek, &path))?;
        let mut buf = Vec::new();
        file.read_to_end(&mut buf)
            .await
            .map_err(StreamError::io(LogOp::Read, &path))?;
        Ok(buf)
    }

    /// Parse the complete lines in `buf`. Returns whether any line was consumed.
    async fn consume(&mut self, buf: &[u8]) -> bool {
        let spans = split_complete_lines(buf);
        let session = Arc::clone(&self.session);
        let mut ctx = session.write().await;
        let base = self.cursor.offset;
        let mut consumed = false;

        for (idx, span) in spans.iter().enumerate() {
            if span.is_empty() {
                self.cursor.offset = base + span.next as u64;
                continue;
            }
            let (line, _, _) = WINDOWS_1252.decode(&buf[span.start..span.end]);
            let line_number = self.cursor.next_line;
            match self
                .parser
                .parse_line(line_number, &line, self.cursor.last_timestamp)
            {
                Ok(mut event) => {
                    event.byte_len = span.end - span.start;
                    self.cursor.last_timestamp = Some(event.timestamp);
                    let event = Arc::new(event);
                    consumed = true;
                    if let Some(player) = ctx.observe(&event) {
                        self.outbox.push(MonitorEvent::LocalPlayerIdentified(player));
                    }
                    self.route(event, &ctx);
                }
                Err(ParseError::IncompleteLine { .. }) if idx + 1 == spans.len() => {
                    // retried from this byte next poll
                    tracing::debug!(line = line_number, "incomplete line, rolling back");
                    break;
                }
                Err(e) => tracing::warn!(error = %e, "skipping malformed line"),
            }
            self.cursor.next_line += 1;
            self.cursor.offset = base + span.next as u64;
        }
        consumed
    }

    fn route(&mut self, event: Arc<CombatEvent>, ctx: &SessionContext) {
        let observation = self.detector.observe(&event);
        for transition in observation.transitions {
            if let Transition::Started(start_time) = transition {
                let location = ctx
                    .area_at(start_time)
                    .map(|a| a.name.to_string())
                    .unwrap_or_default();
                self.pending_start = Some((start_time, location));
                tracing::info!(line = event.line_number, "combat started");
            } else {
                self.apply_transition(transition);
            }
        }
        if observation.placement == Placement::Inside {
            self.combat.push(Arc::clone(&event));
            self.pending.push(event);
        }
    }

    fn apply_transition(&mut self, transition: Transition) {
        if let Transition::Ended(at) = transition {
            self.flush_batch();
            tracing::info!(ended_at = %at, events = self.combat.len(), "combat ended");
            self.outbox.push(MonitorEvent::Combat(CombatMessage::Stop {
                events: std::mem::take(&mut self.combat),
            }));
        }
    }

    // publish buffered lines as Start (first batch of a combat) or Update
    fn flush_batch(&mut self) {
        if let Some((start_time, location)) = self.pending_start.take() {
            self.outbox.push(MonitorEvent::Combat(CombatMessage::Start {
                start_time,
                events: std::mem::take(&mut self.pending),
                location,
            }));
        } else if !self.pending.is_empty() {
            self.outbox.push(MonitorEvent::Combat(CombatMessage::Update {
                events: std::mem::take(&mut self.pending),
            }));
        }
    }

    async fn send_outbox(&mut self) {
        for event in self.outbox.drain(..) {
            if self.tx.send(event).await.is_err() {
                tracing::debug!("monitor receiver dropped");
                break;
            }
        }
    }
}

fn session_date(path: &Path) -> Result<NaiveDateTime, StreamError> {
    session_start_from_path(path).ok_or_else(|| StreamError::SessionDate {
        path: path.to_path_buf(),
    })
}

fn is_newer(candidate: &Path, current: &Path) -> bool {
    match (session_start_from_path(candidate), session_start_from_path(current)) {
        (Some(a), Some(b)) => a > b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;
    use std::io::Write;

    const LOG_NAME: &str = "combat_2024-01-01_20_00_00_000000.txt";

    fn config() -> EngineConfig {
        EngineConfig {
            force_log_updates: true,
            ..EngineConfig::default()
        }
    }

    async fn streamer(path: PathBuf) -> (LogStreamer, mpsc::Receiver<MonitorEvent>) {
        let session = Arc::new(RwLock::new(SessionContext::new(config())));
        let (tx, rx) = mpsc::channel(64);
        let streamer = LogStreamer::new(path, session, LogCursor::start(), tx)
            .await
            .unwrap();
        (streamer, rx)
    }

    fn append(path: &Path, text: &str) {
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .unwrap();
        file.write_all(text.as_bytes()).unwrap();
    }

    fn drain(rx: &mut mpsc::Receiver<MonitorEvent>) -> Vec<CombatMessage> {
        let mut out = Vec::new();
        while let Ok(event) = rx.try_recv() {
            if let MonitorEvent::Combat(message) = event {
                out.push(message);
            }
        }
        out
    }

    #[test]
    fn split_keeps_partial_tail_out() {
        let spans = split_complete_lines(b"one\r\n\r\ntwo\npart");
        assert_eq!(
            spans,
            vec![
                LineSpan { start: 0, end: 3, next: 5 },
                LineSpan { start: 5, end: 5, next: 7 },
                LineSpan { start: 7, end: 10, next: 11 },
            ]
        );
    }

    #[tokio::test]
    async fn truncated_line_is_retried_from_its_offset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(LOG_NAME);
        let me = player("Galen", 100);
        let first = line("20:00:00.000", &me, &me, "", ENTER_COMBAT, "");
        let second = line("20:00:01.000", &me, &me, &ability("Resurgence", 1), HEAL, "(1200)");

        // the game flushed half of the second line
        let (head, tail) = second.split_at(20);
        append(&path, &format!("{first}\r\n{head}"));

        let (mut streamer, mut rx) = streamer(path.clone()).await;
        streamer.poll().await.unwrap();
        assert_eq!(streamer.cursor().offset, first.len() as u64 + 2);
        assert_eq!(streamer.cursor().next_line, 2);

        append(&path, &format!("{tail}\r\n"));
        streamer.poll().await.unwrap();
        assert_eq!(streamer.cursor().next_line, 3);
        assert_eq!(
            streamer.cursor().offset,
            (first.len() + second.len() + 4) as u64
        );

        let messages = drain(&mut rx);
        let CombatMessage::Start { events, .. } = &messages[0] else {
            panic!("expected start, got {messages:?}");
        };
        assert_eq!(events[0].line_number, 1);
        let CombatMessage::Update { events } = &messages[1] else {
            panic!("expected update, got {messages:?}");
        };
        assert_eq!(events[0].line_number, 2);
        assert_eq!(events[0].value.effective, 1200.0);
    }

    #[tokio::test]
    async fn bracketless_tail_without_newline_waits() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(LOG_NAME);
        let me = player("Galen", 100);
        // a complete but truncated line stays pending while it is the last one
        append(&path, &format!("{}\r\n", "[20:00:00.000] [@Galen#100|(0,0,0,0)|(1/1)] ["));

        let (mut streamer, _rx) = streamer(path.clone()).await;
        streamer.poll().await.unwrap();
        assert_eq!(streamer.cursor().offset, 0);
        assert_eq!(streamer.cursor().next_line, 1);

        // once followed by another line it is skipped but still numbered
        append(&path, &format!("{}\r\n", line("20:00:01.000", &me, &me, "", HEAL, "(5)")));
        streamer.poll().await.unwrap();
        assert_eq!(streamer.cursor().next_line, 3);
    }

    #[tokio::test]
    async fn empty_lines_do_not_consume_numbers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(LOG_NAME);
        let me = player("Galen", 100);
        let a = line("20:00:00.000", &me, &me, "", ENTER_COMBAT, "");
        let b = line("20:00:01.000", &me, &me, "", HEAL, "(5)");
        append(&path, &format!("{a}\r\n\r\n{b}\r\n"));

        let (mut streamer, mut rx) = streamer(path).await;
        streamer.poll().await.unwrap();
        let messages = drain(&mut rx);
        let CombatMessage::Start { events, .. } = &messages[0] else {
            panic!("expected start");
        };
        let numbers: Vec<_> = events.iter().map(|e| e.line_number).collect();
        assert_eq!(numbers, [1, 2]);
    }

    #[tokio::test]
    async fn stop_flushes_the_combat_in_progress() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(LOG_NAME);
        let me = player("Galen", 100);
        append(
            &path,
            &format!(
                "{}\r\n{}\r\n",
                line("20:00:00.000", &me, &me, "", ENTER_COMBAT, ""),
                line("20:00:01.000", &me, &me, "", HEAL, "(5)")
            ),
        );

        let (mut streamer, mut rx) = streamer(path).await;
        streamer.poll().await.unwrap();
        streamer.stop().await;

        let messages = drain(&mut rx);
        let Some(CombatMessage::Stop { events }) = messages.last() else {
            panic!("expected stop, got {messages:?}");
        };
        assert_eq!(events.len(), 2);
    }

    #[tokio::test]
    async fn resuming_mid_combat_continues_it() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(LOG_NAME);
        let me = player("Galen", 100);
        let mob = npc("Mob", 42, 9, 100_000);
        let shock = ability("Shock", 7);
        let hit = |time: &str| line(time, &me, &mob, &shock, DAMAGE, "(1000 energy {836045448940874})");
        append(
            &path,
            &format!(
                "{}\r\n{}\r\n",
                line("20:00:00.000", &me, &me, "", ENTER_COMBAT, ""),
                hit("20:00:01.000")
            ),
        );

        let mut ctx = SessionContext::new(config());
        let (history, cursor) = crate::combat_log::Reader::from(path.clone())
            .load_into(&mut ctx)
            .unwrap();
        let session = Arc::new(RwLock::new(ctx));
        let (tx, mut rx) = mpsc::channel(64);
        let mut streamer = LogStreamer::new(path.clone(), session, cursor, tx)
            .await
            .unwrap()
            .resume(&history)
            .await;

        append(&path, &format!("{}\r\n{}\r\n", hit("20:00:02.000"), hit("20:00:03.000")));
        streamer.poll().await.unwrap();
        streamer.stop().await;

        let messages = drain(&mut rx);
        let CombatMessage::Start { start_time, events, .. } = &messages[0] else {
            panic!("expected start, got {messages:?}");
        };
        assert_eq!(*start_time, ts("20:00:00.000"));
        let numbers: Vec<_> = events.iter().map(|e| e.line_number).collect();
        assert_eq!(numbers, [1, 2, 3, 4]);
        let Some(CombatMessage::Stop { events }) = messages.last() else {
            panic!("expected stop, got {messages:?}");
        };
        assert_eq!(events.len(), 4);
    }

    #[tokio::test]
    async fn resuming_when_idle_publishes_nothing_old() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(LOG_NAME);
        let me = player("Galen", 100);
        append(
            &path,
            &format!(
                "{}\r\n{}\r\n",
                line("20:00:00.000", &me, &me, "", ENTER_COMBAT, ""),
                line("20:00:01.000", &me, "", "", &area_entered("Imperial Fleet", 137438989504, ""), ""),
            ),
        );
        let mut ctx = SessionContext::new(config());
        let (history, cursor) = crate::combat_log::Reader::from(path.clone())
            .load_into(&mut ctx)
            .unwrap();
        let (tx, mut rx) = mpsc::channel(64);
        let mut streamer = LogStreamer::new(path, Arc::new(RwLock::new(ctx)), cursor, tx)
            .await
            .unwrap()
            .resume(&history)
            .await;
        streamer.poll().await.unwrap();
        streamer.stop().await;
        assert!(drain(&mut rx).is_empty());
    }

    #[tokio::test]
    async fn reentering_publishes_one_stop_then_one_start() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(LOG_NAME);
        let me = player("Galen", 100);
        append(
            &path,
            &format!(
                "{}\r\n{}\r\n{}\r\n",
                line("20:00:00.000", &me, &me, "", ENTER_COMBAT, ""),
                line("20:00:01.000", &me, &me, "", HEAL, "(5)"),
                line("20:00:02.000", &me, &me, "", ENTER_COMBAT, ""),
            ),
        );

        let (mut streamer, mut rx) = streamer(path).await;
        streamer.poll().await.unwrap();
        let kinds: Vec<_> = drain(&mut rx)
            .into_iter()
            .map(|m| match m {
                CombatMessage::Start { .. } => "start",
                CombatMessage::Update { .. } => "update",
                CombatMessage::Stop { .. } => "stop",
            })
            .collect();
        assert_eq!(kinds, ["start", "stop", "start"]);
    }
}
