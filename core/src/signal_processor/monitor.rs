//! Single consumer of the streamer's channel.
//!
//! Owns the live `Combat`, folds every batch into it and publishes an
//! `Arc<Combat>` snapshot after each one. Finished combats are rebuilt from
//! their full event list and appended to the encounter history.

use std::sync::Arc;
use tokio::sync::{RwLock, mpsc, watch};

use super::{CombatMessage, MonitorEvent};
use crate::combat_log::{CombatEvent, Entity};
use crate::context::SessionContext;
use crate::encounter::{BuildError, Combat, CombatBuilder, EncounterHistory};

pub type CombatSnapshot = Option<Arc<Combat>>;

pub struct CombatMonitor {
    session: Arc<RwLock<SessionContext>>,
    rx: mpsc::Receiver<MonitorEvent>,
    live: Option<Combat>,
    snapshot: watch::Sender<CombatSnapshot>,
    history: Arc<RwLock<EncounterHistory>>,
    local_player: Option<Arc<Entity>>,
    timing_offset_ms: Option<i64>,
}

impl CombatMonitor {
    pub fn new(
        session: Arc<RwLock<SessionContext>>,
        rx: mpsc::Receiver<MonitorEvent>,
    ) -> (Self, watch::Receiver<CombatSnapshot>) {
        let (snapshot, snapshot_rx) = watch::channel(None);
        let monitor = Self {
            session,
            rx,
            live: None,
            snapshot,
            history: Arc::new(RwLock::new(EncounterHistory::new())),
            local_player: None,
            timing_offset_ms: None,
        };
        (monitor, snapshot_rx)
    }

    /// Continue an existing history, e.g. the one built by the historical parse.
    pub fn with_history(mut self, history: Arc<RwLock<EncounterHistory>>) -> Self {
        self.history = history;
        self
    }

    pub fn history(&self) -> Arc<RwLock<EncounterHistory>> {
        Arc::clone(&self.history)
    }

    /// Consume until every sender is dropped.
    pub async fn run(mut self) {
        while let Some(event) = self.rx.recv().await {
            self.handle(event).await;
        }
        tracing::debug!("monitor channel closed");
    }

    pub async fn handle(&mut self, event: MonitorEvent) {
        match event {
            MonitorEvent::Combat(message) => self.handle_combat(message).await,
            MonitorEvent::LocalPlayerIdentified(player) => {
                tracing::info!(name = %player.name, "tracking local player");
                self.local_player = Some(player);
            }
            MonitorEvent::TimingOffset { ms } => {
                if self.timing_offset_ms != Some(ms) {
                    tracing::trace!(ms, "timing offset");
                }
                self.timing_offset_ms = Some(ms);
            }
            MonitorEvent::LogRotated { path } => {
                tracing::info!(path = %path.display(), "log rotated, resetting history");
                self.live = None;
                self.local_player = None;
                self.history.write().await.clear();
                self.snapshot.send_replace(None);
            }
        }
    }

    async fn handle_combat(&mut self, message: CombatMessage) {
        let session = self.session.read().await;
        let builder = CombatBuilder::new(&session);
        match message {
            CombatMessage::Start {
                start_time,
                events,
                location,
            } => {
                tracing::info!(%start_time, %location, "building combat");
                self.live = begin_or_log(&builder, &events);
            }
            CombatMessage::Update { events } => match self.live.as_mut() {
                Some(combat) => builder.update(combat, &events),
                None => self.live = begin_or_log(&builder, &events),
            },
            CombatMessage::Stop { events } => {
                self.live = None;
                let combat = match builder.build(&events) {
                    Ok(combat) => combat,
                    Err(e) => {
                        tracing::debug!(error = %e, "combat ended without events");
                        return;
                    }
                };
                self.history.write().await.record(&combat, &session);
                self.snapshot.send_replace(Some(Arc::new(combat)));
                return;
            }
        }
        if let Some(combat) = &self.live {
            self.snapshot.send_replace(Some(Arc::new(combat.clone())));
        }
    }

    pub fn local_player(&self) -> Option<&Arc<Entity>> {
        self.local_player.as_ref()
    }

    pub fn timing_offset_ms(&self) -> Option<i64> {
        self.timing_offset_ms
    }
}

fn begin_or_log(builder: &CombatBuilder<'_>, events: &[Arc<CombatEvent>]) -> Option<Combat> {
    match builder.begin(events) {
        Ok(combat) => Some(combat),
        Err(BuildError::EmptyBootstrap) => {
            tracing::debug!("no events yet, waiting for the next batch");
            None
        }
    }
}
