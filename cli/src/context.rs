use holocron_core::context::{BackgroundTasks, DirectoryIndex, EngineConfig, SessionContext};
use holocron_core::{Combat, CombatSnapshot, EncounterHistory};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock, mpsc, watch};

/// Shared handle to the session of the active log.
pub type SessionHandle = Arc<RwLock<SessionContext>>;

/// Everything known about the active log file.
pub struct ActiveLog {
    pub path: PathBuf,
    pub session: SessionHandle,
    pub history: Arc<RwLock<EncounterHistory>>,
    /// Combats found by the historical parse, in log order
    pub combats: Vec<Arc<Combat>>,
    /// Latest combat published by the live monitor. None until tailing starts.
    pub live: Option<watch::Receiver<CombatSnapshot>>,
    /// Hands newer log files to the streamer
    pub rotate: Option<mpsc::Sender<PathBuf>>,
}

impl ActiveLog {
    /// The live snapshot if there is one, otherwise the last parsed combat.
    pub fn latest_combat(&self) -> Option<Arc<Combat>> {
        self.live
            .as_ref()
            .and_then(|rx| rx.borrow().clone())
            .or_else(|| self.combats.last().cloned())
    }
}

/// Holds all shared state for the CLI application.
/// This is a lightweight container - logic lives in the individual state types.
#[derive(Clone)]
pub struct CliContext {
    pub config: Arc<RwLock<EngineConfig>>,
    /// None until a file is loaded
    active: Arc<RwLock<Option<ActiveLog>>>,
    pub tasks: Arc<Mutex<BackgroundTasks>>,
    pub file_index: Arc<RwLock<Option<DirectoryIndex>>>,
}

impl CliContext {
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(EngineConfig::load())),
            active: Arc::new(RwLock::new(None)),
            tasks: Arc::new(Mutex::new(BackgroundTasks::default())),
            file_index: Arc::new(RwLock::new(None)),
        }
    }

    pub fn active(&self) -> &Arc<RwLock<Option<ActiveLog>>> {
        &self.active
    }

    pub async fn set_active(&self, log: ActiveLog) {
        *self.active.write().await = Some(log);
    }

    pub async fn active_path(&self) -> Option<PathBuf> {
        self.active.read().await.as_ref().map(|a| a.path.clone())
    }

    /// Stop the streamer and monitor tasks, keeping the directory watcher.
    pub async fn stop_tail(&self) {
        let mut tasks = self.tasks.lock().await;
        let watcher = tasks.watcher.take();
        tasks.stop_all().await;
        tasks.watcher = watcher;
    }

    pub async fn clear_active(&self) {
        self.stop_tail().await;
        *self.active.write().await = None;
    }
}

impl Default for CliContext {
    fn default() -> Self {
        Self::new()
    }
}
