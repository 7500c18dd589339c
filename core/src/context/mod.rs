//! Session-scoped state and the collaborators around it: configuration,
//! entity identity, string pooling and log-directory discovery.

mod background_tasks;
mod config;
mod error;
mod interner;
mod log_files;
mod registry;
mod session;
pub mod watcher;

pub use background_tasks::BackgroundTasks;
pub use config::{AnalysisConfig, EngineConfig};
pub use error::{ConfigError, WatcherError};
pub use interner::{IStr, StringPool, empty_istr};
pub use log_files::{
    DirectoryIndex, LogFile, is_combat_log, log_file_timestamp, session_start_from_path,
};
pub use registry::{EntityRegistry, UNKNOWN_ENTITY_ID, UNKNOWN_ENTITY_NAME};
pub use session::{AreaInfo, SessionContext};
