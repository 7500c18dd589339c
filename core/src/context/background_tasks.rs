use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Handles to the tasks behind a live tail. Stopping signals the streamer so it
/// can flush its final batch before the handles are dropped.
#[derive(Default)]
pub struct BackgroundTasks {
    pub streamer: Option<JoinHandle<()>>,
    pub monitor: Option<JoinHandle<()>>,
    pub watcher: Option<JoinHandle<()>>,
    pub stop: Option<watch::Sender<bool>>,
}

impl BackgroundTasks {
    pub fn is_running(&self) -> bool {
        self.streamer.as_ref().is_some_and(|h| !h.is_finished())
    }

    pub async fn stop_all(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(true);
        }
        // the streamer exits on its own after the final flush
        if let Some(handle) = self.streamer.take() {
            let _ = handle.await;
        }
        if let Some(handle) = self.monitor.take() {
            let _ = handle.await;
        }
        if let Some(handle) = self.watcher.take() {
            handle.abort();
        }
    }
}
