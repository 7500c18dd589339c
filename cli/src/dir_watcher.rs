use crate::CliContext;
use crate::commands;
use holocron_core::directory_watcher::{self as core_watcher, DirectoryEvent, DirectoryWatcher};
use std::path::PathBuf;
use tokio::task::JoinHandle;

/// Initialize the file index and start the watcher
pub async fn init_watcher(ctx: &CliContext) -> Option<JoinHandle<()>> {
    let dir = {
        let config = ctx.config.read().await;
        PathBuf::from(&config.log_directory)
    };

    if !dir.exists() {
        println!("Warning: Log directory {} does not exist", dir.display());
        return None;
    }

    match core_watcher::index_directory(&dir) {
        Ok((index, newest)) => {
            let file_count = index.len();
            *ctx.file_index.write().await = Some(index);
            println!("Indexed {} log files", file_count);

            // Auto-load newest file
            commands::parse_file(&newest.to_string_lossy(), ctx).await;
        }
        Err(e) => {
            println!("{}", e);
        }
    }

    let mut watcher = match DirectoryWatcher::new(&dir) {
        Ok(w) => w,
        Err(e) => {
            println!("Failed to start directory watcher: {}", e);
            return None;
        }
    };

    println!("Watching directory: {}", dir.display());

    let watcher_ctx = ctx.clone();
    let handle = tokio::spawn(async move {
        while let Some(event) = watcher.next_event().await {
            handle_watcher_event(event, &watcher_ctx).await;
        }
    });

    Some(handle)
}

async fn handle_watcher_event(event: DirectoryEvent, ctx: &CliContext) {
    match event {
        DirectoryEvent::NewFile(path) => {
            let is_newer = {
                let mut index_guard = ctx.file_index.write().await;
                match &mut *index_guard {
                    Some(index) => {
                        if !index.add_file(&path) {
                            return;
                        }
                        let current = ctx.active_path().await;
                        match current {
                            Some(current) => index.newer_than(&current).is_some_and(|f| f.path == path),
                            None => index.newest_file().is_some_and(|f| f.path == path),
                        }
                    }
                    None => false,
                }
            };
            if !is_newer {
                return;
            }

            // a running streamer switches files itself, keeping its monitor
            let rotate = {
                let active = ctx.active().read().await;
                active.as_ref().and_then(|a| a.rotate.clone())
            };
            let running = ctx.tasks.lock().await.is_running();
            match rotate {
                Some(tx) if running => {
                    println!("New log file detected, switching to: {}", path.display());
                    if tx.send(path.clone()).await.is_ok() {
                        if let Some(active) = ctx.active().write().await.as_mut() {
                            active.path = path;
                            active.combats.clear();
                        }
                    }
                }
                _ => {
                    println!("New log file detected: {}", path.display());
                    commands::parse_file(&path.to_string_lossy(), ctx).await;
                }
            }
        }

        DirectoryEvent::FileRemoved(path) => {
            {
                let mut index_guard = ctx.file_index.write().await;
                if let Some(index) = &mut *index_guard {
                    index.remove_file(&path);
                }
            }

            if ctx.active_path().await.as_ref() != Some(&path) {
                return;
            }
            ctx.clear_active().await;

            let next_file = {
                let index_guard = ctx.file_index.read().await;
                index_guard
                    .as_ref()
                    .and_then(|idx| idx.newest_file())
                    .map(|f| f.path.clone())
            };
            if let Some(new_path) = next_file {
                println!("Active file removed, switching to: {}", new_path.display());
                commands::parse_file(&new_path.to_string_lossy(), ctx).await;
            }
        }

        DirectoryEvent::Error(err) => {
            tracing::warn!(error = %err, "directory watcher");
        }
    }
}
