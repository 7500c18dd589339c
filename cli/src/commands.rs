use holocron_core::context::{EngineConfig, SessionContext};
use holocron_core::encounter::{CombatBuilder, EncounterHistory};
use holocron_core::metrics::EntityMetrics;
use holocron_core::signal_processor::{CombatMonitor, resume_after, split_combats};
use holocron_core::{Combat, CombatEvent, LogCursor, LogStreamer, Reader};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{RwLock, mpsc, watch};

use crate::context::{ActiveLog, CliContext};

struct ParsedLog {
    session: SessionContext,
    cursor: LogCursor,
    event_count: usize,
    combats: Vec<Arc<Combat>>,
    history: EncounterHistory,
    /// Lines of a combat still running when the file ended, handed to the tail
    open_combat: Vec<Arc<CombatEvent>>,
}

/// Parse the whole file and split it into combats. Blocking: runs the rayon parse.
fn parse_log(path: PathBuf, config: EngineConfig) -> Result<ParsedLog, String> {
    let mut session = SessionContext::new(config);
    let (events, cursor) = Reader::from(path)
        .load_into(&mut session)
        .map_err(|e| e.to_string())?;

    let (_, open_combat) = resume_after(&events, session.config());
    let mut split = split_combats(&events, session.config());
    if !open_combat.is_empty() {
        // finished live instead
        split.pop();
    }

    let mut history = EncounterHistory::new();
    let mut combats = Vec::new();
    let builder = CombatBuilder::new(&session);
    for combat_events in split {
        match builder.build(&combat_events) {
            Ok(combat) => {
                history.record(&combat, &session);
                combats.push(Arc::new(combat));
            }
            Err(e) => tracing::debug!(error = %e, "skipping empty combat"),
        }
    }

    Ok(ParsedLog {
        event_count: events.len(),
        session,
        cursor,
        combats,
        history,
        open_combat,
    })
}

pub async fn parse_file(path: &str, ctx: &CliContext) {
    let path = {
        let config = ctx.config.read().await;
        config.resolve_log_path(std::path::Path::new(path))
    };
    if !path.is_file() {
        println!("No such file: {}", path.display());
        return;
    }

    // Stop any current tailing task
    ctx.clear_active().await;

    let config = ctx.config.read().await.clone();
    let started = Instant::now();
    let task_path = path.clone();
    let parsed = match tokio::task::spawn_blocking(move || parse_log(task_path, config)).await {
        Ok(Ok(parsed)) => parsed,
        Ok(Err(e)) => {
            println!("Failed to parse {}: {}", path.display(), e);
            return;
        }
        Err(e) => {
            tracing::error!(error = %e, "parse task failed");
            return;
        }
    };

    println!(
        "parsed {} events and {} combats in {}ms",
        parsed.event_count,
        parsed.combats.len(),
        started.elapsed().as_millis()
    );

    let session = Arc::new(RwLock::new(parsed.session));
    let history = Arc::new(RwLock::new(parsed.history));
    ctx.set_active(ActiveLog {
        path: path.clone(),
        session: Arc::clone(&session),
        history: Arc::clone(&history),
        combats: parsed.combats,
        live: None,
        rotate: None,
    })
    .await;

    start_tail(ctx, path, parsed.cursor, &parsed.open_combat).await;
}

/// Tail the active log from `cursor`, feeding a fresh monitor. `open_combat`
/// continues a combat the historical parse ended inside of.
async fn start_tail(
    ctx: &CliContext,
    path: PathBuf,
    cursor: LogCursor,
    open_combat: &[Arc<CombatEvent>],
) {
    let mut active = ctx.active().write().await;
    let Some(log) = active.as_mut() else {
        println!("No file loaded");
        return;
    };

    let (tx, rx) = mpsc::channel(64);
    let streamer = match LogStreamer::new(path.clone(), Arc::clone(&log.session), cursor, tx).await
    {
        Ok(streamer) => streamer.resume(open_combat).await,
        Err(e) => {
            println!("Failed to tail {}: {}", path.display(), e);
            return;
        }
    };
    let (monitor, snapshots) = CombatMonitor::new(Arc::clone(&log.session), rx);
    let monitor = monitor.with_history(Arc::clone(&log.history));
    let (stop_tx, stop_rx) = watch::channel(false);
    let (rotate_tx, rotate_rx) = mpsc::channel(4);

    log.live = Some(snapshots);
    log.rotate = Some(rotate_tx);
    drop(active);

    println!("Beginning file tail: {}", path.display());
    let mut tasks = ctx.tasks.lock().await;
    tasks.stop = Some(stop_tx);
    tasks.monitor = Some(tokio::spawn(monitor.run()));
    tasks.streamer = Some(tokio::spawn(async move {
        if let Err(e) = streamer.run(stop_rx, rotate_rx).await {
            tracing::error!(error = %e, "tail stopped");
        }
    }));
}

/// Tail the newest file in the log directory.
pub async fn tail(ctx: &CliContext) {
    let newest = {
        let index = ctx.file_index.read().await;
        index
            .as_ref()
            .and_then(|idx| idx.newest_file())
            .map(|f| f.path.clone())
    };
    let Some(newest) = newest else {
        println!("No log files found");
        return;
    };

    if ctx.active_path().await.as_ref() == Some(&newest) && ctx.tasks.lock().await.is_running() {
        println!("Already tailing {}", newest.display());
        return;
    }
    parse_file(&newest.to_string_lossy(), ctx).await;
}

pub async fn show_settings(ctx: &CliContext) {
    let config = ctx.config.read().await;
    match EngineConfig::config_path() {
        Ok(path) => println!("# {}", path.display()),
        Err(e) => tracing::warn!(error = %e, "config path unavailable"),
    }
    match config.to_toml_string() {
        Ok(text) => println!("{text}"),
        Err(e) => println!("Failed to render config: {e}"),
    }
}

pub async fn show_stats(ctx: &CliContext) {
    let active = ctx.active().read().await;
    let Some(log) = active.as_ref() else {
        println!("No file loaded");
        return;
    };

    {
        let history = log.history.read().await;
        for summary in history.summaries() {
            let outcome = if summary.killed { " (kill)" } else { "" };
            println!(
                "{:<32} {:>7.1}s {}{}",
                summary.display_name,
                summary.duration_secs,
                summary.difficulty.as_deref().unwrap_or(""),
                outcome
            );
        }
    }

    let Some(combat) = log.latest_combat() else {
        println!("No combats yet");
        return;
    };

    println!(
        "\n{} - {:.1}s",
        combat.name(),
        combat.duration_secs()
    );
    println!(
        "{:<24} {:>9} {:>9} {:>9} {:>9} {:>9} {:>7} {:>9}",
        "Name", "DPS", "EHPS", "APS", "DTPS", "TPS", "APM", "Burst"
    );
    println!("{}", "-".repeat(94));
    for m in EntityMetrics::from_combat(&combat)
        .iter()
        .filter(|m| m.total_damage > 0.0 || m.total_healing > 0.0 || m.total_shielding > 0.0)
    {
        println!(
            "{:<24} {:>9.0} {:>9.0} {:>9.0} {:>9.0} {:>9.0} {:>7.1} {:>9.0}",
            m.name, m.dps, m.ehps, m.aps, m.dtps, m.tps, m.apm, m.burst.damage
        );
        if let Some(reaction) = &m.reaction {
            println!(
                "    reaction: {} hits, mean {:.0}ms, {} fast",
                reaction.count, reaction.mean_ms, reaction.fast
            );
        }
    }
}

pub async fn list_files(ctx: &CliContext) {
    let index = ctx.file_index.read().await;
    let index = match &*index {
        Some(idx) => idx,
        None => {
            println!("No file index available");
            return;
        }
    };

    if index.is_empty() {
        println!("No log files found");
        return;
    }

    println!("{:<50} {:<20} Session", "Character", "Date");
    println!("{}", "-".repeat(80));

    for entry in index.entries() {
        let owner = entry.owner.as_deref().unwrap_or("Unknown");
        let empty_marker = if entry.is_empty() { " (empty)" } else { "" };
        println!(
            "{:<50} {:<20} {}{}",
            owner,
            entry.started_label(),
            entry.session,
            empty_marker
        );
    }

    println!("\nTotal: {} files", index.len());
}

pub async fn exit(ctx: &CliContext) -> Result<(), String> {
    ctx.tasks.lock().await.stop_all().await;
    write!(std::io::stdout(), "quitting...").map_err(|e| e.to_string())?;
    std::io::stdout().flush().map_err(|e| e.to_string())
}
