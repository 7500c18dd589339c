use clap::{Parser, Subcommand};
use holocron_cli::CliContext;
use holocron_cli::commands;
use holocron_cli::dir_watcher;
use holocron_cli::logging;
use holocron_cli::readline;
use std::io::Write;

#[tokio::main]
async fn main() -> Result<(), String> {
    logging::init();
    let ctx = CliContext::new();

    // Initialize file index and start directory watcher
    if let Some(handle) = dir_watcher::init_watcher(&ctx).await {
        ctx.tasks.lock().await.watcher = Some(handle);
    }

    loop {
        let line = readline()?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match respond(line, &ctx).await {
            Ok(quit) => {
                if quit {
                    break;
                }
            }
            Err(err) => {
                write!(std::io::stdout(), "{err}").map_err(|e| e.to_string())?;
                std::io::stdout().flush().map_err(|e| e.to_string())?;
            }
        }
    }

    Ok(())
}

#[derive(Parser)]
#[command(version, about = "combat log analyzer")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a log file, then keep tailing it
    ParseFile {
        #[arg(short, long)]
        path: String,
    },
    /// Tail the newest log in the log directory
    Tail,
    Stats,
    Config,
    ListFiles,
    Exit,
}

async fn respond(line: &str, ctx: &CliContext) -> Result<bool, String> {
    let mut args = shlex::split(line).ok_or("error: Invalid quoting")?;
    args.insert(0, "holocron".to_string());
    let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;

    match &cli.command {
        Some(Commands::ParseFile { path }) => commands::parse_file(path, ctx).await,
        Some(Commands::Tail) => commands::tail(ctx).await,
        Some(Commands::Stats) => commands::show_stats(ctx).await,
        Some(Commands::Config) => commands::show_settings(ctx).await,
        Some(Commands::ListFiles) => commands::list_files(ctx).await,
        Some(Commands::Exit) => {
            commands::exit(ctx).await?;
            return Ok(true);
        }
        None => {}
    }
    Ok(false)
}
