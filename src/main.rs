use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use postboard_client::command::{Command, HELP};
use postboard_client::config::Config;
use postboard_client::notify::ConsoleNotifier;
use postboard_client::Board;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    init_tracing()?;

    info!("Starting postboard-client");

    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    info!(api = %config.api_base_url, "Configuration loaded");

    // Ensure data directories exist
    for path in [&config.session_path, &config.render_path] {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.with_context(|| {
                format!("Failed to create data directory: {}", parent.display())
            })?;
        }
    }

    let board = Board::from_config(&config, Arc::new(ConsoleNotifier))
        .context("Failed to initialize client")?;

    if let Err(e) = board.restore_session().await {
        warn!(error = %e, "Stored session could not be restored");
    }
    info!(path = %config.render_path.display(), "Initial page rendered");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let line = tokio::select! {
            line = lines.next_line() => line.context("Failed to read input")?,
            () = shutdown_signal() => None,
        };
        let Some(line) = line else {
            break;
        };

        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                eprintln!("{e}");
                continue;
            }
        };

        if command == Command::Quit {
            break;
        }
        if let Some(output) = execute(&board, command).await {
            stdout.write_all(output.as_bytes()).await?;
            stdout.write_all(b"\n").await?;
        }
    }

    info!("Shutdown complete");
    Ok(())
}

/// Run one command. Failures have already been shown to the user by the
/// board, so they are only logged here.
async fn execute(board: &Board, command: Command) -> Option<String> {
    let result = match command {
        Command::Login { email, password } => board.login(&email, &password).await,
        Command::Signup {
            username,
            email,
            password,
        } => board.signup(&username, &email, &password).await,
        Command::Logout => board.logout().await,
        Command::Post { title, description } => {
            board.update_compose(&title, &description).await;
            board.submit_compose().await
        }
        Command::DeletePost(id) => board.delete_post(id).await,
        Command::Comment { post_id, text } => board.create_comment(post_id, &text).await,
        Command::DeleteComment(id) => board.delete_comment(id).await,
        Command::Profile {
            additional_email,
            address,
            mobile,
        } => board.save_profile(&additional_email, &address, &mobile).await,
        Command::Open(panel) => {
            board.open_panel(panel).await;
            Ok(())
        }
        Command::Close => {
            board.close_panel().await;
            Ok(())
        }
        Command::Sync => {
            let status = board.sync_all().await;
            return Some(format!("sync: {status:?}"));
        }
        Command::Show => return Some(board.inspect().await.outline()),
        Command::Help => return Some(HELP.to_string()),
        Command::Quit => return None,
    };

    if let Err(e) = result {
        warn!(error = %e, "Command failed");
    }
    None
}

fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,postboard_client=debug"));

    // Check if JSON logging is requested
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| matches!(v.to_lowercase().as_str(), "json" | "structured"))
        .unwrap_or(false);

    // Logs go to stderr; stdout carries the command prompt
    if use_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
}
