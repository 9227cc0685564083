//! Shadow Castle terminal client.
//!
//! Composition root: loads configuration from the environment, opens the
//! content directory, builds the [`runtime::Runtime`], and plays one
//! session over stdin/stdout.
//!
//! ```bash
//! CASTLE_DATA_DIR=./my-levels RUST_LOG=runtime=debug cargo run -p castle-client
//! ```

mod config;
mod logging;

use std::fmt;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};

use game_core::{GameError, Phase};
use runtime::{ContentLevelSource, Runtime, RuntimeConfig, RuntimeError, SessionHandle};

use crate::config::ClientConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    dotenvy::dotenv().ok();

    let config = ClientConfig::from_env();
    let _log_guard = logging::setup_logging(&config.log_dir, config.session_id.as_deref())?;

    tracing::info!("Starting castle client");
    tracing::info!("Content directory: {}", config.data_dir.display());

    let source = ContentLevelSource::open(&config.data_dir)
        .await
        .with_context(|| format!("Failed to open content in {}", config.data_dir.display()))?;
    let game_config = source
        .factory()
        .load_config()
        .context("Failed to load config.toml")?;

    let runtime_config = RuntimeConfig {
        game_config,
        command_buffer_size: config.command_buffer,
        start_level: config.start_level.clone().map(Into::into),
        ..RuntimeConfig::default()
    };
    let runtime = Runtime::builder()
        .config(runtime_config)
        .source(source)
        .build()
        .await
        .context("Failed to build runtime")?;

    tracing::info!(level = %runtime.start_level(), "Runtime built successfully");

    let handle = runtime.open_session().await?;
    let result = play(&handle).await;

    handle.close().await.ok();
    runtime.shutdown().await?;
    tracing::info!("Client shutdown complete");
    result
}

/// Reads lines until the game ends or stdin closes.
async fn play(handle: &SessionHandle) -> Result<()> {
    println!("{}", handle.render().await?);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read input")? {
        match handle.submit(line).await {
            Ok(step) => {
                println!("\n{}", step.status);
                if step.status.phase == Phase::GameOver {
                    return Ok(());
                }
            }
            Err(RuntimeError::Session(error)) => {
                tracing::error!(code = error.error_code(), "{}", error);
                println!("\n{}", session_ended_by(&error));
                return Err(error).context("The session cannot continue");
            }
            Err(error) => {
                println!("\n{}", session_ended_by(&error));
                return Err(error.into());
            }
        }
    }

    tracing::info!("Input closed before the game ended");
    Ok(())
}

/// Player-facing line shown before the client exits on an error.
fn session_ended_by(error: &impl fmt::Display) -> String {
    format!("An internal error ended the session: {error}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::SessionError;

    #[test]
    fn fatal_errors_are_told_to_the_player() {
        let line = session_ended_by(&SessionError::CurrentRoomMissing("Vault".into()));
        assert!(line.starts_with("An internal error ended the session: "));
        assert!(line.contains("Vault"));

        let line = session_ended_by(&RuntimeError::CommandChannelClosed);
        assert!(line.starts_with("An internal error ended the session: "));
    }
}
