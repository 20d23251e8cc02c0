//! Headless tile-match runner (default binary).
//!
//! Plays one session over stdin/stdout using the line-delimited JSON protocol.
//! Logs go to stderr so stdout stays a clean protocol stream.

use anyhow::{Context, Result};
use tokio::io::BufReader;
use tokio::runtime::Runtime;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use tilematch::adapter::{load_levels, run, RunnerConfig};
use tilematch::core::{default_levels, RandomTileSource, SessionController};

fn main() -> Result<()> {
    let config = RunnerConfig::from_env();

    let filter = EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .compact()
        .init();

    let levels = match &config.levels_path {
        Some(path) => load_levels(path)
            .with_context(|| format!("loading levels from {}", path.display()))?,
        None => default_levels(),
    };

    let seed = config.seed.unwrap_or_else(rand::random);
    info!(seed, levels = levels.len(), "starting session");

    let source = RandomTileSource::with_palette(seed, &config.palette)?;
    let session = SessionController::with_config(levels, source, config.session_config())?;

    let rt = Runtime::new().context("failed to create tokio runtime")?;
    let session = rt.block_on(run(
        session,
        config.tick_interval(),
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
    ))?;

    info!(
        phase = session.phase().as_str(),
        score = session.state().score,
        "session finished"
    );
    // The blocked stdin reader task would keep the runtime alive on drop
    rt.shutdown_background();
    Ok(())
}
