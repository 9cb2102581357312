//! Tank game client binary.
//!
//! Speaks the line-delimited JSON protocol on stdin/stdout. Exits with status
//! 0 when the game ends (sentinel or closed stream during turns) and non-zero
//! when the handshake or initialization is malformed.
//!
//! # Examples
//!
//! ```bash
//! # Reproducible random shooter, verbose merge logging on stderr
//! TANK_RNG_SEED=7 RUST_LOG=debug cargo run -p tank-client < recorded_game.jsonl
//! ```

use anyhow::{Context, Result};
use tank_client::{ClientConfig, build_runtime, logging};
use tokio::io::BufReader;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // 1. Setup logging
    logging::setup_logging()?;

    // 2. Load configuration from environment
    let config = ClientConfig::from_env();
    tracing::info!("Starting tank client");
    tracing::info!("Strategy: {}", config.strategy);
    tracing::debug!("Runtime config: {:?}", config.runtime);

    // 3. Build and run
    let mut runtime = build_runtime(&config);
    let input = BufReader::new(tokio::io::stdin());
    let output = tokio::io::stdout();

    let report = match runtime.run(input, output).await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Game aborted: {}", e);
            return Err(e).context("tank client failed");
        }
    };

    tracing::info!(
        "Client shutdown complete after {} turns ({})",
        report.turns,
        report.reason
    );
    Ok(())
}
