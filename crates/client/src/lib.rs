//! Composition root for the tank game client.
//!
//! Assembles a [`Runtime`] from [`ClientConfig`]: picks the action provider,
//! applies runtime settings, and leaves stream wiring to the binary.
//!
//! ```text
//! server ──stdin──▶ Runtime ──▶ ActionProvider
//!        ◀─stdout──          ◀──
//! ```

pub mod config;
pub mod logging;

pub use config::{ClientConfig, Strategy};

use runtime::{IdleProvider, RandomShooter, Runtime};

/// Build a runtime wired with the configured strategy.
pub fn build_runtime(config: &ClientConfig) -> Runtime {
    let builder = Runtime::builder().config(config.runtime.clone());

    let builder = match config.strategy {
        Strategy::Random => {
            let shooter = config
                .rng_seed
                .map_or_else(RandomShooter::new, RandomShooter::with_seed);
            builder.provider(shooter)
        }
        Strategy::Idle => builder.provider(IdleProvider),
    };

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use runtime::TerminationReason;

    const GAME: &str = concat!(
        r#"{"message":{"your-tank-id":"A","enemy-tank-id":"B"}}"#,
        "\n",
        r#""END_INIT""#,
        "\n",
        r#"{"message":{}}"#,
        "\n",
        r#""END""#,
        "\n",
    );

    #[tokio::test]
    async fn idle_strategy_sends_empty_actions() {
        let config = ClientConfig {
            strategy: Strategy::Idle,
            ..ClientConfig::default()
        };
        let mut output = Vec::new();

        let report = build_runtime(&config)
            .run(GAME.as_bytes(), &mut output)
            .await
            .unwrap();

        assert_eq!(report.reason, TerminationReason::Sentinel);
        assert_eq!(output, b"{}\n");
    }

    #[tokio::test]
    async fn seeded_random_strategy_is_reproducible() {
        let config = ClientConfig {
            rng_seed: Some(5),
            ..ClientConfig::default()
        };

        let mut first = Vec::new();
        let mut second = Vec::new();
        build_runtime(&config)
            .run(GAME.as_bytes(), &mut first)
            .await
            .unwrap();
        build_runtime(&config)
            .run(GAME.as_bytes(), &mut second)
            .await
            .unwrap();

        assert_eq!(first, second);
        assert!(first.starts_with(b"{\"shoot\":"));
    }
}
