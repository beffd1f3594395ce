// SPDX-License-Identifier: MIT OR Apache-2.0
//! Choreography demo host
//!
//! Plays the splash, onboarding, roster, settings and profile choreographies
//! against a simulated frame clock and logs what a renderer would apply.
//!
//! Usage: `choreo_demo [config.ron]`

mod config;
mod host;

use config::DemoConfig;
use host::{DemoError, DemoHost};
use std::path::Path;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

fn main() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("choreo_demo=info,choreo_core=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting choreo demo v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(std::env::args().nth(1)) {
        tracing::error!("Demo failed: {e}");
        std::process::exit(1);
    }
}

fn run(config_path: Option<String>) -> Result<(), DemoError> {
    let config = match config_path {
        Some(path) => {
            tracing::info!("Loading config from {}", path);
            DemoConfig::load(Path::new(&path))?
        }
        None => DemoConfig::default(),
    };

    let summary = DemoHost::new(config).run()?;
    tracing::info!(
        frames = summary.frames,
        elapsed_ms = summary.elapsed_ms,
        order = ?summary.completed,
        "session complete"
    );
    Ok(())
}
