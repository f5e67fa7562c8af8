//! CLI entry point for the integration doctor.

mod cli;
mod commands;
mod output;
mod render;

use std::path::Path;

use clap::Parser;
use doctor_observability::ObservabilityConfig;

use crate::cli::Cli;

/// Load env files without overriding variables already set.
/// Order: 1) nearest `.env` from the working directory upwards  2) ~/.doctor/env
fn load_doctor_config() {
    if let Ok(cwd) = std::env::current_dir() {
        if let Some(env_file) = find_upwards(&cwd, ".env") {
            let _ = dotenvy::from_path(&env_file);
        }
    }
    if let Some(home) = dirs::home_dir() {
        let config_path = home.join(".doctor").join("env");
        if config_path.exists() {
            let _ = dotenvy::from_path(&config_path);
        }
    }
}

fn find_upwards(start: &Path, name: &str) -> Option<std::path::PathBuf> {
    start
        .ancestors()
        .take(32)
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_file())
}

fn init_tracing(verbose: bool) {
    let mut config = ObservabilityConfig::from_env().with_version(env!("CARGO_PKG_VERSION"));
    if verbose {
        config = config.with_log_level("debug");
    } else if config.log_level.is_none() {
        config = config.with_log_level("warn");
    }
    if let Err(e) = doctor_observability::init(config) {
        output::warning(&format!("Tracing disabled: {e}"));
    }
}

#[tokio::main]
async fn main() {
    load_doctor_config();
    let cli = Cli::parse();
    output::init(cli.output);
    init_tracing(cli.verbose);

    let result = commands::handle(cli).await;
    doctor_observability::shutdown();

    if let Err(e) = result {
        output::error(&format!("{e:#}"));
        std::process::exit(1);
    }
}
