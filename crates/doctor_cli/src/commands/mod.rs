//! Command dispatch.

pub mod classify;
pub mod config;
pub mod diagnose;

use crate::cli::{Cli, Command};
use anyhow::Result;

pub async fn handle(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Diagnose(args) => diagnose::handle(args).await,
        Command::Classify { message } => classify::handle(&message),
        Command::Config => config::handle(),
    }
}
