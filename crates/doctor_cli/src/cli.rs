//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Diagnose frontend/backend integration errors
#[derive(Parser)]
#[command(name = "doctor", about, version, propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output (debug logs on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format: text (human-readable) or json (machine-readable)
    #[arg(short, long, global = true, default_value = "text")]
    pub output: OutputFormat,
}

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum OutputFormat {
    /// Colored terminal output for humans
    #[default]
    Text,
    /// Structured JSON for AI and machine consumption
    Json,
}

/// How a diagnosis is rendered
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Text,
    Json,
    /// Standalone right-to-left result page
    Html,
}

#[derive(Subcommand)]
pub enum Command {
    /// Classify the problem and ask the model for a fix
    Diagnose(DiagnoseArgs),
    /// Run only the keyword rules on an error message
    Classify {
        /// Error message text
        message: String,
    },
    /// Show credential status and effective settings
    Config,
}

#[derive(Args, Debug, Default)]
pub struct DiagnoseArgs {
    /// Read the whole report from a JSON file; flags override its fields
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Frontend URL (e.g. http://localhost:5173)
    #[arg(long)]
    pub frontend_url: Option<String>,

    /// Backend / API URL (e.g. http://localhost:8000)
    #[arg(long)]
    pub backend_url: Option<String>,

    /// Frontend framework (React, Vue, Next.js, ...)
    #[arg(long)]
    pub frontend_type: Option<String>,

    /// Backend framework (Express, FastAPI, Laravel, Django, ...)
    #[arg(long)]
    pub backend_type: Option<String>,

    /// Error message as seen in the browser or server logs
    #[arg(short, long, conflicts_with = "error_file")]
    pub error_message: Option<String>,

    /// Read the error message from a file ("-" for stdin)
    #[arg(long)]
    pub error_file: Option<PathBuf>,

    /// Render format (defaults to json with --output json, text otherwise)
    #[arg(short, long)]
    pub format: Option<ReportFormat>,

    /// Model to use (default: DOCTOR_MODEL or gpt-4o-mini)
    #[arg(long)]
    pub model: Option<String>,

    /// Sampling temperature (default: DOCTOR_TEMPERATURE or 0.2)
    #[arg(long)]
    pub temperature: Option<f32>,

    /// Model call timeout in seconds (default: DOCTOR_TIMEOUT_SECS or 60)
    #[arg(long)]
    pub timeout: Option<u64>,
}
