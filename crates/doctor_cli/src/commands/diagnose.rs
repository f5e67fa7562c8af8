//! `doctor diagnose`: full classify, prompt, reconcile pipeline.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{bail, Context, Result};
use doctor_core::{DiagnosisOrchestrator, DoctorSettings, IssueReport};

use crate::cli::{DiagnoseArgs, ReportFormat};
use crate::output;
use crate::render;

pub async fn handle(args: DiagnoseArgs) -> Result<()> {
    let report = build_report(&args)?;
    let settings = build_settings(&args)?;
    let format = args.format.unwrap_or(if output::is_json() {
        ReportFormat::Json
    } else {
        ReportFormat::Text
    });

    if report.error_message.trim().is_empty() {
        output::warning("No error message given; the diagnosis will be generic.");
    }

    let orchestrator = DiagnosisOrchestrator::from_env(settings);
    if !orchestrator.has_credential() {
        output::warning("OPENAI_API_KEY is not set; returning the setup guidance.");
    }

    let spinner = (format == ReportFormat::Text && orchestrator.has_credential())
        .then(|| output::spinner(&format!("Asking {}...", orchestrator.settings().model)));
    let diagnosis = orchestrator.analyze(&report).await;
    if let Some(spinner) = spinner {
        output::spinner_done(&spinner);
    }

    match format {
        ReportFormat::Json => output::data("diagnosis", &diagnosis),
        ReportFormat::Html => println!("{}", render::html::render_page(&report, &diagnosis)),
        ReportFormat::Text => render::text::print_diagnosis(&diagnosis),
    }
    Ok(())
}

/// Start from `--report` when given, then apply the individual flags.
fn build_report(args: &DiagnoseArgs) -> Result<IssueReport> {
    let mut report = match &args.report {
        Some(path) => {
            let raw = read_input(path)?;
            serde_json::from_str::<IssueReport>(&raw)
                .with_context(|| format!("Invalid report JSON in {}", path.display()))?
        }
        None => IssueReport::default(),
    };

    if let Some(v) = &args.frontend_url {
        report.frontend_url = v.clone();
    }
    if let Some(v) = &args.backend_url {
        report.backend_url = v.clone();
    }
    if let Some(v) = &args.frontend_type {
        report.frontend_type = v.clone();
    }
    if let Some(v) = &args.backend_type {
        report.backend_type = v.clone();
    }
    if let Some(v) = &args.error_message {
        report.error_message = v.clone();
    } else if let Some(path) = &args.error_file {
        report.error_message = read_input(path)?;
    }

    Ok(report)
}

fn build_settings(args: &DiagnoseArgs) -> Result<DoctorSettings> {
    let mut settings = DoctorSettings::from_env()?;
    if let Some(model) = &args.model {
        settings = settings.with_model(model);
    }
    if let Some(temperature) = args.temperature {
        if !(0.0..=2.0).contains(&temperature) {
            bail!("--temperature must be between 0 and 2, got {temperature}");
        }
        settings = settings.with_temperature(temperature);
    }
    if let Some(timeout) = args.timeout {
        if timeout == 0 {
            bail!("--timeout must be greater than 0");
        }
        settings = settings.with_timeout_secs(timeout);
    }
    Ok(settings)
}

/// Read a file, or stdin when the path is "-".
fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        return Ok(buf);
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}
