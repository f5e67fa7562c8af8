//! Styled terminal rendering of a diagnosis.

use console::style;
use doctor_core::{Diagnosis, DiagnosisSource};

use crate::output;

pub fn print_diagnosis(diagnosis: &Diagnosis) {
    let source = match diagnosis.source {
        DiagnosisSource::Model => style("model").green(),
        DiagnosisSource::MissingCredential => style("not configured").yellow(),
        DiagnosisSource::Fallback => style("fallback").red(),
    };

    output::header(non_empty(&diagnosis.issue_title, "(no title)"));
    output::kv("side", diagnosis.side.as_str());
    output::kv("rule verdict", diagnosis.rule_side.as_str());
    output::kv("source", &source.to_string());
    println!();

    if !diagnosis.summary.is_empty() {
        println!("{}", diagnosis.summary);
        println!();
    }

    if !diagnosis.steps.is_empty() {
        println!("{}", style("Steps").bold());
        for (i, step) in diagnosis.steps.iter().enumerate() {
            println!("  {} {}", style(format!("{}.", i + 1)).cyan(), step);
        }
        println!();
    }

    print_code("Backend code", &diagnosis.backend_code);
    print_code("Frontend code", &diagnosis.frontend_code);

    if !diagnosis.extra_notes.is_empty() {
        output::dim(&diagnosis.extra_notes);
    }
}

fn print_code(label: &str, code: &str) {
    if code.trim().is_empty() {
        return;
    }
    println!("{}", style(label).bold());
    for line in code.lines() {
        println!("  {}", style(line).yellow());
    }
    println!();
}

fn non_empty<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() { fallback } else { value }
}
