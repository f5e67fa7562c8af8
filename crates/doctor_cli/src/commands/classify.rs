//! `doctor classify`: keyword rules only, no model call.

use anyhow::Result;
use doctor_core::classifier;

use crate::output;

pub fn handle(message: &str) -> Result<()> {
    let classification = classifier::explain(message);

    if output::is_json() {
        output::data("classification", &classification);
        return Ok(());
    }

    output::header(&format!("Rule verdict: {}", classification.verdict));

    let fired: Vec<(&str, &str)> = classification
        .backend_rules
        .iter()
        .map(|name| (*name, "backend"))
        .chain(
            classification
                .frontend_rules
                .iter()
                .map(|name| (*name, "frontend")),
        )
        .collect();

    if fired.is_empty() {
        output::dim("No rule fired; the model decides the side.");
        return Ok(());
    }

    let mut table = output::table();
    output::table_header(&mut table, "Rule", "Points at");
    for (name, side) in &fired {
        output::table_row(&mut table, name, side);
    }
    output::table_print(&table, &fired);
    Ok(())
}
