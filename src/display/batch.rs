//! Batch result display formatting

use tabled::{settings::Style, Table, Tabled};

use crate::batch::{BatchMode, BatchReport};

#[derive(Tabled)]
struct BatchRow<'a> {
    #[tabled(rename = "ID")]
    id: &'a str,
    #[tabled(rename = "Status")]
    status: &'static str,
    #[tabled(rename = "Output")]
    output: String,
}

/// Format batch outcomes as a table, one row per input item
pub fn format_batch_table(report: &BatchReport) -> String {
    if report.outcomes.is_empty() {
        return "No items to process.".to_string();
    }

    let rows: Vec<BatchRow<'_>> = report
        .outcomes
        .iter()
        .map(|outcome| match &outcome.result {
            Ok(output) => BatchRow {
                id: &outcome.id,
                status: "ok",
                output: output.clone(),
            },
            Err(err) => BatchRow {
                id: &outcome.id,
                status: "FAILED",
                output: err.to_string(),
            },
        })
        .collect();

    Table::new(rows).with(Style::modern()).to_string()
}

/// One-line summary of a batch run
pub fn format_batch_summary(report: &BatchReport) -> String {
    let verb = match report.mode {
        BatchMode::Seal => "Encrypted",
        BatchMode::Open => "Decrypted",
    };
    format!(
        "{} {} of {} item(s), {} failed",
        verb,
        report.succeeded(),
        report.outcomes.len(),
        report.failed()
    )
}
