//! JSON batch reports

use std::io::Write;

use serde::Serialize;

use crate::batch::{BatchMode, BatchRecord, BatchReport};
use crate::error::AegisResult;

/// Report envelope written for `--format json`
#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    /// "encrypt" or "decrypt"
    pub operation: &'static str,
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub results: Vec<BatchRecord>,
}

impl From<&BatchReport> for BatchSummary {
    fn from(report: &BatchReport) -> Self {
        Self {
            operation: match report.mode {
                BatchMode::Seal => "encrypt",
                BatchMode::Open => "decrypt",
            },
            total: report.outcomes.len(),
            succeeded: report.succeeded(),
            failed: report.failed(),
            results: report.records(),
        }
    }
}

/// Write a batch report as pretty-printed JSON
pub fn write_batch_json<W: Write>(mut writer: W, report: &BatchReport) -> AegisResult<()> {
    serde_json::to_writer_pretty(&mut writer, &BatchSummary::from(report))?;
    writeln!(writer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::BatchOutcome;
    use crate::error::AegisError;

    #[test]
    fn test_write_batch_json() {
        let report = BatchReport {
            mode: BatchMode::Open,
            outcomes: vec![
                BatchOutcome {
                    id: "1".into(),
                    result: Ok("hello".into()),
                },
                BatchOutcome {
                    id: "2".into(),
                    result: Err(AegisError::Decryption),
                },
            ],
        };

        let mut out = Vec::new();
        write_batch_json(&mut out, &report).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(value["operation"], "decrypt");
        assert_eq!(value["succeeded"], 1);
        assert_eq!(value["failed"], 1);
        assert_eq!(value["results"][0]["output"], "hello");
        assert_eq!(value["results"][1]["status"], "error");
    }
}
