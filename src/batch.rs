//! Batch seal/open
//!
//! Items are independent: each one derives its own key and runs on a rayon
//! worker. Results come back in input order and a failing item never aborts
//! its siblings.

use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::crypto::envelope;
use crate::error::{AegisError, AegisResult};

/// Which envelope operation a batch runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchMode {
    /// Plaintext in, token out
    Seal,
    /// Token in, plaintext out
    Open,
}

impl BatchMode {
    fn apply(self, input: &str, passphrase: &str) -> AegisResult<String> {
        match self {
            Self::Seal => {
                if input.is_empty() {
                    return Err(AegisError::missing("data to encrypt"));
                }
                envelope::seal(input, passphrase)
            }
            Self::Open => {
                if input.trim().is_empty() {
                    return Err(AegisError::missing("an encrypted token"));
                }
                envelope::open(input, passphrase)
            }
        }
    }
}

/// One input row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchItem {
    /// Caller-chosen label, echoed back in the outcome
    pub id: String,
    /// Plaintext or token
    pub value: String,
}

impl BatchItem {
    pub fn new(id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
        }
    }
}

/// Result for a single item
#[derive(Debug)]
pub struct BatchOutcome {
    pub id: String,
    pub result: AegisResult<String>,
}

impl BatchOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Flat, serializable view of an outcome for CSV/JSON output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchRecord {
    pub id: String,
    pub status: &'static str,
    pub output: String,
}

impl From<&BatchOutcome> for BatchRecord {
    fn from(outcome: &BatchOutcome) -> Self {
        match &outcome.result {
            Ok(output) => Self {
                id: outcome.id.clone(),
                status: "ok",
                output: output.clone(),
            },
            Err(err) => Self {
                id: outcome.id.clone(),
                status: "error",
                output: err.to_string(),
            },
        }
    }
}

/// All outcomes of a batch, in input order
#[derive(Debug)]
pub struct BatchReport {
    pub mode: BatchMode,
    pub outcomes: Vec<BatchOutcome>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    pub fn records(&self) -> Vec<BatchRecord> {
        self.outcomes.iter().map(BatchRecord::from).collect()
    }
}

/// Run a batch on the global rayon pool, or on a dedicated pool of
/// `parallelism` threads when given
pub fn run_batch(
    mode: BatchMode,
    items: &[BatchItem],
    passphrase: &str,
    parallelism: Option<usize>,
) -> AegisResult<BatchReport> {
    let work = || {
        items
            .par_iter()
            .map(|item| BatchOutcome {
                id: item.id.clone(),
                result: mode.apply(&item.value, passphrase),
            })
            .collect::<Vec<_>>()
    };

    let outcomes = match parallelism {
        Some(threads) => {
            debug!(threads, "building dedicated batch pool");
            ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .map_err(|e| AegisError::Environment(format!("Failed to start worker pool: {}", e)))?
                .install(work)
        }
        None => work(),
    };

    let report = BatchReport { mode, outcomes };
    info!(
        ?mode,
        total = items.len(),
        succeeded = report.succeeded(),
        failed = report.failed(),
        "batch finished"
    );
    Ok(report)
}

/// Seal every item under one passphrase
pub fn seal_batch(items: &[BatchItem], passphrase: &str) -> AegisResult<BatchReport> {
    run_batch(BatchMode::Seal, items, passphrase, None)
}

/// Open every item under one passphrase
pub fn open_batch(items: &[BatchItem], passphrase: &str) -> AegisResult<BatchReport> {
    run_batch(BatchMode::Open, items, passphrase, None)
}
