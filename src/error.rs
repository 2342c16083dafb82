use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlateForgeError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed Layout: {0}")]
    MalformedLayout(String),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Data Validation Error: {0}")]
    Validation(String),
}

pub type PfResult<T> = Result<T, PlateForgeError>;

/// Non-fatal findings collected during a run. These never abort generation;
/// they are logged as they occur and reported back with the model so the
/// caller can surface them.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Diagnostic {
    #[error("row {row}: attribute '{attribute}' is recognized but not handled, ignored")]
    UnsupportedKeyAttribute { row: usize, attribute: String },

    #[error("row {row} key {key}: no support offset known for size {size}, support skipped")]
    UnsupportedSupportSize { row: usize, key: usize, size: f64 },

    #[error(
        "row {row}: cut at x={cut_x:.2} falls inside key span [{span_start:.2}, {span_end:.2}], \
         part does not fit on printer"
    )]
    SplitInfeasible {
        row: usize,
        cut_x: f64,
        span_start: f64,
        span_end: f64,
    },

    #[error("plate depth {depth:.1} exceeds printer depth {printer_depth:.1}, depth axis is not split")]
    DepthOverflow { depth: f64, printer_depth: f64 },
}
