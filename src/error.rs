//! Typed failures for the directory fetch and the per-city pipeline.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Directory page listed no cities")]
    EmptyDirectory,
    #[error("Schedule row {row} has {cells} text cells, expected at least 9")]
    ShortRow { row: usize, cells: usize },
    #[error("Schedule page contained no rows")]
    EmptySchedule,
    #[error("Cannot derive output path from date {0:?}")]
    BadDate(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
