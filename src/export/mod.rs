//! Export module for writing generated sectors to disk.
//!
//! Three formats: the tab-delimited sector text (written and re-parsed),
//! an SVG connectivity map, and the JSON volume index consumed by the
//! interactive viewer.

mod ascii;
mod json;
mod svg;

pub use ascii::{parse_summaries, sector_to_ascii, write_sector, ParseError, VolumeSummary};
pub use json::{sector_to_json, write_json};
pub use svg::{render_map, write_map};

use thiserror::Error;

/// Errors that can occur during sector export.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON encoding error: {0}")]
    Json(#[from] serde_json::Error),
}
