//! NK SpeedCoach Session Parser
//!
//! A Rust library for reading the CSV session exports written by NK
//! SpeedCoach rowing monitors into structured tables and metadata records.
//!
//! An export is a single text stream with no fixed schema marker. Sentinel
//! lines separate a header block, a session summary, interval summaries and
//! per-stroke data. This library provides tools for:
//! - Locating the section sentinels and validating their order
//! - Slicing each section by sentinel distance and reading it as a table
//! - Repairing placeholder cells and minute-rollover time values
//! - Extracting session, device and oarlock metadata from the header grid
//!
//! ```no_run
//! use speedcoach_parser::{SectionKind, SessionFile};
//!
//! # fn main() -> speedcoach_parser::Result<()> {
//! let file = SessionFile::open("SpdCoach 2145001 20230514 0612AM.csv")?;
//! let parsed = file.parse()?;
//!
//! println!("{} strokes", parsed.session.strokes.height());
//! let _intervals = file.table(SectionKind::IntervalSummaries)?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod constants;
pub mod document;
pub mod error;
pub mod extractor;
pub mod header;
pub mod models;
pub mod processor;
pub mod sections;
pub mod table;
pub mod timing;

#[cfg(test)]
mod test_fixtures;

// Re-export commonly used types
pub use config::{FormatLayout, ParserConfig, SectionPolicy};
pub use document::RawDocument;
pub use error::{Result, SpeedCoachError};
pub use models::{
    DeviceRecord, OarlockRecord, ParsedSessionFile, SectionKind, SectionOffsets, Session,
    SessionHeader,
};
pub use processor::SessionFile;
pub use table::{CellNormalizer, DataTable};
