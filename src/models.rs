//! Core data structures for parsed SpeedCoach sessions.
//!
//! Defines section identifiers, the sentinel offsets discovered in a file,
//! the flat metadata records read from the header block, and the bundles
//! handed back to callers.

use crate::constants::START_TIME_FORMATS;
use crate::table::DataTable;
use chrono::NaiveDateTime;
use serde::Serialize;
use std::fmt;

/// The three tabular sections of an export, in file order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SectionKind {
    Summary,
    IntervalSummaries,
    Strokes,
}

impl SectionKind {
    /// All sections in the order they appear in a file
    pub const ALL: [SectionKind; 3] = [
        SectionKind::Summary,
        SectionKind::IntervalSummaries,
        SectionKind::Strokes,
    ];

    /// The section that follows this one, if any
    pub fn next(&self) -> Option<SectionKind> {
        match self {
            SectionKind::Summary => Some(SectionKind::IntervalSummaries),
            SectionKind::IntervalSummaries => Some(SectionKind::Strokes),
            SectionKind::Strokes => None,
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SectionKind::Summary => "session summary",
            SectionKind::IntervalSummaries => "interval summaries",
            SectionKind::Strokes => "per-stroke data",
        };
        f.write_str(name)
    }
}

/// 1-based line numbers of the section sentinels
///
/// Each offset is the sentinel line itself; the section's header row is the
/// first non-blank line after it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SectionOffsets {
    pub summary_start: Option<usize>,
    pub interval_start: Option<usize>,
    pub stroke_start: Option<usize>,
}

impl SectionOffsets {
    /// Sentinel line for a section
    pub fn start(&self, section: SectionKind) -> Option<usize> {
        match section {
            SectionKind::Summary => self.summary_start,
            SectionKind::IntervalSummaries => self.interval_start,
            SectionKind::Strokes => self.stroke_start,
        }
    }

    pub(crate) fn set(&mut self, section: SectionKind, line: usize) -> Option<usize> {
        let slot = match section {
            SectionKind::Summary => &mut self.summary_start,
            SectionKind::IntervalSummaries => &mut self.interval_start,
            SectionKind::Strokes => &mut self.stroke_start,
        };
        slot.replace(line)
    }

    /// Sections whose sentinel was found
    pub fn found(&self) -> Vec<SectionKind> {
        SectionKind::ALL
            .into_iter()
            .filter(|section| self.start(*section).is_some())
            .collect()
    }

    /// Sections whose sentinel was not found
    pub fn missing(&self) -> Vec<SectionKind> {
        SectionKind::ALL
            .into_iter()
            .filter(|section| self.start(*section).is_none())
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing().is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.found().is_empty()
    }
}

/// A raw label/value pair read from a metadata window
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetadataPair {
    pub label: Option<String>,
    pub value: Option<String>,
}

/// Session information block (columns 0-1 of the header)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionHeader {
    pub name: Option<String>,
    pub start_time: Option<String>,
    pub session_type: Option<String>,
    pub system_of_units: Option<String>,
    pub speed_input: Option<String>,
}

impl SessionHeader {
    /// Parse the start time using the formats NK devices write
    pub fn start_time(&self) -> Option<NaiveDateTime> {
        let raw = self.start_time.as_deref()?;
        START_TIME_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
    }
}

/// Oarlock module configuration (firmware plus settings blocks)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OarlockRecord {
    pub firmware_version: Option<String>,
    pub boat_id: Option<String>,
    pub seat_number: Option<String>,
    pub side: Option<String>,
    pub oar_length: Option<String>,
    pub inboard_length: Option<String>,
}

impl OarlockRecord {
    /// True when the file carries no oarlock information at all
    pub fn is_empty(&self) -> bool {
        *self == OarlockRecord::default()
    }
}

/// SpeedCoach unit identity. The serial number is unique per device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeviceRecord {
    pub name: Option<String>,
    pub model: Option<String>,
    pub serial: Option<String>,
    pub firmware_version: Option<String>,
    pub profile_version: Option<String>,
    pub hardware_version: Option<String>,
    pub oarlock: OarlockRecord,
}

/// Header plus the three section tables of one session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Session {
    pub header: SessionHeader,
    pub summary: DataTable,
    pub interval_summaries: DataTable,
    pub strokes: DataTable,
}

impl Session {
    pub fn table(&self, section: SectionKind) -> &DataTable {
        match section {
            SectionKind::Summary => &self.summary,
            SectionKind::IntervalSummaries => &self.interval_summaries,
            SectionKind::Strokes => &self.strokes,
        }
    }
}

/// Everything extracted from one export file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedSessionFile {
    pub session: Session,
    pub device: DeviceRecord,
}
