//! Format constants for NK SpeedCoach session exports
//!
//! Sentinel text, section framing arithmetic, metadata window positions and
//! the normalization values used throughout the parser. These describe the
//! single export layout the parser currently knows about; `FormatLayout` in
//! [`crate::config`] is built from them.

// =============================================================================
// Section Sentinels
// =============================================================================

/// Line marker preceding the session summary table
pub const SUMMARY_SENTINEL: &str = "Session Summary:";

/// Line marker preceding the interval summaries table
pub const INTERVAL_SENTINEL: &str = "Interval Summaries:";

/// Line marker preceding the per-stroke data table
pub const STROKE_SENTINEL: &str = "Per-Stroke Data:";

// =============================================================================
// Section Framing
// =============================================================================

/// Lines between the summary sentinel and the next sentinel that are not
/// table rows (sentinel, blank separators and the header row)
pub const SUMMARY_TRAILER_LINES: usize = 5;

/// Same as [`SUMMARY_TRAILER_LINES`] for the interval summaries section
pub const INTERVAL_TRAILER_LINES: usize = 6;

/// The per-stroke section runs to end of file, so nothing is subtracted
pub const STROKE_TRAILER_LINES: usize = 0;

// =============================================================================
// Metadata Windows
// =============================================================================

/// Physical lines skipped before any metadata window starts
pub const METADATA_SKIP_ROWS: usize = 2;

/// Session header block: name, start time, type, units, speed input
pub mod session_header {
    pub const ROWS: usize = 5;
    pub const FIELD_COLUMN: usize = 0;
    pub const VALUE_COLUMN: usize = 1;
}

/// Device info block: name, model, serial, firmware, profile, hardware
pub mod device_info {
    pub const ROWS: usize = 6;
    pub const FIELD_COLUMN: usize = 4;
    pub const VALUE_COLUMN: usize = 5;
}

/// Oarlock firmware block: a single firmware version row
pub mod oarlock_firmware {
    pub const ROWS: usize = 1;
    pub const FIELD_COLUMN: usize = 8;
    pub const VALUE_COLUMN: usize = 9;
}

/// Oarlock settings block: boat id, seat, side, oar length, inboard length
pub mod oarlock_settings {
    pub const ROWS: usize = 5;
    pub const FIELD_COLUMN: usize = 12;
    pub const VALUE_COLUMN: usize = 13;
}

// =============================================================================
// Data Normalization
// =============================================================================

/// Cell text the device writes for a missing measurement
pub const PLACEHOLDER_VALUE: &str = "---";

/// Seconds field rounded up to a full minute by the exporter, as a regex
pub const MINUTE_ROLLOVER_PATTERN: &str = r":60\.0";

/// Replacement keeping the seconds field below 60
pub const MINUTE_ROLLOVER_REPLACEMENT: &str = ":59.9";

// =============================================================================
// Timestamps
// =============================================================================

/// Formats seen in the session header "Start Time" field
pub const START_TIME_FORMATS: &[&str] = &[
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// Source name used for documents that were not loaded from disk
pub const IN_MEMORY_SOURCE: &str = "<in-memory>";
