//! Configuration management and validation.
//!
//! Provides the export layout (sentinels, section framing and metadata
//! windows), the policy for files with missing sections, row width
//! validation and the cell normalization rules.

use crate::constants::{self, METADATA_SKIP_ROWS};
use crate::error::{Result, SpeedCoachError};
use crate::models::SectionKind;
use serde::{Deserialize, Serialize};

/// Framing of one tabular section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionLayout {
    /// Text identifying the section's sentinel line
    pub sentinel: String,

    /// Non-row lines between this sentinel and the next one
    pub trailer_lines: usize,
}

/// A fixed block of label/value cells near the top of the file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataWindow {
    /// Physical lines skipped before the first row
    pub skip_rows: usize,

    /// Number of rows in the block
    pub rows: usize,

    /// Column holding the field label
    pub field_column: usize,

    /// Column holding the field value
    pub value_column: usize,
}

impl MetadataWindow {
    pub const fn new(rows: usize, field_column: usize, value_column: usize) -> Self {
        Self {
            skip_rows: METADATA_SKIP_ROWS,
            rows,
            field_column,
            value_column,
        }
    }
}

/// Positions of everything the parser reads from an export
///
/// Only one export layout is known, so `Default` is the only constructor
/// provided; other firmware versions can supply their own values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatLayout {
    pub summary: SectionLayout,
    pub interval_summaries: SectionLayout,
    pub strokes: SectionLayout,
    pub session_header: MetadataWindow,
    pub device_info: MetadataWindow,
    pub oarlock_firmware: MetadataWindow,
    pub oarlock_settings: MetadataWindow,
}

impl Default for FormatLayout {
    fn default() -> Self {
        use constants::{device_info, oarlock_firmware, oarlock_settings, session_header};

        Self {
            summary: SectionLayout {
                sentinel: constants::SUMMARY_SENTINEL.to_string(),
                trailer_lines: constants::SUMMARY_TRAILER_LINES,
            },
            interval_summaries: SectionLayout {
                sentinel: constants::INTERVAL_SENTINEL.to_string(),
                trailer_lines: constants::INTERVAL_TRAILER_LINES,
            },
            strokes: SectionLayout {
                sentinel: constants::STROKE_SENTINEL.to_string(),
                trailer_lines: constants::STROKE_TRAILER_LINES,
            },
            session_header: MetadataWindow::new(
                session_header::ROWS,
                session_header::FIELD_COLUMN,
                session_header::VALUE_COLUMN,
            ),
            device_info: MetadataWindow::new(
                device_info::ROWS,
                device_info::FIELD_COLUMN,
                device_info::VALUE_COLUMN,
            ),
            oarlock_firmware: MetadataWindow::new(
                oarlock_firmware::ROWS,
                oarlock_firmware::FIELD_COLUMN,
                oarlock_firmware::VALUE_COLUMN,
            ),
            oarlock_settings: MetadataWindow::new(
                oarlock_settings::ROWS,
                oarlock_settings::FIELD_COLUMN,
                oarlock_settings::VALUE_COLUMN,
            ),
        }
    }
}

impl FormatLayout {
    /// Layout of a section
    pub fn section(&self, section: SectionKind) -> &SectionLayout {
        match section {
            SectionKind::Summary => &self.summary,
            SectionKind::IntervalSummaries => &self.interval_summaries,
            SectionKind::Strokes => &self.strokes,
        }
    }
}

/// How to treat files where only some section sentinels were found
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SectionPolicy {
    /// Reject the file unless all three sentinels are present
    #[default]
    RequireAll,
    /// Accept the file; sections lacking bounds fail when requested
    AllowPartial,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaValidation {
    /// Fail when a data row has fewer cells than the header.
    /// Rows with more cells than the header always fail.
    pub strict: bool,
}

impl Default for SchemaValidation {
    fn default() -> Self {
        Self { strict: true }
    }
}

/// Cell repairs applied to every extracted table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizationConfig {
    /// Exact cell text standing for a missing value
    pub placeholder: String,

    /// Regular expression rewritten wherever it matches in a cell
    pub rollover_pattern: String,

    /// Text substituted for `rollover_pattern`
    pub rollover_replacement: String,
}

impl Default for NormalizationConfig {
    fn default() -> Self {
        Self {
            placeholder: constants::PLACEHOLDER_VALUE.to_string(),
            rollover_pattern: constants::MINUTE_ROLLOVER_PATTERN.to_string(),
            rollover_replacement: constants::MINUTE_ROLLOVER_REPLACEMENT.to_string(),
        }
    }
}

/// Global configuration for SpeedCoach parsing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Export layout
    pub layout: FormatLayout,

    /// Handling of files with an incomplete set of sections
    pub section_policy: SectionPolicy,

    /// Row width validation
    pub schema_validation: SchemaValidation,

    /// Cell normalization rules
    pub normalization: NormalizationConfig,
}

impl ParserConfig {
    /// Use a custom export layout
    pub fn with_layout(mut self, layout: FormatLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Set the policy for files with missing sections
    pub fn with_section_policy(mut self, policy: SectionPolicy) -> Self {
        self.section_policy = policy;
        self
    }

    /// Accept files where only some sections are present
    pub fn allow_partial_sections(self) -> Self {
        self.with_section_policy(SectionPolicy::AllowPartial)
    }

    /// Pad short rows with nulls instead of failing
    pub fn with_lenient_rows(mut self) -> Self {
        self.schema_validation.strict = false;
        self
    }

    /// Use custom normalization rules
    pub fn with_normalization(mut self, normalization: NormalizationConfig) -> Self {
        self.normalization = normalization;
        self
    }

    /// Check the configuration for values the parser cannot work with
    pub fn validate(&self) -> Result<()> {
        for section in SectionKind::ALL {
            if self.layout.section(section).sentinel.trim().is_empty() {
                return Err(SpeedCoachError::Configuration {
                    message: format!("Empty sentinel for {} section", section),
                });
            }
        }

        let windows = [
            ("session header", &self.layout.session_header),
            ("device info", &self.layout.device_info),
            ("oarlock firmware", &self.layout.oarlock_firmware),
            ("oarlock settings", &self.layout.oarlock_settings),
        ];
        for (name, window) in windows {
            if window.field_column == window.value_column {
                return Err(SpeedCoachError::Configuration {
                    message: format!(
                        "Metadata window '{}' uses column {} for both label and value",
                        name, window.field_column
                    ),
                });
            }
        }

        if self.normalization.rollover_pattern.is_empty() {
            return Err(SpeedCoachError::Configuration {
                message: "Empty timestamp rollover pattern".to_string(),
            });
        }

        Ok(())
    }
}
