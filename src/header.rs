//! Session and device metadata extraction.
//!
//! The header block of an export is a grid of label/value column pairs at
//! fixed positions: session information, device info, oarlock firmware and
//! oarlock settings side by side. Each record reads its own window of that
//! grid; no section offsets are involved.

use crate::config::{FormatLayout, MetadataWindow};
use crate::document::RawDocument;
use crate::error::{Result, SpeedCoachError};
use crate::extractor::split_record;
use crate::models::{DeviceRecord, MetadataPair, OarlockRecord, SessionHeader};
use tracing::debug;

/// Read the label/value pairs of a metadata window, top row first
///
/// Blank lines are not counted as window rows. Values are trimmed and
/// empty values, including columns missing from a short row, are `None`.
pub fn read_metadata_window(
    document: &RawDocument,
    window: &MetadataWindow,
    name: &'static str,
) -> Result<Vec<MetadataPair>> {
    let mut pairs = Vec::with_capacity(window.rows);

    let lines = document
        .lines_after(window.skip_rows)
        .filter(|(_, line)| !line.trim().is_empty())
        .take(window.rows);

    for (line_num, line) in lines {
        let fields = split_record(line).map_err(|source| SpeedCoachError::Csv {
            path: document.source().to_path_buf(),
            line: line_num,
            source,
        })?;

        pairs.push(MetadataPair {
            label: field_value(&fields, window.field_column),
            value: field_value(&fields, window.value_column),
        });
    }

    if pairs.len() < window.rows {
        return Err(SpeedCoachError::MetadataWindow {
            path: document.source().to_path_buf(),
            window: name,
            row: pairs.len(),
        });
    }

    debug!(
        "Read {} window from {}: {:?}",
        name,
        document.source().display(),
        pairs
    );

    Ok(pairs)
}

/// Extract the session information block
pub fn extract_session_header(
    document: &RawDocument,
    layout: &FormatLayout,
) -> Result<SessionHeader> {
    let mut values = window_values(document, &layout.session_header, "session header")?;

    Ok(SessionHeader {
        name: values.next().flatten(),
        start_time: values.next().flatten(),
        session_type: values.next().flatten(),
        system_of_units: values.next().flatten(),
        speed_input: values.next().flatten(),
    })
}

/// Extract the device identity block together with its oarlock record
pub fn extract_device(document: &RawDocument, layout: &FormatLayout) -> Result<DeviceRecord> {
    let mut values = window_values(document, &layout.device_info, "device info")?;

    Ok(DeviceRecord {
        name: values.next().flatten(),
        model: values.next().flatten(),
        serial: values.next().flatten(),
        firmware_version: values.next().flatten(),
        profile_version: values.next().flatten(),
        hardware_version: values.next().flatten(),
        oarlock: extract_oarlock(document, layout)?,
    })
}

/// Extract the oarlock firmware and settings blocks
pub fn extract_oarlock(document: &RawDocument, layout: &FormatLayout) -> Result<OarlockRecord> {
    let mut firmware = window_values(document, &layout.oarlock_firmware, "oarlock firmware")?;
    let mut settings = window_values(document, &layout.oarlock_settings, "oarlock settings")?;

    Ok(OarlockRecord {
        firmware_version: firmware.next().flatten(),
        boat_id: settings.next().flatten(),
        seat_number: settings.next().flatten(),
        side: settings.next().flatten(),
        oar_length: settings.next().flatten(),
        inboard_length: settings.next().flatten(),
    })
}

fn window_values(
    document: &RawDocument,
    window: &MetadataWindow,
    name: &'static str,
) -> Result<impl Iterator<Item = Option<String>>> {
    Ok(read_metadata_window(document, window, name)?
        .into_iter()
        .map(|pair| pair.value))
}

fn field_value(fields: &[String], column: usize) -> Option<String> {
    let value = fields.get(column)?.trim();
    (!value.is_empty()).then(|| value.to_string())
}
