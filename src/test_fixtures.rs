//! Synthetic export files shared by the unit tests
//!
//! `synthetic_session` produces a file whose sentinels sit on lines 10, 20
//! and 30: four summary rows, three interval rows and the requested number
//! of strokes, each table preceded by its units echo row.

use crate::document::RawDocument;

pub const SUMMARY_LINE: usize = 10;
pub const INTERVAL_LINE: usize = 20;
pub const STROKE_LINE: usize = 30;

pub const HEADER_BLOCK: &str = "\
Session Information:,,,,Device Info:,,,,Oarlock Firmware:,,,,Oarlock Settings:,
,,,,,,,,,,,,,
Name:,  Morning Row  ,,,Name:,SpeedCoach GPS Pro,,,Firmware Version:, 1.18 ,,,Boat ID:,Quad Blue
Start Time:,05/14/2023 06:12:03 AM,,,Model:,SpeedCoach GPS Pro,,,,,,,Seat Number:,2
Type:,Just Row,,,Serial:,0123456789,,,,,,,Side:,Port
System of Units:,Meters/MPS/500m,,,Firmware Version:,2.21.3,,,,,,,Oar Length:,288
Speed Input:,GPS,,,Profile Version:,1,,,,,,,Inboard Length:,88
,,,,Hardware Version:,3,,,,,,,,
";

pub const SUMMARY_COLUMNS: &str =
    "Interval,Total Distance (GPS),Total Elapsed Time,Avg Split (GPS),Avg Stroke Rate,Avg Heart Rate";
pub const SUMMARY_UNITS: &str = "(Interval),(Meters),(HH:MM:SS.tenths),(/500),(SPM),(BPM)";

pub const STROKE_COLUMNS: &str =
    "Interval,Distance (GPS),Elapsed Time,Split (GPS),Stroke Rate,Heart Rate";
pub const STROKE_UNITS: &str = "(Interval),(Meters),(HH:MM:SS.tenths),(/500),(SPM),(BPM)";

/// Full export text with the given number of stroke rows
pub fn synthetic_session(strokes: usize) -> String {
    let mut lines: Vec<String> = HEADER_BLOCK.lines().map(str::to_string).collect();

    // line 9
    lines.push(String::new());
    // line 10
    lines.push("Session Summary:".to_string());
    lines.push(String::new());
    lines.push(SUMMARY_COLUMNS.to_string());
    lines.push(SUMMARY_UNITS.to_string());
    lines.push("1,2000.5,00:08:01.0,02:00.2,24.5,---".to_string());
    lines.push("2,1000.0,00:04:60.0,02:00.0,25.0,150".to_string());
    lines.push("3,500.0,00:02:00.0,02:60.0,26.0,155".to_string());
    lines.push("4,250.0,00:01:00.0,02:00.0,---,---".to_string());
    lines.push(String::new());
    lines.push(String::new());
    // line 20
    lines.push("Interval Summaries:".to_string());
    lines.push(String::new());
    lines.push(SUMMARY_COLUMNS.to_string());
    lines.push(SUMMARY_UNITS.to_string());
    lines.push("1,1000.0,00:04:00.0,02:00.0,24.0,148".to_string());
    lines.push("2,1000.0,00:03:60.0,01:60.0,25.5,---".to_string());
    lines.push("3,500.0,00:02:05.0,02:05.0,23.0,151".to_string());
    lines.push(String::new());
    lines.push(String::new());
    lines.push(String::new());
    // line 30
    lines.push("Per-Stroke Data:".to_string());
    lines.push(String::new());
    lines.push(STROKE_COLUMNS.to_string());
    lines.push(STROKE_UNITS.to_string());
    for stroke in 1..=strokes {
        lines.push(stroke_row(stroke));
    }

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// One per-stroke row; every fifth stroke has no heart rate reading
pub fn stroke_row(stroke: usize) -> String {
    let heart_rate = if stroke % 5 == 0 { "---" } else { "140" };
    format!(
        "1,{}.0,00:{:02}:{:02}.0,02:00.0,24.0,{}",
        stroke * 10,
        (stroke * 2) / 60,
        (stroke * 2) % 60,
        heart_rate
    )
}

pub fn synthetic_document(strokes: usize) -> RawDocument {
    RawDocument::from_text("synthetic.csv", synthetic_session(strokes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinels_land_on_expected_lines() {
        let document = synthetic_document(3);
        assert_eq!(document.line(SUMMARY_LINE), Some("Session Summary:"));
        assert_eq!(document.line(INTERVAL_LINE), Some("Interval Summaries:"));
        assert_eq!(document.line(STROKE_LINE), Some("Per-Stroke Data:"));
        assert_eq!(document.line_count(), STROKE_LINE + 3 + 3);
    }
}
