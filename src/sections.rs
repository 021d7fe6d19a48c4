//! Section sentinel detection.
//!
//! Scans an export once and records the line number of each section's
//! sentinel. The offsets drive the row arithmetic in
//! [`crate::extractor`], so ordering and completeness are checked here
//! before any table is read.

use crate::config::{FormatLayout, SectionPolicy};
use crate::document::RawDocument;
use crate::error::{Result, SpeedCoachError};
use crate::models::{SectionKind, SectionOffsets};
use tracing::{debug, warn};

/// Locate the section sentinels in a document
pub fn index_sections(
    document: &RawDocument,
    layout: &FormatLayout,
    policy: SectionPolicy,
) -> Result<SectionOffsets> {
    let offsets = scan_sentinels(document, layout);

    if offsets.is_empty() {
        return Err(SpeedCoachError::InvalidFormat {
            path: document.source().to_path_buf(),
        });
    }

    let missing = offsets.missing();
    if !missing.is_empty() {
        match policy {
            SectionPolicy::RequireAll => {
                return Err(SpeedCoachError::IncompleteSections {
                    path: document.source().to_path_buf(),
                    missing,
                });
            }
            SectionPolicy::AllowPartial => {
                warn!(
                    "Accepting {} with missing sections: {:?}",
                    document.source().display(),
                    missing
                );
            }
        }
    }

    check_order(document, &offsets)?;

    debug!(
        "Section offsets for {}: summary={:?}, intervals={:?}, strokes={:?}",
        document.source().display(),
        offsets.summary_start,
        offsets.interval_start,
        offsets.stroke_start
    );

    Ok(offsets)
}

/// Record the last line on which each sentinel occurs
fn scan_sentinels(document: &RawDocument, layout: &FormatLayout) -> SectionOffsets {
    let mut offsets = SectionOffsets::default();

    for (line_num, line) in document.lines() {
        let matched = SectionKind::ALL
            .into_iter()
            .find(|section| line.contains(layout.section(*section).sentinel.as_str()));

        if let Some(section) = matched {
            if let Some(previous) = offsets.set(section, line_num) {
                warn!(
                    "Repeated {} marker in {} at lines {} and {}; using the later one",
                    section,
                    document.source().display(),
                    previous,
                    line_num
                );
            }
        }
    }

    offsets
}

/// Present sentinels must appear in file order
fn check_order(document: &RawDocument, offsets: &SectionOffsets) -> Result<()> {
    let present: Vec<(SectionKind, usize)> = SectionKind::ALL
        .into_iter()
        .filter_map(|section| Some((section, offsets.start(section)?)))
        .collect();

    for pair in present.windows(2) {
        let (earlier, earlier_line) = pair[0];
        let (later, later_line) = pair[1];
        if later_line <= earlier_line {
            debug!(
                "{} marker at line {} precedes {} marker at line {}",
                later, later_line, earlier, earlier_line
            );
            return Err(SpeedCoachError::MalformedRange {
                path: document.source().to_path_buf(),
                section: earlier,
                start: earlier_line,
                end: later_line,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{INTERVAL_LINE, STROKE_LINE, SUMMARY_LINE, synthetic_document};

    fn index(text: &str, policy: SectionPolicy) -> Result<SectionOffsets> {
        let document = RawDocument::from_text("test.csv", text);
        index_sections(&document, &FormatLayout::default(), policy)
    }

    #[test]
    fn test_finds_all_sentinels() {
        let document = synthetic_document(5);
        let offsets =
            index_sections(&document, &FormatLayout::default(), SectionPolicy::RequireAll)
                .unwrap();

        assert_eq!(offsets.summary_start, Some(SUMMARY_LINE));
        assert_eq!(offsets.interval_start, Some(INTERVAL_LINE));
        assert_eq!(offsets.stroke_start, Some(STROKE_LINE));
    }

    #[test]
    fn test_line_numbers_are_one_based() {
        let offsets = index(
            "Session Summary:\n\nInterval Summaries:\nPer-Stroke Data:",
            SectionPolicy::RequireAll,
        )
        .unwrap();

        assert_eq!(offsets.summary_start, Some(1));
        assert_eq!(offsets.interval_start, Some(3));
        assert_eq!(offsets.stroke_start, Some(4));
    }

    #[test]
    fn test_sentinel_matches_as_substring() {
        let offsets = index(
            "x\nSession Summary:,,,\n,Interval Summaries:\n  Per-Stroke Data:  ",
            SectionPolicy::RequireAll,
        )
        .unwrap();

        assert_eq!(offsets.summary_start, Some(2));
        assert_eq!(offsets.interval_start, Some(3));
        assert_eq!(offsets.stroke_start, Some(4));
    }

    #[test]
    fn test_no_sentinels_is_invalid_format() {
        let err = index("Name:,Row\nType:,Just Row\n", SectionPolicy::RequireAll).unwrap_err();
        match err {
            SpeedCoachError::InvalidFormat { path } => {
                assert_eq!(path.to_str(), Some("test.csv"));
            }
            other => panic!("unexpected error: {other}"),
        }

        // Lenient policy does not make an unrecognized file valid
        let err = index("", SectionPolicy::AllowPartial).unwrap_err();
        assert!(matches!(err, SpeedCoachError::InvalidFormat { .. }));
    }

    #[test]
    fn test_missing_sentinel_rejected_by_default() {
        let err = index("Session Summary:\n\n\nPer-Stroke Data:\n", SectionPolicy::RequireAll)
            .unwrap_err();

        match err {
            SpeedCoachError::IncompleteSections { missing, .. } => {
                assert_eq!(missing, vec![SectionKind::IntervalSummaries]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_sentinel_accepted_when_partial() {
        let offsets = index(
            "Session Summary:\n\n\nPer-Stroke Data:\n",
            SectionPolicy::AllowPartial,
        )
        .unwrap();

        assert_eq!(offsets.summary_start, Some(1));
        assert_eq!(offsets.interval_start, None);
        assert_eq!(offsets.stroke_start, Some(4));
    }

    #[test]
    fn test_out_of_order_sentinels_rejected() {
        let err = index(
            "Interval Summaries:\n\nSession Summary:\n\nPer-Stroke Data:\n",
            SectionPolicy::RequireAll,
        )
        .unwrap_err();

        match err {
            SpeedCoachError::MalformedRange {
                section, start, end, ..
            } => {
                assert_eq!(section, SectionKind::Summary);
                assert_eq!(start, 3);
                assert_eq!(end, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_out_of_order_checked_across_gap() {
        // With the interval marker missing, strokes must still follow the summary
        let err = index(
            "Per-Stroke Data:\n\nSession Summary:\n",
            SectionPolicy::AllowPartial,
        )
        .unwrap_err();
        assert!(matches!(err, SpeedCoachError::MalformedRange { .. }));
    }

    #[test]
    fn test_repeated_sentinel_keeps_last() {
        let offsets = index(
            "Session Summary:\nSession Summary:\n\nInterval Summaries:\n\nPer-Stroke Data:\n",
            SectionPolicy::RequireAll,
        )
        .unwrap();
        assert_eq!(offsets.summary_start, Some(2));
    }

    #[test]
    fn test_custom_sentinels() {
        let mut layout = FormatLayout::default();
        layout.summary.sentinel = "Summary".to_string();
        layout.interval_summaries.sentinel = "Splits".to_string();
        layout.strokes.sentinel = "Strokes".to_string();

        let document = RawDocument::from_string("Summary\nSplits\nStrokes\n");
        let offsets = index_sections(&document, &layout, SectionPolicy::RequireAll).unwrap();
        assert_eq!(offsets.stroke_start, Some(3));
    }
}
