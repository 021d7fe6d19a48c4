//! Section table extraction.
//!
//! Slices one section out of a document using the sentinel offsets, reads
//! it as comma-separated text with a header row, sets the units echo row
//! aside and normalizes the remaining cells.
//!
//! Row arithmetic for a bounded section: the rows read after the header are
//! `next_start - start - trailer_lines`, counting the units row and skipping
//! blank lines. The final section has no bound and runs to end of file.

use crate::config::ParserConfig;
use crate::document::RawDocument;
use crate::error::{Result, SpeedCoachError};
use crate::models::{SectionKind, SectionOffsets};
use crate::table::{Cell, CellNormalizer, DataTable};
use tracing::{debug, warn};

/// Reads section tables from one document
#[derive(Debug, Clone, Copy)]
pub struct TableExtractor<'a> {
    document: &'a RawDocument,
    config: &'a ParserConfig,
    normalizer: &'a CellNormalizer,
}

impl<'a> TableExtractor<'a> {
    pub fn new(
        document: &'a RawDocument,
        config: &'a ParserConfig,
        normalizer: &'a CellNormalizer,
    ) -> Self {
        Self {
            document,
            config,
            normalizer,
        }
    }

    /// Extract a section using discovered offsets
    ///
    /// Bounded sections need both their own sentinel and the next one.
    pub fn extract_section(
        &self,
        offsets: &SectionOffsets,
        section: SectionKind,
    ) -> Result<DataTable> {
        let start = offsets
            .start(section)
            .ok_or_else(|| self.incomplete(section))?;

        let next_start = match section.next() {
            Some(next) => Some(offsets.start(next).ok_or_else(|| self.incomplete(next))?),
            None => None,
        };

        self.extract(section, start, next_start)
    }

    /// Extract the table whose sentinel is on `start_line`
    ///
    /// With `next_start_line` the row count comes from the distance between
    /// the two sentinels and reading stops before the next sentinel; without
    /// it the table runs to end of file.
    pub fn extract(
        &self,
        section: SectionKind,
        start_line: usize,
        next_start_line: Option<usize>,
    ) -> Result<DataTable> {
        let row_limit = match next_start_line {
            Some(end) => Some(self.row_limit(section, start_line, end)?),
            None => None,
        };

        let mut lines = self
            .document
            .lines_after(start_line)
            .take_while(|(line_num, _)| next_start_line.is_none_or(|end| *line_num < end))
            .filter(|(_, line)| !line.trim().is_empty());

        let (header_line, header) = lines.next().ok_or_else(|| SpeedCoachError::MissingHeader {
            path: self.document.source().to_path_buf(),
            section,
        })?;
        let columns = self.split(header_line, header)?;
        let width = columns.len();

        let mut rows = Vec::new();
        for (line_num, line) in lines.take(row_limit.unwrap_or(usize::MAX)) {
            let fields = self.split(line_num, line)?;
            rows.push(self.fit_row(section, line_num, fields, width)?);
        }

        // The region must hold every row the sentinel distance promises
        if let (Some(limit), Some(end)) = (row_limit, next_start_line) {
            if rows.len() < limit {
                return Err(SpeedCoachError::MalformedRange {
                    path: self.document.source().to_path_buf(),
                    section,
                    start: start_line,
                    end,
                });
            }
        }

        let mut table = DataTable::new(columns, rows);
        if let Some(units) = table.take_first_row() {
            table = table.with_units(units.into_iter().map(trim_cell).collect());
        }
        table.normalize(self.normalizer);

        debug!(
            "Extracted {} table from {}: {} rows x {} columns (header at line {})",
            section,
            self.document.source().display(),
            table.height(),
            table.width(),
            header_line
        );

        Ok(table)
    }

    /// Raw rows (units row included) in a bounded section
    pub fn row_limit(
        &self,
        section: SectionKind,
        start_line: usize,
        end_line: usize,
    ) -> Result<usize> {
        let trailer = self.config.layout.section(section).trailer_lines;

        start_line
            .checked_add(trailer)
            .and_then(|floor| end_line.checked_sub(floor))
            .filter(|count| *count > 0)
            .ok_or_else(|| SpeedCoachError::MalformedRange {
                path: self.document.source().to_path_buf(),
                section,
                start: start_line,
                end: end_line,
            })
    }

    fn split(&self, line_num: usize, line: &str) -> Result<Vec<String>> {
        split_record(line).map_err(|source| SpeedCoachError::Csv {
            path: self.document.source().to_path_buf(),
            line: line_num,
            source,
        })
    }

    /// Check a row against the header width and convert it to cells
    fn fit_row(
        &self,
        section: SectionKind,
        line_num: usize,
        fields: Vec<String>,
        width: usize,
    ) -> Result<Vec<Cell>> {
        let found = fields.len();
        let too_long = found > width;
        let too_short = found < width && self.config.schema_validation.strict;

        if too_long || too_short {
            return Err(SpeedCoachError::SchemaMismatch {
                path: self.document.source().to_path_buf(),
                section,
                line: line_num,
                expected: width,
                found,
            });
        }

        let mut cells: Vec<Cell> = fields
            .into_iter()
            .map(|field| if field.is_empty() { None } else { Some(field) })
            .collect();

        if found < width {
            warn!(
                "Padding short row at line {} of {} ({} of {} columns)",
                line_num,
                self.document.source().display(),
                found,
                width
            );
            cells.resize(width, None);
        }

        Ok(cells)
    }

    fn incomplete(&self, section: SectionKind) -> SpeedCoachError {
        SpeedCoachError::IncompleteSections {
            path: self.document.source().to_path_buf(),
            missing: vec![section],
        }
    }
}

/// Split one line of comma-separated text into fields
pub(crate) fn split_record(line: &str) -> csv::Result<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes());

    let mut record = csv::StringRecord::new();
    reader.read_record(&mut record)?;
    Ok(record.iter().map(str::to_string).collect())
}

fn trim_cell(cell: Cell) -> Cell {
    cell.map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
