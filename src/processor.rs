//! Session file processing.
//!
//! [`SessionFile`] ties the pieces together for one export: it owns the
//! loaded document, finds the section sentinels on first use and keeps the
//! result, and hands out the metadata records and section tables.

use crate::config::ParserConfig;
use crate::document::RawDocument;
use crate::error::Result;
use crate::extractor::TableExtractor;
use crate::header::{extract_device, extract_session_header};
use crate::models::{
    DeviceRecord, ParsedSessionFile, SectionKind, SectionOffsets, Session, SessionHeader,
};
use crate::sections::index_sections;
use crate::table::{CellNormalizer, DataTable};
use once_cell::sync::OnceCell;
use std::path::Path;
use tracing::debug;

/// One loaded NK SpeedCoach export
#[derive(Debug)]
pub struct SessionFile {
    document: RawDocument,
    config: ParserConfig,
    normalizer: CellNormalizer,
    offsets: OnceCell<SectionOffsets>,
}

impl SessionFile {
    /// Load an export with the default configuration
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_config(path, ParserConfig::default())
    }

    /// Load an export with a custom configuration
    pub fn open_with_config(path: impl AsRef<Path>, config: ParserConfig) -> Result<Self> {
        let document = RawDocument::open(path)?;
        Self::from_document(document, config)
    }

    /// Wrap a document that is already in memory
    pub fn from_document(document: RawDocument, config: ParserConfig) -> Result<Self> {
        config.validate()?;
        let normalizer = CellNormalizer::from_config(&config.normalization)?;

        Ok(Self {
            document,
            config,
            normalizer,
            offsets: OnceCell::new(),
        })
    }

    pub fn document(&self) -> &RawDocument {
        &self.document
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn path(&self) -> &Path {
        self.document.source()
    }

    /// Sentinel offsets, located on first call and reused afterwards
    pub fn section_offsets(&self) -> Result<&SectionOffsets> {
        self.offsets.get_or_try_init(|| {
            debug!("Indexing sections of {}", self.path().display());
            index_sections(
                &self.document,
                &self.config.layout,
                self.config.section_policy,
            )
        })
    }

    /// Sections present in the file
    pub fn available_sections(&self) -> Result<Vec<SectionKind>> {
        Ok(self.section_offsets()?.found())
    }

    /// Extract one section table
    pub fn table(&self, section: SectionKind) -> Result<DataTable> {
        let offsets = self.section_offsets()?;
        self.extractor().extract_section(offsets, section)
    }

    /// Session information block; does not depend on the sections
    pub fn session_header(&self) -> Result<SessionHeader> {
        extract_session_header(&self.document, &self.config.layout)
    }

    /// Device and oarlock metadata; does not depend on the sections
    pub fn device(&self) -> Result<DeviceRecord> {
        extract_device(&self.document, &self.config.layout)
    }

    /// Header plus all three section tables
    pub fn session(&self) -> Result<Session> {
        let offsets = self.section_offsets()?;
        let extractor = self.extractor();

        Ok(Session {
            header: self.session_header()?,
            summary: extractor.extract_section(offsets, SectionKind::Summary)?,
            interval_summaries: extractor
                .extract_section(offsets, SectionKind::IntervalSummaries)?,
            strokes: extractor.extract_section(offsets, SectionKind::Strokes)?,
        })
    }

    /// Everything in the file
    pub fn parse(&self) -> Result<ParsedSessionFile> {
        let session = self.session()?;
        let device = self.device()?;

        debug!(
            "Parsed {}: {} summary rows, {} intervals, {} strokes",
            self.path().display(),
            session.summary.height(),
            session.interval_summaries.height(),
            session.strokes.height()
        );

        Ok(ParsedSessionFile { session, device })
    }

    fn extractor(&self) -> TableExtractor<'_> {
        TableExtractor::new(&self.document, &self.config, &self.normalizer)
    }
}
