//! Assembling and writing the contract

use crate::assets::{AssetKind, AssetWarning, AttachmentList, SignatureSet};
use crate::attachments::AttachmentAppender;
use crate::binder::TemplateBinder;
use crate::clauses;
use crate::decorator::ContractPageDecorator;
use crate::record::ClientRecord;
use crate::signature::SignatureBlockComposer;
use crate::styles::ContractStyles;
use crate::{RenderError, Result};
use chrono::{Local, NaiveDate};
use pdf_core::flow::{Block, LaidOutPage, Paragraph};
use pdf_core::units::cm;
use pdf_core::PdfDocument;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Renderer settings
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Logo drawn in the page header; skipped with a warning when unusable
    pub logo_path: Option<PathBuf>,
    /// Diagonal text behind every page
    pub watermark: String,
    pub styles: ContractStyles,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            logo_path: Some(PathBuf::from("logo.png")),
            watermark: clauses::WATERMARK.to_string(),
            styles: ContractStyles::default(),
        }
    }
}

/// The contract as flow blocks, ready for layout
#[derive(Debug, Clone)]
pub struct Composition {
    pub blocks: Vec<Block>,
    pub decorator: ContractPageDecorator,
    pub attachments_embedded: usize,
    pub warnings: Vec<AssetWarning>,
}

/// Outcome of a successful render
#[derive(Debug, Clone, PartialEq)]
pub struct RenderReport {
    pub page_count: usize,
    pub attachments_embedded: usize,
    /// Assets that were skipped or replaced by blank space
    pub warnings: Vec<AssetWarning>,
}

impl RenderReport {
    /// Warnings about one kind of asset
    pub fn warnings_for(&self, kind: AssetKind) -> impl Iterator<Item = &AssetWarning> {
        self.warnings.iter().filter(move |w| w.kind == kind)
    }
}

/// Renders credit sale contracts
///
/// Holds only immutable options, so one renderer can be shared between
/// threads. Concurrent renders need distinct output paths.
#[derive(Debug, Clone, Default)]
pub struct ContractRenderer {
    options: RenderOptions,
}

impl ContractRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Build the block sequence, embedding images into `doc`
    pub fn compose(
        &self,
        doc: &mut PdfDocument,
        record: &ClientRecord,
        signatures: &SignatureSet,
        attachments: &AttachmentList,
        date: NaiveDate,
    ) -> Composition {
        let styles = &self.options.styles;
        let binder = TemplateBinder::new(record, date);
        let mut warnings = Vec::new();

        let (decorator, logo_warning) = ContractPageDecorator::new(self.options.watermark.as_str())
            .with_logo(doc, self.options.logo_path.as_deref());
        warnings.extend(logo_warning);

        let (signature_table, signature_warnings) =
            SignatureBlockComposer::new(styles).compose(doc, signatures, &binder.buyer_caption());
        warnings.extend(signature_warnings);

        let mut blocks: Vec<Block> = vec![
            Paragraph::plain(clauses::TITLE, styles.title).into(),
            Paragraph::new(&binder.body(), styles.body).into(),
            Block::Spacer(cm(2.0)),
            Paragraph::plain(clauses::CLOSING, styles.body).into(),
            Block::Spacer(cm(1.0)),
            Paragraph::new(&binder.date_line(), styles.centred).into(),
            Block::Spacer(cm(2.0)),
            Block::Table(signature_table),
            Block::Spacer(cm(1.0)),
            Paragraph::new(&binder.registration_notice(), styles.body).into(),
        ];

        let (attachment_blocks, attachment_warnings) =
            AttachmentAppender::new(styles).append(doc, attachments);
        let attachments_embedded = attachments.len() - attachment_warnings.len();
        blocks.extend(attachment_blocks);
        warnings.extend(attachment_warnings);

        Composition {
            blocks,
            decorator,
            attachments_embedded,
            warnings,
        }
    }

    /// Compose, lay out and draw the contract into a new document
    fn build(
        &self,
        record: &ClientRecord,
        signatures: &SignatureSet,
        attachments: &AttachmentList,
        date: NaiveDate,
    ) -> Result<(PdfDocument, Vec<LaidOutPage>, RenderReport)> {
        let styles = &self.options.styles;
        let mut doc = PdfDocument::new(styles.page_size);
        doc.set_title(clauses::TITLE);

        let composition = self.compose(&mut doc, record, signatures, attachments, date);
        let pages = styles
            .layout()
            .build(&composition.blocks, &composition.decorator, &mut doc)?;

        let report = RenderReport {
            page_count: pages.len(),
            attachments_embedded: composition.attachments_embedded,
            warnings: composition.warnings,
        };
        Ok((doc, pages, report))
    }

    /// Lay out the contract without producing a file
    pub fn layout_on(
        &self,
        date: NaiveDate,
        record: &ClientRecord,
        signatures: &SignatureSet,
        attachments: &AttachmentList,
    ) -> Result<Vec<LaidOutPage>> {
        let (_, pages, _) = self.build(record, signatures, attachments, date)?;
        Ok(pages)
    }

    /// Render to PDF bytes
    pub fn render_to_bytes(
        &self,
        date: NaiveDate,
        record: &ClientRecord,
        signatures: &SignatureSet,
        attachments: &AttachmentList,
    ) -> Result<(Vec<u8>, RenderReport)> {
        let (mut doc, _, report) = self.build(record, signatures, attachments, date)?;
        let bytes = doc.to_bytes()?;
        Ok((bytes, report))
    }

    /// Render with an explicit contract date and write `output` atomically
    ///
    /// The file only appears at `output` once it is complete. On failure
    /// nothing is left behind.
    pub fn render_on(
        &self,
        date: NaiveDate,
        record: &ClientRecord,
        signatures: &SignatureSet,
        attachments: &AttachmentList,
        output: impl AsRef<Path>,
    ) -> Result<RenderReport> {
        let output = output.as_ref();
        let (bytes, report) = self.render_to_bytes(date, record, signatures, attachments)?;
        write_atomically(output, &bytes)?;

        log::info!(
            "Contract written to {} ({} pages, {} attachments, {} warnings)",
            output.display(),
            report.page_count,
            report.attachments_embedded,
            report.warnings.len()
        );
        Ok(report)
    }

    /// Render dated today (local time) and write `output` atomically
    pub fn render(
        &self,
        record: &ClientRecord,
        signatures: &SignatureSet,
        attachments: &AttachmentList,
        output: impl AsRef<Path>,
    ) -> Result<RenderReport> {
        let today = Local::now().date_naive();
        self.render_on(today, record, signatures, attachments, output)
    }
}

fn write_atomically(output: &Path, bytes: &[u8]) -> Result<()> {
    let io_error = |source: std::io::Error| RenderError::Io {
        path: output.to_path_buf(),
        source,
    };
    let dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    // Dropping the temp file on any early return deletes it
    let mut temp = tempfile::NamedTempFile::new_in(dir).map_err(io_error)?;
    temp.write_all(bytes).map_err(io_error)?;
    temp.as_file().sync_all().map_err(io_error)?;
    temp.persist(output).map_err(|err| io_error(err.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 7).unwrap()
    }

    fn renderer() -> ContractRenderer {
        ContractRenderer::new(RenderOptions {
            logo_path: None,
            ..RenderOptions::default()
        })
    }

    #[test]
    fn test_block_order() {
        let mut doc = PdfDocument::new(pdf_core::PageSize::A4);
        let composition = renderer().compose(
            &mut doc,
            &ClientRecord::default(),
            &SignatureSet::default(),
            &AttachmentList::default(),
            date(),
        );

        let kinds: Vec<&str> = composition
            .blocks
            .iter()
            .map(|block| match block {
                Block::Paragraph(_) => "paragraph",
                Block::Spacer(_) => "spacer",
                Block::Image(_) => "image",
                Block::Table(_) => "table",
                Block::PageBreak => "break",
            })
            .collect();
        assert_eq!(
            kinds,
            vec![
                "paragraph", "paragraph", "spacer", "paragraph", "spacer", "paragraph", "spacer",
                "table", "spacer", "paragraph"
            ]
        );
        assert!(composition.warnings.is_empty());
        assert_eq!(composition.attachments_embedded, 0);
    }

    #[test]
    fn test_default_options() {
        let options = RenderOptions::default();
        assert_eq!(options.logo_path, Some(PathBuf::from("logo.png")));
        assert_eq!(options.watermark, "COMETA");
    }

    #[test]
    fn test_write_atomically_replaces_target() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contrato.pdf");
        std::fs::write(&path, b"old").unwrap();

        write_atomically(&path, b"new").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"new");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nao_existe").join("contrato.pdf");

        let err = write_atomically(&path, b"data").unwrap_err();
        assert!(matches!(err, RenderError::Io { .. }));
        assert!(!path.exists());
    }
}
