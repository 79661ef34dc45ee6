//! Two-column signature grid

use crate::assets::{load_image, AssetKind, AssetWarning, SignatureRole, SignatureSet};
use crate::clauses;
use crate::styles::ContractStyles;
use pdf_core::flow::{CellContent, ImageBlock, Paragraph, ParagraphStyle, Table, TableStyle, VAlign};
use pdf_core::{Align, PdfDocument};

const CELL_PADDING: f64 = 2.0;

/// Builds the signature block placed in the document flow
///
/// Rows, top to bottom: buyer and first witness signatures, their
/// captions, a gap, seller and second witness signatures, their captions.
/// Signature rows always reserve the full box height, so the grid has
/// the same geometry with or without images.
#[derive(Debug, Clone)]
pub struct SignatureBlockComposer {
    column_width: f64,
    box_width: f64,
    box_height: f64,
    row_gap: f64,
    caption: ParagraphStyle,
}

impl SignatureBlockComposer {
    pub fn new(styles: &ContractStyles) -> Self {
        Self {
            column_width: styles.content_width() / 2.0,
            box_width: styles.signature_width,
            box_height: styles.signature_height,
            row_gap: styles.signature_row_gap,
            caption: styles.caption,
        }
    }

    /// Compose the grid
    ///
    /// `buyer_caption` is markup (already escaped) naming the buyer.
    /// Images that cannot be used become blank cells and are reported.
    pub fn compose(
        &self,
        doc: &mut PdfDocument,
        signatures: &SignatureSet,
        buyer_caption: &str,
    ) -> (Table, Vec<AssetWarning>) {
        let style = TableStyle {
            padding_top: CELL_PADDING,
            padding_bottom: CELL_PADDING,
            valign: VAlign::Bottom,
            image_align: Align::Center,
            align: Align::Left,
            ..TableStyle::default()
        };
        let mut table = Table::new(vec![self.column_width, self.column_width], style);
        let mut warnings = Vec::new();

        let mut signature_row = |table: &mut Table, left: SignatureRole, right: SignatureRole| {
            let cells = vec![
                self.signature_cell(doc, signatures, left, &mut warnings),
                self.signature_cell(doc, signatures, right, &mut warnings),
            ];
            table.push_row_with_min_height(cells, self.box_height);
        };

        signature_row(&mut table, SignatureRole::Buyer, SignatureRole::Witness1);
        table.push_row(vec![
            self.caption_cell(buyer_caption),
            self.caption_cell(clauses::CAPTION_WITNESS1),
        ]);
        table.push_row(vec![
            CellContent::Spacer(self.row_gap),
            CellContent::Spacer(self.row_gap),
        ]);
        signature_row(&mut table, SignatureRole::Seller, SignatureRole::Witness2);
        table.push_row(vec![
            self.caption_cell(clauses::CAPTION_SELLER),
            self.caption_cell(clauses::CAPTION_WITNESS2),
        ]);

        (table, warnings)
    }

    fn signature_cell(
        &self,
        doc: &mut PdfDocument,
        signatures: &SignatureSet,
        role: SignatureRole,
        warnings: &mut Vec<AssetWarning>,
    ) -> CellContent {
        let Some(path) = signatures.get(role) else {
            return CellContent::Spacer(self.box_height);
        };
        match load_image(doc, path) {
            Ok(handle) => {
                let image = ImageBlock::fit_box(handle, self.box_width, self.box_height)
                    .with_align(Align::Center);
                CellContent::Image(image)
            }
            Err(err) => {
                warnings.push(AssetWarning::new(AssetKind::Signature(role), &err));
                CellContent::Spacer(self.box_height)
            }
        }
    }

    fn caption_cell(&self, caption: &str) -> CellContent {
        let markup = format!("{}<br/>{}", clauses::SIGNATURE_LINE, caption);
        CellContent::Paragraph(Paragraph::new(&markup, self.caption))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdf_core::PageSize;

    fn composer() -> SignatureBlockComposer {
        SignatureBlockComposer::new(&ContractStyles::default())
    }

    #[test]
    fn test_grid_shape() {
        let mut doc = PdfDocument::new(PageSize::A4);
        let (table, warnings) = composer().compose(&mut doc, &SignatureSet::new(), "Comprador(a): X");

        assert!(warnings.is_empty());
        assert_eq!(table.rows.len(), 5);
        assert!(table.rows.iter().all(|row| row.len() == 2));
        assert_eq!(table.column_widths[0], table.column_widths[1]);
    }

    #[test]
    fn test_missing_images_keep_box_height() {
        let styles = ContractStyles::default();
        let mut doc = PdfDocument::new(PageSize::A4);
        let signatures = SignatureSet::new().with(SignatureRole::Seller, "/nonexistent/vendedor.png");
        let (table, warnings) = composer().compose(&mut doc, &signatures, "");

        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, AssetKind::Signature(SignatureRole::Seller));

        let heights = table.row_heights();
        let expected = styles.signature_height + 2.0 * CELL_PADDING;
        assert!((heights[0] - expected).abs() < 1e-9);
        assert!((heights[3] - expected).abs() < 1e-9);
    }

    #[test]
    fn test_captions_start_with_signature_line() {
        let mut doc = PdfDocument::new(PageSize::A4);
        let (table, _) = composer().compose(&mut doc, &SignatureSet::new(), "Comprador(a): Maria");

        let CellContent::Paragraph(caption) = &table.rows[1][0] else {
            panic!("expected a caption paragraph");
        };
        let lines: Vec<String> = caption.wrap(200.0).iter().map(|line| line.text()).collect();
        assert_eq!(lines, vec![clauses::SIGNATURE_LINE, "Comprador(a): Maria"]);
    }
}
