//! Attachment section appended after the contract

use crate::assets::{load_image, AssetKind, AssetWarning, AttachmentList};
use crate::clauses;
use crate::styles::ContractStyles;
use pdf_core::flow::{Block, ImageBlock, Paragraph, ParagraphStyle};
use pdf_core::units::cm;
use pdf_core::{Align, PdfDocument};

/// Blocks for the attached document images
#[derive(Debug, Clone)]
pub struct AttachmentAppender {
    heading: ParagraphStyle,
    image_width: f64,
    spacing: f64,
}

impl AttachmentAppender {
    pub fn new(styles: &ContractStyles) -> Self {
        Self {
            heading: styles.heading,
            image_width: styles.attachment_width,
            spacing: cm(1.0),
        }
    }

    /// Page break, heading, then every decodable image in list order
    ///
    /// An empty list contributes nothing. Images that cannot be used are
    /// skipped and reported.
    pub fn append(
        &self,
        doc: &mut PdfDocument,
        attachments: &AttachmentList,
    ) -> (Vec<Block>, Vec<AssetWarning>) {
        if attachments.is_empty() {
            return (Vec::new(), Vec::new());
        }

        let mut blocks = vec![
            Block::PageBreak,
            Paragraph::plain(clauses::ATTACHMENTS_HEADING, self.heading).into(),
            Block::Spacer(self.spacing),
        ];
        let mut warnings = Vec::new();

        for (index, path) in attachments.iter().enumerate() {
            match load_image(doc, path) {
                Ok(handle) => {
                    let image = ImageBlock::fit_width(handle, self.image_width)
                        .with_align(Align::Center);
                    blocks.push(image.into());
                    blocks.push(Block::Spacer(self.spacing));
                }
                Err(err) => warnings.push(AssetWarning::new(AssetKind::Attachment(index), &err)),
            }
        }

        log::debug!(
            "Attachment section: {} of {} images embedded",
            attachments.len() - warnings.len(),
            attachments.len()
        );
        (blocks, warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdf_core::PageSize;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_list_adds_nothing() {
        let appender = AttachmentAppender::new(&ContractStyles::default());
        let mut doc = PdfDocument::new(PageSize::A4);
        let (blocks, warnings) = appender.append(&mut doc, &AttachmentList::default());
        assert!(blocks.is_empty());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_unreadable_attachments_are_skipped() {
        let appender = AttachmentAppender::new(&ContractStyles::default());
        let mut doc = PdfDocument::new(PageSize::A4);
        let list: AttachmentList = ["/nonexistent/a.png", "/nonexistent/b.jpg"].into_iter().collect();
        let (blocks, warnings) = appender.append(&mut doc, &list);

        // The heading stays even when no image survives
        assert_eq!(blocks.len(), 3);
        assert!(blocks[0].is_page_break());
        let kinds: Vec<AssetKind> = warnings.iter().map(|w| w.kind).collect();
        assert_eq!(kinds, vec![AssetKind::Attachment(0), AssetKind::Attachment(1)]);
    }
}
