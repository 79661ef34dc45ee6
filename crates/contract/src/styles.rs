//! Page geometry and paragraph styles of the contract

use pdf_core::flow::{FlowLayout, Margins, ParagraphStyle};
use pdf_core::units::cm;
use pdf_core::{Align, PageSize, StandardFont};

/// Everything that fixes how the contract looks
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContractStyles {
    pub page_size: PageSize,
    pub margins: Margins,
    pub title: ParagraphStyle,
    pub body: ParagraphStyle,
    /// Centred body text (the date line)
    pub centred: ParagraphStyle,
    /// Section heading
    pub heading: ParagraphStyle,
    pub caption: ParagraphStyle,
    /// Box a signature image is fitted into
    pub signature_width: f64,
    pub signature_height: f64,
    /// Gap between the two signature row pairs
    pub signature_row_gap: f64,
    pub attachment_width: f64,
}

impl Default for ContractStyles {
    fn default() -> Self {
        let body = ParagraphStyle {
            font: StandardFont::Helvetica,
            font_size: 11.0,
            leading: 14.0,
            align: Align::Justify,
            ..ParagraphStyle::default()
        };

        Self {
            page_size: PageSize::A4,
            margins: Margins::new(cm(4.0), cm(2.0), cm(2.0), cm(2.0)),
            title: ParagraphStyle {
                font: StandardFont::HelveticaBold,
                font_size: 12.0,
                leading: 15.0,
                align: Align::Center,
                space_after: 20.0,
                ..ParagraphStyle::default()
            },
            body,
            centred: ParagraphStyle {
                align: Align::Center,
                ..body
            },
            heading: ParagraphStyle {
                font: StandardFont::HelveticaBold,
                font_size: 11.0,
                leading: 14.0,
                align: Align::Left,
                space_before: 12.0,
                space_after: 4.0,
                ..ParagraphStyle::default()
            },
            caption: ParagraphStyle {
                font_size: 9.0,
                leading: 12.0,
                align: Align::Center,
                ..body
            },
            signature_width: cm(5.0),
            signature_height: cm(2.5),
            signature_row_gap: cm(2.0),
            attachment_width: cm(16.0),
        }
    }
}

impl ContractStyles {
    pub fn layout(&self) -> FlowLayout {
        FlowLayout::new(self.page_size, self.margins)
    }

    /// Width of the text frame
    pub fn content_width(&self) -> f64 {
        self.page_size.width - self.margins.left - self.margins.right
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_a4_frame() {
        let styles = ContractStyles::default();
        assert!((styles.content_width() - cm(17.0)).abs() < 0.01);
        assert!(styles.attachment_width < styles.content_width());
        assert_eq!(styles.layout().content_width(), styles.content_width());
    }

    #[test]
    fn test_body_is_justified() {
        let styles = ContractStyles::default();
        assert_eq!(styles.body.align, Align::Justify);
        assert_eq!(styles.centred.font_size, styles.body.font_size);
        assert_eq!(styles.heading.font, StandardFont::HelveticaBold);
    }
}
