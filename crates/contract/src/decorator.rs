//! Watermark, logo and header rule painted on every page

use crate::assets::{load_image, AssetKind, AssetWarning};
use pdf_core::flow::{ImageBlock, PageDecorator, PageGeometry};
use pdf_core::units::cm;
use pdf_core::{Color, ImageHandle, PageCanvas, PdfDocument, StandardFont, TextRenderContext};
use std::path::Path;

const WATERMARK_GRAY: f32 = 0.90;
const WATERMARK_SIZE: f64 = 100.0;
const WATERMARK_ANGLE: f64 = 45.0;

/// Paints the page furniture
///
/// Built once per render. The logo is decoded up front, so painting a
/// page never touches the filesystem and never fails.
#[derive(Debug, Clone)]
pub struct ContractPageDecorator {
    watermark: String,
    logo: Option<ImageHandle>,
    logo_width: f64,
    /// Distance from the top edge to the bottom of the logo
    logo_offset: f64,
    /// Distance from the top edge to the header rule
    rule_offset: f64,
}

impl ContractPageDecorator {
    pub fn new(watermark: impl Into<String>) -> Self {
        Self {
            watermark: watermark.into(),
            logo: None,
            logo_width: cm(2.5),
            logo_offset: cm(3.0),
            rule_offset: cm(3.5),
        }
    }

    /// Load the logo into `doc`
    ///
    /// A missing or unreadable logo is not an error: the header is drawn
    /// without it and the returned warning says why.
    pub fn with_logo(
        mut self,
        doc: &mut PdfDocument,
        path: Option<&Path>,
    ) -> (Self, Option<AssetWarning>) {
        let Some(path) = path else {
            return (self, None);
        };
        match load_image(doc, path) {
            Ok(handle) => {
                self.logo = Some(handle);
                (self, None)
            }
            Err(err) => {
                let warning = AssetWarning::new(AssetKind::Logo, &err);
                (self, Some(warning))
            }
        }
    }

    pub fn has_logo(&self) -> bool {
        self.logo.is_some()
    }

    pub fn watermark(&self) -> &str {
        &self.watermark
    }
}

impl PageDecorator for ContractPageDecorator {
    fn decorate(&self, canvas: &mut PageCanvas, geometry: &PageGeometry) {
        let size = geometry.page_size;

        if !self.watermark.is_empty() {
            let ctx = TextRenderContext {
                color: Color::gray(WATERMARK_GRAY),
                ..TextRenderContext::new(StandardFont::HelveticaBold, WATERMARK_SIZE)
            };
            canvas.save_state();
            canvas.draw_centred_rotated_text(
                &self.watermark,
                size.width / 2.0,
                size.height / 2.0,
                WATERMARK_ANGLE,
                &ctx,
            );
            canvas.restore_state();
        }

        if let Some(logo) = self.logo {
            let block = ImageBlock::fit_width(logo, self.logo_width);
            canvas.draw_image(
                logo,
                geometry.content_left(),
                size.height - self.logo_offset,
                block.width,
                block.height,
            );
        }

        let rule_y = size.height - self.rule_offset;
        canvas.save_state();
        canvas.set_stroke_color(Color::black());
        canvas.draw_line(geometry.content_left(), rule_y, geometry.content_right(), rule_y);
        canvas.restore_state();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdf_core::flow::Margins;
    use pdf_core::PageSize;

    fn geometry() -> PageGeometry {
        PageGeometry {
            page_number: 1,
            page_size: PageSize::A4,
            margins: Margins::new(cm(4.0), cm(2.0), cm(2.0), cm(2.0)),
        }
    }

    fn content(canvas: &PageCanvas) -> String {
        String::from_utf8_lossy(canvas.content()).into_owned()
    }

    #[test]
    fn test_watermark_then_rule() {
        let decorator = ContractPageDecorator::new("COMETA");
        let mut canvas = PageCanvas::new(PageSize::A4);
        decorator.decorate(&mut canvas, &geometry());

        let ops = content(&canvas);
        let mark = ops.find("(COMETA) Tj").unwrap();
        let rule = ops.find(" l\nS\n").unwrap();
        assert!(mark < rule);
        assert!(ops.contains("0.9 0.9 0.9 rg"));
        assert!(ops.contains("/F2 100 Tf"));
        assert!(!ops.contains(" Do\n"));
    }

    #[test]
    fn test_missing_logo_is_a_warning() {
        let mut doc = PdfDocument::new(PageSize::A4);
        let (decorator, warning) = ContractPageDecorator::new("COMETA")
            .with_logo(&mut doc, Some(Path::new("/nonexistent/logo.png")));

        assert!(!decorator.has_logo());
        let warning = warning.unwrap();
        assert_eq!(warning.kind, AssetKind::Logo);
    }

    #[test]
    fn test_no_logo_configured() {
        let mut doc = PdfDocument::new(PageSize::A4);
        let (decorator, warning) = ContractPageDecorator::new("X").with_logo(&mut doc, None);
        assert!(!decorator.has_logo());
        assert!(warning.is_none());
    }

    #[test]
    fn test_decoration_is_repeatable() {
        let decorator = ContractPageDecorator::new("COMETA");
        let mut first = PageCanvas::new(PageSize::A4);
        let mut second = PageCanvas::new(PageSize::A4);
        decorator.decorate(&mut first, &geometry());
        decorator.decorate(&mut second, &geometry());
        assert_eq!(first.content(), second.content());
    }

    #[test]
    fn test_empty_watermark_draws_only_rule() {
        let decorator = ContractPageDecorator::new("");
        let mut canvas = PageCanvas::new(PageSize::A4);
        decorator.decorate(&mut canvas, &geometry());
        assert!(!content(&canvas).contains("Tj"));
    }
}
