//! Pagination of blocks onto pages

use super::image::ImageBlock;
use super::paragraph::{place_line, Line, ParagraphStyle};
use super::table::{CellContent, Table};
use super::Block;
use crate::canvas::{Color, PageCanvas};
use crate::document::{ImageHandle, PageSize, PdfDocument};
use crate::font::StandardFont;
use crate::text::{calculate_x_offset, TextRenderContext};
use crate::{PdfError, Result};

/// Slack when deciding whether something fits, in points
const FIT_EPSILON: f64 = 1e-6;

/// Page margins in points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margins {
    pub fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }
}

/// Where a page's content frame sits, handed to the decorator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    /// 1-indexed
    pub page_number: usize,
    pub page_size: PageSize,
    pub margins: Margins,
}

impl PageGeometry {
    pub fn content_left(&self) -> f64 {
        self.margins.left
    }

    pub fn content_right(&self) -> f64 {
        self.page_size.width - self.margins.right
    }

    /// Top edge of the frame (PDF coordinates, from bottom)
    pub fn content_top(&self) -> f64 {
        self.page_size.height - self.margins.top
    }

    pub fn content_bottom(&self) -> f64 {
        self.margins.bottom
    }

    pub fn content_width(&self) -> f64 {
        self.content_right() - self.content_left()
    }

    pub fn content_height(&self) -> f64 {
        self.content_top() - self.content_bottom()
    }
}

/// Paints page furniture (watermarks, headers) before the page content
pub trait PageDecorator {
    fn decorate(&self, canvas: &mut PageCanvas, geometry: &PageGeometry);
}

impl<F> PageDecorator for F
where
    F: Fn(&mut PageCanvas, &PageGeometry),
{
    fn decorate(&self, canvas: &mut PageCanvas, geometry: &PageGeometry) {
        self(canvas, geometry)
    }
}

/// Decorator that draws nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDecoration;

impl PageDecorator for NoDecoration {
    fn decorate(&self, _canvas: &mut PageCanvas, _geometry: &PageGeometry) {}
}

/// A positioned drawing operation
#[derive(Debug, Clone, PartialEq)]
pub enum PlacedItem {
    /// Text with its baseline starting at (x, y)
    Text {
        x: f64,
        y: f64,
        text: String,
        font: StandardFont,
        font_size: f64,
        word_spacing: f64,
        color: Color,
    },
    /// Image with its lower-left corner at (x, y)
    Image {
        handle: ImageHandle,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
}

/// Content of one laid-out page
#[derive(Debug, Clone, PartialEq)]
pub struct LaidOutPage {
    /// 1-indexed
    pub number: usize,
    pub items: Vec<PlacedItem>,
}

impl LaidOutPage {
    /// Text of the page, one entry per visual line, top to bottom
    pub fn lines(&self) -> Vec<String> {
        let mut lines: Vec<(f64, String)> = Vec::new();
        for item in &self.items {
            if let PlacedItem::Text { y, text, .. } = item {
                match lines.last_mut() {
                    Some((line_y, line)) if (*line_y - *y).abs() < FIT_EPSILON => {
                        line.push_str(text)
                    }
                    _ => lines.push((*y, text.clone())),
                }
            }
        }
        lines.into_iter().map(|(_, line)| line).collect()
    }

    /// Whether any single line contains `needle`
    pub fn contains_text(&self, needle: &str) -> bool {
        self.lines().iter().any(|line| line.contains(needle))
    }

    /// Images in drawing order
    pub fn images(&self) -> Vec<(ImageHandle, f64, f64)> {
        self.items
            .iter()
            .filter_map(|item| match item {
                PlacedItem::Image {
                    handle,
                    width,
                    height,
                    ..
                } => Some((*handle, *width, *height)),
                PlacedItem::Text { .. } => None,
            })
            .collect()
    }

    pub fn image_count(&self) -> usize {
        self.images().len()
    }
}

/// Flow layout engine for pages of one size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowLayout {
    pub page_size: PageSize,
    pub margins: Margins,
}

impl FlowLayout {
    pub fn new(page_size: PageSize, margins: Margins) -> Self {
        Self { page_size, margins }
    }

    pub fn geometry(&self, page_number: usize) -> PageGeometry {
        PageGeometry {
            page_number,
            page_size: self.page_size,
            margins: self.margins,
        }
    }

    pub fn content_width(&self) -> f64 {
        self.geometry(1).content_width()
    }

    pub fn content_height(&self) -> f64 {
        self.geometry(1).content_height()
    }

    /// Position `blocks` on as many pages as they need
    ///
    /// Always returns at least one page.
    pub fn layout(&self, blocks: &[Block]) -> Result<Vec<LaidOutPage>> {
        if self.content_width() <= 0.0 || self.content_height() <= 0.0 {
            return Err(PdfError::LayoutError(format!(
                "Margins leave no room on a {}x{} page",
                self.page_size.width, self.page_size.height
            )));
        }

        let mut cursor = PageCursor::new(self);
        for block in blocks {
            match block {
                Block::Paragraph(paragraph) => {
                    let lines = paragraph.wrap(self.content_width());
                    cursor.add_paragraph(&lines, &paragraph.style);
                }
                Block::Spacer(height) => cursor.add_spacer(*height),
                Block::Image(image) => cursor.add_image(image),
                Block::Table(table) => cursor.add_table(table),
                Block::PageBreak => {
                    if !cursor.at_top() {
                        cursor.new_page();
                    }
                }
            }
        }

        let pages = cursor.finish();
        log::debug!("Laid out {} blocks on {} pages", blocks.len(), pages.len());
        Ok(pages)
    }

    /// Draw laid-out pages into `doc`, decorating each page first
    ///
    /// # Returns
    /// Number of pages added
    pub fn render(
        &self,
        pages: &[LaidOutPage],
        decorator: &dyn PageDecorator,
        doc: &mut PdfDocument,
    ) -> Result<usize> {
        if doc.page_size() != self.page_size {
            return Err(PdfError::LayoutError(
                "Document page size differs from the layout page size".to_string(),
            ));
        }

        for page in pages {
            let mut canvas = PageCanvas::new(self.page_size);
            decorator.decorate(&mut canvas, &self.geometry(page.number));

            for item in &page.items {
                match item {
                    PlacedItem::Text {
                        x,
                        y,
                        text,
                        font,
                        font_size,
                        word_spacing,
                        color,
                    } => {
                        let ctx = TextRenderContext {
                            font: *font,
                            font_size: *font_size,
                            color: *color,
                            word_spacing: *word_spacing,
                        };
                        canvas.draw_text(text, *x, *y, &ctx);
                    }
                    PlacedItem::Image {
                        handle,
                        x,
                        y,
                        width,
                        height,
                    } => canvas.draw_image(*handle, *x, *y, *width, *height),
                }
            }

            doc.add_page(&canvas)?;
        }
        Ok(pages.len())
    }

    /// Layout followed by render
    pub fn build(
        &self,
        blocks: &[Block],
        decorator: &dyn PageDecorator,
        doc: &mut PdfDocument,
    ) -> Result<Vec<LaidOutPage>> {
        let pages = self.layout(blocks)?;
        self.render(&pages, decorator, doc)?;
        Ok(pages)
    }
}

/// Tracks the current page and how far down it is filled
struct PageCursor {
    geometry: PageGeometry,
    pages: Vec<LaidOutPage>,
    items: Vec<PlacedItem>,
    /// Top of the free space (PDF coordinates)
    y: f64,
    /// Nothing, not even a spacer, has been placed on this page yet
    fresh: bool,
}

impl PageCursor {
    fn new(layout: &FlowLayout) -> Self {
        let geometry = layout.geometry(1);
        Self {
            geometry,
            pages: Vec::new(),
            items: Vec::new(),
            y: geometry.content_top(),
            fresh: true,
        }
    }

    fn at_top(&self) -> bool {
        self.fresh
    }

    fn remaining(&self) -> f64 {
        (self.y - self.geometry.content_bottom()).max(0.0)
    }

    fn fits(&self, height: f64) -> bool {
        height <= self.remaining() + FIT_EPSILON
    }

    fn new_page(&mut self) {
        self.pages.push(LaidOutPage {
            number: self.geometry.page_number,
            items: std::mem::take(&mut self.items),
        });
        self.geometry.page_number += 1;
        self.y = self.geometry.content_top();
        self.fresh = true;
    }

    fn advance(&mut self, height: f64) {
        self.y = (self.y - height).max(self.geometry.content_bottom());
        self.fresh = false;
    }

    fn finish(mut self) -> Vec<LaidOutPage> {
        if self.pages.is_empty() || !self.fresh {
            self.new_page();
        }
        self.pages
    }

    fn add_spacer(&mut self, height: f64) {
        if self.fits(height) {
            self.advance(height);
        } else {
            // The gap swallows the rest of the page; it never carries over
            self.advance(self.remaining());
        }
    }

    fn add_paragraph(&mut self, lines: &[Line], style: &ParagraphStyle) {
        // Space before is dropped at the top of a page
        if !self.at_top() {
            if self.fits(style.space_before) {
                self.advance(style.space_before);
            } else {
                self.new_page();
            }
        }

        let mut index = 0;
        while index < lines.len() {
            let mut fit = ((self.remaining() + FIT_EPSILON) / style.leading).floor() as usize;
            if fit == 0 {
                if self.at_top() {
                    // A line taller than the frame still has to go somewhere
                    fit = 1;
                } else {
                    self.new_page();
                    continue;
                }
            }

            let end = (index + fit).min(lines.len());
            let left = self.geometry.content_left();
            let width = self.geometry.content_width();
            for line in &lines[index..end] {
                place_text_line(&mut self.items, line, style, left, width, self.y);
                self.advance(style.leading);
            }

            index = end;
            if index < lines.len() {
                self.new_page();
            }
        }

        if !lines.is_empty() || !self.at_top() {
            self.advance(style.space_after.min(self.remaining()));
        }
    }

    fn add_image(&mut self, image: &ImageBlock) {
        let fitted = image.shrink_to(
            self.geometry.content_width(),
            self.geometry.content_height(),
        );
        if fitted != *image {
            log::debug!(
                "Image {} shrunk from {:.1}x{:.1} to {:.1}x{:.1} to fit the page",
                image.handle.resource_name(),
                image.width,
                image.height,
                fitted.width,
                fitted.height
            );
        }

        if !self.fits(fitted.height) && !self.at_top() {
            self.new_page();
        }

        let x = self.geometry.content_left()
            + calculate_x_offset(fitted.width, self.geometry.content_width(), fitted.align);
        self.items.push(PlacedItem::Image {
            handle: fitted.handle,
            x,
            y: self.y - fitted.height,
            width: fitted.width,
            height: fitted.height,
        });
        self.advance(fitted.height);
    }

    fn add_table(&mut self, table: &Table) {
        let row_heights = table.row_heights();
        let table_x = self.geometry.content_left()
            + calculate_x_offset(table.width(), self.geometry.content_width(), table.style.align);

        for (row, row_height) in table.rows.iter().zip(row_heights) {
            if !self.fits(row_height) && !self.at_top() {
                self.new_page();
            }
            if row_height > self.geometry.content_height() {
                log::warn!(
                    "Table row of {row_height:.1}pt is taller than the page frame and will overflow"
                );
            }

            let mut cell_x = table_x;
            for (column, cell) in row.iter().enumerate() {
                let column_width = table.column_widths.get(column).copied().unwrap_or(0.0);
                let content_width = table.content_width(column);
                let content_x = cell_x + table.style.padding_left;
                let content_top = self.y
                    - table.style.padding_top
                    - table.valign_offset(row_height, cell.height(content_width));

                match cell {
                    CellContent::Empty | CellContent::Spacer(_) => {}
                    CellContent::Paragraph(paragraph) => {
                        let mut top = content_top;
                        for line in paragraph.wrap(content_width) {
                            place_text_line(
                                &mut self.items,
                                &line,
                                &paragraph.style,
                                content_x,
                                content_width,
                                top,
                            );
                            top -= paragraph.style.leading;
                        }
                    }
                    CellContent::Image(image) => {
                        let x = content_x
                            + calculate_x_offset(image.width, content_width, table.style.image_align);
                        self.items.push(PlacedItem::Image {
                            handle: image.handle,
                            x,
                            y: content_top - image.height,
                            width: image.width,
                            height: image.height,
                        });
                    }
                }
                cell_x += column_width;
            }

            self.advance(row_height);
        }
    }
}

/// Push the text items of one line whose line box starts at `top`
fn place_text_line(
    items: &mut Vec<PlacedItem>,
    line: &Line,
    style: &ParagraphStyle,
    x: f64,
    width: f64,
    top: f64,
) {
    let baseline = top - style.font_size;
    for fragment in place_line(line, style, x, width) {
        if fragment.text.is_empty() {
            continue;
        }
        items.push(PlacedItem::Text {
            x: fragment.x,
            y: baseline,
            text: fragment.text,
            font: fragment.font,
            font_size: style.font_size,
            word_spacing: fragment.word_spacing,
            color: style.color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::{Paragraph, TableStyle, VAlign};
    use crate::Align;
    use pretty_assertions::assert_eq;
    use std::cell::Cell;

    /// 200 x 200 page with a 100 x 100 frame
    fn small_layout() -> FlowLayout {
        FlowLayout::new(PageSize::new(200.0, 200.0), Margins::uniform(50.0))
    }

    fn style() -> ParagraphStyle {
        ParagraphStyle {
            font_size: 10.0,
            leading: 20.0,
            ..ParagraphStyle::default()
        }
    }

    fn handle(width: u32, height: u32) -> ImageHandle {
        ImageHandle { id: 1, width, height }
    }

    fn numbered_lines(count: usize) -> Paragraph {
        let markup = (1..=count)
            .map(|i| format!("linha{i}"))
            .collect::<Vec<_>>()
            .join("<br/>");
        Paragraph::new(&markup, style())
    }

    #[test]
    fn test_empty_input_gives_one_page() {
        let pages = small_layout().layout(&[]).unwrap();
        assert_eq!(pages.len(), 1);
        assert!(pages[0].items.is_empty());
    }

    #[test]
    fn test_invalid_margins() {
        let layout = FlowLayout::new(PageSize::new(100.0, 100.0), Margins::uniform(60.0));
        assert!(matches!(layout.layout(&[]), Err(PdfError::LayoutError(_))));
    }

    #[test]
    fn test_first_baseline_position() {
        let pages = small_layout()
            .layout(&[Block::Paragraph(Paragraph::new("olá", style()))])
            .unwrap();
        match &pages[0].items[0] {
            PlacedItem::Text { x, y, .. } => {
                assert_eq!(*x, 50.0);
                assert_eq!(*y, 140.0);
            }
            other => panic!("unexpected item {other:?}"),
        }
    }

    #[test]
    fn test_paragraph_splits_across_pages() {
        // 5 lines of 20pt fit in a 100pt frame
        let pages = small_layout()
            .layout(&[Block::Paragraph(numbered_lines(7))])
            .unwrap();

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].lines().len(), 5);
        assert_eq!(pages[1].lines(), vec!["linha6", "linha7"]);
        assert_eq!(pages[1].number, 2);
    }

    #[test]
    fn test_page_break() {
        let blocks = vec![
            Block::Paragraph(Paragraph::new("um", style())),
            Block::PageBreak,
            Block::PageBreak,
            Block::Paragraph(Paragraph::new("dois", style())),
        ];
        let pages = small_layout().layout(&blocks).unwrap();

        assert_eq!(pages.len(), 2);
        assert!(pages[1].contains_text("dois"));
    }

    #[test]
    fn test_leading_page_break_is_ignored() {
        let blocks = vec![
            Block::PageBreak,
            Block::Paragraph(Paragraph::new("um", style())),
        ];
        assert_eq!(small_layout().layout(&blocks).unwrap().len(), 1);
    }

    #[test]
    fn test_trailing_page_break_adds_no_blank_page() {
        let blocks = vec![
            Block::Paragraph(Paragraph::new("um", style())),
            Block::PageBreak,
        ];
        assert_eq!(small_layout().layout(&blocks).unwrap().len(), 1);
    }

    #[test]
    fn test_overflowing_spacer_does_not_carry_over() {
        let blocks = vec![
            Block::Paragraph(numbered_lines(3)),
            Block::Spacer(80.0),
            Block::Paragraph(Paragraph::new("depois", style())),
        ];
        let pages = small_layout().layout(&blocks).unwrap();

        assert_eq!(pages.len(), 2);
        // "depois" starts at the very top of page 2
        match &pages[1].items[0] {
            PlacedItem::Text { y, .. } => assert_eq!(*y, 140.0),
            other => panic!("unexpected item {other:?}"),
        }
    }

    #[test]
    fn test_image_moves_to_next_page() {
        let blocks = vec![
            Block::Paragraph(numbered_lines(3)),
            Block::Image(ImageBlock::fit_width(handle(100, 50), 100.0)),
        ];
        let pages = small_layout().layout(&blocks).unwrap();

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].image_count(), 0);
        assert_eq!(pages[1].image_count(), 1);
    }

    #[test]
    fn test_oversized_image_is_shrunk_to_frame() {
        let blocks = vec![Block::Image(ImageBlock::fit_width(handle(100, 300), 100.0))];
        let pages = small_layout().layout(&blocks).unwrap();

        assert_eq!(pages.len(), 1);
        let (_, width, height) = pages[0].images()[0];
        assert!((height - 100.0).abs() < 1e-9);
        assert!((width - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_centred_image() {
        let image = ImageBlock::fit_width(handle(10, 10), 40.0).with_align(Align::Center);
        let pages = small_layout().layout(&[Block::Image(image)]).unwrap();
        match pages[0].items[0] {
            PlacedItem::Image { x, y, .. } => {
                assert_eq!(x, 80.0);
                assert_eq!(y, 110.0);
            }
            ref other => panic!("unexpected item {other:?}"),
        }
    }

    #[test]
    fn test_table_splits_between_rows() {
        let style = TableStyle {
            padding_top: 0.0,
            padding_bottom: 0.0,
            valign: VAlign::Bottom,
            ..TableStyle::default()
        };
        let mut table = Table::new(vec![50.0, 50.0], style);
        for i in 0..3 {
            table.push_row(vec![
                CellContent::Paragraph(Paragraph::new(&format!("a{i}"), self::style())),
                CellContent::Spacer(40.0),
            ]);
        }
        let pages = small_layout().layout(&[Block::Table(table)]).unwrap();

        // Rows are 40pt tall: two fit on the first page
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].lines(), vec!["a0", "a1"]);
        assert_eq!(pages[1].lines(), vec!["a2"]);
    }

    #[test]
    fn test_bottom_aligned_cells_share_baseline() {
        let style = TableStyle {
            padding_top: 0.0,
            padding_bottom: 0.0,
            valign: VAlign::Bottom,
            ..TableStyle::default()
        };
        let mut table = Table::new(vec![50.0, 50.0], style);
        table.push_row(vec![
            CellContent::Image(ImageBlock::fit_width(handle(10, 10), 30.0)),
            CellContent::Spacer(10.0),
        ]);
        let pages = small_layout().layout(&[Block::Table(table)]).unwrap();

        match pages[0].items[0] {
            // Row is 30pt tall and starts at the frame top (150)
            PlacedItem::Image { y, height, .. } => assert_eq!(y + height, 150.0),
            ref other => panic!("unexpected item {other:?}"),
        }
    }

    #[test]
    fn test_render_decorates_each_page_once() {
        let layout = small_layout();
        let pages = layout.layout(&[Block::Paragraph(numbered_lines(12))]).unwrap();
        assert_eq!(pages.len(), 3);

        let calls = Cell::new(0);
        let seen = std::cell::RefCell::new(Vec::new());
        let decorator = |canvas: &mut PageCanvas, geometry: &PageGeometry| {
            assert!(canvas.is_empty(), "decorator must run before content");
            calls.set(calls.get() + 1);
            seen.borrow_mut().push(geometry.page_number);
        };

        let mut doc = PdfDocument::new(layout.page_size);
        let added = layout.render(&pages, &decorator, &mut doc).unwrap();

        assert_eq!(added, 3);
        assert_eq!(calls.get(), 3);
        assert_eq!(*seen.borrow(), vec![1, 2, 3]);
        assert_eq!(doc.page_count(), 3);
    }

    #[test]
    fn test_render_rejects_mismatched_page_size() {
        let layout = small_layout();
        let pages = layout.layout(&[]).unwrap();
        let mut doc = PdfDocument::new(PageSize::A4);
        assert!(matches!(
            layout.render(&pages, &NoDecoration, &mut doc),
            Err(PdfError::LayoutError(_))
        ));
    }
}
