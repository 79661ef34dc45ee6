//! Grid tables whose rows flow like blocks

use super::image::ImageBlock;
use super::paragraph::Paragraph;
use crate::Align;

/// Vertical alignment of content inside a cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VAlign {
    #[default]
    Top,
    Middle,
    Bottom,
}

/// Content of one table cell
#[derive(Debug, Clone, PartialEq)]
pub enum CellContent {
    Empty,
    Paragraph(Paragraph),
    Image(ImageBlock),
    /// Reserves vertical space and draws nothing
    Spacer(f64),
}

impl CellContent {
    /// Height of the content laid out in a cell `width` wide
    pub fn height(&self, width: f64) -> f64 {
        match self {
            CellContent::Empty => 0.0,
            CellContent::Paragraph(paragraph) => paragraph.height(width),
            CellContent::Image(image) => image.height,
            CellContent::Spacer(height) => *height,
        }
    }
}

/// Cell layout shared by every cell of a table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableStyle {
    pub padding_top: f64,
    pub padding_bottom: f64,
    pub padding_left: f64,
    pub padding_right: f64,
    pub valign: VAlign,
    /// Horizontal alignment of images inside their cell
    pub image_align: Align,
    /// Position of the whole table in the frame
    pub align: Align,
}

impl Default for TableStyle {
    fn default() -> Self {
        Self {
            padding_top: 3.0,
            padding_bottom: 3.0,
            padding_left: 6.0,
            padding_right: 6.0,
            valign: VAlign::Top,
            image_align: Align::Left,
            align: Align::Center,
        }
    }
}

/// A table of fixed column widths
///
/// Rows are the unit of pagination: a row is never split, but a table
/// may continue on the next page between rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub column_widths: Vec<f64>,
    pub rows: Vec<Vec<CellContent>>,
    /// Lower bound on each row's content height, parallel to `rows`
    pub min_row_heights: Vec<f64>,
    pub style: TableStyle,
}

impl Table {
    pub fn new(column_widths: Vec<f64>, style: TableStyle) -> Self {
        Self {
            column_widths,
            rows: Vec::new(),
            min_row_heights: Vec::new(),
            style,
        }
    }

    /// Append a row; missing trailing cells are treated as empty
    pub fn push_row(&mut self, cells: Vec<CellContent>) {
        self.push_row_with_min_height(cells, 0.0);
    }

    /// Append a row whose content is never shorter than `min_height`
    pub fn push_row_with_min_height(&mut self, cells: Vec<CellContent>, min_height: f64) {
        self.rows.push(cells);
        self.min_row_heights.push(min_height.max(0.0));
    }

    pub fn width(&self) -> f64 {
        self.column_widths.iter().sum()
    }

    /// Inner width of a column after horizontal padding
    pub fn content_width(&self, column: usize) -> f64 {
        let width = self.column_widths.get(column).copied().unwrap_or(0.0);
        (width - self.style.padding_left - self.style.padding_right).max(0.0)
    }

    /// Height of every row, including vertical padding
    pub fn row_heights(&self) -> Vec<f64> {
        self.rows
            .iter()
            .enumerate()
            .map(|(index, row)| {
                let min = self.min_row_heights.get(index).copied().unwrap_or(0.0);
                let content = row
                    .iter()
                    .enumerate()
                    .map(|(column, cell)| cell.height(self.content_width(column)))
                    .fold(min, f64::max);
                content + self.style.padding_top + self.style.padding_bottom
            })
            .collect()
    }

    pub fn height(&self) -> f64 {
        self.row_heights().iter().sum()
    }

    /// Vertical offset of content below the top padding of its cell
    pub(crate) fn valign_offset(&self, row_height: f64, content_height: f64) -> f64 {
        let inner = row_height - self.style.padding_top - self.style.padding_bottom;
        match self.style.valign {
            VAlign::Top => 0.0,
            VAlign::Middle => (inner - content_height) / 2.0,
            VAlign::Bottom => inner - content_height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ImageHandle;
    use crate::flow::ParagraphStyle;

    fn handle() -> ImageHandle {
        ImageHandle {
            id: 1,
            width: 200,
            height: 100,
        }
    }

    fn zero_padding() -> TableStyle {
        TableStyle {
            padding_top: 0.0,
            padding_bottom: 0.0,
            padding_left: 0.0,
            padding_right: 0.0,
            ..TableStyle::default()
        }
    }

    #[test]
    fn test_row_height_is_tallest_cell_plus_padding() {
        let mut table = Table::new(vec![100.0, 100.0], TableStyle::default());
        table.push_row(vec![
            CellContent::Spacer(20.0),
            CellContent::Image(ImageBlock::fit_width(handle(), 80.0)),
        ]);
        table.push_row(vec![CellContent::Empty]);

        assert_eq!(table.row_heights(), vec![46.0, 6.0]);
        assert_eq!(table.height(), 52.0);
        assert_eq!(table.width(), 200.0);
    }

    #[test]
    fn test_paragraph_cell_wraps_to_column() {
        let style = ParagraphStyle {
            leading: 12.0,
            ..ParagraphStyle::default()
        };
        let mut table = Table::new(vec![40.0], zero_padding());
        table.push_row(vec![CellContent::Paragraph(Paragraph::new(
            "aaaa aaaa aaaa",
            style,
        ))]);

        // Three 22.24pt words cannot share a 40pt column
        assert_eq!(table.row_heights(), vec![36.0]);
    }

    #[test]
    fn test_min_row_height() {
        let mut table = Table::new(vec![100.0, 100.0], zero_padding());
        table.push_row_with_min_height(
            vec![CellContent::Image(ImageBlock::fit_width(handle(), 40.0))],
            70.0,
        );
        table.push_row_with_min_height(vec![CellContent::Spacer(90.0)], 70.0);
        table.push_row(vec![CellContent::Empty]);

        assert_eq!(table.row_heights(), vec![70.0, 90.0, 0.0]);
    }

    #[test]
    fn test_valign_offsets() {
        let mut table = Table::new(vec![100.0], zero_padding());
        assert_eq!(table.valign_offset(50.0, 20.0), 0.0);

        table.style.valign = VAlign::Middle;
        assert_eq!(table.valign_offset(50.0, 20.0), 15.0);

        table.style.valign = VAlign::Bottom;
        assert_eq!(table.valign_offset(50.0, 20.0), 30.0);
    }
}
