//! Flow layout
//!
//! An ordered list of [`Block`]s is poured into the content frame of
//! fixed-size pages. When a block does not fit in what is left of the
//! page it is split (paragraphs by line, tables by row) or moved to the
//! next page. A [`PageDecorator`] paints each page before its content.
//!
//! Layout and drawing are separate steps: [`FlowLayout::layout`] returns
//! the positioned items of every page, [`FlowLayout::render`] draws them
//! into a [`crate::PdfDocument`].

mod engine;
mod image;
pub mod markup;
mod paragraph;
mod table;

pub use engine::{
    FlowLayout, LaidOutPage, Margins, NoDecoration, PageDecorator, PageGeometry, PlacedItem,
};
pub use image::ImageBlock;
pub use markup::{escape_markup, parse_markup, Inline};
pub use paragraph::{Fragment, Line, Paragraph, ParagraphStyle};
pub use table::{CellContent, Table, TableStyle, VAlign};

/// One unit of flowing content
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Paragraph(Paragraph),
    /// Vertical gap in points
    Spacer(f64),
    Image(ImageBlock),
    Table(Table),
    /// Start a new page unless the current one is still empty
    PageBreak,
}

impl Block {
    pub fn is_page_break(&self) -> bool {
        matches!(self, Block::PageBreak)
    }
}

impl From<Paragraph> for Block {
    fn from(paragraph: Paragraph) -> Self {
        Block::Paragraph(paragraph)
    }
}

impl From<ImageBlock> for Block {
    fn from(image: ImageBlock) -> Self {
        Block::Image(image)
    }
}

impl From<Table> for Block {
    fn from(table: Table) -> Self {
        Block::Table(table)
    }
}
