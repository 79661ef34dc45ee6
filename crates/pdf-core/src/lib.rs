//! PDF Core - Low-level PDF writing and flow layout
//!
//! This crate provides functionality for:
//! - Building new PDF documents page by page
//! - Drawing text in the standard Helvetica family (no embedding needed)
//! - Embedding images (JPEG, PNG)
//! - Laying out an ordered sequence of blocks onto fixed-size pages
//!
//! # Example
//!
//! ```ignore
//! use pdf_core::flow::{Block, FlowLayout, Margins, Paragraph, ParagraphStyle};
//! use pdf_core::{PageSize, PdfDocument};
//!
//! let mut doc = PdfDocument::new(PageSize::A4);
//! let layout = FlowLayout::new(PageSize::A4, Margins::uniform(pdf_core::units::cm(2.0)));
//! let blocks = vec![Block::Paragraph(Paragraph::new("Hello, <b>World</b>!", ParagraphStyle::default()))];
//! layout.build(&blocks, &|_: &mut pdf_core::PageCanvas, _: &pdf_core::flow::PageGeometry| {}, &mut doc)?;
//! doc.save("output.pdf")?;
//! ```

mod canvas;
mod document;
mod font;
mod image;
mod text;

pub mod flow;

pub use canvas::{Color, PageCanvas};
pub use document::{ImageHandle, PageSize, PdfDocument};
pub use font::{encode_win_ansi, to_win_ansi, FontStyle, FontWeight, StandardFont};
pub use image::{
    calculate_scaled_dimensions, detect_format, get_dimensions, ImageDimensions, ImageFormat,
    ImageScaleMode, ImageXObject,
};
pub use text::{calculate_x_offset, generate_text_operators, TextRenderContext};

use thiserror::Error;

/// Errors that can occur during PDF operations
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("Failed to save PDF: {0}")]
    SaveError(String),

    #[error("Unknown image handle: {0}")]
    UnknownImage(u32),

    #[error("Image error: {0}")]
    ImageError(String),

    #[error("Layout error: {0}")]
    LayoutError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Lopdf error: {0}")]
    LopdfError(#[from] lopdf::Error),
}

/// Result type for PDF operations
pub type Result<T> = std::result::Result<T, PdfError>;

/// Horizontal alignment of text lines and blocks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
    /// Stretch inter-word spacing so full lines touch both edges.
    /// Blocks that are not text treat this as `Left`.
    Justify,
}

/// Unit conversions into PDF points
pub mod units {
    /// Points per centimetre
    pub const CM: f64 = 72.0 / 2.54;

    /// Convert centimetres to points
    pub fn cm(value: f64) -> f64 {
        value * CM
    }
}
