//! Per-page drawing surface
//!
//! A `PageCanvas` collects content-stream operators for one page and
//! remembers which fonts and images they reference, so the document can
//! build the page's resource dictionary when the canvas is added.

use crate::document::{ImageHandle, PageSize};
use crate::font::StandardFont;
use crate::image::generate_image_operators;
use crate::text::{
    fmt_num, generate_rotated_text_operators, generate_text_operators, TextRenderContext,
};
use std::collections::BTreeSet;

/// RGB Color (values 0.0 - 1.0)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    /// Create a new RGB color (values 0.0 - 1.0)
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create color from RGB values (0-255)
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Gray level, 0.0 is black and 1.0 is white
    pub fn gray(level: f32) -> Self {
        Self::rgb(level, level, level)
    }

    pub fn black() -> Self {
        Self::gray(0.0)
    }

    pub fn white() -> Self {
        Self::gray(1.0)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}

fn color_operands(color: Color) -> String {
    format!(
        "{} {} {}",
        fmt_num(color.r as f64),
        fmt_num(color.g as f64),
        fmt_num(color.b as f64)
    )
}

/// Drawing surface for a single page
///
/// Coordinates are PDF points with the origin at the bottom-left corner.
#[derive(Debug, Clone)]
pub struct PageCanvas {
    width: f64,
    height: f64,
    ops: Vec<u8>,
    fonts: BTreeSet<StandardFont>,
    images: BTreeSet<ImageHandle>,
}

impl PageCanvas {
    pub fn new(size: PageSize) -> Self {
        Self {
            width: size.width,
            height: size.height,
            ops: Vec::new(),
            fonts: BTreeSet::new(),
            images: BTreeSet::new(),
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Push the graphics state (q)
    pub fn save_state(&mut self) {
        self.ops.extend_from_slice(b"q\n");
    }

    /// Pop the graphics state (Q)
    pub fn restore_state(&mut self) {
        self.ops.extend_from_slice(b"Q\n");
    }

    pub fn set_fill_color(&mut self, color: Color) {
        self.ops
            .extend_from_slice(format!("{} rg\n", color_operands(color)).as_bytes());
    }

    pub fn set_stroke_color(&mut self, color: Color) {
        self.ops
            .extend_from_slice(format!("{} RG\n", color_operands(color)).as_bytes());
    }

    pub fn set_line_width(&mut self, width: f64) {
        self.ops
            .extend_from_slice(format!("{} w\n", fmt_num(width)).as_bytes());
    }

    /// Draw one line of text with its baseline starting at (x, y)
    pub fn draw_text(&mut self, text: &str, x: f64, y: f64, ctx: &TextRenderContext) {
        self.fonts.insert(ctx.font);
        self.ops
            .extend_from_slice(&generate_text_operators(text, x, y, ctx));
    }

    /// Draw text centred on (cx, cy) and rotated counter-clockwise by
    /// `angle_degrees`
    pub fn draw_centred_rotated_text(
        &mut self,
        text: &str,
        cx: f64,
        cy: f64,
        angle_degrees: f64,
        ctx: &TextRenderContext,
    ) {
        let half_width = ctx.font.text_width_points(text, ctx.font_size) / 2.0;
        // Cap height of Helvetica is about 0.7 em
        let half_height = ctx.font_size * 0.35;
        let (sin, cos) = angle_degrees.to_radians().sin_cos();

        // Walk back from the centre along the rotated baseline and down
        // along the rotated vertical
        let x = cx - half_width * cos + half_height * sin;
        let y = cy - half_width * sin - half_height * cos;

        self.fonts.insert(ctx.font);
        self.ops.extend_from_slice(&generate_rotated_text_operators(
            text,
            x,
            y,
            angle_degrees,
            ctx,
        ));
    }

    /// Stroke a straight line
    pub fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.ops.extend_from_slice(
            format!(
                "{} {} m\n{} {} l\nS\n",
                fmt_num(x1),
                fmt_num(y1),
                fmt_num(x2),
                fmt_num(y2)
            )
            .as_bytes(),
        );
    }

    /// Draw an image with its lower-left corner at (x, y)
    pub fn draw_image(&mut self, image: ImageHandle, x: f64, y: f64, width: f64, height: f64) {
        self.images.insert(image);
        self.ops.extend_from_slice(&generate_image_operators(
            &image.resource_name(),
            x,
            y,
            width,
            height,
        ));
    }

    /// Raw content stream
    pub fn content(&self) -> &[u8] {
        &self.ops
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub(crate) fn fonts(&self) -> &BTreeSet<StandardFont> {
        &self.fonts
    }

    pub(crate) fn images(&self) -> &BTreeSet<ImageHandle> {
        &self.images
    }
}
