//! Text rendering utilities

use crate::canvas::Color;
use crate::font::{encode_win_ansi, StandardFont};
use crate::Align;

/// Context for rendering text
#[derive(Debug, Clone, Copy)]
pub struct TextRenderContext {
    pub font: StandardFont,
    /// Font size in points
    pub font_size: f64,
    /// Fill color
    pub color: Color,
    /// Extra space added to every ASCII space (Tw), in points
    pub word_spacing: f64,
}

impl TextRenderContext {
    pub fn new(font: StandardFont, font_size: f64) -> Self {
        Self {
            font,
            font_size,
            color: Color::black(),
            word_spacing: 0.0,
        }
    }
}

/// Format a number for a content stream
///
/// Three decimals are plenty at 1/72 inch; trailing zeros are dropped.
pub(crate) fn fmt_num(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        return "0".to_string();
    }
    let mut s = format!("{rounded:.3}");
    while s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.pop();
    }
    s
}

/// Encode text as a PDF literal string, e.g. `(Hello)`
pub(crate) fn pdf_literal(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len() + 2);
    out.push(b'(');
    for byte in encode_win_ansi(text) {
        match byte {
            b'(' | b')' | b'\\' => {
                out.push(b'\\');
                out.push(byte);
            }
            _ => out.push(byte),
        }
    }
    out.push(b')');
    out
}

/// Calculate X offset for text alignment
///
/// # Arguments
/// * `text_width` - Width of text in points
/// * `container_width` - Available width for alignment
/// * `align` - Desired alignment
pub fn calculate_x_offset(text_width: f64, container_width: f64, align: Align) -> f64 {
    match align {
        Align::Left | Align::Justify => 0.0,
        Align::Center => (container_width - text_width) / 2.0,
        Align::Right => container_width - text_width,
    }
}

fn text_state_operators(ops: &mut Vec<u8>, ctx: &TextRenderContext) {
    ops.extend_from_slice(
        format!(
            "{} {} {} rg\n/{} {} Tf\n",
            fmt_num(ctx.color.r as f64),
            fmt_num(ctx.color.g as f64),
            fmt_num(ctx.color.b as f64),
            ctx.font.resource_name(),
            fmt_num(ctx.font_size)
        )
        .as_bytes(),
    );
    if ctx.word_spacing != 0.0 {
        ops.extend_from_slice(format!("{} Tw\n", fmt_num(ctx.word_spacing)).as_bytes());
    }
}

/// Generate PDF operators for text insertion
///
/// Creates the text operators (BT, rg, Tf, Tw, Td, Tj, ET) to show a
/// single line with its baseline starting at (`x`, `y`).
///
/// # Arguments
/// * `text` - Text to show; encoded as WinAnsi
/// * `x` - X coordinate in points (PDF coordinates, from left)
/// * `y` - Y coordinate in points (PDF coordinates, from bottom)
/// * `ctx` - Text rendering context
pub fn generate_text_operators(text: &str, x: f64, y: f64, ctx: &TextRenderContext) -> Vec<u8> {
    let mut ops = b"BT\n".to_vec();
    text_state_operators(&mut ops, ctx);
    ops.extend_from_slice(format!("{} {} Td\n", fmt_num(x), fmt_num(y)).as_bytes());
    ops.extend_from_slice(&pdf_literal(text));
    ops.extend_from_slice(b" Tj\n");
    // Tw outlives ET, so undo it for the next line
    if ctx.word_spacing != 0.0 {
        ops.extend_from_slice(b"0 Tw\n");
    }
    ops.extend_from_slice(b"ET\n");
    ops
}

/// Generate operators for a line rotated by `angle_degrees` around
/// its start point (`x`, `y`)
pub fn generate_rotated_text_operators(
    text: &str,
    x: f64,
    y: f64,
    angle_degrees: f64,
    ctx: &TextRenderContext,
) -> Vec<u8> {
    let (sin, cos) = angle_degrees.to_radians().sin_cos();

    let mut ops = b"BT\n".to_vec();
    text_state_operators(&mut ops, ctx);
    ops.extend_from_slice(
        format!(
            "{} {} {} {} {} {} Tm\n",
            fmt_num(cos),
            fmt_num(sin),
            fmt_num(-sin),
            fmt_num(cos),
            fmt_num(x),
            fmt_num(y)
        )
        .as_bytes(),
    );
    ops.extend_from_slice(&pdf_literal(text));
    ops.extend_from_slice(b" Tj\nET\n");
    ops
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_x_offset_left() {
        assert_eq!(calculate_x_offset(100.0, 500.0, Align::Left), 0.0);
        assert_eq!(calculate_x_offset(100.0, 500.0, Align::Justify), 0.0);
    }

    #[test]
    fn test_x_offset_center() {
        assert_eq!(calculate_x_offset(100.0, 500.0, Align::Center), 200.0);
    }

    #[test]
    fn test_x_offset_right() {
        assert_eq!(calculate_x_offset(100.0, 500.0, Align::Right), 400.0);
    }

    #[test]
    fn test_fmt_num() {
        assert_eq!(fmt_num(12.0), "12");
        assert_eq!(fmt_num(0.9), "0.9");
        assert_eq!(fmt_num(56.692913), "56.693");
        assert_eq!(fmt_num(-0.0001), "0");
        assert_eq!(fmt_num(-3.5), "-3.5");
    }

    #[test]
    fn test_pdf_literal_escapes() {
        assert_eq!(pdf_literal("a(b)c\\"), b"(a\\(b\\)c\\\\)".to_vec());
        assert_eq!(pdf_literal("não"), b"(n\xE3o)".to_vec());
    }

    #[test]
    fn test_generate_text_operators() {
        let ctx = TextRenderContext::new(StandardFont::Helvetica, 12.0);
        let ops = String::from_utf8(generate_text_operators("Hello", 100.0, 700.0, &ctx)).unwrap();

        assert_eq!(ops, "BT\n0 0 0 rg\n/F1 12 Tf\n100 700 Td\n(Hello) Tj\nET\n");
    }

    #[test]
    fn test_generate_text_operators_word_spacing() {
        let ctx = TextRenderContext {
            word_spacing: 1.25,
            ..TextRenderContext::new(StandardFont::HelveticaBold, 11.0)
        };
        let ops = String::from_utf8(generate_text_operators("a b", 10.0, 20.0, &ctx)).unwrap();

        assert!(ops.contains("/F2 11 Tf\n"));
        assert!(ops.contains("1.25 Tw\n"));
        assert!(ops.ends_with("(a b) Tj\n0 Tw\nET\n"));
    }

    #[test]
    fn test_generate_rotated_text_operators() {
        let ctx = TextRenderContext::new(StandardFont::HelveticaBold, 100.0);
        let ops = String::from_utf8(generate_rotated_text_operators("X", 0.0, 0.0, 90.0, &ctx))
            .unwrap();

        assert!(ops.contains("0 1 -1 0 0 0 Tm\n"));
        assert!(ops.contains("(X) Tj"));
    }
}
