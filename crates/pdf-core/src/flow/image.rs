//! Image blocks

use crate::document::ImageHandle;
use crate::image::{calculate_scaled_dimensions, ImageScaleMode};
use crate::Align;

/// An embedded image drawn at a fixed size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageBlock {
    pub handle: ImageHandle,
    /// Display width in points
    pub width: f64,
    /// Display height in points
    pub height: f64,
    pub align: Align,
}

impl ImageBlock {
    /// Scale to `width`, keeping the aspect ratio
    pub fn fit_width(handle: ImageHandle, width: f64) -> Self {
        let (width, height) = calculate_scaled_dimensions(
            handle.width,
            handle.height,
            width,
            0.0,
            ImageScaleMode::FitWidth,
        );
        Self {
            handle,
            width,
            height,
            align: Align::Left,
        }
    }

    /// Largest size inside `width` x `height`, keeping the aspect ratio
    pub fn fit_box(handle: ImageHandle, width: f64, height: f64) -> Self {
        let (width, height) = calculate_scaled_dimensions(
            handle.width,
            handle.height,
            width,
            height,
            ImageScaleMode::FitBox,
        );
        Self {
            handle,
            width,
            height,
            align: Align::Left,
        }
    }

    pub fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    /// Shrink (never grow) so the image fits in `max_width` x `max_height`
    pub fn shrink_to(&self, max_width: f64, max_height: f64) -> Self {
        if self.width <= max_width && self.height <= max_height {
            return *self;
        }
        let scale = (max_width / self.width).min(max_height / self.height);
        Self {
            width: self.width * scale,
            height: self.height * scale,
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handle(width: u32, height: u32) -> ImageHandle {
        ImageHandle { id: 1, width, height }
    }

    #[test]
    fn test_fit_width() {
        let block = ImageBlock::fit_width(handle(400, 300), 100.0);
        assert_eq!((block.width, block.height), (100.0, 75.0));
    }

    #[test]
    fn test_fit_box_keeps_aspect() {
        let block = ImageBlock::fit_box(handle(400, 100), 100.0, 50.0);
        assert_eq!((block.width, block.height), (100.0, 25.0));

        let block = ImageBlock::fit_box(handle(100, 400), 100.0, 50.0);
        assert_eq!((block.width, block.height), (12.5, 50.0));
    }

    #[test]
    fn test_shrink_to() {
        let block = ImageBlock::fit_width(handle(100, 1000), 100.0);
        let shrunk = block.shrink_to(100.0, 500.0);
        assert_eq!((shrunk.width, shrunk.height), (50.0, 500.0));

        let small = ImageBlock::fit_width(handle(100, 100), 10.0);
        assert_eq!(small.shrink_to(100.0, 100.0), small);
    }
}
