// Copyright 2026 the Playfield Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Image capability consumed by the canvas.

use tiny_skia::{Pixmap, PixmapRef};

/// Something the canvas can draw as an image.
///
/// `width` and `height` are the logical size used for source rectangles. The
/// pixels may be larger (high-density assets), in which case the canvas
/// scales them down. An image whose pixels are not available yet (still
/// loading) reports `None` from [`pixels`](Self::pixels); drawing it is a
/// no-op that still marks the canvas dirty.
pub trait Image {
    /// Logical width.
    fn width(&self) -> f64;

    /// Logical height.
    fn height(&self) -> f64;

    /// The pixels, if loaded.
    fn pixels(&self) -> Option<PixmapRef<'_>>;

    /// Whether the pixels are available.
    fn is_ready(&self) -> bool {
        self.pixels().is_some()
    }
}

impl Image for Pixmap {
    fn width(&self) -> f64 {
        f64::from(Self::width(self))
    }

    fn height(&self) -> f64 {
        f64::from(Self::height(self))
    }

    fn pixels(&self) -> Option<PixmapRef<'_>> {
        Some(self.as_ref())
    }
}

/// An image with a known size whose pixels arrive later.
#[derive(Clone, Debug)]
pub struct PendingImage {
    width: f64,
    height: f64,
    pixels: Option<Pixmap>,
}

impl PendingImage {
    /// Creates an image of the given logical size with no pixels yet.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            pixels: None,
        }
    }

    /// Supplies the pixels once they are loaded.
    pub fn set_pixels(&mut self, pixels: Pixmap) {
        self.pixels = Some(pixels);
    }
}

impl Image for PendingImage {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn pixels(&self) -> Option<PixmapRef<'_>> {
        self.pixels.as_ref().map(Pixmap::as_ref)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_image_becomes_ready() {
        let mut image = PendingImage::new(4.0, 2.0);
        assert!(!image.is_ready());
        image.set_pixels(Pixmap::new(8, 4).unwrap());
        assert!(image.is_ready());
        assert_eq!(Image::width(&image), 4.0);
    }
}
