//! Frame canvas resource.
//!
//! Stacked sprites draw onto a [`Canvas`]. The engine ships [`FrameCanvas`],
//! a software RGBA buffer that composites with the alpha already encoded in
//! each image. Hosts with their own surface implement [`Canvas`] instead.

use std::path::Path;

use bevy_ecs::prelude::Resource;
use image::{Rgba, RgbaImage, imageops};
use log::info;

/// A surface that images can be drawn onto.
pub trait Canvas {
    /// Draw `image` with its top-left corner at (`x`, `y`). Parts outside the
    /// surface are clipped.
    fn draw_image(&mut self, image: &RgbaImage, x: i64, y: i64);
}

/// Software canvas shared by all sprites for one frame.
#[derive(Resource, Clone, Debug)]
pub struct FrameCanvas {
    pub image: RgbaImage,
    /// Color used by [`FrameCanvas::clear`].
    pub clear_color: Rgba<u8>,
}

impl FrameCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
            clear_color: Rgba([0, 0, 0, 255]),
        }
    }

    pub fn with_clear_color(mut self, color: Rgba<u8>) -> Self {
        self.clear_color = color;
        self
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Fill the whole canvas with the clear color.
    pub fn clear(&mut self) {
        let color = self.clear_color;
        for pixel in self.image.pixels_mut() {
            *pixel = color;
        }
    }

    /// Write the canvas to an image file; the format follows the extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), String> {
        let path = path.as_ref();
        self.image
            .save(path)
            .map_err(|e| format!("Failed to save frame to {}: {}", path.display(), e))?;
        info!("Saved frame to {:?}", path);
        Ok(())
    }
}

impl Canvas for FrameCanvas {
    fn draw_image(&mut self, image: &RgbaImage, x: i64, y: i64) {
        imageops::overlay(&mut self.image, image, x, y);
    }
}
