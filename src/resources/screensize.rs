//! Screen size resource.
//!
//! Stores the viewport dimensions in pixels. Projection centers the camera on
//! the middle of this area and culling discards anything outside it.

use bevy_ecs::prelude::Resource;

/// Current viewport size in pixels.
#[derive(Resource, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenSize {
    /// Width in pixels.
    pub w: i32,
    /// Height in pixels.
    pub h: i32,
}

impl ScreenSize {
    pub fn new(w: i32, h: i32) -> Self {
        Self { w, h }
    }

    /// Horizontal center in pixels.
    pub fn half_width(&self) -> f64 {
        f64::from(self.w) / 2.0
    }

    /// Vertical center in pixels.
    pub fn half_height(&self) -> f64 {
        f64::from(self.h) / 2.0
    }
}
