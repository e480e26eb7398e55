//! Shared 3D camera resource and the world-to-screen math built on it.
//!
//! The camera looks down on the world from above with a yaw rotation. World
//! `x`/`z` form the ground plane and rotate with the camera; world `y` is
//! height and always maps straight up the screen.
//!
//! Projection and culling are pure functions of the camera, a world position
//! and the [`ScreenSize`], so they can run before any image lookup.

use bevy_ecs::prelude::Resource;
use glam::{DVec2, DVec3};

use crate::resources::screensize::ScreenSize;

/// ECS resource holding the active camera.
///
/// Stacked sprites only ever read it; camera controllers mutate it between
/// frames.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// World point shown at the center of the screen.
    pub position: DVec3,
    /// Pixels per world unit.
    pub zoom: f64,
    /// Camera yaw in degrees. Not normalized; any finite value is valid.
    pub rotation: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: DVec3::ZERO,
            zoom: 1.0,
            rotation: 0.0,
        }
    }
}

impl Camera {
    pub fn new(position: DVec3, zoom: f64, rotation: f64) -> Self {
        Self {
            position,
            zoom,
            rotation,
        }
    }

    pub fn x(&self) -> f64 {
        self.position.x
    }

    pub fn y(&self) -> f64 {
        self.position.y
    }

    pub fn z(&self) -> f64 {
        self.position.z
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Map a world position to screen pixels.
    ///
    /// The zoomed ground-plane offset from the camera is rotated by the
    /// inverse of the camera yaw, then the zoomed height offset is subtracted
    /// from the screen y.
    pub fn project(&self, world_pos: DVec3, screen: ScreenSize) -> DVec2 {
        let offset = (world_pos - self.position) * self.zoom;
        let (sin, cos) = (-self.rotation).to_radians().sin_cos();
        let x = screen.half_width() + offset.x * cos - offset.z * sin;
        let y = screen.half_height() + offset.x * sin + offset.z * cos - offset.y;
        DVec2::new(x, y)
    }
}

/// Whether an image anchored at `screen_pos` lies entirely outside the viewport.
///
/// `center_x`/`center_y` are the pixel offsets from the image's top-left
/// corner to its anchor and `height` is the full image height. The horizontal
/// test assumes the anchor is horizontally centered.
pub fn is_offscreen(
    screen_pos: DVec2,
    center_x: i32,
    center_y: i32,
    height: i32,
    screen: ScreenSize,
) -> bool {
    let (cx, cy) = (f64::from(center_x), f64::from(center_y));
    screen_pos.x + cx < 0.0
        || screen_pos.x - cx >= f64::from(screen.w)
        || screen_pos.y + (f64::from(height) - cy) < 0.0
        || screen_pos.y - cy >= f64::from(screen.h)
}
