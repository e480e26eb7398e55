//! Capability trait for objects placed in the 3D world and drawn in 2D.
//!
//! Everything a renderer needs from the host world is handed over in a
//! [`RenderContext`] on each call; world objects keep no back-reference to
//! the collection that owns them.

use glam::DVec3;

use crate::resources::camera::Camera;
use crate::resources::canvas::Canvas;
use crate::resources::screensize::ScreenSize;
use crate::resources::viewstore::ViewStore;

/// Read-only frame state shared by every object rendered this frame.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    pub camera: &'a Camera,
    pub views: &'a ViewStore,
    pub screen: ScreenSize,
}

/// What happened to an object during one render call.
///
/// Only [`RenderOutcome::Drawn`] touched the canvas. The other variants are
/// normal per-frame results, not failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderOutcome {
    Drawn,
    /// Image would land entirely outside the viewport.
    Culled,
    /// The current frame name has no registered view.
    NoView,
    /// The view has no image for this rotation and zoom yet.
    NoImage,
}

/// Positionable, rotatable, renderable world object.
pub trait WorldObject {
    fn set_world_pos(&mut self, pos: DVec3);
    fn world_pos(&self) -> DVec3;
    /// Set the yaw in degrees. Implementations store it normalized to `[0, 360)`.
    fn set_world_rotation(&mut self, degrees: f64);
    fn world_rotation(&self) -> f64;
    /// Advance one frame and draw onto `canvas`.
    fn render(&mut self, ctx: &RenderContext<'_>, canvas: &mut dyn Canvas) -> RenderOutcome;
}
