//! Render systems.
//!
//! - [`clear_canvas`] wipes the [`FrameCanvas`] at the start of a frame.
//! - [`render_system`] ticks and draws every [`StackedSprite`] once, in
//!   ascending [`Layer`](crate::components::layer::Layer) order, and records
//!   the outcome of each in [`RenderStats`].
//!
//! Sprites sharing a layer keep their query order, so the result is a plain
//! painter's algorithm.

use bevy_ecs::prelude::*;

use crate::components::stackedsprite::StackedSprite;
use crate::components::worldobject::{RenderContext, WorldObject};
use crate::resources::camera::Camera;
use crate::resources::canvas::FrameCanvas;
use crate::resources::renderstats::RenderStats;
use crate::resources::screensize::ScreenSize;
use crate::resources::viewstore::ViewStore;

pub fn clear_canvas(mut canvas: ResMut<FrameCanvas>) {
    canvas.clear();
}

/// Advance and draw all stacked sprites.
///
/// Contract
/// - Reads [`Camera`], [`ViewStore`] and [`ScreenSize`].
/// - Mutates each [`StackedSprite`] (animation progress, last screen position).
/// - Draws onto [`FrameCanvas`].
/// - Overwrites [`RenderStats`] with this frame's counts.
pub fn render_system(
    mut sprites: Query<&mut StackedSprite>,
    camera: Res<Camera>,
    views: Res<ViewStore>,
    screen: Res<ScreenSize>,
    mut canvas: ResMut<FrameCanvas>,
    mut stats: ResMut<RenderStats>,
) {
    let ctx = RenderContext {
        camera: &camera,
        views: &views,
        screen: *screen,
    };

    let mut to_draw: Vec<Mut<StackedSprite>> = sprites.iter_mut().collect();
    to_draw.sort_by_key(|sprite| sprite.layer());

    stats.reset();
    let canvas: &mut FrameCanvas = &mut canvas;
    for mut sprite in to_draw {
        let outcome = sprite.render(&ctx, &mut *canvas);
        stats.record(outcome);
    }
}
