//! Stacked sprite component.
//!
//! A [`StackedSprite`] is a pseudo-3D object drawn from a pre-rendered sprite
//! stack. It has a world position, a yaw rotation and two animation slots:
//!
//! - a *looping* animation that always plays, and
//! - an optional *one-time* animation that overrides the looping one until it
//!   has played through once, then clears itself.
//!
//! The looping animation keeps ticking while a one-time animation is shown,
//! so it resumes wherever it would have been.
//!
//! Each render call advances the animations by one tick, projects the world
//! position through the [`Camera`], culls against the viewport and only then
//! asks the view for the rotated image. A missing view or image is a silent
//! skip.

use bevy_ecs::prelude::Component;
use glam::{DVec2, DVec3};

use crate::components::animation::Animation;
use crate::components::layer::Layer;
use crate::components::rotation::normalize_angle;
use crate::components::worldobject::{RenderContext, RenderOutcome, WorldObject};
use crate::resources::camera::{Camera, is_offscreen};
use crate::resources::canvas::Canvas;

#[derive(Component, Debug, Clone)]
pub struct StackedSprite {
    looping: Animation,
    one_time: Option<Animation>,
    world_pos: DVec3,
    /// Degrees in `[0, 360)`.
    rotation: f64,
    layer: Layer,
    /// Where the anchor landed on the last render that found a view.
    screen_pos: Option<DVec2>,
}

impl StackedSprite {
    /// Create a sprite on the default layer, placed at the world origin.
    pub fn new(animation: Animation) -> Self {
        Self::with_layer(animation, Layer::default())
    }

    pub fn with_layer(animation: Animation, layer: Layer) -> Self {
        Self {
            looping: animation,
            one_time: None,
            world_pos: DVec3::ZERO,
            rotation: 0.0,
            layer,
            screen_pos: None,
        }
    }

    /// Create a sprite that always shows the view named `sheet_name`.
    pub fn from_sheet(sheet_name: impl Into<String>) -> Self {
        Self::new(Animation::still(sheet_name))
    }

    pub fn from_sheet_with_layer(sheet_name: impl Into<String>, layer: Layer) -> Self {
        Self::with_layer(Animation::still(sheet_name), layer)
    }

    pub fn layer(&self) -> Layer {
        self.layer
    }

    /// Replace the looping animation.
    ///
    /// A different animation is rewound before it is installed. Installing
    /// the animation that is already looping keeps the current instance and
    /// its progress.
    pub fn set_looping_animation(&mut self, mut animation: Animation) {
        if self.looping.is_same(&animation) {
            return;
        }
        animation.reset();
        self.looping = animation;
    }

    /// Rewind `animation` and play it once over the looping animation.
    ///
    /// Any previous one-time animation is dropped immediately, even if it is
    /// the same one.
    pub fn play_one_time_animation(&mut self, mut animation: Animation) {
        animation.reset();
        self.one_time = Some(animation);
    }

    pub fn looping_animation(&self) -> &Animation {
        &self.looping
    }

    pub fn one_time_animation(&self) -> Option<&Animation> {
        self.one_time.as_ref()
    }

    /// The animation that would be shown right now, without ticking.
    pub fn active_animation(&self) -> &Animation {
        self.one_time.as_ref().unwrap_or(&self.looping)
    }

    /// Tick both slots once and return the animation to show this frame.
    pub fn resolve_current(&mut self) -> &Animation {
        self.looping.update();
        if let Some(one_time) = self.one_time.as_mut() {
            one_time.update();
            if one_time.has_looped() {
                self.one_time = None;
            }
        }
        self.active_animation()
    }

    pub fn set_world_xyz(&mut self, x: f64, y: f64, z: f64) {
        self.world_pos = DVec3::new(x, y, z);
    }

    pub fn world_x(&self) -> f64 {
        self.world_pos.x
    }

    pub fn world_y(&self) -> f64 {
        self.world_pos.y
    }

    pub fn world_z(&self) -> f64 {
        self.world_pos.z
    }

    /// Rotation as it appears on screen, relative to the camera yaw.
    pub fn visual_rotation(&self, camera: &Camera) -> f64 {
        normalize_angle(self.rotation - camera.rotation())
    }

    pub fn screen_pos(&self) -> Option<DVec2> {
        self.screen_pos
    }
}

impl WorldObject for StackedSprite {
    fn set_world_pos(&mut self, pos: DVec3) {
        self.world_pos = pos;
    }

    fn world_pos(&self) -> DVec3 {
        self.world_pos
    }

    fn set_world_rotation(&mut self, degrees: f64) {
        self.rotation = normalize_angle(degrees);
    }

    fn world_rotation(&self) -> f64 {
        self.rotation
    }

    fn render(&mut self, ctx: &RenderContext<'_>, canvas: &mut dyn Canvas) -> RenderOutcome {
        let views = ctx.views;
        let Some(view) = self
            .resolve_current()
            .current_frame_name()
            .and_then(|name| views.get(name))
        else {
            return RenderOutcome::NoView;
        };

        let screen_pos = ctx.camera.project(self.world_pos, ctx.screen);
        self.screen_pos = Some(screen_pos);

        // Cull before asking for the image; off-screen sprites never pay for it
        let rotation = self.visual_rotation(ctx.camera);
        let zoom = ctx.camera.zoom();
        let center_x = view.anchor_x(rotation, zoom);
        let center_y = view.anchor_y(rotation, zoom);
        let height = view.transformed_height(rotation, zoom);
        if is_offscreen(screen_pos, center_x, center_y, height, ctx.screen) {
            return RenderOutcome::Culled;
        }

        let Some(image) = view.transformed_image(rotation, zoom) else {
            return RenderOutcome::NoImage;
        };
        canvas.draw_image(
            &image,
            screen_pos.x.round() as i64 - i64::from(center_x),
            screen_pos.y.round() as i64 - i64::from(center_y),
        );
        RenderOutcome::Drawn
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use image::RgbaImage;

    use super::*;
    use crate::components::animation::AnimationDef;
    use crate::resources::screensize::ScreenSize;
    use crate::resources::viewstore::{FixedView, SprackView, ViewStore};

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    fn anim(frames: &[&str]) -> Animation {
        Animation::new(Arc::new(AnimationDef::new(frames.iter().copied(), 1)))
    }

    /// Records every draw call instead of touching pixels.
    #[derive(Default)]
    struct RecordingCanvas {
        draws: Vec<(u32, u32, i64, i64)>,
    }

    impl Canvas for RecordingCanvas {
        fn draw_image(&mut self, image: &RgbaImage, x: i64, y: i64) {
            self.draws.push((image.width(), image.height(), x, y));
        }
    }

    /// Fixed anchors; counts image requests and can pretend to be cold.
    struct CountingView {
        image: Option<Arc<RgbaImage>>,
        requests: Arc<AtomicUsize>,
        last_rotation: Arc<std::sync::Mutex<f64>>,
    }

    impl SprackView for CountingView {
        fn anchor_x(&self, rotation: f64, _zoom: f64) -> i32 {
            *self.last_rotation.lock().unwrap() = rotation;
            10
        }
        fn anchor_y(&self, _rotation: f64, _zoom: f64) -> i32 {
            30
        }
        fn transformed_height(&self, _rotation: f64, _zoom: f64) -> i32 {
            30
        }
        fn transformed_image(&self, _rotation: f64, _zoom: f64) -> Option<Arc<RgbaImage>> {
            self.requests.fetch_add(1, Ordering::SeqCst);
            self.image.clone()
        }
    }

    fn counting_store(
        name: &str,
        image: Option<RgbaImage>,
    ) -> (ViewStore, Arc<AtomicUsize>, Arc<std::sync::Mutex<f64>>) {
        let requests = Arc::new(AtomicUsize::new(0));
        let last_rotation = Arc::new(std::sync::Mutex::new(f64::NAN));
        let mut views = ViewStore::new();
        views.insert(
            name,
            CountingView {
                image: image.map(Arc::new),
                requests: requests.clone(),
                last_rotation: last_rotation.clone(),
            },
        );
        (views, requests, last_rotation)
    }

    const SCREEN: ScreenSize = ScreenSize { w: 800, h: 600 };

    // --- animation slots ---

    #[test]
    fn test_new_sprite_defaults() {
        let sprite = StackedSprite::from_sheet("crate");
        assert_eq!(sprite.layer(), Layer::SPRACK_DEFAULT);
        assert_eq!(sprite.world_pos(), DVec3::ZERO);
        assert!(sprite.one_time_animation().is_none());
        assert_eq!(sprite.looping_animation().current_frame_name(), Some("crate"));
        assert!(sprite.screen_pos().is_none());
    }

    #[test]
    fn test_layer_is_kept() {
        let sprite = StackedSprite::from_sheet_with_layer("floor", Layer::BACKGROUND);
        assert_eq!(sprite.layer(), Layer::BACKGROUND);
    }

    #[test]
    fn test_same_looping_animation_keeps_progress() {
        let walk = anim(&["w0", "w1", "w2"]);
        let mut sprite = StackedSprite::new(walk.clone());
        sprite.resolve_current();
        assert_eq!(sprite.looping_animation().frame_index(), 1);

        sprite.set_looping_animation(walk.clone());
        assert_eq!(sprite.looping_animation().frame_index(), 1);
        sprite.set_looping_animation(walk);
        assert_eq!(sprite.looping_animation().frame_index(), 1);
    }

    #[test]
    fn test_different_looping_animation_is_reset() {
        let mut sprite = StackedSprite::new(anim(&["w0", "w1"]));
        let mut run = anim(&["r0", "r1", "r2"]);
        run.update();
        run.update();
        sprite.set_looping_animation(run);
        assert_eq!(sprite.looping_animation().frame_index(), 0);
        assert_eq!(sprite.looping_animation().current_frame_name(), Some("r0"));
    }

    #[test]
    fn test_play_one_time_always_resets() {
        let jump = anim(&["j0", "j1", "j2", "j3"]);
        let mut sprite = StackedSprite::new(anim(&["idle"]));
        sprite.play_one_time_animation(jump.clone());
        sprite.resolve_current();
        sprite.resolve_current();
        assert_eq!(sprite.one_time_animation().unwrap().frame_index(), 2);

        sprite.play_one_time_animation(jump);
        assert_eq!(sprite.one_time_animation().unwrap().frame_index(), 0);
    }

    #[test]
    fn test_play_one_time_replaces_previous() {
        let mut sprite = StackedSprite::new(anim(&["idle"]));
        sprite.play_one_time_animation(anim(&["a0", "a1"]));
        sprite.resolve_current();
        sprite.play_one_time_animation(anim(&["b0", "b1"]));
        assert_eq!(sprite.active_animation().current_frame_name(), Some("b0"));
    }

    #[test]
    fn test_set_looping_does_not_clear_one_time() {
        let mut sprite = StackedSprite::new(anim(&["idle"]));
        sprite.play_one_time_animation(anim(&["hit0", "hit1"]));
        sprite.set_looping_animation(anim(&["walk0", "walk1"]));
        assert!(sprite.one_time_animation().is_some());
        assert_eq!(sprite.active_animation().current_frame_name(), Some("hit0"));
    }

    #[test]
    fn test_one_time_overrides_then_reverts() {
        // looping A has 2 frames, one-time B has 3
        let mut sprite = StackedSprite::new(anim(&["a0", "a1"]));
        sprite.play_one_time_animation(anim(&["b0", "b1", "b2"]));

        assert_eq!(sprite.resolve_current().current_frame_name(), Some("b1"));
        assert_eq!(sprite.resolve_current().current_frame_name(), Some("b2"));
        // third tick wraps B, so A shows through, advanced 3 ticks (3 mod 2)
        assert_eq!(sprite.resolve_current().current_frame_name(), Some("a1"));
        assert!(sprite.one_time_animation().is_none());

        assert_eq!(sprite.resolve_current().current_frame_name(), Some("a0"));
        assert_eq!(sprite.resolve_current().current_frame_name(), Some("a1"));
        assert!(sprite.one_time_animation().is_none());
    }

    #[test]
    fn test_still_one_time_never_finishes() {
        let mut sprite = StackedSprite::new(anim(&["a0", "a1"]));
        sprite.play_one_time_animation(Animation::still("statue"));
        for _ in 0..5 {
            assert_eq!(sprite.resolve_current().current_frame_name(), Some("statue"));
        }
    }

    // --- transform ---

    #[test]
    fn test_set_world_pos_replaces_all_axes() {
        let mut sprite = StackedSprite::from_sheet("crate");
        sprite.set_world_xyz(1.0, 2.0, 3.0);
        assert_eq!(sprite.world_pos(), DVec3::new(1.0, 2.0, 3.0));
        sprite.set_world_pos(DVec3::new(-4.0, 0.5, 9.0));
        assert!(approx_eq(sprite.world_x(), -4.0));
        assert!(approx_eq(sprite.world_y(), 0.5));
        assert!(approx_eq(sprite.world_z(), 9.0));
    }

    #[test]
    fn test_rotation_is_normalized() {
        let mut sprite = StackedSprite::from_sheet("crate");
        sprite.set_world_rotation(-90.0);
        assert!(approx_eq(sprite.world_rotation(), 270.0));
        sprite.set_world_rotation(725.0);
        assert!(approx_eq(sprite.world_rotation(), 5.0));
        sprite.set_world_rotation(360.0);
        assert!(approx_eq(sprite.world_rotation(), 0.0));
    }

    #[test]
    fn test_visual_rotation_subtracts_camera_yaw() {
        let mut sprite = StackedSprite::from_sheet("crate");
        sprite.set_world_rotation(30.0);
        for (cam_rot, expected) in [(0.0, 30.0), (90.0, 300.0), (-90.0, 120.0), (750.0, 0.0)] {
            let camera = Camera::new(DVec3::ZERO, 1.0, cam_rot);
            let visual = sprite.visual_rotation(&camera);
            assert!(approx_eq(visual, expected), "{cam_rot} -> {visual}");
            assert!(approx_eq(
                visual,
                normalize_angle(sprite.world_rotation() - camera.rotation())
            ));
        }
    }

    // --- render ---

    #[test]
    fn test_render_draws_anchored_at_bottom_center() {
        let mut views = ViewStore::new();
        views.insert("crate", FixedView::new(RgbaImage::new(20, 30)));
        let camera = Camera::default();
        let ctx = RenderContext {
            camera: &camera,
            views: &views,
            screen: SCREEN,
        };
        let mut sprite = StackedSprite::from_sheet("crate");
        let mut canvas = RecordingCanvas::default();

        assert_eq!(sprite.render(&ctx, &mut canvas), RenderOutcome::Drawn);
        assert_eq!(canvas.draws, vec![(20, 30, 390, 270)]);
        let pos = sprite.screen_pos().unwrap();
        assert!(approx_eq(pos.x, 400.0));
        assert!(approx_eq(pos.y, 300.0));
    }

    #[test]
    fn test_render_rounds_screen_position() {
        let mut views = ViewStore::new();
        views.insert("crate", FixedView::new(RgbaImage::new(20, 30)));
        let camera = Camera::default();
        let ctx = RenderContext {
            camera: &camera,
            views: &views,
            screen: SCREEN,
        };
        let mut sprite = StackedSprite::from_sheet("crate");
        sprite.set_world_xyz(0.6, 0.0, -0.4);
        let mut canvas = RecordingCanvas::default();

        sprite.render(&ctx, &mut canvas);
        // 400.6 -> 401, 299.6 -> 300
        assert_eq!(canvas.draws, vec![(20, 30, 391, 270)]);
    }

    #[test]
    fn test_render_unknown_frame_is_silent_skip() {
        let views = ViewStore::new();
        let camera = Camera::default();
        let ctx = RenderContext {
            camera: &camera,
            views: &views,
            screen: SCREEN,
        };
        let mut sprite = StackedSprite::new(anim(&["a0", "a1"]));
        let mut canvas = RecordingCanvas::default();

        assert_eq!(sprite.render(&ctx, &mut canvas), RenderOutcome::NoView);
        assert!(canvas.draws.is_empty());
        // animation still ticked
        assert_eq!(sprite.looping_animation().frame_index(), 1);
    }

    #[test]
    fn test_render_culls_before_image_lookup() {
        let (views, requests, _) = counting_store("crate", Some(RgbaImage::new(20, 30)));
        let camera = Camera::default();
        let ctx = RenderContext {
            camera: &camera,
            views: &views,
            screen: SCREEN,
        };
        let mut canvas = RecordingCanvas::default();

        for pos in [
            DVec3::new(-411.0, 0.0, 0.0),
            DVec3::new(410.0, 0.0, 0.0),
            DVec3::new(0.0, 0.0, -301.0),
            DVec3::new(0.0, 0.0, 330.0),
        ] {
            let mut sprite = StackedSprite::from_sheet("crate");
            sprite.set_world_pos(pos);
            assert_eq!(sprite.render(&ctx, &mut canvas), RenderOutcome::Culled, "{pos}");
        }
        assert_eq!(requests.load(Ordering::SeqCst), 0);
        assert!(canvas.draws.is_empty());
    }

    #[test]
    fn test_render_partially_visible_is_drawn() {
        let (views, requests, _) = counting_store("crate", Some(RgbaImage::new(20, 30)));
        let camera = Camera::default();
        let ctx = RenderContext {
            camera: &camera,
            views: &views,
            screen: SCREEN,
        };
        let mut canvas = RecordingCanvas::default();
        let mut sprite = StackedSprite::from_sheet("crate");
        sprite.set_world_xyz(-405.0, 0.0, 0.0);

        assert_eq!(sprite.render(&ctx, &mut canvas), RenderOutcome::Drawn);
        assert_eq!(requests.load(Ordering::SeqCst), 1);
        assert_eq!(canvas.draws, vec![(20, 30, -15, 270)]);
    }

    #[test]
    fn test_render_cache_miss_is_silent_skip() {
        let (views, requests, _) = counting_store("crate", None);
        let camera = Camera::default();
        let ctx = RenderContext {
            camera: &camera,
            views: &views,
            screen: SCREEN,
        };
        let mut canvas = RecordingCanvas::default();
        let mut sprite = StackedSprite::from_sheet("crate");

        assert_eq!(sprite.render(&ctx, &mut canvas), RenderOutcome::NoImage);
        assert_eq!(requests.load(Ordering::SeqCst), 1);
        assert!(canvas.draws.is_empty());
    }

    #[test]
    fn test_render_asks_view_for_visual_rotation() {
        let (views, _, last_rotation) = counting_store("crate", Some(RgbaImage::new(20, 30)));
        let camera = Camera::new(DVec3::ZERO, 1.0, 100.0);
        let ctx = RenderContext {
            camera: &camera,
            views: &views,
            screen: SCREEN,
        };
        let mut canvas = RecordingCanvas::default();
        let mut sprite = StackedSprite::from_sheet("crate");
        sprite.set_world_rotation(40.0);

        sprite.render(&ctx, &mut canvas);
        assert!(approx_eq(*last_rotation.lock().unwrap(), 300.0));
    }
}
