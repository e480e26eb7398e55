//! Demo scene.
//!
//! Registers a handful of procedurally built sprite stack views and
//! animations, spawns a field of crates around a pair of blinking beacons,
//! and slowly orbits the camera. Beacons play a one-time pulse animation at a
//! fixed interval.

use bevy_ecs::prelude::*;
use glam::DVec3;
use image::{Rgba, RgbaImage};
use log::info;

use crate::components::animation::AnimationDef;
use crate::components::layer::Layer;
use crate::components::stackedsprite::StackedSprite;
use crate::components::worldobject::WorldObject;
use crate::resources::animationstore::AnimationStore;
use crate::resources::camera::Camera;
use crate::resources::gameconfig::GameConfig;
use crate::resources::viewstore::{FixedView, ViewStore};

/// Frames between beacon pulses.
const PULSE_INTERVAL: u32 = 45;
const CRATE_SPACING: f64 = 24.0;

/// Tag for entities that pulse.
#[derive(Component, Clone, Copy, Debug)]
pub struct Beacon;

/// Build a pre-stacked image: `layers` square slices of `size` pixels, each
/// drawn one pixel above the previous and a bit brighter. The lowest slice
/// ends on the image's bottom row.
fn stack_image(size: u32, layers: u32, color: [u8; 3]) -> RgbaImage {
    let mut image = RgbaImage::new(size, size + layers.max(1) - 1);
    for layer in 0..layers {
        let shade = 0.5 + 0.5 * (layer as f32 / layers.max(1) as f32);
        let pixel = Rgba([
            (color[0] as f32 * shade) as u8,
            (color[1] as f32 * shade) as u8,
            (color[2] as f32 * shade) as u8,
            255,
        ]);
        let top = layers - 1 - layer;
        for y in top..top + size {
            for x in 0..size {
                image.put_pixel(x, y, pixel);
            }
        }
    }
    image
}

/// Register views and animations. Definitions already present in the
/// [`AnimationStore`] (e.g. loaded from JSON) are kept.
pub fn register_assets(views: &mut ViewStore, animations: &mut AnimationStore) {
    views.insert("crate", FixedView::new(stack_image(12, 8, [160, 110, 60])));
    views.insert("floor", FixedView::new(stack_image(16, 1, [60, 80, 60])));
    views.insert("beacon_on", FixedView::new(stack_image(6, 20, [250, 220, 80])));
    views.insert("beacon_off", FixedView::new(stack_image(6, 20, [120, 100, 40])));
    views.insert("beacon_flash", FixedView::new(stack_image(8, 24, [255, 255, 255])));

    if animations.get("beacon_blink").is_none() {
        animations.insert("beacon_blink", AnimationDef::new(["beacon_on", "beacon_off"], 15));
    }
    if animations.get("beacon_pulse").is_none() {
        animations.insert(
            "beacon_pulse",
            AnimationDef::new(["beacon_flash", "beacon_on", "beacon_flash"], 4),
        );
    }
}

/// Setup system: assets, camera and the initial entities.
pub fn setup(
    mut commands: Commands,
    config: Res<GameConfig>,
    mut views: ResMut<ViewStore>,
    mut animations: ResMut<AnimationStore>,
    mut camera: ResMut<Camera>,
) {
    register_assets(&mut views, &mut animations);
    camera.zoom = config.camera_zoom;

    let mut spawned = 0;
    for gx in -4..=4 {
        for gz in -4..=4 {
            let (x, z) = (gx as f64 * CRATE_SPACING, gz as f64 * CRATE_SPACING);
            let mut floor = StackedSprite::from_sheet_with_layer("floor", Layer::BACKGROUND);
            floor.set_world_pos(DVec3::new(x, 0.0, z));
            commands.spawn(floor);

            if (gx + gz) % 3 == 0 && (gx, gz) != (0, 0) {
                let mut crate_sprite = StackedSprite::from_sheet("crate");
                crate_sprite.set_world_xyz(x, 0.0, z);
                crate_sprite.set_world_rotation((gx * 30 + gz * 15) as f64);
                commands.spawn(crate_sprite);
                spawned += 1;
            }
        }
    }

    if let Some(blink) = animations.instance("beacon_blink") {
        for x in [-CRATE_SPACING * 0.5, CRATE_SPACING * 0.5] {
            let mut beacon = StackedSprite::new(blink.clone());
            beacon.set_world_xyz(x, 0.0, 0.0);
            commands.spawn((beacon, Beacon));
            spawned += 1;
        }
    }

    info!("Demo scene ready: {} stacked sprites on 81 floor tiles", spawned);
}

/// Per-frame demo logic: orbit the camera and pulse beacons.
pub fn update(
    mut frame: Local<u32>,
    config: Res<GameConfig>,
    animations: Res<AnimationStore>,
    mut camera: ResMut<Camera>,
    mut beacons: Query<&mut StackedSprite, With<Beacon>>,
) {
    *frame += 1;
    camera.rotation += config.camera_rotation_speed;

    if *frame % PULSE_INTERVAL == 0 {
        if let Some(pulse) = animations.instance("beacon_pulse") {
            for mut beacon in beacons.iter_mut() {
                beacon.play_one_time_animation(pulse.clone());
            }
        }
    }
}
