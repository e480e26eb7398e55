//! Pre-rendered sprite stack views.
//!
//! A view owns the rotated and scaled renditions of one stacked image. How
//! those renditions are produced and cached is up to each [`SprackView`]
//! implementation; the engine only asks for the image at a given visual
//! rotation and zoom, together with its anchor offsets.
//!
//! The anchor is the bottom-center of the lowest stacked layer. Offsets are
//! measured in pixels from the transformed image's top-left corner.

use std::sync::Arc;

use bevy_ecs::prelude::Resource;
use image::RgbaImage;
use log::debug;
use rustc_hash::FxHashMap;

/// Source of transformed images for one sprite stack.
///
/// `rotation` is the on-screen rotation in degrees, already normalized to
/// `[0, 360)`. `zoom` is the camera zoom.
pub trait SprackView: Send + Sync {
    /// Horizontal offset from the image's left edge to the anchor.
    fn anchor_x(&self, rotation: f64, zoom: f64) -> i32;
    /// Vertical offset from the image's top edge to the anchor.
    fn anchor_y(&self, rotation: f64, zoom: f64) -> i32;
    /// Full height of the transformed image.
    fn transformed_height(&self, rotation: f64, zoom: f64) -> i32;
    /// The transformed image, or `None` if it is not available (yet).
    fn transformed_image(&self, rotation: f64, zoom: f64) -> Option<Arc<RgbaImage>>;
}

/// A view that shows the same image at every rotation and zoom.
///
/// Useful for flat props and placeholders while real renditions warm up.
pub struct FixedView {
    image: Arc<RgbaImage>,
    anchor_x: i32,
    anchor_y: i32,
}

impl FixedView {
    /// Anchor the image at its bottom-center.
    pub fn new(image: RgbaImage) -> Self {
        let anchor_x = (image.width() / 2) as i32;
        let anchor_y = image.height() as i32;
        Self {
            image: Arc::new(image),
            anchor_x,
            anchor_y,
        }
    }

    /// Override the anchor, e.g. when the lowest layer sits above the image's bottom edge.
    pub fn with_anchor(mut self, anchor_x: i32, anchor_y: i32) -> Self {
        self.anchor_x = anchor_x;
        self.anchor_y = anchor_y;
        self
    }
}

impl SprackView for FixedView {
    fn anchor_x(&self, _rotation: f64, _zoom: f64) -> i32 {
        self.anchor_x
    }

    fn anchor_y(&self, _rotation: f64, _zoom: f64) -> i32 {
        self.anchor_y
    }

    fn transformed_height(&self, _rotation: f64, _zoom: f64) -> i32 {
        self.image.height() as i32
    }

    fn transformed_image(&self, _rotation: f64, _zoom: f64) -> Option<Arc<RgbaImage>> {
        Some(self.image.clone())
    }
}

/// Registry of views keyed by sheet name.
///
/// Animation frame names are looked up here every frame. A missing name is
/// not an error; the sprite simply isn't drawn.
#[derive(Resource, Default)]
pub struct ViewStore {
    views: FxHashMap<String, Arc<dyn SprackView>>,
}

impl ViewStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the view for `name`.
    pub fn insert(&mut self, name: impl Into<String>, view: impl SprackView + 'static) {
        let name = name.into();
        debug!("Registered sprack view '{}'", name);
        self.views.insert(name, Arc::new(view));
    }

    pub fn get(&self, name: &str) -> Option<&dyn SprackView> {
        self.views.get(name).map(Arc::as_ref)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.views.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> bool {
        self.views.remove(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }
}
