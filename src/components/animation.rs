//! Frame-name animations for stacked sprites.
//!
//! An [`AnimationDef`] is an immutable list of view names shared between
//! entities through an [`Arc`]. An [`Animation`] is one entity's playback of
//! such a definition: it owns the progress (frame index, tick counter, looped
//! flag) and must not be shared between entities.
//!
//! Playback is tick-driven: one call to [`Animation::update`] per rendered
//! frame.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Immutable description of a frame sequence.
///
/// Frame names are keys into the
/// [`ViewStore`](crate::resources::viewstore::ViewStore).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationDef {
    /// View names, in playback order.
    pub frames: Vec<String>,
    /// Ticks each frame stays on screen. `None` for a still sequence.
    #[serde(default)]
    pub frame_ticks: Option<u32>,
}

impl AnimationDef {
    pub fn new<S: Into<String>>(frames: impl IntoIterator<Item = S>, frame_ticks: u32) -> Self {
        Self {
            frames: frames.into_iter().map(Into::into).collect(),
            frame_ticks: Some(frame_ticks),
        }
    }

    /// A single frame that never advances.
    pub fn still(name: impl Into<String>) -> Self {
        Self {
            frames: vec![name.into()],
            frame_ticks: None,
        }
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}

/// Per-entity playback state over a shared [`AnimationDef`].
///
/// Cloning an `Animation` yields the *same* animation as far as
/// [`Animation::is_same`] is concerned, since identity follows the shared
/// definition.
#[derive(Debug, Clone)]
pub struct Animation {
    def: Arc<AnimationDef>,
    frame_index: usize,
    tick: u32,
    looped: bool,
}

impl Animation {
    pub fn new(def: Arc<AnimationDef>) -> Self {
        Self {
            def,
            frame_index: 0,
            tick: 0,
            looped: false,
        }
    }

    /// Wrap a single sheet name in a still animation.
    pub fn still(name: impl Into<String>) -> Self {
        Self::new(Arc::new(AnimationDef::still(name)))
    }

    pub fn def(&self) -> &Arc<AnimationDef> {
        &self.def
    }

    /// True when both animations play the same shared definition.
    pub fn is_same(&self, other: &Animation) -> bool {
        Arc::ptr_eq(&self.def, &other.def)
    }

    /// Rewind to the first frame and clear the looped flag.
    pub fn reset(&mut self) {
        self.frame_index = 0;
        self.tick = 0;
        self.looped = false;
    }

    /// Advance by one tick.
    pub fn update(&mut self) {
        let Some(frame_ticks) = self.def.frame_ticks else {
            return;
        };
        let count = self.def.frame_count();
        if count == 0 {
            return;
        }
        self.tick += 1;
        if self.tick < frame_ticks.max(1) {
            return;
        }
        self.tick = 0;
        self.frame_index += 1;
        if self.frame_index >= count {
            self.frame_index = 0;
            self.looped = true;
        }
    }

    /// Whether the sequence has wrapped past its last frame since the last reset.
    pub fn has_looped(&self) -> bool {
        self.looped
    }

    pub fn frame_index(&self) -> usize {
        self.frame_index
    }

    /// View name of the current frame, or `None` for an empty definition.
    pub fn current_frame_name(&self) -> Option<&str> {
        self.def.frames.get(self.frame_index).map(String::as_str)
    }
}
