//! Per-frame render counters.
//!
//! Filled by the render system so hosts and tests can see how many sprites
//! were drawn and why the rest were skipped.

use bevy_ecs::prelude::Resource;

use crate::components::worldobject::RenderOutcome;

#[derive(Resource, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub drawn: usize,
    pub culled: usize,
    /// Frame name had no registered view.
    pub no_view: usize,
    /// View had no image for the requested rotation and zoom.
    pub no_image: usize,
}

impl RenderStats {
    pub fn record(&mut self, outcome: RenderOutcome) {
        match outcome {
            RenderOutcome::Drawn => self.drawn += 1,
            RenderOutcome::Culled => self.culled += 1,
            RenderOutcome::NoView => self.no_view += 1,
            RenderOutcome::NoImage => self.no_image += 1,
        }
    }

    pub fn skipped(&self) -> usize {
        self.culled + self.no_view + self.no_image
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
