//! Animation definition registry.
//!
//! Definitions are immutable and shared between entities; each entity plays
//! its own [`Animation`] instance created from the registry. Definitions can
//! be registered in code or loaded from a JSON object mapping names to
//! definitions:
//!
//! ```json
//! {
//!   "tree_sway": { "frames": ["tree_0", "tree_1"], "frame_ticks": 8 },
//!   "rock":      { "frames": ["rock"] }
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use bevy_ecs::prelude::Resource;
use log::{debug, info};
use rustc_hash::FxHashMap;

use crate::components::animation::{Animation, AnimationDef};

/// Central registry of reusable animation definitions keyed by string IDs.
#[derive(Resource, Default)]
pub struct AnimationStore {
    pub animations: FxHashMap<String, Arc<AnimationDef>>,
}

impl AnimationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition and return the shared handle.
    pub fn insert(&mut self, name: impl Into<String>, def: AnimationDef) -> Arc<AnimationDef> {
        let name = name.into();
        debug!("Registered animation '{}' ({} frames)", name, def.frame_count());
        let def = Arc::new(def);
        self.animations.insert(name, def.clone());
        def
    }

    pub fn get(&self, name: &str) -> Option<&Arc<AnimationDef>> {
        self.animations.get(name)
    }

    /// A fresh playback instance of the named definition, rewound to its start.
    pub fn instance(&self, name: &str) -> Option<Animation> {
        self.animations.get(name).cloned().map(Animation::new)
    }

    /// Parse definitions from a JSON string and register them.
    ///
    /// Returns the number of definitions registered.
    pub fn load_from_json_str(&mut self, json: &str) -> Result<usize, String> {
        let defs: BTreeMap<String, AnimationDef> = serde_json::from_str(json)
            .map_err(|e| format!("Failed to parse animation definitions: {}", e))?;
        let count = defs.len();
        for (name, def) in defs {
            self.insert(name, def);
        }
        Ok(count)
    }

    /// Load definitions from a JSON file and register them.
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> Result<usize, String> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        let count = self.load_from_json_str(&json)?;
        info!("Loaded {} animations from {:?}", count, path);
        Ok(count)
    }
}
