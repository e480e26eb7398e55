//! Sprite stack library.
//!
//! Renders pseudo-3D "sprite stacks" (objects pre-rendered from stacked 2D
//! layers) as world actors on a 2D canvas, driven by a `bevy_ecs` world.
//! This module exposes the components, resources and systems for use in
//! integration tests and as a reusable library.

pub mod components;
pub mod game;
pub mod resources;
pub mod systems;
