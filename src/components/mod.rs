//! ECS components for entities.
//!
//! Submodules overview:
//! - [`animation`] – frame-name sequences and per-entity playback
//! - [`layer`] – rendering order tag for stacked sprites
//! - [`rotation`] – degree normalization into `[0, 360)`
//! - [`stackedsprite`] – the stacked sprite actor: animation slots, transform, render
//! - [`worldobject`] – positionable/rotatable/renderable trait and render context

pub mod animation;
pub mod layer;
pub mod rotation;
pub mod stackedsprite;
pub mod worldobject;
