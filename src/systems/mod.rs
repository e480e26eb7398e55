//! Engine systems.
//!
//! Submodules overview
//! - [`render`] – clear the frame canvas, then tick and draw stacked sprites

pub mod render;
