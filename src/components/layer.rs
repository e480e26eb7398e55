//! Render layer for stacked sprites.
//!
//! The [`Layer`] tag controls drawing order. Sprites on higher layers are
//! drawn later (on top). Within one layer, spawn order is kept.

/// Rendering order tag assigned when a sprite is created.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Layer(pub i32);

impl Layer {
    /// Floor tiles, shadows and other things everything else stands on.
    pub const BACKGROUND: Layer = Layer(-100);
    pub const SPRACK_DEFAULT: Layer = Layer(0);
    /// Effects drawn over all stacked sprites.
    pub const FOREGROUND: Layer = Layer(100);
}

impl Default for Layer {
    fn default() -> Self {
        Layer::SPRACK_DEFAULT
    }
}
