//! Angle helpers for world and camera rotation.
//!
//! All rotations in the engine are expressed in degrees. Stored rotations are
//! kept in the canonical range `[0, 360)`; raw inputs may be any finite value.

/// Degrees in one full turn.
pub const FULL_TURN: f64 = 360.0;

/// Wrap an angle in degrees into `[0, 360)`.
///
/// Uses Euclidean remainder, so negative inputs wrap forward:
/// `-90` becomes `270`, `-720` becomes `0`.
pub fn normalize_angle(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(FULL_TURN);
    // rem_euclid rounds tiny negative inputs up to exactly 360.0
    if wrapped >= FULL_TURN { 0.0 } else { wrapped }
}
