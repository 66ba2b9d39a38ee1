//! Ground-plane geometry.
//!
//! Positions are `glam::Vec3` with `y` pointing up; vehicles move in the
//! `x`/`z` ground plane.  Headings are in degrees, measured from the `+z`
//! axis toward `+x`, and normalised to `[-180, 180)`:
//!
//! ```text
//!   heading   0° → (0, 0, 1)
//!   heading  90° → (1, 0, 0)
//!   heading 180° → (0, 0, -1)
//! ```

use glam::{Vec2, Vec3};
use thiserror::Error;

/// Returned when a direction has (near-)zero length and no heading can be
/// derived from it.  The steering controller recovers from this locally by
/// keeping its previous heading; it never escapes that crate.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("degenerate direction vector ({x}, {z})")]
pub struct DegenerateVector {
    pub x: f32,
    pub z: f32,
}

/// Squared lengths below this are treated as zero.
pub const DEGENERATE_LEN_SQ: f32 = 1e-12;

/// Project a world position onto the ground plane as `(x, z)`.
#[inline]
pub fn planar(v: Vec3) -> Vec2 {
    Vec2::new(v.x, v.z)
}

/// Ground-plane distance between two positions (height is ignored).
#[inline]
pub fn planar_distance(a: Vec3, b: Vec3) -> f32 {
    planar(a).distance(planar(b))
}

/// Heading (degrees) of a ground-plane direction.
pub fn heading_of(dir: Vec2) -> Result<f32, DegenerateVector> {
    if dir.length_squared() < DEGENERATE_LEN_SQ || !dir.is_finite() {
        return Err(DegenerateVector { x: dir.x, z: dir.y });
    }
    Ok(wrap_deg(dir.x.atan2(dir.y).to_degrees()))
}

/// Unit ground-plane direction for a heading in degrees.
#[inline]
pub fn heading_vector(heading_deg: f32) -> Vec2 {
    let r = heading_deg.to_radians();
    Vec2::new(r.sin(), r.cos())
}

/// Lift a ground-plane vector back into world space at height `y`.
#[inline]
pub fn lift(v: Vec2, y: f32) -> Vec3 {
    Vec3::new(v.x, y, v.y)
}

/// Wrap an angle in degrees into `[-180, 180)`.
#[inline]
pub fn wrap_deg(a: f32) -> f32 {
    (a + 180.0).rem_euclid(360.0) - 180.0
}

/// Shortest signed turn from `from` to `to`, in `[-180, 180)` degrees.
/// Positive means clockwise seen from above (toward `+x` from `+z`).
#[inline]
pub fn shortest_turn(from: f32, to: f32) -> f32 {
    wrap_deg(to - from)
}

/// Right-hand perpendicular of a ground-plane direction (heading + 90°).
#[inline]
pub fn right_of(dir: Vec2) -> Vec2 {
    Vec2::new(dir.y, -dir.x)
}
