/// Fast mathematical operations using SIMD-accelerated `glam` types.
///
/// Pointer positions, drag offsets and grid origins are all [`Vec2`].
///
/// # Examples
///
/// ```
/// use absgrid_core::math::Vec2;
///
/// let pointer = Vec2::new(120.0, 48.0);
/// let grab = Vec2::new(20.0, 8.0);
/// assert_eq!(pointer - grab, Vec2::new(100.0, 40.0));
/// ```
///
/// [`glam`]: https://docs.rs/glam
pub mod fast {
    pub use glam::*;
}

pub use fast::*;

/// Round to the nearest integer pixel, halves rounding towards positive infinity.
///
/// `f32::round` sends `-0.5` to `-1.0`; browsers snap it to `0.0`, and grab offsets
/// must agree with them.
#[inline]
pub fn round_px(v: f32) -> f32 {
    (v + 0.5).floor()
}

/// [`round_px`] applied to both components.
#[inline]
pub fn round_vec(v: Vec2) -> Vec2 {
    Vec2::new(round_px(v.x), round_px(v.y))
}
