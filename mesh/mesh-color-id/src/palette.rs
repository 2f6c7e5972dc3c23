//! Palette slots and their colors.

use mesh_loops::Rgba;

/// Golden-ratio conjugate used to spread successive hues around the wheel.
pub const GOLDEN_RATIO_CONJUGATE: f32 = 0.618_034;

/// Stable 64-bit mix (splitmix64 finalizer).
///
/// Depends only on the input, never on process state, so colors derived
/// from it survive restarts.
#[inline]
#[must_use]
pub fn stable_mix(x: u64) -> u64 {
    let mut z = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Preferred palette slot for an island, from its smallest face index.
#[inline]
#[must_use]
#[allow(clippy::cast_possible_truncation)]
// The remainder is below palette_size, which is a u32
pub fn preferred_slot(first_face: u32, palette_size: u32) -> u32 {
    (stable_mix(u64::from(first_face)) % u64::from(palette_size.max(1))) as u32
}

/// Hue of a slot: the fractional part of `slot * 0.618034`.
#[inline]
#[must_use]
#[allow(clippy::cast_possible_truncation)]
// The fraction is computed in f64 and only the final hue is narrowed
pub fn slot_hue(slot: u32) -> f32 {
    let h = f64::from(slot) * f64::from(GOLDEN_RATIO_CONJUGATE);
    (h - h.floor()) as f32
}

/// Opaque color of a palette slot.
///
/// # Example
///
/// ```
/// use mesh_color_id::slot_color;
///
/// let first = slot_color(0, 0.85, 0.95);
/// assert_eq!(first.a, 1.0);
/// assert_ne!(first, slot_color(1, 0.85, 0.95));
/// ```
#[inline]
#[must_use]
pub fn slot_color(slot: u32, saturation: f32, value: f32) -> Rgba {
    Rgba::from_hsv(slot_hue(slot), saturation, value)
}
