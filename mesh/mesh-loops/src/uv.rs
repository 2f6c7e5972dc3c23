//! UV coordinates and corner colors.

use bytemuck::{Pod, Zeroable};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A texture coordinate stored on one corner (loop).
///
/// The layout is two packed `f32`s, so an interleaved `[u, v, u, v, ...]`
/// buffer can be viewed as `&[Uv]` without copying (see [`Uv::cast_slice`]).
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(C)]
pub struct Uv {
    /// Horizontal texture coordinate.
    pub u: f32,
    /// Vertical texture coordinate.
    pub v: f32,
}

impl Uv {
    /// Create a UV coordinate.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_loops::Uv;
    ///
    /// let uv = Uv::new(0.25, 0.75);
    /// assert_eq!(uv.u, 0.25);
    /// ```
    #[inline]
    #[must_use]
    pub const fn new(u: f32, v: f32) -> Self {
        Self { u, v }
    }

    /// Check whether two coordinates are the same point in UV space.
    ///
    /// Components that are bit-identical always match, including `NaN`
    /// payloads, so identical input never splits an island. Otherwise each
    /// component must differ by strictly less than `epsilon`; an epsilon of
    /// `0.0` therefore means bit-exact comparison.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_loops::Uv;
    ///
    /// let a = Uv::new(0.5, 0.5);
    /// assert!(a.matches(Uv::new(0.50001, 0.5), 1e-4));
    /// assert!(!a.matches(Uv::new(0.50001, 0.5), 0.0));
    /// ```
    #[inline]
    #[must_use]
    pub fn matches(self, other: Self, epsilon: f32) -> bool {
        component_matches(self.u, other.u, epsilon) && component_matches(self.v, other.v, epsilon)
    }

    /// View an interleaved `[u, v, u, v, ...]` buffer as UV coordinates.
    ///
    /// Returns `None` when the buffer has an odd number of components.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_loops::Uv;
    ///
    /// let flat = [0.0, 1.0, 0.5, 0.25];
    /// let uvs = Uv::cast_slice(&flat).unwrap();
    /// assert_eq!(uvs[1], Uv::new(0.5, 0.25));
    /// assert!(Uv::cast_slice(&flat[..3]).is_none());
    /// ```
    #[must_use]
    pub fn cast_slice(flat: &[f32]) -> Option<&[Self]> {
        bytemuck::try_cast_slice(flat).ok()
    }

    /// View UV coordinates as an interleaved `[u, v, ...]` buffer.
    #[must_use]
    pub fn flatten(uvs: &[Self]) -> &[f32] {
        bytemuck::cast_slice(uvs)
    }
}

impl From<(f32, f32)> for Uv {
    fn from((u, v): (f32, f32)) -> Self {
        Self::new(u, v)
    }
}

#[inline]
fn component_matches(a: f32, b: f32, epsilon: f32) -> bool {
    a.to_bits() == b.to_bits() || (a - b).abs() < epsilon
}

/// Floating point RGBA color with channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(C)]
pub struct Rgba {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel.
    pub a: f32,
}

impl Rgba {
    /// Create a color from its four channels.
    #[inline]
    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create a fully opaque color.
    #[inline]
    #[must_use]
    pub const fn opaque(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Create an opaque color from hue, saturation and value, all in `[0, 1]`.
    ///
    /// A hue of exactly `1.0` wraps around to red.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_loops::Rgba;
    ///
    /// let red = Rgba::from_hsv(0.0, 1.0, 1.0);
    /// assert_eq!(red, Rgba::opaque(1.0, 0.0, 0.0));
    /// ```
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    // Truncation is the sector index: h is reduced to [0, 1) before * 6.0
    pub fn from_hsv(h: f32, s: f32, v: f32) -> Self {
        let h = h.rem_euclid(1.0) * 6.0;
        let sector = h.floor();
        let f = h - sector;
        let p = v * (1.0 - s);
        let q = v * (1.0 - f * s);
        let t = v * (1.0 - (1.0 - f) * s);

        let (r, g, b) = match (sector as u32) % 6 {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        };
        Self::opaque(r, g, b)
    }

    /// The channels as an array in `[r, g, b, a]` order.
    #[inline]
    #[must_use]
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Quantize to 8 bits per channel, rounding to nearest.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_loops::{ByteRgba, Rgba};
    ///
    /// let c = Rgba::opaque(1.0, 0.5, 0.0).to_bytes();
    /// assert_eq!(c, ByteRgba::new(255, 128, 0, 255));
    /// ```
    #[inline]
    #[must_use]
    pub fn to_bytes(self) -> ByteRgba {
        ByteRgba::new(
            quantize_channel(self.r),
            quantize_channel(self.g),
            quantize_channel(self.b),
            quantize_channel(self.a),
        )
    }
}

/// Quantize one `[0, 1]` channel to a byte. Out-of-range input is clamped
/// and `NaN` maps to zero.
#[inline]
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
// Truncation and sign loss are safe: values are clamped to [0.0, 1.0] before * 255.0
pub fn quantize_channel(value: f32) -> u8 {
    if value.is_nan() {
        return 0;
    }
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// RGBA color with 8-bit channels, the layout of a byte color attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Pod, Zeroable)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(C)]
pub struct ByteRgba {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl ByteRgba {
    /// Create a byte color from its four channels.
    #[inline]
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Convert back to floating point channels.
    #[inline]
    #[must_use]
    pub fn to_float(self) -> Rgba {
        Rgba::new(
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
            f32::from(self.a) / 255.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn matches_is_symmetric() {
        let a = Uv::new(0.1, 0.2);
        let b = Uv::new(0.10005, 0.2);
        assert!(a.matches(b, 1e-4));
        assert!(b.matches(a, 1e-4));
    }

    #[test]
    fn matches_rejects_distant_points() {
        let a = Uv::new(0.0, 0.0);
        let b = Uv::new(0.0, 0.001);
        assert!(!a.matches(b, 1e-4));
    }

    #[test]
    fn matches_bit_identical_nan() {
        let a = Uv::new(f32::NAN, 0.0);
        assert!(a.matches(a, 0.0));
        assert!(a.matches(a, 1e-4));
    }

    #[test]
    fn exact_mode_accepts_identical_values() {
        let a = Uv::new(0.3, 0.7);
        assert!(a.matches(Uv::new(0.3, 0.7), 0.0));
    }

    #[test]
    fn flatten_round_trips_cast() {
        let uvs = vec![Uv::new(1.0, 2.0), Uv::new(3.0, 4.0)];
        let flat = Uv::flatten(&uvs);
        assert_eq!(flat, &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(Uv::cast_slice(flat), Some(uvs.as_slice()));
    }

    #[test]
    fn hsv_primary_sectors() {
        assert_eq!(Rgba::from_hsv(1.0 / 3.0, 1.0, 1.0).to_bytes(), ByteRgba::new(0, 255, 0, 255));
        assert_eq!(Rgba::from_hsv(2.0 / 3.0, 1.0, 1.0).to_bytes(), ByteRgba::new(0, 0, 255, 255));
        assert_eq!(Rgba::from_hsv(1.0, 1.0, 1.0), Rgba::from_hsv(0.0, 1.0, 1.0));
    }

    #[test]
    fn hsv_zero_saturation_is_grey() {
        let c = Rgba::from_hsv(0.4, 0.0, 0.5);
        assert_relative_eq!(c.r, 0.5);
        assert_relative_eq!(c.g, 0.5);
        assert_relative_eq!(c.b, 0.5);
        assert_relative_eq!(c.a, 1.0);
    }

    #[test]
    fn quantize_clamps_and_handles_nan() {
        assert_eq!(quantize_channel(-1.0), 0);
        assert_eq!(quantize_channel(2.0), 255);
        assert_eq!(quantize_channel(f32::NAN), 0);
    }

    #[test]
    fn byte_color_to_float() {
        let c = ByteRgba::new(255, 0, 255, 255).to_float();
        assert_relative_eq!(c.r, 1.0);
        assert_relative_eq!(c.g, 0.0);
    }
}
