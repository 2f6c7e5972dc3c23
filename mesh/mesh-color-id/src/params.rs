//! Configuration for Color-ID baking.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{ColorIdError, ColorIdResult};

/// How palette slots are chosen for islands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ColorStrategy {
    /// Each island starts from a slot hashed from its smallest face index and
    /// walks the palette until no already-colored neighbor uses the slot.
    ///
    /// An island's color depends only on its own identity and its
    /// lower-id neighbors, so editing one part of a mesh leaves the colors
    /// of unrelated islands alone.
    #[default]
    Hashed,

    /// Welsh-Powell greedy coloring: islands in descending degree order
    /// (ties by id) take the lowest slot no neighbor uses.
    ///
    /// Uses few distinct colors, but colors shift whenever the island graph
    /// changes anywhere.
    LowestFree,
}

/// Configuration for a Color-ID bake.
///
/// # Example
///
/// ```
/// use mesh_color_id::{BakeParams, ColorStrategy};
///
/// // Use defaults
/// let params = BakeParams::default();
///
/// // Or customize
/// let params = BakeParams::default()
///     .with_uv_epsilon(0.0)
///     .with_palette_size(12)
///     .with_strategy(ColorStrategy::LowestFree);
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BakeParams {
    /// Tolerance for treating two corner UVs as the same point.
    ///
    /// Bit-identical UVs always match. `0.0` means bit-exact comparison.
    /// Default: `1e-4`
    pub uv_epsilon: f32,

    /// Number of palette slots cycled through before the palette grows.
    ///
    /// Default: `32`
    pub palette_size: u32,

    /// HSV saturation of generated colors.
    ///
    /// Default: `0.85`
    pub saturation: f32,

    /// HSV value (brightness) of generated colors.
    ///
    /// Default: `0.95`
    pub value: f32,

    /// Slot assignment strategy.
    pub strategy: ColorStrategy,

    /// Whether to use parallel processing (via rayon).
    ///
    /// Default: `true`
    pub parallel: bool,

    /// Minimum face count before parallel processing kicks in.
    ///
    /// Default: `65_536`
    pub parallel_threshold: usize,
}

impl Default for BakeParams {
    fn default() -> Self {
        Self {
            uv_epsilon: 1e-4,
            palette_size: 32,
            saturation: 0.85,
            value: 0.95,
            strategy: ColorStrategy::default(),
            parallel: true,
            parallel_threshold: 65_536,
        }
    }
}

impl BakeParams {
    /// Create params that only join bit-identical UVs.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_color_id::BakeParams;
    ///
    /// assert_eq!(BakeParams::exact().uv_epsilon, 0.0);
    /// ```
    #[must_use]
    pub fn exact() -> Self {
        Self {
            uv_epsilon: 0.0,
            ..Default::default()
        }
    }

    /// Create params tuned for meshes with a million faces or more.
    ///
    /// Parallelizes from a lower face count and uses a larger palette.
    #[must_use]
    pub fn for_large_meshes() -> Self {
        Self {
            palette_size: 64,
            parallel: true,
            parallel_threshold: 16_384,
            ..Default::default()
        }
    }

    /// Set the UV matching tolerance.
    #[must_use]
    pub fn with_uv_epsilon(mut self, epsilon: f32) -> Self {
        self.uv_epsilon = epsilon;
        self
    }

    /// Set the palette size.
    #[must_use]
    pub fn with_palette_size(mut self, size: u32) -> Self {
        self.palette_size = size;
        self
    }

    /// Set saturation and value of generated colors.
    #[must_use]
    pub fn with_shading(mut self, saturation: f32, value: f32) -> Self {
        self.saturation = saturation;
        self.value = value;
        self
    }

    /// Set the slot assignment strategy.
    #[must_use]
    pub fn with_strategy(mut self, strategy: ColorStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Enable or disable parallel processing.
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set the face count above which work is parallelized.
    #[must_use]
    pub fn with_parallel_threshold(mut self, faces: usize) -> Self {
        self.parallel_threshold = faces;
        self
    }

    /// Whether a mesh with `face_count` faces should be processed in parallel.
    #[must_use]
    pub fn use_parallel(&self, face_count: usize) -> bool {
        self.parallel && face_count >= self.parallel_threshold
    }

    /// Check that every parameter is in range.
    ///
    /// # Errors
    ///
    /// Returns [`ColorIdError::InvalidParams`] naming the first bad parameter.
    pub fn validate(&self) -> ColorIdResult<()> {
        if !self.uv_epsilon.is_finite() || self.uv_epsilon < 0.0 {
            return Err(ColorIdError::invalid_param(
                "uv_epsilon",
                format!("must be finite and non-negative, got {}", self.uv_epsilon),
            ));
        }
        if self.palette_size < 2 {
            return Err(ColorIdError::invalid_param(
                "palette_size",
                format!("must be at least 2, got {}", self.palette_size),
            ));
        }
        for (name, channel) in [("saturation", self.saturation), ("value", self.value)] {
            if !(0.0..=1.0).contains(&channel) {
                return Err(ColorIdError::invalid_param(
                    name,
                    format!("must be in [0, 1], got {channel}"),
                ));
            }
        }
        Ok(())
    }
}
