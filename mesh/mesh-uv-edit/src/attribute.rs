//! Color attributes stored on an editable mesh.

use mesh_loops::{ByteRgba, Rgba};
use serde::{Deserialize, Serialize};

use crate::error::{EditError, EditResult};

/// Which mesh elements an attribute has one value for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeDomain {
    /// One value per face corner (loop).
    Corner,
    /// One value per vertex.
    Point,
}

/// Storage precision of a color attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorDataType {
    /// 8 bits per channel.
    ByteColor,
    /// 32-bit float per channel.
    FloatColor,
}

/// Attribute values in their storage precision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ColorData {
    /// 8-bit colors.
    Byte(Vec<ByteRgba>),
    /// Float colors.
    Float(Vec<Rgba>),
}

/// A named color layer on a mesh.
///
/// # Example
///
/// ```
/// use mesh_uv_edit::{AttributeDomain, ColorAttribute, ColorDataType};
///
/// let mut attr = ColorAttribute::new("Color_ID", AttributeDomain::Corner, ColorDataType::ByteColor, 2);
/// attr.write_rgba(&[1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0]).unwrap();
/// assert_eq!(attr.color(1).unwrap().b, 1.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorAttribute {
    name: String,
    domain: AttributeDomain,
    data: ColorData,
}

impl ColorAttribute {
    /// Create an attribute with `len` transparent black values.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        domain: AttributeDomain,
        data_type: ColorDataType,
        len: usize,
    ) -> Self {
        let data = match data_type {
            ColorDataType::ByteColor => ColorData::Byte(vec![ByteRgba::default(); len]),
            ColorDataType::FloatColor => ColorData::Float(vec![Rgba::new(0.0, 0.0, 0.0, 0.0); len]),
        };
        Self {
            name: name.into(),
            domain,
            data,
        }
    }

    /// Attribute name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attribute domain.
    #[must_use]
    pub fn domain(&self) -> AttributeDomain {
        self.domain
    }

    /// Storage precision.
    #[must_use]
    pub fn data_type(&self) -> ColorDataType {
        match self.data {
            ColorData::Byte(_) => ColorDataType::ByteColor,
            ColorData::Float(_) => ColorDataType::FloatColor,
        }
    }

    /// Raw values.
    #[must_use]
    pub fn data(&self) -> &ColorData {
        &self.data
    }

    /// Number of values.
    #[must_use]
    pub fn len(&self) -> usize {
        match &self.data {
            ColorData::Byte(values) => values.len(),
            ColorData::Float(values) => values.len(),
        }
    }

    /// Whether the attribute has no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// One value as a float color.
    #[must_use]
    pub fn color(&self, index: usize) -> Option<Rgba> {
        match &self.data {
            ColorData::Byte(values) => values.get(index).map(|c| c.to_float()),
            ColorData::Float(values) => values.get(index).copied(),
        }
    }

    /// Overwrite every value from a flat `[r, g, b, a, ...]` buffer.
    ///
    /// Byte attributes round each channel to nearest. Nothing is written
    /// unless the buffer has exactly four channels per value.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::AttributeLength`] if the buffer does not match
    /// the attribute length.
    pub fn write_rgba(&mut self, flat: &[f32]) -> EditResult<()> {
        let colors: &[Rgba] = bytemuck::try_cast_slice(flat)
            .ok()
            .filter(|colors: &&[Rgba]| colors.len() == self.len())
            .ok_or_else(|| EditError::AttributeLength {
                name: self.name.clone(),
                expected: self.len() * 4,
                actual: flat.len(),
            })?;

        match &mut self.data {
            ColorData::Byte(values) => {
                for (dst, src) in values.iter_mut().zip(colors) {
                    *dst = src.to_bytes();
                }
            }
            ColorData::Float(values) => values.copy_from_slice(colors),
        }
        Ok(())
    }
}
