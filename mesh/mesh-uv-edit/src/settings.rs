//! Tool settings, loadable from TOML.

use std::path::Path;

use mesh_color_id::BakeParams;
use serde::{Deserialize, Serialize};

use crate::error::{EditError, EditResult};

/// User-facing defaults for the UV tools.
///
/// Every field is optional in TOML; missing fields take their defaults.
///
/// # Example
///
/// ```
/// use mesh_uv_edit::ToolSettings;
///
/// let settings = ToolSettings::from_toml_str(r#"
///     rectify_keep_bounds = true
///
///     [bake]
///     palette_size = 12
/// "#).unwrap();
///
/// assert!(settings.rectify_keep_bounds);
/// assert!(settings.auto_switch_view);
/// assert_eq!(settings.bake.palette_size, 12);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolSettings {
    /// Rectify fits the result to the selection's old bounds instead of `0..1`.
    ///
    /// Default: `false`
    pub rectify_keep_bounds: bool,

    /// Switch the viewport to vertex-color shading after a Color-ID bake.
    ///
    /// Default: `true`
    pub auto_switch_view: bool,

    /// Color-ID engine parameters.
    pub bake: BakeParams,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            rectify_keep_bounds: false,
            auto_switch_view: true,
            bake: BakeParams::default(),
        }
    }
}

impl ToolSettings {
    /// Parse settings from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::Settings`] on malformed TOML or mistyped fields.
    pub fn from_toml_str(text: &str) -> EditResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::Io`] if the file cannot be read and
    /// [`EditError::Settings`] if it cannot be parsed.
    pub fn load(path: impl AsRef<Path>) -> EditResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| EditError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesh_color_id::ColorStrategy;

    #[test]
    fn empty_text_gives_defaults() {
        assert_eq!(ToolSettings::from_toml_str("").unwrap(), ToolSettings::default());
    }

    #[test]
    fn nested_bake_params() {
        let settings = ToolSettings::from_toml_str(
            r#"
            auto_switch_view = false

            [bake]
            uv_epsilon = 0.0
            strategy = "lowest_free"
            "#,
        )
        .unwrap();

        assert!(!settings.auto_switch_view);
        assert_eq!(settings.bake.uv_epsilon, 0.0);
        assert_eq!(settings.bake.strategy, ColorStrategy::LowestFree);
        assert_eq!(settings.bake.palette_size, 32);
    }

    #[test]
    fn mistyped_field_is_rejected() {
        let err = ToolSettings::from_toml_str("auto_switch_view = 3").unwrap_err();
        assert!(matches!(err, EditError::Settings(_)));
    }

    #[test]
    fn missing_file() {
        let err = ToolSettings::load("/nonexistent/uv-tools.toml").unwrap_err();
        assert!(matches!(err, EditError::Io { .. }));
    }
}
