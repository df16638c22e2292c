//! Invocation options.

use serde::{Deserialize, Serialize};

use crate::error::{LcError, Result};

/// Vector reference map carrying per-class colors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeSource {
    pub referencemap: String,
    /// Colors as `r:g:b`.
    pub color_column: String,
    pub class_column: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorOptions {
    /// Land cover raster to color.
    pub map: String,
    #[serde(default)]
    pub attribute: Option<AttributeSource>,
}

impl ColorOptions {
    /// Build options from the raw parameters.
    ///
    /// `referencemap`, `color_column` and `class_column` are all required
    /// together or all omitted.
    pub fn from_parts(
        map: impl Into<String>,
        referencemap: Option<String>,
        color_column: Option<String>,
        class_column: Option<String>,
    ) -> Result<Self> {
        let attribute = match (referencemap, color_column, class_column) {
            (None, None, None) => None,
            (Some(referencemap), Some(color_column), Some(class_column)) => Some(AttributeSource {
                referencemap,
                color_column,
                class_column,
            }),
            (r, co, cl) => {
                let missing = [("referencemap", r.is_none()), ("color_column", co.is_none()), ("class_column", cl.is_none())]
                    .into_iter()
                    .filter_map(|(name, absent)| absent.then_some(name))
                    .collect();
                return Err(LcError::IncompleteAttributeSource { missing });
            }
        };
        let opts = Self { map: map.into(), attribute };
        opts.validate()?;
        Ok(opts)
    }

    /// Parse options from JSON, e.g. `{"map": "landcover"}`.
    pub fn from_json(text: &str) -> Result<Self> {
        let opts: Self = serde_json::from_str(text)?;
        opts.validate()?;
        Ok(opts)
    }

    pub fn validate(&self) -> Result<()> {
        if self.map.trim().is_empty() {
            return Err(LcError::EmptyMapName);
        }
        Ok(())
    }
}
