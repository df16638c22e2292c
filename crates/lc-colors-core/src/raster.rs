//! Raster-side data model: pixel types, categories, color tables and label sets.
//!
//! Category values are kept as the textual token reported by the statistics
//! source. Labels written for integer maps are that exact token, and color
//! rules reuse it unchanged.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{LcError, Result};

// ── Pixel type ────────────────────────────────────────────────────────────────

/// Cell storage type of a raster map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataType {
    /// `CELL`
    Integer,
    /// `FCELL`
    FloatSingle,
    /// `DCELL`
    FloatDouble,
}

impl DataType {
    /// Parse the GRASS datatype token (`CELL`, `FCELL`, `DCELL`).
    pub fn from_grass(token: &str) -> Result<Self> {
        match token.trim() {
            "CELL" => Ok(DataType::Integer),
            "FCELL" => Ok(DataType::FloatSingle),
            "DCELL" => Ok(DataType::FloatDouble),
            other => Err(LcError::UnknownDataType(other.to_string())),
        }
    }

    pub fn is_integer(self) -> bool {
        matches!(self, DataType::Integer)
    }
}

// ── Categories ────────────────────────────────────────────────────────────────

/// One entry of a map's category listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryEntry {
    pub value: String,
    /// `None` when the label segment is absent or blank.
    pub label: Option<String>,
}

impl CategoryEntry {
    pub fn new(value: impl Into<String>, label: Option<&str>) -> Self {
        let label = label
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string);
        Self { value: value.into(), label }
    }

    pub fn has_label(&self) -> bool {
        self.label.is_some()
    }
}

/// A distinct, non-null cell value present in a map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub value: String,
    /// Number of cells, when the source reports it.
    pub count: Option<u64>,
}

impl Category {
    pub fn new(value: impl Into<String>) -> Self {
        Self { value: value.into(), count: None }
    }

    pub fn with_count(value: impl Into<String>, count: u64) -> Self {
        Self { value: value.into(), count: Some(count) }
    }
}

// ── Colors ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.r, self.g, self.b)
    }
}

/// Ordered value → color mapping, written wholesale over a map's color table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorTable {
    pub entries: Vec<(String, Rgb)>,
}

impl ColorTable {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Color rule lines, `"<value> R:G:B"`.
    pub fn rules(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|(value, color)| format!("{value} {color}"))
            .collect()
    }
}

/// Ordered value → label mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelSet {
    pub entries: Vec<(String, String)>,
}

impl LabelSet {
    /// Label every category with its own value.
    pub fn identity(categories: &[Category]) -> Self {
        let entries = categories
            .iter()
            .map(|c| (c.value.clone(), c.value.clone()))
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Category rule lines, `"<value>|<label>"`.
    pub fn rules(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|(value, label)| format!("{value}|{label}"))
            .collect()
    }
}
