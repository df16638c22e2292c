//! Choice of coloring method from the metadata available for a map.

use serde::Serialize;

use crate::options::AttributeSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy<'a> {
    /// Colors from a color column of a vector reference map.
    AttributeColor(&'a AttributeSource),
    /// Fuzzy matching of category labels against known land cover classes.
    FuzzyMatch,
    /// Generated colors, labels back-filled for integer maps.
    RandomColor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    AttributeColor,
    FuzzyMatch,
    RandomColor,
}

impl Strategy<'_> {
    pub fn kind(&self) -> StrategyKind {
        match self {
            Strategy::AttributeColor(_) => StrategyKind::AttributeColor,
            Strategy::FuzzyMatch => StrategyKind::FuzzyMatch,
            Strategy::RandomColor => StrategyKind::RandomColor,
        }
    }
}

/// An explicit color column wins over label completeness; complete labels
/// select fuzzy matching; anything else falls back to random colors.
pub fn select_strategy(attribute: Option<&AttributeSource>, has_complete_labels: bool) -> Strategy<'_> {
    match attribute {
        Some(source) => Strategy::AttributeColor(source),
        None if has_complete_labels => Strategy::FuzzyMatch,
        None => Strategy::RandomColor,
    }
}
