//! Orchestrator: probe, inspect, select, then run exactly one strategy.
//!
//! Order:
//!   1. Required addons present (fatal otherwise, before any map access)
//!   2. Category label completeness
//!   3. Strategy selection
//!   4. Strategy execution

use rand::Rng;
use serde::Serialize;

use crate::error::{Result, Warning};
use crate::inspect::has_complete_labels;
use crate::options::ColorOptions;
use crate::ports::Backend;
use crate::probe::require_services;
use crate::random::{apply_random_colors, ColorAssignment};
use crate::strategy::{select_strategy, Strategy, StrategyKind};

/// What a run did to the map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorReport {
    pub map: String,
    pub strategy: StrategyKind,
    /// Set only for the random strategy.
    pub assignment: Option<ColorAssignment>,
    pub labels_written: Option<usize>,
    pub warnings: Vec<Warning>,
}

/// Set the colors of the land cover map named in `options`.
pub fn colorize<B, R>(options: &ColorOptions, backend: &B, rng: &mut R) -> Result<ColorReport>
where
    B: Backend + ?Sized,
    R: Rng + ?Sized,
{
    options.validate()?;
    require_services(backend)?;

    let map = options.map.as_str();
    let labeled = has_complete_labels(backend, map)?;
    let strategy = select_strategy(options.attribute.as_ref(), labeled);

    let mut report = ColorReport {
        map: map.to_string(),
        strategy: strategy.kind(),
        assignment: None,
        labels_written: None,
        warnings: Vec::new(),
    };

    match strategy {
        Strategy::AttributeColor(source) => {
            log::info!("Using colors from column <{}>...", source.color_column);
            backend.assign_from_attribute(map, source)?;
        }
        Strategy::FuzzyMatch => {
            log::info!("Matching land cover classes...");
            backend.assign_fuzzy(map)?;
        }
        Strategy::RandomColor => {
            report
                .warnings
                .push(Warning::new("Input map has missing category labels. Setting random colors..."));
            let outcome = apply_random_colors(map, backend, rng)?;
            report.assignment = Some(outcome.assignment);
            report.labels_written = outcome.labels_written;
            report.warnings.extend(outcome.warnings);
        }
    }

    Ok(report)
}
