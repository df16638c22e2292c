//! Random color fallback for maps without usable category labels.
//!
//! A fixed pool of colors is paired positionally with the distinct values
//! actually present in the map, in the order the statistics source reports
//! them. Maps with more values than the pool get a uniform random table from
//! the backend instead. Integer maps then get every value labeled with itself.

use std::ops::Range;

use rand::Rng;
use serde::Serialize;

use crate::error::{Result, Warning};
use crate::ports::{ColorTableWriter, LabelWriter, RandomColorService, RasterInfoSource, StatsSource};
use crate::raster::{Category, ColorTable, LabelSet, Rgb};
use crate::rules::write_rules;

/// Number of generated candidate colors.
pub const POOL_SIZE: usize = 40;

/// Per-channel draw range. 255 itself is never drawn.
pub const CHANNEL_RANGE: Range<u8> = 0..255;

/// Draw `size` colors, channels in r, g, b order.
pub fn generate_pool<R: Rng + ?Sized>(rng: &mut R, size: usize) -> Vec<Rgb> {
    (0..size)
        .map(|_| {
            let r = rng.gen_range(CHANNEL_RANGE);
            let g = rng.gen_range(CHANNEL_RANGE);
            let b = rng.gen_range(CHANNEL_RANGE);
            Rgb::new(r, g, b)
        })
        .collect()
}

/// Pair categories with pool colors by position.
/// `None` when there are more categories than colors.
pub fn join_pool(categories: &[Category], pool: &[Rgb]) -> Option<ColorTable> {
    if categories.len() > pool.len() {
        return None;
    }
    let entries = categories
        .iter()
        .zip(pool)
        .map(|(cat, &color)| (cat.value.clone(), color))
        .collect();
    Some(ColorTable { entries })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColorAssignment {
    /// Color table written from the generated pool.
    Table { entries: usize },
    /// Too many values; uniform random colors assigned by the backend.
    UniformFallback { categories: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RandomOutcome {
    pub assignment: ColorAssignment,
    /// Labels written; `None` for floating-point maps.
    pub labels_written: Option<usize>,
    pub warnings: Vec<Warning>,
}

/// Color `map` from a freshly drawn pool, then back-fill labels for integer maps.
pub fn apply_random_colors<B, R>(map: &str, backend: &B, rng: &mut R) -> Result<RandomOutcome>
where
    B: StatsSource + RasterInfoSource + ColorTableWriter + LabelWriter + RandomColorService + ?Sized,
    R: Rng + ?Sized,
{
    let mut warnings = Vec::new();
    let pool = generate_pool(rng, POOL_SIZE);

    let categories = backend.distinct_values(map)?;
    let assignment = match join_pool(&categories, &pool) {
        Some(table) => {
            let entries = write_rules(backend.open_color_rules(map)?, table.rules())?;
            log::debug!("{map}: wrote {entries} color rules");
            ColorAssignment::Table { entries }
        }
        None => {
            backend.assign_random(map)?;
            warnings.push(Warning::new(format!(
                "More cell values than {POOL_SIZE} ({}): using uniform random colors; \
                 the color table of <{map}> cannot be exported reliably",
                categories.len()
            )));
            ColorAssignment::UniformFallback { categories: categories.len() }
        }
    };

    let labels_written = if backend.datatype(map)?.is_integer() {
        // Re-read: the color write above has completed, so this sees the map as it is now.
        let categories = backend.distinct_values(map)?;
        let labels = LabelSet::identity(&categories);
        let n = write_rules(backend.open_label_rules(map)?, labels.rules())?;
        log::debug!("{map}: wrote {n} category labels");
        Some(n)
    } else {
        None
    };

    Ok(RandomOutcome { assignment, labels_written, warnings })
}
