//! Color assignment for classified land cover rasters.
//!
//! Picks one of three methods from the metadata available for a map: colors
//! from an attribute column of a vector reference map, fuzzy matching of the
//! category labels, or a generated random color table.

pub mod error;
pub mod grass;
pub mod inspect;
pub mod options;
pub mod pipeline;
pub mod ports;
pub mod probe;
pub mod random;
pub mod raster;
pub mod rules;
pub mod strategy;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{LcError, Result, Warning};
pub use options::{AttributeSource, ColorOptions};
pub use pipeline::{colorize, ColorReport};
