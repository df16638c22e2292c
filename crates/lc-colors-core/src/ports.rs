//! Collaborator interfaces consumed by the coloring pipeline.
//!
//! Each trait covers one external contract so tests can stand any of them in
//! isolation. [`crate::grass::GrassBackend`] implements all of them on top of
//! GRASS GIS modules.

use crate::error::Result;
use crate::options::AttributeSource;
use crate::raster::{Category, CategoryEntry, DataType};

/// Presence check for an external service.
pub trait CapabilityProbe {
    fn exists(&self, service: &str) -> bool;
}

/// Category-label listing of a map.
pub trait CategorySource {
    fn list_categories(&self, map: &str) -> Result<Vec<CategoryEntry>>;
}

/// Distinct non-null cell values, in the order the source reports them.
pub trait StatsSource {
    fn distinct_values(&self, map: &str) -> Result<Vec<Category>>;
}

pub trait RasterInfoSource {
    fn datatype(&self, map: &str) -> Result<DataType>;
}

/// Line-oriented input stream of a rule consumer.
///
/// Implementations must close the stream and join the consumer when dropped
/// without [`RuleSink::finish`].
pub trait RuleSink {
    fn write_line(&mut self, line: &str) -> Result<()>;

    /// Close the stream and block until the consumer has finished.
    fn finish(self: Box<Self>) -> Result<()>;
}

/// Replaces a map's color table with the rules streamed into the sink.
pub trait ColorTableWriter {
    fn open_color_rules(&self, map: &str) -> Result<Box<dyn RuleSink + '_>>;
}

/// Writes `value|label` category rules for a map.
pub trait LabelWriter {
    fn open_label_rules(&self, map: &str) -> Result<Box<dyn RuleSink + '_>>;
}

/// Colors a raster from a color column of a vector reference map.
pub trait AttributeColorService {
    fn assign_from_attribute(&self, map: &str, source: &AttributeSource) -> Result<()>;
}

/// Colors a raster by fuzzy-matching its category labels against known classes.
pub trait FuzzyMatchService {
    fn assign_fuzzy(&self, map: &str) -> Result<()>;
}

/// Uniform random color table over the whole map.
pub trait RandomColorService {
    fn assign_random(&self, map: &str) -> Result<()>;
}

/// Every collaborator the pipeline needs, bundled.
pub trait Backend:
    CapabilityProbe
    + CategorySource
    + StatsSource
    + RasterInfoSource
    + ColorTableWriter
    + LabelWriter
    + AttributeColorService
    + FuzzyMatchService
    + RandomColorService
{
}

impl<T> Backend for T where
    T: CapabilityProbe
        + CategorySource
        + StatsSource
        + RasterInfoSource
        + ColorTableWriter
        + LabelWriter
        + AttributeColorService
        + FuzzyMatchService
        + RandomColorService
{
}
