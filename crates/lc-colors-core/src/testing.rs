//! Recording in-memory backend for unit tests.

use std::cell::RefCell;

use crate::error::{LcError, Result};
use crate::options::AttributeSource;
use crate::ports::*;
use crate::probe::REQUIRED_SERVICES;
use crate::raster::{Category, CategoryEntry, DataType};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Probe(String),
    ListCategories(String),
    DistinctValues(String),
    Datatype(String),
    /// Recorded when the stream is finished, not when opened.
    ColorRules(String, Vec<String>),
    LabelRules(String, Vec<String>),
    Attribute(String, AttributeSource),
    Fuzzy(String),
    Random(String),
}

pub struct MockBackend {
    pub installed: Vec<String>,
    pub categories: Vec<CategoryEntry>,
    pub values: Vec<Category>,
    pub datatype: DataType,
    fail_color_stream: bool,
    calls: RefCell<Vec<Call>>,
}

impl MockBackend {
    pub fn new(categories: Vec<CategoryEntry>, values: Vec<Category>, datatype: DataType) -> Self {
        Self {
            installed: REQUIRED_SERVICES.iter().map(|s| s.to_string()).collect(),
            categories,
            values,
            datatype,
            fail_color_stream: false,
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Map whose categories carry no labels.
    pub fn unlabeled(values: Vec<Category>, datatype: DataType) -> Self {
        let categories = values.iter().map(|c| CategoryEntry::new(c.value.clone(), None)).collect();
        Self::new(categories, values, datatype)
    }

    pub fn with_installed(mut self, installed: &[&str]) -> Self {
        self.installed = installed.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn failing_color_stream(mut self) -> Self {
        self.fail_color_stream = true;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn color_rules(&self) -> Vec<Vec<String>> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::ColorRules(_, lines) => Some(lines),
                _ => None,
            })
            .collect()
    }

    pub fn label_rules(&self) -> Vec<Vec<String>> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::LabelRules(_, lines) => Some(lines),
                _ => None,
            })
            .collect()
    }

    pub fn random_maps(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Random(map) => Some(map),
                _ => None,
            })
            .collect()
    }

    /// True if any call other than a probe reached the backend.
    pub fn touched_map(&self) -> bool {
        self.calls().iter().any(|c| !matches!(c, Call::Probe(_)))
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

enum SinkKind {
    Color,
    Label,
}

struct MockSink<'a> {
    backend: &'a MockBackend,
    kind: SinkKind,
    map: String,
    lines: Vec<String>,
    fail: bool,
}

impl RuleSink for MockSink<'_> {
    fn write_line(&mut self, line: &str) -> Result<()> {
        if self.fail {
            return Err(LcError::RuleStream {
                command: "mock".into(),
                source: std::io::Error::new(std::io::ErrorKind::BrokenPipe, "consumer exited"),
            });
        }
        self.lines.push(line.to_string());
        Ok(())
    }

    fn finish(self: Box<Self>) -> Result<()> {
        let MockSink { backend, kind, map, lines, .. } = *self;
        backend.record(match kind {
            SinkKind::Color => Call::ColorRules(map, lines),
            SinkKind::Label => Call::LabelRules(map, lines),
        });
        Ok(())
    }
}

impl CapabilityProbe for MockBackend {
    fn exists(&self, service: &str) -> bool {
        self.record(Call::Probe(service.to_string()));
        self.installed.iter().any(|s| s == service)
    }
}

impl CategorySource for MockBackend {
    fn list_categories(&self, map: &str) -> Result<Vec<CategoryEntry>> {
        self.record(Call::ListCategories(map.to_string()));
        Ok(self.categories.clone())
    }
}

impl StatsSource for MockBackend {
    fn distinct_values(&self, map: &str) -> Result<Vec<Category>> {
        self.record(Call::DistinctValues(map.to_string()));
        Ok(self.values.clone())
    }
}

impl RasterInfoSource for MockBackend {
    fn datatype(&self, map: &str) -> Result<DataType> {
        self.record(Call::Datatype(map.to_string()));
        Ok(self.datatype)
    }
}

impl ColorTableWriter for MockBackend {
    fn open_color_rules(&self, map: &str) -> Result<Box<dyn RuleSink + '_>> {
        Ok(Box::new(MockSink {
            backend: self,
            kind: SinkKind::Color,
            map: map.to_string(),
            lines: Vec::new(),
            fail: self.fail_color_stream,
        }))
    }
}

impl LabelWriter for MockBackend {
    fn open_label_rules(&self, map: &str) -> Result<Box<dyn RuleSink + '_>> {
        Ok(Box::new(MockSink {
            backend: self,
            kind: SinkKind::Label,
            map: map.to_string(),
            lines: Vec::new(),
            fail: false,
        }))
    }
}

impl AttributeColorService for MockBackend {
    fn assign_from_attribute(&self, map: &str, source: &AttributeSource) -> Result<()> {
        self.record(Call::Attribute(map.to_string(), source.clone()));
        Ok(())
    }
}

impl FuzzyMatchService for MockBackend {
    fn assign_fuzzy(&self, map: &str) -> Result<()> {
        self.record(Call::Fuzzy(map.to_string()));
        Ok(())
    }
}

impl RandomColorService for MockBackend {
    fn assign_random(&self, map: &str) -> Result<()> {
        self.record(Call::Random(map.to_string()));
        Ok(())
    }
}
