//! GRASS GIS backend: every port implemented by running GRASS modules.
//!
//! Modules are run as child processes of the current GRASS session, so the
//! usual `GISBASE` / `GISRC` environment must already be set up.
//!
//! | Port                  | Module                                        |
//! |-----------------------|-----------------------------------------------|
//! | category listing      | `r.category map= separator=tab`               |
//! | distinct values       | `r.stats -cn input= separator=pipe`           |
//! | datatype              | `r.info -g map=`                              |
//! | color rules           | `r.colors --quiet map= rules=-` (stdin)       |
//! | label rules           | `r.category map= rules=- separator=pipe`      |
//! | attribute colors      | `v.colors.to.rast`                            |
//! | fuzzy matching        | `r.colors.fuzzy_lc`                           |
//! | uniform random colors | `r.colors color=random`                       |

use std::io::{BufWriter, Write};
use std::process::{Child, ChildStdin, Command, Stdio};

use crate::error::{LcError, Result};
use crate::options::AttributeSource;
use crate::ports::*;
use crate::raster::{Category, CategoryEntry, DataType};

// ── Output parsers ────────────────────────────────────────────────────────────

/// Parse `r.category separator=tab` output. A line without a tab has no label.
pub fn parse_category_listing(text: &str) -> Vec<CategoryEntry> {
    text.lines()
        .filter(|l| !l.trim().is_empty())
        .map(|line| match line.split_once('\t') {
            Some((value, label)) => CategoryEntry::new(value.trim(), Some(label)),
            None => CategoryEntry::new(line.trim(), None),
        })
        .collect()
}

/// Parse `r.stats -cn separator=pipe` output (`value|count`), keeping line order.
pub fn parse_cell_stats(text: &str) -> Result<Vec<Category>> {
    text.lines()
        .filter(|l| !l.trim().is_empty())
        .map(|line| {
            let mut fields = line.split('|');
            let value = fields.next().unwrap_or_default().trim();
            if value.is_empty() {
                return Err(LcError::MalformedOutput {
                    command: "r.stats".into(),
                    detail: format!("no value in line '{line}'"),
                });
            }
            let count = match fields.next() {
                Some(c) => Some(c.trim().parse::<u64>().map_err(|e| LcError::MalformedOutput {
                    command: "r.stats".into(),
                    detail: format!("bad cell count in line '{line}': {e}"),
                })?),
                None => None,
            };
            Ok(Category { value: value.to_string(), count })
        })
        .collect()
}

/// Read `datatype=` from `r.info -g` shell-style output.
pub fn parse_datatype(text: &str) -> Result<DataType> {
    text.lines()
        .filter_map(|l| l.split_once('='))
        .find(|(k, _)| k.trim() == "datatype")
        .map(|(_, v)| DataType::from_grass(v.trim_matches(|c: char| c == '"' || c.is_whitespace())))
        .unwrap_or_else(|| {
            Err(LcError::MalformedOutput {
                command: "r.info".into(),
                detail: "no datatype key".into(),
            })
        })
}

// ── Rule feeding ──────────────────────────────────────────────────────────────

/// A child process reading rules on stdin.
///
/// [`RuleSink::finish`] closes stdin, waits, and checks the exit status.
/// Dropping it unfinished closes stdin and still waits for the child.
pub struct FeedProcess {
    command: String,
    stdin: Option<BufWriter<ChildStdin>>,
    child: Option<Child>,
}

impl FeedProcess {
    pub fn spawn(command: String, mut cmd: Command) -> Result<Self> {
        log::debug!("feeding {command}");
        let mut child = cmd
            .stdin(Stdio::piped())
            .spawn()
            .map_err(|source| LcError::Spawn { command: command.clone(), source })?;
        let stdin = child.stdin.take().map(BufWriter::new);
        Ok(Self { command, stdin, child: Some(child) })
    }

    fn stream_error(&self, source: std::io::Error) -> LcError {
        LcError::RuleStream { command: self.command.clone(), source }
    }
}

impl RuleSink for FeedProcess {
    fn write_line(&mut self, line: &str) -> Result<()> {
        let res = match self.stdin.as_mut() {
            Some(w) => writeln!(w, "{line}"),
            None => Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "stdin already closed")),
        };
        res.map_err(|e| self.stream_error(e))
    }

    fn finish(mut self: Box<Self>) -> Result<()> {
        if let Some(mut w) = self.stdin.take() {
            w.flush().map_err(|e| self.stream_error(e))?;
        }
        let Some(mut child) = self.child.take() else {
            return Ok(());
        };
        let status = child.wait().map_err(|e| self.stream_error(e))?;
        if status.success() {
            Ok(())
        } else {
            Err(LcError::CommandFailed { command: self.command.clone(), status: status.to_string() })
        }
    }
}

impl Drop for FeedProcess {
    fn drop(&mut self) {
        drop(self.stdin.take());
        if let Some(mut child) = self.child.take() {
            let _ = child.wait();
        }
    }
}

// ── Backend ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default)]
pub struct GrassBackend;

impl GrassBackend {
    pub fn new() -> Self {
        Self
    }

    fn command(module: &str, args: &[String]) -> (String, Command) {
        let mut cmd = Command::new(module);
        cmd.args(args);
        (format!("{module} {}", args.join(" ")), cmd)
    }

    /// Run to completion, returning stdout.
    fn read(&self, module: &str, args: &[String]) -> Result<String> {
        let (label, mut cmd) = Self::command(module, args);
        log::debug!("running {label}");
        let out = cmd
            .stderr(Stdio::inherit())
            .output()
            .map_err(|source| LcError::Spawn { command: label.clone(), source })?;
        if !out.status.success() {
            return Err(LcError::CommandFailed { command: label, status: out.status.to_string() });
        }
        Ok(String::from_utf8_lossy(&out.stdout).into_owned())
    }

    fn run(&self, module: &str, args: &[String]) -> Result<()> {
        let (label, mut cmd) = Self::command(module, args);
        log::debug!("running {label}");
        let status = cmd
            .status()
            .map_err(|source| LcError::Spawn { command: label.clone(), source })?;
        if status.success() {
            Ok(())
        } else {
            Err(LcError::CommandFailed { command: label, status: status.to_string() })
        }
    }

    fn feed(&self, module: &str, args: &[String]) -> Result<Box<dyn RuleSink + '_>> {
        let (label, cmd) = Self::command(module, args);
        Ok(Box::new(FeedProcess::spawn(label, cmd)?))
    }
}

fn kv(key: &str, value: &str) -> String {
    format!("{key}={value}")
}

impl CapabilityProbe for GrassBackend {
    fn exists(&self, service: &str) -> bool {
        Command::new(service)
            .arg("--help")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }
}

impl CategorySource for GrassBackend {
    fn list_categories(&self, map: &str) -> Result<Vec<CategoryEntry>> {
        let out = self.read("r.category", &[kv("map", map), kv("separator", "tab")])?;
        Ok(parse_category_listing(&out))
    }
}

impl StatsSource for GrassBackend {
    fn distinct_values(&self, map: &str) -> Result<Vec<Category>> {
        let out = self.read("r.stats", &["-cn".into(), kv("input", map), kv("separator", "pipe")])?;
        parse_cell_stats(&out)
    }
}

impl RasterInfoSource for GrassBackend {
    fn datatype(&self, map: &str) -> Result<DataType> {
        let out = self.read("r.info", &["-g".into(), kv("map", map)])?;
        parse_datatype(&out)
    }
}

impl ColorTableWriter for GrassBackend {
    fn open_color_rules(&self, map: &str) -> Result<Box<dyn RuleSink + '_>> {
        self.feed("r.colors", &["--quiet".into(), kv("map", map), kv("rules", "-")])
    }
}

impl LabelWriter for GrassBackend {
    fn open_label_rules(&self, map: &str) -> Result<Box<dyn RuleSink + '_>> {
        self.feed("r.category", &[kv("map", map), kv("rules", "-"), kv("separator", "pipe")])
    }
}

impl AttributeColorService for GrassBackend {
    fn assign_from_attribute(&self, map: &str, source: &AttributeSource) -> Result<()> {
        self.run(
            "v.colors.to.rast",
            &[
                kv("referencemap", &source.referencemap),
                kv("map", map),
                kv("color_column", &source.color_column),
                kv("class_column", &source.class_column),
            ],
        )
    }
}

impl FuzzyMatchService for GrassBackend {
    fn assign_fuzzy(&self, map: &str) -> Result<()> {
        self.run("r.colors.fuzzy_lc", &[kv("map", map)])
    }
}

impl RandomColorService for GrassBackend {
    fn assign_random(&self, map: &str) -> Result<()> {
        self.run("r.colors", &[kv("map", map), kv("color", "random")])
    }
}
