//! Sets the colors of a land cover classification map.
//!
//! Runs inside a GRASS GIS session and needs the `v.colors.to.rast` and
//! `r.colors.fuzzy_lc` addons installed.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use lc_colors_core::grass::GrassBackend;
use lc_colors_core::{colorize, ColorOptions};

// ── CLI ──────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "lc-colors", about = "Set the colors of a land cover classification map")]
struct Args {
    /// Name of input land cover map.
    #[arg(short, long, required_unless_present = "config")]
    map: Option<String>,

    /// Vector map with class information (and a color column).
    #[arg(long, requires_all = ["color_column", "class_column"])]
    referencemap: Option<String>,

    /// Color column in referencemap, colors given as r:g:b.
    #[arg(long, requires_all = ["referencemap", "class_column"])]
    color_column: Option<String>,

    /// Class information column in referencemap.
    #[arg(long, requires_all = ["referencemap", "color_column"])]
    class_column: Option<String>,

    /// Read options from a JSON file instead.
    #[arg(long, conflicts_with_all = ["map", "referencemap", "color_column", "class_column"])]
    config: Option<PathBuf>,

    /// Seed for the random color pool (entropy if omitted).
    #[arg(long)]
    seed: Option<u64>,

    /// Print the run report as JSON on stdout.
    #[arg(long)]
    json: bool,

    /// More log output (-v info is the default, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,

    /// Only warnings and errors.
    #[arg(short, long)]
    quiet: bool,
}

impl Args {
    fn options(&self) -> Result<ColorOptions> {
        if let Some(path) = &self.config {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Cannot read options file {}", path.display()))?;
            return ColorOptions::from_json(&text)
                .with_context(|| format!("Invalid options file {}", path.display()));
        }
        let map = self.map.clone().unwrap_or_default();
        Ok(ColorOptions::from_parts(
            map,
            self.referencemap.clone(),
            self.color_column.clone(),
            self.class_column.clone(),
        )?)
    }

    fn log_level(&self) -> &'static str {
        match (self.quiet, self.verbose) {
            (true, _) => "warn",
            (false, 0 | 1) => "info",
            (false, _) => "debug",
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_level()))
        .format_target(false)
        .format_timestamp(None)
        .init();

    let options = args.options()?;
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let backend = GrassBackend::new();
    let report = colorize(&options, &backend, &mut rng)
        .with_context(|| format!("Setting colors of <{}> failed", options.map))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    log::debug!("{} done via {:?}", report.map, report.strategy);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collective_options_parse() {
        let args = Args::try_parse_from([
            "lc-colors", "--map", "lc", "--referencemap", "ref", "--color-column", "col", "--class-column", "cls",
        ])
        .unwrap();
        let opts = args.options().unwrap();
        assert_eq!(opts.attribute.unwrap().referencemap, "ref");
    }

    #[test]
    fn partial_collective_options_are_rejected() {
        assert!(Args::try_parse_from(["lc-colors", "--map", "lc", "--color-column", "col"]).is_err());
    }

    #[test]
    fn map_is_required_without_config() {
        assert!(Args::try_parse_from(["lc-colors"]).is_err());
        assert!(Args::try_parse_from(["lc-colors", "--config", "opts.json"]).is_ok());
    }

    #[test]
    fn log_levels() {
        let quiet = Args::try_parse_from(["lc-colors", "-m", "lc", "-q"]).unwrap();
        assert_eq!(quiet.log_level(), "warn");
        let debug = Args::try_parse_from(["lc-colors", "-m", "lc", "-vv"]).unwrap();
        assert_eq!(debug.log_level(), "debug");
    }
}
