//! Scenario files describing the initial scene and run length.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use outbreak_core::CellCoord;
use outbreak_simulation::SimulationConfig;
use serde::Deserialize;

const DEFAULT_TICKS: u64 = 10;

fn default_ticks() -> u64 {
    DEFAULT_TICKS
}

/// Scene and run length loaded from a TOML file.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct Scenario {
    /// Number of ticks to simulate.
    #[serde(default = "default_ticks")]
    pub(crate) ticks: u64,
    /// Grid dimensions, seed and initial positions.
    #[serde(default)]
    pub(crate) simulation: SimulationConfig,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            ticks: DEFAULT_TICKS,
            simulation: SimulationConfig::default(),
        }
    }
}

impl Scenario {
    /// Reads and parses the scenario stored at `path`.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("failed to parse scenario {}", path.display()))
    }

    /// Parses scenario TOML contents.
    pub(crate) fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("invalid scenario toml")
    }
}

/// Parses a `row,column` pair supplied on the command line.
pub(crate) fn parse_cell(value: &str) -> Result<CellCoord, String> {
    let (row, column) = value
        .split_once(',')
        .ok_or_else(|| format!("expected ROW,COLUMN but found '{value}'"))?;
    let row = row
        .trim()
        .parse::<u32>()
        .map_err(|error| format!("invalid row '{row}': {error}"))?;
    let column = column
        .trim()
        .parse::<u32>()
        .map_err(|error| format!("invalid column '{column}': {error}"))?;
    Ok(CellCoord::new(row, column))
}
