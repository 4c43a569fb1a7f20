use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use sweeper_core::{BoardConfig, CellCount, Coord};

/// Board settings from a TOML file or the command line. Anything left unset falls back to the defaults.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub(crate) struct Settings {
    pub width: Option<Coord>,
    pub height: Option<Coord>,
    pub min_mines: Option<CellCount>,
    pub max_mines: Option<CellCount>,
    pub seed: Option<u64>,
}

impl Settings {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("could not read settings from {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("invalid settings in {}", path.display()))
    }

    pub fn parse(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Values set in `other` replace ours.
    pub fn overridden_by(self, other: Settings) -> Settings {
        Settings {
            width: other.width.or(self.width),
            height: other.height.or(self.height),
            min_mines: other.min_mines.or(self.min_mines),
            max_mines: other.max_mines.or(self.max_mines),
            seed: other.seed.or(self.seed),
        }
    }

    /// Validated board config. A single mine bound stands in for the missing one.
    pub fn board_config(&self) -> sweeper_core::Result<BoardConfig> {
        let defaults = BoardConfig::default();
        let size = (
            self.width.unwrap_or(defaults.width()),
            self.height.unwrap_or(defaults.height()),
        );
        let (min_mines, max_mines) = match (self.min_mines, self.max_mines) {
            (Some(min), Some(max)) => (min, max),
            (Some(mines), None) | (None, Some(mines)) => (mines, mines),
            (None, None) => (defaults.min_mines, defaults.max_mines),
        };
        BoardConfig::new(size, min_mines, max_mines)
    }
}
