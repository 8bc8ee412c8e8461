//! Shared configuration types for CLI commands

use std::{
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};

use anyhow::{Context, Result, anyhow, bail};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::{
    adapters::MsgPackRepository,
    policies::{CloseBoxesPolicy, MaxIfKnownPolicy, MixerPolicy, RandomPolicy},
    ports::{Agent, TableRepository},
    q_learning::BoardSaver,
};

/// Fixed opponents available for training
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OpponentKind {
    /// Closes boxes when it can, random otherwise
    Greedy,
    /// Uniformly random
    Random,
    /// Table-greedy where known, box-closing otherwise
    Mixer,
}

impl OpponentKind {
    pub fn build(self, table: &BoardSaver, seed: Option<u64>) -> Box<dyn Agent> {
        match self {
            OpponentKind::Greedy => Box::new(CloseBoxesPolicy::new(table.size(), seed)),
            OpponentKind::Random => Box::new(RandomPolicy::new(seed)),
            OpponentKind::Mixer => Box::new(MixerPolicy::new(table.clone(), seed)),
        }
    }
}

impl fmt::Display for OpponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OpponentKind::Greedy => "greedy",
            OpponentKind::Random => "random",
            OpponentKind::Mixer => "mixer",
        };
        f.write_str(name)
    }
}

/// A player on the command line.
///
/// Formats: `random`, `greedy`, `mixer:PATH`, `max-if-known:PATH`, or a bare
/// `PATH` (same as `mixer:PATH`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentSpec {
    Random,
    Greedy,
    Mixer(PathBuf),
    MaxIfKnown(PathBuf),
}

impl FromStr for AgentSpec {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            bail!("empty player specification");
        }
        match s.split_once(':') {
            Some(("mixer", path)) => Ok(AgentSpec::Mixer(PathBuf::from(path))),
            Some(("max-if-known", path)) => Ok(AgentSpec::MaxIfKnown(PathBuf::from(path))),
            _ => match s {
                "random" => Ok(AgentSpec::Random),
                "greedy" => Ok(AgentSpec::Greedy),
                "mixer" | "max-if-known" => Err(anyhow!("'{s}' needs a table, as in {s}:PATH")),
                path => Ok(AgentSpec::Mixer(PathBuf::from(path))),
            },
        }
    }
}

impl AgentSpec {
    /// Build the agent for a `size × size` board, loading its table if any.
    pub fn build(&self, size: usize, seed: Option<u64>) -> Result<Box<dyn Agent>> {
        match self {
            AgentSpec::Random => Ok(Box::new(RandomPolicy::new(seed))),
            AgentSpec::Greedy => Ok(Box::new(CloseBoxesPolicy::new(size, seed))),
            AgentSpec::Mixer(path) => Ok(Box::new(MixerPolicy::new(
                load_table(path, size)?,
                seed,
            ))),
            AgentSpec::MaxIfKnown(path) => Ok(Box::new(MaxIfKnownPolicy::new(
                load_table(path, size)?,
                seed,
            ))),
        }
    }
}

/// Load a saved table and check it was trained for `size`
pub fn load_table(path: &Path, size: usize) -> Result<BoardSaver> {
    let table = MsgPackRepository::new()
        .load(path)
        .with_context(|| format!("Failed to load table from {}", path.display()))?;
    if table.size() != size {
        bail!(
            "table {} was trained on a {}x{} board, not {}x{}",
            path.display(),
            table.size(),
            table.size(),
            size,
            size
        );
    }
    Ok(table)
}

/// Default table file for a board size
pub fn default_table_path(size: usize) -> PathBuf {
    PathBuf::from(format!("q_value_function_{size}x{size}.msgpack"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_agent_specs() {
        assert_eq!("random".parse::<AgentSpec>().unwrap(), AgentSpec::Random);
        assert_eq!("greedy".parse::<AgentSpec>().unwrap(), AgentSpec::Greedy);
        assert_eq!(
            "max-if-known:a.msgpack".parse::<AgentSpec>().unwrap(),
            AgentSpec::MaxIfKnown(PathBuf::from("a.msgpack"))
        );
        assert_eq!(
            "b.msgpack".parse::<AgentSpec>().unwrap(),
            AgentSpec::Mixer(PathBuf::from("b.msgpack"))
        );
        assert!("mixer".parse::<AgentSpec>().is_err());
        assert!("".parse::<AgentSpec>().is_err());
    }

    #[test]
    fn test_load_table_checks_size() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("t.msgpack");
        MsgPackRepository::new()
            .save(&BoardSaver::new(2), &path)
            .unwrap();

        assert!(load_table(&path, 2).is_ok());
        assert!(load_table(&path, 3).is_err());
        assert!(
            AgentSpec::Mixer(path)
                .build(2, Some(1))
                .is_ok_and(|agent| agent.name() == "mixer")
        );
    }

    #[test]
    fn test_default_table_path() {
        assert_eq!(
            default_table_path(3),
            PathBuf::from("q_value_function_3x3.msgpack")
        );
    }
}
