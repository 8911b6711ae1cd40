use std::path::PathBuf;

use anyhow::{bail, Result};
use log::warn;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use toml::Value;

/// Cache geometry as given by the user; every field optional so that
/// config.toml and command-line flags can each supply a subset.
#[derive(Debug, Deserialize, Clone, Copy, Default)]
#[serde(default)]
pub struct CacheConfig {
    pub set_bits: Option<u32>,
    pub lines_per_set: Option<usize>,
    pub block_bits: Option<u32>,
}

/// Validated geometry the simulator is constructed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheGeometry {
    pub set_bits: u32,
    pub lines_per_set: usize,
    pub block_bits: u32,
}

impl CacheConfig {
    /// Checks the geometry before any access is processed. Rejects missing
    /// parameters, zero associativity, and field widths that exceed the
    /// 64-bit address width.
    pub fn resolve(&self) -> Result<CacheGeometry> {
        let Some(set_bits) = self.set_bits else {
            bail!("set index bit count (-s) not given");
        };
        let Some(lines_per_set) = self.lines_per_set else {
            bail!("lines per set (-E) not given");
        };
        let Some(block_bits) = self.block_bits else {
            bail!("block offset bit count (-b) not given");
        };
        if lines_per_set == 0 {
            bail!("lines per set must be at least 1");
        }
        if set_bits.saturating_add(block_bits) > u64::BITS {
            bail!(
                "set index bits ({}) plus block offset bits ({}) exceed the {}-bit address width",
                set_bits,
                block_bits,
                u64::BITS
            );
        }
        Ok(CacheGeometry {
            set_bits,
            lines_per_set,
            block_bits,
        })
    }
}

impl CacheGeometry {
    pub fn num_sets(&self) -> usize {
        1usize << self.set_bits.min(usize::BITS - 1)
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct SimConfig {
    pub trace: Option<PathBuf>,
    pub verbose: bool,
}

pub trait Config: DeserializeOwned + Default {
    fn from_section(section: Option<&Value>) -> Self {
        match section {
            Some(value) => value.clone().try_into().expect("cannot deserialize config"),
            None => {
                warn!("config section not found");
                Self::default()
            }
        }
    }
}

impl Config for CacheConfig {}
impl Config for SimConfig {}
