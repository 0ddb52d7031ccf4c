use anyhow::{anyhow, Result};
use invest_algorithms::{bruteforce::DEFAULT_MAX_INVESTMENTS, BruteForce};
use invest_utils::{dejsonify, euros_to_cents};
use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SolveSettings {
    /// Budget in euros.
    pub budget: f64,
    pub num_workers: usize,
    /// Defaults to `num_workers` when unset.
    pub num_chunks: Option<usize>,
    pub max_bruteforce_investments: usize,
}

impl Default for SolveSettings {
    fn default() -> Self {
        Self {
            budget: 500.0,
            num_workers: 4,
            num_chunks: None,
            max_bruteforce_investments: DEFAULT_MAX_INVESTMENTS,
        }
    }
}

impl SolveSettings {
    pub fn budget_cents(&self) -> Result<u64> {
        euros_to_cents(self.budget).map_err(|e| anyhow!("Invalid budget: {}", e))
    }

    pub fn bruteforce(&self) -> BruteForce {
        let num_workers = self.num_workers.max(1);
        BruteForce {
            max_investments: self.max_bruteforce_investments,
            num_chunks: self.num_chunks.unwrap_or(num_workers).max(1),
            num_workers,
        }
    }
}

/// Accepts a json string, a path to a `.json` file, or nothing for the defaults.
pub fn load_settings(settings: Option<&str>) -> Result<SolveSettings> {
    let settings = match settings {
        None => return Ok(SolveSettings::default()),
        Some(s) if s.ends_with(".json") => fs::read_to_string(s)
            .map_err(|e| anyhow!("Failed to read settings file {}: {}", s, e))?,
        Some(s) => s.to_string(),
    };
    dejsonify::<SolveSettings>(&settings).map_err(|e| anyhow!("Failed to parse settings: {}", e))
}
