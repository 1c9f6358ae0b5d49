use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use eurojack_data::models::Pool;

use crate::error::GeneratorError;

pub const DEFAULT_MAX_ATTEMPTS: usize = 10_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub main_universe: u8,
    pub euro_universe: u8,
    pub pairs_needed: usize,
    pub mains_per_pick: usize,
    /// Budget de tirages aléatoires avant l'énumération exhaustive.
    pub max_attempts: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            main_universe: Pool::Mains.size(),
            euro_universe: Pool::Euros.size(),
            pairs_needed: Pool::Euros.size() as usize / 2,
            mains_per_pick: Pool::Mains.pick_count(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl GeneratorConfig {
    pub fn validate(&self) -> Result<(), GeneratorError> {
        validate_cover_sizes(self.euro_universe, self.pairs_needed)?;
        if self.mains_per_pick == 0 {
            return Err(GeneratorError::invalid("mains_per_pick doit être au moins 1"));
        }
        if self.mains_per_pick > self.main_universe as usize {
            return Err(GeneratorError::invalid(format!(
                "mains_per_pick ({}) dépasse main_universe ({})",
                self.mains_per_pick, self.main_universe
            )));
        }
        Ok(())
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Une couverture exacte par paires exige un univers pair et E/2 paires.
pub fn validate_cover_sizes(euro_universe: u8, pairs_needed: usize) -> Result<(), GeneratorError> {
    if euro_universe < 2 || euro_universe % 2 != 0 {
        return Err(GeneratorError::invalid(format!(
            "euro_universe ({}) doit être pair et au moins 2",
            euro_universe
        )));
    }
    if pairs_needed != euro_universe as usize / 2 {
        return Err(GeneratorError::invalid(format!(
            "pairs_needed ({}) doit valoir euro_universe / 2 ({})",
            pairs_needed,
            euro_universe / 2
        )));
    }
    Ok(())
}

pub fn save_config(config: &GeneratorConfig, path: &Path) -> anyhow::Result<()> {
    let json = config.to_json()?;
    std::fs::write(path, json).with_context(|| format!("Impossible d'écrire {:?}", path))?;
    Ok(())
}

pub fn load_config(path: &Path) -> anyhow::Result<GeneratorConfig> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {:?}", path))?;
    let config: GeneratorConfig = serde_json::from_str(&json)
        .with_context(|| format!("Configuration invalide dans {:?}", path))?;
    Ok(config)
}
