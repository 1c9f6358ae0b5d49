use std::fmt;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pool {
    Mains,
    Euros,
}

impl Pool {
    pub fn size(&self) -> u8 {
        match self {
            Pool::Mains => 50,
            Pool::Euros => 12,
        }
    }

    pub fn pick_count(&self) -> usize {
        match self {
            Pool::Mains => 5,
            Pool::Euros => 2,
        }
    }
}

/// Paire d'euros non ordonnée, stockée triée : (2, 10) et (10, 2) sont la même paire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "[u8; 2]", into = "[u8; 2]")]
pub struct EuroPair {
    low: u8,
    high: u8,
}

impl EuroPair {
    pub fn new(a: u8, b: u8) -> Result<Self> {
        if a == b {
            bail!("Euro en double : {}", a);
        }
        Ok(Self {
            low: a.min(b),
            high: a.max(b),
        })
    }

    pub fn low(&self) -> u8 {
        self.low
    }

    pub fn high(&self) -> u8 {
        self.high
    }

    pub fn values(&self) -> [u8; 2] {
        [self.low, self.high]
    }

    pub fn contains(&self, value: u8) -> bool {
        self.low == value || self.high == value
    }

    pub fn intersects(&self, other: &EuroPair) -> bool {
        other.contains(self.low) || other.contains(self.high)
    }

    /// Valeurs communes aux deux paires, triées.
    pub fn shared(&self, other: &EuroPair) -> Vec<u8> {
        self.values().into_iter().filter(|&v| other.contains(v)).collect()
    }
}

impl TryFrom<[u8; 2]> for EuroPair {
    type Error = anyhow::Error;

    fn try_from(values: [u8; 2]) -> Result<Self> {
        EuroPair::new(values[0], values[1])
    }
}

impl From<EuroPair> for [u8; 2] {
    fn from(pair: EuroPair) -> Self {
        pair.values()
    }
}

impl fmt::Display for EuroPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.low, self.high)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pick {
    #[serde(rename = "pick_number")]
    pub id: u32,
    #[serde(rename = "main_numbers")]
    pub mains: Vec<u8>,
    #[serde(rename = "euro_numbers")]
    pub euros: EuroPair,
}

impl Pick {
    pub fn new(id: u32, mut mains: Vec<u8>, euros: EuroPair) -> Self {
        mains.sort_unstable();
        Self { id, mains, euros }
    }
}

/// Identifiant de la prochaine grille : suit le plus grand identifiant existant.
pub fn next_pick_id(picks: &[Pick]) -> u32 {
    picks.iter().map(|p| p.id).max().map_or(1, |max| max + 1)
}

pub fn validate_pick(pick: &Pick, main_max: u8, euro_max: u8, mains_per_pick: usize) -> Result<()> {
    if pick.mains.len() != mains_per_pick {
        bail!(
            "Grille {} : {} numéros principaux au lieu de {}",
            pick.id,
            pick.mains.len(),
            mains_per_pick
        );
    }
    for &m in &pick.mains {
        if m < 1 || m > main_max {
            bail!("Grille {} : numéro {} hors limites (1-{})", pick.id, m, main_max);
        }
    }
    for e in pick.euros.values() {
        if e < 1 || e > euro_max {
            bail!("Grille {} : euro {} hors limites (1-{})", pick.id, e, euro_max);
        }
    }
    for i in 0..pick.mains.len() {
        for j in (i + 1)..pick.mains.len() {
            if pick.mains[i] == pick.mains[j] {
                bail!("Grille {} : numéro en double : {}", pick.id, pick.mains[i]);
            }
        }
    }
    Ok(())
}

/// Validation avec les limites EuroJackpot (5 sur 50, 2 sur 12).
pub fn validate_default(pick: &Pick) -> Result<()> {
    validate_pick(pick, Pool::Mains.size(), Pool::Euros.size(), Pool::Mains.pick_count())
}
