use std::collections::BTreeSet;

use rand::seq::index;
use rand::{Rng, RngCore};
use tracing::{debug, info, warn};

use eurojack_data::models::EuroPair;

use crate::config::validate_cover_sizes;
use crate::error::GeneratorError;
use crate::pairs::{available_pairs, is_exact_cover, unplaceable_values};

/// Une instance de couverture exacte : choisir `pairs_needed` paires de `available`
/// qui partitionnent 1..=`euro_universe`.
#[derive(Debug, Clone, Copy)]
pub struct CoverProblem<'a> {
    pub available: &'a [EuroPair],
    pub euro_universe: u8,
    pub pairs_needed: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Search {
    pub pairs: Option<Vec<EuroPair>>,
    /// Tirages (échantillonneur) ou paires posées (énumération).
    pub steps: usize,
}

pub trait CoverStrategy {
    fn name(&self) -> &str;
    fn search(&self, problem: &CoverProblem<'_>, rng: &mut dyn RngCore) -> Search;
}

/// Tirages uniformes sans remise, bornés par `max_attempts`. Peut échouer même si
/// une couverture existe.
#[derive(Debug, Clone)]
pub struct RandomSampler {
    pub max_attempts: usize,
}

impl CoverStrategy for RandomSampler {
    fn name(&self) -> &str {
        "aléatoire"
    }

    fn search(&self, problem: &CoverProblem<'_>, rng: &mut dyn RngCore) -> Search {
        let n = problem.available.len();
        if n < problem.pairs_needed {
            return Search { pairs: None, steps: 0 };
        }

        for attempt in 1..=self.max_attempts {
            let candidate: Vec<EuroPair> = index::sample(rng, n, problem.pairs_needed)
                .into_iter()
                .map(|i| problem.available[i])
                .collect();

            if is_exact_cover(&candidate, problem.euro_universe) {
                debug!(attempt, "couverture trouvée par tirage");
                return Search { pairs: Some(candidate), steps: attempt };
            }
        }

        Search { pairs: None, steps: self.max_attempts }
    }
}

/// Énumération déterministe : renvoie le premier sous-ensemble, en ordre
/// lexicographique des indices dans `available`, qui forme une couverture exacte.
///
/// `available` doit être trié. Dans une couverture triée, la i-ème paire commence
/// toujours par la plus petite valeur encore libre, donc le retour arrière ne
/// pose que ces paires-là et visite les couvertures dans le même ordre qu'un
/// parcours de toutes les combinaisons.
#[derive(Debug, Clone, Default)]
pub struct Enumerator;

impl Enumerator {
    fn extend(
        &self,
        problem: &CoverProblem<'_>,
        chosen: &mut Vec<EuroPair>,
        covered: &mut [bool],
        steps: &mut usize,
    ) -> bool {
        if chosen.len() == problem.pairs_needed {
            return is_exact_cover(chosen, problem.euro_universe);
        }

        let Some(lowest) = (1..=problem.euro_universe).find(|&v| !covered[v as usize]) else {
            return false;
        };

        for &pair in problem.available.iter().filter(|p| p.low() == lowest) {
            let high = pair.high() as usize;
            if high >= covered.len() || covered[high] {
                continue;
            }

            *steps += 1;
            covered[lowest as usize] = true;
            covered[high] = true;
            chosen.push(pair);

            if self.extend(problem, chosen, covered, steps) {
                return true;
            }

            chosen.pop();
            covered[lowest as usize] = false;
            covered[high] = false;
        }

        false
    }
}

impl CoverStrategy for Enumerator {
    fn name(&self) -> &str {
        "énumération"
    }

    fn search(&self, problem: &CoverProblem<'_>, _rng: &mut dyn RngCore) -> Search {
        let mut chosen = Vec::with_capacity(problem.pairs_needed);
        let mut covered = vec![false; problem.euro_universe as usize + 1];
        let mut steps = 0;

        let found = self.extend(problem, &mut chosen, &mut covered, &mut steps);
        Search {
            pairs: found.then_some(chosen),
            steps,
        }
    }
}

/// Stratégies dans l'ordre d'essai : tirage aléatoire puis énumération.
pub fn default_strategies(max_attempts: usize) -> Vec<Box<dyn CoverStrategy>> {
    vec![
        Box::new(RandomSampler { max_attempts }),
        Box::new(Enumerator),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverOutcome {
    /// Paires retenues, triées.
    pub pairs: Vec<EuroPair>,
    pub strategy: String,
    pub steps: usize,
    pub available: usize,
}

pub fn cover_pairs<R: Rng + ?Sized>(
    existing_pairs: &BTreeSet<EuroPair>,
    euro_universe: u8,
    pairs_needed: usize,
    max_attempts: usize,
    rng: &mut R,
) -> Result<CoverOutcome, GeneratorError> {
    cover_pairs_with(
        &default_strategies(max_attempts),
        existing_pairs,
        euro_universe,
        pairs_needed,
        rng,
    )
}

pub fn cover_pairs_with<R: Rng + ?Sized>(
    strategies: &[Box<dyn CoverStrategy>],
    existing_pairs: &BTreeSet<EuroPair>,
    euro_universe: u8,
    pairs_needed: usize,
    rng: &mut R,
) -> Result<CoverOutcome, GeneratorError> {
    validate_cover_sizes(euro_universe, pairs_needed)?;

    let available = available_pairs(existing_pairs, euro_universe);
    info!(
        used = existing_pairs.len(),
        available = available.len(),
        "recherche de {} paires couvrant 1..={}",
        pairs_needed,
        euro_universe
    );
    debug!(?available, "paires disponibles");

    let problem = CoverProblem {
        available: &available,
        euro_universe,
        pairs_needed,
    };

    let mut rng = rng;
    for (i, strategy) in strategies.iter().enumerate() {
        let search = strategy.search(&problem, &mut rng);
        match search.pairs {
            Some(mut pairs) => {
                pairs.sort();
                info!(strategy = strategy.name(), steps = search.steps, "couverture trouvée");
                return Ok(CoverOutcome {
                    pairs,
                    strategy: strategy.name().to_string(),
                    steps: search.steps,
                    available: available.len(),
                });
            }
            None if i + 1 < strategies.len() => {
                warn!(
                    strategy = strategy.name(),
                    steps = search.steps,
                    "échec de la stratégie, passage à la suivante"
                );
            }
            None => {}
        }
    }

    let unplaceable = unplaceable_values(&available, euro_universe);
    Err(GeneratorError::NoValidCover {
        available: available.len(),
        unplaceable,
    })
}
