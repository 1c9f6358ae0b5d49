use rand::seq::IndexedRandom;
use rand::Rng;
use tracing::{debug, info};

use eurojack_data::models::{next_pick_id, Pick};

use crate::config::GeneratorConfig;
use crate::cover::{cover_pairs, CoverOutcome};
use crate::error::GeneratorError;
use crate::forbidden::available_mains;
use crate::pairs::used_pairs;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    pub picks: Vec<Pick>,
    pub cover: CoverOutcome,
}

/// Génère `pairs_needed` nouvelles grilles : une par paire de la couverture, dans
/// l'ordre de la couverture, avec des numéros principaux tirés hors de
/// l'ensemble interdit de chaque paire. Aucun résultat partiel.
pub fn generate_batch<R: Rng + ?Sized>(
    existing: &[Pick],
    config: &GeneratorConfig,
    rng: &mut R,
) -> Result<Batch, GeneratorError> {
    config.validate()?;

    let used = used_pairs(existing);
    let cover = cover_pairs(
        &used,
        config.euro_universe,
        config.pairs_needed,
        config.max_attempts,
        rng,
    )?;

    let first_id = next_pick_id(existing);
    let mut picks = Vec::with_capacity(cover.pairs.len());

    for (i, pair) in cover.pairs.iter().enumerate() {
        let pick_id = first_id + i as u32;
        let pool = available_mains(existing, pair, config.main_universe);
        debug!(
            pick_id,
            %pair,
            forbidden = config.main_universe as usize - pool.len(),
            available = pool.len(),
            "numéros disponibles"
        );

        if pool.len() < config.mains_per_pick {
            return Err(GeneratorError::InsufficientMainPool {
                pick_id,
                pair: *pair,
                available: pool.len(),
                required: config.mains_per_pick,
            });
        }

        let mains: Vec<u8> = pool
            .choose_multiple(rng, config.mains_per_pick)
            .copied()
            .collect();
        picks.push(Pick::new(pick_id, mains, *pair));
    }

    info!(count = picks.len(), first_id, "grilles générées");
    Ok(Batch { picks, cover })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forbidden::forbidden_mains;
    use crate::pairs::is_exact_cover;
    use eurojack_data::models::EuroPair;
    use eurojack_data::reference::reference_picks;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn pair(a: u8, b: u8) -> EuroPair {
        EuroPair::new(a, b).unwrap()
    }

    #[test]
    fn test_reference_batch() {
        let existing = reference_picks();
        let config = GeneratorConfig::default();
        let mut rng = StdRng::seed_from_u64(42);
        let batch = generate_batch(&existing, &config, &mut rng).unwrap();

        assert_eq!(batch.picks.len(), 6);
        let ids: Vec<u32> = batch.picks.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![19, 20, 21, 22, 23, 24]);

        let pairs: Vec<EuroPair> = batch.picks.iter().map(|p| p.euros).collect();
        assert_eq!(pairs, batch.cover.pairs);
        assert!(is_exact_cover(&pairs, 12));

        for pick in &batch.picks {
            assert_eq!(pick.mains.len(), 5);
            assert!(pick.mains.windows(2).all(|w| w[0] < w[1]), "non trié: {:?}", pick.mains);
            assert!(pick.mains.iter().all(|&m| (1..=50).contains(&m)));
            let forbidden = forbidden_mains(&existing, &pick.euros);
            assert!(
                pick.mains.iter().all(|m| !forbidden.contains(m)),
                "grille {} utilise un numéro interdit: {:?}",
                pick.id,
                pick.mains
            );
        }
    }

    #[test]
    fn test_empty_existing_starts_at_one() {
        let config = GeneratorConfig::default();
        let mut rng = StdRng::seed_from_u64(5);
        let batch = generate_batch(&[], &config, &mut rng).unwrap();
        assert_eq!(batch.picks[0].id, 1);
        assert_eq!(batch.cover.available, 66);
    }

    #[test]
    fn test_insufficient_main_pool() {
        // Univers de 9 numéros : la grille existante en (1,2) en interdit 5,
        // il en reste 4 pour toute paire contenant 1 ou 2.
        let existing = vec![Pick::new(1, vec![1, 2, 3, 4, 5], pair(1, 2))];
        let config = GeneratorConfig {
            main_universe: 9,
            euro_universe: 4,
            pairs_needed: 2,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(11);
        let err = generate_batch(&existing, &config, &mut rng).unwrap_err();
        match err {
            GeneratorError::InsufficientMainPool { pick_id, available, required, pair: p } => {
                assert_eq!(pick_id, 2);
                assert_eq!(available, 4);
                assert_eq!(required, 5);
                assert!(p.contains(1) || p.contains(2));
            }
            other => panic!("erreur inattendue: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_config_rejected_before_search() {
        let config = GeneratorConfig { pairs_needed: 7, ..Default::default() };
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            generate_batch(&reference_picks(), &config, &mut rng),
            Err(GeneratorError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_seed_determinism() {
        let existing = reference_picks();
        let config = GeneratorConfig::default();
        let a = generate_batch(&existing, &config, &mut StdRng::seed_from_u64(2024)).unwrap();
        let b = generate_batch(&existing, &config, &mut StdRng::seed_from_u64(2024)).unwrap();
        assert_eq!(a, b);
    }
}
