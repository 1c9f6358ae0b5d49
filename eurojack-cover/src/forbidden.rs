use std::collections::BTreeSet;

use eurojack_data::models::{EuroPair, Pick};

/// Grille existante qui partage au moins un euro avec la paire candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlap<'a> {
    pub pick: &'a Pick,
    pub shared: Vec<u8>,
}

pub fn overlapping_picks<'a>(existing: &'a [Pick], pair: &EuroPair) -> Vec<Overlap<'a>> {
    existing
        .iter()
        .filter(|p| p.euros.intersects(pair))
        .map(|p| Overlap {
            pick: p,
            shared: pair.shared(&p.euros),
        })
        .collect()
}

/// Union des numéros principaux des grilles existantes dont la paire d'euros
/// croise `pair`.
pub fn forbidden_mains(existing: &[Pick], pair: &EuroPair) -> BTreeSet<u8> {
    existing
        .iter()
        .filter(|p| p.euros.intersects(pair))
        .flat_map(|p| p.mains.iter().copied())
        .collect()
}

/// Numéros de 1..=`main_universe` encore autorisés pour `pair`.
pub fn available_mains(existing: &[Pick], pair: &EuroPair, main_universe: u8) -> Vec<u8> {
    let forbidden = forbidden_mains(existing, pair);
    (1..=main_universe).filter(|m| !forbidden.contains(m)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use eurojack_data::reference::reference_picks;

    fn pair(a: u8, b: u8) -> EuroPair {
        EuroPair::new(a, b).unwrap()
    }

    #[test]
    fn test_shared_euro_forbids_mains() {
        let existing = vec![Pick::new(1, vec![14, 21, 32, 39, 48], pair(2, 10))];
        let forbidden = forbidden_mains(&existing, &pair(2, 6));
        assert_eq!(forbidden.into_iter().collect::<Vec<_>>(), vec![14, 21, 32, 39, 48]);
    }

    #[test]
    fn test_disjoint_pair_forbids_nothing() {
        let existing = vec![Pick::new(1, vec![14, 21, 32, 39, 48], pair(2, 10))];
        assert!(forbidden_mains(&existing, &pair(3, 6)).is_empty());
    }

    #[test]
    fn test_reference_forbidden_union() {
        // Euros 1 et 2 : grilles 1, 2, 9, 12, 14 et 18.
        let existing = reference_picks();
        let forbidden = forbidden_mains(&existing, &pair(1, 2));
        let expected: BTreeSet<u8> = [
            14, 21, 32, 39, 48, // 1
            7, 13, 16, 47, 50, // 2
            31, 33, 37, 45, 49, // 9
            5, 6, 15, 24, 38, // 12
            3, 8, 18, 23, // 14 (7 déjà présent)
            25, 43, // 18 (8, 18, 21 déjà présents)
        ]
        .into_iter()
        .collect();
        assert_eq!(forbidden, expected);

        let overlaps = overlapping_picks(&existing, &pair(1, 2));
        let ids: Vec<u32> = overlaps.iter().map(|o| o.pick.id).collect();
        assert_eq!(ids, vec![1, 2, 9, 12, 14, 18]);
        assert_eq!(overlaps[0].shared, vec![2]);
        assert_eq!(overlaps[1].shared, vec![1]);
    }

    #[test]
    fn test_forbidden_is_deterministic() {
        let existing = reference_picks();
        let first = forbidden_mains(&existing, &pair(5, 9));
        let _ = forbidden_mains(&existing, &pair(1, 12));
        let mut reversed = existing.clone();
        reversed.reverse();
        assert_eq!(first, forbidden_mains(&existing, &pair(5, 9)));
        assert_eq!(first, forbidden_mains(&reversed, &pair(5, 9)));
    }

    #[test]
    fn test_available_mains_complement() {
        let existing = vec![Pick::new(1, vec![1, 2, 3, 4, 5], pair(1, 2))];
        let available = available_mains(&existing, &pair(2, 3), 8);
        assert_eq!(available, vec![6, 7, 8]);
    }
}
