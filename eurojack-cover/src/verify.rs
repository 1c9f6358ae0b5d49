use std::collections::{BTreeMap, BTreeSet};

use eurojack_data::models::{EuroPair, Pick};

use crate::forbidden::{forbidden_mains, overlapping_picks};
use crate::pairs::used_pairs;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoverageCheck {
    /// Valeurs de 1..=E absentes des nouvelles paires.
    pub missing: Vec<u8>,
    /// Valeurs présentes plus d'une fois.
    pub duplicated: Vec<u8>,
    /// Valeurs hors de 1..=E.
    pub out_of_range: Vec<u8>,
}

impl CoverageCheck {
    pub fn is_satisfied(&self) -> bool {
        self.missing.is_empty() && self.duplicated.is_empty() && self.out_of_range.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MainCheck {
    pub pick_id: u32,
    pub pair: EuroPair,
    /// Identifiants des grilles existantes partageant un euro.
    pub overlapping: Vec<u32>,
    pub forbidden: BTreeSet<u8>,
    pub violations: Vec<u8>,
}

impl MainCheck {
    pub fn is_satisfied(&self) -> bool {
        self.violations.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationReport {
    pub pair_collisions: Vec<EuroPair>,
    pub coverage: CoverageCheck,
    pub main_checks: Vec<MainCheck>,
}

impl VerificationReport {
    pub fn pairs_are_new(&self) -> bool {
        self.pair_collisions.is_empty()
    }

    pub fn coverage_is_exact(&self) -> bool {
        self.coverage.is_satisfied()
    }

    pub fn mains_are_allowed(&self) -> bool {
        self.main_checks.iter().all(MainCheck::is_satisfied)
    }

    pub fn is_satisfied(&self) -> bool {
        self.pairs_are_new() && self.coverage_is_exact() && self.mains_are_allowed()
    }
}

/// Recalcule les trois contraintes d'un lot sans rien modifier.
pub fn verify_batch(existing: &[Pick], new_picks: &[Pick], euro_universe: u8) -> VerificationReport {
    let used = used_pairs(existing);
    let pair_collisions: Vec<EuroPair> = used_pairs(new_picks)
        .into_iter()
        .filter(|p| used.contains(p))
        .collect();

    VerificationReport {
        pair_collisions,
        coverage: check_coverage(new_picks, euro_universe),
        main_checks: new_picks.iter().map(|pick| check_mains(existing, pick)).collect(),
    }
}

fn check_coverage(new_picks: &[Pick], euro_universe: u8) -> CoverageCheck {
    let mut counts: BTreeMap<u8, usize> = BTreeMap::new();
    for value in new_picks.iter().flat_map(|p| p.euros.values()) {
        *counts.entry(value).or_default() += 1;
    }

    CoverageCheck {
        missing: (1..=euro_universe).filter(|v| !counts.contains_key(v)).collect(),
        duplicated: counts.iter().filter(|(_, &n)| n > 1).map(|(&v, _)| v).collect(),
        out_of_range: counts
            .keys()
            .copied()
            .filter(|&v| v < 1 || v > euro_universe)
            .collect(),
    }
}

fn check_mains(existing: &[Pick], pick: &Pick) -> MainCheck {
    let forbidden = forbidden_mains(existing, &pick.euros);
    let violations: Vec<u8> = pick
        .mains
        .iter()
        .copied()
        .filter(|m| forbidden.contains(m))
        .collect();

    MainCheck {
        pick_id: pick.id,
        pair: pick.euros,
        overlapping: overlapping_picks(existing, &pick.euros)
            .iter()
            .map(|o| o.pick.id)
            .collect(),
        forbidden,
        violations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eurojack_data::reference::reference_picks;

    fn pair(a: u8, b: u8) -> EuroPair {
        EuroPair::new(a, b).unwrap()
    }

    fn valid_batch() -> Vec<Pick> {
        // Couverture (1,2) (3,4) (5,6) (7,8) (9,12) (10,11), numéros hors interdits.
        vec![
            Pick::new(19, vec![1, 2, 4, 9, 10], pair(1, 2)),
            Pick::new(20, vec![2, 5, 6, 7, 9], pair(3, 4)),
            Pick::new(21, vec![1, 5, 6, 10, 13], pair(5, 6)),
            Pick::new(22, vec![3, 5, 6, 7, 11], pair(7, 8)),
            Pick::new(23, vec![1, 2, 4, 5, 6], pair(9, 12)),
            Pick::new(24, vec![1, 2, 4, 9, 10], pair(10, 11)),
        ]
    }

    #[test]
    fn test_valid_batch_passes() {
        let report = verify_batch(&reference_picks(), &valid_batch(), 12);
        assert!(report.pairs_are_new());
        assert!(report.coverage_is_exact(), "{:?}", report.coverage);
        assert!(report.mains_are_allowed(), "{:?}", report.main_checks);
        assert!(report.is_satisfied());
        assert_eq!(report.main_checks.len(), 6);
    }

    #[test]
    fn test_collision_reported() {
        let mut batch = valid_batch();
        batch[0].euros = pair(1, 12);
        batch[5].euros = pair(2, 10);
        let report = verify_batch(&reference_picks(), &batch, 12);
        assert_eq!(report.pair_collisions, vec![pair(1, 12), pair(2, 10)]);
        assert!(!report.is_satisfied());
    }

    #[test]
    fn test_coverage_gaps_reported() {
        let mut batch = valid_batch();
        batch[1].euros = pair(1, 3);
        let report = verify_batch(&reference_picks(), &batch, 12);
        assert_eq!(report.coverage.missing, vec![4]);
        assert_eq!(report.coverage.duplicated, vec![1]);
        assert!(!report.coverage_is_exact());
    }

    #[test]
    fn test_out_of_range_euro_reported() {
        let mut batch = valid_batch();
        batch[5].euros = pair(10, 13);
        let report = verify_batch(&reference_picks(), &batch, 12);
        assert_eq!(report.coverage.out_of_range, vec![13]);
        assert_eq!(report.coverage.missing, vec![11]);
    }

    #[test]
    fn test_forbidden_main_reported() {
        // 14 appartient à la grille 1 (euros 2 et 10), qui croise (2, 6).
        let existing = vec![Pick::new(1, vec![14, 21, 32, 39, 48], pair(2, 10))];
        let new_picks = vec![Pick::new(2, vec![1, 2, 3, 14, 48], pair(2, 6))];
        let report = verify_batch(&existing, &new_picks, 12);
        let check = &report.main_checks[0];
        assert_eq!(check.overlapping, vec![1]);
        assert_eq!(check.violations, vec![14, 48]);
        assert!(!report.mains_are_allowed());
    }

    #[test]
    fn test_verification_leaves_input_untouched() {
        let existing = reference_picks();
        let batch = valid_batch();
        let _ = verify_batch(&existing, &batch, 12);
        assert_eq!(existing, reference_picks());
        assert_eq!(batch, valid_batch());
    }
}
