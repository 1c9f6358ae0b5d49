use std::collections::BTreeSet;

use eurojack_data::models::{EuroPair, Pick};

/// Les C(E, 2) paires de l'univers euro, en ordre lexicographique.
pub fn all_pairs(euro_universe: u8) -> Vec<EuroPair> {
    (1..=euro_universe)
        .flat_map(|a| (a.saturating_add(1)..=euro_universe).filter_map(move |b| EuroPair::new(a, b).ok()))
        .collect()
}

pub fn used_pairs(picks: &[Pick]) -> BTreeSet<EuroPair> {
    picks.iter().map(|p| p.euros).collect()
}

pub fn available_pairs(used: &BTreeSet<EuroPair>, euro_universe: u8) -> Vec<EuroPair> {
    all_pairs(euro_universe)
        .into_iter()
        .filter(|p| !used.contains(p))
        .collect()
}

/// Vrai si chaque valeur de 1..=E apparaît exactement une fois dans les paires.
pub fn is_exact_cover(pairs: &[EuroPair], euro_universe: u8) -> bool {
    if pairs.len() * 2 != euro_universe as usize {
        return false;
    }
    let mut seen = vec![false; euro_universe as usize + 1];
    for value in pairs.iter().flat_map(|p| p.values()) {
        let idx = value as usize;
        if idx == 0 || idx >= seen.len() || seen[idx] {
            return false;
        }
        seen[idx] = true;
    }
    true
}

/// Valeurs qu'aucune paire disponible ne peut placer.
pub fn unplaceable_values(available: &[EuroPair], euro_universe: u8) -> Vec<u8> {
    (1..=euro_universe)
        .filter(|&v| !available.iter().any(|p| p.contains(v)))
        .collect()
}
