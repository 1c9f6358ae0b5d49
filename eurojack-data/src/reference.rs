use crate::models::{EuroPair, Pick};

const REFERENCE: [(u32, [u8; 5], [u8; 2]); 18] = [
    (1, [14, 21, 32, 39, 48], [2, 10]),
    (2, [7, 13, 16, 47, 50], [1, 12]),
    (3, [8, 10, 23, 27, 39], [4, 8]),
    (4, [17, 20, 33, 36, 48], [6, 7]),
    (5, [11, 28, 32, 35, 36], [3, 5]),
    (6, [12, 25, 40, 43, 44], [9, 11]),
    (7, [1, 29, 30, 49, 50], [4, 8]),
    (8, [3, 19, 22, 40, 42], [3, 5]),
    (9, [31, 33, 37, 45, 49], [1, 12]),
    (10, [2, 4, 9, 26, 44], [6, 7]),
    (11, [18, 34, 41, 43, 46], [9, 11]),
    (12, [5, 6, 15, 24, 38], [2, 10]),
    (13, [17, 22, 36, 40, 43], [8, 12]),
    (14, [3, 7, 8, 18, 23], [2, 6]),
    (15, [3, 7, 13, 31, 33], [9, 10]),
    (16, [4, 12, 16, 26, 45], [4, 5]),
    (17, [8, 21, 28, 39, 45], [7, 11]),
    (18, [8, 18, 21, 25, 43], [1, 3]),
];

/// Les 18 grilles déjà jouées, utilisées quand aucun fichier n'est fourni.
pub fn reference_picks() -> Vec<Pick> {
    REFERENCE
        .iter()
        .map(|&(id, mains, [a, b])| Pick {
            id,
            mains: mains.to_vec(),
            euros: EuroPair::new(a, b).expect("paire de référence valide"),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::validate_default;
    use std::collections::BTreeSet;

    #[test]
    fn test_reference_picks_valid() {
        let picks = reference_picks();
        assert_eq!(picks.len(), 18);
        for pick in &picks {
            validate_default(pick).unwrap();
            assert!(pick.mains.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_reference_distinct_pairs() {
        let pairs: BTreeSet<EuroPair> = reference_picks().iter().map(|p| p.euros).collect();
        assert_eq!(pairs.len(), 12);
    }
}
