use eurojack_data::models::EuroPair;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("configuration invalide : {reason}")]
    InvalidConfiguration { reason: String },

    #[error(
        "aucune couverture exacte parmi les {available} paires disponibles{}",
        describe_unplaceable(.unplaceable)
    )]
    NoValidCover { available: usize, unplaceable: Vec<u8> },

    #[error(
        "grille {pick_id} (euros {pair}) : seulement {available} numéros principaux disponibles, {required} requis"
    )]
    InsufficientMainPool {
        pick_id: u32,
        pair: EuroPair,
        available: usize,
        required: usize,
    },
}

impl GeneratorError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        GeneratorError::InvalidConfiguration { reason: reason.into() }
    }
}

fn describe_unplaceable(values: &[u8]) -> String {
    if values.is_empty() {
        String::new()
    } else {
        let list = values.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(", ");
        format!(" (euros sans paire disponible : {})", list)
    }
}
