use anyhow::{bail, Context, Result};
use std::path::Path;

use crate::models::{validate_pick, EuroPair, Pick};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickFormat {
    Json,
    Csv,
}

impl PickFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("json") => Ok(PickFormat::Json),
            Some("csv") => Ok(PickFormat::Csv),
            _ => bail!("Format de fichier non reconnu (attendu .json ou .csv) : {:?}", path),
        }
    }
}

pub fn load_picks(path: &Path) -> Result<Vec<Pick>> {
    let mut picks = match PickFormat::from_path(path)? {
        PickFormat::Json => load_json(path)?,
        PickFormat::Csv => load_csv(path)?,
    };
    for pick in &mut picks {
        pick.mains.sort_unstable();
    }
    Ok(picks)
}

pub fn save_picks(path: &Path, picks: &[Pick]) -> Result<()> {
    match PickFormat::from_path(path)? {
        PickFormat::Json => save_json(path, picks),
        PickFormat::Csv => save_csv(path, picks),
    }
}

pub fn validate_picks(picks: &[Pick], main_max: u8, euro_max: u8, mains_per_pick: usize) -> Result<()> {
    for pick in picks {
        validate_pick(pick, main_max, euro_max, mains_per_pick)?;
    }
    Ok(())
}

fn load_json(path: &Path) -> Result<Vec<Pick>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {:?}", path))?;
    let picks: Vec<Pick> = serde_json::from_str(&json)
        .with_context(|| format!("JSON invalide dans {:?}", path))?;
    Ok(picks)
}

fn save_json(path: &Path, picks: &[Pick]) -> Result<()> {
    let json = serde_json::to_string_pretty(picks)?;
    std::fs::write(path, json).with_context(|| format!("Impossible d'écrire {:?}", path))?;
    Ok(())
}

/// Colonnes : numéro de grille, numéros principaux, puis les deux euros.
fn parse_record(record: &csv::StringRecord) -> Result<Pick> {
    if record.len() < 4 {
        bail!("Ligne trop courte ({} champs, minimum 4)", record.len());
    }

    let get_u8 = |idx: usize| -> Result<u8> {
        let s = record.get(idx).unwrap_or_default();
        s.parse::<u8>()
            .with_context(|| format!("Impossible de parser '{}' (index {})", s, idx))
    };

    let raw_id = record.get(0).unwrap_or_default();
    let id = raw_id
        .parse::<u32>()
        .with_context(|| format!("Numéro de grille invalide : '{}'", raw_id))?;

    let euro_start = record.len() - 2;
    let mains = (1..euro_start).map(get_u8).collect::<Result<Vec<_>>>()?;
    let euros = EuroPair::new(get_u8(euro_start)?, get_u8(euro_start + 1)?)?;

    Ok(Pick::new(id, mains, euros))
}

fn load_csv(path: &Path) -> Result<Vec<Pick>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("Impossible d'ouvrir {:?}", path))?;

    let mut picks = Vec::new();
    for (line, record_result) in reader.records().enumerate() {
        let record = record_result.with_context(|| format!("Erreur lecture ligne {}", line + 2))?;
        let pick = parse_record(&record).with_context(|| format!("Erreur parsing ligne {}", line + 2))?;
        picks.push(pick);
    }
    Ok(picks)
}

fn save_csv(path: &Path, picks: &[Pick]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Impossible de créer {:?}", path))?;

    let mains_count = picks.iter().map(|p| p.mains.len()).max().unwrap_or(0);
    let mut header = vec!["pick_number".to_string()];
    header.extend((1..=mains_count).map(|i| format!("main_{}", i)));
    header.push("euro_1".to_string());
    header.push("euro_2".to_string());
    writer.write_record(&header)?;

    for pick in picks {
        let mut row = vec![pick.id.to_string()];
        row.extend(pick.mains.iter().map(|m| m.to_string()));
        row.extend(pick.euros.values().iter().map(|e| e.to_string()));
        writer.write_record(&row)?;
    }

    writer.flush().context("Échec de l'écriture CSV")?;
    Ok(())
}
