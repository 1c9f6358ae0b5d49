use std::collections::BTreeSet;

use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

use eurojack_cover::cover::CoverOutcome;
use eurojack_cover::verify::VerificationReport;
use eurojack_data::models::{EuroPair, Pick};

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn join_numbers<'a>(numbers: impl IntoIterator<Item = &'a u8>) -> String {
    numbers
        .into_iter()
        .map(|n| format!("{:2}", n))
        .collect::<Vec<_>>()
        .join(" - ")
}

fn join_pairs<'a>(pairs: impl IntoIterator<Item = &'a EuroPair>) -> String {
    pairs
        .into_iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn status_cell(ok: bool) -> Cell {
    if ok {
        Cell::new("OK").fg(Color::Green)
    } else {
        Cell::new("ÉCHEC").fg(Color::Red)
    }
}

pub fn display_picks(title: &str, picks: &[Pick]) {
    println!("\n── {} ──", title);
    if picks.is_empty() {
        println!("Aucune grille à afficher.");
        return;
    }

    let mut table = new_table(vec!["#", "Numéros", "Euros"]);
    for pick in picks {
        table.add_row(vec![
            pick.id.to_string(),
            join_numbers(&pick.mains),
            join_numbers(&pick.euros.values()),
        ]);
    }
    println!("{table}");
}

pub fn display_pairs(used: &BTreeSet<EuroPair>, available: &[EuroPair], unplaceable: &[u8]) {
    println!("\n── Paires d'euros ──");
    let mut table = new_table(vec!["", "Nombre", "Paires"]);
    table.add_row(vec![
        "Utilisées".to_string(),
        used.len().to_string(),
        join_pairs(used),
    ]);
    table.add_row(vec![
        "Disponibles".to_string(),
        available.len().to_string(),
        join_pairs(available),
    ]);
    println!("{table}");

    if !unplaceable.is_empty() {
        println!(
            "Euros sans paire disponible : {} (aucune couverture possible)",
            join_numbers(unplaceable)
        );
    }
}

pub fn display_cover(outcome: &CoverOutcome) {
    println!("\n── Couverture des euros ──");
    println!("  Paires disponibles : {}", outcome.available);
    println!("  Stratégie          : {} ({} étapes)", outcome.strategy, outcome.steps);
    println!("  Paires retenues    : {}", join_pairs(&outcome.pairs));
}

/// Tableau des nouvelles grilles avec, pour chacune, les grilles existantes
/// croisées et la taille du vivier restant.
pub fn display_batch(picks: &[Pick], report: &VerificationReport, main_universe: u8) {
    println!("\n── Nouvelles grilles ──");
    let mut table = new_table(vec!["#", "Numéros", "Euros", "Grilles croisées", "Interdits", "Disponibles"]);

    for pick in picks {
        let check = report.main_checks.iter().find(|c| c.pick_id == pick.id);
        let (crossed, forbidden) = match check {
            Some(c) => (
                c.overlapping.iter().map(|id| id.to_string()).collect::<Vec<_>>().join(", "),
                c.forbidden.len(),
            ),
            None => ("—".to_string(), 0),
        };

        table.add_row(vec![
            pick.id.to_string(),
            join_numbers(&pick.mains),
            join_numbers(&pick.euros.values()),
            crossed,
            forbidden.to_string(),
            (main_universe as usize).saturating_sub(forbidden).to_string(),
        ]);
    }
    println!("{table}");
}

pub fn display_verification(report: &VerificationReport) {
    println!("\n── Vérification des contraintes ──");
    let mut table = new_table(vec!["Contrainte", "Statut", "Détail"]);

    let collisions = if report.pair_collisions.is_empty() {
        "—".to_string()
    } else {
        format!("déjà utilisées : {}", join_pairs(&report.pair_collisions))
    };
    table.add_row(vec![
        Cell::new("1. Paires nouvelles"),
        status_cell(report.pairs_are_new()),
        Cell::new(collisions),
    ]);

    let coverage = &report.coverage;
    let mut details = Vec::new();
    if !coverage.missing.is_empty() {
        details.push(format!("manquants : {}", join_numbers(&coverage.missing)));
    }
    if !coverage.duplicated.is_empty() {
        details.push(format!("en double : {}", join_numbers(&coverage.duplicated)));
    }
    if !coverage.out_of_range.is_empty() {
        details.push(format!("hors limites : {}", join_numbers(&coverage.out_of_range)));
    }
    table.add_row(vec![
        Cell::new("2. Couverture exacte"),
        status_cell(report.coverage_is_exact()),
        Cell::new(if details.is_empty() { "—".to_string() } else { details.join(", ") }),
    ]);

    for check in &report.main_checks {
        let detail = if check.violations.is_empty() {
            format!("{} interdits", check.forbidden.len())
        } else {
            format!("interdits utilisés : {}", join_numbers(&check.violations))
        };
        table.add_row(vec![
            Cell::new(format!("3. Grille {} {}", check.pick_id, check.pair)),
            status_cell(check.is_satisfied()),
            Cell::new(detail),
        ]);
    }
    println!("{table}");

    if report.is_satisfied() {
        println!("Toutes les contraintes sont respectées.");
    } else {
        println!("Certaines contraintes ne sont pas respectées.");
    }
}
