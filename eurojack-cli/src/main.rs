mod display;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::display::{
    display_batch, display_cover, display_pairs, display_picks, display_verification,
};
use eurojack_cover::config::{load_config, save_config};
use eurojack_cover::pairs::{available_pairs, unplaceable_values, used_pairs};
use eurojack_cover::{generate_batch, verify_batch, GeneratorConfig};
use eurojack_data::models::Pick;
use eurojack_data::reference::reference_picks;
use eurojack_data::store::{load_picks, save_picks, validate_picks};

#[derive(Parser)]
#[command(name = "eurojack", about = "Générateur de grilles EuroJackpot sous contraintes")]
struct Cli {
    /// Grilles déjà jouées (.json ou .csv), grilles de référence par défaut
    #[arg(short, long, global = true)]
    picks: Option<PathBuf>,

    /// Configuration du générateur (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Niveau de traces (-v : info, -vv : debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Lister les grilles existantes
    List,

    /// Afficher les paires d'euros utilisées et disponibles
    Pairs,

    /// Générer un lot de nouvelles grilles
    Generate {
        /// Seed pour la reproductibilité
        #[arg(long)]
        seed: Option<u64>,

        /// Nombre maximal de tirages aléatoires avant l'énumération
        #[arg(short, long)]
        attempts: Option<usize>,

        /// Fichier de sortie (.json ou .csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Vérifier un lot de grilles contre les grilles existantes
    Verify {
        /// Fichier du lot (.json ou .csv)
        file: PathBuf,
    },

    /// Afficher ou écrire la configuration effective
    Config {
        /// Fichier de sortie
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => GeneratorConfig::default(),
    };

    let existing = load_existing(cli.picks.as_deref(), &config)?;

    match cli.command {
        Command::List => {
            display_picks("Grilles existantes", &existing);
            Ok(())
        }
        Command::Pairs => cmd_pairs(&existing, &config),
        Command::Generate { seed, attempts, output } => {
            cmd_generate(&existing, config, seed, attempts, output.as_deref())
        }
        Command::Verify { file } => cmd_verify(&existing, &config, &file),
        Command::Config { output } => cmd_config(&config, output.as_deref()),
    }
}

fn init_tracing(verbose: u8) -> Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Impossible d'initialiser les traces")?;

    Ok(())
}

fn load_existing(path: Option<&Path>, config: &GeneratorConfig) -> Result<Vec<Pick>> {
    let picks = match path {
        Some(p) => {
            let picks = load_picks(p)?;
            info!(count = picks.len(), path = %p.display(), "grilles chargées");
            picks
        }
        None => reference_picks(),
    };
    validate_picks(
        &picks,
        config.main_universe,
        config.euro_universe,
        config.mains_per_pick,
    )?;
    Ok(picks)
}

fn cmd_pairs(existing: &[Pick], config: &GeneratorConfig) -> Result<()> {
    let used = used_pairs(existing);
    let available = available_pairs(&used, config.euro_universe);
    let unplaceable = unplaceable_values(&available, config.euro_universe);
    display_pairs(&used, &available, &unplaceable);
    Ok(())
}

fn cmd_generate(
    existing: &[Pick],
    mut config: GeneratorConfig,
    seed: Option<u64>,
    attempts: Option<usize>,
    output: Option<&Path>,
) -> Result<()> {
    if let Some(a) = attempts {
        config.max_attempts = a;
    }

    let mut rng: StdRng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_rng(&mut rand::rng()),
    };

    display_picks("Grilles existantes", existing);

    let batch = generate_batch(existing, &config, &mut rng)
        .context("Échec de la génération des grilles")?;
    let report = verify_batch(existing, &batch.picks, config.euro_universe);

    display_cover(&batch.cover);
    display_batch(&batch.picks, &report, config.main_universe);
    display_verification(&report);

    if let Some(path) = output {
        save_picks(path, &batch.picks)?;
        println!("\nGrilles sauvegardées dans : {}", path.display());
    }

    Ok(())
}

fn cmd_verify(existing: &[Pick], config: &GeneratorConfig, file: &Path) -> Result<()> {
    let new_picks = load_picks(file)?;
    validate_picks(
        &new_picks,
        config.main_universe,
        config.euro_universe,
        config.mains_per_pick,
    )?;

    display_picks("Lot à vérifier", &new_picks);
    let report = verify_batch(existing, &new_picks, config.euro_universe);
    display_verification(&report);

    if !report.is_satisfied() {
        bail!("Le lot {:?} ne respecte pas les contraintes", file);
    }
    Ok(())
}

fn cmd_config(config: &GeneratorConfig, output: Option<&Path>) -> Result<()> {
    config
        .validate()
        .context("Configuration incohérente")?;

    match output {
        Some(path) => {
            save_config(config, path)?;
            println!("Configuration sauvegardée dans : {}", path.display());
        }
        None => println!("{}", config.to_json()?),
    }
    Ok(())
}
