use clap::Args;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

use toms::config::SimulationConfig;
use toms::generator;
use toms::user_success;
use toms::utils::prelude::*;

/// Génération des fichiers d'un scénario
#[derive(Args, Clone, Debug)]
pub struct GenerateArgs {
    /// Fichier de configuration contenant la section `generation` (JSON)
    pub config: PathBuf,

    /// Graine du générateur aléatoire (reproductibilité)
    #[arg(short, long, default_value = "0")]
    pub seed: u64,

    /// Répertoire de sortie (défaut : répertoire de la configuration)
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,
}

pub async fn handle(args: GenerateArgs) -> Result<()> {
    let (config, base_dir) = SimulationConfig::load(&args.config)?;
    let generation = config.generation.as_ref().ok_or_else(|| {
        AppError::Usage("la configuration ne contient pas de section `generation`".into())
    })?;

    let out_dir = args.out_dir.unwrap_or(base_dir);
    let mut rng = StdRng::seed_from_u64(args.seed);

    let files = generator::gen_all(generation, &out_dir, &mut rng)?;
    for file in &files {
        user_success!("GENERATE_FILE", "{}", file.display());
    }
    Ok(())
}
