use clap::Args;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use toms::config::SimulationConfig;
use toms::genetics::engine::GeneticConfig;
use toms::genetics::{
    AssignmentGenome, AssignmentSpace, GeneticEngine, Individual, OptimizationProgress,
    OptimizationResult, Population, PowerEvaluator,
};
use toms::model::{EvalMode, SystemModel};
use toms::utils::prelude::*;
use toms::{user_info, user_success};

/// Optimisation génétique du placement de ressources
#[derive(Args, Clone, Debug)]
pub struct OptimizeArgs {
    /// Fichier de configuration du scénario (JSON)
    pub config: PathBuf,

    /// Graine du générateur aléatoire (reproductibilité)
    #[arg(short, long, default_value = "0")]
    pub seed: u64,

    /// Fichier de sortie du rapport JSON (stdout si absent)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Paramètres GA retenus quand la configuration n'en fournit pas.
fn default_genetic() -> GeneticConfig {
    GeneticConfig {
        population_size: 100,
        max_generations: 50,
        mutation_rate: 0.05,
        crossover_rate: 0.8,
        elitism_count: 1,
        tournament_size: 3,
        selection: Default::default(),
        crossover: Default::default(),
        stall_generations: None,
        penalty_weight: 1000.0,
    }
}

pub async fn handle(args: OptimizeArgs) -> Result<()> {
    let (config, base_dir) = SimulationConfig::load(&args.config)?;
    let model = Arc::new(SystemModel::from_config(&config, &base_dir)?);
    let mode = EvalMode::from_tee_flag(config.tee);
    let genetic = config.genetic.clone().unwrap_or_else(default_genetic);

    user_info!(
        "OPTIMIZE_START",
        "{} tâches | mode {:?} | pop {} | gen {} | graine {}",
        model.tasks.len(),
        mode,
        genetic.population_size,
        genetic.max_generations,
        args.seed
    );

    let space = AssignmentSpace::from_model(&model, genetic.crossover);
    let evaluator = PowerEvaluator::new(model.clone(), mode);
    let engine = GeneticEngine::new(evaluator, genetic.selection_strategy(), genetic.clone());

    let mut rng = StdRng::seed_from_u64(args.seed);
    let mut pop = Population::new();
    for _ in 0..genetic.population_size {
        pop.add(Individual::new(AssignmentGenome::new_random(
            space.clone(),
            &mut rng,
        )));
    }

    let start = Instant::now();
    let final_pop = engine.run(pop, &mut rng, |pop| {
        if let Some(fit) = pop.best().and_then(|ind| ind.fitness.as_ref()) {
            let progress = OptimizationProgress {
                generation: pop.generation,
                best_power: fit.power,
                best_violation: fit.violation,
            };
            debug!(
                generation = progress.generation,
                best_power = progress.best_power,
                best_violation = progress.best_violation,
                "génération terminée"
            );
        }
    });
    let duration_ms = start.elapsed().as_millis();

    let best = final_pop
        .best()
        .ok_or_else(|| AppError::Config("population vide après optimisation".into()))?;

    // Évaluateur de rapport : mêmes entrées, détail par tâche
    let report_eval = PowerEvaluator::new(model, mode);
    let result = OptimizationResult::from_best(&report_eval, best, final_pop.generation, duration_ms)?;
    let json = serde_json::to_string_pretty(&result)?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, &json)?;
            user_success!(
                "OPTIMIZE_DONE",
                "puissance {:.4} | faisable {} | rapport : {}",
                result.total_power,
                result.feasible,
                path.display()
            );
        }
        None => {
            println!("{json}");
            user_success!(
                "OPTIMIZE_DONE",
                "puissance {:.4} | faisable {}",
                result.total_power,
                result.feasible
            );
        }
    }

    Ok(())
}
