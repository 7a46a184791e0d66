// FICHIER : toms/tests/optimizer_suite.rs
//
// Parcours complet : configuration -> modèle système -> moteur génétique.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

use toms::config::SimulationConfig;
use toms::generator;
use toms::genetics::engine::GeneticConfig;
use toms::genetics::{
    AssignmentGenome, AssignmentSpace, GeneticEngine, Individual, OptimizationResult, Population,
    PowerEvaluator,
};
use toms::model::{task_metrics, EvalMode, SystemModel};

const SCENARIO: &str = r#"{
    "cpufreqs": [
        { "wcet_scale": 2.0, "power_active": 1.0, "power_idle": 0.4 },
        { "wcet_scale": 1.0, "power_active": 2.0, "power_idle": 1.0 }
    ],
    "mems": [
        { "wcet_scale": 1.2, "power_active": 0.8, "power_idle": 0.3 },
        { "wcet_scale": 1.0, "power_active": 1.0, "power_idle": 0.5 }
    ],
    "clouds": [{ "computation_power": 2.0 }],
    "offloading_ratios": [0.0, 0.25, 0.5, 1.0],
    "tasks": [
        { "wcet": 10, "period": 100, "memreq": 16, "mem_active_ratio": 0.2,
          "task_size": 100, "input_size": 10, "output_size": 10 },
        { "wcet": 20, "period": 200, "memreq": 32, "mem_active_ratio": 0.5,
          "task_size": 200, "input_size": 20, "output_size": 20 },
        { "wcet": 5, "period": 50, "memreq": 8, "mem_active_ratio": 0.1,
          "task_size": 50, "input_size": 5, "output_size": 5, "offloading": false }
    ],
    "networks": [
        { "uplink": 100, "downlink": 100 },
        { "uplink": 80, "downlink": 120 },
        { "uplink": 100, "downlink": 100 }
    ],
    "net_commanders": [
        { "intercept_out": 1, "intercept_in": 1 },
        { "intercept_out": 2, "intercept_in": 2 },
        { "intercept_out": 0, "intercept_in": 0 }
    ],
    "genetic": {
        "population_size": 40,
        "max_generations": 30,
        "mutation_rate": 0.1,
        "crossover_rate": 0.8,
        "elitism_count": 2
    }
}"#;

fn load_model(raw: &str) -> (SimulationConfig, Arc<SystemModel>) {
    let config: SimulationConfig = serde_json::from_str(raw).unwrap();
    let base_dir = std::path::Path::new(".");
    let model = SystemModel::from_config(&config, base_dir).unwrap();
    (config, Arc::new(model))
}

fn run_engine(
    model: Arc<SystemModel>,
    genetic: &GeneticConfig,
    mode: EvalMode,
    seed: u64,
) -> (Population<AssignmentGenome>, PowerEvaluator) {
    let space = AssignmentSpace::from_model(&model, genetic.crossover);
    let evaluator = PowerEvaluator::new(model.clone(), mode);
    let engine = GeneticEngine::new(evaluator, genetic.selection_strategy(), genetic.clone());

    let mut rng = StdRng::seed_from_u64(seed);
    let mut pop = Population::new();
    for _ in 0..genetic.population_size {
        pop.add(Individual::new(AssignmentGenome::new_random(
            space.clone(),
            &mut rng,
        )));
    }
    let final_pop = engine.run(pop, &mut rng, |_| {});
    (final_pop, PowerEvaluator::new(model, mode))
}

#[test]
fn test_full_pipeline_finds_feasible_assignment() {
    let (config, model) = load_model(SCENARIO);
    let genetic = config.genetic.clone().unwrap();

    let (final_pop, evaluator) = run_engine(model, &genetic, EvalMode::Baseline, 42);
    let best = final_pop.best().unwrap();
    let fitness = best.fitness.as_ref().unwrap();

    // Le scénario est largement sous-chargé : le GA doit trouver un placement
    // faisable avec un budget de générations modeste.
    assert!(fitness.is_feasible(), "violation : {}", fitness.violation);
    assert!(fitness.power.is_finite() && fitness.power > 0.0);

    // Le rapport détaillé recoupe la fitness agrégée
    let result =
        OptimizationResult::from_best(&evaluator, best, final_pop.generation, 0).unwrap();
    let sum: f64 = result
        .tasks
        .iter()
        .map(|t| t.power_cpu + t.power_mem + t.power_net_com)
        .sum();
    assert!((sum - result.total_power).abs() < 1e-9);
    assert!(result.tasks.iter().all(|t| t.utilization <= 1.0));
    assert!(result.tasks.iter().all(|t| t.deadline_ratio <= 1.0));
}

#[test]
fn test_same_seed_yields_identical_trajectory() {
    let (config, model) = load_model(SCENARIO);
    let genetic = config.genetic.clone().unwrap();

    let (pop_a, _) = run_engine(model.clone(), &genetic, EvalMode::Baseline, 7);
    let (pop_b, _) = run_engine(model, &genetic, EvalMode::Baseline, 7);

    let fit_a = pop_a.best().unwrap().fitness.as_ref().unwrap();
    let fit_b = pop_b.best().unwrap().fitness.as_ref().unwrap();
    assert_eq!(fit_a.power, fit_b.power);
    assert_eq!(fit_a.violation, fit_b.violation);
    assert_eq!(
        pop_a.best().unwrap().genome.genes,
        pop_b.best().unwrap().genome.genes
    );
}

#[test]
fn test_tee_mode_never_improves_on_baseline_for_same_assignment() {
    let (_, model) = load_model(SCENARIO);

    // Comparaison point à point sur l'espace entier (catalogues réduits)
    for mem in 0..model.mems.len() {
        for cpufreq in 0..model.cpufreqs.len() {
            for ratio in 0..model.offloading_ratios.len() {
                let base = task_metrics(&model, 0, mem, 0, cpufreq, ratio, EvalMode::Baseline);
                let tee = task_metrics(&model, 0, mem, 0, cpufreq, ratio, EvalMode::Tee);
                assert!(tee.deadline_ratio >= base.deadline_ratio);
                assert!(tee.total_power() >= base.total_power() - 1e-12);
            }
        }
    }
}

#[test]
fn test_degenerate_network_pins_every_task_on_device() {
    let raw = SCENARIO.replace(r#""uplink": 80"#, r#""uplink": 0"#);
    let (config, model) = load_model(&raw);
    assert!(model.tasks.iter().all(|t| !t.offloading));

    let genetic = config.genetic.clone().unwrap();
    let (final_pop, evaluator) = run_engine(model, &genetic, EvalMode::Baseline, 3);
    let best = final_pop.best().unwrap();

    // Toute tâche épinglée lit le ratio d'index 0 dans le rapport
    let result =
        OptimizationResult::from_best(&evaluator, best, final_pop.generation, 0).unwrap();
    assert!(result.tasks.iter().all(|t| t.assignment.ratio_index == 0));
    assert!(result.tasks.iter().all(|t| t.power_net_com == 0.0));
}

#[test]
fn test_generated_scenario_feeds_the_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let gen_raw = r#"{
        "cpufreqs": [{ "wcet_scale": 1.0, "power_active": 2.0, "power_idle": 1.0 }],
        "mems": [{ "wcet_scale": 1.0, "power_active": 1.0, "power_idle": 0.5 }],
        "clouds": [{ "computation_power": 2.0 }],
        "offloading_ratios": [0.0, 0.5, 1.0],
        "tasks_file": "task_generated.txt",
        "networks_file": "network_generated.txt",
        "net_commanders_file": "network_commander_generated.txt",
        "generation": {
            "n_tasks": 12,
            "wcet": [1, 10],
            "period": [100, 500],
            "memreq": [0, 64],
            "mem_active_ratio": [0.0, 1.0],
            "task_size": [0, 100],
            "input_size": [0, 50],
            "output_size": [0, 50],
            "n_networks": 12,
            "uplink": [50, 100],
            "downlink": [50, 100],
            "n_net_commanders": 12,
            "intercept_out": [0, 2],
            "intercept_in": [0, 2]
        }
    }"#;
    let config_path = dir.path().join("scenario.json");
    std::fs::write(&config_path, gen_raw).unwrap();

    let (config, base_dir) = SimulationConfig::load(&config_path).unwrap();
    let mut rng = StdRng::seed_from_u64(11);
    generator::gen_all(config.generation.as_ref().unwrap(), &base_dir, &mut rng).unwrap();

    let model = SystemModel::from_config(&config, &base_dir).unwrap();
    assert_eq!(model.tasks.len(), 12);
    assert_eq!(model.networks.len(), 12);
    assert_eq!(model.net_commanders.len(), 12);
}
