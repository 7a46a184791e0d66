use crate::genetics::evaluators::PowerEvaluator;
use crate::genetics::genomes::AssignmentGenome;
use crate::genetics::types::Individual;
use crate::model::cost::EvalMode;
use crate::utils::prelude::*;

// --- Sorties & Feedback ---

/// Télémétrie émise à chaque génération.
#[derive(Debug, Serialize, Clone)]
pub struct OptimizationProgress {
    pub generation: usize,
    pub best_power: f64,
    pub best_violation: f64,
}

/// Quadruplet de ressources résolu pour le rapport (le ratio est donné en
/// index de catalogue ET en valeur).
#[derive(Debug, Serialize, Clone)]
pub struct AssignmentReport {
    pub mem: usize,
    pub cloud: usize,
    pub cpufreq: usize,
    pub ratio_index: usize,
    pub ratio: f64,
}

/// Métriques prédites pour une tâche sous l'affectation retenue.
#[derive(Debug, Serialize, Clone)]
pub struct TaskReport {
    pub no: u32,
    pub utilization: f64,
    pub power_cpu: f64,
    pub power_mem: f64,
    pub power_net_com: f64,
    pub deadline_ratio: f64,
    pub assignment: AssignmentReport,
}

/// Résultat final : meilleur individu trouvé et ses métriques complètes.
#[derive(Debug, Serialize, Clone)]
pub struct OptimizationResult {
    pub duration_ms: u128,
    pub generations: usize,
    pub mode: EvalMode,
    pub total_power: f64,
    pub constraint_violation: f64,
    pub feasible: bool,
    pub tasks: Vec<TaskReport>,
}

impl OptimizationResult {
    /// Assemble le rapport depuis le meilleur individu évalué.
    pub fn from_best(
        evaluator: &PowerEvaluator,
        best: &Individual<AssignmentGenome>,
        generations: usize,
        duration_ms: u128,
    ) -> Result<Self> {
        let fitness = best
            .fitness
            .as_ref()
            .ok_or_else(|| AppError::from("meilleur individu non évalué"))?;

        let metrics = evaluator.task_metrics(&best.genome);
        let model = evaluator.model();

        let tasks = metrics
            .iter()
            .zip(best.genome.genes.iter())
            .enumerate()
            .map(|(idx, (m, gene))| {
                let task = model.tasks.get(idx).expect("index de tâche invalide");
                let ratio_index = if task.offloading { gene.ratio } else { 0 };
                TaskReport {
                    no: task.no,
                    utilization: m.utilization,
                    power_cpu: m.power_cpu,
                    power_mem: m.power_mem,
                    power_net_com: m.power_net_com,
                    deadline_ratio: m.deadline_ratio,
                    assignment: AssignmentReport {
                        mem: gene.mem,
                        cloud: gene.cloud,
                        cpufreq: gene.cpufreq,
                        ratio_index,
                        ratio: model
                            .offloading_ratios
                            .get(ratio_index)
                            .expect("index de ratio invalide"),
                    },
                }
            })
            .collect();

        Ok(Self {
            duration_ms,
            generations,
            mode: evaluator.mode(),
            total_power: fitness.power,
            constraint_violation: fitness.violation,
            feasible: fitness.is_feasible(),
            tasks,
        })
    }
}
