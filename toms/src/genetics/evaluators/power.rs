use crate::genetics::genomes::AssignmentGenome;
use crate::genetics::traits::Evaluator;
use crate::model::cost::{task_metrics, EvalMode, TaskMetrics};
use crate::model::system::SystemModel;
use std::sync::Arc;

/// L'évaluateur principal : agrège le modèle de coût sur toutes les tâches.
///
/// Objectif = puissance totale (CPU + mémoire + réseau), à minimiser.
/// Contraintes : pour chaque tâche, utilisation ≤ 1 et ratio d'échéance ≤ 1 ;
/// la violation retournée est la somme des dépassements.
pub struct PowerEvaluator {
    model: Arc<SystemModel>,
    mode: EvalMode,
}

impl PowerEvaluator {
    pub fn new(model: Arc<SystemModel>, mode: EvalMode) -> Self {
        Self { model, mode }
    }

    pub fn mode(&self) -> EvalMode {
        self.mode
    }

    pub fn model(&self) -> &SystemModel {
        &self.model
    }

    /// Métriques détaillées par tâche (pour le rapport final).
    pub fn task_metrics(&self, genome: &AssignmentGenome) -> Vec<TaskMetrics> {
        genome
            .genes
            .iter()
            .enumerate()
            .map(|(idx, gene)| {
                task_metrics(
                    &self.model,
                    idx,
                    gene.mem,
                    gene.cloud,
                    gene.cpufreq,
                    gene.ratio,
                    self.mode,
                )
            })
            .collect()
    }
}

impl Evaluator<AssignmentGenome> for PowerEvaluator {
    fn objective_name(&self) -> String {
        "Puissance agrégée (Min)".to_string()
    }

    fn evaluate(&self, genome: &AssignmentGenome) -> (f64, f64) {
        let mut total_power = 0.0;
        let mut violation = 0.0;

        for (idx, gene) in genome.genes.iter().enumerate() {
            let metrics = task_metrics(
                &self.model,
                idx,
                gene.mem,
                gene.cloud,
                gene.cpufreq,
                gene.ratio,
                self.mode,
            );

            total_power += metrics.total_power();

            // Dépassements : utilisation > 1 ou échéance > 1
            if metrics.utilization > 1.0 {
                violation += metrics.utilization - 1.0;
            }
            if metrics.deadline_ratio > 1.0 {
                violation += metrics.deadline_ratio - 1.0;
            }
        }

        (total_power, violation)
    }

    fn is_valid(&self, genome: &AssignmentGenome) -> bool {
        // Validation structurelle rapide : longueur + bornes des catalogues
        if genome.genes.len() != self.model.tasks.len() {
            return false;
        }
        genome.genes.iter().all(|g| {
            g.mem < self.model.mems.len()
                && g.cloud < self.model.clouds.len()
                && g.cpufreq < self.model.cpufreqs.len()
                && g.ratio < self.model.offloading_ratios.len()
        })
    }
}
