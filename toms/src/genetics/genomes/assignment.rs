use crate::genetics::engine::CrossoverKind;
use crate::genetics::operators::{single_point_crossover, uniform_crossover};
use crate::genetics::traits::Genome;
use crate::model::system::SystemModel;
use crate::utils::prelude::*;
use rand::prelude::*;
use rand_core::RngCore;

/// Un gène : le quadruplet de ressources affecté à une tâche.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceAssignment {
    pub mem: usize,
    pub cloud: usize,
    pub cpufreq: usize,
    pub ratio: usize,
}

/// L'espace discret des affectations valides : tailles des catalogues,
/// drapeaux d'offloading par tâche (figés après la passe de dégradation
/// réseau) et politique de croisement retenue.
///
/// Une tâche sans offloading reste épinglée au ratio d'index 0 (le plus
/// petit du catalogue, l'ordre étant croissant) à l'initialisation comme à
/// la mutation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AssignmentSpace {
    pub n_mems: usize,
    pub n_clouds: usize,
    pub n_cpufreqs: usize,
    pub n_ratios: usize,
    pub offloading: Vec<bool>,
    pub crossover: CrossoverKind,
}

impl AssignmentSpace {
    pub fn from_model(model: &SystemModel, crossover: CrossoverKind) -> Self {
        Self {
            n_mems: model.mems.len(),
            n_clouds: model.clouds.len(),
            n_cpufreqs: model.cpufreqs.len(),
            n_ratios: model.offloading_ratios.len(),
            offloading: model.tasks.iter().map(|t| t.offloading).collect(),
            crossover,
        }
    }

    pub fn n_tasks(&self) -> usize {
        self.offloading.len()
    }

    fn sample_gene(&self, task_idx: usize, rng: &mut dyn RngCore) -> ResourceAssignment {
        ResourceAssignment {
            mem: rng.random_range(0..self.n_mems),
            cloud: rng.random_range(0..self.n_clouds),
            cpufreq: rng.random_range(0..self.n_cpufreqs),
            ratio: if self.offloading[task_idx] {
                rng.random_range(0..self.n_ratios)
            } else {
                0
            },
        }
    }
}

/// Génome candidat : une affectation de ressources par tâche.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AssignmentGenome {
    pub genes: Vec<ResourceAssignment>,
    pub space: AssignmentSpace,
}

impl AssignmentGenome {
    /// Génère un individu aléatoire uniforme dans l'espace des affectations.
    pub fn new_random(space: AssignmentSpace, rng: &mut dyn RngCore) -> Self {
        let genes = (0..space.n_tasks())
            .map(|idx| space.sample_gene(idx, rng))
            .collect();
        Self { genes, space }
    }
}

impl Genome for AssignmentGenome {
    fn mutate(&mut self, rate: f32, rng: &mut dyn RngCore) {
        // Avec probabilité `rate` par tâche, une seule composante du
        // quadruplet est re-tirée (les autres sont conservées).
        for (idx, gene) in self.genes.iter_mut().enumerate() {
            if rng.random::<f32>() < rate {
                match rng.random_range(0..4u8) {
                    0 => gene.mem = rng.random_range(0..self.space.n_mems),
                    1 => gene.cloud = rng.random_range(0..self.space.n_clouds),
                    2 => gene.cpufreq = rng.random_range(0..self.space.n_cpufreqs),
                    _ => {
                        gene.ratio = if self.space.offloading[idx] {
                            rng.random_range(0..self.space.n_ratios)
                        } else {
                            0
                        }
                    }
                }
            }
        }
    }

    fn crossover(&self, other: &Self, rng: &mut dyn RngCore) -> Self {
        let genes = match self.space.crossover {
            CrossoverKind::Uniform => uniform_crossover(&self.genes, &other.genes, rng),
            CrossoverKind::SinglePoint => single_point_crossover(&self.genes, &other.genes, rng),
        };
        Self {
            genes,
            space: self.space.clone(),
        }
    }

    /// Fraction de tâches affectées différemment entre deux génomes.
    fn distance(&self, other: &Self) -> f32 {
        if self.genes.is_empty() {
            return 0.0;
        }
        let diff = self
            .genes
            .iter()
            .zip(other.genes.iter())
            .filter(|(a, b)| a != b)
            .count();
        diff as f32 / self.genes.len() as f32
    }
}
