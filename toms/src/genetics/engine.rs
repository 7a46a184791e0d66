use super::operators::selection::{RouletteSelection, SelectionStrategy, TournamentSelection};
use super::traits::{Evaluator, Genome};
use super::types::{Fitness, Individual, Population};
use crate::utils::prelude::*;
use rand::prelude::*;
use rand_core::RngCore;
use rayon::prelude::*;

/// Politique de sélection des parents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SelectionKind {
    #[default]
    Tournament,
    Roulette,
}

/// Politique de croisement des génomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CrossoverKind {
    #[default]
    Uniform,
    SinglePoint,
}

fn default_elitism() -> usize {
    1
}
fn default_tournament_size() -> usize {
    3
}
fn default_penalty_weight() -> f64 {
    1000.0
}

/// Paramètres de l'algorithme génétique.
///
/// Taille de population, nombre de générations et probabilités des opérateurs
/// sont des entrées de configuration obligatoires ; le reste est défauté.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneticConfig {
    pub population_size: usize,
    pub max_generations: usize,
    pub mutation_rate: f32,
    pub crossover_rate: f32,

    #[serde(default = "default_elitism")]
    pub elitism_count: usize,
    #[serde(default = "default_tournament_size")]
    pub tournament_size: usize,
    #[serde(default)]
    pub selection: SelectionKind,
    #[serde(default)]
    pub crossover: CrossoverKind,
    /// Arrêt anticipé après N générations sans amélioration (optionnel).
    #[serde(default)]
    pub stall_generations: Option<usize>,
    /// Poids de la pénalité additive appliquée aux violations de contraintes.
    #[serde(default = "default_penalty_weight")]
    pub penalty_weight: f64,
}

impl GeneticConfig {
    pub fn selection_strategy<G: Genome>(&self) -> Box<dyn SelectionStrategy<G>> {
        match self.selection {
            SelectionKind::Tournament => Box::new(TournamentSelection::new(self.tournament_size)),
            SelectionKind::Roulette => Box::new(RouletteSelection),
        }
    }
}

pub struct GeneticEngine<G, E>
where
    G: Genome,
    E: Evaluator<G>,
{
    evaluator: E,
    selection: Box<dyn SelectionStrategy<G>>,
    config: GeneticConfig,
}

impl<G, E> GeneticEngine<G, E>
where
    G: Genome,
    E: Evaluator<G>,
{
    pub fn new(evaluator: E, selection: Box<dyn SelectionStrategy<G>>, config: GeneticConfig) -> Self {
        Self {
            evaluator,
            selection,
            config,
        }
    }

    pub fn config(&self) -> &GeneticConfig {
        &self.config
    }

    /// Évaluation parallèle des individus non encore notés.
    ///
    /// L'évaluateur est une fonction pure de l'état partagé en lecture seule :
    /// le résultat ne dépend pas de l'ordre d'exécution des threads.
    fn evaluate_population(&self, pop: &mut Population<G>) {
        let penalty_weight = self.config.penalty_weight;
        pop.individuals.par_iter_mut().for_each(|ind| {
            if ind.fitness.is_none() {
                // On vérifie la validité structurelle avant de calculer le coût
                if self.evaluator.is_valid(&ind.genome) {
                    let (power, violation) = self.evaluator.evaluate(&ind.genome);
                    ind.fitness = Some(Fitness::new(power, violation, penalty_weight));
                } else {
                    // Pénalité maximale : le tri relègue ces individus en queue
                    ind.fitness = Some(Fitness::new(f64::INFINITY, f64::INFINITY, penalty_weight));
                }
            }
        });
    }

    /// Boucle d'évolution complète.
    ///
    /// Le RNG passé ici pilote seul la reproduction : graine identique +
    /// configuration identique => trajectoire et résultat identiques.
    pub fn run<F>(
        &self,
        mut pop: Population<G>,
        rng: &mut dyn RngCore,
        mut on_generation: F,
    ) -> Population<G>
    where
        F: FnMut(&Population<G>),
    {
        self.evaluate_population(&mut pop);
        pop.sort_best_first();
        on_generation(&pop);

        let mut best_cost = pop
            .best()
            .and_then(|ind| ind.fitness.as_ref())
            .map(|fit| fit.penalized());
        let mut stall = 0usize;

        for generation in 1..=self.config.max_generations {
            // 1. Élitisme : les meilleurs survivent tels quels (fitness conservée)
            let elite_count = self.config.elitism_count.min(pop.len());
            let mut next = pop.get_elites(elite_count);

            // 2. Reproduction (Sélection, Croisement, Mutation)
            while next.len() < self.config.population_size {
                let parent1 = self.selection.select(rng, &pop);
                let parent2 = self.selection.select(rng, &pop);

                let mut child = if rng.random::<f32>() < self.config.crossover_rate {
                    parent1.genome.crossover(&parent2.genome, rng)
                } else {
                    parent1.genome.clone()
                };
                child.mutate(self.config.mutation_rate, rng);

                next.push(Individual::new(child));
            }

            pop = Population {
                individuals: next,
                generation,
            };

            // 3. Évaluation + classement
            self.evaluate_population(&mut pop);
            pop.sort_best_first();
            on_generation(&pop);

            // 4. Détection de plateau
            let current = pop
                .best()
                .and_then(|ind| ind.fitness.as_ref())
                .map(|fit| fit.penalized());
            let improved = match (best_cost, current) {
                (Some(prev), Some(cur)) => cur < prev,
                (None, Some(_)) => true,
                _ => false,
            };
            if improved {
                best_cost = current;
                stall = 0;
            } else {
                stall += 1;
                if let Some(limit) = self.config.stall_generations {
                    if stall >= limit {
                        debug!(
                            generation,
                            stall, "arrêt anticipé : plateau de fitness atteint"
                        );
                        break;
                    }
                }
            }
        }

        pop
    }
}
