use crate::genetics::traits::Genome;
use crate::genetics::types::{Individual, Population};
use crate::utils::Ordering;
use rand::prelude::*;
use rand_core::RngCore;

pub trait SelectionStrategy<G: Genome>: Send + Sync {
    fn select<'a>(&self, rng: &mut dyn RngCore, population: &'a Population<G>)
        -> &'a Individual<G>;
}

/// Sélection par tournoi : k tirages uniformes, le meilleur gagne.
/// L'ordre de comparaison est celui de `Fitness::compare` (coût pénalisé,
/// puis violation, puis puissance brute) — déterministe à RNG fixé.
pub struct TournamentSelection {
    pub tournament_size: usize,
}

impl TournamentSelection {
    pub fn new(size: usize) -> Self {
        Self {
            tournament_size: size.max(1),
        }
    }
}

impl<G: Genome> SelectionStrategy<G> for TournamentSelection {
    fn select<'a>(
        &self,
        rng: &mut dyn RngCore,
        population: &'a Population<G>,
    ) -> &'a Individual<G> {
        let pop_len = population.individuals.len();
        if pop_len == 0 {
            panic!("Cannot select from empty population");
        }

        let mut best_candidate = &population.individuals[rng.random_range(0..pop_len)];

        for _ in 1..self.tournament_size {
            let challenger = &population.individuals[rng.random_range(0..pop_len)];

            match (&best_candidate.fitness, &challenger.fitness) {
                (Some(fit_best), Some(fit_chal)) => {
                    if fit_chal.compare(fit_best) == Ordering::Less {
                        best_candidate = challenger;
                    }
                }
                (None, Some(_)) => best_candidate = challenger,
                _ => {}
            }
        }
        best_candidate
    }
}

/// Sélection proportionnelle à la fitness (roulette).
///
/// Le coût pénalisé est converti en poids `1 / (1 + coût)` ; les coûts non
/// finis (propagation NaN/Inf du modèle) reçoivent un poids nul.
pub struct RouletteSelection;

impl<G: Genome> SelectionStrategy<G> for RouletteSelection {
    fn select<'a>(
        &self,
        rng: &mut dyn RngCore,
        population: &'a Population<G>,
    ) -> &'a Individual<G> {
        let pop_len = population.individuals.len();
        if pop_len == 0 {
            panic!("Cannot select from empty population");
        }

        let weights: Vec<f64> = population
            .individuals
            .iter()
            .map(|ind| match &ind.fitness {
                Some(fit) => {
                    let cost = fit.penalized();
                    if cost.is_finite() {
                        1.0 / (1.0 + cost.max(0.0))
                    } else {
                        0.0
                    }
                }
                None => 0.0,
            })
            .collect();

        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            // Aucun individu pondérable : tirage uniforme
            return &population.individuals[rng.random_range(0..pop_len)];
        }

        let mut threshold = rng.random::<f64>() * total;
        for (idx, w) in weights.iter().enumerate() {
            threshold -= w;
            if threshold <= 0.0 {
                return &population.individuals[idx];
            }
        }
        // Garde d'arrondi flottant
        &population.individuals[pop_len - 1]
    }
}
