use rand::prelude::*;
use rand_core::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Le trait Genome définit la structure manipulable par l'AG.
///
/// La construction aléatoire n'est pas dans le trait : elle dépend du contexte
/// du problème (bornes des catalogues), chaque génome expose donc son propre
/// `new_random(...)`. Toutes les opérations stochastiques reçoivent le RNG en
/// paramètre : la trajectoire de recherche est entièrement rejouable à partir
/// d'une graine.
pub trait Genome: Clone + Send + Sync + Debug + Serialize + for<'de> Deserialize<'de> {
    /// Applique une mutation sur le génome (modification in-place)
    fn mutate(&mut self, rate: f32, rng: &mut dyn RngCore);

    /// Croise deux génomes pour en produire un nouveau
    fn crossover(&self, other: &Self, rng: &mut dyn RngCore) -> Self;

    /// (Optionnel) Distance génétique entre deux génomes (pour la diversité)
    fn distance(&self, _other: &Self) -> f32 {
        0.0
    }
}

/// Le trait Evaluator fait le lien avec le métier.
///
/// Retourne `(objectif, violation)` : l'objectif est un coût à MINIMISER
/// (puissance agrégée), la violation vaut 0.0 pour une solution faisable et
/// croit avec l'ampleur du dépassement des contraintes.
pub trait Evaluator<G: Genome>: Send + Sync {
    /// Nom de l'objectif (pour l'affichage/debug)
    fn objective_name(&self) -> String;

    /// Calcule le coût et la violation de contraintes.
    fn evaluate(&self, genome: &G) -> (f64, f64);

    /// Vérification rapide de validité structurelle (bornes des index).
    /// Si false, on peut assigner une pénalité max sans calculer evaluate().
    fn is_valid(&self, _genome: &G) -> bool {
        true
    }
}
