use crate::utils::{prelude::*, Ordering};

/// Structure représentant la performance d'un individu.
///
/// Convention : l'objectif (`power`) est un coût à MINIMISER. La gestion des
/// contraintes est additive : une pénalité proportionnelle à la violation
/// ramène le problème contraint à une minimisation libre pour la sélection.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Fitness {
    /// Puissance agrégée de l'affectation (somme CPU + mémoire + réseau).
    pub power: f64,

    /// Score de violation de contrainte (0.0 = valide, >0.0 = invalide).
    /// Permet de guider l'évolution vers des solutions faisables.
    pub violation: f64,

    /// Poids de la pénalité appliquée à la violation.
    pub penalty_weight: f64,
}

impl Fitness {
    pub fn new(power: f64, violation: f64, penalty_weight: f64) -> Self {
        Self {
            power,
            violation,
            penalty_weight,
        }
    }

    /// Coût pénalisé servant de fitness scalaire (plus petit = meilleur).
    pub fn penalized(&self) -> f64 {
        self.power + self.penalty_weight * self.violation
    }

    pub fn is_feasible(&self) -> bool {
        self.violation == 0.0
    }

    /// Ordre total déterministe : coût pénalisé, puis violation, puis
    /// puissance brute. Les NaN éventuels sont relégués en dernier plutôt que
    /// de faire paniquer le tri (le modèle de coût ne pose pas de garde
    /// numérique, les valeurs dégénérées doivent rester triables).
    pub fn compare(&self, other: &Fitness) -> Ordering {
        cmp_f64(self.penalized(), other.penalized())
            .then_with(|| cmp_f64(self.violation, other.violation))
            .then_with(|| cmp_f64(self.power, other.power))
    }
}

fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or_else(|| {
        if a.is_nan() && b.is_nan() {
            Ordering::Equal
        } else if a.is_nan() {
            Ordering::Greater
        } else {
            Ordering::Less
        }
    })
}

/// Un individu dans la population : un génome + sa performance.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Individual<G> {
    pub genome: G,
    pub fitness: Option<Fitness>,
}

impl<G> Individual<G> {
    pub fn new(genome: G) -> Self {
        Self {
            genome,
            fitness: None,
        }
    }
}

/// La population complète pour une génération donnée.
#[derive(Clone, Debug)]
pub struct Population<G> {
    pub individuals: Vec<Individual<G>>,
    pub generation: usize,
}

impl<G> Default for Population<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G> Population<G> {
    pub fn new() -> Self {
        Self {
            individuals: vec![],
            generation: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    pub fn add(&mut self, individual: Individual<G>) {
        self.individuals.push(individual);
    }

    /// Trie la population du meilleur au pire (ordre déterministe).
    /// Les individus non évalués sont relégués en fin de liste.
    pub fn sort_best_first(&mut self) {
        self.individuals
            .sort_by(|a, b| match (&a.fitness, &b.fitness) {
                (Some(fa), Some(fb)) => fa.compare(fb),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            });
    }

    /// Meilleur individu évalué (suppose `sort_best_first` déjà appliqué).
    pub fn best(&self) -> Option<&Individual<G>> {
        self.individuals.iter().find(|ind| ind.fitness.is_some())
    }

    /// Retourne les n meilleurs individus (élitisme simple).
    /// Suppose la population triée.
    pub fn get_elites(&self, count: usize) -> Vec<Individual<G>>
    where
        G: Clone,
    {
        self.individuals.iter().take(count).cloned().collect()
    }
}
