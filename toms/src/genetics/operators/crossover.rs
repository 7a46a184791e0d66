use rand::prelude::*;
use rand_core::RngCore;

/// Croisement à point unique : début du parent 1, fin du parent 2.
pub fn single_point_crossover<T: Clone>(
    parent1: &[T],
    parent2: &[T],
    rng: &mut dyn RngCore,
) -> Vec<T> {
    assert_eq!(parent1.len(), parent2.len(), "Parent size mismatch");
    let len = parent1.len();
    if len < 2 {
        return parent1.to_vec();
    }

    let split_idx = rng.random_range(1..len);

    let mut child = Vec::with_capacity(len);
    child.extend_from_slice(&parent1[..split_idx]);
    child.extend_from_slice(&parent2[split_idx..]);

    child
}

/// Croisement uniforme : chaque gène vient de l'un ou l'autre parent (p=0.5).
pub fn uniform_crossover<T: Clone>(parent1: &[T], parent2: &[T], rng: &mut dyn RngCore) -> Vec<T> {
    assert_eq!(parent1.len(), parent2.len(), "Parent size mismatch");

    parent1
        .iter()
        .zip(parent2.iter())
        .map(|(g1, g2)| {
            if rng.random_bool(0.5) {
                g1.clone()
            } else {
                g2.clone()
            }
        })
        .collect()
}
