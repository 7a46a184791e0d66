pub mod crossover;
pub mod selection;

pub use crossover::{single_point_crossover, uniform_crossover};
pub use selection::{RouletteSelection, SelectionStrategy, TournamentSelection};
