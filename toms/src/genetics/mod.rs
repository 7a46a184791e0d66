pub mod dto;
pub mod engine;
pub mod evaluators;
pub mod genomes;
pub mod operators;
pub mod traits;
pub mod types;

pub use dto::{OptimizationProgress, OptimizationResult, TaskReport};
pub use engine::{CrossoverKind, GeneticConfig, GeneticEngine, SelectionKind};
pub use evaluators::PowerEvaluator;
pub use genomes::{AssignmentGenome, AssignmentSpace};
pub use traits::{Evaluator, Genome};
pub use types::{Fitness, Individual, Population};
