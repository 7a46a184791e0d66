pub mod power;

pub use power::PowerEvaluator;
