pub mod config;
pub mod generator;
pub mod genetics;
pub mod model;
pub mod utils;

pub use config::SimulationConfig;
pub use model::SystemModel;
