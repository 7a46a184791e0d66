pub mod cost;
pub mod resources;
pub mod system;
pub mod task;

pub use cost::{task_metrics, EvalMode, TaskMetrics};
pub use resources::{
    CloudCatalog, CloudTier, CpuFreq, CpuFreqCatalog, MemCatalog, MemTier, NetCommander,
    NetCommanderTable, Network, NetworkTable, OffloadingRatioCatalog,
};
pub use system::SystemModel;
pub use task::{Task, TaskSet};
