// =========================================================================
//  TOMS UTILS - Foundation Layer
// =========================================================================

pub mod error;
pub mod logger;
pub mod macros;

/// **Core Foundation** : Types de base et Erreurs.
pub mod core {
    pub use super::error::{AppError, Result};
}

/// **Application Context** : Accès global Log.
pub mod context {
    pub use super::logger::init_logging;
}

/// **Le Prélude** : À utiliser via `use crate::utils::prelude::*;`
pub mod prelude {
    pub use super::core::{AppError, Result};
    pub use serde::{Deserialize, Serialize};
    pub use tracing::{debug, error, info, warn};
}

// --> Exports directs (requis par le code existant)
pub use error::{AppError, Result};
pub use logger::init_logging;

pub use std::cmp::Ordering;
pub use std::fmt;
