use std::io;

// --- RE-EXPORTS ANYHOW (Pour la flexibilité du CLI) ---
pub use anyhow::{anyhow, Context};
// On renomme le Result de anyhow pour ne pas qu'il écrase le nôtre
pub use anyhow::Result as AnyResult;

/// Type de résultat standard pour l'application TOMS
pub type Result<T> = std::result::Result<T, AppError>;

/// Enumération centrale des erreurs de l'application.
///
/// La taxonomie suit les codes de sortie du processus :
/// usage → 1, configuration/ressource/E-S → 2.
/// Le code 3 reste réservé au contrôle d'échéance (désactivé pour l'instant,
/// voir model/cost.rs).
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Erreur d'usage : {0}")]
    Usage(String),

    #[error("Erreur de configuration : {0}")]
    Config(String),

    #[error("Erreur de catalogue ressource : {0}")]
    Resource(String),

    #[error("Erreur d'entrée/sortie : {0}")]
    Io(#[from] io::Error),

    #[error("Erreur de sérialisation : {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Erreur Système : {0}")]
    System(#[from] anyhow::Error),
}

impl AppError {
    /// Code de sortie du processus associé à l'erreur.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Usage(_) => 1,
            AppError::Config(_)
            | AppError::Resource(_)
            | AppError::Io(_)
            | AppError::Serialization(_)
            | AppError::System(_) => 2,
        }
    }
}

// Helpers pour convertir des erreurs string en AppError
// Permet de faire : return Err("Mon erreur".into());
impl From<String> for AppError {
    fn from(s: String) -> Self {
        AppError::System(anyhow::anyhow!(s))
    }
}

impl From<&str> for AppError {
    fn from(s: &str) -> Self {
        AppError::System(anyhow::anyhow!(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display_formatting() {
        let err = AppError::Config("Fichier manquant".to_string());
        assert_eq!(
            err.to_string(),
            "Erreur de configuration : Fichier manquant"
        );

        let err_res = AppError::Resource("trop de fréquences cpu".to_string());
        assert_eq!(
            err_res.to_string(),
            "Erreur de catalogue ressource : trop de fréquences cpu"
        );
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(AppError::Usage("option invalide".into()).exit_code(), 1);
        assert_eq!(AppError::Config("x".into()).exit_code(), 2);
        assert_eq!(AppError::Resource("x".into()).exit_code(), 2);
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "fichier introuvable");
        let app_err: AppError = io_err.into();

        match app_err {
            AppError::Io(msg) => assert!(msg.to_string().contains("fichier introuvable")),
            _ => panic!("Devrait être converti en AppError::Io"),
        }
    }

    #[test]
    fn test_from_string_helpers() {
        let err_string: AppError = String::from("Erreur string").into();
        match err_string {
            AppError::System(e) => assert_eq!(e.to_string(), "Erreur string"),
            _ => panic!("String devrait devenir AppError::System"),
        }
    }
}
