use std::sync::Once;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// Sécurité pour éviter la double initialisation (crash fréquent en tests)
static INIT: Once = Once::new();

pub fn init_logging() {
    INIT.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

        let console_layer = fmt::layer().compact().with_target(false);

        let registry = tracing_subscriber::registry()
            .with(env_filter)
            .with(console_layer);

        if registry.try_init().is_err() {
            tracing::warn!("[Logger] Tentative de ré-initialisation ignorée (Global subscriber déjà actif).");
        }
    });
}
