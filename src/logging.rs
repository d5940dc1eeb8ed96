//! # Logging
//! src/logging.rs
//!
//! Logging estructurado con `tracing`. El filtro sale de `RUST_LOG` y, si
//! no está definido, del nivel configurado (`--log-level`).

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Instala el subscriber global
///
/// Llamarla dos veces no falla: la segunda no hace nada.
pub fn init(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .try_init();
}
