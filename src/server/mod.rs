//! # Módulo del Servidor HTTP
//! src/server/mod.rs
//!
//! Servidor TCP que:
//! 1. Escucha en un puerto (4221 por defecto)
//! 2. Acepta conexiones entrantes
//! 3. Lee y parsea un request por conexión
//! 4. Genera y envía la respuesta

pub mod tcp;

// Re-exportar para facilitar el uso
pub use tcp::{handle_connection, Server};
