//! # Errores del servidor
//! src/error.rs
//!
//! Cada error de este módulo es terminal solo para la conexión afectada;
//! el loop de accept sigue funcionando.

use crate::config::ConfigError;
use crate::http::reader::ReadError;
use crate::http::ParseError;
use thiserror::Error;

/// Error a nivel de conexión (o de arranque, para `Config` y `Io` en bind)
#[derive(Debug, Error)]
pub enum ServerError {
    /// Falló accept, bind, lectura, escritura o el sistema de archivos
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No se pudo leer el request de la conexión
    #[error(transparent)]
    Read(#[from] ReadError),

    /// El request no se pudo parsear
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Configuración inválida
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_message() {
        let err: ServerError =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into();
        assert_eq!(err.to_string(), "I/O error: denied");
    }

    #[test]
    fn test_parse_error_is_transparent() {
        let err: ServerError = ParseError::EmptyRequest.into();
        assert_eq!(err.to_string(), "Empty request");
    }

    #[test]
    fn test_config_error_message() {
        let err: ServerError = ConfigError::InvalidMaxRequestBytes.into();
        assert!(err.to_string().starts_with("invalid configuration"));
    }
}
