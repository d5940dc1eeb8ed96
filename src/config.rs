//! # Configuración del Servidor
//! src/config.rs
//!
//! Configuración inmutable del servidor, desde argumentos CLI o variables de
//! entorno.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./echo_files_server --directory /tmp/archivos --port 4221
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! FILES_DIRECTORY=/tmp/archivos HTTP_PORT=4221 ./echo_files_server
//! ```

use clap::Parser;
use std::path::PathBuf;
use thiserror::Error;

/// Puerto por defecto del servidor
pub const DEFAULT_PORT: u16 = 4221;

/// Límite por defecto para un request completo (8 MiB)
pub const DEFAULT_MAX_REQUEST_BYTES: usize = 8 * 1024 * 1024;

/// Errores de validación de la configuración
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("max request bytes must be >= 1")]
    InvalidMaxRequestBytes,

    #[error("files directory {0:?} exists but is not a directory")]
    NotADirectory(PathBuf),
}

/// Configuración del servidor HTTP/1.1
#[derive(Debug, Clone, Parser)]
#[command(name = "echo_files_server")]
#[command(about = "Servidor HTTP/1.1 mínimo con rutas de echo, user-agent y archivos")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Directorio raíz para /files/{nombre}
    #[arg(long, env = "FILES_DIRECTORY")]
    pub directory: Option<PathBuf>,

    /// Puerto en el que escucha el servidor
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "HTTP_PORT")]
    pub port: u16,

    /// Host/IP en el que escucha
    #[arg(long, default_value = "0.0.0.0", env = "HTTP_HOST")]
    pub host: String,

    /// Máximo de bytes aceptados por request (head + body)
    #[arg(long = "max-request-bytes", default_value_t = DEFAULT_MAX_REQUEST_BYTES, env = "MAX_REQUEST_BYTES")]
    pub max_request_bytes: usize,

    /// Filtro de logs cuando RUST_LOG no está definido
    #[arg(long = "log-level", default_value = "info", env = "LOG_LEVEL")]
    pub log_level: String,
}

impl Config {
    /// Crea una nueva configuración parseando argumentos CLI
    pub fn new() -> Self {
        Config::parse()
    }

    /// Obtiene la dirección completa para bind (host:port)
    ///
    /// # Ejemplo
    /// ```rust
    /// use echo_files_server::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.address(), "0.0.0.0:4221");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Directorio raíz para los archivos
    ///
    /// Sin `--directory` es la ruta vacía, que resuelve relativo al
    /// directorio de trabajo.
    pub fn files_root(&self) -> PathBuf {
        self.directory.clone().unwrap_or_default()
    }

    /// Valida la configuración
    ///
    /// Un directorio que todavía no existe se acepta.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_request_bytes == 0 {
            return Err(ConfigError::InvalidMaxRequestBytes);
        }

        if let Some(dir) = &self.directory {
            if dir.exists() && !dir.is_dir() {
                return Err(ConfigError::NotADirectory(dir.clone()));
            }
        }

        Ok(())
    }
}

impl Default for Config {
    /// Configuración por defecto (igual a los defaults del CLI)
    fn default() -> Self {
        Self {
            directory: None,
            port: DEFAULT_PORT,
            host: "0.0.0.0".to_string(),
            max_request_bytes: DEFAULT_MAX_REQUEST_BYTES,
            log_level: "info".to_string(),
        }
    }
}
