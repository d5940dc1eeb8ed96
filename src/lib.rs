//! # Echo Files Server
//! src/lib.rs
//!
//! Servidor HTTP/1.1 mínimo implementado desde cero. Atiende un request por
//! conexión, cada conexión en su propio thread.
//!
//! ## Rutas
//!
//! | Ruta               | Método | Respuesta                                  |
//! |--------------------|--------|--------------------------------------------|
//! | `/`                | any    | 200 vacío                                  |
//! | `/user-agent`      | any    | 200 con el header `User-Agent`             |
//! | `/echo/{valor}`    | any    | 200 con `{valor}`, gzip si se acepta       |
//! | `/files/{nombre}`  | GET    | 200 con el archivo, 404 si no existe       |
//! | `/files/{nombre}`  | POST   | 201 después de escribir el body            |
//! | cualquier otra     | any    | 404 vacío                                  |
//!
//! ## Arquitectura
//!
//! - `http`: lectura del socket, parsing, responses y gzip
//! - `router`: tabla de rutas exactas y por prefijo
//! - `handlers`: implementación de cada ruta
//! - `server`: loop de accept y manejo de conexiones
//! - `config`: argumentos CLI y variables de entorno
//! - `logging`: inicialización de `tracing`
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use echo_files_server::config::Config;
//! use echo_files_server::server::Server;
//!
//! let config = Config::default();
//! let server = Server::new(config);
//! server.run().expect("Error al iniciar servidor");
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod http;
pub mod logging;
pub mod router;
pub mod server;

pub use error::ServerError;
