//! # Handlers de las rutas
//!
//! Cada handler recibe el request y el contexto de la ruta y retorna la
//! respuesta, o un error de I/O que termina la conexión.
//!
//! ## Rutas
//!
//! - **basic**: `/`, `/user-agent` y `/echo/{valor}` (con gzip opcional)
//! - **files**: `GET` y `POST` sobre `/files/{nombre}`

pub mod basic;
pub mod files;

pub use basic::*;
pub use files::*;
