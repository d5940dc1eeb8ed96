//! # Módulo HTTP
//!
//! Implementa desde cero la parte de HTTP/1.1 que necesita el servidor:
//!
//! - Lectura de requests con framing por `Content-Length`
//! - Parsing de request line, headers y body
//! - Construcción de responses
//! - Códigos de estado
//! - Negociación de `Accept-Encoding` y compresión gzip
//!
//! Fuera de alcance: conexiones persistentes, chunked transfer encoding,
//! pipelining y folding de headers.
//!
//! ### Formato de Request
//!
//! ```text
//! GET /echo/abc HTTP/1.1\r\n
//! Accept-Encoding: gzip\r\n
//! \r\n
//! ```
//!
//! ### Formato de Response
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Type: text/plain\r\n
//! Content-Length: 3\r\n
//! \r\n
//! abc
//! ```

pub mod encoding; // Accept-Encoding y gzip
pub mod reader;   // Lectura del socket
pub mod request;  // Parsing de HTTP requests
pub mod response; // Construcción de HTTP responses
pub mod status;   // Códigos de estado HTTP

// Re-exportamos los tipos principales para usar `http::Request` en vez de
// `http::request::Request`
pub use request::{Method, ParseError, Request};
pub use response::Response;
pub use status::StatusCode;
