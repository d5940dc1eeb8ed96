//! # Negociación de contenido y compresión
//! src/http/encoding.rs
//!
//! El cliente anuncia las codificaciones que acepta con `Accept-Encoding`.
//! El servidor solo sabe comprimir con gzip y nunca aplica más de una.

use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::Write;

/// Codificaciones que el servidor sabe aplicar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentEncoding {
    Gzip,
}

impl ContentEncoding {
    /// Valor para el header `Content-Encoding`
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentEncoding::Gzip => "gzip",
        }
    }

    fn from_token(token: &str) -> Option<Self> {
        match token {
            "gzip" => Some(ContentEncoding::Gzip),
            _ => None,
        }
    }
}

/// Elige la codificación a partir del valor de `Accept-Encoding`
///
/// La lista se separa por `,`, cada token se recorta y se descartan los
/// parámetros `;q=...`. Tokens desconocidos se ignoran.
///
/// # Ejemplo
/// ```
/// use echo_files_server::http::encoding::{negotiate, ContentEncoding};
///
/// assert_eq!(negotiate(Some("br, gzip")), Some(ContentEncoding::Gzip));
/// assert_eq!(negotiate(Some("invalid-encoding")), None);
/// assert_eq!(negotiate(None), None);
/// ```
pub fn negotiate(accept_encoding: Option<&str>) -> Option<ContentEncoding> {
    accept_encoding?
        .split(',')
        .map(|token| token.split(';').next().unwrap_or_default().trim())
        .find_map(ContentEncoding::from_token)
}

/// Comprime `data` con el formato contenedor gzip
pub fn gzip(data: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

/// Aplica `encoding` al body
pub fn encode(encoding: ContentEncoding, data: &[u8]) -> std::io::Result<Vec<u8>> {
    match encoding {
        ContentEncoding::Gzip => gzip(data),
    }
}
