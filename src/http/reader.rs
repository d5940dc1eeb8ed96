//! # Lectura de Requests desde la conexión
//! src/http/reader.rs
//!
//! Drena bytes de una conexión aceptada hasta tener un request completo.
//!
//! El framing se decide por longitud: primero se lee hasta ver
//! `\r\n\r\n`, luego se leen exactamente los `Content-Length` bytes del
//! body. No se usa la heurística de "leer hasta que no haya más bytes
//! disponibles", que trunca requests lentos.

use super::request::{content_length, find_head_end, header_lines, ParseError, HEAD_TERMINATOR};
use std::io::{ErrorKind, Read};
use thiserror::Error;

/// Tamaño de cada lectura del socket
pub const CHUNK_SIZE: usize = 1024;

/// Errores al leer un request de la conexión
#[derive(Debug, Error)]
pub enum ReadError {
    /// Falló la lectura del socket
    #[error("I/O error while reading request: {0}")]
    Io(#[from] std::io::Error),

    /// El request supera el límite configurado
    #[error("Request exceeds the {limit} byte limit")]
    TooLarge { limit: usize },

    /// El head declara un `Content-Length` inválido o contradictorio
    #[error("Invalid Content-Length: {0}")]
    InvalidContentLength(String),
}

impl From<ParseError> for ReadError {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::InvalidContentLength(value) => ReadError::InvalidContentLength(value),
            other => ReadError::InvalidContentLength(other.to_string()),
        }
    }
}

/// Lee un request completo (head + body) de `reader`
///
/// Retorna un vector vacío si la conexión se cerró sin enviar nada. Si la
/// conexión se cierra antes de completar el body, retorna lo que llegó.
///
/// # Ejemplo
/// ```
/// use echo_files_server::http::reader::read_request;
/// use std::io::Cursor;
///
/// let mut conn = Cursor::new(b"POST /files/a HTTP/1.1\r\nContent-Length: 2\r\n\r\nhi".to_vec());
/// let raw = read_request(&mut conn, 1024).unwrap();
/// assert!(raw.ends_with(b"\r\n\r\nhi"));
/// ```
pub fn read_request<R: Read>(reader: &mut R, limit: usize) -> Result<Vec<u8>, ReadError> {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; CHUNK_SIZE];
    let mut expected_total: Option<usize> = None;

    loop {
        if let Some(total) = expected_total {
            if buffer.len() >= total {
                break;
            }
        }

        let bytes_read = match reader.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };

        // El terminador puede haber quedado partido entre dos lecturas
        let scan_from = buffer.len().saturating_sub(HEAD_TERMINATOR.len() - 1);
        buffer.extend_from_slice(&chunk[..bytes_read]);

        if buffer.len() > limit {
            return Err(ReadError::TooLarge { limit });
        }

        if expected_total.is_none() {
            if let Some(offset) = find_head_end(&buffer[scan_from..]) {
                let head_end = scan_from + offset;
                let body_length = head_content_length(&buffer[..head_end])?;
                let total = head_end
                    .checked_add(HEAD_TERMINATOR.len())
                    .and_then(|n| n.checked_add(body_length))
                    .filter(|total| *total <= limit)
                    .ok_or(ReadError::TooLarge { limit })?;

                expected_total = Some(total);
            }
        }
    }

    Ok(buffer)
}

/// Longitud del body declarada en el head (0 si no hay `Content-Length`)
fn head_content_length(head: &[u8]) -> Result<usize, ParseError> {
    let head = String::from_utf8_lossy(head);
    Ok(content_length(header_lines(&head))?.unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// Reader que entrega los datos en pedazos pequeños, como un socket lento
    struct Trickle {
        data: Vec<u8>,
        pos: usize,
        step: usize,
    }

    impl Read for Trickle {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            let end = (self.pos + self.step).min(self.data.len());
            let n = (end - self.pos).min(buf.len());
            buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
            self.pos += n;
            Ok(n)
        }
    }

    /// Reader que nunca termina: si el framing lee de más, el test se cuelga
    struct NeverEnding {
        data: Cursor<Vec<u8>>,
    }

    impl Read for NeverEnding {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            let n = self.data.read(buf)?;
            if n == 0 {
                return Err(std::io::Error::new(ErrorKind::WouldBlock, "read past end of request"));
            }
            Ok(n)
        }
    }

    #[test]
    fn test_empty_connection() {
        let mut conn = Cursor::new(Vec::new());
        assert!(read_request(&mut conn, 1024).unwrap().is_empty());
    }

    #[test]
    fn test_stops_after_head_without_body() {
        let raw = b"GET / HTTP/1.1\r\nHost: x\r\n\r\n".to_vec();
        let mut conn = NeverEnding { data: Cursor::new(raw.clone()) };

        assert_eq!(read_request(&mut conn, 1024).unwrap(), raw);
    }

    #[test]
    fn test_stops_after_declared_body() {
        let raw = b"POST /files/a HTTP/1.1\r\nContent-Length: 5\r\n\r\nhello".to_vec();
        let mut conn = NeverEnding { data: Cursor::new(raw.clone()) };

        assert_eq!(read_request(&mut conn, 1024).unwrap(), raw);
    }

    #[test]
    fn test_slow_client_is_not_truncated() {
        let body = "x".repeat(3000);
        let raw = format!(
            "POST /files/a HTTP/1.1\r\nContent-Length: {}\r\n\r\n{}",
            body.len(),
            body
        )
        .into_bytes();
        let mut conn = Trickle { data: raw.clone(), pos: 0, step: 7 };

        assert_eq!(read_request(&mut conn, 1 << 20).unwrap(), raw);
    }

    #[test]
    fn test_truncated_body_returns_partial() {
        let raw = b"POST /files/a HTTP/1.1\r\nContent-Length: 50\r\n\r\nabc".to_vec();
        let mut conn = Cursor::new(raw.clone());

        assert_eq!(read_request(&mut conn, 1024).unwrap(), raw);
    }

    #[test]
    fn test_declared_body_over_limit() {
        let raw = b"POST /files/a HTTP/1.1\r\nContent-Length: 4096\r\n\r\n".to_vec();
        let mut conn = Cursor::new(raw);

        let err = read_request(&mut conn, 1024).unwrap_err();
        assert!(matches!(err, ReadError::TooLarge { limit: 1024 }));
    }

    #[test]
    fn test_head_over_limit() {
        let raw = format!("GET / HTTP/1.1\r\nX-Big: {}\r\n\r\n", "a".repeat(2048)).into_bytes();
        let mut conn = Cursor::new(raw);

        assert!(matches!(
            read_request(&mut conn, 1024),
            Err(ReadError::TooLarge { .. })
        ));
    }

    #[test]
    fn test_invalid_content_length() {
        let raw = b"POST /files/a HTTP/1.1\r\nContent-Length: -1\r\n\r\n".to_vec();
        let mut conn = Cursor::new(raw);

        assert!(matches!(
            read_request(&mut conn, 1024),
            Err(ReadError::InvalidContentLength(_))
        ));
    }

    #[test]
    fn test_huge_content_length_does_not_overflow() {
        let raw = format!(
            "POST /files/a HTTP/1.1\r\nContent-Length: {}\r\n\r\nabc",
            usize::MAX
        )
        .into_bytes();
        let mut conn = Cursor::new(raw);

        assert!(matches!(
            read_request(&mut conn, 1024),
            Err(ReadError::TooLarge { limit: 1024 })
        ));
    }

    #[test]
    fn test_conflicting_content_lengths() {
        let raw = b"POST /files/a HTTP/1.1\r\nContent-Length: 5\r\ncontent-length: 3\r\n\r\nhello".to_vec();
        let mut conn = Cursor::new(raw);

        assert!(matches!(
            read_request(&mut conn, 1024),
            Err(ReadError::InvalidContentLength(_))
        ));
    }
}
