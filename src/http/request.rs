//! # Parsing de Requests HTTP/1.1
//! src/http/request.rs
//!
//! Parser HTTP/1.1 mínimo escrito desde cero.
//!
//! ## Formato de un Request
//!
//! ```text
//! POST /files/notas.txt HTTP/1.1\r\n
//! Host: localhost:4221\r\n
//! Content-Type: application/octet-stream\r\n
//! Content-Length: 5\r\n
//! \r\n
//! hello
//! ```
//!
//! ## Componentes
//!
//! 1. **Request Line**: `METHOD TARGET VERSION`, separados por un espacio
//! 2. **Headers**: Pares `Name: Value` (uno por línea)
//! 3. **Empty Line**: `\r\n` que separa headers del body
//! 4. **Body**: exactamente `Content-Length` bytes (pueden ser binarios)

use std::collections::HashMap;
use thiserror::Error;

/// Separador entre el bloque de headers y el body
pub const HEAD_TERMINATOR: &[u8] = b"\r\n\r\n";

/// Métodos HTTP reconocidos
///
/// Cualquier otro token se conserva tal cual en `Other`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    GET,
    HEAD,
    POST,
    PUT,
    DELETE,
    Other(String),
}

impl Method {
    /// Convierte el primer token de la request line en un método
    pub fn from_token(token: &str) -> Self {
        match token {
            "GET" => Method::GET,
            "HEAD" => Method::HEAD,
            "POST" => Method::POST,
            "PUT" => Method::PUT,
            "DELETE" => Method::DELETE,
            other => Method::Other(other.to_string()),
        }
    }

    /// Convierte el método a string
    pub fn as_str(&self) -> &str {
        match self {
            Method::GET => "GET",
            Method::HEAD => "HEAD",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::DELETE => "DELETE",
            Method::Other(token) => token,
        }
    }
}

/// Errores que pueden ocurrir durante el parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Request vacío
    #[error("Empty request")]
    EmptyRequest,

    /// La request line no tiene método, target y versión
    #[error("Invalid request line: {0:?}")]
    InvalidRequestLine(String),

    /// El bloque de headers no es UTF-8 válido
    #[error("Request head is not valid UTF-8")]
    InvalidEncoding,

    /// `Content-Length` no es un entero no negativo
    #[error("Invalid Content-Length: {0:?}")]
    InvalidContentLength(String),
}

/// Representa un request HTTP parseado
///
/// Vive solo mientras dura la conexión: lo crea el parser y lo consume el
/// router inmediatamente.
#[derive(Debug, Clone)]
pub struct Request {
    /// Método HTTP (primer token de la request line)
    method: Method,

    /// Target tal cual llegó, incluyendo el `/` inicial (ej: "/echo/abc")
    target: String,

    /// Versión HTTP (se guarda pero no afecta el comportamiento)
    version: String,

    /// Headers con el casing que usó el cliente; el último repetido gana
    headers: HashMap<String, String>,

    /// Body del request
    body: Vec<u8>,
}

impl Request {
    /// Parsea un request HTTP desde bytes
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use echo_files_server::http::Request;
    ///
    /// let raw = b"GET /echo/abc HTTP/1.1\r\nUser-Agent: curl/8.0\r\n\r\n";
    /// let request = Request::parse(raw).unwrap();
    ///
    /// assert_eq!(request.target(), "/echo/abc");
    /// assert_eq!(request.header("User-Agent"), Some("curl/8.0"));
    /// ```
    pub fn parse(buffer: &[u8]) -> Result<Self, ParseError> {
        let (head, rest) = split_head(buffer);

        let head = std::str::from_utf8(head).map_err(|_| ParseError::InvalidEncoding)?;
        if head.trim().is_empty() {
            return Err(ParseError::EmptyRequest);
        }

        // 1. Request line
        let request_line = head.split("\r\n").next().unwrap_or_default();
        let (method, target, version) = Self::parse_request_line(request_line)?;

        // 2. Headers
        let headers = Self::parse_headers(head);

        // 3. Body, recortado a Content-Length cuando viene declarado
        let body = match content_length(header_lines(head))? {
            Some(length) => rest[..length.min(rest.len())].to_vec(),
            None => rest.to_vec(),
        };

        Ok(Request {
            method,
            target,
            version,
            headers,
            body,
        })
    }

    /// Parsea la request line
    ///
    /// Formato: `GET /path HTTP/1.1`. Se separa por espacios simples; los
    /// tokens después del tercero se ignoran.
    fn parse_request_line(line: &str) -> Result<(Method, String, String), ParseError> {
        let parts: Vec<&str> = line.split(' ').collect();

        if parts.len() < 3 || parts[0].is_empty() {
            return Err(ParseError::InvalidRequestLine(line.to_string()));
        }

        Ok((
            Method::from_token(parts[0]),
            parts[1].to_string(),
            parts[2].to_string(),
        ))
    }

    /// Parsea los headers HTTP
    ///
    /// Si un nombre se repite, el último valor gana.
    fn parse_headers(head: &str) -> HashMap<String, String> {
        header_lines(head)
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect()
    }

    // === Métodos públicos para acceder a los campos ===

    /// Obtiene el método HTTP del request
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Obtiene el target del request
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Obtiene la versión HTTP
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Obtiene todos los headers
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Obtiene un header específico
    ///
    /// La búsqueda distingue mayúsculas: `user-agent` no encuentra
    /// `User-Agent`.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(|s| s.as_str())
    }

    /// Obtiene el body del request
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

/// Separa el bloque de headers del resto de los bytes
///
/// Si no hay `\r\n\r\n`, todo el buffer se considera head.
pub fn split_head(buffer: &[u8]) -> (&[u8], &[u8]) {
    match find_head_end(buffer) {
        Some(end) => (&buffer[..end], &buffer[end + HEAD_TERMINATOR.len()..]),
        None => (buffer, &[]),
    }
}

/// Posición donde empieza `\r\n\r\n`, si ya llegó
pub fn find_head_end(buffer: &[u8]) -> Option<usize> {
    buffer
        .windows(HEAD_TERMINATOR.len())
        .position(|window| window == HEAD_TERMINATOR)
}

/// Recorre los headers del head en el orden en que llegaron
///
/// Se salta la request line y se detiene en la primera línea vacía. Cada
/// línea se corta en el primer `:`; las líneas sin `:` se ignoran.
pub fn header_lines(head: &str) -> impl Iterator<Item = (&str, &str)> + '_ {
    head.split("\r\n")
        .skip(1)
        .take_while(|line| !line.trim().is_empty())
        .filter_map(|line| line.split_once(':'))
        .map(|(name, value)| (name.trim(), value.trim()))
}

/// Busca `Content-Length` entre los headers
///
/// Para el framing el nombre se compara sin distinguir mayúsculas: un
/// cliente que envía `content-length` igual necesita que leamos su body.
/// Repeticiones con el mismo valor se aceptan; valores distintos son un
/// error, porque no hay forma segura de saber dónde termina el body.
pub fn content_length<'a>(
    headers: impl Iterator<Item = (&'a str, &'a str)>,
) -> Result<Option<usize>, ParseError> {
    let mut found: Option<usize> = None;

    for (_, value) in headers.filter(|(name, _)| name.eq_ignore_ascii_case("Content-Length")) {
        let length = value
            .trim()
            .parse::<usize>()
            .map_err(|_| ParseError::InvalidContentLength(value.to_string()))?;

        match found {
            Some(previous) if previous != length => {
                return Err(ParseError::InvalidContentLength(format!(
                    "conflicting values {} and {}",
                    previous, length
                )));
            }
            _ => found = Some(length),
        }
    }

    Ok(found)
}
