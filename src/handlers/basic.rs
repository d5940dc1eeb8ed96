//! # Handlers Básicos
//! src/handlers/basic.rs
//!
//! - `/`: respuesta vacía
//! - `/user-agent`: devuelve el header `User-Agent`
//! - `/echo/{valor}`: devuelve `{valor}`, comprimido si el cliente acepta gzip

use crate::http::encoding::{self, ContentEncoding};
use crate::http::{Request, Response, StatusCode};
use crate::router::RouteContext;

/// Handler para `/`
///
/// Exactamente `HTTP/1.1 200 OK\r\n\r\n`, sin headers ni body.
pub fn root_handler(_req: &Request, _ctx: &RouteContext<'_>) -> std::io::Result<Response> {
    Ok(Response::new(StatusCode::Ok))
}

/// Handler para `/user-agent`
///
/// Si el cliente no envía `User-Agent` (con ese casing exacto), el body
/// queda vacío.
pub fn user_agent_handler(req: &Request, _ctx: &RouteContext<'_>) -> std::io::Result<Response> {
    let agent = req.header("User-Agent").unwrap_or_default();
    Ok(text_response(agent))
}

/// Handler para `/echo/{valor}`
///
/// Con `Accept-Encoding: gzip` el body viaja comprimido y
/// `Content-Length` es la longitud comprimida.
///
/// # Ejemplo de response
/// ```text
/// HTTP/1.1 200 OK
/// Content-Type: text/plain
/// Content-Length: 3
///
/// abc
/// ```
pub fn echo_handler(req: &Request, ctx: &RouteContext<'_>) -> std::io::Result<Response> {
    let value = ctx.tail;

    match encoding::negotiate(req.header("Accept-Encoding")) {
        Some(chosen) => encoded_text_response(value, chosen),
        None => Ok(text_response(value)),
    }
}

fn text_response(body: &str) -> Response {
    Response::new(StatusCode::Ok)
        .with_header("Content-Type", "text/plain")
        .with_body(body)
}

fn encoded_text_response(body: &str, chosen: ContentEncoding) -> std::io::Result<Response> {
    let encoded = encoding::encode(chosen, body.as_bytes())?;

    Ok(Response::new(StatusCode::Ok)
        .with_header("Content-Type", "text/plain")
        .with_header("Content-Encoding", chosen.as_str())
        .with_body_bytes(encoded))
}
