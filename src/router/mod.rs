//! # Sistema de Routing
//! src/router/mod.rs
//!
//! Mapea el target de cada request a un handler.
//!
//! ## Arquitectura
//!
//! ```text
//! Request → Router → Handler → Response
//! ```
//!
//! Las rutas exactas ganan sobre las de prefijo, y entre prefijos gana el
//! más largo. Una ruta con filtro de método que no coincide se salta. Si
//! nada coincide, la respuesta es `404 Not Found` sin body.

use crate::http::{Method, Request, Response, StatusCode};
use std::path::Path;

/// Datos que el router le pasa a cada handler
#[derive(Debug, Clone, Copy)]
pub struct RouteContext<'a> {
    /// Lo que queda del target después del prefijo (vacío en rutas exactas)
    pub tail: &'a str,

    /// Directorio raíz para `/files/*`
    pub files_root: &'a Path,
}

/// Tipo de función handler
///
/// Un error de I/O termina la conexión sin escribir respuesta.
pub type Handler = fn(&Request, &RouteContext<'_>) -> std::io::Result<Response>;

/// Cómo se compara el target contra una ruta
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutePattern {
    /// El target debe ser igual
    Exact(String),

    /// El target debe empezar con este prefijo
    Prefix(String),
}

impl RoutePattern {
    /// Si coincide, retorna el resto del target
    fn matches<'t>(&self, target: &'t str) -> Option<&'t str> {
        match self {
            RoutePattern::Exact(path) => (path == target).then_some(""),
            RoutePattern::Prefix(prefix) => target.strip_prefix(prefix.as_str()),
        }
    }

    /// Prioridad: exactas primero, luego prefijos más largos
    fn specificity(&self) -> (bool, usize) {
        match self {
            RoutePattern::Exact(path) => (true, path.len()),
            RoutePattern::Prefix(prefix) => (false, prefix.len()),
        }
    }
}

struct Route {
    pattern: RoutePattern,
    method: Option<Method>,
    handler: Handler,
}

/// Router que mapea targets a handlers
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    /// Crea un nuevo router vacío
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Registra una ruta exacta para cualquier método
    ///
    /// # Ejemplo
    /// ```
    /// use echo_files_server::router::{RouteContext, Router};
    /// use echo_files_server::http::{Request, Response, StatusCode};
    ///
    /// fn hello_handler(_req: &Request, _ctx: &RouteContext<'_>) -> std::io::Result<Response> {
    ///     Ok(Response::new(StatusCode::Ok).with_body("hello"))
    /// }
    ///
    /// let mut router = Router::new();
    /// router.exact("/hello", hello_handler);
    /// ```
    pub fn exact(&mut self, path: &str, handler: Handler) {
        self.register(RoutePattern::Exact(path.to_string()), None, handler);
    }

    /// Registra una ruta de prefijo para cualquier método
    pub fn prefix(&mut self, prefix: &str, handler: Handler) {
        self.register(RoutePattern::Prefix(prefix.to_string()), None, handler);
    }

    /// Registra una ruta de prefijo solo para `method`
    pub fn prefix_for(&mut self, method: Method, prefix: &str, handler: Handler) {
        self.register(RoutePattern::Prefix(prefix.to_string()), Some(method), handler);
    }

    /// Registra una ruta genérica
    pub fn register(&mut self, pattern: RoutePattern, method: Option<Method>, handler: Handler) {
        self.routes.push(Route {
            pattern,
            method,
            handler,
        });
    }

    /// Encuentra y ejecuta el handler apropiado para un request
    ///
    /// # Ejemplo
    /// ```
    /// use echo_files_server::router::Router;
    /// use echo_files_server::http::{Request, StatusCode};
    /// use std::path::Path;
    ///
    /// let router = Router::new();
    /// let request = Request::parse(b"GET /test HTTP/1.1\r\n\r\n").unwrap();
    /// let response = router.route(&request, Path::new("")).unwrap();
    /// assert_eq!(response.status(), StatusCode::NotFound);
    /// ```
    pub fn route(&self, request: &Request, files_root: &Path) -> std::io::Result<Response> {
        let target = request.target();

        let best = self
            .routes
            .iter()
            .filter(|route| route.method.as_ref().map_or(true, |m| m == request.method()))
            .filter_map(|route| route.pattern.matches(target).map(|tail| (route, tail)))
            .max_by_key(|(route, _)| route.pattern.specificity());

        match best {
            Some((route, tail)) => {
                let ctx = RouteContext { tail, files_root };
                (route.handler)(request, &ctx)
            }
            None => Ok(Response::new(StatusCode::NotFound)),
        }
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok_handler(_req: &Request, _ctx: &RouteContext<'_>) -> std::io::Result<Response> {
        Ok(Response::new(StatusCode::Ok))
    }

    fn tail_handler(_req: &Request, ctx: &RouteContext<'_>) -> std::io::Result<Response> {
        Ok(Response::new(StatusCode::Ok).with_body(ctx.tail))
    }

    fn created_handler(_req: &Request, _ctx: &RouteContext<'_>) -> std::io::Result<Response> {
        Ok(Response::new(StatusCode::Created))
    }

    fn failing_handler(_req: &Request, _ctx: &RouteContext<'_>) -> std::io::Result<Response> {
        Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"))
    }

    fn route(router: &Router, raw: &[u8]) -> std::io::Result<Response> {
        let request = Request::parse(raw).unwrap();
        router.route(&request, Path::new(""))
    }

    #[test]
    fn test_router_creation() {
        let router = Router::new();
        assert_eq!(router.routes.len(), 0);
    }

    #[test]
    fn test_exact_route() {
        let mut router = Router::new();
        router.exact("/", ok_handler);

        assert_eq!(route(&router, b"GET / HTTP/1.1\r\n\r\n").unwrap().status(), StatusCode::Ok);
        assert_eq!(
            route(&router, b"GET /other HTTP/1.1\r\n\r\n").unwrap().status(),
            StatusCode::NotFound
        );
    }

    #[test]
    fn test_not_found_has_empty_body() {
        let router = Router::new();
        let response = route(&router, b"GET /unknown/path HTTP/1.1\r\n\r\n").unwrap();

        assert_eq!(response.to_bytes(), b"HTTP/1.1 404 Not Found\r\n\r\n");
    }

    #[test]
    fn test_prefix_passes_tail() {
        let mut router = Router::new();
        router.prefix("/echo/", tail_handler);

        let response = route(&router, b"GET /echo/abc/def HTTP/1.1\r\n\r\n").unwrap();
        assert_eq!(response.body(), b"abc/def");

        // Sin la barra final no coincide
        let response = route(&router, b"GET /echo HTTP/1.1\r\n\r\n").unwrap();
        assert_eq!(response.status(), StatusCode::NotFound);
    }

    #[test]
    fn test_exact_wins_over_prefix() {
        let mut router = Router::new();
        router.prefix("/", tail_handler);
        router.exact("/user-agent", created_handler);

        let response = route(&router, b"GET /user-agent HTTP/1.1\r\n\r\n").unwrap();
        assert_eq!(response.status(), StatusCode::Created);
    }

    #[test]
    fn test_longest_prefix_wins() {
        let mut router = Router::new();
        router.prefix("/files/", created_handler);
        router.prefix("/files/docs/", tail_handler);

        let response = route(&router, b"GET /files/docs/a.txt HTTP/1.1\r\n\r\n").unwrap();
        assert_eq!(response.body(), b"a.txt");
    }

    #[test]
    fn test_method_filter() {
        let mut router = Router::new();
        router.prefix_for(Method::GET, "/files/", ok_handler);
        router.prefix_for(Method::POST, "/files/", created_handler);

        let get = route(&router, b"GET /files/a HTTP/1.1\r\n\r\n").unwrap();
        let post = route(&router, b"POST /files/a HTTP/1.1\r\n\r\n").unwrap();
        let put = route(&router, b"PUT /files/a HTTP/1.1\r\n\r\n").unwrap();

        assert_eq!(get.status(), StatusCode::Ok);
        assert_eq!(post.status(), StatusCode::Created);
        assert_eq!(put.status(), StatusCode::NotFound);
    }

    #[test]
    fn test_handler_error_propagates() {
        let mut router = Router::new();
        router.exact("/fail", failing_handler);

        let err = route(&router, b"GET /fail HTTP/1.1\r\n\r\n").unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::PermissionDenied);
    }
}
