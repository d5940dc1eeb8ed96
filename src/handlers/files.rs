//! # Handlers de Archivos
//! src/handlers/files.rs
//!
//! - `GET /files/{nombre}`: lee `<raíz>/{nombre}` completo
//! - `POST /files/{nombre}`: crea o sobrescribe `<raíz>/{nombre}` con el body
//!
//! El nombre no se sanea: un `..` puede salir del directorio raíz. No se
//! crean directorios intermedios.

use crate::http::{Request, Response, StatusCode};
use crate::router::RouteContext;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Resuelve el nombre pedido contra el directorio raíz
///
/// Un nombre que empieza con `/` también queda debajo de la raíz.
///
/// # Ejemplo
/// ```
/// use echo_files_server::handlers::resolve_file;
/// use std::path::Path;
///
/// assert_eq!(resolve_file(Path::new("/tmp/data"), "a.txt"), Path::new("/tmp/data/a.txt"));
/// assert_eq!(resolve_file(Path::new(""), "a.txt"), Path::new("a.txt"));
/// ```
pub fn resolve_file(root: &Path, name: &str) -> PathBuf {
    root.join(name.trim_start_matches('/'))
}

/// Handler para `GET /files/{nombre}`
///
/// 200 con `application/octet-stream` si el archivo existe, 404 si no
/// existe o no es un archivo regular. Cualquier otro error de lectura
/// termina la conexión.
pub fn file_get_handler(_req: &Request, ctx: &RouteContext<'_>) -> std::io::Result<Response> {
    let path = resolve_file(ctx.files_root, ctx.tail);

    match fs::metadata(&path) {
        Ok(metadata) if metadata.is_file() => {}
        Ok(_) => {
            tracing::debug!(path = %path.display(), "not a regular file");
            return Ok(Response::new(StatusCode::NotFound));
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "file not found");
            return Ok(Response::new(StatusCode::NotFound));
        }
        Err(e) => return Err(e),
    }

    let contents = fs::read(&path)?;

    Ok(Response::new(StatusCode::Ok)
        .with_header("Content-Type", "application/octet-stream")
        .with_body_bytes(contents))
}

/// Handler para `POST /files/{nombre}`
///
/// Escribe el body tal cual y responde 201 sin body.
pub fn file_post_handler(req: &Request, ctx: &RouteContext<'_>) -> std::io::Result<Response> {
    let path = resolve_file(ctx.files_root, ctx.tail);

    fs::write(&path, req.body())?;
    tracing::debug!(path = %path.display(), bytes = req.body().len(), "file written");

    Ok(Response::new(StatusCode::Created))
}
