//! # Servidor TCP Concurrente
//! src/server/tcp.rs
//!
//! Acepta conexiones en un loop y procesa cada una en su propio thread:
//! leer → parsear → rutear → escribir. Cada conexión maneja exactamente un
//! request y luego se cierra.
//!
//! No hay límite de threads simultáneos ni timeouts; las conexiones solo
//! comparten el router y el directorio raíz, ambos de solo lectura.

use crate::config::Config;
use crate::error::ServerError;
use crate::handlers;
use crate::http::reader::{read_request, ReadError, CHUNK_SIZE};
use crate::http::{Method, Request, Response, StatusCode};
use crate::router::Router;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use std::time::Instant;

/// Máximo de bytes descartados después de un 413 antes de cerrar
pub const DRAIN_LIMIT: usize = 64 * 1024;

/// Servidor HTTP/1.1 concurrente (un thread por conexión)
pub struct Server {
    config: Config,
    router: Arc<Router>,
    files_root: Arc<PathBuf>,
}

impl Server {
    pub fn new(config: Config) -> Self {
        let files_root = config.files_root();

        Self {
            config,
            router: Arc::new(Self::default_router()),
            files_root: Arc::new(files_root),
        }
    }

    /// Tabla de rutas del servidor
    pub fn default_router() -> Router {
        let mut router = Router::new();

        router.exact("/", handlers::root_handler);
        router.exact("/user-agent", handlers::user_agent_handler);
        router.prefix("/echo/", handlers::echo_handler);
        router.prefix_for(Method::GET, "/files/", handlers::file_get_handler);
        router.prefix_for(Method::POST, "/files/", handlers::file_post_handler);

        router
    }

    /// Abre el socket de escucha
    ///
    /// En Unix, `TcpListener::bind` ya activa `SO_REUSEADDR`, así que un
    /// reinicio rápido no falla con "Address already in use".
    pub fn bind(&self) -> std::io::Result<TcpListener> {
        let address = self.config.address();
        let listener = TcpListener::bind(&address)?;

        tracing::info!(address = %listener.local_addr()?, "listening");
        Ok(listener)
    }

    /// Valida la configuración, abre el socket y atiende conexiones para siempre
    pub fn run(&self) -> Result<(), ServerError> {
        self.config.validate()?;
        let listener = self.bind()?;
        self.serve(listener)
    }

    /// Loop de accept sobre un listener ya abierto
    ///
    /// Un error al aceptar se registra y el loop continúa.
    pub fn serve(&self, listener: TcpListener) -> Result<(), ServerError> {
        tracing::info!(
            files_root = %self.files_root.display(),
            "accepting connections, one thread per connection"
        );

        for stream in listener.incoming() {
            match stream {
                Ok(stream) => self.spawn_connection(stream),
                Err(e) => tracing::warn!(error = %e, "failed to accept connection"),
            }
        }

        Ok(())
    }

    fn spawn_connection(&self, mut stream: TcpStream) {
        let router = Arc::clone(&self.router);
        let files_root = Arc::clone(&self.files_root);
        let limit = self.config.max_request_bytes;

        let peer_addr = stream
            .peer_addr()
            .map(|addr| addr.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        tracing::debug!(peer = %peer_addr, "accepted connection");

        let spawned = thread::Builder::new()
            .name(format!("conn-{}", peer_addr))
            .spawn(move || {
                let span = tracing::info_span!("connection", peer = %peer_addr);
                let _entered = span.enter();

                if let Err(e) = handle_connection(&mut stream, &router, &files_root, limit) {
                    tracing::error!(error = %e, "connection failed");
                }
            });

        if let Err(e) = spawned {
            tracing::error!(error = %e, "failed to spawn connection thread");
        }
    }
}

/// Atiende un request completo sobre `stream`
///
/// Un request malformado recibe `400 Bad Request` y uno demasiado grande
/// `413 Payload Too Large`; en ambos casos la conexión termina después.
/// Los errores de I/O (incluido un POST que no puede escribir el archivo)
/// terminan la conexión sin respuesta.
pub fn handle_connection<S: Read + Write>(
    stream: &mut S,
    router: &Router,
    files_root: &Path,
    limit: usize,
) -> Result<(), ServerError> {
    let start = Instant::now();

    let response = match read_request(stream, limit) {
        Ok(raw) if raw.is_empty() => {
            tracing::debug!("connection closed without a request");
            return Ok(());
        }
        Ok(raw) => match Request::parse(&raw) {
            Ok(request) => {
                let response = router.route(&request, files_root)?;
                tracing::info!(
                    method = request.method().as_str(),
                    target = request.target(),
                    status = response.status().as_u16(),
                    elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "request handled"
                );
                response
            }
            Err(e) => {
                tracing::warn!(error = %e, "malformed request");
                Response::new(StatusCode::BadRequest)
            }
        },
        Err(ReadError::TooLarge { limit }) => {
            tracing::warn!(limit, "request too large");
            stream.write_all(&Response::new(StatusCode::PayloadTooLarge).to_bytes())?;
            stream.flush()?;

            // Cerrar con bytes sin leer hace que el kernel mande RST y el
            // cliente pierda la respuesta
            drain(stream, DRAIN_LIMIT);
            return Ok(());
        }
        Err(ReadError::InvalidContentLength(value)) => {
            tracing::warn!(value = %value, "invalid Content-Length");
            Response::new(StatusCode::BadRequest)
        }
        Err(ReadError::Io(e)) => return Err(e.into()),
    };

    stream.write_all(&response.to_bytes())?;
    stream.flush()?;

    Ok(())
}

/// Lee y descarta hasta `max` bytes, o hasta EOF o el primer error
fn drain<R: Read>(reader: &mut R, max: usize) {
    let mut chunk = [0u8; CHUNK_SIZE];
    let mut discarded = 0;

    while discarded < max {
        match reader.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => discarded += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(_) => break,
        }
    }

    tracing::debug!(discarded, "drained unread request bytes");
}
