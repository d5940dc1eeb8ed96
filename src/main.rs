//! # Echo Files Server - Entry Point
//! src/main.rs
//!
//! Parsea la configuración, inicializa el logging y arranca el servidor.

use echo_files_server::config::Config;
use echo_files_server::logging;
use echo_files_server::server::Server;

fn main() {
    let config = Config::new();
    logging::init(&config.log_level);

    tracing::info!(
        address = %config.address(),
        files_root = %config.files_root().display(),
        max_request_bytes = config.max_request_bytes,
        "starting server"
    );

    let server = Server::new(config);

    // Valida la configuración y bloquea el thread principal
    if let Err(e) = server.run() {
        tracing::error!(error = %e, "fatal server error");
        std::process::exit(1);
    }
}
