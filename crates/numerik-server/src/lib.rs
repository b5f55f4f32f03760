//! # Numerik Server
//!
//! REST server for the numerik-math methods.
//!
//! ## Features
//!
//! - JSON endpoints for bisection, Newton-Raphson, finite differences,
//!   error calculation and Newton forward-difference interpolation
//! - Health endpoint
//! - Configuration via TOML file
//!
//! ## Usage
//!
//! ```ignore
//! use numerik_server::{Server, ServerConfig};
//!
//! let server = Server::new(ServerConfig::default());
//! server.start().await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod handlers;
pub mod routes;

use std::net::{IpAddr, SocketAddr};

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

pub use config::{ConfigError, ServerConfig};

/// The Numerik server.
pub struct Server {
    config: ServerConfig,
}

impl Server {
    /// Create a new server.
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Build the router.
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        routes::create_router(self.config.max_iterations)
            .layer(TraceLayer::new_for_http())
            .layer(cors)
    }

    /// The address to bind, from the configured host and port.
    ///
    /// The host must be an IP address literal.
    pub fn socket_addr(&self) -> Result<SocketAddr, std::io::Error> {
        let ip: IpAddr = self.config.host.parse().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid host {:?}: {}", self.config.host, e),
            )
        })?;
        Ok(SocketAddr::new(ip, self.config.port))
    }

    /// Start the server.
    pub async fn start(&self) -> Result<(), std::io::Error> {
        let addr = self.socket_addr()?;

        info!(
            "Starting Numerik server on {} (max_iterations = {})",
            addr, self.config.max_iterations
        );

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, self.router()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server(host: &str) -> Server {
        Server::new(ServerConfig {
            host: host.to_string(),
            port: 8123,
            ..ServerConfig::default()
        })
    }

    #[test]
    fn test_socket_addr() {
        let addr = server("127.0.0.1").socket_addr().unwrap();
        assert_eq!(addr, SocketAddr::from(([127, 0, 0, 1], 8123)));

        let addr = server("::1").socket_addr().unwrap();
        assert!(addr.is_ipv6());
    }

    #[test]
    fn test_socket_addr_rejects_hostnames() {
        let err = server("localhost").socket_addr().unwrap_err();

        assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);
        assert!(err.to_string().contains("localhost"));
    }

    #[tokio::test]
    async fn test_start_fails_on_invalid_host() {
        let err = server("not an address").start().await.unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);
    }
}
