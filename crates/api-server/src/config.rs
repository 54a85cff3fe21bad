//! Configuration for the rendezvous server

use std::net::SocketAddr;

use matchpoint_registry_core::RegistryConfig;

/// Main server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Socket the HTTP listener binds.
    pub bind_addr: SocketAddr,
    /// Registry tuning: session TTL and sweep cadence.
    pub registry: RegistryConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            registry: RegistryConfig::default(),
        }
    }
}
