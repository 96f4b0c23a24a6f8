//! Server configuration.

/// Configuration for the sync server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Maximum accepted document payload size in bytes.
    pub max_payload_bytes: usize,
}

impl ServerConfig {
    /// Creates a configuration with the default limits.
    pub fn new() -> Self {
        Self {
            max_payload_bytes: 1024 * 1024,
        }
    }

    /// Sets the maximum document payload size.
    pub fn with_max_payload_bytes(mut self, max: usize) -> Self {
        self.max_payload_bytes = max;
        self
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new()
    }
}
