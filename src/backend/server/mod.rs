//! Server Module
//!
//! Server initialization, configuration loading, and the shared
//! application state.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs    - Module exports and documentation
//! ├── config.rs - Environment-driven configuration
//! ├── state.rs  - AppState and FromRef extraction
//! └── init.rs   - Component wiring and app creation
//! ```

/// Environment-driven configuration
pub mod config;

/// Application state
pub mod state;

/// Server initialization
pub mod init;

// Re-export commonly used types
pub use config::ServerConfig;
pub use init::create_app;
pub use state::AppState;
