pub mod config;
pub mod error;
pub mod presence;

// Re-exports for convenience
pub use config::AppConfig;
pub use error::CoreError;
pub use presence::{PresenceClient, PresenceHandle, PresencePhase, PresenceSnapshot};
