//! Domain layer - entities and the ports to the outside world
//!
//! Entities describe what the UI renders; repositories describe the chain
//! node and the wallet provider the core talks to.

pub mod entities;
pub mod repositories;

// Re-export domain components
pub use entities::*;
pub use repositories::*;
