//! Shared utilities, constants and error types
//!
//! This module contains the pieces used throughout the client core.

pub mod utils;
pub mod constants;
pub mod error;

// Re-export shared components
pub use utils::*;
pub use constants::*;
pub use error::*;
