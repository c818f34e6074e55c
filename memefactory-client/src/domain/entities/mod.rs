//! Domain entities
//!
//! This module contains the entities exchanged between the client core
//! and the UI layer.

pub mod token;

// Re-export entities
pub use token::*;
