//! Infrastructure layer
//!
//! ethers-backed adapters for the chain node, the local wallet and the
//! factory contract binding, plus environment configuration.

pub mod blockchain;
pub mod config;

pub use blockchain::*;
pub use config::ClientConfig;
