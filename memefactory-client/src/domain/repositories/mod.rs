//! Domain repositories
//!
//! This module contains the traits for the chain node and the wallet
//! provider, together with their ethers-backed implementations.

pub mod chain_endpoint;
pub mod wallet_provider;

// Re-export repositories
pub use chain_endpoint::*;
pub use wallet_provider::*;
