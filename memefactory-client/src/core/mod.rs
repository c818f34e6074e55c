//! Core client functionality
//!
//! Wallet session lifecycle, catalog synchronization, token creation and
//! error classification.

pub mod wallet;
pub mod catalog;
pub mod transactions;
pub mod classifier;

