//! Token entities for the client core

use ethers::types::{Address, U256};
use serde::{Deserialize, Serialize};

/// A token listed by the factory contract.
///
/// Built fresh on every catalog refresh and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub name: String,
    pub symbol: String,
    pub description: String,
    pub image_url: String,
    /// Funding raised in display units, e.g. `"1.5"`
    pub funding_raised: String,
    /// Funding raised in base units as reported by the contract
    pub funding_raised_wei: U256,
    pub token_address: Address,
    pub creator_address: Address,
}

/// User-entered metadata for a new token
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenCreationForm {
    pub name: String,
    pub symbol: String,
    pub description: String,
    pub image_url: String,
}

impl TokenCreationForm {
    pub fn new(
        name: impl Into<String>,
        symbol: impl Into<String>,
        description: impl Into<String>,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            description: description.into(),
            image_url: image_url.into(),
        }
    }
}
