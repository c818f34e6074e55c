//! Utility functions for the client core

use crate::shared::constants::DISPLAY_DECIMALS;
use crate::shared::error::ClientError;
use ethers::types::{Address, U256};
use ethers::utils::format_units;
use std::str::FromStr;

/// Format a base-unit amount in display units (`1000000000000000000` -> `"1.0"`).
///
/// Uses exact integer formatting; trailing fractional zeros are trimmed but at
/// least one fractional digit is kept.
pub fn format_display_units(amount: U256) -> Result<String, ClientError> {
    let full = format_units(amount, DISPLAY_DECIMALS)
        .map_err(|e| ClientError::internal(format!("Unit conversion error: {}", e)))?;
    let trimmed = full.trim_end_matches('0');
    if trimmed.ends_with('.') {
        Ok(format!("{}0", trimmed))
    } else {
        Ok(trimmed.to_string())
    }
}

/// Parse a configured contract address
pub fn parse_contract_address(raw: &str) -> Result<Address, ClientError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ClientError::invalid_contract_address("contract address is not configured"));
    }
    if !raw.starts_with("0x") || raw.len() != 42 {
        return Err(ClientError::invalid_contract_address(format!(
            "'{}' is not a 20-byte hex address",
            raw
        )));
    }
    Address::from_str(raw)
        .map_err(|e| ClientError::invalid_contract_address(format!("'{}': {}", raw, e)))
}

/// Abbreviate an address for display (`0x742d...d8b6`)
pub fn short_address(address: &Address) -> String {
    let full = format!("{:?}", address);
    format!("{}...{}", &full[..6], &full[full.len() - 4..])
}
