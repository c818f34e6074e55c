//! Constants for the client core
//!
//! This module contains all constants used throughout the client core.

// Factory contract
pub const FACTORY_ABI_JSON: &[u8] = include_bytes!("../../abi/MemeTokenFactory.json");
pub const GET_ALL_TOKENS_METHOD: &str = "getAllMemeTokens";
pub const CREATE_TOKEN_METHOD: &str = "createMemeToken";
pub const TOKEN_RECORD_FIELDS: usize = 7;

// Transaction constants
pub const CREATION_FEE_WEI: u64 = 100_000_000_000_000; // 0.0001 ETH
pub const CREATION_GAS_LIMIT: u64 = 500_000;
pub const RECEIPT_CONFIRMATIONS: usize = 1;

// Units
pub const DISPLAY_DECIMALS: u32 = 18;
pub const NATIVE_CURRENCY_SYMBOL: &str = "ETH";

// Token economics shown next to the creation form
pub const MAX_SUPPLY_TOKENS: u64 = 1_000_000;
pub const INITIAL_MINT_TOKENS: u64 = 200_000;
pub const FUNDING_TARGET: &str = "24";

// Wallet provider error codes (EIP-1193) and node error codes
pub const USER_REJECTED_CODE: i64 = 4001;
pub const UNAUTHORIZED_CODE: i64 = 4100;
pub const EXECUTION_REVERTED_CODE: i64 = 3;

pub const WALLET_INSTALL_URL: &str = "https://trustwallet.com/browser-extension";

// Configuration
pub const RPC_URL_ENV: &str = "MEMEFACTORY_RPC_URL";
pub const CONTRACT_ADDRESS_ENV: &str = "MEMEFACTORY_CONTRACT_ADDRESS";
pub const PRIVATE_KEY_ENV: &str = "MEMEFACTORY_PRIVATE_KEY";
pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8545";
