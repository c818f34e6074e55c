use std::env;
use dotenv::dotenv;
use ethers::types::Address;
use serde::{Deserialize, Serialize};
use crate::shared::constants::{CONTRACT_ADDRESS_ENV, DEFAULT_RPC_URL, PRIVATE_KEY_ENV, RPC_URL_ENV};
use crate::shared::error::ClientError;
use crate::shared::utils::parse_contract_address;

/// Environment-style client configuration.
///
/// The contract address is kept as entered; it is only parsed when a contract
/// binding is needed so that a bad value surfaces as `InvalidContractAddress`.
#[derive(Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    pub rpc_url: String,
    pub contract_address: String,
    #[serde(skip_serializing)]
    pub private_key: Option<String>,
}

impl ClientConfig {
    pub fn new(rpc_url: impl Into<String>, contract_address: impl Into<String>) -> Self {
        Self {
            rpc_url: rpc_url.into(),
            contract_address: contract_address.into(),
            private_key: None,
        }
    }

    pub fn with_private_key(mut self, private_key: impl Into<String>) -> Self {
        self.private_key = Some(private_key.into());
        self
    }

    /// Load from the process environment, reading `.env` first if present
    pub fn from_env() -> Self {
        dotenv().ok();

        let rpc_url = env::var(RPC_URL_ENV).unwrap_or_else(|_| DEFAULT_RPC_URL.to_string());
        let contract_address = env::var(CONTRACT_ADDRESS_ENV).unwrap_or_default();
        let private_key = env::var(PRIVATE_KEY_ENV).ok().filter(|k| !k.trim().is_empty());

        if contract_address.is_empty() {
            log::warn!("{} is not set; contract calls will fail", CONTRACT_ADDRESS_ENV);
        }

        Self {
            rpc_url,
            contract_address,
            private_key,
        }
    }

    pub fn factory_address(&self) -> Result<Address, ClientError> {
        parse_contract_address(&self.contract_address)
    }

    pub fn has_wallet(&self) -> bool {
        self.private_key.is_some()
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("rpc_url", &self.rpc_url)
            .field("contract_address", &self.contract_address)
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
