use std::str::FromStr;
use ethers::{
    middleware::SignerMiddleware,
    providers::{Http, Middleware, Provider},
    signers::{LocalWallet, Signer},
    types::Address,
};
use crate::shared::error::ClientError;

/// HTTP JSON-RPC connection to a chain node
#[derive(Debug, Clone)]
pub struct RpcEndpoint {
    rpc_url: String,
    provider: Provider<Http>,
}

impl RpcEndpoint {
    pub fn connect(rpc_url: &str) -> Result<Self, ClientError> {
        let provider = Provider::<Http>::try_from(rpc_url).map_err(|e| {
            ClientError::network(format!("Failed to create HTTP provider for {}: {}", rpc_url, e))
        })?;
        Ok(Self {
            rpc_url: rpc_url.to_string(),
            provider,
        })
    }

    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    pub fn provider(&self) -> &Provider<Http> {
        &self.provider
    }
}

/// Wallet provider backed by a locally held private key.
///
/// Stands in for a browser-injected wallet when the client runs in a terminal.
#[derive(Debug, Clone)]
pub struct LocalWalletProvider {
    client: SignerMiddleware<Provider<Http>, LocalWallet>,
}

impl LocalWalletProvider {
    /// Build a signer for `private_key`, bound to the chain id reported by the node
    pub async fn connect(rpc_url: &str, private_key: &str) -> Result<Self, ClientError> {
        let endpoint = RpcEndpoint::connect(rpc_url)?;
        let wallet = LocalWallet::from_str(private_key.trim().trim_start_matches("0x"))
            .map_err(|e| ClientError::config(format!("failed to parse private key: {}", e)))?;
        let chain_id = endpoint
            .provider()
            .get_chainid()
            .await
            .map_err(ClientError::from)?;
        let wallet = wallet.with_chain_id(chain_id.as_u64());
        log::info!("Local wallet {:?} bound to chain {}", wallet.address(), chain_id);
        Ok(Self {
            client: SignerMiddleware::new(endpoint.provider, wallet),
        })
    }

    pub fn address(&self) -> Address {
        self.client.address()
    }

    pub fn client(&self) -> &SignerMiddleware<Provider<Http>, LocalWallet> {
        &self.client
    }
}
