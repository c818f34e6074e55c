//! Wallet provider capability
//!
//! The equivalent of a browser-injected wallet: it authorizes accounts and
//! signs and broadcasts transactions on the user's behalf.

use crate::infrastructure::blockchain::LocalWalletProvider;
use crate::shared::error::ClientError;
use async_trait::async_trait;
use ethers::middleware::signer::SignerMiddlewareError;
use ethers::providers::{Http, Middleware, Provider};
use ethers::signers::LocalWallet;
use ethers::types::transaction::eip2718::TypedTransaction;
use ethers::types::{Address, TxHash};

/// Wallet provider trait
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Ask the user to authorize accounts; the first one is the active account
    async fn request_accounts(&self) -> Result<Vec<Address>, ClientError>;

    /// Sign and broadcast a transaction, returning its hash once the node accepts it
    async fn send_transaction(&self, tx: TypedTransaction) -> Result<TxHash, ClientError>;
}

#[async_trait]
impl WalletProvider for LocalWalletProvider {
    async fn request_accounts(&self) -> Result<Vec<Address>, ClientError> {
        Ok(vec![self.client().address()])
    }

    async fn send_transaction(&self, tx: TypedTransaction) -> Result<TxHash, ClientError> {
        let pending = self
            .client()
            .send_transaction(tx, None)
            .await
            .map_err(map_signer_error)?;
        Ok(pending.tx_hash())
    }
}

fn map_signer_error(err: SignerMiddlewareError<Provider<Http>, LocalWallet>) -> ClientError {
    match err {
        SignerMiddlewareError::MiddlewareError(e) => ClientError::from(e),
        other => ClientError::wallet(None, other.to_string()),
    }
}
