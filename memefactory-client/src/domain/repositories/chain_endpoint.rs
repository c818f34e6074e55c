//! Chain endpoint for read access to the node
//!
//! Contract reads and receipt waits go through this trait so the core never
//! touches a transport directly.

use crate::infrastructure::blockchain::RpcEndpoint;
use crate::shared::constants::RECEIPT_CONFIRMATIONS;
use crate::shared::error::ClientError;
use async_trait::async_trait;
use ethers::providers::{Middleware, PendingTransaction};
use ethers::types::transaction::eip2718::TypedTransaction;
use ethers::types::{Bytes, TransactionReceipt, TxHash};

/// Read-only connection to a chain node
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChainEndpoint: Send + Sync {
    /// Execute a read-only contract call (`eth_call`)
    async fn call(&self, request: &TypedTransaction) -> Result<Bytes, ClientError>;

    /// Suspend until the transaction is mined; `None` if it was dropped
    async fn wait_for_receipt(
        &self,
        tx_hash: TxHash,
    ) -> Result<Option<TransactionReceipt>, ClientError>;
}

#[async_trait]
impl ChainEndpoint for RpcEndpoint {
    async fn call(&self, request: &TypedTransaction) -> Result<Bytes, ClientError> {
        log::debug!("eth_call to {:?} via {}", request.to(), self.rpc_url());
        self.provider()
            .call(request, None)
            .await
            .map_err(ClientError::from)
    }

    async fn wait_for_receipt(
        &self,
        tx_hash: TxHash,
    ) -> Result<Option<TransactionReceipt>, ClientError> {
        log::debug!("Waiting for receipt of {:?}", tx_hash);
        PendingTransaction::new(tx_hash, self.provider())
            .confirmations(RECEIPT_CONFIRMATIONS)
            .await
            .map_err(ClientError::from)
    }
}
