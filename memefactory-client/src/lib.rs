//! Meme Factory Client
//!
//! Client core for a token-factory contract: browse the tokens it has issued
//! and create new ones with a funded transaction.
//!
//! ## Architecture
//!
//! - **Core**: wallet session, catalog reader, token creator, error classifier
//! - **Domain**: entities and the chain endpoint / wallet provider ports
//! - **Infrastructure**: ethers-backed adapters and environment configuration
//! - **Shared**: constants, errors and utilities
//!
//! Every core operation returns a [`ClassifiedError`] on failure, so the UI
//! layer never interprets raw transport errors itself.
//!
//! ## Usage
//!
//! ```no_run
//! use memefactory_client::{init_client, Catalog};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = init_client()?;
//! let mut catalog = Catalog::new();
//! client.refresh_catalog(&mut catalog).await?;
//! for token in catalog.tokens() {
//!     println!("{} ({}) raised {} ETH", token.name, token.symbol, token.funding_raised);
//! }
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

pub mod core;
pub mod domain;
pub mod shared;
pub mod infrastructure;

// Re-export specific components
pub use crate::core::catalog::{Catalog, TokenCatalogReader};
pub use crate::core::classifier::{classify, ClassifiedError, ErrorKind};
pub use crate::core::transactions::{
    CreationAttempt, CreationError, CreationState, PendingTransaction, TokenCreator,
    TransactionStatus,
};
pub use crate::core::wallet::{SessionSigner, WalletSession};

// Re-export domain entities and ports
pub use crate::domain::{ChainEndpoint, Token, TokenCreationForm, WalletProvider};

pub use crate::infrastructure::{ClientConfig, LocalWalletProvider, RpcEndpoint};
pub use crate::shared::error::{ClientError, ValidationError};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Initialize logging
pub fn init() {
    let _ = env_logger::try_init();
}

/// Build a client from `.env` / process environment
pub fn init_client() -> Result<FactoryClient, ClassifiedError> {
    FactoryClient::new(ClientConfig::from_env())
}

/// Bundles the endpoint, catalog reader and token creator for one configuration
pub struct FactoryClient {
    config: ClientConfig,
    endpoint: Arc<dyn ChainEndpoint>,
    catalog_reader: TokenCatalogReader,
    creator: TokenCreator,
}

impl FactoryClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClassifiedError> {
        let endpoint = RpcEndpoint::connect(&config.rpc_url)?;
        Ok(Self::with_endpoint(config, Arc::new(endpoint)))
    }

    pub fn with_endpoint(config: ClientConfig, endpoint: Arc<dyn ChainEndpoint>) -> Self {
        log::info!(
            "Client configured for {} (factory {})",
            config.rpc_url,
            if config.contract_address.is_empty() {
                "<unset>"
            } else {
                config.contract_address.as_str()
            }
        );
        Self {
            catalog_reader: TokenCatalogReader::new(config.contract_address.clone()),
            creator: TokenCreator::new(config.contract_address.clone()),
            config,
            endpoint,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The wallet provider available in this environment, if any
    pub async fn wallet_provider(
        &self,
    ) -> Result<Option<Arc<dyn WalletProvider>>, ClassifiedError> {
        match &self.config.private_key {
            Some(key) => {
                let provider = LocalWalletProvider::connect(&self.config.rpc_url, key).await?;
                Ok(Some(Arc::new(provider)))
            }
            None => Ok(None),
        }
    }

    pub async fn connect(
        &self,
        session: &mut WalletSession,
    ) -> Result<ethers::types::Address, ClassifiedError> {
        let provider = self.wallet_provider().await?;
        session.connect(provider).await
    }

    pub async fn refresh_catalog(&self, catalog: &mut Catalog) -> Result<usize, ClassifiedError> {
        self.catalog_reader
            .refresh_into(self.endpoint.as_ref(), catalog)
            .await
    }

    pub async fn create_token(
        &self,
        attempt: &mut CreationAttempt,
        form: TokenCreationForm,
        session: &WalletSession,
    ) -> Result<ethers::types::TxHash, CreationError> {
        self.creator
            .create(attempt, form, session, self.endpoint.as_ref())
            .await
    }
}
