//! Wallet session management
//!
//! A [`WalletSession`] is owned by the caller. It is only changed through
//! [`WalletSession::connect`] and [`WalletSession::disconnect`]; everything
//! else reads it.

use crate::core::classifier::{classify, ClassifiedError};
use crate::domain::WalletProvider;
use crate::shared::constants::UNAUTHORIZED_CODE;
use crate::shared::error::ClientError;
use crate::shared::utils::short_address;
use ethers::types::transaction::eip2718::TypedTransaction;
use ethers::types::{Address, TxHash};
use std::fmt;
use std::sync::Arc;

/// Permission to sign and submit transactions from the session's address
#[derive(Clone)]
pub struct SessionSigner {
    provider: Arc<dyn WalletProvider>,
    address: Address,
}

impl SessionSigner {
    pub fn address(&self) -> Address {
        self.address
    }

    /// Sign and broadcast `tx` from the session address
    pub async fn send_transaction(&self, mut tx: TypedTransaction) -> Result<TxHash, ClientError> {
        tx.set_from(self.address);
        self.provider.send_transaction(tx).await
    }
}

impl fmt::Debug for SessionSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionSigner")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

/// An authorized wallet connection; connected exactly when an address is held
#[derive(Debug, Clone, Default)]
pub struct WalletSession {
    signer: Option<SessionSigner>,
}

impl WalletSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn address(&self) -> Option<Address> {
        self.signer.as_ref().map(SessionSigner::address)
    }

    pub fn is_connected(&self) -> bool {
        self.signer.is_some()
    }

    pub fn signer(&self) -> Option<&SessionSigner> {
        self.signer.as_ref()
    }

    /// `0x1234...abcd` for the connect button
    pub fn short_address(&self) -> Option<String> {
        self.address().map(|a| short_address(&a))
    }

    /// Ask the wallet provider for account authorization.
    ///
    /// Calling this while connected re-resolves the active account. On failure
    /// the session is left as it was.
    pub async fn connect(
        &mut self,
        provider: Option<Arc<dyn WalletProvider>>,
    ) -> Result<Address, ClassifiedError> {
        let Some(provider) = provider else {
            log::warn!("No wallet provider available");
            return Err(classify(&ClientError::NoWalletProvider));
        };

        let accounts = provider.request_accounts().await.map_err(|e| {
            let classified = classify(&e);
            log::warn!("Wallet connection failed: {}", classified);
            classified
        })?;

        let address = accounts.first().copied().ok_or_else(|| {
            classify(&ClientError::wallet(Some(UNAUTHORIZED_CODE), "No accounts authorized"))
        })?;

        if self.address().is_some_and(|previous| previous != address) {
            log::info!("Wallet account switched to {:?}", address);
        } else {
            log::info!("Wallet connected: {:?}", address);
        }
        self.signer = Some(SessionSigner { provider, address });
        Ok(address)
    }

    pub fn disconnect(&mut self) {
        if let Some(signer) = self.signer.take() {
            log::info!("Wallet disconnected: {:?}", signer.address);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::classifier::ErrorKind;
    use crate::domain::MockWalletProvider;

    fn account(byte: u8) -> Address {
        Address::repeat_byte(byte)
    }

    #[tokio::test]
    async fn test_connect_without_provider() {
        let mut session = WalletSession::new();
        let err = session.connect(None).await.unwrap_err();

        assert_eq!(err.kind, ErrorKind::NoWalletProvider);
        assert!(!session.is_connected());
        assert_eq!(session.address(), None);
    }

    #[tokio::test]
    async fn test_connect_binds_first_account() {
        let mut provider = MockWalletProvider::new();
        provider
            .expect_request_accounts()
            .times(1)
            .returning(|| Ok(vec![account(0xaa), account(0xbb)]));

        let mut session = WalletSession::new();
        let address = session.connect(Some(Arc::new(provider))).await.unwrap();

        assert_eq!(address, account(0xaa));
        assert!(session.is_connected());
        assert_eq!(session.signer().map(|s| s.address()), Some(account(0xaa)));
        assert_eq!(session.short_address().as_deref(), Some("0xaaaa...aaaa"));
    }

    #[tokio::test]
    async fn test_user_rejection_leaves_session_untouched() {
        let mut provider = MockWalletProvider::new();
        provider
            .expect_request_accounts()
            .returning(|| Err(ClientError::wallet(Some(4001), "User rejected the request.")));

        let mut session = WalletSession::new();
        let err = session.connect(Some(Arc::new(provider))).await.unwrap_err();

        assert_eq!(err.kind, ErrorKind::UserRejected);
        assert!(!session.is_connected());
    }

    #[tokio::test]
    async fn test_reconnect_picks_up_switched_account() {
        let mut first = MockWalletProvider::new();
        first.expect_request_accounts().returning(|| Ok(vec![account(0x01)]));
        let mut second = MockWalletProvider::new();
        second.expect_request_accounts().returning(|| Ok(vec![account(0x02)]));

        let mut session = WalletSession::new();
        session.connect(Some(Arc::new(first))).await.unwrap();
        session.connect(Some(Arc::new(second))).await.unwrap();

        assert_eq!(session.address(), Some(account(0x02)));
    }

    #[tokio::test]
    async fn test_failed_reconnect_keeps_previous_account() {
        let mut first = MockWalletProvider::new();
        first.expect_request_accounts().returning(|| Ok(vec![account(0x01)]));
        let mut rejecting = MockWalletProvider::new();
        rejecting
            .expect_request_accounts()
            .times(1)
            .returning(|| Err(ClientError::wallet(Some(4001), "User rejected the request.")));

        let mut session = WalletSession::new();
        session.connect(Some(Arc::new(first))).await.unwrap();
        let err = session.connect(Some(Arc::new(rejecting))).await.unwrap_err();

        assert_eq!(err.kind, ErrorKind::UserRejected);
        assert!(session.is_connected());
        assert_eq!(session.address(), Some(account(0x01)));
    }

    #[tokio::test]
    async fn test_empty_account_list_is_not_a_connection() {
        let mut provider = MockWalletProvider::new();
        provider.expect_request_accounts().returning(|| Ok(vec![]));

        let mut session = WalletSession::new();
        let err = session.connect(Some(Arc::new(provider))).await.unwrap_err();

        assert_eq!(err.kind, ErrorKind::Unknown);
        assert!(!session.is_connected());
    }

    #[tokio::test]
    async fn test_disconnect() {
        let mut provider = MockWalletProvider::new();
        provider.expect_request_accounts().returning(|| Ok(vec![account(0x05)]));

        let mut session = WalletSession::new();
        session.connect(Some(Arc::new(provider))).await.unwrap();
        session.disconnect();

        assert!(!session.is_connected());
        assert_eq!(session.short_address(), None);
    }

    #[tokio::test]
    async fn test_signer_sets_from_address() {
        let mut provider = MockWalletProvider::new();
        provider.expect_request_accounts().returning(|| Ok(vec![account(0x07)]));
        provider
            .expect_send_transaction()
            .withf(|tx| tx.from() == Some(&Address::repeat_byte(0x07)))
            .times(1)
            .returning(|_| Ok(TxHash::repeat_byte(0x99)));

        let mut session = WalletSession::new();
        session.connect(Some(Arc::new(provider))).await.unwrap();

        let tx: TypedTransaction = ethers::types::TransactionRequest::new().into();
        let hash = session.signer().unwrap().send_transaction(tx).await.unwrap();
        assert_eq!(hash, TxHash::repeat_byte(0x99));
    }
}
