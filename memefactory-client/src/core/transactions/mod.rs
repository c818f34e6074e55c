//! Token creation
//!
//! Validates the creation form, submits the payable `createMemeToken` call
//! through the session signer and tracks it to confirmation. One call never
//! submits more than one transaction and nothing is retried.

use crate::core::classifier::{classify, ClassifiedError};
use crate::core::wallet::{SessionSigner, WalletSession};
use crate::domain::{ChainEndpoint, TokenCreationForm};
use crate::infrastructure::blockchain::FactoryContract;
use crate::shared::error::{ClientError, ValidationError};
use chrono::{DateTime, Utc};
use ethers::types::{TxHash, U64};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// States of a single creation attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CreationState {
    Idle,
    Validating,
    Submitting,
    AwaitingConfirmation,
    Confirmed,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionStatus {
    Submitted,
    Confirmed,
    Failed,
}

/// A submitted creation transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingTransaction {
    pub hash: Option<TxHash>,
    pub status: TransactionStatus,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CreationError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error(transparent)]
    Failed(#[from] ClassifiedError),
}

/// Caller-owned record of one creation attempt.
///
/// The core does not stop a second submit while this is in flight; the UI
/// checks [`CreationAttempt::is_in_flight`].
#[derive(Debug, Clone, Serialize)]
pub struct CreationAttempt {
    state: CreationState,
    visited: Vec<CreationState>,
    hash: Option<TxHash>,
    #[serde(skip)]
    error: Option<CreationError>,
}

impl Default for CreationAttempt {
    fn default() -> Self {
        Self {
            state: CreationState::Idle,
            visited: vec![CreationState::Idle],
            hash: None,
            error: None,
        }
    }
}

impl CreationAttempt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> CreationState {
        self.state
    }

    /// Every state this attempt has been in, starting with `Idle`
    pub fn transitions(&self) -> &[CreationState] {
        &self.visited
    }

    pub fn hash(&self) -> Option<TxHash> {
        self.hash
    }

    pub fn error(&self) -> Option<&CreationError> {
        self.error.as_ref()
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(
            self.state,
            CreationState::Submitting | CreationState::AwaitingConfirmation
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.state, CreationState::Confirmed | CreationState::Failed)
    }

    fn advance(&mut self, next: CreationState) {
        log::debug!("Creation attempt {:?} -> {:?}", self.state, next);
        self.state = next;
        self.visited.push(next);
    }

    /// Back to `Idle` with no hash or error
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn fail(&mut self, error: CreationError) -> CreationError {
        self.advance(CreationState::Failed);
        self.error = Some(error.clone());
        error
    }
}

pub struct TokenCreator {
    contract_address: String,
}

impl TokenCreator {
    pub fn new(contract_address: impl Into<String>) -> Self {
        Self {
            contract_address: contract_address.into(),
        }
    }

    /// Name and symbol must be non-empty and the image URL must parse; the
    /// description may be empty.
    pub fn validate(form: &TokenCreationForm) -> Result<(), ValidationError> {
        if form.name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if form.symbol.is_empty() {
            return Err(ValidationError::EmptySymbol);
        }
        url::Url::parse(&form.image_url)?;
        Ok(())
    }

    /// Check the session and factory address, validate the form and submit,
    /// returning once the node has accepted the transaction.
    ///
    /// A disconnected session fails with `NotConnected` whatever the form holds.
    pub async fn submit(
        &self,
        form: TokenCreationForm,
        session: &WalletSession,
    ) -> Result<PendingTransaction, CreationError> {
        let (signer, factory) = self.preflight(session).map_err(log_failure)?;
        Self::validate(&form)?;
        self.dispatch(signer, &factory, &form).await
    }

    /// Suspend on the endpoint's receipt wait and settle `pending`
    pub async fn confirm(
        &self,
        pending: &mut PendingTransaction,
        endpoint: &dyn ChainEndpoint,
    ) -> Result<TxHash, ClassifiedError> {
        let result = match pending.hash {
            Some(hash) => wait_for_success(hash, endpoint).await,
            None => Err(ClientError::internal("transaction has no hash")),
        };
        match result {
            Ok(hash) => {
                pending.status = TransactionStatus::Confirmed;
                log::info!("Transaction successful! Hash: {:?}", hash);
                Ok(hash)
            }
            Err(e) => {
                pending.status = TransactionStatus::Failed;
                let classified = classify(&e);
                log::warn!("Token creation transaction failed: {}", classified);
                Err(classified)
            }
        }
    }

    /// Drive one attempt from `Idle` to `Confirmed` or `Failed`, recording
    /// each state in `attempt`.
    ///
    /// A terminal attempt is reset to `Idle` first, so a failed attempt can be retried.
    pub async fn create(
        &self,
        attempt: &mut CreationAttempt,
        form: TokenCreationForm,
        session: &WalletSession,
        endpoint: &dyn ChainEndpoint,
    ) -> Result<TxHash, CreationError> {
        if attempt.is_terminal() {
            attempt.reset();
        }

        attempt.advance(CreationState::Validating);
        if let Err(e) = Self::validate(&form) {
            return Err(attempt.fail(e.into()));
        }

        attempt.advance(CreationState::Submitting);
        let submitted = match self.preflight(session) {
            Ok((signer, factory)) => self.dispatch(signer, &factory, &form).await,
            Err(e) => Err(log_failure(e).into()),
        };
        let mut pending = match submitted {
            Ok(pending) => pending,
            Err(e) => return Err(attempt.fail(e)),
        };

        attempt.hash = pending.hash;
        attempt.advance(CreationState::AwaitingConfirmation);

        match self.confirm(&mut pending, endpoint).await {
            Ok(hash) => {
                attempt.hash = Some(hash);
                attempt.advance(CreationState::Confirmed);
                Ok(hash)
            }
            Err(e) => Err(attempt.fail(e.into())),
        }
    }

    fn preflight<'s>(
        &self,
        session: &'s WalletSession,
    ) -> Result<(&'s SessionSigner, FactoryContract), ClientError> {
        let signer = session.signer().ok_or(ClientError::NotConnected)?;
        let factory = FactoryContract::at(&self.contract_address)?;
        Ok((signer, factory))
    }

    async fn dispatch(
        &self,
        signer: &SessionSigner,
        factory: &FactoryContract,
        form: &TokenCreationForm,
    ) -> Result<PendingTransaction, CreationError> {
        let tx = factory.create_token_tx(form).map_err(log_failure)?;
        log::info!(
            "Submitting {} ({}) to factory {:?} from {:?}",
            form.name,
            form.symbol,
            factory.address(),
            signer.address()
        );
        let hash = signer.send_transaction(tx).await.map_err(log_failure)?;
        Ok(PendingTransaction {
            hash: Some(hash),
            status: TransactionStatus::Submitted,
            submitted_at: Utc::now(),
        })
    }
}

fn log_failure(error: ClientError) -> ClassifiedError {
    let classified = classify(&error);
    log::warn!("Error creating token: {}", classified);
    classified
}

async fn wait_for_success(
    hash: TxHash,
    endpoint: &dyn ChainEndpoint,
) -> Result<TxHash, ClientError> {
    let receipt = endpoint
        .wait_for_receipt(hash)
        .await?
        .ok_or_else(|| ClientError::internal(format!("transaction {:?} was dropped", hash)))?;
    if receipt.status == Some(U64::zero()) {
        return Err(ClientError::reverted(format!(
            "transaction {:?} reverted in block {:?}",
            receipt.transaction_hash, receipt.block_number
        )));
    }
    Ok(receipt.transaction_hash)
}
