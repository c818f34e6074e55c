//! Error classification
//!
//! Maps every raw [`ClientError`] onto one of a closed set of user-facing
//! categories. The UI layer only ever branches on [`ErrorKind`].

use crate::shared::constants::{EXECUTION_REVERTED_CODE, USER_REJECTED_CODE, WALLET_INSTALL_URL};
use crate::shared::error::ClientError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    NoWalletProvider,
    UserRejected,
    NotConnected,
    EndpointUnreachable,
    MalformedResponse,
    InvalidContractAddress,
    ContractCallReverted,
    Unknown,
}

/// A classified failure, with the raw message kept for display
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{kind:?}: {message}")]
pub struct ClassifiedError {
    pub kind: ErrorKind,
    pub message: String,
}

impl ClassifiedError {
    /// Text to show the user for this failure
    pub fn user_message(&self) -> String {
        match self.kind {
            ErrorKind::NoWalletProvider => {
                "Please install a wallet extension like MetaMask or Trust Wallet.".to_string()
            }
            ErrorKind::UserRejected => "Request was rejected in the wallet.".to_string(),
            ErrorKind::NotConnected => "Connect your wallet first.".to_string(),
            ErrorKind::EndpointUnreachable => {
                "Could not reach the network. Please try again.".to_string()
            }
            ErrorKind::MalformedResponse => {
                "The network returned an unreadable token list.".to_string()
            }
            ErrorKind::InvalidContractAddress => "Invalid contract address!".to_string(),
            ErrorKind::ContractCallReverted => {
                "Transaction failed! Please check the contract parameters and try again."
                    .to_string()
            }
            ErrorKind::Unknown => format!("Error: {}", self.message),
        }
    }

    /// Where to send the user when no wallet provider is installed
    pub fn install_url(&self) -> Option<&'static str> {
        (self.kind == ErrorKind::NoWalletProvider).then_some(WALLET_INSTALL_URL)
    }
}

impl From<ClientError> for ClassifiedError {
    fn from(err: ClientError) -> Self {
        classify(&err)
    }
}

/// Classify a raw error. Total: every input maps to exactly one category.
pub fn classify(err: &ClientError) -> ClassifiedError {
    let kind = match err {
        ClientError::NoWalletProvider => ErrorKind::NoWalletProvider,
        ClientError::NotConnected => ErrorKind::NotConnected,
        ClientError::InvalidContractAddress(_) => ErrorKind::InvalidContractAddress,
        ClientError::Network(_) => ErrorKind::EndpointUnreachable,
        ClientError::MalformedResponse(_) => ErrorKind::MalformedResponse,
        ClientError::Reverted(_) => ErrorKind::ContractCallReverted,
        ClientError::Wallet { code, message } => classify_coded(*code, message),
        ClientError::Rpc { code, message, .. } => classify_coded(Some(*code), message),
        ClientError::Config(_) | ClientError::Internal(_) => ErrorKind::Unknown,
    };
    ClassifiedError {
        kind,
        message: err.to_string(),
    }
}

fn classify_coded(code: Option<i64>, message: &str) -> ErrorKind {
    let lower = message.to_ascii_lowercase();
    if code == Some(USER_REJECTED_CODE)
        || lower.contains("action_rejected")
        || lower.contains("user rejected")
        || lower.contains("user denied")
    {
        ErrorKind::UserRejected
    } else if code == Some(EXECUTION_REVERTED_CODE)
        || lower.contains("execution reverted")
        || lower.contains("call_exception")
    {
        ErrorKind::ContractCallReverted
    } else {
        ErrorKind::Unknown
    }
}
