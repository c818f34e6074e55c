//! Error handling for the client core
//!
//! Raw failures from the wallet provider, the chain endpoint and the core's own
//! precondition checks are collected in [`ClientError`]. They are turned into
//! user-facing categories by [`crate::core::classifier::classify`].

use ethers::providers::{JsonRpcError, MiddlewareError, ProviderError};
use thiserror::Error;

/// Raw client error type
#[derive(Error, Debug, Clone)]
pub enum ClientError {
    #[error("No wallet provider available")]
    NoWalletProvider,

    #[error(
        "Wallet provider error{}: {message}",
        .code.map(|c| format!(" {c}")).unwrap_or_default()
    )]
    Wallet { code: Option<i64>, message: String },

    #[error("Wallet is not connected")]
    NotConnected,

    #[error("Invalid contract address: {0}")]
    InvalidContractAddress(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("JSON-RPC error {code}: {message}")]
    Rpc {
        code: i64,
        message: String,
        data: Option<String>,
    },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Transaction reverted: {0}")]
    Reverted(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ClientError {
    /// Create a wallet provider error
    pub fn wallet(code: Option<i64>, message: impl Into<String>) -> Self {
        Self::Wallet {
            code,
            message: message.into(),
        }
    }

    /// Create an invalid contract address error
    pub fn invalid_contract_address(message: impl Into<String>) -> Self {
        Self::InvalidContractAddress(message.into())
    }

    /// Create a network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Create a malformed response error
    pub fn malformed_response(message: impl Into<String>) -> Self {
        Self::MalformedResponse(message.into())
    }

    /// Create a reverted transaction error
    pub fn reverted(message: impl Into<String>) -> Self {
        Self::Reverted(message.into())
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub fn from_json_rpc(err: &JsonRpcError) -> Self {
        Self::Rpc {
            code: err.code,
            message: err.message.clone(),
            data: err.data.as_ref().map(|d| d.to_string()),
        }
    }

    /// Convert a provider error, keeping the JSON-RPC payload when present.
    ///
    /// Only transport failures become [`ClientError::Network`].
    pub fn from_provider(err: ProviderError) -> Self {
        if let Some(resp) = err.as_error_response() {
            return Self::from_json_rpc(resp);
        }
        if let Some(serde_err) = err.as_serde_error() {
            return Self::malformed_response(format!("Invalid node response: {}", serde_err));
        }
        match err {
            ProviderError::JsonRpcClientError(_) | ProviderError::HTTPError(_) => {
                Self::network(err.to_string())
            }
            other => Self::internal(other.to_string()),
        }
    }
}

impl From<ProviderError> for ClientError {
    fn from(err: ProviderError) -> Self {
        Self::from_provider(err)
    }
}

impl From<ethers::abi::Error> for ClientError {
    fn from(err: ethers::abi::Error) -> Self {
        Self::malformed_response(format!("ABI decoding error: {}", err))
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::internal(format!("JSON error: {}", err))
    }
}

/// Rejection reasons for a token creation form
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Token name cannot be empty")]
    EmptyName,

    #[error("Ticker symbol cannot be empty")]
    EmptySymbol,

    #[error("Invalid image URL: {0}")]
    InvalidImageUrl(String),
}

impl From<url::ParseError> for ValidationError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidImageUrl(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_creation() {
        let network_error = ClientError::network("connection refused");
        let malformed = ClientError::malformed_response("missing field");
        let wallet = ClientError::wallet(Some(4001), "User rejected the request.");

        assert!(matches!(network_error, ClientError::Network(_)));
        assert!(matches!(malformed, ClientError::MalformedResponse(_)));
        assert!(matches!(wallet, ClientError::Wallet { code: Some(4001), .. }));
    }

    #[test]
    fn test_json_rpc_conversion() {
        let rpc = JsonRpcError {
            code: 3,
            message: "execution reverted: fee".to_string(),
            data: Some(serde_json::json!("0x08c379a0")),
        };
        match ClientError::from_json_rpc(&rpc) {
            ClientError::Rpc { code, message, data } => {
                assert_eq!(code, 3);
                assert_eq!(message, "execution reverted: fee");
                assert_eq!(data.as_deref(), Some("\"0x08c379a0\""));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_non_transport_provider_errors_are_internal() {
        let ens: ClientError = ProviderError::EnsError("memes.eth".to_string()).into();
        assert!(matches!(ens, ClientError::Internal(_)));

        let custom: ClientError = ProviderError::CustomError("bad filter".to_string()).into();
        assert!(matches!(custom, ClientError::Internal(_)));

        let signer: ClientError = ProviderError::SignerUnavailable.into();
        assert!(matches!(signer, ClientError::Internal(_)));
    }

    #[test]
    fn test_error_display() {
        let error = ClientError::wallet(Some(4001), "User rejected");
        assert_eq!(error.to_string(), "Wallet provider error 4001: User rejected");

        let error = ClientError::wallet(None, "locked");
        assert_eq!(error.to_string(), "Wallet provider error: locked");
    }

    #[test]
    fn test_url_error_conversion() {
        let err: ValidationError = url::Url::parse("not a url").unwrap_err().into();
        assert!(matches!(err, ValidationError::InvalidImageUrl(_)));
    }
}
