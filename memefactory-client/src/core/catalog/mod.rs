//! Token catalog synchronization
//!
//! Every refresh re-reads the full list from the factory contract. A single
//! malformed record fails the whole refresh; there is no partial catalog.

use crate::core::classifier::{classify, ClassifiedError};
use crate::domain::{ChainEndpoint, Token};
use crate::infrastructure::blockchain::FactoryContract;
use crate::shared::constants::TOKEN_RECORD_FIELDS;
use crate::shared::error::ClientError;
use crate::shared::utils::format_display_units;
use ethers::abi::Token as AbiToken;
use ethers::types::Address;
use serde::Serialize;

/// Catalog state owned by the UI layer
#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    tokens: Vec<Token>,
    loading: bool,
    last_error: Option<ClassifiedError>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            tokens: Vec::new(),
            loading: true,
            last_error: None,
        }
    }
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// True until the first refresh settles
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_error(&self) -> Option<&ClassifiedError> {
        self.last_error.as_ref()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn get(&self, token_address: &Address) -> Option<&Token> {
        self.tokens.iter().find(|t| &t.token_address == token_address)
    }

    /// The first token, shown as the featured card
    pub fn featured(&self) -> Option<&Token> {
        self.tokens.first()
    }

    /// Everything after the featured token
    pub fn rest(&self) -> &[Token] {
        self.tokens.get(1..).unwrap_or(&[])
    }
}

pub struct TokenCatalogReader {
    contract_address: String,
}

impl TokenCatalogReader {
    pub fn new(contract_address: impl Into<String>) -> Self {
        Self {
            contract_address: contract_address.into(),
        }
    }

    /// Fetch the full token list, in contract order
    pub async fn refresh(
        &self,
        endpoint: &dyn ChainEndpoint,
    ) -> Result<Vec<Token>, ClassifiedError> {
        self.fetch(endpoint).await.map_err(|e| {
            let classified = classify(&e);
            log::warn!("Error fetching meme tokens: {}", classified);
            classified
        })
    }

    /// Refresh and apply the outcome to `catalog`.
    ///
    /// On success the token list is replaced wholesale; on failure the previous
    /// list is kept and the error recorded.
    pub async fn refresh_into(
        &self,
        endpoint: &dyn ChainEndpoint,
        catalog: &mut Catalog,
    ) -> Result<usize, ClassifiedError> {
        let result = self.refresh(endpoint).await;
        catalog.loading = false;
        match result {
            Ok(tokens) => {
                let count = tokens.len();
                catalog.tokens = tokens;
                catalog.last_error = None;
                Ok(count)
            }
            Err(err) => {
                catalog.last_error = Some(err.clone());
                Err(err)
            }
        }
    }

    async fn fetch(&self, endpoint: &dyn ChainEndpoint) -> Result<Vec<Token>, ClientError> {
        let factory = FactoryContract::at(&self.contract_address)?;
        let request = factory.get_all_tokens_call()?;
        let output = endpoint.call(&request).await?;
        let records = factory.decode_all_tokens(&output)?;

        let tokens = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| token_from_record(index, record))
            .collect::<Result<Vec<_>, _>>()?;

        log::info!("Fetched {} tokens from factory {:?}", tokens.len(), factory.address());
        Ok(tokens)
    }
}

/// Convert one `(name, symbol, description, tokenImageUrl, fundingRaised,
/// tokenAddress, creatorAddress)` tuple
fn token_from_record(index: usize, record: AbiToken) -> Result<Token, ClientError> {
    let fields = match record {
        AbiToken::Tuple(fields) if fields.len() == TOKEN_RECORD_FIELDS => fields,
        other => {
            return Err(ClientError::malformed_response(format!(
                "token record {} is not a {}-field tuple: {:?}",
                index, TOKEN_RECORD_FIELDS, other
            )))
        }
    };
    let mut fields = fields.into_iter();
    let mut next = |name: &'static str| RecordField {
        index,
        name,
        value: fields.next(),
    };

    let name = next("name").required_string()?;
    let symbol = next("symbol").required_string()?;
    let description = next("description").string()?;
    let image_url = next("tokenImageUrl").required_string()?;
    let funding_raised_wei = next("fundingRaised").uint()?;
    let token_address = next("tokenAddress").address()?;
    let creator_address = next("creatorAddress").address()?;

    Ok(Token {
        name,
        symbol,
        description,
        image_url,
        funding_raised: format_display_units(funding_raised_wei)?,
        funding_raised_wei,
        token_address,
        creator_address,
    })
}

struct RecordField {
    index: usize,
    name: &'static str,
    value: Option<AbiToken>,
}

impl RecordField {
    fn missing(&self) -> ClientError {
        ClientError::malformed_response(format!(
            "token record {} is missing {}",
            self.index, self.name
        ))
    }

    fn mismatch(&self, expected: &str) -> ClientError {
        ClientError::malformed_response(format!(
            "token record {} field {} is not {}",
            self.index, self.name, expected
        ))
    }

    fn string(self) -> Result<String, ClientError> {
        match self.value {
            Some(AbiToken::String(s)) => Ok(s),
            None => Err(self.missing()),
            Some(_) => Err(self.mismatch("a string")),
        }
    }

    fn required_string(self) -> Result<String, ClientError> {
        let missing = self.missing();
        let value = self.string()?;
        if value.is_empty() {
            return Err(missing);
        }
        Ok(value)
    }

    fn uint(self) -> Result<ethers::types::U256, ClientError> {
        match self.value {
            Some(AbiToken::Uint(v)) => Ok(v),
            None => Err(self.missing()),
            Some(_) => Err(self.mismatch("an unsigned integer")),
        }
    }

    fn address(self) -> Result<Address, ClientError> {
        match self.value {
            Some(AbiToken::Address(a)) if !a.is_zero() => Ok(a),
            Some(AbiToken::Address(_)) | None => Err(self.missing()),
            Some(_) => Err(self.mismatch("an address")),
        }
    }
}
