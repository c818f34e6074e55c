//! Binding for the meme token factory contract
//!
//! Encodes calls against the embedded ABI and decodes the raw token list.
//! Turning raw records into domain tokens is the catalog's job.

use ethers::{
    abi::{Abi, Token as AbiToken},
    types::{transaction::eip2718::TypedTransaction, Address, TransactionRequest, U256},
};
use crate::domain::TokenCreationForm;
use crate::shared::constants::{
    CREATE_TOKEN_METHOD, CREATION_FEE_WEI, CREATION_GAS_LIMIT, FACTORY_ABI_JSON,
    GET_ALL_TOKENS_METHOD,
};
use crate::shared::error::ClientError;
use crate::shared::utils::parse_contract_address;

#[derive(Debug, Clone)]
pub struct FactoryContract {
    address: Address,
    abi: Abi,
}

impl FactoryContract {
    /// Bind to the factory at `raw_address`, failing with `InvalidContractAddress` on a bad address
    pub fn at(raw_address: &str) -> Result<Self, ClientError> {
        let address = parse_contract_address(raw_address)?;
        let abi: Abi = serde_json::from_slice(FACTORY_ABI_JSON)
            .map_err(|e| ClientError::internal(format!("Invalid factory ABI: {}", e)))?;
        Ok(Self { address, abi })
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Read request for `getAllMemeTokens()`
    pub fn get_all_tokens_call(&self) -> Result<TypedTransaction, ClientError> {
        let data = self
            .abi
            .function(GET_ALL_TOKENS_METHOD)
            .and_then(|f| f.encode_input(&[]))
            .map_err(|e| encode_error(GET_ALL_TOKENS_METHOD, e))?;
        Ok(TransactionRequest::new().to(self.address).data(data).into())
    }

    /// Decode the output of `getAllMemeTokens()` into one raw tuple per token, in contract order
    pub fn decode_all_tokens(&self, output: &[u8]) -> Result<Vec<AbiToken>, ClientError> {
        let mut decoded = self.abi.function(GET_ALL_TOKENS_METHOD)?.decode_output(output)?;
        match decoded.pop() {
            Some(AbiToken::Array(records)) if decoded.is_empty() => Ok(records),
            _ => Err(ClientError::malformed_response("token list is not an array of records")),
        }
    }

    /// Payable `createMemeToken(name, symbol, imageUrl, description)` with the
    /// creation fee and gas ceiling attached
    pub fn create_token_tx(
        &self,
        form: &TokenCreationForm,
    ) -> Result<TypedTransaction, ClientError> {
        let args = [
            AbiToken::String(form.name.clone()),
            AbiToken::String(form.symbol.clone()),
            AbiToken::String(form.image_url.clone()),
            AbiToken::String(form.description.clone()),
        ];
        let data = self
            .abi
            .function(CREATE_TOKEN_METHOD)
            .and_then(|f| f.encode_input(&args))
            .map_err(|e| encode_error(CREATE_TOKEN_METHOD, e))?;
        Ok(TransactionRequest::new()
            .to(self.address)
            .value(U256::from(CREATION_FEE_WEI))
            .gas(CREATION_GAS_LIMIT)
            .data(data)
            .into())
    }
}

fn encode_error(method: &str, err: ethers::abi::Error) -> ClientError {
    ClientError::internal(format!("Failed to encode {}: {}", method, err))
}
