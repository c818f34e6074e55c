pub mod ethereum;
pub mod factory;

pub use ethereum::{LocalWalletProvider, RpcEndpoint};
pub use factory::FactoryContract;
