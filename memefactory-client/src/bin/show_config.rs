use memefactory_client::ClientConfig;

fn main() {
    let config = ClientConfig::from_env();

    println!("Meme Factory Client Configuration:\n");
    println!("  RPC URL: {}", config.rpc_url);
    println!(
        "  Factory Contract: {}",
        if config.contract_address.is_empty() {
            "(not set)"
        } else {
            config.contract_address.as_str()
        }
    );
    match config.factory_address() {
        Ok(address) => println!("  Factory Address (parsed): {:?}", address),
        Err(e) => println!("  Factory Address (parsed): invalid - {}", e),
    }
    println!("  Local Wallet: {}", if config.has_wallet() { "configured" } else { "(not set)" });
}
