use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use ethers::types::Address;
use memefactory_client::shared::constants::{
    CREATION_FEE_WEI, FUNDING_TARGET, INITIAL_MINT_TOKENS, MAX_SUPPLY_TOKENS,
    NATIVE_CURRENCY_SYMBOL,
};
use memefactory_client::shared::utils::format_display_units;
use memefactory_client::{
    init, init_client, Catalog, ClassifiedError, CreationAttempt, CreationError, Token,
    TokenCreationForm, WalletSession,
};

#[derive(Parser, Debug)]
#[command(name = "memefactory")]
#[command(about = "Browse and create tokens on the meme token factory")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every token issued by the factory
    List,

    /// Show one token by its address
    Show {
        /// Token contract address
        address: Address,
    },

    /// Create a new token (pays the creation fee from the configured wallet)
    Create {
        /// Token name
        #[arg(long)]
        name: String,

        /// Ticker symbol
        #[arg(long)]
        symbol: String,

        /// Image URL
        #[arg(long)]
        image_url: String,

        /// Description
        #[arg(long, default_value = "")]
        description: String,
    },
}

fn print_token(token: &Token) {
    println!("{} (ticker: {})", token.name, token.symbol);
    println!("  Created by {:?}", token.creator_address);
    println!("  Token address {:?}", token.token_address);
    println!("  Funding Raised: {} {}", token.funding_raised, NATIVE_CURRENCY_SYMBOL);
    println!("  Image: {}", token.image_url);
    if !token.description.is_empty() {
        println!("  {}", token.description);
    }
}

fn report(err: ClassifiedError) -> anyhow::Error {
    if let Some(url) = err.install_url() {
        eprintln!("Install a wallet: {}", url);
    }
    anyhow!(err.user_message())
}

#[tokio::main]
async fn main() -> Result<()> {
    init();
    let args = Args::parse();
    let client = init_client().map_err(report)?;

    match args.command {
        Command::List => {
            let mut catalog = Catalog::new();
            client.refresh_catalog(&mut catalog).await.map_err(report)?;
            if let Some(featured) = catalog.featured() {
                print_token(featured);
                println!();
            }
            println!("Terminal");
            for token in catalog.rest() {
                print_token(token);
            }
        }
        Command::Show { address } => {
            let mut catalog = Catalog::new();
            client.refresh_catalog(&mut catalog).await.map_err(report)?;
            let token = catalog
                .get(&address)
                .ok_or_else(|| anyhow!("No token with address {:?}", address))?;
            print_token(token);
        }
        Command::Create { name, symbol, image_url, description } => {
            println!(
                "MemeCoin creation fee: {} {}",
                format_display_units(CREATION_FEE_WEI.into())?,
                NATIVE_CURRENCY_SYMBOL
            );
            println!(
                "Max supply: {} tokens. Initial mint: {} tokens.",
                MAX_SUPPLY_TOKENS, INITIAL_MINT_TOKENS
            );
            println!(
                "If funding target of {} {} is met, a liquidity pool will be created.",
                FUNDING_TARGET, NATIVE_CURRENCY_SYMBOL
            );

            let mut session = WalletSession::new();
            client.connect(&mut session).await.map_err(report)?;
            if let Some(short) = session.short_address() {
                println!("Wallet: {}", short);
            }

            let form = TokenCreationForm::new(name, symbol, description, image_url);
            let mut attempt = CreationAttempt::new();
            match client.create_token(&mut attempt, form, &session).await {
                Ok(hash) => println!("Transaction successful! Hash: {:?}", hash),
                Err(CreationError::Invalid(e)) => return Err(anyhow!(e)),
                Err(CreationError::Failed(e)) => return Err(report(e)),
            }
        }
    }

    Ok(())
}
