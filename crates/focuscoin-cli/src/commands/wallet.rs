use clap::Args;
use focuscoin_core::quotes::random_quote;
use focuscoin_core::{Config, SqliteStore, Wallet};

#[derive(Args)]
pub struct WalletArgs {
    /// Print the balance as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: WalletArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let store = SqliteStore::open_default()?;
    let wallet = Wallet::load(&store)?;

    if args.json {
        println!("{}", serde_json::json!({ "balance": wallet.balance() }));
        return Ok(());
    }

    println!("Total earnings: {} {}", config.wallet.currency_symbol, wallet.balance());
    if config.display.show_quote {
        println!();
        println!("{}", random_quote(&mut rand::thread_rng()));
    }
    Ok(())
}
