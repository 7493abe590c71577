use clap::Args;
use focuscoin_core::{compute_reward, format_time, Config};

#[derive(Args)]
pub struct RewardArgs {
    /// Session length in seconds
    seconds: u64,
}

pub fn run(args: RewardArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    println!(
        "{} -> {} {}",
        format_time(args.seconds),
        config.wallet.currency_symbol,
        compute_reward(args.seconds)
    );
    Ok(())
}
