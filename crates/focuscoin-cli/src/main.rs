use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod render;
mod scheduler;

#[derive(Parser)]
#[command(name = "focuscoin", version, about = "Focus timer that pays you for finished sessions")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a focus session
    Start(commands::session::StartArgs),
    /// Show accumulated earnings
    Wallet(commands::wallet::WalletArgs),
    /// Show the reward for a session length
    Reward(commands::reward::RewardArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Start(args) => commands::session::run(args).await,
        Commands::Wallet(args) => commands::wallet::run(args),
        Commands::Reward(args) => commands::reward::run(args),
        Commands::Config { action } => commands::config::run(action),
    };

    // A pending stdin read cannot be cancelled and would hold up runtime
    // shutdown, so leave without dropping the runtime.
    let code = match result {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("error: {e}");
            1
        }
    };
    std::process::exit(code);
}
