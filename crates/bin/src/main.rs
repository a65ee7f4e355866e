//! Chatbox binary: serves the chat page and checks running servers.

mod cli;
mod commands {
    pub mod health;
    pub mod serve;
}
mod session;
mod templates;

use clap::Parser;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve(args)) => commands::serve::run(&args).await,
        Some(Commands::Health(args)) => {
            if let Err(e) = commands::health::run(&args).await {
                eprintln!("unhealthy: {e}");
                std::process::exit(1);
            }
            Ok(())
        }
        None => commands::serve::run(&cli.serve).await,
    }
}
