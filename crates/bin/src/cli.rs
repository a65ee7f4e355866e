//! CLI argument definitions for the chatbox binary.

use clap::{Parser, Subcommand};

/// Chatbox single-page chat server
#[derive(Parser, Debug)]
#[command(name = "chatbox")]
#[command(about = "Chatbox: a single-page chat with tagged blocks and inline plots")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Server options used when no subcommand is given
    #[command(flatten)]
    pub serve: ServeArgs,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the chat web server
    Serve(ServeArgs),
    /// Check health of a running chatbox server
    Health(HealthArgs),
}

/// Arguments for the serve command
#[derive(clap::Args, Debug, Clone)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, default_value_t = 8050, env = "CHATBOX_PORT")]
    pub port: u16,

    /// Bind address
    #[arg(long, default_value = "0.0.0.0", env = "CHATBOX_HOST")]
    pub host: String,

    /// Substring that makes the server answer with a plot
    #[arg(long, default_value = chatbox::constants::PLOT_TRIGGER, env = "CHATBOX_PLOT_TRIGGER")]
    pub plot_trigger: String,

    /// Seconds a session may sit idle before it is dropped
    #[arg(long, default_value_t = 3600, env = "CHATBOX_SESSION_TTL")]
    pub session_ttl: u64,

    /// Maximum number of live sessions
    #[arg(long, default_value_t = 10_000, env = "CHATBOX_MAX_SESSIONS")]
    pub max_sessions: usize,
}

/// Arguments for the health command
#[derive(clap::Args, Debug)]
pub struct HealthArgs {
    /// Base URL of the server to check
    #[arg(long, default_value = "http://127.0.0.1:8050", env = "CHATBOX_URL")]
    pub url: String,

    /// Timeout in seconds
    #[arg(short, long, default_value_t = 5)]
    pub timeout: u64,
}
