use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "quire",
    about = "quire: versioned document store behind an HTTP gateway",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the HTTP server
    Serve(ServeArgs),
    /// Print the content of a document or stored version
    Cat(CatArgs),
    /// Show the version history of a document
    Log(LogArgs),
    /// List documents whose name or tags start with a query
    Search(SearchArgs),
}

/// Location of the document store for offline commands.
#[derive(Args, Clone, Debug)]
pub struct StoreArgs {
    #[arg(long, default_value = "data/store")]
    pub root: PathBuf,
}

#[derive(Args)]
pub struct ServeArgs {
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub bind: Option<SocketAddr>,
    #[arg(long)]
    pub root: Option<PathBuf>,
}

#[derive(Args)]
pub struct CatArgs {
    /// Document name or commit hash
    pub id: String,
    #[command(flatten)]
    pub store: StoreArgs,
}

#[derive(Args)]
pub struct LogArgs {
    pub name: String,
    #[arg(short = 'n', long, default_value = "5")]
    pub depth: usize,
    #[command(flatten)]
    pub store: StoreArgs,
}

#[derive(Args)]
pub struct SearchArgs {
    pub query: String,
    #[arg(short = 'n', long, default_value = "10")]
    pub limit: usize,
    #[command(flatten)]
    pub store: StoreArgs,
}
