use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use colored::Colorize;
use quire_gateway::{Gateway, GatewayConfig, NoAuth};
use quire_server::{QuireServer, ServerConfig};
use quire_store::{Commit, FsStore};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let mut out = std::io::stdout().lock();
    match cli.command {
        Command::Serve(args) => cmd_serve(args),
        Command::Cat(args) => cmd_cat(args, &mut out),
        Command::Log(args) => cmd_log(args, &cli.format, &mut out),
        Command::Search(args) => cmd_search(args, &cli.format, &mut out),
    }
}

/// Gateway over the file store at `root`, without authentication.
fn open_gateway(root: &Path) -> anyhow::Result<Gateway> {
    let store = FsStore::open(root)
        .with_context(|| format!("cannot open store at {}", root.display()))?;
    Ok(Gateway::new(
        GatewayConfig::with_root(root),
        Arc::new(store),
        Arc::new(NoAuth),
    ))
}

fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if let Some(root) = args.root {
        config.gateway.storage_root = root;
    }
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(QuireServer::new(config).serve())?;
    Ok(())
}

fn cmd_cat(args: CatArgs, out: &mut impl Write) -> anyhow::Result<()> {
    let gateway = open_gateway(&args.store.root)?;
    let doc = gateway.read(&args.id)?;
    out.write_all(&doc.version.content)?;
    out.flush()?;
    Ok(())
}

fn cmd_log(args: LogArgs, format: &OutputFormat, out: &mut impl Write) -> anyhow::Result<()> {
    let gateway = open_gateway(&args.store.root)?;
    let history = gateway.history(&args.name, Some(args.depth))?;
    match format {
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&history)?)?,
        OutputFormat::Text => {
            for commit in &history {
                write_commit(out, commit)?;
            }
        }
    }
    Ok(())
}

fn write_commit(out: &mut impl Write, commit: &Commit) -> std::io::Result<()> {
    let state = if commit.is_empty() { " (deleted)".red().to_string() } else { String::new() };
    writeln!(
        out,
        "{}  {}  {} bytes{}",
        commit.commit.to_hex().yellow().bold(),
        commit.time.format("%Y-%m-%d %H:%M:%S").to_string().dimmed(),
        commit.size,
        state,
    )?;
    if let Some(user) = &commit.meta.user {
        writeln!(out, "  User: {}", user.cyan())?;
    }
    if let Some(peer) = &commit.meta.peer {
        writeln!(out, "  Peer: {peer}")?;
    }
    if let Some(title) = &commit.meta.title {
        writeln!(out, "  Title: {title}")?;
    }
    Ok(())
}

fn cmd_search(args: SearchArgs, format: &OutputFormat, out: &mut impl Write) -> anyhow::Result<()> {
    let gateway = open_gateway(&args.store.root)?;
    let matches = gateway
        .search(&args.query)?
        .take(args.limit)
        .collect::<Result<Vec<_>, _>>()?;
    match format {
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&matches)?)?,
        OutputFormat::Text if matches.is_empty() => writeln!(out, "No matches.")?,
        OutputFormat::Text => {
            for info in &matches {
                let tags = info.meta.tags().join(", ");
                writeln!(out, "{}  {}  {}", info.file.bold(), info.url.blue(), tags.dimmed())?;
            }
        }
    }
    Ok(())
}
