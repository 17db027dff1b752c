//! Todo MCP Server - Main Entry Point
//!
//! This is the main entry point for the todo MCP server application.
//! The actual implementation is in the `todo_mcp` library.

use anyhow::Result;
use clap::Parser;
use mcp_attr::server::serve_stdio;
use std::path::PathBuf;
use todo_mcp::{Config, TodoServerHandler};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Todo MCP Server - ordered todo list management via Model Context Protocol
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the SQLite database file (default: ~/.todo-list-mcp/todos.sqlite)
    file: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log filter written to stderr, e.g. "debug" (RUST_LOG takes precedence)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::load(args.config.as_deref())?;

    // stdout carries the MCP stream, so logs go to stderr
    let level = args.log_level.as_deref().unwrap_or(&config.log_level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();

    let db_path = args.file.unwrap_or_else(|| config.db_path());
    info!(path = %db_path.display(), "Starting todo MCP server");

    let handler = TodoServerHandler::new(&db_path)?;
    serve_stdio(handler).await?;
    info!("Todo MCP server stopped");
    Ok(())
}
