//! Natural-language query front end
//!
//! This library provides the query form controller together with the
//! `/query` proxy it talks to and a terminal front end over the same
//! controller.

use clap::{Parser, ValueEnum};
use tracing::{info, warn};

use crate::core::controller::LoadingGuard;
use crate::core::query_client::QueryClient;

pub mod core;
pub mod repl;
pub mod web;

#[derive(Debug, Clone, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    #[value(name = "serve", help = "Serve the /query endpoint in front of the answer engine")]
    Serve,
    #[value(name = "repl", help = "Ask questions from the terminal")]
    Repl,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[arg(value_enum, default_value = "serve")]
    pub mode: Mode,
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_PORT,
        help = "Port to serve the /query endpoint on"
    )]
    pub port: u16,
    #[arg(
        long,
        env = "NLQUERY_ENGINE_URL",
        default_value = DEFAULT_ENGINE_URL,
        help = "Base URL of the answer engine"
    )]
    pub engine_url: String,
    #[arg(
        long,
        value_name = "URL",
        help = "Base URL of a /query server for repl mode [default: http://localhost:<port>]"
    )]
    pub endpoint: Option<String>,
    #[arg(long, help = "Ignore submissions while a query is running")]
    pub enforce_guard: bool,
}

impl Args {
    pub fn loading_guard(&self) -> LoadingGuard {
        if self.enforce_guard {
            LoadingGuard::Enforced
        } else {
            LoadingGuard::Inert
        }
    }

    /// Where the repl sends its queries
    pub fn query_endpoint(&self) -> String {
        self.endpoint
            .clone()
            .unwrap_or_else(|| format!("http://localhost:{}", self.port))
    }
}

#[derive(Clone)]
pub struct AppState {
    pub engine_client: QueryClient,
}

impl AppState {
    /// Create a new AppState from command-line arguments
    pub fn new(args: &Args) -> Self {
        let api_key = std::env::var(API_KEY_VAR)
            .ok()
            .filter(|key| !key.trim().is_empty());

        info!("Using answer engine at {}", args.engine_url);
        if api_key.is_some() {
            info!("Authentication: Using API key from {API_KEY_VAR} environment variable");
        } else {
            warn!("Authentication: No API key found, connecting without authentication");
        }

        Self {
            engine_client: QueryClient::new(args.engine_url.as_str(), api_key.as_deref()),
        }
    }
}

/// Constants used throughout the application
pub const DEFAULT_PORT: u16 = 8888;
pub const DEFAULT_ENGINE_URL: &str = "http://localhost:9000";
pub const QUERY_ENDPOINT: &str = "/query";
pub const API_KEY_VAR: &str = "NLQUERY_API_KEY";
