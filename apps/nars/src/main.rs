//! # NARS - Reasoning Engine Driver
//!
//! The main binary for the `nars-core` reasoning engine.
//!
//! This application provides:
//! - HTTP REST API server (axum-based)
//! - CLI interface: script runner, interactive shell, parser
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────┐
//! │                apps/nars (THE BINARY)             │
//! │                                                   │
//! │   ┌──────────────────┐      ┌─────────────────┐   │
//! │   │  CLI / Shell     │      │    HTTP API     │   │
//! │   │  (clap)          │      │    (axum)       │   │
//! │   └────────┬─────────┘      └────────┬────────┘   │
//! │            └────────────┬────────────┘            │
//! │                         ▼                         │
//! │                 ┌───────────────┐                 │
//! │                 │   nars-core   │                 │
//! │                 │  (THE ENGINE) │                 │
//! │                 └───────────────┘                 │
//! └───────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Run a script, then 100 more cycles, keeping state between runs
//! nars -S nars.state run -f animals.nal --cycles 100
//!
//! # Interactive shell
//! nars shell
//!
//! # Start the HTTP server
//! nars server --host 0.0.0.0 --port 8080
//! ```

use clap::Parser;
use nars::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    init_tracing(cli.verbose);

    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Install the tracing subscriber. `NARS_LOG_FORMAT=json` enables
/// machine-parseable output; `RUST_LOG` overrides the filter.
fn init_tracing(verbose: bool) {
    let log_format = std::env::var("NARS_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let default_filter = if verbose {
        "nars=debug,nars_core=debug,tower_http=debug"
    } else {
        "nars=info,nars_core=info,tower_http=debug"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}

/// Print the startup banner.
fn print_banner() {
    println!(
        r#"
  ███╗   ██╗ █████╗ ██████╗ ███████╗
  ████╗  ██║██╔══██╗██╔══██╗██╔════╝
  ██╔██╗ ██║███████║██████╔╝███████╗
  ██║╚██╗██║██╔══██║██╔══██╗╚════██║
  ██║ ╚████║██║  ██║██║  ██║███████║
  ╚═╝  ╚═══╝╚═╝  ╚═╝╚═╝  ╚═╝╚══════╝

  Non-Axiomatic Reasoning v{}
"#,
        env!("CARGO_PKG_VERSION")
    );
}
