// SPDX-FileCopyrightText: 2026 Docent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Docent - an AI travel-docent relay backend.
//!
//! This is the binary entry point: it loads configuration, then serves the
//! chat and feedback API or prints the effective configuration.

mod serve;

use clap::{Parser, Subcommand};

/// Docent - AI travel-docent relay backend.
#[derive(Parser, Debug)]
#[command(name = "docent", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the docent API server.
    Serve,
    /// Load, validate, and print the effective configuration.
    Config,
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    // Load and validate configuration at startup.
    let config = match docent_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            docent_config::render_errors(&errors);
            return std::process::ExitCode::FAILURE;
        }
    };

    match cli.command {
        Some(Commands::Serve) => {
            if let Err(e) = serve::run_serve(config).await {
                eprintln!("docent serve failed: {e}");
                return std::process::ExitCode::FAILURE;
            }
        }
        Some(Commands::Config) => {
            print_config_summary(&config);
        }
        None => {
            println!("docent: use --help for available commands");
        }
    }

    std::process::ExitCode::SUCCESS
}

/// Print an effective-config summary with secrets redacted.
fn print_config_summary(config: &docent_config::DocentConfig) {
    println!("service.name       = {}", config.service.name);
    println!("service.log_level  = {}", config.service.log_level);
    println!("server             = {}:{}", config.server.host, config.server.port);
    println!(
        "azure.endpoint     = {}",
        config.azure.endpoint.as_deref().unwrap_or("(unset)")
    );
    println!(
        "azure.api_key      = {}",
        if config.azure.api_key.is_some() {
            "[redacted]"
        } else {
            "(unset, falls back to AZURE_OPENAI_API_KEY)"
        }
    );
    println!("azure.deployment   = {}", config.azure.deployment);
    println!("azure.api_version  = {}", config.azure.api_version);
    println!(
        "search             = {}",
        if config.search.is_configured() {
            "configured"
        } else {
            "disabled (endpoint, api_key, and index all required)"
        }
    );
    println!("feedback.store     = {}", config.feedback.store_path);
    println!("feedback.enrich    = {}", config.feedback.enrich);
}
