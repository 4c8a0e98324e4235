//! PromptCraft Control - terminal client for the prompt engineering labs

use clap::Parser;
use promptcraft_common::CredentialStore;
use promptcraftctl::cli::Cli;
use promptcraftctl::commands::{self, Session};
use promptcraftctl::errors::{exit_code, EXIT_SUCCESS};
use promptcraftctl::output;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new("promptcraft_common=debug,promptcraftctl=debug"))
            .with_writer(std::io::stderr)
            .init();
    }

    let mut session = Session::new(cli.gateway.as_deref(), CredentialStore::load());

    let code = match commands::dispatch(cli.command, &mut session).await {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            output::display_error(&format!("{:#}", e));
            exit_code(&e)
        }
    };

    std::process::exit(code);
}
