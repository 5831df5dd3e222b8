mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use syncly_core::{ExternalWorker, SessionProvider};

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // No daemon connection needed
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "syncly", &mut std::io::stdout());
            Ok(())
        }

        // Owns its own session around a child process
        Command::Worker(args) => commands::worker::handle(args, &cli.global).await,

        cmd => {
            let resolved = config::resolve(&cli.global)?;
            let key = match config::resolve_api_key_with_flag(&resolved, &cli.global) {
                Ok(key) => key,
                // /noauth/health does not check the key
                Err(CliError::NoCredentials { .. }) if matches!(cmd, Command::Health) => {
                    secrecy::SecretString::from("noauth")
                }
                Err(e) => return Err(e),
            };

            let session = SessionProvider::new(ExternalWorker::new(key), resolved.session);
            session.initialize().await?;

            tracing::debug!(command = ?cmd, profile = %resolved.profile_name, "dispatching command");
            commands::dispatch(cmd, &session, &cli.global).await
        }
    }
}
