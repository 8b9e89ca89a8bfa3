//! CLI entry point - the composition root.
//!
//! This is the ONLY place where logging and environment loading are set
//! up. Command dispatch routes to handlers which drive the session engine.

use clap::Parser;

use cookalong_cli::{Cli, Commands, handlers};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG overrides the verbosity flag
    let default_level = if cli.verbose { "debug" } else { "warn" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    // Dispatch to appropriate handler
    let Some(command) = cli.command else {
        // No command provided - show help
        use clap::CommandFactory;
        cookalong_cli::Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Inspect { file, json } => {
            handlers::inspect::execute(&file, json).await?;
        }
        Commands::Run {
            file,
            locale,
            offline,
            default_timer_secs,
        } => {
            let args = handlers::run::RunArgs {
                file,
                locale: locale.into(),
                offline,
                default_timer_secs,
            };
            handlers::run::execute(args).await?;
        }
    }

    Ok(())
}
