//! fmr CLI - Lifecycle pipeline for farm-to-market road project proposals

use clap::Parser;
use fmr_pipeline::cli::commands::{actions, init, list, rules, show};
use fmr_pipeline::cli::{Cli, Commands};
use fmr_pipeline::errors::to_exit_code;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // RUST_LOG wins; otherwise --verbose / --quiet pick the level
    let default_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let result = run(cli).await;

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error [{}]: {}", e.code(), e);
            if e.is_recoverable() {
                eprintln!("The project was not changed; correct the request and run it again.");
            }
            std::process::exit(to_exit_code(&e));
        }
    }
}

async fn run(cli: Cli) -> fmr_pipeline::Result<()> {
    let cwd = cli.cwd.as_deref();
    let dry_run = cli.dry_run;
    match cli.command {
        Some(Commands::Init { force }) => init::run(cwd, force, dry_run).await,
        Some(Commands::List { json, status }) => list::run(cwd, json, status).await,
        Some(Commands::Show { id, json }) => show::run(cwd, &id, json).await,
        Some(Commands::Create { payload, docs }) => {
            actions::create(cwd, &payload, &docs, dry_run).await
        }
        Some(Commands::Decide { id, payload }) => {
            actions::decide(cwd, &id, &payload, dry_run).await
        }
        Some(Commands::ReleaseHold { id }) => actions::release_hold(cwd, &id, dry_run).await,
        Some(Commands::Score { id, payload }) => actions::score(cwd, &id, &payload, dry_run).await,
        Some(Commands::Include { id, target }) => {
            actions::include(cwd, &id, target, dry_run).await
        }
        Some(Commands::SubmitDocs { id, docs }) => {
            actions::submit_docs(cwd, &id, &docs, dry_run).await
        }
        Some(Commands::Validate { id, payload }) => {
            actions::validate(cwd, &id, &payload, dry_run).await
        }
        Some(Commands::Resolve { id }) => actions::resolve(cwd, &id, dry_run).await,
        Some(Commands::Resubmit { id, payload, docs }) => {
            actions::resubmit(cwd, &id, &payload, &docs, dry_run).await
        }
        Some(Commands::Award {
            id,
            payload,
            notice,
        }) => actions::award(cwd, &id, &payload, &notice, dry_run).await,
        Some(Commands::Rules { json }) => rules::run(json).await,
        None => {
            // Default to showing help - clap handles this
            println!("Use --help for usage information");
            Ok(())
        }
    }
}
