//! semrel CLI - resolve the latest semver tag and cut releases from CI.

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod output;
mod services;

use commands::{Cli, Commands, utils};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::LatestTag(args) => utils::load_config(&cli.config)
            .and_then(|config| commands::latest_tag::run(args, &config)),
        Commands::Release(args) => utils::load_config(&cli.config)
            .and_then(|config| commands::release::run(args, &config)),
        Commands::Completions { shell } => commands::completions::run(shell),
    };

    if let Err(e) = result {
        output::error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

/// Log to stderr; `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "semrel_cli=debug,semrel_github=debug,semrel_core=debug"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
