mod commands;

use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{filter, fmt};

/// Convert EdgeTX telemetry logs into iNAV waypoint missions
#[derive(clap::Parser)]
#[clap(version = env!("CARGO_PKG_VERSION"))]
struct Opts {
    /// A level of verbosity, and can be used multiple times
    #[clap(short, long, parse(from_occurrences))]
    verbose: i32,
    #[clap(subcommand)]
    command: Command,
}

#[derive(clap::Parser)]
enum Command {
    Convert(commands::convert::Opts),
    Units(commands::units::Opts),
    Form(commands::form::Opts),
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    let opts: Opts = Opts::parse();
    let max_level = match opts.verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::registry()
        .with(filter::filter_fn(move |m| {
            m.target().starts_with("inav_mission") && m.level() <= &max_level
        }))
        .with(fmt::layer())
        .init();

    let result = match opts.command {
        Command::Convert(opts) => commands::convert::execute(opts),
        Command::Units(opts) => commands::units::execute(opts),
        Command::Form(opts) => commands::form::execute(opts).await,
    };

    if let Err(err) = result {
        tracing::error!(%err, "command failed");
        std::process::exit(1);
    }
}
