mod commands;
mod terminal;

use commands::{CommandLine, Commands, info, scan, watch};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();
    terminal::logging::init(commands.quiet);

    let settings = commands.settings();
    match commands.command {
        Commands::Scan { target } => scan::scan(target, &settings).await,
        Commands::Watch { target, interval } => watch::watch(target, interval, &settings).await,
        Commands::Info => info::info(&settings),
    }
}
