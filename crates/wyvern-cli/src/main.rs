use anyhow::Result;
use clap::Parser;
use wyvern_cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(cli.log_level())
        .with_writer(std::io::stderr)
        .init();

    let stdout = std::io::stdout();
    wyvern_cli::run(&cli, &mut stdout.lock())
}
