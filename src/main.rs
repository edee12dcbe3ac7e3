use clap::Parser;
use miette::Result;
use tbin::cli::{Cli, Commands};
use tbin::output::Printer;
use tbin::Config;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = Printer::new();
    let cwd = std::env::current_dir().unwrap_or_else(|_| ".".into());
    let config = Config::discover(cli.config.as_deref(), &cwd)?;

    match cli.command {
        Commands::Encode(args) => {
            tbin::cli::encode::run(args, &config, &printer)?;
        }
        Commands::Decode(args) => {
            tbin::cli::decode::run(args, &config, &printer)?;
        }
        Commands::Inspect(args) => {
            tbin::cli::inspect::run(args, &printer)?;
        }
    }

    Ok(())
}
