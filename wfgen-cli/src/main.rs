mod logger;
mod output;

mod commands {
    pub mod generate;
    pub mod list;
}

use clap::{Parser, Subcommand};
use color_eyre::Result;

use commands::generate::GenerateArgs;
use commands::list::ListArgs;

/// Generate a GitHub Actions test workflow from suite, service and axis tables
#[derive(Parser, Debug)]
#[command(name = "wfgen", version, about)]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate the workflow document (default)
    Generate(GenerateArgs),

    /// List the job keys the workflow would contain
    List(ListArgs),
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    logger::init_cli_logger(cli.verbose);

    match cli.command {
        Some(Command::Generate(args)) => commands::generate::execute(args),
        Some(Command::List(args)) => commands::list::execute(args),
        None => commands::generate::execute(GenerateArgs {
            format: "yaml".to_string(),
            ..Default::default()
        }),
    }
}
