use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use xconv::core::CurrencyCode;
use xconv::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for xconv::AppCommand {
    fn from(cmd: Commands) -> xconv::AppCommand {
        match cmd {
            Commands::Currencies => xconv::AppCommand::Currencies,
            Commands::Convert { from, to, amount } => {
                xconv::AppCommand::Convert { from, to, amount }
            }
            Commands::Interactive => xconv::AppCommand::Interactive,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// List supported currencies
    Currencies,
    /// Convert an amount once and show the 7-day rate chart
    Convert {
        /// Currency to convert from
        #[arg(short, long)]
        from: Option<CurrencyCode>,
        /// Currency to convert to
        #[arg(short, long)]
        to: Option<CurrencyCode>,
        /// Amount to convert
        amount: Option<String>,
    },
    /// Run the converter widget, reading edits from stdin
    Interactive,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => xconv::cli::setup::setup(),
        Some(cmd) => xconv::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
