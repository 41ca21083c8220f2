use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand};
use naverfx::cli::convert::ConvertCommand;
use naverfx::core::log::init_logging;

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

#[derive(Args)]
struct ConvertArgs {
    /// Amount of the source currency
    #[arg(allow_negative_numbers = true)]
    amount: Option<f64>,

    /// Source currency code, e.g. USD
    #[arg(short, long)]
    from: Option<String>,

    /// Target currency code; repeat to convert into several currencies
    #[arg(short, long)]
    to: Vec<String>,

    /// Bank whose rate table is queried
    #[arg(long)]
    bank: Option<String>,

    /// Calculator unit mode
    #[arg(long)]
    unit: Option<String>,

    /// Calculator rounding direction
    #[arg(long)]
    direction: Option<String>,

    /// Calculator content id
    #[arg(long)]
    content_id: Option<u32>,

    /// Print results as JSON lines
    #[arg(long)]
    json: bool,
}

impl From<ConvertArgs> for ConvertCommand {
    fn from(args: ConvertArgs) -> ConvertCommand {
        ConvertCommand {
            amount: args.amount,
            from: args.from,
            targets: args.to,
            bank: args.bank,
            unit: args.unit,
            direction: args.direction,
            content_id: args.content_id,
            json: args.json,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Convert an amount between currencies
    Convert(ConvertArgs),
    /// List supported currency codes
    Currencies,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => naverfx::cli::setup::setup(),
        Some(Commands::Convert(args)) => {
            naverfx::run_command(
                naverfx::AppCommand::Convert(args.into()),
                cli.config_path.as_deref(),
            )
            .await
        }
        Some(Commands::Currencies) => {
            naverfx::run_command(naverfx::AppCommand::Currencies, cli.config_path.as_deref()).await
        }
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
