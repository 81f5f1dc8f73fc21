use crate::check::{run_batch, run_check, run_steps, BatchArgs, CheckArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use warranty_eligibility::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Legal Warranty Eligibility",
    about = "Decide whether a purchase qualifies for the statutory legal warranty",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Evaluate a single set of answers given as flags
    Check(CheckArgs),
    /// Re-evaluate every session of a saved-answers CSV export
    Batch(BatchArgs),
    /// Print the questionnaire steps with their legal citations
    Steps,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Check(args) => run_check(args),
        Command::Batch(args) => run_batch(args),
        Command::Steps => run_steps(),
    }
}
