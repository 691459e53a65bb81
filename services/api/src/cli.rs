use crate::commands::{run_score, run_weights, ScoreArgs, WeightsArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use cryptocredit::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "cryptocredit",
    about = "Score blockchain wallets for creditworthiness over HTTP or from the command line",
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
    /// Score a single wallet and print the result as JSON
    Score(ScoreArgs),
    /// Print the active calibration table
    Weights(WeightsArgs),
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
        Command::Score(args) => run_score(args).await,
        Command::Weights(args) => run_weights(args),
    }
}
