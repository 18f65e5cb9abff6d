use crate::demo::{run_demo, run_rank, run_validate, DemoArgs, RankArgs, ValidateArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use tender_eval::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Tender Evaluation Service",
    about = "Validate tenders and rank supplier proposals from the command line or over HTTP",
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
    /// Validate a tender definition and list any warnings
    Validate(ValidateArgs),
    /// Rank proposals for a tender from a JSON file or CSV response sheet
    Rank(RankArgs),
    /// Rank the built-in sample tender end to end
    Demo(DemoArgs),
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
        Command::Validate(args) => run_validate(args),
        Command::Rank(args) => run_rank(args),
        Command::Demo(args) => run_demo(args),
    }
}
