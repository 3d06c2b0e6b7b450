use crate::demo::{run_batch, run_demo, run_score, BatchArgs, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use gig_trust::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Gig Trust",
    about = "Score gig workers on behavioral signals and serve the results over HTTP",
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
    /// Score a single feature vector without touching the registry
    Score(ScoreArgs),
    /// Score every row of a feature CSV export
    Batch(BatchArgs),
    /// Register the sample workers and walk through their scores
    Demo,
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
        Command::Score(args) => run_score(args),
        Command::Batch(args) => run_batch(args),
        Command::Demo => run_demo(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["gig-trust-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn score_arguments_parse() {
        let cli = Cli::try_parse_from([
            "gig-trust-api",
            "score",
            "--avg-income",
            "28000",
            "--income-variance",
            "0.2",
            "--upi-txn-count",
            "45",
            "--bill-payment-score",
            "9",
            "--withdrawal-ratio",
            "0.4",
            "--months-active",
            "18",
            "--json",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Score(args)) => {
                assert_eq!(args.upi_txn_count, 45);
                assert_eq!(args.months_active, 18);
                assert!(args.json);
            }
            other => panic!("expected score command, got {other:?}"),
        }
    }

    #[test]
    fn batch_requires_a_csv_path() {
        assert!(Cli::try_parse_from(["gig-trust-api", "batch"]).is_err());
    }
}
