use crate::demo::{run_assess, run_criteria, run_demo, AssessArgs, CriteriaArgs};
use crate::server;
use carbon_market::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "Carbon Market Eligibility Service",
    about = "Assess renewable-energy projects for carbon-credit eligibility",
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
    /// Assess one project or an array of projects from a JSON file
    Assess(AssessArgs),
    /// Print the hard-fail conditions and soft signals used by the assessment
    Criteria(CriteriaArgs),
    /// Walk through a set of illustrative projects and their verdicts
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
        Command::Assess(args) => run_assess(args),
        Command::Criteria(args) => run_criteria(args),
        Command::Demo => {
            run_demo();
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_serve_without_subcommand() {
        let cli = Cli::try_parse_from(["carbon-market-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_assess_arguments() {
        let cli = Cli::try_parse_from([
            "carbon-market-api",
            "assess",
            "--input",
            "projects.json",
            "--format",
            "json",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Assess(args)) => {
                assert_eq!(args.input.to_string_lossy(), "projects.json");
                assert_eq!(args.format, crate::infra::OutputFormat::Json);
            }
            other => panic!("expected assess command, got {other:?}"),
        }
    }
}
