mod commands;
mod helpers;

use clap::Parser;
use photodeck_core::domain::DeckError;

pub fn run_from_env() -> i32 {
    let args: Vec<String> = std::env::args().collect();

    match parse_and_dispatch(args) {
        Ok(code) => code,
        Err(error) => {
            let deck_error = error.as_deck_error();
            eprintln!("{}", deck_error.diagnostic_line());
            deck_error.exit_code()
        }
    }
}

fn parse_and_dispatch(args: Vec<String>) -> Result<i32, CliError> {
    match Cli::try_parse_from(&args) {
        Ok(cli) => dispatch_parsed(cli.command),
        Err(err) => match err.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                print!("{}", err);
                Ok(0)
            }
            _ => Err(CliError::Usage(err.to_string())),
        },
    }
}

#[derive(Parser)]
#[command(name = "photodeck", about = "Photodeck presentation compute shell")]
struct Cli {
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(clap::Subcommand)]
enum CliCommand {
    /// Compute the deck report and write chart artifacts
    Render(commands::RenderArgs),
    /// Fit sample pairs with ordinary least squares
    Fit(commands::FitArgs),
    /// Compute the apparent quantum yield breakdown
    Aqy(commands::AqyArgs),
    /// Replay a navigation event trace through the state machine
    NavTrace(commands::NavTraceArgs),
}

fn dispatch_parsed(command: CliCommand) -> Result<i32, CliError> {
    match command {
        CliCommand::Render(args) => commands::run_render_command(args),
        CliCommand::Fit(args) => commands::run_fit_command(args),
        CliCommand::Aqy(args) => commands::run_aqy_command(args),
        CliCommand::NavTrace(args) => commands::run_nav_trace_command(args),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("{0}")]
    Compute(DeckError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl CliError {
    fn as_deck_error(&self) -> DeckError {
        match self {
            Self::Usage(message) => DeckError::input_validation("INPUT.CLI_USAGE", message.clone()),
            Self::Compute(error) => error.clone(),
            Self::Internal(error) => DeckError::internal("SYS.CLI", format!("{error:#}")),
        }
    }
}
