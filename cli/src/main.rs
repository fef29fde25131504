mod action;
mod config;
mod error;
mod render;
mod router;
mod transport;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::{ArgAction, Args, CommandFactory, Parser, Subcommand};

use error::{exit, CliError};
use router::Invocation;

/// Command-line front end of the EBR flow scheduler.
#[derive(Parser)]
#[command(name = "ebr", author, version, about, long_about = None)]
#[command(arg_required_else_help = true)]
struct Cli {
    /// Config file (defaults to <install dir>/conf/config.json)
    #[arg(short, long, env = "EBR_CONFIG", global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Request timeout in seconds, overrides http.timeout_secs
    #[arg(long, global = true, value_name = "SECS")]
    timeout: Option<u64>,

    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show flow's info then exit, all flows when -f is omitted
    Show(TargetArg),
    /// Run the specified flow then exit
    #[command(alias = "run")]
    Start(TargetArg),
    /// Try to abort the specified flow then exit
    Abort(TargetArg),
}

#[derive(Args)]
struct TargetArg {
    /// Flow url, e.g. /FLOW-1
    #[arg(short = 'f', long = "flow", short_alias = 't', value_name = "URL")]
    flow: Option<String>,
}

impl Cli {
    fn into_invocation(self) -> Invocation {
        let (verb, target) = match self.command {
            Commands::Show(t) => ("show", t),
            Commands::Start(t) => ("start", t),
            Commands::Abort(t) => ("abort", t),
        };
        Invocation {
            verb: verb.to_string(),
            flow: target.flow,
            config: self.config,
            timeout_secs: self.timeout,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => return parse_failure(err),
    };

    if let Err(e) = setup_logging(cli.verbose) {
        eprintln!("[WARN] logging unavailable: {}", e);
    }

    match router::dispatch(cli.into_invocation()).await {
        Ok(report) => {
            println!("{}", report);
            ExitCode::from(exit::NORMAL)
        }
        Err(e) => {
            eprintln!("[ERROR] {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

fn parse_failure(err: clap::Error) -> ExitCode {
    match err.kind() {
        ErrorKind::DisplayHelp
        | ErrorKind::DisplayVersion
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
            let _ = err.print();
            ExitCode::from(exit::NORMAL)
        }
        ErrorKind::MissingSubcommand => {
            eprintln!("{}", Cli::command().render_help());
            ExitCode::from(exit::NORMAL)
        }
        ErrorKind::InvalidSubcommand => {
            let name = match err.get(ContextKind::InvalidSubcommand) {
                Some(ContextValue::String(s)) => s.clone(),
                _ => String::new(),
            };
            let e = CliError::UnknownCommand(name);
            eprintln!("[ERROR] {}", e);
            ExitCode::from(e.exit_code())
        }
        _ => {
            let _ = err.print();
            ExitCode::from(exit::COMMAND_ERROR)
        }
    }
}

fn setup_logging(verbose: u8) -> anyhow::Result<()> {
    let level = std::env::var("EBR_LOG")
        .ok()
        .and_then(|l| l.parse::<log::LevelFilter>().ok())
        .unwrap_or(match verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        });

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}][{}][{}] {}",
                chrono::Local::now().format("%Y-%m-%d][%H:%M:%S"),
                record.target(),
                record.level(),
                message
            ))
        })
        .level(level)
        .level_for("hyper", log::LevelFilter::Warn)
        .level_for("reqwest", log::LevelFilter::Warn)
        .chain(std::io::stderr())
        .apply()?;

    Ok(())
}
