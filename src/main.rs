use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

mod config;
mod repl;

/// figya is a terminal calculator with unit conversions and persistent
/// variables.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Evaluates a single expression, prints its result and exits.
    #[arg(short, long, value_name = "EXPR")]
    eval: Option<String>,

    /// Shows what figya is and exits.
    #[arg(long)]
    about: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::builder().with_default_directive(LevelFilter::WARN.into())
                                                                  .from_env_lossy())
                             .with_writer(std::io::stderr)
                             .init();

    let args = Args::parse();

    if args.about {
        println!("figya {}", env!("CARGO_PKG_VERSION"));
        println!("{}", env!("CARGO_PKG_DESCRIPTION"));
        return ExitCode::SUCCESS;
    }

    let config = match config::load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e:#}");
            return ExitCode::FAILURE;
        },
    };

    if let Some(expr) = args.eval {
        let workspaces = figya::persistence::Workspaces::new(config.data_dir());
        let mut session = repl::Session::new(workspaces, false);
        return match session.eval_once(&expr) {
            Ok(Some(line)) => {
                println!("{line}");
                ExitCode::SUCCESS
            },
            Ok(None) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("error: {e}");
                ExitCode::FAILURE
            },
        };
    }

    if let Err(e) = repl::run(&config) {
        eprintln!("error: {e:#}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
