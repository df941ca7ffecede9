use std::process::ExitCode;

use clap::Parser;
use quiz_export::config::{Cli, Command, ExportArgs, DEFAULT_LOG_FILTER};
use quiz_export::{export_from_json, server};
use tracing::error;
use tracing_subscriber::EnvFilter;

fn init_tracing(filter: &str) {
    let env_filter =
        EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt().with_env_filter(env_filter).init();
}

fn run_export(args: &ExportArgs) -> Result<(), quiz_export::QuizExportError> {
    let artifact = export_from_json(&args.questions, &args.platform, &args.export_settings())?;
    println!("{}", artifact.path.display());
    println!("Import it at {}", artifact.platform.import_url());
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli.log);

    let result: Result<(), Box<dyn std::error::Error>> = match cli.command {
        Command::Serve(args) => server::run(args.into()).await,
        Command::Export(args) => run_export(&args).map_err(Into::into),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
