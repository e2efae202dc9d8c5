use langpack_inspector::cli;
use langpack_inspector::infra::logging;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    // Parse command line arguments
    let cli_args = cli::parse_args();

    if let Err(e) = logging::init(cli_args.verbose) {
        eprintln!("Warning: {}", e);
    }

    // Process the command
    match cli::process_command(cli_args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
