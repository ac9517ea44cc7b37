use clap::Parser;
use newswire::{config::Args, Config};

#[tokio::main]
async fn main() -> std::process::ExitCode {
    let args = Args::parse();

    let config = match Config::load(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("invalid configuration: {}", e.user_message());
            return std::process::ExitCode::FAILURE;
        }
    };

    // If --validate flag is set, exit successfully after config validation
    if args.validate {
        println!("Configuration is valid.");
        return std::process::ExitCode::SUCCESS;
    }

    if let Err(e) = newswire::telemetry::init_telemetry() {
        eprintln!("{e}");
        return std::process::ExitCode::FAILURE;
    }

    let Some(command) = args.command else {
        eprintln!("no subcommand given; try --help");
        return std::process::ExitCode::FAILURE;
    };

    match newswire::cli::run(config, command).await {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            e.log();
            eprintln!("{}", e.user_message());
            std::process::ExitCode::FAILURE
        }
    }
}
