// ABOUTME: Main entry point for the qrpack command-line tool
// ABOUTME: Parses arguments, loads config, dispatches subcommands, and maps errors to exit codes

use anyhow::Result;
use clap::{CommandFactory, Parser};
use qrpack_cli::cli::{Cli, Commands};
use qrpack_cli::cli_output::CliOutput;
use qrpack_cli::commands::{CommandRunner, DecodeArgs, EncodeArgs, QrArgs};
use qrpack_cli::completions::generate_completions;
use qrpack_cli::config::Config;
use qrpack_cli::constants::exit_codes;

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    if let Commands::Completions { shell } = cli.command {
        generate_completions(shell, &mut Cli::command(), &mut std::io::stdout());
        return Ok(());
    }

    let config = Config::load(cli.config.as_deref())?;
    log::debug!("Resolved config: {:?}", config);
    let runner = CommandRunner::new(config, CliOutput::new(cli.no_color));

    match cli.command {
        Commands::Encode {
            text,
            images,
            output_dir,
            qr,
            qr_output,
            quiet,
        } => {
            runner
                .encode(EncodeArgs {
                    text,
                    images,
                    output_dir,
                    qr,
                    qr_output,
                    quiet,
                })
                .await
        }
        Commands::Qr {
            payload,
            input,
            output,
            size,
            margin,
            format,
        } => {
            runner
                .qr(QrArgs {
                    payload,
                    input,
                    output,
                    size,
                    margin,
                    format,
                })
                .await
        }
        Commands::Decode {
            payload,
            input,
            output_dir,
            json,
        } => runner.decode(DecodeArgs {
            payload,
            input,
            output_dir,
            json,
        }),
        Commands::Completions { .. } => Ok(()),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let no_color = cli.no_color;

    let code = match run(cli).await {
        Ok(()) => exit_codes::SUCCESS,
        Err(err) => CliOutput::new(no_color).report(&err),
    };

    std::process::exit(code);
}
