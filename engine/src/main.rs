// Sisuu interview service
// Main entry point for the sisuu binary

use clap::Parser;
use sisuu_engine::cli::{Cli, Command};
use sisuu_engine::config::Config;
use sisuu_engine::handlers::{handle_doctor, handle_questions, handle_serve, OutputFormat};
use sisuu_engine::telemetry::init_telemetry_with_level;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };

    // Needs no configuration, so it works before anything is set up
    if let Command::Questions = cli.command {
        return handle_questions(format);
    }

    let mut config = Config::load(cli.config.as_deref())?;

    init_telemetry_with_level(cli.log.as_deref().unwrap_or(&config.core.log_level));

    let version = env!("CARGO_PKG_VERSION");
    let commit = env!("GIT_COMMIT_HASH");
    let timestamp = env!("BUILD_TIMESTAMP");

    tracing::info!("Sisuu v{} ({} - {})", version, commit, timestamp);

    match cli.command {
        Command::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            handle_serve(&config).await
        }

        Command::Doctor => handle_doctor(&config, format),

        Command::Questions => handle_questions(format),
    }
}
