use clap::Parser;
use tracing::debug;
use vpnwatch::app::{handle_fatal_error, init_logging, AppConfig};
use vpnwatch::cli::{execute_command, Cli};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let app = AppConfig::new(cli.verbose).with_config_path(cli.config);
    init_logging(&app);

    match execute_command(cli.command, &app).await {
        Ok(code) => {
            debug!("Exiting with status {}", code);
            std::process::exit(code)
        }
        Err(e) => handle_fatal_error(e, app.verbose),
    }
}
