use clap::Parser;

use collateral_insights::cli::{Cli, Commands};
use collateral_insights::config::{get_config, init_config, init_config_from};
use collateral_insights::runtime::modes::{run_cli, run_server};
use collateral_insights::system::logging::{Console, init_logging, init_logging_to};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    match cli.config.as_deref() {
        Some(path) => init_config_from(path),
        None => init_config(),
    }

    match cli.command {
        None | Some(Commands::Serve) => {
            let config = get_config();
            let _guard = init_logging(&config.logging).map_err(|e| {
                eprintln!("{}", e.format_colored());
                anyhow::anyhow!(e)
            })?;
            run_server().await
        }
        Some(cmd) => {
            let config = get_config();
            let _guard = init_logging_to(&config.logging, Console::Stderr).ok();
            if let Err(e) = run_cli(cmd).await {
                eprintln!("{}", e.format_colored());
                std::process::exit(1);
            }
            Ok(())
        }
    }
}
