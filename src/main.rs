use clap::Parser;
use colored::Colorize;

use combs_of_honey::cli::{Cli, Commands, ConfigCommands};
use combs_of_honey::config::StaticConfig;
use combs_of_honey::runtime::modes;
use combs_of_honey::system::init_logging;

#[actix_web::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Config {
            action: ConfigCommands::Generate { output_path },
        }) => {
            if let Err(e) = modes::config_generate(output_path) {
                eprintln!("{}", e.format_colored());
                std::process::exit(1);
            }
        }
        Some(Commands::Serve) | None => {
            let config = match StaticConfig::load(cli.config.as_deref()) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("{}", e.format_colored());
                    std::process::exit(1);
                }
            };

            // guard 必须存活到进程结束
            let guard = match init_logging(&config.logging, &config.tracing) {
                Ok(guard) => guard,
                Err(e) => {
                    eprintln!("{}", e.format_colored());
                    std::process::exit(1);
                }
            };

            let result = modes::run_server(&config).await;
            guard.shutdown().await;

            if let Err(e) = result {
                eprintln!("{} {:#}", "[ERROR]".red().bold(), e);
                std::process::exit(1);
            }
        }
    }
}
