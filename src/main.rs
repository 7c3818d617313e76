use abacus::Backend;
use abacus::core::config::{self, CliOverrides};
use abacus::tui;
use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "abacus", about = "Terminal calculator backed by a remote calculator actor")]
struct Args {
    /// Calculator backend to use
    #[arg(short, long, value_enum)]
    backend: Option<Backend>,

    /// Base URL of the calculator server (remote backend only)
    #[arg(short, long)]
    url: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to abacus.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("abacus.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("{e}; falling back to defaults");
        config::AbacusConfig::default()
    });
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            backend: args.backend,
            url: args.url,
        },
    );

    log::info!("Abacus starting up with backend: {:?}", resolved.backend);

    tui::run(resolved).await
}
