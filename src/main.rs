use clap::Parser;

use linkmeter::config::{StaticConfig, args::Args};
use linkmeter::system::init_logging;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();

    if args.generate_config {
        print!("{}", StaticConfig::generate_sample_config());
        return Ok(());
    }

    let config = match StaticConfig::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e.format_colored());
            std::process::exit(1);
        }
    };

    // guard 必须存活到进程结束，否则缓冲中的日志会丢失
    let _guard = match init_logging(&config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("{}", e.format_colored());
            std::process::exit(1);
        }
    };

    run(&config).await
}

#[cfg(feature = "server")]
async fn run(config: &StaticConfig) -> anyhow::Result<()> {
    linkmeter::runtime::modes::run_server(config).await
}

#[cfg(not(feature = "server"))]
async fn run(_config: &StaticConfig) -> anyhow::Result<()> {
    anyhow::bail!("No execution mode enabled. Rebuild with --features server")
}
