use std::process::ExitCode;

use clap::Parser;
use log::{error, info};
use stockview_core::{StooqConfig, StooqFetcher};
use stockview_web::cli::Args;
use stockview_web::{router, ServerError};

#[tokio::main]
async fn main() -> ExitCode {
    init_logger();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}

async fn run() -> Result<(), ServerError> {
    let args = Args::parse();
    let config = args.stooq_config(StooqConfig::from_env());
    let addr = args.bind_addr();

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.clone(),
            source,
        })?;

    info!(
        "stockview listening on {addr} (upstream {}, timeout {} ms)",
        config.base_url, config.timeout_ms
    );

    axum::serve(listener, router(StooqFetcher::new(config)))
        .await
        .map_err(ServerError::Serve)
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
