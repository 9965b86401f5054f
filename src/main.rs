use a1_rapp::utils::{logger, validation::Validate};
use a1_rapp::{app, CliArgs, RappConfig};
use anyhow::Context;
use clap::Parser;
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    // 初始化日誌
    logger::init_logger(args.verbose, args.json_logs);

    // 設定只在啟動時讀一次，錯誤在 bind 之前就結束程式
    let config = match RappConfig::from_env().and_then(|c| c.validate().map(|_| c)) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };
    if args.verbose {
        tracing::debug!("Config: {:?}", config);
    }

    let config = Arc::new(config);
    let addr = format!("{}:{}", args.bind, config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    tracing::info!(
        "rApp starting on {} (service={} ric={} policy={})",
        addr,
        config.service_id,
        config.ric_id,
        config.policy_id
    );

    let running = app::launch(config, listener, app::shutdown_signal())?;

    running
        .server
        .await
        .context("HTTP server task panicked")??;

    tracing::info!(
        "rApp stopped (startup state: {})",
        running.startup.current()
    );
    Ok(())
}
