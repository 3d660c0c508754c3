use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};

use args::{Args, Command};
use clap::Parser;
use config::Config;
use loadtest::LoadTestConfig;
use server::ServeConfig;
use tokio_util::sync::CancellationToken;

mod args;
mod logger;
mod setup;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is normal; variables may come from the environment.
    let dotenv = dotenvy::dotenv();

    let args = Args::parse();
    let config = args.config()?;

    logger::init(&args);

    match dotenv {
        Ok(path) => log::debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => log::debug!("No .env file found"),
        Err(e) => log::warn!("Failed to read .env file: {e}"),
    }

    let shutdown_signal = CancellationToken::new();
    spawn_ctrl_c(shutdown_signal.clone());

    match args.command {
        None | Some(Command::Serve) => {
            config.validate()?;

            if let Err(e) = server::serve(serve_config(&args, config, shutdown_signal)).await {
                log::error!("Server failed to start: {e}");
                std::process::exit(1);
            }
        }
        Some(Command::Setup { ref output }) => setup::run(&config, output).await?,
        Some(Command::Loadtest {
            ref host,
            users,
            spawn_rate,
            run_time,
        }) => {
            let loadtest = LoadTestConfig {
                run_time,
                ..LoadTestConfig::new(host.as_str(), users, spawn_rate)
            };

            let summary = loadtest::run(loadtest, shutdown_signal).await?;
            println!("{summary}");
        }
    }

    Ok(())
}

fn spawn_ctrl_c(shutdown_signal: CancellationToken) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                log::info!("Shutdown requested, finishing in-flight requests");
                shutdown_signal.cancel();
            }
            Err(e) => log::error!("Failed to listen for Ctrl+C: {e}"),
        }
    });
}

fn serve_config(args: &Args, config: Config, shutdown_signal: CancellationToken) -> ServeConfig {
    let listen_address = args
        .listen_address
        .or(config.server.listen_address)
        .unwrap_or(SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, 8000)));

    ServeConfig {
        listen_address,
        config,
        shutdown_signal,
    }
}
