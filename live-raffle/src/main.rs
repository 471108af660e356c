use dotenvy::dotenv;
use env_logger::Env;
use live_raffle::{config::Config, live::bridge::WebcastBridge};
use log::error;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(error) => {
            error!("Invalid configuration: {error}");
            return ExitCode::FAILURE;
        }
    };

    let connector = WebcastBridge::new(config.live_bridge_url.clone());
    if let Err(error) = live_raffle::listen(config, connector).await {
        error!("{error}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
