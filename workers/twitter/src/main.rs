#![allow(clippy::module_name_repetitions)]

use std::io;

use eyre::{Result, WrapErr};
use render::{HttpTranscoder, PassthroughTranscoder, Transcoder};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::worker::Relay;

mod config;
mod twitter;
mod worker;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    // Stdout carries the relayed messages.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let config = Config::from_env().wrap_err("Failed to load config")?;

    let transcoder: Box<dyn Transcoder> = match &config.transcoder_url {
        Some(endpoint) => {
            info!(%endpoint, "Transcoding videos");
            Box::new(HttpTranscoder::new(
                endpoint.clone(),
                config.transcoder_timeout,
            )?)
        }
        None => Box::new(PassthroughTranscoder),
    };

    Relay::new(config, transcoder, io::stdout()).run().await;

    Ok(())
}
