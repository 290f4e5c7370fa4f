mod args;
mod config;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use args::{Args, Command};
use config::Config;
use finlit_market_data::MarketDataClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = Config::from_env()?;
    init_tracing(&config.log_format);

    let client =
        MarketDataClient::new(config.client).context("Failed to create market data client")?;

    match args.command {
        Command::Quote { symbols } if symbols.len() == 1 => {
            let quote = client.get_quote(&symbols[0]).await?;
            print_json(&quote)?;
        }
        Command::Quote { symbols } => {
            tracing::info!("Fetching {} quotes sequentially", symbols.len());
            let batch = client.get_quotes(symbols.as_slice()).await;
            tracing::info!("{}", batch.summary());
            print_json(&batch)?;
        }
        Command::History { symbol, days } => {
            let points = client.get_history(&symbol, days).await?;
            print_json(&points)?;
        }
        Command::Search { keyword } => {
            let matches = client.search_symbols(&keyword).await?;
            print_json(&matches)?;
        }
    }

    Ok(())
}

fn init_tracing(log_format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    // Logs go to stderr so stdout stays pure JSON
    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false).with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
