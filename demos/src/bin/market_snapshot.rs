//! Demo 1: Market Snapshot
//!
//! Showcases: Public endpoints, typed payloads, decimal spread math
//!
//! Run: cargo run --bin market_snapshot

use binance_rest::{BinanceRestClient, BookTicker, KlineInterval, Params, PriceTicker};
use colored::*;
use tracing_subscriber::EnvFilter;

const SYMBOLS: [&str; 3] = ["BTCUSDT", "ETHUSDT", "BNBUSDT"];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("{}", "═".repeat(60).cyan());
    println!("{}", "  MARKET SNAPSHOT".cyan().bold());
    println!("{}", "═".repeat(60).cyan());
    println!();

    let client = BinanceRestClient::new()?;

    let time = client.server_time().await?;
    println!("{} Server time: {}", "✓".green(), time.server_time);

    let prices: Vec<PriceTicker> = client.market().all_prices().await?.json()?;
    let books: Vec<BookTicker> = client.market().all_book_tickers().await?.json()?;
    println!(
        "{} {} symbols listed\n",
        "✓".green(),
        prices.len().to_string().bold()
    );

    for symbol in SYMBOLS {
        let Some(book) = books.iter().find(|b| b.symbol == symbol) else {
            println!("  {} {} not listed", "✗".red(), symbol);
            continue;
        };
        let last = prices
            .iter()
            .find(|p| p.symbol == symbol)
            .map(|p| p.price.to_string())
            .unwrap_or_else(|| "-".to_string());

        println!(
            "  {:<10} {} {:<14} {} {:<14} {} {:<14} {} {}",
            symbol.bold(),
            "LAST:".yellow(),
            last,
            "BID:".yellow(),
            book.bid_price,
            "ASK:".yellow(),
            book.ask_price,
            "SPREAD:".green(),
            book.spread_bps()
                .map(|bps| format!("{:.2} bps", bps))
                .unwrap_or_else(|| "-".to_string()),
        );
    }
    println!();

    let candles = client
        .market()
        .candles(
            &Params::new()
                .with("symbol", SYMBOLS[0])
                .with("interval", KlineInterval::H1)
                .with("limit", 5u32),
        )
        .await?;
    println!("{} Last 5 hourly candles for {}:", "✓".green(), SYMBOLS[0]);
    if let Some(rows) = candles.data.as_array() {
        for row in rows {
            println!(
                "  open {} high {} low {} close {}",
                row[1], row[2], row[3], row[4]
            );
        }
    }

    Ok(())
}
