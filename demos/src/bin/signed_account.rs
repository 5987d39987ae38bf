//! Demo 2: Signed Account Queries
//!
//! Showcases: Credential upgrade, signed GET requests, error normalization
//!
//! Run: BINANCE_API_KEY=... BINANCE_API_SECRET=... cargo run --bin signed_account

use binance_rest::{BinanceRestClient, Credentials, OrderSide, OrderType, Params, RestError, TimeInForce};
use colored::*;
use rust_decimal_macros::dec;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("{}", "═".repeat(60).cyan());
    println!("{}", "  SIGNED ACCOUNT QUERIES".cyan().bold());
    println!("{}", "═".repeat(60).cyan());
    println!();

    let client = BinanceRestClient::new()?;

    // Private calls fail locally until credentials are installed
    match client.account_info().await {
        Err(RestError::AuthRequired) => {
            println!("{} Unauthenticated call rejected before sending", "✓".green())
        }
        other => println!("{} Unexpected result: {:?}", "✗".red(), other),
    }

    let credentials = match Credentials::from_env() {
        Ok(credentials) => credentials,
        Err(e) => {
            println!("{} {}", "✗".red(), e);
            println!("  Set BINANCE_API_KEY and BINANCE_API_SECRET to continue.");
            return Ok(());
        }
    };
    println!("{} Loaded {:?}", "✓".green(), credentials);
    client.upgrade(credentials);

    let account = client.account_info().await?;
    println!("\n{}", "Non-zero balances:".bold());
    if let Some(balances) = account.data["balances"].as_array() {
        for balance in balances {
            let free = balance["free"].as_str().unwrap_or("0");
            let locked = balance["locked"].as_str().unwrap_or("0");
            if free.trim_matches(|c| c == '0' || c == '.').is_empty()
                && locked.trim_matches(|c| c == '0' || c == '.').is_empty()
            {
                continue;
            }
            println!(
                "  {:<8} free {:<18} locked {}",
                balance["asset"].as_str().unwrap_or("?"),
                free,
                locked
            );
        }
    }

    let open = client
        .trading()
        .open_orders(Some(&Params::new().with("symbol", "BTCUSDT")))
        .await?;
    println!(
        "\n{} Open BTCUSDT orders: {}",
        "✓".green(),
        open.data.as_array().map_or(0, Vec::len)
    );

    // Validated by the matching engine rules but never placed
    let order = Params::new()
        .with("symbol", "BTCUSDT")
        .with("side", OrderSide::Buy)
        .with("type", OrderType::Limit)
        .with("timeInForce", TimeInForce::GoodTillCancelled)
        .with("quantity", dec!(0.001))
        .with("price", dec!(1000));

    match client.trading().test_order(&order).await {
        Ok(_) => println!("{} Test order accepted", "✓".green()),
        Err(e) => {
            let code = e
                .exchange_code()
                .map(|c| c.to_string())
                .unwrap_or_else(|| "-".to_string());
            println!("{} Test order rejected: {} (code {})", "✗".red(), e, code);
        }
    }

    Ok(())
}
