//! Demo 3: Request Signing
//!
//! Showcases: Offline HMAC-SHA256 signing with a fixed clock
//!
//! Run: cargo run --bin sign_request

use binance_auth::{FixedClock, Signer};
use binance_rest::Params;
use colored::*;

// Key pair published in the exchange's API documentation
const SECRET: &str = "NhqPtmdSJYdKjVHjA7PZj4Mge3R5YNiP1e3UZjInClVN65XAbvqqM6A7H5fATj0j";
const TIMESTAMP: u64 = 1_499_827_319_559;

fn main() {
    println!("{}", "═".repeat(60).cyan());
    println!("{}", "  REQUEST SIGNING".cyan().bold());
    println!("{}", "═".repeat(60).cyan());
    println!();

    let body = Params::new()
        .with("symbol", "LTCBTC")
        .with("side", "BUY")
        .with("type", "LIMIT")
        .with("timeInForce", "GTC")
        .with("quantity", 1u32)
        .with("price", "0.1");

    let signer = Signer::new().with_clock(FixedClock::new(TIMESTAMP));
    let signed = signer.sign(&body, SECRET);

    println!("{} {}", "BODY:".yellow(), signed.query_string());
    println!("{} {}", "DIGEST:".yellow(), signed.digest.green());
}
