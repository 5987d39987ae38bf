//! Endpoint routing tests for the client facade
//!
//! Run with: cargo test -p binance-rest --test client_tests

use binance_auth::FixedClock;
use binance_rest::config::API_KEY_HEADER;
use binance_rest::transport::MockTransport;
use binance_rest::{
    Agent, AgentConfig, BinanceRestClient, BookTicker, Credentials, KlineInterval, Method,
    OrderSide, OrderType, Params, RequestDescriptor, RestError, TimeInForce,
};
use rust_decimal_macros::dec;
use serde_json::json;
use std::sync::Arc;

fn last(transport: &MockTransport) -> RequestDescriptor {
    transport.last_request().expect("no request recorded")
}

fn client() -> (BinanceRestClient, Arc<MockTransport>) {
    let transport = Arc::new(MockTransport::new());
    let agent = Agent::with_transport(AgentConfig::default(), transport.clone())
        .unwrap()
        .with_clock(FixedClock::new(1_600_000_000_000));
    (BinanceRestClient::from_agent(agent), transport)
}

fn authed_client() -> (BinanceRestClient, Arc<MockTransport>) {
    let (client, transport) = client();
    client.upgrade(Credentials::new("pk", "sk"));
    (client, transport)
}

#[tokio::test]
async fn test_market_routes() {
    let (client, transport) = client();
    let market = client.market();
    let symbol = Params::new().with("symbol", "BNBBTC");

    market.ping().await.unwrap();
    assert_eq!(last(&transport).url, "/ping?");

    market.order_book(&symbol.clone().with("limit", 5u32)).await.unwrap();
    assert_eq!(last(&transport).url, "/depth?symbol=BNBBTC&limit=5");

    market.agg_trades(&symbol).await.unwrap();
    assert_eq!(last(&transport).url, "/aggTrades?symbol=BNBBTC");

    market
        .candles(&symbol.clone().with("interval", KlineInterval::H1))
        .await
        .unwrap();
    assert_eq!(last(&transport).url, "/klines?symbol=BNBBTC&interval=1h");

    market.daily_stats(None).await.unwrap();
    assert_eq!(last(&transport).url, "/ticker/24hr?");

    market.all_prices().await.unwrap();
    assert_eq!(last(&transport).url, "/ticker/price?");

    market.all_book_tickers().await.unwrap();
    let request = last(&transport);
    assert_eq!(request.url, "/ticker/bookTicker?");
    assert_eq!(request.method, Method::GET);
    assert!(request.header(API_KEY_HEADER).is_none());
}

#[tokio::test]
async fn test_typed_payloads() {
    let (client, transport) = client();
    transport.push_json(json!([
        {"symbol": "BTCUSDT", "bidPrice": "100.0", "bidQty": "1", "askPrice": "100.5", "askQty": "2"}
    ]));

    let response = client.market().all_book_tickers().await.unwrap();
    let tickers: Vec<BookTicker> = response.json().unwrap();
    assert_eq!(tickers[0].mid_price(), dec!(100.25));
}

#[tokio::test]
async fn test_trading_routes() {
    let (client, transport) = authed_client();
    let order = Params::new()
        .with("symbol", "BTCUSDT")
        .with("side", OrderSide::Buy)
        .with("type", OrderType::Limit)
        .with("timeInForce", TimeInForce::GoodTillCancelled)
        .with("quantity", dec!(0.001))
        .with("price", dec!(25000.50));

    client.new_order(&order).await.unwrap();
    let request = last(&transport);
    assert_eq!(request.method, Method::POST);
    assert_eq!(request.url, "/order");
    assert!(request.data.unwrap().starts_with(
        "symbol=BTCUSDT&side=BUY&type=LIMIT&timeInForce=GTC&quantity=0.001&price=25000.50&timestamp="
    ));

    client.trading().test_order(&order).await.unwrap();
    assert_eq!(last(&transport).url, "/order/test");

    let lookup = Params::new().with("symbol", "BTCUSDT").with("orderId", 42u64);
    client.trading().query_order(&lookup).await.unwrap();
    let request = last(&transport);
    assert_eq!(request.method, Method::GET);
    assert!(request.url.starts_with("/order?symbol=BTCUSDT&orderId=42&timestamp="));
    assert!(request.data.is_none());

    client.cancel_order(&lookup).await.unwrap();
    let request = last(&transport);
    assert_eq!(request.method, Method::DELETE);
    assert_eq!(request.url, "/order");

    client.trading().open_orders(None).await.unwrap();
    assert!(last(&transport).url.starts_with("/openOrders?timestamp="));

    client.trading().all_orders(&lookup).await.unwrap();
    assert!(last(&transport).url.starts_with("/allOrders?symbol=BTCUSDT"));
}

#[tokio::test]
async fn test_account_routes() {
    let (client, transport) = authed_client();

    client.account_info().await.unwrap();
    let request = last(&transport);
    assert!(request.url.starts_with("/account?timestamp=1600000000000&recvWindow=5000&signature="));
    assert_eq!(request.header(API_KEY_HEADER), Some("pk"));

    client
        .account()
        .my_trades(&Params::new().with("symbol", "ETHBTC"))
        .await
        .unwrap();
    assert!(last(&transport).url.starts_with("/myTrades?symbol=ETHBTC&timestamp="));
}

#[tokio::test]
async fn test_funding_routes_use_wallet_base() {
    let (client, transport) = authed_client();
    let funding = client.funding();

    funding
        .withdraw(
            &Params::new()
                .with("asset", "BTC")
                .with("address", "1BoatSLRHtKNngkdXEeobR76b53LETtpyT")
                .with("amount", dec!(0.5)),
        )
        .await
        .unwrap();
    let request = last(&transport);
    assert_eq!(request.base_url, "https://api.binance.com/wapi/v3");
    assert_eq!(request.url, "/withdraw.html");
    assert_eq!(request.method, Method::POST);

    funding.deposit_history(None).await.unwrap();
    assert!(last(&transport).url.starts_with("/depositHistory.html?timestamp="));

    funding.withdraw_history(None).await.unwrap();
    assert!(last(&transport).url.starts_with("/withdrawHistory.html?timestamp="));

    funding
        .deposit_address(&Params::new().with("asset", "BNB"))
        .await
        .unwrap();
    let request = last(&transport);
    assert!(request
        .full_url()
        .starts_with("https://api.binance.com/wapi/v3/depositAddress.html?asset=BNB&"));
}

#[tokio::test]
async fn test_private_groups_require_upgrade() {
    let (client, transport) = client();
    let params = Params::new().with("symbol", "BTCUSDT");

    let denied = Err(RestError::AuthRequired);
    assert_eq!(client.trading().new_order(&params).await, denied);
    assert_eq!(client.account().my_trades(&params).await, denied);
    assert_eq!(client.funding().deposit_history(None).await, denied);
    assert!(transport.call_count() == 0);

    client.upgrade(Credentials::new("pk", "sk"));
    assert!(client.trading().new_order(&params).await.is_ok());
}

#[test]
fn test_sign_message_matches_documented_vector() {
    let (client, _) = client();
    let secret = "NhqPtmdSJYdKjVHjA7PZj4Mge3R5YNiP1e3UZjInClVN65XAbvqqM6A7H5fATj0j";
    let body = Params::new()
        .with("symbol", "LTCBTC")
        .with("side", "BUY")
        .with("type", "LIMIT")
        .with("timeInForce", "GTC")
        .with("quantity", 1u32)
        .with("price", "0.1")
        .with("recvWindow", 5000u32)
        .with("timestamp", 1_499_827_319_559u64);

    // Caller-supplied timestamp is overwritten by the signer's clock
    let signed = client.sign_message(&body, secret);
    assert_eq!(
        signed.body.get("timestamp").unwrap().to_string(),
        "1600000000000"
    );
    assert!(signed
        .query_string()
        .ends_with(&format!("&signature={}", signed.digest)));

    let agent = Agent::with_transport(AgentConfig::default(), Arc::new(MockTransport::new()))
        .unwrap()
        .with_clock(FixedClock::new(1_499_827_319_559));
    assert_eq!(
        agent.sign_message(&body, secret).digest,
        "c8db56825ae71d6d79447849e617115f4a920fa2acdcab2b053c4b2838bd6b71"
    );
}
