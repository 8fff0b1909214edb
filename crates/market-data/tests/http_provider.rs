//! HttpDataProvider against a one-shot local HTTP server.

use std::time::Duration;

use tickerlens_market_data::{
    DataProvider, Granularity, HttpDataProvider, HttpProviderConfig, Lookup, MarketDataError,
    PriceQuery,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Serve exactly one response, then report the request line that was received.
async fn serve_once(status: &str, body: &str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}/api", listener.local_addr().unwrap());
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        loop {
            let n = socket.read(&mut buf).await.unwrap();
            request.extend_from_slice(&buf[..n]);
            if n == 0 || request.windows(4).any(|w| w == b"\r\n\r\n") {
                break;
            }
        }
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();

        String::from_utf8_lossy(&request)
            .lines()
            .next()
            .unwrap_or_default()
            .to_string()
    });

    (base_url, handle)
}

fn provider(base_url: String) -> HttpDataProvider {
    HttpDataProvider::new(HttpProviderConfig {
        base_url,
        timeout: Duration::from_secs(5),
        ..Default::default()
    })
}

#[tokio::test]
async fn search_decodes_results_envelope() {
    let body = r#"{"results":[{"symbol":"TCS","name":"Tata Consultancy Services","exchange":"NSE","sector":"IT Services"}]}"#;
    let (base_url, server) = serve_once("200 OK", body).await;

    let results = provider(base_url).search("tcs", 8).await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].symbol, "TCS");
    assert_eq!(results[0].sector, "IT Services");

    let request_line = server.await.unwrap();
    assert_eq!(request_line, "GET /api/search?keyword=tcs&length=8 HTTP/1.1");
}

#[tokio::test]
async fn search_accepts_data_envelope_and_missing_optional_fields() {
    let body = r#"{"data":[{"symbol":"INFY","name":"Infosys Limited"}]}"#;
    let (base_url, _server) = serve_once("200 OK", body).await;

    let results = provider(base_url).search("inf", 8).await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].exchange, "");
    assert_eq!(results[0].sector, "");
}

#[tokio::test]
async fn movers_accepts_bare_array() {
    let body = r#"[{"symbol":"RELIANCE","name":"Reliance Industries","price":2456.75,"change":45.3,"changePercent":1.88}]"#;
    let (base_url, server) = serve_once("200 OK", body).await;

    let movers = provider(base_url).movers().await.unwrap();
    assert_eq!(movers.len(), 1);
    assert_eq!(movers[0].change_percent, 1.88);

    assert_eq!(
        server.await.unwrap(),
        "GET /api/index/NIFTY/movers/ HTTP/1.1"
    );
}

#[tokio::test]
async fn unrecognized_envelope_is_empty() {
    let (base_url, _server) = serve_once("200 OK", r#"{"status":"ok"}"#).await;

    let movers = provider(base_url).movers().await.unwrap();
    assert!(movers.is_empty());
}

#[tokio::test]
async fn prices_decode_iso_timestamps() {
    let body = r#"{"prices":[
        {"timestamp":"2024-03-01T09:15:00Z","open":100.0,"high":101.0,"low":99.0,"close":100.5,"volume":1200},
        {"timestamp":"2024-03-01T09:30:00Z","open":100.5,"high":102.0,"low":100.0,"close":101.5,"volume":900}
    ]}"#;
    let (base_url, server) = serve_once("200 OK", body).await;

    let query = PriceQuery::new(1, Granularity::Intraday, 50);
    let series = provider(base_url).prices("TCS", &query).await.unwrap();
    assert_eq!(series.len(), 2);
    assert!(series[0].timestamp < series[1].timestamp);
    assert_eq!(series[1].close, 101.5);

    assert_eq!(
        server.await.unwrap(),
        "GET /api/stock/TCS/prices?days=1&type=INTRADAY&limit=50 HTTP/1.1"
    );
}

#[tokio::test]
async fn daily_prices_accept_date_only_timestamps() {
    let body = r#"[
        {"timestamp":"2024-02-29","open":100.0,"high":101.0,"low":99.0,"close":100.5,"volume":1200},
        {"timestamp":"2024-03-01T00:00:00","open":100.5,"high":102.0,"low":100.0,"close":101.5,"volume":900}
    ]"#;
    let (base_url, server) = serve_once("200 OK", body).await;

    let query = PriceQuery::new(5, Granularity::Daily, 5);
    let series = provider(base_url).prices("INFY", &query).await.unwrap();
    assert_eq!(series.len(), 2);
    assert_eq!(series[1].timestamp - series[0].timestamp, chrono::Duration::days(1));

    assert_eq!(
        server.await.unwrap(),
        "GET /api/stock/INFY/prices?days=5&type=DAILY&limit=5 HTTP/1.1"
    );
}

#[tokio::test]
async fn non_success_status_is_status_error() {
    let (base_url, _server) = serve_once("500 Internal Server Error", "{}").await;

    let err = provider(base_url).movers().await.unwrap_err();
    assert!(matches!(
        err,
        MarketDataError::Status {
            operation: Lookup::Movers,
            code: 500
        }
    ));
}

#[tokio::test]
async fn malformed_json_is_transport_error() {
    let (base_url, _server) = serve_once("200 OK", "{not json").await;

    let err = provider(base_url).search("tcs", 8).await.unwrap_err();
    assert!(matches!(
        err,
        MarketDataError::Transport {
            operation: Lookup::Search,
            ..
        }
    ));
}

#[tokio::test]
async fn undecodable_item_is_transport_error() {
    let (base_url, _server) = serve_once("200 OK", r#"{"prices":[{"close":"abc"}]}"#).await;

    let err = provider(base_url)
        .prices("TCS", &PriceQuery::default())
        .await
        .unwrap_err();
    assert!(matches!(err, MarketDataError::Transport { .. }));
}

#[tokio::test]
async fn unreachable_upstream_is_transport_error() {
    // Nothing listens on port 1 on loopback
    let err = provider("http://127.0.0.1:1".to_string())
        .movers()
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        MarketDataError::Transport {
            operation: Lookup::Movers,
            ..
        }
    ));
}

#[tokio::test]
async fn whitespace_keyword_never_reaches_upstream() {
    let results = provider("http://127.0.0.1:1".to_string())
        .search("   ", 8)
        .await
        .unwrap();
    assert!(results.is_empty());
}
