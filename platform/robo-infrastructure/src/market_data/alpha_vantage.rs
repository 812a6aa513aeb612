use super::response::{parse_daily_response, ResponseError};
use reqwest::blocking::Client;
use robo_domain::repositories::market_data::{DailyPriceSource, DailyPrices};
use robo_domain::repositories::PortError;
use secrecy::{ExposeSecret, SecretString};
use std::time::{Duration, Instant};
use thiserror::Error;

const DAILY_FUNCTION: &str = "TIME_SERIES_DAILY";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to build http client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {endpoint} failed: {source}")]
    Request {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("provider responded with HTTP {status}")]
    Status { status: u16 },

    #[error("failed to read response body: {0}")]
    Body(#[source] reqwest::Error),

    #[error(transparent)]
    Response(#[from] ResponseError),
}

/// Blocking client for the `TIME_SERIES_DAILY` endpoint. One request per
/// call, no retries.
pub struct AlphaVantageClient {
    base_url: String,
    api_key: SecretString,
    output_size: String,
    timeout_ms: u64,
    client: Client,
}

impl AlphaVantageClient {
    pub fn new(
        base_url: String,
        api_key: SecretString,
        output_size: String,
        timeout_ms: u64,
    ) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self {
            base_url,
            api_key,
            output_size,
            timeout_ms,
            client,
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}/query", self.base_url.trim_end_matches('/'))
    }

    pub fn fetch_daily_prices(&self, symbol: &str) -> Result<DailyPrices, FetchError> {
        let endpoint = self.endpoint();
        let span = tracing::info_span!(
            "infra.alpha_vantage.fetch_daily",
            endpoint = %endpoint,
            symbol = %symbol,
            output_size = %self.output_size,
            timeout_ms = self.timeout_ms
        );
        let _enter = span.enter();

        metrics::counter!("robo.infra.alpha_vantage.requests_total").increment(1);
        let start = Instant::now();
        let result = self.request(&endpoint, symbol);
        metrics::histogram!("robo.infra.alpha_vantage.fetch_ms")
            .record(start.elapsed().as_secs_f64() * 1000.0);

        match &result {
            Ok(prices) => tracing::info!(
                days = prices.series.len(),
                last_refreshed = %prices.last_refreshed,
                "fetched daily prices"
            ),
            Err(err) => {
                metrics::counter!("robo.infra.alpha_vantage.errors_total").increment(1);
                tracing::warn!(error = %err, "daily price fetch failed");
            }
        }
        result
    }

    fn request(&self, endpoint: &str, symbol: &str) -> Result<DailyPrices, FetchError> {
        // reqwest errors print the full URL; strip it so the key never leaks.
        let response = self
            .client
            .get(endpoint)
            .query(&[
                ("function", DAILY_FUNCTION),
                ("symbol", symbol),
                ("outputsize", self.output_size.as_str()),
                ("apikey", self.api_key.expose_secret()),
            ])
            .send()
            .map_err(|err| FetchError::Request {
                endpoint: endpoint.to_string(),
                source: err.without_url(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .map_err(|err| FetchError::Body(err.without_url()))?;
        tracing::debug!(bytes = body.len(), "received response body");
        Ok(parse_daily_response(&body)?)
    }
}

impl DailyPriceSource for AlphaVantageClient {
    fn fetch_daily(&self, symbol: &str) -> Result<DailyPrices, PortError> {
        self.fetch_daily_prices(symbol).map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::sync::mpsc;
    use std::thread;

    fn http_response(status: u16, reason: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        )
    }

    /// Serves one canned response and hands back the raw request it saw.
    fn try_spawn_server(response: String) -> Option<(String, mpsc::Receiver<String>)> {
        let listener = TcpListener::bind("127.0.0.1:0").ok()?;
        let addr = listener.local_addr().ok()?;
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let (mut stream, _) = listener.accept().expect("accept");
            let mut buf = [0u8; 4096];
            let read = stream.read(&mut buf).unwrap_or(0);
            let _ = tx.send(String::from_utf8_lossy(&buf[..read]).to_string());
            stream
                .write_all(response.as_bytes())
                .expect("write response");
        });

        Some((format!("http://{}", addr), rx))
    }

    fn client(base_url: String) -> AlphaVantageClient {
        AlphaVantageClient::new(
            base_url,
            SecretString::new("demo-key".into()),
            "full".to_string(),
            2_000,
        )
        .expect("client")
    }

    const BODY: &str = r#"{
        "Meta Data": {"2. Symbol": "IBM", "3. Last Refreshed": "2024-05-03"},
        "Time Series (Daily)": {
            "2024-05-03": {"1. open": "167.1", "2. high": "168.2", "3. low": "165.8", "4. close": "166.9", "5. volume": "4221011"}
        }
    }"#;

    #[test]
    fn fetch_sends_daily_query_and_parses_body() {
        let Some((base_url, requests)) = try_spawn_server(http_response(200, "OK", BODY)) else {
            eprintln!("skipping: cannot bind local test server");
            return;
        };

        let prices = client(base_url).fetch_daily_prices("IBM").expect("fetch");
        assert_eq!(prices.symbol, "IBM");
        assert_eq!(prices.last_refreshed, "2024-05-03");
        assert_eq!(prices.series.len(), 1);

        let request = requests.recv().expect("request captured");
        let request_line = request.lines().next().unwrap_or_default();
        assert!(request_line.starts_with("GET /query?"));
        assert!(request_line.contains("function=TIME_SERIES_DAILY"));
        assert!(request_line.contains("symbol=IBM"));
        assert!(request_line.contains("outputsize=full"));
        assert!(request_line.contains("apikey=demo-key"));
    }

    #[test]
    fn non_success_status_is_an_error() {
        let Some((base_url, _requests)) =
            try_spawn_server(http_response(503, "Service Unavailable", "{}"))
        else {
            eprintln!("skipping: cannot bind local test server");
            return;
        };

        let err = client(base_url).fetch_daily_prices("IBM").expect_err("503");
        assert!(matches!(err, FetchError::Status { status: 503 }));
    }

    #[test]
    fn error_payload_surfaces_as_api_error() {
        let body = r#"{"Error Message": "Invalid API call."}"#;
        let Some((base_url, _requests)) = try_spawn_server(http_response(200, "OK", body)) else {
            eprintln!("skipping: cannot bind local test server");
            return;
        };

        let err = client(base_url).fetch_daily("OOPS").expect_err("api error");
        assert!(err.to_string().contains("Invalid API call."));
    }

    #[test]
    fn endpoint_trims_trailing_slash() {
        let client = client("https://example.test/".to_string());
        assert_eq!(client.endpoint(), "https://example.test/query");
    }
}
