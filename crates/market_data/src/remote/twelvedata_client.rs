use async_trait::async_trait;
use common::config::ProviderSettings;
use common::models::{Instrument, Quote, Timeframe};
use reqwest::Client;
use tracing::debug;

use crate::error::FetchError;
use crate::remote::time_series_response::TimeSeriesResponse;
use crate::traits::{QuoteSource, RemoteResponse};

/// REST client for the Twelve Data `time_series` endpoint.
#[derive(Clone)]
pub struct TwelveDataClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl TwelveDataClient {
    pub fn new(settings: &ProviderSettings) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent("forex_signal_api/0.1.0")
            .timeout(settings.timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: settings.base_url.clone(),
            api_key: settings.api_key.clone(),
        })
    }

    async fn time_series(
        &self,
        instrument: &Instrument,
        timeframe: &Timeframe,
    ) -> Result<TimeSeriesResponse, FetchError> {
        let url = format!("{}/time_series", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("symbol", instrument.as_str()),
                ("interval", timeframe.as_str()),
                ("outputsize", "1"),
                ("timezone", "UTC"),
                ("apikey", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        // Provider errors keep their JSON envelope even on non-2xx answers.
        match serde_json::from_str::<TimeSeriesResponse>(&body) {
            Ok(data) if data.is_error() || status.is_success() => Ok(data),
            Ok(_) => Err(FetchError::Status(status)),
            Err(_) if !status.is_success() => Err(FetchError::Status(status)),
            Err(e) => Err(FetchError::Json(e)),
        }
    }
}

#[async_trait]
impl QuoteSource for TwelveDataClient {
    async fn fetch(
        &self,
        instrument: &Instrument,
        timeframe: &Timeframe,
    ) -> Result<Quote, FetchError> {
        let quote = self.time_series(instrument, timeframe).await?.to_domain()?;
        debug!(
            "{} {}: close={} high={} low={}",
            instrument,
            timeframe,
            quote.close(),
            quote.high(),
            quote.low()
        );
        Ok(quote)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    /// Serves a single canned HTTP response and hands back the request head.
    async fn serve_once(status: &'static str, body: &'static str) -> (String, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];
            while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
            }
            let _ = tx.send(String::from_utf8_lossy(&buf).to_string());

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });

        (format!("http://{}", addr), rx)
    }

    fn client(base_url: String, timeout: Duration) -> TwelveDataClient {
        TwelveDataClient::new(&ProviderSettings {
            api_key: "test-key".to_string(),
            base_url,
            timeout,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn fetch_requests_latest_bar_and_decodes_it() {
        let body = r#"{"values":[{"datetime":"2024-03-01 10:00:00","close":"1.10000","high":"1.10500","low":"1.09500"}],"status":"ok"}"#;
        let (base_url, request) = serve_once("200 OK", body).await;

        let quote = client(base_url, Duration::from_secs(5))
            .fetch(&Instrument::new("EUR/USD"), &Timeframe::new("1h"))
            .await
            .unwrap();

        assert_eq!(quote, Quote::new(1.1, 1.105, 1.095).unwrap());

        let head = request.await.unwrap();
        let request_line = head.lines().next().unwrap();
        assert!(request_line.starts_with("GET /time_series?"));
        assert!(request_line.contains("symbol=EUR%2FUSD"));
        assert!(request_line.contains("interval=1h"));
        assert!(request_line.contains("outputsize=1"));
        assert!(request_line.contains("apikey=test-key"));
    }

    #[tokio::test]
    async fn error_envelope_on_failed_status_is_a_provider_error() {
        let body = r#"{"code":401,"message":"**apikey** parameter is incorrect","status":"error"}"#;
        let (base_url, _request) = serve_once("401 Unauthorized", body).await;

        let err = client(base_url, Duration::from_secs(5))
            .fetch(&Instrument::new("EUR/USD"), &Timeframe::new("1h"))
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Provider { code: 401, .. }));
    }

    #[tokio::test]
    async fn non_json_failure_maps_to_status() {
        let (base_url, _request) = serve_once("502 Bad Gateway", "upstream down").await;

        let err = client(base_url, Duration::from_secs(5))
            .fetch(&Instrument::new("EUR/USD"), &Timeframe::new("1h"))
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Status(s) if s.as_u16() == 502));
    }

    #[tokio::test]
    async fn slow_provider_times_out_without_leaking_the_key() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
        });

        let err = client(format!("http://{}", addr), Duration::from_millis(100))
            .fetch(&Instrument::new("EUR/USD"), &Timeframe::new("5min"))
            .await
            .unwrap_err();

        assert!(!err.to_string().contains("test-key"));
        match err {
            FetchError::Http(e) => assert!(e.is_timeout()),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
