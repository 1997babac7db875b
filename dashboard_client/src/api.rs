//! HTTP access to the dashboard endpoints.
//!
//! `DashboardApi` is the seam between the components and the network: the components
//! only see decoded payloads or a `DashboardError`, and tests swap in in-memory fakes.
//! `HttpApi` is the production implementation on top of a blocking `reqwest` client.
use std::time::Duration;

use dashboard_common::endpoints::Endpoints;
use dashboard_common::{
    ApiErrorBody, DashboardError, InstrumentPrice, InstrumentSuggestion, Result, StockStatus,
};
use log::debug;
use reqwest::Url;
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, COOKIE, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;

/// Read-only operations the dashboard performs against its server.
pub trait DashboardApi: Send + Sync {
    /// `GET /api/stock_status/`
    fn stock_status(&self) -> Result<Vec<StockStatus>>;

    /// `GET /search_instruments/?q=<query>`
    fn search_instruments(&self, query: &str) -> Result<Vec<InstrumentSuggestion>>;

    /// `GET /instrument_price/?symbol=<symbol>`
    fn instrument_price(&self, symbol: &str) -> Result<InstrumentPrice>;
}

/// `DashboardApi` over HTTP.
pub struct HttpApi {
    client: Client,
    endpoints: Endpoints,
}

impl HttpApi {
    /// Build a client for `endpoints`.
    ///
    /// `session_cookie` is forwarded verbatim as the `Cookie` header of every request.
    pub fn new(
        endpoints: Endpoints,
        timeout: Duration,
        session_cookie: Option<&str>,
    ) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(cookie) = session_cookie {
            let value = HeaderValue::from_str(cookie.trim())
                .map_err(|e| DashboardError::Format(format!("Invalid session cookie: {}", e)))?;
            headers.insert(COOKIE, value);
        }

        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .timeout(timeout)
            .build()?;
        Ok(Self { client, endpoints })
    }

    fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!("GET {}", url);
        let response = self.client.get(url).send()?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            let message = match serde_json::from_str::<ApiErrorBody>(&body) {
                Ok(error_body) => error_body.message(),
                Err(_) if body.trim().is_empty() => status
                    .canonical_reason()
                    .unwrap_or("unexpected status")
                    .to_string(),
                Err(_) => body.trim().to_string(),
            };
            return Err(DashboardError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.bytes()?;
        Ok(serde_json::from_slice(&body)?)
    }
}

impl DashboardApi for HttpApi {
    fn stock_status(&self) -> Result<Vec<StockStatus>> {
        self.get_json(self.endpoints.stock_status()?)
    }

    fn search_instruments(&self, query: &str) -> Result<Vec<InstrumentSuggestion>> {
        self.get_json(self.endpoints.search_instruments(query)?)
    }

    fn instrument_price(&self, symbol: &str) -> Result<InstrumentPrice> {
        self.get_json(self.endpoints.instrument_price(symbol)?)
    }
}

#[cfg(test)]
pub(crate) mod fake {
    //! In-memory `DashboardApi` used by the component tests.
    use super::*;
    use std::collections::{HashMap, VecDeque};
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct FakeApi {
        pub statuses: Mutex<VecDeque<Result<Vec<StockStatus>>>>,
        pub suggestions: Mutex<HashMap<String, Vec<InstrumentSuggestion>>>,
        pub prices: Mutex<HashMap<String, InstrumentPrice>>,
        pub calls: Mutex<Vec<String>>,
    }

    impl FakeApi {
        pub fn push_status(&self, result: Result<Vec<StockStatus>>) {
            self.statuses.lock().unwrap().push_back(result);
        }

        pub fn with_suggestions(self, query: &str, symbols: &[&str]) -> Self {
            let list = symbols
                .iter()
                .map(|s| InstrumentSuggestion {
                    symbol: s.to_string(),
                })
                .collect();
            self.suggestions.lock().unwrap().insert(query.to_string(), list);
            self
        }

        pub fn with_price(self, symbol: &str, ask: f64, bid: f64) -> Self {
            self.prices
                .lock()
                .unwrap()
                .insert(symbol.to_string(), InstrumentPrice { ask, bid });
            self
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl DashboardApi for FakeApi {
        fn stock_status(&self) -> Result<Vec<StockStatus>> {
            self.calls.lock().unwrap().push("status".to_string());
            self.statuses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(DashboardError::Format("no status queued".into())))
        }

        fn search_instruments(&self, query: &str) -> Result<Vec<InstrumentSuggestion>> {
            self.calls.lock().unwrap().push(format!("search:{}", query));
            Ok(self
                .suggestions
                .lock()
                .unwrap()
                .get(query)
                .cloned()
                .unwrap_or_default())
        }

        fn instrument_price(&self, symbol: &str) -> Result<InstrumentPrice> {
            self.calls.lock().unwrap().push(format!("price:{}", symbol));
            self.prices
                .lock()
                .unwrap()
                .get(symbol)
                .copied()
                .ok_or_else(|| DashboardError::Api {
                    status: 400,
                    message: "Failed to fetch instrument price.".into(),
                })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};

    /// Serve a single canned HTTP response and hand back the request line it received.
    fn serve_once(status_line: &str, body: &str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let size = stream.read(&mut buf).unwrap();
                if size == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..size]);
            }
            stream.write_all(response.as_bytes()).unwrap();
            let request = String::from_utf8_lossy(&request).to_string();
            request
        });
        (base, handle)
    }

    fn api(base: &str, cookie: Option<&str>) -> HttpApi {
        HttpApi::new(Endpoints::new(base).unwrap(), Duration::from_secs(5), cookie).unwrap()
    }

    #[test]
    fn fetches_stock_status() {
        let (base, server) = serve_once(
            "200 OK",
            r#"[{"name":"LSE","status":"LIVE","css_class":"status-live","time_to_open":"-"}]"#,
        );
        let list = api(&base, None).stock_status().unwrap();
        let request = server.join().unwrap();

        assert!(request.starts_with("GET /api/stock_status/ HTTP/1.1"));
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].css_class, "status-live");
    }

    #[test]
    fn search_query_reaches_server_encoded() {
        let (base, server) = serve_once("200 OK", r#"[{"symbol":"S&P"}]"#);
        let list = api(&base, None).search_instruments("S&P #1").unwrap();
        let request = server.join().unwrap();

        assert!(request.starts_with("GET /search_instruments/?q=S%26P+%231 HTTP/1.1"));
        assert_eq!(list[0].symbol, "S&P");
    }

    #[test]
    fn session_cookie_is_forwarded() {
        let (base, server) = serve_once("200 OK", r#"{"ask": 1.5, "bid": 1.25}"#);
        let price = api(&base, Some("sessionid=abc123"))
            .instrument_price("US500")
            .unwrap();
        let request = server.join().unwrap().to_ascii_lowercase();

        assert!(request.contains("cookie: sessionid=abc123"));
        assert_eq!(price, InstrumentPrice { ask: 1.5, bid: 1.25 });
    }

    #[test]
    fn error_status_uses_body_message() {
        let (base, server) = serve_once(
            "400 Bad Request",
            r#"{"error": "Parameter 'symbol' is required."}"#,
        );
        let err = api(&base, None).instrument_price(" ").unwrap_err();
        server.join().unwrap();

        match err {
            DashboardError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Parameter 'symbol' is required.");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn malformed_body_is_a_json_error() {
        let (base, server) = serve_once("200 OK", "<html>login</html>");
        let err = api(&base, None).stock_status().unwrap_err();
        server.join().unwrap();
        assert!(matches!(err, DashboardError::SerdeJson(_)));
    }

    #[test]
    fn connection_refused_is_an_http_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let err = api(&base, None).stock_status().unwrap_err();
        assert!(matches!(err, DashboardError::Http(_)));
    }
}
