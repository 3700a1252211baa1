pub mod bus_info;
pub mod bus_predictions;
pub mod error;
pub mod incidents;
pub mod misc;
pub mod rail_predictions;
pub mod rail_station_info;
pub mod train_positions;

use std::fmt;
use std::time::Duration;

use derive_builder::Builder;
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use reqwest::{RequestBuilder, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

pub use error::{Error, ErrorKind, RequestFailure, Result};

pub const BASE_URL: &str = "https://api.wmata.com/";

/// Header the service reads the subscription key from.
pub const API_KEY_HEADER: &str = "api_key";

fn default_user_agent() -> String {
    concat!("wmata/", env!("CARGO_PKG_VERSION")).to_string()
}

/// Connection settings shared by every category client.
#[derive(Clone, Builder)]
#[builder(pattern = "owned", build_fn(validate = "Self::validate"))]
pub struct Config {
    #[builder(setter(into))]
    api_key: String,
    #[builder(setter(into), default = "BASE_URL.to_string()")]
    base_url: String,
    #[builder(setter(into), default = "default_user_agent()")]
    user_agent: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("user_agent", &self.user_agent)
            .finish_non_exhaustive()
    }
}

impl ConfigBuilder {
    fn validate(&self) -> std::result::Result<(), String> {
        if let Some(agent) = &self.user_agent {
            HeaderValue::from_str(agent)
                .map_err(|e| format!("invalid user agent {agent:?}: {e}"))?;
        }
        Ok(())
    }
}

impl Config {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: BASE_URL.to_string(),
            user_agent: default_user_agent(),
        }
    }

    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Per-call execution context: a cancellation token and an optional deadline.
///
/// Cancelling the token while a request is in flight aborts it and the call
/// fails with [`RequestFailure::Cancelled`].
#[derive(Debug, Clone, Default)]
pub struct Context {
    cancel: CancellationToken,
    timeout: Option<Duration>,
}

impl Context {
    /// Never cancelled, no deadline.
    pub fn background() -> Self {
        Self::default()
    }

    pub fn with_cancellation(cancel: CancellationToken) -> Self {
        Self {
            cancel,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }
}

/// Optional request payload. No current operation sends one; the method stays
/// GET either way.
#[derive(Debug, Clone)]
pub enum Body {
    /// Sent as is.
    Raw(Vec<u8>),
    /// Already JSON-encoded, sent with `content-type: application/json`.
    Json(Vec<u8>),
}

impl Body {
    pub fn json<T: Serialize + ?Sized>(value: &T) -> std::result::Result<Self, ErrorKind> {
        serde_json::to_vec(value)
            .map(Body::Json)
            .map_err(ErrorKind::Serialization)
    }

    fn attach(self, req: RequestBuilder) -> RequestBuilder {
        match self {
            Body::Raw(bytes) => req.body(bytes),
            Body::Json(bytes) => req.header(CONTENT_TYPE, "application/json").body(bytes),
        }
    }
}

/// Composes `base` + `endpoint` + `?query`.
///
/// The query suffix is only added when `params` is non-empty. Values are
/// form-urlencoded. Fails when `base` is not an absolute URL.
pub fn build_url(
    base: &str,
    endpoint: &str,
    params: &[(&str, &str)],
) -> std::result::Result<Url, ErrorKind> {
    let mut base = Url::parse(base)?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }

    let mut url = base.join(endpoint)?;
    if !params.is_empty() {
        url.query_pairs_mut().extend_pairs(params);
    }
    Ok(url)
}

/// Search circle around a coordinate. Values are passed to the service as
/// given; leave a field `None` to omit it.
#[derive(Debug, Clone, Default)]
pub struct Area {
    pub lat: Option<String>,
    pub lon: Option<String>,
    /// Metres.
    pub radius: Option<String>,
}

impl Area {
    pub fn new(
        lat: impl Into<String>,
        lon: impl Into<String>,
        radius: impl Into<String>,
    ) -> Self {
        Self {
            lat: Some(lat.into()),
            lon: Some(lon.into()),
            radius: Some(radius.into()),
        }
    }

    pub(crate) fn pairs(&self) -> [(&'static str, Option<&str>); 3] {
        [
            ("Lat", self.lat.as_deref()),
            ("Lon", self.lon.as_deref()),
            ("Radius", self.radius.as_deref()),
        ]
    }
}

/// Keeps only the parameters that carry a non-empty value.
pub(crate) fn query<'a>(pairs: &[(&'a str, Option<&'a str>)]) -> Vec<(&'a str, &'a str)> {
    pairs
        .iter()
        .filter_map(|&(name, value)| value.filter(|v| !v.is_empty()).map(|v| (name, v)))
        .collect()
}

/// Sends authenticated GET requests. Each category client owns one.
#[derive(Clone)]
pub struct Requester {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl fmt::Debug for Requester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Requester")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl Requester {
    /// `Config` only holds user agents that are valid header values, so the
    /// client build can only fail when the TLS backend cannot start.
    pub fn new(config: Config) -> Self {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent)
            .build()
            .expect("reqwest client");
        Self {
            http,
            api_key: config.api_key,
            base_url: config.base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// One GET round trip. Only `200 OK` yields the body.
    pub async fn send(
        &self,
        ctx: &Context,
        url: Url,
        body: Option<Body>,
    ) -> std::result::Result<Vec<u8>, ErrorKind> {
        debug!("GET {}", url);

        let mut req = self.http.get(url).header(API_KEY_HEADER, &self.api_key);
        if let Some(timeout) = ctx.timeout {
            req = req.timeout(timeout);
        }
        if let Some(body) = body {
            req = body.attach(req);
        }

        let exchange = async {
            let res = req.send().await.map_err(RequestFailure::from)?;

            let status = res.status();
            if status != StatusCode::OK {
                warn!("Server returned {}", status);
                return Err(ErrorKind::UnexpectedStatus { status });
            }

            let bytes = res.bytes().await.map_err(RequestFailure::from)?;
            debug!("Received {} bytes", bytes.len());
            Ok::<_, ErrorKind>(bytes.to_vec())
        };

        tokio::select! {
            biased;
            _ = ctx.cancel.cancelled() => Err(RequestFailure::Cancelled.into()),
            res = exchange => res,
        }
    }

    /// Builds the URL for `endpoint` and sends it, tagging failures with
    /// `operation`.
    pub async fn execute(
        &self,
        ctx: &Context,
        operation: &'static str,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<Vec<u8>> {
        let wrap = |kind: ErrorKind| Error::new(operation, kind);

        let url = build_url(&self.base_url, endpoint, params).map_err(wrap)?;
        self.send(ctx, url, None).await.map_err(wrap)
    }

    /// [`execute`](Self::execute) followed by a JSON decode into `T`.
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        ctx: &Context,
        operation: &'static str,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let body = self.execute(ctx, operation, endpoint, params).await?;
        serde_json::from_slice(&body).map_err(|e| Error::new(operation, ErrorKind::Decode(e)))
    }
}

/// Defines a category client that exclusively owns its [`Requester`].
macro_rules! category_client {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name {
            requester: $crate::api::Requester,
        }

        impl $name {
            pub fn new(api_key: impl Into<String>) -> Self {
                Self::from_config($crate::api::Config::new(api_key))
            }

            pub fn from_config(config: $crate::api::Config) -> Self {
                Self {
                    requester: $crate::api::Requester::new(config),
                }
            }
        }
    };
}

pub(crate) use category_client;


#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::time::Duration;

    use mockito::Matcher;

    use super::test_support::{TEST_KEY, config};
    use super::*;

    #[test]
    fn url_without_params_has_no_query() {
        let url = build_url(BASE_URL, "Rail.svc/json/jLines", &[]).unwrap();
        assert_eq!(url.as_str(), "https://api.wmata.com/Rail.svc/json/jLines");
        assert_eq!(url.query(), None);
    }

    #[test]
    fn url_params_are_encoded_and_decode_back() {
        let params = [
            ("RouteID", "10A"),
            ("Date", "2024-01-02"),
            ("Name", "Metro Center & Gallery Pl/Chinatown"),
        ];
        let url = build_url(BASE_URL, "Bus.svc/json/jRouteDetails", &params).unwrap();

        let raw = url.query().unwrap();
        assert!(raw.contains("Metro+Center+%26+Gallery+Pl%2FChinatown"));

        let decoded: HashMap<String, String> = url.query_pairs().into_owned().collect();
        let expected: HashMap<String, String> = params
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        assert_eq!(decoded, expected);
    }

    #[test]
    fn path_embedded_parameter_is_kept() {
        let url =
            build_url(BASE_URL, "StationPrediction.svc/json/GetPrediction/all", &[]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.wmata.com/StationPrediction.svc/json/GetPrediction/all"
        );
    }

    #[test]
    fn base_without_trailing_slash_is_joined() {
        let url = build_url("http://127.0.0.1:8080/proxy", "Misc/Validate", &[]).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/proxy/Misc/Validate");
    }

    #[test]
    fn invalid_base_is_a_url_error() {
        let err = build_url("not a url", "Misc/Validate", &[]).unwrap_err();
        assert!(matches!(err, ErrorKind::UrlConstruction(_)));
    }

    #[test]
    fn query_drops_missing_and_empty_values() {
        let pairs = query(&[
            ("RouteID", Some("10A")),
            ("Lat", None),
            ("Lon", Some("")),
            ("Radius", Some("500")),
        ]);
        assert_eq!(pairs, vec![("RouteID", "10A"), ("Radius", "500")]);
    }

    #[test]
    fn json_body_serialization_failure() {
        let mut map = HashMap::new();
        map.insert((1, 2), "tuple keys are not valid JSON object keys");

        let err = Body::json(&map).unwrap_err();
        assert!(matches!(err, ErrorKind::Serialization(_)));
    }

    #[tokio::test]
    async fn send_returns_body_and_sets_api_key() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/Misc/Validate")
            .match_header(API_KEY_HEADER, TEST_KEY)
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let requester = Requester::new(config(&server));
        let url = build_url(requester.base_url(), "Misc/Validate", &[]).unwrap();
        let body = requester
            .send(&Context::background(), url, None)
            .await
            .unwrap();

        assert_eq!(body, b"{}");
        mock.assert_async().await;
    }

    #[test]
    fn user_agent_must_be_a_header_value() {
        let err = Config::builder()
            .api_key(TEST_KEY)
            .user_agent("board\n1.0")
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigBuilderError::ValidationError(_)));
    }

    #[tokio::test]
    async fn send_uses_configured_user_agent() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/Misc/Validate")
            .match_header("user-agent", "metro-board/2.1")
            .with_body("{}")
            .create_async()
            .await;

        let requester = Requester::new(
            Config::builder()
                .api_key(TEST_KEY)
                .base_url(server.url())
                .user_agent("metro-board/2.1")
                .build()
                .unwrap(),
        );
        let url = build_url(requester.base_url(), "Misc/Validate", &[]).unwrap();
        requester
            .send(&Context::background(), url, None)
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn default_user_agent_names_the_crate() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/Misc/Validate")
            .match_header("user-agent", Matcher::Regex("^wmata/".into()))
            .with_body("{}")
            .create_async()
            .await;

        let requester = Requester::new(config(&server));
        let url = build_url(requester.base_url(), "Misc/Validate", &[]).unwrap();
        requester
            .send(&Context::background(), url, None)
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn send_keeps_get_with_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/Misc/Validate")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(serde_json::json!({"ping": true})))
            .with_body("{}")
            .create_async()
            .await;

        let requester = Requester::new(config(&server));
        let url = build_url(requester.base_url(), "Misc/Validate", &[]).unwrap();
        let body = Body::json(&serde_json::json!({"ping": true})).unwrap();
        requester
            .send(&Context::background(), url, Some(body))
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn send_rejects_non_ok_statuses() {
        let mut server = mockito::Server::new_async().await;
        let requester = Requester::new(config(&server));

        for code in [404_u16, 500, 201] {
            let _mock = server
                .mock("GET", "/Rail.svc/json/jLines")
                .with_status(code as usize)
                .with_body("{\"Lines\":[]}")
                .create_async()
                .await;

            let url = build_url(requester.base_url(), "Rail.svc/json/jLines", &[]).unwrap();
            let err = requester
                .send(&Context::background(), url, None)
                .await
                .unwrap_err();

            match err {
                ErrorKind::UnexpectedStatus { status } => assert_eq!(status.as_u16(), code),
                other => panic!("expected UnexpectedStatus, got {other:?}"),
            }
            server.reset();
        }
    }

    #[tokio::test]
    async fn cancelled_context_is_a_request_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/Misc/Validate")
            .with_body("{}")
            .create_async()
            .await;

        let requester = Requester::new(config(&server));
        let ctx = Context::background();
        ctx.cancel();

        let url = build_url(requester.base_url(), "Misc/Validate", &[]).unwrap();
        let err = requester.send(&ctx, url, None).await.unwrap_err();
        assert!(matches!(err, ErrorKind::Request(RequestFailure::Cancelled)));
    }

    #[tokio::test]
    async fn cancellation_aborts_a_request_in_flight() {
        // Accepts connections at the kernel level but never answers.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}/", listener.local_addr().unwrap());

        let requester = Requester::new(
            Config::builder()
                .api_key(TEST_KEY)
                .base_url(base)
                .build()
                .unwrap(),
        );
        let ctx = Context::background();
        let token = ctx.cancellation_token().clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            token.cancel();
        });

        let url = build_url(requester.base_url(), "Misc/Validate", &[]).unwrap();
        let err = requester.send(&ctx, url, None).await.unwrap_err();
        assert!(matches!(err, ErrorKind::Request(RequestFailure::Cancelled)));
        drop(listener);
    }

    #[tokio::test]
    async fn timeout_is_a_transport_failure() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}/", listener.local_addr().unwrap());

        let requester = Requester::new(
            Config::builder()
                .api_key(TEST_KEY)
                .base_url(base)
                .build()
                .unwrap(),
        );
        let ctx = Context::background().with_timeout(Duration::from_millis(50));

        let url = build_url(requester.base_url(), "Misc/Validate", &[]).unwrap();
        let err = requester.send(&ctx, url, None).await.unwrap_err();
        match err {
            ErrorKind::Request(RequestFailure::Transport(e)) => assert!(e.is_timeout()),
            other => panic!("expected a timeout, got {other:?}"),
        }
        drop(listener);
    }

    #[tokio::test]
    async fn fetch_tags_decode_errors_with_the_operation() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/Rail.svc/json/jLines")
            .with_body("not json")
            .create_async()
            .await;

        let requester = Requester::new(config(&server));
        let err = requester
            .fetch::<serde_json::Value>(&Context::background(), "Requester::fetch", "Rail.svc/json/jLines", &[])
            .await
            .unwrap_err();

        assert_eq!(err.operation(), "Requester::fetch");
        assert!(matches!(err.kind(), ErrorKind::Decode(_)));
    }

    #[tokio::test]
    async fn fetch_reports_bad_base_url() {
        let requester = Requester::new(
            Config::builder()
                .api_key(TEST_KEY)
                .base_url("::bad::")
                .build()
                .unwrap(),
        );
        let err = requester
            .fetch::<serde_json::Value>(&Context::background(), "Requester::fetch", "Misc/Validate", &[])
            .await
            .unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::UrlConstruction(_)));
    }
}
