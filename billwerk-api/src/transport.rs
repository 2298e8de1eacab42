use crate::error::BillwerkApiError;
use crate::mapper::{FromWire, ToWire, WireMap};
use crate::settings::Settings;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use std::borrow::Cow;
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        })
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Payload of a request before it is marshaled.
pub enum RequestData<'a> {
    Empty,
    Query(&'a dyn ToWire),
    Json(&'a dyn ToWire),
}

/// A request bound to a method, a path and the record its response maps to.
pub trait Endpoint {
    type Response: FromWire;
    const METHOD: Method = Method::Get;

    fn endpoint(&self) -> Cow<'_, str>;

    fn data(&self) -> RequestData<'_> {
        RequestData::Empty
    }
}

/// The HTTP collaborator the client sends marshaled requests through.
///
/// Paths are relative to the API root, e.g. `/refund`. A success response with an empty
/// body reads as an empty map.
pub trait Transport {
    fn get(
        &self,
        path: &str,
        query: Option<&WireMap>,
    ) -> impl Future<Output = Result<WireMap, BillwerkApiError>> + Send;

    fn post(
        &self,
        path: &str,
        body: Option<&WireMap>,
    ) -> impl Future<Output = Result<WireMap, BillwerkApiError>> + Send;

    fn put(
        &self,
        path: &str,
        body: Option<&WireMap>,
    ) -> impl Future<Output = Result<WireMap, BillwerkApiError>> + Send;

    fn delete(&self, path: &str) -> impl Future<Output = Result<WireMap, BillwerkApiError>> + Send;
}

pub struct HttpTransport {
    http_client: reqwest::Client,
    base_url: String,
    api_key: SecretString,
}

impl HttpTransport {
    pub fn new(settings: Settings) -> Result<Self, BillwerkApiError> {
        settings.validate().map_err(BillwerkApiError::Configuration)?;
        let api_key = settings
            .api_key
            .ok_or_else(|| BillwerkApiError::Configuration("api_key is required".to_string()))?;

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http_client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        query: Option<&WireMap>,
        body: Option<&WireMap>,
    ) -> Result<WireMap, BillwerkApiError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%method, path, "sending request");

        let mut request = self
            .http_client
            .request(method.into(), url.as_str())
            .basic_auth(self.api_key.expose_secret(), None::<&str>);
        if let Some(query) = query {
            request = request.query(&query_pairs(query));
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        tracing::debug!(%method, path, status = status.as_u16(), "received response");

        if status.is_success() {
            parse_body(&text)
        } else {
            Err(BillwerkApiError::from_response(status.as_u16(), &text))
        }
    }
}

impl Transport for HttpTransport {
    async fn get(&self, path: &str, query: Option<&WireMap>) -> Result<WireMap, BillwerkApiError> {
        self.execute(Method::Get, path, query, None).await
    }

    async fn post(&self, path: &str, body: Option<&WireMap>) -> Result<WireMap, BillwerkApiError> {
        self.execute(Method::Post, path, None, body).await
    }

    async fn put(&self, path: &str, body: Option<&WireMap>) -> Result<WireMap, BillwerkApiError> {
        self.execute(Method::Put, path, None, body).await
    }

    async fn delete(&self, path: &str) -> Result<WireMap, BillwerkApiError> {
        self.execute(Method::Delete, path, None, None).await
    }
}

/// Flattens a marshaled query into `key=value` pairs; arrays repeat their key.
fn query_pairs(query: &WireMap) -> Vec<(&str, String)> {
    let mut pairs = Vec::with_capacity(query.len());
    for (key, value) in query {
        match value {
            Value::Array(items) => {
                pairs.extend(items.iter().map(|item| (key.as_str(), scalar(item))))
            }
            value => pairs.push((key.as_str(), scalar(value))),
        }
    }
    pairs
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(value) => value.clone(),
        other => other.to_string(),
    }
}

fn parse_body(text: &str) -> Result<WireMap, BillwerkApiError> {
    if text.trim().is_empty() {
        return Ok(WireMap::new());
    }

    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(BillwerkApiError::UnexpectedResponse(format!(
            "expected a JSON object, got {other}"
        ))),
        Err(err) => Err(BillwerkApiError::UnexpectedResponse(err.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn query_pairs_repeat_array_keys() {
        let Value::Object(query) = json!({
            "size": 20,
            "range": "settled_at",
            "state": ["settled", "authorized"]
        }) else {
            unreachable!()
        };

        assert_eq!(
            query_pairs(&query),
            vec![
                ("size", "20".to_string()),
                ("range", "settled_at".to_string()),
                ("state", "settled".to_string()),
                ("state", "authorized".to_string()),
            ]
        );
    }

    #[test]
    fn empty_body_reads_as_empty_map() {
        assert!(parse_body("").unwrap().is_empty());
        assert!(parse_body("  \n").unwrap().is_empty());
    }

    #[test]
    fn non_object_body_is_unexpected() {
        assert!(matches!(
            parse_body("[1, 2]"),
            Err(BillwerkApiError::UnexpectedResponse(_))
        ));
        assert!(matches!(
            parse_body("<html>"),
            Err(BillwerkApiError::UnexpectedResponse(_))
        ));
    }

    #[test]
    fn transport_requires_an_api_key() {
        let settings = Settings {
            api_key: None,
            base_url: "https://api.reepay.com/v1".to_string(),
            timeout_secs: 30,
        };

        assert!(matches!(
            HttpTransport::new(settings),
            Err(BillwerkApiError::Configuration(_))
        ));
    }

    #[test]
    fn methods_display_as_http_verbs() {
        assert_eq!(Method::Get.to_string(), "GET");
        assert_eq!(Method::Delete.to_string(), "DELETE");
    }
}
