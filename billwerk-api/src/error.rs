use crate::endpoints::transactions::TransactionError;
use crate::error_codes;
use crate::macros::wire_record;
use crate::mapper::{FromWire, MapperError, WireMap};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BillwerkApiError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Client error ({status}): {body}")]
    Client { status: u16, body: String },

    #[error("Server error ({status}): {body}")]
    Server { status: u16, body: String },

    #[error("API error ({status}): {}", .error.description())]
    Api { status: u16, error: ApiErrorBody },

    #[error("Mapping error: {0}")]
    Mapper(#[from] MapperError),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),
}

impl From<config::ConfigError> for BillwerkApiError {
    fn from(err: config::ConfigError) -> Self {
        BillwerkApiError::Configuration(err.to_string())
    }
}

impl BillwerkApiError {
    /// Classifies a non-success response.
    ///
    /// A body that reads as a structured error becomes [`BillwerkApiError::Api`]; anything
    /// else is kept verbatim as a client or server error.
    pub fn from_response(status: u16, body: &str) -> Self {
        if let Some(error) = structured_error(body) {
            tracing::warn!(
                status,
                code = error.code,
                request_id = error.request_id.as_deref(),
                "API returned an error"
            );
            return BillwerkApiError::Api { status, error };
        }

        match status {
            400..=499 => BillwerkApiError::Client {
                status,
                body: body.to_string(),
            },
            500..=599 => BillwerkApiError::Server {
                status,
                body: body.to_string(),
            },
            _ => BillwerkApiError::UnexpectedResponse(format!("status {status}: {body}")),
        }
    }

    /// The API error code, when the server sent one.
    pub fn code(&self) -> Option<i64> {
        match self {
            BillwerkApiError::Api { error, .. } => error.code,
            _ => None,
        }
    }
}

fn structured_error(body: &str) -> Option<ApiErrorBody> {
    let map: WireMap = serde_json::from_str(body).ok()?;
    if !(map.contains_key("code") || map.contains_key("error")) {
        return None;
    }
    ApiErrorBody::from_wire(&map).ok()
}

wire_record! {
    /// Error body the API sends with 4xx and 5xx responses.
    pub struct ApiErrorBody: response "error" {
        optional code: i64 = "code",
        optional error: String = "error",
        optional message: String = "message",
        optional path: String = "path",
        /// Kept as sent; only used for display
        optional timestamp: String = "timestamp",
        optional http_status: i64 = "http_status",
        optional http_reason: String = "http_reason",
        optional request_id: String = "request_id",
        /// Kept as sent, see [`ApiErrorBody::transaction_error_kind`]
        optional transaction_error: String = "transaction_error",
    }
}

impl ApiErrorBody {
    pub fn description(&self) -> String {
        self.message
            .clone()
            .or_else(|| self.error.clone())
            .or_else(|| {
                self.code
                    .and_then(|code| u16::try_from(code).ok())
                    .and_then(error_codes::describe)
                    .map(str::to_string)
            })
            .unwrap_or_else(|| "unknown error".to_string())
    }

    pub fn transaction_error_kind(&self) -> Option<TransactionError> {
        self.transaction_error
            .as_deref()
            .and_then(TransactionError::parse)
    }
}
