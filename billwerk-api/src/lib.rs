pub mod endpoints;
mod error;
pub mod error_codes;
mod macros;
pub mod mapper;
pub mod repositories;
mod settings;
mod transport;

pub use crate::error::{ApiErrorBody, BillwerkApiError};
pub use crate::settings::Settings;
pub use crate::transport::{Endpoint, HttpTransport, Method, RequestData, Transport};
use mapper::{FromWire, Registry, ToWire};
use repositories::*;
use std::sync::LazyLock;

static REGISTRY: LazyLock<Registry> = LazyLock::new(|| {
    endpoints::builtin().expect("built-in record definitions must be consistent")
});

/// The registry holding every built-in record and family.
pub fn registry() -> &'static Registry {
    &REGISTRY
}

pub struct Client<T: Transport = HttpTransport> {
    transport: T,
    registry: &'static Registry,
}

impl Client {
    pub fn new(api_key: &str) -> Result<Self, BillwerkApiError> {
        Self::from_settings(Settings::with_api_key(api_key))
    }

    pub fn from_settings(settings: Settings) -> Result<Self, BillwerkApiError> {
        Ok(Self::with_transport(HttpTransport::new(settings)?))
    }
}

impl<T: Transport> Client<T> {
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport,
            registry: registry(),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn send<R>(&self, request: R) -> Result<R::Response, BillwerkApiError>
    where
        R: Endpoint,
    {
        let path = request.endpoint();
        let payload = match request.data() {
            RequestData::Empty => None,
            RequestData::Query(data) | RequestData::Json(data) => {
                Some(data.to_wire_in(self.registry)?)
            }
        };

        let response = match R::METHOD {
            Method::Get => self.transport.get(&path, payload.as_ref()).await?,
            Method::Post => self.transport.post(&path, payload.as_ref()).await?,
            Method::Put => self.transport.put(&path, payload.as_ref()).await?,
            Method::Delete => self.transport.delete(&path).await?,
        };

        Ok(R::Response::from_wire_in(self.registry, &response)?)
    }
}

pub struct Request;

impl Request {
    pub fn account() -> AccountRepository {
        AccountRepository::new()
    }

    pub fn agreements() -> AgreementRepository {
        AgreementRepository::new()
    }

    pub fn charges() -> ChargeRepository {
        ChargeRepository::new()
    }

    pub fn invoices() -> InvoiceRepository {
        InvoiceRepository::new()
    }

    pub fn payment_methods() -> PaymentMethodRepository {
        PaymentMethodRepository::new()
    }

    pub fn refunds() -> RefundRepository {
        RefundRepository::new()
    }

    pub fn transactions() -> TransactionRepository {
        TransactionRepository::new()
    }

    pub fn webhooks() -> WebhookRepository {
        WebhookRepository::new()
    }
}
