use crate::error::BillwerkApiError;
use crate::macros::{setter, wire_enum, wire_record};
use crate::mapper::{FromWire, RegistryBuilder, RegistryError, WireMap, validate};
use crate::transport::{Endpoint, Method, RequestData};
use chrono::{DateTime, Utc};
use std::borrow::Cow;

// Common

wire_enum! {
    pub enum EventType {
        InvoiceCreated = "invoice_created",
        InvoiceSettled = "invoice_settled",
        InvoiceAuthorized = "invoice_authorized",
        InvoiceCancelled = "invoice_cancelled",
        InvoiceFailed = "invoice_failed",
        InvoiceRefund = "invoice_refund",
        InvoiceRefundFailed = "invoice_refund_failed",
        InvoiceReactivate = "invoice_reactivate",
        InvoiceDunning = "invoice_dunning",
        InvoiceDunningNotification = "invoice_dunning_notification",
        InvoiceDunningCancelled = "invoice_dunning_cancelled",
        InvoiceCredited = "invoice_credited",
        InvoiceChanged = "invoice_changed",
        CustomerCreated = "customer_created",
        CustomerChanged = "customer_changed",
        CustomerDeleted = "customer_deleted",
        CustomerPaymentMethodAdded = "customer_payment_method_added",
        CustomerPaymentMethodRemoved = "customer_payment_method_removed",
        SubscriptionCreated = "subscription_created",
        SubscriptionRenewal = "subscription_renewal",
        SubscriptionCancelled = "subscription_cancelled",
        SubscriptionUncancelled = "subscription_uncancelled",
        SubscriptionOnHold = "subscription_on_hold",
        SubscriptionReactivated = "subscription_reactivated",
        SubscriptionExpired = "subscription_expired",
        SubscriptionChanged = "subscription_changed",
    }
}

wire_record! {
    pub struct WebhookSettings: response "webhook_settings" {
        required urls: Vec<String> = "urls",
        optional username: String = "username",
        optional password: String = "password",
        required disabled: bool = "disabled",
        optional alert_emails: Vec<String> = "alert_emails",
        optional alert_count: i64 = "alert_count",
        /// Empty means every event is delivered
        optional event_types: Vec<EventType> = "event_types",
        /// Shared secret used to sign deliveries
        required secret: String = "secret",
    }
}

wire_record! {
    pub struct WebhookSettingsUpdate: request "webhook_settings_update" {
        required urls: Vec<String> = "urls",
        optional username: String = "username",
        optional password: String = "password",
        optional disabled: bool = "disabled",
        optional alert_emails: Vec<String> = "alert_emails",
        optional alert_count: i64 = "alert_count" where validate::non_negative,
        optional event_types: Vec<EventType> = "event_types",
    }
}

impl WebhookSettingsUpdate {
    pub fn new(urls: Vec<String>) -> Self {
        Self {
            urls,
            username: None,
            password: None,
            disabled: None,
            alert_emails: None,
            alert_count: None,
            event_types: None,
        }
    }
}

wire_record! {
    /// An inbound webhook delivery.
    pub struct WebhookEvent: response "webhook_event" {
        required id: String = "id",
        required event_id: String = "event_id",
        required_enum event_type: EventType = "event_type",
        required timestamp: DateTime<Utc> = "timestamp",
        required signature: String = "signature",
        optional customer: String = "customer",
        optional subscription: String = "subscription",
        optional invoice: String = "invoice",
        optional transaction: String = "transaction",
        optional credit_note: String = "credit_note",
        optional credit: String = "credit",
        optional payment_method: String = "payment_method",
        optional payment_method_reference: String = "payment_method_reference",
    }
}

impl WebhookEvent {
    /// Parses the raw body of a delivery.
    pub fn parse(payload: &str) -> Result<Self, BillwerkApiError> {
        let map: WireMap = serde_json::from_str(payload)
            .map_err(|err| BillwerkApiError::UnexpectedResponse(err.to_string()))?;
        let event = Self::from_wire(&map)?;
        tracing::debug!(
            event_id = %event.event_id,
            event_type = ?event.event_type,
            "parsed webhook event"
        );
        Ok(event)
    }
}

// Requests

#[derive(Debug, Clone, Default)]
pub struct GetWebhookSettings;

impl Endpoint for GetWebhookSettings {
    type Response = WebhookSettings;

    fn endpoint(&self) -> Cow<'_, str> {
        "/account/webhook_settings".into()
    }
}

#[derive(Debug, Clone)]
pub struct UpdateWebhookSettings {
    settings: WebhookSettingsUpdate,
}

impl UpdateWebhookSettings {
    pub fn new(urls: Vec<String>) -> Self {
        Self {
            settings: WebhookSettingsUpdate::new(urls),
        }
    }

    setter!(opt settings.username: String);
    setter!(opt settings.password: String);
    setter!(opt settings.disabled: bool);
    setter!(opt settings.alert_emails: Vec<String>);
    setter!(opt settings.alert_count: i64);
    setter!(opt settings.event_types: Vec<EventType>);
}

impl Endpoint for UpdateWebhookSettings {
    type Response = WebhookSettings;
    const METHOD: Method = Method::Put;

    fn endpoint(&self) -> Cow<'_, str> {
        "/account/webhook_settings".into()
    }

    fn data(&self) -> RequestData<'_> {
        RequestData::Json(&self.settings)
    }
}

pub(crate) fn register(builder: &mut RegistryBuilder) -> Result<(), RegistryError> {
    builder
        .model::<WebhookSettings>()?
        .model::<WebhookSettingsUpdate>()?
        .model::<WebhookEvent>()?;
    Ok(())
}
