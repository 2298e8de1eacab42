use crate::endpoints::invoices::InvoiceOrderLine;
use crate::endpoints::transactions::{ErrorState, TransactionError};
use crate::endpoints::{AccountFundingInformation, Address, OrderLine};
use crate::macros::{setter, wire_enum, wire_record};
use crate::mapper::{RegistryBuilder, RegistryError, WireMap, validate};
use crate::transport::{Endpoint, Method, RequestData};
use chrono::{DateTime, Utc};
use std::borrow::Cow;

// Common

wire_enum! {
    pub enum ChargeState {
        Created = "created",
        Authorized = "authorized",
        Settled = "settled",
        Failed = "failed",
        Cancelled = "cancelled",
        Pending = "pending",
    }
}

wire_record! {
    pub struct Charge: response "charge" {
        required handle: String = "handle",
        required_enum state: ChargeState = "state",
        required customer: String = "customer",
        required amount: i64 = "amount",
        required currency: String = "currency",
        optional authorized: DateTime<Utc> = "authorized",
        optional settled: DateTime<Utc> = "settled",
        optional cancelled: DateTime<Utc> = "cancelled",
        required created: DateTime<Utc> = "created",
        optional transaction: String = "transaction",
        /// Kept as sent, see [`Charge::error_kind`]
        optional error: String = "error",
        optional error_state: ErrorState = "error_state",
        optional processing: bool = "processing",
        optional source: WireMap = "source",
        optional order_lines: Vec<InvoiceOrderLine> = "order_lines",
        optional refunded_amount: i64 = "refunded_amount",
        optional authorized_amount: i64 = "authorized_amount",
        optional recurring_payment_method: String = "recurring_payment_method",
        optional acquirer_message: String = "acquirer_message",
        optional payment_context: String = "payment_context",
        optional billing_address: Address = "billing_address",
        optional shipping_address: Address = "shipping_address",
    }
}

impl Charge {
    pub fn is_settled(&self) -> bool {
        self.state == Some(ChargeState::Settled)
    }

    pub fn error_kind(&self) -> Option<TransactionError> {
        self.error.as_deref().and_then(TransactionError::parse)
    }
}

wire_record! {
    /// Customer created together with a charge.
    pub struct CustomerCreate: request "customer_create" {
        optional handle: String = "handle",
        optional email: String = "email",
        optional first_name: String = "first_name",
        optional last_name: String = "last_name",
        optional company: String = "company",
        optional address: String = "address",
        optional address2: String = "address2",
        optional city: String = "city",
        optional postal_code: String = "postal_code",
        optional country: String = "country",
        optional phone: String = "phone",
        optional vat: String = "vat",
        optional test: bool = "test",
        optional generate_handle: bool = "generate_handle",
        optional metadata: WireMap = "metadata",
    }
}

impl CustomerCreate {
    pub fn new() -> Self {
        Self {
            handle: None,
            email: None,
            first_name: None,
            last_name: None,
            company: None,
            address: None,
            address2: None,
            city: None,
            postal_code: None,
            country: None,
            phone: None,
            vat: None,
            test: None,
            generate_handle: None,
            metadata: None,
        }
    }

    setter!(opt handle: String);
    setter!(opt email: String);
    setter!(opt first_name: String);
    setter!(opt last_name: String);
    setter!(opt company: String);
    setter!(opt address: String);
    setter!(opt address2: String);
    setter!(opt city: String);
    setter!(opt postal_code: String);
    setter!(opt country: String);
    setter!(opt phone: String);
    setter!(opt vat: String);
    setter!(opt test: bool);
    setter!(opt generate_handle: bool);
    setter!(opt metadata: WireMap);
}

impl Default for CustomerCreate {
    fn default() -> Self {
        Self::new()
    }
}

wire_record! {
    pub struct ChargeCreate: request "charge_create" {
        /// Per-account unique reference, becomes the invoice handle
        required handle: String = "handle",
        /// Idempotency key
        optional key: String = "key",
        optional amount: i64 = "amount" where validate::non_negative,
        optional currency: String = "currency",
        optional customer: CustomerCreate = "customer",
        optional metadata: WireMap = "metadata",
        /// Payment method id, card token or `ct_…` reference
        required source: String = "source",
        optional settle: bool = "settle",
        optional recurring: bool = "recurring",
        optional parameters: WireMap = "parameters",
        optional ordertext: String = "ordertext",
        optional order_lines: Vec<OrderLine> = "order_lines",
        optional customer_handle: String = "customer_handle",
        optional billing_address: Address = "billing_address",
        optional shipping_address: Address = "shipping_address",
        optional use_pm_for_subscription: bool = "use_pm_for_subscription",
        optional text_on_statement: String = "text_on_statement",
        optional payment_method_reference: String = "payment_method_reference",
        optional async_processing: bool = "async",
        optional acquirer_reference: String = "acquirer_reference",
        optional account_funding_information: AccountFundingInformation =
            "account_funding_information",
        /// Marks the charge as an account funding transaction
        optional account_funding: bool = "account_funding",
    }
}

impl ChargeCreate {
    pub fn new(handle: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            handle: handle.into(),
            key: None,
            amount: None,
            currency: None,
            customer: None,
            metadata: None,
            source: source.into(),
            settle: None,
            recurring: None,
            parameters: None,
            ordertext: None,
            order_lines: None,
            customer_handle: None,
            billing_address: None,
            shipping_address: None,
            use_pm_for_subscription: None,
            text_on_statement: None,
            payment_method_reference: None,
            async_processing: None,
            acquirer_reference: None,
            account_funding_information: None,
            account_funding: None,
        }
    }
}

wire_record! {
    /// Settles an authorized charge, fully or partially.
    pub struct ChargeSettle: request "charge_settle" {
        optional key: String = "key",
        optional amount: i64 = "amount" where validate::non_negative,
        optional ordertext: String = "ordertext",
        optional order_lines: Vec<OrderLine> = "order_lines",
        optional acquirer_reference: String = "acquirer_reference",
    }
}

impl ChargeSettle {
    pub fn new() -> Self {
        Self {
            key: None,
            amount: None,
            ordertext: None,
            order_lines: None,
            acquirer_reference: None,
        }
    }
}

impl Default for ChargeSettle {
    fn default() -> Self {
        Self::new()
    }
}

// Requests

#[derive(Debug, Clone)]
pub struct CreateCharge {
    charge: ChargeCreate,
}

impl CreateCharge {
    pub fn new(handle: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            charge: ChargeCreate::new(handle, source),
        }
    }

    setter!(opt charge.key: String);
    setter!(opt charge.amount: i64);
    setter!(opt charge.currency: String);
    setter!(opt charge.customer: CustomerCreate);
    setter!(opt charge.metadata: WireMap);
    setter!(opt charge.settle: bool);
    setter!(opt charge.recurring: bool);
    setter!(opt charge.parameters: WireMap);
    setter!(opt charge.ordertext: String);
    setter!(opt charge.order_lines: Vec<OrderLine>);
    setter!(opt charge.customer_handle: String);
    setter!(opt charge.billing_address: Address);
    setter!(opt charge.shipping_address: Address);
    setter!(opt charge.use_pm_for_subscription: bool);
    setter!(opt charge.text_on_statement: String);
    setter!(opt charge.payment_method_reference: String);
    setter!(opt charge.async_processing: bool);
    setter!(opt charge.acquirer_reference: String);
    setter!(opt charge.account_funding_information: AccountFundingInformation);
    setter!(opt charge.account_funding: bool);
}

impl Endpoint for CreateCharge {
    type Response = Charge;
    const METHOD: Method = Method::Post;

    fn endpoint(&self) -> Cow<'_, str> {
        "/charge".into()
    }

    fn data(&self) -> RequestData<'_> {
        RequestData::Json(&self.charge)
    }
}

#[derive(Debug, Clone)]
pub struct GetCharge {
    handle: String,
}

impl GetCharge {
    pub fn new(handle: impl Into<String>) -> Self {
        Self {
            handle: handle.into(),
        }
    }
}

impl Endpoint for GetCharge {
    type Response = Charge;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/charge/{}", self.handle).into()
    }
}

#[derive(Debug, Clone)]
pub struct SettleCharge {
    handle: String,
    settle: ChargeSettle,
}

impl SettleCharge {
    pub fn new(handle: impl Into<String>) -> Self {
        Self {
            handle: handle.into(),
            settle: ChargeSettle::new(),
        }
    }

    setter!(opt settle.key: String);
    setter!(opt settle.amount: i64);
    setter!(opt settle.ordertext: String);
    setter!(opt settle.order_lines: Vec<OrderLine>);
    setter!(opt settle.acquirer_reference: String);
}

impl Endpoint for SettleCharge {
    type Response = Charge;
    const METHOD: Method = Method::Post;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/charge/{}/settle", self.handle).into()
    }

    fn data(&self) -> RequestData<'_> {
        RequestData::Json(&self.settle)
    }
}

#[derive(Debug, Clone)]
pub struct CancelCharge {
    handle: String,
}

impl CancelCharge {
    pub fn new(handle: impl Into<String>) -> Self {
        Self {
            handle: handle.into(),
        }
    }
}

impl Endpoint for CancelCharge {
    type Response = Charge;
    const METHOD: Method = Method::Post;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/charge/{}/cancel", self.handle).into()
    }
}

pub(crate) fn register(builder: &mut RegistryBuilder) -> Result<(), RegistryError> {
    builder
        .model::<Charge>()?
        .model::<CustomerCreate>()?
        .model::<ChargeCreate>()?
        .model::<ChargeSettle>()?;
    Ok(())
}
