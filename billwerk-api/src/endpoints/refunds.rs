use crate::endpoints::transactions::{ErrorState, TransactionError};
use crate::macros::{setter, wire_enum, wire_record};
use crate::mapper::{RegistryBuilder, RegistryError, validate};
use crate::transport::{Endpoint, Method, RequestData};
use chrono::{DateTime, Utc};
use std::borrow::Cow;

// Common

wire_enum! {
    pub enum RefundState {
        Refunded = "refunded",
        Failed = "failed",
        Processing = "processing",
    }
}

wire_enum! {
    /// Payment method the refund went back through.
    pub enum RefundType {
        Card = "card",
        Mpo = "mpo",
        Vipps = "vipps",
        VippsRecurring = "vipps_recurring",
        Swish = "swish",
        Viabill = "viabill",
        Anyday = "anyday",
        Manual = "manual",
        Applepay = "applepay",
        Googlepay = "googlepay",
        Paypal = "paypal",
        KlarnaPayNow = "klarna_pay_now",
        KlarnaPayLater = "klarna_pay_later",
        KlarnaSliceIt = "klarna_slice_it",
        KlarnaDirectBankTransfer = "klarna_direct_bank_transfer",
        KlarnaDirectDebit = "klarna_direct_debit",
        Resurs = "resurs",
        MobilepaySubscriptions = "mobilepay_subscriptions",
        Emoney = "emoney",
        Bank = "bank",
    }
}

wire_record! {
    pub struct Refund: response "refund" {
        required id: String = "id",
        required_enum state: RefundState = "state",
        required invoice: String = "invoice",
        required amount: i64 = "amount",
        required currency: String = "currency",
        required transaction: String = "transaction",
        /// Kept as sent, see [`Refund::error_kind`]
        optional error: String = "error",
        required_enum refund_type: RefundType = "type",
        required created: DateTime<Utc> = "created",
        optional credit_note_id: String = "credit_note_id",
        optional ref_transaction: String = "ref_transaction",
        optional error_state: ErrorState = "error_state",
        optional acquirer_message: String = "acquirer_message",
        optional accounting_number: String = "accounting_number",
    }
}

impl Refund {
    pub fn is_refunded(&self) -> bool {
        self.state == Some(RefundState::Refunded)
    }

    pub fn error_kind(&self) -> Option<TransactionError> {
        self.error.as_deref().and_then(TransactionError::parse)
    }
}

wire_record! {
    /// A credit note line describing what part of the invoice is refunded.
    pub struct NoteLine: request "note_line" {
        required amount: i64 = "amount" where validate::non_negative,
        required text: String = "text",
        required quantity: i64 = "quantity" where validate::non_negative,
        optional vat: f64 = "vat",
        optional amount_incl_vat: bool = "amount_incl_vat",
    }
}

impl NoteLine {
    pub fn new(text: impl Into<String>, amount: i64, quantity: i64) -> Self {
        Self {
            amount,
            text: text.into(),
            quantity,
            vat: None,
            amount_incl_vat: None,
        }
    }

    setter!(opt vat: f64);
    setter!(opt amount_incl_vat: bool);
}

wire_record! {
    /// Refund paid back outside the platform.
    pub struct ManualTransfer: request "manual_transfer" {
        required method: String = "method",
        optional comment: String = "comment",
        optional reference: String = "reference",
        required payment_date: DateTime<Utc> = "payment_date",
    }
}

impl ManualTransfer {
    pub fn new(method: impl Into<String>, payment_date: DateTime<Utc>) -> Self {
        Self {
            method: method.into(),
            comment: None,
            reference: None,
            payment_date,
        }
    }

    setter!(opt comment: String);
    setter!(opt reference: String);
}

wire_record! {
    pub struct RefundCreate: request "refund_create" {
        /// Handle or id of the settled invoice
        required invoice: String = "invoice",
        /// Idempotency key
        optional key: String = "key",
        /// Defaults to the full settled amount
        optional amount: i64 = "amount" where validate::non_negative,
        optional vat: f64 = "vat",
        optional text: String = "text",
        optional amount_incl_vat: bool = "amount_incl_vat",
        optional note_lines: Vec<NoteLine> = "note_lines",
        optional manual_transfer: ManualTransfer = "manual_transfer",
        optional acquirer_reference: String = "acquirer_reference",
    }
}

impl RefundCreate {
    pub fn new(invoice: impl Into<String>) -> Self {
        Self {
            invoice: invoice.into(),
            key: None,
            amount: None,
            vat: None,
            text: None,
            amount_incl_vat: None,
            note_lines: None,
            manual_transfer: None,
            acquirer_reference: None,
        }
    }
}

// Requests

#[derive(Debug, Clone)]
pub struct CreateRefund {
    refund: RefundCreate,
}

impl CreateRefund {
    pub fn new(invoice: impl Into<String>) -> Self {
        Self {
            refund: RefundCreate::new(invoice),
        }
    }

    setter!(opt refund.key: String);
    setter!(opt refund.amount: i64);
    setter!(opt refund.vat: f64);
    setter!(opt refund.text: String);
    setter!(opt refund.amount_incl_vat: bool);
    setter!(opt refund.note_lines: Vec<NoteLine>);
    setter!(opt refund.manual_transfer: ManualTransfer);
    setter!(opt refund.acquirer_reference: String);
}

impl Endpoint for CreateRefund {
    type Response = Refund;
    const METHOD: Method = Method::Post;

    fn endpoint(&self) -> Cow<'_, str> {
        "/refund".into()
    }

    fn data(&self) -> RequestData<'_> {
        RequestData::Json(&self.refund)
    }
}

#[derive(Debug, Clone)]
pub struct GetRefund {
    id: String,
}

impl GetRefund {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl Endpoint for GetRefund {
    type Response = Refund;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/refund/{}", self.id).into()
    }
}

pub(crate) fn register(builder: &mut RegistryBuilder) -> Result<(), RegistryError> {
    builder
        .model::<Refund>()?
        .model::<NoteLine>()?
        .model::<ManualTransfer>()?
        .model::<RefundCreate>()?;
    Ok(())
}
