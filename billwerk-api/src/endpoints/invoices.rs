use crate::endpoints::transactions::Transaction;
use crate::endpoints::{Address, CollectionQuery};
use crate::macros::{setter, wire_enum, wire_record};
use crate::mapper::{RegistryBuilder, RegistryError};
use crate::transport::{Endpoint, RequestData};
use chrono::{DateTime, Utc};
use std::borrow::Cow;

// Common

wire_enum! {
    pub enum InvoiceState {
        Created = "created",
        Pending = "pending",
        Dunning = "dunning",
        Settled = "settled",
        Authorized = "authorized",
        Cancelled = "cancelled",
        Failed = "failed",
    }
}

wire_enum! {
    /// How the invoice came to be.
    pub enum InvoiceType {
        /// Subscription renewal
        Subscription = "s",
        /// Subscription one-off
        SubscriptionOneOff = "so",
        /// Subscription instant one-off
        SubscriptionInstantOneOff = "soi",
        /// Subscription change
        SubscriptionChange = "up",
        /// Charge
        Charge = "ch",
        /// Manual
        Manual = "man",
    }
}

wire_enum! {
    /// Timestamp an invoice listing filters and sorts on.
    pub enum InvoiceRange {
        Created = "created",
        Due = "due",
        SettledAt = "settled_at",
        Authorized = "authorized",
        Failed = "failed",
        Cancelled = "cancelled",
        DunningStart = "dunning_start",
        Reminder = "reminder",
    }
}

wire_record! {
    pub struct InvoiceOrderLine: response "invoice_order_line" {
        required id: String = "id",
        required ordertext: String = "ordertext",
        required amount: i64 = "amount",
        required vat: f64 = "vat",
        required quantity: i64 = "quantity",
        optional origin: String = "origin",
        required timestamp: DateTime<Utc> = "timestamp",
        optional discounted_amount: i64 = "discounted_amount",
        optional amount_vat: i64 = "amount_vat",
        optional amount_ex_vat: i64 = "amount_ex_vat",
        optional unit_amount: i64 = "unit_amount",
        optional unit_amount_vat: i64 = "unit_amount_vat",
        optional unit_amount_ex_vat: i64 = "unit_amount_ex_vat",
        optional amount_defined_incl_vat: bool = "amount_defined_incl_vat",
        optional origin_handle: String = "origin_handle",
        optional period_from: DateTime<Utc> = "period_from",
        optional period_to: DateTime<Utc> = "period_to",
    }
}

wire_record! {
    pub struct CreditNoteLine: response "credit_note_line" {
        required amount: i64 = "amount",
        required text: String = "text",
        required quantity: i64 = "quantity",
        optional vat: f64 = "vat",
        optional created: DateTime<Utc> = "created",
        optional order_line_id: String = "order_line_id",
        optional amount_incl_vat: i64 = "amount_incl_vat",
        optional amount_ex_vat: i64 = "amount_ex_vat",
        optional unit_amount: i64 = "unit_amount",
        optional unit_amount_vat: i64 = "unit_amount_vat",
        optional unit_amount_ex_vat: i64 = "unit_amount_ex_vat",
        optional amount_incl_vat_defined: bool = "amount_incl_vat_defined",
        optional period_from: DateTime<Utc> = "period_from",
        optional period_to: DateTime<Utc> = "period_to",
    }
}

wire_record! {
    pub struct CreditNote: response "credit_note" {
        required id: String = "id",
        required invoice: String = "invoice",
        required amount: i64 = "amount",
        optional vat: f64 = "vat",
        optional amount_vat: i64 = "amount_vat",
        optional amount_ex_vat: i64 = "amount_ex_vat",
        required currency: String = "currency",
        required created: DateTime<Utc> = "created",
        optional credit_note_lines: Vec<CreditNoteLine> = "credit_note_lines",
    }
}

wire_record! {
    pub struct Invoice: response "invoice" {
        required id: String = "id",
        required handle: String = "handle",
        required customer: String = "customer",
        optional subscription: String = "subscription",
        optional plan: String = "plan",
        required_enum state: InvoiceState = "state",
        required_enum invoice_type: InvoiceType = "type",
        required amount: i64 = "amount",
        required number: i64 = "number",
        required currency: String = "currency",
        optional due: DateTime<Utc> = "due",
        optional failed: DateTime<Utc> = "failed",
        optional settled: DateTime<Utc> = "settled",
        optional cancelled: DateTime<Utc> = "cancelled",
        optional authorized: DateTime<Utc> = "authorized",
        required created: DateTime<Utc> = "created",
        optional discount_amount: i64 = "discount_amount",
        optional org_amount: i64 = "org_amount",
        optional amount_vat: i64 = "amount_vat",
        optional amount_ex_vat: i64 = "amount_ex_vat",
        optional settled_amount: i64 = "settled_amount",
        optional refunded_amount: i64 = "refunded_amount",
        optional authorized_amount: i64 = "authorized_amount",
        optional credited_amount: i64 = "credited_amount",
        optional period_number: i64 = "period_number",
        optional order_lines: Vec<InvoiceOrderLine> = "order_lines",
        optional transactions: Vec<Transaction> = "transactions",
        optional credit_notes: Vec<CreditNote> = "credit_notes",
        optional dunning_start: DateTime<Utc> = "dunning_start",
        optional recurring_payment_method: String = "recurring_payment_method",
        optional billing_address: Address = "billing_address",
        optional shipping_address: Address = "shipping_address",
    }
}

impl Invoice {
    pub fn is_settled(&self) -> bool {
        self.state == Some(InvoiceState::Settled)
    }
}

wire_record! {
    /// Query string of an invoice listing.
    pub struct InvoiceQuery: request "invoice_query" extends query: CollectionQuery {
        optional range: InvoiceRange = "range",
        optional customer: String = "customer",
        optional subscription: String = "subscription",
    }
}

impl InvoiceQuery {
    pub fn new() -> Self {
        Self {
            query: CollectionQuery::new(),
            range: None,
            customer: None,
            subscription: None,
        }
    }

    /// The same query asking for the page behind `token`.
    pub fn next_page(&self, token: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.query.next_page_token = Some(token.into());
        next
    }

    setter!(opt range: InvoiceRange);
    setter!(opt customer: String);
    setter!(opt subscription: String);
    setter!(opt query.from: DateTime<Utc>);
    setter!(opt query.to: DateTime<Utc>);
    setter!(opt query.interval: String);
    setter!(opt query.size: i64);
    setter!(opt query.next_page_token: String);
}

impl Default for InvoiceQuery {
    fn default() -> Self {
        Self::new()
    }
}

wire_record! {
    /// One page of an invoice listing.
    pub struct InvoiceCollection: response "invoice_collection" {
        required size: i64 = "size",
        required count: i64 = "count",
        required content: Vec<Invoice> = "content",
        optional range: InvoiceRange = "range",
        optional from: DateTime<Utc> = "from",
        optional to: DateTime<Utc> = "to",
        /// Absent on the last page
        optional next_page_token: String = "next_page_token",
    }
}

impl InvoiceCollection {
    pub fn has_more(&self) -> bool {
        self.next_page_token.is_some()
    }
}

// Requests

#[derive(Debug, Clone)]
pub struct GetInvoice {
    id: String,
}

impl GetInvoice {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl Endpoint for GetInvoice {
    type Response = Invoice;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/invoice/{}", self.id).into()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListInvoices {
    query: InvoiceQuery,
}

impl ListInvoices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(mut self, query: InvoiceQuery) -> Self {
        self.query = query;
        self
    }

    /// Follows the cursor of a previous page, keeping every other parameter.
    pub fn next_page(&self, token: impl Into<String>) -> Self {
        Self {
            query: self.query.next_page(token),
        }
    }

    setter!(opt query.range: InvoiceRange);
    setter!(opt query.customer: String);
    setter!(opt query.subscription: String);
}

impl Endpoint for ListInvoices {
    type Response = InvoiceCollection;

    fn endpoint(&self) -> Cow<'_, str> {
        "/list/invoice".into()
    }

    fn data(&self) -> RequestData<'_> {
        RequestData::Query(&self.query)
    }
}

pub(crate) fn register(builder: &mut RegistryBuilder) -> Result<(), RegistryError> {
    builder
        .model::<InvoiceOrderLine>()?
        .model::<CreditNoteLine>()?
        .model::<CreditNote>()?
        .model::<Invoice>()?
        .model::<InvoiceQuery>()?
        .model::<InvoiceCollection>()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::{FromWire, ToWire, WireMap};
    use serde_json::{Value, json};

    fn wire(value: Value) -> WireMap {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    fn invoice() -> Value {
        json!({
            "id": "7b5b4b6c1c8b4b0d9d0d4c7e3f1a2b3c",
            "handle": "inv-1001",
            "customer": "cust-0001",
            "state": "settled",
            "type": "ch",
            "amount": 12500,
            "number": 1001,
            "currency": "DKK",
            "created": "2024-04-28T13:28:06.440Z",
            "settled": "2024-04-28T13:28:07.120Z",
            "order_lines": [{
                "id": "ol_1",
                "ordertext": "Tea",
                "amount": 10000,
                "vat": 0.25,
                "quantity": 1,
                "timestamp": "2024-04-28T13:28:06.440Z",
                "origin": "ondemand"
            }],
            "transactions": [{
                "id": "a7a7195c54f644369922d0dfe794dd0c",
                "state": "settled",
                "invoice": "inv-1001",
                "type": "settle",
                "amount": 12500,
                "currency": "DKK",
                "created": "2024-04-28T13:28:06.440Z",
                "payment_type": "card",
                "card_transaction": {"card_type": "visa", "masked_card": "457199XXXXXX0000"}
            }],
            "credit_notes": []
        })
    }

    #[test]
    fn invoice_with_nested_lines_and_transactions() {
        let invoice = Invoice::from_wire(&wire(invoice())).unwrap();

        assert!(invoice.is_settled());
        assert_eq!(invoice.invoice_type, Some(InvoiceType::Charge));
        let lines = invoice.order_lines.unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].ordertext, "Tea");
        assert_eq!(lines[0].vat, 0.25);
        let transactions = invoice.transactions.unwrap();
        assert!(matches!(
            transactions[0].details,
            Some(crate::endpoints::transactions::TransactionDetails::Card(_))
        ));
        assert_eq!(invoice.credit_notes, None);
    }

    #[test]
    fn credit_note_lines() {
        let note = CreditNote::from_wire(&wire(json!({
            "id": "cn_1",
            "invoice": "inv-1001",
            "amount": 2500,
            "currency": "DKK",
            "created": "2024-05-01",
            "credit_note_lines": [
                {"amount": 2500, "text": "Goodwill", "quantity": 1, "amount_incl_vat_defined": true}
            ]
        })))
        .unwrap();

        let lines = note.credit_note_lines.unwrap();
        assert_eq!(lines[0].text, "Goodwill");
        assert_eq!(lines[0].amount_incl_vat_defined, Some(true));
        assert_eq!(lines[0].period_from, None);
    }

    #[test]
    fn query_propagates_the_cursor() {
        let query = InvoiceQuery::new()
            .size(20)
            .range(InvoiceRange::SettledAt)
            .next_page_token("tok123");

        assert_eq!(
            Value::Object(query.to_wire().unwrap()),
            json!({"size": 20, "range": "settled_at", "next_page_token": "tok123"})
        );
    }

    #[test]
    fn next_page_only_changes_the_cursor() {
        let first = ListInvoices::new()
            .query(InvoiceQuery::new().interval("P1W").size(50))
            .range(InvoiceRange::Created);

        let second = first.next_page("tok456");

        assert_eq!(
            Value::Object(second.query.to_wire().unwrap()),
            json!({
                "interval": "P1W",
                "size": 50,
                "range": "created",
                "next_page_token": "tok456"
            })
        );
        assert_eq!(first.query.query.next_page_token, None);
    }

    #[test]
    fn collection_page() {
        let page = InvoiceCollection::from_wire(&wire(json!({
            "size": 20,
            "count": 1,
            "content": [invoice()],
            "range": "settled_at",
            "next_page_token": "tok789"
        })))
        .unwrap();

        assert_eq!(page.content.len(), 1);
        assert_eq!(page.range, Some(InvoiceRange::SettledAt));
        assert!(page.has_more());
    }

    #[test]
    fn list_is_a_query_request() {
        let list = ListInvoices::new();

        assert_eq!(list.endpoint(), "/list/invoice");
        assert!(matches!(list.data(), RequestData::Query(_)));
        assert_eq!(GetInvoice::new("inv-1001").endpoint(), "/invoice/inv-1001");
    }
}
