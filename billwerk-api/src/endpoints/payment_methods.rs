use crate::endpoints::CollectionQuery;
use crate::endpoints::transactions::{CardType, ErrorState, StrongAuthenticationStatus};
use crate::macros::{setter, wire_enum, wire_record};
use crate::mapper::{RegistryBuilder, RegistryError, WireMap};
use crate::transport::{Endpoint, RequestData};
use chrono::{DateTime, Utc};
use std::borrow::Cow;

// Common

wire_enum! {
    pub enum PaymentMethodState {
        Active = "active",
        Inactivated = "inactivated",
        Failed = "failed",
        Pending = "pending",
        Deleted = "deleted",
    }
}

wire_enum! {
    pub enum PaymentMethodRange {
        Created = "created",
        Failed = "failed",
        Reactivated = "reactivated",
    }
}

wire_record! {
    /// A card saved on a customer.
    pub struct Card: response "card" {
        required id: String = "id",
        required_enum state: PaymentMethodState = "state",
        optional customer: String = "customer",
        optional reference: String = "reference",
        optional created: DateTime<Utc> = "created",
        optional failed: DateTime<Utc> = "failed",
        optional reactivated: DateTime<Utc> = "reactivated",
        optional fingerprint: String = "fingerprint",
        optional gw_ref: String = "gw_ref",
        optional card_agreement: String = "card_agreement",
        optional card_type: CardType = "card_type",
        optional transaction_card_type: CardType = "transaction_card_type",
        /// `MM-YY`
        optional exp_date: String = "exp_date",
        optional masked_card: String = "masked_card",
        optional card_country: String = "card_country",
        optional last_success: DateTime<Utc> = "last_success",
        optional last_failed: DateTime<Utc> = "last_failed",
        optional first_fail: DateTime<Utc> = "first_fail",
        optional error_code: String = "error_code",
        optional error_state: ErrorState = "error_state",
        optional strong_authentication_status: StrongAuthenticationStatus =
            "strong_authentication_status",
        optional three_d_secure_status: String = "three_d_secure_status",
        optional risk_rule: String = "risk_rule",
    }
}

impl Card {
    pub fn is_active(&self) -> bool {
        self.state == Some(PaymentMethodState::Active)
    }
}

wire_record! {
    pub struct PaymentMethod: response "payment_method" {
        required id: String = "id",
        required_enum state: PaymentMethodState = "state",
        required customer: String = "customer",
        optional reference: String = "reference",
        required created: DateTime<Utc> = "created",
        optional failed: DateTime<Utc> = "failed",
        /// Kept as sent, so new payment methods are still visible
        required payment_type: String = "payment_type",
        optional card: Card = "card",
        optional mps: WireMap = "mps",
        optional vipps_recurring: WireMap = "vipps_recurring",
        optional sepa_mandate: WireMap = "sepa_mandate",
    }
}

wire_record! {
    /// Query string of a payment method listing.
    pub struct PaymentMethodQuery: request "payment_method_query" extends query: CollectionQuery {
        optional range: PaymentMethodRange = "range",
        optional customer: String = "customer",
        optional state: PaymentMethodState = "state",
        optional payment_type: String = "payment_type",
    }
}

impl PaymentMethodQuery {
    pub fn new() -> Self {
        Self {
            query: CollectionQuery::new(),
            range: None,
            customer: None,
            state: None,
            payment_type: None,
        }
    }

    /// The same query asking for the page behind `token`.
    pub fn next_page(&self, token: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.query.next_page_token = Some(token.into());
        next
    }

    setter!(opt range: PaymentMethodRange);
    setter!(opt customer: String);
    setter!(opt state: PaymentMethodState);
    setter!(opt payment_type: String);
    setter!(opt query.from: DateTime<Utc>);
    setter!(opt query.to: DateTime<Utc>);
    setter!(opt query.interval: String);
    setter!(opt query.size: i64);
    setter!(opt query.next_page_token: String);
}

impl Default for PaymentMethodQuery {
    fn default() -> Self {
        Self::new()
    }
}

wire_record! {
    pub struct PaymentMethodCollection: response "payment_method_collection" {
        required size: i64 = "size",
        required count: i64 = "count",
        required content: Vec<PaymentMethod> = "content",
        optional range: PaymentMethodRange = "range",
        optional from: DateTime<Utc> = "from",
        optional to: DateTime<Utc> = "to",
        optional next_page_token: String = "next_page_token",
    }
}

impl PaymentMethodCollection {
    pub fn has_more(&self) -> bool {
        self.next_page_token.is_some()
    }
}

// Requests

#[derive(Debug, Clone)]
pub struct GetPaymentMethod {
    id: String,
}

impl GetPaymentMethod {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl Endpoint for GetPaymentMethod {
    type Response = PaymentMethod;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/payment_method/{}", self.id).into()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListPaymentMethods {
    query: PaymentMethodQuery,
}

impl ListPaymentMethods {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(mut self, query: PaymentMethodQuery) -> Self {
        self.query = query;
        self
    }

    pub fn next_page(&self, token: impl Into<String>) -> Self {
        Self {
            query: self.query.next_page(token),
        }
    }

    setter!(opt query.range: PaymentMethodRange);
    setter!(opt query.customer: String);
    setter!(opt query.state: PaymentMethodState);
    setter!(opt query.payment_type: String);
}

impl Endpoint for ListPaymentMethods {
    type Response = PaymentMethodCollection;

    fn endpoint(&self) -> Cow<'_, str> {
        "/list/payment_method".into()
    }

    fn data(&self) -> RequestData<'_> {
        RequestData::Query(&self.query)
    }
}

pub(crate) fn register(builder: &mut RegistryBuilder) -> Result<(), RegistryError> {
    builder
        .model::<Card>()?
        .model::<PaymentMethod>()?
        .model::<PaymentMethodQuery>()?
        .model::<PaymentMethodCollection>()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::{FromWire, MapperError, ToWire};
    use serde_json::{Value, json};

    fn wire(value: Value) -> WireMap {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    fn payment_method() -> Value {
        json!({
            "id": "ca_fcfac2016614418f969fa5697383e47c",
            "state": "active",
            "customer": "cust-0001",
            "created": "2024-04-28T13:28:06.440Z",
            "payment_type": "card",
            "card": {
                "id": "ca_fcfac2016614418f969fa5697383e47c",
                "state": "active",
                "customer": "cust-0001",
                "card_type": "visa",
                "exp_date": "12-27",
                "masked_card": "457199XXXXXX0000",
                "last_success": "2024-04-28T13:28:07.120Z",
                "strong_authentication_status": "threed_secure"
            }
        })
    }

    #[test]
    fn card_payment_method() {
        let method = PaymentMethod::from_wire(&wire(payment_method())).unwrap();

        assert_eq!(method.id, "ca_fcfac2016614418f969fa5697383e47c");
        assert_eq!(method.state, Some(PaymentMethodState::Active));
        let card = method.card.unwrap();
        assert!(card.is_active());
        assert_eq!(card.card_type, Some(CardType::Visa));
        assert_eq!(card.exp_date.as_deref(), Some("12-27"));
        assert_eq!(
            card.strong_authentication_status,
            Some(StrongAuthenticationStatus::ThreedSecure)
        );
        assert_eq!(card.error_state, None);
        assert_eq!(method.mps, None);
    }

    #[test]
    fn card_without_id_is_rejected() {
        let mut value = payment_method();
        value["card"].as_object_mut().unwrap().remove("id");

        assert_eq!(
            PaymentMethod::from_wire(&wire(value)).unwrap_err(),
            MapperError::MissingRequiredField {
                record: "card",
                field: "id"
            }
        );
    }

    #[test]
    fn other_payment_types_keep_their_object() {
        let method = PaymentMethod::from_wire(&wire(json!({
            "id": "mps_1",
            "state": "pending",
            "customer": "cust-0001",
            "created": "2024-04-28",
            "payment_type": "mobilepay_subscriptions",
            "mps": {"external_id": "e_1"}
        })))
        .unwrap();

        assert_eq!(method.state, Some(PaymentMethodState::Pending));
        assert_eq!(method.card, None);
        assert_eq!(method.mps.unwrap()["external_id"], json!("e_1"));
    }

    #[test]
    fn collection_page() {
        let page = PaymentMethodCollection::from_wire(&wire(json!({
            "size": 20,
            "count": 1,
            "content": [payment_method()],
            "range": "created"
        })))
        .unwrap();

        assert_eq!(page.content.len(), 1);
        assert_eq!(page.range, Some(PaymentMethodRange::Created));
        assert!(!page.has_more());
    }

    #[test]
    fn list_query_keeps_filters_across_pages() {
        let first = ListPaymentMethods::new()
            .query(PaymentMethodQuery::new().size(50))
            .customer("cust-0001")
            .state(PaymentMethodState::Active);

        let second = first.next_page("tok123");

        assert_eq!(
            Value::Object(second.query.to_wire().unwrap()),
            json!({
                "size": 50,
                "next_page_token": "tok123",
                "customer": "cust-0001",
                "state": "active"
            })
        );
        assert_eq!(first.query.query.next_page_token, None);
    }

    #[test]
    fn endpoint_paths() {
        let list = ListPaymentMethods::new();

        assert_eq!(list.endpoint(), "/list/payment_method");
        assert!(matches!(list.data(), RequestData::Query(_)));
        assert_eq!(
            GetPaymentMethod::new("ca_fcfac2016614418f969fa5697383e47c").endpoint(),
            "/payment_method/ca_fcfac2016614418f969fa5697383e47c"
        );
    }
}
