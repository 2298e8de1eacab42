pub mod accounts;
pub mod agreements;
pub mod charges;
pub mod invoices;
pub mod payment_methods;
pub mod refunds;
pub mod transactions;
pub mod webhooks;

use crate::error::ApiErrorBody;
use crate::macros::{setter, wire_record};
use crate::mapper::{Registry, RegistryError, validate};
use chrono::{DateTime, Utc};

wire_record! {
    pub struct Address: both "address" {
        optional address1: String = "address1",
        optional address2: String = "address2",
        optional address3: String = "address3",
        optional city: String = "city",
        optional country: String = "country",
        optional postal_code: String = "postal_code",
        optional state_or_province: String = "state_or_province",
    }
}

impl Address {
    pub fn new() -> Self {
        Self {
            address1: None,
            address2: None,
            address3: None,
            city: None,
            country: None,
            postal_code: None,
            state_or_province: None,
        }
    }

    setter!(opt address1: String);
    setter!(opt address2: String);
    setter!(opt address3: String);
    setter!(opt city: String);
    setter!(opt country: String);
    setter!(opt postal_code: String);
    setter!(opt state_or_province: String);
}

impl Default for Address {
    fn default() -> Self {
        Self::new()
    }
}

wire_record! {
    /// Sender details required by some acquirers for account funding transactions.
    pub struct AccountFundingInformation: both "account_funding_information" {
        optional sender_account_number: String = "sender_account_number",
        optional sender_reference: String = "sender_reference",
        optional sender_first_name: String = "sender_first_name",
        optional sender_last_name: String = "sender_last_name",
        optional sender_address: String = "sender_address",
        optional sender_city: String = "sender_city",
        optional sender_postal_code: String = "sender_postal_code",
        optional sender_state: String = "sender_state",
        optional sender_country: String = "sender_country",
        /// `yyyy-MM-dd`
        optional sender_date_of_birth: String = "sender_date_of_birth",
    }
}

impl AccountFundingInformation {
    pub fn new() -> Self {
        Self {
            sender_account_number: None,
            sender_reference: None,
            sender_first_name: None,
            sender_last_name: None,
            sender_address: None,
            sender_city: None,
            sender_postal_code: None,
            sender_state: None,
            sender_country: None,
            sender_date_of_birth: None,
        }
    }

    setter!(opt sender_account_number: String);
    setter!(opt sender_reference: String);
    setter!(opt sender_first_name: String);
    setter!(opt sender_last_name: String);
    setter!(opt sender_address: String);
    setter!(opt sender_city: String);
    setter!(opt sender_postal_code: String);
    setter!(opt sender_state: String);
    setter!(opt sender_country: String);
    setter!(opt sender_date_of_birth: String);
}

impl Default for AccountFundingInformation {
    fn default() -> Self {
        Self::new()
    }
}

wire_record! {
    /// A line on an outbound charge or settle request.
    pub struct OrderLine: request "order_line" {
        required ordertext: String = "ordertext",
        required amount: i64 = "amount" where validate::non_negative,
        optional quantity: i64 = "quantity" where validate::non_negative,
        optional vat: f64 = "vat",
        optional amount_incl_vat: bool = "amount_incl_vat",
    }
}

impl OrderLine {
    pub fn new(ordertext: impl Into<String>, amount: i64) -> Self {
        Self {
            ordertext: ordertext.into(),
            amount,
            quantity: None,
            vat: None,
            amount_incl_vat: None,
        }
    }

    setter!(opt quantity: i64);
    setter!(opt vat: f64);
    setter!(opt amount_incl_vat: bool);
}

wire_record! {
    /// Query parameters shared by every list endpoint.
    ///
    /// `interval` takes precedence over `from`. When paging with `next_page_token` every
    /// other parameter must stay the same as in the first request.
    pub struct CollectionQuery: request "collection_query" {
        optional from: DateTime<Utc> = "from",
        optional to: DateTime<Utc> = "to",
        optional interval: String = "interval" where validate::iso_duration,
        optional size: i64 = "size" default 20 where validate::page_size,
        optional next_page_token: String = "next_page_token",
    }
}

impl CollectionQuery {
    pub fn new() -> Self {
        Self {
            from: None,
            to: None,
            interval: None,
            size: None,
            next_page_token: None,
        }
    }
}

impl Default for CollectionQuery {
    fn default() -> Self {
        Self::new()
    }
}

/// Every built-in record and family, checked for dangling references.
pub fn builtin() -> Result<Registry, RegistryError> {
    let mut builder = Registry::builder();
    builder
        .model::<ApiErrorBody>()?
        .model::<Address>()?
        .model::<AccountFundingInformation>()?
        .model::<OrderLine>()?
        .model::<CollectionQuery>()?;

    accounts::register(&mut builder)?;
    agreements::register(&mut builder)?;
    charges::register(&mut builder)?;
    invoices::register(&mut builder)?;
    payment_methods::register(&mut builder)?;
    refunds::register(&mut builder)?;
    transactions::register(&mut builder)?;
    webhooks::register(&mut builder)?;

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::{FromWire, ToWire};
    use serde_json::json;

    #[test]
    fn builtin_registry_is_consistent() {
        let registry = builtin().unwrap();

        for record in [
            "refund",
            "charge",
            "invoice",
            "transaction",
            "card_transaction",
            "card",
            "payment_method",
        ] {
            assert!(registry.contains(record), "{record}");
        }
        assert!(registry.family("transaction").is_ok());
        assert!(registry.family("agreement").is_ok());
    }

    #[test]
    fn address_round_trips() {
        let address = Address::new()
            .address1("Amagerfaellevej 56")
            .city("Copenhagen")
            .postal_code("2300")
            .country("DK");

        let wire = address.to_wire().unwrap();

        assert_eq!(
            serde_json::Value::Object(wire.clone()),
            json!({
                "address1": "Amagerfaellevej 56",
                "city": "Copenhagen",
                "country": "DK",
                "postal_code": "2300"
            })
        );
        assert_eq!(Address::from_wire(&wire).unwrap(), address);
    }

    #[test]
    fn account_funding_information_round_trips() {
        let info = AccountFundingInformation::new()
            .sender_account_number("DK5000400440116243")
            .sender_reference("ref-42")
            .sender_first_name("Jane")
            .sender_last_name("Doe")
            .sender_address("Nørregade 1")
            .sender_city("Copenhagen")
            .sender_postal_code("1165")
            .sender_state("Capital Region")
            .sender_country("DK")
            .sender_date_of_birth("1990-04-28");

        let wire = info.to_wire().unwrap();

        assert_eq!(
            serde_json::Value::Object(wire.clone()),
            json!({
                "sender_account_number": "DK5000400440116243",
                "sender_reference": "ref-42",
                "sender_first_name": "Jane",
                "sender_last_name": "Doe",
                "sender_address": "Nørregade 1",
                "sender_city": "Copenhagen",
                "sender_postal_code": "1165",
                "sender_state": "Capital Region",
                "sender_country": "DK",
                "sender_date_of_birth": "1990-04-28"
            })
        );
        assert_eq!(AccountFundingInformation::from_wire(&wire).unwrap(), info);
    }

    #[test]
    fn collection_query_keeps_only_what_was_set() {
        let query = CollectionQuery {
            size: Some(20),
            next_page_token: Some("tok123".to_string()),
            ..CollectionQuery::new()
        };

        let wire = query.to_wire().unwrap();

        assert_eq!(
            serde_json::Value::Object(wire),
            json!({"size": 20, "next_page_token": "tok123"})
        );
    }

    #[test]
    fn collection_query_rejects_bad_parameters() {
        let too_small = CollectionQuery {
            size: Some(5),
            ..CollectionQuery::new()
        };
        assert!(too_small.to_wire().is_err());

        let not_a_duration = CollectionQuery {
            interval: Some("1 week".to_string()),
            ..CollectionQuery::new()
        };
        assert!(not_a_duration.to_wire().is_err());
    }
}
