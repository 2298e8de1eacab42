use crate::macros::{wire_enum, wire_record};
use crate::mapper::{RegistryBuilder, RegistryError};
use crate::transport::Endpoint;
use chrono::{DateTime, Utc};
use std::borrow::Cow;

// Common

wire_enum! {
    pub enum AccountState {
        Test = "test",
        Live = "live",
        Closed = "closed",
    }
}

wire_record! {
    pub struct Account: response "account" {
        required handle: String = "handle",
        required currency: String = "currency",
        required name: String = "name",
        optional address: String = "address",
        optional address2: String = "address2",
        optional city: String = "city",
        required locale: String = "locale",
        required timezone: String = "timezone",
        required country: String = "country",
        optional email: String = "email",
        optional phone: String = "phone",
        optional vat: String = "vat",
        optional website: String = "website",
        optional logo: String = "logo",
        required id: String = "id",
        required organisation: String = "organisation",
        required created: DateTime<Utc> = "created",
        /// `None` when the API reports a state this client does not know yet
        required_enum state: AccountState = "state",
        optional postal_code: String = "postal_code",
        required default_vat: f64 = "default_vat",
        optional subscription_invoice_prefix: String = "subscription_invoice_prefix",
    }
}

impl Account {
    pub fn is_live(&self) -> bool {
        self.state == Some(AccountState::Live)
    }
}

// Requests

#[derive(Debug, Clone, Default)]
pub struct GetAccount;

impl Endpoint for GetAccount {
    type Response = Account;

    fn endpoint(&self) -> Cow<'_, str> {
        "/account".into()
    }
}

pub(crate) fn register(builder: &mut RegistryBuilder) -> Result<(), RegistryError> {
    builder.model::<Account>()?;
    Ok(())
}
