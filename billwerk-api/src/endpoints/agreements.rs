use crate::macros::{wire_enum, wire_family, wire_record};
use crate::mapper::{Polymorphic, RegistryBuilder, RegistryError};
use crate::transport::Endpoint;
use chrono::{DateTime, Utc};
use std::borrow::Cow;

// Common

wire_enum! {
    pub enum AgreementState {
        Active = "active",
        Inactive = "inactive",
        Deleted = "deleted",
    }
}

wire_record! {
    /// A payment method agreement between the account and a provider.
    pub struct AgreementCommon: response "agreement" {
        required id: String = "id",
        required name: String = "name",
        /// Kept as sent, so new providers are still visible
        required agreement_type: String = "type",
        required_enum state: AgreementState = "state",
        optional currency: String = "currency",
        required created: DateTime<Utc> = "created",
        optional test: bool = "test",
    }
}

wire_record! {
    pub struct CardAgreement: response "card_agreement" extends common: AgreementCommon {
        required card_gateway: String = "card_gateway",
        optional acquirer: String = "acquirer",
        optional merchant_id: String = "merchant_id",
        optional threed_secure: bool = "threed_secure",
        optional card_types: Vec<String> = "card_types",
    }
}

wire_record! {
    pub struct MobilepayAgreement: response "mobilepay_agreement" extends common: AgreementCommon {
        optional merchant_vat: String = "merchant_vat",
        optional store_id: String = "store_id",
    }
}

wire_record! {
    /// MobilePay Subscriptions
    pub struct MpsAgreement: response "mps_agreement" extends common: AgreementCommon {
        optional merchant_id: String = "merchant_id",
        optional redirect_url: String = "redirect_url",
    }
}

wire_record! {
    pub struct VippsAgreement: response "vipps_agreement" extends common: AgreementCommon {
        optional client_id: String = "client_id",
        optional merchant_serial_number: String = "merchant_serial_number",
    }
}

wire_record! {
    pub struct ViabillAgreement: response "viabill_agreement" extends common: AgreementCommon {
        optional api_key: String = "api_key",
    }
}

wire_record! {
    pub struct AnydayAgreement: response "anyday_agreement" extends common: AgreementCommon {
        optional api_key: String = "api_key",
        optional private_key: String = "private_key",
    }
}

wire_record! {
    pub struct SwishAgreement: response "swish_agreement" extends common: AgreementCommon {
        optional payee_alias: String = "payee_alias",
    }
}

wire_record! {
    pub struct ResursAgreement: response "resurs_agreement" extends common: AgreementCommon {
        optional store_id: String = "store_id",
        optional username: String = "username",
    }
}

wire_record! {
    pub struct KlarnaAgreement: response "klarna_agreement" extends common: AgreementCommon {
        optional username: String = "username",
        optional region: String = "region",
    }
}

wire_record! {
    pub struct PaypalAgreement: response "paypal_agreement" extends common: AgreementCommon {
        optional merchant_id: String = "merchant_id",
        optional client_id: String = "client_id",
    }
}

wire_record! {
    pub struct ApplepayAgreement: response "applepay_agreement" extends common: AgreementCommon {
        optional domains: Vec<String> = "domains",
    }
}

wire_record! {
    pub struct GooglepayAgreement: response "googlepay_agreement" extends common: AgreementCommon {
        optional merchant_id: String = "merchant_id",
    }
}

wire_record! {
    pub struct OfflineAgreement: response "offline_agreement" extends common: AgreementCommon {
        required payment_instructions: String = "payment_instructions",
        optional settle_description: String = "settle_description",
    }
}

wire_record! {
    pub struct SepaAgreement: response "sepa_agreement" extends common: AgreementCommon {
        optional creditor_id: String = "creditor_id",
    }
}

wire_record! {
    pub struct WechatpayAgreement: response "wechatpay_agreement" extends common: AgreementCommon {
        optional app_id: String = "app_id",
        optional merchant_id: String = "merchant_id",
    }
}

wire_family! {
    /// A provider agreement, shaped by its inline `type`.
    pub enum Agreement: "agreement" by "type" {
        Card(CardAgreement) for "card";
        Mobilepay(MobilepayAgreement) for "mobilepay";
        MobilePaySubscriptions(MpsAgreement) for "mobilepay_subscriptions";
        Vipps(VippsAgreement) for "vipps", "vipps_recurring";
        Viabill(ViabillAgreement) for "viabill";
        Anyday(AnydayAgreement) for "anyday";
        Swish(SwishAgreement) for "swish";
        Resurs(ResursAgreement) for "resurs";
        Klarna(KlarnaAgreement) for "klarna";
        Paypal(PaypalAgreement) for "paypal";
        Applepay(ApplepayAgreement) for "applepay";
        Googlepay(GooglepayAgreement) for "googlepay";
        Offline(OfflineAgreement) for "offline";
        Sepa(SepaAgreement) for "sepa";
        Wechatpay(WechatpayAgreement) for "wechatpay";
        _ => Other(AgreementCommon);
    }
}

impl Agreement {
    pub fn common(&self) -> &AgreementCommon {
        match self {
            Self::Card(agreement) => &agreement.common,
            Self::Mobilepay(agreement) => &agreement.common,
            Self::MobilePaySubscriptions(agreement) => &agreement.common,
            Self::Vipps(agreement) => &agreement.common,
            Self::Viabill(agreement) => &agreement.common,
            Self::Anyday(agreement) => &agreement.common,
            Self::Swish(agreement) => &agreement.common,
            Self::Resurs(agreement) => &agreement.common,
            Self::Klarna(agreement) => &agreement.common,
            Self::Paypal(agreement) => &agreement.common,
            Self::Applepay(agreement) => &agreement.common,
            Self::Googlepay(agreement) => &agreement.common,
            Self::Offline(agreement) => &agreement.common,
            Self::Sepa(agreement) => &agreement.common,
            Self::Wechatpay(agreement) => &agreement.common,
            Self::Other(common) => common,
        }
    }

    pub fn id(&self) -> &str {
        &self.common().id
    }
}

// Requests

#[derive(Debug, Clone)]
pub struct GetAgreement {
    id: String,
}

impl GetAgreement {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl Endpoint for GetAgreement {
    type Response = Agreement;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/agreement/{}", self.id).into()
    }
}

pub(crate) fn register(builder: &mut RegistryBuilder) -> Result<(), RegistryError> {
    builder
        .model::<AgreementCommon>()?
        .model::<CardAgreement>()?
        .model::<MobilepayAgreement>()?
        .model::<MpsAgreement>()?
        .model::<VippsAgreement>()?
        .model::<ViabillAgreement>()?
        .model::<AnydayAgreement>()?
        .model::<SwishAgreement>()?
        .model::<ResursAgreement>()?
        .model::<KlarnaAgreement>()?
        .model::<PaypalAgreement>()?
        .model::<ApplepayAgreement>()?
        .model::<GooglepayAgreement>()?
        .model::<OfflineAgreement>()?
        .model::<SepaAgreement>()?
        .model::<WechatpayAgreement>()?
        .family(Agreement::family())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::{FromWire, MapperError, WireMap};
    use serde_json::{Value, json};

    fn agreement(kind: &str, extra: Value) -> WireMap {
        let Value::Object(mut map) = json!({
            "id": "ca_1f8b0a0c",
            "name": "Primary",
            "type": kind,
            "state": "active",
            "currency": "DKK",
            "created": "2023-11-02T09:15:00.000Z"
        }) else {
            unreachable!()
        };
        if let Value::Object(extra) = extra {
            map.extend(extra);
        }
        map
    }

    #[test]
    fn anyday_agreement() {
        let map = agreement(
            "anyday",
            json!({"test": true, "api_key": "ak_1", "private_key": "pk_1"}),
        );

        let Agreement::Anyday(anyday) = Agreement::from_wire(&map).unwrap() else {
            panic!("expected an Anyday agreement");
        };
        assert_eq!(anyday.common.test, Some(true));
        assert_eq!(anyday.api_key.as_deref(), Some("ak_1"));
        assert_eq!(anyday.private_key.as_deref(), Some("pk_1"));
        assert_eq!(anyday.common.state, Some(AgreementState::Active));
    }

    #[test]
    fn anyday_agreement_needs_no_credentials() {
        let map = agreement("anyday", json!({}));

        let Agreement::Anyday(anyday) = Agreement::from_wire(&map).unwrap() else {
            panic!("expected an Anyday agreement");
        };
        assert_eq!(anyday.common.test, None);
        assert_eq!(anyday.api_key, None);
        assert_eq!(anyday.private_key, None);
    }

    #[test]
    fn card_agreement_requires_its_gateway() {
        let map = agreement("card", json!({}));

        assert_eq!(
            Agreement::from_wire(&map).unwrap_err(),
            MapperError::MissingRequiredField {
                record: "card_agreement",
                field: "card_gateway"
            }
        );
    }

    #[test]
    fn unknown_provider_reads_as_common() {
        let map = agreement("satispay", json!({"satispay_key": "k"}));

        let agreement = Agreement::from_wire(&map).unwrap();

        assert_eq!(agreement.record_name(), "agreement");
        assert_eq!(agreement.id(), "ca_1f8b0a0c");
        assert_eq!(agreement.common().agreement_type, "satispay");
    }

    #[test]
    fn missing_type_is_a_missing_field() {
        let mut map = agreement("card", json!({"card_gateway": "clearhaus"}));
        map.remove("type");

        assert_eq!(
            Agreement::from_wire(&map).unwrap_err(),
            MapperError::MissingRequiredField {
                record: "agreement",
                field: "type"
            }
        );
    }

    #[test]
    fn vipps_variants_share_a_shape() {
        for kind in ["vipps", "vipps_recurring"] {
            let agreement = Agreement::from_wire(&agreement(kind, json!({}))).unwrap();

            assert!(matches!(agreement, Agreement::Vipps(_)), "{kind}");
        }
    }

    #[test]
    fn endpoint_path() {
        assert_eq!(GetAgreement::new("ca_1").endpoint(), "/agreement/ca_1");
    }
}
