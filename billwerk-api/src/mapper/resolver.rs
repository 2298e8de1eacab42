use super::{FieldValue, Fields, MapperError, Registry, WireMap, unmarshal::read_record};
use serde_json::Value;

/// Unmarshals `map` with the shape registered for `discriminator` in `family`.
///
/// A discriminator the family does not know yields the base shape, carrying only the
/// fields every member shares.
pub fn unmarshal_variant(
    registry: &Registry,
    family: &str,
    discriminator: &str,
    map: &WireMap,
) -> Result<Fields, MapperError> {
    let spec = registry.resolve(family, discriminator)?;
    read_record(registry, spec, map)
}

/// Like [`unmarshal_variant`], reading the discriminator from `map` itself.
pub fn unmarshal_tagged(
    registry: &Registry,
    family: &str,
    map: &WireMap,
) -> Result<Fields, MapperError> {
    let family = registry.family(family)?;
    let discriminator = match map.get(family.discriminator()) {
        Some(Value::String(value)) => value.as_str(),
        None | Some(Value::Null) => {
            return Err(MapperError::MissingRequiredField {
                record: family.base(),
                field: family.discriminator(),
            });
        }
        Some(_) => {
            return Err(MapperError::InvalidType {
                record: family.base(),
                field: family.discriminator(),
                expected: "a string",
            });
        }
    };

    unmarshal_variant(registry, family.name(), discriminator, map)
}

/// Reads payment-method details kept next to their discriminator.
///
/// The enclosing object carries the discriminator, and the details sit under a key named
/// after the resolved member. A missing discriminator or details object reads as unset.
pub(crate) fn read_keyed(
    registry: &Registry,
    family: &str,
    record: &'static str,
    slot: &'static str,
    enclosing: &WireMap,
) -> Result<Option<Fields>, MapperError> {
    let family = registry.family(family)?;
    let Some(discriminator) = enclosing.get(family.discriminator()).and_then(Value::as_str) else {
        return Ok(None);
    };

    match enclosing.get(&family.details_key(discriminator)) {
        Some(Value::Object(details)) => {
            unmarshal_variant(registry, family.name(), discriminator, details).map(Some)
        }
        None | Some(Value::Null) => Ok(None),
        Some(_) => Err(MapperError::InvalidType {
            record,
            field: slot,
            expected: "an object",
        }),
    }
}

/// The key keyed details are written under, given the enclosing record's fields.
pub(crate) fn details_key(
    registry: &Registry,
    family: &str,
    enclosing: &Fields,
    details: &Fields,
) -> Result<String, MapperError> {
    let family = registry.family(family)?;
    Ok(match enclosing.get(family.discriminator()) {
        Some(FieldValue::String(discriminator)) => family.details_key(discriminator),
        _ => details.record().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::{FieldKind, FieldSpec, Family, Primitive, RecordSpec};
    use serde_json::json;

    fn string(key: &'static str) -> FieldSpec {
        FieldSpec::new(key, FieldKind::Primitive(Primitive::String))
    }

    fn common() -> RecordSpec {
        RecordSpec::new("details", vec![string("error"), string("acquirer_message")])
    }

    fn registry() -> Registry {
        let mut builder = Registry::builder();
        builder
            .define(common())
            .unwrap()
            .define(
                RecordSpec::new("card_transaction", vec![string("masked_card")])
                    .extending(common()),
            )
            .unwrap()
            .define(
                RecordSpec::new("agreement", vec![string("type").required(true), string("name")]),
            )
            .unwrap()
            .define(
                RecordSpec::new("anyday_agreement", vec![string("api_key")])
                    .extending(RecordSpec::new("agreement", vec![string("type"), string("name")])),
            )
            .unwrap()
            .define(RecordSpec::new(
                "transaction",
                vec![
                    string("id").required(true),
                    string("payment_type"),
                    FieldSpec::new("details", FieldKind::Variant("transaction")),
                ],
            ))
            .unwrap()
            .family(
                Family::new("transaction", "payment_type", "details")
                    .member("card", "card_transaction")
                    .member("applepay", "card_transaction"),
            )
            .unwrap()
            .family(
                Family::new("agreement", "type", "agreement").member("anyday", "anyday_agreement"),
            )
            .unwrap();
        builder.build().unwrap()
    }

    fn wire(value: Value) -> WireMap {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    #[test]
    fn known_discriminator_selects_member_shape() {
        let fields = unmarshal_variant(
            &registry(),
            "transaction",
            "card",
            &wire(json!({"masked_card": "457199XXXXXX0000", "error": "declined"})),
        )
        .unwrap();

        assert_eq!(fields.record(), "card_transaction");
        assert!(fields.is_set("masked_card"));
        assert!(fields.is_set("error"));
    }

    #[test]
    fn unknown_discriminator_falls_back_to_common_fields() {
        let fields = unmarshal_variant(
            &registry(),
            "transaction",
            "__unknown_future_type__",
            &wire(json!({"masked_card": "457199XXXXXX0000", "error": "declined"})),
        )
        .unwrap();

        assert_eq!(fields.record(), "details");
        assert!(fields.is_set("error"));
        assert!(!fields.is_set("masked_card"));
    }

    #[test]
    fn tagged_reads_discriminator_from_the_object() {
        let fields = unmarshal_tagged(
            &registry(),
            "agreement",
            &wire(json!({"type": "anyday", "name": "Anyday", "api_key": "key"})),
        )
        .unwrap();
        assert_eq!(fields.record(), "anyday_agreement");

        let err = unmarshal_tagged(&registry(), "agreement", &wire(json!({"name": "Anyday"})))
            .unwrap_err();
        assert_eq!(
            err,
            MapperError::MissingRequiredField {
                record: "agreement",
                field: "type"
            }
        );
    }

    #[test]
    fn keyed_details_follow_the_enclosing_discriminator() {
        let registry = registry();

        let card = crate::mapper::unmarshal(
            &registry,
            "transaction",
            &wire(json!({
                "id": "tx_1",
                "payment_type": "applepay",
                "card_transaction": {"masked_card": "457199XXXXXX0000"}
            })),
        )
        .unwrap();
        let details = card.get("details").and_then(FieldValue::as_record).unwrap();
        assert_eq!(details.record(), "card_transaction");

        let future = crate::mapper::unmarshal(
            &registry,
            "transaction",
            &wire(json!({
                "id": "tx_2",
                "payment_type": "twint",
                "twint_transaction": {"error": "declined", "twint_id": "tw_1"}
            })),
        )
        .unwrap();
        let details = future.get("details").and_then(FieldValue::as_record).unwrap();
        assert_eq!(details.record(), "details");
        assert_eq!(details.keys().collect::<Vec<_>>(), vec!["error"]);

        let bare = crate::mapper::unmarshal(
            &registry,
            "transaction",
            &wire(json!({"id": "tx_3", "payment_type": "card"})),
        )
        .unwrap();
        assert!(!bare.is_set("details"));
    }
}
