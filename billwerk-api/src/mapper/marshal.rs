use super::{
    FieldKind, FieldValue, Fields, MapperError, Registry, WireMap, format_timestamp, resolver,
};
use serde_json::{Number, Value};

/// Projects `fields` onto the wire in the order its record registered them.
///
/// Unset and null fields are left out, so outbound payloads never carry `null`. Field
/// validators run here and a rejected value fails the whole record.
pub fn marshal(registry: &Registry, fields: &Fields) -> Result<WireMap, MapperError> {
    let spec = registry.record(fields.record())?;
    let mut map = WireMap::new();

    for field in spec.fields() {
        let Some(value) = fields.get(field.wire_key).filter(|value| !value.is_null()) else {
            continue;
        };

        if let Some(validator) = field.validator {
            validator(value).map_err(|reason| MapperError::InvalidValue {
                record: spec.name(),
                field: field.wire_key,
                reason,
            })?;
        }

        if let (FieldKind::Variant(family), FieldValue::Record(details)) = (&field.kind, value) {
            let key = resolver::details_key(registry, family, fields, details)?;
            map.insert(key, Value::Object(marshal(registry, details)?));
            continue;
        }

        let value = write_value(registry, spec.name(), field.wire_key, value)?;
        map.insert(field.wire_key.to_string(), value);
    }

    Ok(map)
}

fn write_value(
    registry: &Registry,
    record: &'static str,
    key: &'static str,
    value: &FieldValue,
) -> Result<Value, MapperError> {
    Ok(match value {
        FieldValue::Null => Value::Null,
        FieldValue::Bool(value) => Value::Bool(*value),
        FieldValue::Integer(value) => Value::from(*value),
        FieldValue::Number(value) => {
            Value::Number(Number::from_f64(*value).ok_or_else(|| MapperError::InvalidValue {
                record,
                field: key,
                reason: format!("{value} is not a finite number"),
            })?)
        }
        FieldValue::String(value) => Value::String(value.clone()),
        FieldValue::DateTime(value) => Value::String(format_timestamp(value)),
        FieldValue::Object(value) => Value::Object(value.clone()),
        FieldValue::Record(nested) => Value::Object(marshal(registry, nested)?),
        FieldValue::List(items) => Value::Array(
            items
                .iter()
                .filter(|item| !item.is_null())
                .map(|item| write_value(registry, record, key, item))
                .collect::<Result<_, _>>()?,
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::{FieldSpec, Primitive, RecordSpec, parse_timestamp, unmarshal, validate};
    use serde_json::json;

    fn registry() -> Registry {
        let mut builder = Registry::builder();
        builder
            .define(RecordSpec::new(
                "address",
                vec![
                    FieldSpec::new("city", FieldKind::Primitive(Primitive::String)),
                    FieldSpec::new("country", FieldKind::Primitive(Primitive::String)),
                ],
            ))
            .unwrap()
            .define(RecordSpec::new(
                "refund_create",
                vec![
                    FieldSpec::new("invoice", FieldKind::Primitive(Primitive::String))
                        .required(true),
                    FieldSpec::new("amount", FieldKind::Primitive(Primitive::Integer))
                        .with_validator(validate::non_negative),
                    FieldSpec::new("vat", FieldKind::Primitive(Primitive::Number)),
                    FieldSpec::new("due", FieldKind::DateTime),
                    FieldSpec::new("address", FieldKind::Record("address")),
                    FieldSpec::new(
                        "tags",
                        FieldKind::list_of(FieldKind::Primitive(Primitive::String)),
                    ),
                ],
            ))
            .unwrap();
        builder.build().unwrap()
    }

    #[test]
    fn only_required_fields_reach_the_wire() {
        let fields = Fields::new("refund_create")
            .with("invoice", "inv-1001".into())
            .with("amount", FieldValue::Null);

        let map = marshal(&registry(), &fields).unwrap();

        assert_eq!(Value::Object(map), json!({"invoice": "inv-1001"}));
    }

    #[test]
    fn keys_follow_registration_order() {
        let fields = Fields::new("refund_create")
            .with("tags", FieldValue::List(vec!["a".into()]))
            .with("amount", FieldValue::Integer(100))
            .with("invoice", "inv-1001".into());

        let map = marshal(&registry(), &fields).unwrap();

        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["invoice", "amount", "tags"]);
    }

    #[test]
    fn dates_use_millisecond_precision_without_zone() {
        let due = parse_timestamp("2024-04-28T13:28:06Z").unwrap();
        let fields = Fields::new("refund_create")
            .with("invoice", "inv-1001".into())
            .with("due", FieldValue::DateTime(due));

        let map = marshal(&registry(), &fields).unwrap();

        assert_eq!(map["due"], json!("2024-04-28T13:28:06.000"));
    }

    #[test]
    fn validator_rejects_negative_amount() {
        let fields = Fields::new("refund_create")
            .with("invoice", "inv-1001".into())
            .with("amount", FieldValue::Integer(-1));

        let err = marshal(&registry(), &fields).unwrap_err();

        assert!(matches!(
            err,
            MapperError::InvalidValue {
                record: "refund_create",
                field: "amount",
                ..
            }
        ));
    }

    #[test]
    fn non_finite_numbers_are_rejected() {
        let fields = Fields::new("refund_create")
            .with("invoice", "inv-1001".into())
            .with("vat", FieldValue::Number(f64::NAN));

        assert!(matches!(
            marshal(&registry(), &fields),
            Err(MapperError::InvalidValue { field: "vat", .. })
        ));
    }

    #[test]
    fn nested_records_round_trip() {
        let registry = registry();
        let wire = json!({
            "invoice": "inv-1001",
            "amount": 250,
            "vat": 0.25,
            "due": "2024-04-28T13:28:06.440",
            "address": {"city": "Aarhus", "country": "DK"},
            "tags": ["refund", "manual"]
        });
        let Value::Object(map) = wire.clone() else {
            unreachable!()
        };

        let fields = unmarshal(&registry, "refund_create", &map).unwrap();
        let marshaled = marshal(&registry, &fields).unwrap();

        assert_eq!(Value::Object(marshaled.clone()), wire);
        assert_eq!(unmarshal(&registry, "refund_create", &marshaled).unwrap(), fields);
    }
}
