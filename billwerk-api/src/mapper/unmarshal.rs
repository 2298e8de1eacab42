use super::{
    FieldKind, FieldSpec, FieldValue, Fields, MapperError, Primitive, RecordSpec, Registry,
    WireMap, parse_timestamp, resolver,
};
use serde_json::Value;

/// Checks `map` against the record registered as `record` and collects its fields.
///
/// Fields are visited in registration order and the first fatal error wins. Enum tokens
/// outside the declared set and unrecognized discriminators are tolerated.
pub fn unmarshal(registry: &Registry, record: &str, map: &WireMap) -> Result<Fields, MapperError> {
    let spec = registry.record(record)?;
    read_record(registry, spec, map)
}

pub(crate) fn read_record(
    registry: &Registry,
    spec: &RecordSpec,
    map: &WireMap,
) -> Result<Fields, MapperError> {
    let mut fields = Fields::new(spec.name());

    for field in spec.fields() {
        if let FieldKind::Variant(family) = field.kind {
            match resolver::read_keyed(registry, family, spec.name(), field.wire_key, map)? {
                Some(details) => fields.put(field.wire_key, FieldValue::Record(details)),
                None if field.required => return Err(missing(spec, field)),
                None => {}
            }
            continue;
        }

        match map.get(field.wire_key) {
            None | Some(Value::Null) if field.required => return Err(missing(spec, field)),
            None => {
                if let Some(default) = &field.default {
                    fields.put(field.wire_key, default.clone());
                }
            }
            Some(Value::Null) => fields.put(field.wire_key, FieldValue::Null),
            Some(value) => {
                match read_value(registry, spec.name(), field.wire_key, &field.kind, value)? {
                    Some(FieldValue::List(items)) if items.is_empty() && !field.required => {}
                    Some(value) => fields.put(field.wire_key, value),
                    None => {}
                }
            }
        }
    }

    Ok(fields)
}

/// `Ok(None)` means the value was dropped, not that it was absent.
fn read_value(
    registry: &Registry,
    record: &'static str,
    key: &'static str,
    kind: &FieldKind,
    value: &Value,
) -> Result<Option<FieldValue>, MapperError> {
    let invalid = || MapperError::InvalidType {
        record,
        field: key,
        expected: kind.describe(),
    };

    let value = match kind {
        FieldKind::Primitive(primitive) => match (primitive, value) {
            (Primitive::Boolean, Value::Bool(value)) => FieldValue::Bool(*value),
            (Primitive::Integer, Value::Number(number)) => {
                FieldValue::Integer(number.as_i64().ok_or_else(invalid)?)
            }
            (Primitive::Number, Value::Number(number)) => {
                FieldValue::Number(number.as_f64().ok_or_else(invalid)?)
            }
            (Primitive::String, Value::String(value)) => FieldValue::String(value.clone()),
            (Primitive::Object, Value::Object(value)) => FieldValue::Object(value.clone()),
            _ => return Err(invalid()),
        },
        FieldKind::Enum(values) => {
            let token = value.as_str().ok_or_else(invalid)?;
            if !values.contains(&token) {
                tracing::debug!(record, field = key, value = token, "dropping unknown enum value");
                return Ok(None);
            }
            FieldValue::String(token.to_string())
        }
        FieldKind::DateTime => {
            let text = value.as_str().ok_or_else(invalid)?;
            let parsed = parse_timestamp(text).ok_or_else(|| MapperError::InvalidDateFormat {
                record,
                field: key,
                value: text.to_string(),
            })?;
            FieldValue::DateTime(parsed)
        }
        FieldKind::Record(name) => {
            let nested = value.as_object().ok_or_else(invalid)?;
            FieldValue::Record(read_record(registry, registry.record(name)?, nested)?)
        }
        FieldKind::List(element) => {
            let items = value.as_array().ok_or_else(invalid)?;
            let mut values = Vec::with_capacity(items.len());
            for item in items {
                if let Some(value) = read_value(registry, record, key, element, item)? {
                    values.push(value);
                }
            }
            FieldValue::List(values)
        }
        // Outside an enclosing record the discriminator travels inside the object itself.
        FieldKind::Variant(family) => {
            let nested = value.as_object().ok_or_else(invalid)?;
            FieldValue::Record(resolver::unmarshal_tagged(registry, family, nested)?)
        }
    };

    Ok(Some(value))
}

fn missing(spec: &RecordSpec, field: &FieldSpec) -> MapperError {
    MapperError::MissingRequiredField {
        record: spec.name(),
        field: field.wire_key,
    }
}
