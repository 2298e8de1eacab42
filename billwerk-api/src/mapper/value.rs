use super::{FieldKind, MapperError, Primitive};
use chrono::{DateTime, Utc};

/// A decoded JSON object as it travels over the wire.
pub type WireMap = serde_json::Map<String, serde_json::Value>;

/// A field value after it has been checked against its [`FieldKind`].
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Present on the wire as an explicit `null`
    Null,
    Bool(bool),
    Integer(i64),
    Number(f64),
    String(String),
    DateTime(DateTime<Utc>),
    Object(WireMap),
    Record(Fields),
    List(Vec<FieldValue>),
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Fields> {
        match self {
            Self::Record(fields) => Some(fields),
            _ => None,
        }
    }
}

/// The validated, ordered field bag of one record instance.
///
/// Produced by the unmarshaler and by typed records on their way out, consumed by the
/// marshaler and by typed records on their way in. A key that is not present is unset;
/// a key holding [`FieldValue::Null`] was sent as an explicit `null`.
#[derive(Debug, Clone, PartialEq)]
pub struct Fields {
    record: &'static str,
    entries: Vec<(&'static str, FieldValue)>,
}

impl Fields {
    pub fn new(record: &'static str) -> Self {
        Self {
            record,
            entries: Vec::new(),
        }
    }

    pub fn record(&self) -> &'static str {
        self.record
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.entries
            .iter()
            .find(|(entry_key, _)| *entry_key == key)
            .map(|(_, value)| value)
    }

    /// True when the key is present with a non-null value.
    pub fn is_set(&self, key: &str) -> bool {
        self.get(key).is_some_and(|value| !value.is_null())
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(key, _)| *key)
    }

    pub fn put(&mut self, key: &'static str, value: FieldValue) {
        match self.entries.iter_mut().find(|(entry_key, _)| *entry_key == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn with(mut self, key: &'static str, value: FieldValue) -> Self {
        self.put(key, value);
        self
    }

    pub fn take(&mut self, key: &str) -> Option<FieldValue> {
        let index = self
            .entries
            .iter()
            .position(|(entry_key, _)| *entry_key == key)?;
        Some(self.entries.remove(index).1)
    }

    pub fn required<T: FromValue>(&mut self, key: &'static str) -> Result<T, MapperError> {
        match self.take(key) {
            None | Some(FieldValue::Null) => Err(MapperError::MissingRequiredField {
                record: self.record,
                field: key,
            }),
            Some(value) => T::from_value(value).map_err(|err| err.in_field(self.record, key)),
        }
    }

    pub fn optional<T: FromValue>(&mut self, key: &'static str) -> Result<Option<T>, MapperError> {
        match self.take(key) {
            None | Some(FieldValue::Null) => Ok(None),
            Some(value) => T::from_value(value)
                .map(Some)
                .map_err(|err| err.in_field(self.record, key)),
        }
    }
}

/// Declares the [`FieldKind`] a Rust type maps to.
pub trait WireType {
    fn kind() -> FieldKind;
}

pub trait FromValue: Sized {
    fn from_value(value: FieldValue) -> Result<Self, MapperError>;
}

pub trait ToValue {
    fn to_value(&self) -> FieldValue;
}

macro_rules! primitive {
    ($ty:ty, $primitive:ident, $variant:ident) => {
        impl WireType for $ty {
            fn kind() -> FieldKind {
                FieldKind::Primitive(Primitive::$primitive)
            }
        }

        impl FromValue for $ty {
            fn from_value(value: FieldValue) -> Result<Self, MapperError> {
                match value {
                    FieldValue::$variant(value) => Ok(value),
                    _ => Err(MapperError::unexpected(Primitive::$primitive.describe())),
                }
            }
        }

        impl ToValue for $ty {
            fn to_value(&self) -> FieldValue {
                FieldValue::$variant(self.clone())
            }
        }
    };
}

primitive!(bool, Boolean, Bool);
primitive!(i64, Integer, Integer);
primitive!(String, String, String);
primitive!(WireMap, Object, Object);

impl WireType for f64 {
    fn kind() -> FieldKind {
        FieldKind::Primitive(Primitive::Number)
    }
}

impl FromValue for f64 {
    fn from_value(value: FieldValue) -> Result<Self, MapperError> {
        match value {
            FieldValue::Number(value) => Ok(value),
            FieldValue::Integer(value) => Ok(value as f64),
            _ => Err(MapperError::unexpected(Primitive::Number.describe())),
        }
    }
}

impl ToValue for f64 {
    fn to_value(&self) -> FieldValue {
        FieldValue::Number(*self)
    }
}

impl WireType for DateTime<Utc> {
    fn kind() -> FieldKind {
        FieldKind::DateTime
    }
}

impl FromValue for DateTime<Utc> {
    fn from_value(value: FieldValue) -> Result<Self, MapperError> {
        match value {
            FieldValue::DateTime(value) => Ok(value),
            _ => Err(MapperError::unexpected(FieldKind::DateTime.describe())),
        }
    }
}

impl ToValue for DateTime<Utc> {
    fn to_value(&self) -> FieldValue {
        FieldValue::DateTime(*self)
    }
}

impl<T: WireType> WireType for Vec<T> {
    fn kind() -> FieldKind {
        FieldKind::list_of(T::kind())
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: FieldValue) -> Result<Self, MapperError> {
        match value {
            FieldValue::List(items) => items.into_iter().map(T::from_value).collect(),
            _ => Err(MapperError::unexpected("an array")),
        }
    }
}

impl<T: ToValue> ToValue for Vec<T> {
    fn to_value(&self) -> FieldValue {
        FieldValue::List(self.iter().map(ToValue::to_value).collect())
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> FieldValue {
        match self {
            Some(value) => value.to_value(),
            None => FieldValue::Null,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_reports_missing_and_null_alike() {
        let mut fields = Fields::new("refund").with("state", FieldValue::Null);

        assert_eq!(
            fields.required::<String>("state"),
            Err(MapperError::MissingRequiredField {
                record: "refund",
                field: "state"
            })
        );
        assert_eq!(
            fields.required::<String>("invoice"),
            Err(MapperError::MissingRequiredField {
                record: "refund",
                field: "invoice"
            })
        );
    }

    #[test]
    fn optional_reads_null_as_unset() {
        let mut fields = Fields::new("refund")
            .with("text", FieldValue::Null)
            .with("amount", FieldValue::Integer(100));

        assert_eq!(fields.optional::<String>("text"), Ok(None));
        assert_eq!(fields.optional::<i64>("amount"), Ok(Some(100)));
        assert!(fields.is_empty());
    }

    #[test]
    fn mismatched_value_names_record_and_field() {
        let mut fields = Fields::new("refund").with("amount", "ten".into());

        assert_eq!(
            fields.required::<i64>("amount"),
            Err(MapperError::InvalidType {
                record: "refund",
                field: "amount",
                expected: "an integer"
            })
        );
    }

    #[test]
    fn put_replaces_existing_entry_in_place() {
        let mut fields = Fields::new("address")
            .with("city", "Aarhus".into())
            .with("country", "DK".into());
        fields.put("city", "Copenhagen".into());

        assert_eq!(fields.keys().collect::<Vec<_>>(), vec!["city", "country"]);
        assert_eq!(fields.get("city").and_then(FieldValue::as_str), Some("Copenhagen"));
    }

    #[test]
    fn numbers_accept_integers() {
        assert_eq!(f64::from_value(FieldValue::Integer(25)), Ok(25.0));
        assert!(i64::from_value(FieldValue::Number(0.25)).is_err());
    }

    #[test]
    fn none_becomes_null() {
        let value: Option<String> = None;
        assert_eq!(value.to_value(), FieldValue::Null);
    }
}
