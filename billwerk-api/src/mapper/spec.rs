use super::FieldValue;
use std::fmt::Display;

/// Business validation hook run on outbound values.
pub type Validator = fn(&FieldValue) -> Result<(), String>;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Primitive {
    Boolean,
    Integer,
    Number,
    String,
    /// Free-form JSON object, e.g. `metadata`
    Object,
}

impl Primitive {
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Boolean => "a boolean",
            Self::Integer => "an integer",
            Self::Number => "a number",
            Self::String => "a string",
            Self::Object => "an object",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Primitive(Primitive),
    /// Closed set of wire tokens
    Enum(&'static [&'static str]),
    DateTime,
    Record(&'static str),
    List(Box<FieldKind>),
    /// Payment-method specific details resolved through a polymorphic family.
    ///
    /// The discriminator is read from the enclosing object and the details object from the
    /// key named after the resolved member. The field's own wire key is only a slot name.
    Variant(&'static str),
}

impl FieldKind {
    pub fn list_of(element: FieldKind) -> Self {
        Self::List(Box::new(element))
    }

    pub(crate) fn describe(&self) -> &'static str {
        match self {
            Self::Primitive(primitive) => primitive.describe(),
            Self::Enum(_) => "a string",
            Self::DateTime => "a date-time string",
            Self::Record(_) | Self::Variant(_) => "an object",
            Self::List(_) => "an array",
        }
    }
}

#[derive(Clone)]
pub struct FieldSpec {
    pub wire_key: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub default: Option<FieldValue>,
    pub validator: Option<Validator>,
}

impl FieldSpec {
    pub fn new(wire_key: &'static str, kind: FieldKind) -> Self {
        Self {
            wire_key,
            kind,
            required: false,
            default: None,
            validator: None,
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_default(mut self, default: FieldValue) -> Self {
        self.default = Some(default);
        self
    }

    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
        self
    }

    pub fn enum_values(&self) -> Option<&'static [&'static str]> {
        match self.kind {
            FieldKind::Enum(values) => Some(values),
            _ => None,
        }
    }
}

impl std::fmt::Debug for FieldSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldSpec")
            .field("wire_key", &self.wire_key)
            .field("kind", &self.kind)
            .field("required", &self.required)
            .field("default", &self.default)
            .field("validator", &self.validator.is_some())
            .finish()
    }
}

/// Ordered field descriptors of one record type.
#[derive(Debug, Clone)]
pub struct RecordSpec {
    name: &'static str,
    fields: Vec<FieldSpec>,
}

impl RecordSpec {
    pub fn new(name: &'static str, fields: Vec<FieldSpec>) -> Self {
        Self { name, fields }
    }

    /// Places the base record's fields in front of this record's own fields.
    pub fn extending(mut self, base: RecordSpec) -> Self {
        let mut fields = base.fields;
        fields.append(&mut self.fields);
        self.fields = fields;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, wire_key: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.wire_key == wire_key)
    }

    pub fn required_keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields
            .iter()
            .filter(|field| field.required)
            .map(|field| field.wire_key)
    }
}

impl Display for RecordSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name)
    }
}
