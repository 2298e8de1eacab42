use thiserror::Error;

/// Fatal mapping failures. Unknown enum values and unknown discriminators are not errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapperError {
    #[error("{record}: missing required field '{field}'")]
    MissingRequiredField {
        record: &'static str,
        field: &'static str,
    },

    #[error("{record}: invalid date format in '{field}': {value}")]
    InvalidDateFormat {
        record: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("{record}: field '{field}' must be {expected}")]
    InvalidType {
        record: &'static str,
        field: &'static str,
        expected: &'static str,
    },

    #[error("{record}: invalid value for '{field}': {reason}")]
    InvalidValue {
        record: &'static str,
        field: &'static str,
        reason: String,
    },

    /// A typed conversion saw a value of the wrong shape. Re-raised as [`Self::InvalidType`]
    /// once the record and field are known.
    #[error("expected {expected}")]
    UnexpectedValue { expected: &'static str },

    #[error("record type '{0}' is not defined")]
    UnknownRecord(String),

    #[error("polymorphic family '{0}' is not defined")]
    UnknownFamily(String),
}

impl MapperError {
    pub(crate) fn unexpected(expected: &'static str) -> Self {
        Self::UnexpectedValue { expected }
    }

    pub(crate) fn in_field(self, record: &'static str, field: &'static str) -> Self {
        match self {
            Self::UnexpectedValue { expected } => Self::InvalidType {
                record,
                field,
                expected,
            },
            other => other,
        }
    }
}

/// Programmer errors detected while the registry is built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("record type '{0}' is defined twice")]
    DuplicateDefinition(&'static str),

    #[error("record type '{record}' declares wire key '{field}' twice")]
    DuplicateField {
        record: &'static str,
        field: &'static str,
    },

    #[error("polymorphic family '{0}' is defined twice")]
    DuplicateFamily(&'static str),

    #[error("family '{family}' maps discriminator '{value}' twice")]
    DuplicateDiscriminator {
        family: &'static str,
        value: &'static str,
    },

    #[error("'{referenced_by}' refers to undefined record type '{record}'")]
    UndefinedRecord {
        record: &'static str,
        referenced_by: &'static str,
    },

    #[error("'{referenced_by}' refers to undefined family '{family}'")]
    UndefinedFamily {
        family: &'static str,
        referenced_by: &'static str,
    },
}
