//! Declarative mapping between wire JSON and typed records.
//!
//! Every record type describes itself once as a [`RecordSpec`]. The [`unmarshal`] and
//! [`marshal`] functions interpret those specs against a [`Registry`], and the typed layer
//! ([`Unmarshal`], [`Marshal`]) only moves already-validated [`FieldValue`]s in and out of
//! structs.

mod datetime;
mod error;
mod marshal;
mod registry;
mod resolver;
mod spec;
mod unmarshal;
pub mod validate;
mod value;

pub use datetime::{format_timestamp, parse_timestamp};
pub use error::{MapperError, RegistryError};
pub use marshal::marshal;
pub use registry::{Family, Registry, RegistryBuilder};
pub use resolver::{unmarshal_tagged, unmarshal_variant};
pub use spec::{FieldKind, FieldSpec, Primitive, RecordSpec, Validator};
pub use unmarshal::unmarshal;
pub use value::{FieldValue, Fields, FromValue, ToValue, WireMap, WireType};

/// A record type known to the registry under [`Model::NAME`].
pub trait Model: Sized {
    const NAME: &'static str;

    fn spec() -> RecordSpec;
}

/// Builds a typed record out of fields the unmarshaler has already checked.
pub trait Unmarshal: Model {
    /// Takes this record's entries out of `fields`. Base records read from the same bag.
    fn read(fields: &mut Fields) -> Result<Self, MapperError>;
}

pub trait Marshal: Model {
    fn write(&self, fields: &mut Fields);

    fn to_fields(&self) -> Fields {
        let mut fields = Fields::new(Self::NAME);
        self.write(&mut fields);
        fields
    }
}

/// Inbound direction: wire map to typed value.
pub trait FromWire: Sized {
    fn from_wire_in(registry: &Registry, map: &WireMap) -> Result<Self, MapperError>;

    fn from_wire(map: &WireMap) -> Result<Self, MapperError> {
        Self::from_wire_in(crate::registry(), map)
    }
}

/// Outbound direction: typed value to wire map.
pub trait ToWire {
    fn to_wire_in(&self, registry: &Registry) -> Result<WireMap, MapperError>;

    fn to_wire(&self) -> Result<WireMap, MapperError> {
        self.to_wire_in(crate::registry())
    }
}

impl<T: Unmarshal> FromWire for T {
    fn from_wire_in(registry: &Registry, map: &WireMap) -> Result<Self, MapperError> {
        let mut fields = unmarshal(registry, T::NAME, map)?;
        T::read(&mut fields)
    }
}

impl<T: Marshal> ToWire for T {
    fn to_wire_in(&self, registry: &Registry) -> Result<WireMap, MapperError> {
        marshal(registry, &self.to_fields())
    }
}

/// A family of records selected by a discriminator value.
pub trait Polymorphic: Sized {
    const FAMILY: &'static str;

    fn family() -> Family;

    /// Picks the variant from the record name the resolver chose.
    fn read_variant(fields: Fields) -> Result<Self, MapperError>;

    /// Reads a member whose discriminator is known out of band.
    fn from_variant(discriminator: &str, map: &WireMap) -> Result<Self, MapperError> {
        let fields = unmarshal_variant(crate::registry(), Self::FAMILY, discriminator, map)?;
        Self::read_variant(fields)
    }
}
