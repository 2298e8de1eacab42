macro_rules! setter {
    ($field:ident : $ty:ty) => {
        pub fn $field<T>(mut self, $field: T) -> Self
        where
            T: Into<$ty>,
        {
            self.$field = $field.into();
            self
        }
    };

    ($field:ident . $subfield:ident : $ty:ty) => {
        pub fn $subfield<T>(mut self, $subfield: T) -> Self
        where
            T: Into<$ty>,
        {
            self.$field.$subfield = $subfield.into();
            self
        }
    };

    (opt $field:ident : $ty:ty) => {
        pub fn $field<T>(mut self, $field: T) -> Self
        where
            T: Into<$ty>,
        {
            self.$field = std::option::Option::Some($field.into());
            self
        }
    };

    (opt $field:ident . $subfield:ident : $ty:ty) => {
        pub fn $subfield<T>(mut self, $subfield: T) -> Self
        where
            T: Into<$ty>,
        {
            self.$field.$subfield = Some($subfield.into());
            self
        }
    };
}

pub(crate) use setter;

/// A closed set of lowercase wire tokens.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$variant_meta:meta])* $variant:ident = $value:literal ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $(#[$variant_meta])* $variant, )*
        }

        impl $name {
            pub const VALUES: &'static [&'static str] = &[$($value),*];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => $value, )*
                }
            }

            pub fn parse(value: &str) -> std::option::Option<Self> {
                match value {
                    $( $value => Some(Self::$variant), )*
                    _ => None,
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $crate::mapper::WireType for $name {
            fn kind() -> $crate::mapper::FieldKind {
                $crate::mapper::FieldKind::Enum(Self::VALUES)
            }
        }

        impl $crate::mapper::FromValue for $name {
            fn from_value(
                value: $crate::mapper::FieldValue,
            ) -> std::result::Result<Self, $crate::mapper::MapperError> {
                value
                    .as_str()
                    .and_then(Self::parse)
                    .ok_or_else(|| $crate::mapper::MapperError::unexpected(stringify!($name)))
            }
        }

        impl $crate::mapper::ToValue for $name {
            fn to_value(&self) -> $crate::mapper::FieldValue {
                $crate::mapper::FieldValue::String(self.as_str().to_string())
            }
        }
    };
}

pub(crate) use wire_enum;

/// Declares a record struct together with its field table.
///
/// ```ignore
/// wire_record! {
///     pub struct RefundCreate: request "refund_create" {
///         required invoice: String = "invoice",
///         optional amount: i64 = "amount" where validate::non_negative,
///     }
/// }
/// ```
///
/// The direction (`request`, `response` or `both`) decides whether the record can be
/// marshaled, unmarshaled, or both. `required_enum` fields must be present on the wire, but
/// an unrecognized token still reads as `None`. `extends field: Base` embeds a base record
/// whose wire keys precede the record's own.
macro_rules! wire_record {
    (@ty required $ty:ty) => { $ty };
    (@ty optional $ty:ty) => { std::option::Option<$ty> };
    (@ty required_enum $ty:ty) => { std::option::Option<$ty> };

    (@required required) => { true };
    (@required optional) => { false };
    (@required required_enum) => { true };

    (@read required $fields:ident $key:literal) => { $fields.required($key)? };
    (@read optional $fields:ident $key:literal) => { $fields.optional($key)? };
    (@read required_enum $fields:ident $key:literal) => { $fields.optional($key)? };

    (@direction response $($rest:tt)*) => {
        $crate::macros::wire_record!(@unmarshal $($rest)*);
    };
    (@direction request $($rest:tt)*) => {
        $crate::macros::wire_record!(@marshal $($rest)*);
    };
    (@direction both $($rest:tt)*) => {
        $crate::macros::wire_record!(@unmarshal $($rest)*);
        $crate::macros::wire_record!(@marshal $($rest)*);
    };

    (
        @unmarshal $name:ident [$($base_field:ident: $base:ty)?]
        $( $presence:ident $field:ident $key:literal )*
    ) => {
        impl $crate::mapper::Unmarshal for $name {
            fn read(
                fields: &mut $crate::mapper::Fields,
            ) -> std::result::Result<Self, $crate::mapper::MapperError> {
                Ok(Self {
                    $( $base_field: <$base as $crate::mapper::Unmarshal>::read(fields)?, )?
                    $( $field: $crate::macros::wire_record!(@read $presence fields $key), )*
                })
            }
        }

        impl $crate::mapper::FromValue for $name {
            fn from_value(
                value: $crate::mapper::FieldValue,
            ) -> std::result::Result<Self, $crate::mapper::MapperError> {
                match value {
                    $crate::mapper::FieldValue::Record(mut fields) => {
                        <Self as $crate::mapper::Unmarshal>::read(&mut fields)
                    }
                    _ => Err($crate::mapper::MapperError::unexpected("an object")),
                }
            }
        }
    };

    (
        @marshal $name:ident [$($base_field:ident: $base:ty)?]
        $( $presence:ident $field:ident $key:literal )*
    ) => {
        impl $crate::mapper::Marshal for $name {
            fn write(&self, fields: &mut $crate::mapper::Fields) {
                $( <$base as $crate::mapper::Marshal>::write(&self.$base_field, fields); )?
                $( fields.put($key, $crate::mapper::ToValue::to_value(&self.$field)); )*
            }
        }

        impl $crate::mapper::ToValue for $name {
            fn to_value(&self) -> $crate::mapper::FieldValue {
                $crate::mapper::FieldValue::Record($crate::mapper::Marshal::to_fields(self))
            }
        }
    };

    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident: $direction:ident $record:literal
            $(extends $base_field:ident: $base:ty)? {
            $(
                $(#[$field_meta:meta])*
                $presence:ident $field:ident: $ty:ty = $key:literal
                    $(default $default:literal)? $(where $validator:path)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        $vis struct $name {
            $( pub $base_field: $base, )?
            $(
                $(#[$field_meta])*
                pub $field: $crate::macros::wire_record!(@ty $presence $ty),
            )*
        }

        impl $crate::mapper::Model for $name {
            const NAME: &'static str = $record;

            fn spec() -> $crate::mapper::RecordSpec {
                let spec = $crate::mapper::RecordSpec::new($record, vec![
                    $(
                        $crate::mapper::FieldSpec::new(
                            $key,
                            <$ty as $crate::mapper::WireType>::kind(),
                        )
                        .required($crate::macros::wire_record!(@required $presence))
                        $(.with_default($crate::mapper::ToValue::to_value(&{
                            let default: $ty = $default.into();
                            default
                        })))?
                        $(.with_validator($validator))?,
                    )*
                ]);
                $( let spec = spec.extending(<$base as $crate::mapper::Model>::spec()); )?
                spec
            }
        }

        impl $crate::mapper::WireType for $name {
            fn kind() -> $crate::mapper::FieldKind {
                $crate::mapper::FieldKind::Record($record)
            }
        }

        $crate::macros::wire_record!(
            @direction $direction $name [$($base_field: $base)?] $( $presence $field $key )*
        );
    };
}

pub(crate) use wire_record;

/// Declares a polymorphic family as an enum over its member records.
///
/// Several discriminator values may share one member record. The variant after `_` holds
/// the base record used for discriminators this client does not know.
macro_rules! wire_family {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident: $family:literal by $discriminator:literal {
            $( $variant:ident($member:ty) for $($value:literal),+; )*
            _ => $base_variant:ident($base:ty) $(;)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        $vis enum $name {
            $( $variant($member), )*
            $base_variant($base),
        }

        impl $name {
            /// Name of the record this value was read as.
            pub fn record_name(&self) -> &'static str {
                match self {
                    $( Self::$variant(_) => <$member as $crate::mapper::Model>::NAME, )*
                    Self::$base_variant(_) => <$base as $crate::mapper::Model>::NAME,
                }
            }
        }

        impl $crate::mapper::Polymorphic for $name {
            const FAMILY: &'static str = $family;

            fn family() -> $crate::mapper::Family {
                $crate::mapper::Family::new(
                    $family,
                    $discriminator,
                    <$base as $crate::mapper::Model>::NAME,
                )
                $( $( .member($value, <$member as $crate::mapper::Model>::NAME) )+ )*
            }

            fn read_variant(
                mut fields: $crate::mapper::Fields,
            ) -> std::result::Result<Self, $crate::mapper::MapperError> {
                $(
                    if fields.record() == <$member as $crate::mapper::Model>::NAME {
                        return <$member as $crate::mapper::Unmarshal>::read(&mut fields)
                            .map(Self::$variant);
                    }
                )*
                <$base as $crate::mapper::Unmarshal>::read(&mut fields).map(Self::$base_variant)
            }
        }

        impl $crate::mapper::WireType for $name {
            fn kind() -> $crate::mapper::FieldKind {
                $crate::mapper::FieldKind::Variant($family)
            }
        }

        impl $crate::mapper::FromValue for $name {
            fn from_value(
                value: $crate::mapper::FieldValue,
            ) -> std::result::Result<Self, $crate::mapper::MapperError> {
                match value {
                    $crate::mapper::FieldValue::Record(fields) => {
                        <Self as $crate::mapper::Polymorphic>::read_variant(fields)
                    }
                    _ => Err($crate::mapper::MapperError::unexpected("an object")),
                }
            }
        }

        impl $crate::mapper::FromWire for $name {
            fn from_wire_in(
                registry: &$crate::mapper::Registry,
                map: &$crate::mapper::WireMap,
            ) -> std::result::Result<Self, $crate::mapper::MapperError> {
                let fields = $crate::mapper::unmarshal_tagged(registry, $family, map)?;
                <Self as $crate::mapper::Polymorphic>::read_variant(fields)
            }
        }
    };
}

pub(crate) use wire_family;
