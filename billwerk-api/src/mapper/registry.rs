use super::{FieldKind, MapperError, Model, RecordSpec, RegistryError};
use std::collections::{HashMap, HashSet};

/// A group of record types sharing a discriminator field.
#[derive(Debug, Clone)]
pub struct Family {
    name: &'static str,
    discriminator: &'static str,
    base: &'static str,
    members: Vec<(&'static str, &'static str)>,
}

impl Family {
    /// `base` is the record holding only the fields every member shares.
    pub fn new(name: &'static str, discriminator: &'static str, base: &'static str) -> Self {
        Self {
            name,
            discriminator,
            base,
            members: Vec::new(),
        }
    }

    pub fn member(mut self, value: &'static str, record: &'static str) -> Self {
        self.members.push((value, record));
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn discriminator(&self) -> &'static str {
        self.discriminator
    }

    pub fn base(&self) -> &'static str {
        self.base
    }

    pub fn members(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.members.iter().copied()
    }

    /// The concrete record for a discriminator value, or the base record.
    pub fn record_for(&self, value: &str) -> &'static str {
        self.members
            .iter()
            .find(|(member, _)| *member == value)
            .map_or(self.base, |(_, record)| *record)
    }

    pub fn is_known(&self, value: &str) -> bool {
        self.members.iter().any(|(member, _)| *member == value)
    }

    /// Where keyed details for `value` live inside the enclosing object.
    pub fn details_key(&self, value: &str) -> String {
        if self.is_known(value) {
            self.record_for(value).to_string()
        } else {
            format!("{}_{}", value, self.name)
        }
    }
}

/// The read-only source of truth for every record shape and polymorphic family.
#[derive(Debug, Default)]
pub struct Registry {
    records: HashMap<&'static str, RecordSpec>,
    families: HashMap<&'static str, Family>,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    pub fn record(&self, name: &str) -> Result<&RecordSpec, MapperError> {
        self.records
            .get(name)
            .ok_or_else(|| MapperError::UnknownRecord(name.to_string()))
    }

    pub fn family(&self, name: &str) -> Result<&Family, MapperError> {
        self.families
            .get(name)
            .ok_or_else(|| MapperError::UnknownFamily(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.records.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Selects the record shape for a family member.
    ///
    /// Discriminator values added server-side after this client was built fall back to the
    /// family's base shape instead of failing.
    pub fn resolve(&self, family: &str, discriminator: &str) -> Result<&RecordSpec, MapperError> {
        let family = self.family(family)?;
        if !family.is_known(discriminator) {
            tracing::debug!(
                family = family.name(),
                discriminator,
                "unrecognized discriminator, using base shape"
            );
        }
        self.record(family.record_for(discriminator))
    }
}

#[derive(Debug, Default)]
pub struct RegistryBuilder {
    records: HashMap<&'static str, RecordSpec>,
    families: HashMap<&'static str, Family>,
}

impl RegistryBuilder {
    pub fn define(&mut self, spec: RecordSpec) -> Result<&mut Self, RegistryError> {
        if self.records.contains_key(spec.name()) {
            return Err(RegistryError::DuplicateDefinition(spec.name()));
        }

        let mut seen = HashSet::new();
        for field in spec.fields() {
            if !seen.insert(field.wire_key) {
                return Err(RegistryError::DuplicateField {
                    record: spec.name(),
                    field: field.wire_key,
                });
            }
        }

        self.records.insert(spec.name(), spec);
        Ok(self)
    }

    pub fn model<M: Model>(&mut self) -> Result<&mut Self, RegistryError> {
        self.define(M::spec())
    }

    pub fn family(&mut self, family: Family) -> Result<&mut Self, RegistryError> {
        if self.families.contains_key(family.name()) {
            return Err(RegistryError::DuplicateFamily(family.name()));
        }

        let mut seen = HashSet::new();
        for (value, _) in family.members() {
            if !seen.insert(value) {
                return Err(RegistryError::DuplicateDiscriminator {
                    family: family.name(),
                    value,
                });
            }
        }

        self.families.insert(family.name(), family);
        Ok(self)
    }

    /// Checks that every reference resolves, then freezes the registry.
    pub fn build(self) -> Result<Registry, RegistryError> {
        for spec in self.records.values() {
            for field in spec.fields() {
                self.check_kind(&field.kind, spec.name())?;
            }
        }

        for family in self.families.values() {
            let referenced = std::iter::once(family.base()).chain(family.members().map(|(_, r)| r));
            for record in referenced {
                if !self.records.contains_key(record) {
                    return Err(RegistryError::UndefinedRecord {
                        record,
                        referenced_by: family.name(),
                    });
                }
            }
        }

        Ok(Registry {
            records: self.records,
            families: self.families,
        })
    }

    fn check_kind(
        &self,
        kind: &FieldKind,
        referenced_by: &'static str,
    ) -> Result<(), RegistryError> {
        match kind {
            FieldKind::Record(record) if !self.records.contains_key(record) => {
                Err(RegistryError::UndefinedRecord {
                    record: *record,
                    referenced_by,
                })
            }
            FieldKind::Variant(family) if !self.families.contains_key(family) => {
                Err(RegistryError::UndefinedFamily {
                    family: *family,
                    referenced_by,
                })
            }
            FieldKind::List(element) => self.check_kind(element, referenced_by),
            _ => Ok(()),
        }
    }
}
