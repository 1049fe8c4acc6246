use crate::error::Error;
use schemata_core::{
    entity::{Entity, EntityFactory, InstanceError, Overrides},
    external::{ReservedSlots, SystemFieldProvider},
    model::TypeModel,
    registry::Registry,
    type_ref::TypeRef,
    version::{self, FieldPresence},
    wire::{self, WireRecord},
};
use std::sync::Arc;

///
/// Schemata
///
/// Caller-facing handle over a frozen registry and a system-field provider.
/// Every operation maps internal failures onto the public `Error`.
///

pub struct Schemata<'r> {
    registry: &'r Registry,
    provider: Box<dyn SystemFieldProvider>,
}

impl<'r> Schemata<'r> {
    /// Handle whose system slots stay reserved for storage.
    #[must_use]
    pub fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            provider: Box::new(ReservedSlots),
        }
    }

    #[must_use]
    pub fn with_provider(mut self, provider: impl SystemFieldProvider + 'static) -> Self {
        self.provider = Box::new(provider);
        self
    }

    #[must_use]
    pub const fn registry(&self) -> &'r Registry {
        self.registry
    }

    fn factory(&self) -> EntityFactory<'_> {
        EntityFactory::new(self.registry, self.provider.as_ref())
    }

    pub fn resolve(&self, type_ref: &TypeRef) -> Result<Arc<TypeModel>, Error> {
        Ok(self.registry.resolve(type_ref)?)
    }

    /// Create a defaulted instance with `overrides` applied.
    pub fn create(&self, type_ref: &TypeRef, overrides: Overrides) -> Result<Entity, Error> {
        Ok(self.factory().create_by_ref(type_ref, overrides)?)
    }

    /// Classify one member of `type_ref` for an instance at `instance_version`.
    pub fn classify(
        &self,
        type_ref: &TypeRef,
        member: &str,
        instance_version: u32,
    ) -> Result<FieldPresence, Error> {
        let model = self.resolve(type_ref)?;

        Ok(version::classify_field(&model, member, instance_version)?)
    }

    /// Classify every member of `type_ref`, in member order.
    pub fn classify_all(
        &self,
        type_ref: &TypeRef,
        instance_version: u32,
    ) -> Result<Vec<(String, FieldPresence)>, Error> {
        let model = self.resolve(type_ref)?;

        model
            .members()
            .map(|member| {
                version::classify_field(&model, member.name(), instance_version)
                    .map(|presence| (member.name().to_string(), presence))
            })
            .collect::<Result<_, InstanceError>>()
            .map_err(Error::from)
    }

    /// Decode a record produced at any catalog version.
    pub fn decode(&self, record: &WireRecord) -> Result<Entity, Error> {
        Ok(self.factory().decode(record)?)
    }

    #[must_use]
    pub fn encode(&self, entity: &Entity) -> WireRecord {
        wire::encode(entity)
    }
}

impl Schemata<'static> {
    /// Handle over the process-wide registry.
    pub fn global() -> Result<Self, Error> {
        Ok(Self::new(schemata_schema::build::registry()?))
    }
}
