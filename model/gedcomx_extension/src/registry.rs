//! Contains the [`Registry`], the catalog that maps stable type identifiers
//! (for example `foaf:Organization`) to concrete extension types.
//!
//! The registry is built once, before any document is read or written, and is
//! only read afterwards. It holds plain function pointers, so a finished
//! registry can be shared between threads.

use std::{any::TypeId, collections::HashMap};

use derive_new::new;
use getset::CopyGetters;

use crate::{Extension, Extensions};

/// Returns the element as a type-erased serializable value if it is of the
/// type the function was instantiated for.
pub(crate) type SerializeFn =
    for<'a> fn(&'a dyn Extension) -> Option<&'a dyn erased_serde::Serialize>;

/// Parses a value of the type the function was instantiated for.
pub(crate) type DeserializeFn = fn(
    &mut dyn erased_serde::Deserializer,
) -> Result<Box<dyn Extension>, erased_serde::Error>;

#[derive(Debug, Clone)]
struct SerializationMetadata {
    serialize_fn: SerializeFn,
    identifier: String,
}

#[derive(Debug, Clone, Copy)]
struct DeserializationMetadata {
    deserialize_fn: DeserializeFn,
    type_id: TypeId,
    type_name: &'static str,
}

/// No extension type is registered under the identifier `{identifier}`.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    new,
    thiserror::Error,
    displaydoc::Display,
)]
pub struct UnresolvedExtensionType {
    /// The identifier that has no registered type.
    pub identifier: String,
}

/// The extension type `{type_name}` is not registered in the catalog.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    new,
    thiserror::Error,
    displaydoc::Display,
)]
pub struct UnregisteredType {
    /// The Rust name of the type that could not be written.
    pub type_name: &'static str,
}

/// The result of a successful [`Registry::resolve()`].
#[derive(Debug, Clone, Copy, CopyGetters)]
pub struct RegisteredType<'a> {
    /// The identifier that was resolved.
    #[getset(get_copy = "pub")]
    identifier: &'a str,

    /// The [`TypeId`] of the concrete type the identifier maps to.
    #[getset(get_copy = "pub")]
    type_id: TypeId,

    /// The Rust name of the concrete type the identifier maps to.
    #[getset(get_copy = "pub")]
    type_name: &'static str,

    deserialize_fn: DeserializeFn,
}

impl RegisteredType<'_> {
    pub(crate) fn deserialize_fn(&self) -> DeserializeFn { self.deserialize_fn }
}

/// The catalog used to write and read the elements of [`Extensions`].
///
/// # Non-Registered Type
///
/// Writing an [`Extensions`] holding an element whose type is not registered
/// fails with [`UnregisteredType`].
///
/// Reading a node whose identifier is not registered yields
/// [`UnresolvedExtensionType`]; whether the node is skipped or the whole
/// document is rejected is up to the reader's
/// [`ReadOptions`](crate::serde::ReadOptions).
#[derive(Debug, Clone, Default)]
pub struct Registry {
    serialization_meta_datas: HashMap<TypeId, SerializationMetadata>,
    deserialization_meta_datas: HashMap<String, DeserializationMetadata>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Registers the type `C` under the given identifier.
    ///
    /// Registering is idempotent and the last registration of an identifier
    /// wins. When a type is registered under several identifiers, it is
    /// written under the most recent one and read under all of them.
    ///
    /// Returns `true` if the identifier was not registered before.
    pub fn register<
        C: Extension + serde::Serialize + for<'x> serde::Deserialize<'x>,
    >(
        &mut self,
        identifier: impl Into<String>,
    ) -> bool {
        fn serialize_fn<C: Extension + serde::Serialize>(
            element: &dyn Extension,
        ) -> Option<&dyn erased_serde::Serialize> {
            element
                .as_any()
                .downcast_ref::<C>()
                .map(|value| value as &dyn erased_serde::Serialize)
        }

        fn deserialize_fn<C: Extension + for<'x> serde::Deserialize<'x>>(
            deserializer: &mut dyn erased_serde::Deserializer,
        ) -> Result<Box<dyn Extension>, erased_serde::Error> {
            let value = C::deserialize(deserializer)?;
            Ok(Box::new(value))
        }

        let identifier = identifier.into();
        let type_id = TypeId::of::<C>();
        let type_name = std::any::type_name::<C>();

        let previous = self.deserialization_meta_datas.insert(
            identifier.clone(),
            DeserializationMetadata {
                deserialize_fn: deserialize_fn::<C>,
                type_id,
                type_name,
            },
        );

        // the identifier moved to another type; the previous owner can no
        // longer be written under it
        if let Some(previous) = previous.filter(|x| x.type_id != type_id) {
            if self
                .serialization_meta_datas
                .get(&previous.type_id)
                .is_some_and(|x| x.identifier == identifier)
            {
                self.serialization_meta_datas.remove(&previous.type_id);
            }

            log::debug!(
                "identifier `{identifier}` re-registered from `{}` to \
                 `{type_name}`",
                previous.type_name
            );
        } else {
            log::debug!("registered `{type_name}` as `{identifier}`");
        }

        self.serialization_meta_datas.insert(type_id, SerializationMetadata {
            serialize_fn: serialize_fn::<C>,
            identifier,
        });

        previous.is_none()
    }

    /// Resolves the identifier into the type registered under it.
    ///
    /// # Errors
    ///
    /// Returns [`UnresolvedExtensionType`] naming the identifier if nothing is
    /// registered under it.
    pub fn resolve<'a>(
        &self,
        identifier: &'a str,
    ) -> Result<RegisteredType<'a>, UnresolvedExtensionType> {
        self.deserialization_meta_datas.get(identifier).map_or_else(
            || Err(UnresolvedExtensionType::new(identifier.to_owned())),
            |metadata| {
                Ok(RegisteredType {
                    identifier,
                    type_id: metadata.type_id,
                    type_name: metadata.type_name,
                    deserialize_fn: metadata.deserialize_fn,
                })
            },
        )
    }

    /// Resolves an identifier that may have lost its prefix, such as the
    /// local part `Organization` of a qualified markup tag
    /// `foaf:Organization`.
    ///
    /// An exact match wins. Otherwise the name resolves to the only registered
    /// identifier whose part after the last `:` equals it.
    ///
    /// # Errors
    ///
    /// Returns [`UnresolvedExtensionType`] naming `name` if nothing matches or
    /// the local name is shared by several identifiers.
    pub fn resolve_local_name<'a>(
        &'a self,
        name: &'a str,
    ) -> Result<RegisteredType<'a>, UnresolvedExtensionType> {
        if self.contains(name) {
            return self.resolve(name);
        }

        let mut candidates =
            self.deserialization_meta_datas.keys().filter(|identifier| {
                identifier
                    .rsplit_once(':')
                    .is_some_and(|(_, local_name)| local_name == name)
            });

        match (candidates.next(), candidates.next()) {
            (Some(identifier), None) => self.resolve(identifier),
            _ => Err(UnresolvedExtensionType::new(name.to_owned())),
        }
    }

    /// Gets the identifier the type `C` is written under.
    #[must_use]
    pub fn identifier_of<C: Extension>(&self) -> Option<&str> {
        self.serialization_meta_datas
            .get(&TypeId::of::<C>())
            .map(|x| x.identifier.as_str())
    }

    /// Gets the identifier the element is written under, based on its
    /// concrete type.
    #[must_use]
    pub fn identifier_of_element(
        &self,
        element: &dyn Extension,
    ) -> Option<&str> {
        self.serialization_meta_datas
            .get(&element.as_any().type_id())
            .map(|x| x.identifier.as_str())
    }

    /// Checks whether something is registered under the identifier.
    #[must_use]
    pub fn contains(&self, identifier: &str) -> bool {
        self.deserialization_meta_datas.contains_key(identifier)
    }

    /// Returns the number of registered identifiers.
    #[must_use]
    pub fn len(&self) -> usize { self.deserialization_meta_datas.len() }

    /// Returns `true` if nothing has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.deserialization_meta_datas.is_empty()
    }

    /// Checks that every element of the container can be written.
    ///
    /// # Errors
    ///
    /// Returns [`UnregisteredType`] for the first element whose type is not
    /// registered.
    pub fn check_serializable(
        &self,
        extensions: &Extensions,
    ) -> Result<(), UnregisteredType> {
        extensions.all().try_for_each(|element| self.node(element).map(|_| ()))
    }

    /// Gets the identifier and the serializable view of the element.
    pub(crate) fn node<'a>(
        &'a self,
        element: &'a dyn Extension,
    ) -> Result<(&'a str, &'a dyn erased_serde::Serialize), UnregisteredType>
    {
        self.serialization_meta_datas
            .get(&element.as_any().type_id())
            .and_then(|metadata| {
                (metadata.serialize_fn)(element)
                    .map(|value| (metadata.identifier.as_str(), value))
            })
            .ok_or_else(|| UnregisteredType::new(element.type_name()))
    }
}

#[cfg(test)]
mod test;
