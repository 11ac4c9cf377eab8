//! Contains the [`ResourceSet`], the top-level aggregate of a document, which
//! carries its content as extension elements.

use std::fmt::Formatter;

use derive_new::new;
use gedcomx_extension::{
    serde::{ExtensionsSeed, ReadOptions, ReadReport},
    Extension, Extensions, Lookup, Registry,
};
use serde::{
    de::{DeserializeSeed, Error as _, IgnoredAny, MapAccess, Visitor},
    ser::SerializeStruct,
    Deserialize, Serialize, Serializer,
};

/// A set of resources, written as a single document.
///
/// The content of the set (source descriptions, agents, notes and whatever
/// else the application registers) is held as extension elements and looked
/// up by type.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResourceSet {
    id: Option<String>,
    extensions: Extensions,
}

impl ResourceSet {
    /// Creates an empty resource set without an identifier.
    #[must_use]
    pub const fn new() -> Self {
        Self { id: None, extensions: Extensions::new() }
    }

    /// Creates an empty resource set with the given identifier.
    #[must_use]
    pub fn with_id(id: impl Into<String>) -> Self {
        Self { id: Some(id.into()), extensions: Extensions::new() }
    }

    /// Gets the identifier of the set.
    #[must_use]
    pub fn id(&self) -> Option<&str> { self.id.as_deref() }

    /// Sets the identifier of the set.
    pub fn set_id(&mut self, id: Option<String>) { self.id = id; }

    /// Gets the extension elements of the set.
    #[must_use]
    pub const fn extensions(&self) -> &Extensions { &self.extensions }

    /// Appends an extension element to the set.
    pub fn add_extension_element<V: Extension>(&mut self, element: V) {
        self.extensions.add(element);
    }

    /// Removes the first extension element of type `V` equal to `element`.
    ///
    /// Returns `true` if an element was removed.
    pub fn remove_extension_element<V: Extension>(
        &mut self,
        element: &V,
    ) -> bool {
        self.extensions.remove(element)
    }

    /// Iterates, in insertion order, over the extension elements matching
    /// `L`; either a concrete type or a capability marker from
    /// [`capability`](crate::capability).
    pub fn find_extensions_of_type<L: Lookup>(
        &self,
    ) -> impl Iterator<Item = &L::Output> + '_ {
        self.extensions.find_by_type::<L>()
    }

    /// Creates a serializable view of the set using the given registry.
    #[must_use]
    pub const fn as_serializable<'a>(
        &'a self,
        registry: &'a Registry,
    ) -> SerializableResourceSet<'a> {
        SerializableResourceSet { resource_set: self, registry }
    }
}

impl<V: Extension> Extend<V> for ResourceSet {
    fn extend<I: IntoIterator<Item = V>>(&mut self, iter: I) {
        self.extensions.extend(iter);
    }
}

const NAME: &str = "ResourceSet";
const ID: &str = "id";
const EXTENSIONS: &str = "extensions";
const FIELDS: &[&str] = &[ID, EXTENSIONS];

/// The struct that enables the serialization of the [`ResourceSet`] struct.
///
/// An absent identifier and an empty extension container are both omitted
/// from the written document.
#[derive(Debug, Clone, Copy, new)]
pub struct SerializableResourceSet<'a> {
    resource_set: &'a ResourceSet,
    registry: &'a Registry,
}

impl Serialize for SerializableResourceSet<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let id = self.resource_set.id.as_ref();
        let extensions = &self.resource_set.extensions;

        let len =
            usize::from(id.is_some()) + usize::from(!extensions.is_empty());
        let mut state = serializer.serialize_struct(NAME, len)?;

        if let Some(id) = id {
            state.serialize_field(ID, id)?;
        } else {
            state.skip_field(ID)?;
        }

        if extensions.is_empty() {
            state.skip_field(EXTENSIONS)?;
        } else {
            state.serialize_field(
                EXTENSIONS,
                &extensions.as_serializable(self.registry),
            )?;
        }

        state.end()
    }
}

enum Field {
    Id,
    Extensions,
    Ignore,
}

struct FieldVisitor;

impl Visitor<'_> for FieldVisitor {
    type Value = Field;

    fn expecting(&self, formatter: &mut Formatter) -> std::fmt::Result {
        formatter.write_str("a resource set field name")
    }

    fn visit_str<E: serde::de::Error>(self, value: &str) -> Result<Field, E> {
        Ok(match value {
            ID => Field::Id,
            EXTENSIONS => Field::Extensions,
            _ => Field::Ignore,
        })
    }
}

impl<'de> Deserialize<'de> for Field {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_identifier(FieldVisitor)
    }
}

/// The seed that reads a [`ResourceSet`] and its extension elements.
///
/// An absent `extensions` field yields an empty container and unknown fields
/// are ignored.
#[derive(Debug, Clone, Copy, new)]
pub struct ResourceSetSeed<'a> {
    registry: &'a Registry,
    options: ReadOptions,
    report: &'a ReadReport,

    #[new(default)]
    local_names: bool,
}

impl ResourceSetSeed<'_> {
    /// Resolves the extension elements by the local part of their type
    /// identifier when it is the only part the reader reports. See
    /// [`ExtensionsSeed::matching_local_names()`].
    #[must_use]
    pub const fn matching_local_names(mut self) -> Self {
        self.local_names = true;
        self
    }
}

impl<'de> DeserializeSeed<'de> for ResourceSetSeed<'_> {
    type Value = ResourceSet;

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_struct(NAME, FIELDS, self)
    }
}

impl<'de> Visitor<'de> for ResourceSetSeed<'_> {
    type Value = ResourceSet;

    fn expecting(&self, formatter: &mut Formatter) -> std::fmt::Result {
        formatter.write_str("a resource set")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut id = None;
        let mut extensions = None;

        while let Some(field) = map.next_key::<Field>()? {
            match field {
                Field::Id => {
                    if id.is_some() {
                        return Err(A::Error::duplicate_field(ID));
                    }

                    id = Some(map.next_value::<String>()?);
                }

                Field::Extensions => {
                    if extensions.is_some() {
                        return Err(A::Error::duplicate_field(EXTENSIONS));
                    }

                    let seed = ExtensionsSeed::new(
                        self.registry,
                        self.options,
                        self.report,
                    );

                    extensions = Some(map.next_value_seed(if self.local_names {
                        seed.matching_local_names()
                    } else {
                        seed
                    })?);
                }

                Field::Ignore => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }

        Ok(ResourceSet { id, extensions: extensions.unwrap_or_default() })
    }
}
