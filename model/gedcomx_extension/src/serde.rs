//! The `serde` support for the [`Extensions`] container.
//!
//! The container is written as a sequence of self-describing nodes. Each node
//! is a single-entry map from the identifier the element's type is registered
//! under to the element's own serialized fields.
//!
//! # Example
//!
//! ``` rust
//! use gedcomx_extension::{
//!     serde::{ExtensionsSeed, ReadOptions, ReadReport},
//!     Extensions, Registry,
//! };
//! use serde::{de::DeserializeSeed, Deserialize, Serialize};
//!
//! #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
//! struct Label {
//!     text: String,
//! }
//!
//! let mut registry = Registry::new();
//! registry.register::<Label>("ex:Label");
//! registry.register::<u32>("ex:Number");
//!
//! let mut extensions = Extensions::new();
//! extensions.add(Label { text: "Hello".to_string() });
//! extensions.add(7u32);
//!
//! let serialized =
//!     serde_json::to_value(extensions.as_serializable(&registry)).unwrap();
//!
//! assert_eq!(serialized[0]["ex:Label"]["text"], "Hello");
//! assert_eq!(serialized[1]["ex:Number"], 7);
//!
//! // the reader skips the node it cannot resolve
//! let json = r#"[{"ex:Unknown": {"a": 1}}, {"ex:Number": 7}]"#;
//! let mut deserializer = serde_json::Deserializer::from_str(json);
//!
//! let report = ReadReport::new();
//! let seed = ExtensionsSeed::new(&registry, ReadOptions::default(), &report);
//! let result = seed
//!     .deserialize(&mut deserializer)
//!     .map_err(Box::<dyn std::error::Error>::from);
//!
//! let decoded = report.finish(result).unwrap();
//!
//! let numbers = decoded.value.find_by_type::<u32>().collect::<Vec<_>>();
//!
//! assert_eq!(numbers, [&7u32]);
//! assert_eq!(decoded.skipped.len(), 1);
//! assert_eq!(decoded.skipped[0].identifier, "ex:Unknown");
//! ```

use std::{cell::RefCell, fmt::Formatter};

use derive_new::new;
use enum_as_inner::EnumAsInner;
use serde::{
    de::{
        DeserializeSeed, Error as _, IgnoredAny, MapAccess, SeqAccess, Visitor,
    },
    ser::{Error as _, SerializeMap, SerializeSeq},
    Serialize, Serializer,
};

use crate::{
    registry::DeserializeFn, Extension, Extensions, Registry,
    UnresolvedExtensionType,
};

/// What the reader does with a node whose identifier is not registered.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
)]
pub enum UnknownTypePolicy {
    /// Drops the node, records it in the [`ReadReport`] and keeps reading.
    #[default]
    Skip,

    /// Fails the whole document with [`UnresolvedExtensionType`].
    Reject,
}

/// The options used when reading [`Extensions`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
)]
pub struct ReadOptions {
    /// See [`UnknownTypePolicy`].
    pub unknown_types: UnknownTypePolicy,
}

impl ReadOptions {
    /// The options that reject every unresolved identifier.
    #[must_use]
    pub const fn strict() -> Self {
        Self { unknown_types: UnknownTypePolicy::Reject }
    }
}

/// The `{identifier}` extension element is malformed: {message}
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
pub struct MalformedElementData {
    /// The identifier of the node, which was resolved successfully.
    pub identifier: String,

    /// The description of the parse error.
    pub message: String,
}

/// A hard failure raised while reading [`Extensions`].
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    thiserror::Error,
    EnumAsInner,
)]
#[allow(missing_docs)]
pub enum ReadFailure {
    #[error(transparent)]
    Unresolved(#[from] UnresolvedExtensionType),

    #[error(transparent)]
    Malformed(#[from] MalformedElementData),
}

/// The value read from a document along with the nodes that were skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded<T> {
    /// The value that was read.
    pub value: T,

    /// The identifiers of the nodes that were dropped because no type is
    /// registered under them, in document order.
    pub skipped: Vec<UnresolvedExtensionType>,
}

/// Collects what happens to the nodes during one read.
///
/// `serde` only lets a seed report its errors as the format's own stringly
/// error. The report keeps the structured [`ReadFailure`] that caused it and
/// the list of skipped nodes, and [`ReadReport::finish()`] puts them back
/// together with the result.
#[derive(Debug, Default)]
pub struct ReadReport {
    skipped: RefCell<Vec<UnresolvedExtensionType>>,
    failure: RefCell<Option<ReadFailure>>,
}

impl ReadReport {
    /// Creates an empty report.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    fn skip(&self, unresolved: UnresolvedExtensionType) {
        self.skipped.borrow_mut().push(unresolved);
    }

    fn fail(&self, failure: ReadFailure) {
        self.failure.borrow_mut().get_or_insert(failure);
    }

    /// Combines the result of the read with the report.
    ///
    /// # Errors
    ///
    /// A [`ReadFailure`] recorded during the read takes precedence over the
    /// format error it was reported through. Otherwise the format error is
    /// returned as is.
    pub fn finish<T, E: From<ReadFailure>>(
        self,
        result: Result<T, E>,
    ) -> Result<Decoded<T>, E> {
        if let Some(failure) = self.failure.into_inner() {
            return Err(failure.into());
        }

        result.map(|value| Decoded {
            value,
            skipped: self.skipped.into_inner(),
        })
    }
}

impl Extensions {
    /// Creates a serializable view of the container. Every element's type must
    /// be registered in the given registry.
    #[must_use]
    pub const fn as_serializable<'a>(
        &'a self,
        registry: &'a Registry,
    ) -> SerializableExtensions<'a> {
        SerializableExtensions { extensions: self, registry }
    }
}

/// The struct that enables the serialization of the [`Extensions`] struct.
#[derive(Debug, Clone, Copy, new)]
pub struct SerializableExtensions<'a> {
    extensions: &'a Extensions,
    registry: &'a Registry,
}

impl Serialize for SerializableExtensions<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.extensions.len()))?;

        for element in self.extensions.all() {
            let (identifier, value) =
                self.registry.node(element).map_err(S::Error::custom)?;

            seq.serialize_element(&SerializeNode { identifier, value })?;
        }

        seq.end()
    }
}

struct SerializeNode<'a> {
    identifier: &'a str,
    value: &'a dyn erased_serde::Serialize,
}

impl Serialize for SerializeNode<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.identifier, &SerializeElement(self.value))?;
        map.end()
    }
}

struct SerializeElement<'a>(&'a dyn erased_serde::Serialize);

impl Serialize for SerializeElement<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        erased_serde::serialize(self.0, serializer)
    }
}

/// The seed that reads [`Extensions`] out of a sequence of self-describing
/// nodes.
#[derive(Debug, Clone, Copy, new)]
pub struct ExtensionsSeed<'a> {
    registry: &'a Registry,
    options: ReadOptions,
    report: &'a ReadReport,

    #[new(default)]
    local_names: bool,
}

impl ExtensionsSeed<'_> {
    /// Resolves node identifiers with
    /// [`Registry::resolve_local_name()`]; for readers that report a qualified
    /// tag such as `foaf:Organization` by its local name only.
    #[must_use]
    pub const fn matching_local_names(mut self) -> Self {
        self.local_names = true;
        self
    }
}

impl<'de> DeserializeSeed<'de> for ExtensionsSeed<'_> {
    type Value = Extensions;

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(self)
    }
}

impl<'de> Visitor<'de> for ExtensionsSeed<'_> {
    type Value = Extensions;

    fn expecting(&self, formatter: &mut Formatter) -> std::fmt::Result {
        formatter.write_str("a sequence of self-describing extension nodes")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut extensions = Extensions::new();

        while let Some(element) =
            seq.next_element_seed(NodeVisitor { seed: self })?
        {
            if let Some(element) = element {
                extensions.add_boxed(element);
            }
        }

        Ok(extensions)
    }
}

struct NodeVisitor<'a> {
    seed: ExtensionsSeed<'a>,
}

impl<'de> DeserializeSeed<'de> for NodeVisitor<'_> {
    type Value = Option<Box<dyn Extension>>;

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_map(self)
    }
}

impl<'de> Visitor<'de> for NodeVisitor<'_> {
    type Value = Option<Box<dyn Extension>>;

    fn expecting(&self, formatter: &mut Formatter) -> std::fmt::Result {
        formatter.write_str(
            "a map with the type identifier as the only key and the element \
             as the value",
        )
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let Some(identifier) = map.next_key::<String>()? else {
            return Err(A::Error::invalid_length(0, &self));
        };

        let resolved = if self.seed.local_names {
            self.seed.registry.resolve_local_name(&identifier)
        } else {
            self.seed.registry.resolve(&identifier)
        };

        let element = match resolved {
            Ok(registered) => Some(map.next_value_seed(ElementDeserializer {
                identifier: registered.identifier(),
                deserialize_fn: registered.deserialize_fn(),
                report: self.seed.report,
            })?),

            Err(unresolved) => match self.seed.options.unknown_types {
                UnknownTypePolicy::Skip => {
                    map.next_value::<IgnoredAny>()?;

                    log::warn!(
                        "skipped extension element with unresolved type \
                         identifier `{identifier}`"
                    );
                    self.seed.report.skip(unresolved);

                    None
                }

                UnknownTypePolicy::Reject => {
                    let message = unresolved.to_string();
                    self.seed.report.fail(unresolved.into());

                    return Err(A::Error::custom(message));
                }
            },
        };

        if map.next_key::<IgnoredAny>()?.is_some() {
            return Err(A::Error::custom(format!(
                "the extension node `{identifier}` carries more than one type \
                 identifier",
            )));
        }

        Ok(element)
    }
}

struct ElementDeserializer<'a> {
    identifier: &'a str,
    deserialize_fn: DeserializeFn,
    report: &'a ReadReport,
}

impl<'de> DeserializeSeed<'de> for ElementDeserializer<'_> {
    type Value = Box<dyn Extension>;

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let mut erased = <dyn erased_serde::Deserializer>::erase(deserializer);

        (self.deserialize_fn)(&mut erased).map_err(|error| {
            let malformed = MalformedElementData::new(
                self.identifier.to_owned(),
                error.to_string(),
            );
            let message = malformed.to_string();

            self.report.fail(malformed.into());
            D::Error::custom(message)
        })
    }
}
