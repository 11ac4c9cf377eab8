//! Reads and writes [`ResourceSet`] documents in the supported formats.
//!
//! # Example
//!
//! ``` rust
//! use gedcomx_metadata::{
//!     catalog,
//!     foaf::Organization,
//!     format::{self, Format},
//!     resource_set::ResourceSet,
//!     ReadOptions,
//! };
//!
//! let registry = catalog::registry();
//!
//! let mut resource_set = ResourceSet::new();
//! resource_set.add_extension_element(Organization::new(
//!     "R1",
//!     "FamilySearch International",
//! ));
//!
//! let ron = format::write(&resource_set, &registry, Format::Ron).unwrap();
//! let decoded =
//!     format::read(&ron, &registry, Format::Ron, ReadOptions::default())
//!         .unwrap();
//!
//! assert_eq!(decoded.value, resource_set);
//! assert!(decoded.skipped.is_empty());
//! ```

use std::path::Path;

use enum_as_inner::EnumAsInner;
use gedcomx_extension::{
    serde::{Decoded, ReadFailure, ReadOptions, ReadReport},
    Registry, UnregisteredType,
};
use serde::{
    de::{DeserializeSeed, IgnoredAny},
    Serialize,
};

use crate::resource_set::{ResourceSet, ResourceSetSeed};

/// A document format [`ResourceSet`] can be written in.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
)]
pub enum Format {
    /// JSON, through `serde_json`.
    #[default]
    Json,

    /// Rusty Object Notation, through `ron`.
    Ron,

    /// XML, through `quick-xml`. Each extension element is written as a child
    /// element tagged with its type identifier, such as
    /// `<foaf:Organization>`.
    Xml,
}

impl Format {
    /// Infers the format from the extension of the path, case-insensitively.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?;

        if extension.eq_ignore_ascii_case("json") {
            Some(Self::Json)
        } else if extension.eq_ignore_ascii_case("ron") {
            Some(Self::Ron)
        } else if extension.eq_ignore_ascii_case("xml") {
            Some(Self::Xml)
        } else {
            None
        }
    }

    /// Gets the file extension of the format, without the leading dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Ron => "ron",
            Self::Xml => "xml",
        }
    }
}

/// An error raised while reading or writing a [`ResourceSet`] document.
#[derive(Debug, thiserror::Error, EnumAsInner)]
#[allow(missing_docs)]
pub enum Error {
    #[error(transparent)]
    Unregistered(#[from] UnregisteredType),

    #[error(transparent)]
    Read(#[from] ReadFailure),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    RonRead(#[from] ron::error::SpannedError),

    #[error(transparent)]
    RonWrite(#[from] ron::Error),

    #[error(transparent)]
    Xml(#[from] quick_xml::DeError),
}

/// Writes the resource set as a pretty-printed document.
///
/// # Errors
///
/// Returns [`Error::Unregistered`] if the type of an extension element is not
/// registered, or the format's own error if the writer fails.
pub fn write(
    resource_set: &ResourceSet,
    registry: &Registry,
    format: Format,
) -> Result<String, Error> {
    registry.check_serializable(resource_set.extensions())?;

    let serializable = resource_set.as_serializable(registry);

    let output = match format {
        Format::Json => serde_json::to_string_pretty(&serializable)?,
        Format::Ron => ron::ser::to_string_pretty(
            &serializable,
            ron::ser::PrettyConfig::default(),
        )?,
        Format::Xml => {
            let mut output = String::new();

            let mut serializer = quick_xml::se::Serializer::new(&mut output);
            serializer.indent(' ', 4);
            serializable.serialize(serializer)?;

            output
        }
    };

    log::debug!(
        "wrote {} extension elements as {}",
        resource_set.extensions().len(),
        format.extension()
    );

    Ok(output)
}

/// Reads a resource set document.
///
/// # Errors
///
/// Returns the format's own error if the document is not well formed, even
/// when it breaks off inside an extension element. Otherwise returns
/// [`Error::Read`] if the document has a malformed extension element or, under
/// [`ReadOptions::strict()`], an unresolved identifier.
pub fn read(
    source: &str,
    registry: &Registry,
    format: Format,
    options: ReadOptions,
) -> Result<Decoded<ResourceSet>, Error> {
    let report = ReadReport::new();
    let seed = ResourceSetSeed::new(registry, options, &report);

    let result = match format {
        Format::Json => {
            let mut deserializer = serde_json::Deserializer::from_str(source);

            seed.deserialize(&mut deserializer)
                .and_then(|value| deserializer.end().map(|()| value))
                .map_err(Error::from)
        }

        Format::Ron => ron::Options::default()
            .from_str_seed(source, seed)
            .map_err(Error::from),

        Format::Xml => {
            let mut deserializer =
                quick_xml::de::Deserializer::from_str(source);

            seed.matching_local_names()
                .deserialize(&mut deserializer)
                .map_err(Error::from)
        }
    };

    // a syntax error inside an element reaches the seed as malformed element
    // data; the document itself being broken is reported first
    if result.is_err() {
        if let Some(error) = syntax_error(source, format) {
            return Err(error);
        }
    }

    report.finish(result)
}

/// Checks that the document is well formed, regardless of its content.
fn syntax_error(source: &str, format: Format) -> Option<Error> {
    match format {
        Format::Json => serde_json::from_str::<IgnoredAny>(source)
            .err()
            .map(Error::from),
        Format::Ron => {
            ron::from_str::<IgnoredAny>(source).err().map(Error::from)
        }
        Format::Xml => quick_xml::de::from_str::<IgnoredAny>(source)
            .err()
            .map(Error::from),
    }
}

/// Writes the resource set as a JSON document.
///
/// # Errors
///
/// See [`write()`].
pub fn to_json(
    resource_set: &ResourceSet,
    registry: &Registry,
) -> Result<String, Error> {
    write(resource_set, registry, Format::Json)
}

/// Reads a JSON document, skipping unresolved extension elements.
///
/// # Errors
///
/// See [`read()`].
pub fn from_json(
    source: &str,
    registry: &Registry,
) -> Result<Decoded<ResourceSet>, Error> {
    read(source, registry, Format::Json, ReadOptions::default())
}

/// Writes the resource set as a RON document.
///
/// # Errors
///
/// See [`write()`].
pub fn to_ron(
    resource_set: &ResourceSet,
    registry: &Registry,
) -> Result<String, Error> {
    write(resource_set, registry, Format::Ron)
}

/// Reads a RON document, skipping unresolved extension elements.
///
/// # Errors
///
/// See [`read()`].
pub fn from_ron(
    source: &str,
    registry: &Registry,
) -> Result<Decoded<ResourceSet>, Error> {
    read(source, registry, Format::Ron, ReadOptions::default())
}

/// Writes the resource set as an XML document.
///
/// # Errors
///
/// See [`write()`].
pub fn to_xml(
    resource_set: &ResourceSet,
    registry: &Registry,
) -> Result<String, Error> {
    write(resource_set, registry, Format::Xml)
}

/// Reads an XML document, skipping unresolved extension elements.
///
/// # Errors
///
/// See [`read()`].
pub fn from_xml(
    source: &str,
    registry: &Registry,
) -> Result<Decoded<ResourceSet>, Error> {
    read(source, registry, Format::Xml, ReadOptions::default())
}

#[cfg(test)]
mod test;
