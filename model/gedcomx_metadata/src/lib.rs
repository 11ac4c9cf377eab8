//! The GEDCOM X metadata model: agents, organizations, source descriptions
//! and the other records used to describe where genealogical data comes from.
//!
//! A document is a [`ResourceSet`](resource_set::ResourceSet) whose content is
//! held as typed extension elements. The records of this crate are
//! registered in the default [`catalog`]; applications may register their own
//! types next to them and read them back by type.
//!
//! # Example
//!
//! ``` rust
//! use gedcomx_metadata::{
//!     catalog,
//!     foaf::Organization,
//!     format,
//!     resource_set::ResourceSet,
//!     source::{SourceCitation, SourceDescription},
//! };
//!
//! let registry = catalog::registry();
//!
//! let mut resource_set = ResourceSet::new();
//!
//! resource_set.add_extension_element(SourceDescription {
//!     citation: Some(SourceCitation::new("Texas death records, 1890-1976")),
//!     mediator: Some("#R2".into()),
//!     ..SourceDescription::new("S1")
//! });
//! resource_set.add_extension_element(Organization::new(
//!     "R2",
//!     "Family History Library",
//! ));
//!
//! let json = format::to_json(&resource_set, &registry).unwrap();
//! let decoded = format::from_json(&json, &registry).unwrap().value;
//!
//! let organization = decoded
//!     .find_extensions_of_type::<Organization>()
//!     .next()
//!     .unwrap();
//!
//! assert_eq!(organization.id, "R2");
//! assert_eq!(decoded, resource_set);
//! ```

pub mod capability;
pub mod catalog;
pub mod common;
pub mod foaf;
pub mod format;
pub mod rdf;
pub mod resource_set;
pub mod source;

pub use gedcomx_extension::{
    serde::{Decoded, ReadOptions, UnknownTypePolicy},
    Extensions, Lookup, Registry, UnresolvedExtensionType,
};
