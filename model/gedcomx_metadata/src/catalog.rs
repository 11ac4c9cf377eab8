//! Contains the function used for creating the default [`Registry`] instance.

use gedcomx_extension::Registry;

use crate::{
    common::Note,
    foaf::{Organization, Person},
    source::SourceDescription,
};

/// The identifier [`Organization`] elements are written under.
pub const ORGANIZATION: &str = "foaf:Organization";

/// The identifier [`Person`] elements are written under.
pub const PERSON: &str = "foaf:Person";

/// The identifier [`SourceDescription`] elements are written under.
pub const SOURCE_DESCRIPTION: &str = "gx:SourceDescription";

/// The identifier [`Note`] elements are written under.
pub const NOTE: &str = "gx:Note";

/// Gets the registry that can read and write every record of the model.
///
/// Applications with their own extension types register them on the returned
/// registry before reading or writing any document.
#[must_use]
pub fn registry() -> Registry {
    let mut registry = Registry::new();

    assert!(registry.register::<Organization>(ORGANIZATION));
    assert!(registry.register::<Person>(PERSON));
    assert!(registry.register::<SourceDescription>(SOURCE_DESCRIPTION));
    assert!(registry.register::<Note>(NOTE));

    registry
}
