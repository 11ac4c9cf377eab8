//! Contains the source records: [`SourceDescription`] and the citation it
//! carries.

use serde::{Deserialize, Serialize};

use crate::{
    capability::{Attributed, Resource},
    common::{Attribution, Note, ResourceReference},
    rdf::LiteralValue,
};

/// A named field of a [`SourceCitation`].
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub struct CitationField {
    /// The name of the field, usually a URI defined by the citation template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// The value of the field.
    pub value: String,
}

/// A bibliographic citation of a source.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub struct SourceCitation {
    /// The rendered citation.
    pub value: String,

    /// The template the citation was rendered from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citation_template: Option<ResourceReference>,

    /// The fields the citation was rendered from.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<CitationField>,
}

impl SourceCitation {
    /// Creates a citation with only its rendered value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self { value: value.into(), ..Self::default() }
    }
}

/// A reference from a description to another [`SourceDescription`].
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub struct SourceReference {
    /// The referenced description, usually a fragment such as `#S1`.
    pub source_description: ResourceReference,
}

impl From<&str> for SourceReference {
    fn from(source_description: &str) -> Self {
        Self { source_description: source_description.into() }
    }
}

/// Describes a source of genealogical data: a record collection, a book, a
/// digital image and so on.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub struct SourceDescription {
    /// The local identifier of the description.
    pub id: String,

    /// The URI of the described source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,

    /// The name to display for the source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<LiteralValue>,

    /// Other names the source is known by.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternate_names: Vec<LiteralValue>,

    /// The citation of the source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citation: Option<SourceCitation>,

    /// The agent that mediates access to the source, usually a repository.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mediator: Option<ResourceReference>,

    /// The sources this source was derived from.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<SourceReference>,

    /// The notes about the source.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<Note>,

    /// The attribution of the description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribution: Option<Attribution>,
}

impl SourceDescription {
    /// Creates a description with the given identifier and nothing else.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into(), ..Self::default() }
    }
}

impl Resource for SourceDescription {
    fn id(&self) -> &str { &self.id }
}

impl Attributed for SourceDescription {
    fn attribution(&self) -> Option<&Attribution> { self.attribution.as_ref() }
}

impl Attributed for Note {
    fn attribution(&self) -> Option<&Attribution> { self.attribution.as_ref() }
}
