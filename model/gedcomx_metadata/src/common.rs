//! Contains the small records shared by the rest of the model: references,
//! attributions and notes.

use derive_more::From;
use derive_new::new;
use serde::{Deserialize, Serialize};

/// A reference to a resource identified by a URI.
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
    From,
    new,
)]
pub struct ResourceReference {
    /// The URI of the referenced resource.
    pub resource: String,
}

impl From<&str> for ResourceReference {
    fn from(resource: &str) -> Self { Self { resource: resource.to_owned() } }
}

/// Who contributed a piece of data and when it was last modified.
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
pub struct Attribution {
    /// Reference to the agent that contributed the data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contributor: Option<ResourceReference>,

    /// The modification time in milliseconds since the Unix epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<u64>,
}

/// A free-form note attached to a description.
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
pub struct Note {
    /// The local identifier of the note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// The language of the note, as an IETF BCP 47 tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,

    /// A short summary of the note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    /// The text of the note.
    pub text: String,

    /// The attribution of the note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribution: Option<Attribution>,
}

impl Note {
    /// Creates a note with the given text and nothing else.
    #[must_use]
    pub fn with_text(text: impl Into<String>) -> Self {
        Self { text: text.into(), ..Self::default() }
    }
}
