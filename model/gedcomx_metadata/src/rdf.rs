//! Contains [`LiteralValue`], the RDF-literal-like value used for names,
//! homepages and other human readable fields.

use serde::{Deserialize, Serialize};

/// A literal value with an optional language and datatype.
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
pub struct LiteralValue {
    /// The lexical form of the value.
    pub value: String,

    /// The language of the value, as an IETF BCP 47 tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,

    /// The URI of the datatype of the value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datatype: Option<String>,
}

impl LiteralValue {
    /// Creates a plain literal without language or datatype.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self { value: value.into(), lang: None, datatype: None }
    }

    /// Sets the language of the literal.
    #[must_use]
    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }
}

impl From<&str> for LiteralValue {
    fn from(value: &str) -> Self { Self::new(value) }
}
