//! Contains the FOAF-style agents: [`Organization`] and [`Person`], along
//! with their contact records.
//!
//! Both agents expose their shared fields through the [`Agent`] capability
//! trait.

use serde::{Deserialize, Serialize};

use crate::{
    capability::{Agent, Resource},
    common::ResourceReference,
    rdf::LiteralValue,
};

/// A postal address.
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
pub struct Address {
    /// The complete address as a single, possibly multi-line, string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    /// The first street line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,

    /// The second street line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street2: Option<String>,

    /// The third street line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street3: Option<String>,

    /// The city.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    /// The state or province.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_or_province: Option<String>,

    /// The postal code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,

    /// The country.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

/// An account held with an online service.
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
pub struct OnlineAccount {
    /// The homepage of the service that provides the account.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_homepage: Option<ResourceReference>,

    /// The name of the account on the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_name: Option<LiteralValue>,
}

/// An organization such as an archive, a library or a publisher.
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
pub struct Organization {
    /// The local identifier of the organization.
    pub id: String,

    /// The name of the organization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<LiteralValue>,

    /// The homepage of the organization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homepage: Option<LiteralValue>,

    /// The OpenID of the organization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openid: Option<LiteralValue>,

    /// The online accounts of the organization.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub accounts: Vec<OnlineAccount>,

    /// The email addresses, as `mailto:` references.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub emails: Vec<ResourceReference>,

    /// The phone numbers, as `tel:` or `fax:` references.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub phones: Vec<ResourceReference>,

    /// The postal addresses.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub addresses: Vec<Address>,
}

impl Organization {
    /// Creates an organization with the given identifier and name.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<LiteralValue>) -> Self {
        Self { id: id.into(), name: Some(name.into()), ..Self::default() }
    }
}

/// A person acting as an agent, for example a contributor.
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
pub struct Person {
    /// The local identifier of the person.
    pub id: String,

    /// The full name of the person.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<LiteralValue>,

    /// The family name of the person.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_name: Option<LiteralValue>,

    /// The given name of the person.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub given_name: Option<LiteralValue>,

    /// The homepage of the person.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homepage: Option<LiteralValue>,

    /// The OpenID of the person.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openid: Option<LiteralValue>,

    /// The online accounts of the person.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub accounts: Vec<OnlineAccount>,

    /// The email addresses, as `mailto:` references.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub emails: Vec<ResourceReference>,

    /// The phone numbers, as `tel:` or `fax:` references.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub phones: Vec<ResourceReference>,

    /// The postal addresses.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub addresses: Vec<Address>,
}

impl Person {
    /// Creates a person with the given identifier and full name.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<LiteralValue>) -> Self {
        Self { id: id.into(), name: Some(name.into()), ..Self::default() }
    }
}

macro_rules! impl_agent {
    ($($ty:ty),*) => {
        $(
            impl Resource for $ty {
                fn id(&self) -> &str { &self.id }
            }

            impl Agent for $ty {
                fn name(&self) -> Option<&LiteralValue> { self.name.as_ref() }

                fn homepage(&self) -> Option<&LiteralValue> {
                    self.homepage.as_ref()
                }

                fn openid(&self) -> Option<&LiteralValue> {
                    self.openid.as_ref()
                }

                fn accounts(&self) -> &[OnlineAccount] { &self.accounts }

                fn emails(&self) -> &[ResourceReference] { &self.emails }

                fn phones(&self) -> &[ResourceReference] { &self.phones }

                fn addresses(&self) -> &[Address] { &self.addresses }
            }
        )*
    };
}

impl_agent!(Organization, Person);
