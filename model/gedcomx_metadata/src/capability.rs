//! Contains the capability traits shared by the records of the model and the
//! markers used to look the records up through them.
//!
//! A capability marker is passed to
//! [`Extensions::find_by_type()`](gedcomx_extension::Extensions::find_by_type)
//! in place of a concrete type. It matches every stored element whose concrete
//! type has the capability and yields the element as the capability's trait
//! object. The records of this crate are known to the markers from the start;
//! application types join them through [`register_resource()`],
//! [`register_agent()`] and [`register_attributed()`].
//!
//! # Example
//!
//! ``` rust
//! use gedcomx_extension::Extensions;
//! use gedcomx_metadata::{
//!     capability::AnyAgent,
//!     foaf::{Organization, Person},
//!     source::SourceDescription,
//! };
//!
//! let mut extensions = Extensions::new();
//!
//! extensions.add(Organization::new("R1", "FamilySearch International"));
//! extensions.add(SourceDescription::new("S1"));
//! extensions.add(Person::new("P1", "Jane Doe"));
//!
//! let names = extensions
//!     .find_by_type::<AnyAgent>()
//!     .filter_map(|agent| agent.name())
//!     .map(|name| name.value.as_str())
//!     .collect::<Vec<_>>();
//!
//! assert_eq!(names, ["FamilySearch International", "Jane Doe"]);
//! ```

use std::fmt::Debug;

use gedcomx_extension::{capability::CapabilityTable, Extension, Lookup};
use lazy_static::lazy_static;

use crate::{
    common::{Attribution, Note, ResourceReference},
    foaf::{Address, OnlineAccount, Organization, Person},
    rdf::LiteralValue,
    source::SourceDescription,
};

/// A record that carries a local identifier, which other records refer to with
/// a fragment such as `#R1`.
pub trait Resource: Debug + Send + Sync {
    /// Gets the local identifier of the record.
    fn id(&self) -> &str;

    /// Gets the fragment reference pointing at the record.
    fn reference(&self) -> ResourceReference {
        ResourceReference::new(format!("#{}", self.id()))
    }
}

/// An agent: a person or organization that provides, holds or contributes
/// data.
pub trait Agent: Resource {
    /// Gets the name of the agent.
    fn name(&self) -> Option<&LiteralValue>;

    /// Gets the homepage of the agent.
    fn homepage(&self) -> Option<&LiteralValue>;

    /// Gets the OpenID of the agent.
    fn openid(&self) -> Option<&LiteralValue>;

    /// Gets the online accounts of the agent.
    fn accounts(&self) -> &[OnlineAccount];

    /// Gets the email addresses of the agent.
    fn emails(&self) -> &[ResourceReference];

    /// Gets the phone numbers of the agent.
    fn phones(&self) -> &[ResourceReference];

    /// Gets the postal addresses of the agent.
    fn addresses(&self) -> &[Address];
}

/// A record that may carry an [`Attribution`].
pub trait Attributed: Debug + Send + Sync {
    /// Gets the attribution of the record.
    fn attribution(&self) -> Option<&Attribution>;
}

/// Looks up every element implementing [`Resource`].
///
/// [`Organization`], [`Person`] and [`SourceDescription`] are always
/// included; other types are added with [`register_resource()`] or
/// [`register_agent()`].
#[derive(Debug, Clone, Copy)]
pub struct AnyResource;

/// Looks up every element implementing [`Agent`].
///
/// [`Organization`] and [`Person`] are always included; other types are added
/// with [`register_agent()`].
#[derive(Debug, Clone, Copy)]
pub struct AnyAgent;

/// Looks up every element implementing [`Attributed`].
///
/// [`SourceDescription`] and [`Note`] are always included; other types are
/// added with [`register_attributed()`].
#[derive(Debug, Clone, Copy)]
pub struct AnyAttributed;

macro_rules! capability_cast {
    ($name:ident => dyn $capability:ident) => {
        fn $name<T: $capability + Extension>(
            element: &dyn Extension,
        ) -> Option<&(dyn $capability + 'static)> {
            let value: &T = element.as_any().downcast_ref()?;
            let value: &(dyn $capability + 'static) = value;
            Some(value)
        }
    };
}

capability_cast!(as_resource => dyn Resource);
capability_cast!(as_agent => dyn Agent);
capability_cast!(as_attributed => dyn Attributed);

lazy_static! {
    static ref RESOURCES: CapabilityTable<dyn Resource> = {
        let table = CapabilityTable::new();

        table.register::<Organization>(as_resource::<Organization>);
        table.register::<Person>(as_resource::<Person>);
        table.register::<SourceDescription>(as_resource::<SourceDescription>);

        table
    };
    static ref AGENTS: CapabilityTable<dyn Agent> = {
        let table = CapabilityTable::new();

        table.register::<Organization>(as_agent::<Organization>);
        table.register::<Person>(as_agent::<Person>);

        table
    };
    static ref ATTRIBUTED: CapabilityTable<dyn Attributed> = {
        let table = CapabilityTable::new();

        table.register::<SourceDescription>(
            as_attributed::<SourceDescription>,
        );
        table.register::<Note>(as_attributed::<Note>);

        table
    };
}

/// Makes elements of type `T` visible to [`AnyResource`] lookups.
///
/// Returns `true` if `T` was not registered before.
pub fn register_resource<T: Resource + Extension>() -> bool {
    RESOURCES.register::<T>(as_resource::<T>)
}

/// Makes elements of type `T` visible to [`AnyAgent`] lookups and, as every
/// agent is a resource, to [`AnyResource`] lookups.
///
/// Returns `true` if `T` was not registered as an agent before.
pub fn register_agent<T: Agent + Extension>() -> bool {
    register_resource::<T>();
    AGENTS.register::<T>(as_agent::<T>)
}

/// Makes elements of type `T` visible to [`AnyAttributed`] lookups.
///
/// Returns `true` if `T` was not registered before.
pub fn register_attributed<T: Attributed + Extension>() -> bool {
    ATTRIBUTED.register::<T>(as_attributed::<T>)
}

impl Lookup for AnyResource {
    type Output = dyn Resource;

    fn lookup(element: &dyn Extension) -> Option<&Self::Output> {
        RESOURCES.cast(element)
    }
}

impl Lookup for AnyAgent {
    type Output = dyn Agent;

    fn lookup(element: &dyn Extension) -> Option<&Self::Output> {
        AGENTS.cast(element)
    }
}

impl Lookup for AnyAttributed {
    type Output = dyn Attributed;

    fn lookup(element: &dyn Extension) -> Option<&Self::Output> {
        ATTRIBUTED.cast(element)
    }
}

#[cfg(test)]
mod test;
