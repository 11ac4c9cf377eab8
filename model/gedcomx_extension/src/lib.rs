//! Contains the [`Extensions`] container: an insertion-ordered collection of
//! heterogeneous extension elements that can be queried back by their type.
//!
//! The container never looks inside the stored values. It only records the
//! concrete runtime type of each value when it is added; the [`Registry`]
//! (see [`registry`]) and the [`serde`] module use that record to write the
//! elements as self-describing nodes and to rebuild them on read.
//!
//! # Example
//!
//! ``` rust
//! use gedcomx_extension::Extensions;
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Tag(&'static str);
//!
//! let mut extensions = Extensions::new();
//!
//! extensions.add(Tag("first"));
//! extensions.add(42u32);
//! extensions.add(Tag("second"));
//!
//! let tags = extensions.find_by_type::<Tag>().collect::<Vec<_>>();
//! assert_eq!(tags, [&Tag("first"), &Tag("second")]);
//!
//! assert!(extensions.remove(&42u32));
//! assert!(!extensions.remove(&42u32));
//! assert_eq!(extensions.len(), 2);
//! ```

use std::{
    any::{Any, TypeId},
    fmt::Debug,
};

pub mod capability;
pub mod registry;
pub mod serde;

pub use registry::{Registry, UnregisteredType, UnresolvedExtensionType};

/// A value that can be stored in the [`Extensions`] container.
///
/// The trait is implemented for every `'static` type that is [`Debug`],
/// [`Clone`], [`PartialEq`], [`Send`] and [`Sync`]; it only exists to make the
/// stored values usable behind a `dyn` pointer.
pub trait Extension: Any + Debug + Send + Sync {
    /// Gets the value as [`Any`] so that it can be downcasted.
    fn as_any(&self) -> &dyn Any;

    /// Gets the name of the concrete type; used for diagnostics.
    fn type_name(&self) -> &'static str;

    /// Compares the value with another extension element. Elements of
    /// different concrete types are never equal.
    fn dyn_eq(&self, other: &dyn Extension) -> bool;

    /// Clones the value into a new box.
    fn dyn_clone(&self) -> Box<dyn Extension>;
}

impl<T: Any + Debug + Clone + PartialEq + Send + Sync> Extension for T {
    fn as_any(&self) -> &dyn Any { self }

    fn type_name(&self) -> &'static str { std::any::type_name::<T>() }

    fn dyn_eq(&self, other: &dyn Extension) -> bool {
        other.as_any().downcast_ref::<T>().is_some_and(|other| self == other)
    }

    fn dyn_clone(&self) -> Box<dyn Extension> { Box::new(self.clone()) }
}

/// Describes which stored elements match a requested type in
/// [`Extensions::find_by_type()`].
///
/// Every [`Extension`] type looks itself up by exact concrete type. Marker
/// types can implement this trait to look up a whole family of concrete types
/// through a shared capability (usually a trait object as the
/// [`Lookup::Output`]); a [`CapabilityTable`](capability::CapabilityTable)
/// keeps the set of such types open to registration.
pub trait Lookup {
    /// The type the matching elements are viewed as.
    type Output: ?Sized + 'static;

    /// Returns the element viewed as [`Lookup::Output`] if it matches.
    fn lookup(element: &dyn Extension) -> Option<&Self::Output>;
}

impl<T: Extension> Lookup for T {
    type Output = T;

    fn lookup(element: &dyn Extension) -> Option<&T> {
        element.as_any().downcast_ref::<T>()
    }
}

#[derive(Debug)]
struct Entry {
    type_id: TypeId,
    value: Box<dyn Extension>,
}

/// An insertion-ordered container of type-erased extension elements.
///
/// Multiple elements of the same type, or even equal elements, may coexist.
/// Elements are only ever appended or removed; there is no way to mutate a
/// stored element in place.
#[derive(Debug, Default)]
pub struct Extensions {
    entries: Vec<Entry>,
}

impl Extensions {
    /// Creates an empty container.
    #[must_use]
    pub const fn new() -> Self { Self { entries: Vec::new() } }

    /// Appends the element to the end of the container.
    pub fn add<V: Extension>(&mut self, element: V) {
        self.entries.push(Entry {
            type_id: TypeId::of::<V>(),
            value: Box::new(element),
        });
    }

    /// Appends an already boxed element to the end of the container. The
    /// recorded type is the concrete type behind the box.
    pub fn add_boxed(&mut self, element: Box<dyn Extension>) {
        let type_id = element.as_any().type_id();
        self.entries.push(Entry { type_id, value: element });
    }

    /// Removes the first element of type `V` that is equal to `element`.
    ///
    /// Returns `true` if an element was removed.
    pub fn remove<V: Extension>(&mut self, element: &V) -> bool {
        let type_id = TypeId::of::<V>();

        let Some(position) = self.entries.iter().position(|entry| {
            entry.type_id == type_id && entry.value.dyn_eq(element)
        }) else {
            return false;
        };

        self.entries.remove(position);
        true
    }

    /// Iterates, in insertion order, over every element that matches `L`.
    ///
    /// See [`Lookup`] for what "matches" means.
    pub fn find_by_type<L: Lookup>(
        &self,
    ) -> impl Iterator<Item = &L::Output> + '_ {
        self.entries.iter().filter_map(|entry| L::lookup(&*entry.value))
    }

    /// Counts the elements whose concrete type is exactly `T`.
    #[must_use]
    pub fn count_of_type<T: Extension>(&self) -> usize {
        let type_id = TypeId::of::<T>();
        self.entries.iter().filter(|entry| entry.type_id == type_id).count()
    }

    /// Iterates over all the elements in insertion order.
    #[must_use]
    pub fn all(&self) -> impl ExactSizeIterator<Item = &dyn Extension> + '_ {
        self.entries.iter().map(|entry| &*entry.value)
    }

    /// Returns the number of stored elements.
    #[must_use]
    pub fn len(&self) -> usize { self.entries.len() }

    /// Returns `true` if no element is stored.
    ///
    /// Serializers treat an empty container exactly like an absent one: the
    /// extension field is omitted from the written document.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
}

impl Clone for Extensions {
    fn clone(&self) -> Self {
        Self {
            entries: self
                .entries
                .iter()
                .map(|entry| Entry {
                    type_id: entry.type_id,
                    value: entry.value.dyn_clone(),
                })
                .collect(),
        }
    }
}

impl PartialEq for Extensions {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self
                .entries
                .iter()
                .zip(&other.entries)
                .all(|(a, b)| a.value.dyn_eq(&*b.value))
    }
}

impl<V: Extension> Extend<V> for Extensions {
    fn extend<I: IntoIterator<Item = V>>(&mut self, iter: I) {
        for element in iter {
            self.add(element);
        }
    }
}
