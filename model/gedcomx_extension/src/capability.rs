//! Contains the [`CapabilityTable`], which records which concrete extension
//! types can be viewed through a shared capability such as a trait object.
//!
//! A capability marker implementing [`Lookup`](crate::Lookup) keeps one table
//! and answers its lookups from it. Any crate can add its own types to the
//! table, so a capability lookup also finds application types stored next to
//! the built-in ones.
//!
//! # Example
//!
//! ``` rust
//! use std::fmt::Debug;
//!
//! use gedcomx_extension::{capability::CapabilityTable, Extension, Extensions};
//!
//! trait Named: Debug + Send + Sync {
//!     fn name(&self) -> &str;
//! }
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct City(&'static str);
//!
//! impl Named for City {
//!     fn name(&self) -> &str { self.0 }
//! }
//!
//! fn as_named<T: Named + Extension>(
//!     element: &dyn Extension,
//! ) -> Option<&(dyn Named + 'static)> {
//!     let value: &T = element.as_any().downcast_ref()?;
//!     let value: &(dyn Named + 'static) = value;
//!     Some(value)
//! }
//!
//! let table = CapabilityTable::<dyn Named>::new();
//! assert!(table.register::<City>(as_named::<City>));
//!
//! let mut extensions = Extensions::new();
//! extensions.add(City("Austin"));
//! extensions.add(42u32);
//!
//! let names = extensions
//!     .all()
//!     .filter_map(|element| table.cast(element))
//!     .map(Named::name)
//!     .collect::<Vec<_>>();
//!
//! assert_eq!(names, ["Austin"]);
//! ```

use std::{any::TypeId, collections::HashMap, fmt::Debug};

use parking_lot::RwLock;

use crate::Extension;

/// Views the element as the capability `C` if it is of the type the function
/// was registered for.
pub type CastFn<C> = for<'a> fn(&'a dyn Extension) -> Option<&'a C>;

/// Maps concrete extension types to the function that views them as the
/// capability `C`.
///
/// The table is safe to share between threads; registering takes a write lock
/// and every lookup a read lock.
pub struct CapabilityTable<C: ?Sized + 'static> {
    casts: RwLock<HashMap<TypeId, CastFn<C>>>,
}

impl<C: ?Sized + 'static> CapabilityTable<C> {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self { Self { casts: RwLock::new(HashMap::new()) } }

    /// Records that elements of type `T` are viewed as `C` through `cast`.
    ///
    /// Returns `true` if `T` was not registered before. Registering `T` again
    /// replaces its previous function.
    pub fn register<T: Extension>(&self, cast: CastFn<C>) -> bool {
        let previous = self.casts.write().insert(TypeId::of::<T>(), cast);

        log::debug!(
            "registered `{}` for the capability `{}`",
            std::any::type_name::<T>(),
            std::any::type_name::<C>()
        );

        previous.is_none()
    }

    /// Checks whether the type `T` has the capability.
    #[must_use]
    pub fn contains<T: Extension>(&self) -> bool {
        self.casts.read().contains_key(&TypeId::of::<T>())
    }

    /// Views the element as `C` if its concrete type is registered.
    #[must_use]
    pub fn cast<'a>(&self, element: &'a dyn Extension) -> Option<&'a C> {
        let cast = self.casts.read().get(&element.as_any().type_id()).copied();

        cast.and_then(|cast| cast(element))
    }

    /// Returns the number of registered types.
    #[must_use]
    pub fn len(&self) -> usize { self.casts.read().len() }

    /// Returns `true` if no type is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.casts.read().is_empty() }
}

impl<C: ?Sized + 'static> Default for CapabilityTable<C> {
    fn default() -> Self { Self::new() }
}

impl<C: ?Sized + 'static> Debug for CapabilityTable<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CapabilityTable")
            .field("capability", &std::any::type_name::<C>())
            .field("registered", &self.len())
            .finish()
    }
}
