//! One-to-one maps you can read from either end.
//!
//! A [`BijectiveMap<D, C>`] pairs domain elements with codomain elements so
//! that each side determines the other. Lookups are O(1) in both directions.
//! Insertions that would pair an element twice don't silently overwrite: they
//! produce an [`InsertionConflict`] and a policy (a closure, or one of the
//! stock ones in [`bijection::conflict`]) decides whether the old pairs or the
//! new one survive.
//!
//! Maps compose: [`BijectiveMap::inverse`] swaps the sides for free, and
//! `map_domain`/`map_codomain` (plus their `contramap_` duals) rename one side
//! through another bijection, restricted to the elements both know.
//!
//! ```
//! use bijective::{bijection::conflict, BijectiveMap};
//!
//! let mut words = BijectiveMap::try_from([(1, "one"), (2, "two")]).unwrap();
//! assert_eq!(words.domain_for(&"two"), Some(&2));
//!
//! // "two" is taken, so this needs a decision
//! assert!(words.try_insert(3, "two").is_err());
//! let stored = words.insert_with(3, "two", conflict::take_new).unwrap();
//! assert!(stored);
//! assert_eq!(words.codomain_for(&2), None);
//! ```

pub mod bijection;

mod macros;

pub use bijection::{BijectiveMap, InsertionConflict, NotOneToOne, Resolution};
