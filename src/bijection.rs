//! Two-way hash tables with one-to-one pairs.
//!
//! [`BijectiveMap`] keeps a forward (`D -> C`) and an inverse (`C -> D`)
//! association in lockstep. Inserting a pair that would bind an element twice
//! is an [`InsertionConflict`], and the caller decides the outcome through a
//! policy closure returning a [`Resolution`] (or an error).

use std::{
    collections::HashMap as StdHashMap,
    fmt::{self, Debug, Display},
    hash::{Hash, Hasher},
};

use ahash::HashMap;
use itertools::Itertools;

pub mod conflict;
pub mod error;
pub mod iter;
#[cfg(feature = "serde")]
mod serde_impl;

use conflict::into_ok;
pub use conflict::{InsertionConflict, Resolution};
pub use error::NotOneToOne;
use iter::{Elements, IntoIter, Iter};

/// A bidirectional hash table in which every domain element is paired with
/// exactly one codomain element and vice versa.
#[derive(Clone)]
pub struct BijectiveMap<D: Eq + Hash + Clone, C: Eq + Hash + Clone> {
    forward: HashMap<D, C>,
    inverse: HashMap<C, D>,
}

impl<D: Eq + Hash + Clone, C: Eq + Hash + Clone> Default for BijectiveMap<D, C> {
    fn default() -> Self {
        BijectiveMap {
            forward: HashMap::default(),
            inverse: HashMap::default(),
        }
    }
}

impl<D: Eq + Hash + Clone, C: Eq + Hash + Clone> BijectiveMap<D, C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        BijectiveMap {
            forward: HashMap::with_capacity_and_hasher(capacity, Default::default()),
            inverse: HashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Builds a bijection out of an association that may repeat codomain values.
    ///
    /// Whenever two domain elements share a codomain value, `pick(existing, new)`
    /// decides which one keeps it; the other is dropped.
    pub fn from_map_with<S>(
        map: StdHashMap<D, C, S>,
        mut pick: impl FnMut(&D, &D) -> Resolution,
    ) -> Self {
        let mut result = Self::with_capacity(map.len());
        for (domain, codomain) in map {
            into_ok(result.insert_with(domain, codomain, |conflict| {
                Ok(match conflict.existing_for_codomain() {
                    Some((existing, _)) => pick(existing, &conflict.new_pair().0),
                    // keys of a map are already unique
                    None => Resolution::TakeNew,
                })
            }));
        }
        result
    }

    /// Fails unless no codomain value appears twice in `map`.
    pub fn try_from_map<S>(map: StdHashMap<D, C, S>) -> Result<Self, NotOneToOne<D, C>> {
        Self::try_from_pairs(map)
    }

    /// Inserts `pairs` in order, consulting `resolve` on every conflict.
    ///
    /// The first error returned by `resolve` aborts construction.
    pub fn from_pairs_with<E>(
        pairs: impl IntoIterator<Item = (D, C)>,
        resolve: impl FnMut(InsertionConflict<D, C>) -> Result<Resolution, E>,
    ) -> Result<Self, E> {
        let pairs = pairs.into_iter();
        let mut result = Self::with_capacity(pairs.size_hint().0);
        result.merge_with(pairs, resolve)?;
        Ok(result)
    }

    pub fn try_from_pairs(
        pairs: impl IntoIterator<Item = (D, C)>,
    ) -> Result<Self, NotOneToOne<D, C>> {
        Self::from_pairs_with(pairs, conflict::reject).map_err(|err| {
            tracing::debug!(
                kind = err.conflict().kind(),
                "rejected input that is not one-to-one"
            );
            err
        })
    }

    /// Pairs every element of `domain` with its image under `f`.
    pub fn from_domain_with<E>(
        domain: impl IntoIterator<Item = D>,
        mut f: impl FnMut(&D) -> C,
        resolve: impl FnMut(InsertionConflict<D, C>) -> Result<Resolution, E>,
    ) -> Result<Self, E> {
        Self::from_pairs_with(
            domain.into_iter().map(|domain| {
                let codomain = f(&domain);
                (domain, codomain)
            }),
            resolve,
        )
    }

    /// Fails if `f` is not injective on `domain`.
    pub fn try_from_domain(
        domain: impl IntoIterator<Item = D>,
        mut f: impl FnMut(&D) -> C,
    ) -> Result<Self, NotOneToOne<D, C>> {
        Self::try_from_pairs(domain.into_iter().map(|domain| {
            let codomain = f(&domain);
            (domain, codomain)
        }))
    }

    /// Construction for tables written out in source, see [`bijection!`](crate::bijection!).
    ///
    /// # Panics
    /// If two pairs share an element.
    #[track_caller]
    pub fn from_literal(pairs: impl IntoIterator<Item = (D, C)>) -> Self {
        match Self::try_from_pairs(pairs) {
            Ok(result) => result,
            Err(err) => panic!(
                "bijection literal is not one-to-one ({} collision)",
                err.conflict().kind()
            ),
        }
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.forward.capacity().min(self.inverse.capacity())
    }

    pub fn reserve(&mut self, additional: usize) {
        self.forward.reserve(additional);
        self.inverse.reserve(additional);
    }

    pub fn shrink_to_fit(&mut self) {
        self.forward.shrink_to_fit();
        self.inverse.shrink_to_fit();
    }

    pub fn codomain_for(&self, domain: &D) -> Option<&C> {
        self.forward.get(domain)
    }

    pub fn domain_for(&self, codomain: &C) -> Option<&D> {
        self.inverse.get(codomain)
    }

    /// True only if `domain` is paired with exactly `codomain`.
    pub fn contains(&self, domain: &D, codomain: &C) -> bool {
        self.forward.get(domain) == Some(codomain)
    }

    pub fn contains_domain(&self, domain: &D) -> bool {
        self.forward.contains_key(domain)
    }

    pub fn contains_codomain(&self, codomain: &C) -> bool {
        self.inverse.contains_key(codomain)
    }

    pub fn domain(&self) -> Elements<'_, D, C> {
        Elements {
            inner: self.forward.keys(),
        }
    }

    pub fn codomain(&self) -> Elements<'_, C, D> {
        Elements {
            inner: self.inverse.keys(),
        }
    }

    pub fn iter(&self) -> Iter<'_, D, C> {
        Iter {
            inner: self.forward.iter(),
        }
    }

    pub fn as_forward(&self) -> &HashMap<D, C> {
        &self.forward
    }

    pub fn as_inverse(&self) -> &HashMap<C, D> {
        &self.inverse
    }

    pub fn into_forward(self) -> HashMap<D, C> {
        self.forward
    }

    /// Stores `(domain, codomain)` unless it collides with existing pairs, in
    /// which case `resolve` is asked what to do.
    ///
    /// Returns whether the pair is stored afterwards. Re-inserting a stored pair
    /// succeeds without consulting `resolve`. An error from `resolve` leaves the
    /// map untouched.
    pub fn insert_with<E>(
        &mut self,
        domain: D,
        codomain: C,
        resolve: impl FnOnce(InsertionConflict<D, C>) -> Result<Resolution, E>,
    ) -> Result<bool, E> {
        let conflict = match (self.inverse.get(&codomain), self.forward.get(&domain)) {
            (None, None) => None,
            (Some(existing_domain), Some(_)) if *existing_domain == domain => return Ok(true),
            (Some(existing_domain), None) => Some(InsertionConflict::Codomain {
                existing: (existing_domain.clone(), codomain.clone()),
                new: (domain.clone(), codomain.clone()),
            }),
            (None, Some(existing_codomain)) => Some(InsertionConflict::Domain {
                existing: (domain.clone(), existing_codomain.clone()),
                new: (domain.clone(), codomain.clone()),
            }),
            (Some(existing_domain), Some(existing_codomain)) => Some(InsertionConflict::Both {
                existing_for_domain: (domain.clone(), existing_codomain.clone()),
                existing_for_codomain: (existing_domain.clone(), codomain.clone()),
                new: (domain.clone(), codomain.clone()),
            }),
        };

        if let Some(conflict) = conflict {
            let kind = conflict.kind();
            let resolution = resolve(conflict)?;
            tracing::trace!(kind, ?resolution, "resolved insertion conflict");
            match resolution {
                Resolution::KeepExisting => return Ok(false),
                Resolution::TakeNew => {
                    self.remove_by_domain(&domain);
                    self.remove_by_codomain(&codomain);
                }
            }
        }

        self.link(domain, codomain);
        Ok(true)
    }

    /// Stores the pair or reports why it can't be stored.
    pub fn try_insert(&mut self, domain: D, codomain: C) -> Result<(), NotOneToOne<D, C>> {
        self.insert_with(domain, codomain, conflict::reject).map(|_| ())
    }

    /// Stores the pair, evicting whatever collides with it.
    ///
    /// Returns the overridden conflict, whose [`existing`](InsertionConflict::existing)
    /// pairs are no longer in the map.
    pub fn insert(&mut self, domain: D, codomain: C) -> Option<InsertionConflict<D, C>> {
        let mut overridden = None;
        into_ok(self.insert_with(domain, codomain, |conflict| {
            overridden = Some(conflict);
            Ok(Resolution::TakeNew)
        }));
        overridden
    }

    /// `Some` stores the pair like [`insert`](Self::insert), `None` unpairs `domain`.
    ///
    /// Returns the pairs that are gone afterwards.
    pub fn set_by_domain(&mut self, domain: D, codomain: Option<C>) -> Vec<(D, C)> {
        match codomain {
            Some(codomain) => self
                .insert(domain, codomain)
                .map(InsertionConflict::into_existing)
                .unwrap_or_default(),
            None => self.remove_by_domain(&domain).into_iter().collect(),
        }
    }

    /// `Some` stores the pair like [`insert`](Self::insert), `None` unpairs `codomain`.
    ///
    /// Returns the pairs that are gone afterwards.
    pub fn set_by_codomain(&mut self, codomain: C, domain: Option<D>) -> Vec<(D, C)> {
        match domain {
            Some(domain) => self
                .insert(domain, codomain)
                .map(InsertionConflict::into_existing)
                .unwrap_or_default(),
            None => self.remove_by_codomain(&codomain).into_iter().collect(),
        }
    }

    /// Inserts `pairs` one by one through [`insert_with`](Self::insert_with).
    ///
    /// Stops at the first error from `resolve`; pairs inserted before it stay.
    pub fn merge_with<E>(
        &mut self,
        pairs: impl IntoIterator<Item = (D, C)>,
        mut resolve: impl FnMut(InsertionConflict<D, C>) -> Result<Resolution, E>,
    ) -> Result<(), E> {
        for (domain, codomain) in pairs {
            self.insert_with(domain, codomain, &mut resolve)?;
        }
        Ok(())
    }

    pub fn try_merge(
        &mut self,
        pairs: impl IntoIterator<Item = (D, C)>,
    ) -> Result<(), NotOneToOne<D, C>> {
        self.merge_with(pairs, conflict::reject)
    }

    pub fn remove_by_domain(&mut self, domain: &D) -> Option<(D, C)> {
        let codomain = self.forward.remove(domain)?;
        let domain = self.inverse.remove(&codomain);
        debug_assert!(domain.is_some(), "inverse lost track of a pair");
        domain.map(|domain| (domain, codomain))
    }

    pub fn remove_by_codomain(&mut self, codomain: &C) -> Option<(D, C)> {
        let domain = self.inverse.remove(codomain)?;
        let codomain = self.forward.remove(&domain);
        debug_assert!(codomain.is_some(), "forward lost track of a pair");
        codomain.map(|codomain| (domain, codomain))
    }

    /// Keeps only the pairs `keep` accepts.
    pub fn retain(&mut self, mut keep: impl FnMut(&D, &C) -> bool) {
        let BijectiveMap { forward, inverse } = self;
        forward.retain(|domain, codomain| {
            let kept = keep(domain, &*codomain);
            if !kept {
                inverse.remove(&*codomain);
            }
            kept
        });
    }

    /// Removes every pair `matches` accepts, returning how many went.
    pub fn remove_all_matching(&mut self, mut matches: impl FnMut(&D, &C) -> bool) -> usize {
        let before = self.len();
        self.retain(|domain, codomain| !matches(domain, codomain));
        before - self.len()
    }

    pub fn clear(&mut self) {
        self.forward.clear();
        self.inverse.clear();
    }

    /// A copy holding only the pairs `keep` accepts.
    pub fn filter(&self, mut keep: impl FnMut(&D, &C) -> bool) -> Self {
        let mut result = Self::default();
        for (domain, codomain) in self.iter() {
            if keep(domain, codomain) {
                result.link(domain.clone(), codomain.clone());
            }
        }
        result
    }

    /// Swaps the two sides. O(1).
    pub fn inverse(self) -> BijectiveMap<C, D> {
        BijectiveMap {
            forward: self.inverse,
            inverse: self.forward,
        }
    }

    /// Renames the domain through `over`: `d -> c` becomes `over[d] -> c`.
    ///
    /// Pairs whose domain element `over` doesn't know are dropped.
    pub fn map_domain<D2: Eq + Hash + Clone>(
        &self,
        over: &BijectiveMap<D, D2>,
    ) -> BijectiveMap<D2, C> {
        self.compose(|domain, codomain| {
            Some((over.codomain_for(domain)?.clone(), codomain.clone()))
        })
    }

    /// Like [`map_domain`](Self::map_domain) with `over` read backwards.
    pub fn contramap_domain<D2: Eq + Hash + Clone>(
        &self,
        over: &BijectiveMap<D2, D>,
    ) -> BijectiveMap<D2, C> {
        self.compose(|domain, codomain| Some((over.domain_for(domain)?.clone(), codomain.clone())))
    }

    /// Renames the codomain through `over`: `d -> c` becomes `d -> over[c]`.
    ///
    /// Pairs whose codomain element `over` doesn't know are dropped.
    pub fn map_codomain<C2: Eq + Hash + Clone>(
        &self,
        over: &BijectiveMap<C, C2>,
    ) -> BijectiveMap<D, C2> {
        self.compose(|domain, codomain| {
            Some((domain.clone(), over.codomain_for(codomain)?.clone()))
        })
    }

    /// Like [`map_codomain`](Self::map_codomain) with `over` read backwards.
    pub fn contramap_codomain<C2: Eq + Hash + Clone>(
        &self,
        over: &BijectiveMap<C2, C>,
    ) -> BijectiveMap<D, C2> {
        self.compose(|domain, codomain| Some((domain.clone(), over.domain_for(codomain)?.clone())))
    }

    fn compose<D2: Eq + Hash + Clone, C2: Eq + Hash + Clone>(
        &self,
        mut pair: impl FnMut(&D, &C) -> Option<(D2, C2)>,
    ) -> BijectiveMap<D2, C2> {
        let pairs = self
            .iter()
            .filter_map(|(domain, codomain)| pair(domain, codomain));
        match BijectiveMap::try_from_pairs(pairs) {
            Ok(result) => {
                if result.len() < self.len() {
                    tracing::debug!(
                        dropped = self.len() - result.len(),
                        "composition restricted to the common domain"
                    );
                }
                result
            }
            // both sides are bijections, so this means one of them is corrupt
            Err(err) => panic!(
                "composing bijections produced a {} collision",
                err.conflict().kind()
            ),
        }
    }

    /// Pairs without checking either side; callers guarantee both are fresh.
    fn link(&mut self, domain: D, codomain: C) {
        self.forward.insert(domain.clone(), codomain.clone());
        self.inverse.insert(codomain, domain);
    }
}

impl<D: Eq + Hash + Clone, C: Eq + Hash + Clone> PartialEq for BijectiveMap<D, C> {
    fn eq(&self, other: &Self) -> bool {
        self.forward == other.forward
    }
}
impl<D: Eq + Hash + Clone, C: Eq + Hash + Clone> Eq for BijectiveMap<D, C> {}

impl<D: Eq + Hash + Clone, C: Eq + Hash + Clone> Hash for BijectiveMap<D, C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // pair hashes are summed so iteration order doesn't matter;
        // the seeds are fixed so equal maps agree
        let pair_hasher = ahash::RandomState::with_seeds(
            0x243f_6a88_85a3_08d3,
            0x1319_8a2e_0370_7344,
            0xa409_3822_299f_31d0,
            0x082e_fa98_ec4e_6c89,
        );
        let sum = self
            .forward
            .iter()
            .map(|pair| pair_hasher.hash_one(pair))
            .fold(0u64, u64::wrapping_add);
        state.write_usize(self.len());
        state.write_u64(sum);
    }
}

impl<D, C> Debug for BijectiveMap<D, C>
where
    D: Eq + Hash + Clone + Debug,
    C: Eq + Hash + Clone + Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.forward.iter()).finish()
    }
}

impl<D, C> Display for BijectiveMap<D, C>
where
    D: Eq + Hash + Clone + Display,
    C: Eq + Hash + Clone + Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{{}}}",
            self.iter()
                .map(|(domain, codomain)| format!("{} <-> {}", domain, codomain))
                .join(", ")
        )
    }
}

impl<'a, D: Eq + Hash + Clone, C: Eq + Hash + Clone> IntoIterator for &'a BijectiveMap<D, C> {
    type Item = (&'a D, &'a C);

    type IntoIter = Iter<'a, D, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<D: Eq + Hash + Clone, C: Eq + Hash + Clone> IntoIterator for BijectiveMap<D, C> {
    type Item = (D, C);

    type IntoIter = IntoIter<D, C>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.forward.into_iter(),
        }
    }
}

/// Overwrites, like [`BijectiveMap::insert`].
impl<D: Eq + Hash + Clone, C: Eq + Hash + Clone> Extend<(D, C)> for BijectiveMap<D, C> {
    fn extend<I: IntoIterator<Item = (D, C)>>(&mut self, pairs: I) {
        for (domain, codomain) in pairs {
            self.insert(domain, codomain);
        }
    }
}

impl<D, C, S> TryFrom<StdHashMap<D, C, S>> for BijectiveMap<D, C>
where
    D: Eq + Hash + Clone,
    C: Eq + Hash + Clone,
{
    type Error = NotOneToOne<D, C>;

    fn try_from(map: StdHashMap<D, C, S>) -> Result<Self, Self::Error> {
        Self::try_from_map(map)
    }
}

impl<D: Eq + Hash + Clone, C: Eq + Hash + Clone> TryFrom<Vec<(D, C)>> for BijectiveMap<D, C> {
    type Error = NotOneToOne<D, C>;

    fn try_from(pairs: Vec<(D, C)>) -> Result<Self, Self::Error> {
        Self::try_from_pairs(pairs)
    }
}

impl<D: Eq + Hash + Clone, C: Eq + Hash + Clone, const N: usize> TryFrom<[(D, C); N]>
    for BijectiveMap<D, C>
{
    type Error = NotOneToOne<D, C>;

    fn try_from(pairs: [(D, C); N]) -> Result<Self, Self::Error> {
        Self::try_from_pairs(pairs)
    }
}
