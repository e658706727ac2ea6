use std::collections::hash_map;

/// Borrowed `(domain, codomain)` pairs, in the forward map's order.
pub struct Iter<'a, D, C> {
    pub(super) inner: hash_map::Iter<'a, D, C>,
}
impl<'a, D, C> Iterator for Iter<'a, D, C> {
    type Item = (&'a D, &'a C);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}
impl<'a, D, C> ExactSizeIterator for Iter<'a, D, C> {}
impl<'a, D, C> Clone for Iter<'a, D, C> {
    fn clone(&self) -> Self {
        Iter {
            inner: self.inner.clone(),
        }
    }
}

/// Owned `(domain, codomain)` pairs.
pub struct IntoIter<D, C> {
    pub(super) inner: hash_map::IntoIter<D, C>,
}
impl<D, C> Iterator for IntoIter<D, C> {
    type Item = (D, C);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}
impl<D, C> ExactSizeIterator for IntoIter<D, C> {}

/// One side of the map: the keys of either the forward or the inverse association.
pub struct Elements<'a, K, V> {
    pub(super) inner: hash_map::Keys<'a, K, V>,
}
impl<'a, K, V> Iterator for Elements<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}
impl<'a, K, V> ExactSizeIterator for Elements<'a, K, V> {}
impl<'a, K, V> Clone for Elements<'a, K, V> {
    fn clone(&self) -> Self {
        Elements {
            inner: self.inner.clone(),
        }
    }
}
