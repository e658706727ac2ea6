//! What an insertion collided with, and what to do about it.

use std::{convert::Infallible, fmt::Debug};

use super::error::NotOneToOne;

/// An insertion of `new` that would break the one-to-one invariant.
///
/// Only ever handed to a resolution policy; the map keeps no record of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertionConflict<D, C> {
    /// `new.0` is already bound, as `existing`, to some other codomain value.
    Domain { existing: (D, C), new: (D, C) },
    /// `new.1` is already bound, as `existing`, to some other domain value.
    Codomain { existing: (D, C), new: (D, C) },
    /// Both halves of `new` are taken, by two different pairs.
    Both {
        /// `(new.0, old codomain)`
        existing_for_domain: (D, C),
        /// `(old domain, new.1)`
        existing_for_codomain: (D, C),
        new: (D, C),
    },
}

impl<D, C> InsertionConflict<D, C> {
    /// The candidate pair.
    pub fn new_pair(&self) -> &(D, C) {
        match self {
            InsertionConflict::Domain { new, .. }
            | InsertionConflict::Codomain { new, .. }
            | InsertionConflict::Both { new, .. } => new,
        }
    }

    /// The stored pair whose domain element equals the candidate's, if that collides.
    pub fn existing_for_domain(&self) -> Option<&(D, C)> {
        match self {
            InsertionConflict::Domain { existing, .. } => Some(existing),
            InsertionConflict::Both {
                existing_for_domain,
                ..
            } => Some(existing_for_domain),
            InsertionConflict::Codomain { .. } => None,
        }
    }

    /// The stored pair whose codomain element equals the candidate's, if that collides.
    pub fn existing_for_codomain(&self) -> Option<&(D, C)> {
        match self {
            InsertionConflict::Codomain { existing, .. } => Some(existing),
            InsertionConflict::Both {
                existing_for_codomain,
                ..
            } => Some(existing_for_codomain),
            InsertionConflict::Domain { .. } => None,
        }
    }

    /// Every stored pair that would be displaced by taking the candidate.
    pub fn existing(&self) -> impl Iterator<Item = &(D, C)> {
        self.existing_for_domain()
            .into_iter()
            .chain(self.existing_for_codomain())
    }

    /// Owned version of [`existing`](Self::existing).
    pub fn into_existing(self) -> Vec<(D, C)> {
        match self {
            InsertionConflict::Domain { existing, .. }
            | InsertionConflict::Codomain { existing, .. } => vec![existing],
            InsertionConflict::Both {
                existing_for_domain,
                existing_for_codomain,
                ..
            } => vec![existing_for_domain, existing_for_codomain],
        }
    }

    /// Short name of the conflict shape, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            InsertionConflict::Domain { .. } => "domain",
            InsertionConflict::Codomain { .. } => "codomain",
            InsertionConflict::Both { .. } => "both",
        }
    }
}

impl<D: Debug, C: Debug> std::fmt::Display for InsertionConflict<D, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InsertionConflict::Domain { existing, new } => write!(
                f,
                "domain element {:?} of {:?} is already bound in {:?}",
                new.0, new, existing
            ),
            InsertionConflict::Codomain { existing, new } => write!(
                f,
                "codomain element {:?} of {:?} is already bound in {:?}",
                new.1, new, existing
            ),
            InsertionConflict::Both {
                existing_for_domain,
                existing_for_codomain,
                new,
            } => write!(
                f,
                "{:?} collides with both {:?} and {:?}",
                new, existing_for_domain, existing_for_codomain
            ),
        }
    }
}

/// The outcome a policy picks for a conflict.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Resolution {
    /// Leave the map untouched and drop the candidate.
    KeepExisting,
    /// Evict every colliding pair and store the candidate.
    TakeNew,
}

/// Policy: existing pairs always win.
pub fn keep_existing<D, C>(_: InsertionConflict<D, C>) -> Result<Resolution, Infallible> {
    Ok(Resolution::KeepExisting)
}

/// Policy: the candidate always wins.
pub fn take_new<D, C>(_: InsertionConflict<D, C>) -> Result<Resolution, Infallible> {
    Ok(Resolution::TakeNew)
}

/// Policy: any conflict is an error.
pub fn reject<D, C>(conflict: InsertionConflict<D, C>) -> Result<Resolution, NotOneToOne<D, C>> {
    Err(NotOneToOne::new(conflict))
}

pub(crate) fn into_ok<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_by_shape() {
        let domain = InsertionConflict::Domain {
            existing: (1, "one"),
            new: (1, "ONE"),
        };
        assert_eq!(domain.existing_for_domain(), Some(&(1, "one")));
        assert_eq!(domain.existing_for_codomain(), None);
        assert_eq!(domain.new_pair(), &(1, "ONE"));
        assert_eq!(domain.kind(), "domain");

        let both = InsertionConflict::Both {
            existing_for_domain: (1, "one"),
            existing_for_codomain: (2, "two"),
            new: (1, "two"),
        };
        assert_eq!(
            both.existing().collect::<Vec<_>>(),
            vec![&(1, "one"), &(2, "two")]
        );
        assert_eq!(both.into_existing(), vec![(1, "one"), (2, "two")]);
        assert_eq!(domain.into_existing(), vec![(1, "one")]);
    }

    #[test]
    fn display_names_elements() {
        let conflict = InsertionConflict::Codomain {
            existing: (2, 'a'),
            new: (1, 'a'),
        };
        assert_eq!(
            conflict.to_string(),
            "codomain element 'a' of (1, 'a') is already bound in (2, 'a')"
        );
    }

    #[test]
    fn stock_policies() {
        let conflict = || InsertionConflict::Domain {
            existing: (1, 1),
            new: (1, 2),
        };
        assert_eq!(into_ok(keep_existing(conflict())), Resolution::KeepExisting);
        assert_eq!(into_ok(take_new(conflict())), Resolution::TakeNew);
        assert_eq!(
            reject(conflict()).unwrap_err().into_conflict(),
            conflict()
        );
    }
}
