use thiserror::Error;

use super::conflict::InsertionConflict;

/// Input that cannot be stored without dropping a pair.
///
/// Returned by the strict constructors and inserts; carries the first
/// collision found.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("not one-to-one: {conflict}")]
pub struct NotOneToOne<D, C> {
    conflict: InsertionConflict<D, C>,
}

impl<D, C> NotOneToOne<D, C> {
    pub fn new(conflict: InsertionConflict<D, C>) -> Self {
        NotOneToOne { conflict }
    }

    pub fn conflict(&self) -> &InsertionConflict<D, C> {
        &self.conflict
    }

    pub fn into_conflict(self) -> InsertionConflict<D, C> {
        self.conflict
    }
}
