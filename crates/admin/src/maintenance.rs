//! In-memory record maintenance.
//!
//! A [`Maintenance`] list is what the back-office edits: the working
//! records, a snapshot taken at start-up or at the last "save changes",
//! and a flag telling whether the two may differ. Nothing is persisted;
//! saving only moves the snapshot forward.

use std::fmt;

use thiserror::Error;

/// A record that can be maintained in a [`Maintenance`] list.
pub trait Record: Clone + Send + Sync {
    /// Code that identifies the record within its list.
    type Code: Clone + Eq + fmt::Display + Send + Sync;

    /// The record's code.
    fn code(&self) -> &Self::Code;
}

/// Errors raised by list operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MaintenanceError {
    /// Another record already uses this code.
    #[error("code already exists: {0}")]
    DuplicateCode(String),

    /// No record has this code.
    #[error("no record with code {0}")]
    NotFound(String),
}

/// Working list plus shadow snapshot.
#[derive(Debug, Clone)]
pub struct Maintenance<R: Record> {
    records: Vec<R>,
    snapshot: Vec<R>,
    pending: bool,
}

impl<R: Record> Maintenance<R> {
    /// Start from a seed list; the snapshot equals the seed.
    #[must_use]
    pub fn new(seed: Vec<R>) -> Self {
        Self {
            snapshot: seed.clone(),
            records: seed,
            pending: false,
        }
    }

    /// Working records in insertion order.
    #[must_use]
    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// Records as of the last save.
    #[must_use]
    pub fn snapshot(&self) -> &[R] {
        &self.snapshot
    }

    /// Whether the list was changed since the last save.
    #[must_use]
    pub const fn has_pending_changes(&self) -> bool {
        self.pending
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look a record up by code.
    #[must_use]
    pub fn find(&self, code: &R::Code) -> Option<&R> {
        self.records.iter().find(|r| r.code() == code)
    }

    /// Whether any record uses `code`.
    #[must_use]
    pub fn contains(&self, code: &R::Code) -> bool {
        self.find(code).is_some()
    }

    /// Records matching a predicate, in list order.
    pub fn filter<'a>(
        &'a self,
        mut predicate: impl FnMut(&R) -> bool + 'a,
    ) -> impl Iterator<Item = &'a R> {
        self.records.iter().filter(move |r| predicate(r))
    }

    /// Append a new record.
    ///
    /// # Errors
    ///
    /// Returns `MaintenanceError::DuplicateCode` if the code is taken; the
    /// list is left unchanged.
    pub fn add(&mut self, record: R) -> Result<(), MaintenanceError> {
        if self.contains(record.code()) {
            return Err(MaintenanceError::DuplicateCode(record.code().to_string()));
        }
        tracing::debug!(code = %record.code(), "Record added");
        self.records.push(record);
        self.pending = true;
        Ok(())
    }

    /// Replace the record that has the same code, keeping its position.
    ///
    /// # Errors
    ///
    /// Returns `MaintenanceError::NotFound` if no record has that code.
    pub fn replace(&mut self, record: R) -> Result<(), MaintenanceError> {
        let slot = self
            .records
            .iter_mut()
            .find(|r| r.code() == record.code())
            .ok_or_else(|| MaintenanceError::NotFound(record.code().to_string()))?;
        tracing::debug!(code = %record.code(), "Record updated");
        *slot = record;
        self.pending = true;
        Ok(())
    }

    /// Remove the record with `code` and return it.
    ///
    /// # Errors
    ///
    /// Returns `MaintenanceError::NotFound` if no record has that code.
    pub fn delete(&mut self, code: &R::Code) -> Result<R, MaintenanceError> {
        let index = self
            .records
            .iter()
            .position(|r| r.code() == code)
            .ok_or_else(|| MaintenanceError::NotFound(code.to_string()))?;
        let removed = self.records.remove(index);
        tracing::debug!(code = %code, "Record deleted");
        self.pending = true;
        Ok(removed)
    }

    /// Copy the working records into the snapshot.
    ///
    /// Returns `false` (and does nothing) when there were no pending
    /// changes.
    pub fn save_changes(&mut self) -> bool {
        if !self.pending {
            return false;
        }
        self.snapshot = self.records.clone();
        self.pending = false;
        tracing::info!(records = self.records.len(), "Changes saved");
        true
    }
}
