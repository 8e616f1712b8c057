// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! A prefix index behind one reader-writer lock.
//!
//! Loads are rare and bulk; lookups are frequent and short. So the whole index
//! sits behind a single `parking_lot::RwLock`: a load takes the write lock for
//! the duration of the file, lookups share the read lock and run in parallel
//! with each other. Because the merge is commutative and idempotent, lock
//! granularity can't affect the final contents, only how long readers wait.
//!
//! A lookup never observes a half-applied record: the write lock is held across
//! every insertion.

use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard};

use super::{MergeTally, PrefixIndex};
use crate::cost::Cost;
use crate::types::{LookupResult, MergeOutcome, Prefix};

/// Cloneable handle to a lock-protected [`PrefixIndex`].
#[derive(Debug, Clone, Default)]
pub struct SharedIndex {
    inner: Arc<RwLock<PrefixIndex>>,
}

impl SharedIndex {
    pub fn new(index: PrefixIndex) -> Self {
        Self {
            inner: Arc::new(RwLock::new(index)),
        }
    }

    /// Single insertion under the write lock.
    pub fn insert(&self, prefix: &Prefix, cost: Cost) -> MergeOutcome {
        self.inner.write().insert(prefix, cost)
    }

    /// Run a bulk load with the write lock held throughout.
    pub fn load<T>(&self, f: impl FnOnce(&mut PrefixIndex) -> T) -> T {
        let mut guard = self.inner.write();
        f(&mut guard)
    }

    /// Fold a separately built index in.
    pub fn merge(&self, other: &PrefixIndex) -> MergeTally {
        self.inner.write().merge(other)
    }

    pub fn lookup(&self, query: &str) -> Option<Cost> {
        self.inner.read().lookup(query)
    }

    pub fn resolve(&self, number: &str) -> LookupResult {
        self.inner.read().resolve(number)
    }

    /// Shared read access for batch work; loads wait until it is dropped.
    pub fn read(&self) -> RwLockReadGuard<'_, PrefixIndex> {
        self.inner.read()
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Take the index back out if this is the last handle.
    pub fn try_unwrap(self) -> Result<PrefixIndex, SharedIndex> {
        Arc::try_unwrap(self.inner)
            .map(RwLock::into_inner)
            .map_err(|inner| SharedIndex { inner })
    }
}
