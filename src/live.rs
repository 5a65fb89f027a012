// Copyright (c) 2025 Wonbook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Live query handles. Every repository write bumps a revision counter; a
//! `Live<T>` recomputes its full result whenever the revision it last saw is
//! stale. The cache is memoization only — the observable contract is full
//! recomputation on any relevant change, never incremental patching.
//! Dropping the handle is subscription teardown.

use anyhow::Result;
use std::cell::RefCell;

use crate::repository::Repository;

pub struct Live<T> {
    compute: Box<dyn Fn(&Repository) -> Result<T>>,
    cache: RefCell<Option<(u64, T)>>,
}

impl<T: Clone> Live<T> {
    pub fn new(compute: impl Fn(&Repository) -> Result<T> + 'static) -> Self {
        Live {
            compute: Box::new(compute),
            cache: RefCell::new(None),
        }
    }

    /// Latest value as of the repository's current revision.
    pub fn get(&self, repo: &Repository) -> Result<T> {
        let rev = repo.revision();
        if let Some((seen, value)) = &*self.cache.borrow() {
            if *seen == rev {
                return Ok(value.clone());
            }
        }
        let value = (self.compute)(repo)?;
        *self.cache.borrow_mut() = Some((rev, value.clone()));
        Ok(value)
    }
}
