// Copyright (c) 2025 Wonbook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Unified transaction access over the two partitions. Merged reads re-sort
//! the full set on every evaluation; writes dispatch on the variant and bump
//! the revision that live queries watch.

use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;
use std::cell::Cell;

use crate::error::ValidationError;
use crate::live::Live;
use crate::models::{Category, CategoryId, Expense, Kind, Transaction};
use crate::store;

pub struct Repository {
    conn: Connection,
    rev: Cell<u64>,
}

impl Repository {
    pub fn new(conn: Connection) -> Self {
        Repository {
            conn,
            rev: Cell::new(0),
        }
    }

    pub fn revision(&self) -> u64 {
        self.rev.get()
    }

    fn bump(&self) {
        self.rev.set(self.rev.get() + 1);
    }

    // --- transactions ---

    /// Both partitions merged, sorted by date descending. Ties keep the
    /// merge order of this evaluation (expenses before incomes), stably.
    pub fn all_transactions(&self) -> Result<Vec<Transaction>> {
        let mut txs: Vec<Transaction> = store::expenses_all(&self.conn)?
            .into_iter()
            .map(Transaction::Expense)
            .collect();
        txs.extend(
            store::incomes_all(&self.conn)?
                .into_iter()
                .map(Transaction::Income),
        );
        txs.sort_by(|a, b| b.date_millis().cmp(&a.date_millis()));
        Ok(txs)
    }

    /// Inclusive bounds in epoch milliseconds; callers compute month edges.
    pub fn transactions_in_range(&self, start: i64, end: i64) -> Result<Vec<Transaction>> {
        let mut txs: Vec<Transaction> = store::expenses_in_range(&self.conn, start, end)?
            .into_iter()
            .map(Transaction::Expense)
            .collect();
        txs.extend(
            store::incomes_in_range(&self.conn, start, end)?
                .into_iter()
                .map(Transaction::Income),
        );
        txs.sort_by(|a, b| b.date_millis().cmp(&a.date_millis()));
        Ok(txs)
    }

    pub fn transactions_by_category(&self, id: CategoryId) -> Result<Vec<Transaction>> {
        let txs = match id {
            CategoryId::Expense(raw) => store::expenses_by_category(&self.conn, raw)?
                .into_iter()
                .map(Transaction::Expense)
                .collect(),
            CategoryId::Income(raw) => store::incomes_by_category(&self.conn, raw)?
                .into_iter()
                .map(Transaction::Income)
                .collect(),
        };
        Ok(txs)
    }

    pub fn transactions_with_photos(&self) -> Result<Vec<Expense>> {
        store::expenses_with_photos(&self.conn)
    }

    /// The validated add pathway: rejects non-positive amounts and blank
    /// descriptions before anything reaches the store. Returns the new id.
    pub fn add_transaction(&self, tx: &Transaction) -> Result<i64> {
        if tx.amount() <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount.into());
        }
        if tx.description().trim().is_empty() {
            return Err(ValidationError::BlankDescription.into());
        }
        let id = match tx {
            Transaction::Expense(e) => store::insert_expense(&self.conn, e)?,
            Transaction::Income(i) => store::insert_income(&self.conn, i)?,
        };
        self.bump();
        Ok(id)
    }

    pub fn update_transaction(&self, tx: &Transaction) -> Result<()> {
        if tx.id() == 0 {
            return Err(ValidationError::MissingId.into());
        }
        match tx {
            Transaction::Expense(e) => store::update_expense(&self.conn, e)?,
            Transaction::Income(i) => store::update_income(&self.conn, i)?,
        };
        self.bump();
        Ok(())
    }

    /// The id alone does not name a partition; the caller passes the side it
    /// belongs to. Returns whether a row was actually removed.
    pub fn delete_transaction(&self, id: i64, kind: Kind) -> Result<bool> {
        let n = match kind {
            Kind::Expense => store::delete_expense(&self.conn, id)?,
            Kind::Income => store::delete_income(&self.conn, id)?,
        };
        if n > 0 {
            self.bump();
        }
        Ok(n > 0)
    }

    // --- categories ---

    /// Merge of both partitions. Numeric ids may collide across the two
    /// sides; entries stay distinguishable through their `Kind`.
    pub fn all_categories(&self) -> Result<Vec<Category>> {
        let mut cats = store::categories(&self.conn, Kind::Expense)?;
        cats.extend(store::categories(&self.conn, Kind::Income)?);
        Ok(cats)
    }

    pub fn categories(&self, kind: Kind) -> Result<Vec<Category>> {
        store::categories(&self.conn, kind)
    }

    pub fn category(&self, id: CategoryId) -> Result<Option<Category>> {
        store::category_by_id(&self.conn, id)
    }

    pub fn category_by_name(&self, kind: Kind, name: &str) -> Result<Option<Category>> {
        store::category_by_name(&self.conn, kind, name)
    }

    pub fn is_category_name_exists(&self, name: &str, kind: Kind) -> Result<bool> {
        Ok(store::category_by_name(&self.conn, kind, name)?.is_some())
    }

    /// `None` signals a name conflict within the partition. The check and
    /// the insert are not one atomic step, which is acceptable with a single
    /// writer.
    pub fn add_category(
        &self,
        kind: Kind,
        name: &str,
        icon_name: &str,
        color_hex: Option<&str>,
    ) -> Result<Option<CategoryId>> {
        let name = name.trim();
        if self.is_category_name_exists(name, kind)? {
            return Ok(None);
        }
        let id = store::insert_category(&self.conn, kind, name, icon_name, color_hex)?;
        self.bump();
        Ok(Some(CategoryId::new(kind, id)))
    }

    /// `false` when nothing changed: either the rename collides with an
    /// existing name in the same partition, or the id resolves to no row.
    pub fn update_category(&self, cat: &Category) -> Result<bool> {
        let mut cat = cat.clone();
        cat.name = cat.name.trim().to_string();
        let Some(current) = store::category_by_id(&self.conn, cat.category_id())? else {
            return Ok(false);
        };
        if current.name != cat.name && self.is_category_name_exists(&cat.name, cat.kind)? {
            return Ok(false);
        }
        let n = store::update_category(&self.conn, &cat)?;
        if n > 0 {
            self.bump();
        }
        Ok(n > 0)
    }

    /// Partition-tagged delete: no probing of the other table, and "already
    /// absent" is an ordinary `false`, never an error. Dependent transactions
    /// keep their rows; the store clears their category reference.
    pub fn delete_category(&self, id: CategoryId) -> Result<bool> {
        let n = store::delete_category(&self.conn, id)?;
        if n > 0 {
            self.bump();
        }
        Ok(n > 0)
    }

    // --- live handles ---

    pub fn watch_all_transactions() -> Live<Vec<Transaction>> {
        Live::new(|repo| repo.all_transactions())
    }

    pub fn watch_range(start: i64, end: i64) -> Live<Vec<Transaction>> {
        Live::new(move |repo| repo.transactions_in_range(start, end))
    }

    pub fn watch_photos() -> Live<Vec<Expense>> {
        Live::new(|repo| repo.transactions_with_photos())
    }
}
