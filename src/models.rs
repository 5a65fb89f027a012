// Copyright (c) 2025 Wonbook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Partition tag: income-side and expense-side rows live in separate tables
/// and separate category namespaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
    Income,
    Expense,
}

impl Kind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Income => "income",
            Kind::Expense => "expense",
        }
    }
}

/// Partition-tagged category identifier. Numeric ids can collide across the
/// two category tables, so a bare i64 never identifies a category on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CategoryId {
    Income(i64),
    Expense(i64),
}

impl CategoryId {
    pub fn new(kind: Kind, id: i64) -> Self {
        match kind {
            Kind::Income => CategoryId::Income(id),
            Kind::Expense => CategoryId::Expense(id),
        }
    }

    pub fn kind(&self) -> Kind {
        match self {
            CategoryId::Income(_) => Kind::Income,
            CategoryId::Expense(_) => Kind::Expense,
        }
    }

    pub fn raw(&self) -> i64 {
        match self {
            CategoryId::Income(id) | CategoryId::Expense(id) => *id,
        }
    }
}

/// `color_hex` is only ever Some for expense categories; the income table has
/// no such column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub icon_name: String,
    pub color_hex: Option<String>,
    pub kind: Kind,
}

impl Category {
    pub fn category_id(&self) -> CategoryId {
        CategoryId::new(self.kind, self.id)
    }
}

/// `id == 0` means "not yet persisted"; the store assigns the real id.
/// `date` is epoch milliseconds, the occurrence time of the transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Income {
    pub id: i64,
    pub amount: Decimal,
    pub category_id: Option<i64>,
    pub date: i64,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub amount: Decimal,
    pub category_id: Option<i64>,
    pub date: i64,
    pub description: String,
    pub photo_uri: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Transaction {
    Income(Income),
    Expense(Expense),
}

impl Transaction {
    pub fn kind(&self) -> Kind {
        match self {
            Transaction::Income(_) => Kind::Income,
            Transaction::Expense(_) => Kind::Expense,
        }
    }

    pub fn id(&self) -> i64 {
        match self {
            Transaction::Income(t) => t.id,
            Transaction::Expense(t) => t.id,
        }
    }

    pub fn amount(&self) -> Decimal {
        match self {
            Transaction::Income(t) => t.amount,
            Transaction::Expense(t) => t.amount,
        }
    }

    pub fn date_millis(&self) -> i64 {
        match self {
            Transaction::Income(t) => t.date,
            Transaction::Expense(t) => t.date,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Transaction::Income(t) => &t.description,
            Transaction::Expense(t) => &t.description,
        }
    }

    /// The transaction's category reference, tagged with its own partition.
    pub fn category_ref(&self) -> Option<CategoryId> {
        match self {
            Transaction::Income(t) => t.category_id.map(CategoryId::Income),
            Transaction::Expense(t) => t.category_id.map(CategoryId::Expense),
        }
    }
}

/// Per-day income/expense sums inside one month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyTotal {
    pub income: Decimal,
    pub expense: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: Category,
    pub total: Decimal,
}

/// Derived aggregate for one calendar month. Never persisted; recomputed
/// whenever the selection or the underlying tables change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyStatistics {
    pub year: i32,
    pub month: u32,
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub balance: Decimal,
    /// Restricted to categories that resolve and have at least one
    /// transaction this month. Uncategorized and orphaned references are
    /// counted in the totals but absent here.
    pub by_category: Vec<CategoryTotal>,
    /// Keyed by day-of-month in the local timezone.
    pub daily_totals: BTreeMap<u32, DailyTotal>,
}
