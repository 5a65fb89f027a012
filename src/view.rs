// Copyright (c) 2025 Wonbook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! View state for the three monthly views. All selection lives in one
//! serializable struct; everything shown is a pure derivation from it plus
//! the repository, recomputed through a live handle whenever either changes.

use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::live::Live;
use crate::models::{Expense, MonthlyStatistics, Transaction};
use crate::repository::Repository;
use crate::stats::{self, SpendingPlan};
use crate::utils::{day_range_millis, prev_month};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tab {
    Calendar,
    Gallery,
    Statistics,
}

/// The whole UI selection: which month and tab are shown, which day is
/// picked on the calendar, which month the trend view compares against, and
/// the optional monthly spending limit the plan view distributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub year: i32,
    pub month: u32,
    pub tab: Tab,
    pub selected_day: Option<u32>,
    pub compare_year: i32,
    pub compare_month: u32,
    pub monthly_limit: Option<Decimal>,
}

impl Selection {
    pub fn for_month(year: i32, month: u32) -> Self {
        let (cy, cm) = prev_month(year, month);
        Selection {
            year,
            month,
            tab: Tab::Calendar,
            selected_day: None,
            compare_year: cy,
            compare_month: cm,
            monthly_limit: None,
        }
    }
}

pub struct ViewState {
    selection: Selection,
    stats: Live<MonthlyStatistics>,
    photos: Live<Vec<Expense>>,
}

impl ViewState {
    pub fn new(today: NaiveDate) -> Self {
        let selection = Selection::for_month(today.year(), today.month());
        let stats = stats::watch_monthly_statistics(selection.year, selection.month);
        ViewState {
            selection,
            stats,
            photos: Repository::watch_photos(),
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Changing the month swaps the live statistics query and drops the day
    /// selection; the comparison month follows to the new previous month.
    pub fn select_month(&mut self, year: i32, month: u32) {
        self.selection.year = year;
        self.selection.month = month;
        self.selection.selected_day = None;
        let (cy, cm) = prev_month(year, month);
        self.selection.compare_year = cy;
        self.selection.compare_month = cm;
        self.stats = stats::watch_monthly_statistics(year, month);
    }

    pub fn step_month(&mut self, delta: i32) {
        let total = self.selection.year * 12 + self.selection.month as i32 - 1 + delta;
        self.select_month(total.div_euclid(12), (total.rem_euclid(12) + 1) as u32);
    }

    pub fn select_tab(&mut self, tab: Tab) {
        self.selection.tab = tab;
    }

    pub fn select_day(&mut self, day: Option<u32>) {
        self.selection.selected_day = day;
    }

    pub fn select_compare_month(&mut self, year: i32, month: u32) {
        self.selection.compare_year = year;
        self.selection.compare_month = month;
    }

    pub fn set_monthly_limit(&mut self, limit: Option<Decimal>) {
        self.selection.monthly_limit = limit;
    }

    /// Statistics for the selected month, recomputed when the underlying
    /// data changed since the last call.
    pub fn statistics(&self, repo: &Repository) -> Result<MonthlyStatistics> {
        self.stats.get(repo)
    }

    /// Transactions on the selected calendar day, newest first. Empty when
    /// no day is selected.
    pub fn day_transactions(&self, repo: &Repository) -> Result<Vec<Transaction>> {
        let Some(day) = self.selection.selected_day else {
            return Ok(Vec::new());
        };
        let Some(date) = NaiveDate::from_ymd_opt(self.selection.year, self.selection.month, day)
        else {
            return Ok(Vec::new());
        };
        let (start, end) = day_range_millis(date)?;
        repo.transactions_in_range(start, end)
    }

    /// Gallery view: expenses with an attached photo, newest first. Not
    /// month-scoped, so the handle survives month changes.
    pub fn gallery(&self, repo: &Repository) -> Result<Vec<Expense>> {
        self.photos.get(repo)
    }

    /// Cumulative expense series of the selected month and the comparison
    /// month, each clipped to its own day count.
    pub fn trend(
        &self,
        repo: &Repository,
        today: NaiveDate,
    ) -> Result<(Vec<Decimal>, Vec<Decimal>)> {
        let sel = &self.selection;
        let current = stats::cumulative_expense_series(repo, sel.year, sel.month, today)?;
        let compare =
            stats::cumulative_expense_series(repo, sel.compare_year, sel.compare_month, today)?;
        Ok((current, compare))
    }

    /// Per-category spending plan for the selected month. Empty when no
    /// monthly limit is set.
    pub fn plan(&self, repo: &Repository, today: NaiveDate) -> Result<Vec<SpendingPlan>> {
        let Some(limit) = self.selection.monthly_limit else {
            return Ok(Vec::new());
        };
        stats::spending_plan(repo, self.selection.year, self.selection.month, limit, today)
    }
}
