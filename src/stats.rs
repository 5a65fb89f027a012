// Copyright (c) 2025 Wonbook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Monthly aggregation: totals, per-category and per-day sums, cumulative
//! spending series, and the per-day spending recommendation. Everything is
//! re-derived from the repository on demand; nothing here is persisted.

use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};

use crate::live::Live;
use crate::models::{Category, CategoryId, CategoryTotal, DailyTotal, Kind, MonthlyStatistics};
use crate::repository::Repository;
use crate::utils::{day_of_month, days_in_month, month_range_millis, prev_month};

pub fn compute_monthly_statistics(
    repo: &Repository,
    year: i32,
    month: u32,
) -> Result<MonthlyStatistics> {
    let (start, end) = month_range_millis(year, month)?;
    let txs = repo.transactions_in_range(start, end)?;

    let mut total_income = Decimal::ZERO;
    let mut total_expense = Decimal::ZERO;
    let mut sums: HashMap<CategoryId, Decimal> = HashMap::new();
    let mut daily_totals: BTreeMap<u32, DailyTotal> = BTreeMap::new();

    for tx in &txs {
        let amount = tx.amount();
        let day = day_of_month(tx.date_millis())?;
        let daily = daily_totals.entry(day).or_default();
        match tx.kind() {
            Kind::Income => {
                total_income += amount;
                daily.income += amount;
            }
            Kind::Expense => {
                total_expense += amount;
                daily.expense += amount;
            }
        }
        // Uncategorized transactions count toward the totals but have no
        // per-category bucket.
        if let Some(id) = tx.category_ref() {
            *sums.entry(id).or_default() += amount;
        }
    }

    // References that no longer resolve to a category are dropped from the
    // breakdown, still counted above.
    let index: HashMap<CategoryId, Category> = repo
        .all_categories()?
        .into_iter()
        .map(|c| (c.category_id(), c))
        .collect();
    let mut by_category: Vec<CategoryTotal> = sums
        .into_iter()
        .filter_map(|(id, total)| {
            index
                .get(&id)
                .map(|c| CategoryTotal { category: c.clone(), total })
        })
        .collect();
    by_category.sort_by(|a, b| {
        b.total
            .cmp(&a.total)
            .then_with(|| a.category.name.cmp(&b.category.name))
    });

    Ok(MonthlyStatistics {
        year,
        month,
        total_income,
        total_expense,
        balance: total_income - total_expense,
        by_category,
        daily_totals,
    })
}

pub fn watch_monthly_statistics(year: i32, month: u32) -> Live<MonthlyStatistics> {
    Live::new(move |repo| compute_monthly_statistics(repo, year, month))
}

/// Running expense total per day, days 1..=N. N is the number of elapsed
/// days when `(year, month)` is `today`'s month, otherwise the full month.
pub fn cumulative_expense_series(
    repo: &Repository,
    year: i32,
    month: u32,
    today: NaiveDate,
) -> Result<Vec<Decimal>> {
    let n = if year == today.year() && month == today.month() {
        today.day()
    } else {
        days_in_month(year, month)?
    };
    let stats = compute_monthly_statistics(repo, year, month)?;
    let mut running = Decimal::ZERO;
    let mut series = Vec::with_capacity(n as usize);
    for day in 1..=n {
        running += stats
            .daily_totals
            .get(&day)
            .map(|d| d.expense)
            .unwrap_or_default();
        series.push(running);
    }
    Ok(series)
}

/// Per-category spending shares from the base period: the previous month's
/// expense totals when it has any, otherwise the selected month's own.
pub fn category_shares(
    repo: &Repository,
    year: i32,
    month: u32,
) -> Result<Vec<(Category, Decimal)>> {
    let (py, pm) = prev_month(year, month);
    let mut base = expense_totals(repo, py, pm)?;
    if base.is_empty() {
        base = expense_totals(repo, year, month)?;
    }
    let total: Decimal = base.iter().map(|ct| ct.total).sum();
    if total.is_zero() {
        return Ok(Vec::new());
    }
    Ok(base
        .into_iter()
        .map(|ct| (ct.category, ct.total / total))
        .collect())
}

fn expense_totals(repo: &Repository, year: i32, month: u32) -> Result<Vec<CategoryTotal>> {
    let stats = compute_monthly_statistics(repo, year, month)?;
    Ok(stats
        .by_category
        .into_iter()
        .filter(|ct| ct.category.kind == Kind::Expense)
        .collect())
}

pub fn days_left(year: i32, month: u32, today: NaiveDate) -> Result<u32> {
    if year == today.year() && month == today.month() {
        Ok(days_in_month(year, month)?.saturating_sub(today.day()))
    } else {
        Ok(0)
    }
}

/// Recommended spend per day for one category: the raw quota rounded up to
/// the next multiple of 100 (an exact positive multiple still moves up,
/// 3300 -> 3400). Zero once no days remain or nothing is left to distribute.
pub fn recommended_daily(leftover: Decimal, share: Decimal, days_left: u32) -> Decimal {
    if days_left == 0 {
        return Decimal::ZERO;
    }
    let raw = leftover * share / Decimal::from(days_left);
    if raw.is_zero() {
        return Decimal::ZERO;
    }
    (raw / Decimal::ONE_HUNDRED).floor() * Decimal::ONE_HUNDRED + Decimal::ONE_HUNDRED
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct SpendingPlan {
    pub category: Category,
    pub share: Decimal,
    pub per_day: Decimal,
}

/// Distribute the remaining monthly budget across categories by their base
/// period share.
pub fn spending_plan(
    repo: &Repository,
    year: i32,
    month: u32,
    limit: Decimal,
    today: NaiveDate,
) -> Result<Vec<SpendingPlan>> {
    let stats = compute_monthly_statistics(repo, year, month)?;
    let leftover = (limit - stats.total_expense).max(Decimal::ZERO);
    let days = days_left(year, month, today)?;
    let plan = category_shares(repo, year, month)?
        .into_iter()
        .map(|(category, share)| SpendingPlan {
            per_day: recommended_daily(leftover, share, days),
            category,
            share,
        })
        .collect();
    Ok(plan)
}
