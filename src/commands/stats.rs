// Copyright (c) 2025 Wonbook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::repository::Repository;
use crate::stats;
use crate::utils::{
    fmt_money, maybe_print_json, parse_decimal, parse_month, pretty_table, prev_month,
};
use anyhow::Result;
use rust_decimal::Decimal;

pub fn handle(repo: &Repository, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("month", sub)) => month(repo, sub)?,
        Some(("trend", sub)) => trend(repo, sub)?,
        Some(("plan", sub)) => plan(repo, sub)?,
        _ => {}
    }
    Ok(())
}

fn month(repo: &Repository, sub: &clap::ArgMatches) -> Result<()> {
    let (y, m) = parse_month(sub.get_one::<String>("month").unwrap())?;
    let stats = stats::compute_monthly_statistics(repo, y, m)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &stats)? {
        return Ok(());
    }

    println!(
        "{}",
        pretty_table(
            &["Income", "Expense", "Balance"],
            vec![vec![
                fmt_money(&stats.total_income),
                fmt_money(&stats.total_expense),
                fmt_money(&stats.balance),
            ]],
        )
    );

    let cat_rows = stats
        .by_category
        .iter()
        .map(|ct| {
            vec![
                ct.category.kind.as_str().to_string(),
                ct.category.name.clone(),
                fmt_money(&ct.total),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Kind", "Category", "Total"], cat_rows));

    let day_rows = stats
        .daily_totals
        .iter()
        .map(|(day, t)| {
            vec![
                day.to_string(),
                fmt_money(&t.income),
                fmt_money(&t.expense),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Day", "Income", "Expense"], day_rows));
    Ok(())
}

fn trend(repo: &Repository, sub: &clap::ArgMatches) -> Result<()> {
    let (y, m) = parse_month(sub.get_one::<String>("month").unwrap())?;
    let (cy, cm) = match sub.get_one::<String>("compare") {
        Some(s) => parse_month(s)?,
        None => prev_month(y, m),
    };
    let today = chrono::Local::now().date_naive();
    let current = stats::cumulative_expense_series(repo, y, m, today)?;
    let compare = stats::cumulative_expense_series(repo, cy, cm, today)?;

    let days = current.len().max(compare.len());
    let cell = |s: &[Decimal], i: usize| s.get(i).map(fmt_money).unwrap_or_default();
    let rows = (0..days)
        .map(|i| {
            vec![
                (i + 1).to_string(),
                cell(&current, i),
                cell(&compare, i),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &[
                "Day",
                &format!("{}-{:02}", y, m),
                &format!("{}-{:02}", cy, cm),
            ],
            rows,
        )
    );
    Ok(())
}

fn plan(repo: &Repository, sub: &clap::ArgMatches) -> Result<()> {
    let (y, m) = parse_month(sub.get_one::<String>("month").unwrap())?;
    let limit = parse_decimal(sub.get_one::<String>("limit").unwrap())?;
    let today = chrono::Local::now().date_naive();
    let plan = stats::spending_plan(repo, y, m, limit, today)?;
    let rows = plan
        .iter()
        .map(|p| {
            vec![
                p.category.name.clone(),
                format!("{:.1}%", p.share * Decimal::ONE_HUNDRED),
                fmt_money(&p.per_day),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Category", "Share", "Per day"], rows)
    );
    Ok(())
}
