// Copyright (c) 2025 Wonbook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::repository::Repository;
use crate::utils::{fmt_money, millis_to_local_date, parse_month, pretty_table};
use crate::view::ViewState;
use anyhow::Result;

pub fn handle(repo: &Repository, m: &clap::ArgMatches) -> Result<()> {
    let (y, mo) = parse_month(m.get_one::<String>("month").unwrap())?;
    let mut view = ViewState::new(chrono::Local::now().date_naive());
    view.select_month(y, mo);

    if let Some(day) = m.get_one::<u32>("day") {
        view.select_day(Some(*day));
        let rows = view
            .day_transactions(repo)?
            .iter()
            .map(|tx| {
                Ok(vec![
                    millis_to_local_date(tx.date_millis())?.to_string(),
                    tx.kind().as_str().to_string(),
                    tx.description().to_string(),
                    fmt_money(&tx.amount()),
                ])
            })
            .collect::<Result<Vec<_>>>()?;
        println!(
            "{}",
            pretty_table(&["Date", "Kind", "Description", "Amount"], rows)
        );
        return Ok(());
    }

    let stats = view.statistics(repo)?;
    let rows = stats
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
    println!("{}", pretty_table(&["Day", "Income", "Expense"], rows));
    Ok(())
}
