// Copyright (c) 2025 Wonbook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Category, CategoryId, Expense, Income, Kind, Transaction};
use crate::repository::Repository;
use crate::utils::{
    date_to_millis, fmt_money, maybe_print_json, millis_to_local_date, month_range_millis,
    parse_date, parse_decimal, parse_kind, parse_month, pretty_table,
};
use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::HashMap;

pub fn handle(repo: &Repository, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(repo, sub)?,
        Some(("list", sub)) => list(repo, sub)?,
        Some(("rm", sub)) => rm(repo, sub)?,
        Some(("photos", sub)) => photos(repo, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(repo: &Repository, sub: &clap::ArgMatches) -> Result<()> {
    let kind = parse_kind(sub.get_one::<String>("kind").unwrap())?;
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let description = sub.get_one::<String>("desc").unwrap().to_string();
    let date = date_to_millis(parse_date(sub.get_one::<String>("date").unwrap())?)?;
    let photo_uri = sub.get_one::<String>("photo").map(|s| s.to_string());

    // Category names resolve within the transaction's own partition.
    let category_id = match sub.get_one::<String>("category") {
        Some(name) => Some(
            repo.category_by_name(kind, name)?
                .with_context(|| format!("{} category '{}' not found", kind.as_str(), name))?
                .id,
        ),
        None => None,
    };

    let tx = match kind {
        Kind::Expense => Transaction::Expense(Expense {
            id: 0,
            amount,
            category_id,
            date,
            description,
            photo_uri,
        }),
        Kind::Income => {
            if photo_uri.is_some() {
                return Err(anyhow::anyhow!("--photo only applies to expenses"));
            }
            Transaction::Income(Income {
                id: 0,
                amount,
                category_id,
                date,
                description,
            })
        }
    };
    let id = repo.add_transaction(&tx)?;
    println!(
        "Recorded {} {} '{}' (id {})",
        kind.as_str(),
        fmt_money(&amount),
        tx.description(),
        id
    );
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    pub kind: &'static str,
    pub description: String,
    pub amount: String,
    pub category: String,
    pub photo: String,
}

pub fn query_rows(repo: &Repository, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let txs = if let Some(month) = sub.get_one::<String>("month") {
        let (y, m) = parse_month(month)?;
        let (start, end) = month_range_millis(y, m)?;
        repo.transactions_in_range(start, end)?
    } else {
        repo.all_transactions()?
    };
    let index: HashMap<CategoryId, Category> = repo
        .all_categories()?
        .into_iter()
        .map(|c| (c.category_id(), c))
        .collect();

    let mut rows = Vec::new();
    for tx in &txs {
        // Orphaned references render as uncategorized.
        let category = tx
            .category_ref()
            .and_then(|id| index.get(&id))
            .map(|c| c.name.clone())
            .unwrap_or_default();
        let photo = match tx {
            Transaction::Expense(e) => e.photo_uri.clone().unwrap_or_default(),
            Transaction::Income(_) => String::new(),
        };
        rows.push(TransactionRow {
            id: tx.id(),
            date: millis_to_local_date(tx.date_millis())?.to_string(),
            kind: tx.kind().as_str(),
            description: tx.description().to_string(),
            amount: fmt_money(&tx.amount()),
            category,
            photo,
        });
    }
    if let Some(limit) = sub.get_one::<usize>("limit") {
        rows.truncate(*limit);
    }
    Ok(rows)
}

fn list(repo: &Repository, sub: &clap::ArgMatches) -> Result<()> {
    let data = query_rows(repo, sub)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.kind.to_string(),
                    r.description.clone(),
                    r.amount.clone(),
                    r.category.clone(),
                    r.photo.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Date", "Kind", "Description", "Amount", "Category", "Photo"],
                rows,
            )
        );
    }
    Ok(())
}

fn rm(repo: &Repository, sub: &clap::ArgMatches) -> Result<()> {
    let kind = parse_kind(sub.get_one::<String>("kind").unwrap())?;
    let id = *sub.get_one::<i64>("id").unwrap();
    if repo.delete_transaction(id, kind)? {
        println!("Removed {} {}", kind.as_str(), id);
    } else {
        println!("No {} with id {}", kind.as_str(), id);
    }
    Ok(())
}

fn photos(repo: &Repository, sub: &clap::ArgMatches) -> Result<()> {
    let expenses = repo.transactions_with_photos()?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &expenses)? {
        let rows = expenses
            .iter()
            .map(|e| {
                Ok(vec![
                    millis_to_local_date(e.date)?.to_string(),
                    e.description.clone(),
                    fmt_money(&e.amount),
                    e.photo_uri.clone().unwrap_or_default(),
                ])
            })
            .collect::<Result<Vec<_>>>()?;
        println!(
            "{}",
            pretty_table(&["Date", "Description", "Amount", "Photo"], rows)
        );
    }
    Ok(())
}
