// Copyright (c) 2025 Wonbook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::{Datelike, Local, NaiveDate, NaiveTime, TimeZone};
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rust_decimal::Decimal;

use crate::models::Kind;

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_month(s: &str) -> Result<(i32, u32)> {
    let d = NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}', expected YYYY-MM", s))?;
    Ok((d.year(), d.month()))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

pub fn parse_kind(s: &str) -> Result<Kind> {
    match s {
        "income" => Ok(Kind::Income),
        "expense" => Ok(Kind::Expense),
        other => Err(anyhow::anyhow!(
            "Invalid kind '{}', expected 'income' or 'expense'",
            other
        )),
    }
}

/// Epoch milliseconds of local midnight on `date`.
pub fn date_to_millis(date: NaiveDate) -> Result<i64> {
    let dt = Local
        .from_local_datetime(&date.and_time(NaiveTime::MIN))
        .earliest()
        .with_context(|| format!("Nonexistent local time at midnight of {}", date))?;
    Ok(dt.timestamp_millis())
}

pub fn millis_to_local_date(millis: i64) -> Result<NaiveDate> {
    let dt = Local
        .timestamp_millis_opt(millis)
        .single()
        .with_context(|| format!("Timestamp {} out of range", millis))?;
    Ok(dt.date_naive())
}

/// Day-of-month of an epoch-millisecond instant in the local timezone.
pub fn day_of_month(millis: i64) -> Result<u32> {
    Ok(millis_to_local_date(millis)?.day())
}

pub fn days_in_month(year: i32, month: u32) -> Result<u32> {
    let last = match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if NaiveDate::from_ymd_opt(year, 2, 29).is_some() {
                29
            } else {
                28
            }
        }
        _ => return Err(anyhow::anyhow!("Invalid month number {}", month)),
    };
    Ok(last)
}

pub fn prev_month(year: i32, month: u32) -> (i32, u32) {
    if month == 1 { (year - 1, 12) } else { (year, month - 1) }
}

/// Inclusive epoch-ms bounds of one calendar month in the local timezone:
/// first millisecond of day 1 through the last millisecond before the next
/// month starts.
pub fn month_range_millis(year: i32, month: u32) -> Result<(i64, i64)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .with_context(|| format!("Invalid month {}-{:02}", year, month))?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .with_context(|| format!("Invalid month {}-{:02}", year, month))?;
    Ok((date_to_millis(first)?, date_to_millis(next)? - 1))
}

/// Inclusive epoch-ms bounds of one local calendar day.
pub fn day_range_millis(date: NaiveDate) -> Result<(i64, i64)> {
    let next = date
        .succ_opt()
        .with_context(|| format!("Date {} out of range", date))?;
    Ok((date_to_millis(date)?, date_to_millis(next)? - 1))
}

pub fn fmt_money(d: &Decimal) -> String {
    format!("{}", d.round_dp(2).normalize())
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
