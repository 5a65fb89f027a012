// Copyright (c) 2025 Wonbook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Row-level access to the four tables, one partition at a time. The
//! repository merges the two sides; nothing here crosses a partition.

use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension, Row, params};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::models::{Category, CategoryId, Expense, Income, Kind};

fn amount_to_f64(d: Decimal) -> Result<f64> {
    d.to_f64()
        .with_context(|| format!("Amount '{}' not representable as REAL", d))
}

fn amount_from_f64(f: f64) -> Result<Decimal> {
    Decimal::try_from(f).with_context(|| format!("Invalid amount '{}' in store", f))
}

fn category_table(kind: Kind) -> &'static str {
    match kind {
        Kind::Income => "income_categories",
        Kind::Expense => "expense_categories",
    }
}

// --- expenses ---

pub fn insert_expense(conn: &Connection, e: &Expense) -> Result<i64> {
    conn.execute(
        "INSERT INTO expenses(productName, amount, categoryId, date, photoUri)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            e.description,
            amount_to_f64(e.amount)?,
            e.category_id,
            e.date,
            e.photo_uri
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update_expense(conn: &Connection, e: &Expense) -> Result<usize> {
    let n = conn.execute(
        "UPDATE expenses SET productName=?1, amount=?2, categoryId=?3, date=?4, photoUri=?5
         WHERE id=?6",
        params![
            e.description,
            amount_to_f64(e.amount)?,
            e.category_id,
            e.date,
            e.photo_uri,
            e.id
        ],
    )?;
    Ok(n)
}

pub fn delete_expense(conn: &Connection, id: i64) -> Result<usize> {
    Ok(conn.execute("DELETE FROM expenses WHERE id=?1", params![id])?)
}

fn expense_rows(conn: &Connection, sql: &str, p: &[&dyn rusqlite::ToSql]) -> Result<Vec<Expense>> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query(p)?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        out.push(expense_from_row(r)?);
    }
    Ok(out)
}

fn expense_from_row(r: &Row) -> Result<Expense> {
    Ok(Expense {
        id: r.get(0)?,
        description: r.get(1)?,
        amount: amount_from_f64(r.get(2)?)?,
        category_id: r.get(3)?,
        date: r.get(4)?,
        photo_uri: r.get(5)?,
    })
}

const EXPENSE_COLS: &str = "id, productName, amount, categoryId, date, photoUri";

pub fn expenses_all(conn: &Connection) -> Result<Vec<Expense>> {
    expense_rows(
        conn,
        &format!("SELECT {} FROM expenses ORDER BY date DESC, id DESC", EXPENSE_COLS),
        &[],
    )
}

pub fn expenses_in_range(conn: &Connection, start: i64, end: i64) -> Result<Vec<Expense>> {
    expense_rows(
        conn,
        &format!(
            "SELECT {} FROM expenses WHERE date>=?1 AND date<=?2 ORDER BY date DESC, id DESC",
            EXPENSE_COLS
        ),
        &[&start, &end],
    )
}

pub fn expenses_by_category(conn: &Connection, category_id: i64) -> Result<Vec<Expense>> {
    expense_rows(
        conn,
        &format!(
            "SELECT {} FROM expenses WHERE categoryId=?1 ORDER BY date DESC, id DESC",
            EXPENSE_COLS
        ),
        &[&category_id],
    )
}

pub fn expenses_with_photos(conn: &Connection) -> Result<Vec<Expense>> {
    expense_rows(
        conn,
        &format!(
            "SELECT {} FROM expenses WHERE photoUri IS NOT NULL AND TRIM(photoUri) != ''
             ORDER BY date DESC, id DESC",
            EXPENSE_COLS
        ),
        &[],
    )
}

// --- incomes ---

pub fn insert_income(conn: &Connection, i: &Income) -> Result<i64> {
    conn.execute(
        "INSERT INTO incomes(description, amount, categoryId, date)
         VALUES (?1, ?2, ?3, ?4)",
        params![i.description, amount_to_f64(i.amount)?, i.category_id, i.date],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update_income(conn: &Connection, i: &Income) -> Result<usize> {
    let n = conn.execute(
        "UPDATE incomes SET description=?1, amount=?2, categoryId=?3, date=?4 WHERE id=?5",
        params![i.description, amount_to_f64(i.amount)?, i.category_id, i.date, i.id],
    )?;
    Ok(n)
}

pub fn delete_income(conn: &Connection, id: i64) -> Result<usize> {
    Ok(conn.execute("DELETE FROM incomes WHERE id=?1", params![id])?)
}

fn income_rows(conn: &Connection, sql: &str, p: &[&dyn rusqlite::ToSql]) -> Result<Vec<Income>> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query(p)?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        out.push(Income {
            id: r.get(0)?,
            description: r.get(1)?,
            amount: amount_from_f64(r.get(2)?)?,
            category_id: r.get(3)?,
            date: r.get(4)?,
        });
    }
    Ok(out)
}

const INCOME_COLS: &str = "id, description, amount, categoryId, date";

pub fn incomes_all(conn: &Connection) -> Result<Vec<Income>> {
    income_rows(
        conn,
        &format!("SELECT {} FROM incomes ORDER BY date DESC, id DESC", INCOME_COLS),
        &[],
    )
}

pub fn incomes_in_range(conn: &Connection, start: i64, end: i64) -> Result<Vec<Income>> {
    income_rows(
        conn,
        &format!(
            "SELECT {} FROM incomes WHERE date>=?1 AND date<=?2 ORDER BY date DESC, id DESC",
            INCOME_COLS
        ),
        &[&start, &end],
    )
}

pub fn incomes_by_category(conn: &Connection, category_id: i64) -> Result<Vec<Income>> {
    income_rows(
        conn,
        &format!(
            "SELECT {} FROM incomes WHERE categoryId=?1 ORDER BY date DESC, id DESC",
            INCOME_COLS
        ),
        &[&category_id],
    )
}

// --- categories ---

pub fn insert_category(
    conn: &Connection,
    kind: Kind,
    name: &str,
    icon_name: &str,
    color_hex: Option<&str>,
) -> Result<i64> {
    let created_at = chrono::Utc::now().timestamp_millis();
    match kind {
        Kind::Expense => {
            conn.execute(
                "INSERT INTO expense_categories(name, iconName, colorHex, createdAt)
                 VALUES (?1, ?2, ?3, ?4)",
                params![name, icon_name, color_hex.unwrap_or("#9E9E9E"), created_at],
            )?;
        }
        Kind::Income => {
            conn.execute(
                "INSERT INTO income_categories(name, iconName, createdAt)
                 VALUES (?1, ?2, ?3)",
                params![name, icon_name, created_at],
            )?;
        }
    }
    Ok(conn.last_insert_rowid())
}

pub fn update_category(conn: &Connection, cat: &Category) -> Result<usize> {
    let n = match cat.kind {
        Kind::Expense => conn.execute(
            "UPDATE expense_categories SET name=?1, iconName=?2, colorHex=?3 WHERE id=?4",
            params![
                cat.name,
                cat.icon_name,
                cat.color_hex.as_deref().unwrap_or("#9E9E9E"),
                cat.id
            ],
        )?,
        Kind::Income => conn.execute(
            "UPDATE income_categories SET name=?1, iconName=?2 WHERE id=?3",
            params![cat.name, cat.icon_name, cat.id],
        )?,
    };
    Ok(n)
}

pub fn delete_category(conn: &Connection, id: CategoryId) -> Result<usize> {
    let sql = format!("DELETE FROM {} WHERE id=?1", category_table(id.kind()));
    Ok(conn.execute(&sql, params![id.raw()])?)
}

fn category_from_row(r: &Row, kind: Kind) -> rusqlite::Result<Category> {
    Ok(Category {
        id: r.get(0)?,
        name: r.get(1)?,
        icon_name: r.get(2)?,
        color_hex: match kind {
            Kind::Expense => Some(r.get(3)?),
            Kind::Income => None,
        },
        kind,
    })
}

fn category_cols(kind: Kind) -> &'static str {
    match kind {
        Kind::Expense => "id, name, iconName, colorHex",
        Kind::Income => "id, name, iconName",
    }
}

pub fn categories(conn: &Connection, kind: Kind) -> Result<Vec<Category>> {
    let sql = format!(
        "SELECT {} FROM {} ORDER BY createdAt, id",
        category_cols(kind),
        category_table(kind)
    );
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query([])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        out.push(category_from_row(r, kind)?);
    }
    Ok(out)
}

pub fn category_by_id(conn: &Connection, id: CategoryId) -> Result<Option<Category>> {
    let kind = id.kind();
    let sql = format!(
        "SELECT {} FROM {} WHERE id=?1",
        category_cols(kind),
        category_table(kind)
    );
    let cat = conn
        .query_row(&sql, params![id.raw()], |r| category_from_row(r, kind))
        .optional()?;
    Ok(cat)
}

/// Case-sensitive exact match on the trimmed name, within one partition.
pub fn category_by_name(conn: &Connection, kind: Kind, name: &str) -> Result<Option<Category>> {
    let sql = format!(
        "SELECT {} FROM {} WHERE name=?1",
        category_cols(kind),
        category_table(kind)
    );
    let cat = conn
        .query_row(&sql, params![name.trim()], |r| category_from_row(r, kind))
        .optional()?;
    Ok(cat)
}
