// Copyright (c) 2025 Wonbook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::Connection;
use std::fs;
use std::path::PathBuf;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.wonbook", "Wonbook", "wonbook"));

pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("wonbook.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    let path = db_path()?;
    let mut conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&mut conn)?;
    Ok(conn)
}

pub fn open_at(path: &std::path::Path) -> Result<Connection> {
    let mut conn =
        Connection::open(path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&mut conn)?;
    Ok(conn)
}

pub fn open_in_memory() -> Result<Connection> {
    let mut conn = Connection::open_in_memory().context("Open in-memory DB")?;
    init_schema(&mut conn)?;
    Ok(conn)
}

// Income and expense sides are disjoint partitions: two transaction tables,
// two category tables. Category name uniqueness is checked in code, not here.
// Expense descriptions live in a column named productName; expense categories
// carry a colorHex that income categories do not.
fn init_schema(conn: &mut Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS expense_categories(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        iconName TEXT NOT NULL,
        colorHex TEXT NOT NULL,
        createdAt INTEGER NOT NULL
    );

    CREATE TABLE IF NOT EXISTS income_categories(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        iconName TEXT NOT NULL,
        createdAt INTEGER NOT NULL
    );

    CREATE TABLE IF NOT EXISTS expenses(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        productName TEXT NOT NULL,
        amount REAL NOT NULL,
        categoryId INTEGER,
        date INTEGER NOT NULL,
        photoUri TEXT,
        FOREIGN KEY(categoryId) REFERENCES expense_categories(id) ON DELETE SET NULL
    );
    CREATE INDEX IF NOT EXISTS idx_expenses_date ON expenses(date);

    CREATE TABLE IF NOT EXISTS incomes(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        description TEXT NOT NULL,
        amount REAL NOT NULL,
        categoryId INTEGER,
        date INTEGER NOT NULL,
        FOREIGN KEY(categoryId) REFERENCES income_categories(id) ON DELETE SET NULL
    );
    CREATE INDEX IF NOT EXISTS idx_incomes_date ON incomes(date);
    "#,
    )?;
    Ok(())
}
