// Copyright (c) 2025 Wonbook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use wonbook::repository::Repository;
use wonbook::{cli, commands, db};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let repo = Repository::new(db::open_or_init()?);

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path()?.display());
        }
        Some(("category", sub)) => commands::categories::handle(&repo, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&repo, sub)?,
        Some(("stats", sub)) => commands::stats::handle(&repo, sub)?,
        Some(("calendar", sub)) => commands::calendar::handle(&repo, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
