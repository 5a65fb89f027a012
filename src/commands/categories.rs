// Copyright (c) 2025 Wonbook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::CategoryId;
use crate::repository::Repository;
use crate::utils::{maybe_print_json, parse_kind, pretty_table};
use anyhow::Result;

pub fn handle(repo: &Repository, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(repo, sub)?,
        Some(("list", sub)) => list(repo, sub)?,
        Some(("rename", sub)) => rename(repo, sub)?,
        Some(("rm", sub)) => rm(repo, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(repo: &Repository, sub: &clap::ArgMatches) -> Result<()> {
    let kind = parse_kind(sub.get_one::<String>("kind").unwrap())?;
    let name = sub.get_one::<String>("name").unwrap();
    let icon = sub.get_one::<String>("icon").unwrap();
    let color = sub.get_one::<String>("color").map(|s| s.as_str());
    match repo.add_category(kind, name, icon, color)? {
        Some(id) => println!("Added {} category '{}' (id {})", kind.as_str(), name.trim(), id.raw()),
        None => println!(
            "A {} category named '{}' already exists",
            kind.as_str(),
            name.trim()
        ),
    }
    Ok(())
}

fn list(repo: &Repository, sub: &clap::ArgMatches) -> Result<()> {
    let cats = repo.all_categories()?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &cats)? {
        let rows = cats
            .iter()
            .map(|c| {
                vec![
                    c.id.to_string(),
                    c.kind.as_str().to_string(),
                    c.name.clone(),
                    c.icon_name.clone(),
                    c.color_hex.clone().unwrap_or_default(),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Id", "Kind", "Name", "Icon", "Color"], rows));
    }
    Ok(())
}

fn rename(repo: &Repository, sub: &clap::ArgMatches) -> Result<()> {
    let kind = parse_kind(sub.get_one::<String>("kind").unwrap())?;
    let id = CategoryId::new(kind, *sub.get_one::<i64>("id").unwrap());
    let name = sub.get_one::<String>("name").unwrap();
    let Some(mut cat) = repo.category(id)? else {
        println!("No {} category with id {}", kind.as_str(), id.raw());
        return Ok(());
    };
    cat.name = name.trim().to_string();
    if repo.update_category(&cat)? {
        println!("Renamed {} category {} to '{}'", kind.as_str(), id.raw(), cat.name);
    } else {
        println!(
            "A {} category named '{}' already exists",
            kind.as_str(),
            cat.name
        );
    }
    Ok(())
}

fn rm(repo: &Repository, sub: &clap::ArgMatches) -> Result<()> {
    let kind = parse_kind(sub.get_one::<String>("kind").unwrap())?;
    let id = CategoryId::new(kind, *sub.get_one::<i64>("id").unwrap());
    if repo.delete_category(id)? {
        println!("Removed {} category {}", kind.as_str(), id.raw());
    } else {
        println!("No {} category with id {}", kind.as_str(), id.raw());
    }
    Ok(())
}
