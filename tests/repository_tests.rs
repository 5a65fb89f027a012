// Copyright (c) 2025 Wonbook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use wonbook::models::{CategoryId, Expense, Income, Kind, Transaction};
use wonbook::repository::Repository;
use wonbook::{db, utils};

fn setup() -> Repository {
    Repository::new(db::open_in_memory().unwrap())
}

fn millis(y: i32, m: u32, d: u32) -> i64 {
    utils::date_to_millis(NaiveDate::from_ymd_opt(y, m, d).unwrap()).unwrap()
}

fn expense(amount: i64, date: i64, category_id: Option<i64>) -> Transaction {
    Transaction::Expense(Expense {
        id: 0,
        amount: Decimal::from(amount),
        category_id,
        date,
        description: "lunch".into(),
        photo_uri: None,
    })
}

fn income(amount: i64, date: i64, category_id: Option<i64>) -> Transaction {
    Transaction::Income(Income {
        id: 0,
        amount: Decimal::from(amount),
        category_id,
        date,
        description: "salary".into(),
    })
}

#[test]
fn merged_stream_sorted_by_date_descending() {
    let repo = setup();
    repo.add_transaction(&expense(100, millis(2025, 3, 5), None)).unwrap();
    repo.add_transaction(&income(200, millis(2025, 3, 20), None)).unwrap();
    repo.add_transaction(&expense(300, millis(2025, 3, 12), None)).unwrap();
    repo.add_transaction(&income(400, millis(2025, 2, 28), None)).unwrap();

    let txs = repo.all_transactions().unwrap();
    assert_eq!(txs.len(), 4);
    for pair in txs.windows(2) {
        assert!(pair[0].date_millis() >= pair[1].date_millis());
    }
    assert_eq!(txs[0].date_millis(), millis(2025, 3, 20));
    assert_eq!(txs[3].date_millis(), millis(2025, 2, 28));
}

#[test]
fn range_bounds_are_inclusive() {
    let repo = setup();
    let start = millis(2025, 3, 1);
    let end = millis(2025, 3, 10);
    repo.add_transaction(&expense(1, start, None)).unwrap();
    repo.add_transaction(&income(2, end, None)).unwrap();
    repo.add_transaction(&expense(3, end + 1, None)).unwrap();

    let txs = repo.transactions_in_range(start, end).unwrap();
    assert_eq!(txs.len(), 2);
    assert!(txs.iter().all(|t| t.date_millis() >= start && t.date_millis() <= end));
}

#[test]
fn photo_filter_skips_blank_and_missing_uris() {
    let repo = setup();
    let date = millis(2025, 3, 1);
    let with_uri = |uri: Option<&str>| {
        Transaction::Expense(Expense {
            id: 0,
            amount: Decimal::from(10),
            category_id: None,
            date,
            description: "receipt".into(),
            photo_uri: uri.map(|s| s.to_string()),
        })
    };
    repo.add_transaction(&with_uri(Some("content://photo/1"))).unwrap();
    repo.add_transaction(&with_uri(Some("   "))).unwrap();
    repo.add_transaction(&with_uri(None)).unwrap();

    let photos = repo.transactions_with_photos().unwrap();
    assert_eq!(photos.len(), 1);
    assert_eq!(photos[0].photo_uri.as_deref(), Some("content://photo/1"));
}

#[test]
fn deleting_category_keeps_transactions_and_clears_reference() {
    let repo = setup();
    let cat = repo
        .add_category(Kind::Expense, "식비", "restaurant", Some("#FF7043"))
        .unwrap()
        .unwrap();
    repo.add_transaction(&expense(9000, millis(2025, 3, 2), Some(cat.raw()))).unwrap();

    assert!(repo.delete_category(cat).unwrap());

    let txs = repo.all_transactions().unwrap();
    assert_eq!(txs.len(), 1);
    assert_eq!(txs[0].category_ref(), None);
}

#[test]
fn deleting_absent_category_is_not_an_error() {
    let repo = setup();
    assert!(!repo.delete_category(CategoryId::Expense(42)).unwrap());
    assert!(!repo.delete_category(CategoryId::Income(42)).unwrap());
}

#[test]
fn category_ids_can_collide_across_partitions() {
    let repo = setup();
    let e = repo
        .add_category(Kind::Expense, "식비", "restaurant", Some("#FF7043"))
        .unwrap()
        .unwrap();
    let i = repo
        .add_category(Kind::Income, "월급", "payments", None)
        .unwrap()
        .unwrap();
    assert_eq!(e.raw(), 1);
    assert_eq!(i.raw(), 1);

    let cats = repo.all_categories().unwrap();
    assert_eq!(cats.len(), 2);
    assert_ne!(cats[0].kind, cats[1].kind);
    // The income-side category never carries a color.
    let income_cat = cats.iter().find(|c| c.kind == Kind::Income).unwrap();
    assert_eq!(income_cat.color_hex, None);
}

#[test]
fn delete_requires_matching_partition() {
    let repo = setup();
    let id = repo.add_transaction(&expense(50, millis(2025, 3, 1), None)).unwrap();

    assert!(!repo.delete_transaction(id, Kind::Income).unwrap());
    assert_eq!(repo.all_transactions().unwrap().len(), 1);

    assert!(repo.delete_transaction(id, Kind::Expense).unwrap());
    assert!(repo.all_transactions().unwrap().is_empty());
}

#[test]
fn update_rewrites_the_row() {
    let repo = setup();
    let id = repo.add_transaction(&income(100, millis(2025, 3, 1), None)).unwrap();
    repo.update_transaction(&Transaction::Income(Income {
        id,
        amount: Decimal::from(250),
        category_id: None,
        date: millis(2025, 3, 4),
        description: "bonus".into(),
    }))
    .unwrap();

    let txs = repo.all_transactions().unwrap();
    assert_eq!(txs[0].amount(), Decimal::from(250));
    assert_eq!(txs[0].description(), "bonus");
    assert_eq!(txs[0].date_millis(), millis(2025, 3, 4));
}

#[test]
fn by_category_lookup_stays_in_one_partition() {
    let repo = setup();
    let e = repo
        .add_category(Kind::Expense, "식비", "restaurant", Some("#FF7043"))
        .unwrap()
        .unwrap();
    let i = repo
        .add_category(Kind::Income, "월급", "payments", None)
        .unwrap()
        .unwrap();
    assert_eq!(e.raw(), i.raw()); // colliding raw ids on purpose
    repo.add_transaction(&expense(100, millis(2025, 3, 1), Some(e.raw()))).unwrap();
    repo.add_transaction(&income(200, millis(2025, 3, 2), Some(i.raw()))).unwrap();

    let txs = repo.transactions_by_category(e).unwrap();
    assert_eq!(txs.len(), 1);
    assert_eq!(txs[0].kind(), Kind::Expense);

    let txs = repo.transactions_by_category(i).unwrap();
    assert_eq!(txs.len(), 1);
    assert_eq!(txs[0].kind(), Kind::Income);
}

#[test]
fn live_handle_recomputes_only_after_a_write() {
    let repo = setup();
    let all = Repository::watch_all_transactions();
    assert!(all.get(&repo).unwrap().is_empty());

    repo.add_transaction(&expense(100, millis(2025, 3, 1), None)).unwrap();
    assert_eq!(all.get(&repo).unwrap().len(), 1);

    let ranged = Repository::watch_range(millis(2025, 3, 1), millis(2025, 3, 31));
    assert_eq!(ranged.get(&repo).unwrap().len(), 1);
    repo.add_transaction(&income(200, millis(2025, 4, 2), None)).unwrap();
    // Out-of-range write still triggers a full recompute; the result is the same.
    assert_eq!(ranged.get(&repo).unwrap().len(), 1);
    assert_eq!(all.get(&repo).unwrap().len(), 2);
}

#[test]
fn opens_and_initializes_on_disk_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wonbook.sqlite");
    let repo = Repository::new(db::open_at(&path).unwrap());
    repo.add_transaction(&expense(10, millis(2025, 3, 1), None)).unwrap();
    assert!(path.exists());
    assert_eq!(repo.all_transactions().unwrap().len(), 1);
}
