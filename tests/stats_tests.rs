// Copyright (c) 2025 Wonbook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use wonbook::models::{Expense, Income, Kind, Transaction};
use wonbook::repository::Repository;
use wonbook::{db, stats, utils};

fn setup() -> Repository {
    Repository::new(db::open_in_memory().unwrap())
}

fn millis(y: i32, m: u32, d: u32) -> i64 {
    utils::date_to_millis(NaiveDate::from_ymd_opt(y, m, d).unwrap()).unwrap()
}

fn add_expense(repo: &Repository, amount: i64, date: i64, category_id: Option<i64>) {
    repo.add_transaction(&Transaction::Expense(Expense {
        id: 0,
        amount: Decimal::from(amount),
        category_id,
        date,
        description: "expense".into(),
        photo_uri: None,
    }))
    .unwrap();
}

fn add_income(repo: &Repository, amount: i64, date: i64, category_id: Option<i64>) {
    repo.add_transaction(&Transaction::Income(Income {
        id: 0,
        amount: Decimal::from(amount),
        category_id,
        date,
        description: "income".into(),
    }))
    .unwrap();
}

#[test]
fn march_aggregation_scenario() {
    let repo = setup();
    let a = repo
        .add_category(Kind::Expense, "식비", "restaurant", Some("#FF7043"))
        .unwrap()
        .unwrap();
    let b = repo
        .add_category(Kind::Expense, "교통", "bus", Some("#42A5F5"))
        .unwrap()
        .unwrap();
    add_expense(&repo, 10000, millis(2025, 3, 1), Some(a.raw()));
    add_expense(&repo, 5000, millis(2025, 3, 1), Some(b.raw()));
    add_income(&repo, 50000, millis(2025, 3, 15), None);
    // Outside the month, must not count.
    add_expense(&repo, 777, millis(2025, 4, 1), Some(a.raw()));

    let s = stats::compute_monthly_statistics(&repo, 2025, 3).unwrap();
    assert_eq!(s.total_expense, Decimal::from(15000));
    assert_eq!(s.total_income, Decimal::from(50000));
    assert_eq!(s.balance, Decimal::from(35000));

    assert_eq!(s.by_category.len(), 2);
    let total_of = |name: &str| {
        s.by_category
            .iter()
            .find(|ct| ct.category.name == name)
            .unwrap()
            .total
    };
    assert_eq!(total_of("식비"), Decimal::from(10000));
    assert_eq!(total_of("교통"), Decimal::from(5000));

    let day1 = s.daily_totals.get(&1).unwrap();
    assert_eq!(day1.expense, Decimal::from(15000));
    assert_eq!(day1.income, Decimal::ZERO);
    let day15 = s.daily_totals.get(&15).unwrap();
    assert_eq!(day15.income, Decimal::from(50000));
    assert_eq!(day15.expense, Decimal::ZERO);
    assert!(!s.daily_totals.contains_key(&2));
}

#[test]
fn orphaned_and_missing_category_refs_stay_out_of_breakdown() {
    let repo = setup();
    let cat = repo
        .add_category(Kind::Expense, "식비", "restaurant", Some("#FF7043"))
        .unwrap()
        .unwrap();
    add_expense(&repo, 3000, millis(2025, 3, 5), Some(cat.raw()));
    add_expense(&repo, 2000, millis(2025, 3, 6), None);
    add_income(&repo, 1000, millis(2025, 3, 7), Some(99)); // resolves to nothing

    repo.delete_category(cat).unwrap(); // orphans the first expense's reference

    let s = stats::compute_monthly_statistics(&repo, 2025, 3).unwrap();
    assert_eq!(s.total_expense, Decimal::from(5000));
    assert_eq!(s.total_income, Decimal::from(1000));
    assert!(s.by_category.is_empty());
}

#[test]
fn cross_partition_id_collision_buckets_stay_separate() {
    let repo = setup();
    let e = repo
        .add_category(Kind::Expense, "식비", "restaurant", Some("#FF7043"))
        .unwrap()
        .unwrap();
    let i = repo
        .add_category(Kind::Income, "월급", "payments", None)
        .unwrap()
        .unwrap();
    assert_eq!(e.raw(), i.raw());

    add_expense(&repo, 4000, millis(2025, 3, 3), Some(e.raw()));
    add_income(&repo, 90000, millis(2025, 3, 25), Some(i.raw()));

    let s = stats::compute_monthly_statistics(&repo, 2025, 3).unwrap();
    assert_eq!(s.by_category.len(), 2);
    let total_of = |name: &str| {
        s.by_category
            .iter()
            .find(|ct| ct.category.name == name)
            .unwrap()
            .total
    };
    assert_eq!(total_of("식비"), Decimal::from(4000));
    assert_eq!(total_of("월급"), Decimal::from(90000));
}

#[test]
fn cumulative_series_covers_whole_past_month() {
    let repo = setup();
    add_expense(&repo, 100, millis(2025, 3, 1), None);
    add_expense(&repo, 50, millis(2025, 3, 3), None);
    add_income(&repo, 99999, millis(2025, 3, 2), None); // income never enters the series

    let today = NaiveDate::from_ymd_opt(2025, 4, 10).unwrap();
    let series = stats::cumulative_expense_series(&repo, 2025, 3, today).unwrap();
    assert_eq!(series.len(), 31);
    assert_eq!(series[0], Decimal::from(100));
    assert_eq!(series[1], Decimal::from(100));
    assert_eq!(series[2], Decimal::from(150));
    assert_eq!(series[30], Decimal::from(150));
}

#[test]
fn cumulative_series_clips_current_month_to_elapsed_days() {
    let repo = setup();
    add_expense(&repo, 100, millis(2025, 3, 1), None);

    let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
    let series = stats::cumulative_expense_series(&repo, 2025, 3, today).unwrap();
    assert_eq!(series.len(), 10);
    assert_eq!(series[9], Decimal::from(100));
}

#[test]
fn recommendation_rounds_to_next_hundred() {
    // 100000 * 0.33 / 10 = 3300 raw; an exact multiple still moves up.
    let per_day =
        stats::recommended_daily(Decimal::from(100000), Decimal::new(33, 2), 10);
    assert_eq!(per_day, Decimal::from(3400));

    let uneven = stats::recommended_daily(Decimal::from(100000), Decimal::new(333, 3), 10);
    assert_eq!(uneven, Decimal::from(3400)); // 3330 raw -> 3400

    assert_eq!(
        stats::recommended_daily(Decimal::from(100000), Decimal::new(33, 2), 0),
        Decimal::ZERO
    );
}

#[test]
fn exhausted_budget_recommends_nothing() {
    // Nothing left to distribute: the zero quota must not round up to 100.
    assert_eq!(
        stats::recommended_daily(Decimal::ZERO, Decimal::new(33, 2), 10),
        Decimal::ZERO
    );
    assert_eq!(
        stats::recommended_daily(Decimal::from(100000), Decimal::ZERO, 10),
        Decimal::ZERO
    );
}

#[test]
fn days_left_is_zero_outside_the_current_month() {
    let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
    assert_eq!(stats::days_left(2025, 3, today).unwrap(), 21);
    assert_eq!(stats::days_left(2025, 2, today).unwrap(), 0);
    assert_eq!(stats::days_left(2025, 4, today).unwrap(), 0);
}

#[test]
fn shares_come_from_previous_month_when_it_has_data() {
    let repo = setup();
    let a = repo
        .add_category(Kind::Expense, "식비", "restaurant", Some("#FF7043"))
        .unwrap()
        .unwrap();
    let b = repo
        .add_category(Kind::Expense, "교통", "bus", Some("#42A5F5"))
        .unwrap()
        .unwrap();
    // February: 75/25 split. March spending looks different on purpose.
    add_expense(&repo, 7500, millis(2025, 2, 10), Some(a.raw()));
    add_expense(&repo, 2500, millis(2025, 2, 12), Some(b.raw()));
    add_expense(&repo, 1000, millis(2025, 3, 1), Some(b.raw()));

    let shares = stats::category_shares(&repo, 2025, 3).unwrap();
    assert_eq!(shares.len(), 2);
    let share_of = |name: &str| shares.iter().find(|(c, _)| c.name == name).unwrap().1;
    assert_eq!(share_of("식비"), Decimal::new(75, 2));
    assert_eq!(share_of("교통"), Decimal::new(25, 2));
}

#[test]
fn shares_fall_back_to_current_month() {
    let repo = setup();
    let a = repo
        .add_category(Kind::Expense, "식비", "restaurant", Some("#FF7043"))
        .unwrap()
        .unwrap();
    add_expense(&repo, 5000, millis(2025, 3, 1), Some(a.raw()));

    let shares = stats::category_shares(&repo, 2025, 3).unwrap();
    assert_eq!(shares.len(), 1);
    assert_eq!(shares[0].1, Decimal::ONE);
}

#[test]
fn spending_plan_distributes_the_leftover() {
    let repo = setup();
    let a = repo
        .add_category(Kind::Expense, "식비", "restaurant", Some("#FF7043"))
        .unwrap()
        .unwrap();
    // Base period: February, single category with all the spend.
    add_expense(&repo, 10000, millis(2025, 2, 5), Some(a.raw()));
    // March so far: 40000 spent.
    add_expense(&repo, 40000, millis(2025, 3, 2), Some(a.raw()));

    let today = NaiveDate::from_ymd_opt(2025, 3, 21).unwrap(); // 10 days left
    let plan = stats::spending_plan(&repo, 2025, 3, Decimal::from(140000), today).unwrap();
    assert_eq!(plan.len(), 1);
    // leftover 100000, share 1.0, 10 days -> raw 10000 -> next hundred 10100
    assert_eq!(plan[0].per_day, Decimal::from(10100));

    // Limit already blown: leftover clamps to zero and nothing is recommended.
    let plan = stats::spending_plan(&repo, 2025, 3, Decimal::from(30000), today).unwrap();
    assert_eq!(plan[0].per_day, Decimal::ZERO);

    // A month that is not the current one has no days left.
    let plan = stats::spending_plan(&repo, 2025, 2, Decimal::from(140000), today).unwrap();
    assert_eq!(plan[0].per_day, Decimal::ZERO);
}
