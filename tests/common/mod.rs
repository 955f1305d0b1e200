#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use megaphone_announcements::repository::fixtures::Seeder;
use sqlx::{any::AnyPoolOptions, AnyPool};

pub const UGT: i64 = 1;
pub const PGT: i64 = 2;
pub const PGR: i64 = 3;
pub const STAFF: i64 = 4;

pub const AUTHOR: i64 = 1;

/// Fixed instant the repository tests evaluate eligibility against.
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2011, 11, 21, 12, 0, 0).unwrap()
}

/// In-memory Megaphone store with the canonical categories and one author.
pub async fn setup_store() -> anyhow::Result<(AnyPool, Seeder)> {
    sqlx::any::install_default_drivers();

    // A single long-lived connection, since every in-memory SQLite
    // connection is its own database.
    let pool = AnyPoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await?;

    let seeder = Seeder::new(pool.clone());
    seeder.category(UGT, "UGT").await?;
    seeder.category(PGT, "PGT").await?;
    seeder.category(PGR, "PGR").await?;
    seeder.category(STAFF, "Staff").await?;
    seeder.user(AUTHOR, "Jo Bloggs", "jo@example.ac.uk").await?;

    Ok((pool, seeder))
}

pub fn names(categories: &[&str]) -> Vec<String> {
    categories.iter().map(|c| c.to_string()).collect()
}
