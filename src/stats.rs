//! Database statistics overview.
//!
//! Quick summary of source and snapshot row counts, embedding coverage,
//! and the most recent materialization run. Used by `svcsnap stats` to
//! confirm a run produced what was expected.

use anyhow::Result;
use sqlx::Row;

use crate::config::Config;
use crate::db;

pub async fn run_stats(config: &Config) -> Result<()> {
    let pool = db::connect(config).await?;

    let resources: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM resources")
        .fetch_one(&pool)
        .await?;
    let active_resources: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM resources WHERE status = 1")
            .fetch_one(&pool)
            .await?;
    let services: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM services")
        .fetch_one(&pool)
        .await?;
    let active_services: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM services WHERE status = 1")
        .fetch_one(&pool)
        .await?;
    let addresses: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM addresses")
        .fetch_one(&pool)
        .await?;
    let categories: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
        .fetch_one(&pool)
        .await?;
    let eligibilities: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM eligibilities")
        .fetch_one(&pool)
        .await?;
    let snapshots: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM service_snapshots")
        .fetch_one(&pool)
        .await?;
    let embedded: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM service_snapshots WHERE embedding IS NOT NULL")
            .fetch_one(&pool)
            .await?;

    println!("Service Snapshots — Database Stats");
    println!("==================================");
    println!();
    println!("  Database:      {}", config.db.path.display());
    println!();
    println!("  Resources:     {} ({} active)", resources, active_resources);
    println!("  Services:      {} ({} active)", services, active_services);
    println!("  Addresses:     {}", addresses);
    println!("  Categories:    {}", categories);
    println!("  Eligibilities: {}", eligibilities);
    println!();
    println!("  Snapshots:     {}", snapshots);
    println!(
        "  Embedded:      {} / {} ({}%)",
        embedded,
        snapshots,
        if snapshots > 0 { (embedded * 100) / snapshots } else { 0 }
    );

    let last_run = sqlx::query("SELECT ran_at, rows_written, violations FROM runs ORDER BY id DESC LIMIT 1")
        .fetch_optional(&pool)
        .await?;
    if let Some(row) = last_run {
        let ran_at: i64 = row.get("ran_at");
        let rows_written: i64 = row.get("rows_written");
        let violations: i64 = row.get("violations");
        let when = chrono::DateTime::from_timestamp(ran_at, 0)
            .map(|t| t.to_rfc3339())
            .unwrap_or_else(|| ran_at.to_string());
        println!();
        println!("  Last run:      {}", when);
        println!("    rows:        {}", rows_written);
        println!("    violations:  {}", violations);
    }

    pool.close().await;
    Ok(())
}
