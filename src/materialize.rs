//! Materialization run orchestration.
//!
//! Coordinates the full flow: point-in-time bulk read → pure denormalization
//! pass → replace-all write, reporting schedule violations along the way.
//! The read happens once up front and the engine never touches the database
//! again until the final transaction, so a run is idempotent and safe to
//! re-execute.

use anyhow::Result;

use crate::config::Config;
use crate::db;
use crate::eligibility::Tables;
use crate::emit;
use crate::store;
use crate::view;

pub async fn run_materialize(config: &Config, dry_run: bool, limit: Option<usize>) -> Result<()> {
    let pool = db::connect(config).await?;

    let source = view::load(&pool).await?;
    let tables = Tables::new();
    let mut outcome = emit::materialize(&source, &tables);

    if let Some(lim) = limit {
        outcome.snapshots.truncate(lim);
    }

    for violation in &outcome.violations {
        eprintln!("  violation: {}", violation);
    }

    if dry_run {
        println!("materialize (dry-run)");
        println!("  services: {}", outcome.services_seen);
        println!("  rows: {}", outcome.snapshots.len());
        println!("  violations: {}", outcome.violations.len());
        pool.close().await;
        return Ok(());
    }

    store::replace_all(
        &pool,
        &outcome.snapshots,
        &outcome.violations,
        config.materialize.progress_every,
    )
    .await?;

    println!("materialize");
    println!("  services: {}", outcome.services_seen);
    println!("  skipped: {}", outcome.services_skipped);
    println!("  rows written: {}", outcome.snapshots.len());
    println!("  violations: {}", outcome.violations.len());
    println!("ok");

    pool.close().await;

    if config.materialize.fail_on_violations && !outcome.violations.is_empty() {
        anyhow::bail!(
            "{} schedule record(s) failed validation",
            outcome.violations.len()
        );
    }

    Ok(())
}
