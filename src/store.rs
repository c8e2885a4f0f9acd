//! Replace-all snapshot persistence.
//!
//! A materialization run fully replaces the snapshot table: DELETE plus
//! batched INSERTs inside one transaction, so readers never observe a
//! half-written row set. A summary row lands in `runs` on commit.

use anyhow::Result;
use sqlx::SqlitePool;

use crate::models::ServiceSnapshot;
use crate::schedule::ScheduleViolation;

/// Atomically replace the entire snapshot table with `snapshots`.
/// `progress_every` prints a progress line every N rows inserted; 0 silences.
pub async fn replace_all(
    pool: &SqlitePool,
    snapshots: &[ServiceSnapshot],
    violations: &[ScheduleViolation],
    progress_every: usize,
) -> Result<()> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM service_snapshots")
        .execute(&mut *tx)
        .await?;

    for (i, snapshot) in snapshots.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO service_snapshots (
                id, service_id, resource_id, program_id, address_id,
                verified_at, updated_at, latitude, longitude, schedule,
                categories_core_ids, categories_core_names, categories_core_parents,
                categories_our415_ids, categories_our415_names,
                categories_sfsg_ids, categories_sfsg_names,
                categories_ucsf_top_ids, categories_ucsf_top_names,
                categories_ucsf_sub_ids, categories_ucsf_sub_names,
                eligibility_age, eligibility_education, eligibility_employment,
                eligibility_ethnicity, eligibility_family_status, eligibility_financial,
                eligibility_gender, eligibility_health, eligibility_immigration,
                eligibility_housing, eligibility_other, eligibility_all,
                embedding_text, text_hash, embedding
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, NULL)
            "#,
        )
        .bind(&snapshot.id)
        .bind(snapshot.service_id)
        .bind(snapshot.resource_id)
        .bind(snapshot.program_id)
        .bind(snapshot.address_id)
        .bind(snapshot.verified_at)
        .bind(snapshot.updated_at)
        .bind(snapshot.latitude)
        .bind(snapshot.longitude)
        .bind(serde_json::to_string(&snapshot.schedule)?)
        .bind(serde_json::to_string(&snapshot.categories_core_ids)?)
        .bind(serde_json::to_string(&snapshot.categories_core_names)?)
        .bind(serde_json::to_string(&snapshot.categories_core_parents)?)
        .bind(serde_json::to_string(&snapshot.categories_our415_ids)?)
        .bind(serde_json::to_string(&snapshot.categories_our415_names)?)
        .bind(serde_json::to_string(&snapshot.categories_sfsg_ids)?)
        .bind(serde_json::to_string(&snapshot.categories_sfsg_names)?)
        .bind(serde_json::to_string(&snapshot.categories_ucsf_top_ids)?)
        .bind(serde_json::to_string(&snapshot.categories_ucsf_top_names)?)
        .bind(serde_json::to_string(&snapshot.categories_ucsf_sub_ids)?)
        .bind(serde_json::to_string(&snapshot.categories_ucsf_sub_names)?)
        .bind(serde_json::to_string(&snapshot.eligibility_age)?)
        .bind(serde_json::to_string(&snapshot.eligibility_education)?)
        .bind(serde_json::to_string(&snapshot.eligibility_employment)?)
        .bind(serde_json::to_string(&snapshot.eligibility_ethnicity)?)
        .bind(serde_json::to_string(&snapshot.eligibility_family_status)?)
        .bind(serde_json::to_string(&snapshot.eligibility_financial)?)
        .bind(serde_json::to_string(&snapshot.eligibility_gender)?)
        .bind(serde_json::to_string(&snapshot.eligibility_health)?)
        .bind(serde_json::to_string(&snapshot.eligibility_immigration)?)
        .bind(serde_json::to_string(&snapshot.eligibility_housing)?)
        .bind(serde_json::to_string(&snapshot.eligibility_other)?)
        .bind(serde_json::to_string(&snapshot.eligibility_all)?)
        .bind(&snapshot.embedding_text)
        .bind(&snapshot.text_hash)
        .execute(&mut *tx)
        .await?;

        if progress_every > 0 && (i + 1) % progress_every == 0 {
            println!("  written {}/{} rows", i + 1, snapshots.len());
        }
    }

    let now = chrono::Utc::now().timestamp();
    sqlx::query("INSERT INTO runs (ran_at, rows_written, violations) VALUES (?, ?, ?)")
        .bind(now)
        .bind(snapshots.len() as i64)
        .bind(violations.len() as i64)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(())
}
