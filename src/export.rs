//! Export the snapshot table as JSON.
//!
//! Produces the full row set, in the emitter's deterministic order, for
//! inspection or for handing to the external embedding collaborator.

use anyhow::Result;
use sqlx::Row;
use std::path::Path;

use crate::config::Config;
use crate::db;
use crate::models::ServiceSnapshot;

/// Export all snapshot rows as pretty-printed JSON.
///
/// If `output` is `Some`, writes to that file path. Otherwise writes to
/// stdout for piping.
pub async fn run_export(config: &Config, output: Option<&Path>) -> Result<()> {
    let pool = db::connect(config).await?;

    let rows = sqlx::query(
        "SELECT * FROM service_snapshots \
         ORDER BY resource_id, service_id, address_id IS NULL, address_id",
    )
    .fetch_all(&pool)
    .await?;

    let mut snapshots: Vec<ServiceSnapshot> = Vec::with_capacity(rows.len());
    for row in &rows {
        snapshots.push(ServiceSnapshot {
            id: row.get("id"),
            service_id: row.get("service_id"),
            resource_id: row.get("resource_id"),
            program_id: row.get("program_id"),
            address_id: row.get("address_id"),
            verified_at: row.get("verified_at"),
            updated_at: row.get("updated_at"),
            latitude: row.get("latitude"),
            longitude: row.get("longitude"),
            schedule: serde_json::from_str(row.get::<&str, _>("schedule"))?,
            categories_core_ids: serde_json::from_str(row.get::<&str, _>("categories_core_ids"))?,
            categories_core_names: serde_json::from_str(
                row.get::<&str, _>("categories_core_names"),
            )?,
            categories_core_parents: serde_json::from_str(
                row.get::<&str, _>("categories_core_parents"),
            )?,
            categories_our415_ids: serde_json::from_str(
                row.get::<&str, _>("categories_our415_ids"),
            )?,
            categories_our415_names: serde_json::from_str(
                row.get::<&str, _>("categories_our415_names"),
            )?,
            categories_sfsg_ids: serde_json::from_str(row.get::<&str, _>("categories_sfsg_ids"))?,
            categories_sfsg_names: serde_json::from_str(
                row.get::<&str, _>("categories_sfsg_names"),
            )?,
            categories_ucsf_top_ids: serde_json::from_str(
                row.get::<&str, _>("categories_ucsf_top_ids"),
            )?,
            categories_ucsf_top_names: serde_json::from_str(
                row.get::<&str, _>("categories_ucsf_top_names"),
            )?,
            categories_ucsf_sub_ids: serde_json::from_str(
                row.get::<&str, _>("categories_ucsf_sub_ids"),
            )?,
            categories_ucsf_sub_names: serde_json::from_str(
                row.get::<&str, _>("categories_ucsf_sub_names"),
            )?,
            eligibility_age: serde_json::from_str(row.get::<&str, _>("eligibility_age"))?,
            eligibility_education: serde_json::from_str(
                row.get::<&str, _>("eligibility_education"),
            )?,
            eligibility_employment: serde_json::from_str(
                row.get::<&str, _>("eligibility_employment"),
            )?,
            eligibility_ethnicity: serde_json::from_str(
                row.get::<&str, _>("eligibility_ethnicity"),
            )?,
            eligibility_family_status: serde_json::from_str(
                row.get::<&str, _>("eligibility_family_status"),
            )?,
            eligibility_financial: serde_json::from_str(
                row.get::<&str, _>("eligibility_financial"),
            )?,
            eligibility_gender: serde_json::from_str(row.get::<&str, _>("eligibility_gender"))?,
            eligibility_health: serde_json::from_str(row.get::<&str, _>("eligibility_health"))?,
            eligibility_immigration: serde_json::from_str(
                row.get::<&str, _>("eligibility_immigration"),
            )?,
            eligibility_housing: serde_json::from_str(row.get::<&str, _>("eligibility_housing"))?,
            eligibility_other: serde_json::from_str(row.get::<&str, _>("eligibility_other"))?,
            eligibility_all: serde_json::from_str(row.get::<&str, _>("eligibility_all"))?,
            embedding_text: row.get("embedding_text"),
            text_hash: row.get("text_hash"),
        });
    }

    let json = serde_json::to_string_pretty(&snapshots)?;
    match output {
        Some(path) => {
            std::fs::write(path, &json)?;
            println!("exported {} rows to {}", snapshots.len(), path.display());
        }
        None => println!("{}", json),
    }

    pool.close().await;
    Ok(())
}
