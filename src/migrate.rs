//! Schema creation for the normalized source tables and the denormalized
//! snapshot table. Every statement is idempotent, so `svcsnap init` is safe
//! to run repeatedly.

use anyhow::Result;

use crate::config::Config;
use crate::db;

pub async fn run_migrations(config: &Config) -> Result<()> {
    let pool = db::connect(config).await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS resources (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            alternate_name TEXT,
            legal_status TEXT,
            short_description TEXT,
            long_description TEXT,
            email TEXT,
            website TEXT,
            status INTEGER NOT NULL DEFAULT 1
        )
        "#,
    )
    .execute(&pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS programs (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            alternate_name TEXT,
            description TEXT
        )
        "#,
    )
    .execute(&pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS services (
            id INTEGER PRIMARY KEY,
            resource_id INTEGER NOT NULL,
            program_id INTEGER,
            name TEXT,
            alternate_name TEXT,
            description TEXT,
            eligibility TEXT,
            application_process TEXT,
            required_documents TEXT,
            fee TEXT,
            wait_time TEXT,
            interpretation_services TEXT,
            email TEXT,
            url TEXT,
            status INTEGER NOT NULL DEFAULT 1,
            verified_at INTEGER,
            updated_at INTEGER,
            FOREIGN KEY (resource_id) REFERENCES resources(id)
        )
        "#,
    )
    .execute(&pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS addresses (
            id INTEGER PRIMARY KEY,
            resource_id INTEGER,
            address_1 TEXT,
            address_2 TEXT,
            city TEXT,
            state_province TEXT,
            postal_code TEXT,
            latitude REAL,
            longitude REAL
        )
        "#,
    )
    .execute(&pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS service_addresses (
            id INTEGER PRIMARY KEY,
            service_id INTEGER NOT NULL,
            address_id INTEGER NOT NULL,
            UNIQUE(service_id, address_id)
        )
        "#,
    )
    .execute(&pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS schedules (
            id INTEGER PRIMARY KEY,
            service_id INTEGER,
            resource_id INTEGER,
            hours_known INTEGER NOT NULL DEFAULT 1,
            CHECK ((service_id IS NULL) != (resource_id IS NULL))
        )
        "#,
    )
    .execute(&pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS schedule_days (
            id INTEGER PRIMARY KEY,
            schedule_id INTEGER NOT NULL,
            day TEXT NOT NULL,
            opens_at INTEGER NOT NULL,
            closes_at INTEGER NOT NULL,
            FOREIGN KEY (schedule_id) REFERENCES schedules(id)
        )
        "#,
    )
    .execute(&pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS categories (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            parent_id INTEGER
        )
        "#,
    )
    .execute(&pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS service_categories (
            id INTEGER PRIMARY KEY,
            service_id INTEGER NOT NULL,
            category_id INTEGER NOT NULL
        )
        "#,
    )
    .execute(&pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS eligibilities (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL
        )
        "#,
    )
    .execute(&pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS service_eligibilities (
            id INTEGER PRIMARY KEY,
            service_id INTEGER NOT NULL,
            eligibility_id INTEGER NOT NULL
        )
        "#,
    )
    .execute(&pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS phones (
            id INTEGER PRIMARY KEY,
            resource_id INTEGER NOT NULL,
            number TEXT NOT NULL
        )
        "#,
    )
    .execute(&pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS instructions (
            id INTEGER PRIMARY KEY,
            service_id INTEGER NOT NULL,
            instruction TEXT NOT NULL
        )
        "#,
    )
    .execute(&pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS service_documents (
            id INTEGER PRIMARY KEY,
            service_id INTEGER NOT NULL,
            document TEXT NOT NULL
        )
        "#,
    )
    .execute(&pool)
    .await?;

    // Array-valued snapshot columns are JSON text; `schedule` carries the
    // exact {day, open_minutes, close_minutes} shape the downstream index
    // filters against. `embedding` stays NULL until the external embedder
    // writes it back, keyed by id and checked against text_hash.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS service_snapshots (
            id TEXT PRIMARY KEY,
            service_id INTEGER NOT NULL,
            resource_id INTEGER NOT NULL,
            program_id INTEGER,
            address_id INTEGER,
            verified_at INTEGER,
            updated_at INTEGER,
            latitude REAL,
            longitude REAL,
            schedule TEXT NOT NULL,
            categories_core_ids TEXT NOT NULL,
            categories_core_names TEXT NOT NULL,
            categories_core_parents TEXT NOT NULL,
            categories_our415_ids TEXT NOT NULL,
            categories_our415_names TEXT NOT NULL,
            categories_sfsg_ids TEXT NOT NULL,
            categories_sfsg_names TEXT NOT NULL,
            categories_ucsf_top_ids TEXT NOT NULL,
            categories_ucsf_top_names TEXT NOT NULL,
            categories_ucsf_sub_ids TEXT NOT NULL,
            categories_ucsf_sub_names TEXT NOT NULL,
            eligibility_age TEXT NOT NULL,
            eligibility_education TEXT NOT NULL,
            eligibility_employment TEXT NOT NULL,
            eligibility_ethnicity TEXT NOT NULL,
            eligibility_family_status TEXT NOT NULL,
            eligibility_financial TEXT NOT NULL,
            eligibility_gender TEXT NOT NULL,
            eligibility_health TEXT NOT NULL,
            eligibility_immigration TEXT NOT NULL,
            eligibility_housing TEXT NOT NULL,
            eligibility_other TEXT NOT NULL,
            eligibility_all TEXT NOT NULL,
            embedding_text TEXT NOT NULL,
            text_hash TEXT NOT NULL,
            embedding BLOB
        )
        "#,
    )
    .execute(&pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS runs (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            ran_at INTEGER NOT NULL,
            rows_written INTEGER NOT NULL,
            violations INTEGER NOT NULL
        )
        "#,
    )
    .execute(&pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_services_resource_id ON services(resource_id)")
        .execute(&pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_addresses_resource_id ON addresses(resource_id)")
        .execute(&pool)
        .await?;
    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_snapshots_service_id ON service_snapshots(service_id)",
    )
    .execute(&pool)
    .await?;
    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_snapshots_resource_id ON service_snapshots(resource_id)",
    )
    .execute(&pool)
    .await?;

    pool.close().await;
    Ok(())
}
