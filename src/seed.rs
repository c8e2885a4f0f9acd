//! Demo dataset for a freshly-initialized database.
//!
//! Seeds a small but representative slice of the source schema: two
//! organizations, service- and resource-level addresses and schedules,
//! categories from multiple namespaces, and eligibility tags that exercise
//! the legacy remap. Inserts use OR REPLACE so reseeding is safe.

use anyhow::Result;

use crate::config::Config;
use crate::db;

pub async fn run_seed(config: &Config) -> Result<()> {
    let pool = db::connect(config).await?;
    let now = chrono::Utc::now().timestamp();

    sqlx::query(
        r#"
        INSERT OR REPLACE INTO resources
            (id, name, alternate_name, legal_status, short_description, long_description, email, website, status)
        VALUES
            (1, 'Hope Center', 'HC', 'Nonprofit', 'Neighborhood support services.',
             'Hope Center offers meals, shelter referrals, and case management in the Mission.',
             'info@hopecenter.org', 'https://hopecenter.org', 1),
            (2, 'Bayview Health Collective', NULL, 'Community clinic', 'Walk-in health services.',
             NULL, 'hello@bayviewhealth.org', 'https://bayviewhealth.org', 1),
            (3, 'Closed Org', NULL, NULL, NULL, NULL, NULL, NULL, 0)
        "#,
    )
    .execute(&pool)
    .await?;

    sqlx::query(
        r#"
        INSERT OR REPLACE INTO programs (id, name, alternate_name, description)
        VALUES (1, 'Food Security', NULL, 'Citywide food access program.')
        "#,
    )
    .execute(&pool)
    .await?;

    sqlx::query(
        r#"
        INSERT OR REPLACE INTO services
            (id, resource_id, program_id, name, alternate_name, description, eligibility,
             application_process, required_documents, fee, wait_time, interpretation_services,
             email, url, status, verified_at, updated_at)
        VALUES
            (10, 1, 1, 'Meal Program', NULL, 'Hot meals served daily.', 'Anyone experiencing food insecurity.',
             'Walk in during open hours.', 'None.', 'Free', NULL, 'Spanish and Cantonese available.',
             'meals@hopecenter.org', NULL, 1, ?1, ?1),
            (11, 1, NULL, 'Shelter Referrals', NULL, 'Same-day referrals to partner shelters.', NULL,
             'Call ahead.', 'Photo ID if available.', NULL, 'Usually under one week.', NULL,
             NULL, NULL, 1, ?1, ?1),
            (12, 2, NULL, 'Drop-In Clinic', NULL, 'Primary care without an appointment.', NULL,
             NULL, NULL, 'Sliding scale', NULL, NULL, NULL, 'https://bayviewhealth.org/clinic', 1, ?1, ?1),
            (13, 3, NULL, 'Inactive Service', NULL, NULL, NULL, NULL, NULL, NULL, NULL, NULL,
             NULL, NULL, 1, ?1, ?1)
        "#,
    )
    .bind(now)
    .execute(&pool)
    .await?;

    sqlx::query(
        r#"
        INSERT OR REPLACE INTO addresses
            (id, resource_id, address_1, address_2, city, state_province, postal_code, latitude, longitude)
        VALUES
            (20, 1, '123 Mission St', NULL, 'San Francisco', 'CA', '94110', 37.7599, -122.4148),
            (21, NULL, '500 Van Ness Ave', 'Suite 2', 'San Francisco', 'CA', '94102', 37.7793, -122.4192),
            (22, NULL, '1800 Third St', NULL, 'San Francisco', 'CA', '94124', 37.7397, -122.3889)
        "#,
    )
    .execute(&pool)
    .await?;

    // Drop-In Clinic links two service-level sites; Hope Center services
    // fall back to the resource address.
    sqlx::query(
        r#"
        INSERT OR REPLACE INTO service_addresses (id, service_id, address_id)
        VALUES (1, 12, 21), (2, 12, 22)
        "#,
    )
    .execute(&pool)
    .await?;

    sqlx::query(
        r#"
        INSERT OR REPLACE INTO schedules (id, service_id, resource_id, hours_known)
        VALUES
            (30, 10, NULL, 1),
            (31, NULL, 1, 1),
            (32, 12, NULL, 0)
        "#,
    )
    .execute(&pool)
    .await?;

    sqlx::query(
        r#"
        INSERT OR REPLACE INTO schedule_days (id, schedule_id, day, opens_at, closes_at)
        VALUES
            (40, 30, 'Monday', 930, 1730),
            (41, 30, 'Wednesday', 930, 1730),
            (42, 31, 'Tuesday', 900, 1700),
            (43, 32, 'Friday', 800, 1200)
        "#,
    )
    .execute(&pool)
    .await?;

    sqlx::query(
        r#"
        INSERT OR REPLACE INTO categories (id, name, parent_id)
        VALUES
            (100, 'Food', NULL),
            (101, 'Free Meals', 100),
            (110, 'Housing', NULL),
            (202, 'Legacy Carve-Out', NULL),
            (357, 'Our415 Family Services', NULL),
            (1000003, 'SFSG Shelter', NULL),
            (2000002, 'UCSF Primary Care', NULL),
            (2100005, 'UCSF Urgent Care', NULL)
        "#,
    )
    .execute(&pool)
    .await?;

    sqlx::query(
        r#"
        INSERT OR REPLACE INTO service_categories (id, service_id, category_id)
        VALUES
            (1, 10, 100), (2, 10, 101), (3, 10, 202), (4, 10, 357),
            (5, 11, 110), (6, 11, 1000003),
            (7, 12, 2000002), (8, 12, 2100005)
        "#,
    )
    .execute(&pool)
    .await?;

    sqlx::query(
        r#"
        INSERT OR REPLACE INTO eligibilities (id, name)
        VALUES
            (1, 'Smoker'),
            (2, 'Drug Users'),
            (3, 'Seniors'),
            (4, 'Homeless Individuals'),
            (5, 'Veterans')
        "#,
    )
    .execute(&pool)
    .await?;

    sqlx::query(
        r#"
        INSERT OR REPLACE INTO service_eligibilities (id, service_id, eligibility_id)
        VALUES
            (1, 10, 1), (2, 10, 2), (3, 10, 3),
            (4, 11, 4), (5, 11, 5)
        "#,
    )
    .execute(&pool)
    .await?;

    sqlx::query(
        r#"
        INSERT OR REPLACE INTO phones (id, resource_id, number)
        VALUES (1, 1, '415-555-0100'), (2, 2, '415-555-0200')
        "#,
    )
    .execute(&pool)
    .await?;

    sqlx::query(
        r#"
        INSERT OR REPLACE INTO instructions (id, service_id, instruction)
        VALUES (1, 10, 'Enter through the Mission St door.')
        "#,
    )
    .execute(&pool)
    .await?;

    sqlx::query(
        r#"
        INSERT OR REPLACE INTO service_documents (id, service_id, document)
        VALUES (1, 11, 'Shelter intake checklist.')
        "#,
    )
    .execute(&pool)
    .await?;

    let resources: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM resources")
        .fetch_one(&pool)
        .await?;
    let services: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM services")
        .fetch_one(&pool)
        .await?;
    println!("seed");
    println!("  resources: {}", resources);
    println!("  services: {}", services);
    println!("ok");

    pool.close().await;
    Ok(())
}
