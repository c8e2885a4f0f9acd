//! Point-in-time source view.
//!
//! One materialization run operates on a single immutable [`SourceView`]:
//! every source table is read once, up front, and the engine never touches
//! the database again until the final write. This makes the transform a pure
//! function over the view, so tests can construct views directly in memory.

use anyhow::Result;
use sqlx::{Row, SqlitePool};

use crate::models::{
    Address, Category, Eligibility, Instruction, Phone, Program, Resource, Schedule, ScheduleDay,
    Service, ServiceAddress, ServiceCategory, ServiceDocument, ServiceEligibility,
};

/// An immutable copy of all source tables.
#[derive(Debug, Default)]
pub struct SourceView {
    pub resources: Vec<Resource>,
    pub programs: Vec<Program>,
    pub services: Vec<Service>,
    pub addresses: Vec<Address>,
    pub service_addresses: Vec<ServiceAddress>,
    pub schedules: Vec<Schedule>,
    pub schedule_days: Vec<ScheduleDay>,
    pub categories: Vec<Category>,
    pub service_categories: Vec<ServiceCategory>,
    pub eligibilities: Vec<Eligibility>,
    pub service_eligibilities: Vec<ServiceEligibility>,
    pub phones: Vec<Phone>,
    pub instructions: Vec<Instruction>,
    pub service_documents: Vec<ServiceDocument>,
}

/// Bulk-read every source table into memory, each ordered by id so the view
/// itself is deterministic.
pub async fn load(pool: &SqlitePool) -> Result<SourceView> {
    let mut view = SourceView::default();

    for row in sqlx::query(
        "SELECT id, name, alternate_name, legal_status, short_description, long_description, \
         email, website, status FROM resources ORDER BY id",
    )
    .fetch_all(pool)
    .await?
    {
        view.resources.push(Resource {
            id: row.get("id"),
            name: row.get("name"),
            alternate_name: row.get("alternate_name"),
            legal_status: row.get("legal_status"),
            short_description: row.get("short_description"),
            long_description: row.get("long_description"),
            email: row.get("email"),
            website: row.get("website"),
            status: row.get("status"),
        });
    }

    for row in sqlx::query("SELECT id, name, alternate_name, description FROM programs ORDER BY id")
        .fetch_all(pool)
        .await?
    {
        view.programs.push(Program {
            id: row.get("id"),
            name: row.get("name"),
            alternate_name: row.get("alternate_name"),
            description: row.get("description"),
        });
    }

    for row in sqlx::query(
        "SELECT id, resource_id, program_id, name, alternate_name, description, eligibility, \
         application_process, required_documents, fee, wait_time, interpretation_services, \
         email, url, status, verified_at, updated_at FROM services ORDER BY id",
    )
    .fetch_all(pool)
    .await?
    {
        view.services.push(Service {
            id: row.get("id"),
            resource_id: row.get("resource_id"),
            program_id: row.get("program_id"),
            name: row.get("name"),
            alternate_name: row.get("alternate_name"),
            description: row.get("description"),
            eligibility: row.get("eligibility"),
            application_process: row.get("application_process"),
            required_documents: row.get("required_documents"),
            fee: row.get("fee"),
            wait_time: row.get("wait_time"),
            interpretation_services: row.get("interpretation_services"),
            email: row.get("email"),
            url: row.get("url"),
            status: row.get("status"),
            verified_at: row.get("verified_at"),
            updated_at: row.get("updated_at"),
        });
    }

    for row in sqlx::query(
        "SELECT id, resource_id, address_1, address_2, city, state_province, postal_code, \
         latitude, longitude FROM addresses ORDER BY id",
    )
    .fetch_all(pool)
    .await?
    {
        view.addresses.push(Address {
            id: row.get("id"),
            resource_id: row.get("resource_id"),
            address_1: row.get("address_1"),
            address_2: row.get("address_2"),
            city: row.get("city"),
            state_province: row.get("state_province"),
            postal_code: row.get("postal_code"),
            latitude: row.get("latitude"),
            longitude: row.get("longitude"),
        });
    }

    for row in
        sqlx::query("SELECT id, service_id, address_id FROM service_addresses ORDER BY id")
            .fetch_all(pool)
            .await?
    {
        view.service_addresses.push(ServiceAddress {
            id: row.get("id"),
            service_id: row.get("service_id"),
            address_id: row.get("address_id"),
        });
    }

    for row in
        sqlx::query("SELECT id, service_id, resource_id, hours_known FROM schedules ORDER BY id")
            .fetch_all(pool)
            .await?
    {
        view.schedules.push(Schedule {
            id: row.get("id"),
            service_id: row.get("service_id"),
            resource_id: row.get("resource_id"),
            hours_known: row.get("hours_known"),
        });
    }

    for row in sqlx::query(
        "SELECT id, schedule_id, day, opens_at, closes_at FROM schedule_days ORDER BY id",
    )
    .fetch_all(pool)
    .await?
    {
        view.schedule_days.push(ScheduleDay {
            id: row.get("id"),
            schedule_id: row.get("schedule_id"),
            day: row.get("day"),
            opens_at: row.get("opens_at"),
            closes_at: row.get("closes_at"),
        });
    }

    for row in sqlx::query("SELECT id, name, parent_id FROM categories ORDER BY id")
        .fetch_all(pool)
        .await?
    {
        view.categories.push(Category {
            id: row.get("id"),
            name: row.get("name"),
            parent_id: row.get("parent_id"),
        });
    }

    for row in
        sqlx::query("SELECT id, service_id, category_id FROM service_categories ORDER BY id")
            .fetch_all(pool)
            .await?
    {
        view.service_categories.push(ServiceCategory {
            id: row.get("id"),
            service_id: row.get("service_id"),
            category_id: row.get("category_id"),
        });
    }

    for row in sqlx::query("SELECT id, name FROM eligibilities ORDER BY id")
        .fetch_all(pool)
        .await?
    {
        view.eligibilities.push(Eligibility {
            id: row.get("id"),
            name: row.get("name"),
        });
    }

    for row in
        sqlx::query("SELECT id, service_id, eligibility_id FROM service_eligibilities ORDER BY id")
            .fetch_all(pool)
            .await?
    {
        view.service_eligibilities.push(ServiceEligibility {
            id: row.get("id"),
            service_id: row.get("service_id"),
            eligibility_id: row.get("eligibility_id"),
        });
    }

    for row in sqlx::query("SELECT id, resource_id, number FROM phones ORDER BY id")
        .fetch_all(pool)
        .await?
    {
        view.phones.push(Phone {
            id: row.get("id"),
            resource_id: row.get("resource_id"),
            number: row.get("number"),
        });
    }

    for row in sqlx::query("SELECT id, service_id, instruction FROM instructions ORDER BY id")
        .fetch_all(pool)
        .await?
    {
        view.instructions.push(Instruction {
            id: row.get("id"),
            service_id: row.get("service_id"),
            instruction: row.get("instruction"),
        });
    }

    for row in sqlx::query("SELECT id, service_id, document FROM service_documents ORDER BY id")
        .fetch_all(pool)
        .await?
    {
        view.service_documents.push(ServiceDocument {
            id: row.get("id"),
            service_id: row.get("service_id"),
            document: row.get("document"),
        });
    }

    Ok(view)
}
