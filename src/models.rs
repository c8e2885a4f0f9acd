//! Core data models for the snapshot engine.
//!
//! These types mirror the normalized relational schema (resources, services,
//! addresses, schedules, taxonomy, eligibility) plus the denormalized
//! [`ServiceSnapshot`] row the engine emits.

use serde::{Deserialize, Serialize};

/// An organization that owns services, fallback addresses, and phones.
#[derive(Debug, Clone, Default)]
pub struct Resource {
    pub id: i64,
    pub name: String,
    pub alternate_name: Option<String>,
    pub legal_status: Option<String>,
    pub short_description: Option<String>,
    pub long_description: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub status: bool,
}

/// Optional grouping referenced by a service.
#[derive(Debug, Clone, Default)]
pub struct Program {
    pub id: i64,
    pub name: String,
    pub alternate_name: Option<String>,
    pub description: Option<String>,
}

/// A specific offering provided by a resource. The unit snapshots are built
/// around.
#[derive(Debug, Clone, Default)]
pub struct Service {
    pub id: i64,
    pub resource_id: i64,
    pub program_id: Option<i64>,
    pub name: Option<String>,
    pub alternate_name: Option<String>,
    pub description: Option<String>,
    pub eligibility: Option<String>,
    pub application_process: Option<String>,
    pub required_documents: Option<String>,
    pub fee: Option<String>,
    pub wait_time: Option<String>,
    pub interpretation_services: Option<String>,
    pub email: Option<String>,
    pub url: Option<String>,
    pub status: bool,
    pub verified_at: Option<i64>,
    pub updated_at: Option<i64>,
}

/// A street address, owned by a resource or linked to services via
/// [`ServiceAddress`].
#[derive(Debug, Clone, Default)]
pub struct Address {
    pub id: i64,
    pub resource_id: Option<i64>,
    pub address_1: Option<String>,
    pub address_2: Option<String>,
    pub city: Option<String>,
    pub state_province: Option<String>,
    pub postal_code: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Many-to-many link between services and addresses.
#[derive(Debug, Clone, Default)]
pub struct ServiceAddress {
    pub id: i64,
    pub service_id: i64,
    pub address_id: i64,
}

/// A schedule owned by exactly one service or one resource (never both).
/// Day rows live in [`ScheduleDay`].
#[derive(Debug, Clone, Default)]
pub struct Schedule {
    pub id: i64,
    pub service_id: Option<i64>,
    pub resource_id: Option<i64>,
    pub hours_known: bool,
}

/// One open/close span for one weekday, with times as HHMM integer codes
/// (930 = 09:30, 1730 = 17:30).
#[derive(Debug, Clone, Default)]
pub struct ScheduleDay {
    pub id: i64,
    pub schedule_id: i64,
    pub day: String,
    pub opens_at: i64,
    pub closes_at: i64,
}

/// A taxonomy category with an optional single-level parent.
#[derive(Debug, Clone, Default)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub parent_id: Option<i64>,
}

/// Many-to-many link between services and categories.
#[derive(Debug, Clone, Default)]
pub struct ServiceCategory {
    pub id: i64,
    pub service_id: i64,
    pub category_id: i64,
}

/// A raw eligibility tag. Canonicalization and bucketing are pure functions
/// over `name`, not stored state.
#[derive(Debug, Clone, Default)]
pub struct Eligibility {
    pub id: i64,
    pub name: String,
}

/// Many-to-many link between services and eligibility tags. Association
/// order (by id) is the order tags appear in snapshot arrays.
#[derive(Debug, Clone, Default)]
pub struct ServiceEligibility {
    pub id: i64,
    pub service_id: i64,
    pub eligibility_id: i64,
}

/// A phone number owned by a resource.
#[derive(Debug, Clone, Default)]
pub struct Phone {
    pub id: i64,
    pub resource_id: i64,
    pub number: String,
}

/// Free-text instruction owned by a service, ordered by id.
#[derive(Debug, Clone, Default)]
pub struct Instruction {
    pub id: i64,
    pub service_id: i64,
    pub instruction: String,
}

/// Free-text related document owned by a service, ordered by id.
#[derive(Debug, Clone, Default)]
pub struct ServiceDocument {
    pub id: i64,
    pub service_id: i64,
    pub document: String,
}

/// One structured open span in a snapshot's schedule array. This exact shape
/// is a contract with the downstream vector-search index, which answers
/// "open at time T on day D" against it without re-parsing text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub day: String,
    pub open_minutes: i64,
    pub close_minutes: i64,
}

/// One denormalized, embedding-ready output row for a (service, resolved
/// address) pair. `embedding` is always absent at emission time; an external
/// collaborator fills it in later, keyed by `id` and checked against
/// `text_hash` for staleness.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceSnapshot {
    pub id: String,
    pub service_id: i64,
    pub resource_id: i64,
    pub program_id: Option<i64>,
    pub address_id: Option<i64>,
    pub verified_at: Option<i64>,
    pub updated_at: Option<i64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub schedule: Vec<ScheduleEntry>,
    pub categories_core_ids: Vec<i64>,
    pub categories_core_names: Vec<String>,
    pub categories_core_parents: Vec<String>,
    pub categories_our415_ids: Vec<i64>,
    pub categories_our415_names: Vec<String>,
    pub categories_sfsg_ids: Vec<i64>,
    pub categories_sfsg_names: Vec<String>,
    pub categories_ucsf_top_ids: Vec<i64>,
    pub categories_ucsf_top_names: Vec<String>,
    pub categories_ucsf_sub_ids: Vec<i64>,
    pub categories_ucsf_sub_names: Vec<String>,
    pub eligibility_age: Vec<String>,
    pub eligibility_education: Vec<String>,
    pub eligibility_employment: Vec<String>,
    pub eligibility_ethnicity: Vec<String>,
    pub eligibility_family_status: Vec<String>,
    pub eligibility_financial: Vec<String>,
    pub eligibility_gender: Vec<String>,
    pub eligibility_health: Vec<String>,
    pub eligibility_immigration: Vec<String>,
    pub eligibility_housing: Vec<String>,
    pub eligibility_other: Vec<String>,
    pub eligibility_all: Vec<String>,
    pub embedding_text: String,
    pub text_hash: String,
}
