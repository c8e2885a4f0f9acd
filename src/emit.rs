//! Snapshot emission: the full denormalization pass over one source view.
//!
//! Iterates every active service of every active resource, resolves address
//! candidates and the schedule, aggregates taxonomy and eligibility facts,
//! assembles the prose block, and emits one [`ServiceSnapshot`] per
//! (service, address candidate). The pass is a pure function of the view
//! and the static lookup tables: no I/O, no shared mutable state, and
//! byte-identical output for identical input (row UUIDs aside).

use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::aggregate::{collect_categories, collect_eligibilities};
use crate::eligibility::Tables;
use crate::fallback::{address_candidates, resolve_schedule};
use crate::models::ServiceSnapshot;
use crate::prose::{assemble, ProseInput};
use crate::schedule::{encode, EncodedSchedule, ScheduleViolation};
use crate::taxonomy::CategoryIndex;
use crate::view::SourceView;

/// Result of one materialization pass.
#[derive(Debug, Default)]
pub struct MaterializeOutcome {
    pub snapshots: Vec<ServiceSnapshot>,
    pub violations: Vec<ScheduleViolation>,
    /// Active services with an active resource.
    pub services_seen: u64,
    /// Services dropped because their schedule failed validation.
    pub services_skipped: u64,
}

/// Run the denormalization over one view. Output rows are ordered by
/// resource id, then service id, then address id with nulls last. Every
/// surviving active service contributes at least one row.
pub fn materialize(view: &SourceView, tables: &Tables) -> MaterializeOutcome {
    let index = CategoryIndex::new(&view.categories);
    let mut outcome = MaterializeOutcome::default();

    let mut services: Vec<_> = view.services.iter().filter(|s| s.status).collect();
    services.sort_by_key(|s| (s.resource_id, s.id));

    for service in services {
        // Inner-join semantics: a missing or inactive resource drops the
        // service silently.
        let Some(resource) = view
            .resources
            .iter()
            .find(|r| r.id == service.resource_id && r.status)
        else {
            continue;
        };
        outcome.services_seen += 1;

        let encoded = match resolve_schedule(service.id, resource.id, view) {
            Some((schedule, days)) => match encode(schedule, &days) {
                Ok(encoded) => encoded,
                Err(violation) => {
                    outcome.violations.push(violation);
                    outcome.services_skipped += 1;
                    continue;
                }
            },
            None => EncodedSchedule::default(),
        };

        let categories = collect_categories(service.id, view, &index);
        let eligibility = collect_eligibilities(service.id, view, tables);
        let program = service
            .program_id
            .and_then(|pid| view.programs.iter().find(|p| p.id == pid));

        let phone_numbers: Vec<String> = view
            .phones
            .iter()
            .filter(|p| p.resource_id == resource.id)
            .map(|p| p.number.clone())
            .collect();
        let instructions: Vec<String> = view
            .instructions
            .iter()
            .filter(|i| i.service_id == service.id)
            .map(|i| i.instruction.clone())
            .collect();
        let documents: Vec<String> = view
            .service_documents
            .iter()
            .filter(|d| d.service_id == service.id)
            .map(|d| d.document.clone())
            .collect();

        for candidate in address_candidates(service.id, resource.id, view) {
            let embedding_text = assemble(&ProseInput {
                resource,
                service,
                program,
                categories: &categories,
                eligibility: &eligibility,
                hours_text: encoded.hours_text.as_deref(),
                address: candidate,
                phone_numbers: &phone_numbers,
                instructions: &instructions,
                documents: &documents,
            });
            let text_hash = hash_text(&embedding_text);

            outcome.snapshots.push(ServiceSnapshot {
                id: Uuid::new_v4().to_string(),
                service_id: service.id,
                resource_id: resource.id,
                program_id: service.program_id,
                address_id: candidate.map(|a| a.id),
                verified_at: service.verified_at,
                updated_at: service.updated_at,
                latitude: candidate.and_then(|a| a.latitude),
                longitude: candidate.and_then(|a| a.longitude),
                schedule: encoded.entries.clone(),
                categories_core_ids: categories.core_ids.clone(),
                categories_core_names: categories.core_names.clone(),
                categories_core_parents: categories.core_parents.clone(),
                categories_our415_ids: categories.our415_ids.clone(),
                categories_our415_names: categories.our415_names.clone(),
                categories_sfsg_ids: categories.sfsg_ids.clone(),
                categories_sfsg_names: categories.sfsg_names.clone(),
                categories_ucsf_top_ids: categories.ucsf_top_ids.clone(),
                categories_ucsf_top_names: categories.ucsf_top_names.clone(),
                categories_ucsf_sub_ids: categories.ucsf_sub_ids.clone(),
                categories_ucsf_sub_names: categories.ucsf_sub_names.clone(),
                eligibility_age: eligibility.age.clone(),
                eligibility_education: eligibility.education.clone(),
                eligibility_employment: eligibility.employment.clone(),
                eligibility_ethnicity: eligibility.ethnicity.clone(),
                eligibility_family_status: eligibility.family_status.clone(),
                eligibility_financial: eligibility.financial.clone(),
                eligibility_gender: eligibility.gender.clone(),
                eligibility_health: eligibility.health.clone(),
                eligibility_immigration: eligibility.immigration.clone(),
                eligibility_housing: eligibility.housing.clone(),
                eligibility_other: eligibility.other.clone(),
                eligibility_all: eligibility.all.clone(),
                embedding_text,
                text_hash,
            });
        }
    }

    outcome
        .snapshots
        .sort_by_key(|s| (s.resource_id, s.service_id, s.address_id.unwrap_or(i64::MAX)));
    outcome
}

fn hash_text(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}
