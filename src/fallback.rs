//! Service-over-resource fallback resolution for addresses and schedules.
//!
//! Selection is strictly hierarchical: service-level data, if any exists,
//! fully overrides resource-level data. The two levels are never merged.

use crate::models::{Address, Schedule, ScheduleDay};
use crate::view::SourceView;

/// Resolve the address candidates for one service.
///
/// Service-linked addresses fan out one candidate per link; otherwise the
/// owning resource's addresses fan out; otherwise exactly one `None`
/// candidate so the service still emits a row with null address fields.
/// Candidates come back in ascending address-id order.
pub fn address_candidates<'a>(
    service_id: i64,
    resource_id: i64,
    view: &'a SourceView,
) -> Vec<Option<&'a Address>> {
    let mut linked: Vec<&Address> = view
        .service_addresses
        .iter()
        .filter(|sa| sa.service_id == service_id)
        .filter_map(|sa| view.addresses.iter().find(|a| a.id == sa.address_id))
        .collect();

    if linked.is_empty() {
        linked = view
            .addresses
            .iter()
            .filter(|a| a.resource_id == Some(resource_id))
            .collect();
    }

    if linked.is_empty() {
        return vec![None];
    }

    linked.sort_by_key(|a| a.id);
    linked.dedup_by_key(|a| a.id);
    linked.into_iter().map(Some).collect()
}

/// Resolve the schedule for one service, with its day rows in id order.
///
/// Any service-level schedule record, even one with `hours_known = false`,
/// shadows the resource-level schedule completely. The resource schedule
/// applies only when the service has no schedule record at all. All address
/// candidates of a service share this one resolution.
pub fn resolve_schedule<'a>(
    service_id: i64,
    resource_id: i64,
    view: &'a SourceView,
) -> Option<(&'a Schedule, Vec<&'a ScheduleDay>)> {
    let schedule = view
        .schedules
        .iter()
        .find(|s| s.service_id == Some(service_id))
        .or_else(|| {
            view.schedules
                .iter()
                .find(|s| s.service_id.is_none() && s.resource_id == Some(resource_id))
        })?;

    let days: Vec<&ScheduleDay> = view
        .schedule_days
        .iter()
        .filter(|d| d.schedule_id == schedule.id)
        .collect();

    Some((schedule, days))
}
