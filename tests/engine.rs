//! Pure-engine tests over in-memory fixtures: the denormalization pass with
//! no database involved.

use service_snapshots::eligibility::Tables;
use service_snapshots::emit::materialize;
use service_snapshots::models::{
    Address, Category, Eligibility, Program, Resource, Schedule, ScheduleDay, Service,
    ServiceAddress, ServiceCategory, ServiceEligibility,
};
use service_snapshots::view::SourceView;

fn resource(id: i64, name: &str) -> Resource {
    Resource {
        id,
        name: name.to_string(),
        status: true,
        ..Default::default()
    }
}

fn service(id: i64, resource_id: i64, name: &str) -> Service {
    Service {
        id,
        resource_id,
        name: Some(name.to_string()),
        status: true,
        ..Default::default()
    }
}

#[test]
fn fan_out_cardinality_properties() {
    // n >= 1 linked addresses -> exactly n rows; 0 linked but m >= 1
    // resource addresses -> exactly m rows; nothing anywhere -> exactly 1
    // row with null address fields.
    for n in 1..=4 {
        let mut view = SourceView {
            resources: vec![resource(1, "Org")],
            services: vec![service(10, 1, "S")],
            ..Default::default()
        };
        for i in 0..n {
            view.addresses.push(Address { id: 100 + i, ..Default::default() });
            view.service_addresses.push(ServiceAddress {
                id: i + 1,
                service_id: 10,
                address_id: 100 + i,
            });
        }
        let outcome = materialize(&view, &Tables::new());
        assert_eq!(outcome.snapshots.len(), n as usize);
    }

    for m in 1..=3 {
        let mut view = SourceView {
            resources: vec![resource(1, "Org")],
            services: vec![service(10, 1, "S")],
            ..Default::default()
        };
        for i in 0..m {
            view.addresses.push(Address {
                id: 200 + i,
                resource_id: Some(1),
                ..Default::default()
            });
        }
        let outcome = materialize(&view, &Tables::new());
        assert_eq!(outcome.snapshots.len(), m as usize);
    }

    let view = SourceView {
        resources: vec![resource(1, "Org")],
        services: vec![service(10, 1, "S")],
        ..Default::default()
    };
    let outcome = materialize(&view, &Tables::new());
    assert_eq!(outcome.snapshots.len(), 1);
    assert_eq!(outcome.snapshots[0].address_id, None);
    assert_eq!(outcome.snapshots[0].latitude, None);
    assert_eq!(outcome.snapshots[0].longitude, None);
}

#[test]
fn schedule_precedence_over_fan_out() {
    // A service schedule, even hours-unknown, shadows the resource schedule
    // on every fan-out row.
    let view = SourceView {
        resources: vec![resource(1, "Org")],
        services: vec![service(10, 1, "S")],
        addresses: vec![
            Address { id: 5, resource_id: Some(1), ..Default::default() },
            Address { id: 6, resource_id: Some(1), ..Default::default() },
        ],
        schedules: vec![
            Schedule { id: 1, service_id: None, resource_id: Some(1), hours_known: true },
            Schedule { id: 2, service_id: Some(10), resource_id: None, hours_known: false },
        ],
        schedule_days: vec![ScheduleDay {
            id: 1,
            schedule_id: 1,
            day: "Monday".to_string(),
            opens_at: 900,
            closes_at: 1700,
        }],
        ..Default::default()
    };
    let outcome = materialize(&view, &Tables::new());
    assert_eq!(outcome.snapshots.len(), 2);
    for row in &outcome.snapshots {
        assert!(row.schedule.is_empty(), "resource schedule leaked through");
        assert!(row.embedding_text.contains("Hours: Call to confirm hours."));
        assert!(!row.embedding_text.contains("Monday"));
    }
}

#[test]
fn full_pipeline_multi_org() {
    let view = SourceView {
        resources: vec![resource(1, "Hope Center"), resource(2, "Bayview Health")],
        programs: vec![Program {
            id: 1,
            name: "Food Security".to_string(),
            description: Some("Citywide food access.".to_string()),
            ..Default::default()
        }],
        services: vec![
            Service {
                program_id: Some(1),
                eligibility: Some("Anyone experiencing food insecurity.".to_string()),
                fee: Some("Free".to_string()),
                ..service(10, 1, "Meal Program")
            },
            service(20, 2, "Drop-In Clinic"),
        ],
        addresses: vec![Address {
            id: 30,
            resource_id: Some(1),
            address_1: Some("123 Mission St".to_string()),
            city: Some("San Francisco".to_string()),
            state_province: Some("CA".to_string()),
            postal_code: Some("94110".to_string()),
            latitude: Some(37.7599),
            longitude: Some(-122.4148),
            ..Default::default()
        }],
        schedules: vec![Schedule {
            id: 1,
            service_id: Some(10),
            resource_id: None,
            hours_known: true,
        }],
        schedule_days: vec![
            ScheduleDay {
                id: 1,
                schedule_id: 1,
                day: "Friday".to_string(),
                opens_at: 930,
                closes_at: 1730,
            },
            ScheduleDay {
                id: 2,
                schedule_id: 1,
                day: "Monday".to_string(),
                opens_at: 930,
                closes_at: 1730,
            },
        ],
        categories: vec![
            Category { id: 100, name: "Food".to_string(), parent_id: None },
            Category { id: 101, name: "Free Meals".to_string(), parent_id: Some(100) },
            Category { id: 2_000_002, name: "Primary Care".to_string(), parent_id: None },
        ],
        service_categories: vec![
            ServiceCategory { id: 1, service_id: 10, category_id: 101 },
            ServiceCategory { id: 2, service_id: 10, category_id: 100 },
            ServiceCategory { id: 3, service_id: 20, category_id: 2_000_002 },
        ],
        eligibilities: vec![
            Eligibility { id: 1, name: "Smoker".to_string() },
            Eligibility { id: 2, name: "Seniors".to_string() },
        ],
        service_eligibilities: vec![
            ServiceEligibility { id: 1, service_id: 10, eligibility_id: 1 },
            ServiceEligibility { id: 2, service_id: 10, eligibility_id: 2 },
        ],
        ..Default::default()
    };

    let outcome = materialize(&view, &Tables::new());
    assert_eq!(outcome.snapshots.len(), 2);
    assert!(outcome.violations.is_empty());

    let meal = &outcome.snapshots[0];
    assert_eq!(meal.service_id, 10);
    assert_eq!(meal.address_id, Some(30));
    assert_eq!(meal.latitude, Some(37.7599));
    assert_eq!(meal.program_id, Some(1));
    // Weekday ordering, not insertion ordering.
    assert_eq!(meal.schedule[0].day, "Monday");
    assert_eq!(meal.schedule[1].day, "Friday");
    assert_eq!(meal.categories_core_ids, vec![100, 101]);
    assert_eq!(meal.categories_core_parents, vec!["Food".to_string()]);
    assert_eq!(meal.eligibility_health, vec!["Substance Dependency".to_string()]);
    assert_eq!(meal.eligibility_age, vec!["Seniors".to_string()]);
    assert!(meal.embedding_text.contains("Program: Food Security. Citywide food access."));
    assert!(meal.embedding_text.contains("Categories: Food, Free Meals."));
    assert!(meal.embedding_text.contains("Serves: Substance Dependency, Seniors."));
    assert!(meal.embedding_text.contains("Fees: Free"));

    let clinic = &outcome.snapshots[1];
    assert_eq!(clinic.service_id, 20);
    assert_eq!(clinic.address_id, None);
    assert_eq!(clinic.categories_ucsf_top_ids, vec![2_000_002]);
    assert!(clinic.schedule.is_empty());
    // Sparse service: only identity and category clauses survive, with no
    // stray punctuation or double spaces.
    assert_eq!(
        clinic.embedding_text,
        "Bayview Health. Service: Drop-In Clinic. Categories: Primary Care."
    );
}

#[test]
fn text_hash_tracks_embedding_text() {
    let view = SourceView {
        resources: vec![resource(1, "Org A"), resource(2, "Org B")],
        services: vec![service(10, 1, "S"), service(20, 2, "S")],
        ..Default::default()
    };
    let outcome = materialize(&view, &Tables::new());
    assert_eq!(outcome.snapshots.len(), 2);
    // Same service name under different orgs: different text, different hash.
    assert_ne!(outcome.snapshots[0].embedding_text, outcome.snapshots[1].embedding_text);
    assert_ne!(outcome.snapshots[0].text_hash, outcome.snapshots[1].text_hash);
    assert_eq!(outcome.snapshots[0].text_hash.len(), 64);
}
