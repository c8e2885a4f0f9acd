//! Per-service aggregation of category and eligibility facts.
//!
//! Category arrays use set semantics: deduplicated within each namespace,
//! emitted in ascending id order (names parallel to ids), with deduplicated
//! non-null parent names captured for the core namespace only. Eligibility
//! arrays are deliberately NOT deduplicated: two raw tags canonicalizing to
//! the same name appear twice, in association order. The asymmetry is a
//! contract with the downstream consumers, not an oversight.

use std::collections::{BTreeMap, BTreeSet};

use crate::eligibility::{Dimension, Tables};
use crate::taxonomy::{CategoryIndex, Namespace};
use crate::view::SourceView;

/// Deduplicated per-namespace category arrays for one service.
#[derive(Debug, Default, Clone)]
pub struct CategoryFacts {
    pub core_ids: Vec<i64>,
    pub core_names: Vec<String>,
    pub core_parents: Vec<String>,
    pub our415_ids: Vec<i64>,
    pub our415_names: Vec<String>,
    pub sfsg_ids: Vec<i64>,
    pub sfsg_names: Vec<String>,
    pub ucsf_top_ids: Vec<i64>,
    pub ucsf_top_names: Vec<String>,
    pub ucsf_sub_ids: Vec<i64>,
    pub ucsf_sub_names: Vec<String>,
}

/// Canonical eligibility names for one service, split by dimension, with
/// duplicates preserved.
#[derive(Debug, Default, Clone)]
pub struct EligibilityFacts {
    pub age: Vec<String>,
    pub education: Vec<String>,
    pub employment: Vec<String>,
    pub ethnicity: Vec<String>,
    pub family_status: Vec<String>,
    pub financial: Vec<String>,
    pub gender: Vec<String>,
    pub health: Vec<String>,
    pub immigration: Vec<String>,
    pub housing: Vec<String>,
    pub other: Vec<String>,
    pub all: Vec<String>,
}

impl EligibilityFacts {
    fn dimension_mut(&mut self, dimension: Dimension) -> &mut Vec<String> {
        match dimension {
            Dimension::Age => &mut self.age,
            Dimension::Education => &mut self.education,
            Dimension::Employment => &mut self.employment,
            Dimension::Ethnicity => &mut self.ethnicity,
            Dimension::FamilyStatus => &mut self.family_status,
            Dimension::Financial => &mut self.financial,
            Dimension::Gender => &mut self.gender,
            Dimension::Health => &mut self.health,
            Dimension::Immigration => &mut self.immigration,
            Dimension::Housing => &mut self.housing,
            Dimension::Other => &mut self.other,
        }
    }
}

/// Collect the deduplicated category arrays for one service. Categories
/// whose id falls outside every namespace are dropped entirely.
pub fn collect_categories(
    service_id: i64,
    view: &SourceView,
    index: &CategoryIndex<'_>,
) -> CategoryFacts {
    // BTreeMap dedups and fixes the id order in one move.
    let mut by_namespace: BTreeMap<i64, (Namespace, String)> = BTreeMap::new();
    let mut core_parents: BTreeSet<String> = BTreeSet::new();

    for link in view
        .service_categories
        .iter()
        .filter(|sc| sc.service_id == service_id)
    {
        let Some(category) = index.get(link.category_id) else {
            continue;
        };
        let Some(namespace) = Namespace::of(category.id) else {
            continue;
        };
        by_namespace.insert(category.id, (namespace, category.name.clone()));
        if namespace == Namespace::Core {
            if let Some(parent) = index.resolve_parent(category) {
                core_parents.insert(parent.to_string());
            }
        }
    }

    let mut facts = CategoryFacts {
        core_parents: core_parents.into_iter().collect(),
        ..Default::default()
    };
    for (id, (namespace, name)) in by_namespace {
        let (ids, names) = match namespace {
            Namespace::Core => (&mut facts.core_ids, &mut facts.core_names),
            Namespace::Our415 => (&mut facts.our415_ids, &mut facts.our415_names),
            Namespace::Sfsg => (&mut facts.sfsg_ids, &mut facts.sfsg_names),
            Namespace::UcsfTop => (&mut facts.ucsf_top_ids, &mut facts.ucsf_top_names),
            Namespace::UcsfSub => (&mut facts.ucsf_sub_ids, &mut facts.ucsf_sub_names),
        };
        ids.push(id);
        names.push(name);
    }
    facts
}

/// Collect the canonical eligibility arrays for one service, in association
/// order, duplicates preserved.
pub fn collect_eligibilities(
    service_id: i64,
    view: &SourceView,
    tables: &Tables,
) -> EligibilityFacts {
    let mut facts = EligibilityFacts::default();

    for link in view
        .service_eligibilities
        .iter()
        .filter(|se| se.service_id == service_id)
    {
        let Some(tag) = view.eligibilities.iter().find(|e| e.id == link.eligibility_id) else {
            continue;
        };
        let canonical = tables.canonicalize(&tag.name).to_string();
        let dimension = tables.bucket(&canonical);
        facts.dimension_mut(dimension).push(canonical.clone());
        facts.all.push(canonical);
    }

    facts
}
