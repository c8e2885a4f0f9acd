//! Category namespace classification and single-hop parent resolution.
//!
//! The taxonomy partitions category ids into five disjoint numeric
//! namespaces: the core taxonomy plus four white-label scopes. Ids outside
//! every range belong to no namespace and are dropped from all outputs.

use std::collections::HashMap;

use crate::models::Category;

/// One of the five disjoint category namespaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    Core,
    Our415,
    Sfsg,
    UcsfTop,
    UcsfSub,
}

impl Namespace {
    /// Classify a category id. Returns `None` for ids outside every range;
    /// such categories are excluded from every output array.
    ///
    /// Id 202 and the 356–362 block are carved out of the core range: 202
    /// belongs to no namespace, 356–362 is the OUR415 scope.
    pub fn of(id: i64) -> Option<Namespace> {
        match id {
            202 => None,
            356..=362 => Some(Namespace::Our415),
            0..=399 => Some(Namespace::Core),
            1_000_001..=1_000_012 => Some(Namespace::Sfsg),
            2_000_001..=2_000_006 => Some(Namespace::UcsfTop),
            2_100_001..=2_100_016 => Some(Namespace::UcsfSub),
            _ => None,
        }
    }
}

/// Category lookup by id, built once per run from the source view.
#[derive(Debug, Default)]
pub struct CategoryIndex<'a> {
    by_id: HashMap<i64, &'a Category>,
}

impl<'a> CategoryIndex<'a> {
    pub fn new(categories: &'a [Category]) -> Self {
        Self {
            by_id: categories.iter().map(|c| (c.id, c)).collect(),
        }
    }

    pub fn get(&self, id: i64) -> Option<&'a Category> {
        self.by_id.get(&id).copied()
    }

    /// Resolve the immediate parent's name, only when the parent falls in
    /// the same namespace as the child. Single hop; never a transitive walk
    /// to the taxonomy root.
    pub fn resolve_parent(&self, category: &Category) -> Option<&'a str> {
        let child_ns = Namespace::of(category.id)?;
        let parent = self.get(category.parent_id?)?;
        if Namespace::of(parent.id) == Some(child_ns) {
            Some(parent.name.as_str())
        } else {
            None
        }
    }
}
