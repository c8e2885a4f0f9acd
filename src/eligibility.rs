//! Eligibility tag canonicalization and dimension bucketing.
//!
//! Raw tag names pass through a fixed legacy→canonical remap (identity for
//! unmapped names), then land in exactly one of eleven [`Dimension`]s via a
//! fixed catalog. Both lookups are pure and total: unknown names survive
//! canonicalization unchanged and bucket to [`Dimension::Other`].
//!
//! The tables are built once into an immutable [`Tables`] value and passed
//! by reference wherever tags are processed, so there is no global mutable
//! state to coordinate across workers.

use std::collections::HashMap;

/// The eleven demographic/need dimensions every eligibility tag buckets into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Age,
    Education,
    Employment,
    Ethnicity,
    FamilyStatus,
    Financial,
    Gender,
    Health,
    Immigration,
    Housing,
    Other,
}

impl Dimension {
    pub const ALL: [Dimension; 11] = [
        Dimension::Age,
        Dimension::Education,
        Dimension::Employment,
        Dimension::Ethnicity,
        Dimension::FamilyStatus,
        Dimension::Financial,
        Dimension::Gender,
        Dimension::Health,
        Dimension::Immigration,
        Dimension::Housing,
        Dimension::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::Age => "age",
            Dimension::Education => "education",
            Dimension::Employment => "employment",
            Dimension::Ethnicity => "ethnicity",
            Dimension::FamilyStatus => "family_status",
            Dimension::Financial => "financial",
            Dimension::Gender => "gender",
            Dimension::Health => "health",
            Dimension::Immigration => "immigration",
            Dimension::Housing => "housing",
            Dimension::Other => "other",
        }
    }
}

/// Legacy→canonical tag remaps: synonyms, merges, and renamed tags.
/// No target may itself appear as a source (canonicalization is idempotent);
/// `tables_are_idempotent` enforces this.
const REMAP: &[(&str, &str)] = &[
    ("Smoker", "Substance Dependency"),
    ("Smokers", "Substance Dependency"),
    ("Drug Users", "Substance Dependency"),
    ("Alcoholics", "Alcohol Dependency"),
    ("Mentally Ill", "Mental Health Challenges"),
    ("Disabled", "People with Disabilities"),
    ("Handicapped", "People with Disabilities"),
    ("Blind", "Visually Impaired"),
    ("Deaf", "Deaf or Hard of Hearing"),
    ("Hearing Impaired", "Deaf or Hard of Hearing"),
    ("HIV Positive", "HIV/AIDS"),
    ("Elderly", "Seniors"),
    ("Senior Citizens", "Seniors"),
    ("Kids", "Children"),
    ("Teenagers", "Teens"),
    ("Adolescents", "Teens"),
    ("Transitional Aged Youth", "Young Adults"),
    ("Pregnant Women", "Expectant Parents"),
    ("Expecting Mothers", "Expectant Parents"),
    ("Single Mothers", "Single Parents"),
    ("Single Fathers", "Single Parents"),
    ("Battered Women", "Survivors of Domestic Violence"),
    ("Domestic Violence Survivors", "Survivors of Domestic Violence"),
    ("Illegal Immigrants", "Undocumented People"),
    ("Non-English Speakers", "Limited English Speakers"),
    ("ESL Speakers", "Limited English Speakers"),
    ("Homeless Individuals", "Homeless"),
    ("Street Homeless", "Unsheltered"),
    ("Ex-Offenders", "Formerly Incarcerated"),
    ("Parolees", "Justice Involved"),
    ("Food Stamp Recipients", "CalFresh Recipients"),
];

/// Canonical name → dimension catalog. Names absent from this table bucket
/// to `Other`.
const CATALOG: &[(&str, Dimension)] = &[
    // age
    ("Infants", Dimension::Age),
    ("Children", Dimension::Age),
    ("Teens", Dimension::Age),
    ("Young Adults", Dimension::Age),
    ("Adults", Dimension::Age),
    ("Older Adults", Dimension::Age),
    ("Seniors", Dimension::Age),
    ("Youth", Dimension::Age),
    // education
    ("Students", Dimension::Education),
    ("College Students", Dimension::Education),
    ("Graduate Students", Dimension::Education),
    ("Out-of-School Youth", Dimension::Education),
    ("Adult Learners", Dimension::Education),
    ("GED Candidates", Dimension::Education),
    ("Truant Youth", Dimension::Education),
    // employment
    ("Unemployed", Dimension::Employment),
    ("Underemployed", Dimension::Employment),
    ("Job Seekers", Dimension::Employment),
    ("Day Laborers", Dimension::Employment),
    ("Gig Workers", Dimension::Employment),
    ("Dislocated Workers", Dimension::Employment),
    ("Entrepreneurs", Dimension::Employment),
    // ethnicity
    ("African American", Dimension::Ethnicity),
    ("Asian", Dimension::Ethnicity),
    ("Pacific Islander", Dimension::Ethnicity),
    ("Latinx", Dimension::Ethnicity),
    ("Native American", Dimension::Ethnicity),
    ("Middle Eastern", Dimension::Ethnicity),
    // family_status
    ("Families", Dimension::FamilyStatus),
    ("Families with Children", Dimension::FamilyStatus),
    ("Single Parents", Dimension::FamilyStatus),
    ("Expectant Parents", Dimension::FamilyStatus),
    ("New Parents", Dimension::FamilyStatus),
    ("Foster Youth", Dimension::FamilyStatus),
    ("Former Foster Youth", Dimension::FamilyStatus),
    ("Caregivers", Dimension::FamilyStatus),
    ("Survivors of Domestic Violence", Dimension::FamilyStatus),
    // financial
    ("Low Income", Dimension::Financial),
    ("Very Low Income", Dimension::Financial),
    ("No Income", Dimension::Financial),
    ("Uninsured", Dimension::Financial),
    ("Underinsured", Dimension::Financial),
    ("CalFresh Recipients", Dimension::Financial),
    ("Medi-Cal Recipients", Dimension::Financial),
    ("SSI Recipients", Dimension::Financial),
    ("Public Benefit Recipients", Dimension::Financial),
    // gender
    ("Women", Dimension::Gender),
    ("Men", Dimension::Gender),
    ("Transgender People", Dimension::Gender),
    ("Non-Binary People", Dimension::Gender),
    ("LGBTQ+", Dimension::Gender),
    // health
    ("Substance Dependency", Dimension::Health),
    ("Alcohol Dependency", Dimension::Health),
    ("Mental Health Challenges", Dimension::Health),
    ("People with Disabilities", Dimension::Health),
    ("Developmental Disabilities", Dimension::Health),
    ("Physical Disabilities", Dimension::Health),
    ("Visually Impaired", Dimension::Health),
    ("Deaf or Hard of Hearing", Dimension::Health),
    ("HIV/AIDS", Dimension::Health),
    ("Chronic Illness", Dimension::Health),
    ("Terminal Illness", Dimension::Health),
    // immigration
    ("Immigrants", Dimension::Immigration),
    ("Refugees", Dimension::Immigration),
    ("Asylum Seekers", Dimension::Immigration),
    ("Undocumented People", Dimension::Immigration),
    ("Limited English Speakers", Dimension::Immigration),
    // housing
    ("Homeless", Dimension::Housing),
    ("At Risk of Homelessness", Dimension::Housing),
    ("Unsheltered", Dimension::Housing),
    ("Renters", Dimension::Housing),
    ("Recently Evicted", Dimension::Housing),
    ("Public Housing Residents", Dimension::Housing),
    ("Transitional Housing Residents", Dimension::Housing),
    ("First-Time Homebuyers", Dimension::Housing),
    // other (explicitly cataloged, beyond the unknown-name catch-all)
    ("Veterans", Dimension::Other),
    ("Active Duty Military", Dimension::Other),
    ("Military Families", Dimension::Other),
    ("Formerly Incarcerated", Dimension::Other),
    ("Justice Involved", Dimension::Other),
    ("Survivors of Human Trafficking", Dimension::Other),
    ("Low Literacy", Dimension::Other),
    ("Anyone in Need", Dimension::Other),
];

/// Immutable lookup tables, built once per run and shared by reference.
#[derive(Debug)]
pub struct Tables {
    remap: HashMap<&'static str, &'static str>,
    buckets: HashMap<&'static str, Dimension>,
}

impl Tables {
    pub fn new() -> Self {
        Self {
            remap: REMAP.iter().copied().collect(),
            buckets: CATALOG.iter().copied().collect(),
        }
    }

    /// Map a raw tag name to its canonical form. Identity for unmapped names.
    pub fn canonicalize<'a>(&'a self, raw: &'a str) -> &'a str {
        self.remap.get(raw).copied().unwrap_or(raw)
    }

    /// Assign a canonical name to its dimension. Names outside the catalog
    /// land in `Other`.
    pub fn bucket(&self, canonical: &str) -> Dimension {
        self.buckets
            .get(canonical)
            .copied()
            .unwrap_or(Dimension::Other)
    }
}

impl Default for Tables {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonicalize_mapped_and_unmapped() {
        let tables = Tables::new();
        assert_eq!(tables.canonicalize("Smoker"), "Substance Dependency");
        assert_eq!(tables.canonicalize("Veterans"), "Veterans");
        assert_eq!(tables.canonicalize("Completely Unknown"), "Completely Unknown");
        assert_eq!(tables.canonicalize(""), "");
    }

    #[test]
    fn tables_are_idempotent() {
        let tables = Tables::new();
        for (source, target) in REMAP {
            assert_ne!(
                source, target,
                "remap entry '{}' maps to itself", source
            );
            assert_eq!(
                tables.canonicalize(target),
                *target,
                "remap target '{}' is itself a remap source", target
            );
            assert_eq!(
                tables.canonicalize(tables.canonicalize(source)),
                tables.canonicalize(source)
            );
        }
    }

    #[test]
    fn remap_targets_are_cataloged() {
        // Membership, not dimension: some targets ("Formerly Incarcerated",
        // "Justice Involved") are cataloged under Other on purpose.
        for (_, target) in REMAP {
            assert!(
                CATALOG.iter().any(|(name, _)| name == target),
                "remap target '{}' missing from the catalog", target
            );
        }
    }

    #[test]
    fn test_bucket_known_names() {
        let tables = Tables::new();
        assert_eq!(tables.bucket("Substance Dependency"), Dimension::Health);
        assert_eq!(tables.bucket("Seniors"), Dimension::Age);
        assert_eq!(tables.bucket("Homeless"), Dimension::Housing);
        assert_eq!(tables.bucket("Veterans"), Dimension::Other);
    }

    #[test]
    fn test_bucket_unknown_is_other() {
        let tables = Tables::new();
        assert_eq!(tables.bucket("Left-Handed Jugglers"), Dimension::Other);
        assert_eq!(tables.bucket(""), Dimension::Other);
    }

    #[test]
    fn catalog_spans_all_dimensions() {
        let tables = Tables::new();
        for dim in Dimension::ALL {
            assert!(
                CATALOG.iter().any(|(_, d)| *d == dim),
                "no catalog entry buckets to {}", dim.as_str()
            );
        }
        // Every cataloged name buckets to exactly the dimension it declares.
        for (name, dim) in CATALOG {
            assert_eq!(tables.bucket(name), *dim);
        }
    }

    #[test]
    fn test_end_to_end_smoker() {
        let tables = Tables::new();
        let canonical = tables.canonicalize("Smoker");
        assert_eq!(canonical, "Substance Dependency");
        assert_eq!(tables.bucket(canonical), Dimension::Health);
    }
}
