//! Deterministic prose assembly.
//!
//! Builds the single `embedding_text` block for one snapshot row by
//! evaluating a fixed, ordered list of optional clauses. A clause appears
//! only when its backing fields are non-null and non-empty; present clauses
//! are joined with one space and the result is trimmed. Identical inputs
//! always produce byte-identical output.

use std::collections::BTreeSet;

use crate::aggregate::{CategoryFacts, EligibilityFacts};
use crate::models::{Address, Program, Resource, Service};

/// Everything one prose block is built from. The fields mirror the engine's
/// per-row resolution: the hours clause and address come pre-resolved so
/// the assembler stays a pure formatting step.
pub struct ProseInput<'a> {
    pub resource: &'a Resource,
    pub service: &'a Service,
    pub program: Option<&'a Program>,
    pub categories: &'a CategoryFacts,
    pub eligibility: &'a EligibilityFacts,
    /// Full hours clause (including `Hours:` prefix) or the unknown-hours
    /// sentinel; `None` omits the clause.
    pub hours_text: Option<&'a str>,
    pub address: Option<&'a Address>,
    pub phone_numbers: &'a [String],
    pub instructions: &'a [String],
    pub documents: &'a [String],
}

/// Assemble the prose block for one row.
pub fn assemble(input: &ProseInput<'_>) -> String {
    let mut clauses: Vec<String> = Vec::new();

    // Organization identity.
    match opt(&input.resource.alternate_name) {
        Some(alt) => clauses.push(format!("{} (also known as {}).", input.resource.name, alt)),
        None => {
            if !input.resource.name.trim().is_empty() {
                clauses.push(format!("{}.", input.resource.name));
            }
        }
    }
    if let Some(legal_status) = opt(&input.resource.legal_status) {
        clauses.push(format!("Organization type: {}.", legal_status));
    }
    if let Some(short) = opt(&input.resource.short_description) {
        clauses.push(short.to_string());
    }
    if let Some(long) = opt(&input.resource.long_description) {
        clauses.push(long.to_string());
    }

    // Service identity and description.
    if let Some(name) = opt(&input.service.name) {
        match opt(&input.service.alternate_name) {
            Some(alt) => clauses.push(format!("Service: {} (also known as {}).", name, alt)),
            None => clauses.push(format!("Service: {}.", name)),
        }
    }
    if let Some(description) = opt(&input.service.description) {
        clauses.push(description.to_string());
    }

    // Program block.
    if let Some(program) = input.program {
        if !program.name.trim().is_empty() {
            let mut block = format!("Program: {}.", program.name);
            if let Some(description) = opt(&program.description) {
                block.push(' ');
                block.push_str(description);
            }
            clauses.push(block);
        }
    }

    // Category and sub-category summaries.
    let top_names: BTreeSet<&str> = input
        .categories
        .core_names
        .iter()
        .chain(input.categories.our415_names.iter())
        .chain(input.categories.sfsg_names.iter())
        .chain(input.categories.ucsf_top_names.iter())
        .map(|n| n.as_str())
        .collect();
    if !top_names.is_empty() {
        clauses.push(format!(
            "Categories: {}.",
            top_names.into_iter().collect::<Vec<_>>().join(", ")
        ));
    }
    if !input.categories.ucsf_sub_names.is_empty() {
        clauses.push(format!(
            "Subcategories: {}.",
            input.categories.ucsf_sub_names.join(", ")
        ));
    }

    // Eligibility: free text first, then the structured tags.
    if let Some(text) = opt(&input.service.eligibility) {
        clauses.push(format!("Eligibility: {}", text));
    }
    if !input.eligibility.all.is_empty() {
        clauses.push(format!("Serves: {}.", input.eligibility.all.join(", ")));
    }

    if let Some(text) = opt(&input.service.application_process) {
        clauses.push(format!("How to apply: {}", text));
    }
    if let Some(text) = opt(&input.service.required_documents) {
        clauses.push(format!("Required documents: {}", text));
    }
    if let Some(text) = opt(&input.service.fee) {
        clauses.push(format!("Fees: {}", text));
    }
    if let Some(text) = opt(&input.service.wait_time) {
        clauses.push(format!("Wait time: {}", text));
    }
    if let Some(text) = opt(&input.service.interpretation_services) {
        clauses.push(format!("Interpretation services: {}", text));
    }

    if let Some(hours) = input.hours_text {
        clauses.push(hours.to_string());
    }

    if let Some(address) = input.address {
        if let Some(location) = format_location(address) {
            clauses.push(location);
        }
    }

    if !input.phone_numbers.is_empty() {
        clauses.push(format!("Phone: {}.", input.phone_numbers.join(", ")));
    }
    if let Some(email) = opt(&input.service.email).or_else(|| opt(&input.resource.email)) {
        clauses.push(format!("Email: {}.", email));
    }
    if let Some(url) = opt(&input.service.url).or_else(|| opt(&input.resource.website)) {
        clauses.push(format!("Website: {}.", url));
    }

    if !input.instructions.is_empty() {
        clauses.push(format!("Instructions: {}", input.instructions.join(" ")));
    }
    if !input.documents.is_empty() {
        clauses.push(format!("Related documents: {}", input.documents.join(" ")));
    }

    clauses.join(" ").trim().to_string()
}

/// `Location: {street[, street2], city, state zip}.` from the parts present.
fn format_location(address: &Address) -> Option<String> {
    let mut parts: Vec<String> = Vec::new();
    if let Some(street) = opt(&address.address_1) {
        parts.push(street.to_string());
    }
    if let Some(street2) = opt(&address.address_2) {
        parts.push(street2.to_string());
    }
    if let Some(city) = opt(&address.city) {
        parts.push(city.to_string());
    }
    match (opt(&address.state_province), opt(&address.postal_code)) {
        (Some(state), Some(zip)) => parts.push(format!("{} {}", state, zip)),
        (Some(state), None) => parts.push(state.to_string()),
        (None, Some(zip)) => parts.push(zip.to_string()),
        (None, None) => {}
    }
    if parts.is_empty() {
        None
    } else {
        Some(format!("Location: {}.", parts.join(", ")))
    }
}

fn opt(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_input<'a>(
        resource: &'a Resource,
        service: &'a Service,
        categories: &'a CategoryFacts,
        eligibility: &'a EligibilityFacts,
    ) -> ProseInput<'a> {
        ProseInput {
            resource,
            service,
            program: None,
            categories,
            eligibility,
            hours_text: None,
            address: None,
            phone_numbers: &[],
            instructions: &[],
            documents: &[],
        }
    }

    #[test]
    fn test_name_only_service() {
        let resource = Resource {
            id: 1,
            name: "Hope Center".to_string(),
            status: true,
            ..Default::default()
        };
        let service = Service {
            id: 2,
            resource_id: 1,
            name: Some("Meal Program".to_string()),
            status: true,
            ..Default::default()
        };
        let categories = CategoryFacts::default();
        let eligibility = EligibilityFacts::default();
        let text = assemble(&minimal_input(&resource, &service, &categories, &eligibility));
        assert_eq!(text, "Hope Center. Service: Meal Program.");
        assert!(!text.contains("  "));
    }

    #[test]
    fn test_empty_and_whitespace_fields_are_omitted() {
        let resource = Resource {
            id: 1,
            name: "Hope Center".to_string(),
            legal_status: Some("   ".to_string()),
            short_description: Some(String::new()),
            status: true,
            ..Default::default()
        };
        let service = Service {
            id: 2,
            resource_id: 1,
            name: Some("Meal Program".to_string()),
            fee: Some("".to_string()),
            status: true,
            ..Default::default()
        };
        let categories = CategoryFacts::default();
        let eligibility = EligibilityFacts::default();
        let text = assemble(&minimal_input(&resource, &service, &categories, &eligibility));
        assert_eq!(text, "Hope Center. Service: Meal Program.");
    }

    #[test]
    fn test_full_clause_order() {
        let resource = Resource {
            id: 1,
            name: "Hope Center".to_string(),
            alternate_name: Some("HC".to_string()),
            legal_status: Some("Nonprofit".to_string()),
            short_description: Some("Neighborhood services.".to_string()),
            email: Some("info@hope.org".to_string()),
            website: Some("https://hope.org".to_string()),
            status: true,
            ..Default::default()
        };
        let service = Service {
            id: 2,
            resource_id: 1,
            name: Some("Meal Program".to_string()),
            description: Some("Hot meals daily.".to_string()),
            eligibility: Some("Anyone hungry.".to_string()),
            application_process: Some("Walk in.".to_string()),
            fee: Some("No cost.".to_string()),
            status: true,
            ..Default::default()
        };
        let program = Program {
            id: 3,
            name: "Food Security".to_string(),
            description: Some("Citywide food access.".to_string()),
            ..Default::default()
        };
        let categories = CategoryFacts {
            core_names: vec!["Food".to_string()],
            ucsf_sub_names: vec!["Emergency Food".to_string()],
            ..Default::default()
        };
        let eligibility = EligibilityFacts {
            all: vec!["Seniors".to_string()],
            age: vec!["Seniors".to_string()],
            ..Default::default()
        };
        let address = Address {
            id: 9,
            address_1: Some("123 Main St".to_string()),
            city: Some("San Francisco".to_string()),
            state_province: Some("CA".to_string()),
            postal_code: Some("94110".to_string()),
            ..Default::default()
        };
        let phones = vec!["415-555-0100".to_string()];
        let instructions = vec!["Bring a bag.".to_string()];
        let documents = vec!["Flyer text.".to_string()];

        let input = ProseInput {
            resource: &resource,
            service: &service,
            program: Some(&program),
            categories: &categories,
            eligibility: &eligibility,
            hours_text: Some("Hours: Monday 09:30 AM - 05:30 PM."),
            address: Some(&address),
            phone_numbers: &phones,
            instructions: &instructions,
            documents: &documents,
        };
        let text = assemble(&input);
        assert_eq!(
            text,
            "Hope Center (also known as HC). Organization type: Nonprofit. \
             Neighborhood services. Service: Meal Program. Hot meals daily. \
             Program: Food Security. Citywide food access. Categories: Food. \
             Subcategories: Emergency Food. Eligibility: Anyone hungry. \
             Serves: Seniors. How to apply: Walk in. Fees: No cost. \
             Hours: Monday 09:30 AM - 05:30 PM. \
             Location: 123 Main St, San Francisco, CA 94110. \
             Phone: 415-555-0100. Email: info@hope.org. Website: https://hope.org. \
             Instructions: Bring a bag. Related documents: Flyer text."
        );
    }

    #[test]
    fn test_service_contact_overrides_resource() {
        let resource = Resource {
            id: 1,
            name: "Hope Center".to_string(),
            email: Some("info@hope.org".to_string()),
            website: Some("https://hope.org".to_string()),
            status: true,
            ..Default::default()
        };
        let service = Service {
            id: 2,
            resource_id: 1,
            name: Some("Meal Program".to_string()),
            email: Some("meals@hope.org".to_string()),
            status: true,
            ..Default::default()
        };
        let categories = CategoryFacts::default();
        let eligibility = EligibilityFacts::default();
        let text = assemble(&minimal_input(&resource, &service, &categories, &eligibility));
        assert!(text.contains("Email: meals@hope.org."));
        assert!(!text.contains("info@hope.org"));
        // Service has no url, so the resource website still applies.
        assert!(text.contains("Website: https://hope.org."));
    }

    #[test]
    fn test_deterministic() {
        let resource = Resource {
            id: 1,
            name: "Hope Center".to_string(),
            status: true,
            ..Default::default()
        };
        let service = Service {
            id: 2,
            resource_id: 1,
            name: Some("Meal Program".to_string()),
            status: true,
            ..Default::default()
        };
        let categories = CategoryFacts {
            core_names: vec!["Food".to_string(), "Shelter".to_string()],
            our415_names: vec!["Families".to_string()],
            ..Default::default()
        };
        let eligibility = EligibilityFacts::default();
        let a = assemble(&minimal_input(&resource, &service, &categories, &eligibility));
        let b = assemble(&minimal_input(&resource, &service, &categories, &eligibility));
        assert_eq!(a, b);
        assert!(a.contains("Categories: Families, Food, Shelter."));
    }
}
