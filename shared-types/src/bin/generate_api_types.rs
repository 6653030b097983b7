use shared_types::*;
use std::fs;
use std::path::Path;
use ts_rs::TS;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Generate TypeScript definitions for API types
    let mut types = Vec::new();

    // Lead types
    types.push(clean_type(Lead::export_to_string()?));
    types.push(clean_type(LeadStatus::export_to_string()?));
    types.push(clean_type(CreateLeadRequest::export_to_string()?));
    types.push(clean_type(LeadsResponse::export_to_string()?));

    // Contact types
    types.push(clean_type(Contact::export_to_string()?));
    types.push(clean_type(SeniorityLevel::export_to_string()?));
    types.push(clean_type(CreateContactRequest::export_to_string()?));
    types.push(clean_type(UpdateContactRequest::export_to_string()?));
    types.push(clean_type(ContactsResponse::export_to_string()?));

    // Company types
    types.push(clean_type(Company::export_to_string()?));
    types.push(clean_type(CompanySize::export_to_string()?));
    types.push(clean_type(NewCompany::export_to_string()?));
    types.push(clean_type(CompaniesResponse::export_to_string()?));

    // Matching and enrichment types
    types.push(clean_type(LeadMatchesResponse::export_to_string()?));
    types.push(clean_type(ContactMatchesResponse::export_to_string()?));
    types.push(clean_type(EnrichContactRequest::export_to_string()?));
    types.push(clean_type(EnrichmentResult::export_to_string()?));

    let output_dir = Path::new("../web/src/api-types");
    fs::create_dir_all(output_dir)?;

    let output_path = output_dir.join("types.ts");
    let output = types.join("\n\n");

    fs::write(&output_path, output)?;
    println!("Generated TypeScript types in {}", output_path.display());

    Ok(())
}

/// Strip generator banners and per-file imports; every type lands in one
/// `types.ts`, so cross-references resolve without them.
fn clean_type(mut type_def: String) -> String {
    type_def.retain(|c| c != '\r');

    let kept: Vec<&str> = type_def
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.starts_with("import type")
                && !trimmed.starts_with("// This file was generated")
                && !trimmed.starts_with("/* This file was generated")
        })
        .collect();

    let result = kept.join("\n").trim().to_string();
    if result.is_empty() {
        result
    } else {
        format!("{}\n", result)
    }
}
