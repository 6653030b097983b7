use std::collections::BTreeSet;

/// Build the lower-cased spellings a person's name may appear under.
///
/// `"John Doe"` yields `john doe`, `doe, john`, `john` and `doe`. For names
/// with a middle part the first and last tokens are also joined on their
/// own, so `"Mary Ann Lee"` includes `mary lee`.
pub fn extract_name_variations(full_name: &str) -> BTreeSet<String> {
    let mut variations = BTreeSet::new();

    let normalized = full_name.trim().to_lowercase();
    if normalized.is_empty() {
        return variations;
    }

    let parts: Vec<&str> = normalized.split_whitespace().collect();
    variations.insert(normalized.clone());

    if parts.len() >= 2 {
        let first = parts[0];
        let last = parts[parts.len() - 1];

        variations.insert(format!("{} {}", first, last));
        variations.insert(format!("{}, {}", last, first));
        for part in &parts {
            variations.insert(part.to_string());
        }
    }

    variations
}
