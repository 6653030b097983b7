use std::collections::BTreeSet;

/// Edit-distance similarity ratio in `[0, 1]`.
///
/// `(longer - levenshtein(a, b)) / longer`, lengths in chars. Inputs are
/// compared as given, so callers lower-case them first.
pub fn string_similarity(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    if a == b {
        return 1.0;
    }

    let longer = a.chars().count().max(b.chars().count());
    let distance = strsim::levenshtein(a, b);

    (longer - distance) as f64 / longer as f64
}

/// Best similarity between any lead name variation and the contact's name
/// in either order.
pub fn name_match(lead_variations: &BTreeSet<String>, first_name: &str, last_name: &str) -> f64 {
    let first = first_name.trim().to_lowercase();
    let last = last_name.trim().to_lowercase();

    let forward = format!("{} {}", first, last).trim().to_string();
    let reversed = format!("{} {}", last, first).trim().to_string();

    if lead_variations.contains(&forward) || lead_variations.contains(&reversed) {
        return 1.0;
    }

    lead_variations
        .iter()
        .map(|variation| {
            string_similarity(variation, &forward).max(string_similarity(variation, &reversed))
        })
        .fold(0.0, f64::max)
}
