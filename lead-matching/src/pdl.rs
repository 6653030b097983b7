//! Accessors over the People Data Labs person payload stored in
//! `Lead::raw_data`. PDL omits or nulls fields it has no data for, and
//! sometimes sends empty strings, so every accessor treats those the same.

use serde_json::Value;

/// Non-empty, trimmed string at `key`.
pub fn raw_str<'a>(raw: &'a Value, key: &str) -> Option<&'a str> {
    raw.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Non-empty array at `key`.
pub fn raw_array<'a>(raw: &'a Value, key: &str) -> Option<&'a Vec<Value>> {
    raw.get(key)
        .and_then(Value::as_array)
        .filter(|items| !items.is_empty())
}

/// The experience entry describing the current (or latest) job.
///
/// PDL flags the current job with `is_primary`. Without that flag the open
/// entry (no `end_date`) with the latest `start_date` wins, then the latest
/// `start_date` overall. PDL dates are `YYYY` or `YYYY-MM` strings, which
/// sort correctly as text.
pub fn most_recent_experience(raw: &Value) -> Option<&Value> {
    let experience = raw_array(raw, "experience")?;

    if let Some(primary) = experience
        .iter()
        .find(|e| e.get("is_primary").and_then(Value::as_bool) == Some(true))
    {
        return Some(primary);
    }

    let start = |e: &Value| raw_str(e, "start_date").unwrap_or("").to_string();
    let is_open = |e: &Value| raw_str(e, "end_date").is_none();

    experience
        .iter()
        .max_by(|a, b| {
            is_open(a)
                .cmp(&is_open(b))
                .then_with(|| start(a).cmp(&start(b)))
        })
}

/// Company object of the most recent experience entry.
pub fn current_company(raw: &Value) -> Option<&Value> {
    most_recent_experience(raw)
        .and_then(|e| e.get("company"))
        .filter(|c| c.is_object())
}
