use shared_types::SeniorityLevel;

const C_LEVEL_KEYWORDS: &[&str] = &["ceo", "cto", "cfo", "chief", "president", "founder"];
const VP_KEYWORDS: &[&str] = &["vp", "vice president"];
const DIRECTOR_KEYWORDS: &[&str] = &["director", "head of"];
const SENIOR_KEYWORDS: &[&str] = &["senior", "lead", "principal", "staff", "architect"];
const ENTRY_KEYWORDS: &[&str] = &["junior", "entry", "associate", "intern"];

fn contains_any(title: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| title.contains(kw))
}

fn is_c_level(title: &str) -> bool {
    C_LEVEL_KEYWORDS.iter().any(|kw| match *kw {
        // "director" spells "cto"
        "cto" => title.replace("director", "").contains(kw),
        kw => title.contains(kw),
    })
}

/// Classify a job title into a seniority band.
///
/// Keywords are matched as substrings of the lower-cased title, in priority
/// order c-level, vp, director, senior, entry. Anything else is `Mid`.
pub fn classify_seniority(job_title: &str) -> SeniorityLevel {
    let lowered = job_title.to_lowercase();

    if is_c_level(&lowered) {
        SeniorityLevel::CLevel
    } else if contains_any(&lowered, VP_KEYWORDS) {
        SeniorityLevel::Vp
    } else if contains_any(&lowered, DIRECTOR_KEYWORDS) {
        SeniorityLevel::Director
    } else if contains_any(&lowered, SENIOR_KEYWORDS) {
        SeniorityLevel::Senior
    } else if contains_any(&lowered, ENTRY_KEYWORDS) {
        SeniorityLevel::Entry
    } else {
        SeniorityLevel::Mid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_c_level() {
        assert_eq!(classify_seniority("CEO"), SeniorityLevel::CLevel);
        assert_eq!(
            classify_seniority("Chief Technology Officer"),
            SeniorityLevel::CLevel
        );
        assert_eq!(classify_seniority("Co-Founder"), SeniorityLevel::CLevel);
        assert_eq!(classify_seniority("Cofounder"), SeniorityLevel::CLevel);
        assert_eq!(classify_seniority("President"), SeniorityLevel::CLevel);
    }

    #[test]
    fn test_vice_president_contains_president() {
        assert_eq!(
            classify_seniority("Vice President, Sales"),
            SeniorityLevel::CLevel
        );
        assert_eq!(classify_seniority("VP Engineering"), SeniorityLevel::Vp);
    }

    #[test]
    fn test_director_is_not_cto() {
        assert_eq!(
            classify_seniority("Director of Marketing"),
            SeniorityLevel::Director
        );
        assert_eq!(
            classify_seniority("Head of Product"),
            SeniorityLevel::Director
        );
        assert_eq!(
            classify_seniority("Director, Office of the CTO"),
            SeniorityLevel::CLevel
        );
    }

    #[test]
    fn test_senior_and_entry() {
        assert_eq!(
            classify_seniority("Senior Software Engineer"),
            SeniorityLevel::Senior
        );
        assert_eq!(classify_seniority("Tech Lead"), SeniorityLevel::Senior);
        assert_eq!(classify_seniority("Leadership Coach"), SeniorityLevel::Senior);
        assert_eq!(
            classify_seniority("Solutions Architect"),
            SeniorityLevel::Senior
        );
        assert_eq!(classify_seniority("Junior Analyst"), SeniorityLevel::Entry);
        assert_eq!(classify_seniority("Marketing Intern"), SeniorityLevel::Entry);
        assert_eq!(classify_seniority("Internal Auditor"), SeniorityLevel::Entry);
    }

    #[test]
    fn test_priority_order() {
        // senior outranks entry when both appear
        assert_eq!(
            classify_seniority("Senior Associate"),
            SeniorityLevel::Senior
        );
    }

    #[test]
    fn test_default_is_mid() {
        assert_eq!(classify_seniority("Software Engineer"), SeniorityLevel::Mid);
        assert_eq!(classify_seniority("Sr Engineer"), SeniorityLevel::Mid);
        assert_eq!(classify_seniority(""), SeniorityLevel::Mid);
    }
}
