use shared_types::MatchResult;

/// Minimum score a candidate needs to be reported
pub const DEFAULT_MIN_SCORE: u8 = 60;
/// Maximum number of candidates reported per search
pub const DEFAULT_MAX_RESULTS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOptions {
    pub min_score: u8,
    pub max_results: usize,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            min_score: DEFAULT_MIN_SCORE,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

/// Score every candidate, drop those under `min_score`, and keep the best
/// `max_results`. Equal scores keep their pool order.
pub fn rank_candidates<T, F>(
    candidates: Vec<T>,
    options: &MatchOptions,
    mut scorer: F,
) -> Vec<MatchResult<T>>
where
    F: FnMut(&T) -> (u8, Vec<String>),
{
    let mut matches: Vec<MatchResult<T>> = candidates
        .into_iter()
        .filter_map(|entity| {
            let (score, reasons) = scorer(&entity);
            (score >= options.min_score).then_some(MatchResult {
                entity,
                score,
                reasons,
            })
        })
        .collect();

    matches.sort_by(|a, b| b.score.cmp(&a.score));
    matches.truncate(options.max_results);
    matches
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rank(scores: &[u8], options: &MatchOptions) -> Vec<(usize, u8)> {
        let candidates: Vec<(usize, u8)> = scores.iter().copied().enumerate().collect();
        rank_candidates(candidates, options, |(_, s)| (*s, Vec::new()))
            .into_iter()
            .map(|m| m.entity)
            .collect()
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let ranked = rank(&[59, 60, 61], &MatchOptions::default());
        assert_eq!(ranked, vec![(2, 61), (1, 60)]);
    }

    #[test]
    fn test_ties_keep_pool_order() {
        let ranked = rank(&[70, 90, 70, 70], &MatchOptions::default());
        assert_eq!(ranked, vec![(1, 90), (0, 70), (2, 70), (3, 70)]);
    }

    #[test]
    fn test_truncates_to_max_results() {
        let scores: Vec<u8> = (0..25).map(|i| 60 + i).collect();
        let ranked = rank(&scores, &MatchOptions::default());

        assert_eq!(ranked.len(), 10);
        assert_eq!(ranked[0].1, 84);
        assert!(ranked.iter().all(|(_, s)| *s >= 60));
    }

    #[test]
    fn test_custom_options() {
        let options = MatchOptions {
            min_score: 80,
            max_results: 1,
        };
        let ranked = rank(&[85, 95, 79], &options);
        assert_eq!(ranked, vec![(1, 95)]);
    }

    #[test]
    fn test_empty_pool() {
        assert!(rank(&[], &MatchOptions::default()).is_empty());
    }
}
