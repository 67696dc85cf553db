use crate::domain::ports::SimilarityScorer;
use strsim::{jaro_winkler, normalized_levenshtein};

// Floors so a score only reaches a threshold when the underlying ratio does.
fn to_percent(score: f64) -> u8 {
    (score.clamp(0.0, 1.0) * 100.0).floor() as u8
}

fn longest_common_subsequence(left: &[char], right: &[char]) -> usize {
    let mut previous = vec![0usize; right.len() + 1];
    let mut current = vec![0usize; right.len() + 1];

    for l in left {
        for (j, r) in right.iter().enumerate() {
            current[j + 1] = if l == r {
                previous[j] + 1
            } else {
                previous[j + 1].max(current[j])
            };
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[right.len()]
}

/// Indel ratio: `2 * lcs / (len_left + len_right)`. Only insertions and
/// deletions count as edits, so a name with a suffix appended still scores high.
/// This is the default scorer for deduplication.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndelRatio;

impl SimilarityScorer for IndelRatio {
    fn score(&self, left: &str, right: &str) -> u8 {
        let left: Vec<char> = left.chars().collect();
        let right: Vec<char> = right.chars().collect();
        let total = left.len() + right.len();
        if total == 0 {
            return 100;
        }

        let lcs = longest_common_subsequence(&left, &right);
        // Integer division floors; 100 only when both strings are equal.
        (2 * lcs * 100 / total) as u8
    }
}

/// Levenshtein distance normalized by the longer string.
#[derive(Debug, Clone, Copy, Default)]
pub struct LevenshteinRatio;

impl SimilarityScorer for LevenshteinRatio {
    fn score(&self, left: &str, right: &str) -> u8 {
        to_percent(normalized_levenshtein(left, right))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JaroWinklerRatio;

impl SimilarityScorer for JaroWinklerRatio {
    fn score(&self, left: &str, right: &str) -> u8 {
        to_percent(jaro_winkler(left, right))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indel_ratio_identical() {
        assert_eq!(IndelRatio.score("royal bakery", "royal bakery"), 100);
        assert_eq!(IndelRatio.score("", ""), 100);
    }

    #[test]
    fn test_indel_ratio_appended_suffix() {
        // 2 * 15 / 33 = 0.909
        assert_eq!(IndelRatio.score("apollo pharmacy", "apollo pharmacy 24"), 90);
        // 2 * 10 / 24 = 0.833
        assert_eq!(IndelRatio.score("royal cafe", "royal cafe &co"), 83);
    }

    #[test]
    fn test_indel_ratio_different_business() {
        let score = IndelRatio.score("royal bakery", "royal hardware");
        assert!(score < 85, "score was {}", score);
        assert_eq!(IndelRatio.score("abc", "xyz"), 0);
    }

    #[test]
    fn test_indel_ratio_one_char_off_never_scores_100() {
        let long = "a".repeat(250);
        let longer = format!("{}b", long);
        assert_eq!(IndelRatio.score(&long, &longer), 99);
    }

    #[test]
    fn test_indel_ratio_counts_chars_not_bytes() {
        // 2 * 4 / 9 = 0.888
        assert_eq!(IndelRatio.score("café", "cafés"), 88);
    }

    #[test]
    fn test_levenshtein_ratio_floors() {
        assert_eq!(LevenshteinRatio.score("royal bakery", "royal bakery"), 100);
        // 1 - 1/13 = 0.923
        assert_eq!(LevenshteinRatio.score("sharma sweets", "sharma sweet"), 92);

        let long = "a".repeat(250);
        let longer = format!("{}b", long);
        assert_eq!(LevenshteinRatio.score(&long, &longer), 99);
    }

    #[test]
    fn test_jaro_winkler_ratio_bounds() {
        assert_eq!(JaroWinklerRatio.score("cafe x", "cafe x"), 100);
        assert!(JaroWinklerRatio.score("cafe x", "zzzz") < 50);
    }
}
