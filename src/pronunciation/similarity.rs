/// Character-position similarity between two words, in [0, 100].
///
/// Identical words score 100. Otherwise the share of characters that match at
/// the same index (over the longer word) is taken, plus 10 when both words have
/// the same length, capped at 100. An empty operand scores 0.
pub fn word_similarity(expected: &str, spoken: &str) -> f64 {
    if expected == spoken {
        return 100.0;
    }
    if expected.is_empty() || spoken.is_empty() {
        return 0.0;
    }

    let a: Vec<char> = expected.chars().collect();
    let b: Vec<char> = spoken.chars().collect();
    let max_len = a.len().max(b.len());

    let matches = a.iter().zip(b.iter()).filter(|(x, y)| x == y).count();
    let mut similarity = matches as f64 / max_len as f64 * 100.0;
    if a.len() == b.len() {
        similarity += 10.0;
    }
    similarity.min(100.0)
}

/// Same length and at most one differing character.
pub fn words_similar(expected: &str, spoken: &str) -> bool {
    let a: Vec<char> = expected.chars().collect();
    let b: Vec<char> = spoken.chars().collect();
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b.iter()).filter(|(x, y)| x != y).count() <= 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_words_score_full_marks() {
        for w in ["a", "cat", "window", "shining", ""] {
            assert_eq!(word_similarity(w, w), 100.0);
        }
    }

    #[test]
    fn disjoint_words_score_below_full_marks() {
        assert_eq!(word_similarity("abc", "xyz"), 10.0);
        assert_eq!(word_similarity("cat", "dogs"), 0.0);
        assert!(word_similarity("sun", "moo") < 100.0);
    }

    #[test]
    fn empty_operand_scores_zero() {
        assert_eq!(word_similarity("cat", ""), 0.0);
        assert_eq!(word_similarity("", "cat"), 0.0);
    }

    #[test]
    fn partial_matches_use_longer_word() {
        // c,a match; t vs p differs; same length bonus
        let s = word_similarity("cat", "cap");
        assert!((s - (2.0 / 3.0 * 100.0 + 10.0)).abs() < 1e-9);

        // p,l,a,y match over 6 chars, no bonus
        let s = word_similarity("play", "player");
        assert!((s - 4.0 / 6.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn long_near_miss_is_capped() {
        // 9 of 10 characters line up: 90 + 10 bonus
        assert_eq!(word_similarity("abcdefghij", "abcdefghiz"), 100.0);
    }

    #[test]
    fn similar_allows_one_substitution() {
        assert!(words_similar("cat", "cat"));
        assert!(words_similar("cat", "cut"));
        assert!(!words_similar("cat", "cup"));
        assert!(!words_similar("cat", "cats"));
    }
}
