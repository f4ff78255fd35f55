//! N-gram policy - case-insensitive substring grams / N-gram 切分策略
//!
//! Used for both index text and query terms so that any fragment of a path
//! (including fragments that look like stop words) can match.
//!
//! Example (min=2, max=10): "Test" -> ["te", "tes", "test", "es", "est", "st"]

pub const DEFAULT_MIN_GRAM: usize = 2;
pub const DEFAULT_MAX_GRAM: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NGramPolicy {
    pub min_gram: usize,
    pub max_gram: usize,
}

impl NGramPolicy {
    pub fn new(min_gram: usize, max_gram: usize) -> Self {
        Self { min_gram, max_gram }
    }

    /// Generate grams for one token / 为单个词元生成 N-gram
    ///
    /// Grams are ordered by start offset, then by length. A token shorter
    /// than `min_gram` yields itself as the only gram.
    pub fn grams(&self, token: &str) -> Vec<String> {
        let chars: Vec<char> = token.to_lowercase().chars().collect();
        let len = chars.len();
        if len == 0 {
            return Vec::new();
        }

        let min_n = self.min_gram.max(1);
        if len < min_n {
            return vec![chars.into_iter().collect()];
        }

        let mut grams = Vec::new();
        for start in 0..len {
            let longest = self.max_gram.min(len - start);
            for n in min_n..=longest {
                grams.push(chars[start..start + n].iter().collect());
            }
        }
        grams
    }

    /// Whole text as one token, for field values and query literals alike / 整段文本作为一个词元
    pub fn analyze(&self, text: &str) -> Vec<String> {
        self.grams(text)
    }
}

impl Default for NGramPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_GRAM, DEFAULT_MAX_GRAM)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_grams_of_test() {
        let grams = NGramPolicy::default().grams("test");
        assert_eq!(grams, vec!["te", "tes", "test", "es", "est", "st"]);

        let set: HashSet<&str> = grams.iter().map(String::as_str).collect();
        let expected: HashSet<&str> = ["te", "es", "st", "tes", "est", "test"].into_iter().collect();
        assert_eq!(set, expected);
    }

    #[test]
    fn test_grams_are_lowercase() {
        let grams = NGramPolicy::default().grams("GiF");
        assert!(grams.iter().all(|g| g.chars().all(|c| !c.is_uppercase())));
        assert!(grams.contains(&"gif".to_string()));
    }

    #[test]
    fn test_short_token_is_kept_whole() {
        let policy = NGramPolicy::new(3, 5);
        assert_eq!(policy.grams("Ab"), vec!["ab"]);
        assert_eq!(NGramPolicy::default().grams("x"), vec!["x"]);
    }

    #[test]
    fn test_empty_token() {
        assert!(NGramPolicy::default().grams("").is_empty());
    }

    #[test]
    fn test_max_gram_caps_length() {
        let policy = NGramPolicy::new(2, 3);
        let grams = policy.grams("abcde");
        assert!(grams.iter().all(|g| (2..=3).contains(&g.chars().count())));
        // 4 bigrams + 3 trigrams
        assert_eq!(grams.len(), 7);
    }

    #[test]
    fn test_zero_min_gram_behaves_like_one() {
        let grams = NGramPolicy::new(0, 1).grams("ab");
        assert_eq!(grams, vec!["a", "b"]);
    }

    #[test]
    fn test_stop_word_fragments_survive() {
        let grams = NGramPolicy::default().grams("this");
        assert!(grams.contains(&"is".to_string()));
    }

    #[test]
    fn test_multibyte_chars() {
        let grams = NGramPolicy::new(1, 2).grams("测试");
        assert_eq!(grams, vec!["测", "测试", "试"]);
    }
}
