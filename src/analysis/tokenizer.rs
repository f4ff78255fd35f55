//! Whitespace tokenizer and stop-word filter / 空白分词器与停用词过滤器

use std::collections::HashSet;
use std::sync::Arc;

use once_cell::sync::Lazy;

use super::token::{Token, TokenSource};

/// Standard English stop words / 标准英文停用词表
pub const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "if", "in", "into", "is", "it",
    "no", "not", "of", "on", "or", "such", "that", "the", "their", "then", "there", "these",
    "they", "this", "to", "was", "will", "with",
];

/// Shared default stop-word set / 共享的默认停用词集合
static ENGLISH_STOP_SET: Lazy<Arc<HashSet<String>>> = Lazy::new(|| {
    Arc::new(ENGLISH_STOP_WORDS.iter().map(|w| w.to_string()).collect())
});

pub fn english_stop_words() -> Arc<HashSet<String>> {
    ENGLISH_STOP_SET.clone()
}

/// Build a stop-word set; entries are lowercased / 构建停用词集合（统一转小写）
pub fn stop_word_set<I, S>(words: I) -> Arc<HashSet<String>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Arc::new(words.into_iter().map(|w| w.as_ref().to_lowercase()).collect())
}

/// Splits text on runs of whitespace, case preserved / 按空白切分，保留大小写
#[derive(Debug, Clone, Default)]
pub struct WhitespaceTokenizer {
    text: String,
    offset: usize,
}

impl WhitespaceTokenizer {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            offset: 0,
        }
    }
}

impl TokenSource for WhitespaceTokenizer {
    fn next_token(&mut self) -> Option<Token> {
        let rest = &self.text[self.offset..];
        let start = rest.find(|c: char| !c.is_whitespace())?;
        let word = &rest[start..];
        let len = word.find(char::is_whitespace).unwrap_or(word.len());

        let token = Token::new(&word[..len]);
        self.offset += start + len;
        Some(token)
    }

    fn reset(&mut self) {
        self.offset = 0;
    }
}

/// Drops tokens whose lowercase form is a stop word / 过滤停用词
///
/// Position increments of dropped tokens are carried onto the next kept token.
pub struct StopFilter<S> {
    input: S,
    stop_words: Arc<HashSet<String>>,
}

impl<S: TokenSource> StopFilter<S> {
    pub fn new(input: S, stop_words: Arc<HashSet<String>>) -> Self {
        Self { input, stop_words }
    }
}

impl<S: TokenSource> TokenSource for StopFilter<S> {
    fn next_token(&mut self) -> Option<Token> {
        let mut skipped = 0;
        loop {
            let mut token = self.input.next_token()?;
            if self.stop_words.contains(&token.text.to_lowercase()) {
                skipped += token.position_increment;
                continue;
            }
            token.position_increment += skipped;
            return Some(token);
        }
    }

    fn reset(&mut self) {
        self.input.reset();
    }
}
