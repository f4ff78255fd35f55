//! Concatenation filter and analyzer / 拼接过滤器与拼接分析器
//!
//! Pipeline / 处理流程：
//! 1. Whitespace tokenizer (case preserved) / 空白分词（保留大小写）
//! 2. Stop-word filter / 停用词过滤
//! 3. Concatenation filter: all surviving tokens joined into one / 将剩余词元拼接为一个

use std::collections::HashSet;
use std::sync::Arc;

use super::token::{collect_terms, Token, TokenSource};
use super::tokenizer::{english_stop_words, stop_word_set, StopFilter, WhitespaceTokenizer};

pub const DEFAULT_DELIMITER: &str = " ";

/// Reduce a token sequence to at most one token / 将词元序列归约为至多一个词元
///
/// Returns `None` for an empty sequence, otherwise the delimiter-joined terms
/// in arrival order with a position increment of 1.
pub fn concatenate<I>(tokens: I, delimiter: &str) -> Option<Token>
where
    I: IntoIterator<Item = Token>,
{
    let terms: Vec<String> = tokens.into_iter().map(|t| t.text).collect();
    if terms.is_empty() {
        return None;
    }

    Some(Token {
        text: terms.join(delimiter),
        position_increment: 1,
    })
}

/// One-shot reducer over an upstream token source / 一次性拼接过滤器
pub struct ConcatenationFilter<S> {
    input: S,
    delimiter: String,
    concatenated: bool,
}

impl<S: TokenSource> ConcatenationFilter<S> {
    /// `None` delimiter falls back to a single space / 分隔符为空时使用空格
    pub fn new(input: S, delimiter: Option<&str>) -> Self {
        Self {
            input,
            delimiter: delimiter.unwrap_or(DEFAULT_DELIMITER).to_string(),
            concatenated: false,
        }
    }
}

impl<S: TokenSource> TokenSource for ConcatenationFilter<S> {
    fn next_token(&mut self) -> Option<Token> {
        if self.concatenated {
            return None;
        }

        let mut upstream = Vec::new();
        while let Some(token) = self.input.next_token() {
            upstream.push(token);
        }

        let token = concatenate(upstream, &self.delimiter)?;
        self.concatenated = true;
        Some(token)
    }

    fn reset(&mut self) {
        self.input.reset();
        self.concatenated = false;
    }
}

pub type ConcatenationStream = ConcatenationFilter<StopFilter<WhitespaceTokenizer>>;

/// Whitespace → stop words → concatenation / 拼接分析器
#[derive(Debug, Clone)]
pub struct ConcatenationAnalyzer {
    stop_words: Arc<HashSet<String>>,
    delimiter: String,
}

impl ConcatenationAnalyzer {
    /// English stop words, space delimiter / 默认英文停用词与空格分隔符
    pub fn new() -> Self {
        Self {
            stop_words: english_stop_words(),
            delimiter: DEFAULT_DELIMITER.to_string(),
        }
    }

    pub fn with_stop_words<I, W>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = W>,
        W: AsRef<str>,
    {
        self.stop_words = stop_word_set(words);
        self
    }

    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    /// Build the token stream for one field value / 为字段值构建词元流
    pub fn token_stream(&self, text: &str) -> ConcatenationStream {
        let tokenizer = WhitespaceTokenizer::new(text);
        let filtered = StopFilter::new(tokenizer, self.stop_words.clone());
        ConcatenationFilter::new(filtered, Some(&self.delimiter))
    }

    /// Analyze text: zero or one term / 分析文本，返回零个或一个词项
    pub fn analyze(&self, text: &str) -> Vec<String> {
        collect_terms(&mut self.token_stream(text))
    }

    /// The single concatenated term, if any survived / 拼接后的唯一词项
    pub fn analyze_single(&self, text: &str) -> Option<String> {
        self.analyze(text).into_iter().next()
    }
}

impl Default for ConcatenationAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
