//! Text analysis - turns raw text into index/query terms / 文本分析模块
//!
//! - Token sources: whitespace tokenizer, stop-word filter / 词元源
//! - Concatenation filter + analyzer: many tokens -> one / 拼接过滤器
//! - N-gram policy: substring grams for abbreviation matching / N-gram 策略

pub mod concat;
pub mod ngram;
pub mod token;
pub mod tokenizer;

pub use concat::{concatenate, ConcatenationAnalyzer, ConcatenationFilter};
pub use ngram::NGramPolicy;
pub use token::{collect_terms, collect_tokens, Token, TokenSource};
pub use tokenizer::{english_stop_words, StopFilter, WhitespaceTokenizer};
