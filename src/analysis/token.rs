//! Token model and token source abstraction / 词元模型与词元流抽象

/// A unit of analyzed text / 分析后的文本单元
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Term text / 词项文本
    pub text: String,
    /// Distance from the previously emitted token / 与上一个词元的位置增量
    pub position_increment: u32,
}

impl Token {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            position_increment: 1,
        }
    }
}

/// Pull-based token source / 拉取式词元源
///
/// `next_token` returns `None` once the stream is exhausted; `reset` must be
/// called before the same source is consumed again.
pub trait TokenSource {
    fn next_token(&mut self) -> Option<Token>;

    fn reset(&mut self);
}

impl<S: TokenSource + ?Sized> TokenSource for Box<S> {
    fn next_token(&mut self) -> Option<Token> {
        (**self).next_token()
    }

    fn reset(&mut self) {
        (**self).reset()
    }
}

/// Reset the source and drain it / 重置并读取全部词元
pub fn collect_tokens<S: TokenSource + ?Sized>(source: &mut S) -> Vec<Token> {
    source.reset();
    let mut tokens = Vec::new();
    while let Some(token) = source.next_token() {
        tokens.push(token);
    }
    tokens
}

/// Same as [`collect_tokens`] but keeps only the term text / 仅保留词项文本
pub fn collect_terms<S: TokenSource + ?Sized>(source: &mut S) -> Vec<String> {
    collect_tokens(source).into_iter().map(|t| t.text).collect()
}
