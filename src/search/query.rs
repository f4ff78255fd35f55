//! Retrieval requests and query construction / 检索请求与查询构建
//!
//! Two modes / 两种模式：
//! - Substring: escape -> literal parse -> n-gram terms over the whole literal, one clause per gram / 子串模式
//! - Fuzzy: lowercase -> full-path, filename and per-segment fuzzy clauses / 模糊模式
//!
//! Every clause is a should-clause: any match contributes to the score, a
//! document with no matching clause is excluded.

use crate::analysis::NGramPolicy;
use crate::error::{Result, SearchError};

use super::schema::{PathDocument, CONTENT_FIELD, FILENAME_FIELD};

/// Largest edit distance a fuzzy clause may request / 最大编辑距离上限
pub const MAX_EDITS_LIMIT: u8 = 2;

/// Characters with operator meaning in the query grammar / 查询语法中的特殊字符
pub const SPECIAL_CHARS: &[char] = &[
    '\\', '+', '-', '!', '(', ')', ':', '^', '[', ']', '"', '{', '}', '~', '*', '?', '|', '&', '/',
];

/// Search mode selected by the caller / 搜索模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    Substring,
    Fuzzy,
}

impl SearchMode {
    pub fn from_fuzzy(fuzzy: bool) -> Self {
        if fuzzy {
            Self::Fuzzy
        } else {
            Self::Substring
        }
    }
}

/// How a clause's term is compared with indexed terms / 词项匹配方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// Exact equality with an indexed term. Over n-gram fields this is the
    /// substring match. / 精确匹配（对 N-gram 字段即子串匹配）
    Term,
    /// Bounded edit distance / 有界编辑距离匹配
    Fuzzy { max_edits: u8 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    pub field: String,
    pub term: String,
    pub kind: MatchKind,
}

impl Clause {
    pub fn term(field: &str, term: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            term: term.into(),
            kind: MatchKind::Term,
        }
    }

    pub fn fuzzy(field: &str, term: impl Into<String>, max_edits: u8) -> Self {
        Self {
            field: field.to_string(),
            term: term.into(),
            kind: MatchKind::Fuzzy {
                max_edits: max_edits.min(MAX_EDITS_LIMIT),
            },
        }
    }
}

/// OR-combined set of clauses / 以 OR 组合的检索请求
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RetrievalRequest {
    clauses: Vec<Clause>,
}

impl RetrievalRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn should(&mut self, clause: Clause) -> &mut Self {
        self.clauses.push(clause);
        self
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

}

/// Escape every special character so the text is taken literally / 转义特殊字符
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if SPECIAL_CHARS.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Parse escaped query text back into its literal form / 将转义后的查询解析为字面文本
///
/// A backslash takes the next character literally; an unescaped special
/// character or a trailing backslash is a syntax error. Whitespace is kept:
/// the literal is analyzed as one token, the same way field text is.
pub fn parse_literal(text: &str) -> Result<String> {
    let mut literal = String::with_capacity(text.len());
    let mut chars = text.chars().enumerate();

    while let Some((pos, c)) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some((_, next)) => literal.push(next),
                None => {
                    return Err(SearchError::QuerySyntax(format!(
                        "dangling escape at position {}",
                        pos
                    )))
                }
            }
        } else if SPECIAL_CHARS.contains(&c) {
            return Err(SearchError::QuerySyntax(format!(
                "unexpected '{}' at position {}",
                c, pos
            )));
        } else {
            literal.push(c);
        }
    }

    Ok(literal)
}

/// Builds retrieval requests from raw user input / 查询构建策略
#[derive(Debug, Clone)]
pub struct QueryStrategy {
    ngram: NGramPolicy,
    max_edits: u8,
}

impl QueryStrategy {
    pub fn new(ngram: NGramPolicy, max_edits: u8) -> Self {
        Self {
            ngram,
            max_edits: max_edits.min(MAX_EDITS_LIMIT),
        }
    }

    pub fn max_edits(&self) -> u8 {
        self.max_edits
    }

    pub fn build(&self, text: &str, mode: SearchMode) -> Result<RetrievalRequest> {
        match mode {
            SearchMode::Substring => self.substring_request(text),
            SearchMode::Fuzzy => Ok(self.fuzzy_request(text)),
        }
    }

    /// One term clause on `content` per distinct query gram / 每个不同的 gram 一个子句
    pub fn substring_request(&self, text: &str) -> Result<RetrievalRequest> {
        let literal = parse_literal(&escape(text))?;

        let mut request = RetrievalRequest::new();
        let mut seen = std::collections::HashSet::new();
        for gram in self.ngram.analyze(&literal) {
            if seen.insert(gram.clone()) {
                request.should(Clause::term(CONTENT_FIELD, gram));
            }
        }
        Ok(request)
    }

    /// Full-path, filename and per-segment fuzzy clauses / 路径分解模糊查询
    pub fn fuzzy_request(&self, text: &str) -> RetrievalRequest {
        let query = text.to_lowercase();
        let edits = self.max_edits;

        let mut request = RetrievalRequest::new();
        request.should(Clause::fuzzy(CONTENT_FIELD, query.as_str(), edits));

        if query.contains('/') {
            let filename = PathDocument::extract_filename(&query);
            request.should(Clause::fuzzy(FILENAME_FIELD, filename, edits));

            for segment in query.split('/').filter(|s| !s.is_empty()) {
                request.should(Clause::fuzzy(CONTENT_FIELD, segment, edits));
                request.should(Clause::fuzzy(FILENAME_FIELD, segment, edits));
            }
        } else {
            request.should(Clause::fuzzy(FILENAME_FIELD, query.as_str(), edits));
        }

        request
    }
}

impl Default for QueryStrategy {
    fn default() -> Self {
        Self::new(NGramPolicy::default(), MAX_EDITS_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terms_for(request: &RetrievalRequest, field: &str) -> Vec<String> {
        request
            .clauses()
            .iter()
            .filter(|c| c.field == field)
            .map(|c| c.term.clone())
            .collect()
    }

    #[test]
    fn test_escape_special_chars() {
        assert_eq!(escape("lqd///gif"), "lqd\\/\\/\\/gif");
        assert_eq!(escape("a+b"), "a\\+b");
        assert_eq!(escape("plain.gif"), "plain.gif");
        assert_eq!(escape("c:\\x"), "c\\:\\\\x");
    }

    #[test]
    fn test_parse_literal_roundtrips_escaped_text() {
        for raw in ["lqd///gif", "(a) [b] {c}", "x~2 && y || !z", "c:\\tmp\\*?"] {
            assert_eq!(parse_literal(&escape(raw)).unwrap(), raw);
        }
    }

    #[test]
    fn test_parse_literal_rejects_operators() {
        let err = parse_literal("plus/gif").unwrap_err();
        assert!(matches!(err, SearchError::QuerySyntax(_)));

        let err = parse_literal("plus\\").unwrap_err();
        assert!(matches!(err, SearchError::QuerySyntax(_)));
    }

    #[test]
    fn test_substring_request_grams() {
        let strategy = QueryStrategy::default();
        let request = strategy.substring_request("Test").unwrap();

        assert!(request.clauses().iter().all(|c| c.kind == MatchKind::Term));
        assert_eq!(
            terms_for(&request, CONTENT_FIELD),
            vec!["te", "tes", "test", "es", "est", "st"]
        );
    }

    #[test]
    fn test_substring_request_dedupes_grams() {
        let strategy = QueryStrategy::default();
        let request = strategy.substring_request("abab").unwrap();
        assert_eq!(
            terms_for(&request, CONTENT_FIELD),
            vec!["ab", "aba", "abab", "ba", "bab"]
        );
    }

    #[test]
    fn test_substring_request_keeps_inner_whitespace() {
        let strategy = QueryStrategy::default();
        let request = strategy.substring_request("a bc").unwrap();
        assert_eq!(
            terms_for(&request, CONTENT_FIELD),
            vec!["a ", "a b", "a bc", " b", " bc", "bc"]
        );
    }

    #[test]
    fn test_substring_request_treats_operators_literally() {
        let strategy = QueryStrategy::default();
        let request = strategy.substring_request("lqd///gif").unwrap();
        let terms = terms_for(&request, CONTENT_FIELD);
        assert!(terms.contains(&"d/".to_string()));
        assert!(terms.contains(&"//".to_string()));
        assert!(terms.contains(&"gif".to_string()));
    }

    #[test]
    fn test_fuzzy_without_slash() {
        let request = QueryStrategy::default().fuzzy_request("Pluss.GIF");
        assert_eq!(
            request.clauses(),
            &[
                Clause::fuzzy(CONTENT_FIELD, "pluss.gif", 2),
                Clause::fuzzy(FILENAME_FIELD, "pluss.gif", 2),
            ]
        );
    }

    #[test]
    fn test_fuzzy_path_decomposition() {
        let request = QueryStrategy::default().fuzzy_request("lqd///gif");

        assert_eq!(terms_for(&request, CONTENT_FIELD), vec!["lqd///gif", "lqd", "gif"]);
        assert_eq!(terms_for(&request, FILENAME_FIELD), vec!["gif", "lqd", "gif"]);
        assert!(request
            .clauses()
            .iter()
            .all(|c| c.kind == MatchKind::Fuzzy { max_edits: 2 }));
    }

    #[test]
    fn test_fuzzy_trailing_slash_uses_whole_query_for_filename() {
        let request = QueryStrategy::default().fuzzy_request("docs/");
        assert_eq!(terms_for(&request, FILENAME_FIELD), vec!["docs/", "docs"]);
        assert_eq!(terms_for(&request, CONTENT_FIELD), vec!["docs/", "docs"]);
    }

    #[test]
    fn test_fuzzy_only_separators() {
        let request = QueryStrategy::default().fuzzy_request("///");
        // full-path clause + filename clause, no segments
        assert_eq!(request.clauses().len(), 2);
    }

    #[test]
    fn test_max_edits_clamped() {
        let strategy = QueryStrategy::new(NGramPolicy::default(), 7);
        assert_eq!(strategy.max_edits(), 2);
        assert_eq!(
            Clause::fuzzy(CONTENT_FIELD, "x", 9).kind,
            MatchKind::Fuzzy { max_edits: 2 }
        );
    }

    #[test]
    fn test_mode_dispatch() {
        let strategy = QueryStrategy::default();
        let substring = strategy.build("ab", SearchMode::from_fuzzy(false)).unwrap();
        assert_eq!(substring.clauses(), &[Clause::term(CONTENT_FIELD, "ab")]);

        let fuzzy = strategy.build("ab", SearchMode::from_fuzzy(true)).unwrap();
        assert_eq!(fuzzy.clauses().len(), 2);
    }
}
