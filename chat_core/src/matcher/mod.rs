//! Matcher - picks the best canned answer for a visitor message.
//!
//! Two strategies share one interface:
//! 1. **Overlap scoring**: count query words found in each question, keep the best
//! 2. **Substring keyword**: first keyword contained anywhere in the message
//!
//! The strategy follows from the knowledge shape: question/answer pairs are
//! scored, keyword rules are looked up.

mod keyword;
mod overlap;

pub use keyword::*;
pub use overlap::*;

use portfolio_kb::{KeywordTable, KnowledgeBase, KnowledgeSource};
use serde::{Deserialize, Serialize};

/// Split text into lowercase whitespace-delimited tokens.
///
/// Punctuation is kept, so `"Hello!!"` yields `"hello!!"`. Repeated words are
/// kept too; the result is a multiset, not a set.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// A successful match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match<'a> {
    /// The answer text, borrowed from the knowledge.
    pub answer: &'a str,

    /// Position of the winning entry or rule.
    pub index: usize,

    /// Overlap score. Keyword matches always score 1.
    pub score: usize,
}

/// Result of looking up a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome<'a> {
    Found(Match<'a>),
    /// Nothing in the knowledge relates to the message.
    NoMatch,
}

impl<'a> MatchOutcome<'a> {
    /// Get the answer, if any.
    pub fn answer(&self) -> Option<&'a str> {
        match self {
            MatchOutcome::Found(m) => Some(m.answer),
            MatchOutcome::NoMatch => None,
        }
    }

    /// Check if a match was found.
    pub fn is_match(&self) -> bool {
        matches!(self, MatchOutcome::Found(_))
    }

    /// Get the answer, or the fallback on `NoMatch`.
    pub fn answer_or(&self, fallback: &'a str) -> &'a str {
        self.answer().unwrap_or(fallback)
    }
}

/// Which strategy a matcher uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    Overlap,
    Keyword,
}

impl StrategyKind {
    /// The strategy a knowledge shape calls for.
    pub fn for_source(source: &KnowledgeSource) -> Self {
        match source {
            KnowledgeSource::Pairs(_) => StrategyKind::Overlap,
            KnowledgeSource::Keywords(_) => StrategyKind::Keyword,
        }
    }
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StrategyKind::Overlap => write!(f, "overlap"),
            StrategyKind::Keyword => write!(f, "keyword"),
        }
    }
}

/// The matching capability, one variant per strategy.
#[derive(Debug, Clone)]
pub enum MatchStrategy {
    /// Word-overlap scoring over question/answer pairs.
    OverlapScoring(OverlapIndex),

    /// Substring lookup over keyword rules.
    SubstringKeyword(KeywordTable),
}

impl MatchStrategy {
    /// Build the strategy that fits the knowledge shape.
    pub fn for_source(source: KnowledgeSource) -> Self {
        match source {
            KnowledgeSource::Pairs(kb) => MatchStrategy::OverlapScoring(OverlapIndex::new(kb)),
            KnowledgeSource::Keywords(table) => MatchStrategy::SubstringKeyword(table),
        }
    }

    /// Find the answer for a message.
    pub fn find(&self, message: &str) -> MatchOutcome<'_> {
        let outcome = match self {
            MatchStrategy::OverlapScoring(index) => index.find(message),
            MatchStrategy::SubstringKeyword(table) => find_keyword(message, table),
        };

        match &outcome {
            MatchOutcome::Found(m) => {
                tracing::debug!(strategy = %self.kind(), index = m.index, score = m.score, "Matched message");
            }
            MatchOutcome::NoMatch => {
                tracing::debug!(strategy = %self.kind(), "No match for message");
            }
        }
        outcome
    }

    /// Get the strategy kind.
    pub fn kind(&self) -> StrategyKind {
        match self {
            MatchStrategy::OverlapScoring(_) => StrategyKind::Overlap,
            MatchStrategy::SubstringKeyword(_) => StrategyKind::Keyword,
        }
    }

    /// Number of entries or rules the strategy searches.
    pub fn len(&self) -> usize {
        match self {
            MatchStrategy::OverlapScoring(index) => index.len(),
            MatchStrategy::SubstringKeyword(table) => table.len(),
        }
    }

    /// Check if there is nothing to search.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check whether a text is one of the answers this strategy can return.
    pub fn knows_answer(&self, answer: &str) -> bool {
        match self {
            MatchStrategy::OverlapScoring(index) => index.knowledge().contains_answer(answer),
            MatchStrategy::SubstringKeyword(table) => table.contains_answer(answer),
        }
    }
}

impl From<KnowledgeSource> for MatchStrategy {
    fn from(source: KnowledgeSource) -> Self {
        Self::for_source(source)
    }
}

impl From<KnowledgeBase> for MatchStrategy {
    fn from(kb: KnowledgeBase) -> Self {
        MatchStrategy::OverlapScoring(OverlapIndex::new(kb))
    }
}

impl From<KeywordTable> for MatchStrategy {
    fn from(table: KeywordTable) -> Self {
        MatchStrategy::SubstringKeyword(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize() {
        assert_eq!(tokenize("  What IS\tllm \n"), vec!["what", "is", "llm"]);
        assert_eq!(tokenize("Hello!!"), vec!["hello!!"]);
        assert_eq!(tokenize("hi hi"), vec!["hi", "hi"]);
        assert!(tokenize("").is_empty());
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn test_strategy_follows_shape() {
        let pairs: KnowledgeBase = [("hello", "Hi there")].into_iter().collect();
        let strategy = MatchStrategy::from(KnowledgeSource::Pairs(pairs));
        assert_eq!(strategy.kind(), StrategyKind::Overlap);

        let rules: KeywordTable = [("hello", "Hi!")].into_iter().collect();
        let source = KnowledgeSource::Keywords(rules);
        assert_eq!(StrategyKind::for_source(&source), StrategyKind::Keyword);
        let strategy = MatchStrategy::from(source);
        assert_eq!(strategy.kind(), StrategyKind::Keyword);
    }

    #[test]
    fn test_strategies_differ_on_substrings() {
        let overlap = MatchStrategy::from(
            [("hello", "Hi!")].into_iter().collect::<KnowledgeBase>(),
        );
        let keyword = MatchStrategy::from(
            [("hello", "Hi!")].into_iter().collect::<KeywordTable>(),
        );

        assert_eq!(overlap.find("ohellos"), MatchOutcome::NoMatch);
        assert_eq!(keyword.find("ohellos").answer(), Some("Hi!"));
    }

    #[test]
    fn test_empty_knowledge_never_matches() {
        let overlap = MatchStrategy::from(KnowledgeBase::empty());
        let keyword = MatchStrategy::from(KeywordTable::default());

        for message in ["", "hello", "what is llm"] {
            assert_eq!(overlap.find(message), MatchOutcome::NoMatch);
            assert_eq!(keyword.find(message), MatchOutcome::NoMatch);
        }
        assert!(overlap.is_empty());
    }

    #[test]
    fn test_answer_or_fallback() {
        let strategy = MatchStrategy::from(
            [("hello", "Hi there")].into_iter().collect::<KnowledgeBase>(),
        );

        assert_eq!(strategy.find("hello").answer_or("fallback"), "Hi there");
        assert_eq!(strategy.find("Hello!!").answer_or("fallback"), "fallback");
    }

    #[test]
    fn test_knows_answer() {
        let strategy = MatchStrategy::from(portfolio_kb::portfolio_keywords());
        assert!(strategy.knows_answer("Hello! Thanks for visiting my portfolio."));
        assert!(!strategy.knows_answer(portfolio_kb::KEYWORDS_FALLBACK));
    }

    #[test]
    fn test_strategy_kind_serde() {
        assert_eq!(StrategyKind::Overlap.to_string(), "overlap");
        let kind: StrategyKind = toml::from_str::<std::collections::HashMap<String, StrategyKind>>(
            "strategy = \"keyword\"",
        )
        .unwrap()["strategy"];
        assert_eq!(kind, StrategyKind::Keyword);
    }
}
