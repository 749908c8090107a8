//! Word-overlap scoring over question/answer pairs.

use std::collections::HashSet;

use portfolio_kb::KnowledgeBase;

use super::{tokenize, Match, MatchOutcome};

/// A knowledge base with its question tokens computed up front.
///
/// The knowledge base never changes after construction, so each question is
/// tokenized once instead of on every message.
#[derive(Debug, Clone)]
pub struct OverlapIndex {
    knowledge: KnowledgeBase,

    /// Token set per entry, same order as `knowledge`.
    question_tokens: Vec<HashSet<String>>,
}

impl OverlapIndex {
    /// Index a knowledge base.
    pub fn new(knowledge: KnowledgeBase) -> Self {
        let question_tokens = knowledge
            .iter()
            .map(|entry| tokenize(entry.question()).into_iter().collect())
            .collect();

        Self {
            knowledge,
            question_tokens,
        }
    }

    /// Get the indexed knowledge base.
    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    /// Get the number of entries.
    pub fn len(&self) -> usize {
        self.knowledge.len()
    }

    /// Check if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.knowledge.is_empty()
    }

    /// Score one entry against pre-tokenized query words.
    ///
    /// Every query token counts, repeats included, when it appears anywhere
    /// in the question.
    pub fn score(&self, index: usize, query_tokens: &[String]) -> usize {
        self.question_tokens
            .get(index)
            .map(|question| query_tokens.iter().filter(|t| question.contains(*t)).count())
            .unwrap_or(0)
    }

    /// Find the best-scoring entry for a message.
    ///
    /// # Algorithm
    ///
    /// 1. Tokenize the message
    /// 2. Score every entry in order
    /// 3. Keep the first entry with the strictly highest score
    /// 4. A best score of zero means `NoMatch`
    pub fn find(&self, message: &str) -> MatchOutcome<'_> {
        let query_tokens = tokenize(message);
        if query_tokens.is_empty() {
            return MatchOutcome::NoMatch;
        }

        let mut best: Option<(usize, usize)> = None;
        for index in 0..self.question_tokens.len() {
            let score = self.score(index, &query_tokens);
            let best_score = best.map(|(_, s)| s).unwrap_or(0);
            // Strictly greater, so ties keep the earlier entry
            if score > best_score {
                best = Some((index, score));
            }
        }

        best.and_then(|(index, score)| {
            self.knowledge.get(index).map(|entry| {
                MatchOutcome::Found(Match {
                    answer: entry.answer(),
                    index,
                    score,
                })
            })
        })
        .unwrap_or(MatchOutcome::NoMatch)
    }
}

impl From<KnowledgeBase> for OverlapIndex {
    fn from(knowledge: KnowledgeBase) -> Self {
        Self::new(knowledge)
    }
}
