//! Knowledge definitions - the question/answer pairs the bot can reply with.

mod keywords;

pub use keywords::*;

use serde::{Deserialize, Serialize};

/// A single question/answer pair.
///
/// The question is free text that the matcher splits into lowercase tokens;
/// the answer is shown to the visitor verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    question: String,
    answer: String,
}

impl KnowledgeEntry {
    /// Create a new entry.
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }

    /// Get the question text.
    pub fn question(&self) -> &str {
        &self.question
    }

    /// Get the answer text.
    pub fn answer(&self) -> &str {
        &self.answer
    }
}

/// Ordered, read-only collection of [`KnowledgeEntry`] values.
///
/// Order matters: when two entries score the same, the earlier one wins.
/// Duplicate questions are allowed. There is no way to add or remove entries
/// once the base is built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KnowledgeBase {
    entries: Vec<KnowledgeEntry>,
}

/// TOML layout: one `[[entry]]` table per pair.
#[derive(Debug, Deserialize)]
struct TomlKnowledge {
    #[serde(default)]
    entry: Vec<KnowledgeEntry>,
}

impl KnowledgeBase {
    /// Create a knowledge base from entries, keeping their order.
    pub fn new(entries: Vec<KnowledgeEntry>) -> Self {
        Self { entries }
    }

    /// Create an empty knowledge base.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse the `knowledge-base.json` layout: an array of
    /// `{"question": ..., "answer": ...}` objects.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parse a TOML document made of `[[entry]]` tables.
    pub fn from_toml_str(source: &str) -> Result<Self, toml::de::Error> {
        let parsed: TomlKnowledge = toml::from_str(source)?;
        Ok(Self::new(parsed.entry))
    }

    /// Get all entries in order.
    pub fn entries(&self) -> &[KnowledgeEntry] {
        &self.entries
    }

    /// Get the entry at a position.
    pub fn get(&self, index: usize) -> Option<&KnowledgeEntry> {
        self.entries.get(index)
    }

    /// Get the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in order.
    pub fn iter(&self) -> std::slice::Iter<'_, KnowledgeEntry> {
        self.entries.iter()
    }

    /// Check whether some entry carries exactly this answer text.
    pub fn contains_answer(&self, answer: &str) -> bool {
        self.entries.iter().any(|e| e.answer == answer)
    }
}

impl<Q, A> FromIterator<(Q, A)> for KnowledgeBase
where
    Q: Into<String>,
    A: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (Q, A)>>(iter: I) -> Self {
        Self::new(
            iter.into_iter()
                .map(|(q, a)| KnowledgeEntry::new(q, a))
                .collect(),
        )
    }
}

impl<'a> IntoIterator for &'a KnowledgeBase {
    type Item = &'a KnowledgeEntry;
    type IntoIter = std::slice::Iter<'a, KnowledgeEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// The shape of knowledge handed to a widget.
///
/// The shape decides how messages are matched: pairs are scored by word
/// overlap, keyword rules by substring lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KnowledgeSource {
    /// Question/answer pairs.
    Pairs(KnowledgeBase),

    /// Keyword rules.
    Keywords(KeywordTable),
}

impl KnowledgeSource {
    /// Number of entries or rules.
    pub fn len(&self) -> usize {
        match self {
            KnowledgeSource::Pairs(kb) => kb.len(),
            KnowledgeSource::Keywords(table) => table.len(),
        }
    }

    /// Check if there are no entries or rules.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get a short name for the shape.
    pub fn shape(&self) -> &'static str {
        match self {
            KnowledgeSource::Pairs(_) => "pairs",
            KnowledgeSource::Keywords(_) => "keywords",
        }
    }
}

impl From<KnowledgeBase> for KnowledgeSource {
    fn from(kb: KnowledgeBase) -> Self {
        KnowledgeSource::Pairs(kb)
    }
}

impl From<KeywordTable> for KnowledgeSource {
    fn from(table: KeywordTable) -> Self {
        KnowledgeSource::Keywords(table)
    }
}
