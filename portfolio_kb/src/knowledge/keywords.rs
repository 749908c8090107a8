//! Keyword rules - single keyword to canned answer.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A keyword and the answer given when a message contains it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordRule {
    pub keyword: String,
    pub answer: String,
}

impl KeywordRule {
    /// Create a new rule.
    pub fn new(keyword: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            answer: answer.into(),
        }
    }
}

/// Ordered keyword rules.
///
/// Serialized as a map (`{"hello": "Hi!"}`). Rules keep declaration order
/// when read, so the first rule written is the first rule checked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordTable {
    rules: Vec<KeywordRule>,
}

/// TOML layout: a `[keywords]` table.
#[derive(Debug, Deserialize)]
struct TomlKeywords {
    keywords: KeywordTable,
}

impl KeywordTable {
    /// Create a table from rules, keeping their order.
    pub fn new(rules: Vec<KeywordRule>) -> Self {
        Self { rules }
    }

    /// Parse a JSON object of `keyword: answer` pairs.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parse a TOML document with a `[keywords]` table.
    pub fn from_toml_str(source: &str) -> Result<Self, toml::de::Error> {
        let parsed: TomlKeywords = toml::from_str(source)?;
        Ok(parsed.keywords)
    }

    /// Get all rules in lookup order.
    pub fn rules(&self) -> &[KeywordRule] {
        &self.rules
    }

    /// Get the number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if there are no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterate over rules in lookup order.
    pub fn iter(&self) -> std::slice::Iter<'_, KeywordRule> {
        self.rules.iter()
    }

    /// Get the answer registered for an exact keyword.
    pub fn answer_for(&self, keyword: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|r| r.keyword == keyword)
            .map(|r| r.answer.as_str())
    }

    /// Check whether some rule carries exactly this answer text.
    pub fn contains_answer(&self, answer: &str) -> bool {
        self.rules.iter().any(|r| r.answer == answer)
    }
}

impl<K, A> FromIterator<(K, A)> for KeywordTable
where
    K: Into<String>,
    A: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, A)>>(iter: I) -> Self {
        Self::new(
            iter.into_iter()
                .map(|(k, a)| KeywordRule::new(k, a))
                .collect(),
        )
    }
}

impl<'a> IntoIterator for &'a KeywordTable {
    type Item = &'a KeywordRule;
    type IntoIter = std::slice::Iter<'a, KeywordRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

impl Serialize for KeywordTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.rules.len()))?;
        for rule in &self.rules {
            map.serialize_entry(&rule.keyword, &rule.answer)?;
        }
        map.end()
    }
}

struct KeywordTableVisitor;

impl<'de> Visitor<'de> for KeywordTableVisitor {
    type Value = KeywordTable;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of keyword to answer")
    }

    fn visit_map<M: MapAccess<'de>>(self, mut access: M) -> Result<Self::Value, M::Error> {
        let mut rules = Vec::with_capacity(access.size_hint().unwrap_or(0));
        // Later duplicates replace the earlier answer but keep its position
        while let Some((keyword, answer)) = access.next_entry::<String, String>()? {
            match rules.iter_mut().find(|r: &&mut KeywordRule| r.keyword == keyword) {
                Some(existing) => existing.answer = answer,
                None => rules.push(KeywordRule { keyword, answer }),
            }
        }
        Ok(KeywordTable { rules })
    }
}

impl<'de> Deserialize<'de> for KeywordTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(KeywordTableVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_creation() {
        let table: KeywordTable = [("hello", "Hi!"), ("contact", "Email me")]
            .into_iter()
            .collect();

        assert_eq!(table.len(), 2);
        assert_eq!(table.answer_for("contact"), Some("Email me"));
        assert_eq!(table.answer_for("missing"), None);
        assert!(table.contains_answer("Hi!"));
    }

    #[test]
    fn test_json_preserves_document_order() {
        // Not alphabetical on purpose
        let json = r#"{"projects": "P", "hello": "H", "contact": "C"}"#;
        let table = KeywordTable::from_json_str(json).unwrap();

        let keywords: Vec<_> = table.iter().map(|r| r.keyword.as_str()).collect();
        assert_eq!(keywords, vec!["projects", "hello", "contact"]);
    }

    #[test]
    fn test_json_duplicate_keyword_keeps_position() {
        let json = r#"{"hi": "first", "name": "N", "hi": "second"}"#;
        let table = KeywordTable::from_json_str(json).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.rules()[0].keyword, "hi");
        assert_eq!(table.rules()[0].answer, "second");
    }

    #[test]
    fn test_json_round_trip_order() {
        let table: KeywordTable = [("name", "N"), ("experience", "E")].into_iter().collect();
        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(json, r#"{"name":"N","experience":"E"}"#);
    }

    #[test]
    fn test_json_rejects_non_string_answer() {
        assert!(KeywordTable::from_json_str(r#"{"hello": 3}"#).is_err());
        assert!(KeywordTable::from_json_str(r#"["hello"]"#).is_err());
    }

    #[test]
    fn test_from_toml() {
        let source = r#"
            [keywords]
            hello = "Hello! Thanks for visiting."
            contact = "Use the contact section."
        "#;

        let table = KeywordTable::from_toml_str(source).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.answer_for("hello"), Some("Hello! Thanks for visiting."));
    }

    #[test]
    fn test_toml_preserves_document_order() {
        let source = r#"
            [keywords]
            zeta = "Z"
            alpha = "A"
            mid = "M"
        "#;

        let table = KeywordTable::from_toml_str(source).unwrap();
        let keywords: Vec<_> = table.iter().map(|r| r.keyword.as_str()).collect();
        assert_eq!(keywords, vec!["zeta", "alpha", "mid"]);
    }
}
