//! Substring keyword lookup.

use portfolio_kb::KeywordTable;

use super::{Match, MatchOutcome};

/// Find the first keyword rule whose keyword occurs in the message.
///
/// The message is lowercased; keywords are used as stored. Matching is by
/// substring, so `"ohellos"` hits the `"hello"` rule.
pub fn find_keyword<'a>(message: &str, table: &'a KeywordTable) -> MatchOutcome<'a> {
    let query = message.to_lowercase();

    table
        .iter()
        .enumerate()
        .find(|(_, rule)| query.contains(rule.keyword.as_str()))
        .map(|(index, rule)| {
            MatchOutcome::Found(Match {
                answer: rule.answer.as_str(),
                index,
                score: 1,
            })
        })
        .unwrap_or(MatchOutcome::NoMatch)
}
