//! Search filtering for the note list.
//!
//! Matching is a case-insensitive substring test against the title or the
//! content. The query is taken literally: whitespace is neither trimmed nor
//! used to split terms.

use tracing::trace;

use crate::note::Note;

/// Return the notes matching `query`, in their original order.
///
/// An empty query returns every note.
#[must_use]
pub fn filter<'a>(notes: &'a [Note], query: &str) -> Vec<&'a Note> {
    if query.is_empty() {
        return notes.iter().collect();
    }

    let needle = query.to_lowercase();
    let matched: Vec<&Note> = notes
        .iter()
        .filter(|note| note.matches_lowercase(&needle))
        .collect();

    trace!(
        "Search matched {} of {} notes",
        matched.len(),
        notes.len()
    );
    matched
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Note> {
        vec![
            Note::with_timestamp("Groceries", "milk, eggs", 3),
            Note::with_timestamp("Ideas", "Write a Rust CLI", 2),
            Note::with_timestamp("", "call mom", 1),
        ]
    }

    #[test]
    fn test_empty_query_returns_all_in_order() {
        let notes = sample();
        let result = filter(&notes, "");

        assert_eq!(result.len(), 3);
        for (found, original) in result.iter().zip(notes.iter()) {
            assert_eq!(found.id, original.id);
        }
    }

    #[test]
    fn test_matches_title_case_insensitively() {
        let notes = sample();
        let result = filter(&notes, "GROCER");

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].title, "Groceries");
    }

    #[test]
    fn test_matches_content() {
        let notes = sample();
        let result = filter(&notes, "rust");

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].title, "Ideas");
    }

    #[test]
    fn test_whitespace_is_literal() {
        let notes = sample();

        assert_eq!(filter(&notes, "call mom").len(), 1);
        assert_eq!(filter(&notes, " call").len(), 0);
        assert_eq!(filter(&notes, " ").len(), 3);
    }

    #[test]
    fn test_no_match() {
        let notes = sample();
        assert!(filter(&notes, "zebra").is_empty());
    }

    #[test]
    fn test_result_preserves_order() {
        let notes = vec![
            Note::with_timestamp("b note", "", 2),
            Note::with_timestamp("other", "", 1),
            Note::with_timestamp("a note", "", 0),
        ];
        let titles: Vec<&str> = filter(&notes, "note")
            .iter()
            .map(|n| n.title.as_str())
            .collect();
        assert_eq!(titles, vec!["b note", "a note"]);
    }

    #[test]
    fn test_unicode_case_folding() {
        let notes = vec![Note::with_timestamp("ÜBER", "Straße", 0)];
        assert_eq!(filter(&notes, "über").len(), 1);
        assert_eq!(filter(&notes, "STRASSE").len(), 0);
        assert_eq!(filter(&notes, "straße").len(), 1);
    }
}
