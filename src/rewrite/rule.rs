//! Oriented rewrite rules.

use super::{shortlex, Generator, Word};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A rule `lhs → rhs` with an activity flag.
///
/// Rules created by completion always satisfy `lhs >shortlex rhs`; a rule
/// that is later found reducible by a newer rule is deactivated rather than
/// removed so that rule indices stay stable during completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteRule {
    pub lhs: Word,
    pub rhs: Word,
    pub active: bool,
}

impl RewriteRule {
    /// Creates an active rule.
    pub fn new(lhs: Word, rhs: Word) -> Self {
        Self {
            lhs,
            rhs,
            active: true,
        }
    }

    /// Builds the rule for two equal words, oriented so the shortlex-larger
    /// side is the left side.
    pub fn oriented(a: Word, b: Word) -> Self {
        if shortlex(&a, &b) == Ordering::Less {
            Self::new(b, a)
        } else {
            Self::new(a, b)
        }
    }

    /// The relator rule `word → ε`.
    pub fn relator(word: Word) -> Self {
        Self::new(word, Word::empty())
    }

    /// The relator `(pair)^order → ε`, e.g. `(ab)^5`.
    pub fn cycle(pair: &[Generator], order: usize) -> Self {
        Self::relator(Word::repeat(pair, order))
    }

    /// True if the rule strictly decreases words under shortlex.
    pub fn is_reduction(&self) -> bool {
        shortlex(&self.lhs, &self.rhs) == Ordering::Greater
    }

    /// Structural equality on `(lhs, rhs)`, ignoring the activity flag.
    pub fn is_duplicate(&self, other: &RewriteRule) -> bool {
        self.lhs == other.lhs && self.rhs == other.rhs
    }

    /// Replaces every non-overlapping occurrence of `lhs`, scanning left to
    /// right, in one pass. Replacements are not rescanned.
    pub fn apply(&self, word: &[Generator]) -> Word {
        let mut out = Vec::with_capacity(word.len());
        self.apply_into(word, &mut out);
        Word::from(out)
    }

    /// Like [`apply`](Self::apply), writing into `out`. Returns true if at
    /// least one occurrence was replaced.
    pub(crate) fn apply_into(&self, word: &[Generator], out: &mut Vec<Generator>) -> bool {
        out.clear();
        let lhs = self.lhs.as_slice();
        if lhs.is_empty() || word.len() < lhs.len() {
            out.extend_from_slice(word);
            return false;
        }

        let mut changed = false;
        let mut n = 0;
        while n < word.len() {
            if word[n..].starts_with(lhs) {
                out.extend_from_slice(&self.rhs);
                n += lhs.len();
                changed = true;
            } else {
                out.push(word[n]);
                n += 1;
            }
        }
        changed
    }

    /// Overlap word of two left sides.
    ///
    /// Finds the longest non-empty suffix of `self.lhs` that is a prefix of
    /// `other.lhs` and returns `prefix(self.lhs) ++ overlap ++
    /// rest(other.lhs)`. The whole of `self.lhs` counts as a suffix, so a rule
    /// whose left side starts `other.lhs` yields `other.lhs` itself.
    pub fn superpose(&self, other: &RewriteRule) -> Option<Word> {
        let a = self.lhs.as_slice();
        let b = other.lhs.as_slice();
        (0..a.len())
            .find(|&start| b.starts_with(&a[start..]))
            .map(|start| {
                let overlap = a.len() - start;
                let mut out = Vec::with_capacity(start + b.len());
                out.extend_from_slice(a);
                out.extend_from_slice(&b[overlap..]);
                Word::from(out)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rewrite::Alphabet;

    fn alpha() -> Alphabet {
        Alphabet::involutions("abc").unwrap()
    }

    fn rule(lhs: &str, rhs: &str) -> RewriteRule {
        let a = alpha();
        RewriteRule::new(a.parse(lhs).unwrap(), a.parse(rhs).unwrap())
    }

    fn apply(r: &RewriteRule, word: &str) -> String {
        let a = alpha();
        a.format(&r.apply(&a.parse(word).unwrap()))
    }

    #[test]
    fn apply_replaces_non_overlapping_left_to_right() {
        let r = rule("aa", "");
        assert_eq!(apply(&r, "aaa"), "a");
        assert_eq!(apply(&r, "aaaa"), "");
        assert_eq!(apply(&r, "baab"), "bb");
        assert_eq!(apply(&r, "bcb"), "bcb");
        // single pass: the result is not rescanned
        assert_eq!(apply(&rule("ab", "a"), "aabb"), "aab");
        assert_eq!(apply(&rule("ca", "ac"), "cca"), "cac");
    }

    #[test]
    fn superpose_longest_overlap() {
        let a = alpha();
        let fmt = |w: Option<Word>| w.map(|w| a.format(&w));

        assert_eq!(fmt(rule("ab", "").superpose(&rule("bc", ""))), Some("abc".into()));
        assert_eq!(fmt(rule("abab", "").superpose(&rule("abc", ""))), Some("ababc".into()));
        assert_eq!(fmt(rule("aba", "").superpose(&rule("aba", ""))), Some("aba".into()));
        assert_eq!(fmt(rule("ab", "").superpose(&rule("abc", ""))), Some("abc".into()));
        assert_eq!(fmt(rule("ab", "").superpose(&rule("ca", ""))), None);
        // containment in the middle is not an overlap
        assert_eq!(fmt(rule("cbc", "").superpose(&rule("b", ""))), None);
    }

    #[test]
    fn orientation_and_helpers() {
        let a = alpha();
        let r = RewriteRule::oriented(a.parse("aba").unwrap(), a.parse("bab").unwrap());
        assert_eq!(a.format(&r.lhs), "bab");
        assert!(r.is_reduction());
        assert!(!rule("ab", "ba").is_reduction());

        let c = RewriteRule::cycle(&a.parse("ab").unwrap(), 3);
        assert_eq!(a.format(&c.lhs), "ababab");
        assert!(c.rhs.is_empty());

        let mut inactive = rule("aa", "");
        inactive.active = false;
        assert!(inactive.is_duplicate(&rule("aa", "")));
        assert!(!rule("aa", "").is_duplicate(&rule("aa", "b")));
    }
}
