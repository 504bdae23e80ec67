//! Completed, immutable rewrite systems.

use super::completion::normalize;
use super::{shortlex, Alphabet, Generator, RewriteRule, Word};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Confluent, terminating shortlex rewrite system.
///
/// Only produced by a finished [`KnuthBendix`](super::KnuthBendix) run (or
/// loaded from a cache entry written from one). Rules are active and sorted
/// shortlex by left side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteSystem {
    alphabet: Alphabet,
    rules: Vec<RewriteRule>,
}

impl RewriteSystem {
    pub(crate) fn new(alphabet: Alphabet, rules: Vec<RewriteRule>) -> Self {
        Self { alphabet, rules }
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn rules(&self) -> &[RewriteRule] {
        &self.rules
    }

    /// Canonical form of `word`.
    pub fn reduce(&self, word: &[Generator]) -> Word {
        let mut scratch = Vec::with_capacity(word.len());
        normalize(&self.rules, Word::from(word), &mut scratch)
    }

    /// Parses and reduces a symbol string.
    pub fn reduce_str(&self, text: &str) -> Result<String, super::PresentationError> {
        let word = self.alphabet.parse(text)?;
        Ok(self.alphabet.format(&self.reduce(&word)))
    }

    /// True if no rule applies to `word`.
    pub fn is_reduced(&self, word: &[Generator]) -> bool {
        let word = Word::from(word);
        !self.rules.iter().any(|r| word.contains(&r.lhs))
    }

    /// Shortlex comparison of the canonical forms.
    pub fn compare(&self, a: &[Generator], b: &[Generator]) -> Ordering {
        shortlex(&self.reduce(a), &self.reduce(b))
    }

    pub fn invert(&self, g: Generator) -> Generator {
        self.alphabet.inverse(g)
    }

    /// `(g, g⁻¹)`.
    pub fn pair(&self, g: Generator) -> (Generator, Generator) {
        (g, self.invert(g))
    }

    /// Formal inverse: reversed word with each generator inverted.
    pub fn invert_word(&self, word: &[Generator]) -> Word {
        word.iter().rev().map(|&g| self.invert(g)).collect()
    }

    /// Checks that every overlap of two rules rewrites to one normal form
    /// along both sides.
    pub fn is_confluent(&self) -> bool {
        self.rules.iter().all(|l| {
            self.rules.iter().all(|r| match l.superpose(r) {
                Some(overlap) => self.reduce(&l.apply(&overlap)) == self.reduce(&r.apply(&overlap)),
                None => true,
            })
        })
    }
}
