//! Validated group presentations.

use super::{shortlex, Alphabet, Generator, RewriteRule, Word, MAX_GENERATORS};
use crate::fingerprint::{self, HashValue};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use thiserror::Error;

/// Rejected alphabet or axiom set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PresentationError {
    #[error("alphabet is empty")]
    EmptyAlphabet,

    #[error("alphabet has {count} generators (max {MAX_GENERATORS})")]
    TooManyGenerators { count: usize },

    #[error("{generators} generators but {inverses} inverses")]
    LengthMismatch { generators: usize, inverses: usize },

    #[error("symbol {0:?} appears twice in the alphabet")]
    DuplicateSymbol(char),

    #[error("symbol {0:?} is not in the alphabet")]
    UnknownSymbol(char),

    #[error("generator {0} is not in the alphabet")]
    UnknownGenerator(Generator),

    #[error("inverse map is not an involution at {0:?}")]
    NonInvolutiveInverse(char),

    #[error("axiom {0:?} has identical sides")]
    TrivialAxiom(String),
}

/// Alphabet plus oriented axioms, ready for completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Presentation {
    alphabet: Alphabet,
    axioms: Vec<RewriteRule>,
}

impl Presentation {
    /// Validates the axioms against `alphabet`. Each `(a, b)` declares
    /// `a = b`; pairs given smaller-side-first are reoriented.
    pub fn new(alphabet: Alphabet, axioms: Vec<(Word, Word)>) -> Result<Self, PresentationError> {
        let mut rules = Vec::with_capacity(axioms.len());
        for (lhs, rhs) in axioms {
            if let Some(&g) = lhs.iter().chain(rhs.iter()).find(|g| g.index() >= alphabet.len()) {
                return Err(PresentationError::UnknownGenerator(g));
            }
            match shortlex(&lhs, &rhs) {
                Ordering::Equal => {
                    return Err(PresentationError::TrivialAxiom(alphabet.format(&lhs)));
                }
                Ordering::Less => rules.push(RewriteRule::new(rhs, lhs)),
                Ordering::Greater => rules.push(RewriteRule::new(lhs, rhs)),
            }
        }
        Ok(Self {
            alphabet,
            axioms: rules,
        })
    }

    /// Parses symbols, inverse symbols and `(lhs, rhs)` axiom strings.
    pub fn parse(
        symbols: &str,
        inverses: &str,
        axioms: &[(&str, &str)],
    ) -> Result<Self, PresentationError> {
        let alphabet = Alphabet::new(symbols, inverses)?;
        let pairs = axioms
            .iter()
            .map(|(l, r)| Ok((alphabet.parse(l)?, alphabet.parse(r)?)))
            .collect::<Result<Vec<_>, PresentationError>>()?;
        Self::new(alphabet, pairs)
    }

    /// Presentation whose axioms are relators `w = ε`.
    pub fn from_relators(
        symbols: &str,
        inverses: &str,
        relators: &[&str],
    ) -> Result<Self, PresentationError> {
        let pairs: Vec<(&str, &str)> = relators.iter().map(|r| (*r, "")).collect();
        Self::parse(symbols, inverses, &pairs)
    }

    /// The (p, q, r) triangle reflection group on involutions `a`, `b`, `c`:
    /// `aa, bb, cc, (ab)^p, (bc)^q, (ac)^r`.
    pub fn triangle(p: usize, q: usize, r: usize) -> Result<Self, PresentationError> {
        let alphabet = Alphabet::involutions("abc")?;
        let [a, b, c] = [0, 1, 2].map(Generator::new);
        let relators = [
            RewriteRule::cycle(&[a], 2),
            RewriteRule::cycle(&[b], 2),
            RewriteRule::cycle(&[c], 2),
            RewriteRule::cycle(&[a, b], p),
            RewriteRule::cycle(&[b, c], q),
            RewriteRule::cycle(&[a, c], r),
        ];
        Self::new(alphabet, relators.into_iter().map(|r| (r.lhs, r.rhs)).collect())
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Oriented axioms in declaration order.
    pub fn axioms(&self) -> &[RewriteRule] {
        &self.axioms
    }

    /// Domain-separated SHA-256 digest of the alphabet and axioms.
    pub fn fingerprint(&self) -> HashValue {
        fingerprint::presentation(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axioms_are_oriented() {
        let p = Presentation::parse("ab", "ab", &[("aa", ""), ("aba", "bab")]).unwrap();
        let a = p.alphabet();
        assert_eq!(a.format(&p.axioms()[1].lhs), "bab");
        assert_eq!(a.format(&p.axioms()[1].rhs), "aba");
        assert!(p.axioms().iter().all(RewriteRule::is_reduction));

        let q = Presentation::parse("ab", "ab", &[("", "bb")]).unwrap();
        assert_eq!(q.alphabet().format(&q.axioms()[0].lhs), "bb");
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(
            Presentation::from_relators("abc", "ab", &["aa"]),
            Err(PresentationError::LengthMismatch { generators: 3, inverses: 2 })
        );
        assert_eq!(
            Presentation::from_relators("ab", "ab", &["ax"]),
            Err(PresentationError::UnknownSymbol('x'))
        );
        assert_eq!(
            Presentation::parse("ab", "ab", &[("ab", "ab")]),
            Err(PresentationError::TrivialAxiom("ab".into()))
        );
        let alpha = Alphabet::involutions("ab").unwrap();
        let bad = Word::from(vec![Generator::new(5)]);
        assert_eq!(
            Presentation::new(alpha, vec![(bad, Word::empty())]),
            Err(PresentationError::UnknownGenerator(Generator::new(5)))
        );
    }

    #[test]
    fn triangle_relators() {
        let p = Presentation::triangle(5, 3, 2).unwrap();
        let words: Vec<String> = p.axioms().iter().map(|r| p.alphabet().format(&r.lhs)).collect();
        assert_eq!(words, ["aa", "bb", "cc", "ababababab", "bcbcbc", "acac"]);
        assert!(matches!(
            Presentation::triangle(0, 3, 2),
            Err(PresentationError::TrivialAxiom(_))
        ));
    }

    #[test]
    fn fingerprint_tracks_content() {
        let a = Presentation::triangle(5, 3, 2).unwrap();
        let b = Presentation::triangle(5, 3, 2).unwrap();
        let c = Presentation::triangle(4, 3, 2).unwrap();
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_ne!(a.fingerprint(), c.fingerprint());
    }
}
