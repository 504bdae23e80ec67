//! String rewriting over interned generator alphabets.
//!
//! Words are sequences of [`Generator`] indices into an [`Alphabet`]; the
//! symbol characters only matter at the parse/display boundary. Words are
//! totally ordered by *shortlex*: shorter words precede longer ones and words
//! of equal length compare lexicographically by generator index, i.e. by the
//! position of each symbol in the alphabet.
//!
//! The pipeline is [`Presentation`] → [`KnuthBendix`] → [`RewriteSystem`].

pub mod completion;
pub mod presentation;
pub mod rule;
pub mod system;

pub use completion::{CompletionConfig, CompletionError, KnuthBendix, Progress};
pub use presentation::{Presentation, PresentationError};
pub use rule::RewriteRule;
pub use system::RewriteSystem;

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Maximum number of generators an alphabet may hold.
pub const MAX_GENERATORS: usize = 64;

/// Interned generator: an index into an [`Alphabet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Generator(u8);

impl Generator {
    /// Creates a generator from its alphabet index.
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    /// Index below [`MAX_GENERATORS`] taken from an alphabet position.
    #[inline]
    pub(crate) fn at(index: usize) -> Self {
        debug_assert!(index < MAX_GENERATORS);
        Self(index as u8)
    }

    /// Alphabet index.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "g{}", self.0)
    }
}

/// A word over an alphabet. Ordered by shortlex.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Word(Vec<Generator>);

impl Word {
    /// The empty word (group identity).
    pub const fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[Generator] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Generator> {
        self.0.iter()
    }

    pub fn last(&self) -> Option<Generator> {
        self.0.last().copied()
    }

    pub fn push(&mut self, g: Generator) {
        self.0.push(g);
    }

    /// Returns `self` followed by `g`.
    pub fn with(&self, g: Generator) -> Word {
        let mut out = Vec::with_capacity(self.len() + 1);
        out.extend_from_slice(&self.0);
        out.push(g);
        Word(out)
    }

    /// Returns `self` followed by `other`.
    pub fn concat(&self, other: &[Generator]) -> Word {
        let mut out = Vec::with_capacity(self.len() + other.len());
        out.extend_from_slice(&self.0);
        out.extend_from_slice(other);
        Word(out)
    }

    /// `word` repeated `times` times.
    pub fn repeat(word: &[Generator], times: usize) -> Word {
        Word(word.repeat(times))
    }

    /// True if `needle` occurs anywhere in this word.
    pub fn contains(&self, needle: &[Generator]) -> bool {
        needle.is_empty() || self.0.windows(needle.len()).any(|w| w == needle)
    }

    pub fn into_vec(self) -> Vec<Generator> {
        self.0
    }
}

impl From<Vec<Generator>> for Word {
    fn from(v: Vec<Generator>) -> Self {
        Word(v)
    }
}

impl From<&[Generator]> for Word {
    fn from(v: &[Generator]) -> Self {
        Word(v.to_vec())
    }
}

impl std::ops::Deref for Word {
    type Target = [Generator];
    fn deref(&self) -> &[Generator] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a Word {
    type Item = &'a Generator;
    type IntoIter = std::slice::Iter<'a, Generator>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<Generator> for Word {
    fn from_iter<I: IntoIterator<Item = Generator>>(iter: I) -> Self {
        Word(iter.into_iter().collect())
    }
}

impl Ord for Word {
    fn cmp(&self, other: &Self) -> Ordering {
        shortlex(&self.0, &other.0)
    }
}

impl PartialOrd for Word {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Shortlex order: length first, then lexicographic by generator index.
pub fn shortlex(a: &[Generator], b: &[Generator]) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Finite set of printable generator symbols with an inverse map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alphabet {
    symbols: Vec<char>,
    inverses: Vec<Generator>,
}

impl Alphabet {
    /// Builds an alphabet from its symbols and the index-aligned inverse
    /// symbols: `inverses[n]` is the inverse of `symbols[n]`.
    pub fn new(symbols: &str, inverses: &str) -> Result<Self, PresentationError> {
        let symbols: Vec<char> = symbols.chars().collect();
        let inverse_symbols: Vec<char> = inverses.chars().collect();

        if symbols.is_empty() {
            return Err(PresentationError::EmptyAlphabet);
        }
        if symbols.len() > MAX_GENERATORS {
            return Err(PresentationError::TooManyGenerators {
                count: symbols.len(),
            });
        }
        if symbols.len() != inverse_symbols.len() {
            return Err(PresentationError::LengthMismatch {
                generators: symbols.len(),
                inverses: inverse_symbols.len(),
            });
        }
        for (n, c) in symbols.iter().enumerate() {
            if symbols[..n].contains(c) {
                return Err(PresentationError::DuplicateSymbol(*c));
            }
        }

        let lookup = |c: char| {
            symbols
                .iter()
                .position(|&s| s == c)
                .map(Generator::at)
                .ok_or(PresentationError::UnknownSymbol(c))
        };
        let inverses = inverse_symbols
            .iter()
            .map(|&c| lookup(c))
            .collect::<Result<Vec<_>, _>>()?;

        for (n, inv) in inverses.iter().enumerate() {
            if inverses[inv.index()].index() != n {
                return Err(PresentationError::NonInvolutiveInverse(symbols[n]));
            }
        }

        Ok(Self { symbols, inverses })
    }

    /// Alphabet whose generators are all self-inverse.
    pub fn involutions(symbols: &str) -> Result<Self, PresentationError> {
        Self::new(symbols, symbols)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// All generators in alphabet order.
    pub fn generators(&self) -> impl Iterator<Item = Generator> + '_ {
        (0..self.symbols.len()).map(Generator::at)
    }

    pub fn symbol(&self, g: Generator) -> char {
        self.symbols[g.index()]
    }

    pub fn generator(&self, symbol: char) -> Option<Generator> {
        self.symbols.iter().position(|&s| s == symbol).map(Generator::at)
    }

    pub fn inverse(&self, g: Generator) -> Generator {
        self.inverses[g.index()]
    }

    /// Parses a symbol string into a word.
    pub fn parse(&self, text: &str) -> Result<Word, PresentationError> {
        text.chars()
            .map(|c| self.generator(c).ok_or(PresentationError::UnknownSymbol(c)))
            .collect()
    }

    /// Renders a word as its symbol string.
    pub fn format(&self, word: &[Generator]) -> String {
        word.iter().map(|&g| self.symbol(g)).collect()
    }
}
