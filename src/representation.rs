//! Generator → isometry tables.
//!
//! A [`Representation`] assigns each generator of an alphabet the isometry
//! it acts by. Chamber transforms are products of these entries along the
//! chamber's word, so every generator needs an entry before a word tree can
//! be built. Whether the table actually satisfies the group relations is not
//! checked implicitly; [`Representation::check_relations`] does it on demand.

use crate::error::{Result, TilingError};
use crate::geometry::{Isometry, Matrix4, Signature, Vector4};
use crate::rewrite::{Alphabet, Generator, Presentation};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Representation {
    signature: Signature,
    entries: Vec<Option<Isometry>>,
}

impl Representation {
    /// Empty table for `generators` generators, built under `signature`.
    pub fn new(generators: usize, signature: Signature) -> Self {
        Self {
            signature,
            entries: vec![None; generators],
        }
    }

    /// Table with every entry filled, in generator order.
    pub fn from_isometries(signature: Signature, isometries: Vec<Isometry>) -> Self {
        Self {
            signature,
            entries: isometries.into_iter().map(Some).collect(),
        }
    }

    /// Reflections in the sides of the geodesic triangle with angles π/p,
    /// π/q, π/r, matching [`Presentation::triangle`]: `a` and `b` meet at
    /// π/p, `b` and `c` at π/q, `a` and `c` at π/r.
    ///
    /// Spherical triangles (`1/p + 1/q + 1/r > 1`) act on x, y, z; hyperbolic
    /// ones act on x, y and the timelike w axis. Euclidean triangles have no
    /// linear reflection model here and are rejected.
    pub fn triangle(p: usize, q: usize, r: usize) -> Result<Self> {
        let unsupported = TilingError::UnsupportedTriangle { p, q, r };
        if p < 2 || q < 2 || r < 2 {
            return Err(unsupported);
        }
        let (pq, qr, pr, pqr) = (p * q, q * r, p * r, p * q * r);
        let signature = match (pq + qr + pr).cmp(&pqr) {
            std::cmp::Ordering::Greater => Signature::Spherical,
            std::cmp::Ordering::Less => Signature::Hyperbolic,
            std::cmp::Ordering::Equal => return Err(unsupported),
        };

        let angle = |m: usize| PI / m as f64;
        // unit normals with ⟨n_x, n_y⟩ = −cos(angle between mirrors)
        let (b0, b1) = (-angle(p).cos(), angle(p).sin());
        let c0 = -angle(r).cos();
        let c1 = (-angle(q).cos() - b0 * c0) / b1;
        let rest = 1.0 - c0 * c0 - c1 * c1;

        let n_a = Vector4::new(1.0, 0.0, 0.0, 0.0);
        let n_b = Vector4::new(b0, b1, 0.0, 0.0);
        let n_c = match signature {
            Signature::Spherical => Vector4::new(c0, c1, rest.max(0.0).sqrt(), 0.0),
            _ => Vector4::new(c0, c1, 0.0, (-rest).max(0.0).sqrt()),
        };

        let mirrors = [n_a, n_b, n_c]
            .iter()
            .map(|n| Matrix4::reflect(signature, n))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self::from_isometries(signature, mirrors))
    }

    pub fn signature(&self) -> Signature {
        self.signature
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sets the isometry for `g`.
    pub fn set(&mut self, g: Generator, isometry: Isometry) -> Result<()> {
        let entries = self.entries.len();
        let slot = self
            .entries
            .get_mut(g.index())
            .ok_or(TilingError::RepresentationMismatch {
                generators: g.index() + 1,
                entries,
            })?;
        *slot = Some(isometry);
        Ok(())
    }

    /// Builder form of [`set`](Self::set) keyed by alphabet symbol.
    pub fn with(mut self, alphabet: &Alphabet, symbol: char, isometry: Isometry) -> Result<Self> {
        let g = alphabet
            .generator(symbol)
            .ok_or(crate::rewrite::PresentationError::UnknownSymbol(symbol))?;
        self.set(g, isometry)?;
        Ok(self)
    }

    pub fn get(&self, g: Generator) -> Result<&Isometry> {
        self.entries
            .get(g.index())
            .and_then(Option::as_ref)
            .ok_or(TilingError::MissingRepresentation(g))
    }

    /// Checks that the table covers exactly the generators of `alphabet`.
    pub fn validate(&self, alphabet: &Alphabet) -> Result<()> {
        if self.entries.len() != alphabet.len() {
            return Err(TilingError::RepresentationMismatch {
                generators: alphabet.len(),
                entries: self.entries.len(),
            });
        }
        for g in alphabet.generators() {
            self.get(g)?;
        }
        Ok(())
    }

    /// Product of the entries along `word`, left to right.
    pub fn word_transform(&self, word: &[Generator]) -> Result<Isometry> {
        word.iter().try_fold(Matrix4::IDENTITY, |acc, &g| Ok(acc * *self.get(g)?))
    }

    /// Fails on the first axiom whose sides map to isometries further than
    /// `tolerance` apart (max-abs entry difference).
    pub fn check_relations(&self, presentation: &Presentation, tolerance: f64) -> Result<()> {
        for axiom in presentation.axioms() {
            let lhs = self.word_transform(&axiom.lhs)?;
            let rhs = self.word_transform(&axiom.rhs)?;
            let deviation = lhs.max_abs_diff(&rhs);
            if deviation > tolerance {
                let a = presentation.alphabet();
                return Err(TilingError::RelationViolated {
                    axiom: format!("{} = {}", a.format(&axiom.lhs), a.format(&axiom.rhs)),
                    deviation,
                });
            }
        }
        Ok(())
    }
}
