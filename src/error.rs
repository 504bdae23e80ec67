//! Crate-level error type.

use crate::cache::CacheError;
use crate::geometry::{GeometryError, Signature};
use crate::rewrite::{CompletionError, Generator, PresentationError};
use thiserror::Error;

/// Anything that can stop a tiling from being built.
#[derive(Debug, Error)]
pub enum TilingError {
    #[error("malformed presentation: {0}")]
    Presentation(#[from] PresentationError),

    #[error(transparent)]
    Completion(#[from] CompletionError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error("completion cache: {0}")]
    Cache(#[from] CacheError),

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("I/O: {0}")]
    Io(#[from] std::io::Error),

    /// A generator has no isometry in the representation table.
    #[error("no isometry for generator {0}")]
    MissingRepresentation(Generator),

    /// The table and the alphabet disagree on the number of generators.
    #[error("representation has {entries} entries for {generators} generators")]
    RepresentationMismatch { generators: usize, entries: usize },

    #[error("configured for {expected} geometry but the representation is {found}")]
    SignatureMismatch {
        expected: Signature,
        found: Signature,
    },

    /// An axiom's two sides map to different isometries.
    #[error("relation {axiom} is off by {deviation:e}")]
    RelationViolated { axiom: String, deviation: f64 },

    /// A chamber transform disagrees with the product along its word.
    #[error("transform of chamber {word:?} is off by {deviation:e}")]
    TransformDrift { word: String, deviation: f64 },

    #[error("no reflection triangle with angles π/{p}, π/{q}, π/{r}")]
    UnsupportedTriangle { p: usize, q: usize, r: usize },
}

pub type Result<T, E = TilingError> = std::result::Result<T, E>;
