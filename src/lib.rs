//! Orveyl core: from group presentations to tessellations of constant-curvature space.
//!
//! This crate turns a finitely presented group into a deduplicated graph of
//! spatial *chambers*, each tagged with an isometry of spherical, hyperbolic
//! or Euclidean space. It is built from three parts:
//! - [`rewrite`]: Knuth–Bendix completion of the group relations into a
//!   confluent shortlex rewrite system that canonicalizes words.
//! - [`tree`]: incremental Cayley-graph construction over canonical words,
//!   with breadth-first expansion and orbit tracing.
//! - [`geometry`]: curvature-generic trigonometry, 4×4 isometries, bivectors
//!   and their exponentials, reflections.
//!
//! [`tiling`] ties them together under a [`TilingConfig`], with optional
//! completion caching ([`cache`]).
//!
//! # Mathematical Foundations
//!
//! A chamber is a group element. Its canonical word is the shortlex-least word
//! naming it, computed by the completed rewrite system, and its transform is
//! the product of the generator isometries along that word. Because all words
//! for one element reduce to the same canonical word, every element is built
//! exactly once and every Cayley-graph edge joins the right pair of chambers.
//!
//! # References
//!
//! - Knuth, Bendix. "Simple word problems in universal algebras" (1970)
//! - Epstein et al. "Word Processing in Groups" (1992) – shortlex automatic structures
//! - Coxeter, "Regular Polytopes" (1973) – reflection groups and their chambers
//!
//! # Example
//!
//! ```
//! use orveyl_core::prelude::*;
//!
//! let presentation = Presentation::triangle(5, 3, 2).unwrap();
//! let representation = Representation::triangle(5, 3, 2).unwrap();
//! let config = TilingConfig::new(Signature::Spherical);
//!
//! let mut tree = tiling::build(&config, &presentation, representation).unwrap();
//! tree.expand(20, |_| {}).unwrap();
//! assert_eq!(tree.count(), 120);
//!
//! let w1 = tree.parse("ca").unwrap();
//! let w2 = tree.parse("ac").unwrap();
//! assert_eq!(tree.find(&w1), tree.find(&w2));
//! ```

pub mod arena;
pub mod cache;
pub mod config;
pub mod error;
pub mod fingerprint;
pub mod geometry;
pub mod representation;
pub mod rewrite;
pub mod tiling;
pub mod tree;

pub use arena::ChamberId;
pub use cache::{CacheError, CompletionCache};
pub use config::TilingConfig;
pub use error::{Result, TilingError};
pub use geometry::{Bivector, GeometryError, Isometry, Matrix4, Signature, Vector4};
pub use representation::Representation;
pub use rewrite::{
    Alphabet, CompletionConfig, CompletionError, Generator, KnuthBendix, Presentation,
    PresentationError, RewriteRule, RewriteSystem, Word,
};
pub use tree::{Chamber, OrbitTrace, WordTree};

/// Prelude for convenient usage.
pub mod prelude {
    pub use crate::arena::ChamberId;
    pub use crate::cache::CompletionCache;
    pub use crate::config::TilingConfig;
    pub use crate::error::TilingError;
    pub use crate::geometry::{Bivector, Isometry, Matrix4, Signature, Vector4};
    pub use crate::representation::Representation;
    pub use crate::rewrite::{
        Alphabet, CompletionConfig, Generator, KnuthBendix, Presentation, Progress, RewriteSystem,
        Word,
    };
    pub use crate::tiling;
    pub use crate::tree::{Chamber, OrbitTrace, WordTree};
}
