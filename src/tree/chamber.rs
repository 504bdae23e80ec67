//! Chambers: vertices of the Cayley graph.

use crate::arena::ChamberId;
use crate::geometry::{Isometry, Matrix4};
use crate::rewrite::{Generator, Word};

/// One cell of the tessellation.
///
/// A chamber is identified by its canonical word. Tree edges record the path
/// along which it was first discovered; neighbor edges are the full set of
/// Cayley-graph edges known so far, indexed by generator: `neighbor(g)` is
/// the chamber reached by acting with `g`.
#[derive(Debug, Clone, PartialEq)]
pub struct Chamber {
    pub(crate) id: ChamberId,
    pub(crate) word: Word,
    pub(crate) parent: Option<ChamberId>,
    /// Generator leading from the parent here.
    pub(crate) via: Option<Generator>,
    /// Generator leading from here back to the parent.
    pub(crate) back: Option<Generator>,
    pub(crate) children: Vec<Option<ChamberId>>,
    pub(crate) neighbors: Vec<Option<ChamberId>>,
    pub(crate) transform: Isometry,
}

impl Chamber {
    pub(crate) fn root(id: ChamberId, generators: usize) -> Self {
        Self {
            id,
            word: Word::empty(),
            parent: None,
            via: None,
            back: None,
            children: vec![None; generators],
            neighbors: vec![None; generators],
            transform: Matrix4::IDENTITY,
        }
    }

    pub fn id(&self) -> ChamberId {
        self.id
    }

    /// Canonical word from the root.
    pub fn word(&self) -> &Word {
        &self.word
    }

    /// Cumulative root-to-chamber isometry.
    pub fn transform(&self) -> &Isometry {
        &self.transform
    }

    pub fn parent(&self) -> Option<ChamberId> {
        self.parent
    }

    pub fn via(&self) -> Option<Generator> {
        self.via
    }

    pub fn back(&self) -> Option<Generator> {
        self.back
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Tree child reached by `g`.
    pub fn child(&self, g: Generator) -> Option<ChamberId> {
        self.children.get(g.index()).copied().flatten()
    }

    /// Graph neighbor reached by `g`.
    pub fn neighbor(&self, g: Generator) -> Option<ChamberId> {
        self.neighbors.get(g.index()).copied().flatten()
    }

    /// Known neighbors with the generator that reaches each.
    pub fn neighbors(&self) -> impl Iterator<Item = (Generator, ChamberId)> + '_ {
        self.neighbors
            .iter()
            .enumerate()
            .filter_map(|(n, id)| id.map(|id| (Generator::at(n), id)))
    }

    pub fn children(&self) -> impl Iterator<Item = ChamberId> + '_ {
        self.children.iter().filter_map(|c| *c)
    }

    /// Number of known neighbors.
    pub fn degree(&self) -> usize {
        self.neighbors.iter().filter(|n| n.is_some()).count()
    }

    /// True once every generator has a known neighbor.
    pub fn is_closed(&self) -> bool {
        self.neighbors.iter().all(Option::is_some)
    }
}
