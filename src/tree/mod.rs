//! Incremental Cayley-graph construction.
//!
//! A [`WordTree`] grows a tessellation one chamber at a time. Every word is
//! reduced by the rewrite system before the tree is consulted, so all words
//! naming one group element land on the same [`ChamberId`]. When a chamber is
//! created it is linked to its parent and then cross-linked to every existing
//! chamber one generator away, which turns the discovery tree into the
//! Cayley graph.
//!
//! Growth is explicit: [`WordTree::expand`] runs a fixed number of
//! breadth-first rounds and [`WordTree::orbit`] a bounded number of steps, so
//! interactive callers can interleave growth with other work.

mod chamber;

pub use chamber::Chamber;

use crate::arena::{Arena, ChamberId};
use crate::error::{Result, TilingError};
use crate::geometry::Signature;
use crate::representation::Representation;
use crate::rewrite::{Generator, RewriteSystem, Word};
use std::collections::VecDeque;
use tracing::{debug, trace};

/// Outcome of [`WordTree::orbit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrbitTrace {
    /// Advances performed.
    pub steps: usize,
    /// True if the walk returned to its seed.
    pub closed: bool,
}

/// Chamber graph over a completed rewrite system.
#[derive(Debug, Clone)]
pub struct WordTree {
    system: RewriteSystem,
    representation: Representation,
    chambers: Arena<Chamber>,
}

impl WordTree {
    /// Creates a tree holding only the root chamber.
    ///
    /// The representation must cover every generator of the system's
    /// alphabet.
    pub fn new(system: RewriteSystem, representation: Representation) -> Result<Self> {
        representation.validate(system.alphabet())?;
        let mut tree = Self {
            system,
            representation,
            chambers: Arena::new(),
        };
        tree.clear();
        Ok(tree)
    }

    pub fn system(&self) -> &RewriteSystem {
        &self.system
    }

    pub fn representation(&self) -> &Representation {
        &self.representation
    }

    pub fn signature(&self) -> Signature {
        self.representation.signature()
    }

    pub fn root(&self) -> ChamberId {
        ChamberId::ROOT
    }

    /// Number of chambers, root included.
    pub fn count(&self) -> usize {
        self.chambers.len()
    }

    /// # Panics
    /// Panics if `id` was not issued by this tree since the last
    /// [`clear`](Self::clear).
    pub fn chamber(&self, id: ChamberId) -> &Chamber {
        &self.chambers[id]
    }

    pub fn get(&self, id: ChamberId) -> Option<&Chamber> {
        self.chambers.get(id)
    }

    /// All chambers in creation order.
    pub fn chambers(&self) -> impl Iterator<Item = &Chamber> {
        self.chambers.values()
    }

    /// Discards every chamber and starts again from a fresh root.
    pub fn clear(&mut self) {
        let generators = self.system.alphabet().len();
        self.chambers.clear();
        self.chambers
            .allocate_with(|id| Chamber::root(id, generators));
    }

    /// Canonical form of `word`.
    pub fn reduce(&self, word: &[Generator]) -> Word {
        self.system.reduce(word)
    }

    /// Parses a symbol string over the system's alphabet.
    pub fn parse(&self, text: &str) -> Result<Word> {
        Ok(self.system.alphabet().parse(text)?)
    }

    /// Chamber named by `word`, if it has been built.
    pub fn find(&self, word: &[Generator]) -> Option<ChamberId> {
        self.walk(&self.reduce(word))
    }

    /// Follows tree edges from the root along an already reduced word.
    fn walk(&self, word: &[Generator]) -> Option<ChamberId> {
        word.iter()
            .try_fold(ChamberId::ROOT, |here, &g| self.chambers[here].child(g))
    }

    /// Follows neighbor edges from `from` without reducing `word`.
    pub fn thru(&self, from: ChamberId, word: &[Generator]) -> Option<ChamberId> {
        word.iter()
            .try_fold(from, |here, &g| self.chambers.get(here)?.neighbor(g))
    }

    pub fn parent(&self, id: ChamberId) -> Option<ChamberId> {
        self.chambers.get(id)?.parent()
    }

    /// Generator leading from `id` to its parent.
    pub fn back(&self, id: ChamberId) -> Option<Generator> {
        self.chambers.get(id)?.back()
    }

    /// Graph neighbors of `id`, in generator order.
    pub fn neighbors(&self, id: ChamberId) -> impl Iterator<Item = ChamberId> + '_ {
        self.chambers
            .get(id)
            .into_iter()
            .flat_map(|c| c.neighbors().map(|(_, n)| n))
    }

    /// Builds the chamber for `word` and any missing chambers along its
    /// canonical path.
    ///
    /// `on_add` runs once per created chamber, in creation order. Returns
    /// the last chamber created, or `None` if the word was already present.
    pub fn add<F>(&mut self, word: &[Generator], mut on_add: F) -> Result<Option<ChamberId>>
    where
        F: FnMut(&Chamber),
    {
        let word = self.reduce(word);
        let mut here = ChamberId::ROOT;
        let mut added = None;

        for (n, &g) in word.iter().enumerate() {
            if let Some(next) = self.chambers[here].child(g) {
                here = next;
                continue;
            }
            here = self.create(here, g, Word::from(&word[..=n]))?;
            self.cross_link(here);
            on_add(&self.chambers[here]);
            added = Some(here);
        }
        Ok(added)
    }

    fn create(&mut self, parent: ChamberId, g: Generator, word: Word) -> Result<ChamberId> {
        let transform = self.chambers[parent].transform * *self.representation.get(g)?;
        let generators = self.system.alphabet().len();
        let back = self.system.invert(g);

        let id = self.chambers.allocate_with(|id| Chamber {
            id,
            word,
            parent: Some(parent),
            via: Some(g),
            back: Some(back),
            children: vec![None; generators],
            neighbors: vec![None; generators],
            transform,
        });
        self.chambers[parent].children[g.index()] = Some(id);
        self.link(parent, g, id);
        trace!(chamber = id.as_u32(), parent = parent.as_u32(), "created chamber");
        Ok(id)
    }

    /// Records `from --g--> to` and the reverse edge `to --g⁻¹--> from`.
    fn link(&mut self, from: ChamberId, g: Generator, to: ChamberId) {
        self.chambers[from].neighbors[g.index()] = Some(to);
        let back = self.system.invert(g);
        self.chambers[to].neighbors[back.index()] = Some(from);
    }

    fn cross_link(&mut self, here: ChamberId) {
        let word = self.chambers[here].word.clone();
        let generators: Vec<Generator> = self.system.alphabet().generators().collect();
        for h in generators {
            match self.find(&word.with(h)) {
                Some(other) if other != here => self.link(here, h, other),
                _ => {}
            }
        }
    }

    /// Chambers missing at least one neighbor, in breadth-first tree order.
    pub fn frontier(&self) -> Vec<ChamberId> {
        let mut out = Vec::new();
        let mut queue = VecDeque::from([ChamberId::ROOT]);
        while let Some(id) = queue.pop_front() {
            let chamber = &self.chambers[id];
            queue.extend(chamber.children());
            if !chamber.is_closed() {
                out.push(id);
            }
        }
        out
    }

    /// Words of the [`frontier`](Self::frontier) chambers.
    pub fn frontier_words(&self) -> Vec<Word> {
        self.frontier()
            .into_iter()
            .map(|id| self.chambers[id].word.clone())
            .collect()
    }

    /// Grows the graph by `iterations` breadth-first rounds.
    ///
    /// The first round extends every frontier word by each generator except
    /// the inverse of its last letter; later rounds extend only the words
    /// that created a chamber in the previous round.
    pub fn expand<F>(&mut self, iterations: usize, mut on_add: F) -> Result<&mut Self>
    where
        F: FnMut(&Chamber),
    {
        let generators: Vec<Generator> = self.system.alphabet().generators().collect();
        let mut words = self.frontier_words();

        for iteration in 0..iterations {
            if words.is_empty() {
                break;
            }
            debug!(iteration, seeds = words.len(), chambers = self.count(), "expanding");
            let mut next = Vec::new();
            for word in &words {
                let undo = word.last().map(|g| self.system.invert(g));
                for &g in &generators {
                    if undo == Some(g) {
                        continue;
                    }
                    let candidate = self.reduce(&word.with(g));
                    if self.add(&candidate, &mut on_add)?.is_some() {
                        next.push(candidate);
                    }
                }
            }
            words = next;
        }
        Ok(self)
    }

    /// Walks from `seed`, adding each visited word and then appending the
    /// next generator of `sequence` (cyclically), until the reduced word
    /// returns to the reduced seed or `limit` steps have been taken. At
    /// least one step is always taken.
    pub fn orbit<F>(
        &mut self,
        seed: &[Generator],
        sequence: &[Generator],
        limit: usize,
        mut on_add: F,
    ) -> Result<OrbitTrace>
    where
        F: FnMut(&Chamber),
    {
        let seed = self.reduce(seed);
        let mut here = seed.clone();
        let mut steps = 0;
        loop {
            self.add(&here, &mut on_add)?;
            let advanced = match sequence.len() {
                0 => here,
                len => here.with(sequence[steps % len]),
            };
            here = self.reduce(&advanced);
            steps += 1;
            if here == seed || steps >= limit {
                break;
            }
        }
        let closed = here == seed;
        debug!(steps, closed, chambers = self.count(), "orbit finished");
        Ok(OrbitTrace { steps, closed })
    }

    /// Checks that every chamber's transform is the product of the
    /// representation along its word, within `tolerance`.
    pub fn verify_transforms(&self, tolerance: f64) -> Result<()> {
        for chamber in self.chambers() {
            let expected = self.representation.word_transform(&chamber.word)?;
            let deviation = chamber.transform.max_abs_diff(&expected);
            if deviation > tolerance {
                return Err(TilingError::TransformDrift {
                    word: self.system.alphabet().format(&chamber.word),
                    deviation,
                });
            }
        }
        Ok(())
    }
}
