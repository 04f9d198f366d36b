//! Crossover strategy contract.
//!
//! The generational engine is generic over a [`CrossoverStrategy`]: the
//! strategy decides which genes children inherit, which sequence patches
//! their remaining blanks, and (optionally) how children mutate and how the
//! initial population is seeded. The engine owns everything else —
//! selection, gap-fill, fitness bookkeeping, and replacement.

use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::Error;
use crate::model::PointIndex;

use super::closest_edge::ClosestEdgeCrossover;
use super::config::GaConfig;
use super::cutpoint::CutpointCrossover;
use super::tour::Tour;

/// Strategy-specific pieces of the generational loop.
///
/// Implementations must uphold one contract: for a pair of parent
/// permutations of `0..n`, [`filter_inherited_genes`](Self::filter_inherited_genes)
/// returns children whose non-[`BLANK`](super::BLANK) values are a subset of
/// `0..n` without duplicates, and [`fill_sequence`](Self::fill_sequence)
/// returns permutations of `0..n`. Under that contract the engine's
/// gap-fill step always completes children into full permutations.
pub trait CrossoverStrategy {
    /// One-time hook after the population is built, before the first
    /// generation. The default does nothing.
    fn prepare<R: Rng>(&mut self, _index: &PointIndex, _rng: &mut R) {}

    /// Builds one starting tour for the initial population.
    ///
    /// The default draws a uniformly random permutation of all point ids.
    fn initial_tour<R: Rng>(&self, index: &PointIndex, rng: &mut R) -> Tour {
        let mut ids: Vec<usize> = (0..index.len()).collect();
        ids.shuffle(rng);
        Tour::from_nodes(ids, index.is_cycle())
    }

    /// Seeds two children with partial genes from the two parents; slots a
    /// child does not inherit are [`BLANK`](super::BLANK).
    fn filter_inherited_genes(
        &self,
        parent1: &Tour,
        parent2: &Tour,
        index: &PointIndex,
    ) -> (Tour, Tour);

    /// The ordered candidate sequences used to patch each child's blanks:
    /// the first sequence derives from `parent1`, the second from `parent2`.
    /// The engine patches child 1 from the second sequence and child 2 from
    /// the first.
    fn fill_sequence(&self, parent1: &Tour, parent2: &Tour) -> (Vec<usize>, Vec<usize>);

    /// Mutates both children of a generation. The default does nothing,
    /// leaving mutation as an extension point.
    fn mutate<R: Rng>(&self, _child1: &mut Tour, _child2: &mut Tour, _rng: &mut R) {}
}

/// Names the two built-in crossover strategies.
///
/// # Examples
///
/// ```
/// use u_tsp::ga::StrategyKind;
///
/// let kind: StrategyKind = "closest-edge".parse().unwrap();
/// assert_eq!(kind, StrategyKind::ClosestEdge);
/// assert!("simulated-annealing".parse::<StrategyKind>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StrategyKind {
    /// Cut-window reassembly: children keep a contiguous parent segment.
    Cutpoint,
    /// Edge-preserving reassembly: children keep edges common to both
    /// parents.
    ClosestEdge,
}

impl FromStr for StrategyKind {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self, Error> {
        match name.to_ascii_lowercase().as_str() {
            "cutpoint" => Ok(Self::Cutpoint),
            "closest-edge" | "closest_edge" => Ok(Self::ClosestEdge),
            _ => Err(Error::UnknownStrategy(name.to_string())),
        }
    }
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cutpoint => f.write_str("cutpoint"),
            Self::ClosestEdge => f.write_str("closest-edge"),
        }
    }
}

/// A runtime-selected strategy; delegates to the wrapped implementation.
///
/// Use this when the strategy choice arrives as data (configuration, user
/// input); when the choice is static, instantiate [`CutpointCrossover`] or
/// [`ClosestEdgeCrossover`] directly.
#[derive(Debug, Clone)]
pub enum Strategy {
    Cutpoint(CutpointCrossover),
    ClosestEdge(ClosestEdgeCrossover),
}

impl Strategy {
    /// Builds the named strategy, pulling its tunables from `config`.
    pub fn for_kind(kind: StrategyKind, config: &GaConfig) -> Self {
        match kind {
            StrategyKind::Cutpoint => Self::Cutpoint(CutpointCrossover::new()),
            StrategyKind::ClosestEdge => {
                Self::ClosestEdge(ClosestEdgeCrossover::from_config(config))
            }
        }
    }
}

impl CrossoverStrategy for Strategy {
    fn prepare<R: Rng>(&mut self, index: &PointIndex, rng: &mut R) {
        match self {
            Self::Cutpoint(s) => s.prepare(index, rng),
            Self::ClosestEdge(s) => s.prepare(index, rng),
        }
    }

    fn initial_tour<R: Rng>(&self, index: &PointIndex, rng: &mut R) -> Tour {
        match self {
            Self::Cutpoint(s) => s.initial_tour(index, rng),
            Self::ClosestEdge(s) => s.initial_tour(index, rng),
        }
    }

    fn filter_inherited_genes(
        &self,
        parent1: &Tour,
        parent2: &Tour,
        index: &PointIndex,
    ) -> (Tour, Tour) {
        match self {
            Self::Cutpoint(s) => s.filter_inherited_genes(parent1, parent2, index),
            Self::ClosestEdge(s) => s.filter_inherited_genes(parent1, parent2, index),
        }
    }

    fn fill_sequence(&self, parent1: &Tour, parent2: &Tour) -> (Vec<usize>, Vec<usize>) {
        match self {
            Self::Cutpoint(s) => s.fill_sequence(parent1, parent2),
            Self::ClosestEdge(s) => s.fill_sequence(parent1, parent2),
        }
    }

    fn mutate<R: Rng>(&self, child1: &mut Tour, child2: &mut Tour, rng: &mut R) {
        match self {
            Self::Cutpoint(s) => s.mutate(child1, child2, rng),
            Self::ClosestEdge(s) => s.mutate(child1, child2, rng),
        }
    }
}
