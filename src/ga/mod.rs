//! Genetic tour search.
//!
//! A generational genetic algorithm over permutation-encoded tours, built
//! on trait-based strategy injection: the shared [`Engine`] owns selection,
//! gap-fill, best tracking, and replacement, while a [`CrossoverStrategy`]
//! contributes gene inheritance, fill sequences, and optional seeding and
//! mutation overrides.
//!
//! # Key Types
//!
//! - [`Tour`]: a candidate solution with cached fitness
//! - [`GaConfig`]: loop parameters (generation cap, group size, rates)
//! - [`Engine`]: executes the generational loop and emits [`EngineEvent`]s
//! - [`CutpointCrossover`]: cut-window gene inheritance
//! - [`ClosestEdgeCrossover`]: matched-edge gene inheritance
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and
//!   Machine Learning*
//! - Whitley, Starkweather & Fuquay (1989), *Scheduling Problems and
//!   Traveling Salesmen: The Genetic Edge Recombination Operator*

mod closest_edge;
mod config;
mod cutpoint;
mod engine;
mod events;
mod strategy;
mod tour;

pub use closest_edge::ClosestEdgeCrossover;
pub use config::GaConfig;
pub use cutpoint::CutpointCrossover;
pub use engine::{gap_fill, Engine, EngineState, RunSummary};
pub use events::EngineEvent;
pub use strategy::{CrossoverStrategy, Strategy, StrategyKind};
pub use tour::{Tour, BLANK};
