//! Genetic algorithm tour search for the traveling salesman problem.
//!
//! Searches for low-cost tours over a set of geographic points with a
//! generational genetic algorithm: tournament parent selection over a
//! distance-indexed population, two interchangeable crossover strategies,
//! probabilistic mutation, and generational replacement with best-solution
//! tracking and cooperative stopping.
//!
//! # Modules
//!
//! - [`model`] — Points and the precomputed distance/neighbor index
//! - [`ga`] — The generational engine, crossover strategies, and events
//! - [`error`] — Crate error taxonomy
//! - [`random`] — Seedable RNG construction
//!
//! # Example
//!
//! ```
//! use u_tsp::ga::{ClosestEdgeCrossover, Engine, EngineEvent, GaConfig};
//! use u_tsp::model::{Point, PointIndex};
//!
//! let index = PointIndex::new(vec![
//!     Point::new(0.0, 0.0),
//!     Point::new(0.0, 3.0),
//!     Point::new(4.0, 3.0),
//!     Point::new(4.0, 0.0),
//!     Point::new(2.0, 5.0),
//! ])?;
//!
//! let config = GaConfig::default()
//!     .with_max_generations(500)
//!     .with_seed(42);
//! let strategy = ClosestEdgeCrossover::from_config(&config);
//!
//! let mut engine = Engine::new(strategy, config)?;
//! engine.subscribe(|event| {
//!     if let EngineEvent::BestImproved { generation, tour } = event {
//!         println!("generation {generation}: fitness {:.3}", tour.fitness());
//!     }
//! });
//!
//! engine.initialize_population(50, &index)?;
//! let summary = engine.run(&index)?;
//! assert!(summary.best.fitness().is_finite());
//! # Ok::<(), u_tsp::Error>(())
//! ```

pub mod error;
pub mod ga;
pub mod model;
pub mod random;

pub use error::{Error, Result};
