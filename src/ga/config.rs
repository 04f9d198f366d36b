//! Engine configuration.
//!
//! [`GaConfig`] holds every numeric tunable of the generational loop.
//! Nothing is read from ambient settings: construct a config, adjust it
//! through the builder methods, and hand it to the engine.

use crate::error::{Error, Result};

/// Configuration for the genetic tour search.
///
/// # Defaults
///
/// ```
/// use u_tsp::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.max_generations, 2500);
/// assert_eq!(config.group_size, 25);
/// assert_eq!(config.mutate_chance, 5);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_tsp::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_max_generations(10_000)
///     .with_group_size(40)
///     .with_mutate_chance(8)
///     .with_seed(42);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of generations the run loops through.
    pub max_generations: usize,

    /// Tournament group size: how many population members are sampled
    /// (with replacement) per generation. Capped at the population size.
    pub group_size: usize,

    /// Probability, in percent, that a generation's children are mutated.
    pub mutate_chance: u32,

    /// Number of ranked neighbors kept per point in the distance index.
    pub number_of_closest: usize,

    /// Probability, in percent, that the edge-preserving strategy's
    /// population seeding steps to a nearby point instead of a random one.
    pub chance_for_closest: u32,

    /// Length of the slice shuffled by the edge-preserving strategy's
    /// mutation.
    pub mutate_segment_size: usize,

    /// Random seed for reproducibility. `None` draws a fresh seed per run.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            max_generations: 2500,
            group_size: 25,
            mutate_chance: 5,
            number_of_closest: 5,
            chance_for_closest: 75,
            mutate_segment_size: 4,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the generation cap.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the tournament group size.
    pub fn with_group_size(mut self, n: usize) -> Self {
        self.group_size = n;
        self
    }

    /// Sets the mutation probability in percent (clamped to 100).
    pub fn with_mutate_chance(mut self, percent: u32) -> Self {
        self.mutate_chance = percent.min(100);
        self
    }

    /// Sets the per-point neighbor count.
    pub fn with_number_of_closest(mut self, n: usize) -> Self {
        self.number_of_closest = n;
        self
    }

    /// Sets the nearest-step probability in percent (clamped to 100).
    pub fn with_chance_for_closest(mut self, percent: u32) -> Self {
        self.chance_for_closest = percent.min(100);
        self
    }

    /// Sets the mutation segment length.
    pub fn with_mutate_segment_size(mut self, n: usize) -> Self {
        self.mutate_segment_size = n;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.max_generations == 0 {
            return Err(Error::invalid_configuration(
                "max_generations must be at least 1",
            ));
        }
        if self.group_size < 2 {
            return Err(Error::invalid_configuration(
                "group_size must be at least 2 to select two parents",
            ));
        }
        if self.mutate_chance > 100 {
            return Err(Error::invalid_configuration(
                "mutate_chance is a percentage and cannot exceed 100",
            ));
        }
        if self.chance_for_closest > 100 {
            return Err(Error::invalid_configuration(
                "chance_for_closest is a percentage and cannot exceed 100",
            ));
        }
        if self.number_of_closest == 0 {
            return Err(Error::invalid_configuration(
                "number_of_closest must be at least 1",
            ));
        }
        if self.mutate_segment_size < 2 {
            return Err(Error::invalid_configuration(
                "mutate_segment_size must be at least 2 to permute anything",
            ));
        }
        Ok(())
    }
}
