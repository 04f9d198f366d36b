//! Generational loop execution.
//!
//! [`Engine`] owns the population and drives the complete evolutionary
//! process: seeding → tournament selection → gene inheritance → gap-fill →
//! mutation → fitness update → replacement, generation after generation,
//! until the configured cap or a cooperative stop request.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::Rng;

use crate::error::{Error, Result};
use crate::model::PointIndex;
use crate::random::create_rng;

use super::config::GaConfig;
use super::events::EngineEvent;
use super::strategy::CrossoverStrategy;
use super::tour::{Tour, BLANK};

/// Lifecycle state of an [`Engine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Constructed; the population has not been initialized or a run has
    /// not started yet.
    Idle,
    /// Inside [`Engine::run`].
    Running,
    /// A run has finished.
    Completed,
}

/// Result of a finished run.
///
/// The same data is observable incrementally through
/// [`EngineEvent`] notifications; the summary is the final snapshot.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Best tour seen across all generations.
    pub best: Tour,

    /// Generation during which the best tour was found (0 when the initial
    /// population was never beaten). Doubles as a run identifier.
    pub best_generation: usize,

    /// Number of generations actually executed.
    pub generations: usize,

    /// Whether the run ended on a stop request rather than the cap.
    pub stopped: bool,

    /// Wall-clock duration of the run.
    pub elapsed: Duration,
}

type ObserverFn = Box<dyn FnMut(&EngineEvent) + Send>;

/// Generational driver for the genetic tour search.
///
/// The engine is generic over its [`CrossoverStrategy`]; the strategy
/// contributes gene inheritance, fill sequences, and optional seeding and
/// mutation overrides, while the engine owns selection, gap-fill, best
/// tracking, and replacement.
///
/// The loop is single-threaded and synchronous. Observers are invoked
/// inline; the only cross-thread interaction is the stop flag from
/// [`stop_handle`](Self::stop_handle), sampled once per generation
/// boundary (an in-flight generation always completes).
///
/// # Examples
///
/// ```
/// use u_tsp::ga::{CutpointCrossover, Engine, GaConfig};
/// use u_tsp::model::{Point, PointIndex};
///
/// let index = PointIndex::new(vec![
///     Point::new(0.0, 0.0),
///     Point::new(0.0, 2.0),
///     Point::new(2.0, 2.0),
///     Point::new(2.0, 0.0),
///     Point::new(1.0, 3.0),
/// ]).unwrap();
///
/// let config = GaConfig::default().with_max_generations(200).with_seed(42);
/// let mut engine = Engine::new(CutpointCrossover::new(), config).unwrap();
/// engine.initialize_population(20, &index).unwrap();
///
/// let summary = engine.run(&index).unwrap();
/// assert!(summary.best.fitness().is_finite());
/// assert_eq!(summary.generations, 200);
/// ```
pub struct Engine<S: CrossoverStrategy> {
    config: GaConfig,
    strategy: S,
    population: Vec<Tour>,
    best: Option<Tour>,
    best_generation: usize,
    state: EngineState,
    stop: Arc<AtomicBool>,
    rng: StdRng,
    observers: Vec<ObserverFn>,
}

impl<S: CrossoverStrategy> Engine<S> {
    /// Creates an engine with the given strategy and configuration.
    ///
    /// Returns [`Error::InvalidConfiguration`] if the configuration fails
    /// [`GaConfig::validate`].
    pub fn new(strategy: S, config: GaConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => create_rng(seed),
            None => create_rng(rand::random()),
        };
        Ok(Self {
            config,
            strategy,
            population: Vec::new(),
            best: None,
            best_generation: 0,
            state: EngineState::Idle,
            stop: Arc::new(AtomicBool::new(false)),
            rng,
            observers: Vec::new(),
        })
    }

    /// Registers an observer for lifecycle events.
    pub fn subscribe(&mut self, observer: impl FnMut(&EngineEvent) + Send + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Fills the population with `size` strategy-seeded tours, evaluates
    /// them, and tracks the initial best. Clears any pending stop request
    /// and emits [`EngineEvent::Initialized`].
    ///
    /// Returns [`Error::InvalidConfiguration`] when `size < 2` (the
    /// tournament needs two parents and two replacement slots) or when the
    /// index holds fewer than two points.
    pub fn initialize_population(&mut self, size: usize, index: &PointIndex) -> Result<()> {
        if size < 2 {
            return Err(Error::invalid_configuration(
                "population size must be at least 2",
            ));
        }
        if index.len() < 2 {
            return Err(Error::invalid_configuration(
                "point set must contain at least two points",
            ));
        }

        self.population.clear();
        self.best = None;
        self.best_generation = 0;
        self.state = EngineState::Idle;
        self.stop.store(false, Ordering::Relaxed);

        for _ in 0..size {
            let mut tour = self.strategy.initial_tour(index, &mut self.rng);
            tour.determine_fitness(index);
            let improved = match &self.best {
                Some(best) => tour.fitness() < best.fitness(),
                None => true,
            };
            if improved {
                self.best = Some(tour.clone());
            }
            self.population.push(tour);
        }

        self.strategy.prepare(index, &mut self.rng);

        log::debug!(
            "initialized population of {} over {} points",
            self.population.len(),
            index.len()
        );
        self.emit(&EngineEvent::Initialized);
        Ok(())
    }

    /// Runs the generational loop until the generation cap or a stop
    /// request, then emits [`EngineEvent::Completed`] and returns the
    /// summary.
    ///
    /// Returns [`Error::NotInitialized`] if
    /// [`initialize_population`](Self::initialize_population) has not
    /// succeeded yet.
    pub fn run(&mut self, index: &PointIndex) -> Result<RunSummary> {
        if self.population.is_empty() {
            return Err(Error::NotInitialized);
        }

        self.state = EngineState::Running;
        let started = Instant::now();
        let mut generations = 0;
        let mut stopped = false;

        for generation in 1..=self.config.max_generations {
            if self.stop.load(Ordering::Relaxed) {
                stopped = true;
                break;
            }
            self.evolve(index, generation);
            generations = generation;
        }

        self.state = EngineState::Completed;
        let elapsed = started.elapsed();
        let summary = format!("{:.2} s", elapsed.as_secs_f64());
        let best = self
            .best
            .clone()
            .expect("an initialized population tracks a best tour");

        log::info!(
            "run completed after {generations} generations in {summary}, best fitness {:.6}",
            best.fitness()
        );
        self.emit(&EngineEvent::Completed {
            elapsed,
            summary,
        });

        Ok(RunSummary {
            best,
            best_generation: self.best_generation,
            generations,
            stopped,
            elapsed,
        })
    }

    /// One generation: selection, crossover, mutation, evaluation,
    /// replacement.
    fn evolve(&mut self, index: &PointIndex, generation: usize) {
        let group = self.select_group();
        let parent1 = self.population[group[0]].clone();
        let parent2 = self.population[group[1]].clone();

        let (mut child1, mut child2) =
            self.strategy
                .filter_inherited_genes(&parent1, &parent2, index);

        // Child 1 is patched from parent 2's sequence and vice versa.
        let (sequence1, sequence2) = self.strategy.fill_sequence(&parent1, &parent2);
        gap_fill(&mut child1, &sequence2);
        gap_fill(&mut child2, &sequence1);

        if self.rng.random_range(0..100) < self.config.mutate_chance {
            self.strategy.mutate(&mut child1, &mut child2, &mut self.rng);
        }

        child1.determine_fitness(index);
        child2.determine_fitness(index);

        let fittest = if child1.fitness() < child2.fitness() {
            &child1
        } else {
            &child2
        };
        let improved = match &self.best {
            Some(best) => fittest.fitness() < best.fitness(),
            None => true,
        };
        if improved {
            let snapshot = fittest.clone();
            log::debug!(
                "generation {generation}: best fitness improved to {:.6}",
                snapshot.fitness()
            );
            self.best = Some(snapshot.clone());
            self.best_generation = generation;
            self.emit(&EngineEvent::BestImproved {
                generation,
                tour: snapshot,
            });
        }

        // The two weakest group members make room for the children.
        let weakest = group[group.len() - 1];
        let second_weakest = group[group.len() - 2];
        self.population[weakest] = child1;
        self.population[second_weakest] = child2;
    }

    /// Draws the tournament group: `min(group_size, population)` indices
    /// with replacement, sorted by fitness ascending.
    fn select_group(&mut self) -> Vec<usize> {
        let size = self.config.group_size.min(self.population.len());
        let mut group: Vec<usize> = (0..size)
            .map(|_| self.rng.random_range(0..self.population.len()))
            .collect();
        group.sort_by(|&a, &b| {
            self.population[a]
                .fitness()
                .partial_cmp(&self.population[b].fitness())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        group
    }

    fn emit(&mut self, event: &EngineEvent) {
        for observer in &mut self.observers {
            observer(event);
        }
    }

    /// Requests a cooperative stop; the in-flight generation completes
    /// first.
    pub fn request_stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    /// A handle to the stop flag, settable from any thread.
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    /// Current lifecycle state.
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Best tour seen so far, if the population has been initialized.
    pub fn best_tour(&self) -> Option<&Tour> {
        self.best.as_ref()
    }

    /// Generation during which the current best was found.
    pub fn best_generation(&self) -> usize {
        self.best_generation
    }

    /// The injected strategy.
    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Number of tours in the population.
    pub fn population_len(&self) -> usize {
        self.population.len()
    }

    /// The population member at the given position.
    pub fn tour(&self, position: usize) -> Option<&Tour> {
        self.population.get(position)
    }

    /// Position of the first population member equal to `tour`, if any.
    pub fn index_of(&self, tour: &Tour) -> Option<usize> {
        self.population.iter().position(|member| member == tour)
    }

    /// Swaps in a new member at the given position and returns the
    /// displaced tour.
    ///
    /// # Panics
    ///
    /// Panics if `position` is out of bounds.
    pub fn replace(&mut self, position: usize, tour: Tour) -> Tour {
        std::mem::replace(&mut self.population[position], tour)
    }
}

/// Completes a partially-filled child into a full permutation.
///
/// Values of `sequence` already present in the child are dropped
/// (preserving sequence order); the remainder is assigned to the child's
/// [`BLANK`] slots left to right. When `sequence` is a permutation of the
/// id space, the child ends as a permutation as well.
///
/// # Panics
///
/// Panics if the child holds an id outside `0..sequence.len()`, or if the
/// sequence does not cover every blank slot.
pub fn gap_fill(child: &mut Tour, sequence: &[usize]) {
    let mut present = vec![false; sequence.len()];
    for &v in child.nodes() {
        if v != BLANK {
            present[v] = true;
        }
    }

    let mut remaining = sequence.iter().copied().filter(|&v| !present[v]);
    for slot in child.nodes_mut() {
        if *slot == BLANK {
            *slot = remaining
                .next()
                .expect("fill sequence must cover every blank slot");
        }
    }
}
