//! Engine lifecycle notifications.

use std::time::Duration;

use super::tour::Tour;

/// Notification emitted by the engine at its three lifecycle points.
///
/// Observers registered through [`Engine::subscribe`](super::Engine::subscribe)
/// receive events synchronously on the engine's thread, in FIFO order
/// relative to loop progress. `BestImproved` carries a cloned snapshot of
/// the new best tour — never a live reference into the engine — so readers
/// on other threads cannot observe tearing.
#[derive(Debug, Clone)]
pub enum EngineEvent {
    /// The population has been built and evaluated; the loop has not
    /// started yet.
    Initialized,

    /// A strictly better tour was found during the given generation.
    BestImproved {
        /// Generation counter at the time of the improvement.
        generation: usize,
        /// Snapshot of the new best tour.
        tour: Tour,
    },

    /// The run finished (generation cap reached or stop requested).
    Completed {
        /// Wall-clock duration of the run.
        elapsed: Duration,
        /// Human-readable elapsed-time summary, e.g. `"1.52 s"`.
        summary: String,
    },
}
