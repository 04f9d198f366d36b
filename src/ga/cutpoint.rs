//! Cut-window crossover strategy.

use rand::Rng;

use crate::model::PointIndex;

use super::strategy::CrossoverStrategy;
use super::tour::{Tour, BLANK};

/// Crossover by cut window: two cut indices `c1 < c2` split each parent
/// into head, middle, and tail, and children inherit the middle verbatim.
///
/// Unset cutpoints are drawn once per instance when the engine prepares the
/// strategy: `c1` uniformly from `[floor(0.10·n), ceil(0.25·n))` and `c2`
/// from `[max(floor(0.75·n), c1), ceil(0.90·n))`. Blanked slots are later
/// patched by the engine's gap-fill from the other parent's rotated
/// sequence, which starts just past `c2` and wraps — the classic crossover
/// reading frame.
///
/// Mutation is left at the trait's no-op default as an extension point.
///
/// # Examples
///
/// ```
/// use u_tsp::ga::CutpointCrossover;
///
/// let strategy = CutpointCrossover::with_cutpoints(2, 6);
/// assert_eq!(strategy.cut_one(), Some(2));
/// assert_eq!(strategy.cut_two(), Some(6));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CutpointCrossover {
    cut_one: Option<usize>,
    cut_two: Option<usize>,
}

impl CutpointCrossover {
    /// Creates a strategy whose cutpoints are drawn at preparation time.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a strategy with explicit cutpoints (`cut_one <= cut_two`).
    pub fn with_cutpoints(cut_one: usize, cut_two: usize) -> Self {
        Self {
            cut_one: Some(cut_one),
            cut_two: Some(cut_two),
        }
    }

    /// First cut index; `None` until drawn or set.
    pub fn cut_one(&self) -> Option<usize> {
        self.cut_one
    }

    /// Second cut index; `None` until drawn or set.
    pub fn cut_two(&self) -> Option<usize> {
        self.cut_two
    }

    fn cuts(&self) -> (usize, usize) {
        let c1 = self
            .cut_one
            .expect("cutpoints are drawn before the first generation");
        let c2 = self
            .cut_two
            .expect("cutpoints are drawn before the first generation");
        (c1, c2)
    }
}

/// Plausible range for the first cutpoint: 10–25% of the way in.
fn cut_one_range(count: usize) -> (usize, usize) {
    (
        (count as f64 * 0.10).floor() as usize,
        (count as f64 * 0.25).ceil() as usize,
    )
}

/// Plausible range for the second cutpoint: 75–90% of the way in.
fn cut_two_range(count: usize) -> (usize, usize) {
    (
        (count as f64 * 0.75).floor() as usize,
        (count as f64 * 0.90).ceil() as usize,
    )
}

/// Uniform draw from `[lo, hi)`; a degenerate range collapses to `lo`.
fn draw<R: Rng>(lo: usize, hi: usize, rng: &mut R) -> usize {
    if lo < hi {
        rng.random_range(lo..hi)
    } else {
        lo
    }
}

impl CrossoverStrategy for CutpointCrossover {
    fn prepare<R: Rng>(&mut self, index: &PointIndex, rng: &mut R) {
        let n = index.len();
        if self.cut_one.is_none() {
            let (lo, hi) = cut_one_range(n);
            self.cut_one = Some(draw(lo, hi, rng));
        }
        if self.cut_two.is_none() {
            let (lo, hi) = cut_two_range(n);
            let lo = lo.max(self.cut_one.expect("drawn above"));
            self.cut_two = Some(draw(lo, hi, rng));
        }
    }

    fn filter_inherited_genes(
        &self,
        parent1: &Tour,
        parent2: &Tour,
        index: &PointIndex,
    ) -> (Tour, Tour) {
        let (c1, c2) = self.cuts();

        let filter = |parent: &Tour| -> Tour {
            let mut child = Tour::new(parent.len(), parent.is_cycle());
            for i in 0..parent.len() {
                // Slots whose point id carries a start/end role survive even
                // outside the cut window.
                let role_slot = index.point(i).is_start() || index.point(i).is_end();
                let keep = (c1 <= i && i <= c2) || role_slot;
                let added = child.add_node(if keep { parent[i] } else { BLANK });
                debug_assert!(added);
            }
            child
        };

        (filter(parent1), filter(parent2))
    }

    fn fill_sequence(&self, parent1: &Tour, parent2: &Tour) -> (Vec<usize>, Vec<usize>) {
        let (_, c2) = self.cuts();

        // Everything after the second cutpoint, then everything up to and
        // including it.
        let rotate = |parent: &Tour| -> Vec<usize> {
            let nodes = parent.nodes();
            let split = (c2 + 1).min(nodes.len());
            let mut seq = nodes[split..].to_vec();
            seq.extend_from_slice(&nodes[..split]);
            seq
        };

        (rotate(parent1), rotate(parent2))
    }
}
