//! Edge-preserving crossover strategy.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::model::PointIndex;

use super::config::GaConfig;
use super::strategy::CrossoverStrategy;
use super::tour::{Tour, BLANK};

/// Crossover by matched edges: children keep every adjacent pair that
/// appears, in the same direction, in both parents.
///
/// The scan runs twice over parent 1 — forward for successor matches and
/// backward for predecessor matches against parent 2's successors — and
/// copies both endpoints of every matched edge. On a linear index the
/// designated end value is forced into the last slot of both children.
/// Blanks are patched by the engine's gap-fill from the other parent's
/// unmodified sequence.
///
/// The strategy also overrides population seeding (a greedy walk that
/// prefers nearby points with `chance_for_closest`% probability) and
/// mutation (a shared random window of `mutate_segment_size` slots,
/// shuffled in place in each child).
///
/// # Examples
///
/// ```
/// use u_tsp::ga::{ClosestEdgeCrossover, GaConfig};
///
/// let strategy = ClosestEdgeCrossover::from_config(&GaConfig::default());
/// assert_eq!(strategy.chance_for_closest(), 75);
/// assert_eq!(strategy.mutate_segment_size(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct ClosestEdgeCrossover {
    chance_for_closest: u32,
    mutate_segment_size: usize,
}

impl ClosestEdgeCrossover {
    /// Creates a strategy with explicit tunables.
    pub fn new(chance_for_closest: u32, mutate_segment_size: usize) -> Self {
        Self {
            chance_for_closest: chance_for_closest.min(100),
            mutate_segment_size,
        }
    }

    /// Creates a strategy from the engine configuration.
    pub fn from_config(config: &GaConfig) -> Self {
        Self::new(config.chance_for_closest, config.mutate_segment_size)
    }

    /// Probability, in percent, that seeding steps to a nearby point.
    pub fn chance_for_closest(&self) -> u32 {
        self.chance_for_closest
    }

    /// Length of the mutation window.
    pub fn mutate_segment_size(&self) -> usize {
        self.mutate_segment_size
    }
}

impl Default for ClosestEdgeCrossover {
    fn default() -> Self {
        Self::from_config(&GaConfig::default())
    }
}

/// Copies into a fresh child every edge of `p1` that `p2` traverses in the
/// same direction.
fn matched_edges(p1: &Tour, p2: &Tour) -> Tour {
    let n = p1.len();
    let mut child = Tour::blank(n, p1.is_cycle());
    let slots = child.nodes_mut();
    let a = p1.nodes();

    // Forward pass: a[i] followed by a[i+1] in both parents. A match copies
    // both endpoints and skips one position.
    let mut i = 0;
    while i + 1 < n {
        if let Some(j) = p2.position_of(a[i]) {
            if j + 1 < n && a[i + 1] == p2[j + 1] {
                slots[i] = a[i];
                slots[i + 1] = a[i + 1];
                i += 1;
            }
        }
        i += 1;
    }

    // Backward pass: the symmetric predecessor check.
    let mut i = n - 1;
    while i > 0 {
        if let Some(j) = p2.position_of(a[i]) {
            if j + 1 < n && a[i - 1] == p2[j + 1] {
                slots[i] = a[i];
                slots[i - 1] = a[i - 1];
                i -= 1;
            }
        }
        i -= 1;
    }

    child
}

impl CrossoverStrategy for ClosestEdgeCrossover {
    fn initial_tour<R: Rng>(&self, index: &PointIndex, rng: &mut R) -> Tour {
        let n = index.len();
        let mut tour = Tour::new(n, index.is_cycle());

        // Linear: walk from the designated start and reserve the final slot
        // for the designated end. Cycle: start anywhere.
        let (start, target, mut options) =
            if let (Some(start), Some(end)) = (index.start_index(), index.end_index()) {
                let options: Vec<usize> = (0..n).filter(|&i| i != start && i != end).collect();
                (start, n - 1, options)
            } else {
                let start = rng.random_range(0..n);
                (start, n, (0..n).collect())
            };

        let added = tour.add_node(start);
        debug_assert!(added);
        options.retain(|&id| id != start);

        let mut current = start;
        while tour.len() < target {
            let mut next = options[rng.random_range(0..options.len())];
            if rng.random_range(0..100) < self.chance_for_closest {
                let near: Vec<usize> = index
                    .closest(current)
                    .iter()
                    .copied()
                    .filter(|id| options.contains(id))
                    .collect();
                if !near.is_empty() {
                    next = near[rng.random_range(0..near.len())];
                }
            }

            let added = tour.add_node(next);
            debug_assert!(added);
            options.retain(|&id| id != next);
            current = next;
        }

        if let Some(end) = index.end_index() {
            let added = tour.add_node(end);
            debug_assert!(added);
        }

        tour
    }

    fn filter_inherited_genes(
        &self,
        parent1: &Tour,
        parent2: &Tour,
        index: &PointIndex,
    ) -> (Tour, Tour) {
        let mut child1 = matched_edges(parent1, parent2);
        let mut child2 = matched_edges(parent2, parent1);

        // The last slot always holds the designated end value, overriding
        // any blank or matched gene.
        if !index.is_cycle() {
            let n = index.len();
            let last = parent1[n - 1];
            child1.nodes_mut()[n - 1] = last;
            child2.nodes_mut()[n - 1] = last;
        }

        (child1, child2)
    }

    fn fill_sequence(&self, parent1: &Tour, parent2: &Tour) -> (Vec<usize>, Vec<usize>) {
        (parent1.nodes().to_vec(), parent2.nodes().to_vec())
    }

    fn mutate<R: Rng>(&self, child1: &mut Tour, child2: &mut Tour, rng: &mut R) {
        let n = child1.len();
        if n <= self.mutate_segment_size {
            return;
        }

        // One offset draw, shared by both children.
        let offset = rng.random_range(0..n - self.mutate_segment_size);
        let window = offset..offset + self.mutate_segment_size;
        child1.nodes_mut()[window.clone()].shuffle(rng);
        child2.nodes_mut()[window].shuffle(rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Point;
    use crate::random::create_rng;
    use std::collections::HashSet;

    fn cycle_index(n: usize) -> PointIndex {
        let points = (0..n)
            .map(|i| Point::new(i as f64, ((i * 3) % 5) as f64))
            .collect();
        PointIndex::new(points).expect("non-empty")
    }

    fn linear_index(n: usize) -> PointIndex {
        let points = (0..n)
            .map(|i| {
                let p = Point::new(i as f64, 0.0);
                if i == 0 {
                    p.as_start()
                } else if i == n - 1 {
                    p.as_end()
                } else {
                    p
                }
            })
            .collect();
        PointIndex::new(points).expect("non-empty")
    }

    fn is_permutation(nodes: &[usize], n: usize) -> bool {
        let unique: HashSet<usize> = nodes.iter().copied().collect();
        nodes.len() == n && unique.len() == n && nodes.iter().all(|&v| v < n)
    }

    #[test]
    fn test_matched_edges_known_parents() {
        // These 12-element parents share exactly eight positions worth of
        // directed edges, leaving four blanks per child.
        let index = cycle_index(12);
        let p1 = Tour::from_nodes(vec![9, 7, 0, 11, 6, 8, 3, 1, 4, 10, 2, 5], true);
        let p2 = Tour::from_nodes(vec![3, 8, 11, 6, 0, 9, 7, 5, 4, 10, 1, 2], true);

        let strategy = ClosestEdgeCrossover::default();
        let (c1, c2) = strategy.filter_inherited_genes(&p1, &p2, &index);

        assert_eq!(c1.nodes().iter().filter(|&&v| v == BLANK).count(), 4);
        assert_eq!(c2.nodes().iter().filter(|&&v| v == BLANK).count(), 4);

        assert_eq!(
            c1.nodes(),
            &[9, 7, BLANK, 11, 6, 8, 3, BLANK, 4, 10, BLANK, BLANK]
        );
        assert_eq!(
            c2.nodes(),
            &[3, 8, 11, 6, BLANK, 9, 7, BLANK, 4, 10, BLANK, BLANK]
        );
    }

    #[test]
    fn test_inherited_genes_are_subset_of_parent() {
        let index = cycle_index(12);
        let p1 = Tour::from_nodes(vec![9, 7, 0, 11, 6, 8, 3, 1, 4, 10, 2, 5], true);
        let p2 = Tour::from_nodes(vec![3, 8, 11, 6, 0, 9, 7, 5, 4, 10, 1, 2], true);

        let strategy = ClosestEdgeCrossover::default();
        let (c1, _) = strategy.filter_inherited_genes(&p1, &p2, &index);

        for (i, &v) in c1.nodes().iter().enumerate() {
            if v != BLANK {
                assert_eq!(v, p1[i], "inherited gene must sit at its parent position");
            }
        }
    }

    #[test]
    fn test_end_value_forced_on_linear_index() {
        let index = linear_index(12);
        let p1 = Tour::from_nodes(vec![0, 7, 9, 1, 6, 8, 3, 2, 4, 10, 5, 11], false);
        let p2 = Tour::from_nodes(vec![0, 8, 3, 6, 9, 7, 1, 5, 4, 10, 2, 11], false);

        let strategy = ClosestEdgeCrossover::default();
        let (c1, c2) = strategy.filter_inherited_genes(&p1, &p2, &index);

        assert_eq!(c1[11], p1[11]);
        assert_eq!(c2[11], p1[11]);
    }

    #[test]
    fn test_fill_sequence_is_raw_parent_order() {
        let p1 = Tour::from_nodes(vec![2, 0, 1], true);
        let p2 = Tour::from_nodes(vec![1, 2, 0], true);
        let strategy = ClosestEdgeCrossover::default();

        let (s1, s2) = strategy.fill_sequence(&p1, &p2);
        assert_eq!(s1, vec![2, 0, 1]);
        assert_eq!(s2, vec![1, 2, 0]);
    }

    #[test]
    fn test_initial_tour_cycle_is_permutation() {
        let index = cycle_index(15);
        let strategy = ClosestEdgeCrossover::default();
        let mut rng = create_rng(42);

        for _ in 0..25 {
            let tour = strategy.initial_tour(&index, &mut rng);
            assert!(is_permutation(tour.nodes(), 15), "bad tour: {:?}", tour.nodes());
            assert!(tour.is_cycle());
        }
    }

    #[test]
    fn test_initial_tour_linear_honors_roles() {
        let index = linear_index(10);
        let strategy = ClosestEdgeCrossover::default();
        let mut rng = create_rng(42);

        for _ in 0..25 {
            let tour = strategy.initial_tour(&index, &mut rng);
            assert!(is_permutation(tour.nodes(), 10), "bad tour: {:?}", tour.nodes());
            assert_eq!(tour[0], 0, "walk must begin at the designated start");
            assert_eq!(tour[9], 9, "walk must finish at the designated end");
        }
    }

    #[test]
    fn test_mutate_shuffles_only_the_window() {
        let strategy = ClosestEdgeCrossover::new(75, 4);
        let mut rng = create_rng(3);
        let before: Vec<usize> = (0..12).collect();
        let mut c1 = Tour::from_nodes(before.clone(), true);
        let mut c2 = Tour::from_nodes(before.iter().rev().copied().collect(), true);

        strategy.mutate(&mut c1, &mut c2, &mut rng);

        assert!(is_permutation(c1.nodes(), 12));
        assert!(is_permutation(c2.nodes(), 12));

        // Outside some 4-wide window, both children are untouched.
        let changed: Vec<usize> = (0..12).filter(|&i| c1[i] != before[i]).collect();
        if let (Some(&first), Some(&last)) = (changed.first(), changed.last()) {
            assert!(last - first < 4, "changes span beyond one window: {changed:?}");
        }
    }

    #[test]
    fn test_mutate_noop_when_tour_fits_in_window() {
        let strategy = ClosestEdgeCrossover::new(75, 4);
        let mut rng = create_rng(3);
        let mut c1 = Tour::from_nodes(vec![0, 1, 2, 3], true);
        let mut c2 = Tour::from_nodes(vec![3, 2, 1, 0], true);

        strategy.mutate(&mut c1, &mut c2, &mut rng);
        assert_eq!(c1.nodes(), &[0, 1, 2, 3]);
        assert_eq!(c2.nodes(), &[3, 2, 1, 0]);
    }

    #[test]
    fn test_from_config_clamps_chance() {
        let strategy = ClosestEdgeCrossover::new(200, 4);
        assert_eq!(strategy.chance_for_closest(), 100);
    }
}
