//! Point index: distance and neighbor precomputation.

use crate::error::{Error, Result};
use crate::model::Point;

/// Default number of ranked neighbors kept per point.
pub const DEFAULT_NUMBER_OF_CLOSEST: usize = 5;

/// An ordered set of [`Point`]s with a precomputed pairwise-distance table
/// and, per point, a ranked list of nearest neighbors.
///
/// Insertion order is the canonical order: a point's id equals its position
/// in the index. Distances are stored in a dense row-major `n×n` matrix;
/// `rating(i, j)` is the Euclidean distance from point `i` to point `j` and
/// the matrix is symmetric with a zero diagonal.
///
/// The ranked neighbor list is produced by repeated minimum extraction over
/// a point's ratings row, so the point's own id ranks first (distance zero);
/// consumers skip ids they have already routed. The requested neighbor count
/// is capped at `n - 1`.
///
/// If exactly one point carries the start role and exactly one carries the
/// end role, the index is linear and exposes those positions through
/// [`start_index`](Self::start_index)/[`end_index`](Self::end_index);
/// otherwise the problem is a closed cycle.
///
/// The index is immutable after construction except through
/// [`add`](Self::add), [`remove`](Self::remove), and
/// [`replace`](Self::replace), each of which reassigns ids and rebuilds the
/// distance table, neighbor lists, and role lookups.
///
/// # Examples
///
/// ```
/// use u_tsp::model::{Point, PointIndex};
///
/// let index = PointIndex::new(vec![
///     Point::new(0.0, 0.0),
///     Point::new(3.0, 4.0),
///     Point::new(0.0, 8.0),
/// ]).unwrap();
///
/// assert_eq!(index.len(), 3);
/// assert!(index.is_cycle());
/// assert!((index.rating(0, 1) - 5.0).abs() < 1e-10);
/// assert_eq!(index.closest(0)[0], 0); // self ranks first at distance zero
/// ```
#[derive(Debug, Clone)]
pub struct PointIndex {
    points: Vec<Point>,
    ratings: Vec<f64>,
    closest: Vec<Vec<usize>>,
    number_of_closest: usize,
    start_end: Option<(usize, usize)>,
}

impl PointIndex {
    /// Builds an index keeping [`DEFAULT_NUMBER_OF_CLOSEST`] neighbors per
    /// point.
    ///
    /// Returns [`Error::InvalidConfiguration`] if `points` is empty.
    pub fn new(points: Vec<Point>) -> Result<Self> {
        Self::with_closest_count(points, DEFAULT_NUMBER_OF_CLOSEST)
    }

    /// Builds an index keeping `number_of_closest` neighbors per point
    /// (capped at `n - 1`).
    ///
    /// Returns [`Error::InvalidConfiguration`] if `points` is empty.
    pub fn with_closest_count(points: Vec<Point>, number_of_closest: usize) -> Result<Self> {
        if points.is_empty() {
            return Err(Error::invalid_configuration("point set must not be empty"));
        }
        let mut index = Self {
            points,
            ratings: Vec::new(),
            closest: Vec::new(),
            number_of_closest,
            start_end: None,
        };
        index.rebuild();
        Ok(index)
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the index holds no points. Construction forbids an empty
    /// set, but removal can drain one.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterates points in canonical (id) order.
    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }

    /// All points in canonical order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The point with the given id.
    ///
    /// # Panics
    ///
    /// Panics if `id` is out of bounds.
    pub fn point(&self, id: usize) -> &Point {
        &self.points[id]
    }

    /// Euclidean distance from point `from` to point `to`.
    ///
    /// # Panics
    ///
    /// Panics if either id is out of bounds.
    pub fn rating(&self, from: usize, to: usize) -> f64 {
        self.ratings[from * self.points.len() + to]
    }

    /// The ranked neighbor list of the given point, nearest first.
    ///
    /// # Panics
    ///
    /// Panics if `id` is out of bounds.
    pub fn closest(&self, id: usize) -> &[usize] {
        &self.closest[id]
    }

    /// Number of ranked neighbors requested per point.
    pub fn number_of_closest(&self) -> usize {
        self.number_of_closest
    }

    /// `true` when no start/end pair is designated and the tour closes back
    /// on itself.
    pub fn is_cycle(&self) -> bool {
        self.start_end.is_none()
    }

    /// Id of the designated start point; `None` on a cycle.
    pub fn start_index(&self) -> Option<usize> {
        self.start_end.map(|(start, _)| start)
    }

    /// Id of the designated end point; `None` on a cycle.
    pub fn end_index(&self) -> Option<usize> {
        self.start_end.map(|(_, end)| end)
    }

    /// Appends a point and rebuilds the distance table.
    pub fn add(&mut self, point: Point) {
        self.points.push(point);
        self.rebuild();
    }

    /// Removes and returns the point with the given id, shifting later ids
    /// down, and rebuilds the distance table.
    ///
    /// # Panics
    ///
    /// Panics if `id` is out of bounds.
    pub fn remove(&mut self, id: usize) -> Point {
        let removed = self.points.remove(id);
        self.rebuild();
        removed
    }

    /// Replaces the point at the given id, returning the displaced point,
    /// and rebuilds the distance table.
    ///
    /// # Panics
    ///
    /// Panics if `id` is out of bounds.
    pub fn replace(&mut self, id: usize, point: Point) -> Point {
        let displaced = std::mem::replace(&mut self.points[id], point);
        self.rebuild();
        displaced
    }

    fn rebuild(&mut self) {
        let n = self.points.len();
        for (id, point) in self.points.iter_mut().enumerate() {
            point.set_id(id);
        }

        self.ratings = vec![0.0; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let d = self.points[i].distance_to(&self.points[j]);
                self.ratings[i * n + j] = d;
                self.ratings[j * n + i] = d;
            }
        }

        let closest: Vec<Vec<usize>> = (0..n)
            .map(|i| find_closest(&self.ratings[i * n..(i + 1) * n], self.number_of_closest))
            .collect();
        self.closest = closest;

        let start = self.points.iter().position(|p| p.is_start());
        let end = self.points.iter().position(|p| p.is_end());
        self.start_end = match (start, end) {
            (Some(s), Some(e)) => Some((s, e)),
            _ => None,
        };
    }
}

impl std::ops::Index<usize> for PointIndex {
    type Output = Point;

    fn index(&self, id: usize) -> &Point {
        &self.points[id]
    }
}

/// Ranks the `number` smallest entries of a ratings row by repeated minimum
/// extraction. Ties go to the first-encountered id.
fn find_closest(row: &[f64], number: usize) -> Vec<usize> {
    let number = number.min(row.len().saturating_sub(1));
    let mut dist = row.to_vec();
    let mut closest = Vec::with_capacity(number);

    for _ in 0..number {
        let mut shortest = f64::MAX;
        let mut shortest_id = 0;
        for (id, &d) in dist.iter().enumerate() {
            if d < shortest {
                shortest = d;
                shortest_id = id;
            }
        }
        closest.push(shortest_id);
        dist[shortest_id] = f64::MAX;
    }

    closest
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_points() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(3.0, 4.0),
            Point::new(0.0, 8.0),
        ]
    }

    #[test]
    fn test_empty_point_set_rejected() {
        assert!(matches!(
            PointIndex::new(Vec::new()),
            Err(Error::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_ids_assigned_by_insertion_order() {
        let index = PointIndex::new(sample_points()).expect("non-empty");
        for (i, p) in index.iter().enumerate() {
            assert_eq!(p.id(), i);
        }
    }

    #[test]
    fn test_ratings_symmetric_with_zero_diagonal() {
        let index = PointIndex::new(sample_points()).expect("non-empty");
        for i in 0..index.len() {
            assert_eq!(index.rating(i, i), 0.0);
            for j in 0..index.len() {
                assert!((index.rating(i, j) - index.rating(j, i)).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_known_distances() {
        let index = PointIndex::new(sample_points()).expect("non-empty");
        assert!((index.rating(0, 1) - 5.0).abs() < 1e-10);
        assert!((index.rating(0, 2) - 8.0).abs() < 1e-10);
        assert!((index.rating(1, 2) - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_closest_ranked_ascending() {
        // Points on a line at x = 0, 1, 3, 6.
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(3.0, 0.0),
            Point::new(6.0, 0.0),
        ];
        let index = PointIndex::with_closest_count(points, 3).expect("non-empty");

        assert_eq!(index.closest(0), &[0, 1, 2]);
        assert_eq!(index.closest(1), &[1, 0, 2]);
        assert_eq!(index.closest(3), &[3, 2, 1]);
    }

    #[test]
    fn test_closest_count_capped_at_n_minus_1() {
        let index = PointIndex::with_closest_count(sample_points(), 99).expect("non-empty");
        for i in 0..index.len() {
            assert_eq!(index.closest(i).len(), index.len() - 1);
        }
    }

    #[test]
    fn test_cycle_without_role_pair() {
        let index = PointIndex::new(sample_points()).expect("non-empty");
        assert!(index.is_cycle());
        assert_eq!(index.start_index(), None);
        assert_eq!(index.end_index(), None);

        // A lone start flag does not make the index linear.
        let mut points = sample_points();
        points[0] = Point::new(0.0, 0.0).as_start();
        let index = PointIndex::new(points).expect("non-empty");
        assert!(index.is_cycle());
    }

    #[test]
    fn test_linear_with_start_and_end() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(3.0, 4.0).as_end(),
            Point::new(0.0, 8.0).as_start(),
        ];
        let index = PointIndex::new(points).expect("non-empty");
        assert!(!index.is_cycle());
        assert_eq!(index.start_index(), Some(2));
        assert_eq!(index.end_index(), Some(1));
    }

    #[test]
    fn test_add_rebuilds_ratings() {
        let mut index = PointIndex::new(sample_points()).expect("non-empty");
        index.add(Point::new(0.0, -6.0));

        assert_eq!(index.len(), 4);
        assert_eq!(index.point(3).id(), 3);
        assert!((index.rating(0, 3) - 6.0).abs() < 1e-10);
        assert!((index.rating(3, 2) - 14.0).abs() < 1e-10);
    }

    #[test]
    fn test_remove_shifts_ids_and_rebuilds() {
        let mut index = PointIndex::new(sample_points()).expect("non-empty");
        let removed = index.remove(1);

        assert_eq!(removed.x(), 3.0);
        assert_eq!(index.len(), 2);
        assert_eq!(index.point(1).id(), 1);
        // Former point 2 at (0, 8) is now id 1.
        assert!((index.rating(0, 1) - 8.0).abs() < 1e-10);
    }

    #[test]
    fn test_replace_rebuilds_roles() {
        let mut index = PointIndex::new(sample_points()).expect("non-empty");
        assert!(index.is_cycle());

        index.replace(0, Point::new(0.0, 0.0).as_start());
        index.replace(2, Point::new(0.0, 8.0).as_end());

        assert!(!index.is_cycle());
        assert_eq!(index.start_index(), Some(0));
        assert_eq!(index.end_index(), Some(2));
    }

    #[test]
    fn test_single_point_has_empty_closest() {
        let index = PointIndex::new(vec![Point::new(1.0, 1.0)]).expect("non-empty");
        assert!(index.closest(0).is_empty());
    }
}
