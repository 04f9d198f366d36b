//! Geographic point type.

/// One location in the tour search space.
///
/// A point carries a 2-D coordinate, an optional ordinal carried over from
/// the external source (`seq`, `-1` when absent), and start/end role flags.
/// At most one point in a set should carry each role; a set with no
/// start/end pair is treated as a closed cycle by
/// [`PointIndex`](crate::model::PointIndex).
///
/// Ids are assigned by [`PointIndex`](crate::model::PointIndex) from
/// insertion order (0-based); they are never taken from `seq`.
///
/// # Examples
///
/// ```
/// use u_tsp::model::Point;
///
/// let p = Point::new(3.0, 4.0).with_seq(7).as_start();
/// assert_eq!(p.seq(), 7);
/// assert!(p.is_start());
/// assert!(!p.is_end());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    id: usize,
    seq: i32,
    x: f64,
    y: f64,
    is_start: bool,
    is_end: bool,
}

impl Point {
    /// Creates a point at the given coordinates with no role and `seq = -1`.
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            id: 0,
            seq: -1,
            x,
            y,
            is_start: false,
            is_end: false,
        }
    }

    /// Sets the source ordinal.
    pub fn with_seq(mut self, seq: i32) -> Self {
        self.seq = seq;
        self
    }

    /// Marks this point as the designated tour start.
    pub fn as_start(mut self) -> Self {
        self.is_start = true;
        self
    }

    /// Marks this point as the designated tour end.
    pub fn as_end(mut self) -> Self {
        self.is_end = true;
        self
    }

    /// Point id; equals the point's position in its owning index.
    pub fn id(&self) -> usize {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: usize) {
        self.id = id;
    }

    /// Ordinal carried from the external source (`-1` when absent).
    pub fn seq(&self) -> i32 {
        self.seq
    }

    /// X-coordinate.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y-coordinate.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Whether this point is the designated tour start.
    pub fn is_start(&self) -> bool {
        self.is_start
    }

    /// Whether this point is the designated tour end.
    pub fn is_end(&self) -> bool {
        self.is_end
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_defaults() {
        let p = Point::new(1.5, -2.5);
        assert_eq!(p.id(), 0);
        assert_eq!(p.seq(), -1);
        assert_eq!(p.x(), 1.5);
        assert_eq!(p.y(), -2.5);
        assert!(!p.is_start());
        assert!(!p.is_end());
    }

    #[test]
    fn test_builder_roles() {
        let s = Point::new(0.0, 0.0).as_start();
        let e = Point::new(1.0, 1.0).as_end();
        assert!(s.is_start() && !s.is_end());
        assert!(e.is_end() && !e.is_start());
    }

    #[test]
    fn test_distance_3_4_5() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_distance_symmetric() {
        let a = Point::new(1.0, 2.0);
        let b = Point::new(4.0, 6.0);
        assert!((a.distance_to(&b) - b.distance_to(&a)).abs() < 1e-10);
    }

    #[test]
    fn test_distance_to_self_is_zero() {
        let a = Point::new(-3.25, 8.5);
        assert_eq!(a.distance_to(&a), 0.0);
    }

    #[test]
    fn test_distance_geographic_pair() {
        // Coordinate pair from a real survey data set.
        let a = Point::new(-121.974015, 37.240532);
        let b = Point::new(-121.982876, 37.229842);
        let rounded = (a.distance_to(&b) * 1e6).round() / 1e6;
        assert_eq!(rounded, 0.013885);
    }
}
