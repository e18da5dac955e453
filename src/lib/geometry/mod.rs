use core::f64;

use nalgebra::geometry::Point2;

/// An ordered sequence of points in field space (mm).
///
/// `closed` says whether the consumer should connect the last point back to
/// the first. The first point is never repeated at the end of `points`.
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    pub points: Vec<Point2<f64>>,
    pub closed: bool,
}

impl Path {
    pub fn closed(points: Vec<Point2<f64>>) -> Self {
        Path {
            points,
            closed: true,
        }
    }

    pub fn open(points: Vec<Point2<f64>>) -> Self {
        Path {
            points,
            closed: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&Point2<f64>> {
        self.points.first()
    }
}

/// Approximate the circle at `center` with a closed regular polygon of `segments` vertices.
/// Vertex `k` sits at angle `k * TAU / segments`, counter-clockwise from +X.
pub fn circle_path(center: Point2<f64>, radius: f64, segments: usize) -> Path {
    let step = f64::consts::TAU / segments as f64;
    let points = (0..segments)
        .map(|k| {
            let angle = k as f64 * step;
            Point2::new(
                center.x + radius * angle.cos(),
                center.y + radius * angle.sin(),
            )
        })
        .collect();
    Path::closed(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-10;

    fn points_equal(p1: Point2<f64>, p2: Point2<f64>) -> bool {
        (p1 - p2).norm() < EPSILON
    }

    #[test]
    fn test_circle_point_count() {
        let path = circle_path(Point2::new(0.0, 0.0), 1.0, 32);
        assert_eq!(path.points.len(), 32);
        assert!(path.closed);
    }

    #[test]
    fn test_circle_points_on_radius() {
        let center = Point2::new(45.0, 135.0);
        let path = circle_path(center, 22.5, 32);
        for p in &path.points {
            assert!(((p - center).norm() - 22.5).abs() < EPSILON);
        }
    }

    #[test]
    fn test_circle_quadrant_points() {
        let center = Point2::new(10.0, 20.0);
        let path = circle_path(center, 2.0, 32);
        assert!(points_equal(path.points[0], Point2::new(12.0, 20.0)));
        assert!(points_equal(path.points[8], Point2::new(10.0, 22.0)));
        assert!(points_equal(path.points[16], Point2::new(8.0, 20.0)));
        assert!(points_equal(path.points[24], Point2::new(10.0, 18.0)));
    }

    #[test]
    fn test_first_point_not_repeated() {
        let path = circle_path(Point2::new(0.0, 0.0), 1.0, 32);
        let last = *path.points.last().unwrap();
        assert!(!points_equal(*path.first().unwrap(), last));
    }

    #[test]
    fn test_triangle() {
        let path = circle_path(Point2::new(0.0, 0.0), 1.0, 3);
        assert_eq!(path.points.len(), 3);
        let expected = Point2::new(-0.5, 3.0_f64.sqrt() / 2.0);
        assert!(points_equal(path.points[1], expected));
    }

    #[test]
    fn test_open_and_empty() {
        let path = Path::open(vec![]);
        assert!(path.is_empty());
        assert!(!path.closed);
        assert!(path.first().is_none());
    }
}
