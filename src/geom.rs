pub(crate) type Point = (f64, f64);

/// Homogeneous 2D rotation followed by translation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Affine2 {
    matrix: [[f64; 3]; 3],
}

impl Affine2 {
    pub(crate) fn new(theta: f64, origin: Point) -> Self {
        let (s, c) = theta.sin_cos();

        return Affine2 {
            matrix: [
                [c, -s, origin.0],
                [s, c, origin.1],
                [0.0, 0.0, 1.0],
            ],
        };
    }

    pub(crate) fn apply(&self, point: Point) -> Point {
        let m = &self.matrix;
        let h = [point.0, point.1, 1.0];

        return (
            m[0][0] * h[0] + m[0][1] * h[1] + m[0][2] * h[2],
            m[1][0] * h[0] + m[1][1] * h[1] + m[1][2] * h[2],
        );
    }
}

pub(crate) fn transform_points(points: &[Point], theta: f64, origin: Point) -> Vec<Point> {
    let transform = Affine2::new(theta, origin);
    return points.iter().map(|p| transform.apply(*p)).collect();
}

/// Samples the arc from `angle` down to 0 on a circle of radius `r`.
///
/// Only the upper half circle is traced, so `angle` is meaningful in `[0, pi]`.
/// The last point is exactly `(r, 0)`.
pub(crate) fn sample_arc(angle: f64, r: f64, n_points: usize) -> Vec<Point> {
    if n_points == 0 {
        return vec![];
    }

    let x_start = r * angle.cos();
    let x_end = r;
    let dx = if n_points > 1 {
        (x_end - x_start) / ((n_points - 1) as f64)
    } else {
        0.0
    };

    let mut output = Vec::with_capacity(n_points);
    let mut x = x_start;
    for _ in 0..(n_points - 1) {
        output.push((x, (r * r - x * x).sqrt()));
        x += dx;
    }
    output.push((r, 0.0));

    return output;
}

/// Arc of `angle` radians placed at `origin`, starting from direction `offset`.
pub(crate) fn angle_marker(
    angle: f64,
    offset: f64,
    origin: Point,
    r: f64,
    n_points: usize,
) -> Vec<Point> {
    return transform_points(&sample_arc(angle, r, n_points), offset, origin);
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_3, PI};

    use super::{angle_marker, sample_arc, transform_points, Affine2, Point};

    const EPS: f64 = 1e-9;

    fn close(a: Point, b: Point) -> bool {
        return (a.0 - b.0).abs() < EPS && (a.1 - b.1).abs() < EPS;
    }

    fn some_points() -> Vec<Point> {
        return vec![(0.0, 0.0), (1.0, 0.0), (-2.5, 0.75), (3.0, -4.0), (0.1, 9.0)];
    }

    #[test]
    fn identity_leaves_points_unchanged() {
        let points = some_points();
        assert_eq!(transform_points(&points, 0.0, (0.0, 0.0)), points);
        assert_eq!(Affine2::new(0.0, (0.0, 0.0)).apply((2.0, -3.0)), (2.0, -3.0));
    }

    #[test]
    fn preserves_count_and_order() {
        for n in 0..20 {
            let points: Vec<Point> = (0..n).map(|i| (i as f64, -(i as f64))).collect();
            let moved = transform_points(&points, 0.3, (1.0, 2.0));
            assert_eq!(moved.len(), n);
            for (p, q) in points.iter().zip(moved.iter()) {
                assert!(close(Affine2::new(0.3, (1.0, 2.0)).apply(*p), *q));
            }
        }
    }

    #[test]
    fn quarter_turn_and_shift() {
        let moved = transform_points(&[(1.0, 0.0), (0.0, 1.0)], FRAC_PI_2, (5.0, -1.0));
        assert!(close(moved[0], (5.0, 0.0)));
        assert!(close(moved[1], (4.0, -1.0)));
    }

    #[test]
    fn rotations_about_origin_compose() {
        let points = some_points();
        let (a, b) = (0.4, -1.3);

        let twice = transform_points(&transform_points(&points, a, (0.0, 0.0)), b, (0.0, 0.0));
        let once = transform_points(&points, a + b, (0.0, 0.0));

        for (p, q) in twice.iter().zip(once.iter()) {
            assert!(close(*p, *q));
        }
    }

    #[test]
    fn translated_transforms_do_not_simply_add() {
        let points = vec![(1.0, 0.0)];
        let twice = transform_points(&transform_points(&points, 0.5, (1.0, 0.0)), 0.5, (1.0, 0.0));
        let once = transform_points(&points, 1.0, (2.0, 0.0));

        assert!(!close(twice[0], once[0]));
    }

    #[test]
    fn arc_ends_exactly_at_radius() {
        for angle in [0.0, 0.5, FRAC_PI_2, PI, 4.0, -1.0] {
            for n in [2, 3, 10, 100] {
                let arc = sample_arc(angle, 0.25, n);
                assert_eq!(arc.len(), n);
                assert_eq!(arc[n - 1], (0.25, 0.0));
            }
        }
    }

    #[test]
    fn arc_starts_at_angle_and_stays_on_circle() {
        let r = 0.5;
        let arc = sample_arc(FRAC_PI_3, r, 100);

        assert!(close(arc[0], (r * FRAC_PI_3.cos(), r * FRAC_PI_3.sin())));
        for (x, y) in &arc {
            assert!((x * x + y * y - r * r).abs() < EPS);
            assert!(*y >= 0.0);
        }
        for pair in arc.windows(2) {
            assert!(pair[0].0 <= pair[1].0);
        }
    }

    #[test]
    fn arc_degenerate_counts() {
        assert!(sample_arc(1.0, 0.5, 0).is_empty());
        assert_eq!(sample_arc(1.0, 0.5, 1), vec![(0.5, 0.0)]);
    }

    #[test]
    fn marker_at_elbow_starts_along_upstream_link() {
        let (th_0, th_1): (f64, f64) = (0.5, 1.0);
        let elbow = (th_0.cos(), th_0.sin());
        let marker = angle_marker(th_1, th_0, elbow, 0.25, 100);

        // last sample sits on link 0's extension, first on link 1
        let last = marker[marker.len() - 1];
        assert!(close(last, (elbow.0 + 0.25 * th_0.cos(), elbow.1 + 0.25 * th_0.sin())));
        let first = marker[0];
        let (c, s) = ((th_0 + th_1).cos(), (th_0 + th_1).sin());
        assert!(close(first, (elbow.0 + 0.25 * c, elbow.1 + 0.25 * s)));
    }
}
