//! Pointer motion path synthesis
//!
//! Builds the point sequences a humanized pointer traverses: Bezier curves
//! with randomized control points for most movements, eased straight lines
//! for the rest. The 70/30 split keeps the path *shape* itself from becoming
//! a fingerprint.

use rand::Rng;

use crate::config::MotionProfile;
use crate::input::Point;

/// Points evaluated along a Bezier curve
const CURVE_POINTS: usize = 50;

/// Maximum control-point displacement from the straight line, per axis
const CONTROL_OFFSET: i32 = 50;

/// Minimum point count of an eased-linear path
const MIN_LINEAR_POINTS: usize = 5;

/// Probability of choosing a curved path over an eased-linear one
const CURVE_PROBABILITY: f64 = 0.7;

/// Both-axes tolerance below which no movement is synthesized
pub const MOVE_TOLERANCE: i32 = 2;

/// Shape of a synthesized path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    /// Bezier curve with randomized control points, jittered
    Curved,
    /// Smoothstep-eased straight line, endpoints exact
    Linear,
}

/// An ordered, non-empty sequence of integer screen coordinates
///
/// Transient: built and consumed within a single action call.
#[derive(Debug, Clone)]
pub struct MotionPath {
    kind: PathKind,
    points: Vec<Point>,
}

impl MotionPath {
    /// Shape this path was synthesized with
    pub fn kind(&self) -> PathKind {
        self.kind
    }

    /// The ordered coordinates
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Number of points, always at least 1
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; paths are non-empty by construction
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Synthesize a pointer path from `start` to `end`
///
/// Targets closer than [`MOVE_TOLERANCE`] in both axes yield a single-point
/// path; otherwise the path is curved with probability 0.7, eased-linear
/// otherwise. Jitter (bounded by `jitter_factor * 10` pixels per axis) is
/// applied to curved paths only, after curve evaluation - it models hand
/// tremor, not measurement noise.
pub fn synthesize<R: Rng + ?Sized>(
    rng: &mut R,
    start: Point,
    end: Point,
    motion: &MotionProfile,
) -> MotionPath {
    if (end.x - start.x).abs() < MOVE_TOLERANCE && (end.y - start.y).abs() < MOVE_TOLERANCE {
        return MotionPath {
            kind: PathKind::Linear,
            points: vec![start],
        };
    }

    if rng.gen_bool(CURVE_PROBABILITY) {
        let control_count = rng.gen_range(2..=4);
        let mut points = curved_points(rng, start, end, control_count);
        apply_jitter(rng, &mut points, motion.jitter_amplitude());
        MotionPath {
            kind: PathKind::Curved,
            points,
        }
    } else {
        MotionPath {
            kind: PathKind::Linear,
            points: eased_linear_points(start, end),
        }
    }
}

/// Evaluate a Bezier curve from `start` to `end` with `control_count`
/// randomly displaced control points, at [`CURVE_POINTS`] parameters
pub(crate) fn curved_points<R: Rng + ?Sized>(
    rng: &mut R,
    start: Point,
    end: Point,
    control_count: usize,
) -> Vec<Point> {
    let mut anchors: Vec<(f64, f64)> = Vec::with_capacity(control_count + 2);
    anchors.push((start.x as f64, start.y as f64));

    for i in 1..=control_count {
        let t = i as f64 / (control_count + 1) as f64;
        let x = start.x as f64
            + (end.x - start.x) as f64 * t
            + rng.gen_range(-CONTROL_OFFSET..=CONTROL_OFFSET) as f64;
        let y = start.y as f64
            + (end.y - start.y) as f64 * t
            + rng.gen_range(-CONTROL_OFFSET..=CONTROL_OFFSET) as f64;
        anchors.push((x, y));
    }

    anchors.push((end.x as f64, end.y as f64));

    (0..CURVE_POINTS)
        .map(|i| {
            let t = i as f64 / (CURVE_POINTS - 1) as f64;
            let (x, y) = de_casteljau(&anchors, t);
            Point::new(x as i32, y as i32)
        })
        .collect()
}

/// Straight-line path eased with smoothstep, so movement starts and ends
/// slowly and is fastest through the middle
fn eased_linear_points(start: Point, end: Point) -> Vec<Point> {
    let distance = start.distance_to(end);
    let count = ((distance / 10.0) as usize).max(MIN_LINEAR_POINTS);

    (0..count)
        .map(|i| {
            let t = i as f64 / (count - 1) as f64;
            let eased = t * t * (3.0 - 2.0 * t);
            Point::new(
                (start.x as f64 + (end.x - start.x) as f64 * eased) as i32,
                (start.y as f64 + (end.y - start.y) as f64 * eased) as i32,
            )
        })
        .collect()
}

/// Perturb every point by an independent offset within `amplitude` per axis
fn apply_jitter<R: Rng + ?Sized>(rng: &mut R, points: &mut [Point], amplitude: i32) {
    if amplitude <= 0 {
        return;
    }

    for point in points {
        point.x += rng.gen_range(-amplitude..=amplitude);
        point.y += rng.gen_range(-amplitude..=amplitude);
    }
}

/// Repeated linear interpolation over the anchor polygon
fn de_casteljau(anchors: &[(f64, f64)], t: f64) -> (f64, f64) {
    let mut scratch = anchors.to_vec();
    let mut remaining = scratch.len();

    while remaining > 1 {
        for i in 0..remaining - 1 {
            scratch[i] = (
                (1.0 - t) * scratch[i].0 + t * scratch[i + 1].0,
                (1.0 - t) * scratch[i].1 + t * scratch[i + 1].1,
            );
        }
        remaining -= 1;
    }

    scratch[0]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn near_target_yields_single_point() {
        let mut rng = StdRng::seed_from_u64(1);
        let start = Point::new(10, 10);
        let path = synthesize(&mut rng, start, Point::new(11, 11), &MotionProfile::default());

        assert_eq!(path.len(), 1);
        assert_eq!(path.points()[0], start);
    }

    #[test]
    fn curved_path_has_fifty_points_with_exact_endpoints() {
        let mut rng = StdRng::seed_from_u64(2);
        let start = Point::new(0, 0);
        let end = Point::new(640, 480);

        for _ in 0..20 {
            let points = curved_points(&mut rng, start, end, 3);
            assert_eq!(points.len(), CURVE_POINTS);
            assert_eq!(points[0], start);
            assert_eq!(points[points.len() - 1], end);
        }
    }

    #[test]
    fn linear_path_count_scales_with_distance() {
        // 200 px -> 20 points, 1000 px -> 100 points
        let points = eased_linear_points(Point::new(0, 0), Point::new(200, 0));
        assert_eq!(points.len(), 20);

        let points = eased_linear_points(Point::new(0, 0), Point::new(0, 1000));
        assert_eq!(points.len(), 100);

        // short hops never drop below the floor
        let points = eased_linear_points(Point::new(0, 0), Point::new(30, 0));
        assert_eq!(points.len(), MIN_LINEAR_POINTS);
    }

    #[test]
    fn linear_path_endpoints_are_exact() {
        let start = Point::new(17, 23);
        let end = Point::new(400, 350);
        let points = eased_linear_points(start, end);

        assert_eq!(points[0], start);
        assert_eq!(points[points.len() - 1], end);
    }

    #[test]
    fn linear_path_is_monotone_along_the_axis() {
        let points = eased_linear_points(Point::new(0, 0), Point::new(500, 0));
        for pair in points.windows(2) {
            assert!(pair[1].x >= pair[0].x);
        }
    }

    #[test]
    fn jitter_stays_within_amplitude() {
        let mut rng = StdRng::seed_from_u64(3);
        let original = curved_points(&mut rng, Point::new(0, 0), Point::new(300, 200), 2);

        let mut jittered = original.clone();
        apply_jitter(&mut rng, &mut jittered, 10);

        for (before, after) in original.iter().zip(&jittered) {
            assert!((after.x - before.x).abs() <= 10);
            assert!((after.y - before.y).abs() <= 10);
        }
    }

    #[test]
    fn zero_amplitude_jitter_is_a_no_op() {
        let mut rng = StdRng::seed_from_u64(4);
        let original = curved_points(&mut rng, Point::new(0, 0), Point::new(300, 200), 2);

        let mut jittered = original.clone();
        apply_jitter(&mut rng, &mut jittered, 0);

        assert_eq!(original, jittered);
    }

    #[test]
    fn synthesized_path_ends_within_jitter_tolerance() {
        let mut rng = StdRng::seed_from_u64(5);
        let motion = MotionProfile {
            jitter_factor: 1.0,
            ..Default::default()
        };
        let end = Point::new(800, 600);
        let tolerance = motion.jitter_amplitude();

        for _ in 0..200 {
            let path = synthesize(&mut rng, Point::new(0, 0), end, &motion);
            assert!(!path.is_empty());

            let last = path.points()[path.len() - 1];
            match path.kind() {
                PathKind::Curved => {
                    assert_eq!(path.len(), CURVE_POINTS);
                    assert!((last.x - end.x).abs() <= tolerance);
                    assert!((last.y - end.y).abs() <= tolerance);
                }
                PathKind::Linear => {
                    assert_eq!(last, end);
                }
            }
        }
    }

    #[test]
    fn both_path_kinds_occur() {
        let mut rng = StdRng::seed_from_u64(6);
        let motion = MotionProfile::default();

        let mut curved = 0;
        let mut linear = 0;
        for _ in 0..200 {
            match synthesize(&mut rng, Point::new(0, 0), Point::new(500, 500), &motion).kind() {
                PathKind::Curved => curved += 1,
                PathKind::Linear => linear += 1,
            }
        }

        // 70/30 split: both kinds must show up over 200 draws
        assert!(curved > linear);
        assert!(linear > 0);
    }

    #[test]
    fn de_casteljau_midpoint_of_a_segment() {
        let (x, y) = de_casteljau(&[(0.0, 0.0), (10.0, 20.0)], 0.5);
        assert_eq!((x, y), (5.0, 10.0));
    }
}
