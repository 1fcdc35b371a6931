use crate::segment::Segment;

/// Tolerance for matching split points against existing vertices.
pub(crate) const POINT_EPSILON: f64 = 1e-6;

/// Tolerance for snapping computed intersection points onto segment endpoints.
pub(crate) const INTERSECT_EPSILON: f64 = 1e-8;

/// A point in the 2D plane.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`
    #[inline]
    pub fn distance(&self, other: &Point2D) -> f64 {
        ((other.x - self.x) * (other.x - self.x) + (other.y - self.y) * (other.y - self.y)).sqrt()
    }

    /// Per-coordinate comparison within `POINT_EPSILON`. Exact equality is
    /// used for chain stitching, this looser test only decides whether an
    /// intersection point coincides with an existing endpoint.
    #[inline]
    pub(crate) fn epsilon_equal(&self, other: &Point2D) -> bool {
        (self.x - other.x).abs() < POINT_EPSILON && (self.y - other.y).abs() < POINT_EPSILON
    }
}

/// Result of intersecting two line segments
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) enum SegmentIntersection {
    /// The segments do not meet
    None,
    /// Proper crossing, or a single shared point of collinear segments
    Point(Point2D),
    /// Collinear overlap, the two endpoints of the shared sub-range
    Overlap(Point2D, Point2D),
}

/// Overlap of the parametric intervals [u0, u1] and [v0, v1].
/// Requires u0 <= u1 and v0 <= v1.
fn interval_overlap(u0: f64, u1: f64, v0: f64, v1: f64) -> Option<(f64, Option<f64>)> {
    if u1 < v0 || u0 > v1 {
        return None;
    }
    if u1 > v0 {
        if u0 < v1 {
            Some((u0.max(v0), Some(u1.min(v1))))
        } else {
            // u0 == v1
            Some((u0, None))
        }
    } else {
        // u1 == v0
        Some((u1, None))
    }
}

/// Snap `p` onto any endpoint of the two segments within `INTERSECT_EPSILON`.
/// Without the snap, near-miss crossings produce ultra-short segments that
/// break the strict ordering of the status line.
fn snap_to_endpoints(mut p: Point2D, seg0: &Segment, seg1: &Segment) -> Point2D {
    for q in [seg0.begin(), seg0.end(), seg1.begin(), seg1.end()] {
        if p.distance(q) < INTERSECT_EPSILON {
            p = *q;
        }
    }
    p
}

/// Intersect two segments, treated as (point, direction vector) pairs.
///
/// The parallelism test compares the squared cross product of the direction
/// vectors against a relative epsilon scaled by both squared lengths, so that
/// short segments are not declared parallel too eagerly and long segments are
/// not declared crossing too eagerly.
pub(crate) fn find_intersection(seg0: &Segment, seg1: &Segment) -> SegmentIntersection {
    let sqr_epsilon = INTERSECT_EPSILON * 0.1;
    let p0 = *seg0.begin();
    let d0x = seg0.end().x - p0.x;
    let d0y = seg0.end().y - p0.y;
    let p1 = *seg1.begin();
    let d1x = seg1.end().x - p1.x;
    let d1y = seg1.end().y - p1.y;
    let ex = p1.x - p0.x;
    let ey = p1.y - p0.y;

    let kross = d0x * d1y - d0y * d1x;
    let sqr_kross = kross * kross;
    let sqr_len0 = d0x * d0x + d0y * d0y;
    let sqr_len1 = d1x * d1x + d1y * d1y;

    if sqr_kross > sqr_epsilon * sqr_len0 * sqr_len1 {
        // lines of the segments are not parallel
        let s = (ex * d1y - ey * d1x) / kross;
        if !(0.0..=1.0).contains(&s) {
            return SegmentIntersection::None;
        }
        let t = (ex * d0y - ey * d0x) / kross;
        if !(0.0..=1.0).contains(&t) {
            return SegmentIntersection::None;
        }
        // intersection of the lines is a point on each segment
        let pi = Point2D::new(p0.x + s * d0x, p0.y + s * d0y);
        return SegmentIntersection::Point(snap_to_endpoints(pi, seg0, seg1));
    }

    // lines of the segments are parallel
    let sqr_len_e = ex * ex + ey * ey;
    let kross = ex * d0y - ey * d0x;
    if kross * kross > sqr_epsilon * sqr_len0 * sqr_len_e {
        // lines of the segments are different
        return SegmentIntersection::None;
    }

    // lines of the segments are the same, test for overlap
    let s0 = (d0x * ex + d0y * ey) / sqr_len0;
    let s1 = s0 + (d0x * d1x + d0y * d1y) / sqr_len0;
    let smin = s0.min(s1);
    let smax = s0.max(s1);

    match interval_overlap(0.0, 1.0, smin, smax) {
        None => SegmentIntersection::None,
        Some((w0, w1)) => {
            let pi0 = snap_to_endpoints(
                Point2D::new(p0.x + w0 * d0x, p0.y + w0 * d0y),
                seg0,
                seg1,
            );
            match w1 {
                None => SegmentIntersection::Point(pi0),
                Some(w1) => {
                    let pi1 = Point2D::new(p0.x + w1 * d0x, p0.y + w1 * d0y);
                    SegmentIntersection::Overlap(pi0, pi1)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(x0: f64, y0: f64, x1: f64, y1: f64) -> Segment {
        Segment::new(Point2D::new(x0, y0), Point2D::new(x1, y1))
    }

    #[test]
    fn test_intersect_none() {
        let result = find_intersection(&seg(0.0, 0.0, 2.0, 8.0), &seg(8.0, 0.0, 8.0, 20.0));
        assert_eq!(result, SegmentIntersection::None);
    }

    #[test]
    fn test_intersect_crossing() {
        let result = find_intersection(&seg(0.0, -1.0, 0.0, 1.0), &seg(-1.0, 0.0, 1.0, 0.0));
        assert_eq!(result, SegmentIntersection::Point(Point2D::new(0.0, 0.0)));
    }

    #[test]
    fn test_intersect_parallel_vertical() {
        let result = find_intersection(&seg(0.0, 0.0, 0.0, 10.0), &seg(2.0, 0.0, 2.0, 10.0));
        assert_eq!(result, SegmentIntersection::None);
    }

    #[test]
    fn test_intersect_parallel_diagonal() {
        let result = find_intersection(&seg(0.0, 0.0, 5.0, 5.0), &seg(2.0, 0.0, 7.0, 5.0));
        assert_eq!(result, SegmentIntersection::None);
    }

    #[test]
    fn test_intersect_collinear_overlap() {
        let result = find_intersection(&seg(0.0, 0.0, 5.0, 5.0), &seg(2.0, 2.0, 7.0, 7.0));
        assert_eq!(
            result,
            SegmentIntersection::Overlap(Point2D::new(2.0, 2.0), Point2D::new(5.0, 5.0))
        );
    }

    #[test]
    fn test_intersect_collinear_disjoint() {
        let result = find_intersection(&seg(0.0, 0.0, 5.0, 5.0), &seg(7.0, 7.0, 10.0, 10.0));
        assert_eq!(result, SegmentIntersection::None);
    }

    #[test]
    fn test_intersect_collinear_touching() {
        let result = find_intersection(&seg(0.0, 0.0, 5.0, 5.0), &seg(5.0, 5.0, 10.0, 10.0));
        assert_eq!(result, SegmentIntersection::Point(Point2D::new(5.0, 5.0)));
    }

    #[test]
    fn test_intersect_snaps_to_endpoint() {
        // crossing within 1e-8 of an endpoint must be snapped onto it
        let result = find_intersection(
            &seg(0.0, 0.0, 1.0, 0.0),
            &seg(0.5, -1.0, 0.5 + 1e-9, 1e-9),
        );
        assert_eq!(
            result,
            SegmentIntersection::Point(Point2D::new(0.5 + 1e-9, 1e-9))
        );
    }
}
