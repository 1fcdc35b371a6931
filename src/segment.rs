use crate::point::Point2D;

/// One directed edge of a contour, an ordered pair of endpoints.
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct Segment {
    p1: Point2D,
    p2: Point2D,
}

impl Segment {
    #[inline]
    pub(crate) fn new(p1: Point2D, p2: Point2D) -> Self {
        Self { p1, p2 }
    }

    /// Get the beginning point
    #[inline]
    pub(crate) fn begin(&self) -> &Point2D {
        &self.p1
    }

    /// Get the end point
    #[inline]
    pub(crate) fn end(&self) -> &Point2D {
        &self.p2
    }
}
