use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use std::str::FromStr;

use crate::algorithm::{boolean_op, ClipError};
use crate::bbox::Bbox;
use crate::point::Point2D;
use crate::segment::Segment;
use crate::utils::{calculate_bounding_box, calculate_winding_order};

/// Winding order of a contour
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WindingOrder {
    Clockwise,
    CounterClockwise,
}

/// Boolean operation to perform on two polygons
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BoolOpType {
    Intersection,
    Union,
    Difference,
}

/// An ordered sequence of points. The contour is implicitly closed, the last
/// point connects back to the first.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Contour {
    points: Vec<Point2D>,
}

impl Contour {
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    pub fn from_points(points: Vec<Point2D>) -> Self {
        Self { points }
    }

    pub fn push(&mut self, point: Point2D) {
        self.points.push(point);
    }

    pub(crate) fn pop(&mut self) -> Option<Point2D> {
        self.points.pop()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Point2D] {
        &self.points
    }

    /// The p-th edge of the contour. The last edge connects the last point
    /// back to the first.
    pub(crate) fn segment(&self, p: usize) -> Segment {
        if p == self.points.len() - 1 {
            Segment::new(self.points[self.points.len() - 1], self.points[0])
        } else {
            Segment::new(self.points[p], self.points[p + 1])
        }
    }

    pub fn bounding_box(&self) -> Bbox {
        calculate_bounding_box(&self.points)
    }

    /// Signed area by the shoelace formula, positive for counter-clockwise
    /// contours
    pub fn signed_area(&self) -> f64 {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }
        let mut sum = 0.0;
        for i in 0..n {
            let p0 = &self.points[i];
            let p1 = &self.points[(i + 1) % n];
            sum += p0.x * p1.y - p1.x * p0.y;
        }
        sum / 2.0
    }

    /// # Panics
    ///
    /// Panics if the contour has fewer than three points
    pub fn winding_order(&self) -> WindingOrder {
        calculate_winding_order(&self.points)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point2D> {
        self.points.iter()
    }
}

/// A collection of contours. Holes are contours wound opposite to the contour
/// that contains them.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Polygon {
    contours: Vec<Contour>,
}

impl Polygon {
    pub fn new() -> Self {
        Self {
            contours: Vec::new(),
        }
    }

    pub fn from_contours(contours: Vec<Contour>) -> Self {
        Self { contours }
    }

    pub fn push_contour(&mut self, contour: Contour) {
        self.contours.push(contour);
    }

    pub fn contours(&self) -> &[Contour] {
        &self.contours
    }

    pub fn ncontours(&self) -> usize {
        self.contours.len()
    }

    pub fn nvertices(&self) -> usize {
        self.contours.iter().map(|c| c.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.contours.is_empty()
    }

    pub fn bounding_box(&self) -> Bbox {
        let mut bbox = calculate_bounding_box(&[]);
        for contour in &self.contours {
            bbox = bbox.merge(&contour.bounding_box());
        }
        bbox
    }

    /// Intersection of this polygon and `other`.
    ///
    /// Neither polygon may contain self-intersecting contours.
    pub fn intersection(&self, other: &Polygon) -> Result<Polygon, ClipError> {
        boolean_op(self, other, BoolOpType::Intersection)
    }

    /// Union of this polygon and `other`.
    ///
    /// Neither polygon may contain self-intersecting contours.
    pub fn union(&self, other: &Polygon) -> Result<Polygon, ClipError> {
        boolean_op(self, other, BoolOpType::Union)
    }

    /// This polygon minus `other`.
    ///
    /// Neither polygon may contain self-intersecting contours.
    pub fn difference(&self, other: &Polygon) -> Result<Polygon, ClipError> {
        boolean_op(self, other, BoolOpType::Difference)
    }

    /// Load a polygon from the plain text format: the number of contours,
    /// then for each contour its point count and nesting level followed by
    /// that many coordinate pairs. The nesting level is ignored, containment
    /// is recomputed from the geometry.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Polygon, ParsePolygonError> {
        fs::read_to_string(path)?.parse()
    }
}

impl FromStr for Polygon {
    type Err = ParsePolygonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = s.split_whitespace();
        let ncontours: usize = parse_next(&mut tokens)?;
        let mut polygon = Polygon::new();
        for _ in 0..ncontours {
            let npoints: usize = parse_next(&mut tokens)?;
            let _level: i64 = parse_next(&mut tokens)?;
            let mut contour = Contour::new();
            for _ in 0..npoints {
                let x: f64 = parse_next(&mut tokens)?;
                let y: f64 = parse_next(&mut tokens)?;
                contour.push(Point2D::new(x, y));
            }
            // a contour with fewer than three points encloses nothing
            if contour.len() >= 3 {
                polygon.push_contour(contour);
            }
        }
        Ok(polygon)
    }
}

fn parse_next<'a, T, I>(tokens: &mut I) -> Result<T, ParsePolygonError>
where
    T: FromStr,
    I: Iterator<Item = &'a str>,
{
    let token = tokens.next().ok_or(ParsePolygonError::UnexpectedEnd)?;
    token
        .parse()
        .map_err(|_| ParsePolygonError::InvalidToken(token.to_string()))
}

/// Failure while reading the polygon text format
#[derive(Debug)]
pub enum ParsePolygonError {
    Io(io::Error),
    /// The input ended before all announced contours and points were read
    UnexpectedEnd,
    /// A token could not be parsed as the expected number
    InvalidToken(String),
}

impl fmt::Display for ParsePolygonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParsePolygonError::Io(e) => write!(f, "failed to read polygon file: {}", e),
            ParsePolygonError::UnexpectedEnd => write!(f, "unexpected end of polygon data"),
            ParsePolygonError::InvalidToken(token) => {
                write!(f, "invalid number in polygon data: {:?}", token)
            }
        }
    }
}

impl std::error::Error for ParsePolygonError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParsePolygonError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ParsePolygonError {
    fn from(e: io::Error) -> Self {
        ParsePolygonError::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_polygon() {
        let text = "2\n4 0\n0 0\n2 0\n2 2\n0 2\n3 1\n0.5 0.5\n1.5 0.5\n1.0 1.5\n";
        let polygon: Polygon = text.parse().unwrap();
        assert_eq!(polygon.ncontours(), 2);
        assert_eq!(polygon.contours()[0].len(), 4);
        assert_eq!(polygon.contours()[1].len(), 3);
        assert_eq!(polygon.contours()[1].points()[0], Point2D::new(0.5, 0.5));
    }

    #[test]
    fn test_parse_skips_degenerate_contours() {
        let text = "2\n2 0\n0 0\n1 0\n3 0\n0 0\n1 0\n1 1\n";
        let polygon: Polygon = text.parse().unwrap();
        assert_eq!(polygon.ncontours(), 1);
    }

    #[test]
    fn test_parse_truncated_input() {
        let result: Result<Polygon, _> = "1\n4 0\n0 0\n1 0\n".parse();
        assert!(matches!(result, Err(ParsePolygonError::UnexpectedEnd)));
    }

    #[test]
    fn test_parse_bad_token() {
        let result: Result<Polygon, _> = "1\n3 0\n0 zero\n1 0\n1 1\n".parse();
        assert!(matches!(result, Err(ParsePolygonError::InvalidToken(_))));
    }

    #[test]
    fn test_signed_area() {
        let square = Contour::from_points(vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(2.0, 0.0),
            Point2D::new(2.0, 2.0),
            Point2D::new(0.0, 2.0),
        ]);
        assert_eq!(square.signed_area(), 4.0);
        assert_eq!(square.winding_order(), WindingOrder::CounterClockwise);

        let reversed = Contour::from_points(square.points().iter().rev().copied().collect());
        assert_eq!(reversed.signed_area(), -4.0);
        assert_eq!(reversed.winding_order(), WindingOrder::Clockwise);
    }
}
