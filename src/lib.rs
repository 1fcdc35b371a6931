//! `polybool` is a library to do boolean operations on polygons
//! A and B, with the operations:
//!
//! - Intersection (AND): Resulting polygon(s) is contained in both A and B
//! - Union (OR): Resulting polygon contains A and B
//! - Difference (A_NOT_B): Resulting polygon(s) contains A, except for the
//!   Intersection of A and B
//!
//! The implementation is the Martinez-Rueda sweep-line algorithm: the
//! endpoints of all polygon edges are processed in lexicographic order while
//! an ordered status line tracks the edges currently crossing the sweep line.
//! Edges are subdivided at their intersection points, classified against the
//! other polygon, and the surviving edges are stitched back into closed
//! contours.
//!
//! Input contours must not self-intersect. This is a precondition on the
//! caller, it is not detected. Holes are expressed as separate contours with
//! opposite winding order.
//!
//! ```
//! use polybool::{Point2D, Contour, Polygon};
//!
//! let a = Polygon::from_contours(vec![Contour::from_points(vec![
//!     Point2D::new(0.0, 0.0),
//!     Point2D::new(1.0, 0.0),
//!     Point2D::new(1.0, 1.0),
//!     Point2D::new(0.0, 1.0),
//! ])]);
//! let b = Polygon::from_contours(vec![Contour::from_points(vec![
//!     Point2D::new(0.5, 0.5),
//!     Point2D::new(1.5, 0.5),
//!     Point2D::new(1.5, 1.5),
//!     Point2D::new(0.5, 1.5),
//! ])]);
//!
//! let result = a.intersection(&b).unwrap();
//! assert_eq!(result.ncontours(), 1);
//! ```

mod algorithm;
mod bbox;
mod connector;
mod point;
mod point_chain;
mod polygon;
mod segment;
mod sweep_event;
mod utils;

pub use algorithm::{boolean_op, ClipError};
pub use bbox::Bbox;
pub use point::Point2D;
pub use polygon::{BoolOpType, Contour, ParsePolygonError, Polygon, WindingOrder};
