use crate::bbox::Bbox;
use crate::point::Point2D;
use crate::polygon::WindingOrder;

/// Calculate the signed area of the triangle (p0, p1, p2)
#[inline]
pub(crate) fn signed_area3(p0: &Point2D, p1: &Point2D, p2: &Point2D) -> f64 {
    (p0.x - p2.x) * (p1.y - p2.y) - (p1.x - p2.x) * (p0.y - p2.y)
}

/// Calculates the winding order of a contour using the gaussian
/// shoelace formula in O(n) time
///
/// # Panics
///
/// You must validate that there are at least three points in the nodes
/// (otherwise, there is no winding order, it's just a point or a line)
pub(crate) fn calculate_winding_order(nodes: &[Point2D]) -> WindingOrder {
    assert!(nodes.len() > 2);

    let iter1 = nodes.iter();
    let mut iter2 = nodes.iter().cycle();
    iter2.next();

    // shoelace formula
    let sum: f64 = iter1
        .zip(iter2)
        .map(|(p0, p1)| (p1.x - p0.x) * (p1.y + p0.y))
        .sum();
    match sum > 0.0 {
        true => WindingOrder::Clockwise,
        false => WindingOrder::CounterClockwise,
    }
}

/// Calculates the bounding box of all points in the nodes in O(n) time
pub(crate) fn calculate_bounding_box(nodes: &[Point2D]) -> Bbox {
    let mut min_x = f64::MAX;
    let mut min_y = f64::MAX;
    let mut max_x = -f64::MAX;
    let mut max_y = -f64::MAX;

    for node in nodes {
        if node.x > max_x {
            max_x = node.x;
        }
        if node.x < min_x {
            min_x = node.x;
        }
        if node.y > max_y {
            max_y = node.y;
        }
        if node.y < min_y {
            min_y = node.y;
        }
    }

    Bbox {
        top: max_y,
        bottom: min_y,
        left: min_x,
        right: max_x,
    }
}
