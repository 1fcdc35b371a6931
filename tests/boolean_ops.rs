//! End-to-end boolean operations on small polygons with known results.

use polybool::{boolean_op, BoolOpType, Contour, Point2D, Polygon};

fn contour(points: &[(f64, f64)]) -> Contour {
    Contour::from_points(points.iter().map(|&(x, y)| Point2D::new(x, y)).collect())
}

fn square(x: f64, y: f64, size: f64) -> Polygon {
    Polygon::from_contours(vec![contour(&[
        (x, y),
        (x + size, y),
        (x + size, y + size),
        (x, y + size),
    ])])
}

/// Sum of contour areas, counting contours nested inside an odd number of
/// other contours (holes) as negative.
fn net_area(polygon: &Polygon) -> f64 {
    let contours = polygon.contours();
    let mut total = 0.0;
    for (i, c) in contours.iter().enumerate() {
        let depth = contours
            .iter()
            .enumerate()
            .filter(|&(j, other)| i != j && contains(other, &c.points()[0]))
            .count();
        let area = c.signed_area().abs();
        if depth % 2 == 0 {
            total += area;
        } else {
            total -= area;
        }
    }
    total
}

/// Even-odd ray-crossing point-in-contour test
fn contains(contour: &Contour, p: &Point2D) -> bool {
    let pts = contour.points();
    let n = pts.len();
    let mut inside = false;
    for i in 0..n {
        let a = &pts[i];
        let b = &pts[(i + 1) % n];
        if (a.y > p.y) != (b.y > p.y) {
            let x = a.x + (p.y - a.y) / (b.y - a.y) * (b.x - a.x);
            if x > p.x {
                inside = !inside;
            }
        }
    }
    inside
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}

#[test]
fn intersection_of_quarter_overlapping_squares() {
    let a = square(0.0, 0.0, 1.0);
    let b = square(0.5, 0.5, 1.0);

    let result = a.intersection(&b).unwrap();
    assert_eq!(result.ncontours(), 1);
    assert_eq!(result.contours()[0].len(), 4);
    assert_close(net_area(&result), 0.25);

    // the overlap is exactly the square (0.5, 0.5)-(1, 1)
    let expected = [(0.5, 0.5), (1.0, 0.5), (1.0, 1.0), (0.5, 1.0)];
    for (x, y) in expected {
        let p = Point2D::new(x, y);
        assert!(
            result.contours()[0].points().contains(&p),
            "missing vertex {:?}",
            p
        );
    }
}

#[test]
fn union_of_quarter_overlapping_squares() {
    let a = square(0.0, 0.0, 1.0);
    let b = square(0.5, 0.5, 1.0);

    let result = a.union(&b).unwrap();
    assert_eq!(result.ncontours(), 1);
    assert_eq!(result.contours()[0].len(), 8);
    assert_close(net_area(&result), 1.75);
}

#[test]
fn difference_of_quarter_overlapping_squares() {
    let a = square(0.0, 0.0, 1.0);
    let b = square(0.5, 0.5, 1.0);

    let result = a.difference(&b).unwrap();
    assert_eq!(result.ncontours(), 1);
    assert_close(net_area(&result), 0.75);
}

#[test]
fn operations_on_disjoint_squares() {
    let a = square(0.0, 0.0, 1.0);
    let b = square(2.0, 2.0, 1.0);

    let intersection = a.intersection(&b).unwrap();
    assert!(intersection.is_empty());

    let union = a.union(&b).unwrap();
    assert_eq!(union.ncontours(), 2);
    assert_eq!(union.contours()[0].len(), 4);
    assert_eq!(union.contours()[1].len(), 4);
    assert_close(net_area(&union), 2.0);

    let difference = a.difference(&b).unwrap();
    assert_eq!(difference, a);
}

#[test]
fn operations_with_empty_operand() {
    let a = square(0.0, 0.0, 1.0);
    let empty = Polygon::new();

    assert_eq!(a.union(&empty).unwrap(), a);
    assert_eq!(empty.union(&a).unwrap(), a);
    assert_eq!(a.difference(&empty).unwrap(), a);
    assert!(a.intersection(&empty).unwrap().is_empty());
    assert!(empty.difference(&a).unwrap().is_empty());
}

#[test]
fn difference_with_fully_contained_hole() {
    let a = square(0.0, 0.0, 2.0);
    let b = square(0.5, 0.5, 1.0);

    let result = a.difference(&b).unwrap();
    assert_eq!(result.ncontours(), 2);
    assert_close(net_area(&result), 3.0);

    let mut areas: Vec<f64> = result
        .contours()
        .iter()
        .map(|c| c.signed_area().abs())
        .collect();
    areas.sort_by(f64::total_cmp);
    assert_close(areas[0], 1.0);
    assert_close(areas[1], 4.0);
}

#[test]
fn intersection_with_fully_contained_clip() {
    let a = square(0.0, 0.0, 2.0);
    let b = square(0.5, 0.5, 1.0);

    let result = a.intersection(&b).unwrap();
    assert_eq!(result.ncontours(), 1);
    assert_close(net_area(&result), 1.0);
    for p in b.contours()[0].points() {
        assert!(result.contours()[0].points().contains(p));
    }
}

#[test]
fn intersection_of_identical_polygons() {
    let a = square(0.0, 0.0, 1.0);

    let result = a.intersection(&a).unwrap();
    assert_eq!(result.ncontours(), 1);
    assert_close(net_area(&result), 1.0);
}

#[test]
fn union_of_identical_polygons() {
    let a = square(0.0, 0.0, 1.0);

    let result = a.union(&a).unwrap();
    assert_eq!(result.ncontours(), 1);
    assert_close(net_area(&result), 1.0);
}

#[test]
fn difference_of_identical_polygons() {
    let a = square(0.0, 0.0, 1.0);

    let result = a.difference(&a).unwrap();
    assert_close(net_area(&result), 0.0);
}

#[test]
fn triangle_square_overlap() {
    let a = square(0.0, 0.0, 2.0);
    let b = Polygon::from_contours(vec![contour(&[(1.0, 1.0), (3.0, 1.0), (3.0, 3.0)])]);

    let union = a.union(&b).unwrap();
    let intersection = a.intersection(&b).unwrap();
    let area_a = 4.0;
    let area_b = 2.0;
    assert_close(net_area(&union) + net_area(&intersection), area_a + area_b);

    let difference = a.difference(&b).unwrap();
    assert_close(net_area(&difference) + net_area(&intersection), area_a);
}

#[test]
fn operator_selection_through_boolean_op() {
    let a = square(0.0, 0.0, 1.0);
    let b = square(0.5, 0.5, 1.0);

    let via_enum = boolean_op(&a, &b, BoolOpType::Intersection).unwrap();
    let via_method = a.intersection(&b).unwrap();
    assert_eq!(via_enum, via_method);
}

#[test]
fn input_with_duplicate_and_closing_points_is_cleaned() {
    // same unit square, but with a repeated vertex and an explicit closing
    // point; results must match the clean representation
    let noisy = Polygon::from_contours(vec![contour(&[
        (0.0, 0.0),
        (1.0, 0.0),
        (1.0, 0.0),
        (1.0, 1.0),
        (0.0, 1.0),
        (0.0, 0.0),
    ])]);
    let b = square(0.5, 0.5, 1.0);

    let result = noisy.intersection(&b).unwrap();
    assert_close(net_area(&result), 0.25);
}
