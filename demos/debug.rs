use polybool::{boolean_op, BoolOpType, Polygon};

fn main() {
    // two overlapping squares in the plain text format
    let subject: Polygon = "1\n4 0\n0 0\n2 0\n2 2\n0 2\n"
        .parse()
        .expect("valid polygon data");
    let clip: Polygon = "1\n4 0\n1 1\n3 1\n3 3\n1 3\n"
        .parse()
        .expect("valid polygon data");

    for op in [
        BoolOpType::Intersection,
        BoolOpType::Union,
        BoolOpType::Difference,
    ] {
        match boolean_op(&subject, &clip, op) {
            Ok(result) => {
                println!("{:?}: {} contour(s)", op, result.ncontours());
                for contour in result.contours() {
                    let points: Vec<(f64, f64)> =
                        contour.iter().map(|p| (p.x, p.y)).collect();
                    println!("  area {:+.3}: {:?}", contour.signed_area(), points);
                }
            }
            Err(e) => println!("{:?} failed: {}", op, e),
        }
    }
}
