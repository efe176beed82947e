//! Find the points inside a polygon.
use polyrange::prelude::*;

fn main() -> Result<(), RangeSearchError> {
    let engine = RangeSearch::new(vec![
        Point::new(0.0, 0.0),
        Point::new(5.0, 5.0),
        Point::new(10.0, 10.0),
        Point::new(2.0, 2.0),
        Point::new(7.0, 7.0),
    ])?;

    // L-shape: (7, 7) sits in the notch, inside the bounding box but outside the polygon
    let l_shape = Polygon::try_from(
        &[[0.0, 0.0], [10.0, 0.0], [10.0, 4.0], [4.0, 4.0], [4.0, 10.0], [0.0, 10.0]][..],
    )?;

    let result = engine.query_poly(&l_shape);
    println!("Inside L-shape: {:?} ({} points)", result.indices(), result.count());
    println!("Count only: {}", engine.query_poly_count(&l_shape));
    Ok(())
}
