//! Dimension and basis of the span of three vectors in R^4.
//!
//! The vectors come from writing
//! `[2b+3c, a+b-2c, 4a+b, 3a-b-c]` as `a*v1 + b*v2 + c*v3`. Row reducing `[v1 v2 v3]`
//! gives the pivot columns; their count is the dimension and the matching vectors form
//! the basis.

use ndarray::array;
use single_exercises::reduction::SpanBasis;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let v1 = array![0.0, 1.0, 4.0, 3.0];
    let v2 = array![2.0, 1.0, 1.0, -1.0];
    let v3 = array![3.0, -2.0, 0.0, -1.0];

    let span = SpanBasis::from_vectors(&[v1, v2, v3])?;

    println!("Dimension = {}", span.dimension());
    println!("Basis vectors : ");
    for v in span.basis() {
        println!("{}", v);
    }

    Ok(())
}
