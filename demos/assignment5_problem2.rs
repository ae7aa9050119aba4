//! Converts a vector given in basis coordinates to standard coordinates.

use ndarray::array;
use single_exercises::dense::to_standard;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let basis = array![[0.0, -4.0, 6.0], [-1.0, 0.0, 6.0], [-1.0, 0.0, 3.0]];
    let x_b = array![-2.0, 6.0, 1.0];

    let x = to_standard(basis.view(), x_b.view())?;
    println!("{}", x);

    Ok(())
}
