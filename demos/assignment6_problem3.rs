//! QR decomposition of a fixed 3x3 matrix.

use ndarray::array;
use single_exercises::decomposition::QR;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let a = array![[1.0, 0.0, 4.0], [-2.0, 3.0, -2.0], [-2.0, 0.0, 6.0]];
    let qr = QR::compute(a.view());

    println!("Q : \n\n{}\n", qr.q());
    println!("R : \n\n{}", qr.r());

    Ok(())
}
