//! Eigenvalues of a 2x2 matrix and a plot of its columns against its eigenvectors.

use ndarray::array;
use plotters::prelude::{GREEN, RED};
use single_exercises::decomposition::Eigen;
use single_exercises::plot::{ArrowGroup, PlotterBuilder};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let a = array![[1.0, -2.0], [-4.0, 1.0]];

    let eig = Eigen::compute(a.view())?;
    println!("Eigen values = {}", eig.eigenvalues());

    let columns = ArrowGroup::from_columns("Columns of A", RED, a.view())?;
    let eigenvectors = ArrowGroup::from_columns("Eigen vectors", GREEN, eig.eigenvectors().view())?;

    let plotter = PlotterBuilder::new().size(700, 700).axis_limit(5.0).build();
    let path = plotter.quiver("eigenvectors", &[columns, eigenvectors])?;
    println!("Vector plot written to {}", path.display());

    Ok(())
}
