//! Least-squares line and polynomial fits of degrees 2 to 4 over `dataset2.txt`.

use single_exercises::dataset::Dataset;
use single_exercises::fit::CurveFitBuilder;
use single_exercises::plot::PlotterBuilder;

const DATASET: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/demos/data/dataset2.txt");

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let dataset = Dataset::load(DATASET)?;
    let plotter = PlotterBuilder::new().build();

    // straight line only
    let line = CurveFitBuilder::new()
        .degrees([])
        .fit(dataset.x(), dataset.y())?;
    if let Some(fit) = line.linear() {
        println!("Fitted line: y = {:.6} x + {:.6}", fit.slope, fit.intercept);
    }
    plotter.scatter_with_curves("line_fit", &dataset, &line.curves(dataset.x()))?;

    // quadratic only
    let quadratic = CurveFitBuilder::new()
        .linear(false)
        .degrees([2])
        .fit(dataset.x(), dataset.y())?;
    plotter.scatter_with_curves("quadratic_fit", &dataset, &quadratic.curves(dataset.x()))?;

    // line together with degrees 2, 3 and 4
    let all = CurveFitBuilder::new().fit(dataset.x(), dataset.y())?;
    for poly in all.polynomials() {
        println!("Degree {} coefficients: {}", poly.degree(), poly.coefficients());
    }
    let path = plotter.scatter_with_curves("polynomial_fits", &dataset, &all.curves(dataset.x()))?;
    println!("Plots written next to {}", path.display());

    Ok(())
}
