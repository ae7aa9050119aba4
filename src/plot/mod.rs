//! # Plotting
//!
//! Renders the figures produced by the exercises to SVG files: scatter data overlaid with
//! fitted curves, arrows anchored at the origin, and colour-mapped matrices.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use ndarray::{Array1, ArrayView2};
use plotters::prelude::*;

use crate::dataset::Dataset;

const CURVE_COLORS: [RGBColor; 6] = [
    RED,
    GREEN,
    MAGENTA,
    CYAN,
    RGBColor(255, 140, 0),
    BLACK,
];

/// A group of arrows drawn from the origin in one colour.
#[derive(Debug, Clone)]
pub struct ArrowGroup {
    pub label: String,
    pub color: RGBColor,
    pub vectors: Vec<(f64, f64)>,
}

impl ArrowGroup {
    pub fn new(label: impl Into<String>, color: RGBColor, vectors: Vec<(f64, f64)>) -> Self {
        ArrowGroup {
            label: label.into(),
            color,
            vectors,
        }
    }

    /// Uses each column of a 2-row matrix as one arrow.
    pub fn from_columns(
        label: impl Into<String>,
        color: RGBColor,
        matrix: ArrayView2<f64>,
    ) -> anyhow::Result<Self> {
        if matrix.nrows() != 2 {
            bail!("Arrows need 2-dimensional columns, got {} rows", matrix.nrows());
        }
        let vectors = matrix.columns().into_iter().map(|c| (c[0], c[1])).collect();
        Ok(Self::new(label, color, vectors))
    }
}

pub struct PlotterBuilder {
    output_dir: PathBuf,
    size: (u32, u32),
    font_size: f64,
    axis_limit: f64,
}

impl PlotterBuilder {
    pub fn new() -> Self {
        PlotterBuilder {
            output_dir: PathBuf::from("plots"),
            size: (800, 600),
            font_size: 24.0,
            axis_limit: 5.0,
        }
    }

    pub fn output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    pub fn font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    /// Half-width of the square viewport used by [`Plotter::quiver`].
    pub fn axis_limit(mut self, axis_limit: f64) -> Self {
        self.axis_limit = axis_limit;
        self
    }

    pub fn build(self) -> Plotter {
        Plotter {
            output_dir: self.output_dir,
            size: self.size,
            font_size: self.font_size,
            axis_limit: self.axis_limit,
        }
    }
}

impl Default for PlotterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Plotter {
    output_dir: PathBuf,
    size: (u32, u32),
    font_size: f64,
    axis_limit: f64,
}

impl Plotter {
    fn prepare(&self, name: &str) -> anyhow::Result<PathBuf> {
        fs::create_dir_all(&self.output_dir).with_context(|| {
            format!(
                "Failed to create plot directory {}",
                self.output_dir.display()
            )
        })?;
        Ok(self.output_dir.join(format!("{}.svg", name)))
    }

    /// Raw samples as points with each curve drawn as a line over the same x-values.
    pub fn scatter_with_curves(
        &self,
        name: &str,
        dataset: &Dataset,
        curves: &[(String, Array1<f64>)],
    ) -> anyhow::Result<PathBuf> {
        if let Some((label, _)) = curves.iter().find(|(_, c)| c.len() != dataset.len()) {
            bail!(
                "Curve '{}' does not have one value per sample ({})",
                label,
                dataset.len()
            );
        }

        let path = self.prepare(name)?;
        self.draw_scatter(&path, name, dataset, curves)?;
        log::info!("Wrote scatter plot to {}", path.display());
        Ok(path)
    }

    /// Arrows anchored at the origin inside a fixed square viewport.
    pub fn quiver(&self, name: &str, groups: &[ArrowGroup]) -> anyhow::Result<PathBuf> {
        let path = self.prepare(name)?;
        self.draw_quiver(&path, name, groups)?;
        log::info!("Wrote vector plot to {}", path.display());
        Ok(path)
    }

    /// Colour-mapped matrix with row 0 at the top, blue for -1 through white to red for 1.
    pub fn matshow(&self, name: &str, matrix: ArrayView2<f64>) -> anyhow::Result<PathBuf> {
        if matrix.is_empty() {
            bail!("Cannot plot an empty matrix");
        }

        let path = self.prepare(name)?;
        self.draw_matrix(&path, name, matrix)?;
        log::info!("Wrote matrix plot to {}", path.display());
        Ok(path)
    }

    fn draw_scatter(
        &self,
        path: &Path,
        name: &str,
        dataset: &Dataset,
        curves: &[(String, Array1<f64>)],
    ) -> anyhow::Result<()> {
        let ((x_min, x_max), (mut y_min, mut y_max)) = dataset.bounds();
        for (_, curve) in curves {
            for &v in curve.iter().filter(|v| v.is_finite()) {
                y_min = y_min.min(v);
                y_max = y_max.max(v);
            }
        }
        let x_pad = padding(x_min, x_max);
        let y_pad = padding(y_min, y_max);

        let root = SVGBackend::new(path, self.size).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(name, ("sans-serif", self.font_size))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(
                (x_min - x_pad)..(x_max + x_pad),
                (y_min - y_pad)..(y_max + y_pad),
            )?;
        chart.configure_mesh().draw()?;

        chart
            .draw_series(
                dataset
                    .x()
                    .iter()
                    .zip(dataset.y().iter())
                    .map(|(&x, &y)| Circle::new((x, y), 2, BLUE.filled())),
            )?
            .label("Original data")
            .legend(|(x, y)| Circle::new((x, y), 3, BLUE.filled()));

        // draw curves in ascending x so lines do not double back
        let xs = dataset.x();
        let mut order: Vec<usize> = (0..xs.len()).collect();
        order.sort_by(|&a, &b| xs[a].total_cmp(&xs[b]));

        for (idx, (label, curve)) in curves.iter().enumerate() {
            let color = CURVE_COLORS[idx % CURVE_COLORS.len()];
            chart
                .draw_series(LineSeries::new(
                    order.iter().map(|&i| (xs[i], curve[i])),
                    color.stroke_width(2),
                ))?
                .label(label.as_str())
                .legend(move |(x, y)| legend_line(x, y, color));
        }

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;

        root.present()?;
        Ok(())
    }

    fn draw_quiver(&self, path: &Path, name: &str, groups: &[ArrowGroup]) -> anyhow::Result<()> {
        let limit = self.axis_limit;
        let root = SVGBackend::new(path, self.size).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(name, ("sans-serif", self.font_size))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(40)
            .build_cartesian_2d(-limit..limit, -limit..limit)?;
        chart.configure_mesh().draw()?;

        let head = limit * 0.04;
        for group in groups {
            let color = group.color;
            chart
                .draw_series(group.vectors.iter().map(|&(dx, dy)| {
                    PathElement::new(vec![(0.0, 0.0), (dx, dy)], color.stroke_width(2))
                }))?
                .label(group.label.as_str())
                .legend(move |(x, y)| legend_line(x, y, color));

            chart.draw_series(
                group
                    .vectors
                    .iter()
                    .filter_map(|&(dx, dy)| arrow_head(dx, dy, head))
                    .map(|points| Polygon::new(points, color.filled())),
            )?;
        }

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;

        root.present()?;
        Ok(())
    }

    fn draw_matrix(&self, path: &Path, name: &str, matrix: ArrayView2<f64>) -> anyhow::Result<()> {
        let (rows, cols) = matrix.dim();
        let root = SVGBackend::new(path, self.size).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(name, ("sans-serif", self.font_size))
            .margin(10)
            .x_label_area_size(30)
            .y_label_area_size(30)
            .build_cartesian_2d(0.0..cols as f64, 0.0..rows as f64)?;
        chart.configure_mesh().disable_mesh().draw()?;

        chart.draw_series(matrix.indexed_iter().map(|((i, j), &v)| {
            let top = (rows - i) as f64;
            Rectangle::new(
                [(j as f64, top), (j as f64 + 1.0, top - 1.0)],
                blue_white_red(v).filled(),
            )
        }))?;

        root.present()?;
        Ok(())
    }
}

fn legend_line(x: i32, y: i32, color: RGBColor) -> PathElement<(i32, i32)> {
    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
}

fn padding(lo: f64, hi: f64) -> f64 {
    let span = hi - lo;
    if span > 0.0 {
        span * 0.05
    } else {
        1.0
    }
}

fn arrow_head(dx: f64, dy: f64, size: f64) -> Option<Vec<(f64, f64)>> {
    let len = (dx * dx + dy * dy).sqrt();
    if len <= f64::EPSILON {
        return None;
    }
    let (ux, uy) = (dx / len, dy / len);
    let (bx, by) = (dx - 2.0 * size * ux, dy - 2.0 * size * uy);
    Some(vec![
        (dx, dy),
        (bx - size * uy, by + size * ux),
        (bx + size * uy, by - size * ux),
    ])
}

/// Diverging colour map over `[-1, 1]`; values outside are clamped.
pub fn blue_white_red(value: f64) -> RGBColor {
    let t = ((value.clamp(-1.0, 1.0) + 1.0) / 2.0).clamp(0.0, 1.0);
    if t < 0.5 {
        let c = (2.0 * t * 255.0).round() as u8;
        RGBColor(c, c, 255)
    } else {
        let c = ((2.0 - 2.0 * t) * 255.0).round() as u8;
        RGBColor(255, c, c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn test_plotter(tag: &str) -> Plotter {
        let dir = std::env::temp_dir().join(format!("single_exercises_{}_{}", tag, std::process::id()));
        PlotterBuilder::new().output_dir(dir).size(400, 300).build()
    }

    #[test]
    fn test_colormap_endpoints() {
        assert_eq!(blue_white_red(-1.0), RGBColor(0, 0, 255));
        assert_eq!(blue_white_red(0.0), RGBColor(255, 255, 255));
        assert_eq!(blue_white_red(1.0), RGBColor(255, 0, 0));
        assert_eq!(blue_white_red(7.0), RGBColor(255, 0, 0));
    }

    #[test]
    fn test_arrow_head() {
        assert!(arrow_head(0.0, 0.0, 0.1).is_none());
        let head = arrow_head(1.0, 0.0, 0.1).unwrap();
        assert_eq!(head[0], (1.0, 0.0));
        assert!((head[1].0 - 0.8).abs() < 1e-12);
        assert!((head[1].1 - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_arrow_group_from_columns() {
        let m = array![[1.0, -2.0], [-4.0, 1.0]];
        let group = ArrowGroup::from_columns("Columns of A", RED, m.view()).unwrap();
        assert_eq!(group.vectors, vec![(1.0, -4.0), (-2.0, 1.0)]);

        let bad = array![[1.0, 2.0, 3.0]];
        assert!(ArrowGroup::from_columns("bad", RED, bad.view()).is_err());
    }

    #[test]
    fn test_render_plots() {
        let plotter = test_plotter("render");

        let dataset = Dataset::new(array![0.0, 1.0, 2.0], array![1.0, 3.0, 5.0]).unwrap();
        let curves = vec![("Fitted line".to_string(), array![1.0, 3.0, 5.0])];
        let path = plotter.scatter_with_curves("scatter", &dataset, &curves).unwrap();
        assert!(fs::read_to_string(&path).unwrap().contains("<svg"));

        let group = ArrowGroup::new("Eigen vectors", GREEN, vec![(0.5, 0.5), (-1.0, 2.0)]);
        let path = plotter.quiver("quiver", &[group]).unwrap();
        assert!(path.exists());

        let m = array![[1.0, -0.5], [-0.5, 1.0]];
        let path = plotter.matshow("matrix", m.view()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_curve_length_mismatch() {
        let plotter = test_plotter("mismatch");
        let dataset = Dataset::new(array![0.0, 1.0], array![1.0, 3.0]).unwrap();
        let curves = vec![("short".to_string(), array![1.0])];
        assert!(plotter.scatter_with_curves("bad", &dataset, &curves).is_err());
        assert!(plotter.matshow("empty", ndarray::Array2::<f64>::zeros((0, 0)).view()).is_err());
    }
}
