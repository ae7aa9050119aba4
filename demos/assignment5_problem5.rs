//! Cosine similarity between 10 random vectors, rendered as a colour-mapped matrix.

use single_exercises::plot::PlotterBuilder;
use single_exercises::similarity::cosine_similarity_matrix;
use single_exercises::utils::random_matrix;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let vectors = random_matrix(10, 4, None);
    let similarity = cosine_similarity_matrix(vectors.view())?;

    let plotter = PlotterBuilder::new().size(700, 700).build();
    let path = plotter.matshow("cosine_similarity", similarity.view())?;
    println!("Similarity matrix written to {}", path.display());

    Ok(())
}
