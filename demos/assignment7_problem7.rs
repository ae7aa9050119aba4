//! Eigenvectors of XᵀX projected through X match the left singular vectors of X.

use single_exercises::projection::{ColumnSign, GramProjection};
use single_exercises::utils::random_matrix;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // a. n = m = 5
    let x = random_matrix(5, 5, None);
    println!("Generated X : \n\n{}\n", x);

    // b.
    let projection = GramProjection::compute(x.view())?;
    println!("X^TX eigenvalues : \n\n{}\n", projection.eigenvalues());
    println!("X^TX eigenvectors : \n\n{}\n", projection.eigenvectors());

    // c.
    println!("Projected eigenvectors : \n\n{}\n", projection.projected());
    println!(
        "Projected eigenvectors normalized: \n\n{}\n",
        projection.projected_normalized()
    );

    // d. and e.
    if let Some(u) = projection.svd().u() {
        println!("U : \n\n{}\n", u);
    }

    let alignment = projection.alignment(1e-6)?;
    for (idx, sign) in alignment.iter().enumerate() {
        let note = match sign {
            ColumnSign::Same => "identical",
            ColumnSign::Flipped => "identical up to sign",
            ColumnSign::Different => "different",
        };
        println!("Column {}: {}", idx, note);
    }

    Ok(())
}
