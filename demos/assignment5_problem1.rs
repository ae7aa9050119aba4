//! Row reduction, column space, inverse-based solve and null space of a fixed 3x3 system.

use ndarray::array;
use single_exercises::dense::solve_with_inverse;
use single_exercises::reduction::{column_space, RowReduction};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let a = array![[3.0, 8.0, -5.0], [3.0, -6.0, -7.0], [3.0, 4.0, 2.0]];
    let b = array![[-1.0], [-1.0], [3.0]];

    // a)
    let reduction = RowReduction::new(a.view());
    println!("RREF of A:\n{}\n", reduction.rref());

    // b)
    println!("Column space basis of A:");
    for col in column_space(a.view()) {
        println!("{}", col);
    }
    println!();

    // c)
    let x = solve_with_inverse(a.view(), b.view())?;
    println!("X = A^-1 b:\n{}\n", x);

    // d)
    let nul = reduction.null_space();
    if nul.is_empty() {
        println!("Null space of A: {{0}}");
    } else {
        println!("Null space basis of A:");
        for v in nul {
            println!("{}", v);
        }
    }

    Ok(())
}
