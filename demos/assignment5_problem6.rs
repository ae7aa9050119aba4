//! L1 and L2 loss between two random vectors.

use single_exercises::loss::{l1_loss, l2_loss};
use single_exercises::utils::random_vector;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let v1 = random_vector(5, None);
    let v2 = random_vector(5, None);

    println!("V1 : {}", v1);
    println!("V2 : {}", v2);
    println!("L1 Loss : {}", l1_loss(v1.view(), v2.view())?);
    println!("L2 Loss : {}", l2_loss(v1.view(), v2.view())?);

    Ok(())
}
