pub mod dataset;
pub mod decomposition;
pub mod dense;
pub mod fit;
pub mod loss;
pub mod plot;
pub mod projection;
pub mod reduction;
pub mod similarity;
pub mod utils;

pub use utils::Direction;
