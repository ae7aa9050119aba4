//! # Matrix Decompositions
//!
//! Thin wrappers over the nalgebra factorizations that hand results back as ndarray
//! arrays:
//! - **QR** ([`qr`]): orthogonal times upper-triangular factorization
//! - **Eigen** ([`eigen`]): real eigenpairs of general and symmetric matrices
//! - **SVD** ([`svd`]): thin singular value decomposition with sorted singular values

pub mod eigen;
pub mod qr;
pub mod svd;

pub use eigen::{complex_eigenvalues, Eigen, SymmetricEigen};
pub use qr::QR;
pub use svd::SVD;
