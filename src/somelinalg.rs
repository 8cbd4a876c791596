//! dense linear algebra for the Gauss-Jordan kernel
#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
/// augmented matrix [A | b] in one contiguous row-major buffer
pub mod aug_matrix;
/// in-place Gauss-Jordan elimination with partial pivoting,
/// sequential and rayon data-parallel variants
pub mod gauss_jordan;
/// diagnostics for linear systems and matrices: if it is singular
/// or poorly conditioned
pub mod linear_sys_diagnostics;
