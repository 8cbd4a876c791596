use crate::somelinalg::aug_matrix::AugMatrix;
use log::warn;
use nalgebra::DMatrix;

const SINGULARITY_EPS: f64 = 1e-12;

/// The Rouché–Capelli theorem: the system A*x = b has a solution if and only
/// if rank(A) = rank([A b]). The augmented buffer already is [A b], so the
/// second rank comes for free.
pub fn is_solvable(m: &AugMatrix) -> bool {
    let eps = f64::EPSILON;
    let rank_A = m.coefficients().rank(eps);
    let rank_Ab = m.to_dmatrix().rank(eps);
    let result = rank_A == rank_Ab;
    if !result {
        warn!(
            "The system has no solution. rank(A) = {} != rank([A b]) = {}",
            rank_A, rank_Ab
        );
    }
    result
}

pub fn is_singular(A: &DMatrix<f64>, epsilon: f64) -> bool {
    let det = A.determinant();
    let is_singular = det.abs() < epsilon;
    if is_singular {
        warn!("Matrix is singular. Determinant = {:.8}", det);
    }
    is_singular
}

/// condition number = largest singular value / smallest singular value;
/// above `threshold` the solve is sensitive to perturbations of the input
pub fn poorly_conditioned(A: &DMatrix<f64>, threshold: f64) -> bool {
    let singular_values = A.singular_values();
    let max_sigma = singular_values[0];
    let min_sigma = singular_values[singular_values.len() - 1];
    let condition_number = max_sigma / min_sigma;

    let poorly_conditioned = condition_number > threshold;
    if poorly_conditioned {
        warn!(
            "The system of linear equations is poorly conditioned. Condition number = {:.2}",
            condition_number
        );
    }
    poorly_conditioned
}

/// Caller-side pre-solve verification: solvable by rank, non-singular by
/// determinant, acceptably conditioned by singular values. Gauss-Jordan
/// itself only reports an outright zero pivot, so a caller that needs
/// robustness runs this first.
pub fn verify_system(m: &AugMatrix, condition_threshold: f64) -> bool {
    let A = m.coefficients();
    is_solvable(m)
        && !is_singular(&A, SINGULARITY_EPS)
        && !poorly_conditioned(&A, condition_threshold)
}

/// famous example of ill-conditioned matrix
#[cfg(test)]
fn hilbert_matrix(n: usize) -> DMatrix<f64> {
    let mut A = DMatrix::zeros(n, n);
    for i in 1..n + 1 {
        for j in 1..n + 1 {
            A[(i - 1, j - 1)] = 1.0 / (i as f64 + j as f64 - 1.0);
        }
    }
    A
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::DVector;

    #[test]
    fn test_inconsistent_system_is_not_solvable() {
        // same coefficients, contradictory right-hand sides
        let m = AugMatrix::from_rows(&[vec![1.0, 1.0, 2.0], vec![1.0, 1.0, 3.0]]);
        assert!(!is_solvable(&m));
    }

    #[test]
    fn test_regular_system_is_solvable() {
        let m = AugMatrix::from_rows(&[vec![2.0, 1.0, 5.0], vec![1.0, 3.0, 10.0]]);
        assert!(is_solvable(&m));
        assert!(verify_system(&m, 1e5));
    }

    #[test]
    fn test_is_singular() {
        let A = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 2.0, 4.0]);
        assert!(is_singular(&A, 1e-10));
        let A = DMatrix::from_row_slice(2, 2, &[2.0, 1.0, 1.0, 3.0]);
        assert!(!is_singular(&A, 1e-10));
    }

    #[test]
    fn test_poorly_conditioned_hilbert() {
        let A = hilbert_matrix(6);
        assert!(poorly_conditioned(&A, 1e5));
        let well = DMatrix::identity(6, 6);
        assert!(!poorly_conditioned(&well, 1e5));
    }

    #[test]
    fn test_verify_rejects_singular_augmented() {
        let A = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 2.0, 4.0]);
        let b = DVector::from_vec(vec![3.0, 6.0]);
        // solvable (rank 1 both sides) but singular, verification fails
        let m = AugMatrix::from_system(&A, &b);
        assert!(is_solvable(&m));
        assert!(!verify_system(&m, 1e5));
    }
}
