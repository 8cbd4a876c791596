use crate::somelinalg::aug_matrix::AugMatrix;
use log::{info, warn};
use rayon::prelude::*;
use std::fmt;
use std::time::Instant;

/// a selected pivot smaller than this is treated as a zero pivot,
/// i.e. the remaining rows carry no usable entry in the current column
pub const SINGULAR_PIVOT_TOL: f64 = 1e-12;

#[derive(Debug, Clone, PartialEq)]
pub enum GaussJordanError {
    /// elimination step `step` found no pivot above `SINGULAR_PIVOT_TOL`:
    /// the system is singular (or numerically indistinguishable from singular)
    SingularMatrix { step: usize, pivot: f64 },
}

impl fmt::Display for GaussJordanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GaussJordanError::SingularMatrix { step, pivot } => write!(
                f,
                "matrix is singular: pivot {} at elimination step {} is below {}",
                pivot, step, SINGULAR_PIVOT_TOL
            ),
        }
    }
}

impl std::error::Error for GaussJordanError {}

/// Partial pivot search: the row in `start..n` holding the largest-magnitude
/// entry of column `start`. Ties go to the first occurrence, scanning
/// low-to-high.
pub fn max_el(m: &AugMatrix, start: usize) -> usize {
    let mut max = 0.0;
    let mut num = start;
    for i in start..m.n() {
        let candidate = m[(i, start)].abs();
        if candidate > max {
            max = candidate;
            num = i;
        }
    }
    num
}

/// Divide every entry of row `row` (all n + 1 columns) by `k`.
/// The parallel variant is data-parallel over the column index; the
/// iterations touch distinct cells, so no ordering is needed.
pub fn divide_row(m: &mut AugMatrix, row: usize, k: f64, parallel: bool) {
    if !parallel {
        for v in m.row_mut(row) {
            *v /= k;
        }
    } else {
        m.row_mut(row).par_iter_mut().for_each(|v| *v /= k);
    }
}

/// Row `dst` -= k * row `src` over all n + 1 columns. `src` is only read,
/// `dst` only written, so the column loop is data-parallel as well.
pub fn subtract_rows(m: &mut AugMatrix, src: usize, dst: usize, k: f64, parallel: bool) {
    let (src_row, dst_row) = m.row_pair(src, dst);
    if !parallel {
        for (d, s) in dst_row.iter_mut().zip(src_row) {
            *d -= k * s;
        }
    } else {
        dst_row
            .par_iter_mut()
            .zip(src_row.par_iter())
            .for_each(|(d, s)| *d -= k * s);
    }
}

/// Reduce the augmented matrix to reduced row-echelon form in place:
/// one elimination step per pivot column, each step being pivot search,
/// row swap, normalization of the pivot row and elimination of the pivot
/// column from every other row. After n steps columns 0..n-1 are the
/// identity up to roundoff and column n holds the solution.
///
/// In the parallel variant the eliminate sweep is parallelized across rows
/// only, each rayon task owning one row chunk and reading a private copy of
/// the pivot row; the per-row column loop stays serial inside the task, so
/// no nested parallel regions arise. Successive elimination steps are
/// separated by a full barrier, which the parallel iterators provide by
/// construction.
pub fn transform(m: &mut AugMatrix, parallel: bool) -> Result<(), GaussJordanError> {
    let n = m.n();
    let w = m.row_len();
    for i in 0..n {
        // 1. pivot search in column i over the unprocessed rows
        let num = max_el(m, i);
        let pivot = m[(num, i)];
        if pivot.abs() < SINGULAR_PIVOT_TOL {
            warn!(
                "no usable pivot in column {}: largest |entry| = {}",
                i,
                pivot.abs()
            );
            return Err(GaussJordanError::SingularMatrix { step: i, pivot });
        }
        // 2. swap the pivot row into position i
        m.swap_rows(i, num);
        // 3. normalize row i by the diagonal entry
        divide_row(m, i, pivot, parallel);
        // 4. eliminate column i from every row j != i
        if !parallel {
            for j in 0..n {
                if j != i {
                    let k = m[(j, i)];
                    subtract_rows(m, i, j, k, false);
                }
            }
        } else {
            let pivot_row = m.row(i).to_vec();
            m.as_mut_slice()
                .par_chunks_mut(w)
                .enumerate()
                .for_each(|(j, row)| {
                    if j != i {
                        let k = row[i];
                        for (d, s) in row.iter_mut().zip(&pivot_row) {
                            *d -= k * s;
                        }
                    }
                });
        }
    }
    Ok(())
}

/// Solve A*x = b given as the augmented matrix [A | b], in place. On Ok the
/// last column of `m` holds x; on a singular system `m` is left partially
/// reduced and the error names the offending elimination step.
pub fn solve_linear_system(m: &mut AugMatrix, parallel: bool) -> Result<(), GaussJordanError> {
    let begin = Instant::now();
    transform(m, parallel)?;
    info!(
        "Gauss-Jordan ({}) on n = {} finished in {:?}",
        if parallel { "parallel" } else { "serial" },
        m.n(),
        begin.elapsed()
    );
    Ok(())
}
