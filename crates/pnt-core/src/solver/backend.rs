use faer::{prelude::*, solvers::PartialPivLu, Mat};
use thiserror::Error;

/// Errors from linear-system backends.
#[derive(Debug, Error)]
pub enum SolveError {
    #[error("rhs length ({got}) does not match matrix dimension {expected}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("matrix must be square")]
    NotSquare,

    #[error("singular system matrix")]
    Singular,

    #[error("solver produced a non-finite solution")]
    NonFinite,
}

/// Trait for solving dense linear systems (Ax = b).
///
/// This is for linear algebra, not physics: backends know nothing about
/// networks or boundary conditions. Implementations must either return a
/// finite solution vector or fail.
pub trait LinearSystemBackend: Send + Sync {
    /// Solve the linear system Ax = b.
    fn solve(&self, matrix: &[Vec<f64>], rhs: &[f64]) -> Result<Vec<f64>, SolveError>;
}

fn check_shape(matrix: &[Vec<f64>], rhs: &[f64]) -> Result<usize, SolveError> {
    let n = matrix.len();
    if rhs.len() != n {
        return Err(SolveError::DimensionMismatch {
            expected: n,
            got: rhs.len(),
        });
    }
    if matrix.iter().any(|row| row.len() != n) {
        return Err(SolveError::NotSquare);
    }
    Ok(n)
}

/// Gaussian elimination with partial pivoting. Portable fallback with no
/// external dependencies; O(n^3).
#[derive(Debug, Clone, Default)]
pub struct GaussSolver;

impl LinearSystemBackend for GaussSolver {
    fn solve(&self, matrix: &[Vec<f64>], rhs: &[f64]) -> Result<Vec<f64>, SolveError> {
        let n = check_shape(matrix, rhs)?;
        if n == 0 {
            return Ok(Vec::new());
        }

        let mut a = matrix.to_vec();
        let mut b = rhs.to_vec();

        // Forward elimination with row pivoting.
        for col in 0..n {
            let pivot = (col..n)
                .max_by(|&r, &s| {
                    a[r][col]
                        .abs()
                        .partial_cmp(&a[s][col].abs())
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
                .unwrap_or(col);
            if a[pivot][col].abs() < 1e-12 {
                return Err(SolveError::Singular);
            }
            if pivot != col {
                a.swap(col, pivot);
                b.swap(col, pivot);
            }

            for row in col + 1..n {
                let factor = a[row][col] / a[col][col];
                if factor == 0.0 {
                    continue;
                }
                for k in col..n {
                    a[row][k] -= factor * a[col][k];
                }
                b[row] -= factor * b[col];
            }
        }

        // Back substitution.
        let mut x = vec![0.0; n];
        for row in (0..n).rev() {
            let mut sum = b[row];
            for (col, value) in x.iter().enumerate().skip(row + 1) {
                sum -= a[row][col] * value;
            }
            x[row] = sum / a[row][row];
        }

        // A NaN in the input can slip past the pivot-magnitude test (NaN
        // compares false against the threshold) and survive elimination.
        if x.iter().any(|v| !v.is_finite()) {
            return Err(SolveError::NonFinite);
        }

        Ok(x)
    }
}

/// LU decomposition with partial pivoting via faer.
///
/// Significantly faster than the Gaussian fallback for larger systems, with
/// better numerical stability. faer's LU does not fail on singular input, so
/// singularity is detected from a non-finite solution vector.
#[derive(Debug, Clone, Default)]
pub struct FaerSolver;

impl LinearSystemBackend for FaerSolver {
    fn solve(&self, matrix: &[Vec<f64>], rhs: &[f64]) -> Result<Vec<f64>, SolveError> {
        let n = check_shape(matrix, rhs)?;
        if n == 0 {
            return Ok(Vec::new());
        }

        let mat = Mat::from_fn(n, n, |i, j| matrix[i][j]);
        let rhs_mat = Mat::from_fn(n, 1, |i, _| rhs[i]);

        let lu = PartialPivLu::new(mat.as_ref());
        let sol = lu.solve(&rhs_mat);

        let solution: Vec<f64> = (0..n).map(|i| sol.read(i, 0)).collect();
        if solution.iter().any(|v| !v.is_finite()) {
            return Err(SolveError::Singular);
        }

        Ok(solution)
    }
}
