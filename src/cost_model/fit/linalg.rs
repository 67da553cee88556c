//! fit::linalg — column-normalized SVD least squares.
//!
//! Purpose
//! -------
//! Solve `min ‖y − X·c‖²` through a thin SVD of the column-normalized
//! design, and expose the spectrum needed for condition numbers and
//! coefficient covariances.
//!
//! Key behaviors
//! -------------
//! - Columns are scaled to unit Euclidean norm (`Z = X·D⁻¹`); zero columns
//!   keep scale 1.
//! - The pseudo-inverse drops singular values `≤ rcond·σ_max`, so exactly
//!   collinear columns share weight in the minimum-norm solution.
//! - `κ = σ_max/σ_min` is reported on `Z`; it is `∞` when the design is
//!   rank deficient or has fewer rows than columns.
//! - [`SvdSolve::unscaled_covariance_diag`] uses the *untruncated* spectrum
//!   so weakly identified directions show up as inflated variances.
//!
//! Conventions
//! -----------
//! - `ndarray` in, `ndarray` out; `nalgebra` is confined to this file.
use nalgebra::{DMatrix, DVector};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

/// Result of a column-normalized SVD least-squares solve.
#[derive(Debug, Clone)]
pub struct SvdSolve {
    /// Coefficients in the original column units.
    pub coefficients: Array1<f64>,
    /// Euclidean norm of each design column (1 for all-zero columns).
    pub column_scales: Array1<f64>,
    /// `σ_max / σ_min` of the normalized design.
    pub condition_number: f64,
    singular_values: Vec<f64>,
    v_t: Option<DMatrix<f64>>,
}

impl SvdSolve {
    /// Diagonal of `D⁻¹ V Σ⁻² Vᵀ D⁻¹`, the coefficient covariance up to the
    /// residual variance factor `s²`.
    ///
    /// Returns `None` when the right singular vectors are unavailable or the
    /// system has fewer rows than columns. A zero singular value paired with
    /// a nonzero loading gives an infinite variance.
    pub fn unscaled_covariance_diag(&self) -> Option<Array1<f64>> {
        let v_t = self.v_t.as_ref()?;
        let k = self.column_scales.len();
        if self.singular_values.len() < k {
            return None;
        }
        let mut diag = Array1::<f64>::zeros(k);
        for j in 0..k {
            let mut acc = 0.0;
            for (i, &sigma) in self.singular_values.iter().enumerate() {
                let loading = v_t[(i, j)];
                if loading == 0.0 {
                    continue;
                }
                acc += if sigma > 0.0 { (loading / sigma).powi(2) } else { f64::INFINITY };
            }
            diag[j] = acc / self.column_scales[j].powi(2);
        }
        Some(diag)
    }
}

/// Default relative singular-value cutoff `max(n, k)·ε`.
pub fn default_rcond(n: usize, k: usize) -> f64 {
    n.max(k) as f64 * f64::EPSILON
}

/// Solve `min ‖y − X·c‖²` on the column-normalized design.
///
/// Parameters
/// ----------
/// - `x`: `ArrayView2<f64>`
///   `n×k` design matrix. `n ≥ 1` is expected; `k = 0` yields empty output.
/// - `y`: `ArrayView1<f64>`
///   Length-`n` target vector.
/// - `rcond`: `Option<f64>`
///   Relative cutoff; `None` uses [`default_rcond`].
///
/// Panics
/// ------
/// - If `y.len() != x.nrows()`.
pub fn svd_lstsq(x: ArrayView2<f64>, y: ArrayView1<f64>, rcond: Option<f64>) -> SvdSolve {
    let (n, k) = x.dim();
    assert_eq!(y.len(), n, "target length must match design rows");
    let column_scales: Array1<f64> = x
        .columns()
        .into_iter()
        .map(|col| {
            let norm = col.dot(&col).sqrt();
            if norm > 0.0 && norm.is_finite() { norm } else { 1.0 }
        })
        .collect();
    if k == 0 {
        return SvdSolve {
            coefficients: Array1::zeros(0),
            column_scales,
            condition_number: 1.0,
            singular_values: Vec::new(),
            v_t: None,
        };
    }

    let mut z = DMatrix::<f64>::zeros(n, k);
    fill_normalized(&x, &column_scales, &mut z);
    let rhs = DVector::from_iterator(n, y.iter().copied());

    let svd = z.svd(true, true);
    let singular_values: Vec<f64> = svd.singular_values.iter().copied().collect();
    let sigma_max = singular_values.iter().copied().fold(0.0_f64, f64::max);
    let sigma_min = singular_values.iter().copied().fold(f64::INFINITY, f64::min);
    let condition_number = if singular_values.len() < k || sigma_min <= 0.0 {
        f64::INFINITY
    } else {
        sigma_max / sigma_min
    };

    let cutoff = rcond.unwrap_or_else(|| default_rcond(n, k)) * sigma_max;
    let mut scaled = Array1::<f64>::zeros(k);
    if let (Some(u), Some(v_t)) = (svd.u.as_ref(), svd.v_t.as_ref()) {
        for (i, &sigma) in singular_values.iter().enumerate() {
            if sigma <= cutoff {
                continue;
            }
            let weight = u.column(i).dot(&rhs) / sigma;
            for j in 0..k {
                scaled[j] += weight * v_t[(i, j)];
            }
        }
    }
    let coefficients = &scaled / &column_scales;

    SvdSolve { coefficients, column_scales, condition_number, singular_values, v_t: svd.v_t }
}

/// Residual sum of squares `‖y − X·c‖²`.
pub fn residual_sum_of_squares(x: ArrayView2<f64>, y: ArrayView1<f64>, c: ArrayView1<f64>) -> f64 {
    let r = &y - &x.dot(&c);
    r.dot(&r)
}

/// Copy `x` into `z` column by column, dividing each column by its scale.
fn fill_normalized(x: &ArrayView2<f64>, scales: &Array1<f64>, z: &mut DMatrix<f64>) {
    let (n, k) = x.dim();
    for j in 0..k {
        for i in 0..n {
            z[(i, j)] = x[[i, j]] / scales[j];
        }
    }
}

/// Copy the columns listed in `cols` out of `x`.
pub fn select_columns(x: ArrayView2<f64>, cols: &[usize]) -> Array2<f64> {
    Array2::from_shape_fn((x.nrows(), cols.len()), |(i, j)| x[[i, cols[j]]])
}
