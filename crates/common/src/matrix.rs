//! Small fixed-size matrices and the cubic curve bases.
//!
//! A basis matrix maps the time power vector `[1, t, t², t³]` to four
//! per-control-point blend weights. The three fixed bases below differ only
//! in their coefficients and implied scale factor.

/// Row-major fixed-size matrix supporting scale and multiply.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Matrix<const R: usize, const C: usize>(pub [[f64; C]; R]);

impl<const R: usize, const C: usize> Matrix<R, C> {
    pub const fn new(values: [[f64; C]; R]) -> Self {
        Self(values)
    }

    /// Multiply every element by a constant factor.
    pub fn scale(self, factor: f64) -> Self {
        let mut out = self.0;
        for row in &mut out {
            for v in row {
                *v *= factor;
            }
        }
        Self(out)
    }

    /// Standard matrix product `self · rhs`.
    pub fn mul<const K: usize>(self, rhs: &Matrix<C, K>) -> Matrix<R, K> {
        let mut out = [[0.0; K]; R];
        for (r, out_row) in out.iter_mut().enumerate() {
            for (k, out_v) in out_row.iter_mut().enumerate() {
                let mut acc = 0.0;
                for c in 0..C {
                    acc += self.0[r][c] * rhs.0[c][k];
                }
                *out_v = acc;
            }
        }
        Matrix(out)
    }

    pub fn row(&self, r: usize) -> [f64; C] {
        self.0[r]
    }
}

/// A 4×4 coefficient matrix mapping the time power vector to blend weights.
pub type Basis = Matrix<4, 4>;

/// Bezier-style cubic basis (scale 1).
pub const CUBIC: Basis = Matrix::new([
    [1.0, 0.0, 0.0, 0.0],
    [-3.0, 3.0, 0.0, 0.0],
    [3.0, -6.0, 3.0, 0.0],
    [-1.0, 3.0, -3.0, 1.0],
]);

/// Uniform cubic B-spline basis; apply with scale 1/6.
pub const BSPLINE: Basis = Matrix::new([
    [1.0, 4.0, 1.0, 0.0],
    [-3.0, 0.0, 3.0, 0.0],
    [3.0, -6.0, 3.0, 0.0],
    [-1.0, 3.0, -3.0, 1.0],
]);

/// Catmull-Rom basis; apply with scale 1/2.
pub const CATMULL_ROM: Basis = Matrix::new([
    [0.0, 2.0, 0.0, 0.0],
    [-1.0, 0.0, 1.0, 0.0],
    [2.0, -5.0, 4.0, -1.0],
    [-1.0, 3.0, -3.0, 1.0],
]);

/// The `[1, t, t², t³]` power row for a normalized parameter.
pub fn power_row(t: f64) -> Matrix<1, 4> {
    Matrix::new([[1.0, t, t * t, t * t * t]])
}

/// Per-control-point blend weights: the (optionally pre-scaled) power row
/// multiplied through the basis.
pub fn weights(basis: &Basis, t: f64, scale: f64) -> [f64; 4] {
    let mut row = power_row(t);
    if scale != 1.0 {
        row = row.scale(scale);
    }
    row.mul(basis).row(0)
}
