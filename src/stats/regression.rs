//! Least-squares polynomial regression.
//!
//! The design matrix is the polynomial basis `[1, x, x², ...]` of the centered
//! input; the normal equations are solved by Gaussian elimination with partial
//! pivoting. Centering does not change the fitted curve, only its conditioning
//! (years around 2000 squared are ~4e6).

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegressionError {
    #[error("x has {0} values but y has {1}")]
    LengthMismatch(usize, usize),
    #[error("Degree {degree} needs at least {needed} samples, got {got}")]
    TooFewSamples {
        degree: usize,
        needed: usize,
        got: usize,
    },
    #[error("Normal equations are singular")]
    Singular,
}

/// A fitted polynomial `y = Σ cᵢ (x - x̄)ⁱ`.
#[derive(Debug, Clone, PartialEq)]
pub struct PolynomialRegression {
    degree: usize,
    x_offset: f64,
    coefficients: Vec<f64>,
}

impl PolynomialRegression {
    pub fn fit(x: &[f64], y: &[f64], degree: usize) -> Result<Self, RegressionError> {
        if x.len() != y.len() {
            return Err(RegressionError::LengthMismatch(x.len(), y.len()));
        }
        let terms = degree + 1;
        if x.len() < terms {
            return Err(RegressionError::TooFewSamples {
                degree,
                needed: terms,
                got: x.len(),
            });
        }

        let x_offset = x.iter().sum::<f64>() / x.len() as f64;

        // Accumulate XᵀX and Xᵀy without materializing the design matrix
        let mut xtx = vec![vec![0.0; terms]; terms];
        let mut xty = vec![0.0; terms];
        let mut powers = vec![0.0; terms];
        for (&xi, &yi) in x.iter().zip(y) {
            let centered = xi - x_offset;
            let mut p = 1.0;
            for power in powers.iter_mut() {
                *power = p;
                p *= centered;
            }
            for r in 0..terms {
                xty[r] += powers[r] * yi;
                for c in 0..terms {
                    xtx[r][c] += powers[r] * powers[c];
                }
            }
        }

        let coefficients = solve(xtx, xty)?;
        Ok(Self {
            degree,
            x_offset,
            coefficients,
        })
    }

    /// Evaluate the fitted polynomial (Horner's rule).
    pub fn predict(&self, x: f64) -> f64 {
        let centered = x - self.x_offset;
        self.coefficients
            .iter()
            .rev()
            .fold(0.0, |acc, c| acc * centered + c)
    }

    pub fn predict_many(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.predict(x)).collect()
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Coefficients in the centered basis, constant term first.
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn x_offset(&self) -> f64 {
        self.x_offset
    }
}

/// Solve `a · x = b` in place by Gaussian elimination with partial pivoting.
fn solve(mut a: Vec<Vec<f64>>, mut b: Vec<f64>) -> Result<Vec<f64>, RegressionError> {
    let n = b.len();
    let scale = a
        .iter()
        .flat_map(|row| row.iter())
        .fold(0.0_f64, |m, v| m.max(v.abs()));
    let tolerance = scale * n as f64 * f64::EPSILON;

    for col in 0..n {
        let pivot = (col..n)
            .max_by(|&i, &j| a[i][col].abs().total_cmp(&a[j][col].abs()))
            .unwrap_or(col);
        if a[pivot][col].abs() <= tolerance {
            return Err(RegressionError::Singular);
        }
        a.swap(col, pivot);
        b.swap(col, pivot);

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

    let mut x = vec![0.0; n];
    for row in (0..n).rev() {
        let tail: f64 = (row + 1..n).map(|k| a[row][k] * x[k]).sum();
        x[row] = (b[row] - tail) / a[row][row];
    }
    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn years(from: i32, to: i32) -> Vec<f64> {
        (from..=to).map(f64::from).collect()
    }

    #[test]
    fn recovers_exact_quadratic() {
        let curve = |x: f64| 60.0 + 0.3 * (x - 1990.0) - 0.004 * (x - 1990.0).powi(2);
        let x = years(1990, 2019);
        let y: Vec<f64> = x.iter().map(|&v| curve(v)).collect();

        let model = PolynomialRegression::fit(&x, &y, 2).unwrap();
        assert_eq!(model.degree(), 2);
        for target in [1995.0, 2019.0, 2030.0, 2100.0] {
            assert!((model.predict(target) - curve(target)).abs() < 1e-6);
        }
    }

    #[test]
    fn linear_fit_matches_slope_and_intercept() {
        let x = vec![1.0, 2.0, 3.0, 4.0];
        let y = vec![3.0, 5.0, 7.0, 9.0];
        let model = PolynomialRegression::fit(&x, &y, 1).unwrap();

        // Centered at 2.5: y = 6 + 2 (x - 2.5)
        assert!((model.x_offset() - 2.5).abs() < 1e-12);
        assert!((model.coefficients()[0] - 6.0).abs() < 1e-9);
        assert!((model.coefficients()[1] - 2.0).abs() < 1e-9);
        assert!((model.predict(10.0) - 21.0).abs() < 1e-9);
    }

    #[test]
    fn noisy_fit_minimizes_squared_error() {
        let x = vec![0.0, 1.0, 2.0];
        let y = vec![1.0, 2.0, 2.0];
        let model = PolynomialRegression::fit(&x, &y, 1).unwrap();
        // Ordinary least squares: slope 0.5, intercept 7/6
        assert!((model.predict(0.0) - 7.0 / 6.0).abs() < 1e-9);
        assert!((model.predict(2.0) - 13.0 / 6.0).abs() < 1e-9);
    }

    #[test]
    fn constant_x_is_singular() {
        let x = vec![2000.0; 8];
        let y = vec![70.0; 8];
        assert_eq!(
            PolynomialRegression::fit(&x, &y, 2),
            Err(RegressionError::Singular)
        );
    }

    #[test]
    fn rejects_bad_input_shapes() {
        assert_eq!(
            PolynomialRegression::fit(&[1.0, 2.0], &[1.0], 1),
            Err(RegressionError::LengthMismatch(2, 1))
        );
        assert_eq!(
            PolynomialRegression::fit(&[1.0, 2.0], &[1.0, 2.0], 2),
            Err(RegressionError::TooFewSamples {
                degree: 2,
                needed: 3,
                got: 2
            })
        );
    }
}
