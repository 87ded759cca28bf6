//! Linear algebra primitives
//!
//! Exact-integer vector arithmetic, floating-point Gram-Schmidt
//! orthogonalization, and the Gaussian Heuristic estimate used by the
//! sieve's stopping rule.

use num_bigint::BigInt;
use num_traits::{Signed, ToPrimitive, Zero};

use crate::basis::LatticeBasis;

/// Squared norms below this are treated as a degenerate Gram-Schmidt row.
pub(crate) const GSO_EPS: f64 = 1e-9;

/// Exact squared Euclidean norm of an integer vector
pub fn norm_squared(v: &[BigInt]) -> BigInt {
    v.iter().map(|x| x * x).fold(BigInt::zero(), |acc, x| acc + x)
}

/// Euclidean norm of an integer vector (lossy, for reporting and thresholds)
pub fn norm(v: &[BigInt]) -> f64 {
    bigint_to_f64(&norm_squared(v)).sqrt()
}

/// Coordinate-wise difference a - b
pub fn sub(a: &[BigInt], b: &[BigInt]) -> Vec<BigInt> {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b.iter()).map(|(x, y)| x - y).collect()
}

pub fn is_zero(v: &[BigInt]) -> bool {
    v.iter().all(|x| x.is_zero())
}

/// Convert an integer vector to f64 coordinates
pub fn to_f64_vec(v: &[BigInt]) -> Vec<f64> {
    v.iter().map(bigint_to_f64).collect()
}

/// Convert BigInt to f64 (lossy; saturates to infinity when out of range)
pub fn bigint_to_f64(n: &BigInt) -> f64 {
    n.to_f64().unwrap_or(f64::INFINITY)
}

/// Natural log of a positive BigInt, split over the bit length so that
/// values far beyond the f64 range stay finite.
pub fn ln_bigint(n: &BigInt) -> f64 {
    debug_assert!(n.is_positive());
    let bits = n.bits();
    if bits <= 64 {
        return bigint_to_f64(n).ln();
    }
    let shift = (bits - 64) as usize;
    let top: BigInt = n >> shift;
    bigint_to_f64(&top).ln() + shift as f64 * std::f64::consts::LN_2
}

pub fn dot_f64(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// Gram-Schmidt orthogonalization data (floating-point)
///
/// Rows of `rows` satisfy b*_i ⊥ span(b*_0..i-1) and span the same
/// successive subspaces as the input basis.
#[derive(Debug, Clone)]
pub struct Gso {
    /// Orthogonalized rows b*_i
    pub rows: Vec<Vec<f64>>,
    /// Squared norms ||b*_i||^2
    pub norms_sq: Vec<f64>,
    /// Coefficients μ_ij = <b_i, b*_j> / ||b*_j||^2, lower triangular
    pub mu: Vec<Vec<f64>>,
}

impl Gso {
    /// Compute the Gram-Schmidt orthogonalization of a basis
    ///
    /// Rows whose projection denominator ||b*_j||^2 is numerically zero are
    /// skipped rather than rejected: b_i keeps its component along that
    /// direction and the corresponding μ_ij stays zero. A full-rank basis
    /// never triggers this path.
    pub fn compute(basis: &LatticeBasis) -> Self {
        let n = basis.n;
        let mut rows: Vec<Vec<f64>> = Vec::with_capacity(n);
        let mut norms_sq = vec![0.0f64; n];
        let mut mu: Vec<Vec<f64>> = (0..n).map(|i| vec![0.0f64; i]).collect();

        for i in 0..n {
            let mut row = to_f64_vec(basis.get(i));
            for j in 0..i {
                let denom = norms_sq[j];
                if denom <= GSO_EPS {
                    continue;
                }
                let coeff = dot_f64(&row, &rows[j]) / denom;
                mu[i][j] = coeff;
                for (rk, bk) in row.iter_mut().zip(rows[j].iter()) {
                    *rk -= coeff * bk;
                }
            }
            norms_sq[i] = dot_f64(&row, &row);
            rows.push(row);
        }

        Self { rows, norms_sq, mu }
    }
}

/// Exact determinant of the Gram matrix det(B·Bᵗ)
///
/// Fraction-free Bareiss elimination; every division is exact. Returns zero
/// for rank-deficient bases.
pub fn gram_determinant(basis: &LatticeBasis) -> BigInt {
    let n = basis.n;
    let mut m: Vec<Vec<BigInt>> = (0..n)
        .map(|i| (0..n).map(|j| basis.inner_product(i, j)).collect())
        .collect();

    let mut sign = 1i32;
    let mut denom = BigInt::from(1);

    for k in 0..n.saturating_sub(1) {
        if m[k][k].is_zero() {
            let pivot = (k + 1..n).find(|&r| !m[r][k].is_zero());
            match pivot {
                Some(r) => {
                    m.swap(k, r);
                    sign = -sign;
                }
                None => return BigInt::zero(),
            }
        }
        for i in k + 1..n {
            for j in k + 1..n {
                let num = &m[i][j] * &m[k][k] - &m[i][k] * &m[k][j];
                m[i][j] = num / &denom;
            }
        }
        denom = m[k][k].clone();
    }

    let det = m[n - 1][n - 1].clone();
    if sign < 0 {
        -det
    } else {
        det
    }
}

/// Gaussian Heuristic estimate of the shortest-vector norm
///
/// GH(L) = sqrt(n / 2πe) · vol(L)^(1/n), with vol(L) = sqrt(det(B·Bᵗ)),
/// evaluated in the log domain so that large-dimension determinants never
/// overflow. Returns 0.0 for a degenerate (zero Gram determinant) basis.
pub fn gaussian_heuristic(basis: &LatticeBasis) -> f64 {
    let det = gram_determinant(basis);
    if det.is_zero() {
        return 0.0;
    }

    let n = basis.n as f64;
    let ln_vol = ln_bigint(&det.abs()) / 2.0;
    let ln_coeff = 0.5 * (n / (2.0 * std::f64::consts::PI * std::f64::consts::E)).ln();
    (ln_vol / n + ln_coeff).exp()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_norm_squared_exact() {
        let v = vec![BigInt::from(3), BigInt::from(-4), BigInt::from(12)];
        assert_eq!(norm_squared(&v), BigInt::from(169));
        assert!((norm(&v) - 13.0).abs() < 1e-12);
    }

    #[test]
    fn test_sub_and_is_zero() {
        let a = vec![BigInt::from(5), BigInt::from(2)];
        let b = vec![BigInt::from(5), BigInt::from(2)];
        assert!(is_zero(&sub(&a, &b)));
        assert!(!is_zero(&a));
    }

    #[test]
    fn test_gso_orthogonality() {
        let basis = LatticeBasis::from_rows(&[
            vec![3i64, 1, 0],
            vec![2, 2, 0],
            vec![1, 1, 5],
        ]);
        let gso = Gso::compute(&basis);

        for i in 0..3 {
            for j in 0..i {
                let d = dot_f64(&gso.rows[i], &gso.rows[j]);
                assert!(d.abs() < 1e-9, "b*_{} not orthogonal to b*_{}: {}", i, j, d);
            }
        }

        // ||b*_0||^2 = 10, ||b*_1||^2 = 8 - (8/10)^2 * 10 = 8/5
        assert!((gso.norms_sq[0] - 10.0).abs() < 1e-9);
        assert!((gso.norms_sq[1] - 1.6).abs() < 1e-9);
        assert!((gso.mu[1][0] - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_gso_degenerate_row_is_skipped() {
        // Duplicate rows: second b* collapses to (numerically) zero,
        // and the third row must still orthogonalize without panicking.
        let basis = LatticeBasis::from_rows(&[
            vec![1i64, 0, 0],
            vec![1, 0, 0],
            vec![0, 1, 0],
        ]);
        let gso = Gso::compute(&basis);

        assert!(gso.norms_sq[1].abs() < 1e-9);
        assert!((gso.norms_sq[2] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_gram_determinant_square() {
        // det(B) = 3*2 - 1*2 = 4, so det(B·Bᵗ) = 16
        let basis = LatticeBasis::from_rows(&[vec![3i64, 1], vec![2, 2]]);
        assert_eq!(gram_determinant(&basis), BigInt::from(16));
    }

    #[test]
    fn test_gram_determinant_degenerate() {
        let basis = LatticeBasis::from_rows(&[vec![1i64, 2], vec![2, 4]]);
        assert_eq!(gram_determinant(&basis), BigInt::zero());
    }

    #[test]
    fn test_ln_bigint_large() {
        // ln(2^200) = 200 ln 2
        let n = BigInt::from(1) << 200usize;
        let expected = 200.0 * std::f64::consts::LN_2;
        assert!((ln_bigint(&n) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_gaussian_heuristic_closed_form() {
        // For B = k·I_n: vol = k^n, so GH = k · sqrt(n / 2πe)
        for (n, k) in [(2usize, 2i64), (4, 3), (8, 7)] {
            let basis = LatticeBasis::scaled_identity(n, k);
            let expected = k as f64
                * (n as f64 / (2.0 * std::f64::consts::PI * std::f64::consts::E)).sqrt();
            let gh = gaussian_heuristic(&basis);
            assert!(
                (gh - expected).abs() < 1e-9 * expected,
                "n={} k={}: gh={} expected={}",
                n,
                k,
                gh,
                expected
            );
        }
    }

    #[test]
    fn test_gaussian_heuristic_degenerate_sentinel() {
        let basis = LatticeBasis::from_rows(&[vec![1i64, 2], vec![2, 4]]);
        assert_eq!(gaussian_heuristic(&basis), 0.0);
    }
}
