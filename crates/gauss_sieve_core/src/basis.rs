//! Lattice basis representation
//!
//! An integer lattice basis stored as exact `BigInt` row vectors.

use num_bigint::BigInt;
use num_traits::Zero;
use std::fmt;

/// A lattice basis represented as a matrix of row vectors
///
/// Each row b_i is a basis vector in Z^d.
/// The lattice L(B) = {Σ x_i b_i : x_i ∈ Z}, with n ≤ d.
#[derive(Debug, Clone)]
pub struct LatticeBasis {
    /// Basis vectors as rows (n vectors of dimension d)
    pub vectors: Vec<Vec<BigInt>>,
    /// Number of basis vectors (rank)
    pub n: usize,
    /// Dimension of the ambient space
    pub d: usize,
}

impl LatticeBasis {
    /// Create a new lattice basis from row vectors
    ///
    /// # Panics
    /// Panics if rows have inconsistent dimensions, if the basis is empty,
    /// or if there are more rows than columns.
    pub fn new(vectors: Vec<Vec<BigInt>>) -> Self {
        assert!(!vectors.is_empty(), "Basis cannot be empty");
        let d = vectors[0].len();
        assert!(d > 0, "Vectors cannot be empty");
        assert!(
            vectors.iter().all(|v| v.len() == d),
            "All vectors must have the same dimension"
        );
        let n = vectors.len();
        assert!(n <= d, "Basis cannot have more rows than columns");

        Self { vectors, n, d }
    }

    /// Create a lattice basis from integer slices
    pub fn from_rows<T: Into<BigInt> + Clone>(rows: &[Vec<T>]) -> Self {
        let vectors: Vec<Vec<BigInt>> = rows
            .iter()
            .map(|row| row.iter().map(|x| x.clone().into()).collect())
            .collect();
        Self::new(vectors)
    }

    /// Create the scaled identity basis k·I_n
    pub fn scaled_identity<T: Into<BigInt> + Clone>(n: usize, k: T) -> Self {
        let mut vectors = vec![vec![BigInt::zero(); n]; n];
        for (i, row) in vectors.iter_mut().enumerate() {
            row[i] = k.clone().into();
        }
        Self { vectors, n, d: n }
    }

    /// Create a random square lattice basis for testing
    ///
    /// Entries are drawn uniformly from [-2^(bits-1), 2^(bits-1)).
    ///
    /// # Panics
    /// Panics if `bits` is zero.
    pub fn random<R: rand::Rng>(rng: &mut R, n: usize, bits: u32) -> Self {
        assert!(bits >= 1, "Entry width must be at least one bit");
        let half = 1i64 << (bits - 1);
        let vectors: Vec<Vec<BigInt>> = (0..n)
            .map(|_| {
                (0..n)
                    .map(|_| BigInt::from(rng.gen_range(-half..half)))
                    .collect()
            })
            .collect();
        Self { vectors, n, d: n }
    }

    /// Get vector at index i
    pub fn get(&self, i: usize) -> &[BigInt] {
        &self.vectors[i]
    }

    /// Swap two basis vectors
    pub fn swap(&mut self, i: usize, j: usize) {
        self.vectors.swap(i, j);
    }

    /// Compute inner product <b_i, b_j>
    pub fn inner_product(&self, i: usize, j: usize) -> BigInt {
        self.vectors[i]
            .iter()
            .zip(self.vectors[j].iter())
            .map(|(a, b)| a * b)
            .fold(BigInt::zero(), |acc, x| acc + x)
    }

    /// Compute squared norm ||b_i||^2
    pub fn norm_squared(&self, i: usize) -> BigInt {
        self.inner_product(i, i)
    }

    /// Update b_i = b_i - q * b_j (size reduction step)
    pub fn reduce_row(&mut self, i: usize, j: usize, q: &BigInt) {
        for k in 0..self.d {
            self.vectors[i][k] = &self.vectors[i][k] - q * &self.vectors[j][k];
        }
    }
}

impl fmt::Display for LatticeBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "LatticeBasis ({}×{}):", self.n, self.d)?;
        for (i, v) in self.vectors.iter().enumerate() {
            write!(f, "  b_{}: [", i)?;
            for (j, x) in v.iter().enumerate() {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", x)?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basis_creation() {
        let basis = LatticeBasis::from_rows(&[
            vec![1i64, 0, 3],
            vec![0, 1, 5],
            vec![0, 0, 7],
        ]);

        assert_eq!(basis.n, 3);
        assert_eq!(basis.d, 3);
    }

    #[test]
    fn test_inner_product() {
        let basis = LatticeBasis::from_rows(&[
            vec![1i64, 2, 3],
            vec![4, 5, 6],
            vec![0, 0, 1],
        ]);

        // <b_0, b_0> = 1 + 4 + 9 = 14
        assert_eq!(basis.norm_squared(0), BigInt::from(14));

        // <b_0, b_1> = 4 + 10 + 18 = 32
        assert_eq!(basis.inner_product(0, 1), BigInt::from(32));
    }

    #[test]
    fn test_scaled_identity() {
        let basis = LatticeBasis::scaled_identity(3, 5i64);

        assert_eq!(basis.n, 3);
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { BigInt::from(5) } else { BigInt::zero() };
                assert_eq!(basis.vectors[i][j], expected);
            }
        }
    }

    #[test]
    fn test_reduce_row() {
        let mut basis = LatticeBasis::from_rows(&[
            vec![1i64, 0],
            vec![3, 1],
        ]);

        basis.reduce_row(1, 0, &BigInt::from(3));
        assert_eq!(basis.vectors[1], vec![BigInt::zero(), BigInt::from(1)]);
    }

    #[test]
    #[should_panic]
    fn test_random_rejects_zero_bits() {
        let mut rng = rand::thread_rng();
        LatticeBasis::random(&mut rng, 2, 0);
    }

    #[test]
    #[should_panic]
    fn test_rectangular_wide_only() {
        // 3 rows in dimension 2 is not a valid basis
        LatticeBasis::from_rows(&[vec![1i64, 0], vec![0, 1], vec![1, 1]]);
    }
}
