//! LLL lattice basis reduction
//!
//! Floating-point Gram-Schmidt LLL, used to precondition a basis before
//! sieving. Only row operations and swaps are applied, so the output spans
//! the same lattice. The GSO data is recomputed after every basis mutation;
//! robust and plenty fast at sieve-scale dimensions.

use num_bigint::BigInt;
use num_traits::FromPrimitive;

use crate::basis::LatticeBasis;
use crate::linalg::Gso;

/// LLL configuration parameters
#[derive(Debug, Clone)]
pub struct LllConfig {
    /// Lovász parameter δ in (1/4, 1); higher is stronger reduction
    pub delta: f64,
    /// Safety cap on main-loop iterations
    pub max_iterations: usize,
}

impl Default for LllConfig {
    fn default() -> Self {
        Self {
            delta: 0.99,
            max_iterations: 1_000_000,
        }
    }
}

/// Statistics from an LLL run
#[derive(Debug, Clone, Default)]
pub struct LllStats {
    pub iterations: usize,
    pub swaps: usize,
    pub size_reductions: usize,
}

/// Reduce a basis with the LLL algorithm
pub fn lll_reduce(basis: &LatticeBasis, config: &LllConfig) -> (LatticeBasis, LllStats) {
    let mut b = basis.clone();
    let mut stats = LllStats::default();
    let n = b.n;

    if n <= 1 {
        return (b, stats);
    }

    let mut gso = Gso::compute(&b);
    let mut k = 1usize;

    while k < n && stats.iterations < config.max_iterations {
        stats.iterations += 1;

        // Size-reduce b_k against b_{k-1}, ..., b_0. Each row operation
        // invalidates μ_kj' for j' < j, so repeat with fresh GSO data. The
        // |μ| > 1/2 guard matters: μ exactly 1/2 is already size-reduced,
        // and rounding it away from zero would flip the row between +1/2
        // and -1/2 forever. The pass cap absorbs float drift at the bound.
        let mut passes = 0usize;
        loop {
            let mut changed = false;
            for j in (0..k).rev() {
                let mu_kj = gso.mu[k][j];
                if mu_kj.abs() > 0.5 {
                    if let Some(q_big) = BigInt::from_f64(mu_kj.round()) {
                        b.reduce_row(k, j, &q_big);
                        stats.size_reductions += 1;
                        changed = true;
                    }
                }
            }
            if !changed {
                break;
            }
            gso = Gso::compute(&b);
            passes += 1;
            if passes > k + 1 {
                break;
            }
        }

        // Lovász condition: δ ||b*_{k-1}||² ≤ ||b*_k||² + μ²_{k,k-1} ||b*_{k-1}||²
        let lhs = config.delta * gso.norms_sq[k - 1];
        let rhs = gso.norms_sq[k] + gso.mu[k][k - 1].powi(2) * gso.norms_sq[k - 1];
        if rhs >= lhs {
            k += 1;
        } else {
            b.swap(k, k - 1);
            gso = Gso::compute(&b);
            stats.swaps += 1;
            k = if k > 1 { k - 1 } else { 1 };
        }
    }

    (b, stats)
}

/// Check whether a basis is LLL-reduced under the given parameters
pub fn is_lll_reduced(basis: &LatticeBasis, config: &LllConfig) -> bool {
    let gso = Gso::compute(basis);
    let n = basis.n;

    for i in 1..n {
        for j in 0..i {
            // Allow a little float slack over the exact 1/2 bound
            if gso.mu[i][j].abs() > 0.5 + 1e-9 {
                return false;
            }
        }
    }

    for k in 1..n {
        let lhs = config.delta * gso.norms_sq[k - 1];
        let rhs = gso.norms_sq[k] + gso.mu[k][k - 1].powi(2) * gso.norms_sq[k - 1];
        if rhs < lhs - 1e-9 * lhs.abs() {
            return false;
        }
    }

    true
}
