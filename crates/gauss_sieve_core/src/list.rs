//! Sieve list maintenance and pairwise (Lagrange) reduction
//!
//! `SieveList` holds the growing set L of candidate short vectors and the
//! pending stack S of vectors displaced from L that await reprocessing.
//! After every [`SieveList::reduce`] call, no member of L can be 2-reduced
//! by the returned vector; displaced members sit on S until the engine
//! feeds them back through, which is what restores the global pairwise
//! invariant over time.

use num_bigint::BigInt;

use crate::linalg::{is_zero, norm_squared, sub};

/// The list L of pairwise-reduced vectors plus the pending stack S
#[derive(Debug, Clone, Default)]
pub struct SieveList {
    vectors: Vec<Vec<BigInt>>,
    pending: Vec<Vec<BigInt>>,
}

impl SieveList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Append a vector to L without reduction
    pub fn push(&mut self, v: Vec<BigInt>) {
        self.vectors.push(v);
    }

    /// Pop the most recently displaced vector (LIFO)
    pub fn pop_pending(&mut self) -> Option<Vec<BigInt>> {
        self.pending.pop()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Vec<BigInt>> {
        self.vectors.iter()
    }

    /// Squared norm of the shortest vector currently in L
    pub fn shortest_norm_squared(&self) -> Option<BigInt> {
        self.vectors.iter().map(|v| norm_squared(v)).min()
    }

    /// Pairwise-reduce a candidate against L, then sweep L against it
    ///
    /// First-found scan: whenever some v ∈ L with ||v|| ≤ ||p|| satisfies
    /// ||p - v|| < ||p||, replace p and restart. ||p||² strictly decreases
    /// at every step and is a nonnegative integer, so the scan terminates.
    /// The non-strict norm comparison is what makes collisions possible: a
    /// candidate that equals a list member reduces straight to zero.
    ///
    /// If the stabilized p is nonzero, every v ∈ L with ||v|| > ||p|| and
    /// ||v - p|| < ||v|| is removed (swap-remove; L is a set) and the
    /// nonzero difference v - p is pushed onto S for reprocessing.
    pub fn reduce(&mut self, p: Vec<BigInt>) -> Vec<BigInt> {
        let mut p = p;
        let mut norm_p = norm_squared(&p);

        'scan: loop {
            for v in &self.vectors {
                if norm_squared(v) <= norm_p {
                    let diff = sub(&p, v);
                    let norm_diff = norm_squared(&diff);
                    if norm_diff < norm_p {
                        p = diff;
                        norm_p = norm_diff;
                        continue 'scan;
                    }
                }
            }
            break;
        }

        if is_zero(&p) {
            return p;
        }

        let mut i = 0;
        while i < self.vectors.len() {
            let norm_v = norm_squared(&self.vectors[i]);
            if norm_v > norm_p {
                let diff = sub(&self.vectors[i], &p);
                if norm_squared(&diff) < norm_v {
                    self.vectors.swap_remove(i);
                    if !is_zero(&diff) {
                        self.pending.push(diff);
                    }
                    continue;
                }
            }
            i += 1;
        }

        p
    }
}
