//! GaussSieve Core Library
//!
//! Randomized list-sieve approximation of the Shortest Vector Problem for
//! exact-integer lattice bases.
//!
//! # Overview
//!
//! The sieve repeatedly samples lattice vectors from a Klein-style discrete
//! Gaussian sampler and pairwise-reduces them against a maintained list of
//! short vectors; samples that collapse to zero ("collisions") drive the
//! convergence heuristic. Optional stopping rule: terminate once a reduced
//! vector falls below μ times the Gaussian Heuristic of the basis.
//!
//! # Key Components
//!
//! - [`basis`] - Exact-integer lattice basis representation
//! - [`linalg`] - Norms, Gram-Schmidt orthogonalization, Gaussian Heuristic
//! - [`sampler`] - Klein sampler over a fixed basis
//! - [`list`] - The sieve list L and pending stack S with 2-reduction
//! - [`sieve`] - The main sieving loop
//! - [`lll`] - LLL preprocessing of a basis before sieving
//! - [`basis_file`] - Bracketed text format I/O for bases and vectors
//! - [`progress`] - Progress event sink abstraction
//!
//! # Example
//!
//! ```
//! use gauss_sieve_core::{GaussSieve, LatticeBasis, SieveConfig, NullSink};
//!
//! let basis = LatticeBasis::from_rows(&[vec![2i64, 0], vec![0, 2]]);
//! let config = SieveConfig {
//!     sigma: 3.0,
//!     max_cycles: 50,
//!     seed: Some(1),
//!     ..Default::default()
//! };
//! let mut sieve = GaussSieve::new(&basis, config);
//! let result = sieve.run(&mut NullSink);
//! assert!(result.collisions <= 50);
//! ```

pub mod basis;
pub mod basis_file;
pub mod linalg;
pub mod list;
pub mod lll;
pub mod progress;
pub mod sampler;
pub mod sieve;

pub use basis::LatticeBasis;
pub use basis_file::{format_vector, parse_basis, read_basis, write_basis, write_vector, BasisFileError};
pub use linalg::{gaussian_heuristic, gram_determinant, norm, norm_squared, Gso};
pub use list::SieveList;
pub use lll::{is_lll_reduced, lll_reduce, LllConfig, LllStats};
pub use progress::{NullSink, ProgressSink, SieveEvent, StderrSink};
pub use sampler::{KleinSampler, SampleOutcome, DEFAULT_MAX_ATTEMPTS};
pub use sieve::{GaussSieve, SieveConfig, SieveResult, TerminationReason};
