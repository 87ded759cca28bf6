//! GaussSieve engine
//!
//! The main sieving loop: draw a candidate (pending stack first, fresh
//! Klein sample otherwise), pairwise-reduce it against the list, classify
//! the outcome, and repeat until the collision budget, the Gaussian
//! Heuristic threshold, or sampler exhaustion ends the run. Termination
//! always yields a vector; callers inspect [`TerminationReason`] to tell a
//! quality-threshold hit from a budget-driven stop.

use num_bigint::BigInt;
use num_traits::Zero;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fmt;

use crate::basis::LatticeBasis;
use crate::linalg::{gaussian_heuristic, is_zero, norm};
use crate::list::SieveList;
use crate::progress::{NullSink, ProgressSink, SieveEvent};
use crate::sampler::{KleinSampler, SampleOutcome, DEFAULT_MAX_ATTEMPTS};

/// Parameters for one sieve run, immutable for its duration
#[derive(Debug, Clone)]
pub struct SieveConfig {
    /// Sampling width σ of the Klein sampler
    pub sigma: f64,
    /// Target ratio μ for the Gaussian Heuristic stopping rule
    pub mu: f64,
    /// Collision budget: the run stops once this many samples have
    /// reduced to zero
    pub max_cycles: usize,
    /// Stop early once a reduced vector satisfies ||v|| ≤ μ·GH
    pub use_gh_stop: bool,
    /// Emit per-iteration progress events
    pub log_every_iteration: bool,
    /// RNG seed; `None` seeds from entropy
    pub seed: Option<u64>,
    /// Cap on whole-vector resampling attempts per sampler call
    pub max_sample_attempts: usize,
}

impl Default for SieveConfig {
    fn default() -> Self {
        Self {
            sigma: 10.0,
            mu: 1.05,
            max_cycles: 100,
            use_gh_stop: false,
            log_every_iteration: false,
            seed: None,
            max_sample_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// Why a sieve run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    /// A reduced vector met the μ·GH quality threshold
    GhThreshold,
    /// The collision budget was spent
    CollisionBudget,
    /// The Klein sampler hit its attempt cap
    SamplerExhausted,
}

impl fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerminationReason::GhThreshold => write!(f, "gh-threshold"),
            TerminationReason::CollisionBudget => write!(f, "collision-budget"),
            TerminationReason::SamplerExhausted => write!(f, "sampler-exhausted"),
        }
    }
}

/// Result of one sieve run
#[derive(Debug, Clone)]
pub struct SieveResult {
    /// Best-effort short vector (last nonzero candidate seen, or the
    /// threshold-meeting vector on a `GhThreshold` stop)
    pub vector: Vec<BigInt>,
    /// Euclidean norm of `vector`
    pub norm: f64,
    /// Total collisions observed (K)
    pub collisions: usize,
    /// Main-loop iterations executed
    pub iterations: usize,
    /// Size of L at termination
    pub list_len: usize,
    pub termination: TerminationReason,
    /// Gaussian Heuristic of the input basis (0.0 for degenerate bases)
    pub gaussian_heuristic: f64,
}

impl SieveResult {
    /// Norm-to-Gaussian-Heuristic ratio; `None` for degenerate bases
    pub fn gh_ratio(&self) -> Option<f64> {
        (self.gaussian_heuristic > 0.0).then(|| self.norm / self.gaussian_heuristic)
    }
}

/// One sieve run over a fixed basis
///
/// The engine exclusively owns L, S, and the random source for the run;
/// parallel parameter sweeps need one engine (and one seed) per run.
pub struct GaussSieve<'a> {
    basis: &'a LatticeBasis,
    config: SieveConfig,
    list: SieveList,
}

impl<'a> GaussSieve<'a> {
    pub fn new(basis: &'a LatticeBasis, config: SieveConfig) -> Self {
        Self {
            basis,
            config,
            list: SieveList::new(),
        }
    }

    /// The list L, inspectable after a run
    pub fn list(&self) -> &SieveList {
        &self.list
    }

    /// Run the sieve to termination
    pub fn run(&mut self, sink: &mut dyn ProgressSink) -> SieveResult {
        let gh = gaussian_heuristic(self.basis);
        let threshold = self.config.mu * gh;

        let rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut sampler = KleinSampler::new(
            self.basis,
            self.config.sigma,
            self.config.max_sample_attempts,
            rng,
        );
        let target = vec![0.0f64; self.basis.d];

        let mut collisions = 0usize;
        let mut iterations = 0usize;
        let mut last_nonzero = vec![BigInt::zero(); self.basis.d];
        let mut chatty_null = NullSink;

        sink.on_event(&SieveEvent::Start {
            sigma: self.config.sigma,
            mu: self.config.mu,
            max_cycles: self.config.max_cycles,
            gh_stop: self.config.use_gh_stop,
        });

        let termination = loop {
            if collisions >= self.config.max_cycles {
                break TerminationReason::CollisionBudget;
            }
            iterations += 1;

            let candidate = match self.list.pop_pending() {
                Some(v) => v,
                None => {
                    let attempt_sink: &mut dyn ProgressSink = if self.config.log_every_iteration {
                        &mut *sink
                    } else {
                        &mut chatty_null
                    };
                    match sampler.sample(&target, attempt_sink) {
                        SampleOutcome::Sampled(v) => v,
                        SampleOutcome::Exhausted => break TerminationReason::SamplerExhausted,
                    }
                }
            };

            // A vector that arrives as zero counts as a collision without
            // entering reduction.
            if is_zero(&candidate) {
                collisions += 1;
                if self.config.log_every_iteration {
                    sink.on_event(&SieveEvent::Collision {
                        iteration: iterations,
                        collisions,
                        budget: self.config.max_cycles,
                    });
                }
                continue;
            }

            let reduced = self.list.reduce(candidate);
            if is_zero(&reduced) {
                collisions += 1;
                if self.config.log_every_iteration {
                    sink.on_event(&SieveEvent::Collision {
                        iteration: iterations,
                        collisions,
                        budget: self.config.max_cycles,
                    });
                }
                continue;
            }

            let norm_v = norm(&reduced);
            last_nonzero = reduced.clone();

            if self.config.log_every_iteration {
                sink.on_event(&SieveEvent::Iteration {
                    iteration: iterations,
                    norm: norm_v,
                    list_len: self.list.len(),
                    stack_len: self.list.pending_len(),
                    collisions,
                });
            }

            if self.config.use_gh_stop && gh > 0.0 && norm_v <= threshold {
                break TerminationReason::GhThreshold;
            }

            self.list.push(reduced);
        };

        sink.on_event(&SieveEvent::Terminated {
            reason: termination,
            iterations,
            collisions,
        });

        let norm_best = norm(&last_nonzero);
        SieveResult {
            vector: last_nonzero,
            norm: norm_best,
            collisions,
            iterations,
            list_len: self.list.len(),
            termination,
            gaussian_heuristic: gh,
        }
    }
}
