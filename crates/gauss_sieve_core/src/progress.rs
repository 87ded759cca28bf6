//! Progress event reporting
//!
//! The sieve and the sampler emit structured events to an abstract sink;
//! callers choose how (or whether) to render them. The event format is
//! informational only and not part of the solver contract.

use crate::sieve::TerminationReason;

/// Events emitted during a sieve run
#[derive(Debug, Clone)]
pub enum SieveEvent {
    /// A run started with the given parameters
    Start {
        sigma: f64,
        mu: f64,
        max_cycles: usize,
        gh_stop: bool,
    },
    /// The Klein sampler started one sampling attempt
    SampleAttempt { attempt: usize },
    /// A candidate reduced to (or arrived as) the zero vector
    Collision {
        iteration: usize,
        collisions: usize,
        budget: usize,
    },
    /// A nonzero reduced candidate was produced
    Iteration {
        iteration: usize,
        norm: f64,
        list_len: usize,
        stack_len: usize,
        collisions: usize,
    },
    /// The run ended
    Terminated {
        reason: TerminationReason,
        iterations: usize,
        collisions: usize,
    },
}

/// Abstract sink for sieve progress events
pub trait ProgressSink {
    fn on_event(&mut self, event: &SieveEvent);
}

/// Sink that discards all events
#[derive(Debug, Default)]
pub struct NullSink;

impl ProgressSink for NullSink {
    fn on_event(&mut self, _event: &SieveEvent) {}
}

/// Sink that writes one line per event to stderr
#[derive(Debug, Default)]
pub struct StderrSink;

impl ProgressSink for StderrSink {
    fn on_event(&mut self, event: &SieveEvent) {
        match event {
            SieveEvent::Start {
                sigma,
                mu,
                max_cycles,
                gh_stop,
            } => eprintln!(
                "gauss-sieve: starting sweep (sigma={:.6e}, mu={}, max_cycles={}, gh_stop={})",
                sigma, mu, max_cycles, gh_stop
            ),
            SieveEvent::SampleAttempt { attempt } => {
                eprintln!("gauss-sieve: sampler attempt {}", attempt)
            }
            SieveEvent::Collision {
                iteration,
                collisions,
                budget,
            } => eprintln!(
                "gauss-sieve: collision at iteration {} (K={}/{})",
                iteration, collisions, budget
            ),
            SieveEvent::Iteration {
                iteration,
                norm,
                list_len,
                stack_len,
                collisions,
            } => eprintln!(
                "gauss-sieve: iteration {} | norm={:.4} | L={} | S={} | K={}",
                iteration, norm, list_len, stack_len, collisions
            ),
            SieveEvent::Terminated {
                reason,
                iterations,
                collisions,
            } => eprintln!(
                "gauss-sieve: terminated ({}) after {} iterations, {} collisions",
                reason, iterations, collisions
            ),
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Sink that records events for assertions
    #[derive(Debug, Default)]
    pub struct RecordingSink {
        pub events: Vec<SieveEvent>,
    }

    impl ProgressSink for RecordingSink {
        fn on_event(&mut self, event: &SieveEvent) {
            self.events.push(event.clone());
        }
    }
}
