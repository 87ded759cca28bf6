//! GaussSieve CLI
//!
//! Approximate shortest-vector search on integer lattice bases.
//!
//! # Usage
//! ```bash
//! # Run the sieve on a basis file, with LLL preprocessing
//! gauss-sieve solve basis.txt --lll --sigma 10 --max-cycles 500 --seed 1
//!
//! # Stop early once a vector reaches 1.1 × the Gaussian Heuristic
//! gauss-sieve solve basis.txt --gh-stop --mu 1.1
//!
//! # Draw vectors from the Klein sampler alone
//! gauss-sieve sample basis.txt --sigma 10 --count 5
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use gauss_sieve_core::{
    format_vector, gaussian_heuristic, lll_reduce, read_basis, write_basis, write_vector,
    BasisFileError, GaussSieve, KleinSampler, LllConfig, NullSink, ProgressSink, SampleOutcome,
    SieveConfig, StderrSink, DEFAULT_MAX_ATTEMPTS,
};

#[derive(Parser)]
#[command(name = "gauss-sieve")]
#[command(about = "GaussSieve SVP approximation for integer lattice bases")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the sieve on a basis file
    Solve {
        /// Basis file (bracketed/whitespace integer matrix)
        input: PathBuf,

        /// Sampling width σ of the Klein sampler
        #[arg(long, default_value = "10.0")]
        sigma: f64,

        /// Target ratio μ for the Gaussian Heuristic stop
        #[arg(long, default_value = "1.05")]
        mu: f64,

        /// Collision budget
        #[arg(long, default_value = "100")]
        max_cycles: usize,

        /// Stop once a vector reaches μ × GH
        #[arg(long)]
        gh_stop: bool,

        /// LLL-reduce the basis before sieving
        #[arg(long)]
        lll: bool,

        /// RNG seed (omit for entropy seeding)
        #[arg(long)]
        seed: Option<u64>,

        /// Log every iteration to stderr
        #[arg(long)]
        verbose: bool,

        /// Write the best vector to this file
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Draw vectors from the Klein sampler without sieving
    Sample {
        input: PathBuf,

        /// Sampling width σ
        #[arg(long, default_value = "10.0")]
        sigma: f64,

        /// Number of vectors to draw
        #[arg(long, default_value = "1")]
        count: usize,

        /// RNG seed (omit for entropy seeding)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// LLL-reduce a basis file
    Reduce {
        input: PathBuf,
        output: PathBuf,

        /// Lovász parameter δ
        #[arg(long, default_value = "0.99")]
        delta: f64,
    },

    /// Print the Gaussian Heuristic of a basis
    Gh { input: PathBuf },
}

fn main() {
    let cli = Cli::parse();
    let outcome = match cli.command {
        Commands::Solve {
            input,
            sigma,
            mu,
            max_cycles,
            gh_stop,
            lll,
            seed,
            verbose,
            output,
        } => solve(
            &input, sigma, mu, max_cycles, gh_stop, lll, seed, verbose, output,
        ),
        Commands::Sample {
            input,
            sigma,
            count,
            seed,
        } => sample(&input, sigma, count, seed),
        Commands::Reduce {
            input,
            output,
            delta,
        } => reduce(&input, &output, delta),
        Commands::Gh { input } => gh(&input),
    };

    if let Err(e) = outcome {
        eprintln!("gauss-sieve: {}", e);
        std::process::exit(1);
    }
}

#[allow(clippy::too_many_arguments)]
fn solve(
    input: &PathBuf,
    sigma: f64,
    mu: f64,
    max_cycles: usize,
    gh_stop: bool,
    lll: bool,
    seed: Option<u64>,
    verbose: bool,
    output: Option<PathBuf>,
) -> Result<(), BasisFileError> {
    let mut basis = read_basis(input)?;
    println!("Loaded basis: {} × {}", basis.n, basis.d);

    if lll {
        let (reduced, stats) = lll_reduce(&basis, &LllConfig::default());
        println!(
            "LLL preprocessing: {} iterations, {} swaps, {} size reductions",
            stats.iterations, stats.swaps, stats.size_reductions
        );
        basis = reduced;
    }

    let config = SieveConfig {
        sigma,
        mu,
        max_cycles,
        use_gh_stop: gh_stop,
        log_every_iteration: verbose,
        seed,
        max_sample_attempts: DEFAULT_MAX_ATTEMPTS,
    };

    let mut sieve = GaussSieve::new(&basis, config);
    let result = if verbose {
        sieve.run(&mut StderrSink)
    } else {
        sieve.run(&mut NullSink)
    };

    println!("Shortest vector found: {}", format_vector(&result.vector));
    println!("Norm:                  {:.6}", result.norm);
    if result.gaussian_heuristic > 0.0 {
        println!("Gaussian Heuristic:    {:.6}", result.gaussian_heuristic);
        if let Some(ratio) = result.gh_ratio() {
            println!("Norm / GH ratio:       {:.6}", ratio);
        }
    } else {
        println!("Gaussian Heuristic:    degenerate basis (zero Gram determinant)");
    }
    println!("Collisions:            {}", result.collisions);
    println!("Iterations:            {}", result.iterations);
    println!("List size:             {}", result.list_len);
    println!("Termination:           {}", result.termination);

    if let Some(path) = output {
        write_vector(&result.vector, &path)?;
        println!("Vector written to {}", path.display());
    }
    Ok(())
}

fn sample(input: &PathBuf, sigma: f64, count: usize, seed: Option<u64>) -> Result<(), BasisFileError> {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    let basis = read_basis(input)?;
    let rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    let mut sampler = KleinSampler::new(&basis, sigma, DEFAULT_MAX_ATTEMPTS, rng);
    let target = vec![0.0f64; basis.d];
    let mut sink = NullSink;

    for i in 0..count {
        match sampler.sample(&target, &mut sink as &mut dyn ProgressSink) {
            SampleOutcome::Sampled(v) => {
                println!(
                    "v_{} = {} (norm {:.4})",
                    i,
                    format_vector(&v),
                    gauss_sieve_core::norm(&v)
                );
            }
            SampleOutcome::Exhausted => {
                println!("sampler exhausted after {} attempts; stopping", DEFAULT_MAX_ATTEMPTS);
                break;
            }
        }
    }
    Ok(())
}

fn reduce(input: &PathBuf, output: &PathBuf, delta: f64) -> Result<(), BasisFileError> {
    let basis = read_basis(input)?;
    let config = LllConfig {
        delta,
        ..Default::default()
    };
    let (reduced, stats) = lll_reduce(&basis, &config);
    println!(
        "LLL: {} iterations, {} swaps, {} size reductions",
        stats.iterations, stats.swaps, stats.size_reductions
    );
    write_basis(&reduced, output)?;
    println!("Reduced basis written to {}", output.display());
    Ok(())
}

fn gh(input: &PathBuf) -> Result<(), BasisFileError> {
    let basis = read_basis(input)?;
    let value = gaussian_heuristic(&basis);
    if value > 0.0 {
        println!("Gaussian Heuristic: {:.6}", value);
    } else {
        println!("Gaussian Heuristic: degenerate basis (zero Gram determinant)");
    }
    Ok(())
}
