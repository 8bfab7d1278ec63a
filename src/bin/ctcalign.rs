use clap::{Parser, Subcommand};
use ctcalign::ctc::mocks::{mock_random_batch, mock_scenario};
use ctcalign::matrix::to_rows;
use ctcalign::prelude::*;
use log::info;
use ndarray::Axis;

#[global_allocator]
static ALLOC: jemallocator::Jemalloc = jemallocator::Jemalloc;

#[derive(Parser, Debug)]
#[clap(author, about, version)]
struct Opts {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Align the 3x2 demo input and show every intermediate table
    Demo {
        /// Skip penalty (log prob, <= 0)
        #[clap(short = 's', long, default_value_t = -5.0, allow_hyphen_values = true)]
        skip: f64,
    },
    /// Align a random batch and report the elapsed time
    Random {
        /// Number of elements in the batch
        #[clap(short = 'b', long, default_value_t = 16)]
        batch: usize,
        /// Length of outputs
        #[clap(long, default_value_t = 200)]
        n1: usize,
        /// Length of targets
        #[clap(long, default_value_t = 50)]
        n2: usize,
        /// Number of classes
        #[clap(long, default_value_t = 32)]
        nc: usize,
        /// Seed of the random inputs
        #[clap(long, default_value_t = 0)]
        seed: u64,
        /// Process elements one by one.
        /// If not specified, it follows CTC_NOTHREAD.
        #[clap(long)]
        serial: bool,
        /// Size of the worker pool
        #[clap(short = 't', long)]
        threads: Option<usize>,
        /// Print posteriors as JSON
        #[clap(long)]
        json: bool,
    },
}

fn run(opts: &Opts) -> std::result::Result<(), Box<dyn std::error::Error>> {
    match &opts.command {
        Commands::Demo { skip } => {
            if *skip > 0.0 {
                return Err(format!("skip penalty should be <= 0, got {}", skip).into());
            }
            let params = AlignParams::new(*skip);
            let (outputs, targets) = mock_scenario();
            println!("outputs\n{:.4}", outputs);
            println!("targets\n{:.4}", targets);
            let r = CtcAlignment::run(&outputs.view(), &targets.view(), &params)?;
            print!("{}", params);
            print!("{}", r);
            println!("expected_states\n{:.4?}", r.expected_states());
        }
        Commands::Random {
            batch,
            n1,
            n2,
            nc,
            seed,
            serial,
            threads,
            json,
        } => {
            let (outputs, targets) = mock_random_batch::<f32>(*batch, *n1, *n2, *nc, *seed);
            let mut config = if *serial {
                BatchConfig::serial()
            } else {
                BatchConfig::from_env()
            };
            if let Some(n_threads) = threads {
                config = config.with_threads(*n_threads);
            }
            info!("config={}", config);
            let start = std::time::Instant::now();
            let posteriors = align_targets_batch(
                &outputs.view(),
                &targets.view(),
                &AlignParams::default(),
                &config,
            )?;
            let elapsed = start.elapsed();
            let max_deviation = posteriors
                .sum_axis(Axis(2))
                .iter()
                .map(|&s| (s as f64 - 1.0).abs())
                .fold(0.0, f64::max);
            println!("# config={}", config);
            println!("# elapsed_ms={}", elapsed.as_secs_f64() * 1000.0);
            println!("# max_row_sum_deviation={}", max_deviation);
            if *json {
                let rows: Vec<Vec<Vec<f32>>> =
                    posteriors.outer_iter().map(|p| to_rows(&p)).collect();
                println!("{}", serde_json::to_string(&rows)?);
            }
        }
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let opts: Opts = Opts::parse();
    println!("# started_at={}", chrono::Local::now());
    println!("# n_threads={}", rayon::current_num_threads());
    println!("# opts={:?}", opts);
    if let Err(e) = run(&opts) {
        eprintln!("ERROR: {}", e);
        std::process::exit(1);
    }
    println!("# finished_at={}", chrono::Local::now());
}
