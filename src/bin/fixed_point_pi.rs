/*
 * @file fixed_point_pi.rs
 * @author Mike Hamburg
 * @copyright 2020-2022 Rambus Inc.
 *
 * Fixed-point Monte Carlo estimate of pi.
 */

use bitsim::{pi,PiOptions};
use clap::Parser;
use log::error;
use std::process::exit;

#[derive(Parser, Debug)]
#[command(version, about = "Estimate pi with 64-bit fixed-point arithmetic")]
struct Args {
    /// Total samples, split evenly among threads
    #[arg(default_value_t = 10000)]
    samples: u64,

    /// Number of worker threads
    #[arg(default_value_t = 1)]
    threads: usize,

    /// Base seed; thread t uses seed + t.  Random if omitted
    seed: Option<u64>,
}

fn main() {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    let args = Args::parse();

    let options = PiOptions { samples: args.samples, threads: args.threads, seed: args.seed };
    match pi::estimate_with(&options) {
        Ok(estimate) => println!("{}", estimate.report()),
        Err(e) => {
            error!("{}", e);
            exit(1);
        }
    }
}
