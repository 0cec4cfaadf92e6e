/*
 * @file collision_threshold.rs
 * @author Mike Hamburg
 * @copyright 2020-2022 Rambus Inc.
 *
 * Average collision thresholds for sparse-fill approaches.
 */

use bitsim::{fresh_seed,collision,Approach,SweepOptions};
use clap::Parser;
use log::{error,info};
use std::process::exit;

#[derive(Parser, Debug)]
#[command(version, about = "Average collision thresholds for sparse-fill approaches")]
struct Args {
    /// Trials per approach
    #[arg(default_value_t = 100000)]
    trials: u64,

    /// Log2 of the table size
    #[arg(default_value_t = 20)]
    bits: u32,

    /// Items per run (except for the random approach)
    #[arg(default_value_t = 1000)]
    run_length: usize,

    /// Seed for a repeatable run
    #[arg(short, long)]
    seed: Option<u64>,

    /// Only run these approaches (random, addition, xor, multaddition, multxor)
    #[arg(short, long)]
    approach: Vec<Approach>,
}

fn main() {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(fresh_seed);
    info!("seed {}", seed);

    let mut options = SweepOptions {
        trials: args.trials,
        bits: args.bits,
        run_length: args.run_length,
        seed: Some(seed),
        ..SweepOptions::default()
    };
    if !args.approach.is_empty() { options.approaches = args.approach; }

    if let Err(e) = collision::sweep(&options) {
        error!("{}", e);
        exit(1);
    }
}
