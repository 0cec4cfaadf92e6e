/*
 * @file upper_bits_dual_input.rs
 * @author Mike Hamburg
 * @copyright 2020-2022 Rambus Inc.
 *
 * Search for pairs of multipliers, one per half of the input, whose
 * summed products have unique upper bits.
 *
 * Found for 17 bits: 0x3535acc8422972d1, 0xf11b2dc0e0a5161f
 *   0x3535acc8422972d1 = 79613 * 489113 * 98463917
 *   0xf11b2dc0e0a5161f is prime
 * Xoring the products instead of adding seems to make solutions harder
 * to find.
 */

use bitsim::{fresh_seed,search,Family,SearchOptions};
use clap::Parser;
use log::{error,info};
use std::process::exit;

#[derive(Parser, Debug)]
#[command(version, about = "Search for multiplier pairs with unique upper bits of summed products")]
struct Args {
    /// Smallest half-width to test
    #[arg(long, default_value_t = 14)]
    min_bits: u32,

    /// Largest half-width to test
    #[arg(long, default_value_t = 17)]
    max_bits: u32,

    /// Seed for a repeatable search
    #[arg(short, long)]
    seed: Option<u64>,

    /// Stop after this many candidates
    #[arg(short, long)]
    candidates: Option<u64>,
}

fn main() {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(fresh_seed);
    info!("seed {}", seed);

    let family = Family::DualInput;
    let options = SearchOptions {
        widths: args.min_bits..=args.max_bits,
        max_candidates: args.candidates,
        seed: Some(seed),
        ..SearchOptions::for_family(family)
    };

    match search::search(family, &options) {
        Ok(summary) => info!("tried {} candidates, best {:?}", summary.candidates, summary.best),
        Err(e) => {
            error!("{}", e);
            exit(1);
        }
    }
}
