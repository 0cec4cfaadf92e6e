/*
 * @file upper_bits_single.rs
 * @author Mike Hamburg
 * @copyright 2020-2022 Rambus Inc.
 *
 * Search for single multipliers with unique upper bits.
 *
 * Found by earlier runs, with 1 reserve bit:
 *   20 bits: 0x4827fb4ef68a8ddd, 0xb940080880108f5f
 *   21 bits: 0x7040e6b29b5c190f, 0xa1007dddd1928feb
 */

use bitsim::{fresh_seed,search,Family,SearchOptions};
use clap::Parser;
use log::{error,info};
use std::process::exit;

#[derive(Parser, Debug)]
#[command(version, about = "Search for multipliers whose upper product bits are unique")]
struct Args {
    /// Test input widths below this many bits
    #[arg(default_value_t = 32)]
    max_nbits: u32,

    /// Extra output bits beyond the input width
    #[arg(default_value_t = 1)]
    reserve_bits: u32,

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

    let family = Family::Single { reserve_bits: args.reserve_bits };
    let options = SearchOptions {
        widths: 1..=args.max_nbits.saturating_sub(1),
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
