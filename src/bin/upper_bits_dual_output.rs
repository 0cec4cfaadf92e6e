/*
 * @file upper_bits_dual_output.rs
 * @author Mike Hamburg
 * @copyright 2020-2022 Rambus Inc.
 *
 * Search for pairs of multipliers whose concatenated upper bits are
 * unique.  WINNER @ 16 bits: 0xf01f39c13d6a7d81, 0x9683ac7883fc67b7
 */

use bitsim::{fresh_seed,search,Family,SearchOptions};
use clap::Parser;
use log::{error,info};
use std::process::exit;

#[derive(Parser, Debug)]
#[command(version, about = "Search for multiplier pairs with unique concatenated upper bits")]
struct Args {
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

    let family = Family::DualOutput;
    let options = SearchOptions {
        widths: 1..=args.max_bits,
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
