/*!
 * Monte Carlo experiments on bit distribution.
 *
 * This crate collects a few throwaway experiments comparing ways of
 * spreading values over a table of bits.  Each experiment has a binary
 * under `src/bin` that runs a parameter sweep and prints statistics; the
 * library exists so the experiments can be tested and benchmarked.
 *
 * # Collision thresholds
 *
 * [`collision`] places runs of items into a 2<sup>`bits`</sup>-slot table,
 * starting each run at a random position, and counts how many fit before
 * the first collision.  Runs can spread out by addition, xor, or a
 * multiplicative hash of the offset added or xored in.  Single random
 * placements reproduce the
 * [birthday bound](https://en.wikipedia.org/wiki/Birthday_problem) of
 * about √(πN/2); structured runs do much better.  Example output with
 * runs of 1000 on a 2<sup>20</sup> table:
 *
 * ```text
 * Average threshold with random: 1283.67 / 1048576
 * Average threshold with addition: 28653.2 / 1048576
 * Average threshold with xor: 39762.9 / 1048576
 * Average threshold with multaddition: 20369.2 / 1048576
 * Average threshold with multxor: 2810.48 / 1048576
 * ```
 *
 * Xor wins because there's the lowest chance of any overlap, but addition
 * is close.  Multiplicative hash plus addition is within a factor of two.
 *
 * # Unique upper bits
 *
 * [`search`] guesses odd 64-bit multipliers and measures how many inputs
 * `0..2`<sup>`n`</sup> they can hash, keeping only the top bits of the
 * product, before two inputs collide.  There are three families: a
 * single multiplier with some reserve bits, two multipliers whose outputs
 * are concatenated, and two multipliers each taking half of the input.
 * The golden ratio is surprisingly less effective than some other values.
 *
 * # Fixed-point pi
 *
 * [`pi`] estimates π by counting points of a 64-bit fixed-point lattice
 * that fall in the unit quarter circle.  Squares are computed exactly in
 * 128 bits and rounded, which gives about 19 decimal digits where an
 * `f64` has 16.  The points step linearly rather than randomly, which
 * converges faster.  Work is split among independent threads.
 *
 * # Randomness
 *
 * Every experiment takes an optional seed.  Without one, randomness comes
 * from the OS; with one, each random stream is derived from it with
 * SipHash-1-3, so runs can be repeated exactly.
 */

/**
 * Bit tables (internal; exposed for bench)
 */
pub mod bitset;

mod error;
mod seed;

pub mod collision;
pub mod search;
pub mod pi;

pub use error::{Error,Result};
pub use seed::fresh_seed;
pub use collision::{Approach,SweepOptions,ThresholdStats};
pub use search::{Family,SearchOptions,SearchSummary,Candidate};
pub use pi::{Fixed64,PiEstimate,PiOptions};
