/*
 * @file collision.rs
 * @author Mike Hamburg
 * @copyright 2020-2022 Rambus Inc.
 *
 * Collision thresholds for sparse-fill schemes.  Items are placed into a
 * 2^bits table in runs starting at a random position; how many fit before
 * the first collision depends on how each run spreads out from its start.
 */

use crate::bitset::BitSet;
use crate::error::{check_bits,Error,Result};
use crate::seed::{choose_rng,WhyHashing};
use core::fmt;
use core::str::FromStr;
use log::{debug,info};
use rand::RngCore;

/** Multiplier used to scatter offsets within a run. */
pub const MULT_OFFSET_FACTOR : u64 = 0xf01f39c13d6a7d81;

/** How the positions in a run are derived from its start. */
#[derive(Copy,Clone,PartialEq,Eq,Debug,Hash)]
pub enum Approach {
    /** Runs of a single item at a uniformly random position */
    Random,
    /** start + i */
    Addition,
    /** start ^ i */
    Xor,
    /** start + upper bits of i * MULT_OFFSET_FACTOR */
    MultAddition,
    /** start ^ upper bits of i * MULT_OFFSET_FACTOR */
    MultXor,
}

impl Approach {
    /** All approaches, in reporting order. */
    pub const ALL : [Approach; 5] = [
        Approach::Random,
        Approach::Addition,
        Approach::Xor,
        Approach::MultAddition,
        Approach::MultXor
    ];

    pub fn name(self) -> &'static str {
        match self {
            Approach::Random       => "random",
            Approach::Addition     => "addition",
            Approach::Xor          => "xor",
            Approach::MultAddition => "multaddition",
            Approach::MultXor      => "multxor",
        }
    }

    /** Position of the `i`th item of a run beginning at `start`. */
    #[inline(always)]
    fn position(self, start:usize, i:usize, bits:u32) -> usize {
        let mask = (1usize << bits) - 1;
        let mult_offset = ((i as u64).wrapping_mul(MULT_OFFSET_FACTOR) >> (64 - bits)) as usize;
        match self {
            Approach::Addition     => start.wrapping_add(i) & mask,
            Approach::MultAddition => start.wrapping_add(mult_offset) & mask,
            Approach::MultXor      => start ^ mult_offset,
            Approach::Random | Approach::Xor => start ^ i,
        }
    }
}

impl FromStr for Approach {
    type Err = Error;
    fn from_str(name: &str) -> Result<Self> {
        Approach::ALL.iter().copied().find(|a| a.name() == name)
            .ok_or_else(|| Error::UnknownApproach(name.to_string()))
    }
}

impl fmt::Display for Approach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/**
 * Options for a collision sweep.
 *
 * Implements `Default`, which reproduces the classic experiment:
 * 100000 trials of each approach on a 2^20 table with runs of 1000.
 */
#[derive(Clone,PartialEq,Eq,Debug)]
pub struct SweepOptions {
    /** Trials per approach.  Default: 100000. */
    pub trials: u64,

    /** Log2 of the table size.  Default: 20. */
    pub bits: u32,

    /**
     * Items per run for every approach except [`Approach::Random`],
     * which always places one item per run.  Default: 1000.
     */
    pub run_length: usize,

    /**
     * Optional seed to make the sweep repeatable.  Each approach gets
     * its own stream derived from the seed.  Default: `None`.
     */
    pub seed: Option<u64>,

    /** Which approaches to run.  Default: [`Approach::ALL`]. */
    pub approaches: Vec<Approach>,
}

impl Default for SweepOptions {
    fn default() -> Self {
        SweepOptions {
            trials: 100000,
            bits: 20,
            run_length: 1000,
            seed: None,
            approaches: Approach::ALL.to_vec()
        }
    }
}

impl SweepOptions {
    /** Largest table we'll allocate, as log2 of its size */
    pub const MAX_BITS : u32 = 32;

    pub fn table_size(&self) -> usize { 1usize << self.bits }

    pub fn validate(&self) -> Result<()> {
        check_bits("bits", self.bits, 1, Self::MAX_BITS)?;
        if self.trials == 0 { return Err(Error::InvalidTrials); }
        if self.run_length == 0 || self.run_length > self.table_size() {
            return Err(Error::InvalidRunLength {
                run_length: self.run_length,
                table_size: self.table_size()
            });
        }
        Ok(())
    }
}

/** Accumulated thresholds for one approach. */
#[derive(Clone,PartialEq,Eq,Debug)]
pub struct ThresholdStats {
    pub approach: Approach,
    pub table_size: usize,
    pub trials: u64,
    /** Items placed before a collision, summed over all trials */
    pub total: u64,
    pub min: u64,
    pub max: u64,
}

impl ThresholdStats {
    fn new(approach: Approach, table_size: usize) -> Self {
        ThresholdStats { approach, table_size, trials: 0, total: 0, min: u64::MAX, max: 0 }
    }

    fn record(&mut self, threshold: u64) {
        self.trials += 1;
        self.total += threshold;
        self.min = self.min.min(threshold);
        self.max = self.max.max(threshold);
    }

    /** Average collision threshold */
    pub fn average(&self) -> f64 {
        if self.trials == 0 { return 0.0; }
        self.total as f64 / self.trials as f64
    }
}

impl fmt::Display for ThresholdStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Average threshold with {}: {} / {}",
            self.approach, self.average(), self.table_size)
    }
}

/**
 * One trial: clear the table, then place runs until something collides.
 * Returns the number of items placed before the collision.
 *
 * Fails if `bits` is outside `1..=SweepOptions::MAX_BITS` or `run_length`
 * is zero or larger than the table.
 */
pub fn run_trial<R:RngCore>(
    approach: Approach,
    bits: u32,
    run_length: usize,
    rng: &mut R,
    table: &mut BitSet
) -> Result<u64> {
    check_bits("bits", bits, 1, SweepOptions::MAX_BITS)?;
    let size = 1usize << bits;
    if run_length == 0 || run_length > size {
        return Err(Error::InvalidRunLength { run_length, table_size: size });
    }
    let mask = size - 1;
    let count = if approach == Approach::Random { 1 } else { run_length };
    table.reset(size);

    let mut placed = 0;
    loop {
        let start = rng.next_u64() as usize & mask;
        for i in 0..count {
            if table.test_and_insert(approach.position(start, i, bits)) {
                return Ok(placed);
            }
            placed += 1;
        }
    }
}

/** Run `options.trials` trials of a single approach. */
pub fn measure(approach: Approach, options: &SweepOptions) -> Result<ThresholdStats> {
    options.validate()?;
    let index = Approach::ALL.iter().position(|&a| a == approach).unwrap_or(0);
    let mut rng = choose_rng(options.seed, WhyHashing::CollisionTrials, index as u64);
    let mut table = BitSet::with_capacity(options.table_size());
    let mut stats = ThresholdStats::new(approach, options.table_size());

    for trial in 0..options.trials {
        let threshold = run_trial(approach, options.bits, options.run_length, &mut rng, &mut table)?;
        log::trace!("{} trial {}: threshold {}", approach, trial, threshold);
        stats.record(threshold);
    }
    debug!("{}: min {} max {} over {} trials", approach, stats.min, stats.max, stats.trials);
    Ok(stats)
}

/**
 * Run the whole sweep, printing each approach's average to stderr as
 * soon as it's done.
 */
pub fn sweep(options: &SweepOptions) -> Result<Vec<ThresholdStats>> {
    options.validate()?;
    info!("collision sweep: {} trials, table 2^{}, runs of {}",
        options.trials, options.bits, options.run_length);

    let mut ret = Vec::with_capacity(options.approaches.len());
    for &approach in &options.approaches {
        let stats = measure(approach, options)?;
        eprintln!("{}", stats);
        ret.push(stats);
    }
    Ok(ret)
}

#[cfg(test)]
mod tests {
    use crate::bitset::BitSet;
    use crate::collision::{measure,run_trial,sweep,Approach,SweepOptions};
    use crate::error::Error;
    use rand::{SeedableRng,thread_rng};
    use rand::rngs::StdRng;

    /* Birthday bound: about sqrt(pi N / 2) items before the first collision */
    #[test]
    fn test_random_matches_birthday() {
        let options = SweepOptions { trials: 4000, bits: 12, ..SweepOptions::default() };
        let stats = measure(Approach::Random, &options).unwrap();
        let n = options.table_size() as f64;
        let expected = (std::f64::consts::PI * n / 2.).sqrt();
        // println!("{} vs {}", stats.average(), expected);
        assert!((stats.average() - expected).abs() < 0.08 * expected);
        assert!(stats.min <= stats.max);
        assert_eq!(stats.trials, 4000);
    }

    /* A run covering the whole table fills it exactly */
    #[test]
    fn test_full_runs_fill_table() {
        let mut rng = thread_rng();
        let mut table = BitSet::with_capacity(0);
        for bits in [1,4,10] {
            let size = 1usize << bits;
            for approach in [Approach::Addition, Approach::Xor] {
                let threshold = run_trial(approach, bits, size, &mut rng, &mut table).unwrap();
                assert_eq!(threshold, size as u64);
                assert_eq!(table.len(), size);
            }
        }
    }

    /* Runs of one item are just random placement */
    #[test]
    fn test_single_item_runs() {
        let mut table = BitSet::with_capacity(0);
        for approach in Approach::ALL {
            let mut rng1 = StdRng::seed_from_u64(99);
            let mut rng2 = StdRng::seed_from_u64(99);
            let a = run_trial(approach, 16, 1, &mut rng1, &mut table).unwrap();
            let b = run_trial(Approach::Random, 16, 1000, &mut rng2, &mut table).unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_parse_approach() {
        for approach in Approach::ALL {
            assert_eq!(approach.name().parse::<Approach>(), Ok(approach));
        }
        assert_eq!("multxor".parse::<Approach>(), Ok(Approach::MultXor));
        assert_eq!("mult".parse::<Approach>(), Err(Error::UnknownApproach("mult".to_string())));
    }

    #[test]
    fn test_positions_in_range() {
        let bits = 10;
        for approach in Approach::ALL {
            for start in [0usize, 1, 511, 1023] {
                for i in 0..1024 {
                    assert!(approach.position(start, i, bits) < 1024);
                }
            }
        }
    }

    #[test]
    fn test_structured_beats_random() {
        let options = SweepOptions { trials: 200, bits: 14, run_length: 50, seed: Some(1), ..SweepOptions::default() };
        let random = measure(Approach::Random, &options).unwrap();
        let xor = measure(Approach::Xor, &options).unwrap();
        let addition = measure(Approach::Addition, &options).unwrap();
        assert!(xor.average() > random.average());
        assert!(addition.average() > random.average());
    }

    #[test]
    fn test_seeded_sweep_repeats() {
        let options = SweepOptions { trials: 50, bits: 10, run_length: 20, seed: Some(1234), ..SweepOptions::default() };
        let a = sweep(&options).unwrap();
        let b = sweep(&options).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 5);
        let names : Vec<_> = a.iter().map(|s| s.approach.name()).collect();
        assert_eq!(names, ["random", "addition", "xor", "multaddition", "multxor"]);
        assert_eq!(a[0].to_string(), format!("Average threshold with random: {} / 1024", a[0].average()));
    }

    #[test]
    fn test_validation() {
        let bad_bits = SweepOptions { bits: 0, ..SweepOptions::default() };
        assert!(matches!(sweep(&bad_bits), Err(Error::InvalidBits { .. })));
        let bad_bits = SweepOptions { bits: 33, ..SweepOptions::default() };
        assert!(matches!(sweep(&bad_bits), Err(Error::InvalidBits { .. })));
        let no_trials = SweepOptions { trials: 0, ..SweepOptions::default() };
        assert_eq!(sweep(&no_trials), Err(Error::InvalidTrials));
        let long_runs = SweepOptions { bits: 4, run_length: 17, ..SweepOptions::default() };
        assert_eq!(sweep(&long_runs), Err(Error::InvalidRunLength { run_length: 17, table_size: 16 }));
        let empty_runs = SweepOptions { run_length: 0, ..SweepOptions::default() };
        assert!(measure(Approach::Xor, &empty_runs).is_err());
    }

    /* Single trials check their own parameters, so a zero width can't shift by 64 */
    #[test]
    fn test_trial_validation() {
        let mut rng = thread_rng();
        let mut table = BitSet::with_capacity(0);
        for approach in Approach::ALL {
            assert_eq!(run_trial(approach, 0, 1, &mut rng, &mut table),
                Err(Error::InvalidBits { what: "bits", bits: 0, min: 1, max: 32 }));
            assert!(matches!(run_trial(approach, 33, 1, &mut rng, &mut table),
                Err(Error::InvalidBits { bits: 33, .. })));
            assert_eq!(run_trial(approach, 4, 0, &mut rng, &mut table),
                Err(Error::InvalidRunLength { run_length: 0, table_size: 16 }));
            assert_eq!(run_trial(approach, 4, 17, &mut rng, &mut table),
                Err(Error::InvalidRunLength { run_length: 17, table_size: 16 }));
        }
        let threshold = run_trial(Approach::MultXor, 1, 1, &mut rng, &mut table).unwrap();
        assert!(threshold >= 1 && threshold <= 2);
    }
}
