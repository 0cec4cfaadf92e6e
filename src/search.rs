/*
 * @file search.rs
 * @author Mike Hamburg
 * @copyright 2020-2022 Rambus Inc.
 *
 * Search for multiplicative hash constants with unique upper bits.
 *
 * Multiplying the inputs 0..2^n by an odd constant and keeping the top
 * bits of the product gives a cheap hash.  Some constants keep those top
 * bits collision-free for much larger n than others; this module guesses
 * constants at random and measures how far each one gets.
 */

use crate::bitset::BitSet;
use crate::error::{check_bits,Result};
use crate::seed::{choose_rng,WhyHashing};
use core::ops::RangeInclusive;
use log::{debug,info};
use rand::Rng;

/** Which kind of hash the multipliers are being tested for. */
#[derive(Copy,Clone,PartialEq,Eq,Debug)]
pub enum Family {
    /**
     * One multiplier.  The inputs 0..2^n must map to distinct values of
     * the top n+reserve_bits bits of the product.
     */
    Single { reserve_bits: u32 },

    /**
     * Two multipliers applied to the same 2n-bit input.  The top n+1 bits
     * of both products, concatenated, must be unique, and so must the top
     * 2n+2 bits of each product on its own.
     */
    DualOutput,

    /**
     * Two multipliers, one for each n-bit half of a 2n-bit input.  The
     * top 2n+2 bits of the sum of the two products must be unique, and
     * so must the top 2n+2 bits of each multiplier applied to the whole
     * input.
     */
    DualInput,
}

/** Scratch tables, reused from width to width and candidate to candidate. */
pub struct Tables {
    seen: [BitSet; 3]
}

impl Tables {
    pub fn new() -> Self {
        Tables { seen: [BitSet::with_capacity(0), BitSet::with_capacity(0), BitSet::with_capacity(0)] }
    }
}

impl Default for Tables {
    fn default() -> Self { Self::new() }
}

/**
 * Do the inputs 0..2^nbits get unique values of the top
 * `nbits + reserve_bits` bits of `i * factor`?
 */
pub fn single_is_unique(factor: u64, nbits: u32, reserve_bits: u32, seen: &mut BitSet) -> bool {
    let max = 1usize << nbits;
    let shift = 64 - nbits - reserve_bits;
    seen.reset(max << reserve_bits);
    for i in 0..max {
        let alt = ((i as u64).wrapping_mul(factor) >> shift) as usize;
        if seen.test_and_insert(alt) {
            return false;
        }
    }
    true
}

/** Unique upper bits test for [`Family::DualOutput`] at width `bits`. */
pub fn dual_output_is_unique(factor_a: u64, factor_b: u64, bits: u32, tables: &mut Tables) -> bool {
    let max = 1u64 << (2*bits);
    let [both, a_only, b_only] = &mut tables.seen;
    both.reset((max << 2) as usize);
    a_only.reset((max << 2) as usize);
    b_only.reset((max << 2) as usize);

    /* top bits+1 of each product for the combined table, top 2*bits+2 for the others */
    let half_shift = 63 - bits;
    let full_shift = 62 - 2*bits;
    for i in 0..max {
        let a = i.wrapping_mul(factor_a);
        let b = i.wrapping_mul(factor_b);

        let v = ((a >> half_shift) << (bits + 1)) | (b >> half_shift);
        if both.test_and_insert(v as usize) { return false; }
        if a_only.test_and_insert((a >> full_shift) as usize) { return false; }
        if b_only.test_and_insert((b >> full_shift) as usize) { return false; }
    }
    true
}

/** Unique upper bits test for [`Family::DualInput`] at width `bits`. */
pub fn dual_input_is_unique(factor_a: u64, factor_b: u64, bits: u32, tables: &mut Tables) -> bool {
    let max = 1u64 << (2*bits);
    let half_mask = (1u64 << bits) - 1;
    let shift = 62 - 2*bits;
    let [both, a_only, b_only] = &mut tables.seen;
    both.reset((max << 2) as usize);
    a_only.reset((max << 2) as usize);
    b_only.reset((max << 2) as usize);

    for i in 0..max {
        let a = i.wrapping_mul(factor_a);
        let b = i.wrapping_mul(factor_b);
        if a_only.test_and_insert((a >> shift) as usize) { return false; }
        if b_only.test_and_insert((b >> shift) as usize) { return false; }

        let lo = (i & half_mask).wrapping_mul(factor_a);
        let hi = (i >> bits).wrapping_mul(factor_b);
        if both.test_and_insert((lo.wrapping_add(hi) >> shift) as usize) { return false; }
    }
    true
}

/** A set of multipliers, and how far they got. */
#[derive(Copy,Clone,PartialEq,Eq,Debug)]
pub struct Candidate {
    pub factors: [u64; 2],
    /** Largest collision-free width, or None if the first width tried failed */
    pub unique_bits: Option<u32>,
}

impl Family {
    /** How many multipliers this family uses */
    pub fn nfactors(self) -> usize {
        match self {
            Family::Single { .. } => 1,
            Family::DualOutput | Family::DualInput => 2,
        }
    }

    /** Test one width.  Only `factors[0]` is used for [`Family::Single`]. */
    pub fn is_unique(self, factors: [u64; 2], bits: u32, tables: &mut Tables) -> bool {
        match self {
            Family::Single { reserve_bits } =>
                single_is_unique(factors[0], bits, reserve_bits, &mut tables.seen[0]),
            Family::DualOutput => dual_output_is_unique(factors[0], factors[1], bits, tables),
            Family::DualInput  => dual_input_is_unique(factors[0], factors[1], bits, tables),
        }
    }

    /** Check that every width in `widths` is one the tests can handle. */
    pub fn validate(self, widths: &RangeInclusive<u32>) -> Result<()> {
        match self {
            Family::Single { reserve_bits } => {
                check_bits("reserve_bits", reserve_bits, 0, SearchOptions::MAX_RESERVE_BITS)?;
                check_bits("max_width", *widths.end(), 1, SearchOptions::MAX_TABLE_BITS - reserve_bits)?;
            },
            Family::DualOutput | Family::DualInput => {
                check_bits("max_width", *widths.end(), 1, SearchOptions::MAX_DUAL_BITS)?;
            }
        }
        check_bits("min_width", *widths.start(), 1, *widths.end())
    }

    /**
     * Test widths in increasing order, and return the largest
     * one that passed before the first failure.
     */
    pub fn max_unique_bits(self, factors: [u64; 2], widths: RangeInclusive<u32>, tables: &mut Tables) -> Option<u32> {
        let mut best = None;
        for bits in widths {
            if !self.is_unique(factors, bits, tables) { break; }
            best = Some(bits);
        }
        best
    }

    /** Draw a random candidate: odd multipliers */
    fn draw_factors<R:Rng>(self, rng: &mut R) -> [u64; 2] {
        let mut factors = [0u64; 2];
        for f in factors.iter_mut().take(self.nfactors()) {
            *f = rng.gen::<u64>() | 1;
        }
        factors
    }

    /** Line printed for a candidate that got to `bits`. */
    fn found_line(self, factors: [u64; 2], bits: u32) -> String {
        match self {
            Family::Single { reserve_bits } =>
                format!("Found for {} bits + {} reserve: {:#x}", bits, reserve_bits, factors[0]),
            Family::DualOutput | Family::DualInput =>
                format!("Found for {} bits: {:#x}, {:#x}", bits, factors[0], factors[1]),
        }
    }

    /** Line printed for a candidate that got to the winning width. */
    fn winner_line(self, factors: [u64; 2], bits: u32) -> String {
        match self {
            Family::Single { .. } => "WINNER!!!!".to_string(),
            Family::DualOutput | Family::DualInput =>
                format!("WINNER @ {} bits!!!!!!!!!!!!! {:#x}, {:#x}", bits, factors[0], factors[1]),
        }
    }
}

/**
 * Options for a multiplier search.
 *
 * There's no single `Default`, because the classic settings differ by
 * family; use [`SearchOptions::for_family`].
 */
#[derive(Clone,PartialEq,Eq,Debug)]
pub struct SearchOptions {
    /** Widths to test, in increasing order */
    pub widths: RangeInclusive<u32>,

    /** Print every width at or above this one that a candidate passes */
    pub report_bits: u32,

    /** Celebrate candidates that pass this width */
    pub winner_bits: u32,

    /**
     * Stop after this many candidates.
     * Default: `None`, meaning search until killed.
     */
    pub max_candidates: Option<u64>,

    /**
     * Optional seed to make the search repeatable.
     * Default: `None`, meaning fresh randomness.
     */
    pub seed: Option<u64>,
}

impl SearchOptions {
    /** Largest single-family table, as log2 of its size in bits */
    pub const MAX_TABLE_BITS : u32 = 40;
    pub const MAX_RESERVE_BITS : u32 = 8;
    /** Dual-family tables hold 2^(2*bits+2) bits */
    pub const MAX_DUAL_BITS : u32 = 17;

    /** The classic settings for each family */
    pub fn for_family(family: Family) -> Self {
        let (widths, report_bits, winner_bits) = match family {
            Family::Single { .. } => (1..=31, 20, 32),
            Family::DualOutput    => (1..=17, 14, 16),
            Family::DualInput     => (14..=17, 15, 17),
        };
        SearchOptions { widths, report_bits, winner_bits, max_candidates: None, seed: None }
    }
}

/** What a finite search found. */
#[derive(Clone,PartialEq,Eq,Debug,Default)]
pub struct SearchSummary {
    pub candidates: u64,
    /** The candidate that got furthest; earliest wins ties */
    pub best: Option<Candidate>,
}

/**
 * Measure one candidate, testing widths in increasing order.  Each report
 * line goes to `report` as soon as its width passes, before any wider
 * test starts, since a search may be killed partway through a slow width.
 */
pub fn evaluate<F:FnMut(&str)>(
    family: Family,
    factors: [u64; 2],
    options: &SearchOptions,
    tables: &mut Tables,
    mut report: F
) -> Candidate {
    let mut unique_bits = None;
    for bits in options.widths.clone() {
        if !family.is_unique(factors, bits, tables) { break; }
        unique_bits = Some(bits);
        if bits >= options.report_bits {
            report(&family.found_line(factors, bits));
            if bits >= options.winner_bits {
                report(&family.winner_line(factors, bits));
            }
        }
    }
    Candidate { factors, unique_bits }
}

/**
 * Guess multipliers at random and test them.  Runs forever unless
 * `options.max_candidates` is set.
 */
pub fn search(family: Family, options: &SearchOptions) -> Result<SearchSummary> {
    family.validate(&options.widths)?;
    info!("searching {:?} multipliers, widths {:?}, reporting from {} bits",
        family, options.widths, options.report_bits);

    let mut rng = choose_rng(options.seed, WhyHashing::MultiplierCandidates, family.nfactors() as u64);
    let mut tables = Tables::new();
    let mut summary = SearchSummary::default();

    while options.max_candidates.map_or(true, |max| summary.candidates < max) {
        let factors = family.draw_factors(&mut rng);
        let candidate = evaluate(family, factors, options, &mut tables, |line| eprintln!("{}", line));
        debug!("{:#x}, {:#x}: {:?}", factors[0], factors[1], candidate.unique_bits);

        summary.candidates += 1;
        let better = match summary.best {
            None => true,
            Some(best) => candidate.unique_bits > best.unique_bits
        };
        if better { summary.best = Some(candidate); }
    }
    Ok(summary)
}
