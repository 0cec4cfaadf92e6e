/*
 * @file error.rs
 * @author Mike Hamburg
 * @copyright 2020-2022 Rambus Inc.
 *
 * Parameter errors.  The experiments themselves can't fail; only their
 * parameters can be out of range.
 */

use thiserror::Error;

/** Result type for the experiment drivers. */
pub type Result<T> = std::result::Result<T, Error>;

/** Everything that can go wrong setting up an experiment. */
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /** A bit width outside what the experiment supports */
    #[error("{what} = {bits} is out of range {min}..={max}")]
    InvalidBits { what: &'static str, bits: u32, min: u32, max: u32 },

    /** Runs must be nonempty and fit in the table */
    #[error("run length {run_length} must be between 1 and the table size {table_size}")]
    InvalidRunLength { run_length: usize, table_size: usize },

    #[error("unknown approach {0:?}, expected random, addition, xor, multaddition or multxor")]
    UnknownApproach(String),

    #[error("need at least one trial")]
    InvalidTrials,

    #[error("need at least one thread")]
    InvalidThreads,

    /** After splitting among threads, nothing was left to sample */
    #[error("{samples} samples is too few for {threads} threads")]
    TooFewSamples { samples: u64, threads: usize },

    /** The stutter-step estimator consumes samples in pairs */
    #[error("sample count {0} must be even")]
    OddSampleCount(u64),

    #[error("worker thread {0} panicked")]
    WorkerPanicked(usize),
}

/** Check that `bits` is in `min..=max`, naming the parameter on failure. */
pub(crate) fn check_bits(what: &'static str, bits: u32, min: u32, max: u32) -> Result<()> {
    if bits < min || bits > max {
        return Err(Error::InvalidBits { what, bits, min, max });
    }
    Ok(())
}
