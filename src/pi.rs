/*
 * @file pi.rs
 * @author Mike Hamburg
 * @copyright 2020-2022 Rambus Inc.
 *
 * Monte Carlo estimate of pi in 64-bit fixed point.
 */

use crate::error::{Error,Result};
use log::{debug,info};
use std::thread;

/**
 * Logically, a fixed-point value >= 0 and < 1: the scalar implicitly
 * divided by 2^64.  That's close to 64 bits of precision, where an f64
 * only has 53.
 */
pub type Fixed64 = u64;

/* Random 64-bit primes with decent distribution properties */
const PRIME1 : u64 = 0x876f170be4f1fcb9;
const PRIME2 : u64 = 0xf0433a4aecda4c5f;

/** Square a fixed-point value, rounding to nearest (half up). */
#[inline(always)]
pub fn square(v:Fixed64) -> Fixed64 {
    let square = (v as u128) * (v as u128);
    ((square >> 64) as u64) + (((square as u64) >> 63) & 1)
}

/**
 * Count how many of `samples` points (a,b) fall in the unit quarter
 * circle, i.e. a^2 + b^2 < 1.
 *
 * The points aren't random: a and b start at multiples of the seed and
 * step by fixed primes.  Each square is used twice by advancing a and b
 * alternately:
 *   (a0,b0) (a1,b0) (a1,b1) (a2,b1) ...
 * so `samples` must be even.
 */
pub fn in_count(samples:u64, seed:u64) -> Result<u64> {
    if samples % 2 != 0 { return Err(Error::OddSampleCount(samples)); }

    /* Order of primes swapped vs. the steps */
    let mut a : Fixed64 = seed.wrapping_mul(PRIME2);
    let mut b : Fixed64 = seed.wrapping_mul(PRIME1);

    let mut count = 0u64;
    let mut a2 = square(a);
    for _ in 0..samples/2 {
        let b2 = square(b);
        count += (a2 < u64::MAX - b2) as u64;

        a = a.wrapping_add(PRIME1);
        b = b.wrapping_add(PRIME2);

        a2 = square(a);
        count += (a2 < u64::MAX - b2) as u64;
    }
    Ok(count)
}

/** Points counted inside the quarter circle, out of how many. */
#[derive(Copy,Clone,PartialEq,Eq,Debug)]
pub struct PiEstimate {
    pub in_count: u64,
    pub samples: u64,
}

impl PiEstimate {
    /** 4 * in_count / samples */
    pub fn approx_pi(&self) -> f64 {
        (self.in_count as f64 / self.samples as f64) * 4.0
    }

    /** The estimate, formatted to 16 significant digits with trailing zeros dropped */
    pub fn report(&self) -> String {
        format!("in_count: {} / {}\napprox_pi: {}", self.in_count, self.samples,
            significant(self.approx_pi(), 16))
    }
}

/**
 * Format `x` to `digits` significant digits the way printf's `%g` does:
 * fixed notation unless the exponent is below -4 or at least `digits`,
 * then strip trailing zeros and any trailing decimal point.
 */
fn significant(x:f64, digits:usize) -> String {
    let digits = digits.max(1);
    if !x.is_finite() { return x.to_string(); }

    /* Round first, so that e.g. 9.99...9 bumps the exponent */
    let sci = format!("{:.*e}", digits - 1, x);
    let (mantissa, exponent) = sci.split_once('e').unwrap_or((&sci, "0"));
    let exponent : i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= digits as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_zeros(mantissa), sign, exponent.abs())
    } else {
        let decimals = (digits as i32 - 1 - exponent) as usize;
        trim_zeros(&format!("{:.*}", decimals, x)).to_string()
    }
}

fn trim_zeros(s:&str) -> &str {
    if s.contains('.') { s.trim_end_matches('0').trim_end_matches('.') } else { s }
}

/**
 * Options for the estimator.
 *
 * Implements `Default`: 10000 samples on one thread with a fresh seed.
 */
#[derive(Copy,Clone,PartialEq,Eq,Debug)]
pub struct PiOptions {
    /** Total samples; rounded down to an even multiple of `threads` */
    pub samples: u64,
    pub threads: usize,
    /** Thread `t` uses `seed + t`.  Default: `None`, fresh from the OS */
    pub seed: Option<u64>,
}

impl Default for PiOptions {
    fn default() -> Self {
        PiOptions { samples: 10000, threads: 1, seed: None }
    }
}

/**
 * Estimate pi with `threads` independent workers.  Each worker counts
 * its own share of the samples; the counts are summed after joining.
 */
pub fn estimate(samples:u64, threads:usize, seed:u64) -> Result<PiEstimate> {
    if threads == 0 { return Err(Error::InvalidThreads); }
    let per_thread = samples / threads as u64 / 2 * 2;
    if per_thread == 0 {
        return Err(Error::TooFewSamples { samples, threads });
    }
    info!("estimating pi: {} samples on {} threads, seed {}", per_thread * threads as u64, threads, seed);

    let counts = thread::scope(|scope| {
        let workers : Vec<_> = (0..threads).map(|t| {
            scope.spawn(move || in_count(per_thread, seed.wrapping_add(t as u64)))
        }).collect();
        workers.into_iter().enumerate().map(|(t,worker)| {
            worker.join().map_err(|_| Error::WorkerPanicked(t))?
        }).collect::<Result<Vec<u64>>>()
    })?;
    debug!("per-thread counts: {:?}", counts);

    Ok(PiEstimate {
        in_count: counts.iter().sum(),
        samples: per_thread * threads as u64
    })
}

/** [`estimate`] with options, choosing a seed if there isn't one. */
pub fn estimate_with(options: &PiOptions) -> Result<PiEstimate> {
    let seed = options.seed.unwrap_or_else(crate::seed::fresh_seed);
    estimate(options.samples, options.threads, seed)
}

#[cfg(test)]
mod tests {
    use crate::error::Error;
    use crate::pi::{estimate,estimate_with,in_count,significant,square,PiEstimate,PiOptions};
    use rand::{thread_rng,Rng};

    #[test]
    fn test_square() {
        assert_eq!(square(0), 0);
        assert_eq!(square(1<<32), 1);
        assert_eq!(square(1<<63), 1<<62);
        /* (2^64-1)^2 = 2^128 - 2^65 + 1 */
        assert_eq!(square(u64::MAX), u64::MAX - 1);
        /* just above and just below sqrt(2^63), i.e. one half in the last place */
        assert_eq!(square(3037000500), 1);
        assert_eq!(square(3037000499), 0);

        for _ in 0..1000 {
            let v = thread_rng().gen::<u64>();
            let exact = (v as f64 / 2f64.powi(64)).powi(2);
            let got = square(v) as f64 / 2f64.powi(64);
            assert!((exact - got).abs() < 1e-15);
            assert!(square(v) <= v);
        }
    }

    #[test]
    fn test_in_count() {
        /* (0,0) is inside, and so is (P1,0) */
        assert_eq!(in_count(2, 0), Ok(2));
        assert_eq!(in_count(0, 5), Ok(0));
        assert_eq!(in_count(3, 5), Err(Error::OddSampleCount(3)));
        let n = in_count(1000, 17).unwrap();
        assert!(n <= 1000);
        assert_eq!(in_count(1000, 17), Ok(n));
    }

    #[test]
    fn test_estimate_converges() {
        let est = estimate(1_000_000, 4, 12345).unwrap();
        assert_eq!(est.samples, 1_000_000);
        assert!((est.approx_pi() - std::f64::consts::PI).abs() < 0.01);
    }

    /* Splitting among threads doesn't change what's counted */
    #[test]
    fn test_thread_split() {
        let seed = thread_rng().gen::<u64>();
        let est = estimate(10_001, 3, seed).unwrap();
        assert_eq!(est.samples, 3 * 3332);
        let mut expected = 0;
        for t in 0..3 {
            expected += in_count(3332, seed.wrapping_add(t)).unwrap();
        }
        assert_eq!(est.in_count, expected);
        assert_eq!(estimate(10_001, 3, seed), Ok(est));
    }

    #[test]
    fn test_errors() {
        assert_eq!(estimate(100, 0, 1), Err(Error::InvalidThreads));
        assert_eq!(estimate(3, 2, 1), Err(Error::TooFewSamples { samples: 3, threads: 2 }));
        let options = PiOptions { threads: 0, ..PiOptions::default() };
        assert!(estimate_with(&options).is_err());
        let est = estimate_with(&PiOptions::default()).unwrap();
        assert_eq!(est.samples, 10000);
    }

    /* Same output as printf("%.16g") */
    #[test]
    fn test_report() {
        let est = PiEstimate { in_count: 7854, samples: 10000 };
        assert_eq!(est.report(), "in_count: 7854 / 10000\napprox_pi: 3.1416");
        let est = PiEstimate { in_count: 0, samples: 10 };
        assert_eq!(est.report(), "in_count: 0 / 10\napprox_pi: 0");
        let est = PiEstimate { in_count: 2, samples: 2 };
        assert_eq!(est.report(), "in_count: 2 / 2\napprox_pi: 4");
        let est = PiEstimate { in_count: 7853981, samples: 10000000 };
        assert_eq!(est.report(), "in_count: 7853981 / 10000000\napprox_pi: 3.1415924");
    }

    #[test]
    fn test_significant() {
        assert_eq!(significant(1.0/3.0, 16), "0.3333333333333333");
        assert_eq!(significant(2.0/3.0, 4), "0.6667");
        assert_eq!(significant(9.99999, 3), "10");
        assert_eq!(significant(0.5, 16), "0.5");
        assert_eq!(significant(4e-6, 16), "4e-06");
        assert_eq!(significant(1.25e-5, 16), "1.25e-05");
        assert_eq!(significant(123456.0, 3), "1.23e+05");
        assert_eq!(significant(0.0001, 16), "0.0001");
    }
}
