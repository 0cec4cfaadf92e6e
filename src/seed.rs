/*
 * @file seed.rs
 * @author Mike Hamburg
 * @copyright 2020-2022 Rambus Inc.
 *
 * Choosing random sources for the experiments.  Either fresh from the OS,
 * or derived from a user-supplied seed so that a run can be repeated.
 */

use core::hash::{Hash,Hasher};
use rand::{RngCore,SeedableRng};
use rand::rngs::{OsRng,StdRng};
use siphasher::sip128::{Hasher128, SipHasher13};

type SeedHasher = SipHasher13;

/** A key for the SipHash13 hash function. */
pub type HasherKey = [u8; 16];

/** Domain separator for the hash */
#[derive(Hash,Clone,Copy,Debug)]
pub enum WhyHashing {
    CollisionTrials,
    MultiplierCandidates,
}

/** Expand a user seed into a SipHash key. */
fn seed_to_key(seed: u64) -> HasherKey {
    let mut key = [0u8; 16];
    key[0..8] .copy_from_slice(&seed.to_le_bytes());
    key[8..16].copy_from_slice(&(!seed).to_le_bytes());
    key
}

/** A seed for when the user didn't supply one. */
pub fn fresh_seed() -> u64 {
    OsRng.next_u64()
}

/**
 * Utility: either generate a fresh random source, or derive one from an
 * existing seed, a domain and a stream index.
 */
pub fn choose_rng(base_seed: Option<u64>, why: WhyHashing, n: u64) -> StdRng {
    match base_seed {
        None => StdRng::seed_from_u64(fresh_seed()),
        Some(seed) => {
            let mut hasher = SeedHasher::new_with_key(&seed_to_key(seed));
            why.hash(&mut hasher);
            n.hash(&mut hasher);
            let hash = hasher.finish128();

            let mut ret = [0u8; 32];
            ret[0..8]  .copy_from_slice(&hash.h1.to_le_bytes());
            ret[8..16] .copy_from_slice(&hash.h2.to_le_bytes());
            ret[16..24].copy_from_slice(&hasher.finish().to_le_bytes());
            ret[24..32].copy_from_slice(&n.to_le_bytes());
            StdRng::from_seed(ret)
        }
    }
}
