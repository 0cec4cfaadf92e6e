/*
 * @file bitset.rs
 * @author Mike Hamburg
 * @copyright 2020-2022 Rambus Inc.
 *
 * Flat bit tables for the collision experiments.  Every experiment
 * resets one of these and then does little but test-and-set bits in it,
 * so it's just a Vec<u64>.
 */

/** A fixed-size table of bits, all initially clear. */
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct BitSet {
    set: Vec<u64>,
    capacity: usize
}

impl BitSet {
    /** Initialize an empty set */
    pub fn with_capacity(capacity:usize) -> Self {
        BitSet { set : vec![0; (capacity+63)/64], capacity }
    }

    /** Number of bits in the table */
    pub fn capacity(&self) -> usize { self.capacity }

    /**
     * Clear every bit and resize the table to `capacity` bits.
     * Keeps the allocation when the size doesn't grow.
     */
    pub fn reset(&mut self, capacity:usize) {
        self.set.clear();
        self.set.resize((capacity+63)/64, 0);
        self.capacity = capacity;
    }

    /** Set a bit in the set */
    #[inline(always)]
    pub fn insert(&mut self, x:usize) {
        debug_assert!(x < self.capacity);
        self.set[x/64] |= 1<<(x%64);
    }

    /** Check a bit in the set */
    #[inline(always)]
    pub fn contains(&self, x:usize) -> bool {
        x/64 < self.set.len() && (self.set[x/64] & 1<<(x%64)) != 0
    }

    /**
     * Set a bit, and return whether it was already set.
     * This is the inner loop of every experiment.
     */
    #[inline(always)]
    pub fn test_and_insert(&mut self, x:usize) -> bool {
        debug_assert!(x < self.capacity);
        let word = &mut self.set[x/64];
        let mask = 1u64<<(x%64);
        let was_set = (*word & mask) != 0;
        *word |= mask;
        was_set
    }

    /** Count the bits in the set */
    pub fn len(&self) -> usize {
        let mut ret = 0;
        for x in &self.set { ret += x.count_ones() as usize };
        ret
    }

    /** Is every bit clear? */
    pub fn is_empty(&self) -> bool {
        self.set.iter().all(|&x| x == 0)
    }
}
