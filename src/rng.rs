//! Seeded, hand-rolled PRNG and the 7-bag piece generator built on it.
//!
//! Deliberately not the `rand` crate: determinism across platforms and
//! crate versions is the engine's anchor property (spec §5, §8 invariant
//! 7), and a fixed, in-crate algorithm is the only way to guarantee the
//! same seed produces the same sequence forever.

use arrayvec::ArrayVec;

use crate::types::PieceKind;

/// A 64-bit linear congruential generator. Constants are Knuth's MMIX
/// multiplier/increment; the algorithm itself is unremarkable, the point is
/// that it never changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lcg64 {
    state: u64,
}

const LCG_MULTIPLIER: u64 = 6364136223846793005;
const LCG_INCREMENT: u64 = 1442695040888963407;

impl Lcg64 {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        // Avoid the degenerate all-zero state for a seed of 0.
        Self {
            state: seed ^ 0x9E37_79B9_7F4A_7C15,
        }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(LCG_MULTIPLIER)
            .wrapping_add(LCG_INCREMENT);
        self.state
    }

    /// A value in `0..bound`. `bound` must be non-zero.
    pub fn next_range(&mut self, bound: u32) -> u32 {
        ((self.next_u64() >> 32) as u32) % bound
    }

    /// Fisher-Yates shuffle, in place.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            items.swap(i, j);
        }
    }
}

/// A 7-bag randomizer: every consecutive run of seven draws is a
/// permutation of all seven kinds.
#[derive(Debug, Clone)]
pub struct Bag {
    current: ArrayVec<PieceKind, 7>,
    index: usize,
    rng: Lcg64,
}

impl Bag {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        let mut bag = Self {
            current: ArrayVec::new(),
            index: 0,
            rng: Lcg64::new(seed),
        };
        bag.refill();
        bag
    }

    fn refill(&mut self) {
        let mut kinds: ArrayVec<PieceKind, 7> = PieceKind::ALL.into_iter().collect();
        self.rng.shuffle(&mut kinds);
        self.current = kinds;
        self.index = 0;
    }

    /// The next piece kind. Never fails.
    pub fn next(&mut self) -> PieceKind {
        if self.index >= self.current.len() {
            self.refill();
        }
        let kind = self.current[self.index];
        self.index += 1;
        kind
    }
}

/// Upcoming piece kinds of fixed length, refilled from a `Bag` on every
/// spawn. Backed by a `VecDeque` so steady-state pop-front/push-back never
/// reallocates.
#[derive(Debug, Clone)]
pub struct PreviewQueue {
    upcoming: std::collections::VecDeque<PieceKind>,
    length: usize,
}

impl PreviewQueue {
    #[must_use]
    pub fn new(length: usize, bag: &mut Bag) -> Self {
        let length = length.max(1);
        let mut upcoming = std::collections::VecDeque::with_capacity(length);
        for _ in 0..length {
            upcoming.push_back(bag.next());
        }
        Self { upcoming, length }
    }

    /// Pops the front kind and refills from `bag`, keeping the queue at its
    /// configured length.
    pub fn take(&mut self, bag: &mut Bag) -> PieceKind {
        let kind = self.upcoming.pop_front().expect("preview queue non-empty");
        self.upcoming.push_back(bag.next());
        kind
    }

    /// A read-only view of the upcoming kinds, front first.
    #[must_use]
    pub fn peek(&self) -> impl Iterator<Item = PieceKind> + '_ {
        self.upcoming.iter().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.length
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_seven_draws_is_a_permutation() {
        let mut bag = Bag::new(1);
        for _ in 0..20 {
            let mut seen = HashSet::new();
            for _ in 0..7 {
                seen.insert(bag.next());
            }
            assert_eq!(seen.len(), 7);
        }
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = Bag::new(42);
        let mut b = Bag::new(42);
        for _ in 0..50 {
            assert_eq!(a.next(), b.next());
        }
    }

    #[test]
    fn different_seeds_usually_diverge() {
        let mut a = Bag::new(1);
        let mut b = Bag::new(2);
        let seq_a: Vec<_> = (0..14).map(|_| a.next()).collect();
        let seq_b: Vec<_> = (0..14).map(|_| b.next()).collect();
        assert_ne!(seq_a, seq_b);
    }

    #[test]
    fn lcg_is_deterministic() {
        let mut a = Lcg64::new(7);
        let mut b = Lcg64::new(7);
        for _ in 0..100 {
            assert_eq!(a.next_range(1000), b.next_range(1000));
        }
    }

    #[test]
    fn preview_queue_stays_at_configured_length() {
        let mut bag = Bag::new(5);
        let mut preview = PreviewQueue::new(5, &mut bag);
        assert_eq!(preview.peek().count(), 5);
        for _ in 0..30 {
            preview.take(&mut bag);
            assert_eq!(preview.peek().count(), 5);
        }
    }

    #[test]
    fn preview_queue_minimum_length_is_one() {
        let mut bag = Bag::new(1);
        let preview = PreviewQueue::new(0, &mut bag);
        assert_eq!(preview.len(), 1);
    }
}
