//! Random source abstraction and Fisher–Yates shuffling.

use rand::Rng;

/// A uniform random index generator.
///
/// Every [`rand::Rng`] is one. Tests plug in scripted sources to pin the
/// exact permutation a deal or room code comes out as.
pub trait RandomSource {
    /// Returns an index drawn uniformly from `0..=upper`.
    fn index(&mut self, upper: usize) -> usize;
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn index(&mut self, upper: usize) -> usize {
        self.random_range(0..=upper)
    }
}

/// Shuffles `items` in place.
///
/// Walks from the last index down to 1 and swaps each slot with one drawn
/// from `0..=i`. The result is a permutation of the input; with a fixed
/// source it is exactly reproducible.
pub fn shuffle<T, S: RandomSource + ?Sized>(items: &mut [T], rng: &mut S) {
    for i in (1..items.len()).rev() {
        let j = rng.index(i);
        items.swap(i, j);
    }
}
