//! Pair enumeration for round scoring
//!
//! Every unordered pair of distinct lineup positions is produced exactly
//! once, so scoring never double counts and never pairs a player with itself.

/// Number of unordered pairs among `n` players: C(n, 2)
pub fn pair_count(n: usize) -> usize {
    if n < 2 {
        0
    } else {
        n * (n - 1) / 2
    }
}

/// All unordered pairs `(a, b)` with `a < b < n`, ordered by `a` then `b`
pub fn all_pairs(n: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..n).flat_map(move |a| (a + 1..n).map(move |b| (a, b)))
}
