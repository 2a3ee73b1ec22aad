//! Shared random-selection helpers.
//!
//! Every roll in the breeding core (inheritance branch, rarity branch, name
//! strategy, catalog draws) goes through these with an injected RNG, so a
//! seeded `StdRng` reproduces a whole breed.

use rand::Rng;

/// Pick one element uniformly. Panics on an empty slice, which only a
/// programming error in a static catalog could produce.
pub fn choose<'a, T, R: Rng + ?Sized>(rng: &mut R, items: &'a [T]) -> &'a T {
    &items[rng.gen_range(0..items.len())]
}

/// Fair coin: `true` half the time.
pub fn coin_flip<R: Rng + ?Sized>(rng: &mut R) -> bool {
    rng.gen::<f64>() < 0.5
}

/// Pick either `a` or `b` with equal probability.
pub fn either<T, R: Rng + ?Sized>(rng: &mut R, a: T, b: T) -> T {
    if coin_flip(rng) {
        a
    } else {
        b
    }
}

/// Weighted selection over `(value, weight)` pairs.
///
/// Walks the cumulative weights; when floating-point drift exhausts the walk
/// the last item wins. Returns `None` only for an empty list.
pub fn weighted_choice<T: Copy, R: Rng + ?Sized>(rng: &mut R, items: &[(T, f64)]) -> Option<T> {
    let total: f64 = items.iter().map(|(_, w)| w).sum();
    let mut roll = rng.gen::<f64>() * total;

    for &(value, weight) in items {
        if roll < weight {
            return Some(value);
        }
        roll -= weight;
    }

    items.last().map(|&(value, _)| value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn weighted_choice_follows_weights() {
        let mut rng = StdRng::seed_from_u64(7);
        let items = [('a', 0.5), ('b', 0.3), ('c', 0.2)];
        let mut counts = [0u32; 3];
        for _ in 0..10_000 {
            match weighted_choice(&mut rng, &items) {
                Some('a') => counts[0] += 1,
                Some('b') => counts[1] += 1,
                Some('c') => counts[2] += 1,
                _ => unreachable!(),
            }
        }
        assert!((4700..5300).contains(&counts[0]), "a={}", counts[0]);
        assert!((2700..3300).contains(&counts[1]), "b={}", counts[1]);
        assert!((1700..2300).contains(&counts[2]), "c={}", counts[2]);
    }

    #[test]
    fn weighted_choice_empty_is_none() {
        let mut rng = StdRng::seed_from_u64(1);
        let items: [(u8, f64); 0] = [];
        assert_eq!(weighted_choice(&mut rng, &items), None);
    }

    #[test]
    fn zero_weight_items_are_never_picked_before_the_tail() {
        let mut rng = StdRng::seed_from_u64(3);
        let items = [(1, 0.0), (2, 1.0)];
        for _ in 0..200 {
            assert_eq!(weighted_choice(&mut rng, &items), Some(2));
        }
    }

    #[test]
    fn seeded_choices_repeat() {
        let pool = [10, 20, 30, 40];
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            assert_eq!(choose(&mut a, &pool), choose(&mut b, &pool));
        }
    }
}
