use rand::{self, weak_rng, Rand, Rng, SeedableRng, XorShiftRng};
use std::cell::RefCell;

thread_local! {
    static WEAK_RNG: RefCell<XorShiftRng> = RefCell::new(weak_rng());
}

/// Reseed the thread-local RNG for a reproducible run.
pub fn seed(seed: [u32; 4]) {
    WEAK_RNG.with(|rng| rng.borrow_mut().reseed(seed));
}

/// Random value from the thread-local weak RNG.
pub fn random<T: Rand>() -> T {
    WEAK_RNG.with(|rng| rng.borrow_mut().gen())
}

/// Uniform random integer from the inclusive range [low, high].
pub fn random_range(low: i64, high: i64) -> i64 {
    WEAK_RNG.with(|rng| rng.borrow_mut().gen_range(low, high + 1))
}

/// Random element of a slice, or `None` if it's empty.
pub fn choose<T>(values: &[T]) -> Option<&T> {
    WEAK_RNG.with(|rng| rng.borrow_mut().choose(values))
}

/// Sample values from an iterator.
pub fn sample<T, I>(iterable: I, amount: usize) -> Vec<T>
    where I: IntoIterator<Item = T>
{
    WEAK_RNG.with(|rng| rand::sample(&mut *rng.borrow_mut(), iterable, amount))
}

/// Sample a single value from an iterator.
pub fn sample_single<T, I>(iterable: I) -> Option<T>
    where I: IntoIterator<Item = T>
{
    sample(iterable, 1).pop()
}

/// Return true with probability p.
pub fn do_with_probability(p: f64) -> bool {
    random::<f64>() <= p
}
