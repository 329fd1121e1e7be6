use rand::Rng;

/// Injectable pseudo-random source for the `random` operation.
///
/// The engine never reaches for process-wide randomness directly; tests
/// supply a deterministic implementation.
pub trait Rand {
    /// Draw an integer from `[min, max]`, inclusive of both ends.
    fn range(&mut self, min: i64, max: i64) -> i64;
}

/// Thread-local generator used outside of tests.
#[derive(Default)]
pub struct DefaultRand;

impl Rand for DefaultRand {
    fn range(&mut self, min: i64, max: i64) -> i64 {
        if min == max {
            return min;
        }
        let (low, high) = if min < max { (min, max) } else { (max, min) };
        rand::thread_rng().gen_range(low..=high)
    }
}
