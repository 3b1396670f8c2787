//! Prime capacity arithmetic shared by every table in this crate.
//!
//! All three engines keep their backing storage at a prime length so that
//! modular reduction of a hash spreads entries evenly and, for double
//! hashing, so that any nonzero probe step is coprime with the capacity and
//! therefore visits every slot. Growth always goes through [`next_prime`].

/// Returns `true` if `x` is prime.
///
/// Trial division up to `sqrt(x)`. Capacities in this crate stay small
/// enough that nothing faster is warranted.
///
/// # Examples
///
/// ```rust
/// use prime_probe::prime::is_prime;
///
/// assert!(is_prime(17));
/// assert!(!is_prime(18));
/// ```
pub fn is_prime(x: usize) -> bool {
    if x < 2 {
        return false;
    }

    let mut i = 2;
    while i * i <= x {
        if x % i == 0 {
            return false;
        }
        i += 1;
    }

    true
}

/// Returns the smallest prime greater than or equal to `n`.
///
/// # Examples
///
/// ```rust
/// use prime_probe::prime::next_prime;
///
/// assert_eq!(next_prime(17), 17);
/// assert_eq!(next_prime(18), 19);
/// assert_eq!(next_prime(34), 37);
/// ```
pub fn next_prime(n: usize) -> usize {
    let mut n = n.max(2);
    while !is_prime(n) {
        n += 1;
    }

    n
}
