//! Degree type and the Fibonacci bounds that limit it.
//!
//! A node of degree `k` in a Fibonacci heap roots a subtree of at least
//! `Fib(k + 2)` nodes, so the largest degree in a heap of `n` nodes is at most
//! `log_phi(n)`. Even `n = 2^64` keeps degrees below 93, well inside a `u8`.

/// Type alias for node degree (number of direct children).
pub type Degree = u8;

/// Maximum representable degree.
pub const MAX_DEGREE: Degree = u8::MAX;

/// Increment a degree, panicking on overflow.
///
/// # Panics
///
/// Panics if `degree == MAX_DEGREE`, which would need a subtree of more than
/// `Fib(257)` nodes and therefore means the heap structure is corrupt.
///
/// # Example
///
/// ```rust
/// use arena_fibonacci_heap::degree::{checked_increment, Degree};
///
/// let degree: Degree = 5;
/// assert_eq!(checked_increment(degree), 6);
/// ```
#[inline]
pub fn checked_increment(degree: Degree) -> Degree {
    degree.checked_add(1).expect(
        "degree overflow: a Fibonacci heap node cannot have more than log_phi(n) children",
    )
}

/// Decrement a degree, saturating at zero.
#[inline]
pub fn saturating_decrement(degree: Degree) -> Degree {
    degree.saturating_sub(1)
}

/// `Fib(k)` with `Fib(0) = 0`, `Fib(1) = 1`, saturating at `u64::MAX`.
pub fn fibonacci(k: usize) -> u64 {
    let (mut a, mut b) = (0u64, 1u64);
    for _ in 0..k {
        let next = a.saturating_add(b);
        a = b;
        b = next;
    }
    a
}

/// Largest degree any node can reach in a heap of `n` nodes.
///
/// This is the largest `k` with `Fib(k + 2) <= n`, which never exceeds
/// `floor(log_phi(n))`.
pub fn max_degree(n: usize) -> usize {
    let n = n as u64;
    // Fib(2) = 1, Fib(3) = 2, ...
    let (mut k, mut lo, mut hi) = (0usize, 1u64, 2u64);
    while hi <= n {
        let next = lo.saturating_add(hi);
        lo = hi;
        hi = next;
        k += 1;
        if hi == u64::MAX {
            break;
        }
    }
    k
}

/// Number of slots the consolidation pass needs for a heap of `n` nodes:
/// one per possible degree plus one slot of slack.
#[inline]
pub fn table_len(n: usize) -> usize {
    max_degree(n) + 2
}
